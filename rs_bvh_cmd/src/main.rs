use anyhow::anyhow;
use clap::{Args, Parser};
use rs_bvh::skeleton::Skeleton;
use rs_motion::virtual_root::DEFAULT_SMOOTHING_RATIO;

#[derive(Debug, Clone, Args)]
struct InfoArgs {
    #[arg(short, long)]
    input_file: std::path::PathBuf,
}

#[derive(Debug, Clone, Args)]
struct EvaluateArgs {
    #[arg(short, long)]
    input_file: std::path::PathBuf,
    #[arg(short, long, default_value = "0")]
    frame: usize,
    #[arg(long)]
    virtual_root: bool,
    #[arg(long, default_value_t = DEFAULT_SMOOTHING_RATIO)]
    smoothing_ratio: f32,
}

#[derive(Debug, Clone, Args)]
struct BlendArgs {
    #[arg(long)]
    input_file_a: std::path::PathBuf,
    #[arg(long)]
    input_file_b: std::path::PathBuf,
    #[arg(long, default_value = "0")]
    frame_a: usize,
    #[arg(long, default_value = "0")]
    frame_b: usize,
    #[arg(short, long, default_value = "0.5")]
    alpha: f32,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
enum Cli {
    Info(InfoArgs),
    Evaluate(EvaluateArgs),
    Blend(BlendArgs),
}

fn dump_joint(skeleton: &Skeleton, joint_index: usize, depth: usize) {
    let joint = &skeleton.joints[joint_index];
    log::info!(
        "{}{} ({} channels)",
        "  ".repeat(depth),
        joint.name,
        joint.channels.len()
    );
    for child in &joint.childs {
        dump_joint(skeleton, *child, depth + 1);
    }
}

fn info(args: InfoArgs) -> anyhow::Result<()> {
    let (skeleton, motion) = rs_bvh::bvh_parser::load(&args.input_file)?;
    dump_joint(&skeleton, skeleton.root_joint, 0);
    log::info!(
        "{} joints, {} values per frame.",
        skeleton.joints.len(),
        skeleton.frame_value_count()
    );
    log::info!(
        "{} frames, {}s per frame, {}s total.",
        motion.frame_count,
        motion.frame_time,
        motion.duration_as_secs_f32()
    );
    Ok(())
}

fn evaluate(args: EvaluateArgs) -> anyhow::Result<()> {
    let (skeleton, mut motion) = rs_bvh::bvh_parser::load(&args.input_file)?;
    if args.virtual_root {
        rs_motion::virtual_root::extract_virtual_root_with_ratio(
            &skeleton,
            &mut motion,
            args.smoothing_ratio,
        )?;
        if let Some(track) = &motion.virtual_root {
            if let Some(drift) = track.frames.get(args.frame) {
                log::info!(
                    "Virtual root drift: position {}, rotation {}.",
                    drift.position,
                    drift.rotation
                );
            }
        }
    }
    let transforms = rs_motion::forward_kinematics::evaluate_frame(&skeleton, &motion, args.frame)?;
    let mut paths: Vec<&String> = transforms.keys().collect();
    paths.sort();
    for path in paths {
        let transform = transforms[path];
        let position: glam::Vec3 = transform.w_axis.truncate();
        log::info!("{}: {}", path, position);
    }
    Ok(())
}

fn blend(args: BlendArgs) -> anyhow::Result<()> {
    let (skeleton, motion_a) = rs_bvh::bvh_parser::load(&args.input_file_a)?;
    let (skeleton_b, motion_b) = rs_bvh::bvh_parser::load(&args.input_file_b)?;
    if skeleton.frame_value_count() != skeleton_b.frame_value_count() {
        return Err(anyhow!(
            "Incompatible skeletons: {} values per frame vs {}.",
            skeleton.frame_value_count(),
            skeleton_b.frame_value_count()
        ));
    }

    let frame_a = motion_a.get_frame(args.frame_a)?;
    let mut frame_b = motion_b.get_frame(args.frame_b)?.to_vec();
    // Keep the blended root where clip A currently is.
    rs_motion::blend::align_root_position(&skeleton, frame_a, &mut frame_b)?;
    let blended = rs_motion::blend::blend_frames(&skeleton, frame_a, &frame_b, args.alpha)?;
    log::info!("Blended frame at alpha {}:", args.alpha);
    log::info!(
        "{}",
        blended
            .iter()
            .map(|x| format!("{:.4}", x))
            .collect::<Vec<String>>()
            .join(" ")
    );

    let transforms = rs_motion::forward_kinematics::evaluate_pose(&skeleton, &blended)?;
    let mut paths: Vec<&String> = transforms.keys().collect();
    paths.sort();
    for path in paths {
        let position = transforms[path].w_axis.truncate();
        log::info!("{}: {}", path, position);
    }
    Ok(())
}

fn main() {
    let mut builder = env_logger::Builder::new();
    builder.write_style(env_logger::WriteStyle::Auto);
    builder.filter_level(log::LevelFilter::Trace);
    builder.init();

    match Cli::parse() {
        Cli::Info(args) => {
            info(args).unwrap();
        }
        Cli::Evaluate(args) => {
            evaluate(args).unwrap();
        }
        Cli::Blend(args) => {
            blend(args).unwrap();
        }
    }
}
