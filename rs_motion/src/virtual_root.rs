use crate::channel_values;
use crate::error::{Error, Result};
use rs_bvh::motion::{Motion, VirtualRootFrame, VirtualRootTrack};
use rs_bvh::skeleton::Skeleton;

pub const UP_VECTOR: glam::Vec3 = glam::Vec3::Y;
pub const FALLBACK_FORWARD: glam::Vec3 = glam::Vec3::Z;
pub const FORWARD_DEGENERACY_THRESHOLD: f32 = 1e-4;
// Slerp weight toward the newly computed drift rotation. 1.0 disables
// smoothing.
pub const DEFAULT_SMOOTHING_RATIO: f32 = 0.8;

#[derive(Clone, Copy, Debug)]
pub struct RootDecomposition {
    pub local_position: glam::Vec3,
    pub local_rotation: glam::Quat,
    pub global_position: glam::Vec3,
    pub global_rotation: glam::Quat,
}

#[derive(Clone, Debug)]
pub struct VirtualRootExtractor {
    smoothing_ratio: f32,
    previous_rotation: Option<glam::Quat>,
}

impl VirtualRootExtractor {
    pub fn new(smoothing_ratio: f32) -> VirtualRootExtractor {
        VirtualRootExtractor {
            smoothing_ratio: smoothing_ratio.clamp(0.0, 1.0),
            previous_rotation: None,
        }
    }

    pub fn reset(&mut self) {
        self.previous_rotation = None;
    }

    // Splits the root's world position `ap` and rotation `ar` into a
    // horizontal-drift-plus-yaw term and the remaining local pose.
    // `global_rotation * local_rotation == ar` and
    // `global_position + local_position == ap` hold for every frame.
    pub fn decompose(&mut self, ap: glam::Vec3, ar: glam::Quat) -> RootDecomposition {
        let vertical = ap.project_onto_normalized(UP_VECTOR);

        let mut forward = ar * FALLBACK_FORWARD;
        forward -= forward.project_onto_normalized(UP_VECTOR);
        if forward.length() < FORWARD_DEGENERACY_THRESHOLD {
            // Root is looking straight up or down; normalizing would
            // produce an undefined direction.
            forward = FALLBACK_FORWARD;
        }

        let alignment = look_rotation(forward.normalize(), UP_VECTOR);
        let mut drift_removal = alignment.inverse();
        if let Some(previous_rotation) = self.previous_rotation {
            drift_removal = previous_rotation
                .slerp(drift_removal, self.smoothing_ratio)
                .normalize();
        }
        self.previous_rotation = Some(drift_removal);

        let local_position = drift_removal * vertical;
        let local_rotation = (drift_removal * ar).normalize();
        let global_position = ap - local_position;
        let global_rotation = (ar * local_rotation.conjugate()).normalize();
        RootDecomposition {
            local_position,
            local_rotation,
            global_position,
            global_rotation,
        }
    }
}

// Maps the canonical basis onto (right, up, forward). `forward` must be
// normalized and not parallel to `up`.
pub fn look_rotation(forward: glam::Vec3, up: glam::Vec3) -> glam::Quat {
    let right = up.cross(forward).normalize();
    let aligned_up = forward.cross(right);
    glam::Quat::from_mat3(&glam::Mat3::from_cols(right, aligned_up, forward)).normalize()
}

pub fn extract_virtual_root(skeleton: &Skeleton, motion: &mut Motion) -> Result<()> {
    extract_virtual_root_with_ratio(skeleton, motion, DEFAULT_SMOOTHING_RATIO)
}

// Idempotent per clip: an already augmented motion is left untouched.
pub fn extract_virtual_root_with_ratio(
    skeleton: &Skeleton,
    motion: &mut Motion,
    smoothing_ratio: f32,
) -> Result<()> {
    if motion.virtual_root.is_some() {
        return Ok(());
    }
    let root_joint = &skeleton.joints[skeleton.root_joint];
    if root_joint.channels.is_empty() {
        log::warn!(
            "Root joint `{}` carries no channels, nothing to extract.",
            root_joint.name
        );
        motion.virtual_root = Some(VirtualRootTrack::default());
        return Ok(());
    }

    let expected = skeleton.frame_value_count();
    let channel_count = root_joint.channels.len();
    let mut extractor = VirtualRootExtractor::new(smoothing_ratio);
    let mut frames: Vec<VirtualRootFrame> = Vec::with_capacity(motion.frames.len());
    for frame_values in motion.frames.iter_mut() {
        if frame_values.len() != expected {
            return Err(Error::ChannelMismatch {
                expected,
                actual: frame_values.len(),
            });
        }
        let values = &mut frame_values[0..channel_count];
        let ap = channel_values::read_position(root_joint, values);
        let ar = channel_values::read_rotation(root_joint, values);
        let decomposition = extractor.decompose(ap, ar);
        channel_values::write_position(root_joint, decomposition.local_position, values);
        channel_values::write_rotation(root_joint, decomposition.local_rotation, values);
        frames.push(VirtualRootFrame {
            position: decomposition.global_position,
            rotation: decomposition.global_rotation,
        });
    }
    motion.virtual_root = Some(VirtualRootTrack { frames });
    log::trace!(
        "Extracted virtual root drift for {} frames of `{}`.",
        motion.frames.len(),
        root_joint.name
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::forward_kinematics::evaluate_frame;
    use rs_bvh::bvh_parser;
    use std::f32::consts::FRAC_PI_2;

    fn recompose(decomposition: &RootDecomposition) -> glam::Mat4 {
        let global = glam::Mat4::from_translation(decomposition.global_position)
            * glam::Mat4::from_quat(decomposition.global_rotation);
        let local = glam::Mat4::from_translation(decomposition.local_position)
            * glam::Mat4::from_quat(decomposition.local_rotation);
        global * local
    }

    #[test]
    fn test_recomposition_without_smoothing() {
        let ap = glam::Vec3::new(3.0, 1.5, -2.0);
        let ar = glam::Quat::from_euler(glam::EulerRot::ZYX, 0.2, 0.9, 0.3);
        let mut extractor = VirtualRootExtractor::new(1.0);
        let decomposition = extractor.decompose(ap, ar);

        let original = glam::Mat4::from_translation(ap) * glam::Mat4::from_quat(ar);
        assert!(recompose(&decomposition).abs_diff_eq(original, 1e-5));

        // Drift keeps only horizontal translation and yaw; the local
        // term keeps the height.
        assert!((decomposition.global_position.y).abs() < 1e-5);
        assert!((decomposition.local_position.x).abs() < 1e-5);
        assert!((decomposition.local_position.z).abs() < 1e-5);
        assert!((decomposition.local_position.y - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_recomposition_rotation_exact_with_smoothing() {
        let mut extractor = VirtualRootExtractor::new(0.5);
        for yaw in [0.0_f32, 0.4, 0.9, 1.3] {
            let ap = glam::Vec3::new(yaw, 1.0, -yaw);
            let ar = glam::Quat::from_rotation_y(yaw);
            let decomposition = extractor.decompose(ap, ar);
            let recomposed = decomposition.global_rotation * decomposition.local_rotation;
            assert!(recomposed.angle_between(ar) < 1e-3);
            assert!((decomposition.global_position + decomposition.local_position - ap).length() < 1e-5);
        }
    }

    #[test]
    fn test_smoothing_lags_behind_new_drift() {
        let ar_0 = glam::Quat::IDENTITY;
        let ar_1 = glam::Quat::from_rotation_y(FRAC_PI_2);

        let mut smoothed = VirtualRootExtractor::new(0.5);
        smoothed.decompose(glam::Vec3::ZERO, ar_0);
        let decomposition = smoothed.decompose(glam::Vec3::ZERO, ar_1);
        let expected = glam::Quat::from_rotation_y(FRAC_PI_2 / 2.0);
        assert!(decomposition.global_rotation.angle_between(expected) < 1e-3);

        let mut unsmoothed = VirtualRootExtractor::new(1.0);
        unsmoothed.decompose(glam::Vec3::ZERO, ar_0);
        let decomposition = unsmoothed.decompose(glam::Vec3::ZERO, ar_1);
        assert!(decomposition.global_rotation.angle_between(ar_1) < 1e-3);
    }

    #[test]
    fn test_degenerate_forward_falls_back() {
        // Forward rotated onto the up axis.
        let ar = glam::Quat::from_rotation_x(-FRAC_PI_2);
        let mut extractor = VirtualRootExtractor::new(1.0);
        let decomposition = extractor.decompose(glam::Vec3::new(0.0, 2.0, 0.0), ar);

        assert!(decomposition.local_position.is_finite());
        assert!(decomposition.local_rotation.is_finite());
        assert!(decomposition.global_position.is_finite());
        assert!(decomposition.global_rotation.is_finite());

        // Fallback forward is +Z, so no drift rotation is removed.
        assert!(decomposition.global_rotation.angle_between(glam::Quat::IDENTITY) < 1e-3);
        assert!(decomposition.local_rotation.angle_between(ar) < 1e-3);
    }

    const SAMPLE: &str = r#"
HIERARCHY
ROOT hip
{
    OFFSET 0.0 0.0 0.0
    CHANNELS 6 Xposition Yposition Zposition Zrotation Yrotation Xrotation
    JOINT spine
    {
        OFFSET 0.0 1.0 0.0
        CHANNELS 3 Zrotation Xrotation Yrotation
        End Site
        {
            OFFSET 0.0 0.5 0.0
        }
    }
}
MOTION
Frames: 2
Frame Time: 0.033333
5.0 2.0 3.0 10.0 45.0 5.0 0.0 0.0 0.0
6.0 2.1 3.5 12.0 50.0 4.0 1.0 2.0 3.0
"#;

    #[test]
    fn test_extraction_is_idempotent() {
        let (skeleton, mut motion) = bvh_parser::parse(SAMPLE).unwrap();
        extract_virtual_root(&skeleton, &mut motion).unwrap();
        let frames = motion.frames.clone();
        let track = motion.virtual_root.clone().unwrap();
        extract_virtual_root(&skeleton, &mut motion).unwrap();
        assert_eq!(motion.frames, frames);
        assert_eq!(
            motion.virtual_root.as_ref().unwrap().frames.len(),
            track.frames.len()
        );
    }

    #[test]
    fn test_evaluation_matches_original_root_transform() {
        let (skeleton, motion) = bvh_parser::parse(SAMPLE).unwrap();
        let original = evaluate_frame(&skeleton, &motion, 0).unwrap();

        let mut augmented_motion = motion.clone();
        extract_virtual_root_with_ratio(&skeleton, &mut augmented_motion, 1.0).unwrap();
        let augmented = evaluate_frame(&skeleton, &augmented_motion, 0).unwrap();

        for path in ["hip", "hip/spine", "hip/spine/End Site"] {
            assert!(augmented
                .get(path)
                .unwrap()
                .abs_diff_eq(*original.get(path).unwrap(), 1e-4));
        }
    }
}
