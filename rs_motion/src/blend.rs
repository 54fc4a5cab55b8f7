use crate::channel_values;
use crate::error::{Error, Result};
use rs_bvh::skeleton::Skeleton;

// Pure two-frame interpolator: positions lerp per channel, rotations
// slerp as whole quaternions and round-trip back through the joint's
// Euler channels. Clip-boundary handling is the caller's job (see
// `align_root_position`).
pub fn blend_frames(
    skeleton: &Skeleton,
    frame_a: &[f32],
    frame_b: &[f32],
    alpha: f32,
) -> Result<Vec<f32>> {
    if frame_a.len() != frame_b.len() {
        return Err(Error::ChannelMismatch {
            expected: frame_a.len(),
            actual: frame_b.len(),
        });
    }
    let expected = skeleton.frame_value_count();
    if frame_a.len() != expected {
        return Err(Error::ChannelMismatch {
            expected,
            actual: frame_a.len(),
        });
    }

    let mut blended: Vec<f32> = vec![0.0; expected];
    let cursor = blend_joint(
        skeleton,
        skeleton.root_joint,
        frame_a,
        frame_b,
        alpha,
        0,
        &mut blended,
    );
    debug_assert_eq!(cursor, expected);
    Ok(blended)
}

// Mirrors the forward kinematics walk: same depth-first order, same
// positional indexing into the flat frame vectors.
fn blend_joint(
    skeleton: &Skeleton,
    joint_index: usize,
    frame_a: &[f32],
    frame_b: &[f32],
    alpha: f32,
    cursor: usize,
    blended: &mut [f32],
) -> usize {
    let joint = &skeleton.joints[joint_index];
    let channel_count = joint.channels.len();
    if channel_count > 0 {
        let values_a = &frame_a[cursor..cursor + channel_count];
        let values_b = &frame_b[cursor..cursor + channel_count];
        let out = &mut blended[cursor..cursor + channel_count];

        for (i, channel) in joint.channels.iter().enumerate() {
            if channel.is_position() {
                out[i] = (1.0 - alpha) * values_a[i] + alpha * values_b[i];
            }
        }
        if joint.has_rotation_channels() {
            let rotation_a = channel_values::read_rotation(joint, values_a);
            let rotation_b = channel_values::read_rotation(joint, values_b);
            let rotation = rotation_a.slerp(rotation_b, alpha);
            channel_values::write_rotation(joint, rotation, out);
        }
    }

    let mut cursor = cursor + channel_count;
    for child in &joint.childs {
        cursor = blend_joint(skeleton, *child, frame_a, frame_b, alpha, cursor, blended);
    }
    cursor
}

// Copies the root's position channel values of `source_frame` over
// `target_frame` so a cross-clip blend does not jump at the boundary.
pub fn align_root_position(
    skeleton: &Skeleton,
    source_frame: &[f32],
    target_frame: &mut [f32],
) -> Result<()> {
    let expected = skeleton.frame_value_count();
    for actual in [source_frame.len(), target_frame.len()] {
        if actual != expected {
            return Err(Error::ChannelMismatch { expected, actual });
        }
    }
    let root_joint = skeleton.root();
    for (i, channel) in root_joint.channels.iter().enumerate() {
        if channel.is_position() {
            target_frame[i] = source_frame[i];
        }
    }
    Ok(())
}
