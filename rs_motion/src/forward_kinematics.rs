use crate::channel_values;
use crate::error::{Error, Result};
use rs_bvh::motion::Motion;
use rs_bvh::skeleton::Skeleton;
use std::collections::HashMap;

pub fn evaluate_frame(
    skeleton: &Skeleton,
    motion: &Motion,
    frame_index: usize,
) -> Result<HashMap<String, glam::Mat4>> {
    let frame_values = match motion.get_frame(frame_index) {
        Ok(frame_values) => frame_values,
        Err(err) => {
            return Err(Error::Bvh(
                err,
                Some(format!("Fail to evaluate frame {}.", frame_index)),
            ));
        }
    };
    let parent_global_transformation = match &motion.virtual_root {
        Some(track) => match track.frames.get(frame_index) {
            Some(drift) => {
                glam::Mat4::from_translation(drift.position) * glam::Mat4::from_quat(drift.rotation)
            }
            None => glam::Mat4::IDENTITY,
        },
        None => glam::Mat4::IDENTITY,
    };
    evaluate_pose_with_parent(skeleton, frame_values, parent_global_transformation)
}

pub fn evaluate_pose(
    skeleton: &Skeleton,
    frame_values: &[f32],
) -> Result<HashMap<String, glam::Mat4>> {
    evaluate_pose_with_parent(skeleton, frame_values, glam::Mat4::IDENTITY)
}

fn evaluate_pose_with_parent(
    skeleton: &Skeleton,
    frame_values: &[f32],
    parent_global_transformation: glam::Mat4,
) -> Result<HashMap<String, glam::Mat4>> {
    let expected = skeleton.frame_value_count();
    if frame_values.len() != expected {
        return Err(Error::ChannelMismatch {
            expected,
            actual: frame_values.len(),
        });
    }
    let mut transforms: HashMap<String, glam::Mat4> = HashMap::new();
    let cursor = walk_joint(
        skeleton,
        skeleton.root_joint,
        frame_values,
        0,
        parent_global_transformation,
        &mut transforms,
    );
    debug_assert_eq!(cursor, expected);
    Ok(transforms)
}

// Returns the channel cursor advanced past this joint's subtree.
fn walk_joint(
    skeleton: &Skeleton,
    joint_index: usize,
    frame_values: &[f32],
    cursor: usize,
    parent_global_transformation: glam::Mat4,
    transforms: &mut HashMap<String, glam::Mat4>,
) -> usize {
    let joint = &skeleton.joints[joint_index];
    let channel_count = joint.channels.len();
    let values = &frame_values[cursor..cursor + channel_count];

    let translation = joint.offset + channel_values::read_position(joint, values);
    let rotation = channel_values::read_rotation(joint, values);
    let local_transform = glam::Mat4::from_translation(translation) * glam::Mat4::from_quat(rotation);
    let global_transform = parent_global_transformation * local_transform;
    transforms.insert(joint.path.clone(), global_transform);

    let mut cursor = cursor + channel_count;
    for child in &joint.childs {
        cursor = walk_joint(
            skeleton,
            *child,
            frame_values,
            cursor,
            global_transform,
            transforms,
        );
    }
    cursor
}
