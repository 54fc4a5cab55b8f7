use rs_bvh::joint::{EJointRole, Joint};

pub fn read_position(joint: &Joint, values: &[f32]) -> glam::Vec3 {
    let mut position = glam::Vec3::ZERO;
    for (channel, value) in joint.channels.iter().zip(values.iter()) {
        if channel.is_position() {
            position[channel.axis_index()] = *value;
        }
    }
    position
}

pub fn write_position(joint: &Joint, position: glam::Vec3, values: &mut [f32]) {
    for (channel, value) in joint.channels.iter().zip(values.iter_mut()) {
        if channel.is_position() {
            *value = position[channel.axis_index()];
        }
    }
}

// Rotation channel values are stored in degrees; radians appear only at
// quaternion construction.
pub fn read_euler_radians(joint: &Joint, values: &[f32]) -> glam::Vec3 {
    let mut euler = glam::Vec3::ZERO;
    for (channel, value) in joint.channels.iter().zip(values.iter()) {
        if channel.is_rotation() {
            euler[channel.axis_index()] = value.to_radians();
        }
    }
    euler
}

// The composition order is role-dependent: the root composes Z, then Y,
// then X; every other joint composes Z, then X, then Y.
pub fn compose_rotation(role: EJointRole, euler_radians: glam::Vec3) -> glam::Quat {
    match role {
        EJointRole::Root => glam::Quat::from_euler(
            glam::EulerRot::ZYX,
            euler_radians.z,
            euler_radians.y,
            euler_radians.x,
        ),
        EJointRole::Limb => glam::Quat::from_euler(
            glam::EulerRot::ZXY,
            euler_radians.z,
            euler_radians.x,
            euler_radians.y,
        ),
    }
}

pub fn decompose_rotation(role: EJointRole, rotation: glam::Quat) -> glam::Vec3 {
    match role {
        EJointRole::Root => {
            let (z, y, x) = rotation.to_euler(glam::EulerRot::ZYX);
            glam::Vec3::new(x, y, z)
        }
        EJointRole::Limb => {
            let (z, x, y) = rotation.to_euler(glam::EulerRot::ZXY);
            glam::Vec3::new(x, y, z)
        }
    }
}

pub fn read_rotation(joint: &Joint, values: &[f32]) -> glam::Quat {
    compose_rotation(joint.role, read_euler_radians(joint, values))
}

pub fn write_rotation(joint: &Joint, rotation: glam::Quat, values: &mut [f32]) {
    let euler_radians = decompose_rotation(joint.role, rotation);
    for (channel, value) in joint.channels.iter().zip(values.iter_mut()) {
        if channel.is_rotation() {
            *value = euler_radians[channel.axis_index()].to_degrees();
        }
    }
}
