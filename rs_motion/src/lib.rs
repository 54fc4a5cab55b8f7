pub mod blend;
pub mod channel_values;
pub mod error;
pub mod forward_kinematics;
pub mod virtual_root;
