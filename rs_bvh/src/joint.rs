use crate::channel::EChannelType;
use serde::{Deserialize, Serialize};

pub const END_SITE_NAME: &str = "End Site";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum EJointRole {
    Root,
    Limb,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Joint {
    pub name: String,
    pub path: String,
    pub offset: glam::Vec3,
    pub channels: Vec<EChannelType>,
    pub role: EJointRole,
    pub parent: Option<usize>,
    pub childs: Vec<usize>,
}

impl Joint {
    pub fn is_end_site(&self) -> bool {
        self.name == END_SITE_NAME
    }

    pub fn has_position_channels(&self) -> bool {
        self.channels.iter().any(|x| x.is_position())
    }

    pub fn has_rotation_channels(&self) -> bool {
        self.channels.iter().any(|x| x.is_rotation())
    }
}
