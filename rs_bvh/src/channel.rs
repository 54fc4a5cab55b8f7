use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum EChannelType {
    XPosition,
    YPosition,
    ZPosition,
    XRotation,
    YRotation,
    ZRotation,
}

impl EChannelType {
    pub fn from_token(token: &str) -> Option<EChannelType> {
        match token {
            "Xposition" => Some(EChannelType::XPosition),
            "Yposition" => Some(EChannelType::YPosition),
            "Zposition" => Some(EChannelType::ZPosition),
            "Xrotation" => Some(EChannelType::XRotation),
            "Yrotation" => Some(EChannelType::YRotation),
            "Zrotation" => Some(EChannelType::ZRotation),
            _ => None,
        }
    }

    pub fn to_token(&self) -> &'static str {
        match self {
            EChannelType::XPosition => "Xposition",
            EChannelType::YPosition => "Yposition",
            EChannelType::ZPosition => "Zposition",
            EChannelType::XRotation => "Xrotation",
            EChannelType::YRotation => "Yrotation",
            EChannelType::ZRotation => "Zrotation",
        }
    }

    pub fn is_position(&self) -> bool {
        match self {
            EChannelType::XPosition | EChannelType::YPosition | EChannelType::ZPosition => true,
            _ => false,
        }
    }

    pub fn is_rotation(&self) -> bool {
        !self.is_position()
    }

    pub fn axis_index(&self) -> usize {
        match self {
            EChannelType::XPosition | EChannelType::XRotation => 0,
            EChannelType::YPosition | EChannelType::YRotation => 1,
            EChannelType::ZPosition | EChannelType::ZRotation => 2,
        }
    }
}

#[cfg(test)]
mod test {
    use super::EChannelType;

    #[test]
    fn test_case() {
        for token in [
            "Xposition",
            "Yposition",
            "Zposition",
            "Xrotation",
            "Yrotation",
            "Zrotation",
        ] {
            let channel = EChannelType::from_token(token).unwrap();
            assert_eq!(channel.to_token(), token);
        }
        assert!(EChannelType::from_token("Wrotation").is_none());
        assert!(EChannelType::XPosition.is_position());
        assert!(EChannelType::ZRotation.is_rotation());
        assert_eq!(EChannelType::YRotation.axis_index(), 1);
    }
}
