use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct VirtualRootFrame {
    pub position: glam::Vec3,
    pub rotation: glam::Quat,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VirtualRootTrack {
    pub frames: Vec<VirtualRootFrame>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Motion {
    pub frame_count: usize,
    pub frame_time: f32,
    pub frames: Vec<Vec<f32>>,
    pub virtual_root: Option<VirtualRootTrack>,
}

impl Motion {
    pub fn get_frame(&self, index: usize) -> Result<&[f32]> {
        if index >= self.frame_count {
            return Err(Error::FrameIndexOutOfRange {
                index,
                frame_count: self.frame_count,
            });
        }
        Ok(self.frames[index].as_slice())
    }

    pub fn duration_as_secs_f32(&self) -> f32 {
        self.frame_count as f32 * self.frame_time
    }
}

#[cfg(test)]
mod test {
    use super::Motion;
    use crate::error::Error;

    #[test]
    fn test_case() {
        let motion = Motion {
            frame_count: 2,
            frame_time: 0.5,
            frames: vec![vec![0.0; 3], vec![1.0; 3]],
            virtual_root: None,
        };
        assert_eq!(motion.get_frame(1).unwrap(), &[1.0, 1.0, 1.0]);
        assert_eq!(motion.duration_as_secs_f32(), 1.0);
        match motion.get_frame(2) {
            Err(Error::FrameIndexOutOfRange { index, frame_count }) => {
                assert_eq!(index, 2);
                assert_eq!(frame_count, 2);
            }
            _ => panic!("Expect a frame index error."),
        }
    }
}
