use crate::joint::{EJointRole, Joint};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Skeleton {
    pub name: String,
    pub joints: Vec<Joint>,
    pub root_joint: usize,
}

impl Skeleton {
    pub fn root(&self) -> &Joint {
        &self.joints[self.root_joint]
    }

    // Depth-first pre-order, children in file order. Every consumer of a
    // flat frame vector indexes through this list.
    pub fn channeled_joints(&self) -> Vec<usize> {
        let mut joint_indices: Vec<usize> = Vec::new();
        self.collect_channeled_joints(self.root_joint, &mut joint_indices);
        joint_indices
    }

    fn collect_channeled_joints(&self, joint_index: usize, out: &mut Vec<usize>) {
        let joint = &self.joints[joint_index];
        if !joint.channels.is_empty() {
            out.push(joint_index);
        }
        for child in &joint.childs {
            self.collect_channeled_joints(*child, out);
        }
    }

    pub fn frame_value_count(&self) -> usize {
        self.channeled_joints()
            .iter()
            .map(|x| self.joints[*x].channels.len())
            .sum()
    }

    pub fn find_joint(&self, path: &str) -> Option<usize> {
        self.joints.iter().position(|x| x.path == path)
    }

    pub fn set_joint_role(&mut self, path: &str, role: EJointRole) -> bool {
        match self.find_joint(path) {
            Some(joint_index) => {
                self.joints[joint_index].role = role;
                true
            }
            None => false,
        }
    }
}
