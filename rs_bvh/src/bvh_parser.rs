use crate::channel::EChannelType;
use crate::error::{Error, Result};
use crate::joint::{EJointRole, Joint, END_SITE_NAME};
use crate::motion::Motion;
use crate::skeleton::Skeleton;
use std::path::Path;

pub fn load(path: impl AsRef<Path>) -> Result<(Skeleton, Motion)> {
    let text = match std::fs::read_to_string(path.as_ref()) {
        Ok(text) => text,
        Err(err) => {
            return Err(Error::IO(
                err,
                Some(format!("Fail to read {:?}.", path.as_ref())),
            ));
        }
    };
    parse(&text)
}

pub fn parse(text: &str) -> Result<(Skeleton, Motion)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut index: usize = 0;
    if tokens.get(index).copied() == Some("HIERARCHY") {
        index += 1;
    }
    match tokens.get(index).copied() {
        Some("ROOT") | Some("JOINT") | Some("End") => {}
        Some(token) => {
            return Err(Error::UnexpectedToken {
                token: token.to_string(),
                index,
                expected: "ROOT",
            });
        }
        None => {
            return Err(Error::UnexpectedEndOfTokens(Some(String::from(
                "Missing hierarchy section.",
            ))));
        }
    }

    let mut joints: Vec<Joint> = Vec::new();
    let (root_joint, next_index) = parse_joint(&tokens, index, None, &mut joints)?;
    index = next_index;

    let skeleton = Skeleton {
        name: joints[root_joint].name.clone(),
        joints,
        root_joint,
    };

    // Everything between the hierarchy and `MOTION` is skipped. A file
    // without a motion section still yields an inspectable skeleton.
    while index < tokens.len() && tokens[index] != "MOTION" {
        index += 1;
    }

    let mut frame_count: usize = 0;
    let mut frame_time: f32 = 0.0;
    if index < tokens.len() {
        index += 1;
        if tokens.get(index).copied() == Some("Frames:") {
            frame_count = parse_number::<usize>(&tokens, index + 1)?;
            index += 2;
        }
        if tokens.get(index).copied() == Some("Frame")
            && tokens.get(index + 1).copied() == Some("Time:")
        {
            frame_time = parse_number::<f32>(&tokens, index + 2)?;
            index += 3;
        }
    }

    let frame_value_count = skeleton.frame_value_count();
    let mut frames: Vec<Vec<f32>> = Vec::with_capacity(frame_count);
    for _ in 0..frame_count {
        let mut values: Vec<f32> = Vec::with_capacity(frame_value_count);
        for _ in 0..frame_value_count {
            values.push(parse_number::<f32>(&tokens, index)?);
            index += 1;
        }
        frames.push(values);
    }

    log::trace!(
        "Parsed {} joints, {} frames, {} values per frame.",
        skeleton.joints.len(),
        frame_count,
        frame_value_count
    );

    let motion = Motion {
        frame_count,
        frame_time,
        frames,
        virtual_root: None,
    };
    Ok((skeleton, motion))
}

// Returns the index of the parsed joint in the arena together with the
// position of the first token after its block.
fn parse_joint(
    tokens: &[&str],
    index: usize,
    parent: Option<usize>,
    joints: &mut Vec<Joint>,
) -> Result<(usize, usize)> {
    let mut index = index;
    let (name, role) = match tokens.get(index).copied() {
        Some("ROOT") | Some("JOINT") => {
            let role = if tokens[index] == "ROOT" {
                EJointRole::Root
            } else {
                EJointRole::Limb
            };
            index += 1;
            let Some(name) = tokens.get(index).copied() else {
                return Err(Error::UnexpectedEndOfTokens(Some(String::from(
                    "Expected a joint name.",
                ))));
            };
            index += 1;
            (name.to_string(), role)
        }
        Some("End") => {
            match tokens.get(index + 1).copied() {
                Some("Site") => {}
                Some(token) => {
                    return Err(Error::UnexpectedToken {
                        token: token.to_string(),
                        index: index + 1,
                        expected: "Site",
                    });
                }
                None => {
                    return Err(Error::UnexpectedEndOfTokens(Some(String::from(
                        "Expected `Site`.",
                    ))));
                }
            }
            index += 2;
            (END_SITE_NAME.to_string(), EJointRole::Limb)
        }
        Some(token) => {
            return Err(Error::UnexpectedToken {
                token: token.to_string(),
                index,
                expected: "ROOT, JOINT or End",
            });
        }
        None => {
            return Err(Error::UnexpectedEndOfTokens(Some(String::from(
                "Expected a joint block.",
            ))));
        }
    };

    match tokens.get(index).copied() {
        Some("{") => {
            index += 1;
        }
        Some(token) => {
            return Err(Error::UnexpectedToken {
                token: token.to_string(),
                index,
                expected: "{",
            });
        }
        None => {
            return Err(Error::UnexpectedEndOfTokens(Some(String::from(
                "Expected `{`.",
            ))));
        }
    }

    let path = match parent {
        Some(parent_index) => format!("{}/{}", joints[parent_index].path, name),
        None => name.clone(),
    };
    let joint_index = joints.len();
    joints.push(Joint {
        name,
        path,
        offset: glam::Vec3::ZERO,
        channels: Vec::new(),
        role,
        parent,
        childs: Vec::new(),
    });

    loop {
        match tokens.get(index).copied() {
            None => {
                return Err(Error::UnbalancedBrace { index });
            }
            Some("}") => {
                index += 1;
                break;
            }
            Some("OFFSET") => {
                let x = parse_number::<f32>(tokens, index + 1)?;
                let y = parse_number::<f32>(tokens, index + 2)?;
                let z = parse_number::<f32>(tokens, index + 3)?;
                joints[joint_index].offset = glam::Vec3::new(x, y, z);
                index += 4;
            }
            Some("CHANNELS") => {
                let count = parse_number::<usize>(&tokens, index + 1)?;
                index += 2;
                let mut channels: Vec<EChannelType> = Vec::with_capacity(count);
                for _ in 0..count {
                    let Some(token) = tokens.get(index).copied() else {
                        return Err(Error::UnexpectedEndOfTokens(Some(String::from(
                            "Expected a channel kind.",
                        ))));
                    };
                    match EChannelType::from_token(token) {
                        Some(channel) => {
                            channels.push(channel);
                        }
                        None => {
                            return Err(Error::UnknownChannel {
                                token: token.to_string(),
                                index,
                            });
                        }
                    }
                    index += 1;
                }
                joints[joint_index].channels = channels;
            }
            Some("JOINT") | Some("End") => {
                let (child_index, next_index) = parse_joint(tokens, index, Some(joint_index), joints)?;
                joints[joint_index].childs.push(child_index);
                index = next_index;
            }
            Some(_) => {
                // Unknown keys are skipped for forward compatibility.
                index += 1;
            }
        }
    }

    Ok((joint_index, index))
}

fn parse_number<T: std::str::FromStr>(tokens: &[&str], index: usize) -> Result<T> {
    let Some(token) = tokens.get(index).copied() else {
        return Err(Error::UnexpectedEndOfTokens(Some(String::from(
            "Expected a numeric value.",
        ))));
    };
    match token.parse::<T>() {
        Ok(value) => Ok(value),
        Err(_) => Err(Error::MalformedNumber {
            token: token.to_string(),
            index,
        }),
    }
}
