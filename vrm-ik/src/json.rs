//! JSON configuration loading.
//!
//! The accepted shape mirrors the declarative chain/joint/limit table:
//!
//! ```json
//! {
//!   "iteration": 8,
//!   "chains": [
//!     {
//!       "effectorBone": "leftHand",
//!       "joints": [
//!         {
//!           "bone": "leftLowerArm",
//!           "order": "YZX",
//!           "rotationMin": [0.0, -3.14159, 0.0],
//!           "rotationMax": [0.0, -0.00175, 0.0]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::{ChainConfig, Error, IkConfig, JointConfig, RotationOrder};
use glam::Vec3;
use serde::Deserialize;
use std::f32::consts::PI;

#[derive(Debug, Deserialize)]
struct ConfigDef {
    #[serde(default)]
    iteration: u32,
    #[serde(default)]
    chains: Vec<ChainDef>,
}

#[derive(Debug, Deserialize)]
struct ChainDef {
    #[serde(rename = "effectorBone")]
    effector_bone: String,
    #[serde(default)]
    joints: Vec<JointDef>,
}

#[derive(Debug, Deserialize)]
struct JointDef {
    bone: String,
    #[serde(default)]
    order: Option<String>,
    #[serde(rename = "rotationMin")]
    rotation_min: [f32; 3],
    #[serde(rename = "rotationMax")]
    rotation_max: [f32; 3],
}

fn parse_limit(bone: &str, components: [f32; 3]) -> Result<Vec3, Error> {
    for value in components {
        if !(-PI..=PI).contains(&value) {
            return Err(Error::JsonRotationLimitOutOfRange {
                bone: bone.to_string(),
                value,
            });
        }
    }
    Ok(Vec3::from_array(components))
}

fn convert_joint(def: JointDef) -> Result<JointConfig, Error> {
    let order = match def.order.as_deref() {
        None => RotationOrder::default(),
        Some(name) => {
            RotationOrder::from_name(name).ok_or_else(|| Error::JsonUnknownRotationOrder {
                bone: def.bone.clone(),
                value: name.to_string(),
            })?
        }
    };
    let rotation_min = parse_limit(&def.bone, def.rotation_min)?;
    let rotation_max = parse_limit(&def.bone, def.rotation_max)?;
    Ok(JointConfig {
        bone: def.bone,
        order,
        rotation_min,
        rotation_max,
    })
}

impl IkConfig {
    /// Parses a configuration from its JSON form. Chains with no joints are
    /// accepted; they build into runnable no-op chains. A missing or zero
    /// `iteration` falls back to one sweep at solve time.
    pub fn from_json_str(input: &str) -> Result<IkConfig, Error> {
        let def: ConfigDef = serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;

        let mut chains = Vec::with_capacity(def.chains.len());
        for chain in def.chains {
            let mut joints = Vec::with_capacity(chain.joints.len());
            for joint in chain.joints {
                joints.push(convert_joint(joint)?);
            }
            chains.push(ChainConfig {
                effector_bone: chain.effector_bone,
                joints,
            });
        }

        Ok(IkConfig {
            iteration: def.iteration,
            chains,
        })
    }
}
