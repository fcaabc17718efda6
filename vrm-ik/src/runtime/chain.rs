use crate::{BoneHandle, ChainConfig, RotationOrder, SkeletonRig};
use glam::{Quat, Vec3};
use std::fmt;

/// A configured joint bound to a live bone. Immutable after chain
/// construction; rebinding means discarding and rebuilding the chain.
#[derive(Clone, Debug)]
pub struct Joint {
    pub bone: BoneHandle,
    pub order: RotationOrder,
    pub rotation_min: Vec3,
    pub rotation_max: Vec3,
}

/// Externally owned target pose in the skeleton's coordinate space. Callers
/// write this every frame before solving, typically from a tracked device
/// pose transformed into skeleton space.
#[derive(Copy, Clone, Debug)]
pub struct Goal {
    pub position: Vec3,
    pub rotation: Quat,
}

/// A runnable chain: joints ordered nearest-effector to root, the effector
/// bone they steer, and the goal it should reach.
///
/// `effector_role` is the configured effector identifier (for example
/// `"leftHand"`), kept on the chain record so callers can locate a chain
/// without re-walking configuration.
#[derive(Clone, Debug)]
pub struct IkChain {
    pub goal: Goal,
    pub effector: BoneHandle,
    pub effector_role: String,
    pub joints: Vec<Joint>,
}

/// A bone that could not be bound while building chains. Reported, never
/// thrown: configurations covering many humanoid bones must keep working
/// against rigs with partial bone sets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BindIssue {
    /// The effector bone is absent; the whole chain was skipped.
    Effector { bone: String },
    /// A joint bone is absent; the joint was dropped from its chain.
    Joint { chain: String, bone: String },
}

impl fmt::Display for BindIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effector { bone } => {
                write!(f, "missing effector bone '{bone}': chain skipped")
            }
            Self::Joint { chain, bone } => {
                write!(f, "missing joint bone '{bone}' in chain '{chain}': joint dropped")
            }
        }
    }
}

impl IkChain {
    /// Binds `config` against `rig`. Returns `None` when the effector bone is
    /// absent (chain-fatal); absent joint bones are dropped and the chain is
    /// built from the remaining joints (non-fatal). Every missing bone is
    /// appended to `issues` and logged.
    ///
    /// The goal starts at the effector's current world position with identity
    /// orientation; callers overwrite it every frame.
    pub fn build<R: SkeletonRig>(
        rig: &R,
        config: &ChainConfig,
        issues: &mut Vec<BindIssue>,
    ) -> Option<IkChain> {
        let Some(effector) = rig.resolve_bone(&config.effector_bone) else {
            log::warn!(
                "vrm-ik: failed to resolve effector bone '{}', skipping chain",
                config.effector_bone
            );
            issues.push(BindIssue::Effector {
                bone: config.effector_bone.clone(),
            });
            return None;
        };

        let joints = config
            .joints
            .iter()
            .filter_map(|joint| {
                let Some(bone) = rig.resolve_bone(&joint.bone) else {
                    log::warn!(
                        "vrm-ik: failed to resolve joint bone '{}' in chain '{}'",
                        joint.bone,
                        config.effector_bone
                    );
                    issues.push(BindIssue::Joint {
                        chain: config.effector_bone.clone(),
                        bone: joint.bone.clone(),
                    });
                    return None;
                };
                Some(Joint {
                    bone,
                    order: joint.order,
                    rotation_min: joint.rotation_min,
                    rotation_max: joint.rotation_max,
                })
            })
            .collect();

        Some(IkChain {
            goal: Goal {
                position: rig.world_position(effector),
                rotation: Quat::IDENTITY,
            },
            effector,
            effector_role: config.effector_bone.clone(),
            joints,
        })
    }

    /// Writes the goal pose for the next solve pass.
    pub fn set_goal(&mut self, position: Vec3, rotation: Quat) {
        self.goal.position = position;
        self.goal.rotation = rotation;
    }
}
