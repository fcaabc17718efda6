use glam::{Quat, Vec3};
use std::collections::HashMap;

/// Stable handle to a bone inside a [`SkeletonRig`]. Handles are only
/// meaningful for the rig that issued them and become invalid when the
/// skeleton is rebuilt.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BoneHandle(pub(crate) usize);

impl BoneHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Capability seam between the IK runtime and a skeleton implementation.
///
/// The solver depends only on this trait, never on a concrete rig. World
/// poses must reflect every local rotation written earlier in the same solve
/// pass: implementations either recompute by composing ancestors on demand
/// or invalidate cached world transforms in `set_local_rotation`.
pub trait SkeletonRig {
    /// Looks up a bone by identifier, for example a VRM humanoid bone name.
    fn resolve_bone(&self, name: &str) -> Option<BoneHandle>;

    fn local_rotation(&self, bone: BoneHandle) -> Quat;

    fn set_local_rotation(&mut self, bone: BoneHandle, rotation: Quat);

    fn world_position(&self, bone: BoneHandle) -> Vec3;

    fn world_orientation(&self, bone: BoneHandle) -> Quat;
}

#[derive(Clone, Debug)]
struct Bone {
    name: String,
    parent: Option<usize>,
    position: Vec3,
    rotation: Quat,
}

/// Index-based skeleton with world poses derived by composing ancestors on
/// demand, so they are always current during a solve pass. Doubles as the
/// crate's reference [`SkeletonRig`] and the test rig.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
    index: HashMap<String, usize>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root bone at `position` in skeleton space.
    pub fn add_root(&mut self, name: &str, position: Vec3) -> BoneHandle {
        self.push_bone(name, None, position)
    }

    /// Adds a child bone at `position` in its parent's local space.
    pub fn add_bone(&mut self, name: &str, parent: BoneHandle, position: Vec3) -> BoneHandle {
        self.push_bone(name, Some(parent.0), position)
    }

    fn push_bone(&mut self, name: &str, parent: Option<usize>, position: Vec3) -> BoneHandle {
        let index = self.bones.len();
        self.bones.push(Bone {
            name: name.to_string(),
            parent,
            position,
            rotation: Quat::IDENTITY,
        });
        self.index.insert(name.to_string(), index);
        BoneHandle(index)
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn bone_name(&self, bone: BoneHandle) -> Option<&str> {
        self.bones.get(bone.0).map(|b| b.name.as_str())
    }

    fn world_pose(&self, index: usize) -> (Vec3, Quat) {
        let Some(bone) = self.bones.get(index) else {
            return (Vec3::ZERO, Quat::IDENTITY);
        };
        match bone.parent {
            Some(parent) => {
                let (parent_position, parent_rotation) = self.world_pose(parent);
                (
                    parent_position + parent_rotation * bone.position,
                    (parent_rotation * bone.rotation).normalize(),
                )
            }
            None => (bone.position, bone.rotation),
        }
    }
}

impl SkeletonRig for Skeleton {
    fn resolve_bone(&self, name: &str) -> Option<BoneHandle> {
        self.index.get(name).copied().map(BoneHandle)
    }

    fn local_rotation(&self, bone: BoneHandle) -> Quat {
        self.bones
            .get(bone.0)
            .map(|b| b.rotation)
            .unwrap_or(Quat::IDENTITY)
    }

    fn set_local_rotation(&mut self, bone: BoneHandle, rotation: Quat) {
        if let Some(bone) = self.bones.get_mut(bone.0) {
            bone.rotation = rotation;
        }
    }

    fn world_position(&self, bone: BoneHandle) -> Vec3 {
        self.world_pose(bone.0).0
    }

    fn world_orientation(&self, bone: BoneHandle) -> Quat {
        self.world_pose(bone.0).1
    }
}
