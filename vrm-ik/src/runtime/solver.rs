use crate::{IkChain, Joint, SkeletonRig};
use glam::Quat;

/// Effector-to-goal distance below which a chain counts as converged and a
/// solve pass stops sweeping. In skeleton length units; deterministic and
/// independent of frame timing.
pub const POSITION_EPSILON: f32 = 1.0e-3;

/// Runs up to `iterations` constrained CCD sweeps over `chain`, mutating
/// joint rotations through `rig` so the effector's world position approaches
/// the goal and its orientation is aligned to the goal orientation.
///
/// Within a sweep, joints are visited in chain order, nearest-effector to
/// root. This order is fixed; changing it changes convergence behavior. Each
/// joint receives the minimal world rotation carrying the joint-to-effector
/// direction onto the joint-to-goal direction, expressed in the joint's local
/// frame, then clamped per axis in the joint's configured rotation order
/// before the next joint is visited. Clamping after every joint update is
/// what keeps intermediate poses inside anatomical limits.
///
/// There are no error outcomes. An unreachable goal leaves residual error
/// after the sweeps; a chain with no joints is a no-op.
pub fn solve<R: SkeletonRig>(rig: &mut R, chain: &mut IkChain, iterations: u32) {
    if chain.joints.is_empty() {
        return;
    }

    let iterations = iterations.max(1);
    let epsilon_squared = POSITION_EPSILON * POSITION_EPSILON;

    for _ in 0..iterations {
        let error = rig
            .world_position(chain.effector)
            .distance_squared(chain.goal.position);
        if error < epsilon_squared {
            break;
        }

        for joint in &chain.joints {
            step_joint(rig, chain, joint);
        }
    }

    align_effector(rig, chain);
}

/// One CCD relaxation step: rotate `joint` so the effector direction swings
/// toward the goal direction, then clamp to the joint's limits.
fn step_joint<R: SkeletonRig>(rig: &mut R, chain: &IkChain, joint: &Joint) {
    let joint_position = rig.world_position(joint.bone);
    let effector_position = rig.world_position(chain.effector);

    // A joint coincident with the effector or the goal has no defined
    // direction; skip it rather than rotating on a degenerate axis.
    let Some(to_effector) = (effector_position - joint_position).try_normalize() else {
        return;
    };
    let Some(to_goal) = (chain.goal.position - joint_position).try_normalize() else {
        return;
    };

    let world_delta = Quat::from_rotation_arc(to_effector, to_goal);

    let local = rig.local_rotation(joint.bone);
    let world = rig.world_orientation(joint.bone);
    let parent_world = world * local.inverse();
    let local_delta = parent_world.inverse() * world_delta * parent_world;

    let rotated = (local_delta * local).normalize();
    rig.set_local_rotation(joint.bone, clamp_to_limits(rotated, joint));
}

fn clamp_to_limits(rotation: Quat, joint: &Joint) -> Quat {
    let angles = joint.order.decompose(rotation);
    let clamped = angles.clamp(joint.rotation_min, joint.rotation_max);
    if clamped == angles {
        return rotation;
    }
    joint.order.compose(clamped)
}

/// The effector is not a constrained joint; its world orientation is set to
/// the goal orientation directly.
fn align_effector<R: SkeletonRig>(rig: &mut R, chain: &IkChain) {
    let local = rig.local_rotation(chain.effector);
    let world = rig.world_orientation(chain.effector);
    let parent_world = world * local.inverse();
    let aligned = (parent_world.inverse() * chain.goal.rotation).normalize();
    rig.set_local_rotation(chain.effector, aligned);
}
