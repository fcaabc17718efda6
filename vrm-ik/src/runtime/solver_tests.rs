use crate::{ChainConfig, IkChain, JointConfig, RotationOrder, Skeleton, SkeletonRig, solve};
use glam::{Quat, Vec3};
use std::f32::consts::PI;

fn free_joint(bone: &str) -> JointConfig {
    JointConfig {
        bone: bone.to_string(),
        order: RotationOrder::Xyz,
        rotation_min: Vec3::splat(-PI),
        rotation_max: Vec3::splat(PI),
    }
}

/// Shoulder at the origin, arm stretched along +x, total reach 0.7.
fn arm() -> (Skeleton, IkChain) {
    let mut skeleton = Skeleton::new();
    let shoulder = skeleton.add_root("shoulder", Vec3::ZERO);
    let elbow = skeleton.add_bone("elbow", shoulder, Vec3::new(0.3, 0.0, 0.0));
    let wrist = skeleton.add_bone("wrist", elbow, Vec3::new(0.3, 0.0, 0.0));
    skeleton.add_bone("hand", wrist, Vec3::new(0.1, 0.0, 0.0));

    let config = ChainConfig {
        effector_bone: "hand".to_string(),
        joints: vec![
            free_joint("wrist"),
            free_joint("elbow"),
            free_joint("shoulder"),
        ],
    };
    let mut issues = Vec::new();
    let chain = IkChain::build(&skeleton, &config, &mut issues).unwrap();
    assert!(issues.is_empty());
    (skeleton, chain)
}

fn effector_error(skeleton: &Skeleton, chain: &IkChain) -> f32 {
    skeleton
        .world_position(chain.effector)
        .distance(chain.goal.position)
}

#[test]
fn reachable_hand_goal_converges_within_eight_iterations() {
    let (mut skeleton, mut chain) = arm();
    chain.goal.position = Vec3::new(0.2, 0.4, 0.1);

    solve(&mut skeleton, &mut chain, 8);

    assert!(
        effector_error(&skeleton, &chain) < 1.0e-3,
        "residual error {}",
        effector_error(&skeleton, &chain)
    );
}

#[test]
fn convergence_is_monotonic_for_a_static_goal() {
    let (mut skeleton, mut chain) = arm();
    chain.goal.position = Vec3::new(0.1, 0.45, -0.2);

    let mut previous = effector_error(&skeleton, &chain);
    for _ in 0..8 {
        solve(&mut skeleton, &mut chain, 1);
        let current = effector_error(&skeleton, &chain);
        assert!(
            current <= previous + 1.0e-6,
            "error grew from {previous} to {current}"
        );
        previous = current;
    }
    assert!(previous < 1.0e-3);
}

#[test]
fn zero_iterations_still_run_one_sweep() {
    let (mut skeleton, mut chain) = arm();
    chain.goal.position = Vec3::new(0.0, 0.5, 0.0);
    let before = effector_error(&skeleton, &chain);

    solve(&mut skeleton, &mut chain, 0);

    assert!(effector_error(&skeleton, &chain) < before);
}

#[test]
fn effector_orientation_is_aligned_to_the_goal_rotation() {
    let (mut skeleton, mut chain) = arm();
    chain.goal.position = Vec3::new(0.2, 0.4, 0.1);
    chain.goal.rotation = Quat::from_euler(glam::EulerRot::XYZ, 0.3, -0.5, 0.7);

    solve(&mut skeleton, &mut chain, 8);

    let world = skeleton.world_orientation(chain.effector);
    assert!(
        world.angle_between(chain.goal.rotation) < 1.0e-4,
        "effector orientation off by {}",
        world.angle_between(chain.goal.rotation)
    );
}

#[test]
fn knee_cannot_bend_past_its_hinge_limit() {
    let mut skeleton = Skeleton::new();
    let hip = skeleton.add_root("upperLeg", Vec3::new(0.0, 1.0, 0.0));
    let knee = skeleton.add_bone("lowerLeg", hip, Vec3::new(0.0, -0.5, 0.0));
    skeleton.add_bone("foot", knee, Vec3::new(0.0, -0.5, 0.0));

    let config = ChainConfig {
        effector_bone: "foot".to_string(),
        joints: vec![JointConfig {
            bone: "lowerLeg".to_string(),
            order: RotationOrder::Xyz,
            rotation_min: Vec3::new(-PI, 0.0, 0.0),
            rotation_max: Vec3::ZERO,
        }],
    };
    let mut issues = Vec::new();
    let mut chain = IkChain::build(&skeleton, &config, &mut issues).unwrap();

    // Behind the knee: the unclamped step would rotate +x (hyperextension).
    chain.goal.position = Vec3::new(0.0, 0.9, -0.4);
    solve(&mut skeleton, &mut chain, 8);

    let angles = RotationOrder::Xyz.decompose(skeleton.local_rotation(knee));
    assert_eq!(angles.x, 0.0, "knee hyperextended to {}", angles.x);
    assert_eq!(angles.y, 0.0);
    assert_eq!(angles.z, 0.0);

    // The same chain still bends the allowed way.
    chain.goal.position = Vec3::new(0.0, 0.9, 0.4);
    solve(&mut skeleton, &mut chain, 8);
    let angles = RotationOrder::Xyz.decompose(skeleton.local_rotation(knee));
    assert!(angles.x < 0.0, "knee did not bend forward: {}", angles.x);
}

#[test]
fn fuzzed_goals_never_violate_joint_limits() {
    let mut skeleton = Skeleton::new();
    let shoulder = skeleton.add_root("shoulder", Vec3::ZERO);
    let elbow = skeleton.add_bone("elbow", shoulder, Vec3::new(0.3, 0.0, 0.0));
    let wrist = skeleton.add_bone("wrist", elbow, Vec3::new(0.3, 0.0, 0.0));
    skeleton.add_bone("hand", wrist, Vec3::new(0.1, 0.0, 0.0));

    let wrist_limit = Vec3::splat(0.5);
    let config = ChainConfig {
        effector_bone: "hand".to_string(),
        joints: vec![
            JointConfig {
                bone: "wrist".to_string(),
                order: RotationOrder::Xyz,
                rotation_min: -wrist_limit,
                rotation_max: wrist_limit,
            },
            JointConfig {
                bone: "elbow".to_string(),
                order: RotationOrder::Xyz,
                rotation_min: Vec3::new(0.0, 0.0, -2.5),
                rotation_max: Vec3::ZERO,
            },
            free_joint("shoulder"),
        ],
    };
    let mut issues = Vec::new();
    let mut chain = IkChain::build(&skeleton, &config, &mut issues).unwrap();

    // Deterministic LCG so failures reproduce.
    let mut state = 0x2545_f491_u32;
    let mut next = move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 8) as f32 / (1 << 24) as f32 * 2.0 - 1.0
    };

    for _ in 0..50 {
        chain.goal.position = Vec3::new(next(), next(), next());
        solve(&mut skeleton, &mut chain, 4);

        for joint in &chain.joints {
            let rotation = skeleton.local_rotation(joint.bone);
            assert!(rotation.is_finite());
            let angles = joint.order.decompose(rotation);
            for axis in 0..3 {
                assert!(
                    angles[axis] >= joint.rotation_min[axis] - 1.0e-3
                        && angles[axis] <= joint.rotation_max[axis] + 1.0e-3,
                    "axis {axis} of {:?} out of range: {} not in [{}, {}] for goal {}",
                    skeleton.bone_name(joint.bone),
                    angles[axis],
                    joint.rotation_min[axis],
                    joint.rotation_max[axis],
                    chain.goal.position
                );
            }
        }
    }
}

#[test]
fn unreachable_goal_stays_stable_over_many_solves() {
    let (mut skeleton, mut chain) = arm();
    chain.goal.position = Vec3::new(5.0, 5.0, 5.0);

    let mut previous = skeleton.world_position(chain.effector);
    let mut last_step = f32::MAX;
    for _ in 0..50 {
        solve(&mut skeleton, &mut chain, 8);

        let position = skeleton.world_position(chain.effector);
        assert!(position.is_finite());
        for joint in &chain.joints {
            assert!(skeleton.local_rotation(joint.bone).is_finite());
        }
        last_step = position.distance(previous);
        previous = position;
    }

    // The chain ends up fully extended toward the goal and stops moving.
    assert!(last_step < 1.0e-4, "still moving by {last_step}");
    let residual = effector_error(&skeleton, &chain);
    let fully_extended = Vec3::new(5.0, 5.0, 5.0).length() - 0.7;
    assert!(
        (residual - fully_extended).abs() < 1.0e-2,
        "residual {residual}, expected about {fully_extended}"
    );
}

#[test]
fn solve_is_idempotent_once_converged() {
    let (mut skeleton, mut chain) = arm();
    chain.goal.position = Vec3::new(0.25, 0.3, -0.15);

    solve(&mut skeleton, &mut chain, 50);
    assert!(effector_error(&skeleton, &chain) < 1.0e-3);

    let snapshot: Vec<[f32; 4]> = (0..skeleton.bone_count())
        .map(|i| {
            skeleton
                .local_rotation(skeleton.resolve_bone(bone_names()[i]).unwrap())
                .to_array()
        })
        .collect();

    solve(&mut skeleton, &mut chain, 8);

    for (i, expected) in snapshot.iter().enumerate() {
        let actual = skeleton
            .local_rotation(skeleton.resolve_bone(bone_names()[i]).unwrap())
            .to_array();
        assert_eq!(&actual, expected, "bone '{}' moved at rest", bone_names()[i]);
    }
}

fn bone_names() -> [&'static str; 4] {
    ["shoulder", "elbow", "wrist", "hand"]
}

#[test]
fn chain_with_zero_joints_solves_as_a_noop() {
    let mut skeleton = Skeleton::new();
    let root = skeleton.add_root("root", Vec3::ZERO);
    skeleton.add_bone("hand", root, Vec3::new(0.5, 0.0, 0.0));

    let config = ChainConfig {
        effector_bone: "hand".to_string(),
        joints: vec![free_joint("ghostElbow"), free_joint("ghostShoulder")],
    };
    let mut issues = Vec::new();
    let mut chain = IkChain::build(&skeleton, &config, &mut issues).unwrap();
    assert!(chain.joints.is_empty());
    assert_eq!(issues.len(), 2);

    let hand = skeleton.resolve_bone("hand").unwrap();
    let position = skeleton.world_position(hand);
    let rotation = skeleton.local_rotation(hand);

    chain.goal.position = Vec3::new(3.0, 3.0, 3.0);
    solve(&mut skeleton, &mut chain, 8);

    assert_eq!(skeleton.world_position(hand), position);
    assert_eq!(skeleton.local_rotation(hand), rotation);
}
