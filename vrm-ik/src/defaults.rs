//! Embedded default chain table for VRM 0.x humanoid rigs.

use crate::{ChainConfig, IkConfig, JointConfig, RotationOrder};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

fn joint(bone: &str, order: RotationOrder, rotation_min: Vec3, rotation_max: Vec3) -> JointConfig {
    JointConfig {
        bone: bone.to_string(),
        order,
        rotation_min,
        rotation_max,
    }
}

impl IkConfig {
    /// Default configuration covering the required VRM 0.x humanoid bones:
    /// the spine column tracked by the neck, both arms tracked by the hands,
    /// and both legs tracked by the feet. Rigs missing optional bones (for
    /// example a shoulder) still bind; the missing joints are dropped with a
    /// diagnostic at build time.
    pub fn default_humanoid() -> Self {
        let free = Vec3::splat(PI);
        // Keeps the elbow from snapping through a perfectly straight pose.
        let elbow_guard = 0.1_f32.to_radians();
        let shoulder_range = 45.0_f32.to_radians();

        IkConfig {
            iteration: 8,
            chains: vec![
                // Hips -> neck.
                ChainConfig {
                    effector_bone: "neck".to_string(),
                    joints: vec![
                        joint("chest", RotationOrder::Xyz, -free, free),
                        joint("spine", RotationOrder::Xyz, -free, free),
                        joint("hips", RotationOrder::Xyz, -free, free),
                    ],
                },
                // Left shoulder -> hand.
                ChainConfig {
                    effector_bone: "leftHand".to_string(),
                    joints: vec![
                        joint(
                            "leftLowerArm",
                            RotationOrder::Yzx,
                            Vec3::new(0.0, -PI, 0.0),
                            Vec3::new(0.0, -elbow_guard, 0.0),
                        ),
                        joint(
                            "leftUpperArm",
                            RotationOrder::Zxy,
                            Vec3::new(-FRAC_PI_2, -PI, -PI),
                            Vec3::new(FRAC_PI_2, PI, PI),
                        ),
                        joint(
                            "leftShoulder",
                            RotationOrder::Zxy,
                            Vec3::new(0.0, -shoulder_range, -shoulder_range),
                            Vec3::new(0.0, shoulder_range, 0.0),
                        ),
                    ],
                },
                // Right shoulder -> hand.
                ChainConfig {
                    effector_bone: "rightHand".to_string(),
                    joints: vec![
                        joint(
                            "rightLowerArm",
                            RotationOrder::Yzx,
                            Vec3::new(0.0, elbow_guard, 0.0),
                            Vec3::new(0.0, PI, 0.0),
                        ),
                        joint(
                            "rightUpperArm",
                            RotationOrder::Zxy,
                            Vec3::new(-FRAC_PI_2, -PI, -PI),
                            Vec3::new(FRAC_PI_2, PI, PI),
                        ),
                        joint(
                            "rightShoulder",
                            RotationOrder::Zxy,
                            Vec3::new(0.0, -shoulder_range, 0.0),
                            Vec3::new(0.0, shoulder_range, shoulder_range),
                        ),
                    ],
                },
                // Left leg; the knee is a hinge that cannot bend backward.
                ChainConfig {
                    effector_bone: "leftFoot".to_string(),
                    joints: vec![
                        joint(
                            "leftLowerLeg",
                            RotationOrder::Xyz,
                            Vec3::new(-PI, 0.0, 0.0),
                            Vec3::ZERO,
                        ),
                        joint("leftUpperLeg", RotationOrder::Xyz, -free, free),
                    ],
                },
                // Right leg.
                ChainConfig {
                    effector_bone: "rightFoot".to_string(),
                    joints: vec![
                        joint(
                            "rightLowerLeg",
                            RotationOrder::Xyz,
                            Vec3::new(-PI, 0.0, 0.0),
                            Vec3::ZERO,
                        ),
                        joint("rightUpperLeg", RotationOrder::Xyz, -free, free),
                    ],
                },
            ],
        }
    }
}
