use glam::{EulerRot, Quat, Vec3};

/// Axis sequence used to decompose a joint's rotation into per-axis Euler
/// components for limiting. One of the six Tait-Bryan orderings.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum RotationOrder {
    #[default]
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl RotationOrder {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "XYZ" => Some(Self::Xyz),
            "XZY" => Some(Self::Xzy),
            "YXZ" => Some(Self::Yxz),
            "YZX" => Some(Self::Yzx),
            "ZXY" => Some(Self::Zxy),
            "ZYX" => Some(Self::Zyx),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Xyz => "XYZ",
            Self::Xzy => "XZY",
            Self::Yxz => "YXZ",
            Self::Yzx => "YZX",
            Self::Zxy => "ZXY",
            Self::Zyx => "ZYX",
        }
    }

    fn euler_rot(self) -> EulerRot {
        match self {
            Self::Xyz => EulerRot::XYZ,
            Self::Xzy => EulerRot::XZY,
            Self::Yxz => EulerRot::YXZ,
            Self::Yzx => EulerRot::YZX,
            Self::Zxy => EulerRot::ZXY,
            Self::Zyx => EulerRot::ZYX,
        }
    }

    /// x/y/z component index for the first, second and third rotation axis.
    fn axis_indices(self) -> [usize; 3] {
        match self {
            Self::Xyz => [0, 1, 2],
            Self::Xzy => [0, 2, 1],
            Self::Yxz => [1, 0, 2],
            Self::Yzx => [1, 2, 0],
            Self::Zxy => [2, 0, 1],
            Self::Zyx => [2, 1, 0],
        }
    }

    /// Decomposes `rotation` into per-axis Euler angles in this order. The
    /// result is keyed by axis (`x`, `y`, `z`), not by rotation position, so
    /// it lines up with per-axis limit vectors.
    pub fn decompose(self, rotation: Quat) -> Vec3 {
        let (first, second, third) = rotation.to_euler(self.euler_rot());
        let [i, j, k] = self.axis_indices();
        let mut angles = Vec3::ZERO;
        angles[i] = first;
        angles[j] = second;
        angles[k] = third;
        angles
    }

    /// Rebuilds a rotation from per-axis Euler angles in this order.
    pub fn compose(self, angles: Vec3) -> Quat {
        let [i, j, k] = self.axis_indices();
        Quat::from_euler(self.euler_rot(), angles[i], angles[j], angles[k])
    }
}

/// Static description of one constrained joint in a chain.
///
/// `rotation_min`/`rotation_max` are per-axis bounds in radians, each in
/// [-pi, pi], evaluated in the joint's own `order`. `min <= max` per axis is
/// a caller convention and is not enforced.
#[derive(Clone, Debug)]
pub struct JointConfig {
    pub bone: String,
    pub order: RotationOrder,
    pub rotation_min: Vec3,
    pub rotation_max: Vec3,
}

/// Static description of one chain: joints ordered from the effector's
/// immediate parent up to the chain root, plus the effector bone. The
/// effector itself is not a constrained joint.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    pub effector_bone: String,
    pub joints: Vec<JointConfig>,
}

/// Static IK configuration: a shared iteration count and the chain table.
/// Chain order is irrelevant to correctness; chains are solved independently.
#[derive(Clone, Debug, Default)]
pub struct IkConfig {
    pub iteration: u32,
    pub chains: Vec<ChainConfig>,
}

impl IkConfig {
    /// The iteration count actually used for solving. A configured count of
    /// zero falls back to one sweep rather than disabling the solver.
    pub fn sanitized_iteration(&self) -> u32 {
        if self.iteration == 0 { 1 } else { self.iteration }
    }
}
