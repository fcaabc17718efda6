use super::solver;
use crate::{BindIssue, Error, IkChain, IkConfig, SkeletonRig};
use glam::{Quat, Vec3};

/// Owns every runnable chain for one skeleton instance and drives one solve
/// pass per animation update.
///
/// Lifecycle follows the skeleton: build once per skeleton load, discard and
/// rebuild when the skeleton is replaced. Between updates, callers write goal
/// poses (by effector role) and then call [`VrmIk::solve`]; the pass mutates
/// bone rotations in place and has no other observable effect.
pub struct VrmIk {
    chains: Vec<IkChain>,
    iteration: u32,
    bind_issues: Vec<BindIssue>,
}

impl VrmIk {
    /// Builds chains for `rig` from `config`. Binding is best-effort: chains
    /// whose effector bone is absent are skipped and absent joint bones are
    /// dropped, each recorded in [`VrmIk::bind_issues`]. Building never
    /// fails.
    pub fn new<R: SkeletonRig>(rig: &R, config: &IkConfig) -> Self {
        let mut bind_issues = Vec::new();
        let chains: Vec<IkChain> = config
            .chains
            .iter()
            .filter_map(|chain| IkChain::build(rig, chain, &mut bind_issues))
            .collect();
        let iteration = config.sanitized_iteration();

        log::info!(
            "vrm-ik: {} of {} chains bound, {} iterations",
            chains.len(),
            config.chains.len(),
            iteration
        );

        Self {
            chains,
            iteration,
            bind_issues,
        }
    }

    /// Chains in configuration order, with effector role metadata.
    pub fn chains(&self) -> &[IkChain] {
        &self.chains
    }

    pub fn chains_mut(&mut self) -> &mut [IkChain] {
        &mut self.chains
    }

    /// Finds the chain whose effector has the given role, for example
    /// `"leftHand"`.
    pub fn chain(&self, role: &str) -> Option<&IkChain> {
        self.chains.iter().find(|c| c.effector_role == role)
    }

    pub fn chain_mut(&mut self, role: &str) -> Option<&mut IkChain> {
        self.chains.iter_mut().find(|c| c.effector_role == role)
    }

    /// Writes the goal pose of the chain with the given effector role.
    pub fn set_goal(&mut self, role: &str, position: Vec3, rotation: Quat) -> Result<(), Error> {
        let Some(chain) = self.chain_mut(role) else {
            return Err(Error::UnknownChain {
                role: role.to_string(),
            });
        };
        chain.set_goal(position, rotation);
        Ok(())
    }

    /// Bones that could not be bound when this instance was built. Startup
    /// diagnostics only; solving is unaffected.
    pub fn bind_issues(&self) -> &[BindIssue] {
        &self.bind_issues
    }

    /// Runs one solve pass: every chain, in configuration order, with the
    /// configured iteration count. The order is fixed, so results are
    /// reproducible even when chains happen to share a bone.
    pub fn solve<R: SkeletonRig>(&mut self, rig: &mut R) {
        for chain in &mut self.chains {
            solver::solve(rig, chain, self.iteration);
        }
    }
}
