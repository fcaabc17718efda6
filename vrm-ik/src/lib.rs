//! Constrained multi-chain inverse kinematics for humanoid (VRM-style) rigs.
//!
//! This crate is renderer- and input-agnostic. A caller binds kinematic chains
//! against a skeleton through the [`SkeletonRig`] seam, writes each chain's
//! goal pose every frame, and runs one solve pass per animation update.
//! Loading models, polling VR devices and drawing the result live in the
//! caller's own crates.

#![forbid(unsafe_code)]

mod defaults;
mod error;
mod model;
mod runtime;

#[cfg(feature = "json")]
mod json;

pub use error::*;
pub use model::*;
pub use runtime::*;
