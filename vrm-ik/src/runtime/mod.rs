mod chain;
mod ik;
mod skeleton;
mod solver;

pub use chain::*;
pub use ik::*;
pub use skeleton::*;
pub use solver::*;



#[cfg(test)]
mod solver_tests;
