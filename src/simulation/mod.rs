// simulation/mod.rs
// Re-exports and module declarations for simulation submodules

pub mod collision;
pub mod registry;
pub mod simulation;
pub mod spawn;

pub use simulation::*;
