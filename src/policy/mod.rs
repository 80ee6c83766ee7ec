//! Policies for the phases of the search
//!
//! - Selection policies: how to score children while walking down the tree
//! - Simulation policies: how to play a game out from a leaf
//! - Backpropagation policies: how to fold a rollout back into the tree and
//!   the heuristic tables

pub mod backpropagation;
pub mod selection;
pub mod simulation;

pub use backpropagation::{AmafPolicy, BackpropagationPolicy, RavePolicy, StandardPolicy};
pub use selection::{AmafUctPolicy, RaveUctPolicy, SelectionPolicy, UctPolicy};
pub use simulation::{RandomPolicy, Rollout, SimulationPolicy};
