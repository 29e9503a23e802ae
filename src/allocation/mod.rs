//! Round-based preference allocation.
//!
//! Each participant ranks the resources they want; each resource can go to
//! at most one participant. In every round the unassigned participants
//! claim their best still-available resource, uncontested claims win
//! outright, and contested claims are settled by a uniform random
//! tie-break. Winners are applied simultaneously at the end of the round.
//!
//! This is a simple draft, not a welfare-optimal matching: no attempt is
//! made to maximize the number of first choices or to find a stable
//! assignment.
//!
//! # Determinism
//!
//! The tie-break is the only source of randomness and is injected through
//! [`TieBreak`]. Two runs with the same input and the same sequence of
//! tie-break choices produce identical logs and mappings.

mod config;
mod runner;
mod tie_break;
mod types;

pub use config::{AllocationConfig, DuplicatePolicy};
pub use runner::{AllocationResult, AllocationRunner};
pub use tie_break::{ScriptedTieBreak, TieBreak, UniformTieBreak};
pub use types::{Advisory, Assignment, Participant, Pick, RoundLog};
