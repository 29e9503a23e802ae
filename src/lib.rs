//! Preference-based allocation of single-unit resources.
//!
//! Participants rank the resources they want (decks in a league draft,
//! for example); every resource goes to at most one participant and every
//! participant receives at most one resource.
//!
//! - **Allocation**: round-based draft. Each round the unassigned
//!   participants claim their best remaining preference; contested claims
//!   are settled by an injectable uniform random tie-break.
//! - **Submissions**: conversion of stored form records
//!   (`PlayerName`, `Deck1` .. `DeckN`) into participants.
//! - **Roster**: the organizer's player list and who has submitted.
//!
//! # Architecture
//!
//! The crate is a pure library: no I/O, no global state. Form handling,
//! storage and result rendering belong to the caller. Diagnostics are
//! emitted through `tracing`; installing a subscriber is up to the host.

pub mod allocation;
pub mod error;
pub mod roster;
pub mod submission;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::AllocationError;
