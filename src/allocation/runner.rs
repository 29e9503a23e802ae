//! Round-based allocation loop.
//!
//! # Algorithm
//!
//! 1. Every unassigned participant claims their highest-ranked preference
//!    that has not been allocated yet
//! 2. Claims are grouped by resource; a lone claimant wins outright, a
//!    contested resource goes to one claimant chosen by the tie-break
//! 3. All winners of the round are applied at once, from the round's
//!    snapshot of claims
//! 4. Repeat until everyone is assigned or nobody can claim anything
//!
//! At most `min(participants, distinct resources)` rounds assign anything,
//! since each such round removes at least one participant and one resource.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::{AllocationConfig, DuplicatePolicy};
use super::tie_break::{TieBreak, UniformTieBreak};
use super::types::{Advisory, Assignment, Participant, Pick, RoundLog};
use crate::error::AllocationError;

/// Result of an allocation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationResult {
    /// Round-by-round log. A final round with no picks means the remaining
    /// participants had exhausted their preferences.
    pub rounds: Vec<RoundLog>,

    /// Participants who received a resource, in input order.
    pub assignments: Vec<Assignment>,

    /// Participants left without a resource, in input order.
    pub unassigned: Vec<String>,

    /// Non-fatal conditions encountered during the run.
    pub advisories: Vec<Advisory>,
}

impl AllocationResult {
    /// Returns the resource assigned to `participant`, if any.
    ///
    /// Identifiers are stored trimmed, so the lookup key is trimmed the same
    /// way: a participant submitted as `" Ana "` is found under `"Ana"` and
    /// under `" Ana "`.
    pub fn resource_of(&self, participant: &str) -> Option<&str> {
        let participant = participant.trim();
        self.assignments
            .iter()
            .find(|a| a.participant == participant)
            .map(|a| a.resource.as_str())
    }

    /// Final mapping as `(participant, resource)` pairs in input order.
    pub fn final_mapping(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|a| (a.participant.as_str(), a.resource.as_str()))
    }

    /// Number of rounds that assigned at least one resource.
    pub fn assignment_rounds(&self) -> usize {
        self.rounds.iter().filter(|r| !r.is_exhausted()).count()
    }

    /// Total number of contested picks across all rounds.
    pub fn contested_picks(&self) -> usize {
        self.rounds.iter().map(RoundLog::contested_count).sum()
    }

    /// Returns true if every participant received a resource.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }
}

/// A participant after input cleanup.
struct Entrant {
    id: String,
    preferences: Vec<String>,
}

/// Executes preference allocation.
pub struct AllocationRunner;

impl AllocationRunner {
    /// Runs allocation with a uniform random tie-break seeded from
    /// `config.seed` (or a fresh seed when unset).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_allocate::allocation::{AllocationConfig, AllocationRunner, Participant};
    ///
    /// let participants = vec![
    ///     Participant::new("A", ["X", "Y"]),
    ///     Participant::new("B", ["X", "Z"]),
    ///     Participant::new("C", ["Y"]),
    /// ];
    /// let config = AllocationConfig::default().with_seed(42);
    /// let result = AllocationRunner::run(&participants, &config).unwrap();
    ///
    /// assert!(result.is_complete());
    /// assert_eq!(result.resource_of("C"), Some("Y"));
    /// ```
    pub fn run(
        participants: &[Participant],
        config: &AllocationConfig,
    ) -> Result<AllocationResult, AllocationError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut tie_break = UniformTieBreak::new(StdRng::seed_from_u64(seed));
        Self::run_with_tie_break(participants, config, &mut tie_break)
    }

    /// Runs allocation with a caller-supplied tie-break.
    ///
    /// Input is validated before any state is built; a rejected run
    /// produces no partial result.
    pub fn run_with_tie_break<T: TieBreak + ?Sized>(
        participants: &[Participant],
        config: &AllocationConfig,
        tie_break: &mut T,
    ) -> Result<AllocationResult, AllocationError> {
        config.validate()?;
        let entrants = prepare(participants, config)?;
        let n = entrants.len();

        let mut advisories = Vec::new();
        if let Some(expected) = config.expected_participants {
            if n < expected {
                tracing::warn!(
                    submitted = n,
                    expected,
                    "fewer submissions than expected participants"
                );
                advisories.push(Advisory::UnderSubscribed {
                    submitted: n,
                    expected,
                });
            }
        }

        // (rank, round) per entrant once assigned
        let mut assigned: Vec<Option<(usize, usize)>> = vec![None; n];
        let mut allocated: HashSet<&str> = HashSet::new();
        let mut rounds = Vec::new();
        let mut round = 1;

        loop {
            let remaining: Vec<usize> = (0..n).filter(|&i| assigned[i].is_none()).collect();
            if remaining.is_empty() {
                break;
            }

            // Claims grouped by resource, in order of first claim.
            let mut claims: Vec<(&str, Vec<(usize, usize)>)> = Vec::new();
            let mut claim_index: HashMap<&str, usize> = HashMap::new();
            let mut idle = Vec::new();

            for &i in &remaining {
                let claim = entrants[i]
                    .preferences
                    .iter()
                    .enumerate()
                    .find(|(_, r)| !allocated.contains(r.as_str()));

                match claim {
                    Some((rank, resource)) => {
                        let slot = match claim_index.get(resource.as_str()) {
                            Some(&slot) => slot,
                            None => {
                                claims.push((resource.as_str(), Vec::new()));
                                claim_index.insert(resource.as_str(), claims.len() - 1);
                                claims.len() - 1
                            }
                        };
                        claims[slot].1.push((i, rank));
                    }
                    None => idle.push(entrants[i].id.clone()),
                }
            }

            if claims.is_empty() {
                tracing::warn!(
                    round,
                    remaining = idle.len(),
                    "remaining participants have no unallocated preferences left"
                );
                advisories.push(Advisory::PreferencesExhausted {
                    round,
                    participants: idle.clone(),
                });
                rounds.push(RoundLog {
                    round,
                    picks: Vec::new(),
                    idle,
                });
                break;
            }

            // Resolve every claim against this round's snapshot first.
            let mut winners = Vec::with_capacity(claims.len());
            let mut picks = Vec::with_capacity(claims.len());
            for (resource, claimants) in &claims {
                let ids: Vec<&str> = claimants
                    .iter()
                    .map(|&(i, _)| entrants[i].id.as_str())
                    .collect();

                let choice = if claimants.len() == 1 {
                    0
                } else {
                    let choice = tie_break.choose(resource, &ids);
                    if choice >= claimants.len() {
                        return Err(AllocationError::TieBreakOutOfRange {
                            resource: resource.to_string(),
                            index: choice,
                            claimants: claimants.len(),
                        });
                    }
                    tracing::trace!(
                        round,
                        resource = *resource,
                        tie_size = claimants.len(),
                        winner = ids[choice],
                        "tie-break resolved"
                    );
                    choice
                };

                winners.push((*resource, claimants[choice]));
                picks.push(Pick::new(
                    *resource,
                    ids.iter().map(|s| s.to_string()).collect(),
                    ids[choice],
                ));
            }

            for (resource, (i, rank)) in winners {
                assigned[i] = Some((rank, round));
                allocated.insert(resource);
            }

            let log = RoundLog { round, picks, idle };
            tracing::debug!(
                round,
                picks = log.picks.len(),
                contested = log.contested_count(),
                idle = log.idle.len(),
                "allocation round resolved"
            );
            rounds.push(log);
            round += 1;
        }

        let mut assignments = Vec::new();
        let mut unassigned = Vec::new();
        for (entrant, state) in entrants.into_iter().zip(assigned) {
            match state {
                Some((rank, won_in)) => {
                    let resource = entrant.preferences[rank].clone();
                    assignments.push(Assignment {
                        participant: entrant.id,
                        resource,
                        round: won_in,
                        rank,
                    });
                }
                None => unassigned.push(entrant.id),
            }
        }

        tracing::info!(
            rounds = rounds.len(),
            assigned = assignments.len(),
            unassigned = unassigned.len(),
            "allocation complete"
        );

        Ok(AllocationResult {
            rounds,
            assignments,
            unassigned,
            advisories,
        })
    }
}

/// Validates participants and builds cleaned working copies.
fn prepare(
    participants: &[Participant],
    config: &AllocationConfig,
) -> Result<Vec<Entrant>, AllocationError> {
    let mut seen = HashSet::new();
    let mut entrants = Vec::with_capacity(participants.len());

    for (index, participant) in participants.iter().enumerate() {
        let id = participant.id.trim();
        if id.is_empty() {
            return Err(AllocationError::MissingIdentifier { index });
        }
        if !seen.insert(id) {
            return Err(AllocationError::DuplicateParticipant { id: id.into() });
        }

        let mut listed = HashSet::new();
        let mut preferences = Vec::new();
        for resource in participant.preferences.iter().map(|r| r.trim()) {
            if resource.is_empty() {
                continue;
            }
            if !listed.insert(resource) {
                match config.duplicate_policy {
                    DuplicatePolicy::Collapse => {
                        tracing::debug!(participant = id, resource, "dropping repeated preference");
                        continue;
                    }
                    DuplicatePolicy::Reject => {
                        return Err(AllocationError::DuplicatePreference {
                            id: id.to_string(),
                            resource: resource.to_string(),
                        });
                    }
                }
            }
            preferences.push(resource.to_string());
        }

        if let Some(cap) = config.max_preferences {
            preferences.truncate(cap);
        }

        entrants.push(Entrant {
            id: id.to_string(),
            preferences,
        });
    }

    Ok(entrants)
}
