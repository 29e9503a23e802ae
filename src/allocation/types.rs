//! Allocation input records and the round log.

/// A participant and their ranked wish list.
///
/// Identifiers and resources are opaque strings compared by exact match:
/// `"Sliver Swarm"` and `"sliver swarm"` are different resources.
/// Surrounding whitespace and blank entries are stripped by the runner,
/// which never mutates the caller's value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    /// Unique name within a run.
    pub id: String,
    /// Resource identifiers, most-preferred first.
    pub preferences: Vec<String>,
}

impl Participant {
    /// Creates a participant.
    ///
    /// ```
    /// use u_allocate::allocation::Participant;
    ///
    /// let p = Participant::new("Ana", ["Eldrazi Unbound", "Sliver Swarm"]);
    /// assert_eq!(p.preferences.len(), 2);
    /// ```
    pub fn new<I, S>(id: impl Into<String>, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            preferences: preferences.into_iter().map(Into::into).collect(),
        }
    }
}

/// One resource claimed during a round and how the claim was settled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pick {
    pub resource: String,
    /// Everyone whose top available preference was this resource,
    /// in input order.
    pub claimants: Vec<String>,
    pub winner: String,
    /// True if more than one participant claimed the resource.
    pub contested: bool,
    /// Number of tied claimants, or `None` for an uncontested pick.
    pub tie_size: Option<usize>,
}

impl Pick {
    /// Creates a pick, deriving the contested flag and tie size from the
    /// claimant count.
    pub fn new(
        resource: impl Into<String>,
        claimants: Vec<String>,
        winner: impl Into<String>,
    ) -> Self {
        let contested = claimants.len() > 1;
        let tie_size = contested.then_some(claimants.len());
        Self {
            resource: resource.into(),
            claimants,
            winner: winner.into(),
            contested,
            tie_size,
        }
    }

    /// Claimants who lost the tie-break.
    pub fn losers(&self) -> impl Iterator<Item = &str> {
        self.claimants
            .iter()
            .map(String::as_str)
            .filter(move |c| *c != self.winner)
    }
}

/// Record of a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundLog {
    /// 1-based round number.
    pub round: usize,
    /// Claimed resources in order of first claim.
    pub picks: Vec<Pick>,
    /// Participants unassigned at the start of the round whose preference
    /// lists had nothing left to claim.
    pub idle: Vec<String>,
}

impl RoundLog {
    /// A terminal round: nobody could claim anything.
    pub fn is_exhausted(&self) -> bool {
        self.picks.is_empty()
    }

    /// Number of contested picks in this round.
    pub fn contested_count(&self) -> usize {
        self.picks.iter().filter(|p| p.contested).count()
    }
}

/// A resource assigned to a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub participant: String,
    pub resource: String,
    /// Round in which the resource was won.
    pub round: usize,
    /// Position of the resource in the participant's cleaned preference
    /// list (0 = first choice).
    pub rank: usize,
}

/// Non-fatal condition reported alongside a result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Advisory {
    /// Fewer submissions than the organizer expected.
    UnderSubscribed { submitted: usize, expected: usize },

    /// These participants ran out of unallocated preferences and stay
    /// unassigned. `round` is the terminal round.
    PreferencesExhausted {
        round: usize,
        participants: Vec<String>,
    },
}
