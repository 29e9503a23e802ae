//! Allocation configuration.

use crate::error::AllocationError;

/// What to do when a participant lists the same resource more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DuplicatePolicy {
    /// Keep the first (highest-ranked) occurrence and drop later repeats.
    ///
    /// This never changes the outcome: a repeat is only reachable once its
    /// first occurrence has been allocated, at which point the repeat is
    /// allocated too.
    #[default]
    Collapse,

    /// Reject the run with [`AllocationError::DuplicatePreference`].
    Reject,
}

/// Configuration for an allocation run.
///
/// # Examples
///
/// ```
/// use u_allocate::allocation::{AllocationConfig, DuplicatePolicy};
///
/// let config = AllocationConfig::default()
///     .with_expected_participants(8)
///     .with_max_preferences(4)
///     .with_duplicate_policy(DuplicatePolicy::Reject)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_preferences, Some(4));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationConfig {
    /// Number of participants the organizer expects. When fewer are
    /// submitted the result carries an
    /// [`Advisory::UnderSubscribed`](super::Advisory::UnderSubscribed).
    pub expected_participants: Option<usize>,

    /// Random seed for the uniform tie-break used by
    /// [`AllocationRunner::run`](super::AllocationRunner::run).
    /// `None` draws a fresh seed per run.
    pub seed: Option<u64>,

    /// Handling of repeated entries within one preference list.
    pub duplicate_policy: DuplicatePolicy,

    /// Only the first N preferences (after blanks and repeats are removed)
    /// are considered. `None` = no cap.
    pub max_preferences: Option<usize>,
}

impl AllocationConfig {
    pub fn with_expected_participants(mut self, n: usize) -> Self {
        self.expected_participants = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_max_preferences(mut self, n: usize) -> Self {
        self.max_preferences = Some(n);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.max_preferences == Some(0) {
            return Err(AllocationError::InvalidConfig(
                "max_preferences must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
