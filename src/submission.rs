//! Stored submission records.
//!
//! The submission form writes one flat record per player with the columns
//! `PlayerName`, `Timestamp` and `Deck1` .. `DeckN`. This module turns
//! those records into [`Participant`]s for the allocator.

use crate::allocation::Participant;
#[cfg(feature = "serde")]
use crate::allocation::{AllocationConfig, AllocationResult, AllocationRunner};
use crate::error::AllocationError;

const PLAYER_NAME: &str = "PlayerName";
const TIMESTAMP: &str = "Timestamp";
const DECK_PREFIX: &str = "Deck";

/// One player's stored submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Submission {
    pub player_name: Option<String>,
    pub timestamp: Option<String>,
    /// `(rank, deck)` pairs sorted by rank, e.g. `Deck2` → rank 2.
    pub decks: Vec<(u32, String)>,
}

impl Submission {
    /// Builds a submission from `(column, value)` pairs.
    ///
    /// Deck columns are ordered by their numeric suffix, so `Deck10`
    /// follows `Deck9` regardless of column order. Columns that are not
    /// `PlayerName`, `Timestamp` or `Deck<N>` are ignored.
    ///
    /// ```
    /// use u_allocate::submission::Submission;
    ///
    /// let s = Submission::from_fields([
    ///     ("Deck2", "Eldrazi Unbound"),
    ///     ("PlayerName", "Ana"),
    ///     ("Deck1", "Sliver Swarm"),
    /// ]);
    /// assert_eq!(s.preferences(), vec!["Sliver Swarm", "Eldrazi Unbound"]);
    /// ```
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut submission = Submission::default();
        for (key, value) in fields {
            let key = key.as_ref();
            match key {
                PLAYER_NAME => submission.player_name = Some(value.into()),
                TIMESTAMP => submission.timestamp = Some(value.into()),
                _ => {
                    if let Some(rank) = deck_rank(key) {
                        submission.decks.push((rank, value.into()));
                    }
                }
            }
        }
        submission.decks.sort_by_key(|&(rank, _)| rank);
        submission
    }

    /// Non-blank deck names in rank order, trimmed.
    pub fn preferences(&self) -> Vec<&str> {
        self.decks
            .iter()
            .map(|(_, deck)| deck.trim())
            .filter(|deck| !deck.is_empty())
            .collect()
    }

    /// Converts into a participant. `index` is the record's position,
    /// used in the error when the player name is missing.
    pub fn into_participant(self, index: usize) -> Result<Participant, AllocationError> {
        let preferences: Vec<String> = self.preferences().into_iter().map(String::from).collect();
        let id = self
            .player_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(AllocationError::MissingIdentifier { index })?;
        Ok(Participant { id, preferences })
    }
}

fn deck_rank(key: &str) -> Option<u32> {
    key.strip_prefix(DECK_PREFIX)?.parse().ok()
}

/// Converts stored submissions into participants, in record order.
pub fn participants_from_submissions(
    submissions: impl IntoIterator<Item = Submission>,
) -> Result<Vec<Participant>, AllocationError> {
    submissions
        .into_iter()
        .enumerate()
        .map(|(index, s)| s.into_participant(index))
        .collect()
}

/// Decodes a JSON array of flat submission objects.
///
/// `null` values count as absent columns; any other non-string value is
/// rejected.
#[cfg(feature = "serde")]
pub fn submissions_from_value(
    value: serde_json::Value,
) -> Result<Vec<Submission>, AllocationError> {
    use serde_json::Value;

    let Value::Array(records) = value else {
        return Err(AllocationError::Json(
            "expected an array of submission records".into(),
        ));
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let Value::Object(fields) = record else {
                return Err(AllocationError::Json(format!(
                    "record {index} is not an object"
                )));
            };
            let mut pairs = Vec::with_capacity(fields.len());
            for (key, value) in fields {
                match value {
                    Value::String(s) => pairs.push((key, s)),
                    Value::Null => {}
                    _ => {
                        return Err(AllocationError::Json(format!(
                            "field '{key}' of record {index} is not a string"
                        )))
                    }
                }
            }
            Ok(Submission::from_fields(pairs))
        })
        .collect()
}

/// Parses JSON submission records straight into participants.
#[cfg(feature = "serde")]
pub fn participants_from_json(json: &str) -> Result<Vec<Participant>, AllocationError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    participants_from_submissions(submissions_from_value(value)?)
}

/// Decodes submission records and runs a seeded allocation over them.
///
/// `expected_participants` only produces an advisory; `seed = None` draws
/// a fresh seed.
#[cfg(feature = "serde")]
pub fn allocate_value(
    value: serde_json::Value,
    expected_participants: Option<usize>,
    seed: Option<u64>,
) -> Result<AllocationResult, AllocationError> {
    let participants = participants_from_submissions(submissions_from_value(value)?)?;
    let config = AllocationConfig {
        expected_participants,
        seed,
        ..AllocationConfig::default()
    };
    AllocationRunner::run(&participants, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_orders_by_rank() {
        let s = Submission::from_fields([
            ("Deck10", "J"),
            ("Deck2", "B"),
            ("Deck9", "I"),
            ("Deck1", "A"),
        ]);
        assert_eq!(s.preferences(), vec!["A", "B", "I", "J"]);
    }

    #[test]
    fn test_from_fields_ignores_unknown_columns() {
        let s = Submission::from_fields([
            ("PlayerName", "Ana"),
            ("Timestamp", "2024-05-01T10:00:00Z"),
            ("action", "add_submission"),
            ("DeckNotes", "whatever"),
            ("Deck1", "X"),
        ]);
        assert_eq!(s.player_name.as_deref(), Some("Ana"));
        assert_eq!(s.timestamp.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(s.decks, vec![(1, "X".to_string())]);
    }

    #[test]
    fn test_blank_decks_dropped() {
        let s = Submission::from_fields([
            ("PlayerName", " Ana "),
            ("Deck1", "  "),
            ("Deck2", " X "),
            ("Deck3", ""),
        ]);
        let participant = s.into_participant(0).unwrap();
        assert_eq!(participant.id, "Ana");
        assert_eq!(participant.preferences, vec!["X".to_string()]);
    }

    #[test]
    fn test_missing_player_name() {
        let s = Submission::from_fields([("Deck1", "X")]);
        assert_eq!(
            s.into_participant(3),
            Err(AllocationError::MissingIdentifier { index: 3 })
        );

        let s = Submission::from_fields([("PlayerName", "   ")]);
        assert!(s.into_participant(0).is_err());
    }

    #[test]
    fn test_participants_from_submissions_indexes_errors() {
        let subs = vec![
            Submission::from_fields([("PlayerName", "Ana"), ("Deck1", "X")]),
            Submission::from_fields([("Deck1", "Y")]),
        ];
        assert_eq!(
            participants_from_submissions(subs),
            Err(AllocationError::MissingIdentifier { index: 1 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_participants_from_json() {
        let json = r#"[
            {"PlayerName": "Ana", "Timestamp": "t", "Deck1": "X", "Deck2": "Y"},
            {"PlayerName": "Ben", "Deck1": "X", "Deck2": null, "Deck3": "Z"}
        ]"#;
        let participants = participants_from_json(json).unwrap();
        assert_eq!(participants.len(), 2);
        assert_eq!(participants[0], Participant::new("Ana", ["X", "Y"]));
        assert_eq!(participants[1], Participant::new("Ben", ["X", "Z"]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_participants_from_json_rejects_bad_input() {
        assert!(matches!(
            participants_from_json("not json"),
            Err(AllocationError::Json(_))
        ));
        assert!(matches!(
            participants_from_json(r#"{"PlayerName": "Ana"}"#),
            Err(AllocationError::Json(_))
        ));
        assert!(matches!(
            participants_from_json(r#"[{"PlayerName": 7}]"#),
            Err(AllocationError::Json(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_allocate_value_under_subscribed_league() {
        use crate::allocation::Advisory;

        let value = serde_json::json!([
            {"PlayerName": "Ana", "Timestamp": "t", "Deck1": "X", "Deck2": "Y"},
            {"PlayerName": "Ben", "Deck1": "Z", "Deck2": ""},
        ]);
        let result = allocate_value(value, Some(4), Some(11)).unwrap();

        assert_eq!(
            result.advisories,
            vec![Advisory::UnderSubscribed {
                submitted: 2,
                expected: 4,
            }]
        );
        assert_eq!(result.resource_of("Ana"), Some("X"));
        assert_eq!(result.resource_of("Ben"), Some("Z"));
        assert_eq!(result.contested_picks(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_allocate_value_missing_player_name() {
        let value = serde_json::json!([
            {"PlayerName": "Ana", "Deck1": "X"},
            {"Timestamp": "t", "Deck1": "X"},
        ]);
        assert_eq!(
            allocate_value(value, None, Some(1)),
            Err(AllocationError::MissingIdentifier { index: 1 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_allocate_value_same_seed_same_result() {
        let value = serde_json::json!([
            {"PlayerName": "Ana", "Deck1": "X", "Deck2": "Y"},
            {"PlayerName": "Ben", "Deck1": "X", "Deck2": "Y"},
            {"PlayerName": "Cai", "Deck1": "X", "Deck2": "Y"},
        ]);
        let a = allocate_value(value.clone(), None, Some(5)).unwrap();
        let b = allocate_value(value, None, Some(5)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rounds[0].picks[0].tie_size, Some(3));
    }
}
