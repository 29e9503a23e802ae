//! League roster and submission status.

/// The organizer's list of league players.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    players: Vec<String>,
}

/// Whether a roster member has submitted preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    pub player: String,
    pub submitted: bool,
}

impl Roster {
    /// Parses one player name per line; blank lines are skipped.
    ///
    /// ```
    /// use u_allocate::roster::Roster;
    ///
    /// let roster = Roster::parse("Ana\n\n  Ben \n");
    /// assert_eq!(roster.players(), ["Ana", "Ben"]);
    /// assert_eq!(roster.pending(["ana"]), vec!["Ben"]);
    /// ```
    pub fn parse(text: &str) -> Self {
        Self::from_players(text.lines())
    }

    pub fn from_players<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let players = players
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { players }
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Roster size, for
    /// [`AllocationConfig::with_expected_participants`](crate::allocation::AllocationConfig::with_expected_participants).
    pub fn expected_participants(&self) -> usize {
        self.players.len()
    }

    /// Submission status of every roster member, in roster order.
    ///
    /// Names match case-insensitively after trimming. The allocator itself
    /// compares identifiers exactly; this lookup is only for the status
    /// board.
    pub fn status<I, S>(&self, submitted: I) -> Vec<RosterEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let submitted: Vec<String> = submitted
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .collect();

        self.players
            .iter()
            .map(|player| RosterEntry {
                player: player.clone(),
                submitted: submitted.contains(&player.to_lowercase()),
            })
            .collect()
    }

    /// Roster members who have not submitted yet.
    pub fn pending<I, S>(&self, submitted: I) -> Vec<&str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let status = self.status(submitted);
        self.players
            .iter()
            .zip(status)
            .filter(|(_, entry)| !entry.submitted)
            .map(|(player, _)| player.as_str())
            .collect()
    }
}
