use tracing::debug;

use crate::collection::Game;

/// Direction of a single vote change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDelta {
    Add,
    Remove,
}

impl VoteDelta {
    fn as_i64(self) -> i64 {
        match self {
            VoteDelta::Add => 1,
            VoteDelta::Remove => -1,
        }
    }
}

/// Result of attempting to change a vote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The change was applied (possibly a no-op through clamping at zero)
    Applied { votes: u32, total: u32 },
    /// The change would over-allocate the party's votes, or names no eligible game.
    /// The ledger is unchanged.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VoteEntry {
    name: String,
    votes: u32,
}

/// Per-game vote counts for one filter pass.
///
/// Keyed by game name in filtered-list order; two eligible games sharing a name
/// share one entry. The total never exceeds the party size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteLedger {
    party_size: u32,
    entries: Vec<VoteEntry>,
}

impl VoteLedger {
    /// Zero votes for every eligible game
    pub fn new(party_size: u32, games: &[Game]) -> Self {
        let mut entries: Vec<VoteEntry> = Vec::with_capacity(games.len());
        for game in games {
            if !entries.iter().any(|e| e.name == game.name) {
                entries.push(VoteEntry {
                    name: game.name.clone(),
                    votes: 0,
                });
            }
        }
        Self {
            party_size,
            entries,
        }
    }

    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.votes).sum()
    }

    pub fn votes_for(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.votes)
            .unwrap_or(0)
    }

    /// Names with their vote counts, in ledger order
    pub fn tallies(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|e| (e.name.as_str(), e.votes))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remaining(&self) -> u32 {
        self.party_size.saturating_sub(self.total())
    }

    /// Applies one vote change. Increments that would push the total past the
    /// party size are rejected; decrements clamp at zero.
    pub fn apply_vote(&mut self, name: &str, delta: VoteDelta) -> VoteOutcome {
        let total = i64::from(self.total());
        let party_size = i64::from(self.party_size);

        let Some(index) = self.entries.iter().position(|e| e.name == name) else {
            debug!(name = %name, "Vote for a game that is not in the ledger");
            return VoteOutcome::Rejected;
        };

        let current = i64::from(self.entries[index].votes);
        let would_be_total = total - current + (current + delta.as_i64());
        if delta == VoteDelta::Add && would_be_total > party_size {
            debug!(name = %name, total, party_size, "Vote rejected, all votes assigned");
            return VoteOutcome::Rejected;
        }

        let updated = (current + delta.as_i64()).max(0) as u32;
        self.entries[index].votes = updated;

        VoteOutcome::Applied {
            votes: updated,
            total: self.total(),
        }
    }

    /// Every vote assigned and at least one game to spin over
    pub fn can_spin(&self) -> bool {
        let total = self.total();
        total == self.party_size && total > 0
    }

    /// One token per vote, in ledger order
    pub fn selection_pool(&self) -> SelectionPool {
        let tokens = self
            .entries
            .iter()
            .flat_map(|e| std::iter::repeat(e.name.clone()).take(e.votes as usize))
            .collect();
        SelectionPool { tokens }
    }
}

/// Vote-weighted multiset of game names, the exact input of a spin
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionPool {
    tokens: Vec<String>,
}

impl SelectionPool {
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
