use thiserror::Error;
use tracing::{debug, info};

use super::draw::Draw;
use super::wheel::Wheel;
use crate::vote::SelectionPool;

/// Stands in for an empty pool so a spin always has something to land on
pub const NO_GAMES_TOKEN: &str = "No games";

/// Outcome fixed at the moment a spin starts, before any animation runs
#[derive(Debug, Clone, PartialEq)]
pub struct SpinCommit {
    pub spin_id: u64,
    pub index: usize,
    pub winner: String,
    pub final_rotation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinState {
    Idle,
    Spinning(SpinCommit),
    Revealed { spin_id: u64, winner: String },
    Accepted { winner: String },
    Abandoned,
}

impl SpinState {
    fn name(&self) -> &'static str {
        match self {
            SpinState::Idle => "idle",
            SpinState::Spinning(_) => "spinning",
            SpinState::Revealed { .. } => "revealed",
            SpinState::Accepted { .. } => "accepted",
            SpinState::Abandoned => "abandoned",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpinError {
    #[error("Cannot {action} while the spinner is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// One spinner opening: a wheel over a fixed pool and the spin lifecycle.
///
/// Idle -> Spinning -> Revealed -> (Idle | Accepted), with Abandoned reachable
/// from any live state. The winner is drawn in `start`; `complete` only
/// publishes it, and only for the spin that is still current.
#[derive(Debug)]
pub struct SpinSession {
    wheel: Wheel,
    state: SpinState,
    next_spin_id: u64,
    extra_rotations: u32,
}

impl SpinSession {
    pub fn new(pool: &SelectionPool, extra_rotations: u32) -> Self {
        let sectors = if pool.is_empty() {
            vec![NO_GAMES_TOKEN.to_string()]
        } else {
            pool.tokens().to_vec()
        };
        Self {
            wheel: Wheel::new(sectors),
            state: SpinState::Idle,
            next_spin_id: 1,
            extra_rotations,
        }
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, SpinState::Spinning(_))
    }

    /// The revealed or accepted winner, if any
    pub fn winner(&self) -> Option<&str> {
        match &self.state {
            SpinState::Revealed { winner, .. } | SpinState::Accepted { winner } => Some(winner),
            _ => None,
        }
    }

    /// Draws the winner and commits to it. Only valid from Idle.
    pub fn start(&mut self, draw: &mut dyn Draw) -> Result<SpinCommit, SpinError> {
        if self.state != SpinState::Idle {
            return Err(self.invalid("start a spin"));
        }

        let len = self.wheel.len();
        let index = draw.draw_index(len).min(len.saturating_sub(1));
        let winner = self
            .wheel
            .label(index)
            .unwrap_or(NO_GAMES_TOKEN)
            .to_string();
        let commit = SpinCommit {
            spin_id: self.next_spin_id,
            index,
            winner,
            final_rotation: self.wheel.final_rotation(index, self.extra_rotations),
        };
        self.next_spin_id += 1;

        debug!(
            spin_id = commit.spin_id,
            index,
            sectors = len,
            "Spin committed"
        );
        self.state = SpinState::Spinning(commit.clone());
        Ok(commit)
    }

    /// Reveals the committed winner when the animation for `spin_id` ends.
    /// Completions for stale or abandoned spins return `None`.
    pub fn complete(&mut self, spin_id: u64) -> Option<String> {
        let SpinState::Spinning(commit) = &self.state else {
            debug!(spin_id, state = self.state.name(), "Ignoring spin completion");
            return None;
        };
        if commit.spin_id != spin_id {
            debug!(
                spin_id,
                current = commit.spin_id,
                "Ignoring completion for a stale spin"
            );
            return None;
        }

        let winner = commit.winner.clone();
        info!(spin_id, winner = %winner, "Spin revealed");
        self.state = SpinState::Revealed {
            spin_id,
            winner: winner.clone(),
        };
        Some(winner)
    }

    /// Back to Idle for an independent draw over the same pool
    pub fn respin(&mut self) -> Result<(), SpinError> {
        match self.state {
            SpinState::Revealed { .. } => {
                self.state = SpinState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("spin again")),
        }
    }

    pub fn accept(&mut self) -> Result<String, SpinError> {
        match &self.state {
            SpinState::Revealed { winner, .. } => {
                let winner = winner.clone();
                self.state = SpinState::Accepted {
                    winner: winner.clone(),
                };
                Ok(winner)
            }
            _ => Err(self.invalid("accept")),
        }
    }

    /// Closes the spinner. A spin in flight is dropped without a reveal.
    pub fn abandon(&mut self) {
        if let SpinState::Spinning(commit) = &self.state {
            debug!(spin_id = commit.spin_id, "Spin abandoned before reveal");
        }
        self.state = SpinState::Abandoned;
    }

    fn invalid(&self, action: &'static str) -> SpinError {
        SpinError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}
