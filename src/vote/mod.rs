// Public API - what other modules can use
pub use ledger::{SelectionPool, VoteDelta, VoteLedger, VoteOutcome};

// Internal modules
mod ledger;
