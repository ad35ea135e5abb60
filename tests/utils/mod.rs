pub mod actions;
pub mod assertions;
pub mod game_builders;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::SessionAssertion;
#[allow(unused_imports)]
pub use game_builders::{catalog_collection, GameBuilder};
#[allow(unused_imports)]
pub use mocks::{ScriptedCatalogClient, ScriptedInput, SharedOutput, SlowKeyValueStore};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
