//! Test assertion helpers - fluent API for verifying console sessions
#![allow(dead_code)] // Test utilities may not all be used in every test

use whatshouldweplay::{Console, Screen};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct SessionAssertion<'a> {
    console: &'a Console,
    output: String,
}

impl<'a> SessionAssertion<'a> {
    pub fn for_session(setup: &TestSetup, console: &'a Console) -> Self {
        Self {
            console,
            output: setup.output.contents(),
        }
    }

    pub fn ended_on(self, screen: Screen) -> Self {
        assert_eq!(
            self.console.flow().screen(),
            screen,
            "session ended on the wrong screen. Output:\n{}",
            self.output
        );
        self
    }

    pub fn printed(self, text: &str) -> Self {
        assert!(
            self.output.contains(text),
            "expected output to contain {:?}. Output:\n{}",
            text,
            self.output
        );
        self
    }

    pub fn did_not_print(self, text: &str) -> Self {
        assert!(
            !self.output.contains(text),
            "expected output not to contain {:?}. Output:\n{}",
            text,
            self.output
        );
        self
    }

    pub fn winner_is(self, name: &str) -> Self {
        assert_eq!(self.console.flow().winner(), Some(name));
        self
    }

    pub fn has_no_winner(self) -> Self {
        assert_eq!(self.console.flow().winner(), None);
        self
    }
}
