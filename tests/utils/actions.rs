use whatshouldweplay::Console;

use super::mocks::ScriptedInput;
use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Build a console over the scripted lines and run it until input runs out
    pub async fn run_console(&self, lines: &[&str]) -> Console {
        let mut console = Console::new(
            self.context.clone(),
            Box::new(ScriptedInput::new(lines)),
            Box::new(self.output.clone()),
        )
        .with_interrupt(self.interrupt())
        .with_draw(Box::new(self.draw()));

        console.run().await.unwrap();
        console
    }
}
