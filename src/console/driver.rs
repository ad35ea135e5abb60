use std::io::Write;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::command::{parse_command, Command};
use super::render::{help_text, render_frame, render_screen};
use super::terminal::{ctrl_c_interrupt, Interrupt, LineSource};
use crate::flow::{FlowError, PickerFlow};
use crate::shared::{AppContext, AppError};
use crate::spinner::{animate, Draw, RngDraw, SpinOutcome, SpinTiming};
use crate::vote::VoteOutcome;

/// Interactive picker session over a line-based terminal.
///
/// Reads one command per line, applies it to the screen flow and redraws.
/// Fetches and spins can be interrupted; their results are then dropped and
/// nothing is saved. An interrupt at the prompt ends the session.
pub struct Console {
    context: AppContext,
    flow: PickerFlow,
    input: Box<dyn LineSource>,
    output: Box<dyn Write + Send>,
    interrupt: Interrupt,
    draw: Box<dyn Draw>,
    timing: SpinTiming,
}

impl Console {
    pub fn new(
        context: AppContext,
        input: Box<dyn LineSource>,
        output: Box<dyn Write + Send>,
    ) -> Self {
        let flow = PickerFlow::new(
            context.config.flow.clone(),
            context.config.spinner.extra_rotations,
        );
        let draw = Box::new(RngDraw::from_seed_option(context.config.spinner.seed));
        let timing = SpinTiming::from_config(&context.config.spinner);

        Self {
            context,
            flow,
            input,
            output,
            interrupt: ctrl_c_interrupt(),
            draw,
            timing,
        }
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn with_draw(mut self, draw: Box<dyn Draw>) -> Self {
        self.draw = draw;
        self
    }

    pub fn flow(&self) -> &PickerFlow {
        &self.flow
    }

    /// Runs until the user quits or input closes
    pub async fn run(&mut self) -> Result<(), AppError> {
        self.splash().await?;

        loop {
            let screen = render_screen(&self.flow);
            self.print(&screen)?;

            let interrupt = (self.interrupt)();
            let next = tokio::select! {
                biased;
                line = self.input.next_line() => line?,
                _ = interrupt => {
                    debug!("Interrupted at the prompt");
                    break;
                }
            };
            let Some(line) = next else {
                debug!("Input closed");
                break;
            };

            match parse_command(self.flow.screen(), &line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await?,
                Err(message) => self.print_line(&message)?,
            }
        }

        self.print_line("")?;
        info!("Console session ended");
        Ok(())
    }

    async fn splash(&mut self) -> Result<(), AppError> {
        let screen = render_screen(&self.flow);
        self.print_line(screen.trim_end_matches("> "))?;
        tokio::time::sleep(Duration::from_millis(self.context.config.flow.splash_delay_ms)).await;

        let service = self.context.collection_service.clone();
        let has_collection = service.has_collection().await;
        let collection = service.load().await;
        let next = self.flow.finish_splash(has_collection, collection);
        self.report(next)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn execute(&mut self, command: Command) -> Result<(), AppError> {
        let service = self.context.collection_service.clone();

        match command {
            Command::Quit => {}
            Command::Help => {
                let help = help_text(self.flow.screen());
                self.print_line(help)?;
            }
            Command::Back => {
                let result = self.flow.back();
                self.report(result)?;
            }
            Command::Connect(identity) => {
                let ticket = self.flow.submit_identity(&identity);
                let Some(ticket) = self.report(ticket)? else {
                    return Ok(());
                };
                self.print_line("Fetching your collection...")?;
                let interrupt = (self.interrupt)();
                let result = tokio::select! {
                    biased;
                    _ = interrupt => None,
                    result = service.refresh(&identity) => Some(result),
                };
                match result {
                    None => {
                        self.flow.cancel_fetch();
                        self.print_line("Cancelled.")?;
                    }
                    Some(Ok(fetched)) => {
                        if self.flow.finish_connect(ticket, Ok(fetched.collection)) {
                            service.persist_refresh(&fetched.snapshot).await;
                        }
                    }
                    Some(Err(e)) => {
                        self.flow.finish_connect(ticket, Err(e));
                    }
                }
            }
            Command::StartWizard => {
                let result = self.flow.start_wizard();
                self.report(result)?;
            }
            Command::OpenMyGames => {
                let result = self.flow.open_my_games();
                self.report(result)?;
            }
            Command::ChangeIdentity => {
                let result = self.flow.change_identity();
                self.report(result)?;
            }
            Command::AddGame(draft) => match service.add_user_game(draft).await {
                Ok(game) => {
                    self.flow.set_collection(service.load().await);
                    self.print_line(&format!("Added {} [{}]", game.name, game.id))?;
                }
                Err(e) => self.print_line(&e.to_string())?,
            },
            Command::RemoveGame(id) => match service.remove_user_game(&id).await {
                Ok(true) => {
                    self.flow.set_collection(service.load().await);
                    self.print_line(&format!("Removed {}", id))?;
                }
                Ok(false) => self.print_line(&format!("No game you added has id {}", id))?,
                Err(e) => self.print_line(&e.to_string())?,
            },
            Command::Refresh => {
                let ticket = self.flow.begin_refresh();
                let Some(ticket) = self.report(ticket)? else {
                    return Ok(());
                };
                self.print_line("Refreshing your collection...")?;
                let interrupt = (self.interrupt)();
                let outcome = tokio::select! {
                    biased;
                    _ = interrupt => None,
                    outcome = service.refresh_configured() => Some(outcome),
                };
                let Some(mut outcome) = outcome else {
                    self.flow.cancel_fetch();
                    self.print_line("Cancelled.")?;
                    return Ok(());
                };
                let snapshot = outcome.snapshot.take();
                if self.flow.finish_refresh(ticket, outcome) {
                    if let Some(snapshot) = snapshot {
                        service.persist_refresh(&snapshot).await;
                    }
                }
            }
            Command::AdjustPartySize(delta) => {
                let result = self.flow.adjust_party_size(delta);
                self.report(result)?;
            }
            Command::SetPartySize(party_size) => {
                let result = self.flow.set_party_size(party_size);
                self.report(result)?;
            }
            Command::NextStep => {
                let result = self.flow.next_step();
                self.report(result)?;
            }
            Command::SetComplexity(stop) => {
                let result = self.flow.set_complexity_stop(stop);
                self.report(result)?;
            }
            Command::SetPlayTime(max_length) => {
                let result = self.flow.set_max_length(max_length);
                self.report(result)?;
            }
            Command::FindGames => {
                let result = self.flow.find_games();
                self.report(result)?;
            }
            Command::SkipFilters => {
                let result = self.flow.skip_filters();
                self.report(result)?;
            }
            Command::Vote { position, delta } => {
                let Some(name) = self
                    .flow
                    .results()
                    .get(position.saturating_sub(1))
                    .map(|g| g.name.clone())
                else {
                    self.print_line(&format!("There is no game {}", position))?;
                    return Ok(());
                };
                let result = self.flow.vote(&name, delta);
                if let Some(VoteOutcome::Rejected) = self.report(result)? {
                    debug!(name = %name, ?delta, "Vote not applied");
                }
            }
            Command::OpenSpinner => {
                let result = self.flow.open_spinner();
                self.report(result)?;
            }
            Command::Spin => self.spin().await?,
            Command::PlayThis => {
                let result = self.flow.play_this().map(|_| ());
                self.report(result)?;
            }
            Command::SpinAgain => {
                let result = self.flow.spin_again();
                self.report(result)?;
            }
            Command::StartOver => {
                let result = self.flow.start_over();
                self.report(result)?;
            }
            Command::PickAgain => {
                let result = self.flow.pick_again();
                self.report(result)?;
            }
        }
        Ok(())
    }

    /// Commits the outcome, animates towards it, then reveals it unless interrupted
    async fn spin(&mut self) -> Result<(), AppError> {
        let commit = self.flow.start_spin(self.draw.as_mut());
        let Some(commit) = self.report(commit)? else {
            return Ok(());
        };
        let Some(wheel) = self.flow.spin().map(|s| s.wheel().clone()) else {
            return Ok(());
        };

        let timing = self.timing;
        let interrupt = (self.interrupt)();
        let output = &mut self.output;
        let mut frame_error: Option<std::io::Error> = None;
        let outcome = animate(&wheel, &commit, timing, interrupt, |frame| {
            if frame_error.is_some() {
                return;
            }
            let written = write!(output, "{}", render_frame(&wheel, frame))
                .and_then(|()| output.flush());
            if let Err(e) = written {
                frame_error = Some(e);
            }
        })
        .await;
        if let Some(e) = frame_error {
            return Err(e.into());
        }
        self.print_line("")?;

        match outcome {
            SpinOutcome::Finished => {
                self.flow.complete_spin(commit.spin_id);
            }
            SpinOutcome::Cancelled => {
                let result = self.flow.close_spinner();
                self.report(result)?;
                self.print_line("Spin cancelled.")?;
            }
        }
        Ok(())
    }

    /// Prints a flow error for the user instead of failing the session
    fn report<T>(&mut self, result: Result<T, FlowError>) -> Result<Option<T>, AppError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                debug!(error = %e, "Command not applied");
                self.print_line(&e.to_string())?;
                Ok(None)
            }
        }
    }

    fn print(&mut self, text: &str) -> Result<(), AppError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn print_line(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }
}
