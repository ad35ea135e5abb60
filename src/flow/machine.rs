use thiserror::Error;
use tracing::{debug, info};

use super::screen::{Screen, WizardStep};
use crate::collection::{Collection, Game, GameLength, RefreshOutcome};
use crate::config::FlowConfig;
use crate::filter::{complexity_ceiling_from_slider, filter_games, FilterCriteria, COMPLEXITY_SLIDER_MAX};
use crate::shared::AppError;
use crate::spinner::{Draw, SpinCommit, SpinError, SpinSession};
use crate::vote::{VoteDelta, VoteLedger, VoteOutcome};

pub const CONNECT_FAILED_MESSAGE: &str = "Couldn't find that username. Try again?";
pub const REFRESH_FAILED_MESSAGE: &str = "Couldn't refresh your collection. Showing saved games.";

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("{action} is not available on the {screen} screen")]
    NotAvailable { action: &'static str, screen: Screen },

    #[error("Enter a username to connect")]
    EmptyIdentity,

    #[error("Assign all {needed} votes to enable the spinner. ({assigned} assigned)")]
    VotesIncomplete { assigned: u32, needed: u32 },

    #[error(transparent)]
    Spin(#[from] SpinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPurpose {
    Connect,
    Refresh,
}

/// Identifies one in-flight collection fetch. Results presented with an
/// outdated ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    purpose: FetchPurpose,
}

impl FetchTicket {
    pub fn purpose(&self) -> FetchPurpose {
        self.purpose
    }
}

/// Screen-by-screen state of one picker session: splash, connect, home,
/// the two wizard steps, voting, spinning and the reveal.
///
/// Pure state; fetching, persistence and animation are driven from outside.
#[derive(Debug)]
pub struct PickerFlow {
    screen: Screen,
    settings: FlowConfig,
    extra_rotations: u32,
    collection: Collection,
    party_size: u32,
    complexity_stop: u8,
    max_length: Option<GameLength>,
    results: Vec<Game>,
    ledger: VoteLedger,
    spin: Option<SpinSession>,
    selected: Option<Game>,
    winner: Option<String>,
    notice: Option<String>,
    fetch_generation: u64,
    pending_fetch: Option<FetchTicket>,
}

impl PickerFlow {
    pub fn new(settings: FlowConfig, extra_rotations: u32) -> Self {
        let party_size = clamp_party_size(settings.default_party_size, settings.max_party_size);
        Self {
            screen: Screen::Splash,
            settings,
            extra_rotations,
            collection: Vec::new(),
            party_size,
            complexity_stop: COMPLEXITY_SLIDER_MAX,
            max_length: None,
            results: Vec::new(),
            ledger: VoteLedger::new(party_size, &[]),
            spin: None,
            selected: None,
            winner: None,
            notice: None,
            fetch_generation: 0,
            pending_fetch: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn collection(&self) -> &[Game] {
        &self.collection
    }

    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    pub fn max_party_size(&self) -> u32 {
        self.settings.max_party_size.max(1)
    }

    pub fn complexity_stop(&self) -> u8 {
        self.complexity_stop
    }

    pub fn max_length(&self) -> Option<GameLength> {
        self.max_length
    }

    /// Criteria as currently set in the wizard
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            self.party_size,
            complexity_ceiling_from_slider(self.complexity_stop),
            self.max_length,
        )
    }

    pub fn results(&self) -> &[Game] {
        &self.results
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn spin(&self) -> Option<&SpinSession> {
        self.spin.as_ref()
    }

    /// The accepted winner's record; `None` when the winner was the sentinel
    pub fn selected_game(&self) -> Option<&Game> {
        self.selected.as_ref()
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Soft message for the current screen, such as a failed connect
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.pending_fetch.is_some()
    }

    pub fn set_collection(&mut self, collection: Collection) {
        self.collection = collection;
    }

    /// Leaves the splash: home with `collection` when one is cached, otherwise
    /// connect with nothing loaded
    pub fn finish_splash(&mut self, has_collection: bool, collection: Collection) -> Result<Screen, FlowError> {
        self.expect_screen(Screen::Splash, "finish splash")?;
        let next = if has_collection {
            self.collection = collection;
            Screen::Home
        } else {
            Screen::ConnectIdentity
        };
        self.go(next);
        Ok(next)
    }

    pub fn submit_identity(&mut self, identity: &str) -> Result<FetchTicket, FlowError> {
        self.expect_screen(Screen::ConnectIdentity, "connect")?;
        if identity.trim().is_empty() {
            return Err(FlowError::EmptyIdentity);
        }
        self.notice = None;
        Ok(self.begin_fetch(FetchPurpose::Connect))
    }

    pub fn begin_refresh(&mut self) -> Result<FetchTicket, FlowError> {
        self.expect_screen(Screen::MyGames, "refresh")?;
        self.notice = None;
        Ok(self.begin_fetch(FetchPurpose::Refresh))
    }

    /// Drops the in-flight fetch; its result will be discarded if it still arrives
    pub fn cancel_fetch(&mut self) {
        if let Some(ticket) = self.pending_fetch.take() {
            debug!(generation = ticket.generation, "Fetch cancelled");
        }
        self.fetch_generation += 1;
    }

    /// Applies a connect result. Returns false when the ticket is stale.
    pub fn finish_connect(&mut self, ticket: FetchTicket, result: Result<Collection, AppError>) -> bool {
        if !self.take_ticket(ticket, FetchPurpose::Connect) {
            return false;
        }
        match result {
            Ok(collection) => {
                info!(game_count = collection.len(), "Connected collection");
                self.collection = collection;
                self.notice = None;
                self.go(Screen::Home);
            }
            Err(e) => {
                debug!(error = %e, "Connect failed");
                self.notice = Some(CONNECT_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Applies a refresh result, fallback data included. Returns false when the ticket is stale.
    pub fn finish_refresh(&mut self, ticket: FetchTicket, outcome: RefreshOutcome) -> bool {
        if !self.take_ticket(ticket, FetchPurpose::Refresh) {
            return false;
        }
        self.notice = outcome
            .is_fallback()
            .then(|| REFRESH_FAILED_MESSAGE.to_string());
        self.collection = outcome.collection;
        true
    }

    pub fn start_wizard(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Home, "start choosing")?;
        self.party_size = clamp_party_size(self.settings.default_party_size, self.max_party_size());
        self.complexity_stop = COMPLEXITY_SLIDER_MAX;
        self.max_length = None;
        self.go(Screen::Wizard(WizardStep::PartySize));
        Ok(())
    }

    pub fn open_my_games(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Home, "open my games")?;
        self.go(Screen::MyGames);
        Ok(())
    }

    pub fn change_identity(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Home, "change username")?;
        self.notice = None;
        self.go(Screen::ConnectIdentity);
        Ok(())
    }

    /// Steps the party size, clamped to `[1, max_party_size]`
    pub fn adjust_party_size(&mut self, delta: i64) -> Result<u32, FlowError> {
        let target = (i64::from(self.party_size) + delta).max(1);
        self.set_party_size(u32::try_from(target).unwrap_or(u32::MAX))
    }

    pub fn set_party_size(&mut self, party_size: u32) -> Result<u32, FlowError> {
        self.expect_screen(Screen::Wizard(WizardStep::PartySize), "set party size")?;
        self.party_size = clamp_party_size(party_size, self.max_party_size());
        Ok(self.party_size)
    }

    pub fn next_step(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Wizard(WizardStep::PartySize), "continue")?;
        self.go(Screen::Wizard(WizardStep::Filters));
        Ok(())
    }

    pub fn set_complexity_stop(&mut self, stop: u8) -> Result<u8, FlowError> {
        self.expect_screen(Screen::Wizard(WizardStep::Filters), "set complexity")?;
        self.complexity_stop = stop.clamp(1, COMPLEXITY_SLIDER_MAX);
        Ok(self.complexity_stop)
    }

    pub fn set_max_length(&mut self, max_length: Option<GameLength>) -> Result<(), FlowError> {
        self.expect_screen(Screen::Wizard(WizardStep::Filters), "set play time")?;
        self.max_length = max_length;
        Ok(())
    }

    /// "Find Games": filters with every criterion and opens a fresh vote
    pub fn find_games(&mut self) -> Result<usize, FlowError> {
        self.expect_screen(Screen::Wizard(WizardStep::Filters), "find games")?;
        Ok(self.apply_filters(self.criteria()))
    }

    /// "Skip Filters": player count only
    pub fn skip_filters(&mut self) -> Result<usize, FlowError> {
        if !matches!(self.screen, Screen::Wizard(_)) {
            return Err(self.not_available("skip filters"));
        }
        Ok(self.apply_filters(FilterCriteria::players_only(self.party_size)))
    }

    fn apply_filters(&mut self, criteria: FilterCriteria) -> usize {
        self.results = filter_games(&self.collection, &criteria);
        self.ledger = VoteLedger::new(criteria.party_size, &self.results);
        self.spin = None;
        self.selected = None;
        self.winner = None;
        self.go(Screen::Results);
        self.results.len()
    }

    pub fn vote(&mut self, name: &str, delta: VoteDelta) -> Result<VoteOutcome, FlowError> {
        self.expect_screen(Screen::Results, "vote")?;
        Ok(self.ledger.apply_vote(name, delta))
    }

    pub fn can_spin(&self) -> bool {
        !self.results.is_empty() && self.ledger.can_spin()
    }

    pub fn spin_button_label(&self) -> &'static str {
        if self.results.len() == 1 {
            "Select Game"
        } else {
            "Spin to Choose"
        }
    }

    pub fn open_spinner(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Results, "spin")?;
        if !self.can_spin() {
            return Err(FlowError::VotesIncomplete {
                assigned: self.ledger.total(),
                needed: self.ledger.party_size(),
            });
        }
        self.spin = Some(SpinSession::new(
            &self.ledger.selection_pool(),
            self.extra_rotations,
        ));
        self.go(Screen::Spinner);
        Ok(())
    }

    pub fn start_spin(&mut self, draw: &mut dyn Draw) -> Result<SpinCommit, FlowError> {
        let session = self.spin_session("spin")?;
        Ok(session.start(draw)?)
    }

    /// Reveals the winner of `spin_id`. Stale or abandoned spins yield `None`.
    pub fn complete_spin(&mut self, spin_id: u64) -> Option<String> {
        if self.screen != Screen::Spinner {
            debug!(spin_id, screen = %self.screen, "Spin completed off the spinner, ignoring");
            return None;
        }
        self.spin.as_mut().and_then(|s| s.complete(spin_id))
    }

    pub fn spin_again(&mut self) -> Result<(), FlowError> {
        let session = self.spin_session("spin again")?;
        session.respin()?;
        Ok(())
    }

    /// "Play This": accepts the revealed winner and resolves its record by name
    pub fn play_this(&mut self) -> Result<Option<&Game>, FlowError> {
        let winner = self.spin_session("play this")?.accept()?;
        self.selected = self.results.iter().find(|g| g.name == winner).cloned();
        info!(winner = %winner, resolved = self.selected.is_some(), "Game selected");
        self.winner = Some(winner);
        self.go(Screen::SelectedGame);
        Ok(self.selected.as_ref())
    }

    /// "Back to List": leaves the spinner, dropping any spin in flight
    pub fn close_spinner(&mut self) -> Result<(), FlowError> {
        self.spin_session("close the spinner")?.abandon();
        self.spin = None;
        self.go(Screen::Results);
        Ok(())
    }

    pub fn start_over(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::SelectedGame, "start over")?;
        self.results.clear();
        self.ledger = VoteLedger::new(self.party_size, &[]);
        self.selected = None;
        self.winner = None;
        self.spin = None;
        self.go(Screen::Home);
        Ok(())
    }

    /// Back to the results with every vote still assigned
    pub fn pick_again(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::SelectedGame, "pick again")?;
        self.selected = None;
        self.winner = None;
        self.spin = None;
        self.go(Screen::Results);
        Ok(())
    }

    pub fn back(&mut self) -> Result<Screen, FlowError> {
        let previous = match self.screen {
            Screen::ConnectIdentity if !self.collection.is_empty() => Screen::Home,
            Screen::MyGames | Screen::Wizard(WizardStep::PartySize) => Screen::Home,
            Screen::Wizard(WizardStep::Filters) => Screen::Wizard(WizardStep::PartySize),
            Screen::Results => Screen::Wizard(WizardStep::Filters),
            Screen::Spinner => {
                self.close_spinner()?;
                return Ok(self.screen);
            }
            Screen::SelectedGame => {
                self.pick_again()?;
                return Ok(self.screen);
            }
            Screen::Splash | Screen::Home | Screen::ConnectIdentity => {
                return Err(self.not_available("go back"));
            }
        };
        self.notice = None;
        self.go(previous);
        Ok(previous)
    }

    fn go(&mut self, screen: Screen) {
        if self.screen != screen && self.pending_fetch.is_some() {
            self.cancel_fetch();
        }
        debug!(from = %self.screen, to = %screen, "Screen change");
        self.screen = screen;
    }

    fn begin_fetch(&mut self, purpose: FetchPurpose) -> FetchTicket {
        self.fetch_generation += 1;
        let ticket = FetchTicket {
            generation: self.fetch_generation,
            purpose,
        };
        self.pending_fetch = Some(ticket);
        ticket
    }

    fn take_ticket(&mut self, ticket: FetchTicket, purpose: FetchPurpose) -> bool {
        if ticket.purpose != purpose || self.pending_fetch != Some(ticket) {
            debug!(
                generation = ticket.generation,
                current = self.fetch_generation,
                "Discarding stale fetch result"
            );
            return false;
        }
        self.pending_fetch = None;
        true
    }

    fn spin_session(&mut self, action: &'static str) -> Result<&mut SpinSession, FlowError> {
        if self.screen != Screen::Spinner {
            return Err(self.not_available(action));
        }
        let screen = self.screen;
        self.spin
            .as_mut()
            .ok_or(FlowError::NotAvailable { action, screen })
    }

    fn expect_screen(&self, screen: Screen, action: &'static str) -> Result<(), FlowError> {
        if self.screen == screen {
            Ok(())
        } else {
            Err(self.not_available(action))
        }
    }

    fn not_available(&self, action: &'static str) -> FlowError {
        FlowError::NotAvailable {
            action,
            screen: self.screen,
        }
    }
}

fn clamp_party_size(party_size: u32, max_party_size: u32) -> u32 {
    party_size.clamp(1, max_party_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::seed::seed_games;
    use crate::collection::CollectionOrigin;
    use crate::spinner::{ScriptedDraw, SpinState, NO_GAMES_TOKEN};

    fn flow_at_home() -> PickerFlow {
        let mut flow = PickerFlow::new(FlowConfig::default(), 5);
        flow.finish_splash(true, seed_games()).unwrap();
        flow
    }

    fn flow_at_results(party_size: u32) -> PickerFlow {
        let mut flow = flow_at_home();
        flow.start_wizard().unwrap();
        flow.set_party_size(party_size).unwrap();
        flow.next_step().unwrap();
        flow.skip_filters().unwrap();
        flow
    }

    fn assign_all_to(flow: &mut PickerFlow, name: &str) {
        for _ in 0..flow.party_size() {
            assert!(matches!(
                flow.vote(name, VoteDelta::Add).unwrap(),
                VoteOutcome::Applied { .. }
            ));
        }
    }

    #[test]
    fn test_splash_routes_by_cached_collection() {
        let mut flow = PickerFlow::new(FlowConfig::default(), 5);
        assert_eq!(flow.finish_splash(false, seed_games()).unwrap(), Screen::ConnectIdentity);

        let mut flow = PickerFlow::new(FlowConfig::default(), 5);
        assert_eq!(flow.finish_splash(true, seed_games()).unwrap(), Screen::Home);
        assert!(flow.finish_splash(true, seed_games()).is_err());
    }

    #[test]
    fn test_empty_identity_cannot_be_submitted() {
        let mut flow = PickerFlow::new(FlowConfig::default(), 5);
        flow.finish_splash(false, Vec::new()).unwrap();
        assert!(matches!(flow.submit_identity("   "), Err(FlowError::EmptyIdentity)));
        assert!(!flow.is_fetching());
    }

    #[test]
    fn test_failed_connect_stays_with_message() {
        let mut flow = PickerFlow::new(FlowConfig::default(), 5);
        flow.finish_splash(false, Vec::new()).unwrap();

        let ticket = flow.submit_identity("nobody").unwrap();
        assert!(flow.finish_connect(ticket, Err(AppError::UnexpectedStatus(404))));

        assert_eq!(flow.screen(), Screen::ConnectIdentity);
        assert_eq!(flow.notice(), Some(CONNECT_FAILED_MESSAGE));
    }

    #[test]
    fn test_successful_connect_goes_home() {
        let mut flow = PickerFlow::new(FlowConfig::default(), 5);
        flow.finish_splash(false, Vec::new()).unwrap();

        let ticket = flow.submit_identity("demo").unwrap();
        assert!(flow.finish_connect(ticket, Ok(seed_games())));
        assert_eq!(flow.screen(), Screen::Home);
        assert_eq!(flow.collection().len(), seed_games().len());
    }

    #[test]
    fn test_stale_fetch_results_are_discarded() {
        let mut flow = PickerFlow::new(FlowConfig::default(), 5);
        flow.finish_splash(false, Vec::new()).unwrap();

        let first = flow.submit_identity("first").unwrap();
        flow.cancel_fetch();
        let second = flow.submit_identity("second").unwrap();

        assert!(!flow.finish_connect(first, Ok(seed_games())));
        assert_eq!(flow.screen(), Screen::ConnectIdentity);
        assert!(flow.collection().is_empty());

        assert!(flow.finish_connect(second, Ok(seed_games())));
        assert_eq!(flow.screen(), Screen::Home);
    }

    #[test]
    fn test_leaving_the_screen_cancels_the_fetch() {
        let mut flow = flow_at_home();
        flow.open_my_games().unwrap();
        let ticket = flow.begin_refresh().unwrap();
        flow.back().unwrap();

        let outcome = RefreshOutcome {
            collection: Vec::new(),
            origin: CollectionOrigin::Catalog,
            error: None,
            snapshot: None,
        };
        assert!(!flow.finish_refresh(ticket, outcome));
        assert_eq!(flow.collection().len(), seed_games().len());
    }

    #[test]
    fn test_refresh_fallback_sets_notice() {
        let mut flow = flow_at_home();
        flow.open_my_games().unwrap();
        let ticket = flow.begin_refresh().unwrap();

        let outcome = RefreshOutcome {
            collection: seed_games(),
            origin: CollectionOrigin::Seed,
            error: Some(AppError::RetriesExhausted(5)),
            snapshot: None,
        };
        assert!(flow.finish_refresh(ticket, outcome));
        assert_eq!(flow.notice(), Some(REFRESH_FAILED_MESSAGE));
    }

    #[test]
    fn test_party_size_is_clamped() {
        let mut flow = flow_at_home();
        flow.start_wizard().unwrap();
        assert_eq!(flow.party_size(), 2);
        assert_eq!(flow.adjust_party_size(-5).unwrap(), 1);
        assert_eq!(flow.adjust_party_size(50).unwrap(), 10);
        assert_eq!(flow.set_party_size(0).unwrap(), 1);
    }

    #[test]
    fn test_find_games_applies_every_filter() {
        let mut flow = flow_at_home();
        flow.start_wizard().unwrap();
        flow.set_party_size(2).unwrap();
        flow.next_step().unwrap();
        flow.set_complexity_stop(2).unwrap();
        flow.set_max_length(Some(GameLength::Under30Min)).unwrap();

        flow.find_games().unwrap();

        assert_eq!(flow.screen(), Screen::Results);
        let criteria = flow.criteria();
        assert_eq!(criteria.max_complexity, Some(2.0));
        assert!(flow
            .results()
            .iter()
            .all(|g| crate::filter::length_matches(criteria.max_length, g.length)));
        assert_eq!(flow.ledger().total(), 0);
    }

    #[test]
    fn test_spinner_requires_every_vote() {
        let mut flow = flow_at_results(3);
        let name = flow.results()[0].name.clone();
        flow.vote(&name, VoteDelta::Add).unwrap();

        assert!(matches!(
            flow.open_spinner(),
            Err(FlowError::VotesIncomplete { assigned: 1, needed: 3 })
        ));
        assert_eq!(flow.screen(), Screen::Results);
    }

    #[test]
    fn test_full_round_to_selected_game() {
        let mut flow = flow_at_results(2);
        let name = flow.results()[1].name.clone();
        assign_all_to(&mut flow, &name);

        flow.open_spinner().unwrap();
        let commit = flow.start_spin(&mut ScriptedDraw::new(vec![0])).unwrap();
        assert_eq!(flow.complete_spin(commit.spin_id), Some(name.clone()));

        let selected = flow.play_this().unwrap().cloned();
        assert_eq!(selected.map(|g| g.name), Some(name.clone()));
        assert_eq!(flow.screen(), Screen::SelectedGame);
        assert_eq!(flow.winner(), Some(name.as_str()));
    }

    #[test]
    fn test_pick_again_keeps_votes_and_start_over_clears() {
        let mut flow = flow_at_results(2);
        let name = flow.results()[0].name.clone();
        assign_all_to(&mut flow, &name);
        flow.open_spinner().unwrap();
        let commit = flow.start_spin(&mut ScriptedDraw::new(vec![1])).unwrap();
        flow.complete_spin(commit.spin_id);
        flow.play_this().unwrap();

        flow.pick_again().unwrap();
        assert_eq!(flow.screen(), Screen::Results);
        assert_eq!(flow.ledger().votes_for(&name), 2);
        assert!(flow.can_spin());

        flow.open_spinner().unwrap();
        let commit = flow.start_spin(&mut ScriptedDraw::new(vec![0])).unwrap();
        flow.complete_spin(commit.spin_id);
        flow.play_this().unwrap();
        flow.start_over().unwrap();
        assert_eq!(flow.screen(), Screen::Home);
        assert!(flow.results().is_empty());
        assert_eq!(flow.selected_game(), None);
    }

    #[test]
    fn test_closing_spinner_mid_spin_never_reveals() {
        let mut flow = flow_at_results(2);
        let name = flow.results()[0].name.clone();
        assign_all_to(&mut flow, &name);
        flow.open_spinner().unwrap();
        let commit = flow.start_spin(&mut ScriptedDraw::new(vec![0])).unwrap();

        flow.close_spinner().unwrap();
        assert_eq!(flow.complete_spin(commit.spin_id), None);
        assert_eq!(flow.screen(), Screen::Results);
        assert_eq!(flow.ledger().votes_for(&name), 2);
    }

    #[test]
    fn test_spin_again_draws_independently() {
        let mut flow = flow_at_results(2);
        let first = flow.results()[0].name.clone();
        let second = flow.results()[1].name.clone();
        flow.vote(&first, VoteDelta::Add).unwrap();
        flow.vote(&second, VoteDelta::Add).unwrap();
        flow.open_spinner().unwrap();

        let mut draw = ScriptedDraw::new(vec![0, 1]);
        let commit = flow.start_spin(&mut draw).unwrap();
        assert_eq!(flow.complete_spin(commit.spin_id), Some(first));
        flow.spin_again().unwrap();
        assert_eq!(flow.spin().map(|s| s.state()), Some(&SpinState::Idle));

        let commit = flow.start_spin(&mut draw).unwrap();
        assert_eq!(flow.complete_spin(commit.spin_id), Some(second));
    }

    #[test]
    fn test_sentinel_winner_resolves_to_no_game() {
        let mut flow = flow_at_results(2);
        // Force an empty pool onto the spinner
        flow.spin = Some(SpinSession::new(&Default::default(), 5));
        flow.screen = Screen::Spinner;

        let commit = flow.start_spin(&mut ScriptedDraw::new(vec![0])).unwrap();
        assert_eq!(flow.complete_spin(commit.spin_id).as_deref(), Some(NO_GAMES_TOKEN));
        assert!(flow.play_this().unwrap().is_none());
        assert_eq!(flow.winner(), Some(NO_GAMES_TOKEN));
    }

    #[test]
    fn test_spin_label_and_empty_results() {
        let mut flow = flow_at_home();
        flow.set_collection(seed_games().into_iter().take(1).collect());
        flow.start_wizard().unwrap();
        flow.set_party_size(flow.collection()[0].players_min).unwrap();
        flow.skip_filters().unwrap();
        assert_eq!(flow.spin_button_label(), "Select Game");

        flow.back().unwrap();
        flow.back().unwrap();
        flow.set_party_size(10).unwrap();
        flow.skip_filters().unwrap();
        assert!(flow.results().is_empty());
        assert!(!flow.can_spin());
    }

    #[test]
    fn test_actions_on_the_wrong_screen_are_errors() {
        let mut flow = flow_at_home();
        assert!(matches!(
            flow.vote("Wingspan", VoteDelta::Add),
            Err(FlowError::NotAvailable { action: "vote", screen: Screen::Home })
        ));
        assert!(flow.back().is_err());
        assert!(flow.play_this().is_err());
    }
}
