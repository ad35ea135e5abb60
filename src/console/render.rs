use std::fmt::Write;

use crate::collection::Game;
use crate::filter::slider_from_complexity_ceiling;
use crate::flow::{play_time_label, PickerFlow, Screen, WizardStep, PLAY_TIME_OPTIONS};
use crate::spinner::{SpinFrame, SpinState, Wheel};

/// Full text for the current screen, followed by a prompt
pub fn render_screen(flow: &PickerFlow) -> String {
    let mut out = String::new();
    let screen = flow.screen();
    let _ = writeln!(out, "\n== {} ==", screen.title());

    match screen {
        Screen::Splash => {
            let _ = writeln!(out, "A Board Game Decision Tool");
            let _ = writeln!(out, "Data provided by BoardGameGeek");
        }
        Screen::ConnectIdentity => {
            let _ = writeln!(out, "Enter your BoardGameGeek username to load your games.");
            if flow.is_fetching() {
                let _ = writeln!(out, "Fetching your collection...");
            }
        }
        Screen::Home => {
            let _ = writeln!(out, "[1] Let's Choose");
            let _ = writeln!(out, "[2] My Games");
            let _ = writeln!(out, "[3] Change Username");
        }
        Screen::MyGames => {
            if flow.collection().is_empty() {
                let _ = writeln!(out, "No games yet.");
            }
            for game in flow.collection() {
                let _ = writeln!(
                    out,
                    "  {} ({} players, {}) [{}]",
                    game.name,
                    game.players_label(),
                    game.length,
                    game.id
                );
            }
            let _ = writeln!(out, "add <name>; <min>-<max>; <length>[; <weight>] | remove <id> | refresh");
        }
        Screen::Wizard(step) => render_wizard(&mut out, flow, step),
        Screen::Results => render_results(&mut out, flow),
        Screen::Spinner => render_spinner(&mut out, flow),
        Screen::SelectedGame => render_selected(&mut out, flow),
    }

    if let Some(notice) = flow.notice() {
        let _ = writeln!(out, "! {}", notice);
    }
    let _ = write!(out, "> ");
    out
}

fn render_wizard(out: &mut String, flow: &PickerFlow, step: WizardStep) {
    let _ = writeln!(out, "{}", step);
    match step {
        WizardStep::PartySize => {
            let _ = writeln!(out, "How many players? {}  (+/-, or a number 1-{})", flow.party_size(), flow.max_party_size());
            let _ = writeln!(out, "[Enter] Next   [skip] Skip Filters");
        }
        WizardStep::Filters => {
            let criteria = flow.criteria();
            let stop = slider_from_complexity_ceiling(criteria.max_complexity);
            let ceiling = match criteria.max_complexity {
                Some(c) => format!("up to {:.0}", c),
                None => "any".to_string(),
            };
            let _ = writeln!(out, "Complexity: {} (stop {} of 6)", ceiling, stop);
            let options: Vec<String> = PLAY_TIME_OPTIONS
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let marker = if *option == flow.max_length() { "*" } else { "" };
                    format!("[{}] {}{}", i + 1, play_time_label(*option), marker)
                })
                .collect();
            let _ = writeln!(out, "Play time: {}", options.join("  "));
            let _ = writeln!(out, "[Enter] Find Games   [skip] Skip Filters");
        }
    }
}

fn render_results(out: &mut String, flow: &PickerFlow) {
    let ledger = flow.ledger();
    let _ = writeln!(
        out,
        "One vote per player ({} of {} assigned)",
        ledger.total(),
        ledger.party_size()
    );

    if flow.results().is_empty() {
        let _ = writeln!(out, "No games match your criteria.");
        return;
    }

    for (i, game) in flow.results().iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}] {:<24} {}  votes: {}",
            i + 1,
            game.name,
            game_details(game),
            ledger.votes_for(&game.name)
        );
    }

    let _ = writeln!(out, "+N / -N to vote, [Enter] {}", flow.spin_button_label());
    if !flow.can_spin() {
        let _ = writeln!(
            out,
            "Assign all {} votes to enable the spinner.",
            ledger.party_size()
        );
    }
}

fn render_spinner(out: &mut String, flow: &PickerFlow) {
    let Some(session) = flow.spin() else {
        return;
    };
    match session.state() {
        SpinState::Revealed { winner, .. } => {
            let _ = writeln!(out, "You're playing");
            let _ = writeln!(out, "  {}", winner);
            let _ = writeln!(out, "[play] Play This   [again] Spin Again   [back] Back to List");
        }
        _ => {
            let _ = writeln!(out, "Spin the Wheel!");
            let _ = writeln!(out, "{}", session.wheel().sectors().join(" | "));
            let _ = writeln!(out, "[Enter] Spin   [back] Back to List");
        }
    }
}

fn render_selected(out: &mut String, flow: &PickerFlow) {
    let _ = writeln!(out, "You're playing");
    match flow.selected_game() {
        Some(game) => {
            let _ = writeln!(out, "  {}", game.name);
            let _ = writeln!(out, "  Players: {}", game.players_label());
            let _ = writeln!(out, "  Play time: {}", game.length);
            let _ = writeln!(out, "  Complexity: {}", game.complexity_label());
            let _ = writeln!(out, "  Published: {}", game.year_published);
            if let Some(rating) = &game.rating {
                let _ = writeln!(out, "  Rating: {}", rating);
            }
        }
        None => {
            let _ = writeln!(out, "  {}", flow.winner().unwrap_or_default());
        }
    }
    let _ = writeln!(out, "[over] Start Over   [again] Pick Again");
}

fn game_details(game: &Game) -> String {
    format!(
        "{} players · {} · {}",
        game.players_label(),
        game.length,
        game.complexity_label()
    )
}

/// One animation frame, redrawn in place
pub fn render_frame(wheel: &Wheel, frame: &SpinFrame) -> String {
    const BAR_WIDTH: usize = 20;
    let filled = ((frame.progress * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!(
        "\r  > {:<24} [{}{}]",
        wheel.label(frame.sector).unwrap_or_default(),
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

pub fn help_text(screen: Screen) -> &'static str {
    match screen {
        Screen::Splash => "Loading, one moment.",
        Screen::ConnectIdentity => "Type a username and press Enter. 'demo' loads a sample collection.",
        Screen::Home => "1 = Let's Choose, 2 = My Games, 3 = Change Username, q = quit",
        Screen::MyGames => "add <name>; <min>-<max>; <length>[; <weight>], remove <id>, refresh, back",
        Screen::Wizard(WizardStep::PartySize) => "+ / - or a number sets players. Enter continues, skip skips filters.",
        Screen::Wizard(WizardStep::Filters) => "complexity <1-6> (6 = any), time <1-5|any>, Enter finds games, skip skips filters.",
        Screen::Results => "+N adds a vote to game N, -N removes one. Enter spins once every vote is in.",
        Screen::Spinner => "Enter spins. After the reveal: play, again, or back. Ctrl-C stops a spin.",
        Screen::SelectedGame => "over starts over, again returns to the vote.",
    }
}
