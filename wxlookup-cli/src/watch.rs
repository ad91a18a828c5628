//! Line-driven interactive session. Each plain line is one input event for the
//! search coordinator; lines starting with `:` are commands.

use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use wxlookup_core::{
    Config, OpenMeteo, PreferenceStore, SearchCoordinator, Suggestions, UnitMode, WeatherApp,
    geolocation::locator_for,
};

use crate::terminal::{TerminalSurface, print_places};

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Query(String),
    Pick(usize),
    Units(UnitMode),
    Here,
    Help,
    Quit,
}

impl Action {
    fn parse(line: &str) -> Action {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Action::Query(trimmed.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("q" | "quit"), _) => Action::Quit,
            (Some("c"), _) => Action::Units(UnitMode::Metric),
            (Some("f"), _) => Action::Units(UnitMode::Imperial),
            (Some("here"), _) => Action::Here,
            (Some("pick" | "p"), Some(n)) => match n.parse() {
                Ok(n) if n > 0 => Action::Pick(n),
                _ => Action::Help,
            },
            _ => Action::Help,
        }
    }
}

fn print_help() {
    println!("Type a place name to search. Commands:");
    println!("  :pick N   load suggestion N");
    println!("  :c / :f   switch to °C / °F");
    println!("  :here     use the configured home location");
    println!("  :q        quit");
}

fn print_suggestions(suggestions: &Suggestions) {
    if let Suggestions::Shown(places) = suggestions {
        println!("Suggestions:");
        print_places(places);
    }
}

pub async fn run(
    config: &Config,
    client: OpenMeteo,
    store: Box<dyn PreferenceStore>,
) -> anyhow::Result<()> {
    let client = Arc::new(client);
    let mut app = WeatherApp::new(
        client.clone(),
        store,
        TerminalSurface::interactive(),
        config.fallback_place.clone(),
    );
    let coordinator = SearchCoordinator::new(client.clone(), &config.search);
    let mut suggestions = coordinator.subscribe();
    let locator = locator_for(config.home);

    print_help();
    if let Err(err) = app.bootstrap(client.as_ref()).await {
        debug!(error = %err, "startup load failed");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };

                let outcome = match Action::parse(&line) {
                    Action::Quit => break,
                    Action::Help => {
                        print_help();
                        Ok(())
                    }
                    Action::Query(query) => {
                        coordinator.input(&query);
                        Ok(())
                    }
                    Action::Units(mode) => app.set_units(mode).await,
                    Action::Here => {
                        coordinator.dismiss();
                        app.use_geolocation(locator.as_ref()).await
                    }
                    Action::Pick(n) => {
                        let picked = coordinator.suggestions().places().get(n - 1).cloned();
                        match picked {
                            Some(place) => {
                                coordinator.dismiss();
                                app.select_place(place).await
                            }
                            None => {
                                eprintln!("No suggestion #{n}.");
                                Ok(())
                            }
                        }
                    }
                };

                if let Err(err) = outcome {
                    debug!(error = %err, "action failed");
                }
            }
            changed = suggestions.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = suggestions.borrow_and_update().clone();
                print_suggestions(&current);
            }
        }
    }

    Ok(())
}
