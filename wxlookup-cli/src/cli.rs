use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Select};
use std::sync::Arc;
use wxlookup_core::{
    Config, Coordinates, FilePreferenceStore, OpenMeteo, PreferenceStore, UnitMode, WeatherApp,
    geolocation::locator_for, search::lookup_places,
};

use crate::{
    terminal::{TerminalSurface, print_places},
    watch,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxlookup", version, about = "Weather lookup powered by Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set default units and the home location used by `show --here`.
    Configure,

    /// Show current, hourly and daily weather.
    Show {
        /// Place name; defaults to the last place looked up.
        place: Option<String>,

        /// Switch unit mode (remembered for next time).
        #[arg(long)]
        units: Option<UnitMode>,

        /// Use the configured home location.
        #[arg(long, conflicts_with = "place")]
        here: bool,
    },

    /// List places matching a name.
    Search {
        query: String,

        #[arg(long, default_value_t = 5)]
        count: usize,
    },

    /// Remember a unit mode: "metric" or "imperial".
    Units { mode: UnitMode },

    /// Interactive session: type to search, pick a suggestion to load it.
    Watch,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let store = FilePreferenceStore::new(Config::preferences_file_path()?);
        let client = OpenMeteo::new(&config.api);

        match self.command {
            Command::Configure => configure(config, &store)?,
            Command::Show { place, units, here } => {
                let mut app = WeatherApp::new(
                    Arc::new(client.clone()),
                    Box::new(store),
                    TerminalSurface::new(),
                    config.fallback_place.clone(),
                );

                if let Some(mode) = units {
                    app.set_units(mode).await?;
                }

                let outcome = if here {
                    let locator = locator_for(config.home);
                    app.use_geolocation(locator.as_ref()).await
                } else if let Some(query) = place {
                    let Some(found) = lookup_places(&client, &query, 1).await.into_iter().next()
                    else {
                        bail!("No place found matching '{query}'");
                    };
                    app.select_place(found).await
                } else {
                    app.bootstrap(&client).await
                };

                outcome.context("Weather lookup failed")?;
            }
            Command::Search { query, count } => {
                let places = lookup_places(&client, &query, count).await;
                if places.is_empty() {
                    println!("No places found.");
                } else {
                    print_places(&places);
                }
            }
            Command::Units { mode } => {
                let mut prefs = store.load()?;
                prefs.units = Some(mode);
                store.save(&prefs)?;
                println!("Units set to {mode}.");
            }
            Command::Watch => watch::run(&config, client, Box::new(store)).await?,
        }

        Ok(())
    }
}

fn configure(mut config: Config, store: &FilePreferenceStore) -> anyhow::Result<()> {
    let mut prefs = store.load()?;

    let cursor = UnitMode::all()
        .iter()
        .position(|m| *m == prefs.unit_mode())
        .unwrap_or(0);
    let units = Select::new("Units:", UnitMode::all().to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read unit mode")?;
    prefs.units = Some(units);

    let set_home = Confirm::new("Set a home location for `show --here`?")
        .with_default(config.home.is_some())
        .prompt()
        .context("Failed to read answer")?;

    config.home = if set_home {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a decimal number, e.g. 41.33")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a decimal number, e.g. 19.82")
            .prompt()
            .context("Failed to read longitude")?;
        Some(Coordinates {
            latitude,
            longitude,
        })
    } else {
        None
    };

    config.save()?;
    store.save(&prefs)?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
