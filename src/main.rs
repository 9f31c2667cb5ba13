use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use skycast_core::{Config, TemperatureUnit, Theme};
use skycast_dashboard::{export_journal, render, Dashboard, DashboardState};
use skycast_store::{FileSlotStore, Preferences};
use skycast_weather::{locate, WeatherGateway};

#[derive(Parser)]
#[command(name = "skycast", about = "Weather dashboard for the terminal", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show current conditions and the 5-day forecast
    Weather {
        /// City to look up; defaults to your location, then the configured city
        city: Option<String>,
    },
    /// Manage favorite cities
    Fav {
        #[command(subcommand)]
        action: FavCommand,
    },
    /// Weather journal
    Journal {
        #[command(subcommand)]
        action: JournalCommand,
    },
    /// Toggle the temperature unit, or set it explicitly
    Unit { value: Option<UnitArg> },
    /// Toggle the theme, or set it explicitly
    Theme { value: Option<ThemeArg> },
}

#[derive(Subcommand)]
enum FavCommand {
    /// Fetch a city and add it to favorites
    Add { city: String },
    /// List favorites in display order
    List,
    /// Remove a favorite by its position in the list
    Rm { position: usize },
    /// Fetch weather for a favorite by position
    Go { position: usize },
    /// Move a favorite from one position to another
    Move { from: usize, to: usize },
}

#[derive(Subcommand)]
enum JournalCommand {
    /// Fetch a city and journal the observed weather with your notes
    Add { city: String, notes: Vec<String> },
    /// List entries, newest first
    List,
    /// Replace the notes on an entry by position
    Edit { position: usize, notes: Vec<String> },
    /// Delete an entry by position
    Rm { position: usize },
    /// Export the journal to an HTML document
    Export {
        /// Output path (default: weather-journal.html)
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Celsius,
    Fahrenheit,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    skycast_core::init()?;

    let (config, _validation) = Config::load_validated()?;

    let store = Arc::new(FileSlotStore::new(&config.data_dir));
    let prefs = Preferences::new(store);
    let gateway = WeatherGateway::new(&config.weather.api_key, &config.weather.base_url)
        .context("Failed to create weather gateway")?;
    let mut dash = Dashboard::new(gateway, prefs, &config.weather.default_city);

    match cli.command {
        None | Some(Command::Weather { city: None }) => {
            // Geolocation runs under its own timeout; any failure falls back
            // to the configured default city
            let position = match locate().await {
                Ok(pos) => Some(pos),
                Err(e) => {
                    tracing::info!("Geolocation unavailable, using default city: {}", e);
                    None
                }
            };
            dash.start(position).await;
            report_weather(&dash);
        }
        Some(Command::Weather { city: Some(city) }) => {
            dash.load_city(&city).await;
            report_weather(&dash);
        }
        Some(Command::Fav { action }) => run_fav(&mut dash, action).await,
        Some(Command::Journal { action }) => run_journal(&mut dash, action).await?,
        Some(Command::Unit { value }) => {
            let unit = match value {
                Some(UnitArg::Celsius) => {
                    dash.set_unit(TemperatureUnit::Celsius);
                    TemperatureUnit::Celsius
                }
                Some(UnitArg::Fahrenheit) => {
                    dash.set_unit(TemperatureUnit::Fahrenheit);
                    TemperatureUnit::Fahrenheit
                }
                None => dash.toggle_unit(),
            };
            let name = match unit {
                TemperatureUnit::Celsius => "Celsius",
                TemperatureUnit::Fahrenheit => "Fahrenheit",
            };
            println!("Temperature unit changed to {}", name);
        }
        Some(Command::Theme { value }) => {
            let theme = match value {
                Some(ThemeArg::Light) => {
                    dash.set_theme(Theme::Light);
                    Theme::Light
                }
                Some(ThemeArg::Dark) => {
                    dash.set_theme(Theme::Dark);
                    Theme::Dark
                }
                None => dash.toggle_theme(),
            };
            let name = if theme.is_dark() { "dark" } else { "light" };
            println!("Theme changed to {}", name);
        }
    }

    Ok(())
}

/// Print the controller's state. The last good weather stays visible after a
/// failure; the notice names the retry target.
fn report_weather(dash: &Dashboard) {
    if let DashboardState::Failed { message } = dash.state() {
        eprintln!("{}", message);
        if let Some(city) = dash.last_city() {
            eprintln!("Retry with: skycast weather \"{}\"", city);
        }
        return;
    }

    if let Some(snapshot) = dash.snapshot() {
        print!("{}", render::current_summary(snapshot, dash.unit()));
        if !dash.forecast().is_empty() {
            println!("\n5-day forecast:");
            print!("{}", render::forecast_table(dash.forecast(), dash.unit()));
        }
    }
}

async fn run_fav(dash: &mut Dashboard, action: FavCommand) {
    match action {
        FavCommand::Add { city } => {
            dash.load_city(&city).await;
            if !matches!(dash.state(), DashboardState::Ready) {
                report_weather(dash);
                return;
            }
            match dash.add_current_to_favorites() {
                Ok(favorite) => println!("{} added to favorites", favorite.name),
                Err(e) => println!("{}", e),
            }
        }
        FavCommand::List => print!("{}", render::favorites_list(dash.favorites())),
        FavCommand::Rm { position } => match favorite_at(dash, position) {
            Some((id, name)) => {
                dash.remove_favorite(&id);
                println!("{} removed from favorites", name);
            }
            None => println!("No favorite at position {}", position),
        },
        FavCommand::Go { position } => match favorite_at(dash, position) {
            Some((id, _)) => {
                if dash.select_favorite(&id).await.is_ok() {
                    report_weather(dash);
                }
            }
            None => println!("No favorite at position {}", position),
        },
        FavCommand::Move { from, to } => {
            let mut ids: Vec<String> = dash.favorites().iter().map(|f| f.id.clone()).collect();
            if from == 0 || to == 0 || from > ids.len() || to > ids.len() {
                println!("Positions must be between 1 and {}", ids.len());
                return;
            }
            let id = ids.remove(from - 1);
            ids.insert(to - 1, id);
            match dash.reorder_favorites(&ids) {
                Ok(()) => print!("{}", render::favorites_list(dash.favorites())),
                Err(e) => println!("{}", e),
            }
        }
    }
}

async fn run_journal(dash: &mut Dashboard, action: JournalCommand) -> Result<()> {
    match action {
        JournalCommand::Add { city, notes } => {
            dash.load_city(&city).await;
            if !matches!(dash.state(), DashboardState::Ready) {
                report_weather(dash);
                return Ok(());
            }
            match dash.add_journal_entry(&notes.join(" ")) {
                Ok(entry) => println!("Journal entry added for {}", entry.city),
                Err(e) => println!("{}", e),
            }
        }
        JournalCommand::List => {
            print!("{}", render::journal_list(dash.journal_entries(), dash.unit()));
        }
        JournalCommand::Edit { position, notes } => match entry_at(dash, position) {
            Some(id) => match dash.update_journal_entry(&id, &notes.join(" ")) {
                Ok(_) => println!("Journal entry updated"),
                Err(e) => println!("{}", e),
            },
            None => println!("No journal entry at position {}", position),
        },
        JournalCommand::Rm { position } => match entry_at(dash, position) {
            Some(id) => {
                dash.delete_journal_entry(&id);
                println!("Journal entry deleted");
            }
            None => println!("No journal entry at position {}", position),
        },
        JournalCommand::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from("weather-journal.html"));
            export_journal(&path, dash.journal_entries(), dash.unit(), dash.theme())?;
            println!("Journal exported to {}", path.display());
        }
    }
    Ok(())
}

fn favorite_at(dash: &Dashboard, position: usize) -> Option<(String, String)> {
    dash.favorites()
        .get(position.checked_sub(1)?)
        .map(|fav| (fav.id.clone(), fav.name.clone()))
}

fn entry_at(dash: &Dashboard, position: usize) -> Option<String> {
    dash.journal_entries()
        .get(position.checked_sub(1)?)
        .map(|entry| entry.id.clone())
}
