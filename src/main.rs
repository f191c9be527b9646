mod dashboard;
mod error_mapping;
mod terminal;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use skycast_core::{App, Config, DayBoundary};
use skycast_store::{MemoryPreferenceStore, PreferenceStore, Preferences, SqlitePreferenceStore};
use skycast_weather::{
    ConfiguredLocation, Coordinates, TimeZonePolicy, WeatherProvider, WeatherService,
};

use crate::dashboard::{Dashboard, DashboardSettings};
use crate::error_mapping::{map_startup_error, map_store_error, map_weather_error};
use crate::terminal::TerminalPresenter;

/// Current conditions, a 5-day summary and the next day's trend from OpenWeatherMap.
#[derive(Parser, Debug)]
#[command(name = "skycast", version, about)]
struct Cli {
    /// Path to config.toml (default: <config dir>/skycast/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show weather for CITY, or for the last city / current position
    Show { city: Option<String> },
    /// Show weather for the configured position
    Here,
    /// Switch between metric and imperial units
    Unit,
    /// Switch between light and dark theme
    Theme,
    /// Manage favorite cities
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },
    /// Suggest cities from favorites and history
    Suggest { prefix: String },
}

#[derive(Subcommand, Debug)]
enum FavAction {
    Add { city: String },
    Remove { city: String },
    List,
}

fn policy_for(boundary: DayBoundary) -> TimeZonePolicy {
    match boundary {
        DayBoundary::Location => TimeZonePolicy::LocationOffset,
        DayBoundary::Utc => TimeZonePolicy::Utc,
    }
}

/// Open the preference database, or keep preferences in memory for this run.
fn open_store(config: &Config) -> Box<dyn PreferenceStore> {
    let path = config.preferences_path();
    match SqlitePreferenceStore::new(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!("Preference store at {} unavailable: {}", path.display(), e);
            eprintln!("{}", map_store_error(e).user_message());
            Box::new(MemoryPreferenceStore::new())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize core
    skycast_core::init()?;

    // Create and initialize application
    let mut app = App::new(cli.config.as_deref())
        .and_then(|mut app| app.initialize().map(|()| app))
        .map_err(|e| {
            let mapped = map_startup_error(e);
            tracing::error!("Startup failed: {}", mapped);
            eprintln!("{}", mapped.user_message());
            mapped
        })?;

    for warning in app.warnings() {
        eprintln!("warning: {}: {}", warning.field, warning.message);
    }

    let config = app.shared_config();
    let weather = &config.weather;

    let provider = match WeatherProvider::with_base_url(weather.api_key.clone(), &weather.base_url) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("{}", map_weather_error(e).user_message());
            app.shutdown()?;
            return Ok(());
        }
    };

    let prefs = Preferences::load(open_store(&config));
    let presenter = TerminalPresenter::new(
        std::io::stdout(),
        config.ui.width,
        config.ui.color,
        prefs.theme(),
    );
    let location = ConfiguredLocation::new(
        weather
            .coordinates()
            .map(|(lat, lon)| Coordinates::new(lat, lon)),
    );
    let settings = DashboardSettings {
        default_city: weather.default_city.clone(),
        policy: policy_for(weather.day_boundary),
        hourly_window: weather.hourly_window,
        geolocation_timeout: Duration::from_secs(weather.geolocation_timeout_secs),
    };

    let mut dashboard = Dashboard::new(
        WeatherService::new(provider),
        prefs,
        presenter,
        Box::new(location),
        settings,
    );

    tracing::info!("Skycast started");

    match cli.command.unwrap_or(Command::Show { city: None }) {
        Command::Show { city: Some(city) } => dashboard.search_city(&city).await,
        Command::Show { city: None } => dashboard.start().await,
        Command::Here => dashboard.use_my_location().await,
        Command::Unit => dashboard.toggle_unit().await,
        Command::Theme => {
            let theme = dashboard.toggle_theme();
            dashboard.presenter_mut().set_theme(theme);
            println!("Theme: {}", theme.as_str());
        }
        Command::Fav { action } => match action {
            FavAction::Add { city } => dashboard.add_favorite(&city),
            FavAction::Remove { city } => dashboard.remove_favorite(&city),
            FavAction::List => {
                let favorites = dashboard.preferences().favorites();
                if favorites.is_empty() {
                    println!("No favorites yet.");
                }
                for (i, city) in favorites.iter().enumerate() {
                    println!("{:>2}. {}", i + 1, city);
                }
            }
        },
        Command::Suggest { prefix } => {
            for city in dashboard.suggest(&prefix) {
                println!("{}", city);
            }
        }
    }

    // Graceful shutdown
    app.shutdown()?;

    Ok(())
}
