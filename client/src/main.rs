//! AgriYield Predictor - command-line client
//!
//! Drives the time-series view and the prediction form against a running
//! backend and prints the rendered views.

use agri_yield_client::{render, AgriYieldClient, Config, PredictionService, TabController};
use clap::{Parser, Subcommand};
use shared::{CropId, PredictionForm, Tab};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "agri-yield",
    version,
    about = "Crop yield forecasts, history and single-point predictions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List crops with a trained time-series model
    Crops,
    /// Forecast future yield for a crop
    Forecast {
        /// Crop to forecast (defaults to the first available crop)
        #[arg(long)]
        crop: Option<String>,
        /// Forecast horizon in days (1-365)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Show historical yield for a crop
    History {
        #[arg(long)]
        crop: Option<String>,
        /// History window in days (1-3650)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Show model performance for a crop
    Performance {
        #[arg(long)]
        crop: Option<String>,
    },
    /// Performance of every trained model
    Summary,
    /// Check the backend is reachable
    Health,
    /// Predict yield for one set of conditions
    Predict {
        #[arg(long)]
        temperature: String,
        #[arg(long)]
        rainfall: String,
        #[arg(long)]
        humidity: String,
        #[arg(long)]
        soil_type: String,
        #[arg(long)]
        weather_condition: String,
        #[arg(long)]
        crop_type: String,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agri_yield=info,agri_yield_client=info".into());
    let json = std::env::var("AGRI_LOG_JSON")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;
    let client = AgriYieldClient::from_config(&config.api)?;
    tracing::debug!(
        environment = %config.environment,
        base_url = %client.base_url(),
        "Configuration loaded"
    );

    match cli.command {
        Command::Health => {
            client.health_check().await?;
            println!("OK");
        }
        Command::Summary => {
            let summary = client.get_summary().await?;
            print!("{}", render::render_summary(&summary));
        }
        Command::Predict {
            temperature,
            rainfall,
            humidity,
            soil_type,
            weather_condition,
            crop_type,
        } => {
            let form = PredictionForm {
                temperature,
                rainfall,
                humidity,
                soil_type,
                weather_condition,
                crop_type,
            };
            let mut service = PredictionService::new(client);
            let state = service.submit(&form).await;
            match (&state.predicted_yield, &state.error_message) {
                (Some(predicted), _) => println!("Predicted Yield: {}", predicted),
                (None, Some(message)) => fail(message),
                (None, None) => {}
            }
        }
        Command::Crops => {
            let mut controller = TabController::new(client, &config.view);
            controller.mount().await;
            let state = controller.state();
            if let Some(message) = &state.error_message {
                fail(message);
            }
            print!(
                "{}",
                render::render_crops(&state.available_crops, &state.selected_crop)
            );
        }
        Command::Forecast { crop, days } => {
            let mut controller = TabController::new(client, &config.view);
            prepare(&mut controller, crop).await;
            if let Some(days) = days {
                controller.set_horizon(days);
            }
            show(&mut controller, Tab::Forecast).await;
        }
        Command::History { crop, days } => {
            let view = agri_yield_client::config::ViewConfig {
                history_days: days.unwrap_or(config.view.history_days),
                ..config.view.clone()
            };
            let mut controller = TabController::new(client, &view);
            prepare(&mut controller, crop).await;
            show(&mut controller, Tab::History).await;
        }
        Command::Performance { crop } => {
            let mut controller = TabController::new(client, &config.view);
            prepare(&mut controller, crop).await;
            show(&mut controller, Tab::Performance).await;
        }
    }

    Ok(())
}

/// Mount the view and apply an explicit crop choice
async fn prepare(controller: &mut TabController<AgriYieldClient>, crop: Option<String>) {
    controller.mount().await;
    if let Some(crop) = crop {
        controller.select_crop(crop);
    } else if let Some(message) = &controller.state().error_message {
        fail(message);
    }
}

/// Activate a tab and print its view, or the error
async fn show(controller: &mut TabController<AgriYieldClient>, tab: Tab) {
    controller.activate_tab(tab).await;

    let state = controller.state();
    if let Some(message) = &state.error_message {
        fail(message);
    }
    let crop: &CropId = &state.selected_crop;
    if !crop.is_selected() {
        fail("No crop selected and no crops available");
    }

    let rendered = match tab {
        Tab::Forecast => controller
            .forecast_view()
            .map(|v| render::render_forecast(crop, &v)),
        Tab::History => controller
            .history_view()
            .map(|v| render::render_history(crop, &v)),
        Tab::Performance => controller
            .performance_view()
            .map(|v| render::render_performance(crop, &v)),
    };
    if let Some(rendered) = rendered {
        print!("{}", rendered);
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
