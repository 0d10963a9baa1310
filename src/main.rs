use clap::Parser;
use file_ingest::DesktopNotifier;
use gui::App;
use iced::{Application, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use visualizer_core::{AppConfig, Notifier};

const APP_NAME: &str = "Pattern Visualizer";

/// Browse the metadata, data, tokens map and itemset trees of a scraped run.
#[derive(Debug, Parser)]
#[command(name = "pattern-visualizer", version)]
struct Args {
    /// Artifact files or run directories to open
    paths: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

struct Flags {
    config: AppConfig,
    paths: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::resolve(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!("Starting {}", APP_NAME);

    let mut paths = config.initial_paths.clone();
    paths.extend(args.paths);

    let settings = Settings {
        window: iced::window::Settings {
            size: iced::Size::new(1200.0, 800.0),
            min_size: Some(iced::Size::new(800.0, 600.0)),
            ..Default::default()
        },
        ..Settings::with_flags(Flags { config, paths })
    };

    VisualizerApp::run(settings).map_err(|e| {
        tracing::error!("Application error: {}", e);
        anyhow::anyhow!("GUI error: {e}")
    })
}

struct VisualizerApp {
    app: App,
}

impl Application for VisualizerApp {
    type Message = gui::Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = Flags;

    fn new(flags: Self::Flags) -> (Self, iced::Command<Self::Message>) {
        tracing::info!("Initializing application");

        let mut notifiers: Vec<Arc<dyn Notifier>> = Vec::new();
        if flags.config.desktop_notifications {
            notifiers.push(Arc::new(DesktopNotifier::new(
                APP_NAME,
                Duration::from_millis(flags.config.toast_duration_ms),
            )));
        }

        let mut app = App::new(flags.config, notifiers);
        let command = app.load_paths(flags.paths);
        (Self { app }, command)
    }

    fn title(&self) -> String {
        APP_NAME.to_string()
    }

    fn update(&mut self, message: Self::Message) -> iced::Command<Self::Message> {
        match self.app.update(message) {
            Ok(command) => command,
            Err(e) => {
                self.app.report(&e);
                iced::Command::none()
            }
        }
    }

    fn view(&self) -> iced::Element<Self::Message> {
        self.app.view()
    }

    fn subscription(&self) -> iced::Subscription<Self::Message> {
        self.app.subscription()
    }
}
