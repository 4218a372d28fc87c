//! LED matrix dashboard.
//!
//! Renders the dashboard into the terminal (two panel rows per text row)
//! and listens to MQTT for weather, now-playing, sensor and control
//! updates. It runs a fixed-rate render loop on the main thread that:
//! - Applies page commands and auto-rotation
//! - Redraws only when state changed, text is scrolling or the clock ticked
//! - Presents frames to the panel
//!
//! The MQTT handler and the SIGINT/SIGTERM watcher run on a tokio runtime.
//!
//! # Usage
//!
//! ```bash
//! dashboard                 # built-in defaults, broker on localhost
//! dashboard config.json     # override any section
//! ```
//!
//! Logs go to stderr (stdout is the panel), or to `log.file` when set.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LoggerConfig, Root};
use log4rs::encode::pattern::PatternEncoder;

use rs_ledmatrix::config::LogConfig;
use rs_ledmatrix::fonts::MonoFontFace;
use rs_ledmatrix::hal::TerminalPanel;
use rs_ledmatrix::pages::Fonts;
use rs_ledmatrix::services::{watch_signals, MqttHandler, MqttRuntimeConfig};
use rs_ledmatrix::traits::SystemClock;
use rs_ledmatrix::{Brightness, Config, RenderLoop, SharedDisplayState, Shutdown};

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// How long the MQTT handler gets to publish `offline` and disconnect.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let level: LevelFilter = config.level.parse().unwrap_or(LevelFilter::Info);

    let (name, appender): (&str, Box<dyn log4rs::append::Append>) = if config.file.is_empty() {
        let console = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        ("stderr", Box::new(console))
    } else {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(config.file.as_str())
            .with_context(|| format!("opening log file {}", config.file))?;
        ("logfile", Box::new(file))
    };

    let log_config = LoggerConfig::builder()
        .appender(Appender::builder().build(name, appender))
        .build(Root::builder().appender(name).build(level))?;
    log4rs::init_config(log_config)?;
    Ok(())
}

fn load_config() -> anyhow::Result<Config> {
    match std::env::args().nth(1) {
        Some(path) => {
            Config::load(&path).with_context(|| format!("loading config from {}", path))
        }
        None => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<()> {
    // =========================================================================
    // Configuration
    // =========================================================================
    let config = load_config()?;
    init_logging(&config.log)?;

    log::info!(
        "{} ({}) starting, {}x{} panel",
        config.device.name,
        config.device.id,
        config.matrix.display_width(),
        config.matrix.rows
    );

    // =========================================================================
    // Fonts
    // =========================================================================
    let fonts = Fonts {
        text: MonoFontFace::from_name(&config.matrix.text_font)?,
        large: MonoFontFace::from_name(&config.matrix.large_font)?,
    };

    // =========================================================================
    // Shared state
    // =========================================================================
    let brightness = Brightness::clamped(config.matrix.default_brightness as i64);
    let state = Arc::new(SharedDisplayState::new(brightness));
    let shutdown = Shutdown::new();

    // =========================================================================
    // MQTT and signal handling
    // =========================================================================
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("starting tokio runtime")?;

    let mqtt_task = if config.mqtt.enabled {
        let handler = MqttHandler::new(
            Arc::clone(&state),
            MqttRuntimeConfig::from_config(&config.mqtt),
        );
        Some(rt.spawn(handler.run(shutdown.clone())))
    } else {
        log::info!("MQTT disabled");
        None
    };

    rt.spawn(watch_signals(shutdown.clone()));

    // =========================================================================
    // Render loop (main thread)
    // =========================================================================
    let panel = TerminalPanel::new(config.matrix.display_width(), config.matrix.rows)
        .context("opening terminal panel")?;
    let mut render = RenderLoop::from_config(panel, fonts, Arc::clone(&state), &config);
    render.run(&SystemClock::new(), &shutdown);
    // Restores the terminal
    drop(render);

    if let Some(task) = mqtt_task {
        match rt.block_on(tokio::time::timeout(SHUTDOWN_GRACE, task)) {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => log::warn!("{}", e),
            Ok(Err(e)) => log::warn!("MQTT task failed: {}", e),
            Err(_) => log::warn!("MQTT handler did not stop in time"),
        }
    }
    rt.shutdown_timeout(Duration::from_millis(500));
    Ok(())
}
