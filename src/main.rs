//! Toast overlay: stacks transient message cards in the corner of the screen.
//!
//! Usage:
//!   toast-overlay           # one card per line read from stdin
//!   toast-overlay --demo    # replay a burst of sample messages

use anyhow::Context;
use std::time::Duration;
use toast_overlay::HeadlessOverlay;
use toast_overlay::subscriptions::notifications::{self, Input};
use toast_overlay_config::ToastConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Messages pushed by `--demo`
const DEMO_MESSAGE_COUNT: u32 = 60;
/// Delay between two demo messages
const DEMO_INTERVAL: Duration = Duration::from_millis(200);
const DEMO_TEXT: &str = "Background sync finished: 1,024 files checked, nothing to do. ";
const DEMO_LINK: &str = "https://www.example.org/sync/report";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    color_backtrace::install();
    init_logging();

    tracing::info!("Starting toast-overlay v{}", env!("CARGO_PKG_VERSION"));

    let config = ToastConfig::load_or_warn();
    let manager = toast_overlay::global::install(config, Box::new(HeadlessOverlay::default()))
        .context("failed to set up the toast manager")?;

    let (tx, rx) = notifications::channel_pair();
    let service = tokio::spawn(notifications::run(manager, rx));

    let demo = std::env::args().skip(1).any(|arg| arg == "--demo");
    let feed = async {
        if demo {
            feed_demo(&tx).await
        } else {
            feed_stdin(&tx).await
        }
    };

    tokio::select! {
        res = feed => res?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            return Ok(());
        }
    }
    drop(tx);

    tokio::select! {
        res = service => res.context("event loop failed")?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    // Under systemd, also log to the journal
    #[cfg(feature = "systemd")]
    let registry = registry.with(
        std::env::var_os("JOURNAL_STREAM").and_then(|_| tracing_journald::layer().ok()),
    );

    registry.init();
}

/// Every line from stdin becomes a card; the line terminator is left for
/// the manager to strip.
async fn feed_stdin(tx: &Sender<Input>) -> anyhow::Result<()> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .await
            .context("failed to read stdin")?;
        if read == 0 {
            tracing::debug!("stdin closed");
            return Ok(());
        }
        tx.send(Input::Show(line.clone()))
            .await
            .context("event loop stopped")?;
    }
}

/// A burst of link-carrying messages, counting down to zero.
async fn feed_demo(tx: &Sender<Input>) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(DEMO_INTERVAL);
    for remaining in (0..DEMO_MESSAGE_COUNT).rev() {
        interval.tick().await;
        let message = format!("{DEMO_TEXT}<a href='{DEMO_LINK}'>open report</a> {remaining}");
        tx.send(Input::Show(message))
            .await
            .context("event loop stopped")?;
    }
    Ok(())
}
