// Silva - a Granblue Fantasy chat bot: alias-rewritten facts, dice, spark math and feed relays

pub mod aliases;
pub mod app;
pub mod cli;
pub mod commands;
pub mod dice;
pub mod relay;
pub mod session;
pub mod shutdown;
pub mod spark;
pub mod text;
pub mod turso;
pub mod util;

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

use relay::FeedRelay;
use shutdown::ShutdownSignal;
use util::Settings;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

/// Application entry point.
///
/// Loads settings (the path argument, or the default location), starts the
/// feed relay when accounts are followed and serves commands on stdin until EOF.
pub fn run() {
    let args = cli::Args::parse();
    let settings = match Settings::load_or_default(args.settings.as_deref()) {
        Ok(mut settings) => {
            if let Some(level) = args.log_level {
                settings.log_level = Some(level);
            }
            settings
        }
        Err(e) => {
            eprintln!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    util::logger::init(settings.level_filter());

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(serve(settings)) {
        error!("Silva stopped with an error: {}", e);
        std::process::exit(1);
    }
}

async fn serve(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let services = app::setup(&settings).await?;
    let shutdown = ShutdownSignal::new();

    let follower = if services.session.followed_accounts.is_empty() {
        debug!("No followed accounts, feed relay not started");
        None
    } else {
        let relay = FeedRelay::new(
            services.turso.clone(),
            Arc::new(app::StdoutSink),
            services.session.clone(),
        );
        let interval = Duration::from_secs(settings.poll_interval_secs.max(1));
        let rx = shutdown.subscribe();
        Some(tokio::spawn(async move { relay.follow(interval, rx).await }))
    };

    let result = app::run_console(services.bot.clone()).await;

    shutdown.signal();
    if let Some(follower) = follower {
        if let Err(e) = follower.await {
            warn!("Feed relay task failed: {}", e);
        }
    }

    info!("Logging out.");
    result.map_err(Into::into)
}
