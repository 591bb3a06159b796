//! Boomtown host.
//!
//! Loads the configuration, starts one game and lets a table of bots play it
//! to the end, logging the final scoreboard. SIGINT or SIGTERM stops the game
//! early.

mod autoplay;
mod cli;
mod config;
mod logging;
mod signals;

use anyhow::{anyhow, Context, Result};
use boomtown_engine::{GameHandle, Move, View};
use futures::future::join_all;
use std::time::Duration;
use tracing::{error, info, warn};

use autoplay::Bot;
use cli::CliArgs;
use config::AppConfig;
use logging::setup_logging;
use signals::shutdown_signal;

// ============================================================================
// Application
// ============================================================================

pub struct Application {
    config: AppConfig,
}

impl Application {
    pub async fn new(args: CliArgs) -> Result<Self> {
        let mut config = AppConfig::load_from_file(&args.config_path).await?;

        // Apply CLI overrides
        if let Some(log_level) = args.log_level {
            config.logging.level = log_level;
        }
        if args.json_logs {
            config.logging.json_format = true;
        }
        if let Some(seed) = args.seed {
            config.game.seed = Some(seed);
        }

        config
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        setup_logging(&config.logging)?;

        info!("🛢️ Boomtown v{}", env!("CARGO_PKG_VERSION"));
        info!("📂 Config: {}", args.config_path.display());

        Ok(Self { config })
    }

    pub async fn run(self) -> Result<()> {
        let game_config = &self.config.game;
        info!("📋 Configuration Summary:");
        info!("  🗺️ Field: {}x{} sites", game_config.height, game_config.width);
        info!("  📅 Weeks: {}", game_config.weeks);
        info!("  💵 Base price: {} cents/bbl", game_config.price.base_cents);
        info!("  🤖 Players: {}", self.config.autoplay.players.join(", "));

        let game = GameHandle::spawn(self.config.game.clone()).context("Failed to start game")?;
        let seed = self.config.game.seed.unwrap_or_default();
        let poll = Duration::from_millis(self.config.autoplay.poll_interval_ms);

        let mut bots = Vec::with_capacity(self.config.autoplay.players.len());
        for name in &self.config.autoplay.players {
            let player = game
                .join(name.as_str())
                .await
                .with_context(|| format!("Failed to join {name}"))?;
            bots.push(Bot::new(game.clone(), player, name.clone(), poll, seed));
        }

        let owner = bots
            .first()
            .map(|bot| bot.player())
            .ok_or_else(|| anyhow!("No players configured"))?;
        game.submit(Move::done(owner)).await.context("Failed to start game")?;

        let tasks: Vec<_> = bots.into_iter().map(|bot| tokio::spawn(bot.play())).collect();

        tokio::select! {
            results = join_all(tasks) => {
                for result in results {
                    match result {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => warn!("Bot stopped early: {}", e),
                        Err(e) => error!("Bot task failed: {}", e),
                    }
                }
            }
            signal = shutdown_signal() => {
                let signal = signal?;
                info!("🛑 {} received, stopping game {}", signal, game.id());
                report(&game).await?;
                return Ok(());
            }
        }

        report(&game).await?;
        info!("👋 Thanks for playing Boomtown");
        Ok(())
    }
}

/// Logs the scoreboard, best first, followed by its JSON form.
async fn report(game: &GameHandle) -> Result<()> {
    let view = game.status().await.context("Failed to fetch the scoreboard")?;
    if let View::Score(score) = &view {
        let mut players = score.players.clone();
        players.sort_by_key(|s| std::cmp::Reverse(s.pnl));
        info!("🏆 Standings after week {}/{}:", score.week, score.weeks);
        for (rank, standing) in players.iter().enumerate() {
            info!(
                "  {}. {} {:.2} USD",
                rank + 1,
                standing.name,
                standing.pnl as f64 / 100.0
            );
        }
    }
    info!("{}", view.to_json().context("Failed to encode the scoreboard")?);
    Ok(())
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    match Application::new(args).await {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("❌ Application error: {:?}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("❌ Failed to start application: {:?}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
