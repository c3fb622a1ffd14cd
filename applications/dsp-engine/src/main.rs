/// Soul DSP Engine - DSP effect chain engine and command-line client
use clap::{Parser, Subcommand};
use soul_dsp::{Effect, EffectChain, EffectKind, SlotState};
use soul_dsp_client::{ClientConfig, EngineClient};
use soul_dsp_engine::{create_router, AppState, EngineConfig};
use soul_dsp_sync::{ChainSync, DspEngine};
use std::io::{self, Write};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soul-dsp-engine")]
#[command(about = "Soul DSP effect chain engine", long_about = None)]
struct Cli {
    /// Engine URL used by client commands
    #[arg(long, env = "SOUL_DSP_URL", default_value = "http://127.0.0.1:8790", global = true)]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP engine
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the current chain
    Chain,
    /// List the effect types the engine can host
    Effects,
    /// Add an effect with default parameters
    Add {
        /// Slot index (0-3)
        slot: usize,
        /// Effect type (eq, graphic_eq, compressor, limiter, crossfeed, stereo, convolution)
        effect: EffectKind,
    },
    /// Remove the effect from a slot
    Remove { slot: usize },
    /// Enable a bypassed effect
    Enable { slot: usize },
    /// Bypass an effect without removing it
    Disable { slot: usize },
    /// Replace an effect's parameters with a JSON payload
    Set {
        slot: usize,
        /// Effect JSON, e.g. '{"type":"limiter","settings":{"thresholdDb":-1.0,"releaseMs":100.0}}'
        effect: String,
    },
    /// Reset an effect's parameters to defaults
    Reset { slot: usize },
    /// Remove every effect
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the preset table for an effect type
    Presets { effect: EffectKind },
    /// List chain presets
    ChainPresets,
    /// Save the current chain as a preset
    SavePreset {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a user chain preset
    DeletePreset { id: i64 },
    /// Replace the chain with a preset
    LoadPreset { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soul_dsp_engine=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config).await,
        command => run_client(&cli.url, command).await,
    }
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = EngineConfig::load_from(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Soul DSP Engine");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let engine = match config.snapshot_path() {
        Some(path) => {
            tracing::info!("Snapshot: {}", path.display());
            DspEngine::open(path).await?
        }
        None => {
            tracing::info!("No snapshot configured, chain is kept in memory");
            DspEngine::new()
        }
    };

    let app = create_router(AppState::new(Arc::new(engine)));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Engine listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

async fn run_client(url: &str, command: Commands) -> anyhow::Result<()> {
    let client = EngineClient::new(ClientConfig::new(url))?;
    let mut sync = ChainSync::new(Arc::new(client));
    sync.reload().await?;

    match command {
        Commands::Serve { .. } | Commands::Chain => {}
        Commands::Effects => {
            for kind in sync.available_effects().await {
                println!("{:<12} {}", kind.as_str(), kind.display_name());
            }
            return Ok(());
        }
        Commands::Add { slot, effect } => sync.add_effect(slot, effect).await?,
        Commands::Remove { slot } => sync.remove_effect(slot).await?,
        Commands::Enable { slot } => sync.toggle_effect(slot, true).await?,
        Commands::Disable { slot } => sync.toggle_effect(slot, false).await?,
        Commands::Set { slot, effect } => {
            let effect: Effect = serde_json::from_str(&effect)?;
            sync.update_effect_parameters(slot, effect)?.await?;
        }
        Commands::Reset { slot } => sync.reset_effect(slot)?.await?,
        Commands::Clear { yes } => {
            let cleared = if yes {
                sync.clear_chain(&|_: &str| true).await?
            } else {
                sync.clear_chain(&prompt).await?
            };
            if !cleared {
                println!("Cancelled");
                return Ok(());
            }
        }
        Commands::Presets { effect } => {
            print_preset_table(&sync, effect).await;
            return Ok(());
        }
        Commands::ChainPresets => {
            for preset in sync.chain_presets().await {
                println!(
                    "{:>4}  {:<24} {}{}",
                    preset.id,
                    preset.name,
                    if preset.is_builtin { "[built-in] " } else { "" },
                    preset.description.as_deref().unwrap_or("")
                );
            }
            return Ok(());
        }
        Commands::SavePreset { name, description } => {
            let id = sync.save_chain_preset(name, description).await?;
            println!("Saved preset {}", id);
            return Ok(());
        }
        Commands::DeletePreset { id } => {
            sync.delete_chain_preset(id).await?;
            println!("Deleted preset {}", id);
            return Ok(());
        }
        Commands::LoadPreset { id } => sync.load_chain_preset(id).await?,
    }

    print_chain(sync.chain());
    Ok(())
}

/// Ask on stdin, defaulting to no
fn prompt(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn print_chain(chain: &EffectChain) {
    for slot in chain.slots() {
        match (&slot.effect, slot.state()) {
            (Some(effect), state) => {
                let marker = if state == SlotState::Bypassed { "off" } else { "on" };
                let label = effect
                    .preset_label()
                    .map(|label| format!(" ({})", label))
                    .unwrap_or_default();
                println!(
                    "[{}] {:<3} {}{}: {}",
                    slot.index,
                    marker,
                    effect.kind().display_name(),
                    label,
                    effect.summary()
                );
            }
            (None, _) => println!("[{}] empty", slot.index),
        }
    }
}

async fn print_preset_table(sync: &ChainSync<EngineClient>, kind: EffectKind) {
    fn print_rows<T: serde::Serialize>(rows: Vec<(String, T)>) {
        for (name, settings) in rows {
            let settings = serde_json::to_string(&settings).unwrap_or_default();
            println!("{:<16} {}", name, settings);
        }
    }

    match kind {
        EffectKind::Eq => print_rows(sync.eq_presets().await),
        EffectKind::GraphicEq => print_rows(sync.graphic_eq_presets().await),
        EffectKind::Compressor => print_rows(sync.compressor_presets().await),
        EffectKind::Limiter => print_rows(sync.limiter_presets().await),
        EffectKind::Crossfeed => print_rows(sync.crossfeed_presets().await),
        EffectKind::Stereo => print_rows(sync.stereo_presets().await),
        EffectKind::Convolution => {
            for ir in soul_dsp::settings::convolution::BUNDLED_IMPULSE_RESPONSES {
                println!(
                    "{:<16} {}",
                    ir.name,
                    soul_dsp::ConvolutionSettings::bundled_path(ir.id)
                );
            }
        }
    }
}
