mod render;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use deploy_core::{
    effects::{Typewriter, TYPEWRITER_INTERVAL},
    load_settings, open_in_browser, presentation::DEPLOYING_BANNER, DeploymentScheduler,
    EventOutcome, ViewController,
};
use shared::domain::{DeploymentPhase, TokenField, DEFAULT_DECIMALS, DEFAULT_TOTAL_SUPPLY};
use tokio::{
    runtime::Handle,
    sync::mpsc::unbounded_channel,
    time::{sleep, Instant},
};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Plays the simulated ERC-20 deployment sequence in the terminal.
#[derive(Parser, Debug)]
#[command(name = "deployer_cli", version)]
struct Args {
    #[arg(long)]
    name: String,
    #[arg(long)]
    symbol: String,
    #[arg(long, default_value = DEFAULT_TOTAL_SUPPLY)]
    supply: String,
    #[arg(long, default_value = DEFAULT_DECIMALS)]
    decimals: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Config file to load instead of the default search locations.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    explorer_url: Option<String>,
    /// Print the final receipt as JSON instead of the text summary.
    #[arg(long)]
    json: bool,
    /// Open the explorer link once the deployment succeeds.
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = &args.explorer_url {
        settings.set_explorer_url(url)?;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut controller = ViewController::new();
    for (field, value) in [
        (TokenField::Name, &args.name),
        (TokenField::Symbol, &args.symbol),
        (TokenField::TotalSupply, &args.supply),
        (TokenField::Decimals, &args.decimals),
        (TokenField::Description, &args.description),
    ] {
        controller.update_field(field, field.constrain_input(value));
    }

    if !args.json {
        println!("{}", render::logo());
        type_subtitle().await?;
        println!("{}\n", render::badges(&settings));
        println!("{DEPLOYING_BANNER}\n");
    }

    let (tx, mut rx) = unbounded_channel();
    let mut scheduler = DeploymentScheduler::new(tx, Handle::current());
    let attempt = controller.deploy()?;
    scheduler.schedule(attempt);

    while controller.phase() == DeploymentPhase::Deploying {
        let event = rx
            .recv()
            .await
            .context("deployment sequencer stopped before completion")?;
        match controller.apply(event) {
            EventOutcome::Revealed {
                index,
                progress_percent,
            } if !args.json => {
                if let Some(report) = render::step_report(index, progress_percent) {
                    println!("{report}");
                }
            }
            EventOutcome::Stale => tracing::warn!(?event, "dropped event from another attempt"),
            _ => {}
        }
    }

    let receipt = controller
        .receipt(&settings.explorer_base_url)
        .context("deployment finished without a receipt")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        println!("\n{}", render::summary(&receipt));
    }

    if args.open {
        let url = Url::parse(&receipt.explorer_url)?;
        if let Err(err) = open_in_browser(&url) {
            tracing::warn!(%err, "failed to open explorer link");
        }
    }

    Ok(())
}

/// Types the subtitle out one character per tick, like the desktop header.
async fn type_subtitle() -> io::Result<()> {
    let typewriter = Typewriter::subtitle();
    let started = Instant::now();
    let mut stdout = io::stdout();
    let mut printed = 0;
    loop {
        let elapsed = started.elapsed();
        let visible = typewriter.visible_text(elapsed);
        stdout.write_all(visible[printed..].as_bytes())?;
        stdout.flush()?;
        printed = visible.len();
        if typewriter.is_finished(elapsed) {
            break;
        }
        sleep(TYPEWRITER_INTERVAL).await;
    }
    writeln!(stdout)
}
