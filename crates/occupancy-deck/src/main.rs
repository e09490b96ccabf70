use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use occupancy_deck::app::assets::FsProbe;
use occupancy_deck::app::export::{ExportOptions, Exporter};
use occupancy_deck::app::narrative::{NarrativeOptions, build_narrative_deck};
use occupancy_deck::infra::config::Config;

/// Build the room-occupancy project presentation.
#[derive(Debug, Parser)]
#[command(name = "occupancy-deck", version, about)]
struct Cli {
    /// Where to write the .pptx file.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Directory holding the chart images.
    #[arg(long, value_name = "DIR")]
    plots_dir: Option<PathBuf>,

    /// Print the deck as JSON instead of writing a file.
    #[arg(long)]
    outline: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    occupancy_deck::init(cli.verbose);

    let mut config = Config::load()?;
    if let Some(output) = cli.output {
        config.output.set_path(output);
    }
    if let Some(plots_dir) = cli.plots_dir {
        config.assets.set_plots_dir(plots_dir);
    }

    let deck = build_narrative_deck(&NarrativeOptions::from_config(&config), &FsProbe)?;

    if cli.outline {
        let json = serde_json::to_string_pretty(&deck).context("failed to serialize deck")?;
        println!("{json}");
        return Ok(());
    }

    let result = Exporter::new()?.export(&deck, &ExportOptions::from_config(&config))?;
    let file = result.output_path.display();
    println!("Presentazione creata con successo: {file}");
    println!("Numero totale di slide: {}", result.slide_count);
    println!("\nFile creato: {file}");
    Ok(())
}
