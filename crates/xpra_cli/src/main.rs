//! xPRA CLI
//!
//! Tracking JSONL + dynamic-events CSV -> pressure relief per event

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xpra_core::analysis::{evaluate_events, gaussian_pressure, EventXpra, XpraReport};
use xpra_core::ingest::{load_events_path, FrameIngestor, IngestOutcome};
use xpra_core::{AnalysisConfig, Roster};

#[derive(Parser)]
#[command(name = "xpra")]
#[command(about = "Pressure Relief Added (xPRA) from player-tracking data", long_about = None)]
struct Cli {
    /// Analysis config (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Match identifier (overrides the config file)
    #[arg(long, global = true)]
    match_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a tracking file and print ingestion statistics
    Frames {
        /// Tracking JSONL file path
        #[arg(long)]
        tracking: PathBuf,

        /// Match metadata JSON (fills team ids missing from the feed)
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Pressure on one carrier at one frame
    Pressure {
        /// Tracking JSONL file path
        #[arg(long)]
        tracking: PathBuf,

        /// Frame number
        #[arg(long)]
        frame: u64,

        /// Match metadata JSON (fills team ids missing from the feed)
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Ball carrier player id
        #[arg(long)]
        carrier: i64,

        /// Possessing team id
        #[arg(long)]
        team: i64,

        /// Kernel width in meters (defaults to the config value)
        #[arg(long)]
        sigma: Option<f64>,
    },

    /// xPRA for every event of a match
    Relief {
        /// Tracking JSONL file path
        #[arg(long)]
        tracking: PathBuf,

        /// Dynamic events CSV file path
        #[arg(long)]
        events: PathBuf,

        /// Match metadata JSON (enables team backfill and role attribution)
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Keep only these event types (repeatable)
        #[arg(long = "event-type")]
        event_types: Vec<String>,

        /// Output report JSON file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?.with_match_id(cli.match_id);

    match cli.command {
        Commands::Frames { tracking, metadata } => {
            let roster = load_roster(metadata.as_deref())?;
            let outcome = ingest(&config, &tracking, roster.as_ref())?;
            print_ingest_stats(&outcome);
        }

        Commands::Pressure {
            tracking,
            metadata,
            frame,
            carrier,
            team,
            sigma,
        } => {
            let roster = load_roster(metadata.as_deref())?;
            let outcome = ingest(&config, &tracking, roster.as_ref())?;
            let sigma = sigma.unwrap_or(config.pressure.sigma_m);
            anyhow::ensure!(sigma.is_finite() && sigma > 0.0, "sigma must be a positive number");

            if !outcome.frames.contains_frame(frame) {
                println!("⚠️  Frame {} was not observed in the tracking data", frame);
            }
            let value = gaussian_pressure(outcome.frames.samples(frame), carrier, team, sigma);
            println!("Pressure on player {} (team {}) at frame {}: {:.4}", carrier, team, frame, value);
        }

        Commands::Relief {
            tracking,
            events,
            metadata,
            event_types,
            out,
        } => {
            let report = run_relief(&config, &tracking, &events, metadata.as_deref(), &event_types)?;
            print_report(&report);

            if let Some(out_path) = out {
                save_report(&out_path, &report)?;
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

fn load_roster(metadata: Option<&Path>) -> Result<Option<Roster>> {
    let Some(path) = metadata else {
        return Ok(None);
    };
    let file = File::open(path).with_context(|| format!("Failed to open metadata: {}", path.display()))?;
    let roster = Roster::from_reader(file)
        .with_context(|| format!("Failed to parse metadata: {}", path.display()))?;
    println!("👥 Roster: {} players", roster.len());
    Ok(Some(roster))
}

fn ingest(config: &AnalysisConfig, tracking: &Path, roster: Option<&Roster>) -> Result<IngestOutcome> {
    println!("📡 Ingesting tracking: {}", tracking.display());

    let mut ingestor = FrameIngestor::from_config(config);
    if let Some(roster) = roster {
        ingestor = ingestor.with_roster(roster);
    }
    ingestor
        .ingest_path(tracking)
        .with_context(|| format!("Failed to ingest tracking file: {}", tracking.display()))
}

#[derive(serde::Serialize)]
struct ReliefReport {
    #[serde(flatten)]
    summary: XpraReport,
    events: Vec<EventXpra>,
}

fn run_relief(
    config: &AnalysisConfig,
    tracking: &Path,
    events: &Path,
    metadata: Option<&Path>,
    event_types: &[String],
) -> Result<ReliefReport> {
    let roster = load_roster(metadata)?;

    let outcome = ingest(config, tracking, roster.as_ref())?;
    print_ingest_stats(&outcome);

    let mut load = load_events_path(events)
        .with_context(|| format!("Failed to load events: {}", events.display()))?;
    load.retain_types(event_types);
    println!(
        "📋 Events: {} parsed, {} skipped, {} selected",
        load.stats.parsed,
        load.stats.failed,
        load.events.len()
    );

    let evaluations = evaluate_events(&outcome.frames, &load.events, config.pressure.sigma_m);
    let summary = XpraReport::build(config.match_id.clone(), &evaluations, roster.as_ref());

    Ok(ReliefReport {
        summary,
        events: evaluations,
    })
}

fn print_ingest_stats(outcome: &IngestOutcome) {
    let stats = &outcome.stats;
    println!("\n✅ Tracking ingested");
    println!("   Frames:              {}", outcome.frames.len());
    if let Some((first, last)) = outcome.frames.frame_range() {
        println!("   Frame range:         {}..={}", first, last);
    }
    println!("   Lines:               {}", stats.total_lines);
    println!("   Malformed lines:     {}", stats.malformed_lines);
    println!("   Missing player_data: {}", stats.missing_player_data);
    println!("   Duplicate frames:    {}", stats.duplicate_frames);
    println!("   Backfilled teams:    {}", stats.backfilled_teams);
}

fn print_report(report: &ReliefReport) {
    let summary = &report.summary;
    println!("\n📊 xPRA report");
    if let Some(match_id) = &summary.match_id {
        println!("   Match:          {}", match_id);
    }
    println!("   Events:         {}", summary.events_evaluated);
    println!("   Computed:       {}", summary.computed);
    println!("   Missing carrier: {}", summary.missing_carrier);
    println!("   Unresolvable:   {}", summary.unresolvable);
    println!("   Total xPRA:     {:.3}", summary.total_xpra);
    println!("   Mean xPRA:      {:.3}", summary.mean_xpra);

    if !summary.players.is_empty() {
        println!("\n   Top carriers:");
        for player in summary.players.iter().take(10) {
            println!(
                "   {:>8} {:<10} events={:<4} total={:>8.3} mean={:>7.3}",
                player.player_id, player.role, player.events, player.total_xpra, player.mean_xpra
            );
        }
    }

    if !summary.roles.is_empty() {
        println!("\n   By role:");
        for role in &summary.roles {
            println!(
                "   {:<10} events={:<4} total={:>8.3} mean={:>7.3}",
                role.role, role.events, role.total_xpra, role.mean_xpra
            );
        }
    }
}

fn save_report(path: &Path, report: &ReliefReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    println!("\n📄 Report saved to: {}", path.display());
    Ok(())
}
