// Rank regions by recreational development potential
//
// Usage: rank_regions <dataset_dir> [--config scoring.json] [--json]
// Log level via RUST_LOG (default: recreation_potential=info,warn)

use anyhow::Result;
use clap::Parser;
use recreation_potential::{run_batch, PotentialScorer, RegionDatasets, ScoringConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Score every region in a dataset directory and print the ranking
#[derive(Debug, Parser)]
#[command(name = "rank_regions")]
struct Args {
    /// Directory holding the regional CSV datasets
    #[arg(env = "DATA_DIR")]
    dataset_dir: PathBuf,

    /// JSON file overriding the default scoring configuration
    #[arg(long, env = "SCORING_CONFIG")]
    config: Option<PathBuf>,

    /// Print the ranked reports as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recreation_potential=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ScoringConfig::load(path)?,
        None => ScoringConfig::default(),
    };
    let scorer = PotentialScorer::new(config);

    let datasets = RegionDatasets::load(&args.dataset_dir)?;
    let batch = run_batch(&scorer, &datasets)?;

    if args.json {
        let reports: Vec<_> = batch.ranked();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("{:<4} {:<28} {:>6}  {:<12} {:<20} {:>5}", "#", "Region", "Total", "Category", "Decision", "Zones");
    println!("{}", "-".repeat(82));
    for (rank, report) in batch.ranked().iter().enumerate() {
        let a = &report.analysis;
        println!(
            "{:<4} {:<28} {:>6.1}  {:<12} {:<20} {:>5}",
            rank + 1,
            a.region,
            a.total_score,
            a.category.label(),
            format!("{:?}", a.decision),
            report.zones.len()
        );
        if let Some(top) = report.zones.first() {
            println!(
                "     top zone: {} ({:.1}, {} places, {})",
                top.anchor.name,
                top.priority,
                top.plan.capacity,
                top.plan.facility_type.label()
            );
            for reason in &top.reasoning {
                println!("       - {}", reason.summary());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_flags() {
        let args = Args::try_parse_from(["rank_regions", "data/kz", "--config", "alt.json", "--json"]).unwrap();
        assert_eq!(args.dataset_dir, PathBuf::from("data/kz"));
        assert_eq!(args.config, Some(PathBuf::from("alt.json")));
        assert!(args.json);
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(Args::try_parse_from(["rank_regions", "data/kz", "--verbose"]).is_err());
    }
}
