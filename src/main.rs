use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use log::{error, info};

use rental_eda::config;
use rental_eda::logger::setup_logger;
use rental_eda::report::{build_report, load_dataset, write_report};

fn run() -> Result<()> {
    let config = config::read_config().context("could not load configuration")?;

    // Initialize logger
    setup_logger(config.level_filter()?)?;

    let start = Instant::now();
    let dataset = load_dataset(&config).context("loading input tables failed")?;
    info!("Inputs loaded in {}", humantime::format_duration(start.elapsed()));

    let report = build_report(&dataset, &config);
    report.join_gaps.log();

    let written = write_report(&report, &config.output_dir)
        .with_context(|| format!("writing results to {}", config.output_dir.display()))?;

    println!(
        "{} {} listings ({} reviewed), {} reviews, {} neighbourhoods -> {} files in {}",
        "done:".green().bold(),
        report.count_listings,
        report.count_reviewed_listings,
        report.count_reviews,
        report.neighbourhoods_reviewed.len(),
        written.len(),
        config.output_dir.display()
    );
    if !report.coverage_gaps.is_empty() {
        println!(
            "{} {}",
            "coverage gaps:".yellow(),
            report.coverage_gaps.join(", ")
        );
    }
    if !report.join_gaps.is_empty() {
        println!("{}", "some rows fell out of joins, see the log".yellow());
    }

    info!("Finished in {}", humantime::format_duration(start.elapsed()));
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        error!("Error: {:?}", err);
        eprintln!("{} {:?}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
