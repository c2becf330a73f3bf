//! CLI entry point for passenger dataset cleaning and statistics.

use anyhow::{Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use passenger_insights::config::SAMPLE_URL_ENV;
use passenger_insights::utils::round_to;
use passenger_insights::{
    CleaningOptions, DashboardReport, DatasetLoader, LoadedDataset, LoaderConfig, RecordStore,
    ReportGenerator, StatisticalImputer, StatisticsSummary, missing_values,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Titanic passenger dataset cleaning and statistics",
    long_about = "Loads a Titanic passenger CSV, applies the selected cleaning steps and\n\
                  prints survival statistics.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  PASSENGER_SAMPLE_URL  URL of the sample dataset used by --sample\n\n\
                  EXAMPLES:\n  \
                  # Clean a local file with every step enabled\n  \
                  passenger-insights -i train.csv\n\n  \
                  # Use the public sample, skip title extraction, write a report\n  \
                  passenger-insights --sample --no-title -r\n\n  \
                  # Preview the cleaning actions\n  \
                  passenger-insights -i train.csv --dry-run"
)]
struct Args {
    /// Path to the passenger CSV file
    #[arg(short, long, required_unless_present = "sample", conflicts_with = "sample")]
    input: Option<String>,

    /// Download and use the public sample dataset instead of a local file
    #[arg(long)]
    sample: bool,

    /// Output directory for reports and exports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Custom output file name (without extension)
    ///
    /// If not specified, uses the input file name
    #[arg(long)]
    output_name: Option<String>,

    /// Do not fill missing ages with the mean age
    #[arg(long)]
    no_fill_ages: bool,

    /// Do not fill missing embarkation ports with the most common port
    #[arg(long)]
    no_fill_embarked: bool,

    /// Do not add the FamilySize field
    #[arg(long)]
    no_family_size: bool,

    /// Do not extract the Title field
    #[arg(long)]
    no_title: bool,

    /// Preview the cleaning actions without cleaning
    ///
    /// Shows the dataset overview, missing values and the fill values that
    /// would be used
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the dashboard report.
    /// Useful for piping to other tools: `... --json | jq .summary`
    #[arg(long)]
    json: bool,

    /// Write the dashboard report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Write the cleaned dataset to the output directory
    ///
    /// The dataset will be saved as <input_name>_cleaned.csv
    #[arg(short = 'e', long)]
    export: bool,
}

impl Args {
    fn cleaning_options(&self) -> CleaningOptions {
        CleaningOptions::builder()
            .fill_missing_ages(!self.no_fill_ages)
            .fill_missing_embarked(!self.no_fill_embarked)
            .add_family_size(!self.no_family_size)
            .extract_title(!self.no_title)
            .build()
    }
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    // Load environment variables from .env file
    dotenv().ok();

    let loader = DatasetLoader::try_new(loader_config())?;
    let dataset = load_dataset(&loader, &args)?;
    let stem = extract_file_stem(&dataset.name);

    if args.dry_run {
        run_dry_run(&dataset, &args.cleaning_options());
        return Ok(());
    }

    let store = RecordStore::new();
    let records_before = dataset.records.len();
    store.load(dataset);

    let options = args.cleaning_options();
    let steps = store.apply_cleaning(&options).map_err(|e| {
        error!("Cleaning failed: {}", e);
        anyhow!("Cleaning failed: {}", e)
    })?;
    for step in &steps {
        info!("{}", step);
    }

    let snapshot = store.snapshot();
    let generator = ReportGenerator::new(PathBuf::from(&args.output), args.output_name.clone());

    let output_file = if args.export {
        let path = generator.export_cleaned(&snapshot, &stem)?;
        Some(path.display().to_string())
    } else {
        None
    };

    let report = ReportGenerator::build_dashboard_report(&snapshot, output_file.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let report_path = generator.write_report_to_file(&report, &stem)?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(&report, records_before);

    Ok(())
}

/// Loader configuration with the sample URL taken from the environment when set.
fn loader_config() -> LoaderConfig {
    match std::env::var(SAMPLE_URL_ENV) {
        Ok(url) => LoaderConfig {
            sample_url: url,
            ..LoaderConfig::default()
        },
        Err(_) => LoaderConfig::default(),
    }
}

fn load_dataset(loader: &DatasetLoader, args: &Args) -> Result<LoadedDataset> {
    if args.sample {
        return fetch_sample(loader);
    }

    let input = args
        .input
        .as_deref()
        .ok_or_else(|| anyhow!("Either --input or --sample is required"))?;

    if !Path::new(input).exists() {
        return Err(anyhow!("Input file not found: {}", input));
    }

    info!("Loading dataset from: {}", input);
    Ok(loader.load_path(input)?)
}

#[cfg(feature = "remote")]
fn fetch_sample(loader: &DatasetLoader) -> Result<LoadedDataset> {
    Ok(loader.fetch_sample()?)
}

#[cfg(not(feature = "remote"))]
fn fetch_sample(_loader: &DatasetLoader) -> Result<LoadedDataset> {
    Err(anyhow!(
        "--sample requires the \"remote\" feature; rebuild with --features remote"
    ))
}

/// Run dry-run mode - show what cleaning would do without cleaning.
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
fn run_dry_run(dataset: &LoadedDataset, options: &CleaningOptions) {
    let records = &dataset.records;
    let missing = missing_values(records);

    println!("\n{}", "=".repeat(80));
    println!("DRY RUN - Preview of cleaning actions");
    println!("{}\n", "=".repeat(80));

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  Source: {}", dataset.name);
    println!("  Records: {}", records.len());
    println!("  Columns: {}", dataset.columns.join(", "));
    println!();

    println!("MISSING VALUES");
    println!("{}", "-".repeat(40));
    println!("{:<12} {:<10} {:<10}", "Column", "Missing", "Percent");
    for (name, count) in [
        ("Age", missing.age),
        ("Embarked", missing.embarked),
        ("Cabin", missing.cabin),
    ] {
        println!("{:<12} {:<10} {:<10.1}", name, count.count, count.percentage);
    }
    println!();

    println!("CLEANING ACTIONS");
    println!("{}", "-".repeat(40));
    if !options.any_enabled() {
        println!("  (none enabled)");
    }
    if options.fill_missing_ages {
        match StatisticalImputer::mean_age(records) {
            Some(mean) => println!(
                "  - Fill {} missing ages with {}",
                missing.age.count,
                round_to(mean, 1)
            ),
            None => println!("  - Fill missing ages: skipped, no known ages"),
        }
    }
    if options.fill_missing_embarked {
        println!(
            "  - Fill {} missing embarkation ports with '{}'",
            missing.embarked.count,
            StatisticalImputer::embarked_mode(records)
        );
    }
    if options.add_family_size {
        println!("  - Add FamilySize (SibSp + Parch + 1)");
    }
    if options.extract_title {
        println!("  - Extract Title from Name");
    }
    println!();
}

/// Print the default human-readable summary.
fn print_human_readable_summary(report: &DashboardReport, records_before: usize) {
    println!();
    println!("{}", "=".repeat(80));
    println!("CLEANING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!("Input:  {} ({} records)", report.source, records_before);
    if let Some(ref output_file) = report.output_file {
        println!("Output: {} ({} records)", output_file, report.overview.records);
    }
    println!();

    if !report.processing_steps.is_empty() {
        println!("Actions Taken:");
        for step in &report.processing_steps {
            println!("  - {}", step);
        }
        println!();
    }

    println!("Missing Values (before -> after):");
    println!(
        "  Age:      {} -> {}",
        report.missing_before.age.count, report.missing_after.age.count
    );
    println!(
        "  Embarked: {} -> {}",
        report.missing_before.embarked.count, report.missing_after.embarked.count
    );
    println!(
        "  Cabin:    {} -> {}",
        report.missing_before.cabin.count, report.missing_after.cabin.count
    );
    println!();

    print_statistics(&report.summary);

    println!("Survival by Class:");
    for group in &report.breakdowns.by_class {
        println!(
            "  {:<10} {:>4} survived / {:>4} died ({:.1}%)",
            group.name,
            group.survived,
            group.died,
            group.survival_rate()
        );
    }
    println!();
}

fn print_statistics(summary: &StatisticsSummary) {
    let ages = &summary.age_stats;
    println!("Statistics:");
    println!("  Passengers:    {}", summary.total_passengers);
    println!("  Survival rate: {:.1}%", summary.survival_rate);
    println!(
        "  Age:           avg {} / median {} / range {}-{}",
        ages.average, ages.median, ages.min, ages.max
    );
    println!(
        "  Sex:           {} male / {} female",
        summary.gender_distribution.male, summary.gender_distribution.female
    );
    println!(
        "  Class:         {} / {} / {} (1st / 2nd / 3rd)",
        summary.class_distribution.first,
        summary.class_distribution.second,
        summary.class_distribution.third
    );
    println!();
}

/// Extract the file stem (name without extension) from a dataset name.
///
/// Sample datasets are named `"<file> (sample)"`; the suffix is dropped.
fn extract_file_stem(name: &str) -> String {
    let file = name.trim_end_matches(" (sample)");
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
