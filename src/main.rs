use clap::Parser;
use env_logger::Env;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use weather_harvest::{
    ExportSettings, FetchSettings, HarvestError, HarvestReport, Harvester, LocationConfig,
    LocationSourceError, DEFAULT_CONFIG_FILE, DEFAULT_FILE_STEM,
};

/// Fetch two years of daily weather history for every configured location.
#[derive(Debug, Parser)]
#[command(name = "weather-harvest", version, about)]
struct Cli {
    /// JSON file listing the locations.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory receiving the CSV and JSON files.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Prefix of the output file names.
    #[arg(long, default_value = DEFAULT_FILE_STEM)]
    file_stem: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default level.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error}");
            let mut source = error.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            if matches!(
                error,
                HarvestError::LocationSource(LocationSourceError::Missing(_))
            ) {
                eprintln!("Please create {} or pass --config.", cli.config.display());
            }
            eprintln!("\nProcess failed.");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<HarvestReport, HarvestError> {
    let config = LocationConfig::load(&cli.config).await?;
    let export = ExportSettings::builder()
        .output_dir(cli.output_dir.clone())
        .file_stem(cli.file_stem.clone())
        .build();
    let harvester = Harvester::from_config(&config, FetchSettings::default(), export)?;

    harvester
        .harvest()
        .locations(&config.locations)
        .call()
        .await
}

fn print_summary(report: &HarvestReport) {
    let summary = &report.export.summary;
    let line = "-".repeat(60);

    println!("{line}");
    println!("Successful: {}", report.successes());
    println!("Failed: {}", report.failures());
    println!("{line}");
    println!("Total records: {}", summary.rows);
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        println!("Date range: {first} to {last}");
    }
    println!("Number of locations: {}", summary.locations);
    println!("\nData saved: {}", report.export.files.csv.display());
    println!("Also saved in JSON format: {}", report.export.files.json.display());

    println!("\nSummary statistics:");
    println!("Average maximum temperature: {}", format_mean(summary.mean_temperature_max, "°C"));
    println!("Average minimum temperature: {}", format_mean(summary.mean_temperature_min, "°C"));
    println!("Average precipitation: {}", format_mean(summary.mean_precipitation, " mm"));

    if !summary.regions.is_empty() {
        println!("\nRegional distribution:");
        for region in &summary.regions {
            println!("  {}: {} locations", region.region, region.locations);
        }
    }
    print_preview(report);
    println!("\nProcess completed! {} records successfully fetched.", summary.rows);
}

const PREVIEW_ROWS: usize = 5;

fn print_preview(report: &HarvestReport) {
    let records = report.export.table.records();
    if records.is_empty() {
        return;
    }

    println!("\nFirst {} records:", records.len().min(PREVIEW_ROWS));
    println!(
        "  {:<10}  {:<16}  {:>8}  {:>8}  {:>8}",
        "date", "location", "max °C", "min °C", "prec mm"
    );
    for record in records.iter().take(PREVIEW_ROWS) {
        println!(
            "  {:<10}  {:<16}  {:>8}  {:>8}  {:>8}",
            record.date,
            record.location,
            format_value(record.temperature_2m_max),
            format_value(record.temperature_2m_min),
            format_value(record.precipitation_sum)
        );
    }
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| format!("{v:.1}"))
}

fn format_mean(mean: Option<f64>, unit: &str) -> String {
    match mean {
        Some(value) => format!("{value:.1}{unit}"),
        None => "n/a".to_string(),
    }
}
