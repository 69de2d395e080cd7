//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use reviewharvest_core::{
    HarvestResult, ProgressReporter, RegionOutcome, WalkState, default_output_name,
    write_csv_file,
};
use reviewharvest_fetcher::HttpFetcher;
use reviewharvest_shared::{AppConfig, HarvestConfig, STOREFRONTS, init_config, load_config};
use reviewharvest_topics::Topic;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ReviewHarvest - App Store reviews across storefronts, filtered and tagged.
#[derive(Parser)]
#[command(
    name = "reviewharvest",
    version,
    about = "Collect recent App Store reviews from every storefront, keep one language, tag topics.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Harvest reviews for one product and write them to CSV.
    Run(RunArgs),

    /// List the storefront codes scanned by default.
    Regions,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for `run`. Unset options fall back to the config file.
#[derive(clap::Args, Debug)]
pub(crate) struct RunArgs {
    /// Product page URL, e.g. https://apps.apple.com/us/app/name/id123456789
    pub reference: String,

    /// Maximum in-window reviews scanned per storefront.
    #[arg(long)]
    pub cap: Option<u32>,

    /// Recency window in days.
    #[arg(long)]
    pub days: Option<u32>,

    /// Minimum share of target-script letters, in (0, 1].
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Lower bound of the pause between feed requests, in seconds.
    #[arg(long)]
    pub min_delay: Option<f64>,

    /// Upper bound of the pause between feed requests, in seconds.
    #[arg(long)]
    pub max_delay: Option<f64>,

    /// Output CSV path (defaults to appstore_reviews_all_countries_<id>_<date>.csv).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl RunArgs {
    /// Merge flags over the loaded config.
    fn harvest_config(&self, config: &AppConfig) -> HarvestConfig {
        let mut harvest = HarvestConfig::from(config);
        if let Some(cap) = self.cap {
            harvest.per_region_cap = cap;
        }
        if let Some(days) = self.days {
            harvest.recency_days = days;
        }
        if let Some(threshold) = self.threshold {
            harvest.language_threshold = threshold;
        }
        if let Some(min) = self.min_delay {
            harvest.min_delay_secs = min;
        }
        if let Some(max) = self.max_delay {
            harvest.max_delay_secs = max;
        }
        harvest
    }
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "reviewharvest=info",
        1 => "reviewharvest=debug",
        _ => "reviewharvest=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run(args) => cmd_run(&args).await,
        Command::Regions => cmd_regions(),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_run(args: &RunArgs) -> Result<()> {
    let config = load_config()?;
    let harvest_config = args.harvest_config(&config);
    harvest_config.validate()?;

    let fetcher = HttpFetcher::new(&harvest_config.http)?;

    info!(
        reference = %args.reference,
        regions = harvest_config.regions.len(),
        "harvesting reviews"
    );

    let reporter = CliProgress::new();
    let result =
        match reviewharvest_core::harvest(&args.reference, &harvest_config, &fetcher, &reporter)
            .await
        {
            Ok(result) => result,
            Err(e) if e.is_fatal() => {
                return Err(eyre!(e).wrap_err("harvest aborted before any request was sent"));
            }
            Err(e) => return Err(e.into()),
        };

    let out = args.out.clone().unwrap_or_else(|| {
        PathBuf::from(default_output_name(
            &result.product_id,
            chrono::Local::now().date_naive(),
        ))
    });
    write_csv_file(&result.table, &out)?;

    print_summary(&result, &out);
    Ok(())
}

fn print_summary(result: &HarvestResult, out: &std::path::Path) {
    let fetch_failures = result
        .regions
        .iter()
        .filter(|r| {
            matches!(&r.outcome, RegionOutcome::Walked { walk, .. } if walk.state == WalkState::StoppedFetchFail)
        })
        .count();

    println!();
    println!("  Harvest complete!");
    println!("  Product:     {}", result.product_id);
    println!(
        "  Name:        {}",
        result.product_name.as_deref().unwrap_or("(unknown)")
    );
    println!("  Reviews:     {}", result.table.len());
    println!(
        "  Storefronts: {} walked, {} unavailable, {} cut short by fetch errors",
        result.regions_walked(),
        result.regions_unavailable(),
        fetch_failures
    );
    for topic in Topic::ALL {
        println!(
            "  {:<13}{}",
            format!("{}:", topic.name()),
            result.table.topic_count(topic)
        );
    }
    println!("  Output:      {}", out.display());
    println!("  Time:        {:.1}s", result.elapsed.as_secs_f64());
    println!();
}

fn cmd_regions() -> Result<()> {
    for region in STOREFRONTS {
        println!("{region}");
    }
    info!(count = STOREFRONTS.len(), "listed storefronts");
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter: one bar step per storefront.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
        bar.set_style(style);
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { bar }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn region(&self, current: usize, total: usize, region: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(format!("Collecting ({region})"));
    }

    fn done(&self, _result: &HarvestResult) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flags_override_config() {
        let cli = Cli::try_parse_from([
            "reviewharvest",
            "run",
            "https://apps.apple.com/ru/app/x/id42",
            "--cap",
            "20",
            "--threshold",
            "0.7",
        ])
        .unwrap();

        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let harvest = args.harvest_config(&AppConfig::default());
        assert_eq!(harvest.per_region_cap, 20);
        assert_eq!(harvest.language_threshold, 0.7);
        assert_eq!(harvest.recency_days, 7);
        assert_eq!(harvest.regions.len(), STOREFRONTS.len());
    }

    #[test]
    fn run_requires_reference() {
        assert!(Cli::try_parse_from(["reviewharvest", "run"]).is_err());
    }
}
