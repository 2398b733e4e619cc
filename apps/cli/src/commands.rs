//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use profilegraph_core::Generator;
use profilegraph_core::pipeline::{
    ProgressReporter, ScrapeOutcome, build_knowledge_graph, scrape_urls,
};
use profilegraph_fetcher::PageFetcher;
use profilegraph_shared::{
    AppConfig, CompletionConfig, FetchConfig, KnowledgeGraph, ProfileInput, init_config,
    load_config,
};
use serde::Serialize;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// profilegraph — scrape pages and build professional-profile knowledge graphs.
#[derive(Parser)]
#[command(
    name = "profilegraph",
    version,
    about = "Scrape web pages and generate knowledge graphs for professional profiles.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Hide the progress spinner.
    #[arg(short, long, global = true)]
    pub quiet: bool,

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
    /// Fetch pages and print each one's title and a text excerpt.
    Scrape {
        /// URLs to fetch.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Generate a knowledge graph for a professional profile.
    Graph {
        /// Job title (e.g., "Senior Product Manager").
        #[arg(long, required_unless_present = "input")]
        title: Option<String>,

        /// Employer.
        #[arg(long, required_unless_present = "input")]
        company: Option<String>,

        /// Work location.
        #[arg(long, required_unless_present = "input")]
        location: Option<String>,

        /// Age in years.
        #[arg(long)]
        age: Option<u32>,

        /// Extra context line (repeatable).
        #[arg(long = "context")]
        context: Vec<String>,

        /// Read the profile from a JSON file instead of flags.
        #[arg(long, conflicts_with_all = ["title", "company", "location", "age", "context"])]
        input: Option<PathBuf>,

        /// Do not fetch search pages; generate from the profile alone.
        #[arg(long)]
        no_fetch: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
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

/// Directive used when `RUST_LOG` is unset. Targets match by prefix, so this
/// covers the `profilegraph` binary and every `profilegraph_*` crate.
fn default_filter(cli: &Cli) -> &'static str {
    match cli.verbose {
        0 => "profilegraph=info",
        1 => "profilegraph=debug",
        _ => "profilegraph=trace",
    }
}

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli)));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
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
    let quiet = cli.quiet;
    match cli.command {
        Command::Scrape { urls } => cmd_scrape(&urls, quiet).await,
        Command::Graph {
            title,
            company,
            location,
            age,
            context,
            input,
            no_fetch,
        } => {
            let profile = match input {
                Some(path) => read_profile(&path)?,
                None => ProfileInput {
                    title: title.unwrap_or_default(),
                    company: company.unwrap_or_default(),
                    location: location.unwrap_or_default(),
                    age,
                    additional_context: context,
                },
            };
            cmd_graph(&profile, no_fetch, quiet).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

/// JSON printed by `scrape`.
#[derive(Serialize)]
struct ScrapeOutput {
    results: Vec<ScrapeOutcome>,
}

/// JSON printed by `graph`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphOutput {
    knowledge_graph: KnowledgeGraph,
}

fn read_profile(path: &Path) -> Result<ProfileInput> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("cannot read profile file '{}'", path.display()))?;
    serde_json::from_str(&content)
        .wrap_err_with(|| format!("'{}' is not a valid profile JSON object", path.display()))
}

async fn cmd_scrape(urls: &[String], quiet: bool) -> Result<()> {
    let config = load_config()?;
    let fetch_config = FetchConfig::from(&config);
    let fetcher = PageFetcher::new(&fetch_config)?;

    info!(count = urls.len(), "scraping URLs");

    let reporter = CliProgress::new(quiet);
    let results = scrape_urls(&fetcher, urls, fetch_config.excerpt_chars, &reporter).await?;

    let output = ScrapeOutput { results };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn cmd_graph(profile: &ProfileInput, no_fetch: bool, quiet: bool) -> Result<()> {
    let config = load_config()?;
    let completion = CompletionConfig::from_env(&config);
    let generator = Generator::new(completion)?;

    if !generator.is_model_backed() {
        info!(
            env = %config.completion.api_key_env,
            "completion API key not configured, using template generation"
        );
    }

    let fetcher = if no_fetch {
        None
    } else {
        Some(PageFetcher::new(&FetchConfig::from(&config))?)
    };

    let reporter = CliProgress::new(quiet);
    let graph = build_knowledge_graph(profile, fetcher.as_ref(), &generator, &reporter)
        .await?;

    let output = GraphOutput {
        knowledge_graph: graph,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new(quiet: bool) -> Self {
        if quiet {
            return Self {
                spinner: ProgressBar::hidden(),
            };
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("valid template")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn fetched(&self, succeeded: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetched {succeeded}/{total} pages"));
    }

    fn done(&self) {
        self.spinner.finish_and_clear();
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
