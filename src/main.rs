use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use textcluster::config::ClusterConfig;
use textcluster::input::read_corpus;
use textcluster::output::{json, terminal, OutputFormat};
use textcluster::pipeline::ClusterPipeline;

/// textcluster: cluster short text lines by character similarity.
///
/// Reads lines from PATH (or stdin), turns each into n-gram counts,
/// standardizes and PCA-reduces them, then groups them with DBSCAN.
///
/// Defaults can also be set with TEXTCLUSTER_NGRAM_SIZE,
/// TEXTCLUSTER_COMPONENTS, TEXTCLUSTER_EPSILON and TEXTCLUSTER_MIN_SAMPLES
/// (a .env file is read if present). Flags override the environment.
#[derive(Parser)]
#[command(name = "textcluster", version, about)]
struct Cli {
    /// File to read; stdin when omitted or "-"
    path: Option<PathBuf>,

    /// Length of the character n-grams (default: 2)
    #[arg(long)]
    ngram_size: Option<usize>,

    /// Maximum number of PCA components (default: 50)
    #[arg(long)]
    components: Option<usize>,

    /// DBSCAN neighborhood radius (default: 5.4)
    #[arg(long)]
    epsilon: Option<f64>,

    /// DBSCAN minimum neighborhood size, self included (default: 3)
    #[arg(long)]
    min_samples: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored headers
    #[arg(long)]
    no_color: bool,

    /// Print run statistics to stderr after the report
    #[arg(long)]
    stats: bool,
}

impl Cli {
    /// Layer flags on top of the environment-derived config.
    fn apply_overrides(&self, mut config: ClusterConfig) -> ClusterConfig {
        if let Some(n) = self.ngram_size {
            config.ngram_size = n;
        }
        if let Some(k) = self.components {
            config.n_components = k;
        }
        if let Some(eps) = self.epsilon {
            config.epsilon = eps;
        }
        if let Some(m) = self.min_samples {
            config.min_samples = m;
        }
        config
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("textcluster=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = cli.apply_overrides(ClusterConfig::load()?);
    info!(?config, "Loaded configuration");

    // Built before reading so bad settings fail without waiting on stdin
    let pipeline = ClusterPipeline::from_config(&config)?;
    let corpus = read_corpus(cli.path.as_deref())?;
    let result = pipeline.run(&corpus)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Text => {
            let color = !cli.no_color && stdout.is_terminal();
            terminal::write_report(&mut out, &result.groups, color)
                .context("Failed to write report")?;
        }
        OutputFormat::Json => {
            let rendered = json::render_json(&result.groups)?;
            writeln!(out, "{rendered}").context("Failed to write report")?;
        }
    }
    out.flush().context("Failed to write report")?;

    if cli.stats {
        terminal::display_stats(&result);
    }

    Ok(())
}
