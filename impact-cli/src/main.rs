//! Impact CLI — the dashboard pipeline without a terminal UI.
//!
//! Commands:
//! - `summary` — headline indicators plus the elite ranking for a filter
//! - `entities` — the entity names and year span in the dataset
//! - `charts` — chart specifications as JSON on stdout
//! - `export` — write `aggregates.csv` and `dashboard.json` to a timestamped directory

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use impact_core::aggregate::elite_leadership;
use impact_core::{Dataset, FilterState, YearRange};
use impact_report::summary::group_thousands;
use impact_report::{save_export, DashboardConfig, DashboardView, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(
    name = "impact",
    about = "Research impact dashboard — headless commands"
)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./impact-dashboard.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Source CSV, overriding `data_path` from the config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the four headline indicators and the elite ranking.
    Summary {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List entity names and the year span of the dataset.
    Entities,
    /// Print chart specifications as JSON.
    Charts {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Write the aggregate table (CSV) and dashboard snapshot (JSON).
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output directory. Defaults to `export_dir` from the config.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// First year, inclusive. Defaults to the earliest year in the data.
    #[arg(long)]
    from: Option<i32>,

    /// Last year, inclusive. Defaults to the latest year in the data.
    #[arg(long)]
    to: Option<i32>,

    /// Entity to include; repeat for several. Defaults to the first
    /// `default_entity_count` names.
    #[arg(long = "entity")]
    entities: Vec<String>,

    /// Include every entity.
    #[arg(long, default_value_t = false, conflicts_with = "entities")]
    all: bool,
}

impl FilterArgs {
    fn resolve(&self, dataset: &Dataset, default_count: usize) -> Result<FilterState> {
        let bounds = dataset.year_bounds();
        let years = YearRange::new(
            self.from.unwrap_or(bounds.lo),
            self.to.unwrap_or(bounds.hi),
        );
        if years.is_empty() {
            bail!("--from {} is after --to {}", years.lo, years.hi);
        }

        if self.all {
            return Ok(FilterState::new(years, dataset.entities().iter().cloned()));
        }
        if self.entities.is_empty() {
            let mut filter = FilterState::initial(dataset, default_count);
            filter.years = years;
            return Ok(filter);
        }

        for name in &self.entities {
            if dataset.entities().binary_search(name).is_err() {
                bail!("unknown entity '{name}' (see `impact entities`)");
            }
        }
        Ok(FilterState::new(years, self.entities.iter().cloned()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    init_tracing(&config)?;

    let dataset = config
        .dataset_cache()
        .get_or_load()
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;

    match cli.command {
        Commands::Summary { filter } => {
            let filter = filter.resolve(&dataset, config.default_entity_count)?;
            print!("{}", render_summary(&dataset, &filter));
        }
        Commands::Entities => {
            print!("{}", render_entities(&dataset));
        }
        Commands::Charts { filter } => {
            let filter = filter.resolve(&dataset, config.default_entity_count)?;
            let view = DashboardView::build(&dataset, &filter);
            let json = serde_json::to_string_pretty(&view.charts())
                .context("failed to serialize chart specs")?;
            println!("{json}");
        }
        Commands::Export { filter, out } => {
            let filter = filter.resolve(&dataset, config.default_entity_count)?;
            let view = DashboardView::build(&dataset, &filter);
            let out = out.unwrap_or_else(|| config.export_dir.clone());
            let dir = save_export(&view, &config.data_path, &out)?;
            info!(dir = %dir.display(), "export complete");
            println!("Export saved to: {}", dir.display());
        }
    }

    Ok(())
}

/// An explicit `--config` must exist; the default file is optional.
fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    let config = match path {
        Some(p) => DashboardConfig::from_file(p)?,
        None => DashboardConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    Ok(config)
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(config: &DashboardConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log_level '{}'", config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
    Ok(())
}

fn render_summary(dataset: &Dataset, filter: &FilterState) -> String {
    let view = DashboardView::build(dataset, filter);
    let s = &view.summary;
    let mut out = String::new();

    out.push_str(&format!(
        "Years: {}-{}  Entities: {}\n\n",
        filter.years.lo,
        filter.years.hi,
        filter.entities.len()
    ));
    out.push_str(&format!("{:<18} {}\n", "Total documents", s.total_documents_label()));
    out.push_str(&format!("{:<18} {}\n", "Avg impact (CNCI)", s.avg_impact_label()));
    out.push_str(&format!("{:<18} {}\n", "Top producer", s.top_producer_label()));
    out.push_str(&format!("{:<18} {}\n", "Active entities", s.active_entities));

    let ranked = elite_leadership(filter.apply(dataset.records()));
    if ranked.is_empty() {
        return out;
    }
    out.push('\n');
    out.push_str(&format!(
        "{:<24} {:>12} {:>9} {:>7} {:>8}\n",
        "Entity", "Documents", "Avg CNCI", "Elite", "% Elite"
    ));
    out.push_str(&format!("{}\n", "-".repeat(64)));
    for r in &ranked {
        out.push_str(&format!(
            "{:<24} {:>12} {:>9.2} {:>7} {:>8.2}\n",
            r.entity,
            group_thousands(r.documents),
            r.avg_cnci,
            r.elite_documents,
            r.pct_elite
        ));
    }
    out
}

fn render_entities(dataset: &Dataset) -> String {
    let bounds = dataset.year_bounds();
    let mut out = format!(
        "{} entities, {} rows, years {}-{}\n",
        dataset.entities().len(),
        dataset.len(),
        bounds.lo,
        bounds.hi
    );
    for name in dataset.entities() {
        out.push_str(name);
        out.push('\n');
    }
    out
}
