//! billing-report: revenue and margin summaries of an invoice billing sheet.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use billing_report::config::Config;
use billing_report::infra::cache::dataset_cache::DatasetCache;
use billing_report::usecase::services::load_service::LoadService;
use billing_report::usecase::services::query_service::QueryService;
use billing_report::{
    Breakdown, Dimension, KeyValue, Kpis, MarginPolicy, Measure, Reduction, Selection, SummaryRow,
};

/// Revenue and margin summaries of an invoice billing sheet
#[derive(Parser)]
#[command(name = "billing-report", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "BILLING_REPORT_CONFIG")]
    config: Option<PathBuf>,
    /// Workbook or CSV export to read (overrides `source.path`)
    #[arg(long, global = true)]
    source: Option<PathBuf>,
    /// Only include these divisions (repeatable)
    #[arg(long = "division", global = true)]
    divisions: Vec<String>,
    /// Only include these years (repeatable)
    #[arg(long = "year", global = true)]
    years: Vec<i32>,
    /// How margin value is obtained (overrides `normalize.margin_policy`)
    #[arg(long, global = true, value_enum)]
    margin_policy: Option<MarginPolicyArg>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Total revenue, gross margin and margin percent
    Kpis,
    /// Grouped summary table
    Breakdown {
        #[arg(value_enum)]
        kind: BreakdownArg,
    },
    /// Clients or products ranked by a summed measure
    Top {
        #[arg(value_enum)]
        key: RankKey,
        /// Measure to rank by
        #[arg(long, value_enum, default_value = "revenue")]
        by: RankMeasure,
        /// Number of rows (defaults to `report.top_n`)
        #[arg(short, long)]
        n: Option<usize>,
    },
    /// Divisions present in the source
    Divisions,
    /// Years present in the source
    Years,
    /// Numeric cells that were replaced by zero, per column
    Coercions,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarginPolicyArg {
    RevenueMinusCost,
    SourceColumn,
}

impl From<MarginPolicyArg> for MarginPolicy {
    fn from(value: MarginPolicyArg) -> Self {
        match value {
            MarginPolicyArg::RevenueMinusCost => MarginPolicy::RevenueMinusCost,
            MarginPolicyArg::SourceColumn => MarginPolicy::SourceColumn,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BreakdownArg {
    Monthly,
    Yearly,
    ClientDivision,
    ProductDivision,
    Operation,
    Export,
    ClientMargin,
    ProductMargin,
}

impl From<BreakdownArg> for Breakdown {
    fn from(value: BreakdownArg) -> Self {
        match value {
            BreakdownArg::Monthly => Breakdown::Monthly,
            BreakdownArg::Yearly => Breakdown::Yearly,
            BreakdownArg::ClientDivision => Breakdown::ClientDivision,
            BreakdownArg::ProductDivision => Breakdown::ProductDivision,
            BreakdownArg::Operation => Breakdown::Operation,
            BreakdownArg::Export => Breakdown::Export,
            BreakdownArg::ClientMargin => Breakdown::ClientMargin,
            BreakdownArg::ProductMargin => Breakdown::ProductMargin,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RankKey {
    Client,
    Material,
}

#[derive(Clone, Copy, ValueEnum)]
enum RankMeasure {
    Revenue,
    Margin,
    Quantity,
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("billing_report=info")),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(policy) = cli.margin_policy {
        config.normalize.margin_policy = policy.into();
    }
    let source = cli
        .source
        .clone()
        .or_else(|| config.source.path.clone())
        .ok_or_else(|| anyhow!("no source file given; pass --source or set source.path"))?;

    let loader = LoadService::from_config(&config, Arc::new(DatasetCache::new()));
    let dataset = loader
        .load(&source)
        .with_context(|| format!("failed to load dashboard data from {}", source.display()))?;
    let queries = QueryService::new(dataset);

    let mut selection = Selection::new();
    if !cli.divisions.is_empty() {
        selection = selection.allow(
            Dimension::Division,
            cli.divisions.iter().map(String::as_str),
        );
    }
    if !cli.years.is_empty() {
        selection = selection.allow(Dimension::Year, cli.years.iter().copied());
    }

    let mut out = csv::Writer::from_writer(io::stdout().lock());
    match cli.command {
        Commands::Kpis => write_kpis(&mut out, &queries.kpis(&selection))?,
        Commands::Breakdown { kind } => {
            let breakdown = Breakdown::from(kind);
            let rows = queries.breakdown(&selection, breakdown);
            write_summary(&mut out, breakdown.group_by(), breakdown.reductions(), &rows)?;
        }
        Commands::Top { key, by, n } => {
            let dimension = match key {
                RankKey::Client => Dimension::Client,
                RankKey::Material => Dimension::Material,
            };
            let measure = match by {
                RankMeasure::Revenue => Measure::Revenue,
                RankMeasure::Margin => Measure::MarginValue,
                RankMeasure::Quantity => Measure::Quantity,
            };
            let n = n.unwrap_or(config.report.top_n);
            let rows = queries.top(&selection, dimension, measure, n);
            let reductions = [
                (Measure::Revenue, Reduction::Sum),
                (Measure::MarginValue, Reduction::Sum),
                (Measure::Quantity, Reduction::Sum),
            ];
            write_summary(&mut out, &[dimension], &reductions, &rows)?;
        }
        Commands::Divisions => {
            write_values(&mut out, "division", &queries.options(Dimension::Division))?
        }
        Commands::Years => write_values(&mut out, "year", &queries.options(Dimension::Year))?,
        Commands::Coercions => {
            out.write_record(["column", "coerced_cells"])?;
            for (column, count) in queries.coercions().by_column() {
                out.write_record([column.clone(), count.to_string()])?;
            }
        }
    }
    out.flush().context("failed to write output")?;
    Ok(())
}

fn write_kpis<W: io::Write>(out: &mut csv::Writer<W>, kpis: &Kpis) -> Result<()> {
    out.write_record(["revenue", "margin_value", "margin_percent", "quantity", "records"])?;
    out.write_record([
        kpis.revenue.to_string(),
        kpis.margin_value.to_string(),
        kpis.margin_percent.to_string(),
        kpis.quantity.to_string(),
        kpis.record_count.to_string(),
    ])?;
    Ok(())
}

fn write_summary<W: io::Write>(
    out: &mut csv::Writer<W>,
    group_by: &[Dimension],
    reductions: &[(Measure, Reduction)],
    rows: &[SummaryRow],
) -> Result<()> {
    let with_ratio = reductions.contains(&(Measure::Revenue, Reduction::Sum))
        && reductions.contains(&(Measure::MarginValue, Reduction::Sum));

    let mut header: Vec<String> = group_by.iter().map(|dim| dim.as_str().to_string()).collect();
    header.extend(
        reductions
            .iter()
            .map(|(measure, reduction)| format!("{}_{}", measure.as_str(), reduction.as_str())),
    );
    if with_ratio {
        header.push("margin_ratio".to_string());
    }
    header.push("records".to_string());
    out.write_record(&header)?;

    for row in rows {
        let mut fields: Vec<String> = group_by
            .iter()
            .map(|dim| row.key(*dim).map(KeyValue::to_string).unwrap_or_default())
            .collect();
        fields.extend(reductions.iter().map(|(measure, reduction)| {
            row.value(*measure, *reduction)
                .map(|value| value.to_string())
                .unwrap_or_default()
        }));
        if with_ratio {
            fields.push(row.margin_ratio().unwrap_or(0.0).to_string());
        }
        fields.push(row.row_count.to_string());
        out.write_record(&fields)?;
    }
    Ok(())
}

fn write_values<W: io::Write>(
    out: &mut csv::Writer<W>,
    column: &str,
    values: &[KeyValue],
) -> Result<()> {
    out.write_record([column])?;
    for value in values {
        out.write_record([value.to_string()])?;
    }
    Ok(())
}
