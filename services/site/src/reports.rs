use crate::infra::{load_dataset, parse_custody_type};
use chrono::Utc;
use clap::{Args, ValueEnum};
use custody_compare::config::AppConfig;
use custody_compare::dataset::{CustodyTypeId, ProviderSource, StaticDataset};
use custody_compare::error::AppError;
use custody_compare::scoring::{
    pair_count, rank, score_label, ComparisonIndex, Criterion, PairResolution, RankedProvider,
};
use custody_compare::site::{sitemap, Seo};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Only rank providers of this custody type (e.g. multi-institution)
    #[arg(long, value_parser = parse_custody_type)]
    pub(crate) custody_type: Option<CustodyTypeId>,
    /// Print at most this many providers
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    #[arg(long, value_enum, default_value = "table")]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Comparison slug such as `unchained-vs-river`
    pub(crate) slug: String,
}

#[derive(Args, Debug)]
pub(crate) struct SitemapArgs {
    /// Write the sitemap to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Dataset file to check; defaults to CUSTODY_DATA_PATH or the bundled dataset
    pub(crate) path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RankRow<'a> {
    rank: usize,
    slug: &'a str,
    name: &'a str,
    custody_type: &'static str,
    custody_score: f64,
    label: &'static str,
}

impl<'a> From<&RankedProvider<'a>> for RankRow<'a> {
    fn from(entry: &RankedProvider<'a>) -> Self {
        Self {
            rank: entry.rank,
            slug: &entry.provider.slug,
            name: &entry.provider.name,
            custody_type: entry.provider.custody_type.as_str(),
            custody_score: entry.custody_score,
            label: score_label(entry.custody_score),
        }
    }
}

pub(crate) fn run_rank(config: &AppConfig, args: RankArgs) -> Result<(), AppError> {
    let dataset = load_dataset(&config.site)?;
    let stdout = io::stdout();
    write_ranking(&mut stdout.lock(), &dataset, &args)
}

pub(crate) fn run_compare(config: &AppConfig, args: CompareArgs) -> Result<(), AppError> {
    let dataset = load_dataset(&config.site)?;
    let stdout = io::stdout();
    write_comparison(&mut stdout.lock(), &dataset, &args.slug)
}

pub(crate) fn run_sitemap(config: &AppConfig, args: SitemapArgs) -> Result<(), AppError> {
    let dataset = load_dataset(&config.site)?;
    let seo = Seo::new(&config.site);
    let entries = sitemap::entries(&dataset, &seo, Utc::now());
    let xml = sitemap::render(&entries);

    match args.output {
        Some(path) => {
            std::fs::write(&path, xml)?;
            info!(path = %path.display(), urls = entries.len(), "sitemap written");
        }
        None => io::stdout().lock().write_all(xml.as_bytes())?,
    }
    Ok(())
}

pub(crate) fn run_validate(config: &AppConfig, args: ValidateArgs) -> Result<(), AppError> {
    let dataset = match args.path {
        Some(path) => StaticDataset::from_path(path)?,
        None => load_dataset(&config.site)?,
    };
    let stdout = io::stdout();
    write_validation_summary(&mut stdout.lock(), &dataset)
}

fn write_ranking<W, S>(out: &mut W, source: &S, args: &RankArgs) -> Result<(), AppError>
where
    W: Write,
    S: ProviderSource + ?Sized,
{
    let weights = source.list_weights();
    let mut ranked = match args.custody_type {
        Some(id) => rank(source.providers_by_type(id), weights),
        None => rank(source.list_providers(), weights),
    };
    if let Some(limit) = args.limit {
        ranked.truncate(limit);
    }

    match args.format {
        OutputFormat::Table => {
            writeln!(
                out,
                "{:>4}  {:<30} {:<22} {:>5}  Rating",
                "Rank", "Provider", "Custody type", "Score"
            )?;
            for entry in &ranked {
                let row = RankRow::from(entry);
                writeln!(
                    out,
                    "{:>4}  {:<30} {:<22} {:>5.1}  {}",
                    row.rank, row.name, row.custody_type, row.custody_score, row.label
                )?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for entry in &ranked {
                writer.serialize(RankRow::from(entry)).map_err(io::Error::from)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &ranked).map_err(io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_comparison<W, S>(out: &mut W, source: &S, slug: &str) -> Result<(), AppError>
where
    W: Write,
    S: ProviderSource + ?Sized,
{
    let index = ComparisonIndex::new(source.list_providers(), source.list_weights());
    let pair = match index.resolve(slug) {
        PairResolution::Found(pair) => pair,
        PairResolution::Redirect(canonical) => {
            writeln!(out, "'{slug}' is listed under its canonical slug '{canonical}'")?;
            return Ok(());
        }
        PairResolution::NotFound => {
            return Err(AppError::not_found(format!("comparison '{slug}'")));
        }
    };

    let (first, second) = (pair.provider_a, pair.provider_b);
    let summary = pair.head_to_head();
    writeln!(out, "{} vs {}", first.name, second.name)?;
    writeln!(out, "{:<30} {:>8} {:>8}", "Criterion", first.slug, second.slug)?;
    for criterion in Criterion::ordered() {
        writeln!(
            out,
            "{:<30} {:>8.1} {:>8.1}",
            criterion.label(),
            first.scores.get(criterion),
            second.scores.get(criterion)
        )?;
    }
    writeln!(
        out,
        "{:<30} {:>8.1} {:>8.1}",
        "Custody Score", pair.score_a, pair.score_b
    )?;
    writeln!(
        out,
        "Criteria won: {} {}, {} {}, ties {}",
        first.name, summary.wins_a, second.name, summary.wins_b, summary.ties
    )?;
    writeln!(out, "Overall: {}", pair.winner().name)?;
    Ok(())
}

fn write_validation_summary<W: Write>(
    out: &mut W,
    dataset: &StaticDataset,
) -> Result<(), AppError> {
    let meta = dataset.meta();
    let providers = dataset.list_providers().len();
    writeln!(
        out,
        "dataset {} (updated {}) is valid: {} providers, {} custody types, {} comparison pairs",
        meta.version,
        meta.last_updated,
        providers,
        dataset.list_custody_types().len(),
        pair_count(providers)
    )?;
    Ok(())
}
