//! Command-line front end for scriptsearch.
//!
//! Settings come from `--config` (JSON) or the defaults, overlaid with the
//! `SCRIPTSEARCH_*` environment variables.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use scriptsearch::client::HttpTranscriptApi;
use scriptsearch::config::SearchConfig;
use scriptsearch::observability::{init_tracing, LogFormat};
use scriptsearch::orchestrator::{
    SearchOrchestrator, SearchOutcome, SearchView, NO_RESULTS_MESSAGE,
};
use scriptsearch::results::format::{
    format_timestamp, format_upload_date, plain_snippet, watch_url,
};
use scriptsearch::results::{SortField, SortSpec};

#[derive(Parser, Debug)]
#[command(name = "scriptsearch-cli", version, about = "Search video transcripts", long_about = None)]
struct Args {
    /// Channel, playlist or video URL to search within (or just ingest)
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Sort field: upload_date, duration, channel_name, title or match_count
    #[arg(short, long, value_name = "FIELD")]
    sort: Option<SortField>,

    /// Sort ascending instead of descending
    #[arg(long)]
    asc: bool,

    /// Page to print, numbered from 1
    #[arg(short, long, default_value = "1")]
    page: NonZeroUsize,

    /// JSON settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Search terms
    #[arg(value_name = "QUERY")]
    query: Vec<String>,
}

impl Args {
    fn query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.join(" "))
    }

    fn sort_spec(&self) -> Option<SortSpec> {
        self.sort.map(|field| {
            if self.asc {
                SortSpec::ascending(field)
            } else {
                SortSpec::descending(field)
            }
        })
    }
}

/// Zero-based index of the requested page. Pages past the end are an error.
fn page_index(requested: NonZeroUsize, page_count: usize) -> Result<usize> {
    let index = requested.get() - 1;
    if index > 0 && index >= page_count {
        bail!("page {requested} is out of range, the results have {page_count} page(s)");
    }
    Ok(index)
}

fn load_config(path: Option<&Path>) -> Result<SearchConfig> {
    let config = match path {
        Some(path) => SearchConfig::from_json_file(path)?
            .apply_env_overrides(|key| std::env::var(key).ok())?,
        None => SearchConfig::from_env()?,
    };
    Ok(config)
}

fn print_outcome(outcome: &SearchOutcome, view: &SearchView) {
    match outcome {
        SearchOutcome::IngestionComplete { url, cached } => {
            let note = if *cached { " (already cached)" } else { "" };
            println!("{url}: ingestion complete{note}");
        }
        SearchOutcome::NoResults => {
            println!("{}", view.message.as_deref().unwrap_or(NO_RESULTS_MESSAGE));
        }
        SearchOutcome::Results { total, .. } => {
            println!(
                "{total} videos, page {}/{}, sorted by {}",
                view.page_index + 1,
                view.page_count,
                view.sort
            );
            for result in &view.results {
                println!();
                println!("{}", result.title);
                println!(
                    "  {} | {} | {}",
                    result.channel_name,
                    format_upload_date(result.upload_date),
                    format_timestamp(result.duration_seconds)
                );
                for hit in &result.matches {
                    println!(
                        "  [{}] {}  {}",
                        format_timestamp(hit.timestamp_seconds),
                        plain_snippet(&hit.snippet_text),
                        watch_url(&result.source_id, hit.timestamp_seconds)
                    );
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });

    let config = load_config(args.config.as_deref())?;
    let api = Arc::new(HttpTranscriptApi::new(config.api.clone())?);
    let mut orchestrator = SearchOrchestrator::from_config(api, &config)?;
    if let Some(spec) = args.sort_spec() {
        orchestrator = orchestrator.with_sort(spec);
    }

    let query = args.query();
    tracing::debug!(url = ?args.url, query = ?query, "Starting search");
    let outcome = orchestrator
        .search(args.url.as_deref(), query.as_deref())
        .await?;

    let index = page_index(args.page, orchestrator.view().page_count)?;
    orchestrator.go_to_page(index);
    print_outcome(&outcome, &orchestrator.view());
    Ok(())
}
