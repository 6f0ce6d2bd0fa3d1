//! Command-line access to sellerdesk table URL state.
//!
//! Loads a table registry and runs one command against a query string,
//! using the same synchronizers the console binds to its grids. Useful for
//! checking what a shared link decodes to, or what a write would produce.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use sellerdesk_search::{FilterType, FilterValue, SearchState};
use sellerdesk_table::{
    MemoryHistory, PaginationState, TableRegistry, TableSearchConfig, TableUrlState, read_view,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "sellerdesk")]
#[command(about = "Inspect and rewrite sellerdesk table URLs")]
pub struct Cli {
    /// Path to the table registry
    #[arg(short, long, default_value = "tables.toml")]
    pub config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List configured tables
    Tables,
    /// Print the table state a query string decodes to
    Inspect {
        table: String,
        /// Query string, with or without the leading `?`
        query: String,
    },
    /// Apply writes to a query string and print the result
    Apply(ApplyArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ApplyArgs {
    pub table: String,
    pub query: String,

    /// Go to this page (1-based)
    #[arg(long, value_parser = parse_positive)]
    pub page: Option<usize>,

    /// Rows per page
    #[arg(long, value_parser = parse_positive)]
    pub page_size: Option<usize>,

    /// Set a column filter, `COL=V1,V2`; `COL=` clears it
    #[arg(long = "filter", value_name = "COL=VALUES")]
    pub filters: Vec<FilterArg>,

    /// Clear every column filter before applying `--filter`
    #[arg(long)]
    pub clear_filters: bool,

    /// Set the global search text; an empty value clears it
    #[arg(long)]
    pub search: Option<String>,

    /// Clamp the page to this many pages afterwards
    #[arg(long)]
    pub page_count: Option<usize>,
}

/// A `--filter COL=V1,V2` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArg {
    pub column: String,
    pub values: Vec<String>,
}

impl FromStr for FilterArg {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        let (column, values) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected COL=VALUES, got `{raw}`"))?;
        if column.is_empty() {
            return Err(format!("missing column in `{raw}`"));
        }
        let values = values
            .split(',')
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self {
            column: column.to_string(),
            values,
        })
    }
}

fn parse_positive(raw: &str) -> std::result::Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Result of an `apply` run.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub search: SearchState,
    /// Navigations issued: at most one for the writes and one for the clamp.
    pub navigations: usize,
}

#[derive(Debug, Serialize)]
struct TableSummary<'a> {
    name: &'a str,
    page_size: usize,
    keys: Vec<&'a str>,
}

/// Runs `cli.command`, writing its output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let registry = TableRegistry::load_from(&cli.config)
        .with_context(|| format!("Failed to load table registry {:?}", cli.config))?;

    match &cli.command {
        Command::Tables => {
            let summaries: Vec<_> = registry
                .names()
                .filter_map(|name| {
                    let config = registry.get(name)?;
                    Some(TableSummary {
                        name,
                        page_size: config.pagination.default_page_size,
                        keys: config.owned_keys().collect(),
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &summaries)?;
            writeln!(out)?;
        }
        Command::Inspect { table, query } => {
            let config = table_config(&registry, table)?;
            let view = read_view(&parse_query(query), config);
            serde_json::to_writer_pretty(&mut *out, &view)?;
            writeln!(out)?;
        }
        Command::Apply(args) => {
            let config = table_config(&registry, &args.table)?;
            let outcome = apply(config, &parse_query(&args.query), args)?;
            info!(
                table = %args.table,
                navigations = outcome.navigations,
                "Applied table writes"
            );
            writeln!(out, "{}", outcome.search.to_query())?;
        }
    }
    Ok(())
}

/// Applies the writes in `args` as one batch, then the page-range guard.
pub fn apply(
    config: &TableSearchConfig,
    search: &SearchState,
    args: &ApplyArgs,
) -> Result<ApplyOutcome> {
    let mut column_writes = Vec::with_capacity(args.filters.len());
    for filter in &args.filters {
        let Some(spec) = config.spec_for_column(&filter.column) else {
            bail!("Table `{}` has no filter for column `{}`", args.table, filter.column);
        };
        let value = match spec.filter_type {
            _ if filter.values.is_empty() => None,
            FilterType::Array => Some(FilterValue::list(filter.values.iter().cloned())),
            FilterType::String => Some(FilterValue::text(filter.values.join(","))),
        };
        column_writes.push((filter.column.clone(), value));
    }

    let mut history = MemoryHistory::new(search.clone());
    {
        let mut table = TableUrlState::new(search, config, &mut history);
        let current = table.pagination();

        table.batch(|tx| {
            if args.clear_filters {
                tx.set_column_filters(Vec::new());
            }
            for (column, value) in column_writes {
                tx.set_column_filter(column, value);
            }
            if let Some(text) = &args.search {
                tx.set_global_filter(text.as_str());
            }
            match (args.page, args.page_size) {
                (Some(page), Some(page_size)) => {
                    tx.set_pagination(PaginationState::new(page - 1, page_size));
                }
                (Some(page), None) => {
                    tx.set_page_index(page - 1);
                }
                (None, Some(page_size)) => {
                    tx.set_page_size(page_size);
                }
                (None, None) => {}
            }
        });

        if let Some(page_count) = args.page_count {
            debug!(page = current.page(), page_count, "Checking page range");
            table.ensure_page_in_range(page_count);
        }
    }

    Ok(ApplyOutcome {
        search: history.current().clone(),
        navigations: history.navigation_count(),
    })
}

fn table_config<'a>(registry: &'a TableRegistry, name: &str) -> Result<&'a TableSearchConfig> {
    registry.get(name).with_context(|| {
        let known: Vec<_> = registry.names().collect();
        format!("Unknown table `{name}` (configured: {})", known.join(", "))
    })
}

fn parse_query(raw: &str) -> SearchState {
    SearchState::from_query(raw.strip_prefix('?').unwrap_or(raw))
}
