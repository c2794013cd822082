//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::PeriodFilter;
use crate::services::DEFAULT_SEARCH_LIMIT;

#[derive(Parser, Debug)]
#[command(name = "industry-index")]
#[command(about = "Industry Index - ranking index API and query tool", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .industry-index/
    #[arg(short, long, global = true, env = "INDEX_API_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// List industries
    Industries,

    /// List available (year, month) periods
    Periods {
        /// Restrict to one industry
        #[arg(short, long)]
        industry: Option<String>,
    },

    /// List the companies ranked in an industry
    Companies {
        industry: String,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Show a company's entries
    Company {
        name: String,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Show the company at a rank
    Rank {
        industry: String,

        rank: i64,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Show an industry's ranking table
    Rankings {
        industry: String,

        /// Maximum number of rows
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(0..))]
        limit: Option<i64>,

        /// Rows to skip
        #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(i64).range(0..))]
        offset: i64,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Search companies by name
    Search {
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT as u32, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,

        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Print the discovery schema
    Discover,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Publication year
    #[arg(short, long)]
    pub year: Option<String>,

    /// Publication month
    #[arg(short, long)]
    pub month: Option<i64>,
}

impl PeriodArgs {
    pub fn filter(&self) -> PeriodFilter {
        PeriodFilter::new(self.year.clone(), self.month)
    }
}
