//! Command-line interface parsing for rynab
//!
//! This module handles parsing of CLI arguments using clap and turns the global
//! options into a `ClientConfig`.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ClientConfig, DEFAULT_BASE_URL};

/// rynab - query the YNAB API from the command line
#[derive(Parser, Debug)]
#[command(name = "rynab")]
#[command(about = "YNAB API client with a local response cache")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// API root that endpoint paths are appended to
    #[arg(long, env = "YNAB_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub base_url: String,

    /// Always fetch from the API instead of reading cached responses
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Directory for cached responses (default: platform cache dir)
    #[arg(long, value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the id of a budget, by name or the first one available
    GetBudgetId {
        /// Personal access token
        #[arg(env = "YNAB_TOKEN", hide_env_values = true)]
        token: String,

        /// Budget to look up (defaults to the first budget)
        #[arg(long)]
        budget_name: Option<String>,
    },

    /// Delete every cached response
    ClearCache,
}

impl Cli {
    /// Builds the client configuration from the global options
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::default()
            .with_base_url(self.base_url.clone())
            .with_use_cache(!self.no_cache);

        match &self.cache_dir {
            Some(dir) => config.with_cache_dir(dir.clone()),
            None => config,
        }
    }
}
