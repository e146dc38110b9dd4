use std::process::ExitCode;

use clap::Parser;
use rynab::cli::{Cli, Command};
use rynab::{logging, CacheStore, ResourceResolver};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = cli.client_config();

    match cli.command {
        Command::GetBudgetId { token, budget_name } => {
            let mut resolver = ResourceResolver::with_config(token, config);
            match resolver.get_budget_id(budget_name.as_deref())? {
                Some(budget_id) => println!("{}", budget_id),
                None => {
                    eprintln!("Error: no budget found");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::ClearCache => {
            CacheStore::with_dir(config.cache_dir).clear()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
