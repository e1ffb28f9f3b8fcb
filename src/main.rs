//! Factor Tables CLI
//!
//! Command-line access to the factor table: list rates, look up a factor,
//! or show the known factor types.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use factor_tables::{api::LookupResponse, FactorLookup, FactorType, ServiceConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "factor-tables", version, about = "Engineering-economics factor table lookups")]
struct Cli {
    /// Factor table CSV (defaults to $FACTOR_TABLE_PATH, then factors_table.xlsx.csv)
    #[arg(long, short = 't', global = true)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the interest rates available in the table
    Rates,

    /// Look up one factor value
    Lookup {
        /// Interest rate in percent, exactly as tabulated (e.g. 0.25)
        #[arg(long)]
        rate: f64,

        /// Factor type code, e.g. F/P
        #[arg(long = "factor")]
        factor_type: String,

        /// Number of periods
        #[arg(long)]
        period: i64,

        /// Print the API JSON body instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the standard factor types and the columns present in the table
    Factors,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = ServiceConfig::from_env();
    if let Some(path) = cli.table {
        config = config.with_table_path(path);
    }
    let service = FactorLookup::new(config.source());

    match cli.command {
        Command::Rates => {
            let rates = service
                .list_available_rates()
                .with_context(|| format!("loading {}", config.table_path.display()))?;
            println!("{} rates available:", rates.len());
            for rate in rates {
                println!("  {}%", rate);
            }
        }
        Command::Lookup {
            rate,
            factor_type,
            period,
            json,
        } => {
            let result = service.lookup(rate, &factor_type, period)?;
            if json {
                let body = LookupResponse {
                    result,
                    lookup_success: true,
                };
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", result.factor_info.name);
                println!("  {}", result.factor_info.formula);
                println!(
                    "  ({},{}%,{}) = {}",
                    result.factor_type, result.rate, result.period, result.factor_value
                );
            }
        }
        Command::Factors => {
            println!("{:<5} {:<52} {}", "Code", "Name", "Formula");
            println!("{}", "-".repeat(80));
            for factor in FactorType::ALL {
                println!("{:<5} {:<52} {}", factor.code(), factor.name(), factor.formula());
            }

            let columns = service
                .available_factor_types()
                .with_context(|| format!("loading {}", config.table_path.display()))?;
            let extra: Vec<_> = columns
                .iter()
                .filter(|c| FactorType::from_code(c).is_none())
                .collect();
            let missing: Vec<FactorType> = FactorType::ALL
                .into_iter()
                .filter(|f| !columns.iter().any(|c| c == f.code()))
                .collect();

            println!("\nTable columns: {}", columns.join(", "));
            for code in extra {
                println!("  extra column {} (no descriptor)", code);
            }
            for factor in missing {
                println!("  missing column {}", factor);
            }
        }
    }

    Ok(())
}
