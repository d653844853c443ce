mod formatting;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::env::current_dir;
use std::path::PathBuf;

use crate::period::Period;
use crate::proration::FixedExpensesOperation;
use crate::vault::VaultImpl;

pub fn fixed_expenses_operation() {
    let result: Result<String, String> = (|| {
        let arguments = FixedExpensesOptions::parse();
        let vault_path = match &arguments.vault {
            Some(path) => path.clone(),
            None => current_dir().map_err(|e| e.to_string())?,
        };
        let vault = VaultImpl { path: vault_path };

        let operation = FixedExpensesOperation::from_vault_values(&vault)?;

        Ok(match arguments.command {
            FixedExpensesCommand::Daily { date } => {
                formatting::format_daily_amount_screen(&operation.daily_amount(date))
            }
            FixedExpensesCommand::Period {
                start_date,
                end_date,
            } => {
                let period = Period::new(start_date, end_date)?;
                formatting::format_period_amount_screen(&operation.period_amount(&period))
            }
            FixedExpensesCommand::DailyCost => {
                formatting::format_monthly_daily_cost_screen(&operation.monthly_daily_cost())
            }
        })
    })();

    if let Ok(screen) = result {
        print!("{}", screen)
    } else if let Err(error) = result {
        println!("Could not compute fixed expenses: {}", error)
    }
}

// CLI ARGUMENTS PARSING

#[derive(Parser)]
#[command()]
struct FixedExpensesOptions {
    #[arg(short = 'V', long)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: FixedExpensesCommand,
}

#[derive(Subcommand)]
enum FixedExpensesCommand {
    /// Fixed expenses landing on one day, with a per-expense breakdown
    Daily {
        /// Defaults to today
        #[arg(short = 'd', long = "date")]
        date: Option<NaiveDate>,
    },
    /// Total fixed expenses over an inclusive date range
    Period {
        #[arg(short = 's', long = "start-date")]
        start_date: NaiveDate,

        #[arg(short = 'e', long = "end-date")]
        end_date: NaiveDate,
    },
    /// Daily burn from monthly commitments, amortized over 30 days
    DailyCost,
}
