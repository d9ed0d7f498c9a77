/**
 * The command line interface of the expense tracker.
 *
 * `run` takes the parsed command and the output writer, so the whole
 * dispatch can be exercised in tests against a buffer and a scratch file.
 */
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::storage::CsvStorage;
use crate::tracker::{self, Tracker};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Tracker(#[from] tracker::Error),
    #[error("IO error: `{0}`.")]
    Io(#[from] std::io::Error),
}

/// Track personal expenses in a CSV file.
#[derive(Debug, Parser)]
#[clap(name = "expense-tracker", version)]
pub struct Cli {
    /// File holding the expense records.
    #[clap(long, global = true, default_value = "expenses.csv")]
    pub file: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new expense
    Add {
        /// What the money was spent on
        #[clap(long)]
        description: String,
        /// Amount spent
        #[clap(long)]
        amount: u64,
    },
    /// Change the description or amount of an expense
    Update {
        /// Id of the expense to change
        #[clap(long)]
        id: u64,
        /// New description
        #[clap(long)]
        description: Option<String>,
        /// New amount
        #[clap(long)]
        amount: Option<u64>,
    },
    /// Remove an expense
    Delete {
        /// Id of the expense to remove
        #[clap(long)]
        id: u64,
    },
    /// Show all expenses
    List,
    /// Show the total amount spent, optionally for one month or year
    Summary {
        /// Only count expenses from this month (needs --year)
        #[clap(long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Only count expenses from this year
        #[clap(long)]
        year: Option<i32>,
    },
}

pub fn run<W: Write>(cli: Cli, mut out: W) -> Result<(), Error> {
    let storage = CsvStorage::new(&cli.file);
    let mut tracker = Tracker::new(storage)?;

    match cli.command {
        Command::Add {
            description,
            amount,
        } => {
            let record = tracker.add(&description, amount)?;
            writeln!(out, "{}", record)?;
        }
        Command::Update {
            id,
            description,
            amount,
        } => {
            let record = tracker.update(id, description.as_deref(), amount)?;
            writeln!(out, "{}", record)?;
        }
        Command::Delete { id } => {
            tracker.delete(id)?;
            writeln!(out, "deleted {}", id)?;
        }
        Command::List => {
            for record in tracker.records() {
                writeln!(out, "{}", record)?;
            }
        }
        Command::Summary { month, year } => {
            let total = match (month, year) {
                (Some(month), Some(year)) => tracker.summary_for_month(month, year)?,
                (None, Some(year)) => tracker.summary_for_year(year),
                _ => tracker.summary(),
            };
            writeln!(out, "total: {}", total)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn run_cmd(file: &Path, args: &[&str]) -> Result<String, Error> {
        let mut argv = vec!["expense-tracker", "--file", file.to_str().unwrap()];
        argv.extend(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("expenses.csv");

        let added = run_cmd(&file, &["add", "--description", "groceries", "--amount", "120"])
            .unwrap();
        assert!(added.starts_with("1\t"));
        assert!(added.ends_with("\t120\tgroceries\n"));

        run_cmd(
            &file,
            &["add", "--description", "long, lorem ipsum", "--amount", "900"],
        )
        .unwrap();

        let listed = run_cmd(&file, &["list"]).unwrap();
        let lines: Vec<&str> = listed.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("\t120\tgroceries"));
        assert!(lines[1].ends_with("\t900\tlong, lorem ipsum"));
    }

    #[test]
    fn update_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("expenses.csv");

        run_cmd(&file, &["add", "--description", "groceries", "--amount", "120"]).unwrap();
        let updated = run_cmd(&file, &["update", "--id", "1", "--amount", "200"]).unwrap();
        assert!(updated.ends_with("\t200\tgroceries\n"));

        let listed = run_cmd(&file, &["list"]).unwrap();
        assert!(listed.ends_with("\t200\tgroceries\n"));
    }

    #[test]
    fn delete_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("expenses.csv");

        run_cmd(&file, &["add", "--description", "groceries", "--amount", "120"]).unwrap();
        run_cmd(&file, &["add", "--description", "rent", "--amount", "900"]).unwrap();
        assert_eq!(run_cmd(&file, &["delete", "--id", "1"]).unwrap(), "deleted 1\n");

        let listed = run_cmd(&file, &["list"]).unwrap();
        let lines: Vec<&str> = listed.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("2\t"));
        assert!(lines[0].ends_with("\t900\trent"));
    }

    #[test]
    fn summary_filters_by_month_and_year() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("expenses.csv");
        std::fs::write(
            &file,
            "Id,CreatedAt,Amount,Description\n\
             1,2024-01-01T01:01:01Z,100,record1\n\
             2,2024-01-15T01:01:01Z,200,record2\n\
             3,2024-02-01T01:01:01Z,300,record3\n\
             4,2023-01-01T01:01:01Z,400,record4\n",
        )
        .unwrap();

        assert_eq!(run_cmd(&file, &["summary"]).unwrap(), "total: 1000\n");
        assert_eq!(
            run_cmd(&file, &["summary", "--year", "2024"]).unwrap(),
            "total: 600\n"
        );
        assert_eq!(
            run_cmd(&file, &["summary", "--month", "1", "--year", "2024"]).unwrap(),
            "total: 300\n"
        );
    }

    #[test]
    fn update_unknown_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("expenses.csv");
        let res = run_cmd(&file, &["update", "--id", "99", "--amount", "200"]);
        assert!(matches!(
            res,
            Err(Error::Tracker(tracker::Error::NotFound(99)))
        ));
    }

    #[test]
    fn month_without_year_is_a_usage_error() {
        let res = Cli::try_parse_from(["expense-tracker", "summary", "--month", "1"]);
        assert!(res.is_err());
    }

    #[test]
    fn month_out_of_range_is_a_usage_error() {
        let res = Cli::try_parse_from([
            "expense-tracker",
            "summary",
            "--month",
            "13",
            "--year",
            "2024",
        ]);
        assert!(res.is_err());
    }
}
