use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, BufRead};
use when_clause::cli::{self, CheckOptions, CliError, LogLevel};

#[derive(ClapParser)]
#[command(name = "when")]
#[command(about = "when - compile, normalize and lint when clauses")]
#[command(version)]
struct Cli {
    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "WHEN_CLAUSE_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile clauses and print their canonical form
    Check {
        /// The clause to compile (reads one clause per line from stdin if omitted)
        clause: Option<String>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,

        /// Treat malformed regexes as errors
        #[arg(long)]
        strict_regex: bool,
    },

    /// Print the tokens of a clause as JSON
    Tokens {
        /// The clause to scan
        clause: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'when docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = cli
        .log_level
        .parse::<LogLevel>()
        .map(cli::init_logging)
        .and_then(|()| match cli.command {
            Commands::Check {
                clause,
                json,
                strict_regex,
            } => run_check(clause, json, strict_regex),
            Commands::Tokens { clause } => {
                serde_json::to_string_pretty(&cli::execute_tokens(&clause))
                    .map(|out| println!("{}", out))
                    .map_err(CliError::from)
            }
            Commands::Docs => {
                print!("{}", cli::get_docs_overview());
                Ok(())
            }
            Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
                print!("{}", content);
            }),
        });

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(clause: Option<String>, json: bool, strict_regex: bool) -> Result<(), CliError> {
    let clauses = match clause {
        Some(c) => vec![c],
        None if !atty::is(atty::Stream::Stdin) => {
            let mut clauses = Vec::new();
            for line in io::stdin().lock().lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    clauses.push(line);
                }
            }
            clauses
        }
        None => Vec::new(),
    };

    let options = CheckOptions {
        clauses,
        strict_regex,
    };
    let reports = cli::execute_check(&options)?;

    if json {
        let values: Vec<_> = reports.iter().map(|report| report.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for report in &reports {
            println!("{}", report.render());
        }
    }

    let failed = reports.iter().filter(|report| !report.is_ok()).count();
    if failed > 0 {
        return Err(CliError::Invalid {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}
