use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::error;
use tracing_subscriber::EnvFilter;

use querylens::format::{format_datasets, format_rows};
use querylens::{
    DeclarativeQuery, EngineConfig, OutputFormat, Query, QueryRequest, QueryService,
    ServiceResponse,
};

/// QueryLens: ad-hoc queries over CSV datasets
#[derive(Parser, Debug)]
#[command(name = "querylens")]
#[command(about = "Filter, group and aggregate CSV datasets from the command line", long_about = None)]
struct Args {
    /// Config file (default: /etc/querylens/querylens.toml or ./querylens.toml)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Directory of *.csv files, one dataset per file
    #[arg(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum)]
    output: Option<OutputFormat>,

    /// Cap on returned rows
    #[arg(long)]
    max_rows: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List datasets with row counts and column types
    Datasets,
    /// Run a declarative query given as JSON
    Query {
        /// Dataset id (CSV file stem)
        dataset: String,
        /// e.g. '{"columns":[{"column":"revenue","aggregation":"sum"}],"groupBy":["region"]}'
        #[arg(long)]
        json: String,
    },
    /// Run an SQL-subset query
    Sql {
        sql: String,
    },
    /// Read a `{datasetId, query}` request from stdin and answer in JSON
    Request,
    /// Interactive SQL-subset shell
    Shell,
}

/// CLI args override everything loaded by `EngineConfig::load`.
fn load_config(args: &Args) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = EngineConfig::load(args.config.as_deref())?;
    if let Some(dir) = &args.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if args.max_rows.is_some() {
        config.max_result_rows = args.max_rows;
    }
    Ok(config)
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_lowercase())),
        )
        .with_writer(io::stderr)
        .init();
}

fn render(response: &ServiceResponse, output: OutputFormat) -> Result<String, serde_json::Error> {
    match output {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(response)?)),
        OutputFormat::Table => {
            let mut out = format_rows(&response.data);
            if response.truncated {
                out.push_str(&format!(
                    "(results capped: showing {} of {} rows)\n",
                    response.row_count, response.total_row_count
                ));
            }
            Ok(out)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_tracing(&config.log_level);

    let service = QueryService::from_config(&config).inspect_err(|e| {
        error!(dir = %config.data_dir.display(), "failed to load datasets: {e}");
    })?;

    match &args.command {
        Command::Datasets => {
            let catalog = service.provider();
            let datasets = catalog.ids().into_iter().filter_map(|id| catalog.get(id));
            print!("{}", format_datasets(datasets));
        }
        Command::Query { dataset, json } => {
            let query: DeclarativeQuery = serde_json::from_str(json)?;
            let request = QueryRequest::new(dataset.as_str(), query.into());
            print!("{}", render(&service.handle(&request), config.output)?);
        }
        Command::Sql { sql } => {
            let request = QueryRequest::new("", Query::sql(sql.as_str()));
            print!("{}", render(&service.handle(&request), config.output)?);
        }
        Command::Request => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            println!("{}", service.handle_json(&body)?);
        }
        Command::Shell => run_shell(&service, config.output)?,
    }

    Ok(())
}

fn run_shell(service: &QueryService, output: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut rl = DefaultEditor::new()?;

    let history_file = dirs::home_dir().map(|mut p| {
        p.push(".querylens_history");
        p
    });
    if let Some(ref path) = history_file {
        let _ = rl.load_history(path); // missing history is fine
    }

    println!("QueryLens shell. Type \\? for help, \\q to quit.\n");

    loop {
        match rl.readline("querylens> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    "\\q" | "\\quit" | "quit" | "exit" => break,
                    "\\d" | "\\dt" => {
                        let catalog = service.provider();
                        let datasets = catalog.ids().into_iter().filter_map(|id| catalog.get(id));
                        print!("{}", format_datasets(datasets));
                    }
                    "\\?" | "\\h" | "\\help" => {
                        println!("Meta-commands:");
                        println!("  \\d, \\dt            - List datasets");
                        println!("  \\q, \\quit          - Quit");
                        println!("  \\?, \\h, \\help      - Show this help");
                        println!("\nQueries: SELECT col, SUM(col) [AS alias] FROM \"dataset\"");
                        println!("         [WHERE col =|>|< value] [GROUP BY col] [LIMIT n]");
                    }
                    _ if line.starts_with('\\') => {
                        println!("Unknown meta-command: {line}. Use \\? for help.");
                    }
                    sql => {
                        let request = QueryRequest::new("", Query::sql(sql));
                        print!("{}", render(&service.handle(&request), output)?);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("quit");
                break;
            }
            Err(err) => {
                if let Some(ref path) = history_file {
                    let _ = rl.save_history(path);
                }
                return Err(err.into());
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }
    Ok(())
}
