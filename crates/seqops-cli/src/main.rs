//! seqops CLI: run YAML queries over JSON record files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use env_logger::Env;
use seqops_core::config::SeqConfig;
use seqops_query::{load_records, Executor, Query};

#[derive(Parser)]
#[command(name = "seqops")]
#[command(about = "Group, order, and join JSON records with a YAML query", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a query and print the result as a JSON array
    Run {
        /// Path to the query YAML file
        #[arg(short, long)]
        query: PathBuf,

        /// Input records (JSON array or JSON lines)
        #[arg(short, long)]
        input: PathBuf,

        /// Named dataset for join steps, as NAME=FILE (repeatable)
        #[arg(long = "inner", value_name = "NAME=FILE")]
        inner: Vec<String>,

        /// Initial lookup bucket count (overrides config)
        #[arg(long)]
        initial_buckets: Option<usize>,

        /// Seed capacity for buffering unsized inputs (overrides config)
        #[arg(long)]
        buffer_seed: Option<usize>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate a query YAML file without reading any data
    Validate {
        /// Path to the query YAML file
        #[arg(short, long)]
        query: PathBuf,
    },

    /// Show the step chain of a query
    Explain {
        /// Path to the query YAML file
        #[arg(short, long)]
        query: PathBuf,
    },
}

struct RunArgs {
    query: PathBuf,
    input: PathBuf,
    inner: Vec<String>,
    initial_buckets: Option<usize>,
    buffer_seed: Option<usize>,
    pretty: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            query,
            input,
            inner,
            initial_buckets,
            buffer_seed,
            pretty,
        } => {
            let args = RunArgs {
                query,
                input,
                inner,
                initial_buckets,
                buffer_seed,
                pretty,
            };
            if let Err(e) = run_query(args) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { query } => {
            if let Err(e) = read_query(&query) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Query is valid");
        }
        Commands::Explain { query } => match read_query(&query) {
            Ok(q) => {
                println!("Query Steps");
                println!("===========");
                print!("{}", q.explain());
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn read_query(path: &Path) -> Result<Query, Box<dyn std::error::Error>> {
    let yaml = fs::read_to_string(path)?;
    Ok(Query::from_yaml(&yaml)?)
}

fn run_query(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let query = read_query(&args.query)?;

    let mut config = query.effective_config(SeqConfig::from_env());
    apply_overrides(&mut config, args.initial_buckets, args.buffer_seed);
    config.validate()?;

    let mut exec = Executor::new(config);
    for spec in &args.inner {
        let (name, path) = parse_inner(spec)?;
        let records = load_records(path)?;
        log::info!("loaded dataset '{}' ({} records)", name, records.len());
        exec.add_dataset(name, records);
    }

    let input = load_records(&args.input)?;
    log::info!("running {} steps over {} records", query.steps.len(), input.len());
    let out = exec.run(&query, input)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&out)?
    } else {
        serde_json::to_string(&out)?
    };
    println!("{}", rendered);
    Ok(())
}

fn apply_overrides(cfg: &mut SeqConfig, initial_buckets: Option<usize>, buffer_seed: Option<usize>) {
    if let Some(n) = initial_buckets {
        cfg.initial_bucket_count = n;
    }
    if let Some(n) = buffer_seed {
        cfg.buffer_seed_capacity = n;
    }
}

fn parse_inner(spec: &str) -> Result<(&str, &str), String> {
    match spec.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok((name, path)),
        _ => Err(format!("--inner expects NAME=FILE, got '{}'", spec)),
    }
}
