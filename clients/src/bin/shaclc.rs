//! `shaclc`: compiles a SHACL/OWL shape graph into code.
//!
//! **Usage:**
//! ```text
//! shaclc generate --input model.ttl --context context.json jsonschema --output schema.json
//! shaclc generate --input model.jsonld rust --output model.rs
//! shaclc list [--short]
//! shaclc version
//! ```
//!
//! Logs go to stderr. `-v` raises the level to `info`, `-vv` to `debug`;
//! `RUST_LOG` overrides both.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use shaclc_codegen::{generate, RenderOptions, Target};
use shaclc_model::{build, ContextResolver, Graph};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Compile SHACL shapes into schemas and code.
#[derive(Parser)]
#[command(name = "shaclc", about = "Compile SHACL shapes into schemas and code")]
struct Args {
    /// Increase log verbosity (repeatable).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the model and render one target.
    Generate(GenerateArgs),
    /// List the available targets.
    List {
        /// Print target names only.
        #[arg(long)]
        short: bool,
    },
    /// Print the version.
    Version,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Shape graph in Turtle, N-Triples for `.nt` files, or JSON-LD for
    /// `.json`/`.jsonld` files (`-` for stdin, read as Turtle).
    #[arg(short, long)]
    input: PathBuf,

    /// JSON-LD context document. Repeat to add more, highest priority first.
    #[arg(short, long)]
    context: Vec<PathBuf>,

    /// Output target.
    #[arg(value_parser = parse_target)]
    target: Target,

    /// Output path (`-` for stdout).
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Title of the generated document.
    #[arg(long)]
    title: Option<String>,

    /// Identifier of the generated document.
    #[arg(long)]
    id: Option<String>,
}

fn parse_target(name: &str) -> Result<Target, String> {
    Target::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Target::ALL.iter().map(|t| t.name()).collect();
        format!("unknown target `{name}` (expected one of: {})", known.join(", "))
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Generate(generate_args) => run_generate(&generate_args),
        Command::List { short } => {
            for target in Target::ALL {
                if short {
                    println!("{target}");
                } else {
                    println!("{:<12} {}", target.name(), target.help());
                }
            }
            Ok(())
        }
        Command::Version => {
            println!("shaclc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let graph = load_graph(&args.input)?;
    info!(triples = graph.len(), input = %args.input.display(), "loaded shape graph");

    let mut documents = Vec::with_capacity(args.context.len());
    for path in &args.context {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read context {}", path.display()))?;
        let doc: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse context {}", path.display()))?;
        debug!(context = %path.display(), "loaded context");
        documents.push(doc);
    }
    let resolver =
        ContextResolver::from_json_documents(&documents).context("Invalid JSON-LD context")?;

    let model = build(&graph, &resolver).context("Failed to build model")?;

    let options = RenderOptions {
        title: args.title.clone(),
        id: args.id.clone(),
    };
    let report = generate(args.target, &model, &options, &args.output)?;

    if report.output != "-" {
        println!(
            "{}: {} classes, {} properties, {} individuals",
            report.target,
            report.class_count,
            report.property_count,
            model.individual_count()
        );
        println!("  Written: {} ({} bytes)", report.output, report.bytes);
    }
    Ok(())
}

fn load_graph(path: &Path) -> Result<Graph> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read shape graph from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    let extension = path.extension().and_then(|ext| ext.to_str());
    let graph = match extension {
        Some("nt") => Graph::from_ntriples(&text),
        Some("json" | "jsonld") => Graph::from_jsonld(&text),
        _ => Graph::from_turtle(&text),
    };
    graph.with_context(|| format!("Failed to parse {}", path.display()))
}
