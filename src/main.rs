//! Command-line interface for confschema

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use confschema::graph::TypeGraphDocument;
#[cfg(feature = "cli")]
use confschema::{Generation, ProcessorConfig, SchemaProcessor};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "confschema")]
#[command(author, version, about = "Configuration schema generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an XSD from a type graph
    Generate {
        /// Path to the JSON type graph
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Output file (defaults to the configured output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target namespace URI
        #[arg(short, long)]
        namespace: Option<String>,

        /// JSON settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Additional declared type to treat as a plain value
        #[arg(long = "plain-type", value_name = "TYPE")]
        plain_types: Vec<String>,
    },

    /// Show the configuration model extracted from a type graph
    Inspect {
        /// Path to the JSON type graph
        #[arg(value_name = "GRAPH")]
        graph: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            graph,
            output,
            namespace,
            config,
            plain_types,
        } => cmd_generate(graph, output, namespace, config, plain_types),
        Commands::Inspect { graph, json } => cmd_inspect(graph, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_generate(
    graph_path: PathBuf,
    output: Option<PathBuf>,
    namespace: Option<String>,
    config: Option<PathBuf>,
    plain_types: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = TypeGraphDocument::from_file(&graph_path)?;

    let mut settings = match config {
        Some(path) => ProcessorConfig::from_file(path)?,
        None => ProcessorConfig::default(),
    };
    if let Some(output) = output {
        settings = settings.with_output(output);
    }
    if let Some(namespace) = namespace {
        settings = settings.with_target_namespace(namespace);
    }
    for plain_type in plain_types {
        settings = settings.with_plain_type(plain_type);
    }

    let mut processor = SchemaProcessor::new(&graph, settings);
    processor.process(&graph.entry_points)?;
    if let Generation::Written(path) = processor.finish()? {
        println!("{}", path.display());
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_inspect(graph_path: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let graph = TypeGraphDocument::from_file(&graph_path)?;

    let mut processor = SchemaProcessor::new(&graph, ProcessorConfig::default());
    processor.process(&graph.entry_points)?;
    let configuration = processor.configuration();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&configuration.dump())?);
    } else {
        println!("confschema v{}", confschema::VERSION);
        println!();
        println!("Entry points: {}", graph.entry_points.len());
        println!("Root elements: {}", configuration.root_count());
        println!("Total elements: {}", configuration.len());
        println!();
        print!("{}", configuration.tree_string());
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
