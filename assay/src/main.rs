// assay/src/main.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "assay")]
#[command(about = "Metadata governance assessment engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 🔬 Runs the full assessment (scores, gaps, anti-patterns, risk)
    Assess {
        /// Snapshot file (JSON array) or directory of .json files
        #[arg(long)]
        snapshot: PathBuf,

        /// Settings file (default: discover assay.yaml in the working dir)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit the full report as JSON instead of tables
        #[arg(long, default_value = "false")]
        json: bool,

        /// Write the JSON report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// 🕳️  Lists governance gaps aggregated across the batch
    Gaps {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// 🚨 Detects anti-patterns and computes the governance risk score
    Risk {
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// 🧩 Matches the batch against governance pattern templates
    Patterns {
        #[arg(long)]
        snapshot: PathBuf,

        /// Coverage fraction a field needs to count as satisfied
        #[arg(long)]
        threshold: Option<f64>,

        /// Also print a phased implementation plan for this template id
        #[arg(long)]
        plan: Option<String>,
    },

    /// 📋 Compares assets against an enrichment plan (YAML)
    Compare {
        #[arg(long)]
        snapshot: PathBuf,

        /// Enrichment plan YAML file
        #[arg(long)]
        plan: PathBuf,
    },

    /// 📖 Prints the built-in catalogs
    Catalog {
        /// What to list: "signals", "fields" or "patterns"
        #[arg(default_value = "signals")]
        section: String,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            snapshot,
            config,
            json,
            output,
        } => commands::assess::execute(snapshot, config, json, output),
        Commands::Gaps { snapshot, config } => commands::gaps::execute(snapshot, config),
        Commands::Risk { snapshot } => commands::risk::execute(snapshot),
        Commands::Patterns {
            snapshot,
            threshold,
            plan,
        } => commands::patterns::execute(snapshot, threshold, plan),
        Commands::Compare { snapshot, plan } => commands::compare::execute(snapshot, plan),
        Commands::Catalog { section } => commands::catalog::execute(&section),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
