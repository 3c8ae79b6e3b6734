use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "swd")]
#[command(about = "SnowDesk reconciliation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconciliation report commands
    Report {
        #[command(subcommand)]
        cmd: ReportCmd,
    },

    /// Configuration utilities
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Subcommand)]
enum ReportCmd {
    /// Build the reconciliation report for one window and print a summary.
    Run {
        /// Orders JSON file (array of internal order records)
        #[arg(long)]
        orders: String,

        /// External ticketing export JSON file
        #[arg(long)]
        tickets: String,

        /// Catalog JSON file (product/category display names)
        #[arg(long)]
        catalog: Option<String>,

        /// Layered YAML config paths in merge order (base -> env -> resort)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Window start, RFC 3339; orders/tickets before this are excluded
        #[arg(long)]
        from: Option<String>,

        /// Window end, RFC 3339; orders/tickets at or after this are excluded
        #[arg(long)]
        to: Option<String>,

        /// Write the full report (with envelope) as JSON
        #[arg(long)]
        out: Option<String>,

        /// Write the classified item list as CSV
        #[arg(long)]
        csv: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Compute layered config hash + print canonical JSON
    Hash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Report { cmd } => match cmd {
            ReportCmd::Run {
                orders,
                tickets,
                catalog,
                config_paths,
                from,
                to,
                out,
                csv,
            } => commands::report::run(commands::report::RunArgs {
                orders_path: orders,
                tickets_path: tickets,
                catalog_path: catalog,
                config_paths,
                from,
                to,
                out_path: out,
                csv_path: csv,
            }),
        },

        Commands::Config { cmd } => match cmd {
            ConfigCmd::Hash { paths } => {
                let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
                let loaded = swd_config::load_layered_yaml(&path_refs)?;
                println!("config_hash={}", loaded.config_hash);
                println!("{}", loaded.canonical_json);
                Ok(())
            }
        },
    }
}
