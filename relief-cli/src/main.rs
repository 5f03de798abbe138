use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Planetary elevation raster CLI tool
#[derive(Parser)]
#[command(name = "relief")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the dataset manifest (datasets.json)
    #[arg(short, long, env = "RELIEF_MANIFEST", global = true)]
    manifest: Option<PathBuf>,

    /// Directory containing rasters and datasets.json
    #[arg(short, long, env = "RELIEF_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the one-time compaction pass for a dataset
    Compact {
        /// Dataset name, or all configured datasets if omitted
        dataset: Option<String>,

        /// Delete an existing marked raster and compact again
        #[arg(short, long)]
        force: bool,
    },

    /// Read a rectangular window of samples from a dataset
    Window {
        /// Dataset name
        dataset: String,

        /// Window origin column
        #[arg(short, long)]
        x: usize,

        /// Window origin row
        #[arg(short, long)]
        z: usize,

        /// Window width in raw raster units
        #[arg(short, long)]
        width: usize,

        /// Window height in raw raster units
        #[arg(long)]
        height: usize,

        /// Subsampling stride
        #[arg(short, long, default_value = "1")]
        stride: usize,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Display information about a dataset
    Info {
        /// Dataset name
        dataset: String,
    },

    /// List configured datasets
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let manifest = commands::manifest_path(cli.manifest, cli.data_dir)?;

    match cli.command {
        Commands::Compact { dataset, force } => commands::compact::run(&manifest, dataset, force),
        Commands::Window {
            dataset,
            x,
            z,
            width,
            height,
            stride,
            json,
        } => commands::window::run(&manifest, &dataset, x, z, width, height, stride, json),
        Commands::Info { dataset } => commands::info::run(&manifest, &dataset),
        Commands::List => commands::list::run(&manifest),
    }
}
