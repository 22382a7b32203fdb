//! notekit inspector
//!
//! Reads notebook pages and documents without a GUI and reports what they
//! contain.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use notekit::{
    default_config_path, init_logging, summarize_document_file, summarize_scene, Config,
    DirAssetResolver, Editor, PageSummary,
};

#[derive(Parser)]
#[command(name = "notekit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect notekit pages and documents", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a single page file
    Page {
        /// Page data file
        path: PathBuf,

        /// Asset folder for images; defaults to the configured folder next to the page
        #[arg(short, long)]
        assets: Option<PathBuf>,
    },

    /// Summarize every page of a document file
    Document {
        /// Document file
        path: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load_or_default(&config_path);

    match cli.command {
        Commands::Page { path, assets } => {
            let assets = assets.unwrap_or_else(|| {
                let page_dir = path.parent().map(PathBuf::from).unwrap_or_default();
                config.storage.assets_for(&page_dir)
            });
            let mut editor = Editor::new(config);
            editor
                .load_page_file(&path, Arc::new(DirAssetResolver::new(assets)))
                .with_context(|| format!("reading page {}", path.display()))?;
            let summary = summarize_scene(editor.scene());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_page(&path.display().to_string(), &summary);
            }
        }
        Commands::Document { path } => {
            let summary = summarize_document_file(&path, config.canvas.z_band)
                .with_context(|| format!("reading document {}", path.display()))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                if let Some(saved_at) = &summary.saved_at {
                    println!("Saved {}", saved_at);
                }
                for (index, page) in summary.pages.iter().enumerate() {
                    print_page(&format!("Page {}", index + 1), page);
                }
            }
        }
        Commands::Config => {
            println!("# {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn print_page(title: &str, summary: &PageSummary) {
    println!("{} ({} items)", title, summary.item_count());
    for layer in &summary.layers {
        let mut flags = Vec::new();
        if !layer.visible {
            flags.push("hidden");
        }
        if layer.locked {
            flags.push("locked");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "  {}{}: {} paths, {} texts, {} images",
            layer.name, flags, layer.paths, layer.texts, layer.images
        );
    }
    if let Some([x0, y0, x1, y1]) = summary.bounds {
        println!("  bounds: ({:.1}, {:.1}) - ({:.1}, {:.1})", x0, y0, x1, y1);
    }
}
