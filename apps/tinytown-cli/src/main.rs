use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tinytown_common::TownConfig;
use tinytown_layout::BlockContent;
use tinytown_render::{Primitive, RecordingSink, TextureFlag};
use tinytown_scene::SceneState;
use tinytown_tools::SceneInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tinytown-cli", about = "Headless tiny town driver")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Town configuration (YAML); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the effective configuration
    Info,
    /// List every block with its content
    Layout {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the town headless for a number of frames
    Simulate {
        /// Number of frames (one traffic tick each)
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Record one frame and print draw statistics
    Frame,
}

#[derive(Serialize)]
struct LayoutEntry {
    index: usize,
    origin: [f32; 2],
    size: f32,
    content: BlockContent,
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<TownConfig> {
    let mut config = match path {
        Some(path) => TownConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TownConfig::default(),
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    config.validate().context("validating config")?;
    tracing::info!(seed = config.seed, "config loaded");
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Info => {
            println!("tinytown-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", tinytown_common::crate_info());
            println!("layout: {}", tinytown_layout::crate_info());
            println!("render: {}", tinytown_render::crate_info());
            println!("traffic: {}", tinytown_traffic::crate_info());
            println!("input: {}", tinytown_input::crate_info());
            println!("scene: {}", tinytown_scene::crate_info());
            println!("tools: {}", tinytown_tools::crate_info());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Layout { json } => {
            let scene = SceneState::new(config);
            let entries: Vec<LayoutEntry> = scene
                .layout()
                .into_iter()
                .enumerate()
                .map(|(index, (cell, content))| LayoutEntry {
                    index,
                    origin: cell.origin.to_array(),
                    size: cell.size,
                    content,
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for e in &entries {
                    let what = match e.content {
                        BlockContent::Building {
                            height,
                            texture_base,
                        } => format!(
                            "building height={height} textures={texture_base}/{}",
                            texture_base + 1
                        ),
                        BlockContent::Grass => "grass".to_string(),
                    };
                    println!(
                        "[{:3}] ({:5.1}, {:5.1}) {}",
                        e.index, e.origin[0], e.origin[1], what
                    );
                }
            }
        }
        Commands::Simulate { ticks, json } => {
            let mut scene = SceneState::new(config);
            let mut sink = RecordingSink::new();
            for _ in 0..ticks {
                sink.clear();
                scene.render_frame(&mut sink);
            }
            let summary = SceneInspector::summary(&scene);
            if json {
                #[derive(Serialize)]
                struct Report {
                    summary: tinytown_tools::SceneSummary,
                    vehicles: Vec<tinytown_tools::VehicleInfo>,
                }
                let report = Report {
                    summary,
                    vehicles: SceneInspector::list_vehicles(&scene),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{summary}");
                for info in SceneInspector::list_vehicles(&scene) {
                    println!("  {info}");
                }
            }
        }
        Commands::Frame => {
            let mut scene = SceneState::new(config);
            let mut sink = RecordingSink::new();
            let view = scene.render_frame(&mut sink);
            println!("{sink}");
            let strips = sink
                .batches()
                .iter()
                .filter(|b| b.primitive == Primitive::TriangleStrip)
                .count();
            let textured: usize = sink
                .batches()
                .iter()
                .filter(|b| b.texture_flag != TextureFlag::Off)
                .map(|b| b.vertices.len())
                .sum();
            println!("strip batches={strips} textured vertices={textured}");
            println!(
                "eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1})",
                view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z
            );
        }
    }

    Ok(())
}
