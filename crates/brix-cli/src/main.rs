//! brix CLI - voxel models to interlocking-brick layouts.
//!
//! Reads chunk-based voxel model files, decomposes them layer by layer
//! into brick footprints, and writes the labeled result as JSON.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brix_grid::{Axis, Grid2};
use brix_layout::{cover, decompose, BrickCatalog, LayoutSettings};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "brix")]
#[command(about = "Convert voxel models into interlocking-brick layouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AxisArg {
    X,
    Y,
    Z,
}

impl From<AxisArg> for Axis {
    fn from(axis: AxisArg) -> Self {
        match axis {
            AxisArg::X => Axis::X,
            AxisArg::Y => Axis::Y,
            AxisArg::Z => Axis::Z,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Decompose a .vox model into per-layer bricks and write JSON
    Convert {
        /// Input model file
        input: PathBuf,
        /// Output JSON file
        output: PathBuf,
        /// Axis to slice along
        #[arg(long, value_enum, default_value = "z")]
        axis: AxisArg,
        /// Master random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Cover a blank rectangle with bricks (no color constraint)
    Cover {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Display information about a .vox model
    Info {
        /// Model file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Convert {
            input,
            output,
            axis,
            seed,
        } => convert(&input, &output, axis.into(), seed),
        Commands::Cover { rows, cols, seed } => cover_rect(rows, cols, seed),
        Commands::Info { file } => show_info(&file),
    }
}

fn convert(input: &Path, output: &Path, axis: Axis, seed: u64) -> Result<()> {
    let volume = brix_vox::read_vox(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let (x, y, z) = volume.dims();
    log::info!("{}: {x} x {y} x {z} voxels", input.display());

    let settings = LayoutSettings {
        axis,
        seed,
        catalog: BrickCatalog::default(),
    };
    let result = decompose(&volume, &settings)?;
    log::info!(
        "{} bricks across {} layers",
        result.stats.brick_count,
        result.stats.layer_count
    );

    let file = File::create(output)
        .with_context(|| format!("creating {}", output.display()))?;
    serde_json::to_writer(BufWriter::new(file), &result)?;
    Ok(())
}

fn cover_rect(rows: usize, cols: usize, seed: u64) -> Result<()> {
    let placement = cover(rows, cols, &BrickCatalog::default(), seed)?;
    print!("{}", render_grid(&placement));
    let bricks = placement.iter().copied().max().unwrap_or(0).max(0);
    log::info!("{bricks} bricks over {rows} x {cols} cells");
    Ok(())
}

fn show_info(file: &Path) -> Result<()> {
    let volume = brix_vox::read_vox(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let (x, y, z) = volume.dims();
    let voxels = volume.iter().filter(|&&v| v != 0).count();
    let colors: BTreeSet<u8> = volume.iter().copied().filter(|&v| v != 0).collect();
    println!("size:   {x} x {y} x {z}");
    println!("voxels: {voxels}");
    println!("colors: {}", colors.len());
    Ok(())
}

/// Render a placement grid as aligned text columns; `.` marks excluded
/// cells.
fn render_grid(grid: &Grid2<i32>) -> String {
    let width = grid
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1);
    let mut out = String::new();
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if c > 0 {
                out.push(' ');
            }
            let v = grid[(r, c)];
            if v < 0 {
                out.push_str(&format!("{:>width$}", "."));
            } else {
                out.push_str(&format!("{v:>width$}"));
            }
        }
        out.push('\n');
    }
    out
}
