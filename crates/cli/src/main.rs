#![deny(unsafe_code)]
//! CLI binary for the pixel-swarm canvas sketches.
//!
//! Subcommands:
//! - `render <sketch>` — build a sketch (optionally seeded from a source
//!   image), drive it N frames with a fixed pointer, write a PNG snapshot
//! - `list` — print available sketches

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use pixel_swarm_core::{FrameInput, PixelImage, Rgba, Sketch};
use pixel_swarm_sketches::SketchKind;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "pixel-swarm", about = "Canvas sketch CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drive a sketch for N frames and write a PNG snapshot.
    Render {
        /// Sketch name (e.g. "field").
        sketch: String,

        /// Source image for image-sampled sketches. Sketches that take no
        /// image ("road") run without one; image-sampled sketches fall back
        /// to a single white pixel.
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 640)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 480)]
        height: usize,

        /// Number of frames to step.
        #[arg(short, long, default_value_t = 300)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Pointer x position held for the whole run (defaults to center).
        #[arg(long)]
        pointer_x: Option<f64>,

        /// Pointer y position held for the whole run (defaults to center).
        #[arg(long)]
        pointer_y: Option<f64>,

        /// Trigger the explode impulse at this frame index.
        #[arg(long)]
        explode_at: Option<usize>,

        /// Output file path.
        #[arg(short, long, default_value = "snapshot.png")]
        output: PathBuf,

        /// Sketch parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available sketches.
    List,
}

/// Parses the `--params` flag. The value must be a JSON object; key-level
/// validation belongs to the sketch, which falls back to defaults.
fn parse_params(raw: &str) -> Result<serde_json::Value, CliError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| CliError::Params(e.to_string()))?;
    if !value.is_object() {
        return Err(CliError::Params(format!(
            "expected a JSON object, got `{value}`"
        )));
    }
    Ok(value)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let sketches = SketchKind::list_sketches();
            if cli.json {
                let info = serde_json::json!({ "sketches": sketches });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Sketches:");
                for name in sketches {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            sketch,
            image,
            width,
            height,
            frames,
            seed,
            pointer_x,
            pointer_y,
            explode_at,
            output,
            params,
        } => {
            let params = parse_params(&params)?;

            let source = match &image {
                Some(path) => pixel_swarm_sketches::snapshot::load_image(path)?,
                None => PixelImage::solid(1, 1, Rgba::WHITE)?,
            };
            let mut sk = SketchKind::from_name(&sketch, &source, width, height, seed, &params)?;

            let px = pointer_x.unwrap_or(width as f64 / 2.0);
            let py = pointer_y.unwrap_or(height as f64 / 2.0);
            for frame in 0..frames {
                let mut input = FrameInput::at_pointer(px, py);
                if explode_at == Some(frame) {
                    input = input.with_explode();
                }
                sk.step(&input)?;
            }

            pixel_swarm_sketches::snapshot::write_png(&sk.scene(), &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "sketch": sketch,
                    "image": image.as_ref().map(|p| p.display().to_string()),
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {sketch} ({width}x{height}, {frames} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
