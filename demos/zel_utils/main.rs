//! ZEL Container Format CLI Utility
//!
//! A command-line tool for inspecting and decoding ZEL animated raster
//! containers.
//!
//! # Features
//!
//! - **info**: Print a container's header metadata and per-frame timing
//! - **decode**: Export one frame as a PNG image
//! - **timeline**: Resolve which frame is shown at a given playback time
//!
//! # Usage
//!
//! ```bash
//! # Print container metadata
//! cargo run --example zel_utils info animation.zel
//!
//! # Decode frame 0 to PNG
//! cargo run --example zel_utils decode animation.zel 0 frame0.png
//!
//! # Find which frame is showing at 1500ms into playback
//! cargo run --example zel_utils timeline animation.zel 1500
//! ```

use clap::{Parser, Subcommand};
use image::{ImageBuffer, Rgb, RgbImage};
use std::fs;
use std::path::PathBuf;
use zel_rs::prelude::*;

#[derive(Parser)]
#[command(name = "zel_utils")]
#[command(author = "zel-rs project")]
#[command(version = "1.0")]
#[command(about = "ZEL container format utility - inspect, decode, and time animations", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print a container's header metadata and per-frame timing
	Info {
		/// Input ZEL file path
		#[arg(value_name = "INPUT_ZEL")]
		input: PathBuf,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Decode one frame to a PNG image
	Decode {
		/// Input ZEL file path
		#[arg(value_name = "INPUT_ZEL")]
		input: PathBuf,

		/// Frame index to decode
		#[arg(value_name = "FRAME_INDEX")]
		frame_index: u32,

		/// Output PNG file path
		#[arg(value_name = "OUTPUT_PNG")]
		output: PathBuf,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Resolve which frame is shown at a given playback time
	Timeline {
		/// Input ZEL file path
		#[arg(value_name = "INPUT_ZEL")]
		input: PathBuf,

		/// Playback time in milliseconds, wrapped to the animation's total duration
		#[arg(value_name = "TIME_MS")]
		time_ms: u32,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},
}

/// Converts a decoded RGB565 buffer into an `image` crate RGB image.
fn rgb565_to_image(pixels: &[u16], width: u32, height: u32) -> RgbImage {
	ImageBuffer::from_fn(width, height, |x, y| {
		let px = pixels[(y * width + x) as usize];
		let r = ((px >> 11) & 0x1F) as u8;
		let g = ((px >> 5) & 0x3F) as u8;
		let b = (px & 0x1F) as u8;
		Rgb([(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)])
	})
}

fn handle_info(input: PathBuf, verbose: bool) -> anyhow::Result<()> {
	if verbose {
		println!("🔍 Inspecting ZEL container");
		println!("   Input: {}", input.display());
	}

	let data = fs::read(&input)?;
	let ctx = Context::open_memory(&data)?;

	println!("📦 {}", input.display());
	println!("   Canvas:       {}x{}", ctx.width(), ctx.height());
	println!("   Zones:        {}x{}", ctx.zone_width(), ctx.zone_height());
	println!("   Frames:       {}", ctx.frame_count());
	println!("   Default dur.: {}ms", ctx.default_frame_duration_ms());
	println!("   Global pal.:  {}", if ctx.has_global_palette() { "yes" } else { "no" });

	if verbose {
		let total = ctx.total_duration_ms()?;
		println!("\n🎞  Frames (total duration {}ms):", total);
		for frame_index in 0..ctx.frame_count() {
			let duration = ctx.frame_duration_ms(frame_index)?;
			let keyframe = ctx.frame_is_keyframe(frame_index)?;
			let local_palette = ctx.frame_uses_local_palette(frame_index)?;
			println!(
				"   [{frame_index}] {duration}ms{}{}",
				if keyframe { " keyframe" } else { "" },
				if local_palette { " local-palette" } else { "" },
			);
		}
	}

	Ok(())
}

fn handle_decode(input: PathBuf, frame_index: u32, output: PathBuf, verbose: bool) -> anyhow::Result<()> {
	if verbose {
		println!("🔄 Decoding ZEL frame to PNG");
		println!("   Input:  {}", input.display());
		println!("   Frame:  {frame_index}");
		println!("   Output: {}", output.display());
	}

	let data = fs::read(&input)?;
	let ctx = Context::open_memory(&data)?;

	let width = ctx.width() as u32;
	let height = ctx.height() as u32;
	let mut pixels = vec![0u16; width as usize * height as usize];

	if verbose {
		println!("\n🔓 Decoding {}x{} frame...", width, height);
	}
	ctx.decode_frame_rgb565(frame_index, &mut pixels, width as usize)?;

	let image = rgb565_to_image(&pixels, width, height);
	image.save(&output)?;

	if verbose {
		println!("   ✓ Saved to {}", output.display());
		println!("\n✅ Decoding completed successfully!");
	} else {
		println!("✓ Decoded frame {frame_index} of {} -> {} ({width}x{height})", input.display(), output.display());
	}

	Ok(())
}

fn handle_timeline(input: PathBuf, time_ms: u32, verbose: bool) -> anyhow::Result<()> {
	let data = fs::read(&input)?;
	let ctx = Context::open_memory(&data)?;

	let total = ctx.total_duration_ms()?;
	let (frame_index, frame_start) = ctx.find_frame_by_time_ms(time_ms)?;

	if verbose {
		println!("⏱  Resolving playback time {time_ms}ms (total duration {total}ms)");
	}
	println!("✓ At {time_ms}ms: frame {frame_index} (started at {frame_start}ms)");

	Ok(())
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	match cli.command {
		Commands::Info { input, verbose } => handle_info(input, verbose),
		Commands::Decode { input, frame_index, output, verbose } => {
			handle_decode(input, frame_index, output, verbose)
		}
		Commands::Timeline { input, time_ms, verbose } => handle_timeline(input, time_ms, verbose),
	}
}
