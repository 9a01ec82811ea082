//! Benchmark helper utilities for zel-rs
//!
//! This module generates synthetic ZEL container data for the benchmark
//! suite. Unlike the original codec this decoder replaces, there is no
//! corpus of real-world asset files to draw from, so every benchmark
//! exercises a generated container instead.

use zel_types::header::CompressionType;

/// Common benchmark canvas sizes, tiled into 16x16 zones.
pub mod sizes {
	/// Tiny image: 64x64 (16 zones)
	pub const TINY: (u16, u16) = (64, 64);
	/// Small image: 256x256 (256 zones)
	pub const SMALL: (u16, u16) = (256, 256);
	/// Medium image: 512x512 (1024 zones) - typical embedded display atlas
	pub const MEDIUM: (u16, u16) = (512, 512);
}

fn encode_zone_chunk(out: &mut Vec<u8>, compression: CompressionType, pixels: &[u8]) {
	match compression {
		CompressionType::None => {
			out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
			out.extend_from_slice(pixels);
		}
		CompressionType::Lz4 => {
			let compressed = lz4_flex::block::compress(pixels);
			out.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
			out.extend_from_slice(&compressed);
		}
		CompressionType::Rle => panic!("RLE is reserved and never implemented"),
	}
}

fn compression_tag(compression: CompressionType) -> u8 {
	match compression {
		CompressionType::None => 0,
		CompressionType::Lz4 => 1,
		CompressionType::Rle => 2,
	}
}

/// Generates a ZEL container with `frame_count` keyframes over a `width` x
/// `height` canvas tiled into 16x16 zones.
///
/// Each zone's pixel pattern varies by frame and zone index so `LZ4`
/// genuinely compresses rather than degenerating to one repeated byte.
pub fn generate_test_zel_data(
	width: u16,
	height: u16,
	frame_count: u32,
	compression: CompressionType,
) -> Vec<u8> {
	const ZONE_DIM: u16 = 16;
	let zones_per_row = width / ZONE_DIM;
	let zones_per_col = height / ZONE_DIM;
	let zone_count = zones_per_row as u32 * zones_per_col as u32;
	let zone_pixel_bytes = ZONE_DIM as usize * ZONE_DIM as usize;

	let mut data = vec![0u8; 34];
	data[0..4].copy_from_slice(b"ZEL0");
	data[4..6].copy_from_slice(&1u16.to_le_bytes());
	data[6..8].copy_from_slice(&34u16.to_le_bytes());
	data[8..10].copy_from_slice(&width.to_le_bytes());
	data[10..12].copy_from_slice(&height.to_le_bytes());
	data[12..14].copy_from_slice(&ZONE_DIM.to_le_bytes());
	data[14..16].copy_from_slice(&ZONE_DIM.to_le_bytes());
	data[0x10] = 0; // Indexed8
	data[0x11] = 0x04; // hasFrameIndexTable
	data[0x12..0x16].copy_from_slice(&frame_count.to_le_bytes());
	data[0x16..0x18].copy_from_slice(&50u16.to_le_bytes());

	let index_table_offset = data.len();
	data.resize(index_table_offset + frame_count as usize * 11, 0);

	for frame_index in 0..frame_count {
		let frame_offset = data.len() as u32;

		let mut frame = Vec::new();
		frame.push(0); // blockType
		frame.push(14); // headerSize
		frame.push(0x01); // keyframe
		frame.extend_from_slice(&(zone_count as u16).to_le_bytes());
		frame.push(compression_tag(compression));
		frame.extend_from_slice(&0u16.to_le_bytes()); // referenceFrameIndex
		frame.extend_from_slice(&0u16.to_le_bytes()); // localPaletteEntryCount
		frame.extend_from_slice(&[0u8; 4]); // reserved

		for zone_index in 0..zone_count {
			let seed = frame_index.wrapping_add(zone_index) as u8;
			let pixels: Vec<u8> = (0..zone_pixel_bytes).map(|i| seed.wrapping_add((i % 4) as u8)).collect();
			encode_zone_chunk(&mut frame, compression, &pixels);
		}

		let frame_size = frame.len() as u32;
		data.extend_from_slice(&frame);

		let entry_start = index_table_offset + frame_index as usize * 11;
		data[entry_start..entry_start + 4].copy_from_slice(&frame_offset.to_le_bytes());
		data[entry_start + 4..entry_start + 8].copy_from_slice(&frame_size.to_le_bytes());
		data[entry_start + 8] = 0x01; // keyframe
		data[entry_start + 9..entry_start + 11].copy_from_slice(&0u16.to_le_bytes());
	}

	data
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_container_opens_and_decodes() {
		let data = generate_test_zel_data(64, 64, 2, CompressionType::None);
		let ctx = zel_types::context::Context::open_memory(&data).unwrap();
		assert_eq!(ctx.frame_count(), 2);
		let mut dst = vec![0u8; 64 * 64];
		ctx.decode_frame_index8(0, &mut dst, 64).unwrap();
	}

	#[test]
	fn generated_container_with_lz4_decodes() {
		let data = generate_test_zel_data(64, 64, 1, CompressionType::Lz4);
		let ctx = zel_types::context::Context::open_memory(&data).unwrap();
		let mut dst = vec![0u8; 64 * 64];
		ctx.decode_frame_index8(0, &mut dst, 64).unwrap();
	}
}
