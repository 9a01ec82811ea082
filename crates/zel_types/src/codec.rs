//! Zone payload decompression.

use crate::error::{Result, ZelError};
use crate::header::CompressionType;

/// Decodes a single zone's chunk payload into a caller-provided buffer of
/// exactly the zone's uncompressed pixel size.
///
/// `Rle` is a reserved tag in the on-disk format but is never implemented:
/// it must be rejected as [`ZelError::UnsupportedFormat`], never silently
/// treated the same as [`CompressionType::None`].
pub enum ZoneCodec {}

impl ZoneCodec {
	/// Decodes `payload` (the bytes that followed a zone chunk's `u32`
	/// length prefix) using `compression`, writing exactly `out.len()`
	/// bytes.
	pub fn decode(compression: CompressionType, payload: &[u8], out: &mut [u8]) -> Result<()> {
		match compression {
			CompressionType::None => {
				if payload.len() != out.len() {
					return Err(ZelError::CorruptData {
						reason: "uncompressed zone payload size does not match zone pixel size",
					});
				}
				out.copy_from_slice(payload);
				Ok(())
			}
			CompressionType::Lz4 => {
				if payload.len() > i32::MAX as usize || out.len() > i32::MAX as usize {
					return Err(ZelError::UnsupportedFormat {
						reason: "LZ4 zone payload or output size exceeds the signed 32-bit limit",
					});
				}
				let written = lz4_flex::block::decompress_into(payload, out).map_err(|_| {
					ZelError::CorruptData { reason: "LZ4 zone payload failed to decompress" }
				})?;
				if written != out.len() {
					return Err(ZelError::CorruptData {
						reason: "LZ4 zone payload decompressed to the wrong size",
					});
				}
				Ok(())
			}
			CompressionType::Rle => {
				Err(ZelError::UnsupportedFormat { reason: "RLE zone compression is not implemented" })
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn none_requires_exact_size() {
		let mut out = [0u8; 4];
		let payload = [1, 2, 3, 4];
		ZoneCodec::decode(CompressionType::None, &payload, &mut out).unwrap();
		assert_eq!(out, payload);

		let short_payload = [1, 2, 3];
		assert!(matches!(
			ZoneCodec::decode(CompressionType::None, &short_payload, &mut out),
			Err(ZelError::CorruptData { .. })
		));
	}

	#[test]
	fn lz4_round_trips() {
		let original = vec![7u8; 256];
		let compressed = lz4_flex::block::compress(&original);
		let mut out = vec![0u8; original.len()];
		ZoneCodec::decode(CompressionType::Lz4, &compressed, &mut out).unwrap();
		assert_eq!(out, original);
	}

	#[test]
	fn lz4_wrong_output_size_is_corrupt() {
		let original = vec![7u8; 256];
		let compressed = lz4_flex::block::compress(&original);
		let mut out = vec![0u8; 64];
		assert!(matches!(
			ZoneCodec::decode(CompressionType::Lz4, &compressed, &mut out),
			Err(ZelError::CorruptData { .. })
		));
	}

	#[test]
	fn rle_is_always_rejected() {
		let payload = [0u8; 4];
		let mut out = [0u8; 4];
		assert!(matches!(
			ZoneCodec::decode(CompressionType::Rle, &payload, &mut out),
			Err(ZelError::UnsupportedFormat { .. })
		));
	}
}
