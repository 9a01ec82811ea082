//! Derived zone geometry shared by every frame in a container.

use crate::error::{Result, ZelError};

/// Geometry derived from a file header's canvas and zone dimensions.
///
/// Every frame in a container shares the same layout: the canvas is tiled
/// into `zones_per_row` × `zones_per_col` zones of `zone_width` ×
/// `zone_height` pixels each, with no partial zones at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneLayout {
	/// Canvas width in pixels.
	pub width: u16,
	/// Canvas height in pixels.
	pub height: u16,
	/// Zone width in pixels.
	pub zone_width: u16,
	/// Zone height in pixels.
	pub zone_height: u16,
	/// Number of zones per row.
	pub zones_per_row: u16,
	/// Number of zones per column.
	pub zones_per_col: u16,
	/// Total number of zones (`zones_per_row * zones_per_col`).
	pub zone_count: u16,
	/// Uncompressed size in bytes of one zone's pixel data
	/// (`zone_width * zone_height` for indexed-8bpp).
	pub zone_pixel_bytes: u32,
}

impl ZoneLayout {
	/// Derives a zone layout, validating the divisibility and zone-count
	/// invariants the format requires.
	pub fn compute(width: u16, height: u16, zone_width: u16, zone_height: u16) -> Result<Self> {
		if width == 0 || height == 0 {
			return Err(ZelError::CorruptData { reason: "canvas dimension is zero" });
		}
		if zone_width == 0 || zone_height == 0 {
			return Err(ZelError::CorruptData { reason: "zone dimension is zero" });
		}
		if width % zone_width != 0 || height % zone_height != 0 {
			return Err(ZelError::CorruptData {
				reason: "canvas dimensions are not a whole multiple of the zone dimensions",
			});
		}

		let zones_per_row = width / zone_width;
		let zones_per_col = height / zone_height;
		let zone_count = zones_per_row as u32 * zones_per_col as u32;
		if zone_count > u16::MAX as u32 {
			return Err(ZelError::CorruptData { reason: "zone count exceeds 65535" });
		}

		let zone_pixel_bytes = zone_width as u32 * zone_height as u32;

		Ok(Self {
			width,
			height,
			zone_width,
			zone_height,
			zones_per_row,
			zones_per_col,
			zone_count: zone_count as u16,
			zone_pixel_bytes,
		})
	}

	/// Returns the `(column, row)` position of a zone index within the
	/// zone grid.
	pub fn zone_position(&self, zone_index: u16) -> Result<(u16, u16)> {
		if zone_index >= self.zone_count {
			return Err(ZelError::OutOfBounds { reason: "zone index out of range" });
		}
		let row = zone_index / self.zones_per_row;
		let col = zone_index % self.zones_per_row;
		Ok((col, row))
	}
}
