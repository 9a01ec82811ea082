//! Writing one decoded zone's pixels into a destination frame buffer.

use crate::error::{Result, ZelError};
use crate::layout::ZoneLayout;

/// Copies one zone's decoded index bytes into their strided position
/// within a whole-frame indexed-8bpp destination buffer.
pub fn blit_zone_index8(
	dst: &mut [u8],
	dst_stride: usize,
	zone_index: u16,
	layout: &ZoneLayout,
	zone_pixels: &[u8],
) -> Result<()> {
	let (col, row) = layout.zone_position(zone_index)?;
	let origin_x = col as usize * layout.zone_width as usize;
	let origin_y = row as usize * layout.zone_height as usize;
	let zone_width = layout.zone_width as usize;

	for y in 0..layout.zone_height as usize {
		let dst_start = (origin_y + y) * dst_stride + origin_x;
		let src_start = y * zone_width;
		dst[dst_start..dst_start + zone_width]
			.copy_from_slice(&zone_pixels[src_start..src_start + zone_width]);
	}
	Ok(())
}

/// Maps a run of palette indices to RGB565 colors, writing into `out` and
/// failing on the first index that is out of range for `palette`.
fn map_indices(indices: &[u8], palette: &[u16], out: &mut [u16]) -> Result<()> {
	for (dst, &index) in out.iter_mut().zip(indices) {
		*dst = *palette.get(index as usize).ok_or(ZelError::CorruptData {
			reason: "zone pixel index is out of range for the resolved palette",
		})?;
	}
	Ok(())
}

/// Copies one zone's decoded index bytes into their strided position
/// within a whole-frame RGB565 destination buffer, resolving each index
/// through `palette`.
///
/// Fails with [`ZelError::CorruptData`] on the first pixel whose index has
/// no matching palette entry, rather than clamping or substituting a
/// default color.
pub fn blit_zone_rgb565(
	dst: &mut [u16],
	dst_stride_pixels: usize,
	zone_index: u16,
	layout: &ZoneLayout,
	zone_pixels: &[u8],
	palette: &[u16],
) -> Result<()> {
	let (col, row) = layout.zone_position(zone_index)?;
	let origin_x = col as usize * layout.zone_width as usize;
	let origin_y = row as usize * layout.zone_height as usize;
	let zone_width = layout.zone_width as usize;

	for y in 0..layout.zone_height as usize {
		let dst_start = (origin_y + y) * dst_stride_pixels + origin_x;
		let src_start = y * zone_width;
		map_indices(
			&zone_pixels[src_start..src_start + zone_width],
			palette,
			&mut dst[dst_start..dst_start + zone_width],
		)?;
	}
	Ok(())
}

/// Maps one zone's decoded index bytes directly to an unstrided RGB565
/// buffer sized for exactly one zone (used by the single-zone decode API).
pub fn map_zone_rgb565(zone_pixels: &[u8], palette: &[u16], out: &mut [u16]) -> Result<()> {
	map_indices(zone_pixels, palette, out)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn layout() -> ZoneLayout {
		ZoneLayout::compute(4, 4, 2, 2).unwrap()
	}

	#[test]
	fn blits_index8_zone_into_strided_position() {
		let layout = layout();
		let mut dst = vec![0u8; 16];
		let zone_pixels = [1u8, 2, 3, 4];
		blit_zone_index8(&mut dst, 4, 3, &layout, &zone_pixels).unwrap();
		// zone 3 is column 1, row 1 -> origin (2, 2)
		assert_eq!(dst[2 * 4 + 2], 1);
		assert_eq!(dst[2 * 4 + 3], 2);
		assert_eq!(dst[3 * 4 + 2], 3);
		assert_eq!(dst[3 * 4 + 3], 4);
	}

	#[test]
	fn blits_rgb565_zone_through_palette() {
		let layout = layout();
		let palette = [0x1111u16, 0x2222, 0x3333];
		let mut dst = vec![0u16; 16];
		let zone_pixels = [0u8, 1, 2, 0];
		blit_zone_rgb565(&mut dst, 4, 0, &layout, &zone_pixels, &palette).unwrap();
		assert_eq!(dst[0], 0x1111);
		assert_eq!(dst[1], 0x2222);
		assert_eq!(dst[4], 0x3333);
		assert_eq!(dst[5], 0x1111);
	}

	#[test]
	fn fails_on_out_of_range_index() {
		let layout = layout();
		let palette = [0x1111u16];
		let mut dst = vec![0u16; 16];
		let zone_pixels = [0u8, 5, 0, 0];
		assert!(matches!(
			blit_zone_rgb565(&mut dst, 4, 0, &layout, &zone_pixels, &palette),
			Err(ZelError::CorruptData { .. })
		));
	}
}
