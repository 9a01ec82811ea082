//! Animation timing: total duration and time-to-frame lookup.

use crate::context::Context;
use crate::error::{Result, ZelError};

/// Sums every frame's duration into the animation's total playback length.
///
/// Each frame contributes its own duration if set, otherwise the
/// container's default. Accumulation uses `checked_add` so a
/// pathologically long animation reports [`ZelError::Internal`] rather than
/// silently wrapping.
pub fn total_duration_ms(ctx: &Context) -> Result<u32> {
	let mut total: u32 = 0;
	for frame_index in 0..ctx.frame_count() {
		let duration = ctx.frame_duration_ms(frame_index)?;
		total = total
			.checked_add(duration as u32)
			.ok_or(ZelError::Internal("total animation duration overflows u32 milliseconds"))?;
	}
	Ok(total)
}

/// Finds which frame is on screen at `time_ms`, wrapping around the
/// animation's total duration, and returns `(frame_index, frame_start_ms)`.
///
/// `time_ms` is taken modulo the total duration, so any elapsed time maps
/// onto one loop of the animation. A zero-frame container, or one whose
/// total duration is zero, cannot be resolved and returns
/// [`ZelError::CorruptData`] — this is a deliberate asymmetry with
/// [`total_duration_ms`], which happily reports `0` for the same container;
/// see `DESIGN.md`.
pub fn find_frame_by_time_ms(ctx: &Context, time_ms: u32) -> Result<(u32, u32)> {
	let frame_count = ctx.frame_count();
	let total = total_duration_ms(ctx)?;
	if total == 0 {
		return Err(ZelError::CorruptData { reason: "animation has zero total duration" });
	}

	let mut elapsed = time_ms % total;
	let mut accum: u32 = 0;
	for frame_index in 0..frame_count {
		let duration = ctx.frame_duration_ms(frame_index)? as u32;
		if elapsed < duration {
			return Ok((frame_index, accum));
		}
		elapsed -= duration;
		accum += duration;
	}

	// `elapsed < total` by construction of the modulo above, so the loop
	// above always returns before exhausting every frame's duration.
	unreachable!("elapsed time is always covered by the sum of frame durations")
}
