//! Wave offsets for the flag's column boundaries.
//!
//! The flag is cut into equal-width columns. Each column boundary moves up
//! and down on a sine wave with two full periods across the flag. Boundaries
//! close to the pole move less, and boundary 0 is pinned to the pole.

use core::f32::consts::PI;

/// Number of columns the flag is split into.
pub const COLS: usize = 12;

/// Peak vertical displacement in pixels.
pub const AMPLITUDE: f32 = 15.0;

/// Ticks per radian of wave phase.
pub const TICKS_PER_RADIAN: f32 = 200.0;

/// Ticks after which the wave repeats, up to `f32` rounding.
pub const TICK_PERIOD: f32 = TICKS_PER_RADIAN * 2.0 * PI;

/// Angular span across the flag: two full periods.
const SPAN: f32 = 4.0 * PI;

/// Minimum weight of the first free boundary.
const WEIGHT_FLOOR: f32 = 0.2;

/// Amplitude weight of boundary `i` for a flag of `columns` columns.
pub fn weight(i: usize, columns: usize) -> f32 {
    if i == 0 || columns == 0 {
        return 0.0;
    }
    (i as f32 / columns as f32 + WEIGHT_FLOOR).min(1.0)
}

/// Angular position of boundary `i` along the flag.
pub fn angle(i: usize, columns: usize) -> f32 {
    if columns == 0 {
        return 0.0;
    }
    i as f32 * SPAN / columns as f32
}

/// Vertical offset of boundary `i` at `tick`.
pub fn offset_at(tick: f32, i: usize, columns: usize) -> i32 {
    let phase = tick / TICKS_PER_RADIAN;
    let y = AMPLITUDE * weight(i, columns) * libm::sinf(phase + angle(i, columns));
    libm::roundf(y) as i32
}

/// Fill `out` with one offset per boundary; `out.len() - 1` is the column count.
pub fn fill_offsets(tick: f32, out: &mut [i32]) {
    let columns = out.len().saturating_sub(1);
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = offset_at(tick, i, columns);
    }
}

/// Preallocated boundary offsets, `N` = columns + 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable<const N: usize> {
    boundaries: [i32; N],
}

impl<const N: usize> OffsetTable<N> {
    pub const fn new() -> Self {
        Self { boundaries: [0; N] }
    }

    /// Recompute every boundary for `tick`.
    pub fn update(&mut self, tick: f32) {
        fill_offsets(tick, &mut self.boundaries);
    }

    pub fn columns(&self) -> usize {
        N.saturating_sub(1)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.boundaries
    }
}

impl<const N: usize> Default for OffsetTable<N> {
    fn default() -> Self {
        Self::new()
    }
}
