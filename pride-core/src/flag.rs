//! Flag renderer.
//!
//! Every strip is drawn as a row of quadrilaterals, one per column. The top
//! corners of a quad follow the wave offsets of the two boundaries around the
//! column and the bottom corners sit one strip height below them, so each
//! quad becomes a parallelogram or trapezoid as the wave moves.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Triangle,
    },
};

use crate::variant::{
    BAND_HEIGHT,
    Palette,
    StripColors,
};

/// Rise of the top edge (in pixels) beyond which a quad counts as shaded.
const SHADE_THRESHOLD: i32 = -2;

/// Which pen of a strip a quad is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shade {
    Main,
    Shaded,
}

impl Shade {
    /// Shade for a quad whose top edge runs from `left_y` to `right_y`.
    pub fn for_edge(left_y: i32, right_y: i32) -> Self {
        if right_y - left_y < SHADE_THRESHOLD {
            Shade::Shaded
        } else {
            Shade::Main
        }
    }

    pub fn pen(self, colors: StripColors) -> u8 {
        match self {
            Shade::Main => colors.main,
            Shade::Shaded => colors.shade,
        }
    }
}

/// Where the flag sits on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagGeometry {
    pub column_width: i32,
    pub top: i32,
}

impl FlagGeometry {
    /// Split `size` into `columns` columns with the band centred vertically.
    pub fn for_display(size: Size, columns: usize) -> Self {
        let columns = columns.max(1) as i32;
        Self {
            column_width: size.width as i32 / columns,
            top: (size.height as i32 - BAND_HEIGHT as i32) / 2,
        }
    }
}

/// Corners of the quad for strip `row`, column `col`: top-left, top-right,
/// bottom-right, bottom-left.
pub fn quad(
    offsets: &[i32],
    row: usize,
    col: usize,
    strip_height: u32,
    geometry: FlagGeometry,
) -> [Point; 4] {
    let height = strip_height as i32;
    let base = geometry.top + row as i32 * height;
    let p0 = Point::new(col as i32 * geometry.column_width, base + offsets[col]);
    let p1 = Point::new(p0.x + geometry.column_width, base + offsets[col + 1]);
    let p2 = Point::new(p1.x, p1.y + height);
    let p3 = Point::new(p0.x, p0.y + height);
    [p0, p1, p2, p3]
}

/// Draw all strips. `offsets` holds one entry per column boundary.
pub fn draw_flag<D>(
    target: &mut D,
    offsets: &[i32],
    strips: &[StripColors],
    strip_height: u32,
    geometry: FlagGeometry,
    palette: &Palette,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let columns = offsets.len().saturating_sub(1);
    for (row, colors) in strips.iter().enumerate() {
        for col in 0..columns {
            let [p0, p1, p2, p3] = quad(offsets, row, col, strip_height, geometry);
            let pen = Shade::for_edge(p0.y, p1.y).pen(*colors);
            let style = PrimitiveStyle::with_fill(palette.pen(pen));
            Triangle::new(p0, p1, p2).into_styled(style).draw(target)?;
            Triangle::new(p0, p2, p3).into_styled(style).draw(target)?;
        }
    }
    Ok(())
}
