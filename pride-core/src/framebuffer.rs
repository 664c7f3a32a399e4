//! Off-screen RGB565 frame.
//!
//! The whole frame is drawn here first and then pushed to the panel in a
//! single contiguous transfer, so the panel never shows a half-drawn flag.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};

/// A `W`×`H` frame of RGB565 pixels.
pub struct Framebuffer<const W: usize, const H: usize> {
    rows: [[Rgb565; W]; H],
}

impl<const W: usize, const H: usize> Framebuffer<W, H> {
    /// A black frame. `const` so the frame can live in a static.
    pub const fn new() -> Self {
        Self {
            rows: [[Rgb565::BLACK; W]; H],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb565> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Pixels in row-major order, as the panel expects them.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb565> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    /// Push the whole frame to `display` at the origin.
    pub fn present<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = Rectangle::new(Point::zero(), self.size());
        display.fill_contiguous(&area, self.pixels())
    }
}

impl<const W: usize, const H: usize> Default for Framebuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> OriginDimensions for Framebuffer<W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<const W: usize, const H: usize> DrawTarget for Framebuffer<W, H> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            if let Some(px) = self
                .rows
                .get_mut(point.y as usize)
                .and_then(|row| row.get_mut(point.x as usize))
            {
                *px = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let (x0, x1) = (area.top_left.x as usize, bottom_right.x as usize);
        for row in &mut self.rows[area.top_left.y as usize..=bottom_right.y as usize] {
            row[x0..=x1].fill(color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for row in &mut self.rows {
            row.fill(color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_new_is_black() {
        let fb = Framebuffer::<4, 3>::new();
        assert!(fb.pixels().all(|c| c == Rgb565::BLACK));
        assert_eq!(fb.pixels().count(), 12);
    }

    #[test]
    fn test_clipping() {
        let mut fb = Framebuffer::<4, 4>::new();
        Rectangle::new(Point::new(-2, 2), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.pixel(0, 1), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(0, 2), Some(Rgb565::RED));
        assert_eq!(fb.pixel(3, 3), Some(Rgb565::RED));
        assert_eq!(fb.pixel(4, 3), None);
    }

    #[test]
    fn test_fill_outside_is_noop() {
        let mut fb = Framebuffer::<4, 4>::new();
        fb.fill_solid(&Rectangle::new(Point::new(10, 10), Size::new(3, 3)), Rgb565::RED)
            .unwrap();
        assert!(fb.pixels().all(|c| c == Rgb565::BLACK));
    }

    #[test]
    fn test_present_row_major() {
        let mut fb = Framebuffer::<2, 2>::new();
        Pixel(Point::new(1, 0), Rgb565::GREEN).draw(&mut fb).unwrap();
        let mut out = Framebuffer::<2, 2>::new();
        fb.present(&mut out).unwrap();
        assert_eq!(out.pixel(1, 0), Some(Rgb565::GREEN));
        assert_eq!(out.pixel(0, 1), Some(Rgb565::BLACK));
    }
}
