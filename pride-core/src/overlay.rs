//! Text, QR code and frame-rate overlays drawn on top of the flag.

use core::fmt::Write as _;

use embedded_graphics::{
    mono_font::{
        MonoFont,
        MonoTextStyle,
        ascii::{
            FONT_5X8,
            FONT_6X10,
        },
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::{
        Baseline,
        Text,
        renderer::TextRenderer,
    },
};

use crate::{
    qr::QrMatrix,
    variant::{
        PEN_BLACK,
        PEN_WHITE,
        Palette,
    },
};

/// Big text font: 5×8 glyphs with one column of spacing.
pub const TEXT_FONT: MonoFont<'static> = MonoFont {
    character_spacing: 1,
    ..FONT_5X8
};

/// Glyph height used for vertical centring.
pub const GLYPH_HEIGHT: u32 = 8;

/// Width of `text` at scale 1 in [`TEXT_FONT`].
pub fn measure_text(text: &str) -> u32 {
    MonoTextStyle::new(&TEXT_FONT, Rgb565::WHITE)
        .measure_string(text, Point::zero(), Baseline::Top)
        .bounding_box
        .size
        .width
}

/// Largest scale up to `max_scale` at which `text` fits into `available` pixels.
pub fn fit_scale(text: &str, available: u32, max_scale: u32) -> u32 {
    let width = measure_text(text);
    if width == 0 {
        return max_scale.max(1);
    }
    (available / width).clamp(1, max_scale.max(1))
}

/// Draw target adapter magnifying every pixel into a `scale`×`scale` square
/// placed relative to `origin` on the wrapped target.
struct Scaled<'a, D> {
    target: &'a mut D,
    origin: Point,
    scale: u32,
}

impl<D: DrawTarget> Dimensions for Scaled<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let outer = self.target.bounding_box();
        let scale = self.scale as i32;
        let top_left = (outer.top_left - self.origin).component_div(Point::new(scale, scale));
        Rectangle::new(
            top_left - Point::new(1, 1),
            outer.size / self.scale + Size::new(2, 2),
        )
    }
}

impl<D: DrawTarget> DrawTarget for Scaled<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let square = Size::new(self.scale, self.scale);
        for Pixel(point, color) in pixels {
            let top_left = self.origin + point * self.scale as i32;
            self.target.fill_solid(&Rectangle::new(top_left, square), color)?;
        }
        Ok(())
    }
}

fn draw_scaled<D>(
    target: &mut D,
    text: &str,
    top_left: Point,
    scale: u32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyle::new(&TEXT_FONT, color);
    let mut scaled = Scaled {
        target,
        origin: top_left,
        scale: scale.max(1),
    };
    Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut scaled)?;
    Ok(())
}

/// Top-left corner of `text` centred on `center` at `scale`.
pub fn centered_origin(text: &str, center: Point, scale: u32) -> Point {
    let width = (measure_text(text) * scale) as i32;
    let height = (GLYPH_HEIGHT * scale) as i32;
    Point::new(center.x - width / 2, center.y - height / 2)
}

/// Draw `text` centred on `center` with a drop shadow `shadow` pixels down
/// and right. The shadow uses the black pen, the text the white pen.
pub fn draw_centered_text<D>(
    target: &mut D,
    text: &str,
    center: Point,
    scale: u32,
    shadow: i32,
    palette: &Palette,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let origin = centered_origin(text, center, scale);
    draw_scaled(
        target,
        text,
        origin + Point::new(shadow, shadow),
        scale,
        palette.pen(PEN_BLACK),
    )?;
    draw_scaled(target, text, origin, scale, palette.pen(PEN_WHITE))
}

/// Draw `qr` centred on the target, about `width` pixels wide. The `paper`
/// plate goes down first, then every dark module in `ink`.
pub fn draw_qr<D>(
    target: &mut D,
    qr: &QrMatrix,
    paper: Rgb565,
    ink: Rgb565,
    width: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let modules = qr.size() as u32;
    if modules == 0 {
        return Ok(());
    }
    let dot = (width / modules).max(1);
    let side = dot * modules;
    let bounds = target.bounding_box();
    let left = bounds.center().x - (side / 2) as i32;
    let top = bounds.center().y - (side / 2) as i32;

    target.fill_solid(
        &Rectangle::new(Point::new(left, top), Size::new(side, side)),
        paper,
    )?;
    let square = Size::new(dot, dot);
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.module(x, y) {
                let corner = Point::new(left + (x as u32 * dot) as i32, top + (y as u32 * dot) as i32);
                target.fill_solid(&Rectangle::new(corner, square), ink)?;
            }
        }
    }
    Ok(())
}

/// Longest frame-rate label.
const FPS_LABEL_LEN: usize = "4294967295 fps".len();

/// Frame-rate readout in the top-left corner.
pub fn draw_fps<D>(target: &mut D, fps: u32, palette: &Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut label: heapless::String<FPS_LABEL_LEN> = heapless::String::new();
    if write!(label, "{fps} fps").is_ok() {
        let style = MonoTextStyle::new(&FONT_6X10, palette.pen(PEN_WHITE));
        Text::with_baseline(&label, Point::zero(), style, Baseline::Top).draw(target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        framebuffer::Framebuffer,
        variant::VARIANTS,
    };

    fn palette() -> Palette {
        Palette::from_variant(&VARIANTS[0])
    }

    #[test]
    fn test_measure_includes_spacing() {
        assert_eq!(measure_text(""), 0);
        let one = measure_text("A");
        let two = measure_text("AA");
        assert!(one >= 5);
        assert_eq!(two - one, 6);
    }

    #[test]
    fn test_fit_scale() {
        let width = measure_text("Lorem");
        assert_eq!(fit_scale("Lorem", width * 10, 10), 10);
        assert_eq!(fit_scale("Lorem", width * 4 + 1, 10), 4);
        assert_eq!(fit_scale("Lorem", 1, 10), 1);
        assert_eq!(fit_scale("", 100, 10), 10);
    }

    #[test]
    fn test_centered_origin() {
        let width = measure_text("Hi") as i32;
        let origin = centered_origin("Hi", Point::new(100, 50), 3);
        assert_eq!(origin, Point::new(100 - width * 3 / 2, 50 - 12));
    }

    #[test]
    fn test_text_and_shadow() {
        let mut fb = Framebuffer::<64, 32>::new();
        let palette = palette();
        fb.clear(palette.pen(2)).unwrap();
        draw_centered_text(&mut fb, "I", Point::new(32, 16), 2, 2, &palette).unwrap();

        let white = palette.pen(PEN_WHITE);
        let black = palette.pen(PEN_BLACK);
        assert!(fb.pixels().any(|c| c == white));
        assert!(fb.pixels().any(|c| c == black));
        // Corners untouched.
        assert_eq!(fb.pixel(0, 0), Some(palette.pen(2)));
        assert_eq!(fb.pixel(63, 31), Some(palette.pen(2)));
    }

    #[test]
    fn test_scaled_pixels_are_squares() {
        let mut fb = Framebuffer::<64, 32>::new();
        draw_scaled(&mut fb, "I", Point::new(10, 4), 3, Rgb565::WHITE).unwrap();
        for y in 0..32 {
            for x in 0..64 {
                if fb.pixel(x, y) == Some(Rgb565::WHITE) {
                    let (bx, by) = ((x - 10) / 3 * 3 + 10, (y - 4) / 3 * 3 + 4);
                    for dy in 0..3 {
                        for dx in 0..3 {
                            assert_eq!(fb.pixel(bx + dx, by + dy), Some(Rgb565::WHITE));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_qr_is_centered() {
        let qr = QrMatrix::encode("https://example.com").unwrap();
        let mut fb = Framebuffer::<120, 100>::new();
        draw_qr(&mut fb, &qr, Rgb565::WHITE, Rgb565::BLACK, 84).unwrap();

        let dot = 84 / qr.size();
        let side = dot * qr.size();
        let left = 60 - side / 2;
        let top = 50 - side / 2;
        // Finder pattern corner is dark, the plate edge just outside is clear.
        assert_eq!(fb.pixel(left, top), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(left - 1, top), Some(Rgb565::BLACK));
        // Separator ring around the finder pattern is paper.
        assert_eq!(fb.pixel(left + 7 * dot, top), Some(Rgb565::WHITE));
    }

    #[test]
    fn test_fps_label() {
        let mut fb = Framebuffer::<80, 12>::new();
        let palette = palette();
        draw_fps(&mut fb, 42, &palette).unwrap();
        assert!(fb.pixels().any(|c| c == palette.pen(PEN_WHITE)));
    }

    #[test]
    fn test_fps_label_widest_value() {
        let mut fb = Framebuffer::<96, 12>::new();
        let palette = palette();
        draw_fps(&mut fb, u32::MAX, &palette).unwrap();
        // Last glyph of "4294967295 fps" starts at column 13 * 6.
        let white = palette.pen(PEN_WHITE);
        let last_glyph = (0..12).any(|y| (78..84).any(|x| fb.pixel(x, y) == Some(white)));
        assert!(last_glyph);
    }
}
