//! Flag variants: palette and strip colour table.
//!
//! Every variant owns a small indexed palette (at most 16 pens, like a 4-bit
//! panel mode). Pen 0 is always black and pen 1 always white so overlays can
//! draw with the same pens whichever flag is active. Strips refer to pens by
//! index, a main colour and a darker shade for the wave's shadowed faces.
//!
//! Adding a flag means adding an entry to [`VARIANTS`]; nothing in the
//! renderer names a specific variant.

use embedded_graphics::pixelcolor::{
    Rgb565,
    Rgb888,
};
use palette::Srgb;

/// Total height of the striped band in pixels.
pub const BAND_HEIGHT: u32 = 180;

/// Maximum palette size.
pub const MAX_PENS: usize = 16;

/// Background / shadow pen.
pub const PEN_BLACK: u8 = 0;
/// Foreground text pen.
pub const PEN_WHITE: u8 = 1;

/// Main and shaded pen for one strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripColors {
    pub main: u8,
    pub shade: u8,
}

impl StripColors {
    pub const fn new(main: u8, shade: u8) -> Self {
        Self { main, shade }
    }
}

/// A named flag colour scheme.
#[derive(Debug)]
pub struct FlagVariant {
    pub id: &'static str,
    pub palette: &'static [Srgb<u8>],
    pub strips: &'static [StripColors],
}

impl FlagVariant {
    /// Height of one strip; any remainder of the band is left uncovered.
    pub const fn strip_height(&self) -> u32 {
        BAND_HEIGHT / self.strips.len() as u32
    }
}

const PAN: FlagVariant = FlagVariant {
    id: "pan",
    palette: &[
        Srgb::new(0, 0, 0),
        Srgb::new(255, 255, 255),
        Srgb::new(226, 28, 208), // magenta
        Srgb::new(181, 44, 169),
        Srgb::new(255, 245, 39), // yellow
        Srgb::new(218, 211, 58),
        Srgb::new(42, 195, 255), // cyan
        Srgb::new(55, 169, 214),
    ],
    strips: &[
        StripColors::new(2, 3),
        StripColors::new(4, 5),
        StripColors::new(6, 7),
    ],
};

const PRIDE: FlagVariant = FlagVariant {
    id: "pride",
    palette: &[
        Srgb::new(0, 0, 0),
        Srgb::new(255, 255, 255),
        Srgb::new(234, 53, 53), // red
        Srgb::new(202, 21, 21),
        Srgb::new(234, 158, 53), // orange
        Srgb::new(202, 127, 21),
        Srgb::new(234, 209, 53), // yellow
        Srgb::new(202, 178, 21),
        Srgb::new(53, 234, 56), // green
        Srgb::new(21, 202, 25),
        Srgb::new(24, 69, 166), // blue
        Srgb::new(26, 61, 137),
        Srgb::new(115, 31, 179), // purple
        Srgb::new(98, 37, 144),
    ],
    strips: &[
        StripColors::new(2, 3),
        StripColors::new(4, 5),
        StripColors::new(6, 7),
        StripColors::new(8, 9),
        StripColors::new(10, 11),
        StripColors::new(12, 13),
    ],
};

const TRANS: FlagVariant = FlagVariant {
    id: "trans",
    palette: &[
        Srgb::new(0, 0, 0),
        Srgb::new(255, 255, 255),
        Srgb::new(91, 206, 250), // blue
        Srgb::new(64, 170, 212),
        Srgb::new(245, 169, 184), // pink
        Srgb::new(209, 136, 151),
        Srgb::new(250, 250, 250), // white stripe
        Srgb::new(205, 205, 210),
    ],
    strips: &[
        StripColors::new(2, 3),
        StripColors::new(4, 5),
        StripColors::new(6, 7),
        StripColors::new(4, 5),
        StripColors::new(2, 3),
    ],
};

/// All known flags, in button-cycling order.
pub static VARIANTS: [FlagVariant; 3] = [PAN, PRIDE, TRANS];

/// Look up a variant by id.
pub fn find(id: &str) -> Option<usize> {
    VARIANTS.iter().position(|v| v.id == id)
}

/// Strip pens and strip height for the named variant.
pub fn strips_for(id: &str) -> Option<(&'static [StripColors], u32)> {
    find(id).map(|i| {
        let variant = &VARIANTS[i];
        (variant.strips, variant.strip_height())
    })
}

/// Variant at `index`, wrapping out-of-range indices back into the table.
pub fn by_index(index: usize) -> &'static FlagVariant {
    &VARIANTS[index % VARIANTS.len()]
}

/// A variant's palette resolved to display colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pens: [Rgb565; MAX_PENS],
}

impl Palette {
    pub fn from_variant(variant: &FlagVariant) -> Self {
        let mut pens = [Rgb565::new(0, 0, 0); MAX_PENS];
        for (pen, color) in pens.iter_mut().zip(variant.palette) {
            *pen = Rgb565::from(Rgb888::new(color.red, color.green, color.blue));
        }
        Self { pens }
    }

    /// Colour for a pen index; unknown pens draw black.
    pub fn pen(&self, index: u8) -> Rgb565 {
        self.pens
            .get(usize::from(index))
            .copied()
            .unwrap_or(Rgb565::new(0, 0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::RgbColor;

    #[test]
    fn test_pan_strips() {
        let (strips, height) = strips_for("pan").unwrap();
        assert_eq!(strips.len(), 3);
        assert_eq!(height, 60);
    }

    #[test]
    fn test_pride_strips() {
        let (strips, height) = strips_for("pride").unwrap();
        assert_eq!(strips.len(), 6);
        assert_eq!(height, 30);
    }

    #[test]
    fn test_unknown_variant() {
        assert!(strips_for("nope").is_none());
        assert_eq!(find("nope"), None);
    }

    #[test]
    fn test_table_invariants() {
        for variant in &VARIANTS {
            assert!(!variant.strips.is_empty(), "{} has no strips", variant.id);
            assert!(variant.palette.len() <= MAX_PENS);
            assert_eq!(variant.palette[0], Srgb::new(0, 0, 0));
            assert_eq!(variant.palette[1], Srgb::new(255, 255, 255));
            for strip in variant.strips {
                assert!(usize::from(strip.main) < variant.palette.len());
                assert!(usize::from(strip.shade) < variant.palette.len());
            }
            assert!(variant.strip_height() * variant.strips.len() as u32 <= BAND_HEIGHT);
        }
    }

    #[test]
    fn test_palette_pens() {
        let palette = Palette::from_variant(&VARIANTS[0]);
        assert_eq!(palette.pen(PEN_BLACK), Rgb565::BLACK);
        assert_eq!(palette.pen(PEN_WHITE), Rgb565::WHITE);
        assert_eq!(palette.pen(15), Rgb565::BLACK);
        assert_eq!(palette.pen(200), Rgb565::BLACK);
        assert_ne!(palette.pen(2), palette.pen(3));
    }

    #[test]
    fn test_by_index_wraps() {
        assert_eq!(by_index(0).id, "pan");
        assert_eq!(by_index(VARIANTS.len()).id, "pan");
    }
}
