//! Application context: everything the render loop owns between frames.
//!
//! The firmware builds one [`App`] at startup, then for every frame feeds it
//! the button levels and the current time with [`App::update`] and lets it
//! paint the frame with [`App::draw`].

use core::fmt;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
};

use crate::{
    clock::FrameClock,
    config::{
        CONFIG_PATH,
        Config,
        ConfigError,
        ConfigSource,
    },
    controller::{
        Changes,
        Controller,
        Mode,
    },
    controls::{
        ButtonLevels,
        ControlPad,
    },
    flag::{
        FlagGeometry,
        draw_flag,
    },
    overlay::{
        draw_centered_text,
        draw_fps,
        draw_qr,
        fit_scale,
    },
    qr::{
        PayloadTooLong,
        QrMatrix,
    },
    variant::{
        self,
        FlagVariant,
        PEN_BLACK,
        PEN_WHITE,
        Palette,
        VARIANTS,
    },
    wave::{
        COLS,
        OffsetTable,
    },
};

const TITLE_MAX_SCALE: u32 = 10;
const TITLE_SHADOW: i32 = 5;
const TITLE_RISE: i32 = 10;
const SUBTITLE_SCALE: u32 = 3;
const SUBTITLE_SHADOW: i32 = 2;
const SUBTITLE_DROP: i32 = 40;
/// Horizontal space kept free on each side of the title.
const TEXT_MARGIN: u32 = 10;
const QR_MAX_WIDTH: u32 = 200;

/// Errors that stop the badge before the first frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    Config(ConfigError),
    Qr(PayloadTooLong),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "config: {e}"),
            StartupError::Qr(e) => write!(f, "qrcode: {e}"),
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        StartupError::Config(e)
    }
}

impl From<PayloadTooLong> for StartupError {
    fn from(e: PayloadTooLong) -> Self {
        StartupError::Qr(e)
    }
}

pub struct App {
    config: Config,
    qr: QrMatrix,
    pad: ControlPad,
    controller: Controller,
    palette: Palette,
    offsets: OffsetTable<{ COLS + 1 }>,
    clock: FrameClock,
    fps: u32,
}

impl App {
    /// Load the configuration from `source` and build the context.
    pub fn start<S: ConfigSource + ?Sized>(source: &S) -> Result<Self, StartupError> {
        let config = Config::load(source, CONFIG_PATH)?;
        Self::new(config)
    }

    pub fn new(config: Config) -> Result<Self, StartupError> {
        let qr = QrMatrix::encode(&config.qr_payload)?;
        let controller = Controller::new(config.flag_index, VARIANTS.len());
        let palette = Palette::from_variant(variant::by_index(controller.flag_index));
        let mut offsets = OffsetTable::new();
        offsets.update(controller.tick());
        Ok(Self {
            config,
            qr,
            pad: ControlPad::new(),
            controller,
            palette,
            offsets,
            clock: FrameClock::new(),
            fps: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn variant(&self) -> &'static FlagVariant {
        variant::by_index(self.controller.flag_index)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Last measured frame rate.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Advance one frame: handle the buttons, move the animation and
    /// recompute the wave.
    pub fn update(&mut self, levels: ButtonLevels, now_ms: u64) -> Changes {
        let frame = self.clock.tick(now_ms);
        self.fps = frame.fps;

        let controls = self.pad.poll(levels, now_ms);
        let changes = self.controller.apply(&controls, frame.elapsed_ms);
        if changes.flag {
            self.config.flag_index = self.controller.flag_index;
            self.palette = Palette::from_variant(self.variant());
        }
        self.offsets.update(self.controller.tick());
        changes
    }

    /// Paint the whole frame.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let bounds = target.bounding_box();
        let center = bounds.center();
        target.clear(self.palette.pen(PEN_BLACK))?;

        let variant = self.variant();
        draw_flag(
            target,
            self.offsets.as_slice(),
            variant.strips,
            variant.strip_height(),
            FlagGeometry::for_display(bounds.size, self.offsets.columns()),
            &self.palette,
        )?;

        if self.controller.show_qr {
            let width = QR_MAX_WIDTH.min(bounds.size.height).min(bounds.size.width);
            draw_qr(
                target,
                &self.qr,
                self.palette.pen(PEN_WHITE),
                self.palette.pen(PEN_BLACK),
                width,
            )?;
        } else {
            let available = bounds.size.width.saturating_sub(2 * TEXT_MARGIN);
            let title_scale = fit_scale(&self.config.title, available, TITLE_MAX_SCALE);
            draw_centered_text(
                target,
                &self.config.title,
                center - Point::new(0, TITLE_RISE),
                title_scale,
                TITLE_SHADOW,
                &self.palette,
            )?;
            draw_centered_text(
                target,
                &self.config.subtitle,
                center + Point::new(0, SUBTITLE_DROP),
                SUBTITLE_SCALE,
                SUBTITLE_SHADOW,
                &self.palette,
            )?;
        }

        if self.controller.show_fps {
            draw_fps(target, self.fps, &self.palette)?;
        }
        Ok(())
    }
}
