//! Wavy pride flag name badge.
//!
//! Shows an animated flag with a name and subtitle on top, dimming the
//! backlight to the room's light.
//!
//! Buttons:
//! - A: stop / start the animation
//! - Right: step the stopped animation by one frame
//! - Up / Down: next / previous flag
//! - B: show the QR code instead of the name
//! - Start: show the frame rate
//!
//! Settings come from `config.json` next to `Cargo.toml`, embedded at build
//! time:
//!
//! ```sh
//! cargo run --release -p pride-badge
//! ```

#![no_std]
#![no_main]

use defmt::{
    debug,
    info,
    warn,
};
use embassy_executor::Spawner;
use embassy_time::Instant;
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use pride_badge::{
    Backlight,
    Buttons,
    Display,
    EmbeddedFiles,
    LightSensor,
    PANEL_HEIGHT,
    PANEL_WIDTH,
    split_resources,
};
use pride_core::{
    App,
    Framebuffer,
    backlight::backlight_level,
};
use static_cell::ConstStaticCell;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

type Frame = Framebuffer<PANEL_WIDTH, PANEL_HEIGHT>;

/// How often the frame rate is logged.
const FPS_LOG_INTERVAL_MS: u64 = 5_000;

static FRAME: ConstStaticCell<Frame> = ConstStaticCell::new(Frame::new());

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = pride_badge::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let mut app = match App::start(&EmbeddedFiles) {
        Ok(app) => app,
        Err(e) => defmt::panic!("Startup failed: {}", e),
    };
    if app.config().unknown_flag {
        warn!("Unknown default_flag in config, using {}", app.variant().id);
    }
    info!("Config loaded, flag {}", app.variant().id);

    let mut display = match Display::try_from(resources.display) {
        Ok(display) => display,
        Err(e) => defmt::panic!("Display init failed: {}", e),
    };
    let mut backlight = match Backlight::try_from(resources.backlight) {
        Ok(backlight) => backlight,
        Err(e) => defmt::panic!("Backlight init failed: {}", e),
    };
    let buttons: Buttons = resources.buttons.into();
    let mut light: LightSensor = resources.light.into();
    let frame = FRAME.take();

    info!("Render loop started");
    let mut fps_logged_at = 0;

    loop {
        let now = Instant::now().as_millis();
        let changes = app.update(buttons.levels(), now);
        if changes.mode {
            debug!("Animation {}", app.mode());
        }
        if changes.flag {
            debug!("Flag {}", app.variant().id);
        }
        if now.saturating_sub(fps_logged_at) >= FPS_LOG_INTERVAL_MS {
            debug!("{} fps", app.fps());
            fps_logged_at = now;
        }

        let Ok(()) = app.draw(frame);
        if let Err(e) = frame.present(&mut display) {
            defmt::panic!("Display transfer failed: {}", defmt::Debug2Format(&e));
        }

        let level = match light.read_u16() {
            Ok(raw) => backlight_level(raw),
            Err(e) => defmt::panic!("Light sensor failed: {}", e),
        };
        if let Err(e) = backlight.set_level(level) {
            defmt::panic!("Backlight failed: {}", e);
        }

        embassy_futures::yield_now().await;
    }
}
