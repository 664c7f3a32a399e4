//! # pride-badge
//!
//! Board support for the wavy pride flag firmware on the Disobey 2026 badge.
//!
//! Wraps the peripherals the flag needs:
//! - **Display**: 320×170 ST7789 LCD over SPI with DMA
//! - **Buttons**: D-pad up/down/right, A, B and Start, sampled per frame
//! - **Backlight**: LEDC PWM dimming
//! - **Light sensor**: ambient light on ADC1
//! - **Files**: `config.json` embedded at build time
//!
//! ```rust,ignore
//! let peripherals = pride_badge::init();
//! let resources = pride_badge::split_resources!(peripherals);
//!
//! let display = pride_badge::Display::try_from(resources.display)?;
//! let buttons: pride_badge::Buttons = resources.buttons.into();
//! ```

#![no_std]

mod backlight;
mod buttons;
mod display;
mod files;
mod light_sensor;

pub use backlight::{
    Backlight,
    BacklightError,
};
pub use buttons::Buttons;
pub use display::{
    Display,
    DisplayError,
    PANEL_HEIGHT,
    PANEL_WIDTH,
};
use esp_hal::{
    assign_resources,
    clock::{
        Clock,
        CpuClock,
    },
    rom,
};
pub use files::EmbeddedFiles;
pub use light_sensor::{
    LightSensor,
    LightSensorError,
};

/// StaticCell helper — allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
            ledc: LEDC,
        },
        buttons: ButtonResources<'d> {
            up: GPIO11,
            down: GPIO1,
            right: GPIO2,
            a: GPIO13,
            b: GPIO38,
            start: GPIO12,
        },
        light: LightSensorResources<'d> {
            power: GPIO9,
            sense: GPIO10,
            adc: ADC1,
        }
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Minimal CPU clock switcher for ESP32-S3.
///
/// Steps through an intermediate frequency before reaching the target,
/// which is required by the hardware.
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                CpuClock::_80MHz => 0,
                CpuClock::_160MHz => 1,
                CpuClock::_240MHz => 2,
                _ => panic!("Unsupported CPU clock speed"),
            })
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Bring the CPU up to full speed and return the raw peripheral set.
///
/// Call once at the top of `main`, then split with [`split_resources!`].
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}
