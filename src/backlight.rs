//! Dimmable display backlight on an LEDC PWM channel.

use esp_hal::{
    gpio::DriveMode,
    ledc::{
        LSGlobalClkSource,
        Ledc,
        LowSpeed,
        channel::{
            self,
            ChannelIFace,
        },
        timer::{
            self,
            TimerIFace,
        },
    },
    time::Rate,
};
use pride_core::backlight::duty_percent;

use crate::BacklightResources;

const PWM_FREQUENCY_KHZ: u32 = 24;

/// Backlight PWM failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum BacklightError {
    Timer,
    Channel,
    Duty,
}

/// Controls the display backlight brightness.
pub struct Backlight {
    channel: channel::Channel<'static, LowSpeed>,
}

impl TryFrom<BacklightResources<'static>> for Backlight {
    type Error = BacklightError;

    fn try_from(res: BacklightResources<'static>) -> Result<Self, Self::Error> {
        let ledc = crate::mk_static!(Ledc<'static>, Ledc::new(res.ledc));
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

        let pwm_timer = crate::mk_static!(
            timer::Timer<'static, LowSpeed>,
            ledc.timer::<LowSpeed>(timer::Number::Timer0)
        );
        pwm_timer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty8Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_khz(PWM_FREQUENCY_KHZ),
            })
            .map_err(|_| BacklightError::Timer)?;
        let pwm_timer: &'static timer::Timer<'static, LowSpeed> = pwm_timer;

        let mut channel = ledc.channel(channel::Number::Channel0, res.led);
        // Full brightness until the first light reading arrives.
        channel
            .configure(channel::config::Config {
                timer: pwm_timer,
                duty_pct: 100,
                drive_mode: DriveMode::PushPull,
            })
            .map_err(|_| BacklightError::Channel)?;

        Ok(Self { channel })
    }
}

impl Backlight {
    /// Set brightness, `0.0` off to `1.0` full.
    pub fn set_level(&mut self, level: f32) -> Result<(), BacklightError> {
        self.channel
            .set_duty(duty_percent(level))
            .map_err(|_| BacklightError::Duty)
    }
}
