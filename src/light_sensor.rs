//! Ambient light sensor on ADC1.
//!
//! A phototransistor divider, powered from its own GPIO so it can be switched
//! off, feeds GPIO10. Readings are widened to 16 bits.

use esp_hal::{
    Blocking,
    analog::adc::{
        Adc,
        AdcConfig,
        AdcPin,
        Attenuation,
    },
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    peripherals::{
        ADC1,
        GPIO10,
    },
};
use pride_core::backlight::widen_12bit;

use crate::LightSensorResources;

/// ADC conversion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct LightSensorError;

pub struct LightSensor {
    adc: Adc<'static, ADC1<'static>, Blocking>,
    pin: AdcPin<GPIO10<'static>, ADC1<'static>>,
    _power: Output<'static>,
}

impl From<LightSensorResources<'static>> for LightSensor {
    fn from(res: LightSensorResources<'static>) -> Self {
        let power = Output::new(res.power, Level::High, OutputConfig::default());
        let mut config = AdcConfig::new();
        let pin = config.enable_pin(res.sense, Attenuation::_11dB);
        Self {
            adc: Adc::new(res.adc, config),
            pin,
            _power: power,
        }
    }
}

impl LightSensor {
    /// One blocking conversion, scaled to `0..=0xfff0`.
    pub fn read_u16(&mut self) -> Result<u16, LightSensorError> {
        let raw = nb::block!(self.adc.read_oneshot(&mut self.pin)).map_err(|_| LightSensorError)?;
        Ok(widen_12bit(raw))
    }
}
