//! ST7789 panel: 320×170 LCD over SPI with DMA.

use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::master::Spi,
    time::Rate,
};

use crate::DisplayResources;

/// Panel width in pixels, landscape.
pub const PANEL_WIDTH: usize = 320;
/// Panel height in pixels, landscape.
pub const PANEL_HEIGHT: usize = 170;

/// Bytes staged per SPI transfer.
const TRANSFER_BUFFER: usize = 32000;

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<esp_hal::spi::master::SpiDmaBus<'a, Async>, Output<'a>, esp_hal::delay::Delay>,
    Output<'a>,
>;

/// The badge panel, drawn on through `embedded-graphics`.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, mipidsi::models::ST7789, Output<'a>>;

/// Panel bring-up failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum DisplayError {
    /// DMA descriptors could not be set up
    Dma,
    /// SPI bus rejected its configuration
    Spi,
    /// Chip select could not be driven
    ChipSelect,
    /// Controller did not accept the init sequence
    Panel,
}

impl<'a> TryFrom<DisplayResources<'a>> for Display<'a> {
    type Error = DisplayError;

    fn try_from(res: DisplayResources<'a>) -> Result<Self, Self::Error> {
        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(TRANSFER_BUFFER);
        let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).map_err(|_| DisplayError::Dma)?;
        let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).map_err(|_| DisplayError::Dma)?;

        let mut delay = esp_hal::delay::Delay::new();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
        rst.set_high();

        let spi = Spi::new(
            res.spi,
            esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
        )
        .map_err(|_| DisplayError::Spi)?
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_miso(res.miso)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

        let cs = Output::new(res.cs, Level::High, OutputConfig::default());
        let spi_device = ExclusiveDevice::new(spi, cs, delay).map_err(|_| DisplayError::ChipSelect)?;

        let buffer = crate::mk_static!([u8; TRANSFER_BUFFER], [0_u8; TRANSFER_BUFFER]);
        let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        mipidsi::Builder::new(mipidsi::models::ST7789, di)
            .reset_pin(rst)
            .display_size(PANEL_HEIGHT as u16, PANEL_WIDTH as u16)
            .invert_colors(mipidsi::options::ColorInversion::Inverted)
            .orientation(
                mipidsi::options::Orientation::new().rotate(mipidsi::options::Rotation::Deg90),
            )
            .display_offset(35, 0)
            .init(&mut delay)
            .map_err(|_| DisplayError::Panel)
    }
}
