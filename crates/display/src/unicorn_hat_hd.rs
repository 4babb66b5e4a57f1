//! Pimoroni Unicorn HAT HD driver.

use std::{io::Write, path::Path};

use hatlight_core::{Display, Error, Framebuffer, Result, HEIGHT, WIDTH};
use spidev::{SpiModeFlags, Spidev, SpidevOptions};

/// Start of frame marker.
const SOF: u8 = 0x72;
/// Maximum SPI clock supported by the matrix controller.
const SPI_SPEED_HZ: u32 = 9_000_000;
/// Default SPI device on the Raspberry Pi.
pub const DEFAULT_SPI_DEVICE: &str = "/dev/spidev0.0";

/// Unicorn HAT HD attached to a Linux SPI device.
pub struct UnicornHatHd {
    framebuffer: Framebuffer,
    spi: Spidev,
}

impl UnicornHatHd {
    /// Opens the given SPI device, use [`DEFAULT_SPI_DEVICE`] on a Raspberry Pi.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let spi = Spidev::open(path).map_err(Error::device)?;
        log::info!("Opened Unicorn HAT HD on {}", path.display());
        Ok(Self {
            framebuffer: Framebuffer::new(),
            spi,
        })
    }
}

impl Display for UnicornHatHd {
    fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    fn setup(&mut self) -> Result<()> {
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(SPI_SPEED_HZ)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        self.spi.configure(&options).map_err(Error::device)
    }

    fn show(&mut self) -> Result<()> {
        let frame = self.framebuffer.rendered();

        let mut buf = Vec::with_capacity(1 + WIDTH * HEIGHT * 3);
        buf.push(SOF);
        buf.extend(crate::frame_bytes(&frame));
        self.spi.write_all(&buf).map_err(Error::device)
    }
}
