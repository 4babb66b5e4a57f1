//! Test helpers

use smart_leds::RGB8;

use crate::{
    display::{Frame, Framebuffer},
    Display, Result,
};

/// In-memory display which keeps every committed frame.
#[derive(Debug, Default, Clone)]
pub struct MemoryDisplay {
    framebuffer: Framebuffer,
    /// Committed frames along with the brightness they have been committed with.
    pub frames: Vec<(f32, Frame)>,
    /// Total number of the `set_pixel` invocations.
    pub pixel_writes: usize,
}

impl MemoryDisplay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently committed frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last().map(|(_, frame)| frame)
    }

    /// Returns brightness values of all committed frames.
    #[must_use]
    pub fn brightness_history(&self) -> Vec<f32> {
        self.frames.iter().map(|(brightness, _)| *brightness).collect()
    }
}

impl Display for MemoryDisplay {
    fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    fn show(&mut self) -> Result<()> {
        let brightness = self.framebuffer.brightness();
        self.frames.push((brightness, self.framebuffer.rendered()));
        Ok(())
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: RGB8) {
        self.pixel_writes += 1;
        if !self.framebuffer.set_pixel(x, y, color) {
            log::warn!("Ignoring pixel ({x}, {y}) outside of the matrix");
        }
    }
}
