//! Matrix simulator for the terminal.

use std::io::Write;

use hatlight_core::{display::Frame, Display, Error, Framebuffer, Result, HEIGHT};

/// Renders every committed frame as a block of colored cells.
///
/// Each frame row is printed as a terminal line. After the first frame the cursor moves
/// back up, so the matrix is redrawn in place.
pub struct TerminalDisplay<W: Write> {
    framebuffer: Framebuffer,
    out: W,
    drawn: bool,
}

impl TerminalDisplay<std::io::Stdout> {
    /// Creates a simulator that writes to the standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            framebuffer: Framebuffer::new(),
            out,
            drawn: false,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, frame: &Frame) -> String {
        let mut text = String::new();
        if self.drawn {
            text.push_str(&format!("\x1b[{HEIGHT}A"));
        }
        for row in frame {
            for pixel in row {
                text.push_str(&format!("\x1b[38;2;{};{};{}m██", pixel.r, pixel.g, pixel.b));
            }
            text.push_str("\x1b[0m\n");
        }
        text
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    fn show(&mut self) -> Result<()> {
        let text = self.render(&self.framebuffer.rendered());
        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(Error::device)?;
        self.drawn = true;
        Ok(())
    }
}
