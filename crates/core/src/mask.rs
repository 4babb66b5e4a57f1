//! Fixed 16×16 masks painted by the pattern animator.

use crate::{HEIGHT, WIDTH};

/// A single mask cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskCell {
    /// Background, painted black.
    Off,
    /// Edge, painted with half of the color intensity.
    Half,
    /// Fill, painted with the full color.
    Full,
}

impl MaskCell {
    /// Returns the intensity factor applied to the color of this cell.
    #[must_use]
    pub fn intensity(self) -> f32 {
        match self {
            Self::Off => 0.0,
            Self::Half => 0.5,
            Self::Full => 1.0,
        }
    }
}

/// A grid of cells indexed as `[x][y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskGrid([[u8; HEIGHT]; WIDTH]);

impl MaskGrid {
    /// Creates a mask from the raw cell values: `0` is off, `1` is half, `2` is full.
    ///
    /// Any other value is treated as a full cell.
    #[must_use]
    pub const fn new(cells: [[u8; HEIGHT]; WIDTH]) -> Self {
        Self(cells)
    }

    /// Returns the cell at the given position, or `None` if it is out of the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<MaskCell> {
        let value = *self.0.get(x)?.get(y)?;
        Some(match value {
            0 => MaskCell::Off,
            1 => MaskCell::Half,
            _ => MaskCell::Full,
        })
    }

    #[must_use]
    pub fn is_mirror_symmetric(&self) -> bool {
        (0..WIDTH).all(|x| {
            (0..HEIGHT).all(|y| {
                let cell = self.0[x][y];
                cell == self.0[WIDTH - 1 - x][y] && cell == self.0[x][HEIGHT - 1 - y]
            })
        })
    }
}

/// A rectangle with rounded corners covering the whole matrix.
pub const ROUND_RECT: MaskGrid = MaskGrid::new(round_rect_cells());

const fn round_rect_cells() -> [[u8; HEIGHT]; WIDTH] {
    let mut cells = [[2_u8; HEIGHT]; WIDTH];
    let (last_x, last_y) = (WIDTH - 1, HEIGHT - 1);
    // Corners
    cells[0][0] = 0;
    cells[0][last_y] = 0;
    cells[last_x][0] = 0;
    cells[last_x][last_y] = 0;
    // Edges next to the corners
    cells[0][1] = 1;
    cells[1][0] = 1;
    cells[0][last_y - 1] = 1;
    cells[1][last_y] = 1;
    cells[last_x][1] = 1;
    cells[last_x - 1][0] = 1;
    cells[last_x][last_y - 1] = 1;
    cells[last_x - 1][last_y] = 1;
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_rect_is_symmetric() {
        assert!(ROUND_RECT.is_mirror_symmetric());
    }

    #[test]
    fn test_round_rect_corners() {
        assert_eq!(ROUND_RECT.cell(0, 0), Some(MaskCell::Off));
        assert_eq!(ROUND_RECT.cell(15, 15), Some(MaskCell::Off));
        assert_eq!(ROUND_RECT.cell(0, 1), Some(MaskCell::Half));
        assert_eq!(ROUND_RECT.cell(14, 15), Some(MaskCell::Half));
        assert_eq!(ROUND_RECT.cell(1, 1), Some(MaskCell::Full));
        assert_eq!(ROUND_RECT.cell(7, 0), Some(MaskCell::Full));
        assert_eq!(ROUND_RECT.cell(16, 0), None);
    }

    #[test]
    fn test_round_rect_cell_counts() {
        let cells: Vec<_> = (0..WIDTH)
            .flat_map(|x| (0..HEIGHT).map(move |y| (x, y)))
            .filter_map(|(x, y)| ROUND_RECT.cell(x, y))
            .collect();
        let count = |kind| cells.iter().filter(|&&c| c == kind).count();

        assert_eq!(count(MaskCell::Off), 4);
        assert_eq!(count(MaskCell::Half), 8);
        assert_eq!(count(MaskCell::Full), WIDTH * HEIGHT - 12);
    }

    #[test]
    fn test_asymmetric_mask() {
        let mut cells = [[2_u8; HEIGHT]; WIDTH];
        cells[0][3] = 0;
        assert!(!MaskGrid::new(cells).is_mirror_symmetric());
    }
}
