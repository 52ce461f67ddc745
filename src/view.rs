use crate::grid::CellId;

/// Pixel geometry of a square grid drawn from the window's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridView {
    rows: usize,
    cell_px: usize,
}

impl GridView {
    /// Cells are `width_px / rows` pixels wide (integer division)
    pub fn new(rows: usize, width_px: usize) -> Self {
        GridView {
            rows,
            cell_px: (width_px / rows.max(1)).max(1),
        }
    }

    pub fn cell_px(&self) -> usize {
        self.cell_px
    }

    /// Drawn extent of the grid in pixels
    pub fn extent_px(&self) -> usize {
        self.rows * self.cell_px
    }

    /// Cell under a pointer position, `None` outside the grid
    pub fn cell_at(&self, x: f32, y: f32) -> Option<CellId> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let row = y as usize / self.cell_px;
        let col = x as usize / self.cell_px;
        if row < self.rows && col < self.rows {
            Some(CellId::new(row, col))
        } else {
            None
        }
    }

    /// Top-left pixel of a cell
    pub fn cell_origin(&self, id: CellId) -> (f32, f32) {
        (
            (id.col * self.cell_px) as f32,
            (id.row * self.cell_px) as f32,
        )
    }
}
