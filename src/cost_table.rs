use crate::grid::CellId;
use crate::heuristic::manhattan;

/// Score of a cell that has not been reached yet
pub const UNREACHED: u32 = u32::MAX;

/// Best known g-score (cost from start) and f-score (g + heuristic) per cell.
///
/// Scores only ever go down during a run.
#[derive(Debug, Clone)]
pub struct CostTable {
    size: usize,
    g: Vec<u32>,
    f: Vec<u32>,
}

impl CostTable {
    /// Every cell unreached except `start`, which gets g = 0 and f = h(start, end)
    pub fn new(size: usize, start: CellId, end: CellId) -> Self {
        let mut table = CostTable {
            size,
            g: vec![UNREACHED; size * size],
            f: vec![UNREACHED; size * size],
        };
        let index = table.index(start);
        table.g[index] = 0;
        table.f[index] = manhattan(start, end);
        table
    }

    fn index(&self, id: CellId) -> usize {
        id.row * self.size + id.col
    }

    /// Raw g-score, [`UNREACHED`] if the cell has not been reached
    pub fn raw_g(&self, id: CellId) -> u32 {
        self.g[self.index(id)]
    }

    pub fn g_score(&self, id: CellId) -> Option<u32> {
        Some(self.raw_g(id)).filter(|&g| g != UNREACHED)
    }

    pub fn f_score(&self, id: CellId) -> Option<u32> {
        Some(self.f[self.index(id)]).filter(|&f| f != UNREACHED)
    }

    /// Record `g`/`f` for `id` if `g` beats the current g-score.
    /// Returns whether the table changed.
    pub fn relax(&mut self, id: CellId, g: u32, f: u32) -> bool {
        let index = self.index(id);
        if g < self.g[index] {
            self.g[index] = g;
            self.f[index] = f;
            true
        } else {
            false
        }
    }

    /// Number of cells with a finite g-score
    pub fn reached_count(&self) -> usize {
        self.g.iter().filter(|&&g| g != UNREACHED).count()
    }
}
