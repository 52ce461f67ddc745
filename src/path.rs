use crate::error::SearchError;
use crate::grid::{CellId, CellState, Grid};
use crate::search::StepControl;
use std::collections::HashMap;

/// Cell -> the cell it was reached from on the best known route
pub type PredecessorMap = HashMap<CellId, CellId>;

/// A shortest path, ordered from start to end (both included)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<CellId>,
}

impl Path {
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }

    pub fn start(&self) -> CellId {
        self.cells[0]
    }

    pub fn end(&self) -> CellId {
        self.cells[self.cells.len() - 1]
    }

    /// Number of moves from start to end
    pub fn edge_count(&self) -> usize {
        self.cells.len() - 1
    }

    /// Cells strictly between start and end
    pub fn interior(&self) -> &[CellId] {
        if self.cells.len() < 2 {
            return &[];
        }
        &self.cells[1..self.cells.len() - 1]
    }

    pub fn contains(&self, cell: &CellId) -> bool {
        self.cells.contains(cell)
    }
}

/// Walk predecessors back from `end` until a cell without one (the start).
///
/// Only meaningful after a successful search; a map with a cycle would
/// never terminate.
pub fn trace(predecessors: &PredecessorMap, end: CellId) -> Path {
    let mut cells = vec![end];
    let mut current = end;
    while let Some(&previous) = predecessors.get(&current) {
        cells.push(previous);
        current = previous;
    }
    cells.reverse();
    Path { cells }
}

/// Marks a path's interior cells one at a time, end side first
#[derive(Debug, Clone)]
pub struct PathMarker {
    path: Path,
    remaining: Vec<CellId>,
}

impl PathMarker {
    pub fn new(path: Path) -> Self {
        let remaining = path.interior().to_vec();
        PathMarker { path, remaining }
    }

    /// Mark the next cell as [`CellState::Path`], `None` once all are marked
    pub fn mark_next(&mut self, grid: &mut Grid) -> Option<CellId> {
        let cell = self.remaining.pop()?;
        grid.mark(cell, CellState::Path);
        Some(cell)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }
}

/// Trace the path and mark every interior cell as [`CellState::Path`],
/// walking from the end back toward the start. `on_step` runs after each mark.
pub fn reconstruct<F>(
    grid: &mut Grid,
    predecessors: &PredecessorMap,
    end: CellId,
    mut on_step: F,
) -> Result<Path, SearchError>
where
    F: FnMut(&Grid) -> StepControl,
{
    let mut marker = PathMarker::new(trace(predecessors, end));
    while marker.mark_next(grid).is_some() {
        if on_step(grid) == StepControl::Abort {
            return Err(SearchError::Aborted);
        }
    }
    Ok(marker.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(cells: &[CellId]) -> PredecessorMap {
        cells.windows(2).map(|pair| (pair[1], pair[0])).collect()
    }

    #[test]
    fn test_trace_orders_start_to_end() {
        let cells = [
            CellId::new(0, 0),
            CellId::new(1, 0),
            CellId::new(1, 1),
            CellId::new(1, 2),
        ];
        let path = trace(&chain(&cells), CellId::new(1, 2));
        assert_eq!(path.cells(), &cells);
        assert_eq!(path.start(), CellId::new(0, 0));
        assert_eq!(path.end(), CellId::new(1, 2));
        assert_eq!(path.edge_count(), 3);
        assert_eq!(path.interior(), &cells[1..3]);
    }

    #[test]
    fn test_reconstruct_marks_interior_only() {
        let cells = [
            CellId::new(0, 0),
            CellId::new(0, 1),
            CellId::new(0, 2),
            CellId::new(1, 2),
        ];
        let mut grid = Grid::build(3);
        grid.mark(cells[0], CellState::Start);
        grid.mark(cells[3], CellState::End);

        let mut marked = Vec::new();
        let path = reconstruct(&mut grid, &chain(&cells), cells[3], |grid| {
            let newest = grid
                .cells()
                .filter(|cell| cell.state == CellState::Path)
                .count();
            marked.push(newest);
            StepControl::Continue
        })
        .unwrap();

        assert_eq!(path.edge_count(), 3);
        assert_eq!(marked, vec![1, 2]);
        assert_eq!(grid.state(cells[0]), CellState::Start);
        assert_eq!(grid.state(cells[1]), CellState::Path);
        assert_eq!(grid.state(cells[2]), CellState::Path);
        assert_eq!(grid.state(cells[3]), CellState::End);
    }

    #[test]
    fn test_reconstruct_marks_from_end_side_first() {
        let cells = [CellId::new(0, 0), CellId::new(0, 1), CellId::new(0, 2), CellId::new(0, 3)];
        let mut grid = Grid::build(4);
        let mut order = Vec::new();
        reconstruct(&mut grid, &chain(&cells), cells[3], |grid| {
            order.push(grid.state(cells[1]) == CellState::Path);
            StepControl::Continue
        })
        .unwrap();
        // (0,2) is marked before (0,1)
        assert_eq!(order, vec![false, true]);
    }

    #[test]
    fn test_reconstruct_abort() {
        let cells = [CellId::new(0, 0), CellId::new(0, 1), CellId::new(0, 2), CellId::new(0, 3)];
        let mut grid = Grid::build(4);
        let result = reconstruct(&mut grid, &chain(&cells), cells[3], |_| StepControl::Abort);
        assert_eq!(result, Err(SearchError::Aborted));
        assert_eq!(grid.state(cells[1]), CellState::Free);
    }
}
