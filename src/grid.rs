use crate::error::LayoutError;
use std::fmt;

/// Identity of a cell: its row and column on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    pub fn new(row: usize, col: usize) -> Self {
        CellId { row, col }
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(&self, other: &CellId) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// What a cell currently is. Exactly one state is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Free,
    Barrier,
    Start,
    End,
    /// Discovered and waiting in the frontier
    Open,
    /// Fully expanded
    Closed,
    /// Part of the reconstructed shortest path
    Path,
}

impl CellState {
    /// Character used by the text layout format
    pub fn symbol(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::Path => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(CellState::Free),
            '#' => Some(CellState::Barrier),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            'o' => Some(CellState::Open),
            'x' => Some(CellState::Closed),
            '*' => Some(CellState::Path),
            _ => None,
        }
    }

    /// Marks left behind by a search run
    pub fn is_search_mark(self) -> bool {
        matches!(self, CellState::Open | CellState::Closed | CellState::Path)
    }
}

/// A single grid cell with its cached passable neighbors
#[derive(Debug, Clone)]
pub struct Cell {
    pub id: CellId,
    pub state: CellState,
    /// Passable neighbors in down, up, right, left order.
    /// Only valid right after [`Grid::refresh_neighbors`].
    neighbors: Vec<CellId>,
}

impl Cell {
    fn new(id: CellId) -> Self {
        Cell {
            id,
            state: CellState::Free,
            neighbors: Vec::new(),
        }
    }

    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }
}

/// Square grid of cells, stored row-major
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    /// Revision number - incremented whenever a cell state changes
    revision: u64,
}

impl Grid {
    /// Create a `size` x `size` grid with every cell free
    pub fn build(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(CellId::new(row, col)));
            }
        }
        Grid {
            size,
            cells,
            revision: 0,
        }
    }

    /// Create a grid with the given cells already marked as barriers
    pub fn with_barriers(size: usize, barriers: &[CellId]) -> Self {
        let mut grid = Self::build(size);
        for &id in barriers {
            grid.mark(id, CellState::Barrier);
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn contains_id(&self, id: CellId) -> bool {
        self.contains(id.row, id.col)
    }

    fn index(&self, id: CellId) -> usize {
        assert!(self.contains_id(id), "cell {} outside {}x{} grid", id, self.size, self.size);
        id.row * self.size + id.col
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[self.index(id)]
    }

    pub fn state(&self, id: CellId) -> CellState {
        self.cell(id).state
    }

    pub fn is_barrier(&self, id: CellId) -> bool {
        self.state(id) == CellState::Barrier
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Set a cell's state tag. Nothing else about the grid changes.
    pub fn mark(&mut self, id: CellId, state: CellState) {
        let index = self.index(id);
        let cell = &mut self.cells[index];
        if cell.state != state {
            cell.state = state;
            self.revision += 1;
        }
    }

    pub fn reset(&mut self, id: CellId) {
        self.mark(id, CellState::Free);
    }

    /// First cell (row-major) carrying `state`
    pub fn find(&self, state: CellState) -> Option<CellId> {
        self.cells.iter().find(|cell| cell.state == state).map(|cell| cell.id)
    }

    /// Turn open/closed/path marks back into free cells
    pub fn clear_search_marks(&mut self) {
        let marked: Vec<CellId> = self
            .cells
            .iter()
            .filter(|cell| cell.state.is_search_mark())
            .map(|cell| cell.id)
            .collect();
        for id in marked {
            self.reset(id);
        }
    }

    /// Passable in-bounds neighbors of `id`, in down, up, right, left order
    pub fn compute_neighbors(&self, id: CellId) -> Vec<CellId> {
        let mut neighbors = Vec::with_capacity(4);
        let CellId { row, col } = id;

        let mut push_if_open = |candidate: CellId| {
            if !self.is_barrier(candidate) {
                neighbors.push(candidate);
            }
        };

        if row + 1 < self.size {
            push_if_open(CellId::new(row + 1, col)); // down
        }
        if row > 0 {
            push_if_open(CellId::new(row - 1, col)); // up
        }
        if col + 1 < self.size {
            push_if_open(CellId::new(row, col + 1)); // right
        }
        if col > 0 {
            push_if_open(CellId::new(row, col - 1)); // left
        }

        neighbors
    }

    /// Recompute every cell's neighbor list from the current barriers.
    /// Must run before a search since barriers may have moved.
    pub fn refresh_neighbors(&mut self) {
        for index in 0..self.cells.len() {
            let neighbors = self.compute_neighbors(self.cells[index].id);
            self.cells[index].neighbors = neighbors;
        }
    }

    /// Cached neighbors of `id` as of the last refresh
    pub fn neighbors_of(&self, id: CellId) -> &[CellId] {
        self.cell(id).neighbors()
    }

    /// Parse a text layout: one line per row, one symbol per cell.
    ///
    /// Symbols: `.` free, `#` barrier, `S` start, `E` end, `o` open,
    /// `x` closed, `*` path. Blank lines and surrounding whitespace are ignored.
    pub fn from_layout(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let cols = rows[0].chars().count();
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(LayoutError::RaggedRow { row, expected: cols, found });
            }
        }
        if rows.len() != cols {
            return Err(LayoutError::NotSquare { rows: rows.len(), cols });
        }

        let mut grid = Grid::build(cols);
        let mut seen_start = false;
        let mut seen_end = false;

        for (row, line) in rows.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                let state = CellState::from_symbol(symbol)
                    .ok_or(LayoutError::UnknownSymbol { row, col, symbol })?;

                let seen = match state {
                    CellState::Start => Some(&mut seen_start),
                    CellState::End => Some(&mut seen_end),
                    _ => None,
                };
                if let Some(seen) = seen {
                    if *seen {
                        return Err(LayoutError::DuplicateMarker { symbol });
                    }
                    *seen = true;
                }

                grid.mark(CellId::new(row, col), state);
            }
        }

        Ok(grid)
    }

    /// Render the grid in the layout format accepted by [`Grid::from_layout`]
    pub fn to_layout(&self) -> String {
        let mut result = String::with_capacity(self.size * (self.size + 1));
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                result.push(cell.state.symbol());
            }
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_all_free() {
        let grid = Grid::build(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.cells().count(), 16);
        assert!(grid.cells().all(|cell| cell.state == CellState::Free));
    }

    #[test]
    fn test_neighbor_order_down_up_right_left() {
        let grid = Grid::build(3);
        let neighbors = grid.compute_neighbors(CellId::new(1, 1));
        assert_eq!(
            neighbors,
            vec![
                CellId::new(2, 1),
                CellId::new(0, 1),
                CellId::new(1, 2),
                CellId::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_corner_has_two_neighbors() {
        let grid = Grid::build(3);
        assert_eq!(
            grid.compute_neighbors(CellId::new(0, 0)),
            vec![CellId::new(1, 0), CellId::new(0, 1)]
        );
        assert_eq!(
            grid.compute_neighbors(CellId::new(2, 2)),
            vec![CellId::new(1, 2), CellId::new(2, 1)]
        );
    }

    #[test]
    fn test_barriers_excluded_after_refresh() {
        let mut grid = Grid::build(3);
        grid.refresh_neighbors();
        assert_eq!(grid.neighbors_of(CellId::new(0, 0)).len(), 2);

        grid.mark(CellId::new(0, 1), CellState::Barrier);
        // Cached list is stale until the next refresh
        assert_eq!(grid.neighbors_of(CellId::new(0, 0)).len(), 2);

        grid.refresh_neighbors();
        assert_eq!(grid.neighbors_of(CellId::new(0, 0)), &[CellId::new(1, 0)]);

        for cell in grid.cells() {
            assert!(!cell.neighbors().contains(&CellId::new(0, 1)));
        }
    }

    #[test]
    fn test_mark_bumps_revision_only_on_change() {
        let mut grid = Grid::build(2);
        let id = CellId::new(1, 0);
        grid.mark(id, CellState::Barrier);
        assert_eq!(grid.revision(), 1);
        grid.mark(id, CellState::Barrier);
        assert_eq!(grid.revision(), 1);
        grid.reset(id);
        assert_eq!(grid.state(id), CellState::Free);
        assert_eq!(grid.revision(), 2);
    }

    #[test]
    fn test_clear_search_marks_keeps_layout() {
        let mut grid = Grid::from_layout(
            "S#o\n\
             x*.\n\
             ..E",
        )
        .unwrap();
        grid.clear_search_marks();
        assert_eq!(grid.to_layout(), "S#.\n...\n..E\n");
    }

    #[test]
    fn test_layout_roundtrip_and_find() {
        let text = "S..\n.#.\n..E\n";
        let grid = Grid::from_layout(text).unwrap();
        assert_eq!(grid.to_layout(), text);
        assert_eq!(grid.find(CellState::Start), Some(CellId::new(0, 0)));
        assert_eq!(grid.find(CellState::End), Some(CellId::new(2, 2)));
        assert!(grid.is_barrier(CellId::new(1, 1)));
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(Grid::from_layout("\n  \n").unwrap_err(), LayoutError::Empty);
        assert_eq!(
            Grid::from_layout("...\n..\n...").unwrap_err(),
            LayoutError::RaggedRow { row: 1, expected: 3, found: 2 }
        );
        assert_eq!(
            Grid::from_layout("...\n...").unwrap_err(),
            LayoutError::NotSquare { rows: 2, cols: 3 }
        );
        assert_eq!(
            Grid::from_layout("S.\n.?").unwrap_err(),
            LayoutError::UnknownSymbol { row: 1, col: 1, symbol: '?' }
        );
        assert_eq!(
            Grid::from_layout("SS\n..").unwrap_err(),
            LayoutError::DuplicateMarker { symbol: 'S' }
        );
    }

    #[test]
    fn test_adjacency() {
        let a = CellId::new(2, 2);
        assert!(a.is_adjacent(&CellId::new(2, 3)));
        assert!(a.is_adjacent(&CellId::new(1, 2)));
        assert!(!a.is_adjacent(&CellId::new(3, 3)));
        assert!(!a.is_adjacent(&a));
    }
}
