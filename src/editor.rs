use crate::error::SearchError;
use crate::grid::{CellId, CellState, Grid};
use crate::search::SearchEngine;

/// What a paint or erase did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    PlacedStart(CellId),
    PlacedEnd(CellId),
    PlacedBarrier(CellId),
    Erased(CellId),
    Unchanged,
}

/// Editing rules for the interactive grid: where start, end and barriers
/// go, and when a search may be launched
#[derive(Debug, Clone)]
pub struct Editor {
    grid: Grid,
    start: Option<CellId>,
    end: Option<CellId>,
}

impl Editor {
    pub fn new(size: usize) -> Self {
        Editor {
            grid: Grid::build(size),
            start: None,
            end: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    pub fn end(&self) -> Option<CellId> {
        self.end
    }

    /// Primary click: the first free click places the start, the next one
    /// the end, every later click a barrier. Endpoints are never painted over.
    pub fn paint(&mut self, id: CellId) -> Edit {
        if self.start.is_none() && self.end != Some(id) {
            self.grid.mark(id, CellState::Start);
            self.start = Some(id);
            Edit::PlacedStart(id)
        } else if self.end.is_none() && self.start != Some(id) {
            self.grid.mark(id, CellState::End);
            self.end = Some(id);
            Edit::PlacedEnd(id)
        } else if self.start != Some(id) && self.end != Some(id) {
            if self.grid.is_barrier(id) {
                return Edit::Unchanged;
            }
            self.grid.mark(id, CellState::Barrier);
            Edit::PlacedBarrier(id)
        } else {
            Edit::Unchanged
        }
    }

    /// Secondary click: back to free, forgetting the endpoint if it was one
    pub fn erase(&mut self, id: CellId) -> Edit {
        if self.grid.state(id) == CellState::Free {
            return Edit::Unchanged;
        }
        self.grid.reset(id);
        if self.start == Some(id) {
            self.start = None;
        }
        if self.end == Some(id) {
            self.end = None;
        }
        Edit::Erased(id)
    }

    /// Fresh grid of the same size, no endpoints
    pub fn clear(&mut self) {
        self.grid = Grid::build(self.grid.size());
        self.start = None;
        self.end = None;
        log::info!("grid cleared");
    }

    /// Replace the grid, taking start and end from its tags
    pub fn load_layout(&mut self, grid: Grid) {
        self.start = grid.find(CellState::Start);
        self.end = grid.find(CellState::End);
        log::info!(
            "loaded {}x{} layout (start: {:?}, end: {:?})",
            grid.size(),
            grid.size(),
            self.start,
            self.end
        );
        self.grid = grid;
    }

    /// Clear the previous run's marks and build an engine for a new one
    pub fn launch(&mut self) -> Result<SearchEngine, SearchError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(SearchError::invalid_configuration(
                "place both a start and an end cell first",
            ));
        };
        self.grid.clear_search_marks();
        SearchEngine::new(&mut self.grid, start, end)
    }
}
