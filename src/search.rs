//! A* search over a [`Grid`] with unit step cost.
//!
//! The engine advances one unit of work per [`SearchEngine::step`] call: one
//! node expansion while searching, then one path cell per call while the
//! found path is being marked. Callers that want a plain blocking call use
//! [`SearchEngine::run`], which invokes an observer after every unit and
//! lets it abort the run.

use crate::cost_table::CostTable;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::grid::{CellId, CellState, Grid};
use crate::heuristic::manhattan;
use crate::path::{trace, Path, PathMarker, PredecessorMap};

/// Observer verdict after each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    Continue,
    Abort,
}

/// Lifecycle of a single search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Validated and initialised, not stepped yet
    Idle,
    /// Expanding nodes
    Running,
    /// End reached, marking path cells
    Tracing,
    Succeeded,
    Failed,
    Aborted,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SearchState::Succeeded | SearchState::Failed | SearchState::Aborted
        )
    }
}

/// What one call to [`SearchEngine::step`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A node was taken off the frontier and its neighbors relaxed
    Expanded(CellId),
    /// A path cell was marked
    Traced(CellId),
    /// The search is over. Repeated calls return the same outcome.
    Finished(Result<Path, SearchError>),
}

/// Result of a completed [`SearchEngine::run`]
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub path: Path,
    /// Final scores; g of the end cell equals the path's edge count
    pub costs: CostTable,
    /// Number of nodes expanded before the end was reached
    pub expansions: usize,
}

/// One A* run from `start` to `end`. Build a new engine for every run.
#[derive(Debug)]
pub struct SearchEngine {
    start: CellId,
    end: CellId,
    state: SearchState,
    costs: CostTable,
    frontier: Frontier,
    predecessors: PredecessorMap,
    /// Last expanded cell, closed at the start of the next step so the
    /// observer still sees it as open
    pending_close: Option<CellId>,
    marker: Option<PathMarker>,
    outcome: Option<Result<Path, SearchError>>,
    expansions: usize,
}

impl SearchEngine {
    /// Validate the endpoints, refresh neighbor lists and set up fresh
    /// costs, frontier and predecessor map.
    pub fn new(grid: &mut Grid, start: CellId, end: CellId) -> Result<Self, SearchError> {
        for (name, id) in [("start", start), ("end", end)] {
            if !grid.contains_id(id) {
                return Err(SearchError::invalid_configuration(format!(
                    "{} cell {} is outside the {}x{} grid",
                    name,
                    id,
                    grid.size(),
                    grid.size()
                )));
            }
            if grid.is_barrier(id) {
                return Err(SearchError::invalid_configuration(format!(
                    "{} cell {} is a barrier",
                    name, id
                )));
            }
        }
        if start == end {
            return Err(SearchError::invalid_configuration(format!(
                "start and end are the same cell {}",
                start
            )));
        }

        grid.refresh_neighbors();

        let costs = CostTable::new(grid.size(), start, end);
        let mut frontier = Frontier::new();
        frontier.push(start, manhattan(start, end));

        log::debug!("search {} -> {} on {}x{} grid", start, end, grid.size(), grid.size());

        Ok(SearchEngine {
            start,
            end,
            state: SearchState::Idle,
            costs,
            frontier,
            predecessors: PredecessorMap::new(),
            pending_close: None,
            marker: None,
            outcome: None,
            expansions: 0,
        })
    }

    pub fn start(&self) -> CellId {
        self.start
    }

    pub fn end(&self) -> CellId {
        self.end
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    pub fn expansions(&self) -> usize {
        self.expansions
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// The found path, once the end has been reached
    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            Some(Ok(path)) => Some(path),
            _ => self.marker.as_ref().map(PathMarker::path),
        }
    }

    /// Advance by one expansion or one path mark
    pub fn step(&mut self, grid: &mut Grid) -> Step {
        match self.state {
            SearchState::Idle | SearchState::Running => self.expand_next(grid),
            SearchState::Tracing => self.trace_next(grid),
            SearchState::Succeeded | SearchState::Failed | SearchState::Aborted => {
                Step::Finished(self.outcome.clone().unwrap_or(Err(SearchError::Aborted)))
            }
        }
    }

    /// Stop the run. Partial bookkeeping is dropped.
    pub fn abort(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        log::debug!("search aborted after {} expansions", self.expansions);
        self.frontier = Frontier::new();
        self.predecessors.clear();
        self.pending_close = None;
        self.marker = None;
        self.finish(SearchState::Aborted, Err(SearchError::Aborted));
    }

    fn expand_next(&mut self, grid: &mut Grid) -> Step {
        self.state = SearchState::Running;
        self.close_pending(grid);

        let Some(current) = self.frontier.pop() else {
            log::debug!("frontier exhausted after {} expansions", self.expansions);
            return self.finish(SearchState::Failed, Err(SearchError::NoPathFound));
        };

        if current == self.end {
            grid.mark(self.end, CellState::End);
            log::debug!(
                "reached {} after {} expansions, g = {}",
                self.end,
                self.expansions,
                self.costs.raw_g(self.end)
            );
            let path = trace(&self.predecessors, self.end);
            self.predecessors.clear();
            self.frontier = Frontier::new();
            self.marker = Some(PathMarker::new(path));
            self.state = SearchState::Tracing;
            return self.trace_next(grid);
        }

        self.expansions += 1;
        let tentative_g = self.costs.raw_g(current) + 1;
        let neighbors = grid.neighbors_of(current).to_vec();

        for neighbor in neighbors {
            let f = tentative_g + manhattan(neighbor, self.end);
            if !self.costs.relax(neighbor, tentative_g, f) {
                continue;
            }
            self.predecessors.insert(neighbor, current);
            if self.frontier.push(neighbor, f) {
                self.paint(grid, neighbor, CellState::Open);
            }
        }

        log::trace!(
            "expanded {} (g = {}), frontier size {}",
            current,
            tentative_g - 1,
            self.frontier.len()
        );

        self.pending_close = Some(current);
        Step::Expanded(current)
    }

    fn trace_next(&mut self, grid: &mut Grid) -> Step {
        let Some(marker) = self.marker.as_mut() else {
            return self.finish(SearchState::Aborted, Err(SearchError::Aborted));
        };
        if let Some(cell) = marker.mark_next(grid) {
            return Step::Traced(cell);
        }

        let path = marker.path().clone();
        self.marker = None;
        log::debug!("path of {} steps marked", path.edge_count());
        self.finish(SearchState::Succeeded, Ok(path))
    }

    fn close_pending(&mut self, grid: &mut Grid) {
        if let Some(cell) = self.pending_close.take() {
            self.paint(grid, cell, CellState::Closed);
        }
    }

    /// Progress marks never overwrite the endpoints
    fn paint(&self, grid: &mut Grid, cell: CellId, state: CellState) {
        if cell != self.start && cell != self.end {
            grid.mark(cell, state);
        }
    }

    fn finish(&mut self, state: SearchState, outcome: Result<Path, SearchError>) -> Step {
        self.state = state;
        self.outcome = Some(outcome.clone());
        Step::Finished(outcome)
    }

    /// Run a whole search, calling `on_step` once per expansion and once per
    /// marked path cell. Returning [`StepControl::Abort`] stops the run with
    /// [`SearchError::Aborted`].
    pub fn run<F>(
        grid: &mut Grid,
        start: CellId,
        end: CellId,
        mut on_step: F,
    ) -> Result<SearchReport, SearchError>
    where
        F: FnMut(&Grid) -> StepControl,
    {
        let mut engine = SearchEngine::new(grid, start, end)?;
        loop {
            match engine.step(grid) {
                Step::Expanded(_) | Step::Traced(_) => {
                    if on_step(grid) == StepControl::Abort {
                        engine.abort();
                        return Err(SearchError::Aborted);
                    }
                }
                Step::Finished(outcome) => {
                    let path = outcome?;
                    return Ok(SearchReport {
                        path,
                        costs: engine.costs,
                        expansions: engine.expansions,
                    });
                }
            }
        }
    }
}

/// Run a search between the cells tagged [`CellState::Start`] and [`CellState::End`]
pub fn run_marked<F>(grid: &mut Grid, on_step: F) -> Result<SearchReport, SearchError>
where
    F: FnMut(&Grid) -> StepControl,
{
    let start = grid
        .find(CellState::Start)
        .ok_or_else(|| SearchError::invalid_configuration("no start cell"))?;
    let end = grid
        .find(CellState::End)
        .ok_or_else(|| SearchError::invalid_configuration("no end cell"))?;
    SearchEngine::run(grid, start, end, on_step)
}
