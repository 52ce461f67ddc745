pub mod action_log;
pub mod config;
pub mod cost_table;
pub mod editor;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod heuristic;
pub mod path;
pub mod search;
pub mod view;

pub use cost_table::{CostTable, UNREACHED};
pub use editor::{Edit, Editor};
pub use error::{LayoutError, SearchError};
pub use grid::{Cell, CellId, CellState, Grid};
pub use path::{Path, PredecessorMap};
pub use search::{run_marked, SearchEngine, SearchReport, SearchState, Step, StepControl};
pub use view::GridView;
