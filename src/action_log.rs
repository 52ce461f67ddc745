use crate::error::SearchError;
use crate::grid::CellId;
use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Action phase - whether the action is starting or finishing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPhase {
    Start,
    Finish,
}

/// How a search run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Found,
    NoPath,
    Aborted,
    Rejected,
}

impl From<&SearchError> for SearchOutcome {
    fn from(error: &SearchError) -> Self {
        match error {
            SearchError::NoPathFound => SearchOutcome::NoPath,
            SearchError::Aborted => SearchOutcome::Aborted,
            SearchError::InvalidConfiguration(_) => SearchOutcome::Rejected,
        }
    }
}

/// User actions on the grid and the searches they launch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SetStart { row: usize, col: usize },
    SetEnd { row: usize, col: usize },
    SetBarrier { row: usize, col: usize },
    Erase { row: usize, col: usize },
    Clear,
    PasteLayout { size: usize },
    RunSearch { start: (usize, usize), end: (usize, usize) },
    SearchFinished {
        outcome: SearchOutcome,
        path_len: Option<usize>,
        expansions: usize,
    },
}

impl Action {
    pub fn search_finished(result: &Result<Path, SearchError>, expansions: usize) -> Self {
        match result {
            Ok(path) => Action::SearchFinished {
                outcome: SearchOutcome::Found,
                path_len: Some(path.edge_count()),
                expansions,
            },
            Err(error) => Action::SearchFinished {
                outcome: error.into(),
                path_len: None,
                expansions,
            },
        }
    }

    pub fn run_search(start: CellId, end: CellId) -> Self {
        Action::RunSearch {
            start: (start.row, start.col),
            end: (end.row, end.col),
        }
    }
}

/// Logged action with timestamp and phase
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
    pub phase: ActionPhase,
}

/// Session action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp and phase
    pub fn log(&mut self, action: Action, phase: ActionPhase) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        log::debug!("{:?} {:?}", phase, action);
        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            phase,
        });
    }

    /// Log the start of an action
    pub fn log_start(&mut self, action: Action) {
        self.log(action, ActionPhase::Start);
    }

    /// Log the finish of an action
    pub fn log_finish(&mut self, action: Action) {
        self.log(action, ActionPhase::Finish);
    }

    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.actions)
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut placements = 0;
        let mut barriers = 0;
        let mut erased = 0;
        let mut clears = 0;
        let mut found = 0;
        let mut no_path = 0;
        let mut aborted = 0;

        // Only count finish events to get actual completed action counts
        for logged in self.actions.iter().filter(|a| a.phase == ActionPhase::Finish) {
            match &logged.action {
                Action::SetStart { .. } | Action::SetEnd { .. } => placements += 1,
                Action::SetBarrier { .. } => barriers += 1,
                Action::Erase { .. } => erased += 1,
                Action::Clear => clears += 1,
                Action::SearchFinished { outcome, .. } => match outcome {
                    SearchOutcome::Found => found += 1,
                    SearchOutcome::NoPath => no_path += 1,
                    SearchOutcome::Aborted => aborted += 1,
                    SearchOutcome::Rejected => {}
                },
                _ => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Grid Edits: {} endpoints, {} barriers, {} erased, {} clears\n\
             Searches: {} found, {} without path, {} aborted",
            duration,
            self.actions.len(),
            placements,
            barriers,
            erased,
            clears,
            found,
            no_path,
            aborted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_finished_actions() {
        let mut log = ActionLog::new();
        log.log_finish(Action::SetStart { row: 0, col: 0 });
        log.log_finish(Action::SetEnd { row: 3, col: 3 });
        log.log_finish(Action::SetBarrier { row: 1, col: 1 });
        log.log_start(Action::run_search(CellId::new(0, 0), CellId::new(3, 3)));
        log.log_finish(Action::search_finished(&Err(SearchError::NoPathFound), 7));

        let summary = log.summary();
        assert!(summary.contains("2 endpoints, 1 barriers"));
        assert!(summary.contains("0 found, 1 without path, 0 aborted"));
        assert_eq!(log.actions().len(), 5);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut log = ActionLog::new();
        log.log_start(Action::Clear);
        log.log_finish(Action::SearchFinished {
            outcome: SearchOutcome::Aborted,
            path_len: None,
            expansions: 12,
        });

        let json = log.to_json().unwrap();
        let parsed: Vec<LoggedAction> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_slice(), log.actions());
    }
}
