#![allow(dead_code)]

use gridpath::{CellId, CellState, Grid, Path};
use std::collections::{HashMap, VecDeque};

/// Parse a layout, panicking with the layout error on bad input
pub fn grid_from(layout: &str) -> Grid {
    Grid::from_layout(layout).unwrap_or_else(|e| panic!("bad test layout: {}", e))
}

/// Overlay a path on the grid for failure messages
pub fn visualize_path(grid: &Grid, path: &Path) -> String {
    let mut result = String::new();
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let id = CellId::new(row, col);
            let symbol = if id == path.start() {
                'S'
            } else if id == path.end() {
                'E'
            } else if path.contains(&id) {
                '*'
            } else if grid.is_barrier(id) {
                '#'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}

/// Every step moves to an edge-adjacent, non-barrier cell
pub fn assert_valid_path(grid: &Grid, path: &Path, start: CellId, end: CellId) {
    assert_eq!(path.start(), start, "path must begin at start");
    assert_eq!(path.end(), end, "path must finish at end");
    for pair in path.cells().windows(2) {
        assert!(
            pair[0].is_adjacent(&pair[1]),
            "{} and {} are not adjacent\n{}",
            pair[0],
            pair[1],
            visualize_path(grid, path)
        );
    }
    for cell in path.cells() {
        assert!(
            !grid.is_barrier(*cell),
            "path crosses barrier {}\n{}",
            cell,
            visualize_path(grid, path)
        );
    }
}

/// Reference shortest distance by breadth-first search, `None` if unreachable
pub fn bfs_distance(grid: &Grid, start: CellId, end: CellId) -> Option<usize> {
    let mut distance: HashMap<CellId, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    distance.insert(start, 0);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            return distance.get(&end).copied();
        }
        let next = distance[&current] + 1;
        for neighbor in grid.compute_neighbors(current) {
            if !distance.contains_key(&neighbor) {
                distance.insert(neighbor, next);
                queue.push_back(neighbor);
            }
        }
    }
    None
}

/// Deterministic pseudo-random barrier layouts
pub struct LayoutGenerator {
    state: u64,
}

impl LayoutGenerator {
    pub fn new(seed: u64) -> Self {
        LayoutGenerator { state: seed }
    }

    fn next(&mut self) -> u64 {
        // Knuth MMIX LCG
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 33
    }

    /// A `size` x `size` grid with roughly `percent`% barriers, never on
    /// the two corner cells
    pub fn grid(&mut self, size: usize, percent: u64) -> Grid {
        let mut grid = Grid::build(size);
        for row in 0..size {
            for col in 0..size {
                let id = CellId::new(row, col);
                if id == CellId::new(0, 0) || id == CellId::new(size - 1, size - 1) {
                    continue;
                }
                if self.next() % 100 < percent {
                    grid.mark(id, CellState::Barrier);
                }
            }
        }
        grid
    }
}

pub fn count_state(grid: &Grid, state: CellState) -> usize {
    grid.cells().filter(|cell| cell.state == state).count()
}
