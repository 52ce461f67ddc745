use crate::grid::CellId;

/// Manhattan distance between two cells.
///
/// Never overestimates the remaining cost on a 4-connected grid with unit
/// steps, so A* stays optimal. Keep it paired with that movement model.
pub fn manhattan(a: CellId, b: CellId) -> u32 {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as u32
}
