use std::collections::{BTreeSet, HashMap};

use glam::DVec3;

use crate::{
    core::mesh::Aabb,
    error::{CandidateError, Result},
};

use super::OverlapEngine;

/// Boxes covering more cells than this skip the grid and are tested against
/// every other box instead.
pub const MAX_CELLS_PER_BOX: u64 = 1 << 10;

/// Uniform grid broad-phase. Every box is binned into all cells it covers and
/// boxes sharing a cell are tested exactly. Boxes much larger than a cell
/// (a floor under a fine cloth) are kept aside and swept linearly.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashGrid {
    cell_size: Option<f64>,
}

impl HashGrid {
    /// A `None` cell size is derived from the boxes at query time.
    pub fn new(cell_size: Option<f64>) -> Self {
        Self { cell_size }
    }

    /// Median of the boxes' largest sides, ignoring point boxes, or 1.0 when
    /// every box is a point. The median follows the bulk of the mesh, so a
    /// few huge boxes do not coarsen the grid.
    fn resolve_cell_size(&self, boxes: &[Aabb]) -> f64 {
        if let Some(size) = self.cell_size {
            return size;
        }
        let mut sides: Vec<f64> = boxes
            .iter()
            .map(|b| (b.max - b.min).max_element())
            .filter(|side| *side > 0.0 && side.is_finite())
            .collect();
        if sides.is_empty() {
            return 1.0;
        }
        let mid = sides.len() / 2;
        let (_, median, _) = sides.select_nth_unstable_by(mid, f64::total_cmp);
        *median
    }

    fn world_to_grid(point: DVec3, inv_cell_size: f64) -> (i64, i64, i64) {
        (
            (point.x * inv_cell_size).floor() as i64,
            (point.y * inv_cell_size).floor() as i64,
            (point.z * inv_cell_size).floor() as i64,
        )
    }
}

impl OverlapEngine for HashGrid {
    fn name(&self) -> &str {
        "hash_grid"
    }

    fn find_overlaps(&self, boxes: &[Aabb]) -> Result<Vec<[usize; 2]>> {
        let cell_size = self.resolve_cell_size(boxes);
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(CandidateError::InternalFailure(format!(
                "hash grid cell size must be positive and finite, got {cell_size}"
            )));
        }
        let inv_cell_size = 1.0 / cell_size;
        let mut grid: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
        let mut oversized = Vec::new();

        for (id, aabb) in boxes.iter().enumerate() {
            let min_cell = Self::world_to_grid(aabb.min, inv_cell_size);
            let max_cell = Self::world_to_grid(aabb.max, inv_cell_size);
            let span = |lo: i64, hi: i64| hi.saturating_sub(lo).unsigned_abs().saturating_add(1);
            let cells = span(min_cell.0, max_cell.0)
                .saturating_mul(span(min_cell.1, max_cell.1))
                .saturating_mul(span(min_cell.2, max_cell.2));
            if cells > MAX_CELLS_PER_BOX {
                oversized.push(id);
                continue;
            }

            for x in min_cell.0..=max_cell.0 {
                for y in min_cell.1..=max_cell.1 {
                    for z in min_cell.2..=max_cell.2 {
                        grid.entry((x, y, z)).or_default().push(id);
                    }
                }
            }
        }

        let mut pairs = BTreeSet::new();
        for ids in grid.values() {
            for (k, &a) in ids.iter().enumerate() {
                for &b in &ids[k + 1..] {
                    if boxes[a].intersects(&boxes[b]) {
                        pairs.insert([a.min(b), a.max(b)]);
                    }
                }
            }
        }
        for &big in &oversized {
            for (other, aabb) in boxes.iter().enumerate() {
                if other != big && boxes[big].intersects(aabb) {
                    pairs.insert([big.min(other), big.max(other)]);
                }
            }
        }
        Ok(pairs.into_iter().collect())
    }
}
