use crate::{core::mesh::Aabb, error::Result};

use super::OverlapEngine;

/// Single-axis sweep and prune along x.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepAndPrune;

impl SweepAndPrune {
    pub fn new() -> Self {
        Self
    }
}

impl OverlapEngine for SweepAndPrune {
    fn name(&self) -> &str {
        "sweep_and_prune"
    }

    fn find_overlaps(&self, boxes: &[Aabb]) -> Result<Vec<[usize; 2]>> {
        let mut order: Vec<usize> = (0..boxes.len()).collect();
        order.sort_by(|&a, &b| {
            boxes[a]
                .min
                .x
                .total_cmp(&boxes[b].min.x)
                .then(a.cmp(&b))
        });

        let mut pairs = Vec::new();
        // Boxes whose x-interval may still reach the sweep position.
        let mut active: Vec<usize> = Vec::new();
        for &i in &order {
            let current = &boxes[i];
            active.retain(|&j| boxes[j].max.x >= current.min.x);
            for &j in &active {
                if boxes[j].intersects(current) {
                    pairs.push([j.min(i), j.max(i)]);
                }
            }
            active.push(i);
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn sweep_finds_only_overlapping_pairs() {
        let boxes = [
            Aabb::new(DVec3::ZERO, DVec3::new(1.5, 1.0, 1.0)),
            Aabb::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 1.0, 1.0)),
            Aabb::new(DVec3::new(1.2, 5.0, 0.0), DVec3::new(1.4, 6.0, 1.0)),
            Aabb::new(DVec3::new(3.0, 0.0, 0.0), DVec3::new(4.0, 1.0, 1.0)),
        ];
        let pairs = SweepAndPrune::new().find_overlaps(&boxes).unwrap();
        assert_eq!(pairs, vec![[0, 1]]);
    }
}
