use crate::{core::mesh::Aabb, error::Result};

use super::OverlapEngine;

/// Tests every box against every other box. Quadratic; meant for small
/// meshes and as a reference for the other engines.
#[derive(Debug, Default, Clone, Copy)]
pub struct BruteForce;

impl BruteForce {
    pub fn new() -> Self {
        Self
    }
}

impl OverlapEngine for BruteForce {
    fn name(&self) -> &str {
        "brute_force"
    }

    fn find_overlaps(&self, boxes: &[Aabb]) -> Result<Vec<[usize; 2]>> {
        let mut pairs = Vec::new();
        for (i, a) in boxes.iter().enumerate() {
            for (j, b) in boxes.iter().enumerate().skip(i + 1) {
                if a.intersects(b) {
                    pairs.push([i, j]);
                }
            }
        }
        Ok(pairs)
    }
}
