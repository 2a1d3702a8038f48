//! Small vector helpers layered on top of `glam`.

use glam::DVec3;

/// Largest Euclidean length among `vectors`; zero when empty.
pub fn max_length(vectors: &[DVec3]) -> f64 {
    vectors
        .iter()
        .map(|v| v.length_squared())
        .fold(0.0, f64::max)
        .sqrt()
}

/// Subtracts the mean from every vector, leaving a zero-sum set.
pub fn centred<const N: usize>(vectors: [DVec3; N]) -> [DVec3; N] {
    if N == 0 {
        return vectors;
    }
    let mean = vectors.iter().copied().sum::<DVec3>() / N as f64;
    vectors.map(|v| v - mean)
}

/// Linear interpolation of every point between two snapshots.
pub fn lerp_points<const N: usize>(start: &[DVec3; N], end: &[DVec3; N], t: f64) -> [DVec3; N] {
    std::array::from_fn(|i| start[i] + (end[i] - start[i]) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_vectors_sum_to_zero() {
        let c = centred([DVec3::X, DVec3::X, DVec3::new(1.0, 3.0, 0.0)]);
        assert_eq!(c.iter().copied().sum::<DVec3>(), DVec3::ZERO);
        assert_eq!(c[2], DVec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn max_length_of_empty_is_zero() {
        assert_eq!(max_length(&[]), 0.0);
        assert_eq!(max_length(&[DVec3::new(3.0, 4.0, 0.0), DVec3::X]), 5.0);
    }
}
