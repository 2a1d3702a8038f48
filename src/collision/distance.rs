//! Squared distances between static primitives, used by the CCD kernels.

use glam::DVec3;

use crate::config::DEGENERATE_LENGTH_SQ;

/// Squared distance from `p` to the segment `[e0, e1]`.
pub fn point_edge_distance_sq(p: DVec3, e0: DVec3, e1: DVec3) -> f64 {
    let dir = e1 - e0;
    let len_sq = dir.length_squared();
    if len_sq <= DEGENERATE_LENGTH_SQ {
        return p.distance_squared(e0);
    }
    let t = ((p - e0).dot(dir) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(e0 + dir * t)
}

/// Squared distance between segments `[a0, a1]` and `[b0, b1]`.
///
/// Closest parameters are clamped to each segment in turn, which also covers
/// parallel and zero-length segments.
pub fn edge_edge_distance_sq(a0: DVec3, a1: DVec3, b0: DVec3, b1: DVec3) -> f64 {
    let d1 = a1 - a0;
    let d2 = b1 - b0;
    let r = a0 - b0;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    if a <= DEGENERATE_LENGTH_SQ && e <= DEGENERATE_LENGTH_SQ {
        return r.length_squared();
    }

    let (s, t) = if a <= DEGENERATE_LENGTH_SQ {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= DEGENERATE_LENGTH_SQ {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            let s = if denom > 0.0 {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let t = (b * s + f) / e;
            if t < 0.0 {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (((b - c) / a).clamp(0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    (a0 + d1 * s).distance_squared(b0 + d2 * t)
}

/// Squared distance from `p` to the triangle `(t0, t1, t2)`.
pub fn point_triangle_distance_sq(p: DVec3, t0: DVec3, t1: DVec3, t2: DVec3) -> f64 {
    let normal = (t1 - t0).cross(t2 - t0);
    let normal_len_sq = normal.length_squared();

    if normal_len_sq > DEGENERATE_LENGTH_SQ {
        // Barycentric test of the projection onto the supporting plane.
        let to_p = p - t0;
        let c0 = (t1 - t0).cross(to_p).dot(normal);
        let c1 = (t2 - t1).cross(p - t1).dot(normal);
        let c2 = (t0 - t2).cross(p - t2).dot(normal);
        if c0 >= 0.0 && c1 >= 0.0 && c2 >= 0.0 {
            let height = to_p.dot(normal);
            return height * height / normal_len_sq;
        }
    }

    point_edge_distance_sq(p, t0, t1)
        .min(point_edge_distance_sq(p, t1, t2))
        .min(point_edge_distance_sq(p, t2, t0))
}
