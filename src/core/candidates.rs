//! Candidate pair entities identifying two mesh primitives by index.
//!
//! Ordered kinds (edge–vertex, face–vertex, edge–face) expose their fields
//! directly. Symmetric kinds (vertex–vertex, edge–edge) store `(min, max)` at
//! construction and keep their fields private so the normal form cannot be
//! broken; equality, ordering and hashing are then plain field-wise derives.

use serde::{Deserialize, Serialize};

/// Vertex–vertex pair. `(a, b)` and `(b, a)` are the same candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct VertexVertexCandidate {
    vertex0: usize,
    vertex1: usize,
}

impl VertexVertexCandidate {
    pub fn new(vertex0: usize, vertex1: usize) -> Self {
        Self {
            vertex0: vertex0.min(vertex1),
            vertex1: vertex0.max(vertex1),
        }
    }

    /// Smaller of the two vertex indices.
    pub fn vertex0(&self) -> usize {
        self.vertex0
    }

    /// Larger of the two vertex indices.
    pub fn vertex1(&self) -> usize {
        self.vertex1
    }

    pub fn vertices(&self) -> [usize; 2] {
        [self.vertex0, self.vertex1]
    }

    pub fn shares_vertex(&self) -> bool {
        self.vertex0 == self.vertex1
    }
}

impl From<[usize; 2]> for VertexVertexCandidate {
    fn from(pair: [usize; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<VertexVertexCandidate> for [usize; 2] {
    fn from(candidate: VertexVertexCandidate) -> Self {
        [candidate.vertex0, candidate.vertex1]
    }
}

/// Edge–vertex pair: point `vertex` against segment `edge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeVertexCandidate {
    pub edge: usize,
    pub vertex: usize,
}

impl EdgeVertexCandidate {
    pub fn new(edge: usize, vertex: usize) -> Self {
        Self { edge, vertex }
    }

    /// Mesh vertices touched by this pair: edge endpoints, then the query vertex.
    pub fn vertices(&self, edges: &[[usize; 2]]) -> [usize; 3] {
        let [e0, e1] = edges[self.edge];
        [e0, e1, self.vertex]
    }

    pub fn shares_vertex(&self, edges: &[[usize; 2]]) -> bool {
        edges[self.edge].contains(&self.vertex)
    }
}

/// Edge–edge pair. `(a, b)` and `(b, a)` are the same candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct EdgeEdgeCandidate {
    edge0: usize,
    edge1: usize,
}

impl EdgeEdgeCandidate {
    pub fn new(edge0: usize, edge1: usize) -> Self {
        Self {
            edge0: edge0.min(edge1),
            edge1: edge0.max(edge1),
        }
    }

    /// Smaller of the two edge indices.
    pub fn edge0(&self) -> usize {
        self.edge0
    }

    /// Larger of the two edge indices.
    pub fn edge1(&self) -> usize {
        self.edge1
    }

    /// Endpoints of `edge0`, then endpoints of `edge1`.
    pub fn vertices(&self, edges: &[[usize; 2]]) -> [usize; 4] {
        let [a0, a1] = edges[self.edge0];
        let [b0, b1] = edges[self.edge1];
        [a0, a1, b0, b1]
    }

    pub fn shares_vertex(&self, edges: &[[usize; 2]]) -> bool {
        let [a0, a1] = edges[self.edge0];
        let other = edges[self.edge1];
        other.contains(&a0) || other.contains(&a1)
    }
}

impl From<[usize; 2]> for EdgeEdgeCandidate {
    fn from(pair: [usize; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<EdgeEdgeCandidate> for [usize; 2] {
    fn from(candidate: EdgeEdgeCandidate) -> Self {
        [candidate.edge0, candidate.edge1]
    }
}

/// Face–vertex pair: point `vertex` against triangle `face`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceVertexCandidate {
    pub face: usize,
    pub vertex: usize,
}

impl FaceVertexCandidate {
    pub fn new(face: usize, vertex: usize) -> Self {
        Self { face, vertex }
    }

    /// Face corners, then the query vertex.
    pub fn vertices(&self, faces: &[[usize; 3]]) -> [usize; 4] {
        let [f0, f1, f2] = faces[self.face];
        [f0, f1, f2, self.vertex]
    }

    pub fn shares_vertex(&self, faces: &[[usize; 3]]) -> bool {
        faces[self.face].contains(&self.vertex)
    }
}

/// Edge–face pair used by intersection checks; carries no CCD predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeFaceCandidate {
    pub edge: usize,
    pub face: usize,
}

impl EdgeFaceCandidate {
    pub fn new(edge: usize, face: usize) -> Self {
        Self { edge, face }
    }

    /// Edge endpoints, then face corners.
    pub fn vertices(&self, edges: &[[usize; 2]], faces: &[[usize; 3]]) -> [usize; 5] {
        let [e0, e1] = edges[self.edge];
        let [f0, f1, f2] = faces[self.face];
        [e0, e1, f0, f1, f2]
    }

    pub fn shares_vertex(&self, edges: &[[usize; 2]], faces: &[[usize; 3]]) -> bool {
        let face = faces[self.face];
        edges[self.edge].iter().any(|v| face.contains(v))
    }
}
