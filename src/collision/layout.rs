//! Single index space shared with overlap engines: `[vertices | edges | faces]`.

use serde::{Deserialize, Serialize};

use crate::error::{CandidateError, Result};

/// A primitive decoded from the shared index space, carrying its table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Vertex(usize),
    Edge(usize),
    Face(usize),
}

/// Sizes of the three primitive tables and the offsets they imply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveLayout {
    pub num_vertices: usize,
    pub num_edges: usize,
    pub num_faces: usize,
}

impl PrimitiveLayout {
    pub fn new(num_vertices: usize, num_edges: usize, num_faces: usize) -> Self {
        Self {
            num_vertices,
            num_edges,
            num_faces,
        }
    }

    /// Total number of boxes.
    pub fn len(&self) -> usize {
        self.num_vertices + self.num_edges + self.num_faces
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn edge_offset(&self) -> usize {
        self.num_vertices
    }

    pub fn face_offset(&self) -> usize {
        self.num_vertices + self.num_edges
    }

    pub fn is_vertex(&self, id: usize) -> bool {
        id < self.edge_offset()
    }

    pub fn is_edge(&self, id: usize) -> bool {
        id >= self.edge_offset() && id < self.face_offset()
    }

    pub fn is_face(&self, id: usize) -> bool {
        id >= self.face_offset() && id < self.len()
    }

    /// Edge table index of a shared id. Only meaningful when `is_edge(id)`.
    pub fn to_edge_id(&self, id: usize) -> usize {
        id - self.edge_offset()
    }

    /// Face table index of a shared id. Only meaningful when `is_face(id)`.
    pub fn to_face_id(&self, id: usize) -> usize {
        id - self.face_offset()
    }

    pub fn edge_to_id(&self, edge: usize) -> usize {
        self.edge_offset() + edge
    }

    pub fn face_to_id(&self, face: usize) -> usize {
        self.face_offset() + face
    }

    /// Decodes a shared id, failing with `Corrupt` past the last face.
    pub fn decode(&self, id: usize) -> Result<Primitive> {
        if self.is_vertex(id) {
            Ok(Primitive::Vertex(id))
        } else if self.is_edge(id) {
            Ok(Primitive::Edge(self.to_edge_id(id)))
        } else if self.is_face(id) {
            Ok(Primitive::Face(self.to_face_id(id)))
        } else {
            Err(CandidateError::Corrupt {
                id,
                count: self.len(),
            })
        }
    }
}
