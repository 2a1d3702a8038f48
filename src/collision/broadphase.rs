use glam::DVec3;
use log::warn;

use crate::{
    collision::{
        engines::OverlapEngine,
        layout::{Primitive, PrimitiveLayout},
    },
    config::{validate_inflation_radius, BroadPhaseConfig, BroadPhaseMethod},
    core::{
        candidates::{
            EdgeEdgeCandidate, EdgeFaceCandidate, EdgeVertexCandidate, FaceVertexCandidate,
            VertexVertexCandidate,
        },
        container::Candidates,
        mesh::{validate_tables, Aabb},
    },
    error::{CandidateError, Result},
    utils::{
        profiling::{DetectionProfile, Stage},
    },
};

/// How the current boxes were built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildKind {
    /// Boxes around a single snapshot.
    Static,
    /// Boxes around the motion from t=0 to t=1.
    Continuous,
}

/// Typed overlaps of the last build, already filtered for incidence.
#[derive(Debug, Default, Clone)]
struct ClassifiedOverlaps {
    vv: Vec<VertexVertexCandidate>,
    ev: Vec<EdgeVertexCandidate>,
    ee: Vec<EdgeEdgeCandidate>,
    fv: Vec<FaceVertexCandidate>,
    ef: Vec<EdgeFaceCandidate>,
}

/// Broad-phase adapter between mesh tables and an [`OverlapEngine`].
///
/// Mesh tables are borrowed only for the duration of a build; the adapter
/// keeps the boxes and the classified overlaps, never the tables. Detection
/// on an adapter that has not been built (or was cleared) yields nothing.
pub struct BroadPhase {
    engine: Box<dyn OverlapEngine>,
    layout: PrimitiveLayout,
    boxes: Vec<Aabb>,
    overlaps: ClassifiedOverlaps,
    built: Option<BuildKind>,
    profile: DetectionProfile,
}

impl Default for BroadPhase {
    fn default() -> Self {
        Self::new(BroadPhaseMethod::default())
    }
}

impl BroadPhase {
    pub fn new(method: BroadPhaseMethod) -> Self {
        Self::from_boxed_engine(method.create_engine(&BroadPhaseConfig::default()))
    }

    pub fn from_config(config: &BroadPhaseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_boxed_engine(config.method.create_engine(config)))
    }

    pub fn with_engine<E>(engine: E) -> Self
    where
        E: OverlapEngine + 'static,
    {
        Self::from_boxed_engine(Box::new(engine))
    }

    fn from_boxed_engine(engine: Box<dyn OverlapEngine>) -> Self {
        Self {
            engine,
            layout: PrimitiveLayout::default(),
            boxes: Vec::new(),
            overlaps: ClassifiedOverlaps::default(),
            built: None,
            profile: DetectionProfile::default(),
        }
    }

    /// Swaps the overlap engine. The adapter returns to the empty state.
    pub fn set_engine<E>(&mut self, engine: E)
    where
        E: OverlapEngine + 'static,
    {
        self.engine = Box::new(engine);
        self.clear();
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// `None` while empty.
    pub fn state(&self) -> Option<BuildKind> {
        self.built
    }

    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    pub fn layout(&self) -> PrimitiveLayout {
        self.layout
    }

    /// Boxes of the last build in `[vertices | edges | faces]` order.
    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn profile(&self) -> &DetectionProfile {
        &self.profile
    }

    /// Builds boxes around a single snapshot.
    ///
    /// Invalid input leaves the adapter untouched; an engine failure leaves
    /// it empty.
    pub fn build_static(
        &mut self,
        vertices: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
        inflation_radius: f64,
    ) -> Result<()> {
        validate_inflation_radius(inflation_radius)?;
        validate_tables(vertices, vertices, edges, faces)?;
        self.build_checked(vertices, vertices, edges, faces, inflation_radius, BuildKind::Static)
    }

    /// Builds boxes around the linear motion from `vertices_t0` to `vertices_t1`.
    ///
    /// Invalid input leaves the adapter untouched; an engine failure leaves
    /// it empty.
    pub fn build_continuous(
        &mut self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
        inflation_radius: f64,
    ) -> Result<()> {
        validate_inflation_radius(inflation_radius)?;
        validate_tables(vertices_t0, vertices_t1, edges, faces)?;
        self.build_checked(
            vertices_t0,
            vertices_t1,
            edges,
            faces,
            inflation_radius,
            BuildKind::Continuous,
        )
    }

    pub fn clear(&mut self) {
        self.layout = PrimitiveLayout::default();
        self.boxes.clear();
        self.overlaps = ClassifiedOverlaps::default();
        self.built = None;
        self.profile.reset();
    }

    fn build_checked(
        &mut self,
        vertices_t0: &[DVec3],
        vertices_t1: &[DVec3],
        edges: &[[usize; 2]],
        faces: &[[usize; 3]],
        inflation_radius: f64,
        kind: BuildKind,
    ) -> Result<()> {
        self.clear();

        let mut profile = DetectionProfile::default();
        let layout = PrimitiveLayout::new(vertices_t0.len(), edges.len(), faces.len());

        let boxes = profile.time(Stage::Boxes, || {
            build_boxes(vertices_t0, vertices_t1, edges, faces, inflation_radius)
        });

        let engine = self.engine.as_ref();
        let raw = profile
            .time(Stage::Overlaps, || engine.find_overlaps(&boxes))
            .map_err(|err| {
                warn!("{} engine failed: {err}", engine.name());
                match err {
                    failure @ CandidateError::InternalFailure(_) => failure,
                    other => {
                        CandidateError::InternalFailure(format!("{} engine: {other}", engine.name()))
                    }
                }
            })?;

        profile.overlap_count = raw.len();
        let overlaps = profile.time(Stage::Classify, || classify(&layout, raw, edges, faces))?;

        profile.box_count = boxes.len();
        profile.vertex_vertex_count = overlaps.vv.len();
        profile.edge_vertex_count = overlaps.ev.len();
        profile.edge_edge_count = overlaps.ee.len();
        profile.face_vertex_count = overlaps.fv.len();
        profile.edge_face_count = overlaps.ef.len();
        profile.report(self.engine.name());

        self.layout = layout;
        self.boxes = boxes;
        self.overlaps = overlaps;
        self.built = Some(kind);
        self.profile = profile;
        Ok(())
    }

    pub fn detect_vertex_vertex_candidates(&self, candidates: &mut Vec<VertexVertexCandidate>) {
        candidates.clone_from(&self.overlaps.vv);
    }

    pub fn detect_edge_vertex_candidates(&self, candidates: &mut Vec<EdgeVertexCandidate>) {
        candidates.clone_from(&self.overlaps.ev);
    }

    /// Edge–edge pairs. Edges sharing an endpoint are never reported, not
    /// only identical edges.
    pub fn detect_edge_edge_candidates(&self, candidates: &mut Vec<EdgeEdgeCandidate>) {
        candidates.clone_from(&self.overlaps.ee);
    }

    pub fn detect_face_vertex_candidates(&self, candidates: &mut Vec<FaceVertexCandidate>) {
        candidates.clone_from(&self.overlaps.fv);
    }

    /// Edge–face pairs for intersection checks.
    pub fn detect_edge_face_candidates(&self, candidates: &mut Vec<EdgeFaceCandidate>) {
        candidates.clone_from(&self.overlaps.ef);
    }

    /// Fills the CCD set of `candidates` for a `dim`-dimensional simulation:
    /// edge–vertex and edge–edge pairs, plus face–vertex pairs in 3-D.
    ///
    /// `candidates.ef` is left as is. Any `dim` other than 2 or 3 fails
    /// without touching `candidates`.
    pub fn detect_collision_candidates(&self, dim: usize, candidates: &mut Candidates) -> Result<()> {
        if dim != 2 && dim != 3 {
            return Err(CandidateError::precondition(format!(
                "simulation dimension must be 2 or 3, got {dim}"
            )));
        }
        self.detect_edge_vertex_candidates(&mut candidates.ev);
        self.detect_edge_edge_candidates(&mut candidates.ee);
        if dim == 3 {
            self.detect_face_vertex_candidates(&mut candidates.fv);
        } else {
            candidates.fv.clear();
        }
        Ok(())
    }
}

/// Swept boxes for `[vertices | edges | faces]`.
fn build_boxes(
    vertices_t0: &[DVec3],
    vertices_t1: &[DVec3],
    edges: &[[usize; 2]],
    faces: &[[usize; 3]],
    inflation_radius: f64,
) -> Vec<Aabb> {
    let vertex_box = |(&p0, &p1): (&DVec3, &DVec3)| Aabb::from_swept_point(p0, p1, inflation_radius);

    #[cfg(feature = "parallel")]
    let vertex_boxes: Vec<Aabb> = {
        use rayon::prelude::*;
        vertices_t0
            .par_iter()
            .zip(vertices_t1.par_iter())
            .map(vertex_box)
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let vertex_boxes: Vec<Aabb> = vertices_t0.iter().zip(vertices_t1).map(vertex_box).collect();

    let mut boxes = Vec::with_capacity(vertex_boxes.len() + edges.len() + faces.len());
    boxes.extend_from_slice(&vertex_boxes);
    boxes.extend(
        edges
            .iter()
            .map(|&[a, b]| vertex_boxes[a].union(&vertex_boxes[b])),
    );
    boxes.extend(faces.iter().map(|&[a, b, c]| {
        vertex_boxes[a]
            .union(&vertex_boxes[b])
            .union(&vertex_boxes[c])
    }));
    boxes
}

/// Decodes engine pairs into typed candidates, dropping self and incident
/// pairs. Output is sorted per kind and independent of the engine's emission
/// order.
fn classify(
    layout: &PrimitiveLayout,
    raw: Vec<[usize; 2]>,
    edges: &[[usize; 2]],
    faces: &[[usize; 3]],
) -> Result<ClassifiedOverlaps> {
    let mut pairs: Vec<[usize; 2]> = raw.into_iter().map(|[a, b]| [a.min(b), a.max(b)]).collect();
    pairs.sort_unstable();
    pairs.dedup();

    let mut out = ClassifiedOverlaps::default();
    for [a, b] in pairs {
        let first = layout.decode(a)?;
        let second = layout.decode(b)?;
        if a == b {
            continue;
        }
        match (first, second) {
            (Primitive::Vertex(v0), Primitive::Vertex(v1)) => {
                out.vv.push(VertexVertexCandidate::new(v0, v1));
            }
            (Primitive::Vertex(v), Primitive::Edge(e)) | (Primitive::Edge(e), Primitive::Vertex(v)) => {
                let candidate = EdgeVertexCandidate::new(e, v);
                if !candidate.shares_vertex(edges) {
                    out.ev.push(candidate);
                }
            }
            (Primitive::Vertex(v), Primitive::Face(f)) | (Primitive::Face(f), Primitive::Vertex(v)) => {
                let candidate = FaceVertexCandidate::new(f, v);
                if !candidate.shares_vertex(faces) {
                    out.fv.push(candidate);
                }
            }
            (Primitive::Edge(e0), Primitive::Edge(e1)) => {
                let candidate = EdgeEdgeCandidate::new(e0, e1);
                if !candidate.shares_vertex(edges) {
                    out.ee.push(candidate);
                }
            }
            (Primitive::Edge(e), Primitive::Face(f)) | (Primitive::Face(f), Primitive::Edge(e)) => {
                let candidate = EdgeFaceCandidate::new(e, f);
                if !candidate.shares_vertex(edges, faces) {
                    out.ef.push(candidate);
                }
            }
            (Primitive::Face(_), Primitive::Face(_)) => {}
        }
    }
    out.vv.sort_unstable();
    out.ev.sort_unstable();
    out.ee.sort_unstable();
    out.fv.sort_unstable();
    out.ef.sort_unstable();
    Ok(out)
}
