//! Wavefront OBJ dump of a candidate set, for inspection in a mesh viewer.
//!
//! Objects appear in the order `EV`, `EE`, `FV`, `EF`. Vertex numbering is
//! 1-based and runs across all four objects, so every `l`/`f` record refers
//! to a vertex written earlier in the same file.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use glam::DVec3;

use crate::{
    core::container::Candidates,
    error::{CandidateError, Result},
};

pub(crate) fn save_obj(
    path: &Path,
    candidates: &Candidates,
    vertices: &[DVec3],
    edges: &[[usize; 2]],
    faces: &[[usize; 3]],
) -> Result<()> {
    check_rows(candidates, vertices, edges, faces)?;
    let file = File::create(path)?;
    write_checked(BufWriter::new(file), candidates, vertices, edges, faces)?;
    log::debug!(
        "wrote {} ccd and {} edge-face candidates to {}",
        candidates.len(),
        candidates.ef.len(),
        path.display()
    );
    Ok(())
}

pub(crate) fn write_obj<W: Write>(
    out: W,
    candidates: &Candidates,
    vertices: &[DVec3],
    edges: &[[usize; 2]],
    faces: &[[usize; 3]],
) -> Result<()> {
    check_rows(candidates, vertices, edges, faces)?;
    write_checked(out, candidates, vertices, edges, faces)
}

fn write_checked<W: Write>(
    mut out: W,
    candidates: &Candidates,
    vertices: &[DVec3],
    edges: &[[usize; 2]],
    faces: &[[usize; 3]],
) -> Result<()> {
    let mut next = 1usize;

    writeln!(out, "o EV")?;
    for ev in &candidates.ev {
        write_vertices(&mut out, vertices, &ev.vertices(edges))?;
        writeln!(out, "l {} {}", next, next + 1)?;
        next += 3;
    }

    writeln!(out, "o EE")?;
    for ee in &candidates.ee {
        write_vertices(&mut out, vertices, &ee.vertices(edges))?;
        writeln!(out, "l {} {}", next, next + 1)?;
        writeln!(out, "l {} {}", next + 2, next + 3)?;
        next += 4;
    }

    writeln!(out, "o FV")?;
    for fv in &candidates.fv {
        write_vertices(&mut out, vertices, &fv.vertices(faces))?;
        writeln!(out, "f {} {} {}", next, next + 1, next + 2)?;
        next += 4;
    }

    writeln!(out, "o EF")?;
    for ef in &candidates.ef {
        write_vertices(&mut out, vertices, &ef.vertices(edges, faces))?;
        writeln!(out, "l {} {}", next, next + 1)?;
        writeln!(out, "f {} {} {}", next + 2, next + 3, next + 4)?;
        next += 5;
    }

    out.flush()?;
    Ok(())
}

// `{}` on f64 prints the shortest string that parses back to the same value.
fn write_vertices<W: Write>(out: &mut W, vertices: &[DVec3], ids: &[usize]) -> std::io::Result<()> {
    for &id in ids {
        let p = vertices[id];
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    Ok(())
}

fn check_rows(
    candidates: &Candidates,
    vertices: &[DVec3],
    edges: &[[usize; 2]],
    faces: &[[usize; 3]],
) -> Result<()> {
    let bad_row = |kind: &str, index: usize, len: usize| {
        CandidateError::precondition(format!(
            "{kind} index {index} is out of range for a table of {len} rows"
        ))
    };
    let check_vertex = |v: usize| {
        if v < vertices.len() {
            Ok(())
        } else {
            Err(bad_row("vertex", v, vertices.len()))
        }
    };
    let check_edge = |e: usize| -> Result<()> {
        let row = edges.get(e).ok_or_else(|| bad_row("edge", e, edges.len()))?;
        row.iter().try_for_each(|&v| check_vertex(v))
    };
    let check_face = |f: usize| -> Result<()> {
        let row = faces.get(f).ok_or_else(|| bad_row("face", f, faces.len()))?;
        row.iter().try_for_each(|&v| check_vertex(v))
    };

    for ev in &candidates.ev {
        check_edge(ev.edge)?;
        check_vertex(ev.vertex)?;
    }
    for ee in &candidates.ee {
        check_edge(ee.edge0())?;
        check_edge(ee.edge1())?;
    }
    for fv in &candidates.fv {
        check_face(fv.face)?;
        check_vertex(fv.vertex)?;
    }
    for ef in &candidates.ef {
        check_edge(ef.edge)?;
        check_face(ef.face)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::candidates::{EdgeEdgeCandidate, EdgeVertexCandidate};

    #[test]
    fn counter_runs_across_objects() {
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
        let edges = [[0, 1], [2, 3]];
        let candidates = Candidates {
            ev: vec![EdgeVertexCandidate::new(0, 2)],
            ee: vec![EdgeEdgeCandidate::new(0, 1)],
            ..Default::default()
        };
        let mut buffer = Vec::new();
        write_obj(&mut buffer, &candidates, &vertices, &edges, &[]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "o EV",
                "v 0 0 0",
                "v 1 0 0",
                "v 0 1 0",
                "l 1 2",
                "o EE",
                "v 0 0 0",
                "v 1 0 0",
                "v 0 1 0",
                "v 0 0 1",
                "l 4 5",
                "l 6 7",
                "o FV",
                "o EF",
            ]
        );
    }

    #[test]
    fn out_of_range_rows_are_rejected_before_writing() {
        let candidates = Candidates {
            ev: vec![EdgeVertexCandidate::new(4, 0)],
            ..Default::default()
        };
        let mut buffer = Vec::new();
        let err = write_obj(&mut buffer, &candidates, &[DVec3::ZERO], &[], &[]).unwrap_err();
        assert!(matches!(err, CandidateError::Precondition(_)));
        assert!(buffer.is_empty());
    }
}
