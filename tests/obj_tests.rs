use std::fs;

use sweep_candidates::{
    CandidateError, Candidates, DVec3, EdgeEdgeCandidate, EdgeFaceCandidate, EdgeVertexCandidate,
    FaceVertexCandidate,
};

struct Scene {
    vertices: Vec<DVec3>,
    edges: Vec<[usize; 2]>,
    faces: Vec<[usize; 3]>,
}

fn scene() -> Scene {
    Scene {
        vertices: (0..6).map(|i| DVec3::new(i as f64, 0.5 * i as f64, -0.25)).collect(),
        edges: vec![[0, 1], [1, 2], [3, 4]],
        faces: vec![[0, 1, 2], [3, 4, 5]],
    }
}

fn two_one_three() -> Candidates {
    Candidates {
        ev: vec![EdgeVertexCandidate::new(0, 4), EdgeVertexCandidate::new(2, 0)],
        ee: vec![EdgeEdgeCandidate::new(0, 2)],
        fv: vec![
            FaceVertexCandidate::new(0, 4),
            FaceVertexCandidate::new(1, 0),
            FaceVertexCandidate::new(1, 2),
        ],
        ef: Vec::new(),
    }
}

/// Vertex count of each named object, in file order.
fn objects(text: &str) -> Vec<(String, usize)> {
    let mut objects: Vec<(String, usize)> = Vec::new();
    for line in text.lines() {
        if let Some(name) = line.strip_prefix("o ") {
            objects.push((name.to_string(), 0));
        } else if line.starts_with("v ") {
            objects.last_mut().expect("vertex before any object").1 += 1;
        }
    }
    objects
}

#[test]
fn objects_carry_one_vertex_per_candidate_corner() {
    let scene = scene();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candidates.obj");

    two_one_three()
        .save_obj(&path, &scene.vertices, &scene.edges, &scene.faces)
        .unwrap();
    let text = fs::read_to_string(&path).unwrap();

    assert_eq!(
        objects(&text),
        vec![
            ("EV".to_string(), 6),
            ("EE".to_string(), 4),
            ("FV".to_string(), 12),
            ("EF".to_string(), 0),
        ]
    );
}

#[test]
fn connectivity_refers_to_earlier_vertices() {
    let scene = scene();
    let mut candidates = two_one_three();
    candidates.ef.push(EdgeFaceCandidate::new(2, 0));

    let mut buffer = Vec::new();
    candidates
        .write_obj(&mut buffer, &scene.vertices, &scene.edges, &scene.faces)
        .unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let mut written = 0usize;
    let mut lines = 0;
    let mut faces = 0;
    for line in text.lines() {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("v") => written += 1,
            Some(kind @ ("l" | "f")) => {
                let ids: Vec<usize> = fields.map(|id| id.parse().unwrap()).collect();
                assert_eq!(ids.len(), if kind == "l" { 2 } else { 3 });
                assert!(ids.iter().all(|&id| id >= 1 && id <= written), "{line}");
                if kind == "l" {
                    lines += 1;
                } else {
                    faces += 1;
                }
            }
            _ => {}
        }
    }
    // 3 EV + 4 EE + 4 FV + 5 EF corners per candidate.
    assert_eq!(written, 2 * 3 + 4 + 3 * 4 + 5);
    assert_eq!(lines, 2 + 2 + 1);
    assert_eq!(faces, 3 + 1);
}

#[test]
fn coordinates_are_written_exactly() {
    let scene = scene();
    let candidates = Candidates {
        ev: vec![EdgeVertexCandidate::new(2, 1)],
        ..Default::default()
    };
    let mut buffer = Vec::new();
    candidates
        .write_obj(&mut buffer, &scene.vertices, &scene.edges, &scene.faces)
        .unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let coords: Vec<DVec3> = text
        .lines()
        .filter_map(|line| line.strip_prefix("v "))
        .map(|rest| {
            let xyz: Vec<f64> = rest.split(' ').map(|x| x.parse().unwrap()).collect();
            DVec3::new(xyz[0], xyz[1], xyz[2])
        })
        .collect();
    assert_eq!(
        coords,
        vec![scene.vertices[3], scene.vertices[4], scene.vertices[1]]
    );
}

#[test]
fn empty_container_writes_four_empty_objects() {
    let mut buffer = Vec::new();
    Candidates::new().write_obj(&mut buffer, &[], &[], &[]).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "o EV\no EE\no FV\no EF\n");
}

#[test]
fn unwritable_path_is_an_io_error() {
    let scene = scene();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("candidates.obj");
    let err = two_one_three()
        .save_obj(&path, &scene.vertices, &scene.edges, &scene.faces)
        .unwrap_err();
    assert!(matches!(err, CandidateError::Io(_)));
}

#[test]
fn bad_rows_fail_before_the_file_is_created() {
    let scene = scene();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candidates.obj");
    let candidates = Candidates {
        fv: vec![FaceVertexCandidate::new(9, 0)],
        ..Default::default()
    };
    let err = candidates
        .save_obj(&path, &scene.vertices, &scene.edges, &scene.faces)
        .unwrap_err();
    assert!(matches!(err, CandidateError::Precondition(_)));
    assert!(!path.exists());
}
