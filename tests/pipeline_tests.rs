use approx::assert_relative_eq;
use sweep_candidates::{
    edges_from_faces, BroadPhaseConfig, BroadPhaseMethod, CandidateError, CcdParams, CcdPipeline,
    DVec3,
};

/// Unit triangle at z = 0 and a single vertex above it.
fn triangle_and_point(from_z: f64, to_z: f64) -> (Vec<DVec3>, Vec<DVec3>, Vec<[usize; 3]>) {
    let base = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
    let mut v0 = base.clone();
    v0.push(DVec3::new(0.2, 0.2, from_z));
    let mut v1 = base;
    v1.push(DVec3::new(0.2, 0.2, to_z));
    (v0, v1, vec![[0, 1, 2]])
}

#[test]
fn falling_vertex_limits_the_step() {
    let (v0, v1, faces) = triangle_and_point(1.0, -1.0);
    let edges = edges_from_faces(&faces);

    for method in [
        BroadPhaseMethod::BruteForce,
        BroadPhaseMethod::SweepAndPrune,
        BroadPhaseMethod::HashGrid,
    ] {
        let config = BroadPhaseConfig {
            method,
            ..Default::default()
        };
        let params = CcdParams::default();
        let mut pipeline = CcdPipeline::new(3, &config, params).unwrap();
        let step = pipeline
            .collision_free_step(&v0, &v1, &edges, &faces)
            .unwrap();
        assert_relative_eq!(step, 0.5 * params.conservative_rescaling, epsilon = 1e-6);
        assert_eq!(pipeline.candidates().fv.len(), 1);
        assert!(!pipeline
            .is_step_collision_free(&v0, &v1, &edges, &faces)
            .unwrap());
    }
}

#[test]
fn stopping_short_of_the_face_is_collision_free() {
    let (v0, v1, faces) = triangle_and_point(1.0, 0.25);
    let edges = edges_from_faces(&faces);
    let mut pipeline =
        CcdPipeline::new(3, &BroadPhaseConfig::default(), CcdParams::default()).unwrap();
    assert_eq!(
        pipeline
            .collision_free_step(&v0, &v1, &edges, &faces)
            .unwrap(),
        1.0
    );
    assert!(pipeline
        .is_step_collision_free(&v0, &v1, &edges, &faces)
        .unwrap());
}

#[test]
fn planar_pipeline_uses_edges_only() {
    // A 2-D square outline and a vertex crossing its bottom edge.
    let edges = vec![[0, 1], [1, 2], [2, 3], [3, 0]];
    let square = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    ];
    let mut v0 = square.to_vec();
    v0.push(DVec3::new(0.5, -0.5, 0.0));
    let mut v1 = square.to_vec();
    v1.push(DVec3::new(0.5, 0.5, 0.0));

    let params = CcdParams::default().with_conservative_rescaling(1.0);
    let mut pipeline = CcdPipeline::new(2, &BroadPhaseConfig::default(), params).unwrap();
    let step = pipeline
        .collision_free_step(&v0, &v1, &edges, &[])
        .unwrap();
    assert_relative_eq!(step, 0.5, epsilon = 1e-6);
    assert!(pipeline.candidates().fv.is_empty());
}

#[test]
fn inflation_and_params_are_validated() {
    let mut pipeline =
        CcdPipeline::new(3, &BroadPhaseConfig::default(), CcdParams::default()).unwrap();
    assert!(matches!(
        pipeline.set_inflation_radius(-0.5),
        Err(CandidateError::Precondition(_))
    ));
    assert!(matches!(
        pipeline.set_params(CcdParams::default().with_tmax(2.0)),
        Err(CandidateError::Precondition(_))
    ));
    assert!(pipeline.set_inflation_radius(1e-3).is_ok());

    let bad_config = BroadPhaseConfig {
        grid_cell_size: Some(-1.0),
        ..Default::default()
    };
    assert!(CcdPipeline::new(3, &bad_config, CcdParams::default()).is_err());
}

#[test]
fn mismatched_snapshots_fail_the_step() {
    let (v0, mut v1, faces) = triangle_and_point(1.0, -1.0);
    v1.pop();
    let mut pipeline =
        CcdPipeline::new(3, &BroadPhaseConfig::default(), CcdParams::default()).unwrap();
    let err = pipeline
        .collision_free_step(&v0, &v1, &edges_from_faces(&faces), &faces)
        .unwrap_err();
    assert!(matches!(err, CandidateError::Precondition(_)));
}

#[test]
fn failed_step_drops_the_previous_candidates() {
    let (v0, v1, faces) = triangle_and_point(1.0, -1.0);
    let edges = edges_from_faces(&faces);
    let mut pipeline =
        CcdPipeline::new(3, &BroadPhaseConfig::default(), CcdParams::default()).unwrap();
    assert!(pipeline
        .earliest_impact(&v0, &v1, &edges, &faces)
        .unwrap()
        .is_some());
    assert!(!pipeline.candidates().is_empty());

    let short = &v1[..v1.len() - 1];
    assert!(pipeline.earliest_impact(&v0, short, &edges, &faces).is_err());
    assert!(pipeline.candidates().is_empty());
}
