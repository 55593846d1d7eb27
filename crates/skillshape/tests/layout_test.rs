use serde_json::json;
use skillshape::{
    Error, ShapeId, ShapeParams, SkillNode, XorShift64Star, default_pool, layout, layout_seeded,
    replicate_pool, try_layout,
};

const REGION_SHAPES: [&str; 10] = [
    "brain",
    "brain2",
    "brain3",
    "brain4-polygon",
    "brain-svg2",
    "top-down-brain",
    "top-down-brain2",
    "brain-test2",
    "fist",
    "fist1",
];

fn params() -> ShapeParams {
    ShapeParams::new(640.0, 480.0)
}

#[test]
fn region_shapes_place_every_node_inside_the_drawing_area() {
    let nodes = replicate_pool(&default_pool(), 40);
    for shape in REGION_SHAPES {
        let out = layout_seeded(shape, &nodes, &params(), 7);
        assert_eq!(out.len(), 40, "{shape}");
        for p in &out {
            assert!(
                (0.0..=640.0).contains(&p.x) && (0.0..=480.0).contains(&p.y),
                "{shape}: {} at ({}, {})",
                p.id,
                p.x,
                p.y
            );
        }
    }
}

#[test]
fn curve_shapes_conserve_the_node_count() {
    for n in [1, 7, 25] {
        let nodes = replicate_pool(&default_pool(), n);
        for shape in ["moebius", "infinity", "infinity2", "infinity3", "chikara"] {
            assert_eq!(layout(shape, &nodes, &params()).len(), n, "{shape}");
        }
    }
}

#[test]
fn neighbor_ids_always_resolve() {
    let nodes = replicate_pool(&default_pool(), 30);
    for id in ShapeId::all() {
        if id == ShapeId::Drawn {
            continue;
        }
        let out = layout_seeded(&id.name(), &nodes, &params(), 3);
        for p in &out {
            for n in &p.neighbors {
                assert!(out.iter().any(|q| &q.id == n), "{id}: dangling {n}");
                assert_ne!(n, &p.id, "{id}: self loop");
            }
        }
    }
}

#[test]
fn same_seed_gives_identical_layouts() {
    let nodes = replicate_pool(&default_pool(), 25);
    for shape in ["brain", "top-down-brain", "fist", "partial-mesh-topology-demo"] {
        let a = layout_seeded(shape, &nodes, &params(), 42);
        let b = layout_seeded(shape, &nodes, &params(), 42);
        assert_eq!(a, b, "{shape}");
    }
}

#[test]
fn curve_layouts_ignore_randomness() {
    let nodes = replicate_pool(&default_pool(), 12);
    let a = layout_seeded("infinity2", &nodes, &params(), 1);
    let b = layout_seeded("infinity2", &nodes, &params(), 2);
    assert_eq!(a, b);
}

#[test]
fn unknown_shape_is_empty_when_permissive_and_an_error_when_strict() {
    let nodes = default_pool();
    assert!(layout("pentagon", &nodes, &params()).is_empty());
    let err = try_layout("pentagon", &nodes, &params(), &mut XorShift64Star::new(1))
        .expect_err("unknown shape");
    assert!(matches!(err, Error::UnknownShape { shape_id } if shape_id == "pentagon"));
}

#[test]
fn invalid_dimensions_are_rejected() {
    let nodes = default_pool();
    for (w, h) in [(0.0, 100.0), (100.0, -1.0), (f64::NAN, 100.0), (f64::INFINITY, 10.0)] {
        let p = ShapeParams::new(w, h);
        assert!(layout("brain", &nodes, &p).is_empty());
        assert!(matches!(
            try_layout("brain", &nodes, &p, &mut XorShift64Star::new(1)),
            Err(Error::InvalidDimensions { .. })
        ));
    }
}

#[test]
fn empty_input_yields_no_positions() {
    let out = try_layout("brain", &[], &params(), &mut XorShift64Star::new(1)).expect("empty");
    assert!(out.is_empty());
}

#[test]
fn drawn_shape_fills_the_supplied_outline() {
    let triangle = json!([{"x": 0.5, "y": 0.1}, {"x": 0.9, "y": 0.9}, {"x": 0.1, "y": 0.9}]);
    let p = ShapeParams::new(200.0, 200.0).with_knob("outline", triangle);
    let nodes = replicate_pool(&default_pool(), 20);
    let out = try_layout("drawn", &nodes, &p, &mut XorShift64Star::new(5)).expect("drawn");
    assert_eq!(out.len(), 20);
    assert!(out.iter().all(|q| q.y >= 20.0 && q.y <= 180.0));

    let missing = try_layout(
        "drawn",
        &nodes,
        &ShapeParams::new(200.0, 200.0),
        &mut XorShift64Star::new(5),
    );
    assert!(matches!(missing, Err(Error::InvalidOutline { .. })));
}

#[test]
fn scores_survive_into_the_output() {
    let nodes = vec![SkillNode::new("armbar", 9.0), SkillNode::new("guard", 2.0)];
    let out = layout_seeded("moebius", &nodes, &params(), 1);
    assert_eq!(out[0].score, Some(9.0));
    assert_eq!(out[1].score, Some(2.0));
}
