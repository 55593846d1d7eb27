use serde_json::json;
use skillshape::{ShapeParams, SkillNode, Topology, XorShift64Star, layout_seeded, try_layout};

fn letters(n: usize) -> Vec<SkillNode> {
    ["A", "B", "C", "D", "E", "F", "G", "H"][..n]
        .iter()
        .map(|id| SkillNode::new(*id, 5.0))
        .collect()
}

fn neighbors_of<'a>(out: &'a [skillshape::NodePosition], id: &str) -> Vec<&'a str> {
    let mut n: Vec<&str> = out
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.neighbors.iter().map(String::as_str).collect())
        .unwrap_or_default();
    n.sort_unstable();
    n
}

#[test]
fn ring_demo_wires_a_six_cycle() {
    let out = layout_seeded(
        "ring-topology-demo",
        &letters(6),
        &ShapeParams::new(600.0, 400.0),
        1,
    );
    assert_eq!(out.len(), 6);
    assert_eq!(neighbors_of(&out, "A"), ["B", "F"]);
    assert_eq!(neighbors_of(&out, "C"), ["B", "D"]);
    assert_eq!(neighbors_of(&out, "F"), ["A", "E"]);
}

#[test]
fn star_demo_puts_the_first_node_at_the_hub() {
    let out = layout_seeded(
        "star-topology-demo",
        &letters(5),
        &ShapeParams::new(600.0, 400.0),
        1,
    );
    assert_eq!(neighbors_of(&out, "A"), ["B", "C", "D", "E"]);
    for id in ["B", "C", "D", "E"] {
        assert_eq!(neighbors_of(&out, id), ["A"]);
    }
}

#[test]
fn every_generator_is_symmetric() {
    let mut rng = XorShift64Star::new(9);
    for t in Topology::ALL {
        for n in [0, 1, 2, 5, 17] {
            let adj = t.generate(n, &mut rng);
            assert_eq!(adj.len(), n, "{t}");
            assert!(skillshape::graph::is_symmetric(&adj), "{t} n={n}");
        }
    }
}

#[test]
fn topology_knob_rewires_any_shape_by_node_order() {
    let params = ShapeParams::new(600.0, 400.0).with_knob("topology", json!("chain"));
    let out = layout_seeded("brain", &letters(8), &params, 3);
    assert_eq!(out.len(), 8);
    assert_eq!(neighbors_of(&out, "A"), ["B"]);
    assert_eq!(neighbors_of(&out, "D"), ["C", "E"]);
    assert_eq!(neighbors_of(&out, "H"), ["G"]);
}

#[test]
fn unknown_topology_knob_fails_strict_layouts() {
    let params = ShapeParams::new(600.0, 400.0).with_knob("topology", json!("spiral"));
    let err = try_layout("moebius", &letters(4), &params, &mut XorShift64Star::new(1))
        .expect_err("unknown topology");
    assert!(matches!(err, skillshape::Error::UnknownTopology { .. }));
    assert!(layout_seeded("moebius", &letters(4), &params, 1).is_empty());
}

#[test]
fn none_topology_clears_neighbors() {
    let params = ShapeParams::new(600.0, 400.0).with_knob("topology", json!("none"));
    let out = layout_seeded("brain3", &letters(8), &params, 3);
    assert!(out.iter().all(|p| p.neighbors.is_empty()));
}
