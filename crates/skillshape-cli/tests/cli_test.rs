use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("skillshape-cli"))
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("stdout is JSON")
}

#[test]
fn cli_lists_shapes() {
    let out = cli().arg("shapes").assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).expect("utf-8");
    let names: Vec<&str> = text.lines().collect();
    assert!(names.contains(&"brain3"));
    assert!(names.contains(&"ring-topology-demo"));
    assert!(names.contains(&"fist1"));
}

#[test]
fn cli_lays_out_the_default_pool_reproducibly() {
    let args = ["layout", "brain", "--count", "24", "--seed", "7"];
    let a = stdout_json(cli().args(args));
    let b = stdout_json(cli().args(args));
    assert_eq!(a, b);
    let nodes = a.as_array().expect("array");
    assert_eq!(nodes.len(), 24);
    assert!(nodes[0].get("neighbors").is_some());
    assert!(nodes[0].get("brightness").is_some());
}

#[test]
fn cli_reads_nodes_and_config_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let nodes = tmp.path().join("nodes.json");
    fs::write(
        &nodes,
        r#"[{"id":"A","score":5},{"id":"B","score":5},{"id":"C","score":5},{"id":"D","score":5}]"#,
    )
    .expect("write nodes");
    let config = tmp.path().join("config.json");
    fs::write(&config, r#"{"topology":"ring"}"#).expect("write config");

    let out = stdout_json(cli().args([
        "layout",
        "infinity",
        "--seed",
        "1",
        "--nodes",
        nodes.to_string_lossy().as_ref(),
        "--config",
        config.to_string_lossy().as_ref(),
    ]));
    let first = &out.as_array().expect("array")[0];
    let mut neighbors: Vec<&str> = first["neighbors"]
        .as_array()
        .expect("neighbors")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    neighbors.sort_unstable();
    assert_eq!(neighbors, ["B", "D"]);

    // Flags win over the config file.
    let out = stdout_json(cli().args([
        "layout",
        "infinity",
        "--nodes",
        nodes.to_string_lossy().as_ref(),
        "--config",
        config.to_string_lossy().as_ref(),
        "--topology",
        "none",
    ]));
    assert!(
        out.as_array()
            .expect("array")
            .iter()
            .all(|n| n["neighbors"].as_array().is_some_and(|a| a.is_empty()))
    );
}

#[test]
fn cli_unknown_shape_is_empty_unless_strict() {
    let out = stdout_json(cli().args(["layout", "pentagon"]));
    assert_eq!(out, Value::Array(Vec::new()));

    cli()
        .args(["layout", "pentagon", "--strict"])
        .assert()
        .code(3);
}

#[test]
fn cli_prints_outlines() {
    let out = stdout_json(cli().args(["outline", "brain3", "--width", "400", "--height", "300"]));
    let parts = out.as_object().expect("object");
    assert!(parts.contains_key("semicircle"));
    assert!(parts.contains_key("triangle"));
    let first = &parts["semicircle"][0];
    assert!(first["x"].is_number() && first["y"].is_number());
}

#[test]
fn cli_rejects_bad_usage() {
    cli().assert().code(2);
    cli().args(["layout"]).assert().code(2);
    cli().args(["layout", "brain", "--width", "-5"]).assert().code(2);
    cli().args(["layout", "brain", "--bogus"]).assert().code(2);
}
