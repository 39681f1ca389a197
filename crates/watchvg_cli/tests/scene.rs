use std::path::PathBuf;

use watchvg_cli::{report, SceneConfig};
use watchvg_core::PathCommand;

fn demo_scene() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenes/demo.toml")
}

#[test]
fn test_demo_scene_loads() {
    let config = SceneConfig::load_from_file(&demo_scene()).unwrap();
    assert_eq!(config.scene.name, "activity");
    assert_eq!(config.arcs.len(), 2);
    assert_eq!(config.curves.len(), 2);
    assert_eq!(config.gradients.len(), 1);
    assert_eq!(config.motions.len(), 2);
    assert_eq!(config.hands.len(), 1);
    assert_eq!(config.len(), 8);
}

#[test]
fn test_demo_scene_evaluates() {
    let config = SceneConfig::load_from_file(&demo_scene()).unwrap();
    let scene = report::scene(&config).unwrap();

    for arc in &scene.arcs {
        assert_eq!(arc.path.commands().last(), Some(&PathCommand::Close));
    }
    for curve in &scene.curves {
        assert!(curve.path.is_closed());
        assert_eq!(curve.samples, 12);
    }

    let heart = &scene.gradients[0];
    assert_eq!(heart.samples[0].color, "#FF2E7D32");
    assert_eq!(heart.samples[2].color, "#FFF9A825");
    assert_eq!(heart.samples[4].color, "#FFC62828");
    assert_eq!(heart.table.len(), 8);

    let fill = &scene.motions[0];
    assert_eq!(fill.frames.first().map(|f| f.value), Some(0.0));
    assert_eq!(fill.frames.last().map(|f| (f.t_ms, f.value)), Some((800, 250.0)));

    let pop = &scene.motions[1];
    assert!(pop.frames.iter().all(|f| f.value <= 1.0));
    assert_eq!(pop.frames.last().map(|f| f.value), Some(1.0));

    let hands = &scene.hands[0];
    assert!(hands.angles.minute > 48.0 && hands.angles.minute < 54.0);
}

#[test]
fn test_scene_report_json() {
    let config = SceneConfig::load_from_file(&demo_scene()).unwrap();
    let scene = report::scene(&config).unwrap();
    let json: serde_json::Value = serde_json::to_value(&scene).unwrap();

    assert_eq!(json["name"], "activity");
    assert_eq!(json["arcs"][0]["name"], "steps-ring");
    assert_eq!(json["arcs"][0]["path"]["commands"][0]["op"], "move_to");
    assert_eq!(json["motions"][1]["motion"]["curve"]["kind"], "bounce");
}

#[test]
fn test_missing_scene_file() {
    let err = SceneConfig::load_from_file(&demo_scene().with_file_name("missing.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_invalid_scene_reports_item() {
    let config = SceneConfig::from_toml(
        r##"
        [[gradient]]
        name = "broken"
        colors = ["#FF000000", "#FFFFFFFF"]
        stops = [0.8, 0.2]
        "##,
    )
    .unwrap();
    let message = format!("{:#}", report::scene(&config).unwrap_err());
    assert!(message.contains("'broken'"), "{message}");
    assert!(message.contains("before the previous stop"), "{message}");
}
