use std::path::Path;

use tech_svg_generator::ir::NodeType;
use tech_svg_generator::{
    Direction, FlowEdge, FlowNode, FlowchartConfig, SequenceDiagramConfig,
    compute_flowchart_layout, compute_sequence_layout, generate_flowchart, generate_from_json,
    generate_from_yaml, generate_sequence_diagram,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.starts_with("<?xml"), "{fixture}: missing xml prolog");
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.ends_with("</svg>"), "{fixture}: missing </svg tag");
    assert!(!svg.contains("NaN"), "{fixture}: NaN coordinate");
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("fixture read failed")
}

fn render_fixture(path: &Path) -> String {
    let input = read(path);
    let kind = path
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    match kind {
        "flowchart" => {
            let config: FlowchartConfig = serde_yaml::from_str(&input).expect("flowchart parse");
            generate_flowchart(&config)
        }
        "sequence" => {
            let config: SequenceDiagramConfig =
                serde_yaml::from_str(&input).expect("sequence parse");
            generate_sequence_diagram(&config)
        }
        _ if is_json => generate_from_json(&input).expect("description parse"),
        _ => generate_from_yaml(&input).expect("description parse"),
    }
}

fn fixtures_root() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[test]
fn render_all_fixtures() {
    let root = fixtures_root();

    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "scene/database.yaml",
        "scene/forced.json",
        "cartoon/standup.yaml",
        "cartoon/grid.json",
        "flowchart/release.yaml",
        "sequence/login.yaml",
    ];

    for fixture in candidates {
        let path = root.join(fixture);
        assert!(path.exists(), "fixture missing: {fixture}");
        let svg = render_fixture(&path);
        assert_valid_svg(&svg, fixture);
    }
}

#[test]
fn scene_fixtures_honor_size_and_theme() {
    let root = fixtures_root();
    let forced = render_fixture(&root.join("scene/forced.json"));
    assert!(forced.contains("width=\"900\" height=\"500\""));
    assert!(forced.contains(">Quarterly Planning</text>"));

    let detected = render_fixture(&root.join("scene/database.yaml"));
    assert!(detected.contains("width=\"700\" height=\"420\""));
}

#[test]
fn cartoon_fixture_draws_every_panel_and_bubble() {
    let svg = render_fixture(&fixtures_root().join("cartoon/standup.yaml"));
    assert_eq!(svg.matches("class=\"panel\"").count(), 2);
    assert_eq!(svg.matches("class=\"character\"").count(), 3);
    assert_eq!(svg.matches("class=\"thought-bubble\"").count(), 1);
    assert_eq!(svg.matches("class=\"shout-bubble\"").count(), 1);
    assert!(svg.contains(">Daily Standup</text>"));
    assert!(svg.contains("Ten minutes later"));

    let grid = render_fixture(&fixtures_root().join("cartoon/grid.json"));
    assert_eq!(grid.matches("class=\"panel\"").count(), 3);
}

#[test]
fn flowchart_fixture_places_loop_back_without_deepening() {
    let input = read(&fixtures_root().join("flowchart/release.yaml"));
    let config: FlowchartConfig = serde_yaml::from_str(&input).unwrap();
    let layout = compute_flowchart_layout(
        &config.nodes,
        &config.edges,
        config.direction,
        config.width,
        config.height,
    );
    assert_eq!(layout.level_of("start"), Some(0));
    assert_eq!(layout.level_of("build"), Some(1));
    assert_eq!(layout.level_of("tests"), Some(2));
    assert_eq!(layout.level_of("ship"), Some(3));
    assert_eq!(layout.level_of("fix"), Some(3));

    let svg = generate_flowchart(&config);
    assert_eq!(svg.matches("class=\"node\"").count(), 5);
}

#[test]
fn sequence_fixture_draws_every_participant() {
    let svg = render_fixture(&fixtures_root().join("sequence/login.yaml"));
    assert_eq!(svg.matches("class=\"participant\"").count(), 3);
    assert!(svg.contains(">POST /login</text>"));
    assert!(svg.contains(">Login</text>"));
}

#[test]
fn invalid_descriptions_report_their_first_problem() {
    let err = generate_from_yaml("type: cartoon\ncharacters: {}\npanels: []\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid cartoon description: missing or empty \"panels\" array"
    );
    let err = generate_from_json(r#"{"type":"scene","title":""}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid scene description: missing or invalid \"title\" field"
    );
}

#[test]
fn yaml_and_json_descriptions_render_identically() {
    let yaml = "type: cartoon\nlayout: 2x1\ncharacters:\n  a: {preset: dev2}\npanels:\n  - characters: [a]\n    dialogue:\n      - {character: a, text: \"hello there\", emotion: happy}\n";
    let json = r#"{"type":"cartoon","layout":"2x1","characters":{"a":{"preset":"dev2"}},"panels":[{"characters":["a"],"dialogue":[{"character":"a","text":"hello there","emotion":"happy"}]}]}"#;
    assert_eq!(generate_from_yaml(yaml).unwrap(), generate_from_json(json).unwrap());
}

#[test]
fn sequence_rows_grow_monotonically() {
    let input = read(&fixtures_root().join("sequence/login.yaml"));
    let config: SequenceDiagramConfig = serde_yaml::from_str(&input).unwrap();
    let layout =
        compute_sequence_layout(
            &config.participants,
            &config.messages,
            config.width,
            config.height,
        );
    assert_eq!(layout.messages.len(), config.messages.len());
    for pair in layout.messages.windows(2) {
        assert!(pair[0].y < pair[1].y, "rows out of order: {} >= {}", pair[0].y, pair[1].y);
    }
    assert!(layout.messages.iter().filter(|m| m.is_self).count() == 1);
}

#[test]
fn nodes_no_root_reaches_are_omitted() {
    let nodes = vec![
        FlowNode::new("a", NodeType::Start, "A"),
        FlowNode::new("b", NodeType::Process, "B"),
        FlowNode::new("c", NodeType::Process, "C"),
    ];
    let edges = vec![FlowEdge::new("b", "c"), FlowEdge::new("c", "b")];
    let layout = compute_flowchart_layout(&nodes, &edges, Direction::TopDown, 800.0, 600.0);
    assert!(layout.node("a").is_some());
    assert!(layout.node("b").is_none());
    assert!(layout.node("c").is_none());
}
