use crate::characters::{Character, create_character, create_custom_character};
use crate::config::{
    CartoonStripConfig, CharacterDef, FlowchartConfig, GenerateOptions, SequenceDiagramConfig,
};
use crate::layout::{compose_cartoon, compute_flowchart_layout, compute_sequence_layout};
use crate::render::{render_cartoon, render_flowchart, render_scene, render_sequence};
use crate::scene::{SceneType, detect_scene};
use crate::theme::Theme;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateResult {
    pub svg: String,
    pub scene: SceneType,
    pub width: f32,
    pub height: f32,
}

/// Renders a scene illustration for `title`. The scene comes from
/// `options.scene` when set, otherwise from keyword detection over the title
/// and `content`.
pub fn generate_svg(title: &str, content: &str, options: &GenerateOptions) -> GenerateResult {
    let theme = Theme::by_name(options.theme.as_deref());
    let scene = match options.scene {
        Some(scene) => scene,
        None => detect_scene(title, content),
    };
    tracing::debug!(
        %scene,
        forced = options.scene.is_some(),
        theme = %theme.name,
        "scene selected"
    );
    GenerateResult {
        svg: render_scene(scene, title, &theme, options.width, options.height),
        scene,
        width: options.width,
        height: options.height,
    }
}

pub fn generate_illustration(
    title: &str,
    content: &str,
    options: &GenerateOptions,
) -> GenerateResult {
    generate_svg(title, content, options)
}

pub fn generate_flowchart(config: &FlowchartConfig) -> String {
    let theme = Theme::by_name(config.theme.as_deref());
    let layout = compute_flowchart_layout(
        &config.nodes,
        &config.edges,
        config.direction,
        config.width,
        config.height,
    );
    render_flowchart(&layout, config.title.as_deref(), &theme)
}

pub fn generate_sequence_diagram(config: &SequenceDiagramConfig) -> String {
    let theme = Theme::by_name(config.theme.as_deref());
    let layout = compute_sequence_layout(
        &config.participants,
        &config.messages,
        config.width,
        config.height,
    );
    render_sequence(&layout, config.title.as_deref(), &theme)
}

pub fn generate_cartoon_strip(config: &CartoonStripConfig) -> String {
    let theme = Theme::by_name(config.theme.as_deref());
    let cast = build_cast(&config.characters);
    let layout = compose_cartoon(
        &config.panels,
        &cast,
        config.title.as_deref(),
        &config.layout,
        config.width,
        config.height,
    );
    tracing::debug!(
        panels = layout.panels.len(),
        cols = layout.grid.cols,
        rows = layout.grid.rows,
        "cartoon strip composed"
    );
    render_cartoon(&layout, &cast, &theme)
}

/// Resolves declared characters. A preset wins over a custom style; with
/// neither the character draws as `dev1`.
pub fn build_cast(defs: &BTreeMap<String, CharacterDef>) -> HashMap<String, Character> {
    defs.iter()
        .map(|(id, def)| {
            let name = def.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(id);
            let character = match (&def.preset, &def.style) {
                (Some(preset), _) => create_character(id, name, preset),
                (None, Some(style)) => create_custom_character(id, name, style),
                (None, None) => create_character(id, name, "dev1"),
            };
            (id.clone(), character)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::{HairStyle, StyleOverride, preset};
    use crate::ir::{CartoonPanel, DialogLine, FlowEdge, FlowNode, NodeType};

    #[test]
    fn detects_scene_when_not_forced() {
        let result = generate_svg(
            "Database Optimization",
            "indexing and query plans",
            &GenerateOptions::default(),
        );
        assert_eq!(result.scene, SceneType::Database);
        assert_eq!((result.width, result.height), (700.0, 420.0));
        assert!(result.svg.contains("Database Optimization"));
    }

    #[test]
    fn forced_scene_wins() {
        let options = GenerateOptions {
            scene: Some(SceneType::Success),
            theme: Some("nord".into()),
            ..GenerateOptions::default()
        };
        let result = generate_illustration("Database Optimization", "", &options);
        assert_eq!(result.scene, SceneType::Success);
        assert!(result.svg.contains(&Theme::nord().bg));
    }

    #[test]
    fn flowchart_with_dangling_edge() {
        let config = FlowchartConfig {
            nodes: vec![
                FlowNode::new("a", NodeType::Start, "Start"),
                FlowNode::new("b", NodeType::End, "End"),
            ],
            edges: vec![FlowEdge::new("a", "b"), FlowEdge::new("a", "ghost")],
            ..FlowchartConfig::default()
        };
        let svg = generate_flowchart(&config);
        assert_eq!(svg.matches("marker-end=").count(), 1);
    }

    #[test]
    fn cast_resolution_rules() {
        let mut defs = BTreeMap::new();
        defs.insert("a".to_string(), CharacterDef::default());
        defs.insert(
            "b".to_string(),
            CharacterDef {
                name: Some("Bea".into()),
                preset: Some("robot".into()),
                style: Some(StyleOverride {
                    primary: Some("#000000".into()),
                    ..StyleOverride::default()
                }),
            },
        );
        defs.insert(
            "c".to_string(),
            CharacterDef {
                style: Some(StyleOverride {
                    hair_style: Some(HairStyle::Spiky),
                    ..StyleOverride::default()
                }),
                ..CharacterDef::default()
            },
        );
        let cast = build_cast(&defs);
        assert_eq!(cast["a"].name, "a");
        assert_eq!(Some(cast["a"].style.clone()), preset("dev1"));
        assert_eq!(cast["b"].name, "Bea");
        assert_eq!(Some(cast["b"].style.clone()), preset("robot"));
        assert_eq!(cast["c"].style.hair_style, HairStyle::Spiky);
    }

    #[test]
    fn cartoon_strip_renders_every_panel() {
        let mut characters = BTreeMap::new();
        characters.insert("dev".to_string(), CharacterDef::preset("Dev", "dev3"));
        let config = CartoonStripConfig {
            title: Some("Friday deploy".into()),
            characters,
            panels: vec![
                CartoonPanel {
                    characters: vec!["dev".into()],
                    dialogue: vec![DialogLine::new("dev", "What could go wrong?")],
                    caption: None,
                },
                CartoonPanel {
                    characters: vec!["dev".into()],
                    dialogue: vec![],
                    caption: Some("Later".into()),
                },
            ],
            ..CartoonStripConfig::default()
        };
        let svg = generate_cartoon_strip(&config);
        assert_eq!(svg.matches("class=\"panel\"").count(), 2);
        assert!(svg.contains(">Dev</text>"));
    }
}
