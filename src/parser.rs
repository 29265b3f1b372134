use crate::config::{
    CartoonStripConfig, CharacterDef, DEFAULT_DIAGRAM_HEIGHT, DEFAULT_DIAGRAM_WIDTH, DEFAULT_GRID,
    DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH, GenerateOptions, lenient_cast,
};
use crate::generate::{generate_cartoon_strip, generate_svg};
use crate::ir::{CartoonPanel, lenient_opt, lenient_text};
use crate::scene::SceneType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptionError {
    #[error("Invalid YAML: {0}")]
    Yaml(String),
    #[error("Invalid JSON: {0}")]
    Json(String),
    #[error("Invalid description: must be an object")]
    NotAnObject,
    #[error("Invalid description: missing \"type\" field (must be \"scene\" or \"cartoon\")")]
    MissingType,
    #[error("Invalid description type: \"{0}\" (must be \"scene\" or \"cartoon\")")]
    UnknownType(String),
    #[error("Invalid scene description: missing or invalid \"title\" field")]
    SceneTitle,
    #[error("Invalid cartoon description: missing \"characters\" field")]
    MissingCharacters,
    #[error("Invalid cartoon description: missing or empty \"panels\" array")]
    MissingPanels,
    #[error("Invalid panel {0}: missing \"characters\" array")]
    PanelCharacters(usize),
    #[error("Invalid panel {0}: missing \"dialogue\" array")]
    PanelDialogue(usize),
    #[error("Invalid dialogue in panel {panel}, line {line}: missing \"character\" field")]
    DialogueCharacter { panel: usize, line: usize },
    #[error("Invalid dialogue in panel {panel}, line {line}: missing \"text\" field")]
    DialogueText { panel: usize, line: usize },
    /// The shape passed validation but a field had the wrong type.
    #[error("Invalid description: {0}")]
    Shape(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub scene: Option<SceneType>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartoonDescription {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(deserialize_with = "lenient_cast")]
    pub characters: BTreeMap<String, CharacterDef>,
    pub panels: Vec<CartoonPanel>,
}

/// A validated declarative document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Description {
    Scene(SceneDescription),
    Cartoon(CartoonDescription),
}

impl Description {
    pub fn kind(&self) -> &'static str {
        match self {
            Description::Scene(_) => "scene",
            Description::Cartoon(_) => "cartoon",
        }
    }
}

impl From<CartoonDescription> for CartoonStripConfig {
    fn from(desc: CartoonDescription) -> Self {
        Self {
            title: desc.title,
            characters: desc.characters,
            panels: desc.panels,
            layout: desc.layout.unwrap_or_else(|| DEFAULT_GRID.to_string()),
            theme: desc.theme,
            width: desc.width.unwrap_or(DEFAULT_DIAGRAM_WIDTH),
            height: desc.height.unwrap_or(DEFAULT_DIAGRAM_HEIGHT),
        }
    }
}

pub fn parse_yaml(input: &str) -> Result<Description, DescriptionError> {
    let value: Value =
        serde_yaml::from_str(input).map_err(|err| DescriptionError::Yaml(err.to_string()))?;
    parse_value(value)
}

pub fn parse_json(input: &str) -> Result<Description, DescriptionError> {
    let value: Value =
        serde_json::from_str(input).map_err(|err| DescriptionError::Json(err.to_string()))?;
    parse_value(value)
}

/// Validates and decodes an already-parsed YAML or JSON document.
pub fn parse_value(value: Value) -> Result<Description, DescriptionError> {
    validate(&value)?;
    let description: Description = match Description::deserialize(&value) {
        Ok(description) => description,
        Err(err) => {
            let message = shape_location(&value)
                .unwrap_or_else(|| err.to_string());
            return Err(DescriptionError::Shape(message));
        }
    };
    tracing::debug!(kind = description.kind(), "description parsed");
    Ok(description)
}

/// Names the first cast entry or top-level field that fails typed decoding,
/// as `characters.bob: <reason>` or `width: <reason>`.
fn shape_location(value: &Value) -> Option<String> {
    if let Some(Value::Object(cast)) = value.get("characters") {
        for (id, def) in cast.iter().filter(|(_, def)| !def.is_null()) {
            if let Err(err) = CharacterDef::deserialize(def) {
                return Some(format!("characters.{id}: {err}"));
            }
        }
    }
    for key in ["title", "theme", "layout"] {
        if let Some(Err(err)) = value.get(key).map(Option::<String>::deserialize) {
            return Some(format!("{key}: {err}"));
        }
    }
    for key in ["width", "height"] {
        if let Some(Err(err)) = value.get(key).map(Option::<f32>::deserialize) {
            return Some(format!("{key}: {err}"));
        }
    }
    None
}

fn non_empty_str(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|text| !text.is_empty())
}

/// Structural checks on the raw document, run before typed decoding so the
/// first problem is reported with a stable message.
fn validate(value: &Value) -> Result<(), DescriptionError> {
    let object = match value {
        Value::Object(object) => object,
        Value::Array(_) => return Err(DescriptionError::MissingType),
        _ => return Err(DescriptionError::NotAnObject),
    };

    let kind = match object.get("type") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {
            return Err(DescriptionError::MissingType);
        }
        Some(Value::String(kind)) if kind.is_empty() => return Err(DescriptionError::MissingType),
        Some(Value::String(kind)) => kind.clone(),
        Some(other) => other.to_string(),
    };

    match kind.as_str() {
        "scene" => {
            if !non_empty_str(object.get("title")) {
                return Err(DescriptionError::SceneTitle);
            }
        }
        "cartoon" => {
            if !matches!(object.get("characters"), Some(Value::Object(_))) {
                return Err(DescriptionError::MissingCharacters);
            }
            let panels = match object.get("panels") {
                Some(Value::Array(panels)) if !panels.is_empty() => panels,
                _ => return Err(DescriptionError::MissingPanels),
            };
            for (i, panel) in panels.iter().enumerate() {
                if !matches!(panel.get("characters"), Some(Value::Array(_))) {
                    return Err(DescriptionError::PanelCharacters(i));
                }
                let Some(Value::Array(dialogue)) = panel.get("dialogue") else {
                    return Err(DescriptionError::PanelDialogue(i));
                };
                for (j, line) in dialogue.iter().enumerate() {
                    if !non_empty_str(line.get("character")) {
                        return Err(DescriptionError::DialogueCharacter { panel: i, line: j });
                    }
                    if !non_empty_str(line.get("text")) {
                        return Err(DescriptionError::DialogueText { panel: i, line: j });
                    }
                }
            }
        }
        _ => return Err(DescriptionError::UnknownType(kind)),
    }
    Ok(())
}

pub fn generate_from_description(description: &Description) -> String {
    match description {
        Description::Scene(scene) => {
            let options = GenerateOptions {
                width: scene.width.unwrap_or(DEFAULT_SCENE_WIDTH),
                height: scene.height.unwrap_or(DEFAULT_SCENE_HEIGHT),
                theme: scene.theme.clone(),
                scene: scene.scene,
            };
            generate_svg(&scene.title, &scene.content, &options).svg
        }
        Description::Cartoon(cartoon) => {
            generate_cartoon_strip(&CartoonStripConfig::from(cartoon.clone()))
        }
    }
}

pub fn generate_from_yaml(input: &str) -> Result<String, DescriptionError> {
    Ok(generate_from_description(&parse_yaml(input)?))
}

pub fn generate_from_json(input: &str) -> Result<String, DescriptionError> {
    Ok(generate_from_description(&parse_json(input)?))
}

pub const SCENE_YAML_EXAMPLE: &str = r#"type: scene
title: "Database Migration Strategy"
content: "PostgreSQL replication and failover"
scene: database
theme: github-dark
width: 700
height: 420"#;

pub const CARTOON_YAML_EXAMPLE: &str = r#"type: cartoon
title: "The Code Review"
theme: github-dark
width: 800
height: 500
layout: "2x1"

characters:
  alice:
    name: Alice
    preset: dev1
  bob:
    name: Bob
    preset: dev2

panels:
  - characters: [alice, bob]
    caption: "Monday morning..."
    dialogue:
      - character: alice
        text: "Did you see the PR I submitted?"
        emotion: neutral
      - character: bob
        text: "The one with 2000 lines?"
        emotion: surprised

  - characters: [alice, bob]
    caption: "Later..."
    dialogue:
      - character: bob
        text: "Maybe we should split this up?"
        emotion: thinking
      - character: alice
        text: "Good idea!"
        emotion: happy"#;

pub const CARTOON_JSON_EXAMPLE: &str = r#"{
  "type": "cartoon",
  "title": "Debugging Session",
  "theme": "dracula",
  "width": 800,
  "height": 400,
  "layout": "2x1",
  "characters": {
    "dev": {
      "name": "Dev",
      "preset": "dev1"
    },
    "rubber": {
      "name": "Rubber Duck",
      "preset": "robot"
    }
  },
  "panels": [
    {
      "characters": [
        "dev",
        "rubber"
      ],
      "dialogue": [
        {
          "character": "dev",
          "text": "Why isn't this working?!",
          "emotion": "angry"
        },
        {
          "character": "rubber",
          "text": "...",
          "emotion": "neutral"
        }
      ]
    },
    {
      "characters": [
        "dev",
        "rubber"
      ],
      "dialogue": [
        {
          "character": "dev",
          "text": "Oh wait, I see it now!",
          "emotion": "excited"
        },
        {
          "character": "rubber",
          "text": "...",
          "emotion": "neutral"
        }
      ]
    }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::Emotion;

    fn err_yaml(input: &str) -> String {
        parse_yaml(input).unwrap_err().to_string()
    }

    #[test]
    fn bundled_examples_parse() {
        match parse_yaml(SCENE_YAML_EXAMPLE).unwrap() {
            Description::Scene(scene) => {
                assert_eq!(scene.title, "Database Migration Strategy");
                assert_eq!(scene.scene, Some(SceneType::Database));
                assert_eq!(scene.width, Some(700.0));
            }
            other => panic!("expected a scene, got {}", other.kind()),
        }
        match parse_yaml(CARTOON_YAML_EXAMPLE).unwrap() {
            Description::Cartoon(cartoon) => {
                assert_eq!(cartoon.panels.len(), 2);
                assert_eq!(cartoon.panels[0].dialogue[1].emotion, Emotion::Surprised);
                assert_eq!(cartoon.characters["bob"].preset.as_deref(), Some("dev2"));
            }
            other => panic!("expected a cartoon, got {}", other.kind()),
        }
        assert_eq!(parse_json(CARTOON_JSON_EXAMPLE).unwrap().kind(), "cartoon");
    }

    #[test]
    fn structural_errors_are_reported_in_order() {
        assert_eq!(err_yaml("42"), "Invalid description: must be an object");
        assert_eq!(err_yaml("~"), "Invalid description: must be an object");
        assert_eq!(
            err_yaml("- a\n- b"),
            "Invalid description: missing \"type\" field (must be \"scene\" or \"cartoon\")"
        );
        assert_eq!(
            err_yaml("title: x"),
            "Invalid description: missing \"type\" field (must be \"scene\" or \"cartoon\")"
        );
        assert_eq!(
            err_yaml("type: poster"),
            "Invalid description type: \"poster\" (must be \"scene\" or \"cartoon\")"
        );
        assert_eq!(
            err_yaml("type: scene\ntitle: 5"),
            "Invalid scene description: missing or invalid \"title\" field"
        );
        assert_eq!(
            err_yaml("type: cartoon\npanels: []"),
            "Invalid cartoon description: missing \"characters\" field"
        );
        assert_eq!(
            err_yaml("type: cartoon\ncharacters: {}\npanels: []"),
            "Invalid cartoon description: missing or empty \"panels\" array"
        );
    }

    #[test]
    fn panel_and_dialogue_errors_carry_indices() {
        let missing_dialogue = "type: cartoon\ncharacters: {}\npanels:\n  - characters: []\n    dialogue: []\n  - characters: [a]\n";
        assert_eq!(err_yaml(missing_dialogue), "Invalid panel 1: missing \"dialogue\" array");

        let missing_chars = "type: cartoon\ncharacters: {}\npanels:\n  - dialogue: []\n";
        assert_eq!(err_yaml(missing_chars), "Invalid panel 0: missing \"characters\" array");

        let no_text = r#"{"type":"cartoon","characters":{},"panels":[{"characters":[],"dialogue":[{"character":"a","text":"hi"},{"character":"a","text":""}]}]}"#;
        assert_eq!(
            parse_json(no_text).unwrap_err().to_string(),
            "Invalid dialogue in panel 0, line 1: missing \"text\" field"
        );

        let no_speaker = r#"{"type":"cartoon","characters":{},"panels":[{"characters":[],"dialogue":[{"text":"hi"}]}]}"#;
        assert_eq!(
            parse_json(no_speaker).unwrap_err(),
            DescriptionError::DialogueCharacter { panel: 0, line: 0 }
        );
    }

    #[test]
    fn syntax_errors_are_prefixed() {
        assert!(parse_json("{not json").unwrap_err().to_string().starts_with("Invalid JSON: "));
        assert!(parse_yaml("a: [1, 2").unwrap_err().to_string().starts_with("Invalid YAML: "));
    }

    #[test]
    fn generates_both_kinds() {
        let scene = generate_from_yaml(SCENE_YAML_EXAMPLE).unwrap();
        assert!(scene.contains("Database Migration Strategy"));

        let strip = generate_from_json(CARTOON_JSON_EXAMPLE).unwrap();
        assert!(strip.contains(">Debugging Session</text>"));
        assert!(strip.contains(">Rubber Duck</text>"));
        assert!(strip.contains("width=\"800\" height=\"400\""));
    }

    #[test]
    fn scalar_panel_ids_and_captions_are_read_as_text() {
        let yaml = "type: cartoon\ncharacters:\n  a: {preset: dev1}\npanels:\n  - characters: [a, 7]\n    dialogue: []\n    caption: 2024\n";
        match parse_yaml(yaml).unwrap() {
            Description::Cartoon(cartoon) => {
                assert_eq!(cartoon.panels[0].characters, vec!["a", "7"]);
                assert_eq!(cartoon.panels[0].caption.as_deref(), Some("2024"));
            }
            other => panic!("expected a cartoon, got {}", other.kind()),
        }
        let svg = generate_from_yaml(yaml).unwrap();
        assert_eq!(svg.matches("class=\"character\"").count(), 1);
        assert!(svg.contains(">2024</text>"));
    }

    #[test]
    fn null_character_definitions_use_the_default_cast_member() {
        let yaml = "type: cartoon\ncharacters:\n  zed: ~\npanels:\n  - characters: [zed]\n    dialogue: []\n";
        match parse_yaml(yaml).unwrap() {
            Description::Cartoon(cartoon) => {
                assert_eq!(cartoon.characters["zed"], CharacterDef::default());
            }
            other => panic!("expected a cartoon, got {}", other.kind()),
        }
        assert!(generate_from_yaml(yaml).unwrap().contains(">zed</text>"));
    }

    #[test]
    fn decode_errors_name_the_offending_entry() {
        let bad_style = "type: cartoon\ncharacters:\n  a: {style: loud}\npanels:\n  - characters: [a]\n    dialogue: []\n";
        let err = err_yaml(bad_style);
        assert!(err.starts_with("Invalid description: characters.a: "), "{err}");

        let bad_width = "type: scene\ntitle: Hello\nwidth: wide\n";
        let err = err_yaml(bad_width);
        assert!(err.starts_with("Invalid description: width: "), "{err}");
    }

    #[test]
    fn character_names_default_to_their_key() {
        let yaml = "type: cartoon\ncharacters:\n  zed: {}\npanels:\n  - characters: [zed]\n    dialogue: []\n";
        let svg = generate_from_yaml(yaml).unwrap();
        assert!(svg.contains(">zed</text>"));
    }
}
