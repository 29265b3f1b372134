use crate::characters::StyleOverride;
use crate::ir::{
    CartoonPanel, Direction, FlowEdge, FlowNode, Message, Participant, lenient, lenient_opt,
    lenient_text,
};
use crate::scene::SceneType;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_SCENE_WIDTH: f32 = 700.0;
pub const DEFAULT_SCENE_HEIGHT: f32 = 420.0;
pub const DEFAULT_DIAGRAM_WIDTH: f32 = 800.0;
pub const DEFAULT_DIAGRAM_HEIGHT: f32 = 600.0;
pub const DEFAULT_GRID: &str = "auto";

fn scene_width() -> f32 {
    DEFAULT_SCENE_WIDTH
}

fn scene_height() -> f32 {
    DEFAULT_SCENE_HEIGHT
}

fn diagram_width() -> f32 {
    DEFAULT_DIAGRAM_WIDTH
}

fn diagram_height() -> f32 {
    DEFAULT_DIAGRAM_HEIGHT
}

fn auto_grid() -> String {
    DEFAULT_GRID.to_string()
}

/// Options for a single scene illustration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct GenerateOptions {
    #[serde(default = "scene_width")]
    pub width: f32,
    #[serde(default = "scene_height")]
    pub height: f32,
    #[serde(default)]
    pub theme: Option<String>,
    /// Forces a scene instead of detecting one from the text.
    #[serde(default, deserialize_with = "lenient_opt")]
    pub scene: Option<SceneType>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCENE_WIDTH,
            height: DEFAULT_SCENE_HEIGHT,
            theme: None,
            scene: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct FlowchartConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
    #[serde(default, deserialize_with = "lenient")]
    pub direction: Direction,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default = "diagram_width")]
    pub width: f32,
    #[serde(default = "diagram_height")]
    pub height: f32,
}

impl Default for FlowchartConfig {
    fn default() -> Self {
        Self {
            title: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            direction: Direction::TopDown,
            theme: None,
            width: DEFAULT_DIAGRAM_WIDTH,
            height: DEFAULT_DIAGRAM_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct SequenceDiagramConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default = "diagram_width")]
    pub width: f32,
    #[serde(default = "diagram_height")]
    pub height: f32,
}

impl Default for SequenceDiagramConfig {
    fn default() -> Self {
        Self {
            title: None,
            participants: Vec::new(),
            messages: Vec::new(),
            theme: None,
            width: DEFAULT_DIAGRAM_WIDTH,
            height: DEFAULT_DIAGRAM_HEIGHT,
        }
    }
}

/// A cast member as declared in a strip. `name` falls back to the map key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct CharacterDef {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub style: Option<StyleOverride>,
}

impl CharacterDef {
    pub fn preset(name: &str, preset: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            preset: Some(preset.to_string()),
            style: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct CartoonStripConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_cast")]
    pub characters: BTreeMap<String, CharacterDef>,
    #[serde(default)]
    pub panels: Vec<CartoonPanel>,
    /// `"auto"` or `<cols>x<rows>`.
    #[serde(default = "auto_grid")]
    pub layout: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default = "diagram_width")]
    pub width: f32,
    #[serde(default = "diagram_height")]
    pub height: f32,
}

impl Default for CartoonStripConfig {
    fn default() -> Self {
        Self {
            title: None,
            characters: BTreeMap::new(),
            panels: Vec::new(),
            layout: auto_grid(),
            theme: None,
            width: DEFAULT_DIAGRAM_WIDTH,
            height: DEFAULT_DIAGRAM_HEIGHT,
        }
    }
}

/// Reads a cast map where a null entry stands for a default character.
pub(crate) fn lenient_cast<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, CharacterDef>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<CharacterDef>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(id, def)| (id, def.unwrap_or_default()))
        .collect())
}

/// Command-line defaults read from a JSON5 file. Every field is optional;
/// explicit flags win over these.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    pub theme: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub layout: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub direction: Option<Direction>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let Some(path) = path else {
        return Ok(ConfigFile::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)
        .map_err(|err| anyhow::anyhow!("invalid config {}: {err}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::NodeType;

    #[test]
    fn defaults_fill_missing_fields() {
        let flow: FlowchartConfig = serde_json::from_str(r#"{"nodes":[{"id":"a"}]}"#).unwrap();
        assert_eq!((flow.width, flow.height), (800.0, 600.0));
        assert_eq!(flow.direction, Direction::TopDown);
        assert_eq!(flow.nodes[0].kind, NodeType::Process);

        let strip: CartoonStripConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(strip.layout, "auto");

        let opts: GenerateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, GenerateOptions::default());
    }

    #[test]
    fn unknown_enum_values_are_tolerated() {
        let flow: FlowchartConfig = serde_json::from_str(r#"{"direction":"sideways"}"#).unwrap();
        assert_eq!(flow.direction, Direction::TopDown);
        let flow: FlowchartConfig = serde_json::from_str(r#"{"direction":"LR"}"#).unwrap();
        assert_eq!(flow.direction, Direction::LeftRight);

        let opts: GenerateOptions = serde_json::from_str(r#"{"scene":"nonsense"}"#).unwrap();
        assert_eq!(opts.scene, Some(SceneType::Default));
    }

    #[test]
    fn loads_json5_config_file() {
        let dir = std::env::temp_dir().join(format!("techsvg-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("techsvg.json5");
        std::fs::write(
            &path,
            "{\n  // house style\n  theme: 'nord',\n  width: 900,\n  direction: 'LR',\n}\n",
        )
        .unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.theme.as_deref(), Some("nord"));
        assert_eq!(config.width, Some(900.0));
        assert_eq!(config.height, None);
        assert_eq!(config.direction, Some(Direction::LeftRight));
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(load_config(None).unwrap(), ConfigFile::default());
    }
}
