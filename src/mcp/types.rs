use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IllustrationParams {
    /// Title or topic, e.g. "Database Replication" or "CI/CD Pipeline".
    pub title: String,
    /// Extra text used for scene detection.
    #[serde(default)]
    pub content: Option<String>,
    /// Forces a scene type instead of detecting one.
    #[serde(default)]
    pub scene: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IllustrationResponse {
    pub svg: String,
    pub scene: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SvgResponse {
    pub svg: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct YamlParams {
    /// YAML document with `type: scene` or `type: cartoon`.
    pub yaml: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JsonParams {
    /// JSON document with `"type": "scene"` or `"type": "cartoon"`.
    pub json: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DetectSceneParams {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DetectSceneResponse {
    pub scene: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesResponse {
    pub themes: Vec<String>,
    pub scenes: Vec<String>,
    pub character_presets: Vec<String>,
    pub emotions: Vec<String>,
    pub participant_types: Vec<String>,
    pub message_types: Vec<String>,
    pub speech_types: Vec<String>,
    pub icons: Vec<String>,
    pub animations: Vec<String>,
}
