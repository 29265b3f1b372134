use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{ErrorData, ServerHandler, ServiceExt, tool, tool_handler, tool_router};

use crate::animations;
use crate::characters::{Emotion, PRESET_NAMES};
use crate::config::{
    CartoonStripConfig, DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH, FlowchartConfig,
    GenerateOptions, SequenceDiagramConfig,
};
use crate::generate::{
    generate_cartoon_strip, generate_flowchart, generate_sequence_diagram, generate_svg,
};
use crate::icons::icon_names;
use crate::ir::{BubbleKind, MessageKind, ParticipantKind};
use crate::parser::{generate_from_json, generate_from_yaml};
use crate::scene::{SceneType, available_scenes, detect_scene};
use crate::theme::THEME_NAMES;

use super::types::*;

fn tags<T: std::fmt::Display>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[derive(Clone)]
pub struct TechSvgMcp {
    tool_router: ToolRouter<Self>,
}

impl Default for TechSvgMcp {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl TechSvgMcp {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    #[tool(
        name = "generate_tech_illustration",
        description = "Generate a technical SVG illustration for a title. Detects the scene type (architecture, database, deployment, security, ...) unless one is forced."
    )]
    async fn generate_tech_illustration(
        &self,
        params: Parameters<IllustrationParams>,
    ) -> Result<Json<IllustrationResponse>, ErrorData> {
        let IllustrationParams {
            title,
            content,
            scene,
            theme,
            width,
            height,
        } = params.0;
        let scene = match scene.as_deref() {
            Some(tag) => Some(tag.parse::<SceneType>().map_err(|err| {
                ErrorData::invalid_params(
                    format!("invalid scene: {err}"),
                    Some(serde_json::json!({ "scene": tag })),
                )
            })?),
            None => None,
        };
        let options = GenerateOptions {
            width: width.unwrap_or(DEFAULT_SCENE_WIDTH),
            height: height.unwrap_or(DEFAULT_SCENE_HEIGHT),
            theme,
            scene,
        };
        let result = generate_svg(&title, content.as_deref().unwrap_or(""), &options);
        Ok(Json(IllustrationResponse {
            svg: result.svg,
            scene: result.scene.to_string(),
            width: result.width,
            height: result.height,
        }))
    }

    #[tool(
        name = "generate_cartoon_strip",
        description = "Generate a comic strip of characters talking in panels."
    )]
    async fn generate_cartoon_strip(
        &self,
        params: Parameters<CartoonStripConfig>,
    ) -> Result<Json<SvgResponse>, ErrorData> {
        if params.0.panels.is_empty() {
            return Err(ErrorData::invalid_params("at least one panel is required", None));
        }
        Ok(Json(SvgResponse {
            svg: generate_cartoon_strip(&params.0),
        }))
    }

    #[tool(
        name = "generate_sequence_diagram",
        description = "Generate a sequence diagram of messages between participants."
    )]
    async fn generate_sequence_diagram(
        &self,
        params: Parameters<SequenceDiagramConfig>,
    ) -> Result<Json<SvgResponse>, ErrorData> {
        Ok(Json(SvgResponse {
            svg: generate_sequence_diagram(&params.0),
        }))
    }

    #[tool(
        name = "generate_flowchart",
        description = "Generate a flowchart from typed nodes and edges, top-to-bottom (TB) or left-to-right (LR)."
    )]
    async fn generate_flowchart(
        &self,
        params: Parameters<FlowchartConfig>,
    ) -> Result<Json<SvgResponse>, ErrorData> {
        Ok(Json(SvgResponse {
            svg: generate_flowchart(&params.0),
        }))
    }

    #[tool(
        name = "generate_from_yaml",
        description = "Generate SVG from a YAML scene or cartoon description."
    )]
    async fn generate_from_yaml(
        &self,
        params: Parameters<YamlParams>,
    ) -> Result<Json<SvgResponse>, ErrorData> {
        let svg = generate_from_yaml(&params.0.yaml)
            .map_err(|err| ErrorData::invalid_params(err.to_string(), None))?;
        Ok(Json(SvgResponse { svg }))
    }

    #[tool(
        name = "generate_from_json",
        description = "Generate SVG from a JSON scene or cartoon description."
    )]
    async fn generate_from_json(
        &self,
        params: Parameters<JsonParams>,
    ) -> Result<Json<SvgResponse>, ErrorData> {
        let svg = generate_from_json(&params.0.json)
            .map_err(|err| ErrorData::invalid_params(err.to_string(), None))?;
        Ok(Json(SvgResponse { svg }))
    }

    #[tool(
        name = "detect_scene",
        description = "Pick the scene type for a title and optional content without rendering."
    )]
    async fn detect_scene(
        &self,
        params: Parameters<DetectSceneParams>,
    ) -> Result<Json<DetectSceneResponse>, ErrorData> {
        let DetectSceneParams { title, content } = params.0;
        let scene = detect_scene(&title, content.as_deref().unwrap_or(""));
        Ok(Json(DetectSceneResponse {
            scene: scene.to_string(),
        }))
    }

    #[tool(
        name = "list_resources",
        description = "List themes, scenes, character presets, emotions, icons and diagram element types."
    )]
    async fn list_resources(&self) -> Result<Json<ResourcesResponse>, ErrorData> {
        Ok(Json(ResourcesResponse {
            themes: tags(&THEME_NAMES),
            scenes: tags(&available_scenes()),
            character_presets: tags(&PRESET_NAMES),
            emotions: tags(Emotion::ALL),
            participant_types: tags(ParticipantKind::ALL),
            message_types: tags(MessageKind::ALL),
            speech_types: tags(BubbleKind::ALL),
            icons: tags(&icon_names()),
            animations: tags(&animations::PRESET_NAMES),
        }))
    }
}

#[tool_handler]
impl ServerHandler for TechSvgMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Technical SVG generator (tools: generate_tech_illustration, generate_cartoon_strip, generate_sequence_diagram, generate_flowchart, generate_from_yaml, generate_from_json, detect_scene, list_resources)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
