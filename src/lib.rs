pub mod animations;
pub mod characters;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod generate;
pub mod icons;
pub mod ir;
pub mod layout;
pub mod layout_dump;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod parser;
pub mod primitives;
pub mod render;
pub mod scene;
pub mod theme;

pub use animations::{AnimationConfig, AnimationKind, AnimationRule, add_animations};
pub use characters::{Character, CharacterStyle, Emotion, create_character, render_character};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{
    CartoonStripConfig, CharacterDef, FlowchartConfig, GenerateOptions, SequenceDiagramConfig,
};
pub use generate::{
    GenerateResult, generate_cartoon_strip, generate_flowchart, generate_illustration,
    generate_sequence_diagram, generate_svg,
};
pub use ir::{Direction, FlowEdge, FlowNode, Message, Participant};
pub use layout::{compose_cartoon, compute_flowchart_layout, compute_sequence_layout};
pub use parser::{
    Description, DescriptionError, generate_from_json, generate_from_yaml, parse_json, parse_yaml,
};
pub use scene::{SceneType, available_scenes, detect_scene};
pub use theme::Theme;
