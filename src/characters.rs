use serde::{Deserialize, Serialize};

use crate::ir::{lenient, tag_enum};
use crate::primitives::escape_xml;

const FEATURE_INK: &str = "#374151";
const NAME_TAG_FILL: &str = "#9ca3af";

tag_enum! {
    pub enum Emotion {
        Neutral => "neutral",
        Happy => "happy",
        Sad => "sad",
        Angry => "angry",
        Surprised => "surprised",
        Thinking => "thinking",
        Confused => "confused",
        Excited => "excited",
        Worried => "worried",
    }
    default = Neutral;
}

tag_enum! {
    pub enum HairStyle {
        Short => "short",
        Long => "long",
        Bald => "bald",
        Spiky => "spiky",
        Curly => "curly",
    }
    default = Short;
}

tag_enum! {
    pub enum Accessory {
        None => "none",
        Glasses => "glasses",
        Hat => "hat",
        Headphones => "headphones",
    }
    default = None;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStyle {
    pub primary: String,
    pub secondary: String,
    pub skin: String,
    #[serde(default, deserialize_with = "lenient")]
    pub hair_style: HairStyle,
    #[serde(default, deserialize_with = "lenient")]
    pub accessory: Accessory,
}

/// Partial style as written in descriptions; unset fields come from `dev1`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct StyleOverride {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub skin: Option<String>,
    #[serde(default, deserialize_with = "crate::ir::lenient_opt")]
    pub hair_style: Option<HairStyle>,
    #[serde(default, deserialize_with = "crate::ir::lenient_opt")]
    pub accessory: Option<Accessory>,
}

impl StyleOverride {
    pub fn merge_over(&self, base: CharacterStyle) -> CharacterStyle {
        CharacterStyle {
            primary: self.primary.clone().unwrap_or(base.primary),
            secondary: self.secondary.clone().unwrap_or(base.secondary),
            skin: self.skin.clone().unwrap_or(base.skin),
            hair_style: self.hair_style.unwrap_or(base.hair_style),
            accessory: self.accessory.unwrap_or(base.accessory),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub style: CharacterStyle,
}

pub const PRESET_NAMES: [&str; 6] = ["dev1", "dev2", "dev3", "dev4", "dev5", "robot"];

pub fn preset(name: &str) -> Option<CharacterStyle> {
    let (primary, secondary, skin, hair_style, accessory) = match name {
        "dev1" => (
            "#6366f1",
            "#3b82f6",
            "#fcd5b8",
            HairStyle::Short,
            Accessory::Glasses,
        ),
        "dev2" => (
            "#8b5cf6",
            "#10b981",
            "#d4a574",
            HairStyle::Curly,
            Accessory::None,
        ),
        "dev3" => (
            "#f59e0b",
            "#ef4444",
            "#fce7d6",
            HairStyle::Long,
            Accessory::Headphones,
        ),
        "dev4" => (
            "#1f2937",
            "#6366f1",
            "#8d6e4c",
            HairStyle::Spiky,
            Accessory::None,
        ),
        "dev5" => (
            "#ec4899",
            "#8b5cf6",
            "#fcd5b8",
            HairStyle::Short,
            Accessory::Hat,
        ),
        "robot" => (
            "#6b7280",
            "#3b82f6",
            "#d1d5db",
            HairStyle::Bald,
            Accessory::None,
        ),
        _ => return None,
    };
    Some(CharacterStyle {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        skin: skin.to_string(),
        hair_style,
        accessory,
    })
}

fn default_style() -> CharacterStyle {
    preset("dev1").unwrap_or_else(|| CharacterStyle {
        primary: "#6366f1".to_string(),
        secondary: "#3b82f6".to_string(),
        skin: "#fcd5b8".to_string(),
        hair_style: HairStyle::Short,
        accessory: Accessory::Glasses,
    })
}

/// Builds a character from a preset name; unknown presets draw as `dev1`.
pub fn create_character(id: &str, name: &str, preset_name: &str) -> Character {
    Character {
        id: id.to_string(),
        name: name.to_string(),
        style: preset(preset_name).unwrap_or_else(default_style),
    }
}

pub fn create_custom_character(id: &str, name: &str, style: &StyleOverride) -> Character {
    Character {
        id: id.to_string(),
        name: name.to_string(),
        style: style.merge_over(default_style()),
    }
}

struct Features {
    eyes: &'static str,
    mouth: &'static str,
    eyebrows: &'static str,
}

fn features(emotion: Emotion) -> Features {
    let (eyes, mouth, eyebrows) = match emotion {
        Emotion::Neutral => (
            "M-6,-2 a2,2 0 1,0 4,0 a2,2 0 1,0 -4,0 M2,-2 a2,2 0 1,0 4,0 a2,2 0 1,0 -4,0",
            "M-4,6 Q0,8 4,6",
            "M-7,-6 L-3,-6 M3,-6 L7,-6",
        ),
        Emotion::Happy => (
            "M-6,-2 Q-4,-4 -2,-2 M2,-2 Q4,-4 6,-2",
            "M-5,5 Q0,10 5,5",
            "M-7,-7 L-3,-5 M3,-5 L7,-7",
        ),
        Emotion::Sad => (
            "M-6,-1 a2,2 0 1,0 4,0 a2,2 0 1,0 -4,0 M2,-1 a2,2 0 1,0 4,0 a2,2 0 1,0 -4,0",
            "M-4,8 Q0,5 4,8",
            "M-7,-5 L-3,-7 M3,-7 L7,-5",
        ),
        Emotion::Angry => (
            "M-6,-2 a1.5,1.5 0 1,0 3,0 a1.5,1.5 0 1,0 -3,0 M3,-2 a1.5,1.5 0 1,0 3,0 a1.5,1.5 0 1,0 -3,0",
            "M-4,7 L0,5 L4,7",
            "M-7,-4 L-3,-7 M3,-7 L7,-4",
        ),
        Emotion::Surprised => (
            "M-6,-2 a3,3 0 1,0 6,0 a3,3 0 1,0 -6,0 M2,-2 a3,3 0 1,0 6,0 a3,3 0 1,0 -6,0",
            "M-2,6 a3,3 0 1,0 6,0 a3,3 0 1,0 -6,0",
            "M-7,-8 L-3,-8 M3,-8 L7,-8",
        ),
        Emotion::Thinking => (
            "M-6,-2 a2,2 0 1,0 4,0 a2,2 0 1,0 -4,0 M2,-1 L6,-3",
            "M-3,7 Q2,7 4,5",
            "M-7,-6 L-3,-6 M3,-7 L7,-5",
        ),
        Emotion::Confused => (
            "M-6,-2 a2,2 0 1,0 4,0 a2,2 0 1,0 -4,0 M2,-2 a2,2 0 1,0 4,0 a2,2 0 1,0 -4,0",
            "M-3,6 Q0,8 3,6 Q4,5 5,6",
            "M-7,-5 L-3,-7 M3,-6 L7,-6",
        ),
        Emotion::Excited => (
            "M-7,-2 L-5,0 L-3,-2 M3,-2 L5,0 L7,-2",
            "M-5,4 Q0,11 5,4",
            "M-7,-8 L-3,-6 M3,-6 L7,-8",
        ),
        Emotion::Worried => (
            "M-6,-1 a2,2 0 1,0 4,0 a2,2 0 1,0 -4,0 M2,-1 a2,2 0 1,0 4,0 a2,2 0 1,0 -4,0",
            "M-4,7 Q0,6 4,7",
            "M-7,-5 Q-5,-7 -3,-5 M3,-5 Q5,-7 7,-5",
        ),
    };
    Features {
        eyes,
        mouth,
        eyebrows,
    }
}

fn hair_svg(style: &CharacterStyle, s: f32) -> String {
    let color = &style.primary;
    let cap = format!(
        "<ellipse cx=\"0\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{color}\"/>",
        -18.0 * s,
        14.0 * s,
        10.0 * s
    );
    match style.hair_style {
        HairStyle::Short => cap,
        HairStyle::Bald => String::new(),
        HairStyle::Long => {
            let mut out = cap;
            for side in [-1.0_f32, 1.0] {
                out.push_str(&format!(
                    "<path d=\"M{:.2},{:.2} Q{:.2},{:.2} {:.2},{:.2}\" stroke=\"{color}\" stroke-width=\"{:.2}\" fill=\"none\" stroke-linecap=\"round\"/>",
                    side * 14.0 * s,
                    -12.0 * s,
                    side * 16.0 * s,
                    5.0 * s,
                    side * 10.0 * s,
                    15.0 * s,
                    6.0 * s
                ));
            }
            out
        }
        HairStyle::Spiky => {
            let spikes = [
                (-10.0, -20.0),
                (-8.0, -30.0),
                (-4.0, -22.0),
                (0.0, -32.0),
                (4.0, -22.0),
                (8.0, -30.0),
                (10.0, -20.0),
            ];
            let d = spikes
                .iter()
                .enumerate()
                .map(|(idx, (px, py))| {
                    let cmd = if idx == 0 { 'M' } else { 'L' };
                    format!("{cmd}{:.2},{:.2}", px * s, py * s)
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!("<path d=\"{d}\" fill=\"{color}\"/>")
        }
        HairStyle::Curly => {
            let curls = [
                (-8.0, -22.0, 6.0),
                (0.0, -24.0, 6.0),
                (8.0, -22.0, 6.0),
                (-12.0, -16.0, 5.0),
                (12.0, -16.0, 5.0),
            ];
            curls
                .iter()
                .map(|(cx, cy, r)| {
                    format!(
                        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{color}\"/>",
                        cx * s,
                        cy * s,
                        r * s
                    )
                })
                .collect()
        }
    }
}

fn accessory_svg(style: &CharacterStyle, s: f32) -> String {
    match style.accessory {
        Accessory::None => String::new(),
        Accessory::Glasses => {
            let mut out = String::new();
            for lens_x in [-9.0_f32, 1.0] {
                out.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"none\" stroke=\"{FEATURE_INK}\" stroke-width=\"{:.2}\"/>",
                    lens_x * s,
                    -6.0 * s,
                    8.0 * s,
                    6.0 * s,
                    s,
                    1.5 * s
                ));
            }
            out.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{FEATURE_INK}\" stroke-width=\"{:.2}\"/>",
                -s,
                -3.0 * s,
                s,
                -3.0 * s,
                1.5 * s
            ));
            out
        }
        Accessory::Hat => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"{color}\"/><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"{color}\"/>",
            -12.0 * s,
            -28.0 * s,
            24.0 * s,
            4.0 * s,
            s,
            -8.0 * s,
            -38.0 * s,
            16.0 * s,
            12.0 * s,
            2.0 * s,
            color = style.primary
        ),
        Accessory::Headphones => {
            let mut out = format!(
                "<path d=\"M{:.2},{:.2} Q{:.2},{:.2} 0,{:.2} Q{:.2},{:.2} {:.2},{:.2}\" stroke=\"{FEATURE_INK}\" stroke-width=\"{:.2}\" fill=\"none\"/>",
                -14.0 * s,
                -8.0 * s,
                -16.0 * s,
                -25.0 * s,
                -28.0 * s,
                16.0 * s,
                -25.0 * s,
                14.0 * s,
                -8.0 * s,
                3.0 * s
            );
            for cup_x in [-17.0_f32, 11.0] {
                out.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"{FEATURE_INK}\"/>",
                    cup_x * s,
                    -12.0 * s,
                    6.0 * s,
                    10.0 * s,
                    2.0 * s
                ));
            }
            out
        }
    }
}

/// Draws a character with its head centred on `(x, y)`. Facing left mirrors
/// the whole group horizontally.
pub fn render_character(
    x: f32,
    y: f32,
    character: &Character,
    emotion: Emotion,
    scale: f32,
    facing: Facing,
) -> String {
    let s = scale;
    let style = &character.style;
    let face = features(emotion);
    let flip = match facing {
        Facing::Left => -1.0,
        Facing::Right => 1.0,
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<g class=\"character\" data-id=\"{}\" transform=\"translate({x:.2}, {y:.2}) scale({:.3}, {s:.3})\">",
        escape_xml(&character.id),
        flip * s
    ));
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"{}\"/>",
        -15.0 * s,
        20.0 * s,
        30.0 * s,
        35.0 * s,
        8.0 * s,
        style.secondary
    ));
    svg.push_str(&format!(
        "<circle cx=\"0\" cy=\"0\" r=\"{:.2}\" fill=\"{}\"/>",
        16.0 * s,
        style.skin
    ));
    svg.push_str(&hair_svg(style, s));
    svg.push_str(&format!("<g transform=\"scale({s:.3})\">"));
    svg.push_str(&format!(
        "<path d=\"{}\" stroke=\"{FEATURE_INK}\" stroke-width=\"2\" fill=\"none\" stroke-linecap=\"round\"/>",
        face.eyebrows
    ));
    svg.push_str(&format!("<path d=\"{}\" fill=\"{FEATURE_INK}\"/>", face.eyes));
    svg.push_str(&format!(
        "<path d=\"{}\" stroke=\"{FEATURE_INK}\" stroke-width=\"2\" fill=\"none\" stroke-linecap=\"round\"/>",
        face.mouth
    ));
    svg.push_str("</g>");
    svg.push_str(&accessory_svg(style, s));
    svg.push_str(&format!(
        "<text x=\"0\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{NAME_TAG_FILL}\" font-size=\"{:.2}\" font-family=\"'SF Mono', monospace\">{}</text>",
        65.0 * s,
        10.0 * s,
        escape_xml(&character.name)
    ));
    svg.push_str("</g>");
    svg
}
