use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::characters::Emotion;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag \"{0}\"")]
pub struct UnknownTag(pub String);

/// Declares a closed set of lower-case string tags with `FromStr`, `Display`
/// and serde support.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $tag:literal),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
        pub enum $name {
            $(#[serde(rename = $tag)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::ir::UnknownTag;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($tag => Ok($name::$variant),)+
                    other => Err($crate::ir::UnknownTag(other.to_string())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use tag_enum;

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Reads a text field, printing numbers and booleans as text. Null, arrays
/// and objects read as absent.
pub(crate) fn lenient_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(scalar_text)
        .map(T::from)
        .unwrap_or_default())
}

/// Reads a list of ids. Scalar entries are printed as text so they can still
/// match a cast key; nested values are dropped.
pub(crate) fn lenient_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw.iter().flatten().filter_map(scalar_text).collect())
}

/// Reads a tag field, mapping absent, null, non-string or unknown values to the
/// type's default variant.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_default())
}

/// Like [`lenient`], but keeps "absent" distinct from "present and unknown".
pub(crate) fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => Some(
            value
                .as_str()
                .and_then(|tag| tag.trim().parse().ok())
                .unwrap_or_default(),
        ),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub enum Direction {
    #[default]
    #[serde(rename = "TB")]
    TopDown,
    #[serde(rename = "LR")]
    LeftRight,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TD" | "TB" => Some(Self::TopDown),
            "LR" => Some(Self::LeftRight),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = UnknownTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_token(&value.to_ascii_uppercase()).ok_or_else(|| UnknownTag(value.to_string()))
    }
}

tag_enum! {
    pub enum NodeType {
        Start => "start",
        End => "end",
        Process => "process",
        Decision => "decision",
        Io => "io",
        Subprocess => "subprocess",
        Database => "database",
        Delay => "delay",
    }
    default = Process;
}

tag_enum! {
    pub enum EdgeKind {
        Default => "default",
        Yes => "yes",
        No => "no",
        Error => "error",
    }
    default = Default;
}

tag_enum! {
    pub enum ParticipantKind {
        Actor => "actor",
        Service => "service",
        Database => "database",
        Queue => "queue",
        External => "external",
    }
    default = Service;
}

tag_enum! {
    pub enum MessageKind {
        Sync => "sync",
        Async => "async",
        Reply => "reply",
        SelfCall => "self",
    }
    default = Sync;
}

tag_enum! {
    pub enum BubbleKind {
        Speech => "speech",
        Thought => "thought",
        Shout => "shout",
    }
    default = Speech;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: NodeType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub sublabel: Option<String>,
}

impl FlowNode {
    pub fn new(id: &str, kind: NodeType, label: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            sublabel: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct FlowEdge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: EdgeKind,
}

impl FlowEdge {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            label: None,
            kind: EdgeKind::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: ParticipantKind,
}

impl Participant {
    pub fn new(id: &str, name: &str, kind: ParticipantKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct Message {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: MessageKind,
    #[serde(default)]
    pub note: Option<String>,
}

impl Message {
    pub fn new(from: &str, to: &str, text: &str, kind: MessageKind) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            text: text.to_string(),
            kind,
            note: None,
        }
    }

    pub fn is_self(&self) -> bool {
        self.from == self.to || self.kind == MessageKind::SelfCall
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct DialogLine {
    pub character: String,
    pub text: String,
    #[serde(default, deserialize_with = "lenient")]
    pub emotion: Emotion,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: BubbleKind,
}

impl DialogLine {
    pub fn new(character: &str, text: &str) -> Self {
        Self {
            character: character.to_string(),
            text: text.to_string(),
            emotion: Emotion::Neutral,
            kind: BubbleKind::Speech,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct CartoonPanel {
    #[serde(default, deserialize_with = "lenient_ids")]
    pub characters: Vec<String>,
    #[serde(default)]
    pub dialogue: Vec<DialogLine>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub caption: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_read_as_defaults() {
        let node: FlowNode =
            serde_json::from_str(r#"{"id":"a","type":"hexagon","label":"A"}"#).unwrap();
        assert_eq!(node.kind, NodeType::Process);

        let edge: FlowEdge = serde_json::from_str(r#"{"from":"a","to":"b","type":42}"#).unwrap();
        assert_eq!(edge.kind, EdgeKind::Default);

        let line: DialogLine =
            serde_json::from_str(r#"{"character":"a","text":"hi","emotion":"smug"}"#).unwrap();
        assert_eq!(line.emotion, Emotion::Neutral);
        assert_eq!(line.kind, BubbleKind::Speech);
    }

    #[test]
    fn known_tags_parse() {
        let msg: Message =
            serde_json::from_str(r#"{"from":"a","to":"b","text":"t","type":"self"}"#).unwrap();
        assert_eq!(msg.kind, MessageKind::SelfCall);
        assert!(msg.is_self());

        let p: Participant = serde_json::from_str(r#"{"id":"db","type":"database"}"#).unwrap();
        assert_eq!(p.kind, ParticipantKind::Database);
        assert_eq!(p.display_name(), "db");
    }

    #[test]
    fn direction_tokens() {
        assert_eq!("lr".parse::<Direction>(), Ok(Direction::LeftRight));
        assert_eq!("TD".parse::<Direction>(), Ok(Direction::TopDown));
        assert!("diagonal".parse::<Direction>().is_err());
        assert_eq!(NodeType::ALL.len(), 8);
        assert_eq!(MessageKind::SelfCall.to_string(), "self");
    }
}
