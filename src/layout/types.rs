use std::collections::HashMap;

use crate::characters::{Emotion, Facing};
use crate::ir::{BubbleKind, Direction, EdgeKind, MessageKind, NodeType, ParticipantKind};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    pub kind: NodeType,
    pub label: String,
    pub sublabel: Option<String>,
    pub level: usize,
    pub bounds: Rect,
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    /// Position of the edge in the input list; keeps marker ids stable when
    /// earlier edges are dropped.
    pub index: usize,
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub label: Option<String>,
    pub points: Vec<(f32, f32)>,
    pub label_anchor: (f32, f32),
}

#[derive(Debug, Clone, Default)]
pub struct FlowchartLayout {
    pub direction: Direction,
    pub width: f32,
    pub height: f32,
    /// Positioned nodes in input order.
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    /// Node ids per level, in BFS visit order.
    pub levels: Vec<Vec<String>>,
    pub(crate) index: HashMap<String, usize>,
}

impl FlowchartLayout {
    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn level_of(&self, id: &str) -> Option<usize> {
        self.node(id).map(|node| node.level)
    }
}

#[derive(Debug, Clone)]
pub struct Lifeline {
    pub id: String,
    pub x: f32,
    pub y1: f32,
    pub y2: f32,
}

#[derive(Debug, Clone)]
pub struct LaneLayout {
    pub id: String,
    pub name: String,
    pub kind: ParticipantKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct MessageLayout {
    pub index: usize,
    pub kind: MessageKind,
    pub text: String,
    pub note: Option<String>,
    pub from_x: f32,
    pub to_x: f32,
    pub y: f32,
    pub is_self: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SequenceLayout {
    pub width: f32,
    pub height: f32,
    pub lanes: Vec<LaneLayout>,
    pub lifelines: Vec<Lifeline>,
    pub messages: Vec<MessageLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub panel_width: f32,
    pub panel_height: f32,
}

#[derive(Debug, Clone)]
pub struct CharacterSlot {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub facing: Facing,
    pub emotion: Emotion,
}

#[derive(Debug, Clone)]
pub struct BubbleSlot {
    pub character: String,
    pub kind: BubbleKind,
    /// Horizontal centre; the tail points down at this x.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PanelLayout {
    pub frame: Rect,
    pub caption: Option<String>,
    pub caption_height: f32,
    pub characters: Vec<CharacterSlot>,
    pub bubbles: Vec<BubbleSlot>,
    pub dropped_bubbles: usize,
}

#[derive(Debug, Clone)]
pub struct CartoonLayout {
    pub width: f32,
    pub height: f32,
    pub title: Option<String>,
    pub grid: GridLayout,
    pub panels: Vec<PanelLayout>,
}
