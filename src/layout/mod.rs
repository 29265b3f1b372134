mod cartoon;
mod flowchart;
mod sequence;
pub mod text;
pub(crate) mod types;

pub use cartoon::{compose_cartoon, compose_panel, compute_grid_layout, panel_frame};
pub use flowchart::compute_flowchart_layout;
pub use sequence::compute_sequence_layout;
pub use types::*;

use crate::characters::{Character, Emotion, Facing};
use crate::ir::{
    BubbleKind, CartoonPanel, Direction, FlowEdge, FlowNode, Message, Participant,
};
use std::collections::{HashMap, VecDeque};
