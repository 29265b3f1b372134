use crate::layout::{CartoonLayout, FlowchartLayout, SequenceLayout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutDump {
    Flowchart(FlowchartDump),
    Sequence(SequenceDump),
    Cartoon(CartoonDump),
}

#[derive(Debug, Serialize)]
pub struct FlowchartDump {
    pub direction: String,
    pub width: f32,
    pub height: f32,
    pub levels: Vec<Vec<String>>,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub shape: String,
    pub level: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub index: usize,
    pub from: String,
    pub to: String,
    pub kind: String,
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct SequenceDump {
    pub width: f32,
    pub height: f32,
    pub lanes: Vec<LaneDump>,
    pub messages: Vec<MessageDump>,
}

#[derive(Debug, Serialize)]
pub struct LaneDump {
    pub id: String,
    pub kind: String,
    pub x: f32,
    pub lifeline: [f32; 2],
}

#[derive(Debug, Serialize)]
pub struct MessageDump {
    pub index: usize,
    pub kind: String,
    pub from_x: f32,
    pub to_x: f32,
    pub y: f32,
    pub is_self: bool,
}

#[derive(Debug, Serialize)]
pub struct CartoonDump {
    pub width: f32,
    pub height: f32,
    pub cols: usize,
    pub rows: usize,
    pub panels: Vec<PanelDump>,
}

#[derive(Debug, Serialize)]
pub struct PanelDump {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub characters: Vec<SlotDump>,
    pub bubbles: usize,
    pub dropped_bubbles: usize,
}

#[derive(Debug, Serialize)]
pub struct SlotDump {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub facing: String,
    pub emotion: String,
}

impl LayoutDump {
    pub fn from_flowchart(layout: &FlowchartLayout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                shape: node.kind.to_string(),
                level: node.level,
                x: node.bounds.x,
                y: node.bounds.y,
                width: node.bounds.width,
                height: node.bounds.height,
            })
            .collect();
        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                index: edge.index,
                from: edge.from.clone(),
                to: edge.to.clone(),
                kind: edge.kind.to_string(),
                points: edge.points.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();
        LayoutDump::Flowchart(FlowchartDump {
            direction: format!("{:?}", layout.direction),
            width: layout.width,
            height: layout.height,
            levels: layout.levels.clone(),
            nodes,
            edges,
        })
    }

    pub fn from_sequence(layout: &SequenceLayout) -> Self {
        let lanes = layout
            .lanes
            .iter()
            .zip(&layout.lifelines)
            .map(|(lane, lifeline)| LaneDump {
                id: lane.id.clone(),
                kind: lane.kind.to_string(),
                x: lane.x,
                lifeline: [lifeline.y1, lifeline.y2],
            })
            .collect();
        let messages = layout
            .messages
            .iter()
            .map(|message| MessageDump {
                index: message.index,
                kind: message.kind.to_string(),
                from_x: message.from_x,
                to_x: message.to_x,
                y: message.y,
                is_self: message.is_self,
            })
            .collect();
        LayoutDump::Sequence(SequenceDump {
            width: layout.width,
            height: layout.height,
            lanes,
            messages,
        })
    }

    pub fn from_cartoon(layout: &CartoonLayout) -> Self {
        let panels = layout
            .panels
            .iter()
            .map(|panel| PanelDump {
                x: panel.frame.x,
                y: panel.frame.y,
                width: panel.frame.width,
                height: panel.frame.height,
                characters: panel
                    .characters
                    .iter()
                    .map(|slot| SlotDump {
                        id: slot.id.clone(),
                        x: slot.x,
                        y: slot.y,
                        scale: slot.scale,
                        facing: format!("{:?}", slot.facing),
                        emotion: slot.emotion.to_string(),
                    })
                    .collect(),
                bubbles: panel.bubbles.len(),
                dropped_bubbles: panel.dropped_bubbles,
            })
            .collect();
        LayoutDump::Cartoon(CartoonDump {
            width: layout.width,
            height: layout.height,
            cols: layout.grid.cols,
            rows: layout.grid.rows,
            panels,
        })
    }
}

pub fn write_layout_dump(path: &Path, dump: &LayoutDump) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dump)?;
    Ok(())
}
