use super::*;
use crate::ir::{MessageKind, ParticipantKind};
use crate::layout::text::{mono_width, truncate_chars};
use crate::layout::{LaneLayout, MessageLayout, SequenceLayout};

const HEADER_WIDTH: f32 = 100.0;
const HEADER_HEIGHT: f32 = 50.0;
const SELF_LOOP_WIDTH: f32 = 40.0;
const SELF_LOOP_HEIGHT: f32 = 30.0;
const LABEL_CHAR_WIDTH: f32 = 7.0;

pub fn render_sequence(layout: &SequenceLayout, title: Option<&str>, theme: &Theme) -> String {
    let mut body = String::new();
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        body.push_str(&heading(title, layout.width, 35.0, theme));
    }
    for lifeline in &layout.lifelines {
        body.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{:.2}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"4,4\"/>",
            lifeline.y1,
            lifeline.y2,
            theme.border,
            x = lifeline.x
        ));
    }
    for lane in &layout.lanes {
        body.push_str(&render_participant(lane, theme));
    }
    for message in &layout.messages {
        body.push_str(&render_message(message, theme));
    }
    svg_document(layout.width, layout.height, theme, &body)
}

fn render_participant(lane: &LaneLayout, theme: &Theme) -> String {
    let (x, y) = (lane.x, lane.y);
    let half = HEADER_WIDTH / 2.0;
    let card = &theme.card;

    let figure = match lane.kind {
        ParticipantKind::Actor => {
            let color = &theme.cyan;
            let mut svg = format!(
                "<circle cx=\"{x:.2}\" cy=\"{:.2}\" r=\"10\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"/>",
                y - 25.0
            );
            let limbs = [
                (x, y - 15.0, x, y + 5.0),
                (x - 15.0, y - 8.0, x + 15.0, y - 8.0),
                (x, y + 5.0, x - 12.0, y + 20.0),
                (x, y + 5.0, x + 12.0, y + 20.0),
            ];
            for (x1, y1, x2, y2) in limbs {
                svg.push_str(&format!(
                    "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{color}\" stroke-width=\"2\"/>"
                ));
            }
            svg
        }
        ParticipantKind::Database => {
            let color = &theme.purple;
            let left = x - half + 10.0;
            let right = x + half - 10.0;
            format!(
                "<ellipse cx=\"{x:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"8\" fill=\"{card}\" stroke=\"{color}\" stroke-width=\"2\"/>\
<path d=\"M{left:.2},{:.2} L{left:.2},{:.2} Q{x:.2},{:.2} {right:.2},{:.2} L{right:.2},{:.2}\" fill=\"{card}\" stroke=\"{color}\" stroke-width=\"2\"/>",
                y - 20.0,
                half - 10.0,
                y - 20.0,
                y + 10.0,
                y + 25.0,
                y + 10.0,
                y - 20.0
            )
        }
        ParticipantKind::Queue => {
            let color = &theme.orange;
            let mut svg = format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"35\" rx=\"4\" fill=\"{card}\" stroke=\"{color}\" stroke-width=\"2\"/>",
                x - half + 5.0,
                y - 20.0,
                HEADER_WIDTH - 10.0
            );
            for slot_x in [x - 15.0, x, x + 15.0] {
                svg.push_str(&format!(
                    "<line x1=\"{slot_x:.2}\" y1=\"{:.2}\" x2=\"{slot_x:.2}\" y2=\"{:.2}\" stroke=\"{color}\" stroke-width=\"1.5\"/>",
                    y - 10.0,
                    y + 5.0
                ));
            }
            svg
        }
        ParticipantKind::External => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{HEADER_HEIGHT}\" rx=\"8\" fill=\"{card}\" stroke=\"{}\" stroke-width=\"2\" stroke-dasharray=\"5,3\"/>",
            x - half + 5.0,
            y - 25.0,
            HEADER_WIDTH - 10.0,
            theme.muted
        ),
        ParticipantKind::Service => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{HEADER_HEIGHT}\" rx=\"8\" fill=\"{card}\" stroke=\"{}\" stroke-width=\"2\"/>",
            x - half + 5.0,
            y - 25.0,
            HEADER_WIDTH - 10.0,
            theme.blue
        ),
    };

    format!(
        "<g class=\"participant\" data-id=\"{}\">{figure}<text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"11\" font-family=\"{FONT}\" font-weight=\"500\">{}</text></g>",
        escape_xml(&lane.id),
        y + 40.0,
        theme.text,
        escape_xml(&lane.name)
    )
}

fn render_message(message: &MessageLayout, theme: &Theme) -> String {
    let (color, dash, open_head) = match message.kind {
        MessageKind::Sync => (&theme.text, "", false),
        MessageKind::Async => (&theme.cyan, " stroke-dasharray=\"6,3\"", false),
        MessageKind::Reply => (&theme.green, " stroke-dasharray=\"4,2\"", true),
        MessageKind::SelfCall => (&theme.orange, "", false),
    };
    let prefix = if open_head { "openArrow" } else { "arrow" };
    let marker_id = format!("{prefix}{}", message.index);
    let (from_x, to_x, y) = (message.from_x, message.to_x, message.y);
    let label_width = mono_width(&message.text, LABEL_CHAR_WIDTH) + 16.0;

    if message.is_self {
        let mut svg = arrow_marker(&marker_id, color, false);
        let loop_right = from_x + SELF_LOOP_WIDTH;
        svg.push_str(&format!(
            "<path d=\"M{from_x:.2},{y:.2} L{loop_right:.2},{y:.2} L{loop_right:.2},{:.2} L{:.2},{:.2}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"{dash} marker-end=\"url(#{marker_id})\"/>",
            y + SELF_LOOP_HEIGHT,
            from_x + 5.0,
            y + SELF_LOOP_HEIGHT
        ));
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{label_width:.2}\" height=\"20\" rx=\"4\" fill=\"{}\"/>",
            loop_right + 5.0,
            y - 10.0,
            theme.card
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" font-size=\"11\" font-family=\"{FONT}\">{}</text>",
            loop_right + 13.0,
            y + 4.0,
            theme.text,
            escape_xml(&message.text)
        ));
        return svg;
    }

    let direction = if to_x > from_x { 1.0 } else { -1.0 };
    let text_x = (from_x + to_x) / 2.0;

    let mut svg = arrow_marker(&marker_id, color, open_head);
    svg.push_str(&format!(
        "<line x1=\"{from_x:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{color}\" stroke-width=\"2\"{dash} marker-end=\"url(#{marker_id})\"/>",
        to_x - direction * 10.0
    ));
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{label_width:.2}\" height=\"20\" rx=\"4\" fill=\"{}\"/>",
        text_x - label_width / 2.0,
        y - 18.0,
        theme.card
    ));
    svg.push_str(&format!(
        "<text x=\"{text_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"11\" font-family=\"{FONT}\">{}</text>",
        y - 4.0,
        theme.text,
        escape_xml(&message.text)
    ));
    if let Some(note) = message.note.as_deref().filter(|n| !n.is_empty()) {
        let note_y = y + 20.0;
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{note_y:.2}\" width=\"120\" height=\"24\" rx=\"4\" fill=\"{}\" stroke=\"{}\"/>",
            text_x - 60.0,
            theme.elevated,
            theme.border
        ));
        svg.push_str(&format!(
            "<text x=\"{text_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"10\" font-family=\"{FONT}\" font-style=\"italic\">{}</text>",
            note_y + 16.0,
            theme.muted,
            escape_xml(truncate_chars(note, 18))
        ));
    }
    svg
}
