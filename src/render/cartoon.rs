use super::*;
use crate::characters::{Character, render_character};
use crate::ir::BubbleKind;
use crate::layout::{BubbleSlot, CartoonLayout, PanelLayout};
use std::collections::HashMap;

const BUBBLE_TEXT_TOP: f32 = 19.0;
const BUBBLE_LINE_STEP: f32 = 15.0;

/// Draws a composed strip. Characters are looked up in `cast` by id; the
/// layout never holds ids the cast lacks.
pub fn render_cartoon(
    layout: &CartoonLayout,
    cast: &HashMap<String, Character>,
    theme: &Theme,
) -> String {
    let mut body = String::new();
    if let Some(title) = &layout.title {
        body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"28\" text-anchor=\"middle\" fill=\"{}\" font-size=\"16\" font-weight=\"bold\" font-family=\"{FONT}\">{}</text>",
            layout.width / 2.0,
            theme.text,
            escape_xml(title)
        ));
    }
    for panel in &layout.panels {
        body.push_str(&render_panel(panel, cast, theme));
    }
    svg_document(layout.width, layout.height, theme, &body)
}

fn render_panel(panel: &PanelLayout, cast: &HashMap<String, Character>, theme: &Theme) -> String {
    let frame = panel.frame;
    let mut svg = String::from("<g class=\"panel\">");
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"6\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
        frame.x, frame.y, frame.width, frame.height, theme.elevated, theme.border
    ));
    if let Some(caption) = &panel.caption {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"9\" font-weight=\"bold\" font-family=\"{FONT}\">{}</text>",
            frame.center_x(),
            frame.y + 14.0,
            theme.muted,
            escape_xml(caption)
        ));
    }
    for slot in &panel.characters {
        if let Some(character) = cast.get(&slot.id) {
            svg.push_str(&render_character(
                slot.x,
                slot.y,
                character,
                slot.emotion,
                slot.scale,
                slot.facing,
            ));
        }
    }
    for bubble in &panel.bubbles {
        svg.push_str(&render_bubble(bubble, theme));
    }
    svg.push_str("</g>");
    svg
}

fn render_bubble(bubble: &BubbleSlot, theme: &Theme) -> String {
    let (x, y, w, h) = (bubble.x, bubble.y, bubble.width, bubble.height);
    let (fill, stroke, text_fill, dash) = match bubble.kind {
        BubbleKind::Speech => (&theme.card, &theme.border, theme.text.as_str(), ""),
        BubbleKind::Thought => (
            &theme.card,
            &theme.border,
            theme.text.as_str(),
            " stroke-dasharray=\"4,3\"",
        ),
        BubbleKind::Shout => (&theme.orange, &theme.orange, "#fff", ""),
    };
    let tail_y = y + h;

    let mut svg = format!("<g class=\"{}-bubble\">", bubble.kind);
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"10\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"{dash}/>",
        x - w / 2.0
    ));
    if bubble.kind == BubbleKind::Thought {
        for (offset, r) in [(6.0, 4.0), (14.0, 2.5)] {
            svg.push_str(&format!(
                "<circle cx=\"{x:.2}\" cy=\"{:.2}\" r=\"{r}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"1.5\"/>",
                tail_y + offset
            ));
        }
    } else {
        svg.push_str(&format!(
            "<polygon points=\"{:.2},{:.2} {:.2},{:.2} {x:.2},{:.2}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\"/>",
            x - 6.0,
            tail_y - 1.0,
            x + 6.0,
            tail_y - 1.0,
            tail_y + 10.0
        ));
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"16\" height=\"5\" fill=\"{fill}\"/>",
            x - 8.0,
            tail_y - 3.0
        ));
    }
    for (idx, line) in bubble.lines.iter().enumerate() {
        svg.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{text_fill}\" font-size=\"12\" font-weight=\"600\" font-family=\"{FONT}\">{}</text>",
            y + BUBBLE_TEXT_TOP + idx as f32 * BUBBLE_LINE_STEP,
            escape_xml(line)
        ));
    }
    svg.push_str("</g>");
    svg
}
