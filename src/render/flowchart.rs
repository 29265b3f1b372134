use super::*;
use crate::ir::{EdgeKind, NodeType};
use crate::layout::text::truncate_chars;
use crate::layout::{EdgeLayout, FlowchartLayout, NodeLayout};

/// Draws the positioned graph: edges first so node shapes sit on top.
pub fn render_flowchart(layout: &FlowchartLayout, title: Option<&str>, theme: &Theme) -> String {
    let mut body = String::new();
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        body.push_str(&heading(title, layout.width, 35.0, theme));
    }
    for edge in &layout.edges {
        body.push_str(&render_edge(edge, theme));
    }
    for node in &layout.nodes {
        body.push_str(&render_node(node, theme));
    }
    svg_document(layout.width, layout.height, theme, &body)
}

fn render_node(node: &NodeLayout, theme: &Theme) -> String {
    let rect = node.bounds;
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    let (cx, cy) = (rect.center_x(), rect.center_y());
    let card = &theme.card;

    let shape = match node.kind {
        NodeType::Start => format!(
            "<ellipse cx=\"{cx:.2}\" cy=\"{cy:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{card}\" stroke=\"{}\" stroke-width=\"2\"/>",
            w / 2.0,
            h / 2.0,
            theme.green
        ),
        NodeType::End => format!(
            "<ellipse cx=\"{cx:.2}\" cy=\"{cy:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{card}\" stroke=\"{}\" stroke-width=\"3\"/>",
            w / 2.0,
            h / 2.0,
            theme.red
        ),
        NodeType::Decision => format!(
            "<polygon points=\"{cx:.2},{y:.2} {:.2},{cy:.2} {cx:.2},{:.2} {x:.2},{cy:.2}\" fill=\"{card}\" stroke=\"{}\" stroke-width=\"2\"/>",
            x + w,
            y + h,
            theme.orange
        ),
        NodeType::Io => {
            let skew = 15.0;
            format!(
                "<polygon points=\"{:.2},{y:.2} {:.2},{y:.2} {:.2},{:.2} {x:.2},{:.2}\" fill=\"{card}\" stroke=\"{}\" stroke-width=\"2\"/>",
                x + skew,
                x + w,
                x + w - skew,
                y + h,
                y + h,
                theme.cyan
            )
        }
        NodeType::Subprocess => {
            let color = &theme.purple;
            let mut shape = format!(
                "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"4\" fill=\"{card}\" stroke=\"{color}\" stroke-width=\"2\"/>"
            );
            for bar_x in [x + 10.0, x + w - 10.0] {
                shape.push_str(&format!(
                    "<line x1=\"{bar_x:.2}\" y1=\"{y:.2}\" x2=\"{bar_x:.2}\" y2=\"{:.2}\" stroke=\"{color}\" stroke-width=\"1\"/>",
                    y + h
                ));
            }
            shape
        }
        NodeType::Database => {
            let color = &theme.purple;
            let ry = 8.0;
            format!(
                "<ellipse cx=\"{cx:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{ry}\" fill=\"{card}\" stroke=\"{color}\" stroke-width=\"2\"/>\
<path d=\"M{x:.2},{:.2} L{x:.2},{:.2} Q{cx:.2},{:.2} {:.2},{:.2} L{:.2},{:.2}\" fill=\"{card}\" stroke=\"{color}\" stroke-width=\"2\"/>",
                y + ry,
                w / 2.0,
                y + ry,
                y + h - ry,
                y + h + ry,
                x + w,
                y + h - ry,
                x + w,
                y + ry
            )
        }
        NodeType::Delay => format!(
            "<path d=\"M{x:.2},{y:.2} L{:.2},{y:.2} Q{:.2},{cy:.2} {:.2},{:.2} L{x:.2},{:.2} Z\" fill=\"{card}\" stroke=\"{}\" stroke-width=\"2\"/>",
            x + w - 20.0,
            x + w,
            x + w - 20.0,
            y + h,
            y + h,
            theme.muted
        ),
        NodeType::Process => format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"8\" fill=\"{card}\" stroke=\"{}\" stroke-width=\"2\"/>",
            theme.blue
        ),
    };

    let label_y = if node.sublabel.is_some() { cy - 6.0 } else { cy + 4.0 };
    let mut svg = format!(
        "<g class=\"node\" data-id=\"{}\">{shape}",
        escape_xml(&node.id)
    );
    svg.push_str(&format!(
        "<text x=\"{cx:.2}\" y=\"{label_y:.2}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"11\" font-family=\"{FONT}\">{}</text>",
        theme.text,
        escape_xml(truncate_chars(&node.label, 15))
    ));
    if let Some(sublabel) = &node.sublabel {
        svg.push_str(&format!(
            "<text x=\"{cx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"10\" font-family=\"{FONT}\">{}</text>",
            cy + 12.0,
            theme.muted,
            escape_xml(truncate_chars(sublabel, 20))
        ));
    }
    svg.push_str("</g>");
    svg
}

fn render_edge(edge: &EdgeLayout, theme: &Theme) -> String {
    let (color, dash) = match edge.kind {
        EdgeKind::Default => (&theme.muted, ""),
        EdgeKind::Yes => (&theme.green, ""),
        EdgeKind::No => (&theme.red, ""),
        EdgeKind::Error => (&theme.red, " stroke-dasharray=\"4,2\""),
    };
    let marker_id = format!("flowArrow{}", edge.index);

    let mut svg = arrow_marker(&marker_id, color, false);
    svg.push_str(&format!(
        "<path d=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"{dash} marker-end=\"url(#{marker_id})\"/>",
        points_to_path(&edge.points)
    ));
    if let Some(label) = edge.label.as_deref().filter(|l| !l.is_empty()) {
        let (mx, my) = edge.label_anchor;
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"30\" height=\"16\" rx=\"3\" fill=\"{}\"/>",
            mx - 15.0,
            my - 10.0,
            theme.card
        ));
        svg.push_str(&format!(
            "<text x=\"{mx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" fill=\"{color}\" font-size=\"10\" font-family=\"{FONT}\">{}</text>",
            my + 3.0,
            escape_xml(label)
        ));
    }
    svg
}
