mod cartoon;
mod flowchart;
mod scene;
mod sequence;

pub use cartoon::render_cartoon;
pub use flowchart::render_flowchart;
pub use scene::render_scene;
pub use sequence::render_sequence;

use crate::primitives::{FONT, escape_xml};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Wraps rendered content in a standalone document with the themed gradient
/// background.
pub fn svg_document(width: f32, height: f32, theme: &Theme, body: &str) -> String {
    let mut svg = String::with_capacity(body.len() + 512);
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\">"
    ));
    svg.push_str(&format!(
        "<defs><linearGradient id=\"bg\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"100%\"><stop offset=\"0%\" stop-color=\"{}\"/><stop offset=\"100%\" stop-color=\"{}\"/></linearGradient></defs>",
        theme.bg, theme.card
    ));
    svg.push_str(&format!(
        "<rect width=\"{width}\" height=\"{height}\" fill=\"url(#bg)\"/>"
    ));
    svg.push_str(body);
    svg.push_str("</svg>");
    svg
}

fn heading(text: &str, width: f32, y: f32, theme: &Theme) -> String {
    format!(
        "<text x=\"{:.2}\" y=\"{y}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"16\" font-weight=\"bold\" font-family=\"{FONT}\">{}</text>",
        width / 2.0,
        theme.text,
        escape_xml(text)
    )
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    let mut d = String::new();
    for (idx, (x, y)) in points.iter().enumerate() {
        if idx > 0 {
            d.push(' ');
        }
        let cmd = if idx == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{cmd}{x:.2},{y:.2}"));
    }
    d
}

fn arrow_marker(id: &str, color: &str, open: bool) -> String {
    let head = if open {
        format!("<path d=\"M0,0 L10,5 L0,10\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"/>")
    } else {
        format!("<path d=\"M0,0 L10,5 L0,10 Z\" fill=\"{color}\"/>")
    };
    format!(
        "<defs><marker id=\"{id}\" markerWidth=\"10\" markerHeight=\"10\" refX=\"9\" refY=\"5\" orient=\"auto\">{head}</marker></defs>"
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, width: f32, height: f32) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Menlo".to_string();
    opt.default_size = usvg::Size::from_wh(width, height)
        .or_else(|| usvg::Size::from_wh(700.0, 420.0))
        .ok_or_else(|| anyhow::anyhow!("invalid canvas size {width}x{height}"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}
