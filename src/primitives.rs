//! Small SVG building blocks shared by the scene compositions.

use crate::icons::icon_path;
use crate::layout::Rect;
use crate::layout::text::{truncate_chars, wrap_words};
use crate::theme::Theme;

pub const FONT: &str = "'SF Mono', Menlo, Monaco, 'Courier New', monospace";

const TITLE_BAR_CHARS: usize = 60;

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Ok,
    Warn,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    pub text: String,
    pub highlight: bool,
}

impl CodeLine {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlight: false,
        }
    }

    pub fn highlighted(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlight: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTone {
    #[default]
    Normal,
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub text: String,
    pub tone: LineTone,
}

impl TerminalLine {
    pub fn new(text: &str, tone: LineTone) -> Self {
        Self {
            text: text.to_string(),
            tone,
        }
    }
}

/// Draws a named icon centred on `(cx, cy)`; unknown names draw nothing.
pub fn icon(name: &str, cx: f32, cy: f32, size: f32, color: &str) -> String {
    let Some(path) = icon_path(name) else {
        return String::new();
    };
    format!(
        "<g transform=\"translate({:.2}, {:.2}) scale({:.3})\"><path d=\"{path}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/></g>",
        cx - size / 2.0,
        cy - size / 2.0,
        size / 24.0
    )
}

pub fn card(
    rect: Rect,
    icon_name: &str,
    label: &str,
    theme: &Theme,
    accent: Option<&str>,
    sublabel: Option<&str>,
) -> String {
    let color = accent.unwrap_or(theme.blue.as_str());
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    let icon_y = rect.center_y() - if sublabel.is_some() { 8.0 } else { 0.0 };

    let mut svg = format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"12\" fill=\"{}\" stroke=\"{color}\" stroke-width=\"2\"/>",
        theme.card
    );
    svg.push_str(&icon(icon_name, rect.center_x(), icon_y, w.min(h) * 0.35, color));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"12\" font-family=\"{FONT}\">{}</text>",
        rect.center_x(),
        y + h - 16.0,
        theme.text,
        escape_xml(truncate_chars(label, 12))
    ));
    if let Some(sub) = sublabel {
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"10\" font-family=\"{FONT}\">{}</text>",
            rect.center_x(),
            y + h - 4.0,
            theme.muted,
            escape_xml(truncate_chars(sub, 15))
        ));
    }
    svg
}

/// A fixed 110x60 value box: label on top, value with a muted unit below.
pub fn metric(
    x: f32,
    y: f32,
    label: &str,
    value: &str,
    unit: &str,
    theme: &Theme,
    accent: Option<&str>,
) -> String {
    let color = accent.unwrap_or(theme.blue.as_str());
    format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"110\" height=\"60\" rx=\"8\" fill=\"{card}\" stroke=\"{border}\"/>\
<text x=\"{cx}\" y=\"{ly}\" text-anchor=\"middle\" fill=\"{muted}\" font-size=\"11\" font-family=\"{FONT}\">{label}</text>\
<text x=\"{cx}\" y=\"{vy}\" text-anchor=\"middle\" fill=\"{color}\" font-size=\"18\" font-family=\"{FONT}\">{value}<tspan fill=\"{muted}\" font-size=\"11\">{unit}</tspan></text>",
        card = theme.card,
        border = theme.border,
        muted = theme.muted,
        cx = x + 55.0,
        ly = y + 22.0,
        vy = y + 46.0,
        label = escape_xml(truncate_chars(label, 12)),
        value = escape_xml(value),
        unit = escape_xml(unit),
    )
}

pub fn status(x: f32, y: f32, kind: StatusKind, text: &str, theme: &Theme) -> String {
    let color = match kind {
        StatusKind::Ok => &theme.green,
        StatusKind::Warn => &theme.orange,
        StatusKind::Error => &theme.red,
        StatusKind::Info => &theme.cyan,
    };
    format!(
        "<circle cx=\"{x}\" cy=\"{y}\" r=\"6\" fill=\"{color}\"/><text x=\"{}\" y=\"{}\" fill=\"{}\" font-size=\"11\" font-family=\"{FONT}\">{}</text>",
        x + 14.0,
        y + 4.0,
        theme.text,
        escape_xml(truncate_chars(text, 30))
    )
}

/// Straight connector with its own arrowhead marker and an optional label
/// box at the midpoint.
pub fn arrow(
    from: (f32, f32),
    to: (f32, f32),
    color: &str,
    label: Option<&str>,
    dashed: bool,
    theme: &Theme,
) -> String {
    let (x1, y1) = from;
    let (x2, y2) = to;
    let mx = (x1 + x2) / 2.0;
    let my = (y1 + y2) / 2.0;
    let marker_id = format!("ah{x1}{y1}{x2}{y2}").replace(['.', '-'], "_");
    let dash = if dashed {
        " stroke-dasharray=\"6 4\""
    } else {
        ""
    };

    let mut svg = format!(
        "<defs><marker id=\"{marker_id}\" markerWidth=\"8\" markerHeight=\"8\" refX=\"7\" refY=\"4\" orient=\"auto\"><path d=\"M0,0 L8,4 L0,8 Z\" fill=\"{color}\"/></marker></defs>"
    );
    svg.push_str(&format!(
        "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{color}\" stroke-width=\"2\"{dash} marker-end=\"url(#{marker_id})\"/>"
    ));
    if let Some(text) = label.filter(|text| !text.is_empty()) {
        svg.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"50\" height=\"20\" rx=\"4\" fill=\"{}\"/><text x=\"{mx}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"10\" font-family=\"{FONT}\">{}</text>",
            mx - 25.0,
            my - 10.0,
            theme.card,
            my + 4.0,
            theme.muted,
            escape_xml(truncate_chars(text, 8))
        ));
    }
    svg
}

/// Editor-style window with traffic-light dots and up to five lines.
pub fn code_snippet(rect: Rect, lines: &[CodeLine], title: &str, theme: &Theme) -> String {
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    let mut svg = format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"8\" fill=\"{}\" stroke=\"{}\"/>",
        theme.elevated, theme.border
    );
    svg.push_str(&format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"28\" rx=\"8\" fill=\"{}\"/>",
        theme.card
    ));
    for (offset, color) in [(16.0, &theme.red), (32.0, &theme.orange), (48.0, &theme.green)] {
        svg.push_str(&format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"5\" fill=\"{color}\" opacity=\"0.8\"/>",
            x + offset,
            y + 14.0
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"10\" font-family=\"{FONT}\">{}</text>",
        rect.center_x(),
        y + 18.0,
        theme.dim,
        escape_xml(truncate_chars(title, 20))
    ));
    for (idx, line) in lines.iter().take(5).enumerate() {
        let fill = if line.highlight {
            &theme.cyan
        } else {
            &theme.text
        };
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" fill=\"{fill}\" font-size=\"11\" font-family=\"{FONT}\">{}</text>",
            x + 12.0,
            y + 48.0 + idx as f32 * 18.0,
            escape_xml(truncate_chars(&line.text, 32))
        ));
    }
    svg
}

pub fn terminal_block(rect: Rect, lines: &[TerminalLine], theme: &Theme) -> String {
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = rect;
    let mut svg = format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"8\" fill=\"{}\" stroke=\"{}\"/>",
        theme.bg, theme.green
    );
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" fill=\"{}\" font-size=\"11\" font-family=\"{FONT}\">$ terminal</text>",
        x + 12.0,
        y + 20.0,
        theme.green
    ));
    for (idx, line) in lines.iter().take(4).enumerate() {
        let fill = match line.tone {
            LineTone::Error => &theme.red,
            LineTone::Ok => &theme.green,
            LineTone::Normal => &theme.text,
        };
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" fill=\"{fill}\" font-size=\"11\" font-family=\"{FONT}\">{}</text>",
            x + 12.0,
            y + 44.0 + idx as f32 * 18.0,
            escape_xml(truncate_chars(&line.text, 35))
        ));
    }
    svg
}

/// Wraps `text` to at most two 60-column lines. Overflow cuts the second
/// line and marks it with `...`.
pub fn title_bar_lines(text: &str) -> Vec<String> {
    let mut lines = wrap_words(text, TITLE_BAR_CHARS);
    if lines.len() > 2 {
        lines.truncate(2);
        let cut = truncate_chars(&lines[1], TITLE_BAR_CHARS - 3).to_string();
        lines[1] = format!("{cut}...");
    }
    lines
}

/// Caption box anchored to the bottom edge of the canvas.
pub fn title_bar(text: &str, width: f32, height: f32, theme: &Theme) -> String {
    let lines = title_bar_lines(text);
    let box_height = if lines.len() <= 1 { 36.0 } else { 50.0 };
    let start_y = height - box_height - 8.0;

    let mut svg = format!(
        "<rect x=\"30\" y=\"{start_y}\" width=\"{}\" height=\"{box_height}\" rx=\"8\" fill=\"{}\" stroke=\"{}\"/>",
        width - 60.0,
        theme.card,
        theme.border
    );
    for (idx, line) in lines.iter().enumerate() {
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"11\" font-family=\"{FONT}\">{}</text>",
            width / 2.0,
            start_y + 22.0 + idx as f32 * 16.0,
            theme.text,
            escape_xml(line)
        ));
    }
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup_and_quotes() {
        assert_eq!(
            escape_xml("<a href=\"x\">Tom & Jerry's</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn unknown_icon_renders_nothing() {
        assert!(icon("unicorn", 10.0, 10.0, 24.0, "#fff").is_empty());
        assert!(icon("server", 10.0, 10.0, 24.0, "#fff").starts_with("<g transform="));
    }

    #[test]
    fn card_truncates_and_escapes_labels() {
        let theme = Theme::default();
        let svg = card(
            Rect::new(0.0, 0.0, 120.0, 100.0),
            "server",
            "A very long server label",
            &theme,
            None,
            Some("<primary>"),
        );
        assert!(svg.contains(">A very long </text>"));
        assert!(svg.contains("&lt;primary&gt;"));
        assert!(svg.contains(&format!("stroke=\"{}\"", theme.blue)));
    }

    #[test]
    fn metric_keeps_unit_in_muted_tspan() {
        let theme = Theme::default();
        let svg = metric(10.0, 20.0, "Latency", "12", "ms", &theme, Some("#00ff00"));
        assert!(svg.contains(&format!("<tspan fill=\"{}\" font-size=\"11\">ms</tspan>", theme.muted)));
        assert!(svg.contains("fill=\"#00ff00\""));
    }

    #[test]
    fn status_colors_follow_kind() {
        let theme = Theme::default();
        assert!(status(0.0, 0.0, StatusKind::Error, "down", &theme).contains(&theme.red));
        assert!(status(0.0, 0.0, StatusKind::Info, "fyi", &theme).contains(&theme.cyan));
    }

    #[test]
    fn arrow_label_is_optional() {
        let theme = Theme::default();
        let bare = arrow((0.0, 0.0), (10.0, 0.0), "#fff", None, false, &theme);
        let labelled = arrow((0.0, 0.0), (10.0, 0.0), "#fff", Some("HTTP"), true, &theme);
        assert!(!bare.contains("<text"));
        assert!(labelled.contains(">HTTP</text>"));
        assert!(labelled.contains("stroke-dasharray=\"6 4\""));
        assert_eq!(bare.matches("marker-end").count(), 1);
    }

    #[test]
    fn code_snippet_shows_at_most_five_lines() {
        let theme = Theme::default();
        let lines: Vec<CodeLine> = (0..8).map(|i| CodeLine::plain(&format!("line {i}"))).collect();
        let svg = code_snippet(Rect::new(0.0, 0.0, 300.0, 130.0), &lines, "main.rs", &theme);
        assert!(svg.contains(">line 4<"));
        assert!(!svg.contains(">line 5<"));
    }

    #[test]
    fn terminal_colors_error_lines() {
        let theme = Theme::default();
        let svg = terminal_block(
            Rect::new(0.0, 0.0, 300.0, 130.0),
            &[TerminalLine::new("boom", LineTone::Error)],
            &theme,
        );
        assert!(svg.contains(&format!("fill=\"{}\" font-size=\"11\" font-family=\"{FONT}\">boom", theme.red)));
    }

    #[test]
    fn title_bar_wraps_to_two_lines_with_ellipsis() {
        let long = "word ".repeat(40);
        let lines = title_bar_lines(long.trim());
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("..."));
        assert!(lines[1].chars().count() <= 60);

        assert_eq!(title_bar_lines("Short title"), vec!["Short title"]);
    }

    #[test]
    fn title_bar_grows_for_two_lines() {
        let theme = Theme::default();
        let one = title_bar("Short", 700.0, 420.0, &theme);
        let two = title_bar(&"x ".repeat(45), 700.0, 420.0, &theme);
        assert!(one.contains("height=\"36\""));
        assert!(two.contains("height=\"50\""));
    }
}
