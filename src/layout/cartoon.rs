use once_cell::sync::Lazy;
use regex::Regex;

use super::text::{clamp_lines, mono_width, wrap_words};
use super::*;

const GAP: f32 = 10.0;
const TITLE_ALLOWANCE: f32 = 40.0;
const TITLED_TOP: f32 = 45.0;

const CHARACTER_HEIGHT: f32 = 170.0;
const MAX_CHARACTER_SCALE: f32 = 1.2;
const BUBBLE_CHAR_WIDTH: f32 = 7.5;
const BUBBLE_LINE_HEIGHT: f32 = 15.0;
const BUBBLE_PAD_X: f32 = 12.0;
const BUBBLE_PAD_Y: f32 = 8.0;
const BUBBLE_MAX_LINES: usize = 3;

static GRID_SPEC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)x(\d+)").unwrap());

/// Picks the panel grid. `"auto"` sizes the grid from the panel count;
/// anything else is searched for `<cols>x<rows>`.
pub fn compute_grid_layout(
    panel_count: usize,
    layout: &str,
    width: f32,
    height: f32,
) -> GridLayout {
    let (cols, rows) = if layout == "auto" {
        let cols = match panel_count {
            0..=2 => panel_count.max(1),
            3..=4 => 2,
            5..=6 => 3,
            _ => 4,
        };
        (cols, panel_count.div_ceil(cols).max(1))
    } else {
        explicit_grid(layout).unwrap_or((2, panel_count.div_ceil(2).max(1)))
    };

    GridLayout {
        cols,
        rows,
        panel_width: (width - GAP * (cols + 1) as f32) / cols as f32,
        panel_height: (height - GAP * (rows + 1) as f32 - TITLE_ALLOWANCE) / rows as f32,
    }
}

fn explicit_grid(layout: &str) -> Option<(usize, usize)> {
    let caps = GRID_SPEC_RE.captures(layout)?;
    let cols: usize = caps.get(1)?.as_str().parse().ok()?;
    let rows: usize = caps.get(2)?.as_str().parse().ok()?;
    (cols > 0 && rows > 0).then_some((cols, rows))
}

/// Frame of panel `index`, filled row by row.
pub fn panel_frame(grid: &GridLayout, index: usize, has_title: bool) -> Rect {
    let col = index % grid.cols;
    let row = index / grid.cols;
    let top = if has_title { TITLED_TOP } else { GAP };
    Rect::new(
        GAP + col as f32 * (grid.panel_width + GAP),
        top + row as f32 * (grid.panel_height + GAP),
        grid.panel_width,
        grid.panel_height,
    )
}

/// Places the panel's characters along the bottom and stacks each one's
/// dialogue above its head. Ids missing from `cast` are skipped, as is any
/// dialogue they speak; bubbles that would reach the head are dropped.
pub fn compose_panel(
    panel: &CartoonPanel,
    cast: &HashMap<String, Character>,
    frame: Rect,
) -> PanelLayout {
    let present: Vec<&Character> = panel
        .characters
        .iter()
        .filter_map(|id| cast.get(id))
        .collect();
    let count = present.len();

    let caption = panel.caption.clone().filter(|caption| !caption.is_empty());
    let caption_height = if caption.is_some() { 18.0 } else { 4.0 };
    let available = frame.height - caption_height - 20.0;
    let scale = MAX_CHARACTER_SCALE.min(available * 0.65 / CHARACTER_HEIGHT);
    let baseline = frame.y + frame.height - 30.0 - 85.0 * scale;
    let slot_width = frame.width / (count + 1) as f32;
    let bubble_budget = (frame.width * 0.45).min(200.0);

    let mut layout = PanelLayout {
        frame,
        caption,
        caption_height,
        characters: Vec::with_capacity(count),
        bubbles: Vec::new(),
        dropped_bubbles: 0,
    };

    for (idx, character) in present.iter().enumerate() {
        let x = frame.x + slot_width * (idx + 1) as f32;
        let facing = if count > 1 && idx as f32 >= count as f32 / 2.0 {
            Facing::Left
        } else {
            Facing::Right
        };
        let lines: Vec<_> = panel
            .dialogue
            .iter()
            .filter(|line| line.character == character.id)
            .collect();
        let emotion = lines.first().map(|line| line.emotion).unwrap_or(Emotion::Neutral);

        layout.characters.push(CharacterSlot {
            id: character.id.clone(),
            x,
            y: baseline,
            scale,
            facing,
            emotion,
        });

        let start_y = frame.y + caption_height + 15.0;
        let head_top = baseline - 36.0 * scale;
        let room = head_top - start_y - 20.0;
        let step = 50.0_f32.min(room / lines.len().max(1) as f32);
        for (line_idx, line) in lines.iter().enumerate() {
            let y = start_y + line_idx as f32 * step;
            if y >= head_top - 30.0 {
                layout.dropped_bubbles += 1;
                continue;
            }
            layout
                .bubbles
                .push(bubble_slot(&character.id, line.kind, &line.text, x, y, bubble_budget));
        }
    }

    if layout.dropped_bubbles > 0 {
        tracing::debug!(dropped = layout.dropped_bubbles, "bubbles did not fit above heads");
    }
    layout
}

/// Wraps bubble text into at most three lines and sizes the box around it.
pub(crate) fn bubble_lines(text: &str, max_width: f32) -> Vec<String> {
    let chars_per_line = (max_width / BUBBLE_CHAR_WIDTH).floor() as usize;
    let keep = chars_per_line.saturating_sub(3).max(8);
    let mut lines = clamp_lines(wrap_words(text, chars_per_line), BUBBLE_MAX_LINES, keep);
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn bubble_slot(
    character: &str,
    kind: BubbleKind,
    text: &str,
    x: f32,
    y: f32,
    max_width: f32,
) -> BubbleSlot {
    let lines = bubble_lines(text, max_width);
    let widest = lines
        .iter()
        .map(|line| mono_width(line, BUBBLE_CHAR_WIDTH))
        .fold(0.0, f32::max);
    BubbleSlot {
        character: character.to_string(),
        kind,
        x,
        y,
        width: max_width.min(widest + BUBBLE_PAD_X * 2.0),
        height: lines.len() as f32 * BUBBLE_LINE_HEIGHT + BUBBLE_PAD_Y * 2.0,
        lines,
    }
}

/// Lays out a whole strip: grid, then each panel inside its frame.
pub fn compose_cartoon(
    panels: &[CartoonPanel],
    cast: &HashMap<String, Character>,
    title: Option<&str>,
    grid_spec: &str,
    width: f32,
    height: f32,
) -> CartoonLayout {
    let title = title.filter(|title| !title.is_empty()).map(str::to_string);
    let grid = compute_grid_layout(panels.len(), grid_spec, width, height);
    let panels = panels
        .iter()
        .enumerate()
        .map(|(idx, panel)| compose_panel(panel, cast, panel_frame(&grid, idx, title.is_some())))
        .collect();
    CartoonLayout {
        width,
        height,
        title,
        grid,
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::create_character;
    use crate::ir::DialogLine;

    fn cast(ids: &[&str]) -> HashMap<String, Character> {
        ids.iter()
            .map(|id| (id.to_string(), create_character(id, id, "dev1")))
            .collect()
    }

    #[test]
    fn auto_grid_follows_panel_count() {
        let dims = |n| {
            let g = compute_grid_layout(n, "auto", 800.0, 600.0);
            (g.cols, g.rows)
        };
        assert_eq!(dims(1), (1, 1));
        assert_eq!(dims(2), (2, 1));
        assert_eq!(dims(3), (2, 2));
        assert_eq!(dims(4), (2, 2));
        assert_eq!(dims(5), (3, 2));
        assert_eq!(dims(6), (3, 2));
        assert_eq!(dims(9), (4, 3));
        assert_eq!(dims(0), (1, 1));
    }

    #[test]
    fn explicit_grid_is_read_from_the_string() {
        let g = compute_grid_layout(4, "layout 3x1 please", 800.0, 600.0);
        assert_eq!((g.cols, g.rows), (3, 1));
        assert_eq!(g.panel_width, (800.0 - 40.0) / 3.0);
        assert_eq!(g.panel_height, 600.0 - 20.0 - 40.0);
    }

    #[test]
    fn bad_grid_strings_fall_back_to_two_columns() {
        let g = compute_grid_layout(5, "wide", 800.0, 600.0);
        assert_eq!((g.cols, g.rows), (2, 3));
        let zero = compute_grid_layout(3, "0x2", 800.0, 600.0);
        assert_eq!((zero.cols, zero.rows), (2, 2));
    }

    #[test]
    fn panel_frames_fill_rows_first() {
        let g = compute_grid_layout(4, "2x2", 800.0, 600.0);
        let first = panel_frame(&g, 0, true);
        let fourth = panel_frame(&g, 3, true);
        assert_eq!((first.x, first.y), (10.0, 45.0));
        assert_eq!(fourth.x, 10.0 + g.panel_width + 10.0);
        assert_eq!(fourth.y, 45.0 + g.panel_height + 10.0);
        assert_eq!(panel_frame(&g, 0, false).y, 10.0);
    }

    #[test]
    fn bubbles_never_exceed_three_lines() {
        let lines = bubble_lines(&"lorem ipsum dolor sit amet ".repeat(10), 180.0);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with("..."));
        // 180 / 7.5 = 24 chars per line, third line keeps 21 plus the marker.
        assert!(lines[2].chars().count() <= 24);

        assert_eq!(bubble_lines("", 180.0), vec![String::new()]);
    }

    #[test]
    fn characters_face_each_other() {
        let panel = CartoonPanel {
            characters: vec!["a".into(), "b".into(), "c".into()],
            dialogue: vec![],
            caption: None,
        };
        let frame = Rect::new(0.0, 0.0, 400.0, 300.0);
        let layout = compose_panel(&panel, &cast(&["a", "b", "c"]), frame);
        let facings: Vec<Facing> = layout.characters.iter().map(|c| c.facing).collect();
        assert_eq!(facings, vec![Facing::Right, Facing::Right, Facing::Left]);
        assert_eq!(layout.characters[0].x, 100.0);
    }

    #[test]
    fn lone_character_faces_right_and_takes_first_emotion() {
        let mut happy = DialogLine::new("a", "yay");
        happy.emotion = Emotion::Happy;
        let mut sad = DialogLine::new("a", "oh");
        sad.emotion = Emotion::Sad;
        let panel = CartoonPanel {
            characters: vec!["a".into()],
            dialogue: vec![happy, sad],
            caption: Some("Monday".into()),
        };
        let layout = compose_panel(&panel, &cast(&["a"]), Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(layout.characters[0].facing, Facing::Right);
        assert_eq!(layout.characters[0].emotion, Emotion::Happy);
        assert_eq!(layout.caption_height, 18.0);
        assert_eq!(layout.bubbles.len(), 2);
        assert!(layout.bubbles[1].y > layout.bubbles[0].y);
    }

    #[test]
    fn bubble_spacing_is_capped_in_tall_panels() {
        let dialogue = ["one", "two", "three"]
            .iter()
            .map(|text| DialogLine::new("a", text))
            .collect();
        let panel = CartoonPanel {
            characters: vec!["a".into()],
            dialogue,
            caption: None,
        };
        let layout = compose_panel(&panel, &cast(&["a"]), Rect::new(0.0, 0.0, 400.0, 800.0));
        let ys: Vec<f32> = layout.bubbles.iter().map(|b| b.y).collect();
        assert_eq!(ys, vec![19.0, 69.0, 119.0]);
        assert_eq!(layout.bubbles[1].y - layout.bubbles[0].y, 50.0);
        assert_eq!(layout.dropped_bubbles, 0);
    }

    #[test]
    fn unknown_speakers_and_characters_are_skipped() {
        let panel = CartoonPanel {
            characters: vec!["a".into(), "ghost".into()],
            dialogue: vec![DialogLine::new("ghost", "boo"), DialogLine::new("b", "hi")],
            caption: None,
        };
        let layout = compose_panel(&panel, &cast(&["a", "b"]), Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(layout.characters.len(), 1);
        assert!(layout.bubbles.is_empty());
    }

    #[test]
    fn crowded_panels_drop_bubbles_that_reach_the_head() {
        let dialogue = (0..12).map(|i| DialogLine::new("a", &format!("line {i}"))).collect();
        let panel = CartoonPanel {
            characters: vec!["a".into()],
            dialogue,
            caption: None,
        };
        let layout = compose_panel(&panel, &cast(&["a"]), Rect::new(0.0, 0.0, 300.0, 160.0));
        let slot = &layout.characters[0];
        let head_top = slot.y - 36.0 * slot.scale;
        assert!(layout.bubbles.iter().all(|b| b.y < head_top - 30.0));
        assert_eq!(layout.bubbles.len() + layout.dropped_bubbles, 12);
    }
}
