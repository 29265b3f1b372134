/// Returns at most `max_chars` leading characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub(crate) fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Greedy word wrap by character count. A word longer than the budget sits on
/// a line of its own rather than being split.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate_len = if current.is_empty() {
            char_count(word)
        } else {
            char_count(&current) + 1 + char_count(word)
        };
        if candidate_len <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Keeps the first `max_lines` lines; when anything was dropped the last kept
/// line is cut to `keep_chars` characters and suffixed with `...`.
pub fn clamp_lines(mut lines: Vec<String>, max_lines: usize, keep_chars: usize) -> Vec<String> {
    if max_lines == 0 || lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let cut = truncate_chars(last, keep_chars).to_string();
        *last = format!("{cut}...");
    }
    lines
}

/// Rough monospace width estimate; no font metrics are consulted.
pub(crate) fn mono_width(text: &str, char_width: f32) -> f32 {
    char_count(text) as f32 * char_width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap_words("short text", 60), vec!["short text"]);
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        let lines = wrap_words("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_puts_long_words_on_their_own_line() {
        assert_eq!(
            wrap_words("a supercalifragilistic b", 6),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap_words("   ", 10).is_empty());
    }

    #[test]
    fn clamp_marks_dropped_lines_with_ellipsis() {
        let lines = vec!["one".to_string(), "two".into(), "three".into(), "four".into()];
        let clamped = clamp_lines(lines, 3, 2);
        assert_eq!(clamped, vec!["one", "two", "th..."]);

        let untouched = clamp_lines(vec!["a".to_string()], 3, 2);
        assert_eq!(untouched, vec!["a"]);
    }
}
