use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME: &str = "github-dark";

pub const THEME_NAMES: [&str; 4] = ["github-dark", "dracula", "nord", "one-dark"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub bg: String,
    pub card: String,
    pub elevated: String,
    pub border: String,
    pub text: String,
    pub muted: String,
    pub dim: String,
    pub blue: String,
    pub purple: String,
    pub green: String,
    pub cyan: String,
    pub orange: String,
    pub red: String,
    pub pink: String,
}

impl Theme {
    /// Resolves a palette by name. Missing or unknown names fall back to
    /// `github-dark`.
    pub fn by_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("dracula") => Self::dracula(),
            Some("nord") => Self::nord(),
            Some("one-dark") => Self::one_dark(),
            _ => Self::github_dark(),
        }
    }

    pub fn github_dark() -> Self {
        Self::from_table(
            "github-dark",
            [
                "#0d1117", "#161b22", "#21262d", "#30363d", "#e6edf3", "#8b949e", "#6e7681",
                "#58a6ff", "#a371f7", "#3fb950", "#39c5cf", "#d29922", "#f85149", "#f778ba",
            ],
        )
    }

    pub fn dracula() -> Self {
        Self::from_table(
            "dracula",
            [
                "#282a36", "#44475a", "#6272a4", "#44475a", "#f8f8f2", "#6272a4", "#44475a",
                "#8be9fd", "#bd93f9", "#50fa7b", "#8be9fd", "#ffb86c", "#ff5555", "#ff79c6",
            ],
        )
    }

    pub fn nord() -> Self {
        Self::from_table(
            "nord",
            [
                "#2e3440", "#3b4252", "#434c5e", "#4c566a", "#eceff4", "#d8dee9", "#4c566a",
                "#88c0d0", "#b48ead", "#a3be8c", "#8fbcbb", "#d08770", "#bf616a", "#b48ead",
            ],
        )
    }

    pub fn one_dark() -> Self {
        Self::from_table(
            "one-dark",
            [
                "#282c34", "#21252b", "#2c313a", "#3e4451", "#abb2bf", "#5c6370", "#4b5263",
                "#61afef", "#c678dd", "#98c379", "#56b6c2", "#d19a66", "#e06c75", "#c678dd",
            ],
        )
    }

    // Column order: bg, card, elevated, border, text, muted, dim, blue, purple,
    // green, cyan, orange, red, pink.
    fn from_table(name: &str, colors: [&str; 14]) -> Self {
        let [
            bg,
            card,
            elevated,
            border,
            text,
            muted,
            dim,
            blue,
            purple,
            green,
            cyan,
            orange,
            red,
            pink,
        ] = colors.map(str::to_string);
        Self {
            name: name.to_string(),
            bg,
            card,
            elevated,
            border,
            text,
            muted,
            dim,
            blue,
            purple,
            green,
            cyan,
            orange,
            red,
            pink,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::github_dark()
    }
}
