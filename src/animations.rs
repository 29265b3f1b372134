use crate::ir::tag_enum;
use once_cell::sync::Lazy;
use regex::Regex;

tag_enum! {
    pub enum AnimationKind {
        FadeIn => "fadeIn",
        SlideIn => "slideIn",
        Pulse => "pulse",
        Bounce => "bounce",
        Shake => "shake",
        Glow => "glow",
        Typewriter => "typewriter",
        Draw => "draw",
        Float => "float",
        Spin => "spin",
    }
    default = FadeIn;
}

tag_enum! {
    pub enum Easing {
        Linear => "linear",
        Ease => "ease",
        EaseIn => "ease-in",
        EaseOut => "ease-out",
        EaseInOut => "ease-in-out",
    }
    default = EaseOut;
}

tag_enum! {
    pub enum PlayDirection {
        Normal => "normal",
        Reverse => "reverse",
        Alternate => "alternate",
    }
    default = Normal;
}

const KEYFRAMES: &str = r#"
    @keyframes fadeIn {
      from { opacity: 0; }
      to { opacity: 1; }
    }
    @keyframes slideInLeft {
      from { transform: translateX(-50px); opacity: 0; }
      to { transform: translateX(0); opacity: 1; }
    }
    @keyframes slideInRight {
      from { transform: translateX(50px); opacity: 0; }
      to { transform: translateX(0); opacity: 1; }
    }
    @keyframes slideInUp {
      from { transform: translateY(30px); opacity: 0; }
      to { transform: translateY(0); opacity: 1; }
    }
    @keyframes pulse {
      0%, 100% { transform: scale(1); }
      50% { transform: scale(1.05); }
    }
    @keyframes bounce {
      0%, 100% { transform: translateY(0); }
      50% { transform: translateY(-10px); }
    }
    @keyframes shake {
      0%, 100% { transform: translateX(0); }
      25% { transform: translateX(-5px); }
      75% { transform: translateX(5px); }
    }
    @keyframes glow {
      0%, 100% { filter: drop-shadow(0 0 2px currentColor); }
      50% { filter: drop-shadow(0 0 10px currentColor); }
    }
    @keyframes float {
      0%, 100% { transform: translateY(0); }
      50% { transform: translateY(-8px); }
    }
    @keyframes spin {
      from { transform: rotate(0deg); }
      to { transform: rotate(360deg); }
    }
    @keyframes draw {
      to { stroke-dashoffset: 0; }
    }
    @keyframes typewriter {
      from { width: 0; }
      to { width: 100%; }
    }
"#;

static SVG_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<svg([^>]*)>").unwrap());

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub kind: AnimationKind,
    /// Seconds.
    pub duration: f32,
    /// Seconds.
    pub delay: f32,
    /// 0 loops forever.
    pub iterations: u32,
    pub easing: Easing,
    pub direction: PlayDirection,
}

impl AnimationConfig {
    pub fn new(kind: AnimationKind) -> Self {
        Self {
            kind,
            duration: 0.5,
            delay: 0.0,
            iterations: 1,
            easing: Easing::EaseOut,
            direction: PlayDirection::Normal,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(AnimationKind::FadeIn)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRule {
    pub selector: String,
    pub config: AnimationConfig,
}

impl AnimationRule {
    pub fn new(selector: &str, config: AnimationConfig) -> Self {
        Self {
            selector: selector.to_string(),
            config,
        }
    }
}

pub fn keyframes() -> &'static str {
    KEYFRAMES
}

/// The CSS `animation` shorthand for `config`.
pub fn animation_rule(config: &AnimationConfig) -> String {
    let name = match config.kind {
        AnimationKind::SlideIn => "slideInUp",
        other => other.as_str(),
    };
    let iterations = if config.iterations == 0 {
        "infinite".to_string()
    } else {
        config.iterations.to_string()
    };
    format!(
        "animation: {name} {}s {} {}s {iterations} {};",
        config.duration, config.easing, config.delay, config.direction
    )
}

/// Injects a `<style>` block with the keyframes and one rule per selector
/// right after the opening `<svg>` tag.
pub fn add_animations(svg: &str, rules: &[AnimationRule]) -> String {
    if rules.is_empty() {
        return svg.to_string();
    }
    let styles = rules
        .iter()
        .map(|rule| format!("{} {{ {} }}", rule.selector, animation_rule(&rule.config)))
        .collect::<Vec<_>>()
        .join("\n    ");
    let block = format!("<style>{KEYFRAMES}    {styles}\n  </style>");
    SVG_OPEN_RE
        .replace(svg, |caps: &regex::Captures| {
            format!("<svg{}>{block}", &caps[1])
        })
        .into_owned()
}

/// `count` copies of `base` whose delays grow by `step` seconds.
pub fn staggered(base: &AnimationConfig, count: usize, step: f32) -> Vec<AnimationConfig> {
    (0..count)
        .map(|i| AnimationConfig {
            delay: base.delay + i as f32 * step,
            ..*base
        })
        .collect()
}

pub const PRESET_NAMES: [&str; 7] = [
    "fadeInSequence",
    "gentlePulse",
    "floatingElement",
    "attentionShake",
    "glowingHighlight",
    "spinningLoader",
    "bounceIn",
];

pub fn preset(name: &str) -> Option<AnimationConfig> {
    let (kind, duration, iterations, easing) = match name {
        "fadeInSequence" => (AnimationKind::FadeIn, 0.5, 1, Easing::EaseOut),
        "gentlePulse" => (AnimationKind::Pulse, 2.0, 0, Easing::EaseInOut),
        "floatingElement" => (AnimationKind::Float, 3.0, 0, Easing::EaseInOut),
        "attentionShake" => (AnimationKind::Shake, 0.5, 3, Easing::EaseOut),
        "glowingHighlight" => (AnimationKind::Glow, 1.5, 0, Easing::EaseOut),
        "spinningLoader" => (AnimationKind::Spin, 1.0, 0, Easing::Linear),
        "bounceIn" => (AnimationKind::Bounce, 0.6, 1, Easing::EaseOut),
        _ => return None,
    };
    Some(AnimationConfig {
        kind,
        duration,
        iterations,
        easing,
        ..AnimationConfig::default()
    })
}
