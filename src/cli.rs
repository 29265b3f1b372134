use crate::animations::{self, AnimationRule, add_animations};
use crate::characters::{Emotion, PRESET_NAMES};
use crate::config::{
    CartoonStripConfig, ConfigFile, DEFAULT_SCENE_HEIGHT, DEFAULT_SCENE_WIDTH, FlowchartConfig,
    GenerateOptions, SequenceDiagramConfig, load_config,
};
use crate::generate::{build_cast, generate_svg};
use crate::icons::icon_names;
use crate::ir::{BubbleKind, Direction, MessageKind, ParticipantKind};
use crate::layout::{compose_cartoon, compute_flowchart_layout, compute_sequence_layout};
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::{Description, DescriptionError, parse_value};
use crate::render::{render_cartoon, render_flowchart, render_sequence, write_output_svg};
use crate::scene::{SceneType, available_scenes};
use crate::theme::{THEME_NAMES, Theme};
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Builder as FilterBuilder;

#[derive(Parser, Debug)]
#[command(
    name = "techsvg",
    version,
    about = "Technical SVG illustrations, flowcharts, sequence diagrams and cartoon strips"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output", global = true)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg", global = true)]
    pub output_format: OutputFormat,

    /// JSON5 file with default theme, width, height, layout and direction
    #[arg(short = 'c', long = "configFile", global = true)]
    pub config: Option<PathBuf>,

    /// Color theme (github-dark, dracula, nord, one-dark)
    #[arg(long = "theme", global = true)]
    pub theme: Option<String>,

    /// Width
    #[arg(short = 'w', long = "width", global = true)]
    pub width: Option<f32>,

    /// Height
    #[arg(short = 'H', long = "height", global = true)]
    pub height: Option<f32>,

    /// Write the computed layout as JSON to this path
    #[arg(long = "dump-layout", global = true)]
    pub dump_layout: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a scene illustration for a title
    Illustrate {
        /// Title shown in the caption bar and used for scene detection
        #[arg(short = 't', long = "title")]
        title: String,
        /// Extra text for scene detection
        #[arg(long = "content", default_value = "")]
        content: String,
        /// Force a scene instead of detecting one
        #[arg(long = "scene")]
        scene: Option<SceneType>,
        /// Animation preset applied to every top-level element
        #[arg(long = "animate")]
        animate: Option<String>,
    },
    /// Render a YAML/JSON description, or every ```techsvg block of a Markdown file
    Render {
        /// Input file or '-' for stdin
        input: Option<PathBuf>,
    },
    /// Render a flowchart config (YAML or JSON)
    Flowchart {
        /// Input file or '-' for stdin
        input: Option<PathBuf>,
    },
    /// Render a sequence diagram config (YAML or JSON)
    Sequence {
        /// Input file or '-' for stdin
        input: Option<PathBuf>,
    },
    /// List themes, scenes, presets, emotions, icons and element types
    List,
    /// Serve the generator tools over MCP on stdio
    #[cfg(feature = "mcp")]
    Mcp,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

struct Rendered {
    svg: String,
    width: f32,
    height: f32,
    dump: Option<LayoutDump>,
}

fn filter_builder() -> FilterBuilder {
    EnvFilter::builder().with_default_directive(LevelFilter::WARN.into())
}

/// Filter for the stderr subscriber, read from `RUST_LOG`. `warn` applies
/// only when the variable sets no level of its own.
pub fn env_log_filter() -> EnvFilter {
    filter_builder().from_env_lossy()
}

pub fn log_filter(directives: &str) -> EnvFilter {
    filter_builder().parse_lossy(directives)
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let defaults = load_config(args.config.as_deref())?;

    match &args.command {
        Command::Illustrate {
            title,
            content,
            scene,
            animate,
        } => {
            let options = GenerateOptions {
                width: args.width.or(defaults.width).unwrap_or(DEFAULT_SCENE_WIDTH),
                height: args
                    .height
                    .or(defaults.height)
                    .unwrap_or(DEFAULT_SCENE_HEIGHT),
                theme: args.theme.clone().or_else(|| defaults.theme.clone()),
                scene: *scene,
            };
            let result = generate_svg(title, content, &options);
            let svg = match animate.as_deref() {
                Some(name) => {
                    let preset = animations::preset(name).ok_or_else(|| {
                        anyhow::anyhow!(
                            "unknown animation preset '{name}' (expected one of: {})",
                            animations::PRESET_NAMES.join(", ")
                        )
                    })?;
                    add_animations(&result.svg, &[AnimationRule::new("svg > *", preset)])
                }
                None => result.svg,
            };
            let rendered = Rendered {
                svg,
                width: result.width,
                height: result.height,
                dump: None,
            };
            emit(&args, rendered, args.output.as_deref(), args.dump_layout.as_deref())
        }
        Command::Render { input } => {
            let (text, is_markdown) = read_input(input.as_deref())?;
            let documents = if is_markdown {
                extract_techsvg_blocks(&text)
            } else {
                vec![text]
            };
            if documents.is_empty() {
                return Err(anyhow::anyhow!("No techsvg blocks found in input"));
            }
            if documents.len() == 1 {
                let rendered = render_description(&documents[0], &args, &defaults)?;
                return emit(
                    &args,
                    rendered,
                    args.output.as_deref(),
                    args.dump_layout.as_deref(),
                );
            }
            let outputs =
                resolve_multi_outputs(args.output.as_deref(), args.output_format, documents.len())?;
            let dumps = args
                .dump_layout
                .as_deref()
                .map(|path| numbered_paths(path, "layout", "json", documents.len()));
            for (idx, (document, output)) in documents.iter().zip(&outputs).enumerate() {
                let rendered = render_description(document, &args, &defaults)?;
                let dump = dumps.as_ref().map(|paths| paths[idx].as_path());
                emit(&args, rendered, Some(output), dump)?;
            }
            Ok(())
        }
        Command::Flowchart { input } => {
            let (text, _) = read_input(input.as_deref())?;
            let mut value = load_document(&text)?;
            apply_defaults(&mut value, &args, &defaults);
            if let (Value::Object(map), Some(direction)) = (&mut value, defaults.direction) {
                map.entry("direction")
                    .or_insert_with(|| Value::String(direction_tag(direction).to_string()));
            }
            let config: FlowchartConfig = serde_json::from_value(value)?;
            let theme = Theme::by_name(config.theme.as_deref());
            let layout = compute_flowchart_layout(
                &config.nodes,
                &config.edges,
                config.direction,
                config.width,
                config.height,
            );
            let rendered = Rendered {
                svg: render_flowchart(&layout, config.title.as_deref(), &theme),
                width: layout.width,
                height: layout.height,
                dump: Some(LayoutDump::from_flowchart(&layout)),
            };
            emit(&args, rendered, args.output.as_deref(), args.dump_layout.as_deref())
        }
        Command::Sequence { input } => {
            let (text, _) = read_input(input.as_deref())?;
            let mut value = load_document(&text)?;
            apply_defaults(&mut value, &args, &defaults);
            let config: SequenceDiagramConfig = serde_json::from_value(value)?;
            let theme = Theme::by_name(config.theme.as_deref());
            let layout = compute_sequence_layout(
                &config.participants,
                &config.messages,
                config.width,
                config.height,
            );
            let rendered = Rendered {
                svg: render_sequence(&layout, config.title.as_deref(), &theme),
                width: layout.width,
                height: layout.height,
                dump: Some(LayoutDump::from_sequence(&layout)),
            };
            emit(&args, rendered, args.output.as_deref(), args.dump_layout.as_deref())
        }
        Command::List => {
            print!("{}", resource_listing());
            Ok(())
        }
        #[cfg(feature = "mcp")]
        Command::Mcp => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(crate::mcp::TechSvgMcp::new().serve_stdio())?;
            Ok(())
        }
    }
}

fn direction_tag(direction: Direction) -> &'static str {
    match direction {
        Direction::TopDown => "TB",
        Direction::LeftRight => "LR",
    }
}

/// Parses a description or config document. Input whose first non-blank
/// character is `{` is read as JSON, anything else as YAML.
fn load_document(text: &str) -> Result<Value, DescriptionError> {
    if text.trim_start().starts_with('{') {
        serde_json::from_str(text).map_err(|err| DescriptionError::Json(err.to_string()))
    } else {
        serde_yaml::from_str(text).map_err(|err| DescriptionError::Yaml(err.to_string()))
    }
}

/// Fills `theme`, `width` and `height`: flags override the document, which
/// overrides the defaults file.
fn apply_defaults(value: &mut Value, args: &Args, defaults: &ConfigFile) {
    let Value::Object(map) = value else {
        return;
    };
    let theme = |v: &Option<String>| v.clone().map(Value::String);
    let number = |v: Option<f32>| v.map(|n| Value::from(f64::from(n)));

    for (key, flag, fallback) in [
        ("theme", theme(&args.theme), theme(&defaults.theme)),
        ("width", number(args.width), number(defaults.width)),
        ("height", number(args.height), number(defaults.height)),
    ] {
        if let Some(flag) = flag {
            map.insert(key.to_string(), flag);
        } else if let Some(fallback) = fallback {
            map.entry(key).or_insert(fallback);
        }
    }
}

fn render_description(text: &str, args: &Args, defaults: &ConfigFile) -> Result<Rendered> {
    let mut value = load_document(text)?;
    apply_defaults(&mut value, args, defaults);
    if let (Value::Object(map), Some(layout)) = (&mut value, defaults.layout.as_ref()) {
        if map.get("type").and_then(Value::as_str) == Some("cartoon") {
            map.entry("layout")
                .or_insert_with(|| Value::String(layout.clone()));
        }
    }

    match parse_value(value)? {
        Description::Scene(scene) => {
            let options = GenerateOptions {
                width: scene.width.unwrap_or(DEFAULT_SCENE_WIDTH),
                height: scene.height.unwrap_or(DEFAULT_SCENE_HEIGHT),
                theme: scene.theme.clone(),
                scene: scene.scene,
            };
            let result = generate_svg(&scene.title, &scene.content, &options);
            Ok(Rendered {
                svg: result.svg,
                width: result.width,
                height: result.height,
                dump: None,
            })
        }
        Description::Cartoon(cartoon) => {
            let config = CartoonStripConfig::from(cartoon);
            let theme = Theme::by_name(config.theme.as_deref());
            let cast = build_cast(&config.characters);
            let layout = compose_cartoon(
                &config.panels,
                &cast,
                config.title.as_deref(),
                &config.layout,
                config.width,
                config.height,
            );
            Ok(Rendered {
                svg: render_cartoon(&layout, &cast, &theme),
                width: layout.width,
                height: layout.height,
                dump: Some(LayoutDump::from_cartoon(&layout)),
            })
        }
    }
}

fn emit(
    args: &Args,
    rendered: Rendered,
    output: Option<&Path>,
    dump_path: Option<&Path>,
) -> Result<()> {
    tracing::debug!(
        width = rendered.width,
        height = rendered.height,
        output = ?output,
        "writing output"
    );
    if let Some(path) = dump_path {
        match &rendered.dump {
            Some(dump) => write_layout_dump(path, dump)?,
            None => tracing::warn!("scene illustrations have no layout to dump"),
        }
    }
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&rendered.svg, output),
        OutputFormat::Png => {
            let output =
                output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_png(&rendered, output)
        }
    }
}

#[cfg(feature = "png")]
fn write_png(rendered: &Rendered, output: &Path) -> Result<()> {
    crate::render::write_output_png(&rendered.svg, output, rendered.width, rendered.height)
}

#[cfg(not(feature = "png"))]
fn write_png(_rendered: &Rendered, _output: &Path) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires building with the `png` feature"
    ))
}

fn read_input(path: Option<&Path>) -> Result<(String, bool)> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok((buf, false));
        }
        let content = std::fs::read_to_string(path)?;
        let is_md = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| matches!(ext, "md" | "markdown"))
            .unwrap_or(false);
        return Ok((content, is_md));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok((buf, false))
}

fn extract_techsvg_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut fence: Option<&str> = None;
    let mut current = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim();
        match fence {
            None => fence = detect_techsvg_fence(trimmed),
            Some(open) if is_fence_end(trimmed, open) => {
                fence = None;
                blocks.push(current.join("\n"));
                current.clear();
            }
            Some(_) => current.push(line),
        }
    }

    blocks
}

fn detect_techsvg_fence(line: &str) -> Option<&'static str> {
    for fence in ["```", "~~~"] {
        if let Some(rest) = line.strip_prefix(fence) {
            let info = rest.trim_start_matches(&fence[..1]).trim();
            if info.starts_with("techsvg") {
                return Some(fence);
            }
        }
    }
    None
}

fn is_fence_end(line: &str, fence: &str) -> bool {
    line.strip_prefix(fence)
        .is_some_and(|rest| rest.trim().is_empty())
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = match format {
        OutputFormat::Svg => "svg",
        OutputFormat::Png => "png",
    };
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for markdown input"))?;
    Ok(numbered_paths(base, "illustration", ext, count))
}

/// `<stem>-N.<ext>` beside `base`, or `<fallback>-N.<ext>` inside it when
/// `base` is a directory.
fn numbered_paths(base: &Path, fallback: &str, ext: &str, count: usize) -> Vec<PathBuf> {
    if base.is_dir() {
        return (1..=count)
            .map(|idx| base.join(format!("{fallback}-{idx}.{ext}")))
            .collect();
    }
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(fallback);
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    (1..=count)
        .map(|idx| parent.join(format!("{stem}-{idx}.{ext}")))
        .collect()
}

fn resource_listing() -> String {
    fn line<T: std::fmt::Display>(label: &str, items: impl IntoIterator<Item = T>) -> String {
        let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
        format!("{label}: {}\n", items.join(", "))
    }

    let mut out = String::new();
    out.push_str(&line("themes", THEME_NAMES));
    out.push_str(&line("scenes", available_scenes()));
    out.push_str(&line("character presets", PRESET_NAMES));
    out.push_str(&line("emotions", Emotion::ALL));
    out.push_str(&line("participant types", ParticipantKind::ALL));
    out.push_str(&line("message types", MessageKind::ALL));
    out.push_str(&line("bubble types", BubbleKind::ALL));
    out.push_str(&line("icons", icon_names()));
    out.push_str(&line("animations", animations::PRESET_NAMES));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["techsvg"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn log_level_from_env_overrides_the_warn_fallback() {
        let debug = log_filter("debug").to_string();
        assert!(debug.contains("debug"), "{debug}");
        assert!(!debug.contains("warn"), "{debug}");

        let targeted = log_filter("tech_svg_generator=trace").to_string();
        assert!(targeted.contains("tech_svg_generator=trace"), "{targeted}");

        assert_eq!(log_filter("").to_string(), "warn");
    }

    #[test]
    fn extracts_techsvg_blocks() {
        let input = r#"
intro
```techsvg
type: scene
title: One
```
```rust
fn main() {}
```
~~~ techsvg
{"type": "scene", "title": "Two"}
~~~
"#;
        let blocks = extract_techsvg_blocks(input);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("title: One"));
        assert!(blocks[1].starts_with('{'));
    }

    #[test]
    fn json_is_detected_by_leading_brace() {
        let value = load_document("  {\"type\": \"scene\"}").unwrap();
        assert_eq!(value["type"], "scene");
        let value = load_document("type: cartoon").unwrap();
        assert_eq!(value["type"], "cartoon");
        let err = load_document("{oops").unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON"));
    }

    #[test]
    fn flags_beat_document_which_beats_defaults() {
        let defaults = ConfigFile {
            theme: Some("nord".into()),
            width: Some(900.0),
            height: Some(500.0),
            ..ConfigFile::default()
        };
        let parsed = args(&["--theme", "dracula", "list"]);
        let mut value = load_document("width: 640").unwrap();
        apply_defaults(&mut value, &parsed, &defaults);
        assert_eq!(value["theme"], "dracula");
        assert_eq!(value["width"], 640);
        assert_eq!(value["height"], 500.0);
    }

    #[test]
    fn cartoon_descriptions_carry_a_layout_dump() {
        let parsed = args(&["list"]);
        let defaults = ConfigFile {
            layout: Some("1x2".into()),
            ..ConfigFile::default()
        };
        let text = "type: cartoon\ncharacters:\n  a: {preset: dev4}\npanels:\n  - characters: [a]\n    dialogue: []\n";
        let rendered = render_description(text, &parsed, &defaults).unwrap();
        match rendered.dump {
            Some(LayoutDump::Cartoon(dump)) => assert_eq!((dump.cols, dump.rows), (1, 2)),
            other => panic!("unexpected dump: {other:?}"),
        }
    }

    #[test]
    fn multi_outputs_are_numbered() {
        let outputs =
            resolve_multi_outputs(Some(Path::new("out/post.svg")), OutputFormat::Svg, 2).unwrap();
        assert_eq!(
            outputs,
            vec![PathBuf::from("out/post-1.svg"), PathBuf::from("out/post-2.svg")]
        );
        assert!(resolve_multi_outputs(None, OutputFormat::Svg, 2).is_err());
    }

    #[test]
    fn layout_dumps_of_markdown_blocks_get_their_own_files() {
        let dumps = numbered_paths(Path::new("out/layout.json"), "layout", "json", 3);
        assert_eq!(
            dumps,
            vec![
                PathBuf::from("out/layout-1.json"),
                PathBuf::from("out/layout-2.json"),
                PathBuf::from("out/layout-3.json"),
            ]
        );
    }

    #[test]
    fn each_markdown_block_writes_a_separate_dump() {
        let dir = std::env::temp_dir().join(format!("techsvg-dumps-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let parsed = args(&["list"]);
        let blocks = [
            "type: cartoon\ncharacters: {a: {preset: dev1}}\npanels:\n  - {characters: [a], dialogue: []}\n",
            "type: cartoon\nlayout: 1x2\ncharacters: {a: {preset: dev2}}\npanels:\n  - {characters: [a], dialogue: []}\n",
        ];
        let dumps = numbered_paths(&dir, "layout", "json", blocks.len());
        let outputs = numbered_paths(&dir, "illustration", "svg", blocks.len());
        for (idx, block) in blocks.iter().enumerate() {
            let rendered = render_description(block, &parsed, &ConfigFile::default()).unwrap();
            emit(&parsed, rendered, Some(&outputs[idx]), Some(&dumps[idx])).unwrap();
        }
        let first = std::fs::read_to_string(dir.join("layout-1.json")).unwrap();
        let second = std::fs::read_to_string(dir.join("layout-2.json")).unwrap();
        assert!(first.contains("\"cols\": 1") && first.contains("\"rows\": 1"));
        assert!(second.contains("\"rows\": 2"));
        assert!(dir.join("illustration-2.svg").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn listing_mentions_every_section() {
        let listing = resource_listing();
        for label in ["themes:", "scenes:", "emotions:", "icons:", "bubble types:"] {
            assert!(listing.contains(label), "{label}");
        }
        assert!(listing.contains("github-dark, dracula, nord, one-dark"));
    }

    #[test]
    fn scene_flag_parses_tags() {
        let parsed = args(&["illustrate", "-t", "Hi", "--scene", "api"]);
        match parsed.command {
            Command::Illustrate { scene, .. } => assert_eq!(scene, Some(SceneType::Api)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
