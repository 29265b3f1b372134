use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use tech_svg_generator::config::{CartoonStripConfig, CharacterDef, GenerateOptions};
use tech_svg_generator::generate::build_cast;
use tech_svg_generator::ir::{
    CartoonPanel, DialogLine, Direction, FlowEdge, FlowNode, Message, MessageKind, NodeType,
    Participant, ParticipantKind,
};
use tech_svg_generator::layout::{
    compose_cartoon, compute_flowchart_layout, compute_sequence_layout,
};
use tech_svg_generator::render::{render_cartoon, render_flowchart, render_sequence};
use tech_svg_generator::{
    SceneType, Theme, available_scenes, generate_from_yaml, generate_svg, parse_yaml,
};

/// A chain of `nodes` with a decision every third node and `extra_edges`
/// forward skips.
fn dense_flowchart(nodes: usize, extra_edges: usize) -> (Vec<FlowNode>, Vec<FlowEdge>) {
    let flow_nodes = (0..nodes)
        .map(|i| {
            let kind = match i {
                0 => NodeType::Start,
                i if i + 1 == nodes => NodeType::End,
                i if i % 3 == 0 => NodeType::Decision,
                _ => NodeType::Process,
            };
            FlowNode::new(&format!("n{i}"), kind, &format!("Step {i}"))
        })
        .collect();
    let mut edges: Vec<FlowEdge> = (1..nodes)
        .map(|i| FlowEdge::new(&format!("n{}", i - 1), &format!("n{i}")))
        .collect();
    let mut count = 0usize;
    'outer: for i in 0..nodes {
        for j in (i + 2)..nodes {
            if count >= extra_edges {
                break 'outer;
            }
            edges.push(FlowEdge::new(&format!("n{i}"), &format!("n{j}")));
            count += 1;
        }
    }
    (flow_nodes, edges)
}

fn chatty_sequence(participants: usize, messages: usize) -> (Vec<Participant>, Vec<Message>) {
    let lanes = (0..participants)
        .map(|i| {
            Participant::new(&format!("p{i}"), &format!("Service {i}"), ParticipantKind::Service)
        })
        .collect();
    let msgs = (0..messages)
        .map(|i| {
            let from = i % participants;
            let to = (i + 1) % participants;
            let kind = if i % 2 == 0 { MessageKind::Sync } else { MessageKind::Reply };
            Message::new(&format!("p{from}"), &format!("p{to}"), &format!("call {i}"), kind)
        })
        .collect();
    (lanes, msgs)
}

fn strip(panels: usize) -> CartoonStripConfig {
    let mut characters = BTreeMap::new();
    characters.insert("a".to_string(), CharacterDef::preset("Ana", "dev2"));
    characters.insert("b".to_string(), CharacterDef::preset("Bo", "robot"));
    let panels = (0..panels)
        .map(|i| CartoonPanel {
            characters: vec!["a".into(), "b".into()],
            dialogue: vec![
                DialogLine::new("a", &format!("Is build {i} green yet or still flaky?")),
                DialogLine::new("b", "Rerunning the integration suite now"),
            ],
            caption: None,
        })
        .collect();
    CartoonStripConfig {
        title: Some("Bench".into()),
        characters,
        panels,
        ..CartoonStripConfig::default()
    }
}

const DESCRIPTION: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cartoon/standup.yaml"));

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse/cartoon_yaml", |b| {
        b.iter(|| black_box(parse_yaml(black_box(DESCRIPTION)).expect("parse failed")));
    });
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for (nodes, extra) in [(10, 5), (50, 40), (200, 200)] {
        let (flow_nodes, edges) = dense_flowchart(nodes, extra);
        group.bench_with_input(
            BenchmarkId::new("flowchart", nodes),
            &(flow_nodes, edges),
            |b, (flow_nodes, edges)| {
                b.iter(|| {
                    let layout = compute_flowchart_layout(
                        flow_nodes,
                        edges,
                        Direction::TopDown,
                        800.0,
                        600.0,
                    );
                    black_box(layout.nodes.len());
                });
            },
        );
    }
    for messages in [10, 100] {
        let (lanes, msgs) = chatty_sequence(6, messages);
        group.bench_with_input(
            BenchmarkId::new("sequence", messages),
            &(lanes, msgs),
            |b, (lanes, msgs)| {
                b.iter(|| black_box(compute_sequence_layout(lanes, msgs, 800.0, 600.0).height));
            },
        );
    }
    for panels in [4, 12] {
        let config = strip(panels);
        let cast = build_cast(&config.characters);
        group.bench_with_input(BenchmarkId::new("cartoon", panels), &config, |b, config| {
            b.iter(|| {
                let layout = compose_cartoon(
                    &config.panels,
                    &cast,
                    config.title.as_deref(),
                    &config.layout,
                    config.width,
                    config.height,
                );
                black_box(layout.panels.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let theme = Theme::default();

    let (flow_nodes, edges) = dense_flowchart(50, 40);
    let flow = compute_flowchart_layout(&flow_nodes, &edges, Direction::LeftRight, 800.0, 600.0);
    group.bench_function("flowchart", |b| {
        b.iter(|| black_box(render_flowchart(&flow, Some("Bench"), &theme).len()));
    });

    let (lanes, msgs) = chatty_sequence(6, 100);
    let seq = compute_sequence_layout(&lanes, &msgs, 800.0, 600.0);
    group.bench_function("sequence", |b| {
        b.iter(|| black_box(render_sequence(&seq, Some("Bench"), &theme).len()));
    });

    let config = strip(12);
    let cast = build_cast(&config.characters);
    let cartoon = compose_cartoon(
        &config.panels,
        &cast,
        config.title.as_deref(),
        &config.layout,
        config.width,
        config.height,
    );
    group.bench_function("cartoon", |b| {
        b.iter(|| black_box(render_cartoon(&cartoon, &cast, &theme).len()));
    });
    group.finish();
}

fn bench_scenes(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");
    for scene in available_scenes() {
        let options = GenerateOptions {
            scene: Some(scene),
            ..GenerateOptions::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(scene), &options, |b, options| {
            b.iter(|| black_box(generate_svg("Bench Title", "", options).svg.len()));
        });
    }
    group.bench_function("detect_and_render", |b| {
        let options = GenerateOptions::default();
        b.iter(|| {
            let result = generate_svg(black_box("Kafka consumer lag alerting"), "", &options);
            assert_ne!(result.scene, SceneType::Default);
            black_box(result.svg.len());
        });
    });
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    c.bench_function("end_to_end/cartoon_yaml", |b| {
        b.iter(|| {
            let svg = generate_from_yaml(black_box(DESCRIPTION)).expect("render failed");
            black_box(svg.len())
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_layout, bench_render, bench_scenes, bench_end_to_end
);
criterion_main!(benches);
