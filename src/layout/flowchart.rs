use super::*;

struct Spacing {
    node_width: f32,
    node_height: f32,
    /// Gap between levels along the flow direction.
    level_gap: f32,
    /// Gap between siblings within a level.
    sibling_gap: f32,
}

fn spacing_for(direction: Direction) -> Spacing {
    match direction {
        Direction::TopDown => Spacing {
            node_width: 120.0,
            node_height: 50.0,
            level_gap: 80.0,
            sibling_gap: 40.0,
        },
        Direction::LeftRight => Spacing {
            node_width: 100.0,
            node_height: 60.0,
            level_gap: 60.0,
            sibling_gap: 40.0,
        },
    }
}

const LEVEL_ORIGIN: f32 = 80.0;
const ALIGN_TOLERANCE: f32 = 5.0;

/// Places nodes on BFS levels starting from every parentless node at once.
///
/// A node keeps the level of its first visit, so cycles terminate and a
/// longer path never pushes a node deeper. Nodes that no root reaches get no
/// position. Edges naming an unknown node are ignored entirely.
pub fn compute_flowchart_layout(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    direction: Direction,
    width: f32,
    height: f32,
) -> FlowchartLayout {
    let mut ids: HashMap<&str, usize> = HashMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        ids.entry(node.id.as_str()).or_insert(idx);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut has_parent = vec![false; nodes.len()];
    let mut ignored_edges = 0usize;
    for edge in edges {
        match (ids.get(edge.from.as_str()), ids.get(edge.to.as_str())) {
            (Some(&from), Some(&to)) => {
                children[from].push(to);
                has_parent[to] = true;
            }
            _ => ignored_edges += 1,
        }
    }

    let mut queue: VecDeque<(usize, usize)> = nodes
        .iter()
        .enumerate()
        .filter(|(idx, node)| ids.get(node.id.as_str()) == Some(idx) && !has_parent[*idx])
        .map(|(idx, _)| (idx, 0))
        .collect();

    let mut level_of: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut levels: Vec<Vec<usize>> = Vec::new();
    while let Some((idx, level)) = queue.pop_front() {
        if level_of[idx].is_some() {
            continue;
        }
        level_of[idx] = Some(level);
        if levels.len() <= level {
            levels.resize_with(level + 1, Vec::new);
        }
        levels[level].push(idx);
        for &child in &children[idx] {
            if level_of[child].is_none() {
                queue.push_back((child, level + 1));
            }
        }
    }

    let spacing = spacing_for(direction);
    let mut bounds: Vec<Option<Rect>> = vec![None; nodes.len()];
    for (level, members) in levels.iter().enumerate() {
        let count = members.len() as f32;
        for (slot, &idx) in members.iter().enumerate() {
            let slot = slot as f32;
            let rect = match direction {
                Direction::TopDown => {
                    let total = count * spacing.node_width + (count - 1.0) * spacing.sibling_gap;
                    let start_x = (width - total) / 2.0;
                    Rect::new(
                        start_x + slot * (spacing.node_width + spacing.sibling_gap),
                        LEVEL_ORIGIN + level as f32 * (spacing.node_height + spacing.level_gap),
                        spacing.node_width,
                        spacing.node_height,
                    )
                }
                Direction::LeftRight => {
                    let total = count * spacing.node_height + (count - 1.0) * spacing.sibling_gap;
                    let start_y = (height - total) / 2.0;
                    Rect::new(
                        LEVEL_ORIGIN + level as f32 * (spacing.node_width + spacing.level_gap),
                        start_y + slot * (spacing.node_height + spacing.sibling_gap),
                        spacing.node_width,
                        spacing.node_height,
                    )
                }
            };
            bounds[idx] = Some(rect);
        }
    }

    let mut layout = FlowchartLayout {
        direction,
        width,
        height,
        ..Default::default()
    };
    for (idx, node) in nodes.iter().enumerate() {
        let (Some(rect), Some(level)) = (bounds[idx], level_of[idx]) else {
            continue;
        };
        layout.index.insert(node.id.clone(), layout.nodes.len());
        layout.nodes.push(NodeLayout {
            id: node.id.clone(),
            kind: node.kind,
            label: node.label.clone(),
            sublabel: node.sublabel.clone(),
            level,
            bounds: rect,
        });
    }
    layout.levels = levels
        .iter()
        .map(|members| members.iter().map(|&idx| nodes[idx].id.clone()).collect())
        .collect();

    for (index, edge) in edges.iter().enumerate() {
        let (Some(from), Some(to)) = (layout.node(&edge.from), layout.node(&edge.to)) else {
            continue;
        };
        let points = route_edge(&from.bounds, &to.bounds, direction);
        let (x1, y1) = points[0];
        let (x2, y2) = points[points.len() - 1];
        layout.edges.push(EdgeLayout {
            index,
            from: edge.from.clone(),
            to: edge.to.clone(),
            kind: edge.kind,
            label: edge.label.clone(),
            points,
            label_anchor: ((x1 + x2) / 2.0, (y1 + y2) / 2.0),
        });
    }

    tracing::debug!(
        positioned = layout.nodes.len(),
        unplaced = nodes.len() - layout.nodes.len(),
        ignored_edges,
        routed_edges = layout.edges.len(),
        "flowchart layout"
    );
    layout
}

/// Leaves the bottom (top-down) or right side of `from` and enters the top or
/// left side of `to`. Nearly aligned endpoints get a straight segment,
/// anything else an orthogonal elbow through the midpoint.
fn route_edge(from: &Rect, to: &Rect, direction: Direction) -> Vec<(f32, f32)> {
    let (start, end) = match direction {
        Direction::TopDown => ((from.center_x(), from.bottom()), (to.center_x(), to.y)),
        Direction::LeftRight => ((from.right(), from.center_y()), (to.x, to.center_y())),
    };
    let (x1, y1) = start;
    let (x2, y2) = end;
    if (x1 - x2).abs() < ALIGN_TOLERANCE || (y1 - y2).abs() < ALIGN_TOLERANCE {
        return vec![start, end];
    }
    match direction {
        Direction::TopDown => {
            let mid_y = (y1 + y2) / 2.0;
            vec![start, (x1, mid_y), (x2, mid_y), end]
        }
        Direction::LeftRight => {
            let mid_x = (x1 + x2) / 2.0;
            vec![start, (mid_x, y1), (mid_x, y2), end]
        }
    }
}
