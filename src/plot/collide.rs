use eframe::egui::{Vec2, vec2};

use super::node::Node;
use super::quadtree::Quadtree;

const COINCIDENT_DISTANCE: f32 = 0.0001;

#[derive(Clone, Copy, Debug)]
pub struct CollisionParams {
    pub alpha: f32,
    pub padding: f32,
    /// Largest radius in the population; widens each query box.
    pub max_radius: f32,
}

fn fallback_direction(from: usize, to: usize) -> Vec2 {
    let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

/// Pushes `a` and `b` apart by equal and opposite amounts when they overlap.
/// Returns whether the pair was overlapping.
fn separate_pair(nodes: &mut [Node], a: usize, b: usize, params: CollisionParams) -> bool {
    let delta = nodes[a].position - nodes[b].position;
    let distance = delta.length();
    let clearance = if nodes[a].color != nodes[b].color {
        params.padding
    } else {
        0.0
    };
    let min_distance = nodes[a].radius + nodes[b].radius + clearance;
    if distance >= min_distance {
        return false;
    }

    let direction = if distance > COINCIDENT_DISTANCE {
        delta / distance
    } else {
        fallback_direction(a, b)
    };

    let push = direction * ((min_distance - distance) * params.alpha);
    nodes[a].position += push;
    nodes[b].position -= push;
    true
}

/// Resolves overlaps between `index` and every node the quadtree reports
/// inside its padded query box. Returns the number of overlapping pairs.
pub fn resolve_node(
    nodes: &mut [Node],
    index: usize,
    quadtree: &Quadtree,
    params: CollisionParams,
) -> usize {
    let reach = nodes[index].radius + params.max_radius + params.padding;
    let center = nodes[index].position;
    let min = center - vec2(reach, reach);
    let max = center + vec2(reach, reach);

    let mut overlaps = 0;
    quadtree.query_box(min, max, |other| {
        if other != index && separate_pair(nodes, index, other, params) {
            overlaps += 1;
        }
    });
    overlaps
}

/// One collision pass over the whole population against a single tree.
pub fn resolve_all(nodes: &mut [Node], quadtree: &Quadtree, params: CollisionParams) -> usize {
    let mut overlaps = 0;
    for index in 0..nodes.len() {
        overlaps += resolve_node(nodes, index, quadtree, params);
    }
    overlaps
}
