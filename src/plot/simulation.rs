use eframe::egui::Vec2;

use super::collide::{CollisionParams, resolve_all};
use super::config::PlotConfig;
use super::node::Node;
use super::quadtree::{Quadtree, QuadtreeCell};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Running,
    Settled,
}

#[derive(Clone, Copy, Debug)]
struct Bounds {
    width: f32,
    alive_floor: f32,
    killed_floor: f32,
}

#[derive(Default)]
struct SimulationScratch {
    positions: Vec<Vec2>,
    quadtree: Quadtree,
}

/// Alpha-driven stepping loop: gravity towards targets, one collision pass,
/// then clamping to the canvas.
pub struct ForceSimulation {
    alpha: f32,
    alpha_decay: f32,
    alpha_min: f32,
    gravity_strength: f32,
    collision_alpha: f32,
    padding: f32,
    bounds: Bounds,
    ticks: u64,
    pinned: Option<(usize, Vec2)>,
    scratch: SimulationScratch,
}

impl ForceSimulation {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            alpha: 0.0,
            alpha_decay: config.alpha_decay,
            alpha_min: config.alpha_min,
            gravity_strength: config.gravity_strength,
            collision_alpha: config.collision_alpha,
            padding: config.padding,
            bounds: Bounds {
                width: config.width(),
                alive_floor: config.alive_floor(),
                killed_floor: config.height() - config.gutter.margin_bottom,
            },
            ticks: 0,
            pinned: None,
            scratch: SimulationScratch::default(),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn state(&self) -> SimulationState {
        if self.alpha > 0.0 {
            SimulationState::Running
        } else {
            SimulationState::Settled
        }
    }

    /// Injects energy so the layout resettles towards fresh targets.
    pub fn reheat(&mut self, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        if self.alpha <= 0.0 {
            log::debug!("simulation resumed at alpha {alpha:.3}");
        }
        self.alpha = alpha;
    }

    /// Holds node `index` at `position` until unpinned. Gravity skips it and
    /// collisions cannot move it.
    pub fn pin(&mut self, index: usize, position: Vec2) {
        self.pinned = Some((index, position));
    }

    pub fn unpin(&mut self) -> Option<usize> {
        self.pinned.take().map(|(index, _)| index)
    }

    pub fn pinned(&self) -> Option<usize> {
        self.pinned.map(|(index, _)| index)
    }

    pub fn tick(&mut self, nodes: &mut [Node]) -> SimulationState {
        if self.alpha <= 0.0 {
            return SimulationState::Settled;
        }

        self.alpha *= self.alpha_decay;
        if self.alpha < self.alpha_min {
            self.alpha = 0.0;
            log::debug!("simulation settled after {} ticks", self.ticks);
            return SimulationState::Settled;
        }
        log::trace!("tick {} alpha {:.4}", self.ticks, self.alpha);

        let gravity = self.gravity_strength * self.alpha;
        for node in nodes.iter_mut() {
            node.position += (node.target - node.position) * gravity;
        }

        self.collide(nodes);

        for node in nodes.iter_mut() {
            self.clamp(node);
        }
        if let Some((index, position)) = self.pinned
            && let Some(node) = nodes.get_mut(index)
        {
            node.position = position;
        }

        self.ticks += 1;
        SimulationState::Running
    }

    fn collide(&mut self, nodes: &mut [Node]) {
        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.positions.extend(nodes.iter().map(|node| node.position));
        scratch.quadtree.rebuild(&scratch.positions);

        let max_radius = nodes.iter().map(|node| node.radius).fold(0.0_f32, f32::max);
        resolve_all(
            nodes,
            &scratch.quadtree,
            CollisionParams {
                alpha: self.collision_alpha,
                padding: self.padding,
                max_radius,
            },
        );
    }

    /// Keeps the whole bubble on canvas; killed bubbles may sink into the gutter.
    pub fn clamp(&self, node: &mut Node) {
        let radius = node.radius;
        let floor = if node.killed {
            self.bounds.killed_floor
        } else {
            self.bounds.alive_floor
        };

        node.position.x = node.position.x.min(self.bounds.width - radius).max(radius);
        node.position.y = node.position.y.min(floor - radius).max(radius);
    }

    /// Cells of the tree built on the most recent tick.
    pub fn quadtree_cells(&self, cells: &mut Vec<QuadtreeCell>) {
        self.scratch.quadtree.cells(cells);
    }
}
