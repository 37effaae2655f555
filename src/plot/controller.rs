use std::collections::{HashMap, HashSet};
use std::time::Duration;

use eframe::egui::{Vec2, vec2};
use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

use crate::data::{DataProvider, Dataset, Side};

use super::config::PlotConfig;
use super::error::PlotError;
use super::extent::{Extent, ExtentTracker};
use super::jitter::Jitter;
use super::mapper::{RadiusScale, ValueMapper};
use super::node::{BubbleFrame, Node};
use super::quadtree::QuadtreeCell;
use super::simulation::{ForceSimulation, SimulationState};

/// Owns the node population together with the radius domain, the extent
/// tracker and the simulation driving it.
pub struct BubblePlot {
    pub(super) config: PlotConfig,
    pub(super) mapper: ValueMapper,
    pub(super) radius_scale: RadiusScale,
    pub(super) extent: ExtentTracker,
    pub(super) simulation: ForceSimulation,
    pub(super) nodes: Vec<Node>,
    pub(super) index_by_keyword: HashMap<String, usize>,
    pub(super) rng: SmallRng,
    left_title: String,
    right_title: String,
    jitter: Option<Jitter>,
}

fn checked_frequencies(side: Side, data: &Dataset) -> Result<HashMap<&str, f64>, PlotError> {
    if !(data.total_frequency.is_finite() && data.total_frequency >= 0.0) {
        return Err(PlotError::InvalidTotal {
            side,
            total: data.total_frequency,
        });
    }

    let mut frequencies = HashMap::with_capacity(data.keywords.len());
    for entry in &data.keywords {
        if !(entry.frequency.is_finite() && entry.frequency >= 0.0) {
            return Err(PlotError::InvalidFrequency {
                side,
                keyword: entry.keyword.clone(),
                frequency: entry.frequency,
            });
        }
        if frequencies
            .insert(entry.keyword.as_str(), entry.frequency)
            .is_some()
        {
            return Err(PlotError::DuplicateKeyword {
                side,
                keyword: entry.keyword.clone(),
            });
        }
    }
    Ok(frequencies)
}

impl BubblePlot {
    /// Pulls one dataset per side from `provider`, left first.
    pub fn init_display<P>(
        config: PlotConfig,
        provider: &mut P,
        seed: u64,
    ) -> Result<Self, PlotError>
    where
        P: DataProvider + ?Sized,
    {
        let left = provider.get_data();
        let right = provider.get_data();
        Self::from_datasets(config, &left, &right, seed)
    }

    pub fn from_datasets(
        config: PlotConfig,
        left: &Dataset,
        right: &Dataset,
        seed: u64,
    ) -> Result<Self, PlotError> {
        config.validate()?;
        let mapper = ValueMapper::new(&config)?;

        let left_frequencies = checked_frequencies(Side::Left, left)?;
        let right_frequencies = checked_frequencies(Side::Right, right)?;
        if let Some(keyword) = right
            .keyword_names()
            .find(|keyword| !left_frequencies.contains_key(keyword))
        {
            return Err(PlotError::UnexpectedKeyword {
                side: Side::Right,
                keyword: keyword.to_owned(),
            });
        }

        let mut nodes = Vec::with_capacity(left.keywords.len());
        let mut index_by_keyword = HashMap::with_capacity(left.keywords.len());
        for entry in &left.keywords {
            let right_freq = right_frequencies
                .get(entry.keyword.as_str())
                .copied()
                .ok_or_else(|| PlotError::MissingKeyword {
                    side: Side::Right,
                    keyword: entry.keyword.clone(),
                })?;

            index_by_keyword.insert(entry.keyword.clone(), nodes.len());
            nodes.push(Node {
                keyword: entry.keyword.clone(),
                left_freq: entry.frequency,
                right_freq,
                left_total: left.total_frequency,
                right_total: right.total_frequency,
                position: Vec2::ZERO,
                target: Vec2::ZERO,
                radius: config.radius_min,
                color: config.colors.middle,
                killed: false,
            });
        }

        let mut plot = Self {
            radius_scale: RadiusScale::new(config.radius_min, config.radius_max),
            extent: ExtentTracker::default(),
            simulation: ForceSimulation::new(&config),
            rng: SmallRng::seed_from_u64(seed),
            left_title: left.title.clone(),
            right_title: right.title.clone(),
            jitter: None,
            config,
            mapper,
            nodes,
            index_by_keyword,
        };

        plot.refresh_radius_domain();
        plot.retarget_nodes();
        let (width, floor) = (plot.config.width(), plot.config.alive_floor());
        for node in &mut plot.nodes {
            let x = plot.rng.random_range(0.0..=width);
            let y = plot.rng.random_range(0.0..=floor);
            node.position = vec2(x, y);
            plot.simulation.clamp(node);
        }
        plot.simulation.reheat(plot.config.start_alpha);

        log::info!(
            "plot ready: {} keywords, `{}` vs `{}`",
            plot.nodes.len(),
            plot.left_title,
            plot.right_title
        );
        Ok(plot)
    }

    /// Replaces one side's frequencies and total. The dataset must carry
    /// exactly the plot's keyword set; otherwise nothing changes.
    pub fn update_display(&mut self, side: Side, data: &Dataset) -> Result<(), PlotError> {
        let incoming = checked_frequencies(side, data)?;
        if let Some(keyword) = incoming
            .keys()
            .find(|keyword| !self.index_by_keyword.contains_key(**keyword))
        {
            return Err(PlotError::UnexpectedKeyword {
                side,
                keyword: (*keyword).to_owned(),
            });
        }
        if let Some(node) = self
            .nodes
            .iter()
            .find(|node| !incoming.contains_key(node.keyword.as_str()))
        {
            return Err(PlotError::MissingKeyword {
                side,
                keyword: node.keyword.clone(),
            });
        }

        for node in &mut self.nodes {
            let frequency = incoming
                .get(node.keyword.as_str())
                .copied()
                .unwrap_or_default();
            node.set_side(side, frequency, data.total_frequency);
        }
        match side {
            Side::Left => self.left_title = data.title.clone(),
            Side::Right => self.right_title = data.title.clone(),
        }
        log::info!("{side} side now shows `{}`", data.title);

        self.refresh_radius_domain();
        self.redraw();
        Ok(())
    }

    /// Re-derives every target from the current frequencies and domain, drawing
    /// fresh heights for alive bubbles.
    pub fn redraw(&mut self) {
        self.retarget_nodes();
        self.simulation.reheat(self.config.redraw_alpha);
    }

    fn retarget_nodes(&mut self) {
        for node in &mut self.nodes {
            let skew = node.skew();
            if node.is_alive() {
                node.radius = self.radius_scale.radius(node.mass());
                node.target.y = self.mapper.y_target(node.radius, &mut self.rng);
            }
            node.target.x = self.mapper.x_position(skew);
            node.color = self.mapper.color(skew);
        }
    }

    pub(super) fn refresh_radius_domain(&mut self) {
        if let Some(extent) = self.extent.recompute(&self.nodes) {
            self.radius_scale.set_domain(extent);
        }
    }

    /// Schedules `iterations` redraws `interval` apart, replacing any jitter
    /// already running.
    pub fn jitter(&mut self, iterations: usize, interval: Duration) {
        if iterations == 0 {
            self.cancel_jitter();
            return;
        }
        log::debug!("jitter: {iterations} redraws every {interval:?}");
        self.jitter = Some(Jitter::new(iterations, interval));
    }

    pub fn cancel_jitter(&mut self) -> bool {
        let cancelled = self.jitter.take().is_some();
        if cancelled {
            log::debug!("jitter cancelled");
        }
        cancelled
    }

    pub fn jitter_remaining(&self) -> Option<usize> {
        self.jitter.as_ref().map(Jitter::remaining)
    }

    /// Advances timers by `dt` and runs one simulation tick.
    pub fn advance(&mut self, dt: Duration) -> SimulationState {
        if let Some(jitter) = self.jitter.as_mut() {
            let due = jitter.advance(dt);
            if jitter.is_finished() {
                self.jitter = None;
            }
            for _ in 0..due {
                self.redraw();
            }
        }
        self.tick()
    }

    pub fn tick(&mut self) -> SimulationState {
        self.simulation.tick(&mut self.nodes)
    }

    pub fn frames(&self) -> impl Iterator<Item = BubbleFrame<'_>> + '_ {
        self.nodes.iter().map(|node| BubbleFrame {
            keyword: &node.keyword,
            x: node.position.x,
            y: node.position.y,
            radius: node.radius,
            color: node.color,
            font_size: self.mapper.font_size(node.radius),
            killed: node.killed,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, keyword: &str) -> Option<&Node> {
        self.index_by_keyword
            .get(keyword)
            .and_then(|&index| self.nodes.get(index))
    }

    pub fn keywords(&self) -> HashSet<&str> {
        self.nodes.iter().map(|node| node.keyword.as_str()).collect()
    }

    pub fn alive_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_alive()).count()
    }

    pub fn radius_domain(&self) -> Extent {
        self.radius_scale.domain()
    }

    pub fn title(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_title,
            Side::Right => &self.right_title,
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn mapper(&self) -> &ValueMapper {
        &self.mapper
    }

    pub fn alpha(&self) -> f32 {
        self.simulation.alpha()
    }

    pub fn state(&self) -> SimulationState {
        self.simulation.state()
    }

    pub fn quadtree_cells(&self, cells: &mut Vec<QuadtreeCell>) {
        self.simulation.quadtree_cells(cells);
    }
}
