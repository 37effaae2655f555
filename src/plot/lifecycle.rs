use super::controller::BubblePlot;
use super::error::PlotError;
use super::node::NodeUpdate;

/// Observable state of a bubble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Killed,
}

impl BubblePlot {
    pub fn lifecycle(&self, keyword: &str) -> Result<Lifecycle, PlotError> {
        let index = self.index_of(keyword)?;
        Ok(if self.nodes[index].killed {
            Lifecycle::Killed
        } else {
            Lifecycle::Alive
        })
    }

    /// Toggles a bubble between floating and parked. Returns the nodes whose
    /// visuals changed, the toggled node first.
    pub fn click(&mut self, keyword: &str) -> Result<Vec<NodeUpdate>, PlotError> {
        let index = self.index_of(keyword)?;
        if self.nodes[index].killed {
            Ok(self.revive_index(index))
        } else {
            Ok(self.kill_index(index))
        }
    }

    /// Parks a bubble in the gutter. A no-op for bubbles already parked.
    pub fn kill(&mut self, keyword: &str) -> Result<Vec<NodeUpdate>, PlotError> {
        let index = self.index_of(keyword)?;
        Ok(self.kill_index(index))
    }

    /// Returns a parked bubble to the plot. A no-op for floating bubbles.
    pub fn revive(&mut self, keyword: &str) -> Result<Vec<NodeUpdate>, PlotError> {
        let index = self.index_of(keyword)?;
        Ok(self.revive_index(index))
    }

    pub(super) fn index_of(&self, keyword: &str) -> Result<usize, PlotError> {
        self.index_by_keyword
            .get(keyword)
            .copied()
            .ok_or_else(|| PlotError::UnknownKeyword(keyword.to_owned()))
    }

    fn kill_index(&mut self, index: usize) -> Vec<NodeUpdate> {
        let gutter_radius = self.config.gutter_radius;
        let slot = self.config.gutter_slot(gutter_radius);
        let node = &mut self.nodes[index];
        if node.killed {
            return Vec::new();
        }

        node.killed = true;
        node.radius = gutter_radius;
        node.target.y = slot;
        log::debug!("killed `{}`", node.keyword);

        let mut updates = vec![NodeUpdate::from(&*node)];
        self.refresh_radius_domain();
        self.resize_alive(&mut updates);
        self.simulation.reheat(self.config.lifecycle_alpha);
        updates
    }

    fn revive_index(&mut self, index: usize) -> Vec<NodeUpdate> {
        if !self.nodes[index].killed {
            return Vec::new();
        }
        self.nodes[index].killed = false;

        self.refresh_radius_domain();
        let mut updates = Vec::new();
        self.resize_alive(&mut updates);

        let node = &mut self.nodes[index];
        node.target.y = self.mapper.y_target(node.radius, &mut self.rng);
        node.color = self.mapper.color(node.skew());
        log::debug!("revived `{}` at radius {:.1}", node.keyword, node.radius);

        let keyword = node.keyword.as_str();
        updates.retain(|update| update.keyword != keyword);
        updates.insert(0, NodeUpdate::from(&*node));
        self.simulation.reheat(self.config.lifecycle_alpha);
        updates
    }

    /// Re-derives the radius of every alive bubble against the current domain.
    /// Heights that no longer fit the new radius are redrawn.
    fn resize_alive(&mut self, updates: &mut Vec<NodeUpdate>) {
        let floor = self.config.alive_floor();
        for node in self.nodes.iter_mut().filter(|node| node.is_alive()) {
            let radius = self.radius_scale.radius(node.mass());
            if (radius - node.radius).abs() <= f32::EPSILON {
                continue;
            }

            node.radius = radius;
            if !(node.target.y > radius && node.target.y < floor - radius) {
                node.target.y = self.mapper.y_target(radius, &mut self.rng);
            }
            updates.push(NodeUpdate::from(&*node));
        }
    }
}
