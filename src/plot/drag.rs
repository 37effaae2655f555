use eframe::egui::Vec2;

use super::controller::BubblePlot;
use super::error::PlotError;

impl BubblePlot {
    /// Moves a bubble to `position` and holds it there until released. The
    /// layout wakes up so neighbours make room. Returns the clamped position.
    pub fn drag(&mut self, keyword: &str, position: Vec2) -> Result<Vec2, PlotError> {
        let index = self.index_of(keyword)?;
        let node = &mut self.nodes[index];
        node.position = position;
        self.simulation.clamp(node);
        let held = node.position;
        if self.simulation.pinned() != Some(index) {
            log::debug!("dragging `{}`", node.keyword);
        }

        self.simulation.pin(index, held);
        if self.simulation.alpha() < self.config.start_alpha {
            self.simulation.reheat(self.config.start_alpha);
        }
        Ok(held)
    }

    /// Lets go of the dragged bubble, if any, and returns its keyword.
    pub fn release_drag(&mut self) -> Option<&str> {
        let index = self.simulation.unpin()?;
        let keyword = self.nodes.get(index)?.keyword.as_str();
        log::debug!("released `{keyword}`");
        Some(keyword)
    }

    pub fn dragged(&self) -> Option<&str> {
        self.simulation
            .pinned()
            .and_then(|index| self.nodes.get(index))
            .map(|node| node.keyword.as_str())
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use crate::data::Dataset;
    use crate::plot::PlotConfig;

    use super::*;

    fn plot() -> BubblePlot {
        let left =
            Dataset::from_frequencies("Left", [("a".to_owned(), 3.0), ("b".to_owned(), 9.0)]);
        let right =
            Dataset::from_frequencies("Right", [("a".to_owned(), 5.0), ("b".to_owned(), 1.0)]);
        BubblePlot::from_datasets(PlotConfig::default(), &left, &right, 4).unwrap()
    }

    #[test]
    fn drag_wakes_a_settled_layout() {
        let mut plot = plot();
        while plot.alpha() > 0.0 {
            plot.tick();
        }

        let held = plot.drag("a", vec2(300.0, 200.0)).unwrap();
        assert_eq!(held, vec2(300.0, 200.0));
        assert_eq!(plot.alpha(), plot.config().start_alpha);
        assert_eq!(plot.dragged(), Some("a"));

        assert_eq!(plot.release_drag(), Some("a"));
        assert_eq!(plot.dragged(), None);
        assert_eq!(plot.release_drag(), None);
    }

    #[test]
    fn dragging_an_unknown_keyword_fails() {
        let mut plot = plot();
        assert_eq!(
            plot.drag("missing", Vec2::ZERO),
            Err(PlotError::UnknownKeyword("missing".to_owned()))
        );
        assert_eq!(plot.dragged(), None);
    }
}
