use eframe::egui::{PointerButton, Pos2, Response, Ui};

use super::super::ViewModel;
use super::super::render_utils::PlotTransform;

impl ViewModel {
    /// Bubble under the pointer with its distance from the pointer. Nearest
    /// centre wins where bubbles overlap.
    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<(usize, f32)> {
        let pointer_pos = ui.input(|input| input.pointer.hover_pos());
        pointer_pos.and_then(|pointer| {
            screen_positions
                .iter()
                .zip(screen_radii)
                .enumerate()
                .filter_map(|(index, (position, radius))| {
                    let distance = position.distance(pointer);
                    if distance <= *radius {
                        Some((index, distance))
                    } else {
                        None
                    }
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
        })
    }

    pub(in crate::app) fn toggle_bubble(&mut self, index: usize) {
        let Some(keyword) = self.plot.nodes().get(index).map(|node| node.keyword.clone()) else {
            return;
        };

        match self.plot.click(&keyword) {
            Ok(updates) => {
                log::debug!("toggled `{keyword}`, {} bubbles changed", updates.len());
            }
            Err(error) => {
                log::error!("could not toggle `{keyword}`: {error}");
                self.last_error = Some(error.to_string());
            }
        }
    }

    /// Drags the bubble grabbed under the pointer. Returns whether a drag is
    /// in progress.
    pub(in crate::app) fn handle_bubble_drag(
        &mut self,
        response: &Response,
        hovered: Option<usize>,
        transform: PlotTransform,
    ) -> bool {
        let pointer = response.interact_pointer_pos();
        let grabbed = if response.drag_started_by(PointerButton::Primary) {
            hovered
                .and_then(|index| self.plot.nodes().get(index))
                .map(|node| node.keyword.clone())
        } else if response.dragged_by(PointerButton::Primary) {
            self.plot.dragged().map(str::to_owned)
        } else {
            None
        };

        let mut dragging = false;
        if let Some(keyword) = grabbed
            && let Some(pointer) = pointer
        {
            match self.plot.drag(&keyword, transform.to_plot(pointer)) {
                Ok(_) => dragging = true,
                Err(error) => {
                    log::error!("could not drag `{keyword}`: {error}");
                    self.last_error = Some(error.to_string());
                }
            }
        }

        if response.drag_stopped() {
            self.plot.release_drag();
        }
        dragging
    }
}
