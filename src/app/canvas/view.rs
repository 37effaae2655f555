use std::collections::HashSet;
use std::time::Duration;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use duelling_bubbles::data::Side;
use duelling_bubbles::plot::SimulationState;
use duelling_bubbles::util::format_share;

use super::super::render_utils::{
    PlotTransform, blend_color, dim_color, draw_background, draw_cell, ease_towards, label_color,
};
use super::super::{SearchMatchCache, ViewModel};

const RADIUS_EASE_RATE: f32 = 8.0;
const MIN_LABEL_SIZE: f32 = 5.0;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    fn refresh_search_matches(&mut self) {
        let query = self.search.trim();
        if query.is_empty() {
            self.search_match_cache = None;
            return;
        }

        if self
            .search_match_cache
            .as_ref()
            .is_some_and(|cached| cached.query == query)
        {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .plot
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                fuzzy_match_score(&matcher, &node.keyword, query).map(|_| index)
            })
            .collect::<HashSet<_>>();

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches,
        });
    }

    /// Eases displayed radii toward the plot's radii. Returns whether any
    /// bubble is still growing or shrinking.
    fn ease_radii(&mut self, dt: f32) -> bool {
        let radii = &mut self.view_scratch.display_radii;
        let nodes = self.plot.nodes();
        if radii.len() != nodes.len() {
            radii.clear();
            radii.extend(nodes.iter().map(|node| node.radius));
            return false;
        }

        let mut easing = false;
        for (display, node) in radii.iter_mut().zip(nodes) {
            *display = ease_towards(*display, node.radius, RADIUS_EASE_RATE, dt);
            easing |= *display != node.radius;
        }
        easing
    }

    fn update_screen_space(&mut self, transform: PlotTransform) {
        let scratch = &mut self.view_scratch;
        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        for (node, radius) in self.plot.nodes().iter().zip(&scratch.display_radii) {
            scratch.screen_positions.push(transform.to_screen(node.position));
            scratch.screen_radii.push(radius * transform.scale);
        }

        scratch.draw_order.clear();
        scratch.draw_order.extend(0..scratch.screen_radii.len());
        let radii = &scratch.screen_radii;
        scratch
            .draw_order
            .sort_by(|a, b| radii[*b].total_cmp(&radii[*a]));
    }

    pub(in crate::app) fn draw_plot(&mut self, ui: &mut Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let config = *self.plot.config();
        let transform = PlotTransform::fit(rect, &config);
        draw_background(&painter, rect, transform, &config);

        let dt = ui.ctx().input(|input| input.stable_dt).clamp(0.0, 0.1);
        let mut animating = false;
        if self.live_physics {
            self.plot.advance(Duration::from_secs_f32(dt));
            animating = self.plot.state() == SimulationState::Running
                || self.plot.jitter_remaining().is_some();
        }
        animating |= self.ease_radii(dt);

        self.refresh_search_matches();
        self.update_screen_space(transform);

        if self.show_quadtree_overlay {
            self.plot.quadtree_cells(&mut self.view_scratch.quadtree_cells);
            for cell in &self.view_scratch.quadtree_cells {
                let alpha = if cell.is_leaf { 110 } else { 55 };
                let line_width = (1.4_f32 - (cell.depth as f32 * 0.09_f32)).clamp(0.45, 1.4);
                let stroke = Stroke::new(
                    line_width,
                    Color32::from_rgba_unmultiplied(106, 198, 255, alpha),
                );
                draw_cell(&painter, transform, cell.center, cell.half_extent, stroke);
            }
        }

        let hovered = Self::hovered_index(
            ui,
            &self.view_scratch.screen_positions,
            &self.view_scratch.screen_radii,
        );
        if response.dragged_by(egui::PointerButton::Primary) && self.plot.dragged().is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::Grabbing;
            });
        } else if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let hovered_index = hovered.map(|(index, _)| index);
        animating |= self.handle_bubble_drag(&response, hovered_index, transform);

        if response.clicked_by(egui::PointerButton::Primary)
            && let Some((index, _distance)) = hovered
        {
            self.toggle_bubble(index);
            animating = true;
        }

        let matches = self
            .search_match_cache
            .as_ref()
            .map(|cache| &cache.matches);
        let search_active = matches.is_some_and(|matches| !matches.is_empty());
        let nodes = self.plot.nodes();
        let mapper = self.plot.mapper();
        let scratch = &self.view_scratch;

        let order = scratch
            .draw_order
            .iter()
            .copied()
            .filter(|index| Some(*index) != hovered_index)
            .chain(hovered_index);
        for index in order {
            let node = &nodes[index];
            let position = scratch.screen_positions[index];
            let radius = scratch.screen_radii[index];
            let is_hovered = hovered_index == Some(index);
            let is_match = matches.is_some_and(|matches| matches.contains(&index));

            let fill = if is_hovered {
                blend_color(node.color, Color32::WHITE, 0.22)
            } else if search_active && !is_match {
                dim_color(node.color, 0.45)
            } else {
                node.color
            };
            painter.circle_filled(position, radius, fill);

            let stroke = if is_match {
                Stroke::new(2.0, Color32::from_rgb(103, 196, 255))
            } else if is_hovered {
                Stroke::new(1.6, Color32::from_gray(235))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            painter.circle_stroke(position, radius, stroke);

            let font_size = mapper.font_size(scratch.display_radii[index]) * transform.scale;
            if font_size < MIN_LABEL_SIZE {
                continue;
            }
            let opacity = match hovered_index {
                Some(hovered) if hovered != index => {
                    mapper.opacity((node.position - nodes[hovered].position).length())
                }
                _ => 1.0,
            };
            painter.text(
                position,
                Align2::CENTER_CENTER,
                &node.keyword,
                FontId::proportional(font_size),
                label_color(fill, opacity),
            );
        }

        if let Some(index) = hovered_index {
            let node = &nodes[index];
            let mut details = format!(
                "{}  |  {} {}  |  {} {}",
                node.keyword,
                self.plot.title(Side::Left),
                format_share(node.left_freq, node.left_total),
                self.plot.title(Side::Right),
                format_share(node.right_freq, node.right_total),
            );
            if node.killed {
                details.push_str("  |  parked");
            }
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                details,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if animating {
            ui.ctx().request_repaint();
        }
    }
}
