use eframe::egui::{self, Color32, RichText, Ui};

use duelling_bubbles::util::format_share;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search keywords")
            .on_hover_text("Fuzzy-highlight matching bubbles without changing the plot.");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Matching bubbles are outlined, the rest are dimmed.");

        ui.separator();

        ui.checkbox(&mut self.live_physics, "Live physics simulation")
            .on_hover_text("Pause to freeze bubbles where they are.");

        ui.checkbox(&mut self.show_quadtree_overlay, "Show quadtree overlay")
            .on_hover_text("Draw the collision quadtree partitions over the canvas.");

        ui.checkbox(&mut self.show_fps_bar, "FPS Display")
            .on_hover_text("Show a live FPS readout in the header.");

        ui.collapsing("FPS Display tuning", |ui| {
            ui.add_enabled_ui(self.show_fps_bar, |ui| {
                ui.checkbox(&mut self.fps_show_current, "Show current FPS")
                    .on_hover_text("Display the most recent frame rate sample.");
                ui.checkbox(&mut self.fps_show_average, "Show average FPS")
                    .on_hover_text("Display the running average FPS over recent samples.");
                ui.checkbox(&mut self.fps_show_frame_time, "Show frame time")
                    .on_hover_text("Display frame duration in milliseconds.");
            });
        });

        ui.collapsing("Shuffle tuning", |ui| {
            ui.add(egui::Slider::new(&mut self.jitter_iterations, 1..=20).text("Redraws"))
                .on_hover_text("How many times a shuffle redraws the bubble heights.");
            ui.add(
                egui::Slider::new(&mut self.jitter_interval_ms, 50.0..=1000.0)
                    .step_by(10.0)
                    .suffix(" ms")
                    .text("Interval")
                    .clamping(egui::SliderClamping::Always),
            )
            .on_hover_text("Delay between consecutive shuffle redraws.");

            ui.horizontal(|ui| {
                if ui.button("Shuffle now").clicked() {
                    self.start_jitter();
                }
                if ui.button("Reset").clicked() {
                    self.jitter_iterations = Self::DEFAULT_JITTER_ITERATIONS;
                    self.jitter_interval_ms = Self::DEFAULT_JITTER_INTERVAL_MS;
                }
            });
            if let Some(remaining) = self.plot.jitter_remaining() {
                ui.label(format!("{remaining} redraws pending"));
            }
        });

        if let Some(error) = self.last_error.clone() {
            ui.separator();
            ui.label(
                RichText::new(format!("Update rejected: {error}"))
                    .color(Color32::from_rgb(235, 110, 96)),
            );
            if ui.small_button("Dismiss").clicked() {
                self.last_error = None;
            }
        }

        ui.separator();
        self.draw_killed_list(ui);
    }

    fn draw_killed_list(&mut self, ui: &mut Ui) {
        let killed = self
            .plot
            .nodes()
            .iter()
            .filter(|node| node.killed)
            .map(|node| {
                let left = format_share(node.left_freq, node.left_total);
                let right = format_share(node.right_freq, node.right_total);
                (node.keyword.clone(), format!("{left} / {right}"))
            })
            .collect::<Vec<_>>();

        ui.label(format!("Parked keywords ({})", killed.len()))
            .on_hover_text("Click a bubble to park it in the gutter, or revive it here.");
        if killed.is_empty() {
            ui.weak("Nothing parked.");
            return;
        }

        let mut revive = None;
        egui::ScrollArea::vertical()
            .id_salt("killed_keywords")
            .max_height(260.0)
            .show(ui, |ui| {
                for (keyword, shares) in &killed {
                    ui.horizontal(|ui| {
                        if ui.small_button("revive").clicked() {
                            revive = Some(keyword.clone());
                        }
                        ui.label(keyword).on_hover_text(shares.as_str());
                    });
                }
            });

        if let Some(keyword) = revive
            && let Err(error) = self.plot.revive(&keyword)
        {
            log::error!("could not revive `{keyword}`: {error}");
            self.last_error = Some(error.to_string());
        }
    }
}
