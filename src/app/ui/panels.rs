use std::collections::VecDeque;
use std::time::Duration;

use eframe::egui::{self, Align, Context, Layout, RichText};

use duelling_bubbles::data::{DataProvider, Side};
use duelling_bubbles::plot::BubblePlot;

use super::super::{ViewModel, ViewScratch};

impl ViewModel {
    pub(in crate::app) const DEFAULT_JITTER_ITERATIONS: usize = 5;
    pub(in crate::app) const DEFAULT_JITTER_INTERVAL_MS: f32 = 250.0;

    pub(in crate::app) fn new(plot: BubblePlot, provider: Box<dyn DataProvider>) -> Self {
        let display_radii = plot.nodes().iter().map(|node| node.radius).collect();

        Self {
            plot,
            provider,
            search: String::new(),
            live_physics: true,
            show_quadtree_overlay: false,
            jitter_iterations: Self::DEFAULT_JITTER_ITERATIONS,
            jitter_interval_ms: Self::DEFAULT_JITTER_INTERVAL_MS,
            last_error: None,
            search_match_cache: None,
            show_fps_bar: true,
            fps_show_current: true,
            fps_show_average: true,
            fps_show_frame_time: false,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
            view_scratch: ViewScratch {
                display_radii,
                screen_positions: Vec::new(),
                screen_radii: Vec::new(),
                draw_order: Vec::new(),
                quadtree_cells: Vec::new(),
            },
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("duelling bubbles");
                    ui.separator();

                    let colors = self.plot.config().colors;
                    ui.label(
                        RichText::new(self.plot.title(Side::Left))
                            .color(colors.left)
                            .strong(),
                    );
                    if ui
                        .button("change")
                        .on_hover_text("Replace the left side with a fresh dataset.")
                        .clicked()
                    {
                        self.change_side(Side::Left);
                    }

                    if ui
                        .button("shuffle")
                        .on_hover_text("Redraw bubble heights a few times to untangle clusters.")
                        .clicked()
                    {
                        self.start_jitter();
                    }
                    let jittering = self.plot.jitter_remaining().is_some();
                    if ui
                        .add_enabled(jittering, egui::Button::new("cancel"))
                        .on_hover_text("Stop the running shuffle.")
                        .clicked()
                    {
                        self.plot.cancel_jitter();
                    }

                    if ui
                        .button("change")
                        .on_hover_text("Replace the right side with a fresh dataset.")
                        .clicked()
                    {
                        self.change_side(Side::Right);
                    }
                    ui.label(
                        RichText::new(self.plot.title(Side::Right))
                            .color(colors.right)
                            .strong(),
                    );

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.simulation_text());
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_plot(ui));
    }

    pub(in crate::app) fn change_side(&mut self, side: Side) {
        let data = self.provider.get_data();
        match self.plot.update_display(side, &data) {
            Ok(()) => self.last_error = None,
            Err(error) => {
                log::error!("could not show `{}` on the {side} side: {error}", data.title);
                self.last_error = Some(error.to_string());
            }
        }
    }

    pub(in crate::app) fn start_jitter(&mut self) {
        let interval = Duration::from_secs_f32(self.jitter_interval_ms.max(0.0) / 1000.0);
        self.plot.jitter(self.jitter_iterations, interval);
    }
}
