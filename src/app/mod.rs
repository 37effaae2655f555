use std::collections::{HashSet, VecDeque};

use eframe::egui::{Context, Pos2};

use duelling_bubbles::data::DataProvider;
use duelling_bubbles::plot::{BubblePlot, QuadtreeCell};

mod canvas;
mod render_utils;
mod ui;

pub struct BubbleApp {
    model: Box<ViewModel>,
}

struct ViewModel {
    plot: BubblePlot,
    provider: Box<dyn DataProvider>,
    search: String,
    live_physics: bool,
    show_quadtree_overlay: bool,
    jitter_iterations: usize,
    jitter_interval_ms: f32,
    last_error: Option<String>,
    search_match_cache: Option<SearchMatchCache>,
    show_fps_bar: bool,
    fps_show_current: bool,
    fps_show_average: bool,
    fps_show_frame_time: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
    view_scratch: ViewScratch,
}

struct SearchMatchCache {
    query: String,
    matches: HashSet<usize>,
}

/// Per-frame buffers reused between repaints.
struct ViewScratch {
    display_radii: Vec<f32>,
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
    draw_order: Vec<usize>,
    quadtree_cells: Vec<QuadtreeCell>,
}

impl BubbleApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        plot: BubblePlot,
        provider: Box<dyn DataProvider>,
    ) -> Self {
        Self {
            model: Box::new(ViewModel::new(plot, provider)),
        }
    }
}

impl eframe::App for BubbleApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.show(ctx);
    }
}
