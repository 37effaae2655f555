mod app;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use duelling_bubbles::data::{DataGenerator, DataProvider, load_dataset};
use duelling_bubbles::plot::{BubblePlot, PlotConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Canvas width in points, margins included.
    #[arg(long, default_value_t = 960.0)]
    width: f32,
    /// Canvas height in points, margins and gutter included.
    #[arg(long, default_value_t = 450.0)]
    height: f32,
    /// Number of generated keywords.
    #[arg(long, default_value_t = 25)]
    keywords: usize,
    /// Generated frequencies fall in `[0, frequency-range)`.
    #[arg(long, default_value_t = 1000)]
    frequency_range: u32,
    /// Seed for data generation and layout; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Extra spacing between bubbles of different colors.
    #[arg(long, default_value_t = 2.0)]
    padding: f32,
    /// JSON dataset shown on the left side.
    #[arg(long, requires = "right")]
    left: Option<PathBuf>,
    /// JSON dataset shown on the right side.
    #[arg(long, requires = "left")]
    right: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}");

    let config = PlotConfig {
        canvas_width: args.width,
        canvas_height: args.height,
        padding: args.padding,
        ..PlotConfig::default()
    };

    let (plot, provider) = match (&args.left, &args.right) {
        (Some(left_path), Some(right_path)) => {
            let left = load_dataset(left_path)?;
            let right = load_dataset(right_path)?;
            let plot = BubblePlot::from_datasets(config, &left, &right, seed)
                .context("datasets do not describe the same keywords")?;
            let keywords = left.keyword_names().map(str::to_owned).collect();
            let provider = DataGenerator::with_keywords(keywords, args.frequency_range, seed);
            (plot, Box::new(provider) as Box<dyn DataProvider>)
        }
        _ => {
            let mut provider = DataGenerator::new(args.keywords, args.frequency_range, seed);
            let plot = BubblePlot::init_display(config, &mut provider, seed)
                .context("failed to set up the plot")?;
            (plot, Box::new(provider) as Box<dyn DataProvider>)
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1320.0, 680.0]),
        ..Default::default()
    };

    eframe::run_native(
        "duelling bubbles",
        options,
        Box::new(move |cc| Ok(Box::new(app::BubbleApp::new(cc, plot, provider)))),
    )
    .map_err(|error| anyhow!("failed to run the viewer: {error}"))
}
