use std::time::Duration;

use eframe::egui::vec2;

use duelling_bubbles::data::{DataGenerator, DataProvider, Dataset, KeywordFrequency, Side};
use duelling_bubbles::plot::{BubblePlot, Lifecycle, PlotConfig, PlotError, SimulationState};

fn dataset(title: &str, entries: &[(&str, f64)]) -> Dataset {
    Dataset::from_frequencies(
        title,
        entries
            .iter()
            .map(|(keyword, frequency)| ((*keyword).to_owned(), *frequency)),
    )
}

fn three_keyword_plot() -> BubblePlot {
    let left = dataset("Left", &[("small", 2.0), ("medium", 10.0), ("large", 30.0)]);
    let right = dataset("Right", &[("small", 4.0), ("medium", 12.0), ("large", 42.0)]);
    BubblePlot::from_datasets(PlotConfig::default(), &left, &right, 17).unwrap()
}

fn assert_targets_valid(plot: &BubblePlot) {
    let config = plot.config();
    let floor = config.alive_floor();
    for node in plot.nodes() {
        assert!(node.radius >= config.radius_min && node.radius <= config.radius_max);
        if node.killed {
            assert!(node.target.y >= config.height() - config.gutter.total());
            assert!(node.target.y <= config.height());
        } else {
            assert!(node.target.y > node.radius, "{} above canvas", node.keyword);
            assert!(node.target.y < floor - node.radius, "{} in gutter", node.keyword);
        }
    }
}

struct Fixed(Vec<Dataset>);

impl DataProvider for Fixed {
    fn get_data(&mut self) -> Dataset {
        self.0.remove(0)
    }
}

#[test]
fn opposite_keywords_sit_on_opposite_edges_with_equal_size() {
    let left = dataset("Left", &[("A", 10.0), ("B", 0.0)]);
    let right = dataset("Right", &[("A", 0.0), ("B", 10.0)]);
    let plot = BubblePlot::from_datasets(PlotConfig::default(), &left, &right, 1).unwrap();

    let a = plot.node("A").unwrap();
    let b = plot.node("B").unwrap();
    assert_eq!(a.skew(), -1.0);
    assert_eq!(b.skew(), 1.0);
    assert_eq!(a.mass(), 0.5);
    assert_eq!(b.mass(), 0.5);
    assert_eq!(a.radius, b.radius);
    assert_eq!(a.target.x, 0.0);
    assert_eq!(b.target.x, plot.config().width());

    let colors = plot.config().colors;
    assert_eq!(a.color, colors.left);
    assert_eq!(b.color, colors.right);
}

#[test]
fn init_display_reads_left_then_right() {
    let mut provider = Fixed(vec![
        dataset("First", &[("x", 1.0), ("y", 3.0)]),
        dataset("Second", &[("x", 5.0), ("y", 5.0)]),
    ]);
    let plot = BubblePlot::init_display(PlotConfig::default(), &mut provider, 2).unwrap();
    assert_eq!(plot.title(Side::Left), "First");
    assert_eq!(plot.title(Side::Right), "Second");
    assert_eq!(plot.node("x").unwrap().right_freq, 5.0);
    assert_eq!(plot.state(), SimulationState::Running);
}

#[test]
fn layout_is_reproducible_for_a_seed() {
    let first = three_keyword_plot();
    let second = three_keyword_plot();
    assert_eq!(first.nodes(), second.nodes());

    let left = dataset("Left", &[("small", 2.0), ("medium", 10.0), ("large", 30.0)]);
    let right = dataset("Right", &[("small", 4.0), ("medium", 12.0), ("large", 42.0)]);
    let other = BubblePlot::from_datasets(PlotConfig::default(), &left, &right, 18).unwrap();
    assert_ne!(first.nodes(), other.nodes());
}

#[test]
fn radius_domain_tracks_alive_extent() {
    let plot = three_keyword_plot();
    let config = plot.config();
    assert_eq!(plot.node("small").unwrap().radius, config.radius_min);
    assert_eq!(plot.node("large").unwrap().radius, config.radius_max);
    let medium = plot.node("medium").unwrap().radius;
    assert!(medium > config.radius_min && medium < config.radius_max);
    assert_targets_valid(&plot);
}

#[test]
fn killing_excludes_node_from_extent_and_parks_it() {
    let mut plot = three_keyword_plot();
    let large_mass = plot.node("large").unwrap().mass();

    let updates = plot.kill("large").unwrap();
    assert_eq!(updates[0].keyword, "large");
    assert!(updates[0].killed);

    let domain = plot.radius_domain();
    assert!(domain.max < large_mass);

    let config = *plot.config();
    let large = plot.node("large").unwrap();
    assert_eq!(large.radius, config.gutter_radius);
    assert_eq!(large.target.y, config.gutter_slot(config.gutter_radius));
    assert_eq!(plot.node("medium").unwrap().radius, config.radius_max);
    assert_eq!(plot.alive_count(), 2);
    assert_targets_valid(&plot);
}

#[test]
fn reviving_restores_a_radius_from_the_alive_extent() {
    let mut plot = three_keyword_plot();
    plot.kill("large").unwrap();
    let updates = plot.revive("large").unwrap();
    assert_eq!(updates[0].keyword, "large");
    assert!(!updates[0].killed);

    let large = plot.node("large").unwrap();
    assert!(plot.radius_domain().contains(large.mass()));
    assert_eq!(plot.radius_domain().max, large.mass());
    assert_eq!(large.radius, plot.config().radius_max);
    assert!(plot.node("medium").unwrap().radius < plot.config().radius_max);
    assert_targets_valid(&plot);
}

#[test]
fn lifecycle_transitions_are_idempotent() {
    let mut plot = three_keyword_plot();
    assert!(plot.revive("small").unwrap().is_empty());

    assert!(!plot.kill("small").unwrap().is_empty());
    let domain = plot.radius_domain();
    assert!(plot.kill("small").unwrap().is_empty());
    assert_eq!(plot.radius_domain(), domain);
    assert_eq!(plot.lifecycle("small").unwrap(), Lifecycle::Killed);
}

#[test]
fn click_toggles_by_current_state() {
    let mut plot = three_keyword_plot();
    plot.click("medium").unwrap();
    assert_eq!(plot.lifecycle("medium").unwrap(), Lifecycle::Killed);
    plot.click("medium").unwrap();
    assert_eq!(plot.lifecycle("medium").unwrap(), Lifecycle::Alive);

    assert_eq!(
        plot.click("missing"),
        Err(PlotError::UnknownKeyword("missing".to_owned()))
    );
}

#[test]
fn killing_every_node_keeps_last_domain() {
    let mut plot = three_keyword_plot();
    plot.kill("small").unwrap();
    plot.kill("medium").unwrap();
    let before = plot.radius_domain();
    plot.kill("large").unwrap();

    let domain = plot.radius_domain();
    assert_eq!(domain, before);
    assert!(domain.min.is_finite() && domain.max.is_finite());
    assert_eq!(plot.alive_count(), 0);
}

#[test]
fn update_display_replaces_one_side() {
    let mut plot = three_keyword_plot();
    let update = dataset("Fresh", &[("small", 50.0), ("medium", 1.0), ("large", 1.0)]);
    plot.update_display(Side::Left, &update).unwrap();

    assert_eq!(plot.title(Side::Left), "Fresh");
    assert_eq!(plot.title(Side::Right), "Right");
    let small = plot.node("small").unwrap();
    assert_eq!(small.left_freq, 50.0);
    assert_eq!(small.left_total, 52.0);
    assert_eq!(small.right_freq, 4.0);
    assert!(small.skew() < 0.0);
    assert!((plot.alpha() - 0.2).abs() < 1e-6);
    assert_targets_valid(&plot);
}

#[test]
fn update_display_keeps_killed_nodes_parked() {
    let mut plot = three_keyword_plot();
    plot.kill("medium").unwrap();
    let update = dataset("Fresh", &[("small", 1.0), ("medium", 80.0), ("large", 3.0)]);
    plot.update_display(Side::Right, &update).unwrap();

    let medium = plot.node("medium").unwrap();
    assert!(medium.killed);
    assert_eq!(medium.radius, plot.config().gutter_radius);
    assert!(!plot.radius_domain().contains(medium.mass()));
    assert_targets_valid(&plot);
}

#[test]
fn mismatched_updates_are_rejected_without_changes() {
    let mut plot = three_keyword_plot();
    let before = plot.nodes().to_vec();

    let missing = dataset("Short", &[("small", 1.0), ("medium", 1.0)]);
    assert_eq!(
        plot.update_display(Side::Right, &missing),
        Err(PlotError::MissingKeyword {
            side: Side::Right,
            keyword: "large".to_owned()
        })
    );

    let extra = dataset(
        "Long",
        &[("small", 1.0), ("medium", 1.0), ("large", 1.0), ("huge", 1.0)],
    );
    assert!(matches!(
        plot.update_display(Side::Left, &extra),
        Err(PlotError::UnexpectedKeyword { keyword, .. }) if keyword == "huge"
    ));

    let negative = Dataset {
        title: "Broken".to_owned(),
        total_frequency: 3.0,
        keywords: vec![
            KeywordFrequency { keyword: "small".to_owned(), frequency: 1.0 },
            KeywordFrequency { keyword: "medium".to_owned(), frequency: -1.0 },
            KeywordFrequency { keyword: "large".to_owned(), frequency: 3.0 },
        ],
    };
    assert!(matches!(
        plot.update_display(Side::Left, &negative),
        Err(PlotError::InvalidFrequency { .. })
    ));

    let infinite = Dataset {
        title: "Overflow".to_owned(),
        total_frequency: f64::INFINITY,
        keywords: vec![
            KeywordFrequency { keyword: "small".to_owned(), frequency: f64::INFINITY },
            KeywordFrequency { keyword: "medium".to_owned(), frequency: 1.0 },
            KeywordFrequency { keyword: "large".to_owned(), frequency: 3.0 },
        ],
    };
    assert!(matches!(
        plot.update_display(Side::Left, &infinite),
        Err(PlotError::InvalidTotal { side: Side::Left, .. })
    ));

    let infinite_keyword = Dataset {
        total_frequency: 4.0,
        ..infinite
    };
    assert!(matches!(
        plot.update_display(Side::Right, &infinite_keyword),
        Err(PlotError::InvalidFrequency { keyword, .. }) if keyword == "small"
    ));

    assert_eq!(plot.nodes(), before.as_slice());
    assert_eq!(plot.title(Side::Left), "Left");
}

#[test]
fn construction_requires_matching_keyword_sets() {
    let left = dataset("Left", &[("a", 1.0), ("b", 1.0)]);
    let right = dataset("Right", &[("a", 1.0), ("c", 1.0)]);
    assert!(matches!(
        BubblePlot::from_datasets(PlotConfig::default(), &left, &right, 0),
        Err(PlotError::UnexpectedKeyword { side: Side::Right, .. })
    ));

    let duplicated = dataset("Left", &[("a", 1.0), ("a", 2.0)]);
    assert!(matches!(
        BubblePlot::from_datasets(PlotConfig::default(), &duplicated, &left, 0),
        Err(PlotError::DuplicateKeyword { side: Side::Left, .. })
    ));
}

#[test]
fn every_tick_respects_canvas_bounds() {
    let mut generator = DataGenerator::new(30, 200, 42);
    let mut plot = BubblePlot::init_display(PlotConfig::default(), &mut generator, 42).unwrap();
    for keyword in ["potato", "corn", "apple"] {
        if plot.node(keyword).is_some() {
            plot.kill(keyword).unwrap();
        }
    }
    let first = plot.nodes()[0].keyword.clone();
    plot.click(&first).unwrap();

    let config = *plot.config();
    for step in 0..300 {
        if step == 120 {
            plot.update_display(Side::Right, &generator.get_data()).unwrap();
        }
        plot.tick();
        for node in plot.nodes() {
            assert!(node.position.x >= node.radius - 1e-3);
            assert!(node.position.x <= config.width() - node.radius + 1e-3);
            assert!(node.position.y >= node.radius - 1e-3);
            let floor = if node.killed {
                config.height() - config.gutter.margin_bottom
            } else {
                config.alive_floor()
            };
            assert!(node.position.y <= floor - node.radius + 1e-3);
        }
    }
}

#[test]
fn jitter_redraws_on_schedule_and_can_be_cancelled() {
    let mut plot = three_keyword_plot();
    plot.jitter(5, Duration::from_millis(250));
    assert_eq!(plot.jitter_remaining(), Some(5));

    let before = plot.node("medium").unwrap().target.y;
    plot.advance(Duration::from_millis(260));
    assert_eq!(plot.jitter_remaining(), Some(4));
    assert_ne!(plot.node("medium").unwrap().target.y, before);
    assert!((plot.alpha() - 0.2 * plot.config().alpha_decay).abs() < 1e-6);

    assert!(plot.cancel_jitter());
    assert_eq!(plot.jitter_remaining(), None);
    assert!(!plot.cancel_jitter());

    plot.jitter(2, Duration::from_millis(100));
    plot.advance(Duration::from_millis(500));
    assert_eq!(plot.jitter_remaining(), None);
}

#[test]
fn frames_expose_render_values() {
    let plot = three_keyword_plot();
    let frames = plot.frames().collect::<Vec<_>>();
    assert_eq!(frames.len(), 3);
    for frame in frames {
        let node = plot.node(frame.keyword).unwrap();
        assert_eq!(frame.x, node.position.x);
        assert_eq!(frame.y, node.position.y);
        assert_eq!(frame.font_size, node.radius * 0.75);
        assert_eq!(frame.color, node.color);
    }
}

#[test]
fn dragged_bubble_stays_on_canvas_and_layout_resettles() {
    let mut plot = three_keyword_plot();
    let config = *plot.config();
    let radius = plot.node("large").unwrap().radius;

    let held = plot.drag("large", vec2(-400.0, 5_000.0)).unwrap();
    assert_eq!(held, vec2(radius, config.alive_floor() - radius));

    let inside = vec2(config.width() * 0.5, config.alive_floor() * 0.5);
    for _ in 0..60 {
        assert_eq!(plot.drag("large", inside).unwrap(), inside);
        plot.tick();
        assert_eq!(plot.node("large").unwrap().position, inside);
    }

    assert_eq!(plot.release_drag(), Some("large"));
    for _ in 0..600 {
        plot.tick();
        for node in plot.nodes() {
            assert!(node.position.x >= node.radius - 1e-3);
            assert!(node.position.x <= config.width() - node.radius + 1e-3);
            assert!(node.position.y >= node.radius - 1e-3);
            assert!(node.position.y <= config.alive_floor() - node.radius + 1e-3);
        }
    }
    assert_eq!(plot.state(), SimulationState::Settled);
    assert_ne!(plot.node("large").unwrap().position, inside);
}
