use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2, vec2};

use duelling_bubbles::plot::PlotConfig;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

/// Dark text on pale fills, light text elsewhere.
pub(super) fn label_color(fill: Color32, opacity: f32) -> Color32 {
    let luma = (0.299 * fill.r() as f32) + (0.587 * fill.g() as f32) + (0.114 * fill.b() as f32);
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    if luma > 150.0 {
        Color32::from_rgba_unmultiplied(24, 24, 24, alpha)
    } else {
        Color32::from_rgba_unmultiplied(240, 240, 240, alpha)
    }
}

/// Maps plot coordinates onto the canvas rect, preserving aspect ratio.
#[derive(Clone, Copy, Debug)]
pub(super) struct PlotTransform {
    pub origin: Pos2,
    pub scale: f32,
}

impl PlotTransform {
    pub(super) fn fit(rect: Rect, config: &PlotConfig) -> Self {
        let scale = (rect.width() / config.canvas_width)
            .min(rect.height() / config.canvas_height)
            .max(0.05);
        let canvas = vec2(config.canvas_width, config.canvas_height) * scale;
        let margin = vec2(config.margin.left, config.margin.top) * scale;
        let origin = rect.center() - canvas * 0.5 + margin;
        Self { origin, scale }
    }

    pub(super) fn to_screen(self, plot: Vec2) -> Pos2 {
        self.origin + plot * self.scale
    }

    pub(super) fn to_plot(self, screen: Pos2) -> Vec2 {
        (screen - self.origin) / self.scale
    }
}

pub(super) fn draw_background(
    painter: &Painter,
    rect: Rect,
    transform: PlotTransform,
    config: &PlotConfig,
) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let top_left = transform.to_screen(Vec2::ZERO);
    let bottom_right = transform.to_screen(vec2(config.width(), config.height()));
    painter.rect_filled(
        Rect::from_min_max(top_left, bottom_right),
        0.0,
        Color32::from_rgb(27, 32, 40),
    );

    let border = |x: f32, color: Color32| {
        painter.line_segment(
            [
                transform.to_screen(vec2(x, 0.0)),
                transform.to_screen(vec2(x, config.height())),
            ],
            Stroke::new(3.0, color),
        );
    };
    border(0.0, config.colors.left);
    border(config.width(), config.colors.right);

    let guide = Stroke::new(1.0, Color32::from_rgba_unmultiplied(150, 160, 172, 90));
    let dash = 6.0 * transform.scale.max(0.5);
    let center_x = config.width() * 0.5;
    painter.extend(Shape::dashed_line(
        &[
            transform.to_screen(vec2(center_x, 0.0)),
            transform.to_screen(vec2(center_x, config.alive_floor())),
        ],
        guide,
        dash,
        dash,
    ));

    let gutter_y = config.alive_floor();
    painter.extend(Shape::dashed_line(
        &[
            transform.to_screen(vec2(0.0, gutter_y)),
            transform.to_screen(vec2(config.width(), gutter_y)),
        ],
        guide,
        dash,
        dash,
    ));
}

pub(super) fn draw_cell(
    painter: &Painter,
    transform: PlotTransform,
    center: Vec2,
    half_extent: f32,
    stroke: Stroke,
) {
    let min = center - vec2(half_extent, half_extent);
    let max = center + vec2(half_extent, half_extent);
    let top_left = transform.to_screen(min);
    let top_right = transform.to_screen(vec2(max.x, min.y));
    let bottom_right = transform.to_screen(max);
    let bottom_left = transform.to_screen(vec2(min.x, max.y));

    painter.line_segment([top_left, top_right], stroke);
    painter.line_segment([top_right, bottom_right], stroke);
    painter.line_segment([bottom_right, bottom_left], stroke);
    painter.line_segment([bottom_left, top_left], stroke);
}

/// Moves `current` toward `target` at `rate` per second.
pub(super) fn ease_towards(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let step = (rate * dt).clamp(0.0, 1.0);
    let next = current + (target - current) * step;
    if (target - next).abs() < 0.05 { target } else { next }
}
