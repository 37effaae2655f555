//! Frequency pair to visual mappings: horizontal position, radius, colour,
//! target height, font size and label opacity.

use eframe::egui::Color32;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::config::{PlotConfig, SideColors};
use super::error::PlotError;
use super::extent::Extent;

const Y_TARGET_MAX_ATTEMPTS: usize = 64;
const FONT_SCALE: f32 = 0.75;
const OPACITY_EXPONENT: f32 = 0.1;
const OPACITY_NEAR: f32 = 20.0;
const OPACITY_RANGE: (f32, f32) = (0.2, 0.7);

fn share(frequency: f64, total: f64) -> f64 {
    if total > 0.0 { frequency / total } else { 0.0 }
}

/// Which side a keyword leans to, in `[-1, 1]`. Negative favours the left dataset.
pub fn skew(left_freq: f64, right_freq: f64, left_total: f64, right_total: f64) -> f32 {
    let left = share(left_freq, left_total);
    let right = share(right_freq, right_total);

    if left == 0.0 && right == 0.0 {
        return 0.0;
    }
    if left == 0.0 || right == 0.0 {
        return if left > right { -1.0 } else { 1.0 };
    }

    ((right - left) / (right + left)) as f32
}

/// Combined magnitude of a keyword across both datasets, in `[0, 1]`.
pub fn mass(left_freq: f64, right_freq: f64, left_total: f64, right_total: f64) -> f32 {
    let total = left_total + right_total;
    if total > 0.0 {
        ((left_freq + right_freq) / total) as f32
    } else {
        0.0
    }
}

/// Linear mass to pixel scale. The domain tracks the alive extent and is
/// replaced whenever the population changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusScale {
    domain: Extent,
    min: f32,
    max: f32,
}

impl RadiusScale {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            domain: Extent { min: 0.0, max: 0.0 },
            min,
            max,
        }
    }

    pub fn domain(&self) -> Extent {
        self.domain
    }

    pub fn set_domain(&mut self, domain: Extent) {
        self.domain = domain;
    }

    pub fn radius(&self, mass: f32) -> f32 {
        let span = self.domain.max - self.domain.min;
        if span.abs() <= f32::EPSILON || !span.is_finite() {
            return self.min;
        }

        let t = (mass - self.domain.min) / span;
        (self.min + t * (self.max - self.min)).clamp(self.min, self.max)
    }
}

/// Stateless mappings parameterised by the plot geometry.
#[derive(Clone, Debug)]
pub struct ValueMapper {
    width: f32,
    center_y: f32,
    diagonal: f32,
    colors: SideColors,
    vertical: Normal<f32>,
}

impl ValueMapper {
    pub fn new(config: &PlotConfig) -> Result<Self, PlotError> {
        let width = config.width();
        let height = config.height();
        let center_y = config.alive_floor() * 0.5;
        let vertical = Normal::new(center_y, config.y_spread)
            .map_err(|_| PlotError::InvalidConfig("y spread must be positive"))?;

        Ok(Self {
            width,
            center_y,
            diagonal: (width * width + height * height).sqrt(),
            colors: config.colors,
            vertical,
        })
    }

    pub fn center_y(&self) -> f32 {
        self.center_y
    }

    pub fn x_position(&self, skew: f32) -> f32 {
        (skew + 1.0) * 0.5 * self.width
    }

    /// Draws a target height that keeps a bubble of `radius` fully above the gutter.
    pub fn y_target<R: Rng + ?Sized>(&self, radius: f32, rng: &mut R) -> f32 {
        let radius = radius.min(self.center_y - 1.0).max(0.0);
        let upper = self.center_y * 2.0 - radius;

        for _ in 0..Y_TARGET_MAX_ATTEMPTS {
            let y = self.vertical.sample(rng);
            if y > radius && y < upper {
                return y;
            }
        }

        log::warn!(
            "no target height found for radius {radius:.1} after {Y_TARGET_MAX_ATTEMPTS} draws; using centre"
        );
        self.center_y
    }

    pub fn color(&self, skew: f32) -> Color32 {
        if skew >= 0.0 {
            lerp_color(self.colors.middle, self.colors.right, skew)
        } else {
            lerp_color(self.colors.left, self.colors.middle, skew + 1.0)
        }
    }

    pub fn font_size(&self, radius: f32) -> f32 {
        radius * FONT_SCALE
    }

    /// Label opacity for a bubble `distance` away from the hovered one.
    pub fn opacity(&self, distance: f32) -> f32 {
        let near = OPACITY_NEAR.powf(OPACITY_EXPONENT);
        let far = self.diagonal.max(OPACITY_NEAR + 1.0).powf(OPACITY_EXPONENT);
        let t = ((distance.max(0.0).powf(OPACITY_EXPONENT) - near) / (far - near)).clamp(0.0, 1.0);
        OPACITY_RANGE.0 + t * (OPACITY_RANGE.1 - OPACITY_RANGE.0)
    }
}

fn lerp_color(from: Color32, to: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * amount).round() as u8;

    Color32::from_rgb(
        channel(from.r(), to.r()),
        channel(from.g(), to.g()),
        channel(from.b(), to.b()),
    )
}
