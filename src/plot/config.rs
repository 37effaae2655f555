use eframe::egui::Color32;

use super::error::PlotError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Reserved band along the bottom edge where killed bubbles are parked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gutter {
    pub content_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl Gutter {
    pub fn total(self) -> f32 {
        self.content_height + self.margin_top + self.margin_bottom
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideColors {
    pub left: Color32,
    pub middle: Color32,
    pub right: Color32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub margin: Margin,
    pub gutter: Gutter,
    pub radius_min: f32,
    pub radius_max: f32,
    pub gutter_radius: f32,
    /// Extra clearance between bubbles of different colors.
    pub padding: f32,
    pub y_spread: f32,
    pub colors: SideColors,
    pub start_alpha: f32,
    pub redraw_alpha: f32,
    pub lifecycle_alpha: f32,
    pub alpha_decay: f32,
    pub alpha_min: f32,
    pub gravity_strength: f32,
    pub collision_alpha: f32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            canvas_width: 960.0,
            canvas_height: 450.0,
            margin: Margin {
                top: 5.0,
                right: 5.0,
                bottom: 5.0,
                left: 5.0,
            },
            gutter: Gutter {
                content_height: 20.0,
                margin_top: 2.0,
                margin_bottom: 2.0,
            },
            radius_min: 10.0,
            radius_max: 50.0,
            gutter_radius: 10.0,
            padding: 2.0,
            y_spread: 60.0,
            colors: SideColors {
                left: Color32::from_rgb(0x76, 0x2A, 0x83),
                middle: Color32::from_rgb(0xF7, 0xF7, 0xF7),
                right: Color32::from_rgb(0x1B, 0x78, 0x37),
            },
            start_alpha: 0.1,
            redraw_alpha: 0.2,
            lifecycle_alpha: 0.03,
            alpha_decay: 0.99,
            alpha_min: 0.005,
            gravity_strength: 0.9,
            collision_alpha: 0.5,
        }
    }
}

impl PlotConfig {
    /// Drawable width inside the margins.
    pub fn width(&self) -> f32 {
        self.canvas_width - self.margin.left - self.margin.right
    }

    /// Drawable height inside the margins, gutter included.
    pub fn height(&self) -> f32 {
        self.canvas_height - self.margin.top - self.margin.bottom
    }

    /// Lowest y an alive bubble centre may reach before its edge enters the gutter.
    pub fn alive_floor(&self) -> f32 {
        self.height() - self.gutter.total()
    }

    /// Parking y for a killed bubble of the given radius.
    pub fn gutter_slot(&self, radius: f32) -> f32 {
        self.height() - radius - self.gutter.margin_bottom
    }

    pub fn validate(&self) -> Result<(), PlotError> {
        if !(self.width() > 0.0 && self.alive_floor() > 0.0) {
            return Err(PlotError::InvalidConfig(
                "canvas must leave a positive area inside margins and gutter",
            ));
        }
        if !(self.radius_min > 0.0 && self.radius_max >= self.radius_min) {
            return Err(PlotError::InvalidConfig(
                "radius range must be positive and ordered",
            ));
        }
        if !(self.gutter_radius > 0.0) {
            return Err(PlotError::InvalidConfig("gutter radius must be positive"));
        }
        if !(self.padding >= 0.0) {
            return Err(PlotError::InvalidConfig("padding must not be negative"));
        }
        if !(self.y_spread > 0.0 && self.y_spread.is_finite()) {
            return Err(PlotError::InvalidConfig("y spread must be positive"));
        }
        if !(self.alpha_decay > 0.0 && self.alpha_decay < 1.0) {
            return Err(PlotError::InvalidConfig("alpha decay must lie in (0, 1)"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_canvas_constants() {
        let config = PlotConfig::default();
        assert_eq!(config.width(), 950.0);
        assert_eq!(config.height(), 440.0);
        assert_eq!(config.gutter.total(), 24.0);
        assert_eq!(config.alive_floor(), 416.0);
        assert_eq!(config.gutter_slot(config.gutter_radius), 428.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let config = PlotConfig {
            radius_min: 40.0,
            radius_max: 20.0,
            ..PlotConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlotError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_canvas_swallowed_by_gutter() {
        let config = PlotConfig {
            canvas_height: 30.0,
            ..PlotConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
