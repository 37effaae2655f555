use eframe::egui::{Color32, Vec2};

use crate::data::Side;

use super::mapper;

/// One bubble per keyword shared by both datasets.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub keyword: String,
    pub left_freq: f64,
    pub right_freq: f64,
    pub left_total: f64,
    pub right_total: f64,
    pub position: Vec2,
    pub target: Vec2,
    pub radius: f32,
    pub color: Color32,
    pub killed: bool,
}

impl Node {
    pub fn skew(&self) -> f32 {
        mapper::skew(
            self.left_freq,
            self.right_freq,
            self.left_total,
            self.right_total,
        )
    }

    pub fn mass(&self) -> f32 {
        mapper::mass(
            self.left_freq,
            self.right_freq,
            self.left_total,
            self.right_total,
        )
    }

    pub fn is_alive(&self) -> bool {
        !self.killed
    }

    pub(super) fn set_side(&mut self, side: Side, frequency: f64, total: f64) {
        match side {
            Side::Left => {
                self.left_freq = frequency;
                self.left_total = total;
            }
            Side::Right => {
                self.right_freq = frequency;
                self.right_total = total;
            }
        }
    }
}

/// Per-tick draw record handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleFrame<'a> {
    pub keyword: &'a str,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Color32,
    pub font_size: f32,
    pub killed: bool,
}

/// Visual targets of a node after a lifecycle or dataset change, for the
/// transition layer to animate towards.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeUpdate {
    pub keyword: String,
    pub radius: f32,
    pub color: Color32,
    pub target: Vec2,
    pub killed: bool,
}

impl From<&Node> for NodeUpdate {
    fn from(node: &Node) -> Self {
        Self {
            keyword: node.keyword.clone(),
            radius: node.radius,
            color: node.color,
            target: node.target,
            killed: node.killed,
        }
    }
}
