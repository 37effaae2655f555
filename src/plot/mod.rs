//! Layout engine for the duelling bubble plot: value mappings, the alive
//! extent, the collision quadtree, the force simulation and bubble lifecycle.

mod collide;
mod config;
mod controller;
mod drag;
mod error;
mod extent;
mod jitter;
mod lifecycle;
mod mapper;
mod node;
mod quadtree;
mod simulation;

pub use collide::{CollisionParams, resolve_all, resolve_node};
pub use config::{Gutter, Margin, PlotConfig, SideColors};
pub use controller::BubblePlot;
pub use error::PlotError;
pub use extent::{Extent, ExtentTracker};
pub use jitter::Jitter;
pub use lifecycle::Lifecycle;
pub use mapper::{RadiusScale, ValueMapper, mass, skew};
pub use node::{BubbleFrame, Node, NodeUpdate};
pub use quadtree::{QuadBounds, QuadNode, Quadtree, QuadtreeCell};
pub use simulation::{ForceSimulation, SimulationState};
