use super::node::Node;

/// Closed `[min, max]` range of mass values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f32,
    pub max: f32,
}

impl Extent {
    pub fn from_values(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |extent: Option<Self>, value| {
                Some(match extent {
                    Some(extent) => Self {
                        min: extent.min.min(value),
                        max: extent.max.max(value),
                    },
                    None => Self {
                        min: value,
                        max: value,
                    },
                })
            })
    }

    pub fn contains(self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Mass extent of the alive population; the last known extent survives an
/// empty population.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtentTracker {
    current: Option<Extent>,
}

impl ExtentTracker {
    pub fn current(&self) -> Option<Extent> {
        self.current
    }

    pub fn recompute<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Node>) -> Option<Extent> {
        let alive = nodes
            .into_iter()
            .filter(|node| node.is_alive())
            .map(Node::mass);

        match Extent::from_values(alive) {
            Some(extent) => self.current = Some(extent),
            None => log::debug!("no alive bubbles; keeping radius domain {:?}", self.current),
        }
        self.current
    }
}
