use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 { pub x: f64, pub y: f64 }

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self { Self { x, y } }

    pub fn dot(self, other: Vec2) -> f64 { self.x * other.x + self.y * other.y }

    pub fn length(self) -> f64 { self.dot(self).sqrt() }

    /// Unit vector in the same direction. A zero-length vector stays zero
    /// instead of turning into NaN, so its node contributes nothing.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 { Vec2::ZERO } else { Vec2 { x: self.x / len, y: self.y / len } }
    }
}

/// A raw grid node: a scalar for value noise or a unit vector for gradient noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sample { Scalar(f64), Gradient(Vec2) }

impl Sample {
    /// Contribution of this node to a query point at `offset` from it.
    pub fn contribution(self, offset: Vec2) -> f64 {
        match self {
            Sample::Scalar(v) => v,
            Sample::Gradient(g) => g.dot(offset),
        }
    }
}
