//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Side;

/// Reference to one city on one side of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityRef {
    pub side: Side,
    pub index: usize,
}

impl CityRef {
    pub fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }
}

/// Straight-line flight between two map points (screen pixels).
///
/// `progress` is the fraction of the path covered, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub origin: DVec2,
    pub destination: DVec2,
    pub progress: f64,
}

impl Flight {
    pub fn new(origin: DVec2, destination: DVec2) -> Self {
        Self {
            origin,
            destination,
            progress: 0.0,
        }
    }

    /// Current interpolated position.
    pub fn position(&self) -> DVec2 {
        self.point_at(self.progress)
    }

    /// Point at an arbitrary fraction of the path, independent of progress.
    pub fn point_at(&self, fraction: f64) -> DVec2 {
        self.origin.lerp(self.destination, fraction.clamp(0.0, 1.0))
    }

    /// Set progress, clamped to `[0, 1]`.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }
}
