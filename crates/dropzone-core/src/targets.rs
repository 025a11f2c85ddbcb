#![forbid(unsafe_code)]

//! Drop zones and per-axis target sets.
//!
//! A [`TargetSet`] is the ordered list of coordinates one axis may come to
//! rest on. It is fixed at construction and only consulted when a gesture is
//! released, to pick the coordinate the spring pulls toward.
//!
//! # Invariants
//!
//! 1. A target set is never empty.
//! 2. Every target is finite.
//! 3. [`TargetSet::nearest`] is deterministic: on an exact distance tie the
//!    target that appears first in the list wins.
//!
//! Each axis snaps independently, so with a 2D grid of zones the element
//! lands on the nearest column and the nearest row.

use std::fmt;

use crate::error::ConfigError;

/// A spatial axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// A valid resting place for the draggable element.
///
/// Centers are expressed in the element's transform space: placing the
/// element at `(center_x, center_y)` puts it visually inside the zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub id: u32,
    pub center_x: f64,
    pub center_y: f64,
}

impl DropZone {
    /// Create a zone whose resting offset is given directly.
    #[must_use]
    pub const fn new(id: u32, center_x: f64, center_y: f64) -> Self {
        Self {
            id,
            center_x,
            center_y,
        }
    }

    /// Create a zone from its horizontal anchor and top edge.
    ///
    /// The zone is `zone_size` tall and horizontally centered on `anchor_x`.
    /// The returned resting offset centers an element of `element_size`
    /// inside it.
    #[must_use]
    pub fn centered(id: u32, anchor_x: f64, top: f64, element_size: f64, zone_size: f64) -> Self {
        Self {
            id,
            center_x: anchor_x - element_size / 2.0,
            center_y: top + zone_size / 2.0 - element_size / 2.0,
        }
    }

    /// Resting coordinate on `axis`.
    #[inline]
    #[must_use]
    pub fn center(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.center_x,
            Axis::Y => self.center_y,
        }
    }
}

/// Ordered, non-empty list of rest coordinates for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSet {
    axis: Axis,
    targets: Vec<f64>,
}

impl TargetSet {
    /// Build a target set, rejecting empty or non-finite input.
    pub fn new(axis: Axis, targets: impl Into<Vec<f64>>) -> Result<Self, ConfigError> {
        let targets = targets.into();
        if targets.is_empty() {
            return Err(ConfigError::EmptyTargets { axis });
        }
        if let Some((index, &value)) = targets.iter().enumerate().find(|(_, t)| !t.is_finite()) {
            return Err(ConfigError::NonFiniteTarget { axis, index, value });
        }
        Ok(Self { axis, targets })
    }

    /// Collect the `axis` coordinate of every zone, in zone order.
    pub fn from_zones(zones: &[DropZone], axis: Axis) -> Result<Self, ConfigError> {
        Self::new(axis, zones.iter().map(|z| z.center(axis)).collect::<Vec<_>>())
    }

    #[inline]
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.targets
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Index of the target closest to `position`; first wins on ties.
    ///
    /// A NaN position compares unequal to everything, so it resolves to the
    /// first target.
    #[must_use]
    pub fn nearest_index(&self, position: f64) -> usize {
        let mut best = 0;
        let mut best_distance = (position - self.targets[0]).abs();
        for (i, &t) in self.targets.iter().enumerate().skip(1) {
            let distance = (position - t).abs();
            // Strict comparison keeps the earliest target on ties.
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best
    }

    /// Target closest to `position`; first wins on ties.
    #[must_use]
    pub fn nearest(&self, position: f64) -> f64 {
        self.targets[self.nearest_index(position)]
    }
}
