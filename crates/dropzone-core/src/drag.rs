#![forbid(unsafe_code)]

//! Two-axis composition: one draggable element over a set of drop zones.
//!
//! [`DragController`] wires a [`GestureBridge`] to an x and a y
//! [`MotionController`]. Both axes receive the same [`GestureFrame`] so they
//! change phase in lockstep, but they settle independently: each axis picks
//! its own nearest target.

use std::time::Duration;

use crate::config::MotionConfig;
use crate::controller::{ControllerState, MotionController};
use crate::error::ConfigError;
use crate::gesture::{GestureBridge, GestureFrame, HandlerEvent};
use crate::targets::{Axis, DropZone, TargetSet};

/// A rendered 2D offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drag-and-release controller for one element over a set of drop zones.
#[derive(Debug, Clone)]
pub struct DragController {
    zones: Vec<DropZone>,
    bridge: GestureBridge,
    x: MotionController,
    y: MotionController,
}

impl DragController {
    /// Build a controller resting in `zones[initial_zone]`.
    ///
    /// Both axes share `config`.
    pub fn new(
        zones: Vec<DropZone>,
        initial_zone: usize,
        config: MotionConfig,
    ) -> Result<Self, ConfigError> {
        let x_targets = TargetSet::from_zones(&zones, Axis::X)?;
        let y_targets = TargetSet::from_zones(&zones, Axis::Y)?;
        let start = *zones.get(initial_zone).ok_or(ConfigError::ZoneOutOfRange {
            index: initial_zone,
            len: zones.len(),
        })?;
        let x = MotionController::new(x_targets, start.center_x, config.clone())?;
        let y = MotionController::new(y_targets, start.center_y, config)?;
        Self::from_axes(zones, x, y)
    }

    /// Compose two independently configured axis controllers.
    ///
    /// `x` must drive [`Axis::X`] and `y` must drive [`Axis::Y`]. `zones` is
    /// only used by [`zone_at_rest`](Self::zone_at_rest).
    pub fn from_axes(
        zones: Vec<DropZone>,
        x: MotionController,
        y: MotionController,
    ) -> Result<Self, ConfigError> {
        for (expected, found) in [(Axis::X, x.axis()), (Axis::Y, y.axis())] {
            if expected != found {
                return Err(ConfigError::AxisMismatch { expected, found });
            }
        }
        Ok(Self {
            zones,
            bridge: GestureBridge::new(),
            x,
            y,
        })
    }

    /// Feed a raw handler event through the gesture bridge.
    pub fn handle(&mut self, event: &HandlerEvent) -> Point {
        let frame = self.bridge.handle(event);
        self.apply(&frame)
    }

    /// Feed an already normalized gesture frame to both axes.
    pub fn apply(&mut self, frame: &GestureFrame) -> Point {
        Point::new(
            self.x.on_gesture(frame.phase, frame.x),
            self.y.on_gesture(frame.phase, frame.y),
        )
    }

    /// Advance both axes by one frame.
    pub fn on_frame(&mut self, dt: Duration) -> Point {
        Point::new(self.x.on_frame(dt), self.y.on_frame(dt))
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x.position(), self.y.position())
    }

    /// Whether either axis is still settling.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.x.is_animating() || self.y.is_animating()
    }

    /// Combined state: dragging if either axis drags, settling if either
    /// axis settles, resting otherwise.
    #[must_use]
    pub fn state(&self) -> ControllerState {
        match (self.x.state(), self.y.state()) {
            (ControllerState::Dragging, _) | (_, ControllerState::Dragging) => {
                ControllerState::Dragging
            }
            (ControllerState::Settling, _) | (_, ControllerState::Settling) => {
                ControllerState::Settling
            }
            _ => ControllerState::Resting,
        }
    }

    /// The zone whose center the element rests on exactly, if any.
    ///
    /// Since axes snap independently the element may rest on a column of one
    /// zone and a row of another; that matches no zone.
    #[must_use]
    pub fn zone_at_rest(&self) -> Option<&DropZone> {
        if self.state() != ControllerState::Resting {
            return None;
        }
        let here = self.position();
        self.zones
            .iter()
            .find(|z| z.center_x == here.x && z.center_y == here.y)
    }

    #[must_use]
    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    #[must_use]
    pub fn axis(&self, axis: Axis) -> &MotionController {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    #[must_use]
    pub fn bridge(&self) -> &GestureBridge {
        &self.bridge
    }
}
