//! Drop-zone layouts: the built-in four-zone portrait grid, or a JSON file.
//!
//! A zone file is a JSON array of zone centers:
//!
//! ```json
//! [{ "id": 1, "x": 70.0, "y": 128.5 }, { "id": 2, "x": 190.0, "y": 128.5 }]
//! ```

use std::path::Path;

use dropzone_core::DropZone;
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// Side of the draggable element.
pub const ELEMENT_SIZE: f64 = 100.0;
/// Side of a drop-zone outline.
pub const ZONE_SIZE: f64 = 107.0;
/// Top edge of the upper and lower zone rows.
pub const ROW_TOPS: [f64; 2] = [125.0, 400.0];
/// Screen width used when none is given.
pub const DEFAULT_SCREEN_WIDTH: f64 = 360.0;

/// One zone as written in a zone file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl From<ZoneSpec> for DropZone {
    fn from(spec: ZoneSpec) -> Self {
        DropZone::new(spec.id, spec.x, spec.y)
    }
}

impl From<&DropZone> for ZoneSpec {
    fn from(zone: &DropZone) -> Self {
        Self {
            id: zone.id,
            x: zone.center_x,
            y: zone.center_y,
        }
    }
}

/// Two columns at one and two thirds of the screen width, two rows.
///
/// Listed in the order 3, 5, 1, 4 so the element starts top right.
pub fn default_layout(screen_width: f64) -> Result<Vec<DropZone>> {
    if !screen_width.is_finite() || screen_width <= 0.0 {
        return Err(HarnessError::invalid(format!(
            "screen width must be a positive number, got {screen_width}"
        )));
    }
    let third = screen_width / 3.0;
    let [upper, lower] = ROW_TOPS;
    Ok(vec![
        DropZone::centered(3, third * 2.0, upper, ELEMENT_SIZE, ZONE_SIZE),
        DropZone::centered(5, third, lower, ELEMENT_SIZE, ZONE_SIZE),
        DropZone::centered(1, third, upper, ELEMENT_SIZE, ZONE_SIZE),
        DropZone::centered(4, third * 2.0, lower, ELEMENT_SIZE, ZONE_SIZE),
    ])
}

/// Parse a zone list from JSON text.
pub fn parse_zones(json: &str) -> serde_json::Result<Vec<DropZone>> {
    let specs: Vec<ZoneSpec> = serde_json::from_str(json)?;
    Ok(specs.into_iter().map(DropZone::from).collect())
}

/// Read a zone list from a JSON file.
pub fn load_zones(path: &Path) -> Result<Vec<DropZone>> {
    let text = std::fs::read_to_string(path).map_err(|source| HarnessError::ZoneFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_zones(&text).map_err(|source| HarnessError::ZoneParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Zones from `path` when given, the default grid otherwise.
pub fn resolve(path: Option<&Path>, screen_width: f64) -> Result<Vec<DropZone>> {
    match path {
        Some(path) => load_zones(path),
        None => default_layout(screen_width),
    }
}
