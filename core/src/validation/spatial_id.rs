//! Spatial ID parsing and area checks.
//!
//! A spatial ID addresses one cell of a quadtree-based voxel grid and is
//! written `zoom/elevation/x/y`, e.g. `20/0/931176/412938`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use sid_shared::validators;
use thiserror::Error;

/// Which zoom values the shape check accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomRule {
    /// Whole number, 1 or more, no leading zero
    #[default]
    Positive,
    /// Any non-negative integer
    NonNegative,
}

/// Component of a spatial ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Zoom,
    Elevation,
    X,
    Y,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Zoom => write!(f, "zoom"),
            Segment::Elevation => write!(f, "elevation"),
            Segment::X => write!(f, "x"),
            Segment::Y => write!(f, "y"),
        }
    }
}

/// Reasons a string is not a spatial ID
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("expected 4 '/'-separated segments, found {found}")]
    SegmentCount { found: usize },

    #[error("invalid {segment} segment: {value:?}")]
    Segment { segment: Segment, value: String },

    #[error("{segment} segment out of range: {value}")]
    Overflow { segment: Segment, value: String },
}

/// Parsed spatial ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpatialId {
    pub zoom: u32,
    pub elevation: i64,
    pub x: u64,
    pub y: u64,
}

impl SpatialId {
    pub fn new(zoom: u32, elevation: i64, x: u64, y: u64) -> Self {
        Self {
            zoom,
            elevation,
            x,
            y,
        }
    }

    /// Split on `/` and check every segment against its pattern
    pub fn parse(raw: &str, zoom_rule: ZoomRule) -> Result<Self, ShapeError> {
        let segments: Vec<&str> = raw.split('/').collect();
        let [zoom, elevation, x, y] = segments[..] else {
            return Err(ShapeError::SegmentCount {
                found: segments.len(),
            });
        };

        if !validators::is_signed_integer(elevation) {
            return Err(segment_error(Segment::Elevation, elevation));
        }
        let zoom_ok = match zoom_rule {
            ZoomRule::Positive => validators::is_whole_number(zoom),
            ZoomRule::NonNegative => validators::is_non_negative_integer(zoom),
        };
        if !zoom_ok {
            return Err(segment_error(Segment::Zoom, zoom));
        }
        if !validators::is_non_negative_integer(x) {
            return Err(segment_error(Segment::X, x));
        }
        if !validators::is_non_negative_integer(y) {
            return Err(segment_error(Segment::Y, y));
        }

        Ok(Self {
            zoom: parse_segment(Segment::Zoom, zoom)?,
            elevation: parse_segment(Segment::Elevation, elevation)?,
            x: parse_segment(Segment::X, x)?,
            y: parse_segment(Segment::Y, y)?,
        })
    }
}

impl FromStr for SpatialId {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, ZoomRule::Positive)
    }
}

impl fmt::Display for SpatialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.zoom, self.elevation, self.x, self.y)
    }
}

fn segment_error(segment: Segment, value: &str) -> ShapeError {
    ShapeError::Segment {
        segment,
        value: value.to_string(),
    }
}

// Pattern already matched, so the only possible failure is overflow.
fn parse_segment<T: FromStr>(segment: Segment, value: &str) -> Result<T, ShapeError> {
    value.parse().map_err(|_| ShapeError::Overflow {
        segment,
        value: value.to_string(),
    })
}

/// Shape check that treats an absent value as valid
pub fn parse_and_check_shape(
    raw: Option<&str>,
    zoom_rule: ZoomRule,
) -> Result<Option<SpatialId>, ShapeError> {
    raw.map(|r| SpatialId::parse(r, zoom_rule)).transpose()
}

/// `lower <= zoom <= upper`; absent ids pass
pub fn check_zoom_range(id: Option<&SpatialId>, lower: u32, upper: u32) -> bool {
    id.map_or(true, |id| lower <= id.zoom && id.zoom <= upper)
}

/// Zoom segment of an already shape-checked id
pub fn zoom_of(raw: &str) -> Option<u32> {
    raw.split('/').next()?.parse().ok()
}

/// Check that the ids together cover no more than one cell at `lower`.
///
/// Each id at zoom `z` covers `4^(upper - z)` cells of zoom `upper`; the sum
/// must not exceed `4^(upper - lower)`. Ids whose zoom cannot be read are
/// ignored, reporting them is the shape check's job.
pub fn check_area_bound<I, S>(ids: I, lower: u32, upper: u32) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let bound = i64::from(upper) - i64::from(lower);

    // Cells per exponent `upper - z`. Exponents may be negative for ids finer than `upper`.
    let mut cells: BTreeMap<i64, u64> = BTreeMap::new();
    for raw in ids {
        let Some(zoom) = zoom_of(raw.as_ref()) else {
            continue;
        };
        let exponent = i64::from(upper) - i64::from(zoom);
        if exponent > bound {
            return false;
        }
        *cells.entry(exponent).or_default() += 1;
    }

    covers_at_most_one_cell(&cells, bound)
}

/// Fold cell counts upwards, four cells of one level into one of the next.
///
/// Partial groups round up, which keeps the comparison exact:
/// `sum <= 4^bound` iff `ceil(sum / 4^bound) <= 1`.
fn covers_at_most_one_cell(cells: &BTreeMap<i64, u64>, bound: i64) -> bool {
    let Some(&lowest) = cells.keys().next() else {
        return true;
    };

    let mut level = lowest;
    let mut carried = 0_u64;
    for (&exponent, &count) in cells {
        carried = lift(carried, exponent - level).saturating_add(count);
        level = exponent;
    }

    lift(carried, bound - level) <= 1
}

fn lift(mut cells: u64, levels: i64) -> u64 {
    for _ in 0..levels {
        if cells <= 1 {
            break;
        }
        cells = cells.div_ceil(4);
    }
    cells
}

/// `area <= limit`; absent areas pass
pub fn check_polygon_area(area: Option<f64>, limit: i64) -> bool {
    area.map_or(true, |a| a <= limit as f64)
}

/// At least three lat/long pairs; absent or empty lists pass
pub fn check_minimum_vertices<S>(coordinates: Option<&[S]>) -> bool {
    match coordinates {
        None => true,
        Some(c) if c.is_empty() => true,
        Some(c) => c.len() >= 6,
    }
}
