pub mod error;

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use secrecy::SecretVec;
use serde::{Deserialize, Serialize};

use crate::pattern::error::*;

/// Rows and columns of the dot grid the user draws on.
pub const DEFAULT_PATTERN_GRID_SIZE: u16 = 8;

/// A dot on the pattern input grid, numbered from the top left corner:
///
/// ```text
/// (0,0) (1,0) (2,0) ...
/// (0,1) (1,1) (2,1) ...
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: u16,
    pub y: u16,
}

impl GridPoint {
    pub fn new(x: u16, y: u16) -> Self {
        GridPoint { x, y }
    }
}

// Left to right, then top to bottom: (0,0) < (1,0) < (0,1)
impl Ord for GridPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for GridPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// NOTE: This textual form is the KDF password, changing it breaks every existing backup
impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl FromStr for GridPoint {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| PatternError::Parse(format!("expected (x,y) but got {s:?}")))?;

        let (x, y) = inner
            .split_once(',')
            .ok_or_else(|| PatternError::Parse(format!("missing comma in {s:?}")))?;

        Ok(GridPoint {
            x: x.trim().parse()?,
            y: y.trim().parse()?,
        })
    }
}

/// The set of dots touched by the user's drawing. Stroke order is irrelevant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPattern {
    points: BTreeSet<GridPoint>,
}

impl UserPattern {
    pub fn new<I: IntoIterator<Item = GridPoint>>(points: I) -> Self {
        UserPattern {
            points: points.into_iter().collect(),
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &GridPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn validate(&self, grid_size: u16) -> Result<(), PatternError> {
        if self.points.is_empty() {
            return Err(PatternError::Empty);
        }

        if let Some(point) = self
            .points
            .iter()
            .find(|point| point.x >= grid_size || point.y >= grid_size)
        {
            return Err(PatternError::PointOutOfBounds {
                x: point.x,
                y: point.y,
                grid_size,
            });
        }

        Ok(())
    }

    /// Sorted points joined as `(x,y),(x,y)`
    pub fn canonical_string(&self) -> String {
        self.points
            .iter()
            .map(GridPoint::to_string)
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Password bytes fed to the KDF
    pub fn encode(&self) -> SecretVec<u8> {
        SecretVec::new(self.canonical_string().into_bytes())
    }
}

impl FromIterator<GridPoint> for UserPattern {
    fn from_iter<I: IntoIterator<Item = GridPoint>>(iter: I) -> Self {
        UserPattern::new(iter)
    }
}

impl FromStr for UserPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        if compact.is_empty() {
            return Ok(UserPattern::default());
        }

        let inner = compact
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| PatternError::Parse(format!("expected (x,y),... but got {s:?}")))?;

        inner
            .split("),(")
            .map(|point| format!("({point})").parse::<GridPoint>())
            .collect()
    }
}
