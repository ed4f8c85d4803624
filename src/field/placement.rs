// Randomized placement for new circles.
//
// Candidates are sampled uniformly inside the field bounds shrunk by a margin
// and accepted only when strictly farther than `min_separation` from every
// existing center. Sampling gives up after `max_attempts` candidates, so a
// saturated field reports PlacementError::Exhausted instead of spinning.
//
// Clicks do not sample: PlacementRequest::At hands the point through
// untouched, without the separation check. Merge results skip the generator
// and go straight into the field at their averaged point.

use std::fmt;

use log::{debug, warn};
use rand::Rng;

use super::{Circle, Point, Rect};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlacementRequest {
    /// Sample a point satisfying margin and separation constraints.
    Random,
    /// Use exactly this field-local point.
    At(Point),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// Every sampled candidate was too close to an existing circle.
    Exhausted { attempts: usize, existing: usize },
    /// The margin leaves no room inside the bounds.
    EmptyRegion { bounds: Rect, margin: f64 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Exhausted { attempts, existing } => write!(
                f,
                "No free spot found after {} attempts ({} circles on the field)",
                attempts, existing
            ),
            PlacementError::EmptyRegion { bounds, margin } => write!(
                f,
                "Margin {} leaves no room inside {}x{} bounds",
                margin, bounds.w, bounds.h
            ),
        }
    }
}
impl std::error::Error for PlacementError {}

pub struct PlacementGenerator<R> {
    rng: R,
    max_attempts: usize,
}

impl<R: Rng> PlacementGenerator<R> {
    pub fn new(rng: R, max_attempts: usize) -> Self {
        Self { rng, max_attempts: max_attempts.max(1) }
    }

    /// Shared access to the generator's RNG (colors for new circles come from here too).
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn place(
        &mut self,
        request: PlacementRequest,
        existing: &[Circle],
        bounds: Rect,
        min_margin: f64,
        min_separation: f64,
    ) -> Result<Point, PlacementError> {
        match request {
            PlacementRequest::At(p) => Ok(p),
            PlacementRequest::Random => self.generate(existing, bounds, min_margin, min_separation),
        }
    }

    /// Sample a point inside `bounds` inset by `min_margin` whose distance to every
    /// existing center is strictly greater than `min_separation`.
    pub fn generate(
        &mut self,
        existing: &[Circle],
        bounds: Rect,
        min_margin: f64,
        min_separation: f64,
    ) -> Result<Point, PlacementError> {
        let region = bounds
            .inset(min_margin)
            .ok_or(PlacementError::EmptyRegion { bounds, margin: min_margin })?;

        for attempt in 1..=self.max_attempts {
            let candidate = Point {
                x: self.rng.gen_range(region.x..=region.right()),
                y: self.rng.gen_range(region.y..=region.bottom()),
            };
            if is_clear(&candidate, existing, min_separation) {
                debug!("placed circle at ({:.1}, {:.1}) after {} attempt(s)", candidate.x, candidate.y, attempt);
                return Ok(candidate);
            }
        }

        warn!(
            "placement exhausted after {} attempts with {} circles",
            self.max_attempts,
            existing.len()
        );
        Err(PlacementError::Exhausted { attempts: self.max_attempts, existing: existing.len() })
    }
}

fn is_clear(candidate: &Point, existing: &[Circle], min_separation: f64) -> bool {
    existing.iter().all(|c| c.center.distance(candidate) > min_separation)
}
