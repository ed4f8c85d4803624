// Merge evaluation after a finished drag.
//
// Only circles within `threshold` of the moved circle join the merge. The
// check is not transitive: a circle close to an intersecting circle but not
// to the moved one stays put, and the freshly created circle is not
// re-evaluated in the same pass.

use log::debug;
use serde::Serialize;

use super::{Circle, Color, Point};

/// Position and color of the circle a merge produces.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct MergedCircle {
    pub center: Point,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MergeResult {
    NoOp,
    Merge {
        /// Moved circle first, then intersecting circles in the order found.
        removed: Vec<Circle>,
        created: MergedCircle,
    },
}

impl MergeResult {
    pub fn is_noop(&self) -> bool {
        matches!(self, MergeResult::NoOp)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct MergeEngine {
    threshold: f64,
}

impl MergeEngine {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Strictly closer than the threshold.
    pub fn intersects(&self, a: &Circle, b: &Circle) -> bool {
        a.center.distance(&b.center) < self.threshold
    }

    pub fn on_drag_finish<'a, I>(&self, moved: &Circle, others: I) -> MergeResult
    where
        I: IntoIterator<Item = &'a Circle>,
    {
        let intersecting: Vec<Circle> = others
            .into_iter()
            .filter(|o| o.id != moved.id && self.intersects(o, moved))
            .copied()
            .collect();

        if intersecting.is_empty() {
            return MergeResult::NoOp;
        }

        let mut group = Vec::with_capacity(intersecting.len() + 1);
        group.push(*moved);
        group.extend(intersecting);

        let n = group.len() as f64;
        let center = Point {
            x: group.iter().map(|c| c.center.x).sum::<f64>() / n,
            y: group.iter().map(|c| c.center.y).sum::<f64>() / n,
        };
        // group is never empty here
        let color = Color::average(group.iter().map(|c| c.color)).unwrap_or(moved.color);

        debug!(
            "merging {} circles into ({:.1}, {:.1}) {}",
            group.len(),
            center.x,
            center.y,
            color
        );

        MergeResult::Merge { removed: group, created: MergedCircle { center, color } }
    }
}
