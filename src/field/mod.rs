// Field model for draggable color circles.
//
// A Field owns every live circle plus the coordinate bounds they occupy.
// Nothing else holds circles: the placement generator and the merge engine
// only ever see borrowed slices/iterators, and the session applies their
// results back onto the field.
//
// Submodules:
// - color: 8-bit RGB with truncating average
// - placement: randomized non-overlapping placement with bounded retries
// - merge: drag-finish intersection test and averaging
// - gesture: click-vs-drag tracking with jitter tolerance
//
// Coordinates are field-local floats; circles are identified by CircleId,
// which is never reused within one field.

use serde::{Deserialize, Serialize};

pub mod color;
pub mod gesture;
pub mod merge;
pub mod placement;

pub use color::Color;
pub use gesture::{DragGesture, DragStep};
pub use merge::{MergeEngine, MergeResult, MergedCircle};
pub use placement::{PlacementError, PlacementGenerator, PlacementRequest};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Shrink by `margin` on every edge. Returns None when nothing is left.
    pub fn inset(&self, margin: f64) -> Option<Rect> {
        let w = self.w - 2.0 * margin;
        let h = self.h - 2.0 * margin;
        if w < 0.0 || h < 0.0 {
            return None;
        }
        Some(Rect { x: self.x + margin, y: self.y + margin, w, h })
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CircleId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub id: CircleId,
    pub center: Point,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Field extent in pixels.
    pub width: f64,
    pub height: f64,
    /// Circle radius; dragging keeps the whole circle inside the field.
    pub circle_radius: f64,
    /// Random placement keeps this far from every edge.
    pub margin: f64,
    /// Random placement keeps centers strictly farther apart than this.
    pub min_separation: f64,
    /// Centers strictly closer than this merge on drag finish.
    pub merge_threshold: f64,
    /// Pointer movement up to this many pixels per axis is not a drag.
    pub jitter_tolerance: f64,
    /// Circles placed before any interaction.
    pub seed_count: usize,
    /// Candidates sampled before random placement gives up.
    pub max_placement_attempts: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            circle_radius: 50.0,
            margin: 50.0,
            min_separation: 100.0,
            merge_threshold: 25.0,
            jitter_tolerance: 3.0,
            seed_count: 10,
            max_placement_attempts: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    config: FieldConfig,
    circles: Vec<Circle>,
    next_id: u32,
}

impl Field {
    pub fn new(config: FieldConfig) -> Self {
        Self { config, circles: Vec::new(), next_id: 0 }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Rect {
        Rect { x: 0.0, y: 0.0, w: self.config.width, h: self.config.height }
    }

    /// Live circles in insertion order.
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    pub fn get(&self, id: CircleId) -> Option<&Circle> {
        self.circles.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: CircleId) -> bool {
        self.get(id).is_some()
    }

    /// Every live circle except `id`, in insertion order.
    pub fn others(&self, id: CircleId) -> impl Iterator<Item = &Circle> {
        self.circles.iter().filter(move |c| c.id != id)
    }

    pub fn insert(&mut self, center: Point, color: Color) -> Circle {
        let circle = Circle { id: CircleId(self.next_id), center, color };
        self.next_id += 1;
        self.circles.push(circle);
        circle
    }

    pub fn remove(&mut self, id: CircleId) -> Option<Circle> {
        let idx = self.circles.iter().position(|c| c.id == id)?;
        Some(self.circles.remove(idx))
    }

    /// Translate a circle, clamping its center so the circle stays inside the field.
    /// Returns the new center, or None if the circle is not live.
    pub fn move_by(&mut self, id: CircleId, dx: f64, dy: f64) -> Option<Point> {
        let r = self.config.circle_radius;
        let (w, h) = (self.config.width, self.config.height);
        let circle = self.circles.iter_mut().find(|c| c.id == id)?;
        circle.center = Point {
            x: clamp_axis(circle.center.x + dx, r, w - r),
            y: clamp_axis(circle.center.y + dy, r, h - r),
        };
        Some(circle.center)
    }

    /// Put a circle at `center` as is, without clamping.
    pub fn set_center(&mut self, id: CircleId, center: Point) -> Option<Point> {
        let circle = self.circles.iter_mut().find(|c| c.id == id)?;
        circle.center = center;
        Some(center)
    }

    /// Remove the merged group and insert the averaged circle.
    /// `NoOp` leaves the field untouched and returns None.
    pub fn apply_merge(&mut self, result: &MergeResult) -> Option<Circle> {
        let MergeResult::Merge { removed, created } = result else {
            return None;
        };
        for c in removed {
            self.remove(c.id);
        }
        Some(self.insert(created.center, created.color))
    }
}

// Like f64::clamp, but a field narrower than a circle pins to `lo` instead of panicking.
fn clamp_axis(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::new(255, 0, 0)
    }

    #[test]
    fn test_insert_assigns_fresh_ids() {
        let mut field = Field::new(FieldConfig::default());
        let a = field.insert(Point::new(100.0, 100.0), red());
        let b = field.insert(Point::new(200.0, 200.0), red());
        assert_ne!(a.id, b.id);

        field.remove(b.id);
        let c = field.insert(Point::new(300.0, 300.0), red());
        assert_ne!(c.id, b.id);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut field = Field::new(FieldConfig::default());
        field.insert(Point::new(100.0, 100.0), red());
        assert!(field.remove(CircleId(42)).is_none());
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_others_excludes_self_and_keeps_order() {
        let mut field = Field::new(FieldConfig::default());
        let a = field.insert(Point::new(100.0, 100.0), red());
        let b = field.insert(Point::new(200.0, 100.0), red());
        let c = field.insert(Point::new(300.0, 100.0), red());

        let ids: Vec<CircleId> = field.others(b.id).map(|o| o.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn test_move_by_clamps_to_field() {
        let mut field = Field::new(FieldConfig::default());
        let a = field.insert(Point::new(100.0, 500.0), red());

        let p = field.move_by(a.id, -500.0, 500.0).unwrap();
        assert_eq!(p, Point::new(50.0, 550.0));

        let p = field.move_by(a.id, 20.0, -30.0).unwrap();
        assert_eq!(p, Point::new(70.0, 520.0));

        assert!(field.move_by(CircleId(99), 1.0, 1.0).is_none());
    }

    #[test]
    fn test_set_center_does_not_clamp() {
        let mut field = Field::new(FieldConfig::default());
        let a = field.insert(Point::new(100.0, 100.0), red());
        assert_eq!(field.set_center(a.id, Point::new(10.0, 590.0)), Some(Point::new(10.0, 590.0)));
        assert_eq!(field.get(a.id).unwrap().center, Point::new(10.0, 590.0));
        assert!(field.set_center(CircleId(9), Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_rect_inset_and_contains() {
        let r = Rect { x: 0.0, y: 0.0, w: 600.0, h: 600.0 };
        let inner = r.inset(50.0).unwrap();
        assert_eq!(inner, Rect { x: 50.0, y: 50.0, w: 500.0, h: 500.0 });
        assert!(inner.contains(&Point::new(50.0, 550.0)));
        assert!(!inner.contains(&Point::new(49.9, 300.0)));
        assert!(r.inset(301.0).is_none());
    }

    #[test]
    fn test_config_accepts_partial_json() {
        let cfg: FieldConfig = serde_json::from_str(r#"{"mergeThreshold": 40, "seedCount": 3}"#).unwrap();
        assert_eq!(cfg.merge_threshold, 40.0);
        assert_eq!(cfg.seed_count, 3);
        assert_eq!(cfg.width, 600.0);
    }
}
