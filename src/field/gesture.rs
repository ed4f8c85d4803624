// Pointer gesture tracking for a single circle.
//
// A gesture only becomes a drag once the pointer has moved more than the
// jitter tolerance on some axis relative to the last accepted position.
// Smaller movements are swallowed, so a press-and-release with a shaky hand
// stays a click and never reaches the merge engine. Release also checks the
// net displacement from the press point: going out and coming back is a click.
//
// The gesture holds the circle's id, not the circle, so removing circles
// while a drag is in flight never leaves it pointing at stale data.

use super::{CircleId, Point};

/// What a pointer move did to the gesture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DragStep {
    /// Movement within the jitter tolerance; nothing changes.
    Ignored,
    /// Move the circle by this delta.
    Moved { dx: f64, dy: f64 },
}

#[derive(Debug, Clone)]
pub struct DragGesture {
    target: CircleId,
    /// Circle center at press time, restored when the gesture ends as a click.
    home: Point,
    /// Pointer at press time.
    origin: Point,
    /// Last accepted pointer position.
    anchor: Point,
    /// Last pointer position seen, accepted or not.
    latest: Point,
    tolerance: f64,
    moved: bool,
}

impl DragGesture {
    pub fn start(target: CircleId, home: Point, pointer: Point, tolerance: f64) -> Self {
        Self { target, home, origin: pointer, anchor: pointer, latest: pointer, tolerance, moved: false }
    }

    pub fn target(&self) -> CircleId {
        self.target
    }

    pub fn home(&self) -> Point {
        self.home
    }

    /// Whether any movement beyond the tolerance has been accepted.
    pub fn was_moved(&self) -> bool {
        self.moved
    }

    /// A completed drag: some step was accepted and the pointer ends up more
    /// than the tolerance away from where it was pressed.
    pub fn is_drag(&self) -> bool {
        let dx = self.latest.x - self.origin.x;
        let dy = self.latest.y - self.origin.y;
        self.moved && (dx.abs() > self.tolerance || dy.abs() > self.tolerance)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> DragStep {
        self.latest = pointer;
        let dx = pointer.x - self.anchor.x;
        let dy = pointer.y - self.anchor.y;
        if dx.abs() <= self.tolerance && dy.abs() <= self.tolerance {
            return DragStep::Ignored;
        }
        self.anchor = pointer;
        self.moved = true;
        DragStep::Moved { dx, dy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_is_ignored() {
        let mut g = DragGesture::start(CircleId(0), Point::new(10.0, 10.0), Point::new(10.0, 10.0), 3.0);
        assert_eq!(g.pointer_move(Point::new(13.0, 7.0)), DragStep::Ignored);
        assert_eq!(g.pointer_move(Point::new(12.0, 12.0)), DragStep::Ignored);
        assert!(!g.was_moved());
    }

    #[test]
    fn test_move_past_tolerance_advances_anchor() {
        let mut g = DragGesture::start(CircleId(0), Point::new(10.0, 10.0), Point::new(10.0, 10.0), 3.0);
        assert_eq!(g.pointer_move(Point::new(14.0, 10.0)), DragStep::Moved { dx: 4.0, dy: 0.0 });
        assert!(g.was_moved());

        // Measured from the new anchor now.
        assert_eq!(g.pointer_move(Point::new(16.0, 11.0)), DragStep::Ignored);
        assert_eq!(g.pointer_move(Point::new(18.0, 6.0)), DragStep::Moved { dx: 4.0, dy: -4.0 });
    }

    #[test]
    fn test_out_and_back_is_not_a_drag() {
        let mut g = DragGesture::start(CircleId(0), Point::new(100.0, 100.0), Point::new(100.0, 100.0), 3.0);
        assert_eq!(g.pointer_move(Point::new(104.0, 100.0)), DragStep::Moved { dx: 4.0, dy: 0.0 });
        assert_eq!(g.pointer_move(Point::new(100.0, 100.0)), DragStep::Moved { dx: -4.0, dy: 0.0 });
        assert!(g.was_moved());
        assert!(!g.is_drag());

        assert_eq!(g.pointer_move(Point::new(104.0, 101.0)), DragStep::Moved { dx: 4.0, dy: 1.0 });
        assert!(g.is_drag());
    }

    #[test]
    fn test_slow_creep_accumulates() {
        let mut g = DragGesture::start(CircleId(0), Point::new(0.0, 0.0), Point::new(0.0, 0.0), 3.0);
        assert_eq!(g.pointer_move(Point::new(2.0, 0.0)), DragStep::Ignored);
        assert_eq!(g.pointer_move(Point::new(3.5, 0.0)), DragStep::Moved { dx: 3.5, dy: 0.0 });
    }
}
