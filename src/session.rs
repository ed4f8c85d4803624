//! Interactive session over a single field.
//!
//! The session is the only owner of mutable state: the field, the placement
//! generator (and its RNG), the merge engine and the in-flight drag gesture.
//! Presentation code feeds it pointer and click events in order and renders
//! whatever it reports back.

use log::{debug, info, warn};
use rand::Rng;

use crate::field::{
    Circle, CircleId, Color, DragGesture, DragStep, Field, FieldConfig, MergeEngine, MergeResult,
    PlacementError, PlacementGenerator, PlacementRequest, Point,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Added(Circle),
    Removed(Circle),
    /// Click targeted a circle that is no longer live.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// No gesture in flight.
    Idle,
    /// Released without moving past the jitter tolerance.
    Click(CircleId),
    /// The dragged circle was removed before release.
    Lost(CircleId),
    /// Dragged and released with nothing to merge with.
    Dropped(Circle),
    /// Dragged onto other circles; `removed` lists the consumed ids, moved first.
    Merged { removed: Vec<CircleId>, created: Circle },
}

pub struct Session<R> {
    field: Field,
    placement: PlacementGenerator<R>,
    merge: MergeEngine,
    drag: Option<DragGesture>,
}

impl<R: Rng> Session<R> {
    /// Empty session.
    pub fn new(config: FieldConfig, rng: R) -> Self {
        let placement = PlacementGenerator::new(rng, config.max_placement_attempts);
        let merge = MergeEngine::new(config.merge_threshold);
        Self { field: Field::new(config), placement, merge, drag: None }
    }

    /// Session pre-populated with `config.seed_count` randomly placed circles.
    pub fn seeded(config: FieldConfig, rng: R) -> Result<Self, PlacementError> {
        let mut session = Self::new(config, rng);
        session.seed()?;
        Ok(session)
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Place circles until the field holds `seed_count` of them.
    pub fn seed(&mut self) -> Result<Vec<Circle>, PlacementError> {
        let mut placed = Vec::new();
        while self.field.len() < self.field.config().seed_count {
            placed.push(self.add_random()?);
        }
        info!("seeded field with {} circles", placed.len());
        Ok(placed)
    }

    /// Add one circle at a random free spot with a random color.
    pub fn add_random(&mut self) -> Result<Circle, PlacementError> {
        self.add(PlacementRequest::Random)
    }

    fn add(&mut self, request: PlacementRequest) -> Result<Circle, PlacementError> {
        let cfg = self.field.config();
        let (bounds, margin, separation) = (self.field.bounds(), cfg.margin, cfg.min_separation);
        let center = self.placement.place(request, self.field.circles(), bounds, margin, separation)?;
        let color = Color::random(self.placement.rng());
        Ok(self.field.insert(center, color))
    }

    /// Empty-space clicks (`target == None`) add a circle at `point`;
    /// clicks on a circle remove it. Hit-testing is the caller's job.
    pub fn click(&mut self, point: Point, target: Option<CircleId>) -> ClickOutcome {
        match target {
            None => {
                match self.add(PlacementRequest::At(point)) {
                    Ok(c) => {
                        debug!("added circle {:?} at ({:.1}, {:.1})", c.id, c.center.x, c.center.y);
                        ClickOutcome::Added(c)
                    }
                    Err(e) => {
                        warn!("click placement failed: {}", e);
                        ClickOutcome::Ignored
                    }
                }
            }
            Some(id) => match self.field.remove(id) {
                Some(c) => {
                    debug!("removed circle {:?}", id);
                    ClickOutcome::Removed(c)
                }
                None => ClickOutcome::Ignored,
            },
        }
    }

    /// Start dragging `id`. Returns false (and starts nothing) for an unknown circle.
    pub fn pointer_down(&mut self, id: CircleId, pointer: Point) -> bool {
        let Some(home) = self.field.get(id).map(|c| c.center) else {
            self.drag = None;
            return false;
        };
        let tolerance = self.field.config().jitter_tolerance;
        self.drag = Some(DragGesture::start(id, home, pointer, tolerance));
        true
    }

    /// Returns the dragged circle's new position when it moved.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Circle> {
        let gesture = self.drag.as_mut()?;
        let target = gesture.target();
        if !self.field.contains(target) {
            return None;
        }
        match gesture.pointer_move(pointer) {
            DragStep::Ignored => None,
            DragStep::Moved { dx, dy } => {
                self.field.move_by(target, dx, dy)?;
                self.field.get(target).copied()
            }
        }
    }

    /// Finish the gesture and, for a real drag, run the merge engine.
    /// A release within the jitter tolerance of the press point puts the
    /// circle back where it started.
    pub fn pointer_up(&mut self) -> DragOutcome {
        let Some(gesture) = self.drag.take() else {
            return DragOutcome::Idle;
        };
        let id = gesture.target();
        let Some(moved) = self.field.get(id).copied() else {
            return DragOutcome::Lost(id);
        };
        if !gesture.is_drag() {
            if gesture.was_moved() {
                self.field.set_center(id, gesture.home());
            }
            return DragOutcome::Click(id);
        }

        let result = self.merge.on_drag_finish(&moved, self.field.others(id));
        match &result {
            MergeResult::NoOp => DragOutcome::Dropped(moved),
            MergeResult::Merge { removed, .. } => {
                let removed: Vec<CircleId> = removed.iter().map(|c| c.id).collect();
                match self.field.apply_merge(&result) {
                    Some(created) => {
                        info!("merged {} circles into {:?}", removed.len(), created.id);
                        DragOutcome::Merged { removed, created }
                    }
                    None => DragOutcome::Dropped(moved),
                }
            }
        }
    }
}
