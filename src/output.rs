//! Output types for the browser frontend.
//!
//! These structs are serialized to JSON and handed to the presentation layer,
//! which owns the DOM elements and applies the changes.

use serde::Serialize;

use crate::field::{Circle, Field};
use crate::session::{ClickOutcome, DragOutcome};

/// A circle ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleOutput {
    pub id: u32,
    /// Center in field-local pixels
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// CSS color, `#rrggbb`
    pub color: String,
}

impl CircleOutput {
    pub fn new(circle: &Circle, radius: f64) -> Self {
        Self {
            id: circle.id.0,
            x: circle.center.x,
            y: circle.center.y,
            radius,
            color: circle.color.to_hex(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// Full field contents, used for the initial render
#[derive(Debug, Clone, Serialize)]
pub struct FieldOutput {
    pub width: f64,
    pub height: f64,
    pub circles: Vec<CircleOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl FieldOutput {
    pub fn from_field(field: &Field) -> Self {
        let cfg = field.config();
        Self {
            width: cfg.width,
            height: cfg.height,
            circles: field.circles().iter().map(|c| CircleOutput::new(c, cfg.circle_radius)).collect(),
            error: None,
        }
    }
}

/// Incremental change after a single interaction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<CircleOutput>,
    /// Circle whose position changed in place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved: Option<CircleOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl ChangeOutput {
    pub fn from_click(outcome: &ClickOutcome, radius: f64) -> Self {
        match outcome {
            ClickOutcome::Added(c) => Self { added: vec![CircleOutput::new(c, radius)], ..Self::default() },
            ClickOutcome::Removed(c) => Self { removed: vec![c.id.0], ..Self::default() },
            ClickOutcome::Ignored => Self::default(),
        }
    }

    pub fn from_drag(outcome: &DragOutcome, radius: f64) -> Self {
        match outcome {
            DragOutcome::Idle | DragOutcome::Click(_) | DragOutcome::Lost(_) => Self::default(),
            DragOutcome::Dropped(c) => Self { moved: Some(CircleOutput::new(c, radius)), ..Self::default() },
            DragOutcome::Merged { removed, created } => Self {
                removed: removed.iter().map(|id| id.0).collect(),
                added: vec![CircleOutput::new(created, radius)],
                ..Self::default()
            },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { error: Some(ErrorInfo { message: message.into() }), ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{CircleId, Color, FieldConfig, Point};

    #[test]
    fn test_circle_output_json() {
        let mut field = Field::new(FieldConfig::default());
        let c = field.insert(Point::new(120.5, 80.0), Color::new(255, 8, 0));
        let json = serde_json::to_string(&CircleOutput::new(&c, 50.0)).unwrap();
        assert_eq!(json, r##"{"id":0,"x":120.5,"y":80.0,"radius":50.0,"color":"#ff0800"}"##);
    }

    #[test]
    fn test_empty_change_serializes_empty() {
        let json = serde_json::to_string(&ChangeOutput::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_merge_change_lists_removed_and_added() {
        let mut field = Field::new(FieldConfig::default());
        let created = field.insert(Point::new(10.0, 10.0), Color::new(1, 2, 3));
        let outcome = DragOutcome::Merged { removed: vec![CircleId(4), CircleId(2)], created };

        let change = ChangeOutput::from_drag(&outcome, 50.0);
        assert_eq!(change.removed, vec![4, 2]);
        assert_eq!(change.added.len(), 1);
        assert!(change.moved.is_none());
    }

    #[test]
    fn test_field_output_keeps_order() {
        let mut field = Field::new(FieldConfig::default());
        field.insert(Point::new(100.0, 100.0), Color::new(0, 0, 0));
        field.insert(Point::new(200.0, 200.0), Color::new(0, 0, 0));
        let out = FieldOutput::from_field(&field);
        let ids: Vec<u32> = out.circles.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(out.width, 600.0);
    }
}
