use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One normalized (label, confidence) observation taken from backend output.
///
/// `confidence` is `None` when the backend did not report a score. That is
/// kept apart from `Some(0.0)` so the confidence gate can tell "no score"
/// from "scored zero".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Detection {
    pub label: String,
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            label: label.into(),
            confidence,
            bounding_box: None,
        }
    }

    pub fn with_bounding_box(mut self, bounding_box: Option<BoundingBox>) -> Self {
        self.bounding_box = bounding_box;
        self
    }
}

/// Ordering used for detections and recommendations alike: known confidence
/// first, highest first; unknown confidence after every known one.
///
/// Returns `Equal` for two unknowns so a stable sort keeps their input order.
pub fn compare_confidence(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort by [`compare_confidence`].
pub fn sort_by_confidence(detections: &mut [Detection]) {
    detections.sort_by(|a, b| compare_confidence(a.confidence, b.confidence));
}
