use serde_json::Value;
use tracing::debug;

use crate::domain::food_recognition::{
    entities::{Detection, sort_by_confidence},
    schema::RawResult,
};

/// Converts raw backend output into detections ordered by descending known
/// confidence, unknown confidence last in input order.
///
/// Output that matches no known shape yields an empty list, never an error.
pub fn normalize(raw: &Value) -> Vec<Detection> {
    classify(raw).map(normalize_shape).unwrap_or_default()
}

/// [`RawResult::classify`], logging output that matches no known shape.
pub fn classify(raw: &Value) -> Option<RawResult> {
    let shape = RawResult::classify(raw);
    if shape.is_none() {
        debug!("Backend output matches no known shape, treating as no detections");
    }
    shape
}

pub fn normalize_shape(shape: RawResult) -> Vec<Detection> {
    let mut detections: Vec<Detection> = match shape {
        RawResult::LabelList(records) => records
            .into_iter()
            .map(|record| {
                Detection::new(record.label, Some(record.score))
                    .with_bounding_box(record.bounding_box)
            })
            .collect(),
        RawResult::ObjectList(envelope) => envelope
            .objects
            .into_iter()
            .map(|object| {
                Detection::new(object.label, object.score).with_bounding_box(object.bounding_box)
            })
            .collect(),
        RawResult::Caption(caption) => caption
            .text()
            .map(|text| Detection::new(text, None))
            .into_iter()
            .collect(),
    };

    sort_by_confidence(&mut detections);
    detections
}

/// Caption text carried by `shape`, when the backend produced a description.
pub fn caption_text(shape: &RawResult) -> Option<String> {
    match shape {
        RawResult::Caption(caption) => caption.text().map(str::to_string),
        _ => None,
    }
}
