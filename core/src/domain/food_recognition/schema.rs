//! Response shapes observed from inference backends.
//!
//! The shapes carry no schema tag, so [`RawResult`] is an untagged enum and
//! serde tries the variants in declaration order: label list, object list,
//! caption. The first one that deserializes wins. That order keeps a caption
//! batch like `[{"generated_text": "..."}]` from being read as a label list,
//! since its records have no `label`/`score`.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::food_recognition::entities::BoundingBox;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawResult {
    /// `[{"label": "banana", "score": 0.93}, ...]` (image classification,
    /// hosted object detection).
    LabelList(Vec<LabelScore>),
    /// `{"objects": [{"label": "egg", "score": 0.8, "box": {...}}, ...]}`
    ObjectList(ObjectEnvelope),
    /// `{"generated_text": "a bowl of salad"}` and its variants.
    Caption(CaptionShape),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
    #[serde(default, rename = "box", alias = "bbox")]
    pub bounding_box: Option<BoundingBox>,
}

/// Object list published under `objects`, `detections` or `predictions`.
/// When several of these keys are present their lists are concatenated in
/// that key order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ObjectLists")]
pub struct ObjectEnvelope {
    pub objects: Vec<DetectedObject>,
}

#[derive(Debug, Deserialize)]
struct ObjectLists {
    objects: Option<Vec<DetectedObject>>,
    detections: Option<Vec<DetectedObject>>,
    predictions: Option<Vec<DetectedObject>>,
}

impl TryFrom<ObjectLists> for ObjectEnvelope {
    type Error = String;

    fn try_from(lists: ObjectLists) -> Result<Self, Self::Error> {
        let present: Vec<Vec<DetectedObject>> =
            [lists.objects, lists.detections, lists.predictions]
                .into_iter()
                .flatten()
                .collect();

        if present.is_empty() {
            return Err("no objects, detections or predictions list".to_string());
        }

        Ok(ObjectEnvelope {
            objects: present.into_iter().flatten().collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectedObject {
    #[serde(alias = "name", alias = "class")]
    pub label: String,
    #[serde(default, alias = "confidence")]
    pub score: Option<f64>,
    #[serde(default, rename = "box", alias = "bbox")]
    pub bounding_box: Option<BoundingBox>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CaptionShape {
    Record(CaptionRecord),
    /// Image-to-text endpoints answer with a one-element list.
    Batch(Vec<CaptionRecord>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptionRecord {
    #[serde(alias = "caption", alias = "description")]
    pub generated_text: String,
}

impl RawResult {
    /// Identifies which known shape `raw` has, if any.
    pub fn classify(raw: &Value) -> Option<Self> {
        RawResult::deserialize(raw).ok()
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            RawResult::LabelList(_) => "label_list",
            RawResult::ObjectList(_) => "object_list",
            RawResult::Caption(_) => "caption",
        }
    }
}

impl CaptionShape {
    /// The caption text, trimmed. `None` when there is nothing to read.
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            CaptionShape::Record(record) => record.generated_text.as_str(),
            CaptionShape::Batch(records) => records.first()?.generated_text.as_str(),
            CaptionShape::Text(text) => text.as_str(),
        };

        let text = text.trim();
        if text.is_empty() { None } else { Some(text) }
    }
}
