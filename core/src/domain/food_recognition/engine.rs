use std::{cmp::Ordering, collections::HashMap};

use serde_json::Value;
use tracing::debug;

use crate::domain::food_recognition::{
    entities::{AnalysisResult, Detection, Recommendation, compare_confidence},
    helpers::display_case,
    knowledge_base::{FoodVocabulary, KnowledgeBase},
    normalizer::{caption_text, classify, normalize_shape},
    value_objects::{RecognitionContext, RecommendationPolicy},
};

/// Turns detections into a food verdict and ranked, deduplicated advice.
///
/// The food verdict looks at every detection. Advice only considers the
/// detections `policy` admits, so weak evidence can still say "food is
/// here" without committing to a specific recommendation.
pub fn recommend(
    detections: Vec<Detection>,
    knowledge_base: &KnowledgeBase,
    vocabulary: &FoodVocabulary,
    policy: RecommendationPolicy,
) -> AnalysisResult {
    if detections.is_empty() {
        return AnalysisResult::empty();
    }

    let has_food = detections
        .iter()
        .any(|detection| vocabulary.mentions_food(&detection.label));

    let mut recommendations: Vec<Recommendation> = Vec::new();
    let mut by_keyword: HashMap<&str, usize> = HashMap::new();

    for detection in detections
        .iter()
        .filter(|detection| policy.admits(detection.confidence))
    {
        for entry in knowledge_base.matching(&detection.label) {
            match by_keyword.get(entry.keyword.as_str()) {
                Some(&index) => {
                    let kept = &mut recommendations[index];
                    // ties keep the first occurrence
                    if compare_confidence(detection.confidence, kept.confidence) == Ordering::Less
                    {
                        kept.confidence = detection.confidence;
                    }
                }
                None => {
                    by_keyword.insert(entry.keyword.as_str(), recommendations.len());
                    recommendations.push(Recommendation {
                        food: display_case(&entry.keyword),
                        keyword: entry.keyword.clone(),
                        advice: entry.advice.clone(),
                        confidence: detection.confidence,
                    });
                }
            }
        }
    }

    recommendations.sort_by(|a, b| compare_confidence(a.confidence, b.confidence));

    debug!(
        detections = detections.len(),
        recommendations = recommendations.len(),
        has_food,
        "Matched detections against knowledge base"
    );

    AnalysisResult::new(has_food, detections, recommendations)
}

/// Full pipeline over raw backend output: normalize, then recommend.
pub fn analyze(
    raw: &Value,
    context: &RecognitionContext,
    policy: RecommendationPolicy,
) -> AnalysisResult {
    let shape = classify(raw);
    let description = shape.as_ref().and_then(caption_text);
    let detections = shape.map(normalize_shape).unwrap_or_default();

    recommend(
        detections,
        &context.knowledge_base,
        &context.vocabulary,
        policy,
    )
    .with_description(description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food_recognition::{
        helpers::overall_suggestion, knowledge_base::KnowledgeEntry,
    };
    use serde_json::json;

    fn knowledge_base(keywords: &[&str]) -> KnowledgeBase {
        KnowledgeBase::new(
            keywords
                .iter()
                .map(|keyword| KnowledgeEntry::new(keyword, format!("advice for {keyword}")))
                .collect(),
        )
        .unwrap()
    }

    fn foods(result: &AnalysisResult) -> Vec<(&str, Option<f64>)> {
        result
            .recommendations
            .iter()
            .map(|r| (r.keyword.as_str(), r.confidence))
            .collect()
    }

    #[test]
    fn test_empty_detections_is_terminal() {
        let result = recommend(
            Vec::new(),
            &KnowledgeBase::default(),
            &FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );

        assert!(!result.has_food);
        assert!(result.recommendations.is_empty());
        assert!(result.detections.is_empty());
        assert_eq!(result, AnalysisResult::empty());
    }

    #[test]
    fn test_deduplicates_keeping_highest_confidence() {
        let detections = vec![
            Detection::new("banana", Some(0.9)),
            Detection::new("banana", Some(0.6)),
        ];

        let result = recommend(
            detections,
            &knowledge_base(&["banana"]),
            &FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );

        assert_eq!(foods(&result), [("banana", Some(0.9))]);
        assert_eq!(result.detections.len(), 2);
    }

    #[test]
    fn test_deduplication_upgrades_when_input_unsorted() {
        let detections = vec![
            Detection::new("banana", None),
            Detection::new("ripe banana", Some(0.4)),
            Detection::new("banana split", Some(0.7)),
        ];

        let result = recommend(
            detections,
            &knowledge_base(&["banana"]),
            &FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );

        assert_eq!(foods(&result), [("banana", Some(0.7))]);
    }

    #[test]
    fn test_confidence_gate_keeps_food_verdict() {
        let detections = vec![Detection::new("egg", Some(0.2))];

        let result = recommend(
            detections,
            &knowledge_base(&["egg"]),
            &FoodVocabulary::new(["egg"]),
            RecommendationPolicy::new(0.5, false),
        );

        assert!(result.has_food);
        assert!(result.recommendations.is_empty());
        assert_eq!(result.detections.len(), 1);
    }

    #[test]
    fn test_substring_matching_hits_every_keyword() {
        let detections = vec![Detection::new("cheeseburger", Some(0.8))];

        let with_cheese = recommend(
            detections.clone(),
            &knowledge_base(&["cheese"]),
            &FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );
        assert_eq!(foods(&with_cheese), [("cheese", Some(0.8))]);

        let with_burger = recommend(
            detections,
            &knowledge_base(&["burger"]),
            &FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );
        assert_eq!(foods(&with_burger), [("burger", Some(0.8))]);
    }

    #[test]
    fn test_one_detection_matches_several_keywords() {
        let result = recommend(
            vec![Detection::new("Banana Bread", Some(0.75))],
            &knowledge_base(&["banana", "bread"]),
            &FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );

        assert_eq!(
            foods(&result),
            [("banana", Some(0.75)), ("bread", Some(0.75))]
        );
        assert_eq!(result.recommendations[0].food, "Banana");
    }

    #[test]
    fn test_ranking_unknown_last() {
        let detections = vec![
            Detection::new("a glass of milk", None),
            Detection::new("apple", Some(0.3)),
            Detection::new("egg", Some(0.8)),
        ];

        let result = recommend(
            detections,
            &knowledge_base(&["milk", "apple", "egg"]),
            &FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );

        assert_eq!(
            foods(&result),
            [("egg", Some(0.8)), ("apple", Some(0.3)), ("milk", None)]
        );
    }

    #[test]
    fn test_no_match_does_not_affect_food_verdict() {
        let result = recommend(
            vec![Detection::new("fruit bowl", Some(0.9))],
            &knowledge_base(&["banana"]),
            &FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );

        assert!(result.has_food);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_non_food_detection() {
        let result = recommend(
            vec![Detection::new("laptop", Some(0.95))],
            &KnowledgeBase::default(),
            &FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );

        assert!(!result.has_food);
        assert!(result.recommendations.is_empty());
        assert!(result.suggestion.contains("fridge is empty"));
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let detections = vec![
            Detection::new("banana", Some(0.9)),
            Detection::new("cheeseburger", None),
            Detection::new("banana", Some(0.6)),
        ];
        let kb = KnowledgeBase::default();
        let vocabulary = FoodVocabulary::default();
        let policy = RecommendationPolicy::new(0.5, false);

        let first = recommend(detections.clone(), &kb, &vocabulary, policy);
        let second = recommend(detections, &kb, &vocabulary, policy);

        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_caption_scenario() {
        let context = RecognitionContext::new(
            knowledge_base(&["tomato"]),
            FoodVocabulary::default(),
            RecommendationPolicy::default(),
        );
        let raw = json!({"generated_text": "a bowl of salad with tomatoes"});

        let result = analyze(&raw, &context, context.policy);

        assert_eq!(
            result.detections,
            vec![Detection::new("a bowl of salad with tomatoes", None)]
        );
        assert_eq!(foods(&result), [("tomato", None)]);
        assert!(result.has_food);
        assert_eq!(
            result.description.as_deref(),
            Some("a bowl of salad with tomatoes")
        );
    }

    #[test]
    fn test_analyze_caption_gated_when_unknowns_are_gated() {
        let context = RecognitionContext::new(
            knowledge_base(&["tomato"]),
            FoodVocabulary::default(),
            RecommendationPolicy::new(0.4, true),
        );
        let raw = json!({"generated_text": "a bowl of salad with tomatoes"});

        let result = analyze(&raw, &context, context.policy);

        assert!(result.has_food);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_analyze_unrecognized_shape() {
        let context = RecognitionContext::default();

        let result = analyze(&json!({"unexpected": true}), &context, context.policy);

        assert_eq!(result, AnalysisResult::empty());
    }

    #[test]
    fn test_analyze_label_list_with_default_tables() {
        let context = RecognitionContext::new(
            KnowledgeBase::default(),
            FoodVocabulary::default(),
            RecommendationPolicy::new(0.3, false),
        );
        let raw = json!([
            {"label": "banana", "score": 0.88},
            {"label": "orange", "score": 0.31},
            {"label": "pizza", "score": 0.05}
        ]);

        let result = analyze(&raw, &context, context.policy);

        assert!(result.has_food);
        assert_eq!(
            foods(&result),
            [("banana", Some(0.88)), ("orange", Some(0.31))]
        );
        assert_eq!(result.detections.len(), 3);
        assert!(result.description.is_none());
    }

    #[test]
    fn test_advised_food_is_never_reported_as_no_food() {
        let context = RecognitionContext::default();

        for label in ["walnut", "glass of water"] {
            let raw = json!([{"label": label, "score": 0.9}]);

            let result = analyze(&raw, &context, context.policy);

            assert!(result.has_food, "{label}");
            assert_eq!(result.recommendations.len(), 1, "{label}");
            assert_eq!(result.suggestion, overall_suggestion(true));
        }
    }
}
