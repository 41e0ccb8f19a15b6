const FOOD_SUGGESTION: &str =
    "🍽️ Eat something light and nutritious to keep focus while studying!";
const NO_FOOD_SUGGESTION: &str = "🚫 No recognizable food detected. Maybe your fridge is empty?";

/// One-line overall tip shown next to the per-item recommendations.
pub fn overall_suggestion(has_food: bool) -> &'static str {
    if has_food {
        FOOD_SUGGESTION
    } else {
        NO_FOOD_SUGGESTION
    }
}

/// Title-cases a lowercase keyword for display: "ice cream" -> "Ice Cream".
pub fn display_case(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
