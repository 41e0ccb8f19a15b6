use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError, food_recognition::matching::label_matches,
};

/// Keyword -> dietary advice pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct KnowledgeEntry {
    /// Lowercase canonical food term.
    pub keyword: String,
    pub advice: String,
}

impl KnowledgeEntry {
    pub fn new(keyword: impl AsRef<str>, advice: impl Into<String>) -> Self {
        Self {
            keyword: keyword.as_ref().trim().to_lowercase(),
            advice: advice.into(),
        }
    }
}

/// Read-only advice table, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Builds a table from entries, canonicalising keywords.
    /// Empty keywords, empty advice and duplicate keywords are rejected.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        let mut canonical = Vec::with_capacity(entries.len());

        for entry in entries {
            let entry = KnowledgeEntry::new(&entry.keyword, entry.advice);

            if entry.keyword.is_empty() {
                return Err(CoreError::InvalidKnowledgeBase(
                    "keyword cannot be empty".to_string(),
                ));
            }
            if entry.advice.trim().is_empty() {
                return Err(CoreError::InvalidKnowledgeBase(format!(
                    "advice for '{}' cannot be empty",
                    entry.keyword
                )));
            }
            if !seen.insert(entry.keyword.clone()) {
                return Err(CoreError::InvalidKnowledgeBase(format!(
                    "duplicate keyword '{}'",
                    entry.keyword
                )));
            }

            canonical.push(entry);
        }

        Ok(Self { entries: canonical })
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose keyword occurs in `label`, in table order.
    pub fn matching<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a KnowledgeEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| label_matches(label, &entry.keyword))
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        let entries = DEFAULT_ADVICE
            .iter()
            .map(|(keyword, advice)| KnowledgeEntry::new(keyword, *advice))
            .collect();

        Self { entries }
    }
}

/// Keywords that only decide whether food is present at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodVocabulary {
    keywords: Vec<String>,
}

impl FoodVocabulary {
    /// Lowercases and trims keywords, dropping empties and duplicates.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .filter(|keyword| seen.insert(keyword.clone()))
            .collect();

        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn mentions_food(&self, label: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| label_matches(label, keyword))
    }
}

impl Default for FoodVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_VOCABULARY)
    }
}

/// On-disk override for the built-in tables.
///
/// ```json
/// {
///   "vocabulary": ["food", "fruit"],
///   "entries": [{ "keyword": "banana", "advice": "..." }]
/// }
/// ```
///
/// `vocabulary` is optional; the built-in vocabulary is kept when it is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeFile {
    #[serde(default)]
    pub vocabulary: Option<Vec<String>>,
    pub entries: Vec<KnowledgeEntry>,
}

impl KnowledgeFile {
    pub fn parse(content: &str) -> Result<Self, CoreError> {
        serde_json::from_str(content)
            .map_err(|e| CoreError::InvalidKnowledgeBase(format!("malformed JSON: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let file = Self::parse(&content)?;
        info!(
            path = %path.display(),
            entries = file.entries.len(),
            "Loaded knowledge base file"
        );
        Ok(file)
    }

    pub fn into_tables(self) -> Result<(KnowledgeBase, FoodVocabulary), CoreError> {
        let knowledge_base = KnowledgeBase::new(self.entries)?;
        let vocabulary = match self.vocabulary {
            Some(keywords) => FoodVocabulary::new(keywords),
            None => FoodVocabulary::default(),
        };
        Ok((knowledge_base, vocabulary))
    }
}

const DEFAULT_VOCABULARY: &[&str] = &[
    "food", "fruit", "vegetable", "meat", "bottle", "egg", "bread", "milk", "cheese", "plate",
    "dish", "apple", "banana", "orange", "grape", "berry", "lemon", "peach", "melon", "avocado",
    "tomato", "carrot", "broccoli", "lettuce", "salad", "cucumber", "pepper", "onion", "potato",
    "bean", "rice", "pasta", "noodle", "cereal", "oatmeal", "pizza", "burger", "sandwich",
    "hot dog", "soup", "sushi", "cake", "cookie", "donut", "chocolate", "candy", "yogurt",
    "butter", "juice", "soda", "coffee", "tea", "chicken", "beef", "pork", "sausage", "fish",
    "salmon", "tuna", "shrimp", "nuts", "walnut", "almond", "ice cream", "water",
];

const DEFAULT_ADVICE: &[(&str, &str)] = &[
    ("apple", "Apples give steady energy from fiber-bound sugar. A good snack between study sessions."),
    ("banana", "Bananas are rich in potassium and quick carbs. Eat one before an exam for a gentle energy lift."),
    ("orange", "Oranges are packed with vitamin C and water, helping you stay fresh during long reading blocks."),
    ("berry", "Berries contain antioxidants linked to better memory. Add a handful to breakfast."),
    ("grape", "Grapes are a light, hydrating snack. Keep portions small to avoid a sugar crash."),
    ("avocado", "Avocado's healthy fats keep you full for hours, so you can focus without snacking."),
    ("tomato", "Tomatoes are low in calories and high in vitamins. Great in a light study lunch."),
    ("carrot", "Carrot sticks are crunchy, filling and easy to eat at your desk."),
    ("broccoli", "Broccoli brings vitamin K and folate. Pair it with protein for a balanced dinner."),
    ("salad", "A leafy salad is light and won't make you sleepy. Add protein to keep it filling."),
    ("egg", "Eggs provide protein and choline, which supports memory. A boiled egg is an easy study snack."),
    ("milk", "Milk offers protein and calcium. A warm glass in the evening can help you wind down after studying."),
    ("yogurt", "Yogurt with fruit is a protein-rich snack that won't weigh you down."),
    ("cheese", "Cheese is protein-dense but heavy. A small portion with fruit keeps energy stable."),
    ("bread", "Prefer whole-grain bread. It releases energy slowly and helps you stay focused longer."),
    ("rice", "Rice is a solid energy base. Combine it with vegetables and protein to avoid an afternoon slump."),
    ("pasta", "Pasta is filling. Keep the portion moderate before studying to avoid drowsiness."),
    ("oatmeal", "Oats release energy slowly. A bowl of oatmeal is an ideal breakfast before a long study day."),
    ("walnut", "Walnuts provide omega-3 fats and magnesium. A small handful makes a smart study snack."),
    ("almond", "Almonds are rich in vitamin E. Keep a few at your desk instead of sweets."),
    ("fish", "Fish is a great source of omega-3 fatty acids that support brain health."),
    ("chicken", "Chicken is lean protein that keeps you full without feeling heavy."),
    ("chocolate", "Dark chocolate in small amounts can boost alertness. Go easy on milk chocolate."),
    ("coffee", "Coffee sharpens focus, but avoid it late in the day so it doesn't disrupt your sleep."),
    ("green tea", "Green tea offers a gentler caffeine boost with L-theanine for calm focus."),
    ("juice", "Juice is high in sugar. Whole fruit or water is a better choice while studying."),
    ("soda", "Sugary soda causes energy crashes. Swap it for water or sparkling water."),
    ("pizza", "Pizza is heavy and greasy. Save it for after your study session."),
    ("burger", "Burgers are filling but heavy. Choose a lighter meal before studying."),
    ("ice cream", "Ice cream is a treat. Enjoy it as a reward after finishing your tasks."),
    ("water", "Staying hydrated improves concentration. Keep a bottle of water nearby."),
];
