use na_core::{Category, MAX_CATEGORIES};

/// Order in which the keyword table is consulted. `Other` has no keywords.
pub const FALLBACK_ORDER: [Category; 9] = [
    Category::MedicalScience,
    Category::Ai,
    Category::Space,
    Category::Robotics,
    Category::Biology,
    Category::Environment,
    Category::Physics,
    Category::Engineering,
    Category::Aeronautics,
];

pub fn keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::MedicalScience => &[
            "medicine",
            "medical",
            "health",
            "disease",
            "treatment",
            "doctor",
            "hospital",
            "patient",
            "drug",
            "pharmaceutical",
            "body",
            "cure",
        ],
        Category::Ai => &["ai", "artificial intelligence", "machine learning", "neural", "llm"],
        Category::Space => &["space", "rocket", "mars", "satellite", "astronomy", "planet"],
        Category::Robotics => &["robot", "automation", "autonomous"],
        Category::Biology => &["biology", "genetic", "organism", "species", "evolution"],
        Category::Environment => &["climate", "environment", "pollution", "sustainability"],
        Category::Physics => &["physics", "quantum", "particle", "energy"],
        Category::Engineering => &["engineering", "infrastructure", "construction"],
        Category::Aeronautics => &["aircraft", "aviation", "airplane", "flight"],
        Category::Other => &[],
    }
}

/// Deterministic keyword classification.
///
/// Matches are plain case-insensitive substrings, so "ai" also hits words
/// like "said". At most [`MAX_CATEGORIES`] labels are returned, taken in
/// [`FALLBACK_ORDER`].
pub fn fallback_categories(text: &str) -> Vec<Category> {
    let text = text.to_lowercase();
    let mut categories = Vec::with_capacity(MAX_CATEGORIES);

    for category in FALLBACK_ORDER {
        if keywords(category).iter().any(|word| text.contains(word)) {
            categories.push(category);
            if categories.len() >= MAX_CATEGORIES {
                break;
            }
        }
    }

    if categories.is_empty() {
        categories.push(Category::Other);
    }
    categories
}
