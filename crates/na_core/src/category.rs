use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound on the number of labels attached to one article.
pub const MAX_CATEGORIES: usize = 3;

/// The closed news taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "AI")]
    Ai,
    Robotics,
    Space,
    Aeronautics,
    Physics,
    Engineering,
    Biology,
    #[serde(rename = "Medical Science")]
    MedicalScience,
    Environment,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Ai,
        Category::Robotics,
        Category::Space,
        Category::Aeronautics,
        Category::Physics,
        Category::Engineering,
        Category::Biology,
        Category::MedicalScience,
        Category::Environment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ai => "AI",
            Category::Robotics => "Robotics",
            Category::Space => "Space",
            Category::Aeronautics => "Aeronautics",
            Category::Physics => "Physics",
            Category::Engineering => "Engineering",
            Category::Biology => "Biology",
            Category::MedicalScience => "Medical Science",
            Category::Environment => "Environment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| crate::Error::Validation(format!("Unknown category: {}", s)))
    }
}

/// Brings any label set into canonical form.
///
/// Duplicates collapse onto their first occurrence, `Other` is dropped as
/// soon as a topical label is present, the result is capped at
/// [`MAX_CATEGORIES`] and an empty set becomes `[Other]`.
pub fn normalize<I>(labels: I) -> Vec<Category>
where
    I: IntoIterator<Item = Category>,
{
    let mut categories: Vec<Category> = Vec::new();
    for label in labels {
        if !categories.contains(&label) {
            categories.push(label);
        }
    }

    if categories.len() > 1 {
        categories.retain(|c| *c != Category::Other);
    }
    categories.truncate(MAX_CATEGORIES);

    if categories.is_empty() {
        categories.push(Category::Other);
    }
    categories
}
