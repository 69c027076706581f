use na_core::{Category, MAX_CATEGORIES};

fn definition(category: Category) -> &'static str {
    match category {
        Category::Ai => "Artificial intelligence, machine learning, neural networks, LLMs, computer vision",
        Category::Robotics => "Robots, automation, mechanical systems, autonomous vehicles",
        Category::Space => "Astronomy, space exploration, satellites, celestial bodies, space missions",
        Category::Aeronautics => "Aircraft, aviation, flight technology, aerospace engineering",
        Category::Physics => "Fundamental physics, quantum mechanics, particle physics, theoretical physics",
        Category::Engineering => "General engineering, civil, mechanical, electrical systems, infrastructure",
        Category::Biology => "Life sciences, genetics, ecology, evolution, organisms, biodiversity",
        Category::MedicalScience => "Healthcare, medicine, diseases, treatments, pharmaceuticals, medical devices, human health",
        Category::Environment => "Climate, ecology, conservation, pollution, sustainability, natural resources",
        Category::Other => "Topics that don't fit the above categories",
    }
}

const RULES: &[&str] = &[
    "Assign ALL relevant categories (maximum {max})",
    "Be generous with medical content - if it mentions medicine, health, body, treatment, or diseases, include \"Medical Science\"",
    "Prioritize specific categories over \"Other\"",
    "Only use \"Other\" if NO other categories apply",
    "For ambiguous short texts, infer the most likely category based on keywords",
];

const EXAMPLES: &[(&str, &[Category])] = &[
    ("Medicine keeps our body safe", &[Category::MedicalScience]),
    ("New cancer treatment approved", &[Category::MedicalScience]),
    ("AI diagnoses diseases faster", &[Category::Ai, Category::MedicalScience]),
    ("SpaceX rocket lands on Mars", &[Category::Space, Category::Engineering]),
    ("Solar panels improve efficiency", &[Category::Engineering, Category::Environment]),
];

/// Build the multi-label classification prompt for one article.
pub fn build_prompt(text: &str) -> String {
    let mut prompt = String::from(
        "You are an expert multi-label news classifier specializing in scientific and technological topics.\n\n",
    );

    prompt.push_str("**Category Definitions:**\n");
    for category in Category::ALL {
        prompt.push_str(&format!("- {}: {}\n", category, definition(category)));
    }

    prompt.push_str("\n**Classification Rules:**\n");
    for (i, rule) in RULES.iter().enumerate() {
        let rule = rule.replace("{max}", &MAX_CATEGORIES.to_string());
        prompt.push_str(&format!("{}. {}\n", i + 1, rule));
    }

    prompt.push_str("\n**Examples:**\n");
    for (example, labels) in EXAMPLES {
        let labels = labels
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("- \"{}\" → [{}]\n", example, labels));
    }

    prompt.push_str(&format!("\n**News Article:**\n{}\n\n", text.trim()));
    prompt.push_str(
        "**Your task:** Return ONLY a JSON object of the form {\"categories\": [...]} with the categories array.",
    );
    prompt
}
