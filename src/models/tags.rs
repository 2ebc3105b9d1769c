//! Closed vocabulary of recipe tags.

/// Allowed recipe tags, lowercase and sorted.
pub const VALID_TAGS: &[&str] = &[
    "american",
    "appetizer",
    "baking",
    "breakfast",
    "brunch",
    "budget",
    "chinese",
    "comfort-food",
    "dairy-free",
    "dessert",
    "dinner",
    "drink",
    "easy",
    "french",
    "gluten-free",
    "grilling",
    "healthy",
    "high-protein",
    "indian",
    "italian",
    "japanese",
    "keto",
    "kid-friendly",
    "low-carb",
    "lunch",
    "main",
    "meal-prep",
    "mediterranean",
    "mexican",
    "no-cook",
    "one-pot",
    "paleo",
    "quick",
    "salad",
    "side",
    "slow-cooker",
    "snack",
    "soup",
    "spicy",
    "thai",
    "vegan",
    "vegetarian",
];

/// Trim surrounding whitespace and lowercase.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Whether an already-normalized tag is in the vocabulary.
pub fn is_valid_tag(tag: &str) -> bool {
    VALID_TAGS.binary_search(&tag).is_ok()
}
