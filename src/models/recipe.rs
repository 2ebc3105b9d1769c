use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::tags::{is_valid_tag, normalize_tag};
use super::{CookingTime, Ingredient, ValidationError};

/// Unvalidated recipe payload, as received from a client.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeInput {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub average_cost_per_serving: Option<f64>,
    #[serde(default)]
    pub estimated_calories_per_serving: Option<i64>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub cooking_time: CookingTime,
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<Url>,
    #[serde(default)]
    pub embedding_vector: Option<Vec<f64>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A validated recipe. Only obtainable through [`Recipe::try_from`] or
/// deserialization, both of which run the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecipeInput")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub average_cost_per_serving: Option<f64>,
    pub estimated_calories_per_serving: Option<i64>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub cooking_time: CookingTime,
    /// Normalized: trimmed and lowercased, each one in the tag vocabulary.
    pub tags: Vec<String>,
    /// Blob storage link.
    pub image_url: Option<Url>,
    /// Reserved for semantic search.
    pub embedding_vector: Option<Vec<f64>>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Decode and validate a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, ValidationError> {
        let input: RecipeInput =
            serde_json::from_str(payload).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        Self::try_from(input)
    }
}

impl TryFrom<RecipeInput> for Recipe {
    type Error = ValidationError;

    fn try_from(input: RecipeInput) -> Result<Self, Self::Error> {
        let tags = validate_tags(&input.tags)?;

        if let Some(url) = &input.image_url {
            validate_image_url(url)?;
        }

        Ok(Self {
            id: input.id,
            name: input.name,
            average_cost_per_serving: input.average_cost_per_serving,
            estimated_calories_per_serving: input.estimated_calories_per_serving,
            ingredients: input.ingredients,
            instructions: input.instructions,
            cooking_time: input.cooking_time,
            tags,
            image_url: input.image_url,
            embedding_vector: input.embedding_vector,
            created_at: input.created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Normalize every tag; fails on the first one outside the vocabulary.
pub fn validate_tags(tags: &[String]) -> Result<Vec<String>, ValidationError> {
    tags.iter()
        .map(|tag| {
            let tag = normalize_tag(tag);
            if is_valid_tag(&tag) {
                Ok(tag)
            } else {
                Err(ValidationError::InvalidTag { tag })
            }
        })
        .collect()
}

fn validate_image_url(url: &Url) -> Result<(), ValidationError> {
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        "http" | "https" => Err(ValidationError::InvalidField {
            field: "image_url",
            reason: "URL must have a host".to_string(),
        }),
        scheme => Err(ValidationError::InvalidField {
            field: "image_url",
            reason: format!("URL scheme must be http or https, got {scheme}"),
        }),
    }
}
