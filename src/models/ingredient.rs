use serde::{Deserialize, Serialize};

/// A single ingredient line within a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Free text, e.g. "2 cups" or "a pinch".
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn notes_round_trip() {
        let ingredient = Ingredient {
            name: "butter".to_string(),
            quantity: "2 tbsp".to_string(),
            notes: Some("softened".to_string()),
        };

        let value = serde_json::to_value(&ingredient).unwrap();
        assert_eq!(
            value,
            json!({"name": "butter", "quantity": "2 tbsp", "notes": "softened"})
        );
        assert_eq!(serde_json::from_value::<Ingredient>(value).unwrap(), ingredient);
    }

    #[test]
    fn notes_are_optional() {
        let ingredient: Ingredient =
            serde_json::from_value(json!({"name": "salt", "quantity": "a pinch"})).unwrap();
        assert_eq!(ingredient.notes, None);
        assert_eq!(
            serde_json::to_value(&ingredient).unwrap(),
            json!({"name": "salt", "quantity": "a pinch"})
        );
    }

    #[test]
    fn name_and_quantity_are_required() {
        let err = serde_json::from_value::<Ingredient>(json!({"name": "flour"})).unwrap_err();
        assert!(err.to_string().contains("quantity"));

        let err = serde_json::from_value::<Ingredient>(json!({"quantity": "1 cup"})).unwrap_err();
        assert!(err.to_string().contains("name"));
    }
}
