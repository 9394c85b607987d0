use crate::models::{Difficulty, Ingredient};
use serde::Deserialize;
use utoipa::ToSchema;

/// Full recipe content supplied by a client at creation time.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub image_url: String,
    pub cooking_time_minutes: i32,
    pub difficulty: Difficulty,
    pub servings: i32,
}

/// Partial recipe update. Only supplied fields replace the stored values;
/// everything else is preserved. `id`, `created_by`, `saved_by` and
/// `created_at` can never be changed through a patch.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub cooking_time_minutes: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub servings: Option<i32>,
}

fn ingredients_ok(ingredients: &[Ingredient]) -> bool {
    ingredients
        .iter()
        .all(|i| !i.name.trim().is_empty() && !i.amount.trim().is_empty())
}

fn instructions_ok(instructions: &[String]) -> bool {
    instructions.iter().all(|step| !step.trim().is_empty())
}

impl RecipeDraft {
    /// Names of the fields that fail validation, empty when the draft is valid.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut bad = Vec::new();
        if self.title.trim().is_empty() {
            bad.push("title");
        }
        if self.description.trim().is_empty() {
            bad.push("description");
        }
        if !ingredients_ok(&self.ingredients) {
            bad.push("ingredients");
        }
        if !instructions_ok(&self.instructions) {
            bad.push("instructions");
        }
        if self.image_url.trim().is_empty() {
            bad.push("image_url");
        }
        if self.cooking_time_minutes <= 0 {
            bad.push("cooking_time_minutes");
        }
        if self.servings <= 0 {
            bad.push("servings");
        }
        bad
    }
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.image_url.is_none()
            && self.cooking_time_minutes.is_none()
            && self.difficulty.is_none()
            && self.servings.is_none()
    }

    /// Same rules as `RecipeDraft::invalid_fields`, applied only to the
    /// fields the patch actually carries.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut bad = Vec::new();
        if matches!(&self.title, Some(t) if t.trim().is_empty()) {
            bad.push("title");
        }
        if matches!(&self.description, Some(d) if d.trim().is_empty()) {
            bad.push("description");
        }
        if matches!(&self.ingredients, Some(i) if !ingredients_ok(i)) {
            bad.push("ingredients");
        }
        if matches!(&self.instructions, Some(s) if !instructions_ok(s)) {
            bad.push("instructions");
        }
        if matches!(&self.image_url, Some(u) if u.trim().is_empty()) {
            bad.push("image_url");
        }
        if matches!(self.cooking_time_minutes, Some(m) if m <= 0) {
            bad.push("cooking_time_minutes");
        }
        if matches!(self.servings, Some(s) if s <= 0) {
            bad.push("servings");
        }
        bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup() -> RecipeDraft {
        RecipeDraft {
            title: "Soup".to_string(),
            description: "Hot soup".to_string(),
            ingredients: vec![Ingredient {
                name: "Water".to_string(),
                amount: "1L".to_string(),
            }],
            instructions: vec!["Boil water".to_string()],
            image_url: "http://x/img.png".to_string(),
            cooking_time_minutes: 10,
            difficulty: Difficulty::Easy,
            servings: 2,
        }
    }

    #[test]
    fn valid_draft_has_no_invalid_fields() {
        assert!(soup().invalid_fields().is_empty());
    }

    #[test]
    fn blank_title_and_description_are_flagged() {
        let mut draft = soup();
        draft.title = "   ".to_string();
        draft.description = String::new();
        assert_eq!(draft.invalid_fields(), vec!["title", "description"]);
    }

    #[test]
    fn ingredient_with_blank_amount_is_flagged() {
        let mut draft = soup();
        draft.ingredients.push(Ingredient {
            name: "Salt".to_string(),
            amount: String::new(),
        });
        assert_eq!(draft.invalid_fields(), vec!["ingredients"]);
    }

    #[test]
    fn blank_instruction_step_is_flagged() {
        let mut draft = soup();
        draft.instructions.push(" ".to_string());
        assert_eq!(draft.invalid_fields(), vec!["instructions"]);
    }

    #[test]
    fn non_positive_numbers_are_flagged() {
        let mut draft = soup();
        draft.cooking_time_minutes = 0;
        draft.servings = -1;
        assert_eq!(
            draft.invalid_fields(),
            vec!["cooking_time_minutes", "servings"]
        );
    }

    #[test]
    fn empty_patch_is_empty_and_valid() {
        let patch = RecipePatch::default();
        assert!(patch.is_empty());
        assert!(patch.invalid_fields().is_empty());
    }

    #[test]
    fn patch_checks_only_supplied_fields() {
        let patch = RecipePatch {
            title: Some(String::new()),
            servings: Some(4),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(patch.invalid_fields(), vec!["title"]);
    }
}
