use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single recipe as exported by Mela (one JSON object per
/// `.melarecipe` / `.json` file).
///
/// Every field is defaulted so a sparse export decodes without errors;
/// exports in the wild routinely omit notes, images and nutrition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MelaRecipe {
    pub title: String,
    /// Source URL the recipe was clipped from.
    pub link: String,
    #[serde(rename = "yield")]
    pub recipe_yield: String,
    /// Free-text description.
    pub text: String,
    /// Single newline-delimited string; lines starting with `#` are
    /// section headings, not ingredients.
    pub ingredients: String,
    /// Single newline-delimited string, may carry markdown `#`/`*` markers.
    pub instructions: String,
    pub categories: Vec<String>,
    pub notes: String,
    /// Base64-encoded image blobs; only the first one is uploaded.
    pub images: Vec<String>,
    /// Free-text nutrition blob, e.g. "Calories: 250 kcal, Fat: 10g".
    pub nutrition: String,
    /// Short unstructured duration strings like "1h30m".
    #[serde(rename = "prepTime")]
    pub prep_time: String,
    #[serde(rename = "cookTime")]
    pub cook_time: String,
    #[serde(rename = "totalTime")]
    pub total_time: String,
}

/// Tag on a Mealie recipe, derived from a Mela category.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecipeTag {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Labeled note block on a Mealie recipe.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecipeNote {
    pub title: String,
    pub text: String,
}

/// A recipe shaped for Mealie's schema.org-flavoured create endpoint.
///
/// `id` and `slug` are always empty when produced by the mapper; the
/// server is the only authority for both.
#[derive(Debug, Clone, Serialize)]
pub struct MealieRecipe {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub schema_type: String,
    pub name: String,
    pub id: String,
    pub slug: String,
    pub url: String,
    pub image: String,
    pub author: String,
    #[serde(rename = "recipeYield")]
    pub recipe_yield: String,
    pub description: String,
    #[serde(rename = "recipeCuisine")]
    pub recipe_cuisine: String,
    pub ingredients: Vec<String>,
    #[serde(rename = "recipeInstructions")]
    pub recipe_instructions: Vec<String>,
    #[serde(rename = "cookTime")]
    pub cook_time: String,
    #[serde(rename = "prepTime")]
    pub prep_time: String,
    #[serde(rename = "totalTime")]
    pub total_time: String,
    pub nutrition: HashMap<String, String>,
    pub tags: Vec<RecipeTag>,
    /// Raw category names, kept alongside the derived tags.
    pub categories: Vec<String>,
    pub notes: Vec<RecipeNote>,
}

/// Category reference in the partial-update body (`{"name": ...}`).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryName {
    pub name: String,
}

/// Ingredient line in the partial-update body (`{"note": ...}`).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IngredientNote {
    pub note: String,
}

/// Instruction step in the partial-update body (`{"text": ...}`).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InstructionStep {
    pub text: String,
}

/// Partial-update body for `PATCH /api/recipes/{slug}`, used by the
/// create-then-patch flow after the name-only create.
#[derive(Debug, Clone, Serialize)]
pub struct RecipePatch {
    pub description: String,
    #[serde(rename = "recipeCategory")]
    pub recipe_category: Vec<CategoryName>,
    pub tags: Vec<RecipeTag>,
    #[serde(rename = "recipeYield")]
    pub recipe_yield: String,
    #[serde(rename = "prepTime")]
    pub prep_time: String,
    #[serde(rename = "cookTime")]
    pub cook_time: String,
    #[serde(rename = "totalTime")]
    pub total_time: String,
    #[serde(rename = "recipeIngredient")]
    pub recipe_ingredient: Vec<IngredientNote>,
    #[serde(rename = "recipeInstructions")]
    pub recipe_instructions: Vec<InstructionStep>,
    #[serde(rename = "orgURL")]
    pub org_url: String,
}

/// The slice of `GET /api/recipes/{id}` the importer cares about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipeDetails {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Response of the API-key exchange endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
