use crate::client::MealieClient;
use crate::error::ImportError;
use crate::flows::UploadFlow;
use crate::model::{
    CategoryName, IngredientNote, InstructionStep, MealieRecipe, MelaRecipe, RecipePatch,
};
use async_trait::async_trait;
use log::info;

/// Name-only create (which returns the slug directly), then a partial
/// update carrying the remaining structured fields.
///
/// Unlike the schema-create flow this one sends the raw, unexpanded
/// Mela time strings and folds the notes into the description, matching
/// what Mealie's PATCH endpoint historically accepted.
pub struct CreatePatchFlow;

impl CreatePatchFlow {
    /// Build the partial-update body from the source and mapped records.
    fn patch_body(source: &MelaRecipe, mapped: &MealieRecipe) -> RecipePatch {
        let mut description = source.text.clone();
        if !source.notes.is_empty() {
            description.push_str("\n\n--- Notes ---\n");
            description.push_str(&source.notes);
        }

        RecipePatch {
            description,
            recipe_category: source
                .categories
                .iter()
                .map(|name| CategoryName { name: name.clone() })
                .collect(),
            tags: mapped.tags.clone(),
            recipe_yield: source.recipe_yield.clone(),
            prep_time: source.prep_time.clone(),
            cook_time: source.cook_time.clone(),
            total_time: source.total_time.clone(),
            recipe_ingredient: mapped
                .ingredients
                .iter()
                .map(|note| IngredientNote { note: note.clone() })
                .collect(),
            recipe_instructions: mapped
                .recipe_instructions
                .iter()
                .map(|text| InstructionStep { text: text.clone() })
                .collect(),
            org_url: source.link.clone(),
        }
    }
}

#[async_trait]
impl UploadFlow for CreatePatchFlow {
    fn flow_name(&self) -> &str {
        "create_patch"
    }

    async fn upload(
        &self,
        client: &MealieClient,
        source: &MelaRecipe,
        mapped: &MealieRecipe,
    ) -> Result<String, ImportError> {
        let slug = client.create_named(&mapped.name).await?;
        info!("Created recipe '{}' (slug: {})", mapped.name, slug);

        let patch = Self::patch_body(source, mapped);
        client.patch_recipe(&slug, &patch).await?;
        Ok(slug)
    }
}
