use crate::client::MealieClient;
use crate::error::ImportError;
use crate::flows::UploadFlow;
use crate::model::{MealieRecipe, MelaRecipe};
use async_trait::async_trait;
use log::info;

/// Full-schema create, then a follow-up fetch to learn the slug.
///
/// The create endpoint responds with an opaque id only, so the slug the
/// image upload needs has to come from a second read.
pub struct CreateFetchFlow;

#[async_trait]
impl UploadFlow for CreateFetchFlow {
    fn flow_name(&self) -> &str {
        "create_fetch"
    }

    async fn upload(
        &self,
        client: &MealieClient,
        _source: &MelaRecipe,
        mapped: &MealieRecipe,
    ) -> Result<String, ImportError> {
        let id = client.create_from_schema(mapped).await?;
        info!("Created recipe '{}' (id: {})", mapped.name, id);

        let details = client.get_recipe(&id).await?;
        if details.slug.is_empty() {
            return Err(ImportError::MissingSlug(mapped.name.clone()));
        }
        Ok(details.slug)
    }
}
