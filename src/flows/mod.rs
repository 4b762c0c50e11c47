mod create_fetch;
mod create_patch;
mod factory;

pub use create_fetch::CreateFetchFlow;
pub use create_patch::CreatePatchFlow;
pub use factory::FlowFactory;

use crate::client::MealieClient;
use crate::error::ImportError;
use crate::model::{MealieRecipe, MelaRecipe};
use async_trait::async_trait;

/// One of the two upload contracts against the Mealie API.
///
/// Both create the recipe first and hand back the server-assigned slug;
/// they differ in how the remaining fields reach the server. The image
/// upload is not part of the flow — the driver runs it afterwards so
/// an image failure never reverts the created recipe.
#[async_trait]
pub trait UploadFlow: Send + Sync {
    /// Get the flow name (e.g. "create_fetch", "create_patch")
    fn flow_name(&self) -> &str;

    /// Create the recipe on the server and return its slug.
    async fn upload(
        &self,
        client: &MealieClient,
        source: &MelaRecipe,
        mapped: &MealieRecipe,
    ) -> Result<String, ImportError>;
}
