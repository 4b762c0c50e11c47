use crate::error::ImportError;
use crate::model::{MealieRecipe, RecipeDetails, RecipePatch, TokenResponse};
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::json;
use std::time::Duration;

/// Thin typed wrapper over the Mealie REST API.
///
/// Holds a single connection-pooled client; every call carries the
/// bearer token. Base URL is injectable so tests can point it at a
/// mock server.
pub struct MealieClient {
    client: Client,
    base_url: String,
    token: String,
}

impl MealieClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ImportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(MealieClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Exchange a long-lived API key for a short-lived access token.
    ///
    /// Stands alone because it runs before any authenticated client exists.
    pub async fn exchange_api_key(
        host: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<String, ImportError> {
        let client = Client::builder().timeout(timeout).build()?;
        let response = client
            .post(format!("{}/api/auth/token/api", host.trim_end_matches('/')))
            .json(&json!({ "token": api_key }))
            .send()
            .await?;
        let response = check_status(response).await?;
        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Create a recipe from a full schema.org-shaped payload.
    ///
    /// The endpoint takes the recipe JSON re-encoded as a string under a
    /// `data` key and responds with the new recipe's id.
    pub async fn create_from_schema(&self, recipe: &MealieRecipe) -> Result<String, ImportError> {
        let data = serde_json::to_string(recipe)?;
        let response = self
            .client
            .post(format!("{}/api/recipes/create/html-or-json", self.base_url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&json!({ "data": data }))
            .send()
            .await?;
        let response = check_status(response).await?;
        let id: String = response.json().await?;
        debug!("Created recipe '{}' with id {}", recipe.name, id);
        Ok(id)
    }

    /// Create a recipe from a name-only payload; the response body is the
    /// server-assigned slug.
    pub async fn create_named(&self, name: &str) -> Result<String, ImportError> {
        let response = self
            .client
            .post(format!("{}/api/recipes", self.base_url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        let response = check_status(response).await?;
        let slug: String = response.json().await?;
        debug!("Created recipe '{}' with slug {}", name, slug);
        Ok(slug)
    }

    /// Fetch a created recipe's details, primarily to learn its slug.
    pub async fn get_recipe(&self, id: &str) -> Result<RecipeDetails, ImportError> {
        let response = self
            .client
            .get(format!("{}/api/recipes/{}", self.base_url, id))
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Update an existing recipe with the remaining structured fields.
    pub async fn patch_recipe(&self, slug: &str, patch: &RecipePatch) -> Result<(), ImportError> {
        let response = self
            .client
            .patch(format!("{}/api/recipes/{}", self.base_url, slug))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(patch)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Upload an image for a recipe as a multipart body with the blob and
    /// its declared extension.
    pub async fn upload_image(
        &self,
        slug: &str,
        image: Vec<u8>,
        extension: &str,
    ) -> Result<(), ImportError> {
        let part = Part::bytes(image)
            .file_name(format!("recipe_image.{}", extension))
            .mime_str(&content_type_for(extension))?;
        let form = Form::new()
            .part("image", part)
            .text("extension", extension.to_string());

        let response = self
            .client
            .put(format!("{}/api/recipes/{}/image", self.base_url, slug))
            .header("Authorization", format!("Bearer {}", self.token))
            .multipart(form)
            .send()
            .await?;
        check_status(response).await?;
        debug!("Image uploaded for recipe {}", slug);
        Ok(())
    }
}

fn content_type_for(extension: &str) -> String {
    match extension {
        "jpg" => "image/jpeg".to_string(),
        other => format!("image/{}", other),
    }
}

/// Turn a non-2xx response into an error carrying whatever detail the
/// server sent back.
async fn check_status(response: Response) -> Result<Response, ImportError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ImportError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
