//! [`RecipeApi`] over HTTP/JSON.

use super::{FetchError, Health, RecipeApi};
use crate::config::{Config, ConfigError};
use crate::model::{Recipe, RecipeCandidate};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::{debug, warn};

/// Client for the recipe REST service.
///
/// Endpoints are resolved relative to the configured base URL, so a base of
/// `http://host/api` targets `http://host/api/recipes`.
#[derive(Debug, Clone)]
pub struct HttpRecipeApi {
    client: Client,
    base_url: Url,
}

/// `GET /recipes` is answered either with a bare array or wrapped in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<Recipe>),
    Wrapped { recipes: Vec<Recipe> },
}

impl ListBody {
    fn into_recipes(self) -> Vec<Recipe> {
        match self {
            ListBody::Bare(recipes) | ListBody::Wrapped { recipes } => recipes,
        }
    }
}

impl HttpRecipeApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Builds a client from the base URL and timeout in `config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let base_url = config.parsed_base_url()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ConfigError::Client)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn checked(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(url = %response.url(), status = status.as_u16(), "recipe service returned an error");
        Err(FetchError::Status {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn list(&self) -> Result<Vec<Recipe>, FetchError> {
        let url = self.endpoint(&["recipes"])?;
        debug!(%url, "GET recipes");

        let response = checked(self.client.get(url).send().await?)?;
        let body = response.bytes().await?;
        let recipes = serde_json::from_slice::<ListBody>(&body)?.into_recipes();

        debug!(count = recipes.len(), "received recipes");
        Ok(recipes)
    }

    async fn create(&self, candidate: &RecipeCandidate) -> Result<Option<Recipe>, FetchError> {
        let url = self.endpoint(&["recipes"])?;
        debug!(%url, title = %candidate.title, "POST recipe");

        let response = checked(self.client.post(url).json(candidate).send().await?)?;
        let body = response.bytes().await?;

        // The reference backend only acknowledges with a message.
        let created = serde_json::from_slice::<Recipe>(&body).ok();
        if created.is_none() {
            debug!("create response did not contain a recipe");
        }
        Ok(created)
    }

    async fn delete(&self, id: &str) -> Result<(), FetchError> {
        let url = self.endpoint(&["recipes", id])?;
        debug!(%url, "DELETE recipe");

        checked(self.client.delete(url).send().await?)?;
        Ok(())
    }

    async fn health(&self) -> Result<Health, FetchError> {
        let url = self.endpoint(&["health"])?;
        debug!(%url, "GET health");

        let response = checked(self.client.get(url).send().await?)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpRecipeApi {
        HttpRecipeApi::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_endpoint_from_root_base() {
        let url = api("http://localhost:8000").endpoint(&["recipes"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/recipes");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = api("http://example.com/api/").endpoint(&["recipes"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/recipes");
    }

    #[test]
    fn test_endpoint_encodes_id() {
        let url = api("http://localhost:8000")
            .endpoint(&["recipes", "a/b c"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/recipes/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_rejects_cannot_be_a_base() {
        let result = api("mailto:chef@example.com").endpoint(&["recipes"]);
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_list_body_forms() {
        let bare: ListBody = serde_json::from_str(r#"[{"id": "a", "title": "Pasta"}]"#).unwrap();
        assert_eq!(bare.into_recipes().len(), 1);

        let wrapped: ListBody =
            serde_json::from_str(r#"{"recipes": [{"id": "a", "title": "Pasta"}]}"#).unwrap();
        assert_eq!(wrapped.into_recipes()[0].id, "a");

        let message =
            serde_json::from_str::<ListBody>(r#"{"message": "Error retrieving recipes"}"#);
        assert!(message.is_err());
    }
}
