//! Access to the remote recipe collection.
//!
//! [`RecipeApi`] is the seam between the catalog store and the REST backend.
//! [`HttpRecipeApi`] talks to the real service; tests substitute in-memory
//! implementations.

use crate::model::{Recipe, RecipeCandidate};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod http;

pub use http::HttpRecipeApi;

/// Errors that can occur when talking to the recipe service.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {status}")]
    Status { status: u16 },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Body of `GET /health`.
///
/// The reference backend reports `{"message": ...}` instead of
/// `{"status": ...}`; both decode to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    #[serde(alias = "message")]
    pub status: String,
}

/// The operations the catalog needs from the recipe service.
///
/// Any response outside the 2xx range, any transport failure and any body
/// that cannot be decoded must surface as an `Err`.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Fetches the whole collection in the order the service returns it.
    async fn list(&self) -> Result<Vec<Recipe>, FetchError>;

    /// Submits a new recipe.
    ///
    /// Returns the created record when the service echoes it back, or
    /// `None` when it only acknowledges the request.
    async fn create(&self, candidate: &RecipeCandidate) -> Result<Option<Recipe>, FetchError>;

    /// Deletes the recipe with the given id.
    async fn delete(&self, id: &str) -> Result<(), FetchError>;

    async fn health(&self) -> Result<Health, FetchError>;
}
