//! UniFFI bindings for cross-platform front ends (iOS, Android, desktop).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Complex types are converted to simpler representations suitable for FFI.

use crate::config::{Config, ConfigError};
use crate::fetcher::HttpRecipeApi;
use crate::model::Recipe;
use crate::search::filter;
use crate::store::{CatalogView, LoadOutcome, RecipeStore, StoreError};
use crate::RecipeCandidate;
use std::sync::Arc;

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum CatalogError {
    #[error("Recipe {operation} failed: {message}")]
    FetchFailed { operation: String, message: String },

    #[error("Invalid recipe: {message}")]
    InvalidRecipe { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::FetchFailed { operation, source } => CatalogError::FetchFailed {
                operation: operation.to_string(),
                message: source.to_string(),
            },
            StoreError::InvalidCandidate(e) => CatalogError::InvalidRecipe {
                message: e.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CatalogError {
    fn from(e: ConfigError) -> Self {
        CatalogError::Config {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of a recipe. Ingredients and steps are flattened
/// to their descriptions, in display order.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiRecipe {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id.clone(),
            title: r.title.clone(),
            ingredients: r.ingredient_descriptions().map(String::from).collect(),
            steps: r.step_descriptions().map(String::from).collect(),
        }
    }
}

impl From<FfiRecipe> for Recipe {
    fn from(r: FfiRecipe) -> Self {
        Recipe::new(r.id, r.title, r.ingredients).with_steps(r.steps)
    }
}

fn to_ffi(recipes: &[Recipe]) -> Vec<FfiRecipe> {
    recipes.iter().map(FfiRecipe::from).collect()
}

/// FFI-safe mirror of [`CatalogView`].
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiCatalogView {
    Loading,
    Unavailable { reason: String },
    Empty,
    NoMatches { query: String },
    Results { recipes: Vec<FfiRecipe> },
}

impl From<CatalogView> for FfiCatalogView {
    fn from(view: CatalogView) -> Self {
        match view {
            CatalogView::Loading => FfiCatalogView::Loading,
            CatalogView::Unavailable { reason } => FfiCatalogView::Unavailable { reason },
            CatalogView::Empty => FfiCatalogView::Empty,
            CatalogView::NoMatches { query } => FfiCatalogView::NoMatches { query },
            CatalogView::Results(recipes) => FfiCatalogView::Results {
                recipes: to_ffi(&recipes),
            },
        }
    }
}

/// A recipe catalog backed by the HTTP recipe service.
#[derive(uniffi::Object)]
pub struct FfiRecipeCatalog {
    inner: RecipeStore<HttpRecipeApi>,
}

#[uniffi::export]
impl FfiRecipeCatalog {
    /// Creates a catalog talking to the service at `base_url`.
    #[uniffi::constructor]
    pub fn new(base_url: String) -> Result<Arc<Self>, CatalogError> {
        let config = Config {
            base_url,
            ..Config::default()
        };
        Self::with_config(&config)
    }

    /// Creates a catalog configured from the process environment.
    #[uniffi::constructor]
    pub fn from_env() -> Result<Arc<Self>, CatalogError> {
        Self::with_config(&Config::load())
    }

    /// Returns the current snapshot in service order.
    pub fn snapshot(&self) -> Vec<FfiRecipe> {
        to_ffi(&self.inner.snapshot())
    }

    /// Sets the live search term.
    pub fn set_query(&self, query: String) {
        self.inner.set_query(&query);
    }

    /// Returns what the catalog screen should display.
    pub fn view(&self) -> FfiCatalogView {
        self.inner.view().into()
    }

    /// Selects a recipe by id. Returns `None` if it is not in the snapshot.
    pub fn select(&self, id: String) -> Option<FfiRecipe> {
        self.inner.select(&id).as_ref().map(FfiRecipe::from)
    }

    pub fn selected(&self) -> Option<FfiRecipe> {
        self.inner.selected().as_ref().map(FfiRecipe::from)
    }

    pub fn clear_selection(&self) {
        self.inner.clear_selection();
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl FfiRecipeCatalog {
    /// Fetches the full collection. Returns false when the response was
    /// superseded by a newer change and ignored.
    pub async fn load(&self) -> Result<bool, CatalogError> {
        let outcome = self.inner.load().await?;
        Ok(matches!(outcome, LoadOutcome::Applied { .. }))
    }

    /// Submits a new recipe and refreshes the snapshot.
    pub async fn create(
        &self,
        title: String,
        ingredients: Vec<String>,
        steps: Vec<String>,
    ) -> Result<(), CatalogError> {
        let candidate = RecipeCandidate::new(title, ingredients).with_steps(steps);
        Ok(self.inner.create(candidate).await?)
    }

    pub async fn delete(&self, id: String) -> Result<(), CatalogError> {
        Ok(self.inner.delete(&id).await?)
    }

    /// Returns the service's health status string.
    pub async fn health(&self) -> Result<String, CatalogError> {
        Ok(self.inner.health().await?.status)
    }
}

impl FfiRecipeCatalog {
    fn with_config(config: &Config) -> Result<Arc<Self>, CatalogError> {
        let inner = RecipeStore::from_config(config)?;
        Ok(Arc::new(FfiRecipeCatalog { inner }))
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Filters recipes by a search query.
///
/// Case-insensitive substring match against the title or any ingredient.
/// A blank query returns the input unchanged.
#[uniffi::export]
pub fn filter_recipes(recipes: Vec<FfiRecipe>, query: String) -> Vec<FfiRecipe> {
    let recipes: Vec<Recipe> = recipes.into_iter().map(Recipe::from).collect();
    to_ffi(&filter(&recipes, &query))
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
