pub mod config;
pub mod fetcher;
pub mod ffi;
pub mod model;
pub mod search;
pub mod store;

pub use config::{Config, ConfigError};
pub use fetcher::{FetchError, Health, HttpRecipeApi, RecipeApi};
pub use model::*;
pub use search::{filter, SearchQuery};
pub use store::{
    CatalogState, CatalogView, LoadOutcome, Operation, ReconcilePolicy, RecipeStore, StoreError,
};

uniffi::setup_scaffolding!();
