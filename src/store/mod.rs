//! The catalog store.
//!
//! [`RecipeStore`] owns the local snapshot of the remote recipe collection,
//! together with the live search term and the current selection. It is the
//! only writer of that state; everything else reads it through
//! [`RecipeStore::state`], [`RecipeStore::view`] or a [`watch`] subscription.
//!
//! Operations may be started while others are still in flight. Each one takes
//! a ticket when it starts, and a fetched list is applied only if no change
//! with a newer ticket has been applied in the meantime. A slow `load` can
//! therefore never bring back a recipe that a later `delete` removed.

use crate::config::{Config, ConfigError};
use crate::fetcher::{FetchError, Health, HttpRecipeApi, RecipeApi};
use crate::model::{CandidateError, Limits, Recipe, RecipeCandidate};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

mod model;

pub use model::{CatalogState, CatalogView, LoadOutcome, Operation, ReconcilePolicy};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Recipe {operation} failed: {source}")]
    FetchFailed {
        operation: Operation,
        source: FetchError,
    },

    #[error("Invalid recipe: {0}")]
    InvalidCandidate(#[from] CandidateError),
}

impl StoreError {
    fn fetch_failed(operation: Operation, source: FetchError) -> Self {
        warn!(%operation, error = %source, "recipe service call failed");
        StoreError::FetchFailed { operation, source }
    }

    /// The failed operation, for fetch failures.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            StoreError::FetchFailed { operation, .. } => Some(*operation),
            StoreError::InvalidCandidate(_) => None,
        }
    }
}

pub struct RecipeStore<A> {
    api: A,
    policy: ReconcilePolicy,
    limits: Limits,
    tickets: AtomicU64,
    state: watch::Sender<CatalogState>,
}

impl<A: RecipeApi> RecipeStore<A> {
    pub fn new(api: A) -> Self {
        Self::with_settings(api, ReconcilePolicy::default(), Limits::default())
    }

    pub fn with_settings(api: A, policy: ReconcilePolicy, limits: Limits) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            api,
            policy,
            limits,
            tickets: AtomicU64::new(0),
            state,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Replaces the snapshot with the full collection from the service.
    ///
    /// On failure the snapshot is left untouched.
    pub async fn load(&self) -> Result<LoadOutcome, StoreError> {
        let ticket = self.ticket();
        debug!(ticket, "loading recipes");

        match self.api.list().await {
            Ok(recipes) => Ok(self.apply_list(ticket, recipes)),
            Err(source) => {
                let reason = source.to_string();
                self.state.send_if_modified(|state| {
                    if ticket <= state.applied {
                        return false;
                    }
                    state.last_error = Some(reason);
                    true
                });
                Err(StoreError::fetch_failed(Operation::Load, source))
            }
        }
    }

    fn apply_list(&self, ticket: u64, recipes: Vec<Recipe>) -> LoadOutcome {
        let recipes = dedup_by_id(recipes);
        let mut outcome = LoadOutcome::StaleResponseDiscarded;

        self.state.send_if_modified(|state| {
            if ticket <= state.applied {
                return false;
            }
            if let Some(selected) = &state.selected {
                if !recipes.iter().any(|r| &r.id == selected) {
                    state.selected = None;
                }
            }
            outcome = LoadOutcome::Applied {
                count: recipes.len(),
            };
            state.recipes = recipes;
            state.loaded = true;
            state.last_error = None;
            state.applied = ticket;
            true
        });

        match outcome {
            LoadOutcome::Applied { count } => info!(ticket, count, "recipe snapshot replaced"),
            LoadOutcome::StaleResponseDiscarded => {
                debug!(ticket, "discarding stale recipe list")
            }
        }
        outcome
    }

    /// Submits a new recipe and brings the snapshot up to date.
    ///
    /// The candidate is normalized and validated before anything is sent.
    /// The recipe cap is checked against the loaded snapshot only; before
    /// the first successful load there is nothing to count against and the
    /// candidate is sent unchecked.
    /// With [`ReconcilePolicy::Reload`] the full collection is fetched again
    /// afterwards; if that reload fails the error reports `Operation::Load`.
    pub async fn create(&self, candidate: RecipeCandidate) -> Result<(), StoreError> {
        let candidate = candidate.normalized(&self.limits)?;
        let (loaded, count) = {
            let state = self.state.borrow();
            (state.loaded, state.recipes.len())
        };
        if loaded && count >= self.limits.max_recipes {
            return Err(CandidateError::CatalogFull {
                max: self.limits.max_recipes,
            }
            .into());
        }

        let ticket = self.ticket();
        debug!(ticket, title = %candidate.title, "creating recipe");
        let created = self
            .api
            .create(&candidate)
            .await
            .map_err(|source| StoreError::fetch_failed(Operation::Create, source))?;
        info!(title = %candidate.title, "recipe created");

        match (self.policy, created) {
            (ReconcilePolicy::ApplyResponse, Some(recipe)) => {
                self.upsert(ticket, recipe);
            }
            (_, created) => {
                let outcome = self.load().await?;
                if let (LoadOutcome::StaleResponseDiscarded, Some(recipe)) = (outcome, created) {
                    self.upsert(ticket, recipe);
                }
            }
        }
        Ok(())
    }

    fn upsert(&self, ticket: u64, recipe: Recipe) {
        debug!(ticket, id = %recipe.id, "applying created recipe");
        self.state.send_modify(|state| {
            match state.recipes.iter_mut().find(|r| r.id == recipe.id) {
                Some(existing) => *existing = recipe,
                None => state.recipes.push(recipe),
            }
            state.applied = state.applied.max(ticket);
        });
    }

    /// Deletes a recipe and removes it from the snapshot once the service
    /// confirms. Clears the selection if it pointed at the deleted recipe.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let ticket = self.ticket();
        debug!(ticket, id, "deleting recipe");
        self.api
            .delete(id)
            .await
            .map_err(|source| StoreError::fetch_failed(Operation::Delete, source))?;

        self.state.send_modify(|state| {
            state.recipes.retain(|r| r.id != id);
            if state.selected.as_deref() == Some(id) {
                state.selected = None;
            }
            state.applied = state.applied.max(ticket);
        });
        info!(id, "recipe deleted");
        Ok(())
    }

    pub async fn health(&self) -> Result<Health, StoreError> {
        self.api
            .health()
            .await
            .map_err(|source| StoreError::fetch_failed(Operation::Health, source))
    }

    /// The current snapshot, in service order.
    pub fn snapshot(&self) -> Vec<Recipe> {
        self.state.borrow().recipes.clone()
    }

    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> CatalogView {
        self.state.borrow().view()
    }

    /// Receives every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// Updates the live search term.
    pub fn set_query(&self, query: &str) {
        self.state.send_if_modified(|state| {
            if state.query == query {
                return false;
            }
            state.query = query.to_string();
            true
        });
    }

    pub fn query(&self) -> String {
        self.state.borrow().query.clone()
    }

    /// Selects the recipe with `id` if it is in the snapshot.
    ///
    /// Returns the selected recipe, or `None` (leaving the selection as it
    /// was) when no such recipe exists.
    pub fn select(&self, id: &str) -> Option<Recipe> {
        let mut selected = None;
        self.state.send_if_modified(|state| {
            let Some(recipe) = state.recipes.iter().find(|r| r.id == id) else {
                return false;
            };
            selected = Some(recipe.clone());
            if state.selected.as_deref() == Some(id) {
                return false;
            }
            state.selected = Some(id.to_string());
            true
        });
        selected
    }

    pub fn selected(&self) -> Option<Recipe> {
        self.state.borrow().selected().cloned()
    }

    pub fn clear_selection(&self) {
        self.state.send_if_modified(|state| state.selected.take().is_some());
    }
}

impl RecipeStore<HttpRecipeApi> {
    /// A store over the HTTP service described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api = HttpRecipeApi::from_config(config)?;
        Ok(Self::with_settings(api, config.policy, config.limits))
    }
}

fn dedup_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    let total = recipes.len();
    let unique: Vec<Recipe> = recipes
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect();
    if unique.len() != total {
        warn!(
            duplicates = total - unique.len(),
            "recipe list contained duplicate ids, keeping first occurrences"
        );
    }
    unique
}
