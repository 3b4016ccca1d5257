use crate::search::{filter_with, SearchQuery};
use crate::Recipe;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The store operations that talk to the recipe service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Create,
    Delete,
    Health,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Delete => "delete",
            Operation::Health => "health",
        };
        f.write_str(name)
    }
}

/// How the snapshot is brought up to date after a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcilePolicy {
    /// Re-fetch the whole collection.
    #[default]
    Reload,
    /// Insert the record returned by the service, reloading only when the
    /// service does not return one.
    ApplyResponse,
}

/// Result of a `load` that reached the service successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced the snapshot.
    Applied { count: usize },
    /// A newer change had already been applied, so the response was ignored.
    StaleResponseDiscarded,
}

/// What the presentation layer should show for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    /// Nothing fetched yet.
    Loading,
    /// The first load failed; there is no data to show.
    Unavailable { reason: String },
    /// Loaded, but the catalog holds no recipes.
    Empty,
    /// Recipes exist but none match the current search.
    NoMatches { query: String },
    Results(Vec<Recipe>),
}

/// Everything the catalog UI renders from, published on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub(crate) recipes: Vec<Recipe>,
    pub(crate) query: String,
    pub(crate) selected: Option<String>,
    pub(crate) loaded: bool,
    pub(crate) last_error: Option<String>,
    /// Ticket of the newest change applied to `recipes`.
    pub(crate) applied: u64,
}

impl CatalogState {
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Recipe> {
        let id = self.selected.as_deref()?;
        self.recipes.iter().find(|r| r.id == id)
    }

    /// True once any load has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Message of the most recent failed load, cleared by the next good one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The recipes matching the current query.
    pub fn filtered(&self) -> Vec<Recipe> {
        filter_with(&self.recipes, &SearchQuery::new(&self.query))
    }

    pub fn view(&self) -> CatalogView {
        if self.recipes.is_empty() {
            return match (&self.last_error, self.loaded) {
                (_, true) => CatalogView::Empty,
                (Some(reason), false) => CatalogView::Unavailable {
                    reason: reason.clone(),
                },
                (None, false) => CatalogView::Loading,
            };
        }

        let results = self.filtered();
        if results.is_empty() {
            CatalogView::NoMatches {
                query: self.query.trim().to_string(),
            }
        } else {
            CatalogView::Results(results)
        }
    }
}
