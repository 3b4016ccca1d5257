//! Live search over a catalog snapshot.
//!
//! Filtering is a pure function of the recipes and the query text. A recipe
//! matches when the query occurs, case-insensitively, in its title or in any
//! one of its ingredient descriptions. Steps never take part in matching.

use crate::Recipe;

mod model;

pub use model::SearchQuery;

/// Returns the recipes matching `query`, in their original order.
///
/// A query that is empty after trimming matches everything.
pub fn filter(recipes: &[Recipe], query: &str) -> Vec<Recipe> {
    let query = SearchQuery::new(query);
    filter_with(recipes, &query)
}

/// Same as [`filter`] for an already normalized query.
pub fn filter_with(recipes: &[Recipe], query: &SearchQuery) -> Vec<Recipe> {
    if query.is_empty() {
        return recipes.to_vec();
    }

    recipes
        .iter()
        .filter(|recipe| matches(recipe, query))
        .cloned()
        .collect()
}

/// Whether a single recipe matches the query by title or by any ingredient.
pub fn matches(recipe: &Recipe, query: &SearchQuery) -> bool {
    query.is_empty()
        || query.found_in(&recipe.title)
        || recipe
            .ingredient_descriptions()
            .any(|description| query.found_in(description))
}
