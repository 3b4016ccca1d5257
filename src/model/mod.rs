mod candidate;
mod recipe;

pub use candidate::{CandidateError, Limits, RecipeCandidate};
pub use recipe::{Ingredient, Recipe, Step};
