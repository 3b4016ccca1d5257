use super::recipe::{Ingredient, Step};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bounds enforced on submitted recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_ingredients: usize,
    pub max_steps: usize,
    pub max_recipes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_ingredients: 20,
            max_steps: 15,
            max_recipes: 100,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CandidateError {
    #[error("Recipe title must not be empty")]
    EmptyTitle,

    #[error("Too many ingredients: {count} (at most {max})")]
    TooManyIngredients { count: usize, max: usize },

    #[error("Too many steps: {count} (at most {max})")]
    TooManySteps { count: usize, max: usize },

    #[error("Catalog already holds the maximum of {max} recipes")]
    CatalogFull { max: usize },
}

/// A recipe submitted for creation. It has no id; the backend assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCandidate {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl RecipeCandidate {
    pub fn new<I, S>(title: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecipeCandidate {
            title: title.into(),
            ingredients: ingredients
                .into_iter()
                .zip(1..)
                .map(|(description, id)| Ingredient::new(id, description))
                .collect(),
            steps: Vec::new(),
        }
    }

    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = steps
            .into_iter()
            .zip(1..)
            .map(|(description, id)| Step::new(id, description))
            .collect();
        self
    }

    /// Cleans the candidate up the way the admin form does before submitting.
    ///
    /// The title and every description are trimmed, blank ingredients and
    /// steps are dropped and the remaining entries are renumbered from 1.
    /// Fails if the title is blank or a list exceeds its limit.
    pub fn normalized(self, limits: &Limits) -> Result<Self, CandidateError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(CandidateError::EmptyTitle);
        }

        let descriptions = self.ingredients.into_iter().map(|i| i.description);
        let ingredients: Vec<Ingredient> = non_blank(descriptions)
            .zip(1..)
            .map(|(description, id)| Ingredient::new(id, description))
            .collect();
        if ingredients.len() > limits.max_ingredients {
            return Err(CandidateError::TooManyIngredients {
                count: ingredients.len(),
                max: limits.max_ingredients,
            });
        }

        let steps: Vec<Step> = non_blank(self.steps.into_iter().map(|s| s.description))
            .zip(1..)
            .map(|(description, id)| Step::new(id, description))
            .collect();
        if steps.len() > limits.max_steps {
            return Err(CandidateError::TooManySteps {
                count: steps.len(),
                max: limits.max_steps,
            });
        }

        Ok(RecipeCandidate {
            title,
            ingredients,
            steps,
        })
    }
}

fn non_blank(descriptions: impl Iterator<Item = String>) -> impl Iterator<Item = String> {
    descriptions
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
