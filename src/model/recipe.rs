use serde::{Deserialize, Serialize};

/// A single ingredient line of a recipe.
///
/// The backend stores ingredients as `{id, description}` records, but a bare
/// string is accepted on the wire as well and decodes to an entry without an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "EntryRepr")]
pub struct Ingredient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub description: String,
}

/// A single preparation step of a recipe. Same wire shape as [`Ingredient`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "EntryRepr")]
pub struct Step {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    Described {
        #[serde(default)]
        id: Option<u32>,
        description: String,
    },
    Text(String),
}

impl EntryRepr {
    fn into_parts(self) -> (Option<u32>, String) {
        match self {
            EntryRepr::Described { id, description } => (id, description),
            EntryRepr::Text(description) => (None, description),
        }
    }
}

impl From<EntryRepr> for Ingredient {
    fn from(repr: EntryRepr) -> Self {
        let (id, description) = repr.into_parts();
        Ingredient { id, description }
    }
}

impl From<EntryRepr> for Step {
    fn from(repr: EntryRepr) -> Self {
        let (id, description) = repr.into_parts();
        Step { id, description }
    }
}

impl Ingredient {
    pub fn new(id: u32, description: impl Into<String>) -> Self {
        Ingredient {
            id: Some(id),
            description: description.into(),
        }
    }
}

impl Step {
    pub fn new(id: u32, description: impl Into<String>) -> Self {
        Step {
            id: Some(id),
            description: description.into(),
        }
    }
}

/// A recipe record as held in the catalog snapshot.
///
/// `id` is assigned by the backend and never changes. Ingredient and step
/// order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Builds a recipe with ingredients numbered from 1 and no steps.
    pub fn new<I, S>(id: impl Into<String>, title: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Recipe {
            id: id.into(),
            title: title.into(),
            ingredients: ingredients
                .into_iter()
                .zip(1..)
                .map(|(description, id)| Ingredient::new(id, description))
                .collect(),
            steps: Vec::new(),
        }
    }

    /// Replaces the steps, numbering them from 1.
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

    pub fn ingredient_descriptions(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|i| i.description.as_str())
    }

    pub fn step_descriptions(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.description.as_str())
    }
}
