//! Command-line front end for the recipe catalog.

use anyhow::{bail, Context};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use recipe_catalog::{CatalogView, Config, Recipe, RecipeCandidate, RecipeStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recipes", version, about = "Browse and manage the recipe catalog")]
struct Cli {
    /// YAML config file; environment variables still override it
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Recipe service URL, overriding config and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List recipes, optionally filtered by title or ingredient
    List {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Show one recipe in full
    Show { id: String },
    /// Create a recipe
    Create {
        #[arg(long)]
        title: String,
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        #[arg(long = "step")]
        steps: Vec<String>,
    },
    /// Delete a recipe by id
    Delete { id: String },
    /// Check that the recipe service is up
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .with_overrides(|key| std::env::var(key).ok());
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let store = RecipeStore::from_config(&config)?;

    match cli.command {
        Command::List { query } => {
            // A failed first load is rendered as an empty state, not an error.
            if let Err(e) = store.load().await {
                debug!("rendering unavailable catalog: {e}");
            }
            store.set_query(&query);
            render(store.view());
        }
        Command::Show { id } => {
            store.load().await?;
            let Some(recipe) = store.select(&id) else {
                bail!("No recipe with id {id:?}");
            };
            print_recipe(&recipe);
        }
        Command::Create {
            title,
            ingredients,
            steps,
        } => {
            store.load().await.context("Could not load the catalog")?;
            let candidate = RecipeCandidate::new(title, ingredients).with_steps(steps);
            store.create(candidate).await?;
            println!("Created. The catalog now holds {} recipes.", store.snapshot().len());
        }
        Command::Delete { id } => {
            store.delete(&id).await?;
            println!("Deleted {id}.");
        }
        Command::Health => {
            let health = store.health().await?;
            println!("{}", health.status);
        }
    }

    Ok(())
}

fn render(view: CatalogView) {
    match view {
        CatalogView::Loading => println!("Loading recipes..."),
        CatalogView::Unavailable { reason } => {
            println!("No recipe data available ({reason}).");
        }
        CatalogView::Empty => println!("The catalog has no recipes yet."),
        CatalogView::NoMatches { query } => {
            println!("No recipes found matching \"{query}\". Try adjusting your search term.");
        }
        CatalogView::Results(recipes) => {
            for recipe in &recipes {
                println!(
                    "{:<24} {} ({} ingredients, {} steps)",
                    recipe.id,
                    recipe.title,
                    recipe.ingredients.len(),
                    recipe.steps.len()
                );
            }
        }
    }
}

fn print_recipe(recipe: &Recipe) {
    println!("{}", recipe.title);
    println!();
    println!("Ingredients:");
    for ingredient in recipe.ingredient_descriptions() {
        println!("  - {ingredient}");
    }
    println!();
    println!("Steps:");
    for (n, step) in recipe.step_descriptions().enumerate() {
        println!("  {}. {step}", n + 1);
    }
}
