mod client;
mod seed;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

use client::RecipeClient;

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(about = "Recipebox CLI", long_about = None)]
struct Cli {
    /// Recipe API URL
    #[arg(
        long,
        global = true,
        env = "RECIPEBOX_SERVER",
        default_value = "http://localhost:8080/api/recipes"
    )]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all recipes
    List,
    /// List recipes with an exact cuisine
    Cuisine { name: String },
    /// Show the highest rated recipes
    Top {
        #[arg(long, default_value_t = 6)]
        limit: u32,
    },
    /// Search recipe names
    Search { query: String },
    /// Show one recipe
    Get { id: String },
    /// Create a recipe
    Create(RecipeFields),
    /// Change some fields of a recipe
    Update {
        id: String,
        #[command(flatten)]
        fields: RecipeFields,
    },
    /// Delete a recipe
    Delete { id: String },
    /// Insert a set of sample recipes
    Seed,
}

#[derive(Args, Default)]
struct RecipeFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    cuisine: Option<String>,
    #[arg(long)]
    rating: Option<f64>,
    /// Minutes
    #[arg(long)]
    total_time: Option<i32>,
    #[arg(long)]
    servings: Option<i32>,
    #[arg(long)]
    description: Option<String>,
}

impl RecipeFields {
    /// JSON object holding only the fields that were given.
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(name) = &self.name {
            map.insert("name".into(), name.clone().into());
        }
        if let Some(cuisine) = &self.cuisine {
            map.insert("cuisine".into(), cuisine.clone().into());
        }
        if let Some(rating) = self.rating {
            map.insert("rating".into(), rating.into());
        }
        if let Some(total_time) = self.total_time {
            map.insert("totalTime".into(), total_time.into());
        }
        if let Some(servings) = self.servings {
            map.insert("servings".into(), servings.into());
        }
        if let Some(description) = &self.description {
            map.insert("description".into(), description.clone().into());
        }
        Value::Object(map)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = RecipeClient::new(&cli.server)?;

    let response = match cli.command {
        Commands::List => client.list().await?,
        Commands::Cuisine { name } => client.by_cuisine(&name).await?,
        Commands::Top { limit } => client.top_rated(limit).await?,
        Commands::Search { query } => client.search(&query).await?,
        Commands::Get { id } => client.get(&id).await?,
        Commands::Create(fields) => client.create(&fields.to_json()).await?,
        Commands::Update { id, fields } => {
            let changes = fields.to_json();
            if changes.as_object().is_some_and(Map::is_empty) {
                bail!("Nothing to update; pass at least one field");
            }
            client.update(&id, &changes).await?
        }
        Commands::Delete { id } => client.delete(&id).await?,
        Commands::Seed => {
            let count = seed::seed(&client).await?;
            println!("Seeded {count} recipes");
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
