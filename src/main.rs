use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;

use chomping::{parse_step, ChompConfig, RecipeUploader, RecipeUploaderBuilder, Store};

#[derive(Parser)]
#[command(name = "chomping", version, about = "Extract ingredient annotations from recipes and store them")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Directory holding <name>.json recipe files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory with match_<table>.sql / insert_<table>.sql overrides
    #[arg(long, global = true)]
    sql_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse one recipe step and print its ingredients as JSON
    Parse {
        /// Step text, e.g. "Add {2;cup;flour} then {1;tsp;salt}."
        text: String,
    },
    /// Parse every step of a recipe and print the ingredients as JSON
    Steps {
        /// Recipe name in the data directory, or a path to a .json file
        recipe: String,
    },
    /// Upload a recipe and its ingredients to the database
    Upload {
        /// Recipe name in the data directory, or a path to a .json file
        recipe: String,
        /// Create the tables first if they do not exist
        #[arg(long)]
        init: bool,
    },
    /// Create the default tables
    Init,
}

fn uploader(recipe: &str, config: &ChompConfig) -> RecipeUploaderBuilder {
    let builder = RecipeUploader::builder()
        .data_dir(&config.data_dir)
        .database(&config.database);
    let builder = if recipe.ends_with(".json") {
        builder.recipe_path(recipe)
    } else {
        builder.recipe(recipe)
    };
    match &config.sql_dir {
        Some(dir) => builder.sql_dir(dir),
        None => builder,
    }
}

async fn run(builder: RecipeUploaderBuilder) -> Result<(), Box<dyn std::error::Error>> {
    match builder.build().await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            if let Some(annotation) = e.annotation_error() {
                error!(
                    "Offending annotation at byte {}: {:?}",
                    annotation.offset(),
                    annotation.text()
                );
            }
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = ChompConfig::load()?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if cli.sql_dir.is_some() {
        config.sql_dir = cli.sql_dir;
    }

    match cli.command {
        Command::Parse { text } => {
            let result = parse_step(&text)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Steps { recipe } => run(uploader(&recipe, &config).parse_only()).await?,
        Command::Upload { recipe, init } => {
            let builder = uploader(&recipe, &config);
            run(if init { builder.init_schema() } else { builder }).await?
        }
        Command::Init => {
            Store::open(&config.database)?.init_schema()?;
            info!("Initialised schema in {}", config.database.display());
        }
    }

    Ok(())
}
