mod commands;
mod config;
mod render;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use recipe_client::{ClientSettings, FeedDriver, JsonFileStore, ReqwestRecipeApi};
use recipe_logging::{level_from_name, recipe_info, LogDestination};
use tokio::io::{AsyncBufReadExt, BufReader};

use commands::Command;
use config::AppConfig;

const LOG_FILE: &str = "./recipe_app.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The terminal belongs to the console; logs go to a file.
    let level = level_from_name(env::var("RECIPE_LOG").ok().as_deref());
    recipe_logging::initialize(LogDestination::File(PathBuf::from(LOG_FILE)), level);

    let config = AppConfig::load().context("reading console configuration")?;
    let api = ReqwestRecipeApi::new(ClientSettings::new(config.mode.clone()))
        .context("building HTTP client")?;
    let store = JsonFileStore::new(config.data_dir.clone());
    recipe_info!("Favorites stored at {:?}", store.path());

    let mut driver = FeedDriver::new(Arc::new(api), Arc::new(store));
    driver.start();
    println!("{}", commands::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match commands::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Dispatch(msg)) => driver.dispatch(msg),
                    Ok(Command::ShowFeed) => print!("{}", render::render(&driver.view())),
                    Ok(Command::ShowCuisines) => {
                        print!("{}", render::render_cuisines(&driver.view().categories));
                    }
                    Ok(Command::ShowFavorites) => {
                        print!("{}", render::render_favorites(&driver.view().favorites));
                    }
                    Ok(Command::Help) => println!("{}", commands::HELP),
                    Err(err) => println!("{err}"),
                }
            }
            _ = driver.next(), if driver.in_flight() > 0 => {}
        }

        if driver.consume_dirty() {
            print!("{}", render::render(&driver.view()));
        }
    }

    recipe_info!("Console closed with {} requests in flight", driver.in_flight());
    Ok(())
}
