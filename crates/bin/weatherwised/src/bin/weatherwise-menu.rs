//! # weatherwise-menu
//!
//! Text-menu front end over the same configuration, store, and services as
//! `weatherwised`. Saved cities belong to `$USER` (or `local`).

use std::io;

use weatherwised::config::Config;
use weatherwised::menu::Menu;
use weatherwised::wiring;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    wiring::init_tracing(&config.logging.filter);

    let components = wiring::assemble(&config).await?;
    let user = std::env::var("USER")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "local".to_string());

    println!("WeatherWise ({user})");
    Menu::new(&components.lookup, &components.accounts, user)
        .run(io::stdin().lock(), io::stdout().lock())
        .await?;
    Ok(())
}
