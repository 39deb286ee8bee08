//! Drive a whole session from code
//!
//! Run against a local backend with:
//! `cargo run --example session -- path/to/fridge.jpg`

use recipesnap::{view, ImageSource, Session, SnapConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("Please provide an image path as an argument")?;

    let config = SnapConfig::load()?;
    let health = recipesnap::check_health(&config).await?;
    println!("Backend: {} (models loaded: {})", health.status, health.models_loaded);

    let mut session = Session::from_config(&config)?;
    session.capture(&ImageSource::Path(path.into())).await?;
    println!("{}", view::render(session.controller()));

    if session.controller().can_generate() {
        session.generate().await?;
        println!("{}", view::render(session.controller()));
    }

    Ok(())
}
