use std::env;

use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    let url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let pool = migrations::connect(&url).await?;

    match env::args().nth(1).as_deref() {
        None | Some("up") => {
            migrations::run_all(&pool).await?;
            println!("Migrations applied to {}", url);
        }
        Some("down") => {
            migrations::undo_all(&pool).await?;
            println!("Migrations reverted on {}", url);
        }
        Some(other) => anyhow::bail!("unknown command '{}', expected 'up' or 'down'", other),
    }

    Ok(())
}
