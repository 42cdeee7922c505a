#[macro_use]
extern crate rocket;

use anyhow::Context;
use database::schema::catalog::ArticleStore;

use crate::configuration::{Configuration, ConfigurationManager, DatabaseUrl, SiteName};

mod configuration;
#[cfg(test)]
mod test_helpers;
mod webserver;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    let configuration = ConfigurationManager::shared();
    configuration.load_environment::<SiteName>();
    configuration.load_environment::<DatabaseUrl>();

    let database_url = DatabaseUrl::get().context("no database url configured")?;
    let pool = database::connect(&database_url)
        .await
        .with_context(|| format!("Error opening database {}", database_url))?;
    database::migrate(&pool)
        .await
        .context("Error running migrations")?;

    webserver::main(ArticleStore::new(pool)).await?;

    Ok(())
}
