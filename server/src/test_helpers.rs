use database::schema::catalog::ArticleStore;
use rocket::local::asynchronous::Client;

use crate::webserver::rocket_server;

/// A store over a fresh in-memory database with migrations applied.
pub async fn setup_store() -> ArticleStore {
    let pool = database::connect_in_memory()
        .await
        .expect("Error opening in-memory database");
    database::migrate(&pool)
        .await
        .expect("Error running migrations");

    ArticleStore::new(pool)
}

/// A tracked client, so flash cookies survive between requests, along with
/// the store the server is using.
pub async fn client() -> (Client, ArticleStore) {
    let store = setup_store().await;
    let client = Client::tracked(rocket_server(store.clone()))
        .await
        .expect("valid rocket instance");

    (client, store)
}
