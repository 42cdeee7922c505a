use database::{
    schema::catalog::{Article, ArticleStore, Deleted},
    DatabaseError,
};

async fn setup_store() -> ArticleStore {
    let pool = database::connect_in_memory()
        .await
        .expect("Failed to connect to test database");

    database::migrate(&pool)
        .await
        .expect("Failed to run migrations");

    ArticleStore::new(pool)
}

#[tokio::test]
async fn test_list_empty() {
    let store = setup_store().await;

    let articles = store.list().await.expect("Query should succeed");

    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_create_then_list() {
    let store = setup_store().await;

    let article = store
        .create("Widget", "19.99")
        .await
        .expect("Failed to create article");

    assert_eq!(article.id, 1);
    assert_eq!(article.name, "Widget");
    assert_eq!(article.price, "19.99");

    let articles = store.list().await.expect("Failed to list articles");
    assert_eq!(
        articles,
        vec![Article {
            id: 1,
            name: String::from("Widget"),
            price: String::from("19.99"),
        }]
    );
}

#[tokio::test]
async fn test_list_is_in_insertion_order() {
    let store = setup_store().await;

    for name in ["Gamma", "Alpha", "Beta"] {
        store.create(name, "1").await.expect("Failed to create");
    }

    let names: Vec<String> = store
        .list()
        .await
        .expect("Failed to list articles")
        .into_iter()
        .map(|article| article.name)
        .collect();
    assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
}

#[tokio::test]
async fn test_find() {
    let store = setup_store().await;
    let created = store
        .create("Lamp", "42,50 €")
        .await
        .expect("Failed to create article");

    let found = store
        .find(created.id)
        .await
        .expect("Query should succeed")
        .expect("Article should exist");
    assert_eq!(found, created);

    // The price text is stored verbatim
    assert_eq!(found.price, "42,50 €");

    let missing = store.find(999).await.expect("Query should succeed");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_update_changes_only_fields() {
    let store = setup_store().await;
    let other = store.create("Other", "1").await.expect("Failed to create");
    let mut article = store.create("Chair", "80").await.expect("Failed to create");
    let id = article.id;

    article.name = String::from("Armchair");
    article.price = String::from("120");
    store.update(&article).await.expect("Failed to update");

    let reloaded = store
        .find(id)
        .await
        .expect("Query should succeed")
        .expect("Article should exist");
    assert_eq!(reloaded.id, id);
    assert_eq!(reloaded.name, "Armchair");
    assert_eq!(reloaded.price, "120");

    let untouched = store
        .find(other.id)
        .await
        .expect("Query should succeed")
        .expect("Article should exist");
    assert_eq!(untouched, other);
}

#[tokio::test]
async fn test_update_missing_article() {
    let store = setup_store().await;

    let ghost = Article {
        id: 77,
        name: String::from("Ghost"),
        price: String::from("0"),
    };
    let result = store.update(&ghost).await;
    assert!(matches!(result, Err(DatabaseError::RowNotFound)));

    let unsaved = Article::new("Unsaved", "0");
    let result = store.update(&unsaved).await;
    assert!(matches!(result, Err(DatabaseError::RowNotFound)));

    assert!(store.list().await.expect("Query should succeed").is_empty());
}

#[tokio::test]
async fn test_delete() {
    let store = setup_store().await;
    let article = store.create("Vase", "15").await.expect("Failed to create");

    let outcome = store.delete(article.id).await.expect("Failed to delete");
    assert_eq!(outcome, Deleted::Removed);
    assert!(store
        .find(article.id)
        .await
        .expect("Query should succeed")
        .is_none());

    let outcome = store
        .delete(article.id)
        .await
        .expect("Deleting twice should not fail");
    assert_eq!(outcome, Deleted::NotFound);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let store = setup_store().await;
    let first = store.create("First", "1").await.expect("Failed to create");
    store.delete(first.id).await.expect("Failed to delete");

    let second = store.create("Second", "2").await.expect("Failed to create");
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_duplicate_articles_get_distinct_ids() {
    let store = setup_store().await;

    let first = store
        .create("Article 3", "3000")
        .await
        .expect("Failed to create");
    let second = store
        .create("Article 3", "3000")
        .await
        .expect("Failed to create");

    assert_ne!(first.id, second.id);
    assert_eq!(store.list().await.expect("Query should succeed").len(), 2);
}

#[tokio::test]
async fn test_save_within_transaction() {
    let store = setup_store().await;

    let mut tx = store.pool().begin().await.expect("Failed to begin");
    let mut article = Article::new("Rolled back", "5");
    article.save(&mut *tx).await.expect("Failed to save");
    assert!(article.is_saved());
    tx.rollback().await.expect("Failed to roll back");

    assert!(store.list().await.expect("Query should succeed").is_empty());
}

#[tokio::test]
async fn test_end_to_end() {
    let store = setup_store().await;

    let article = store
        .create("Widget", "19.99")
        .await
        .expect("Failed to create article");
    assert_eq!(article.id, 1);

    let articles = store.list().await.expect("Failed to list");
    assert_eq!(articles, vec![article.clone()]);

    store.delete(1).await.expect("Failed to delete");
    assert!(store.find(1).await.expect("Query should succeed").is_none());
}
