use database::{
    schema::catalog::{Article, ArticleStore, Deleted},
    DatabaseError,
};
use rocket::{
    form::Form,
    request::FlashMessage,
    response::{Flash, Redirect},
    State,
};
use rocket_dyn_templates::Template;
use serde::Serialize;

use super::{
    article_form::{ArticleFields, ArticleForm, FieldError},
    Failure, CurrentPath, RequestData, ResultExt,
};

const DEMO_ARTICLE_NAME: &str = "Article 3";
const DEMO_ARTICLE_PRICE: &str = "3000";

fn article_list() -> Redirect {
    Redirect::to(uri!(list_articles))
}

/// Logs an unexpected database error and sends the visitor back to the list
/// with the error as a notice.
fn persistence_failure(context: &str, error: DatabaseError) -> Failure {
    error!("{}: {:?}", context, error);
    Failure::Flash(Flash::error(article_list(), format!("{}: {}", context, error)))
}

async fn find_article(store: &ArticleStore, article_id: i64) -> Result<Article, Failure> {
    store
        .find(article_id)
        .await
        .map_to_failure()?
        .ok_or_else(Failure::not_found)
}

#[derive(Serialize)]
struct ListArticlesContext {
    request: RequestData,
    articles: Vec<Article>,
}

#[get("/")]
pub async fn list_articles(
    store: &State<ArticleStore>,
    path: CurrentPath,
    flash: Option<FlashMessage<'_>>,
) -> Result<Template, Failure> {
    let articles = store.list().await?;

    Ok(Template::render(
        "articles/index",
        ListArticlesContext {
            request: RequestData::new(path, flash),
            articles,
        },
    ))
}

#[derive(Serialize)]
struct ViewArticleContext {
    request: RequestData,
    article: Article,
}

#[get("/article/<article_id>")]
pub async fn show_article(
    article_id: i64,
    store: &State<ArticleStore>,
    path: CurrentPath,
) -> Result<Template, Failure> {
    let article = find_article(store, article_id).await?;

    Ok(Template::render(
        "articles/show",
        ViewArticleContext {
            request: RequestData::new(path, None),
            article,
        },
    ))
}

#[derive(Serialize)]
struct EditArticleContext {
    request: RequestData,
    submit_label: &'static str,
    article_id: Option<i64>,
    article: ArticleFields,
    errors: Vec<FieldError>,
}

fn render_new_form(
    path: CurrentPath,
    article: ArticleFields,
    errors: Vec<FieldError>,
) -> Template {
    Template::render(
        "articles/new",
        EditArticleContext {
            request: RequestData::new(path, None),
            submit_label: "Créer",
            article_id: None,
            article,
            errors,
        },
    )
}

fn render_edit_form(
    path: CurrentPath,
    article_id: i64,
    article: ArticleFields,
    errors: Vec<FieldError>,
) -> Template {
    Template::render(
        "articles/edit",
        EditArticleContext {
            request: RequestData::new(path, None),
            submit_label: "Modifier",
            article_id: Some(article_id),
            article,
            errors,
        },
    )
}

#[get("/article/new")]
pub fn new_article(path: CurrentPath) -> Template {
    render_new_form(path, ArticleFields::default(), Vec::new())
}

#[post("/article/new", data = "<article_form>")]
pub async fn create_article(
    article_form: Form<ArticleForm>,
    store: &State<ArticleStore>,
    path: CurrentPath,
) -> Result<Template, Failure> {
    let fields = match article_form.validate() {
        Ok(fields) => fields,
        Err(errors) => return Ok(render_new_form(path, article_form.fields(), errors)),
    };

    match store.create(fields.name, fields.price).await {
        Ok(article) => {
            info!("created article {}", article.id);
            Err(Failure::redirect(uri!(list_articles)))
        }
        Err(error) => Err(persistence_failure("Error saving the article", error)),
    }
}

#[get("/article/save")]
pub async fn save_demo_article(store: &State<ArticleStore>) -> Result<String, Failure> {
    let article = store
        .create(DEMO_ARTICLE_NAME, DEMO_ARTICLE_PRICE)
        .await
        .map_err(|error| persistence_failure("Error saving the article", error))?;

    info!("created demo article {}", article.id);
    Ok(format!("Article enregistré avec id {}", article.id))
}

#[get("/article/edit/<article_id>")]
pub async fn edit_article(
    article_id: i64,
    store: &State<ArticleStore>,
    path: CurrentPath,
) -> Result<Template, Failure> {
    let article = find_article(store, article_id).await?;

    Ok(render_edit_form(
        path,
        article_id,
        ArticleFields::from(&article),
        Vec::new(),
    ))
}

#[post("/article/edit/<article_id>", data = "<article_form>")]
pub async fn update_article(
    article_id: i64,
    article_form: Form<ArticleForm>,
    store: &State<ArticleStore>,
    path: CurrentPath,
) -> Result<Template, Failure> {
    let mut article = find_article(store, article_id).await?;

    match article_form.validate() {
        Ok(fields) => fields.apply_to(&mut article),
        Err(errors) => {
            return Ok(render_edit_form(
                path,
                article_id,
                article_form.fields(),
                errors,
            ))
        }
    }

    match store.update(&article).await {
        Ok(()) => {
            info!("updated article {}", article.id);
            Err(Failure::redirect(uri!(list_articles)))
        }
        Err(DatabaseError::RowNotFound) => Err(Failure::not_found()),
        Err(error) => Err(persistence_failure("Error updating the article", error)),
    }
}

// Deleting only happens through the form; following a link is a no-op.
#[get("/article/delete/<article_id>")]
pub fn confirm_delete_article(article_id: i64) -> Redirect {
    debug!("ignoring delete request for article {} sent with GET", article_id);
    article_list()
}

#[post("/article/delete/<article_id>")]
pub async fn delete_article(article_id: i64, store: &State<ArticleStore>) -> Flash<Redirect> {
    match store.find(article_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Flash::error(article_list(), "Article not found"),
        Err(error) => {
            error!("error looking up article {}: {:?}", article_id, error);
            return Flash::error(
                article_list(),
                format!("Error deleting the article: {}", error),
            );
        }
    }

    match store.delete(article_id).await {
        Ok(Deleted::Removed) => {
            info!("deleted article {}", article_id);
            Flash::success(article_list(), "Article deleted successfully!")
        }
        Ok(Deleted::NotFound) => Flash::error(article_list(), "Article not found"),
        Err(error) => {
            error!("error deleting article {}: {:?}", article_id, error);
            Flash::error(
                article_list(),
                format!("Error deleting the article: {}", error),
            )
        }
    }
}
