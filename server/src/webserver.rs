use std::{collections::HashMap, convert::Infallible, env, marker::PhantomData, path::PathBuf};

use rocket::{
    fs::FileServer,
    http::{uri::Reference, Status},
    request::{FlashMessage, FromRequest, Outcome},
    response::{Flash, Redirect},
    Build, Request, Rocket,
};
use rocket_dyn_templates::{tera, Template};
use serde::Serialize;

use database::{schema::catalog::ArticleStore, DatabaseError};

use crate::configuration::{Configuration, SiteName};

mod article_form;
mod articles;

fn root_path() -> PathBuf {
    match env::var("CARGO_MANIFEST_DIR") {
        Ok(value) => {
            let path = PathBuf::from(value);
            path.parent().map(PathBuf::from).unwrap_or(path)
        }
        Err(_) => env::current_dir().unwrap_or_default(),
    }
}

pub fn rocket_server(store: ArticleStore) -> Rocket<Build> {
    let root_path = root_path();
    let figment = rocket::Config::figment().merge(("template_dir", root_path.join("templates")));

    rocket::custom(figment)
        .attach(Template::custom(|engines| {
            engines
                .tera
                .register_function("site_name", TeraConfiguration::<SiteName>::default());
        }))
        .manage(store)
        .mount(
            "/",
            routes![
                articles::list_articles,
                articles::new_article,
                articles::create_article,
                articles::save_demo_article,
                articles::show_article,
                articles::edit_article,
                articles::update_article,
                articles::confirm_delete_article,
                articles::delete_article,
            ],
        )
        .mount("/static", FileServer::from(root_path.join("static")))
        .register("/", catchers![not_found, internal_error])
}

pub async fn main(store: ArticleStore) -> Result<(), rocket::Error> {
    rocket_server(store).launch().await.map(|_| ())
}

pub struct TeraConfiguration<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for TeraConfiguration<T> {
    fn default() -> Self {
        Self {
            _phantom: Default::default(),
        }
    }
}

impl<T> tera::Function for TeraConfiguration<T>
where
    T: Configuration + Send + Sync,
    T::Type: ToString,
{
    fn call(&self, _args: &HashMap<String, tera::Value>) -> tera::Result<tera::Value> {
        let value = T::get().ok_or_else(|| tera::Error::msg("no value found"))?;
        Ok(tera::Value::String(value.to_string()))
    }
}

/// A one-shot message carried across a redirect.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RequestData {
    pub current_path: String,
    pub notice: Option<Notice>,
}

#[derive(Debug)]
pub struct CurrentPath {
    pub path: String,
}

impl RequestData {
    pub fn new(path: CurrentPath, flash: Option<FlashMessage<'_>>) -> Self {
        Self {
            current_path: path.path,
            notice: flash.map(|flash| Notice {
                kind: flash.kind().to_string(),
                message: flash.message().to_string(),
            }),
        }
    }
}

impl<'r> From<&Request<'r>> for CurrentPath {
    fn from(request: &Request<'r>) -> Self {
        CurrentPath {
            path: request.uri().path().to_string(),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentPath {
    type Error = Infallible;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(CurrentPath::from(request))
    }
}

trait ResultExt<T> {
    fn map_database_to_http(self) -> Result<T, Status>;

    fn map_to_failure(self) -> Result<T, Failure>
    where
        Self: Sized,
    {
        self.map_database_to_http().map_err(Failure::Status)
    }
}

impl<T> ResultExt<T> for Result<T, DatabaseError> {
    fn map_database_to_http(self) -> Result<T, Status> {
        self.map_err(|err| match err {
            DatabaseError::RowNotFound => Status::NotFound,
            other_error => {
                error!("unexpected database error: {:?}", other_error);
                Status::InternalServerError
            }
        })
    }
}

#[derive(Responder)]
#[allow(clippy::large_enum_variant)]
pub enum Failure {
    Status(Status),
    Redirect(Redirect),
    Flash(Flash<Redirect>),
}

impl<E> From<E> for Failure
where
    E: std::error::Error,
{
    fn from(error: E) -> Self {
        error!("error processing request: {:?}", error);

        Failure::Status(Status::InternalServerError)
    }
}

impl Failure {
    pub fn redirect<U: TryInto<Reference<'static>>>(destination: U) -> Self {
        Self::Redirect(Redirect::to(destination))
    }

    pub fn not_found() -> Self {
        Self::Status(Status::NotFound)
    }
}

#[derive(Serialize)]
struct ErrorContext {
    request: RequestData,
}

#[catch(404)]
fn not_found(request: &Request<'_>) -> Template {
    Template::render(
        "errors/404",
        ErrorContext {
            request: RequestData::new(CurrentPath::from(request), None),
        },
    )
}

#[catch(500)]
fn internal_error(request: &Request<'_>) -> Template {
    Template::render(
        "errors/500",
        ErrorContext {
            request: RequestData::new(CurrentPath::from(request), None),
        },
    )
}
