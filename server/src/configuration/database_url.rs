use super::Configuration;

pub struct DatabaseUrl;

impl Configuration for DatabaseUrl {
    type Type = String;

    fn default() -> Option<Self::Type> {
        Some(String::from("sqlite://catalogue.sqlite3"))
    }

    fn key() -> &'static str {
        "database-url"
    }
}
