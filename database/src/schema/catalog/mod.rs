mod article;

pub use self::article::{Article, ArticleStore, Deleted};
