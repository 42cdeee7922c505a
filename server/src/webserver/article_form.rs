use database::schema::catalog::Article;
use serde::Serialize;

pub const BLANK_FIELD: &str = "This value should not be blank.";

/// Raw submission of the article form. Fields are optional so that a partial
/// submission still reaches the handler and can be answered with the form.
#[derive(FromForm, Clone, Debug, Default)]
pub struct ArticleForm {
    pub nom: Option<String>,
    pub prix: Option<String>,
}

/// The values shown in, and accepted from, the article form.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleFields {
    pub name: String,
    pub price: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn blank(field: &'static str) -> Self {
        Self {
            field,
            message: BLANK_FIELD,
        }
    }
}

impl ArticleForm {
    pub fn fields(&self) -> ArticleFields {
        ArticleFields {
            name: self.nom.clone().unwrap_or_default(),
            price: self.prix.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ArticleFields, Vec<FieldError>> {
        let fields = self.fields();

        let mut errors = Vec::new();
        if fields.name.trim().is_empty() {
            errors.push(FieldError::blank("nom"));
        }
        if fields.price.trim().is_empty() {
            errors.push(FieldError::blank("prix"));
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(errors)
        }
    }
}

impl ArticleFields {
    /// Overwrites the editable columns; the id is left alone.
    pub fn apply_to(self, article: &mut Article) {
        article.name = self.name;
        article.price = self.price;
    }
}

impl From<&Article> for ArticleFields {
    fn from(article: &Article) -> Self {
        Self {
            name: article.name.clone(),
            price: article.price.clone(),
        }
    }
}
