use askama::Template;

/// Home page with the upload form, optionally showing an error.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate {
    pub url: String,
    pub tags: Vec<String>,
}
