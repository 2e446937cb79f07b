use thiserror::Error;

/// Errors that can occur while scraping a recipe out of a page.
///
/// Missing individual fields are never errors; they degrade to the field's
/// zero value. Only conditions that make the whole extraction meaningless
/// surface here.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Embedded structured data was present but could not be parsed
    #[error("malformed structured data: {0}")]
    MalformedStructuredData(#[from] serde_json::Error),

    /// No recipe could be located in the page
    #[error("no recipe found in this webpage")]
    NoRecipeFound,

    /// A site scraper could not find structure it requires
    #[error("scrape failed: {0}")]
    ScrapeFailed(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
