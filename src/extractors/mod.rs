//! Extraction of recipes from embedded structured-data markup.
//!
//! Most recipe sites embed a schema.org `Recipe` record, either as a JSON-LD
//! data island or as microdata attributes inline in the markup. Trying these
//! vocabularies is the first thing most site scrapers do; only when both are
//! absent do they fall back to bespoke DOM traversal.

use log::debug;
use scraper::Html;

use crate::config::ExtractorsConfig;
use crate::error::ScrapeError;
use crate::model::Recipe;

mod json_ld;
mod microdata;

pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;

/// Everything a scraper gets to work with: the page URL and the parsed
/// document.
pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, document: Html) -> Self {
        Self {
            url: url.into(),
            document,
        }
    }
}

/// A structured-data vocabulary a page may embed its recipe in.
pub trait Extractor {
    /// `Ok(None)` means the vocabulary is absent from the page or describes
    /// something other than a recipe; that is a normal branch, not an error.
    /// Only data that is present but unparseable is an `Err`.
    fn extract(&self, document: &Html) -> Result<Option<Recipe>, ScrapeError>;
}

/// Parse the structured recipe markup embedded in a page, trying JSON-LD
/// first and falling back to microdata.
///
/// `Ok(None)` signals that the page carries no structured recipe; site
/// scrapers take it as the cue to fall back to bespoke DOM traversal. A
/// malformed data island surfaces as an error only when no other island or
/// vocabulary produced a recipe.
pub fn parse_website(document: &Html) -> Result<Option<Recipe>, ScrapeError> {
    parse_website_with(document, &ExtractorsConfig::default())
}

/// [`parse_website`] honoring a configured extractor order.
pub fn parse_website_with(
    document: &Html,
    config: &ExtractorsConfig,
) -> Result<Option<Recipe>, ScrapeError> {
    let mut failure = None;

    for name in &config.order {
        if !config.enabled.iter().any(|enabled| enabled == name) {
            continue;
        }
        let extractor: &dyn Extractor = match name.as_str() {
            "json_ld" => &JsonLdExtractor,
            "microdata" => &MicroDataExtractor,
            other => {
                debug!("unknown extractor '{other}' in config, skipping");
                continue;
            }
        };

        match extractor.extract(document) {
            Ok(Some(recipe)) => {
                debug!("extractor '{name}' found a recipe");
                return Ok(Some(recipe));
            }
            Ok(None) => debug!("extractor '{name}' found no recipe"),
            Err(err) => {
                debug!("extractor '{name}' failed: {err}");
                failure.get_or_insert(err);
            }
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_website_prefers_json_ld_over_microdata() {
        let html = r#"
            <html><body>
            <script type="application/ld+json">
                {"@type": "Recipe", "name": "From JSON-LD",
                 "recipeIngredient": ["salt"], "recipeInstructions": "Stir."}
            </script>
            <div itemscope itemtype="https://schema.org/Recipe">
                <span itemprop="name">From Microdata</span>
                <li itemprop="recipeIngredient">pepper</li>
            </div>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let recipe = parse_website(&document).unwrap().unwrap();
        assert_eq!(recipe.name, "From JSON-LD");
    }

    #[test]
    fn test_parse_website_with_disabled_json_ld() {
        let html = r#"
            <html><body>
            <script type="application/ld+json">
                {"@type": "Recipe", "name": "From JSON-LD",
                 "recipeIngredient": ["salt"], "recipeInstructions": "Stir."}
            </script>
            <div itemscope itemtype="https://schema.org/Recipe">
                <span itemprop="name">From Microdata</span>
                <li itemprop="recipeIngredient">pepper</li>
            </div>
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let config = ExtractorsConfig {
            enabled: vec!["microdata".to_string()],
            order: vec!["json_ld".to_string(), "microdata".to_string()],
        };
        let recipe = parse_website_with(&document, &config).unwrap().unwrap();
        assert_eq!(recipe.name, "From Microdata");
    }

    #[test]
    fn test_parse_website_without_structured_data() {
        let document = Html::parse_document("<html><body><h1>Blog post</h1></body></html>");
        assert!(parse_website(&document).unwrap().is_none());
    }
}
