pub mod config;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod fields;
pub mod model;
pub mod sites;

use log::debug;
use scraper::Html;

pub use crate::config::{ExtractorsConfig, ScraperConfig};
pub use crate::error::ScrapeError;
pub use crate::extractors::{parse_website, parse_website_with, ParsingContext};
pub use crate::model::{InstructionStep, Nutrition, Recipe, Tool};
pub use crate::sites::{registry, Registry, SiteScraper};

/// Scrape a recipe out of an already-fetched HTML page.
///
/// Dispatches to the site scraper registered for the URL's host, falling
/// back to the structured-data extractor for unknown hosts. Fetching the
/// page is the caller's job.
pub async fn scrape(url: &str, body: &str) -> Result<Recipe, ScrapeError> {
    let document = Html::parse_document(body);
    scrape_document(url, document).await
}

/// [`scrape`] over an already-parsed document.
pub async fn scrape_document(url: &str, document: Html) -> Result<Recipe, ScrapeError> {
    let host = host_token(url);
    let ctx = ParsingContext::new(url, document);

    let mut recipe = match registry().dispatch(&host) {
        Some(site) => {
            debug!("dispatching {url} to the {host} scraper");
            site.scrape(&ctx).await?
        }
        None => {
            debug!("no scraper registered for '{host}', trying structured data");
            parse_website(&ctx.document)?.ok_or(ScrapeError::NoRecipeFound)?
        }
    };

    if recipe.url.is_empty() {
        recipe.url = ctx.url;
    }
    Ok(recipe)
}

/// Registry key for a URL: the host with scheme, port and any leading
/// `www.` stripped, lower-cased.
fn host_token(url: &str) -> String {
    let rest = url.split("://").nth(1).unwrap_or(url);
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.strip_prefix("www.")
        .unwrap_or(host)
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_token() {
        assert_eq!(host_token("https://www.kochbar.de/rezept/123"), "kochbar.de");
        assert_eq!(host_token("http://BudgetBytes.com:8080/x?y#z"), "budgetbytes.com");
        assert_eq!(host_token("example.org/path"), "example.org");
    }
}
