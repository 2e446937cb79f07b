//! Site-specific scrapers and the host dispatch table.
//!
//! A scraper specializes extraction to one site's markup, in one of two
//! shapes: run the structured-data extractor and patch the fields the site
//! gets wrong, or build the recipe from scratch with the DOM helpers and
//! field parsers.

use std::collections::HashMap;
use std::sync::OnceLock;

use async_trait::async_trait;

use crate::error::ScrapeError;
use crate::extractors::ParsingContext;
use crate::model::Recipe;

mod budgetbytes;
mod kochbar;

pub use budgetbytes::BudgetBytes;
pub use kochbar::Kochbar;

/// A scraper specialized to one site's markup.
///
/// Futures are not `Send` because the parsed document is not; a scrape is a
/// request-scoped operation awaited where it starts.
#[async_trait(?Send)]
pub trait SiteScraper: Send + Sync {
    /// Host the scraper is registered under, without the `www.` prefix.
    fn host(&self) -> &'static str;

    async fn scrape(&self, ctx: &ParsingContext) -> Result<Recipe, ScrapeError>;
}

/// Dispatch table from host to scraper, assembled once at startup and
/// read-only thereafter.
pub struct Registry {
    scrapers: HashMap<&'static str, Box<dyn SiteScraper>>,
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Self {
            scrapers: HashMap::new(),
        };
        registry.register(Box::new(BudgetBytes));
        registry.register(Box::new(Kochbar));
        registry
    }

    fn register(&mut self, scraper: Box<dyn SiteScraper>) {
        self.scrapers.insert(scraper.host(), scraper);
    }

    pub fn dispatch(&self, host: &str) -> Option<&dyn SiteScraper> {
        self.scrapers.get(host).map(Box::as_ref)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry, built on first use.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_host() {
        let registry = Registry::new();
        assert_eq!(
            registry.dispatch("kochbar.de").map(|s| s.host()),
            Some("kochbar.de")
        );
        assert_eq!(
            registry.dispatch("budgetbytes.com").map(|s| s.host()),
            Some("budgetbytes.com")
        );
        assert!(registry.dispatch("unknown.example").is_none());
    }
}
