use async_trait::async_trait;
use log::debug;

use super::SiteScraper;
use crate::error::ScrapeError;
use crate::extractors::{parse_website, ParsingContext};
use crate::model::Recipe;

/// kochbar.de publishes complete JSON-LD, but bakes the German unit word
/// into the calorie value ("697 kcal energie") and title-cases categories.
pub struct Kochbar;

#[async_trait(?Send)]
impl SiteScraper for Kochbar {
    fn host(&self) -> &'static str {
        "kochbar.de"
    }

    async fn scrape(&self, ctx: &ParsingContext) -> Result<Recipe, ScrapeError> {
        let mut recipe = parse_website(&ctx.document)?.ok_or(ScrapeError::NoRecipeFound)?;

        if let Some(calories) = recipe.nutrition.calories.take() {
            let cleaned = cut_suffix_token(&calories, "energie");
            debug!("kochbar calories '{calories}' -> '{cleaned}'");
            recipe.nutrition.calories = (!cleaned.is_empty()).then_some(cleaned);
        }
        recipe.category = recipe.category.to_lowercase();

        Ok(recipe)
    }
}

/// Cut a trailing locale token, and the whitespace before it, off a value.
fn cut_suffix_token(value: &str, token: &str) -> String {
    match value.rfind(token) {
        Some(idx) => value[..idx].trim_end().to_string(),
        None => value.trim().to_string(),
    }
}
