use async_trait::async_trait;
use scraper::ElementRef;

use super::SiteScraper;
use crate::dom;
use crate::error::ScrapeError;
use crate::extractors::ParsingContext;
use crate::fields;
use crate::model::Recipe;

/// budgetbytes.com renders its recipe card with WordPress Recipe Maker
/// markup: every field lives under a `wprm-recipe-*` class.
///
/// Fields are extracted as independent tasks joined before assembly; a
/// field whose subtree is missing degrades to its zero value without
/// touching its siblings.
pub struct BudgetBytes;

fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn first_by_class<'a>(root: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| has_class(el, class))
}

fn text_by_class(root: ElementRef<'_>, class: &str) -> String {
    first_by_class(root, class)
        .map(dom::text_of)
        .unwrap_or_default()
}

// WPRM splits a time into amount/unit spans; reading the container text
// whole gives the duration parser both.
fn duration_by_class(root: ElementRef<'_>, container_class: &str) -> String {
    fields::parse_duration(&text_by_class(root, container_class))
}

#[async_trait(?Send)]
impl SiteScraper for BudgetBytes {
    fn host(&self) -> &'static str {
        "budgetbytes.com"
    }

    async fn scrape(&self, ctx: &ParsingContext) -> Result<Recipe, ScrapeError> {
        let root = dom::root(&ctx.document);

        let (name, description, image, times, yields, ingredients, instructions) = tokio::join!(
            async { text_by_class(root, "wprm-recipe-name") },
            async { text_by_class(root, "wprm-recipe-summary") },
            async {
                first_by_class(root, "wprm-recipe-image")
                    .and_then(|container| {
                        dom::find_all(container, |el| el.value().name() == "img")
                            .into_iter()
                            .next()
                    })
                    .map(|img| dom::absolute_url(&ctx.url, &dom::attr(img, "src")))
                    .unwrap_or_default()
            },
            async {
                (
                    duration_by_class(root, "wprm-recipe-prep-time-container"),
                    duration_by_class(root, "wprm-recipe-cook-time-container"),
                    duration_by_class(root, "wprm-recipe-total-time-container"),
                )
            },
            async { fields::parse_yield(&text_by_class(root, "wprm-recipe-servings")) },
            async {
                let nodes = dom::find_all(root, |el| has_class(el, "wprm-recipe-ingredient"));
                fields::text_list(&nodes, &[])
                    .into_iter()
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
            },
            async {
                let nodes = dom::find_all(root, |el| has_class(el, "wprm-recipe-instruction"));
                fields::step_list(&nodes, &[])
                    .into_iter()
                    .filter(|step| !step.text.is_empty())
                    .collect::<Vec<_>>()
            },
        );

        if name.is_empty() && ingredients.is_empty() && instructions.is_empty() {
            return Err(ScrapeError::NoRecipeFound);
        }

        let (prep_time, cook_time, total_time) = times;

        Ok(Recipe {
            name,
            description,
            image,
            prep_time,
            cook_time,
            total_time,
            yields,
            ingredients,
            instructions,
            url: ctx.url.clone(),
            ..Recipe::new()
        })
    }
}
