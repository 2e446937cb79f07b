use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::dom;
use crate::error::ScrapeError;
use crate::extractors::Extractor;
use crate::fields;
use crate::model::{Nutrition, Recipe};

/// Extracts a recipe marked up inline with `itemscope`/`itemprop`
/// microdata attributes.
pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn recipe_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        // We strictly require a Recipe itemscope to avoid false positives:
        // unscoped itemprop searches pick up site titles, author bios and
        // ads that use the same property names.
        let selector = Selector::parse("[itemscope]").unwrap();
        document.select(&selector).find(|element| {
            element
                .value()
                .attr("itemtype")
                .is_some_and(|itemtype| {
                    itemtype.contains("schema.org/Recipe")
                        || itemtype.contains("data-vocabulary.org/Recipe")
                })
        })
    }

    fn itemprop<'a>(&self, root: ElementRef<'a>, prop: &str) -> Option<ElementRef<'a>> {
        let selector = Selector::parse(&format!("[itemprop='{prop}']")).unwrap();
        root.select(&selector).next()
    }

    fn itemprop_all<'a>(&self, root: ElementRef<'a>, prop: &str) -> Vec<ElementRef<'a>> {
        let selector = Selector::parse(&format!("[itemprop='{prop}']")).unwrap();
        root.select(&selector).collect()
    }

    /// Property value with the microdata attribute precedence: `content`,
    /// then `datetime`, then the element text.
    fn itemprop_value(&self, root: ElementRef<'_>, prop: &str) -> String {
        match self.itemprop(root, prop) {
            Some(el) => {
                for name in ["content", "datetime"] {
                    let value = dom::attr(el, name);
                    if !value.is_empty() {
                        return value;
                    }
                }
                dom::text_of(el)
            }
            None => String::new(),
        }
    }
}

fn opt(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Extractor for MicroDataExtractor {
    fn extract(&self, document: &Html) -> Result<Option<Recipe>, ScrapeError> {
        let Some(container) = self.recipe_container(document) else {
            return Ok(None);
        };
        debug!("found a microdata Recipe container");

        let mut recipe = Recipe::new();
        recipe.name = self.itemprop_value(container, "name");
        recipe.description = self.itemprop_value(container, "description");

        // Author can be a bare string or a nested Person
        if let Some(author) = self.itemprop(container, "author") {
            let target = self.itemprop(author, "name").unwrap_or(author);
            recipe.author = dom::text_of(target);
        }

        if let Some(image) = self.itemprop(container, "image") {
            let src = dom::attr(image, "src");
            let content = dom::attr(image, "content");
            recipe.image = if !src.is_empty() {
                src
            } else if !content.is_empty() {
                content
            } else {
                dom::text_of(image)
            };
        }

        recipe.category = self.itemprop_value(container, "recipeCategory");
        recipe.cuisine = self.itemprop_value(container, "recipeCuisine");
        recipe.keywords = self.itemprop_value(container, "keywords");

        recipe.prep_time = fields::parse_duration(&self.itemprop_value(container, "prepTime"));
        recipe.cook_time = fields::parse_duration(&self.itemprop_value(container, "cookTime"));
        recipe.total_time = fields::parse_duration(&self.itemprop_value(container, "totalTime"));

        recipe.date_published = self.itemprop_value(container, "datePublished");
        recipe.date_modified = self.itemprop_value(container, "dateModified");
        recipe.date_created = self.itemprop_value(container, "dateCreated");

        recipe.yields = fields::parse_yield(&self.itemprop_value(container, "recipeYield"));

        // Both property spellings are in the wild
        let mut ingredient_nodes = self.itemprop_all(container, "recipeIngredient");
        if ingredient_nodes.is_empty() {
            ingredient_nodes = self.itemprop_all(container, "ingredients");
        }
        recipe.ingredients = fields::text_list(&ingredient_nodes, &[])
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect();

        let mut instruction_nodes = self.itemprop_all(container, "recipeInstructions");
        if instruction_nodes.is_empty() {
            instruction_nodes = self.itemprop_all(container, "instructions");
        }
        recipe.instructions = fields::step_list(&instruction_nodes, &[])
            .into_iter()
            .filter(|step| !step.text.is_empty())
            .collect();

        let tool_nodes = self.itemprop_all(container, "tool");
        recipe.tools = fields::tool_list(&tool_nodes, &[])
            .into_iter()
            .filter(|tool| !tool.text.is_empty())
            .collect();

        let nutrition_root = self.itemprop(container, "nutrition").unwrap_or(container);
        recipe.nutrition = Nutrition {
            calories: opt(self.itemprop_value(nutrition_root, "calories")),
            carbohydrates: opt(self.itemprop_value(nutrition_root, "carbohydrateContent")),
            cholesterol: opt(self.itemprop_value(nutrition_root, "cholesterolContent")),
            fat: opt(self.itemprop_value(nutrition_root, "fatContent")),
            fiber: opt(self.itemprop_value(nutrition_root, "fiberContent")),
            protein: opt(self.itemprop_value(nutrition_root, "proteinContent")),
            saturated_fat: opt(self.itemprop_value(nutrition_root, "saturatedFatContent")),
            sodium: opt(self.itemprop_value(nutrition_root, "sodiumContent")),
            sugar: opt(self.itemprop_value(nutrition_root, "sugarContent")),
            trans_fat: opt(self.itemprop_value(nutrition_root, "transFatContent")),
            unsaturated_fat: opt(self.itemprop_value(nutrition_root, "unsaturatedFatContent")),
            servings: opt(self.itemprop_value(nutrition_root, "servingSize")),
        };

        // A container with neither ingredients nor instructions is not a
        // usable recipe; let the caller fall back to bespoke traversal.
        if recipe.ingredients.is_empty() && recipe.instructions.is_empty() {
            debug!("microdata Recipe container has no usable content");
            return Ok(None);
        }

        Ok(Some(recipe))
    }
}
