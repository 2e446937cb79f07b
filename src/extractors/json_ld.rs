use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::convert::TryFrom;

use crate::error::ScrapeError;
use crate::extractors::Extractor;
use crate::fields;
use crate::model::{InstructionStep, Nutrition, Recipe, Tool};

/// Extracts the first schema.org `Recipe` record embedded in a
/// `script[type='application/ld+json']` data island.
pub struct JsonLdExtractor;

/// A schema.org Recipe as sites actually publish it: almost every field
/// comes in several shapes (string, list, object), so each polymorphic
/// field gets an untagged enum.
#[derive(Debug, Deserialize)]
struct SchemaRecipe {
    #[serde(default)]
    name: String,
    description: Option<TextField>,
    author: Option<AuthorField>,
    image: Option<ImageField>,
    #[serde(rename = "thumbnailUrl")]
    thumbnail_url: Option<StringList>,
    #[serde(rename = "recipeCategory")]
    recipe_category: Option<StringList>,
    #[serde(rename = "recipeCuisine")]
    recipe_cuisine: Option<StringList>,
    keywords: Option<StringList>,
    #[serde(rename = "prepTime")]
    prep_time: Option<String>,
    #[serde(rename = "cookTime")]
    cook_time: Option<String>,
    #[serde(rename = "totalTime")]
    total_time: Option<String>,
    #[serde(rename = "datePublished")]
    date_published: Option<String>,
    #[serde(rename = "dateModified")]
    date_modified: Option<String>,
    #[serde(rename = "dateCreated")]
    date_created: Option<String>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<YieldField>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<Vec<String>>,
    /// Pre-2013 schema.org name, still in the wild.
    ingredients: Option<Vec<String>>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<InstructionsField>,
    tool: Option<ToolField>,
    nutrition: Option<NutritionField>,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextField {
    String(String),
    Object(TextObject),
}

impl TextField {
    fn into_text(self) -> String {
        match self {
            TextField::String(text) => text,
            TextField::Object(obj) => obj.text,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringList {
    One(String),
    Many(Vec<String>),
}

impl StringList {
    fn join(self, separator: &str) -> String {
        match self {
            StringList::One(value) => value,
            StringList::Many(values) => values.join(separator),
        }
    }

    fn into_first(self) -> String {
        match self {
            StringList::One(value) => value,
            StringList::Many(values) => values.into_iter().next().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageField {
    None,
    String(String),
    Object(ImageObject),
    // potentially multiple images as objects
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

impl ImageField {
    fn into_first_url(self) -> String {
        match self {
            ImageField::None => String::new(),
            ImageField::String(url) => decode_html_symbols(&url),
            ImageField::Object(img) => img.url,
            ImageField::MultipleStrings(urls) => urls
                .into_iter()
                .next()
                .map(|url| decode_html_symbols(&url))
                .unwrap_or_default(),
            ImageField::MultipleObjects(imgs) => {
                imgs.into_iter().next().map(|img| img.url).unwrap_or_default()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthorObject {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuthorField {
    String(String),
    Object(AuthorObject),
    Multiple(Vec<AuthorObject>),
}

impl AuthorField {
    fn into_name(self) -> String {
        match self {
            AuthorField::String(name) => name,
            AuthorField::Object(obj) => obj.name.unwrap_or_default(),
            AuthorField::Multiple(authors) => authors
                .into_iter()
                .filter_map(|author| author.name)
                .collect::<Vec<String>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YieldField {
    Number(f64),
    String(String),
    Array(Vec<YieldField>),
}

impl YieldField {
    fn to_count(&self) -> i16 {
        match self {
            YieldField::Number(n) => i16::try_from(*n as i64).unwrap_or(0),
            YieldField::String(text) => fields::parse_yield(text),
            YieldField::Array(entries) => entries
                .iter()
                .map(YieldField::to_count)
                .find(|count| *count != 0)
                .unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct StepObject {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "@type")]
enum HowTo {
    HowToStep(HowToStep),
    HowToSection(HowToSection),
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    description: Option<String>,
    name: Option<String>,
}

impl HowToStep {
    // Prefer text, then description, then the step title
    fn into_text(self) -> Option<String> {
        self.text.or(self.description).or(self.name)
    }
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    name: Option<String>,
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<HowToStep>,
}

impl HowTo {
    fn into_steps(self) -> Vec<InstructionStep> {
        match self {
            HowTo::HowToStep(step) => step
                .into_text()
                .map(|text| InstructionStep::new(decode_html_symbols(&text)))
                .into_iter()
                .collect(),
            HowTo::HowToSection(section) => {
                let heading = section.name;
                section
                    .item_list_element
                    .into_iter()
                    .filter_map(HowToStep::into_text)
                    .map(|text| {
                        let mut step = InstructionStep::new(decode_html_symbols(&text));
                        step.name = heading.clone();
                        step
                    })
                    .collect()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionsField {
    String(String),
    Multiple(Vec<String>),
    HowTo(Vec<HowTo>),
    MultipleObject(Vec<StepObject>),
    NestedSections(Vec<Vec<HowTo>>),
}

impl InstructionsField {
    fn into_steps(self) -> Vec<InstructionStep> {
        let steps: Vec<InstructionStep> = match self {
            InstructionsField::String(text) => {
                vec![InstructionStep::new(decode_html_symbols(&text))]
            }
            InstructionsField::Multiple(texts) => texts
                .into_iter()
                .map(|text| InstructionStep::new(decode_html_symbols(&text)))
                .collect(),
            InstructionsField::HowTo(items) => {
                items.into_iter().flat_map(HowTo::into_steps).collect()
            }
            InstructionsField::MultipleObject(objects) => objects
                .into_iter()
                .map(|obj| InstructionStep::new(decode_html_symbols(&obj.text)))
                .collect(),
            InstructionsField::NestedSections(groups) => groups
                .into_iter()
                .flatten()
                .flat_map(HowTo::into_steps)
                .collect(),
        };

        steps
            .into_iter()
            .map(|mut step| {
                step.text = step.text.trim().to_string();
                step
            })
            .filter(|step| !step.text.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ToolObject {
    #[serde(default)]
    name: String,
    #[serde(rename = "requiredQuantity")]
    required_quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ToolField {
    String(String),
    Multiple(Vec<String>),
    Objects(Vec<ToolObject>),
}

impl ToolField {
    fn into_tools(self) -> Vec<Tool> {
        let tools = match self {
            ToolField::String(text) => vec![Tool::new(decode_html_symbols(&text))],
            ToolField::Multiple(texts) => texts
                .into_iter()
                .map(|text| Tool::new(decode_html_symbols(&text)))
                .collect(),
            ToolField::Objects(objects) => objects
                .into_iter()
                .map(|obj| Tool {
                    text: decode_html_symbols(&obj.name),
                    quantity: obj.required_quantity.unwrap_or(1),
                })
                .collect(),
        };
        tools.into_iter().filter(|tool| !tool.text.is_empty()).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumText {
    String(String),
    Number(f64),
}

impl NumText {
    fn into_text(self) -> String {
        match self {
            NumText::String(text) => text.trim().to_string(),
            NumText::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NutritionField {
    calories: Option<NumText>,
    #[serde(rename = "carbohydrateContent")]
    carbohydrate_content: Option<NumText>,
    #[serde(rename = "cholesterolContent")]
    cholesterol_content: Option<NumText>,
    #[serde(rename = "fatContent")]
    fat_content: Option<NumText>,
    #[serde(rename = "fiberContent")]
    fiber_content: Option<NumText>,
    #[serde(rename = "proteinContent")]
    protein_content: Option<NumText>,
    #[serde(rename = "saturatedFatContent")]
    saturated_fat_content: Option<NumText>,
    #[serde(rename = "servingSize")]
    serving_size: Option<NumText>,
    #[serde(rename = "sodiumContent")]
    sodium_content: Option<NumText>,
    #[serde(rename = "sugarContent")]
    sugar_content: Option<NumText>,
    #[serde(rename = "transFatContent")]
    trans_fat_content: Option<NumText>,
    #[serde(rename = "unsaturatedFatContent")]
    unsaturated_fat_content: Option<NumText>,
}

impl NutritionField {
    fn into_nutrition(self) -> Nutrition {
        fn opt(value: Option<NumText>) -> Option<String> {
            value.map(NumText::into_text).filter(|text| !text.is_empty())
        }

        Nutrition {
            calories: opt(self.calories),
            carbohydrates: opt(self.carbohydrate_content),
            cholesterol: opt(self.cholesterol_content),
            fat: opt(self.fat_content),
            fiber: opt(self.fiber_content),
            protein: opt(self.protein_content),
            saturated_fat: opt(self.saturated_fat_content),
            sodium: opt(self.sodium_content),
            sugar: opt(self.sugar_content),
            trans_fat: opt(self.trans_fat_content),
            unsaturated_fat: opt(self.unsaturated_fat_content),
            servings: opt(self.serving_size),
        }
    }
}

impl TryFrom<&Value> for SchemaRecipe {
    type Error = serde_json::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value.clone())
    }
}

impl From<SchemaRecipe> for Recipe {
    fn from(schema: SchemaRecipe) -> Self {
        let ingredients = schema
            .recipe_ingredient
            .or(schema.ingredients)
            .unwrap_or_default()
            .into_iter()
            .map(|line| decode_html_symbols(line.trim()))
            .filter(|line| !line.is_empty())
            .collect();

        Recipe {
            name: decode_html_symbols(schema.name.trim()),
            description: schema
                .description
                .map(|desc| decode_html_symbols(desc.into_text().trim()))
                .unwrap_or_default(),
            author: schema.author.map(AuthorField::into_name).unwrap_or_default(),
            image: schema.image.map(ImageField::into_first_url).unwrap_or_default(),
            thumbnail_url: schema
                .thumbnail_url
                .map(StringList::into_first)
                .unwrap_or_default(),
            category: schema
                .recipe_category
                .map(|category| category.join(", "))
                .unwrap_or_default(),
            cuisine: schema
                .recipe_cuisine
                .map(|cuisine| cuisine.join(", "))
                .unwrap_or_default(),
            keywords: schema
                .keywords
                .map(|keywords| keywords.join(", "))
                .unwrap_or_default(),
            // durations arrive already ISO-8601 encoded and pass through
            prep_time: schema.prep_time.map(|t| t.trim().to_string()).unwrap_or_default(),
            cook_time: schema.cook_time.map(|t| t.trim().to_string()).unwrap_or_default(),
            total_time: schema.total_time.map(|t| t.trim().to_string()).unwrap_or_default(),
            date_published: schema.date_published.unwrap_or_default(),
            date_modified: schema.date_modified.unwrap_or_default(),
            date_created: schema.date_created.unwrap_or_default(),
            yields: schema.recipe_yield.map(|y| y.to_count()).unwrap_or(0),
            ingredients,
            instructions: schema
                .recipe_instructions
                .map(InstructionsField::into_steps)
                .unwrap_or_default(),
            tools: schema.tool.map(ToolField::into_tools).unwrap_or_default(),
            nutrition: schema
                .nutrition
                .map(NutritionField::into_nutrition)
                .unwrap_or_default(),
            url: String::new(),
        }
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Whether a JSON-LD node declares itself a Recipe, either as `"@type":
/// "Recipe"` or with `"Recipe"` among its type array.
fn declares_recipe(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(kind)) => kind == "Recipe",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind.as_str() == Some("Recipe")),
        _ => false,
    }
}

/// First Recipe record in a data island: the island itself, the first match
/// in a top-level array, or the first match in an `@graph` container.
/// Records of other types sharing the island (ads, breadcrumbs, organization
/// metadata) are ignored.
fn first_recipe_node(json: &Value) -> Option<&Value> {
    if declares_recipe(json) {
        return Some(json);
    }
    if let Some(items) = json.as_array() {
        return items.iter().find(|item| declares_recipe(item));
    }
    json.get("@graph")?
        .as_array()?
        .iter()
        .find(|item| declares_recipe(item))
}

/// Clean common defects out of a data island before JSON parsing.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    // Some sites prepend junk before the actual object
    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    // Trailing commas before closing brace/bracket
    cleaned = cleaned.replace(",]", "]").replace(",}", "}");

    // HTML comments wrapped around the island
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    cleaned
}

impl Extractor for JsonLdExtractor {
    fn extract(&self, document: &Html) -> Result<Option<Recipe>, ScrapeError> {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();
        let mut parse_failure: Option<serde_json::Error> = None;

        for (index, script) in document.select(&selector).enumerate() {
            let cleaned_json = sanitize_json(&script.inner_html());
            let json = match serde_json::from_str::<Value>(&cleaned_json) {
                Ok(json) => json,
                Err(err) => {
                    debug!("JSON-LD island {index} is not parseable: {err}");
                    parse_failure.get_or_insert(err);
                    continue;
                }
            };

            if let Some(node) = first_recipe_node(&json) {
                match SchemaRecipe::try_from(node) {
                    Ok(schema) => return Ok(Some(schema.into())),
                    Err(err) => {
                        debug!("JSON-LD island {index} declares a Recipe but does not deserialize: {err}");
                        parse_failure.get_or_insert(err);
                    }
                }
            }
        }

        // A broken island only counts as an error when nothing else on the
        // page produced a recipe; the caller falls back to bespoke traversal.
        match parse_failure {
            Some(err) => Err(ScrapeError::MalformedStructuredData(err)),
            None => Ok(None),
        }
    }
}
