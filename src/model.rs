use serde::{Deserialize, Serialize};

/// The normalized recipe every scraper produces.
///
/// Built fresh per extraction call and never mutated after being returned.
/// Site scrapers either fill it field by field starting from [`Recipe::new`]
/// or take the structured-data extractor's result and patch individual
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    pub author: String,
    /// Absolute URL; scrapers resolve site-relative paths before assignment.
    pub image: String,
    pub thumbnail_url: String,
    pub category: String,
    pub cuisine: String,
    /// Comma-joined tags.
    pub keywords: String,
    /// ISO-8601 duration (`PT1H30M`); empty when the site does not publish it.
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    /// Date formats vary by source and are passed through as published.
    pub date_published: String,
    pub date_modified: String,
    pub date_created: String,
    /// Serving count; 0 means unknown, not zero servings.
    #[serde(rename = "yield")]
    pub yields: i16,
    /// Display order. Blank entries are legal; some sites use them as
    /// section separators.
    pub ingredients: Vec<String>,
    /// Execution order. Steps belonging to a named section share that
    /// section's heading in [`InstructionStep::name`].
    pub instructions: Vec<InstructionStep>,
    pub tools: Vec<Tool>,
    pub nutrition: Nutrition,
    /// Canonical source URL. Set by the caller when the scraper leaves it
    /// empty.
    pub url: String,
}

impl Recipe {
    /// Empty recipe with every optional group present, ready for
    /// field-by-field population.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One instruction step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionStep {
    /// Section heading, when the step belongs to a named group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub text: String,
}

impl InstructionStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: text.into(),
        }
    }

    pub fn in_section(text: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            name: Some(section.into()),
            text: text.into(),
        }
    }
}

/// A kitchen tool the recipe calls for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub text: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl Tool {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quantity: 1,
        }
    }
}

impl Default for Tool {
    fn default() -> Self {
        Self::new("")
    }
}

fn default_quantity() -> u32 {
    1
}

/// Nutrition facts as free-text values, units included, exactly as the
/// source site publishes them. Sites mix units, so converting to numeric
/// types is left to downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nutrition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsaturated_fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
}
