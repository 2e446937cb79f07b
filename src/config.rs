use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Scraper configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScraperConfig {
    /// Structured-data extractors configuration
    #[serde(default)]
    pub extractors: ExtractorsConfig,
}

/// Configuration for the structured-data extractors.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorsConfig {
    /// List of enabled extractors
    #[serde(default = "default_extractors")]
    pub enabled: Vec<String>,
    /// Order in which extractors should be tried
    #[serde(default = "default_extractors")]
    pub order: Vec<String>,
}

impl Default for ExtractorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_extractors(),
            order: default_extractors(),
        }
    }
}

fn default_extractors() -> Vec<String> {
    vec!["json_ld".to_string(), "microdata".to_string()]
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SCRAPE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SCRAPE__EXTRACTORS__ORDER
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_SCRAPE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extractor_order() {
        let config = ScraperConfig::default();
        assert_eq!(config.extractors.enabled, vec!["json_ld", "microdata"]);
        assert_eq!(config.extractors.order, vec!["json_ld", "microdata"]);
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        // Loading with no config.toml present should not fail
        let config = ScraperConfig::load().expect("defaults should load");
        assert!(!config.extractors.order.is_empty());
    }
}
