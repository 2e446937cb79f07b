use recipe_scrape::{parse_website, ScrapeError};
use scraper::Html;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn recipe_page(json_ld: &str) -> Html {
    let html = format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {json_ld}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#
    );
    Html::parse_document(&html)
}

#[test]
fn test_minimal_end_to_end_extraction() {
    init_logging();

    let document = recipe_page(
        r#"
        {
            "@context": "https://schema.org/",
            "@type": "Recipe",
            "name": "Test Soup",
            "recipeYield": "4 servings",
            "prepTime": "PT10M",
            "recipeIngredient": ["1 onion", "4 cups broth"],
            "recipeInstructions": ["Chop the onion", "Simmer in broth"]
        }
        "#,
    );

    let recipe = parse_website(&document).unwrap().unwrap();

    assert_eq!(recipe.name, "Test Soup");
    assert_eq!(recipe.yields, 4);
    assert_eq!(recipe.prep_time, "PT10M");
    assert_eq!(recipe.ingredients, vec!["1 onion", "4 cups broth"]);
    assert_eq!(recipe.instructions.len(), 2);
    assert_eq!(recipe.instructions[0].text, "Chop the onion");
    assert_eq!(recipe.instructions[1].text, "Simmer in broth");
}

#[test]
fn test_recipe_record_selected_among_other_types() {
    init_logging();

    let document = recipe_page(
        r#"
        [
            {"@type": "Organization", "name": "The Publisher"},
            {
                "@type": "Recipe",
                "name": "Only Me",
                "recipeIngredient": ["thing"],
                "recipeInstructions": "Do the thing."
            },
            {"@type": "BreadcrumbList", "name": "Home"}
        ]
        "#,
    );

    let recipe = parse_website(&document).unwrap().unwrap();
    assert_eq!(recipe.name, "Only Me");
}

#[test]
fn test_durations_pass_through_verbatim() {
    init_logging();

    let document = recipe_page(
        r#"
        {
            "@type": "Recipe",
            "name": "Braise",
            "prepTime": "PT30M",
            "cookTime": "PT2H",
            "totalTime": "PT2H30M",
            "recipeIngredient": ["meat"],
            "recipeInstructions": "Braise it."
        }
        "#,
    );

    let recipe = parse_website(&document).unwrap().unwrap();
    assert_eq!(recipe.prep_time, "PT30M");
    assert_eq!(recipe.cook_time, "PT2H");
    assert_eq!(recipe.total_time, "PT2H30M");
}

#[test]
fn test_microdata_fallback_when_no_json_ld() {
    init_logging();

    let html = r#"
        <html><body>
        <div itemscope itemtype="https://schema.org/Recipe">
            <h1 itemprop="name">Skillet Beans</h1>
            <span itemprop="recipeYield">Serves 4 people</span>
            <li itemprop="recipeIngredient">2 cans beans</li>
            <li itemprop="recipeInstructions">Warm the beans.</li>
        </div>
        </body></html>
    "#;
    let document = Html::parse_document(html);

    let recipe = parse_website(&document).unwrap().unwrap();
    assert_eq!(recipe.name, "Skillet Beans");
    assert_eq!(recipe.yields, 4);
    assert_eq!(recipe.ingredients, vec!["2 cans beans"]);
}

#[test]
fn test_malformed_island_is_an_explicit_error() {
    init_logging();

    let document = recipe_page(r#"{"@type": "Recipe", "name": "broken"#);

    match parse_website(&document) {
        Err(ScrapeError::MalformedStructuredData(_)) => {}
        other => panic!("expected MalformedStructuredData, got {other:?}"),
    }
}

#[test]
fn test_page_without_structured_data_is_none_not_error() {
    init_logging();

    let document = Html::parse_document(
        "<html><body><article>Ten tips for better bread</article></body></html>",
    );
    assert!(parse_website(&document).unwrap().is_none());
}
