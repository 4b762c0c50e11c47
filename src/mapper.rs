use crate::model::{MealieRecipe, MelaRecipe, RecipeNote, RecipeTag};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use uuid::Uuid;

static CALORIES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:kcal|calories)").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static MINUTES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)m").unwrap());
static HOURS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)h").unwrap());
static MARKDOWN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#+|\*+").unwrap());

/// Expand single-letter unit suffixes in an unstructured duration string.
///
/// `"1h30m"` becomes `"1 hours30 minutes"` (no separating space; Mealie
/// accepts these strings verbatim). Already-expanded strings pass through
/// unchanged, so re-importing a previously converted record is safe.
pub fn format_duration(time: &str) -> String {
    let time = time.trim().to_lowercase();
    if time.is_empty() {
        return String::new();
    }
    let expanded = MINUTES_RE.replace_all(&time, "${1} minutes");
    let expanded = HOURS_RE.replace_all(&expanded, "${1} hours");
    expanded.trim().to_string()
}

/// Extract a calorie figure from a free-text nutrition blob.
///
/// Only calories are parsed today; other nutrients in the blob are dropped.
pub fn parse_nutrition(text: &str) -> HashMap<String, String> {
    let mut nutrition = HashMap::new();
    if let Some(caps) = CALORIES_RE.captures(text) {
        nutrition.insert("calories".to_string(), format!("{} kcal", &caps[1]));
    }
    nutrition
}

/// Derive a URL-safe tag slug from a category name: lowercase, trim,
/// collapse whitespace runs to a single hyphen.
pub fn slugify(name: &str) -> String {
    let name = name.trim().to_lowercase();
    WHITESPACE_RE.replace_all(&name, "-").into_owned()
}

/// Synthesize one tag per category, each with a fresh id.
pub fn derive_tags(categories: &[String]) -> Vec<RecipeTag> {
    categories
        .iter()
        .map(|category| RecipeTag {
            id: Uuid::new_v4().to_string(),
            name: category.clone(),
            slug: slugify(category),
        })
        .collect()
}

/// Split Mela's newline-delimited ingredient block into single-note lines.
///
/// Lines starting with `#` are section headings and are discarded.
pub fn split_ingredients(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split Mela's instruction block into single-step lines, stripping
/// markdown heading and emphasis markers.
pub fn split_instructions(text: &str) -> Vec<String> {
    let stripped = MARKDOWN_RE.replace_all(text, "");
    stripped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Map one Mela export record onto the Mealie recipe schema.
///
/// Pure: no I/O, and missing optional source fields produce empty
/// containers rather than errors. The server-assigned `id`/`slug` are
/// left empty.
pub fn map_recipe(source: &MelaRecipe) -> MealieRecipe {
    let name = if source.title.is_empty() {
        "Untitled Recipe".to_string()
    } else {
        source.title.clone()
    };

    let notes = if source.notes.is_empty() {
        Vec::new()
    } else {
        vec![RecipeNote {
            title: "Note".to_string(),
            text: source.notes.clone(),
        }]
    };

    MealieRecipe {
        context: "https://schema.org".to_string(),
        schema_type: "Recipe".to_string(),
        name,
        id: String::new(),
        slug: String::new(),
        url: source.link.clone(),
        image: String::new(),
        author: String::new(),
        recipe_yield: source.recipe_yield.clone(),
        description: source.text.clone(),
        recipe_cuisine: source.categories.join(","),
        ingredients: split_ingredients(&source.ingredients),
        recipe_instructions: split_instructions(&source.instructions),
        cook_time: format_duration(&source.cook_time),
        prep_time: format_duration(&source.prep_time),
        total_time: format_duration(&source.total_time),
        nutrition: parse_nutrition(&source.nutrition),
        tags: derive_tags(&source.categories),
        categories: source.categories.clone(),
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_expands_suffixes() {
        assert_eq!(format_duration("1h30m"), "1 hours30 minutes");
        assert_eq!(format_duration("45m"), "45 minutes");
        assert_eq!(format_duration("2h"), "2 hours");
    }

    #[test]
    fn test_format_duration_lowercases_and_trims() {
        assert_eq!(format_duration("  1H30M  "), "1 hours30 minutes");
    }

    #[test]
    fn test_format_duration_idempotent() {
        let once = format_duration("1h30m");
        assert_eq!(format_duration(&once), once);
        assert_eq!(format_duration("45 minutes"), "45 minutes");
    }

    #[test]
    fn test_format_duration_empty() {
        assert_eq!(format_duration(""), "");
        assert_eq!(format_duration("   "), "");
    }

    #[test]
    fn test_parse_nutrition_extracts_calories() {
        let nutrition = parse_nutrition("Calories: 250 kcal, Fat: 10g");
        assert_eq!(nutrition.get("calories"), Some(&"250 kcal".to_string()));
        assert_eq!(nutrition.len(), 1);
    }

    #[test]
    fn test_parse_nutrition_case_insensitive() {
        let nutrition = parse_nutrition("300 CALORIES per serving");
        assert_eq!(nutrition.get("calories"), Some(&"300 kcal".to_string()));
    }

    #[test]
    fn test_parse_nutrition_no_match() {
        assert!(parse_nutrition("Fat: 10g, Protein: 5g").is_empty());
        assert!(parse_nutrition("").is_empty());
    }

    #[test]
    fn test_slugify_collapses_whitespace_runs() {
        assert_eq!(slugify(" Main  Course "), "main-course");
        assert_eq!(slugify("Dinner"), "dinner");
        assert_eq!(slugify("Quick\tand Easy"), "quick-and-easy");
    }

    #[test]
    fn test_derive_tags_unique_ids() {
        let categories = vec!["Dinner".to_string(), "Dinner".to_string()];
        let tags = derive_tags(&categories);
        assert_eq!(tags.len(), 2);
        assert_ne!(tags[0].id, tags[1].id);
        assert_eq!(tags[0].name, "Dinner");
        assert_eq!(tags[0].slug, "dinner");
    }

    #[test]
    fn test_split_ingredients_drops_headings_and_blanks() {
        let ingredients = split_ingredients("# Sauce\nSalt\n\nPepper");
        assert_eq!(ingredients, vec!["Salt", "Pepper"]);
    }

    #[test]
    fn test_split_ingredients_empty() {
        assert!(split_ingredients("").is_empty());
    }

    #[test]
    fn test_split_instructions_strips_markdown() {
        let instructions = split_instructions("## Prep\n*Chop* the onions\nBake");
        assert_eq!(instructions, vec!["Prep", "Chop the onions", "Bake"]);
    }

    #[test]
    fn test_map_recipe_missing_title() {
        let source = MelaRecipe::default();
        let mapped = map_recipe(&source);
        assert_eq!(mapped.name, "Untitled Recipe");
    }

    #[test]
    fn test_map_recipe_empty_fields_yield_empty_containers() {
        let mapped = map_recipe(&MelaRecipe::default());
        assert!(mapped.ingredients.is_empty());
        assert!(mapped.recipe_instructions.is_empty());
        assert!(mapped.tags.is_empty());
        assert!(mapped.nutrition.is_empty());
        assert!(mapped.notes.is_empty());
        assert!(mapped.slug.is_empty());
        assert!(mapped.id.is_empty());
    }

    #[test]
    fn test_map_recipe_full_record() {
        let source = MelaRecipe {
            title: "Carbonara".to_string(),
            link: "https://example.com/carbonara".to_string(),
            recipe_yield: "4 servings".to_string(),
            text: "Classic Roman pasta".to_string(),
            ingredients: "# Pasta\nspaghetti\nguanciale".to_string(),
            instructions: "## Steps\nBoil pasta\nFry guanciale".to_string(),
            categories: vec!["Dinner".to_string(), "Italian Food".to_string()],
            notes: "Use fresh eggs".to_string(),
            nutrition: "Approx 600 kcal per portion".to_string(),
            prep_time: "10m".to_string(),
            cook_time: "20m".to_string(),
            total_time: "30m".to_string(),
            ..Default::default()
        };

        let mapped = map_recipe(&source);
        assert_eq!(mapped.name, "Carbonara");
        assert_eq!(mapped.url, "https://example.com/carbonara");
        assert_eq!(mapped.ingredients, vec!["spaghetti", "guanciale"]);
        assert_eq!(mapped.recipe_instructions, vec!["Steps", "Boil pasta", "Fry guanciale"]);
        assert_eq!(mapped.recipe_cuisine, "Dinner,Italian Food");
        assert_eq!(mapped.tags.len(), 2);
        assert_eq!(mapped.tags[1].slug, "italian-food");
        assert_eq!(mapped.prep_time, "10 minutes");
        assert_eq!(mapped.total_time, "30 minutes");
        assert_eq!(mapped.nutrition.get("calories"), Some(&"600 kcal".to_string()));
        assert_eq!(
            mapped.notes,
            vec![RecipeNote {
                title: "Note".to_string(),
                text: "Use fresh eggs".to_string()
            }]
        );
    }

    #[test]
    fn test_mapped_recipe_serializes_with_schema_names() {
        let source = MelaRecipe {
            title: "Toast".to_string(),
            prep_time: "5m".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(map_recipe(&source)).unwrap();
        assert_eq!(value["@type"], "Recipe");
        assert_eq!(value["name"], "Toast");
        assert_eq!(value["prepTime"], "5 minutes");
        assert!(value["recipeInstructions"].as_array().unwrap().is_empty());
    }
}
