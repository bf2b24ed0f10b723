//! Detail-page extraction
//!
//! Fetches a recipe detail page over plain HTTP and turns its loosely
//! structured markup into a [`RecipeRecord`].

mod charset;
mod errors;
mod extractors;
mod fetcher;
pub mod schema;
mod selectors;
mod text;

pub use errors::ExtractError;
pub use extractors::{
    COOKING_METHOD_LABEL, EATING_METHOD_LABEL, MAIN_INGREDIENTS_LABEL, SECTION_CUT_KEYWORDS,
    extract_cooking_method, extract_ingredients, extract_main_image, extract_section_text,
    extract_title, format_numbered_steps, parse_detail_page, truncate_at_keywords,
};
pub use fetcher::{DetailFetcher, DetailSource};
pub use schema::{Ingredient, RecipeRecord};
