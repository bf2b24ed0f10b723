//! Field extraction from a parsed MAFF detail page
//!
//! Each extractor is independent and best-effort: a missing region yields an
//! empty value, never an error. Heading lookups run as ordered fallback
//! chains, exact label first, substring second.

use scraper::{ElementRef, Html, Selector};

use super::schema::{Ingredient, RecipeRecord};
use super::selectors::{
    H3_SELECTOR, H4_SELECTOR, INNER_LIST_SELECTOR, LI_SELECTOR, MAIN_IMAGE_SELECTOR,
    MATERIAL_LIST_SELECTOR, METHOD_HEADING_SELECTOR, STEP_TEXT_SELECTOR, TITLE_SELECTOR,
};
use super::text::{
    child_elements, following_elements, has_class, heading_level, raw_text, stripped_text,
};
use crate::utils::resolve_url;

/// Heading label of the "main ingredients used" section
pub const MAIN_INGREDIENTS_LABEL: &str = "主な使用食材";

/// Heading label of the "how it is eaten" section
pub const EATING_METHOD_LABEL: &str = "飲食方法";

/// Heading label of the numbered cooking steps
pub const COOKING_METHOD_LABEL: &str = "作り方";

/// Keywords that start unrelated topics (history, origin, season, related,
/// preservation, succession, initiatives). Narrative text is cut before the
/// first occurrence of each, applied in this order.
pub const SECTION_CUT_KEYWORDS: &[&str] = &["歴史", "由来", "時季", "関連", "保存", "継承", "取組"];

/// Parse a detail page into a record. `category` is left empty for the caller.
#[must_use]
pub fn parse_detail_page(html: &str, detail_url: &str) -> RecipeRecord {
    let document = Html::parse_document(html);

    RecipeRecord {
        title: extract_title(&document),
        main_image: extract_main_image(&document, detail_url),
        main_ingredients: extract_section_text(&document, MAIN_INGREDIENTS_LABEL),
        eating_method: extract_section_text(&document, EATING_METHOD_LABEL),
        cooking_method: extract_cooking_method(&document),
        ingredients: extract_ingredients(&document),
        ..RecipeRecord::new(detail_url)
    }
}

#[must_use]
pub fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| stripped_text(el, ""))
        .unwrap_or_default()
}

/// Main image `src`, resolved against the page URL
#[must_use]
pub fn extract_main_image(document: &Html, page_url: &str) -> String {
    document
        .select(&MAIN_IMAGE_SELECTOR)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| resolve_url(page_url, src))
        .unwrap_or_default()
}

/// Structured ingredient list from `ul.menu_material`
///
/// ```html
/// <ul class="menu_material">
///   <li><ul class="list"><li>米</li><li>450g（3合）</li></ul></li>
/// </ul>
/// ```
///
/// Entries without an inner list or with fewer than two items are skipped,
/// as are entries whose name and amount are both empty.
#[must_use]
pub fn extract_ingredients(document: &Html) -> Vec<Ingredient> {
    let Some(list) = document.select(&MATERIAL_LIST_SELECTOR).next() else {
        return Vec::new();
    };

    child_elements(list)
        .filter(|outer| outer.value().name() == "li")
        .filter_map(|outer| outer.select(&INNER_LIST_SELECTOR).next())
        .filter_map(|inner| {
            let mut items = inner.select(&LI_SELECTOR);
            let name = stripped_text(items.next()?, "");
            let amount = stripped_text(items.next()?, "");
            (!name.is_empty() || !amount.is_empty()).then(|| Ingredient { name, amount })
        })
        .collect()
}

/// Numbered cooking steps under the `作り方` heading
///
/// ```html
/// <h2 class="tit05">作り方</h2>
/// <ul class="recipe">
///   <li><div class="num">1</div><div class="txt">米を洗う。</div></li>
/// </ul>
/// ```
///
/// Renders `"1. step\n2. step"`; empty when the heading or list is missing.
#[must_use]
pub fn extract_cooking_method(document: &Html) -> String {
    let headings: Vec<ElementRef<'_>> = document.select(&METHOD_HEADING_SELECTOR).collect();

    let heading = headings
        .iter()
        .find(|h| stripped_text(**h, "") == COOKING_METHOD_LABEL)
        .or_else(|| {
            headings
                .iter()
                .find(|h| raw_text(**h).contains(COOKING_METHOD_LABEL))
        });

    let Some(&heading) = heading else {
        return String::new();
    };

    let Some(steps_list) = find_steps_list(heading) else {
        return String::new();
    };

    let steps: Vec<String> = child_elements(steps_list)
        .filter(|li| li.value().name() == "li")
        .filter_map(|li| li.select(&STEP_TEXT_SELECTOR).next())
        .map(|txt| stripped_text(txt, ""))
        .filter(|s| !s.is_empty())
        .collect();

    format_numbered_steps(&steps)
}

/// First `ul.recipe` following `heading`, stopping at the next heading of
/// equal or higher level.
fn find_steps_list(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let level = heading_level(heading.value().name()).unwrap_or(6);

    for sibling in following_elements(heading) {
        let tag = sibling.value().name();
        if tag == "ul" && has_class(sibling, "recipe") {
            return Some(sibling);
        }
        if heading_level(tag).is_some_and(|l| l <= level) {
            break;
        }
    }
    None
}

/// `["a", "b"]` → `"1. a\n2. b"`
#[must_use]
pub fn format_numbered_steps(steps: &[String]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Narrative text for the section headed by `label`, truncated at
/// [`SECTION_CUT_KEYWORDS`]
#[must_use]
pub fn extract_section_text(document: &Html, label: &str) -> String {
    let Some(heading) = find_section_heading(document, label) else {
        return String::new();
    };

    let blocks: Vec<String> = match enclosing_list_item(heading) {
        Some(li) => child_elements(li)
            .filter(|el| is_text_block(el.value().name()))
            .map(|el| stripped_text(el, " "))
            .collect(),
        None => following_elements(heading)
            .take_while(|el| !matches!(el.value().name(), "h3" | "h4"))
            .filter(|el| is_text_block(el.value().name()))
            .map(|el| stripped_text(el, " "))
            .collect(),
    };

    truncate_at_keywords(blocks.join("\n").trim())
}

/// Heading lookup chain: exact `h3`, exact `h4`, substring `h3`, substring `h4`
fn find_section_heading<'a>(document: &'a Html, label: &str) -> Option<ElementRef<'a>> {
    let levels: [&Selector; 2] = [&H3_SELECTOR, &H4_SELECTOR];

    levels
        .iter()
        .find_map(|sel| document.select(sel).find(|h| stripped_text(*h, "") == label))
        .or_else(|| {
            levels
                .iter()
                .find_map(|sel| document.select(sel).find(|h| raw_text(*h).contains(label)))
        })
}

fn enclosing_list_item(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "li")
}

fn is_text_block(tag: &str) -> bool {
    matches!(tag, "p" | "ul" | "ol")
}

/// Cut `text` before the first occurrence of each keyword in
/// [`SECTION_CUT_KEYWORDS`] order, trimming after every cut.
#[must_use]
pub fn truncate_at_keywords(text: &str) -> String {
    let mut text = text;
    for keyword in SECTION_CUT_KEYWORDS {
        if let Some(idx) = text.find(keyword) {
            text = text[..idx].trim();
        }
    }
    text.to_string()
}
