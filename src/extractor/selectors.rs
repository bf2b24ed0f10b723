//! CSS selectors for MAFF detail pages.
//!
//! Parsed once at first access and cached. Hardcoded selectors should never
//! fail to parse; if one does, it is a bug in this file.

use scraper::Selector;
use std::sync::LazyLock;

pub(super) static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span.name").expect("BUG: hardcoded CSS selector 'span.name' is invalid")
});

pub(super) static MAIN_IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.menu_main img.resp_img")
        .expect("BUG: hardcoded CSS selector 'div.menu_main img.resp_img' is invalid")
});

pub(super) static MATERIAL_LIST_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("ul.menu_material")
        .expect("BUG: hardcoded CSS selector 'ul.menu_material' is invalid")
});

pub(super) static INNER_LIST_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("ul.list").expect("BUG: hardcoded CSS selector 'ul.list' is invalid")
});

pub(super) static LI_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("li").expect("BUG: hardcoded CSS selector 'li' is invalid")
});

pub(super) static METHOD_HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h2.tit05").expect("BUG: hardcoded CSS selector 'h2.tit05' is invalid")
});

pub(super) static STEP_TEXT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.txt").expect("BUG: hardcoded CSS selector 'div.txt' is invalid")
});

pub(super) static H3_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h3").expect("BUG: hardcoded CSS selector 'h3' is invalid")
});

pub(super) static H4_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h4").expect("BUG: hardcoded CSS selector 'h4' is invalid")
});
