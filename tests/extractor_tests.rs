//! Detail-page extraction against fixture markup and a mock HTTP server

use recipe_scrape::extractor::{
    EATING_METHOD_LABEL, MAIN_INGREDIENTS_LABEL, extract_ingredients, extract_section_text,
};
use recipe_scrape::utils::CHROME_USER_AGENT;
use recipe_scrape::{DetailFetcher, DetailSource, ExtractError, Ingredient, parse_detail_page};
use scraper::Html;
use std::time::Duration;

mod common;
use common::{BARE_PAGE, DETAIL_PAGE, create_error_mock, create_html_mock};

const PAGE_URL: &str = "https://www.maff.go.jp/j/keikaku/syokubunka/k_ryouri/search_menu/menu/torimeshi_aomori.html";

#[test]
fn test_full_page_extraction() {
    let record = parse_detail_page(DETAIL_PAGE, PAGE_URL);

    assert_eq!(record.title, "鶏めし");
    assert_eq!(
        record.main_image,
        "https://www.maff.go.jp/j/keikaku/syokubunka/k_ryouri/search_menu/img/torimeshi.jpg"
    );
    assert_eq!(record.main_ingredients, "鶏肉、ごぼう、米。");
    assert_eq!(record.eating_method, "祝い事の席で食べる。\n冬に多く作られる。");
    assert_eq!(
        record.ingredients,
        vec![
            Ingredient::new("米", "450g（3合）"),
            Ingredient::new("鶏肉", "200g"),
            Ingredient::new("塩", ""),
        ]
    );
    assert_eq!(record.detail_url, PAGE_URL);
    assert!(record.category.is_empty());
    assert!(record.scrape_count.is_none());
    assert!(record.created_at.is_none());
}

#[test]
fn test_cooking_steps_are_numbered_one_per_line() {
    let record = parse_detail_page(DETAIL_PAGE, PAGE_URL);
    let lines: Vec<&str> = record.cooking_method.lines().collect();

    assert_eq!(lines.len(), 3);
    for (i, line) in lines.iter().enumerate() {
        assert!(line.starts_with(&format!("{}. ", i + 1)), "line {i}: {line}");
    }
    assert_eq!(lines[0], "1. 米を洗い、30分浸水させる。");
}

#[test]
fn test_missing_regions_yield_empty_fields() {
    let record = parse_detail_page(BARE_PAGE, PAGE_URL);

    assert_eq!(record.title, "だご汁");
    assert!(record.main_image.is_empty());
    assert!(record.main_ingredients.is_empty());
    assert!(record.eating_method.is_empty());
    assert!(record.cooking_method.is_empty());
    assert!(record.ingredients.is_empty());
}

#[test]
fn test_ingredient_entries_need_two_items() {
    let html = r#"<ul class="menu_material">
        <li><ul class="list"><li>米</li></ul></li>
        <li><p>no inner list</p></li>
        <li><ul class="list"><li></li><li></li></ul></li>
        <li><ul class="list"><li>水</li><li>適量</li></ul></li>
    </ul>"#;
    let doc = Html::parse_document(html);
    assert_eq!(extract_ingredients(&doc), vec![Ingredient::new("水", "適量")]);
}

#[test]
fn test_section_text_from_sibling_blocks() {
    // Heading outside any list item: collect following blocks up to the next h3/h4
    let html = r#"<div>
        <h4>主な使用食材</h4>
        <p>大豆、にがり</p>
        <ul><li>ねぎ</li></ul>
        <div>ignored</div>
        <h4>飲食方法</h4>
        <p>冬に食べる。</p>
    </div>"#;
    let doc = Html::parse_document(html);

    assert_eq!(extract_section_text(&doc, MAIN_INGREDIENTS_LABEL), "大豆、にがり\nねぎ");
    assert_eq!(extract_section_text(&doc, EATING_METHOD_LABEL), "冬に食べる。");
}

#[test]
fn test_section_heading_exact_match_beats_substring() {
    let html = r#"<div>
        <h3>主な使用食材について</h3><p>wrong</p>
        <h4>主な使用食材</h4><p>right</p>
    </div>"#;
    let doc = Html::parse_document(html);
    assert_eq!(extract_section_text(&doc, MAIN_INGREDIENTS_LABEL), "right");
}

#[test]
fn test_section_text_truncated_at_keywords() {
    let html = r#"<ul><li>
        <h3>飲食方法</h3>
        <p>正月に食べる。由来は諸説ある。</p>
    </li></ul>"#;
    let doc = Html::parse_document(html);
    assert_eq!(extract_section_text(&doc, EATING_METHOD_LABEL), "正月に食べる。");
}

#[tokio::test]
async fn test_fetch_and_parse_from_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = create_html_mock(&mut server, "/menu/torimeshi.html", DETAIL_PAGE).await;

    let url = format!("{}/menu/torimeshi.html", server.url());
    let fetcher = DetailFetcher::new(Duration::from_secs(5)).unwrap();
    let record = fetcher.scrape(&url).await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.title, "鶏めし");
    assert_eq!(record.detail_url, url);
    assert_eq!(record.main_image, format!("{}/img/torimeshi.jpg", server.url()));
    assert_eq!(record.ingredients.len(), 3);
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = create_error_mock(&mut server, "/menu/missing.html", 404).await;

    let url = format!("{}/menu/missing.html", server.url());
    let err = DetailFetcher::default().scrape_detail_page(&url).await.unwrap_err();

    match err {
        ExtractError::Status { url: failed, status } => {
            assert_eq!(failed, url);
            assert_eq!(status, 404);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_url_is_rejected_before_request() {
    let err = DetailFetcher::default()
        .fetch_html("ftp://example.com/recipe")
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::InvalidUrl(_)));
}

#[tokio::test]
async fn test_meta_charset_used_when_header_has_none() {
    let page = DETAIL_PAGE.replace(r#"charset="utf-8""#, r#"charset="Shift_JIS""#);
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(&page);

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/menu/sjis.html")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(bytes.to_vec())
        .create_async()
        .await;

    let url = format!("{}/menu/sjis.html", server.url());
    let record = DetailFetcher::default().scrape_detail_page(&url).await.unwrap();

    assert_eq!(record.title, "鶏めし");
    assert_eq!(record.ingredients[0], Ingredient::new("米", "450g（3合）"));
}

#[tokio::test]
async fn test_default_fetcher_sends_browser_user_agent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/menu/ua.html")
        .match_header("user-agent", CHROME_USER_AGENT)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(BARE_PAGE)
        .create_async()
        .await;

    let url = format!("{}/menu/ua.html", server.url());
    let record = DetailFetcher::default().scrape_detail_page(&url).await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.title, "だご汁");
}
