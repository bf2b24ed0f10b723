//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use recipe_scrape::{
    DetailSource, ExistingKeys, ExtractError, ListingProvider, ListingSource, RecipeRecord,
};

/// Detail page with every region present
pub const DETAIL_PAGE: &str = r#"<!DOCTYPE html>
<html lang="ja"><head><meta charset="utf-8"><title>鶏めし</title></head>
<body>
<div class="contents">
  <h1><span class="name">鶏めし</span></h1>
  <div class="menu_main"><img class="resp_img" src="../img/torimeshi.jpg" alt=""></div>
  <ul class="list_detail">
    <li>
      <h3>主な使用食材</h3>
      <p>鶏肉、ごぼう、米。歴史：江戸時代から伝わる。</p>
    </li>
    <li>
      <h3>飲食方法</h3>
      <p>祝い事の席で食べる。</p>
      <p>冬に多く作られる。</p>
    </li>
  </ul>
  <h2 class="tit05">材料</h2>
  <ul class="menu_material">
    <li><ul class="list"><li>米</li><li>450g（3合）</li></ul></li>
    <li><ul class="list"><li> 鶏肉 </li><li> 200g </li></ul></li>
    <li><ul class="list"><li>塩</li><li></li></ul></li>
  </ul>
  <h2 class="tit05">作り方</h2>
  <ul class="recipe">
    <li><div class="num">1</div><div class="txt">米を洗い、30分浸水させる。</div></li>
    <li><div class="num">2</div><div class="txt">鶏肉とごぼうを煮る。</div></li>
    <li><div class="num">3</div><div class="txt">煮汁で米を炊き、具を混ぜる。</div></li>
  </ul>
</div>
</body></html>"#;

/// Detail page with a title only
pub const BARE_PAGE: &str = r#"<html><body><span class="name">だご汁</span><p>準備中</p></body></html>"#;

/// Listing that replays a fixed script of load results
pub struct ScriptedListing {
    script: VecDeque<Result<Option<Vec<String>>>>,
    pub loads: usize,
}

impl ScriptedListing {
    pub fn new(script: Vec<Option<Vec<&str>>>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|load| {
                    Ok(load.map(|links| {
                        links.into_iter().map(String::from).collect::<Vec<_>>()
                    }))
                })
                .collect(),
            loads: 0,
        }
    }

    /// Script of successful loads, each returning the given links
    pub fn loads(script: Vec<Vec<&str>>) -> Self {
        Self::new(script.into_iter().map(Some).collect())
    }

    pub fn push_error(mut self, message: &str) -> Self {
        self.script.push_back(Err(anyhow!(message.to_string())));
        self
    }
}

impl ListingSource for ScriptedListing {
    async fn load_links(&mut self) -> Result<Option<Vec<String>>> {
        self.loads += 1;
        // Past the end of the script every load comes back empty
        self.script.pop_front().unwrap_or(Ok(Some(Vec::new())))
    }
}

/// Provider handing out one scripted listing per category URL
#[derive(Default)]
pub struct ScriptedListings {
    by_url: Mutex<HashMap<String, Vec<Vec<String>>>>,
    pub opened: Mutex<Vec<String>>,
    pub closed: Mutex<usize>,
}

impl ScriptedListings {
    pub fn with(mut self, listing_url: &str, loads: Vec<Vec<&str>>) -> Self {
        self.by_url.get_mut().unwrap().insert(
            listing_url.to_string(),
            loads
                .into_iter()
                .map(|l| l.into_iter().map(String::from).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
        );
        self
    }
}

impl ListingProvider for ScriptedListings {
    type Listing = ScriptedListing;

    async fn open_listing(&self, listing_url: &str) -> Result<ScriptedListing> {
        self.opened.lock().unwrap().push(listing_url.to_string());
        let loads = self
            .by_url
            .lock()
            .unwrap()
            .remove(listing_url)
            .ok_or_else(|| anyhow!("no listing for {listing_url}"))?;
        Ok(ScriptedListing {
            script: loads.into_iter().map(|l| Ok(Some(l))).collect(),
            loads: 0,
        })
    }

    async fn close_listing(&self, _listing: ScriptedListing) {
        *self.closed.lock().unwrap() += 1;
    }
}

/// In-memory key set
#[derive(Default)]
pub struct KnownUrls(pub HashSet<String>);

impl KnownUrls {
    pub fn of(urls: &[&str]) -> Self {
        Self(urls.iter().map(|u| u.to_string()).collect())
    }
}

impl ExistingKeys for KnownUrls {
    async fn existing_urls(&self, urls: &[String]) -> Result<HashSet<String>> {
        Ok(urls.iter().filter(|u| self.0.contains(*u)).cloned().collect())
    }
}

/// Key lookup that always fails
pub struct BrokenKeys;

impl ExistingKeys for BrokenKeys {
    async fn existing_urls(&self, _urls: &[String]) -> Result<HashSet<String>> {
        Err(anyhow!("connection refused"))
    }
}

/// Detail source that builds a record from the URL, failing for listed URLs
#[derive(Default)]
pub struct FakeDetails {
    pub failing: HashSet<String>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeDetails {
    pub fn failing_on(urls: &[&str]) -> Self {
        Self {
            failing: urls.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl DetailSource for FakeDetails {
    async fn scrape(&self, url: &str) -> Result<RecipeRecord, ExtractError> {
        self.fetched.lock().unwrap().push(url.to_string());
        if self.failing.contains(url) {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: 500,
            });
        }
        let mut record = RecipeRecord::new(url);
        record.title = format!("title of {url}");
        Ok(record)
    }
}

/// Record with every scraped field filled in
pub fn sample_record(url: &str, title: &str) -> RecipeRecord {
    RecipeRecord {
        title: title.to_string(),
        main_image: format!("{url}/main.jpg"),
        main_ingredients: "米、鶏肉".to_string(),
        eating_method: "祝い事の席で食べる。".to_string(),
        cooking_method: "1. 洗う\n2. 炊く".to_string(),
        ingredients: vec![recipe_scrape::Ingredient::new("米", "2合")],
        ..RecipeRecord::new(url).with_category("rice")
    }
}

/// Mock endpoint returning `html` as UTF-8 text
pub async fn create_html_mock(
    server: &mut mockito::Server,
    path: &str,
    html: &str,
) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
        .create_async()
        .await
}

/// Mock endpoint returning `status`
pub async fn create_error_mock(
    server: &mut mockito::Server,
    path: &str,
    status: usize,
) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Connection string for a SQLite file inside `dir`
pub fn temp_store_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}", dir.path().join("recipes.db").display())
}

/// Drop the `recipes` table behind an open store so every write fails
pub async fn drop_recipes_table(dir: &tempfile::TempDir) {
    let pool = sqlx::SqlitePool::connect(&temp_store_url(dir)).await.unwrap();
    sqlx::query("DROP TABLE recipes").execute(&pool).await.unwrap();
    pool.close().await;
}
