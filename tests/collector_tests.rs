//! Listing reload loop driven by scripted listings

use recipe_scrape::{CollectLimits, StopReason, collect_links};

mod common;
use common::ScriptedListing;

#[tokio::test]
async fn test_stops_after_idle_reloads() {
    let mut listing = ScriptedListing::loads(vec![vec!["a", "b"], vec![], vec![], vec![]]);

    let result = collect_links(&mut listing, CollectLimits::default()).await;

    assert_eq!(result.loads, 4);
    assert_eq!(listing.loads, 4);
    assert_eq!(result.links, vec!["a", "b"]);
    assert_eq!(result.stop, StopReason::NoNewLinks);
}

#[tokio::test]
async fn test_repeated_links_count_as_idle() {
    let mut listing = ScriptedListing::loads(vec![
        vec!["a", "b"],
        vec!["b", "a"],
        vec!["c", "a"],
        vec!["a"],
        vec!["b"],
        vec!["c"],
    ]);

    let result = collect_links(&mut listing, CollectLimits::default()).await;

    assert_eq!(result.links, vec!["a", "b", "c"]);
    assert_eq!(result.loads, 6);
    assert_eq!(result.stop, StopReason::NoNewLinks);
}

#[tokio::test]
async fn test_saturates_at_max_links_in_discovery_order() {
    let mut listing = ScriptedListing::loads(vec![
        vec!["a", "b", "c"],
        vec!["c", "d", "e", "f", "g"],
        vec!["h"],
    ]);

    let result = collect_links(&mut listing, CollectLimits::default()).await;

    assert_eq!(result.loads, 2);
    assert_eq!(result.links, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(result.stop, StopReason::Saturated);
}

#[tokio::test]
async fn test_missing_section_returns_accumulated_links() {
    let mut listing = ScriptedListing::new(vec![Some(vec!["a"]), None, Some(vec!["b"])]);

    let result = collect_links(&mut listing, CollectLimits::default()).await;

    assert_eq!(result.loads, 2);
    assert_eq!(result.links, vec!["a"]);
    assert_eq!(result.stop, StopReason::SectionMissing);
}

#[tokio::test]
async fn test_load_error_returns_accumulated_links() {
    let mut listing = ScriptedListing::loads(vec![vec!["a", "b"]]).push_error("navigation timeout");

    let result = collect_links(&mut listing, CollectLimits::default()).await;

    assert_eq!(result.loads, 2);
    assert_eq!(result.links, vec!["a", "b"]);
    assert_eq!(result.stop, StopReason::LoadFailed);
}

#[tokio::test]
async fn test_refresh_ceiling() {
    let mut listing = ScriptedListing::loads(vec![vec!["a"], vec!["b"], vec!["c"], vec!["d"]]);
    let limits = CollectLimits {
        refresh_max: 3,
        ..CollectLimits::default()
    };

    let result = collect_links(&mut listing, limits).await;

    assert_eq!(result.loads, 3);
    assert_eq!(result.links, vec!["a", "b", "c"]);
    assert_eq!(result.stop, StopReason::RefreshLimit);
}

#[tokio::test]
async fn test_single_idle_load_limit() {
    let mut listing = ScriptedListing::loads(vec![vec![], vec!["a"]]);
    let limits = CollectLimits {
        max_idle_loads: 1,
        ..CollectLimits::default()
    };

    let result = collect_links(&mut listing, limits).await;

    assert_eq!(result.loads, 1);
    assert!(result.links.is_empty());
    assert_eq!(result.stop, StopReason::NoNewLinks);
}

#[tokio::test]
async fn test_failed_query_stops_instead_of_idling() {
    let mut listing =
        ScriptedListing::loads(vec![vec!["a"], vec!["b"]]).push_error("card query failed");

    let result = collect_links(&mut listing, CollectLimits::default()).await;

    assert_eq!(result.loads, 3);
    assert_eq!(result.links, vec!["a", "b"]);
    assert_eq!(result.stop, StopReason::LoadFailed);
}
