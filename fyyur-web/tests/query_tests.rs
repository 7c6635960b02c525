//! Read-query tests against an in-memory database
//!
//! Each query receives `now` explicitly, so the upcoming/past boundary is
//! pinned by the test rather than the wall clock.

mod helpers;

use helpers::*;
use fyyur_web::query;
use std::collections::BTreeSet;

const NAMES: &[(&str, &str, &str)] = &[
    ("The Musical Hop", "San Francisco", "CA"),
    ("The Dueling Pianos Bar", "New York", "NY"),
    ("Park Square Live Music & Coffee", "San Francisco", "CA"),
    ("100% Blues", "Austin", "TX"),
    ("Under_Score Lounge", "Austin", "TX"),
    ("Hop Scotch", "Brooklyn", "NY"),
    ("Éclair Hall", "Austin", "TX"),
    ("Straße Club", "New York", "NY"),
];

fn folded(value: &str) -> String {
    value.to_uppercase().to_lowercase()
}

#[tokio::test]
async fn test_grouping_covers_every_venue_once() {
    let pool = setup_test_db().await;
    let mut ids = Vec::new();
    for (name, city, state) in NAMES {
        ids.push(seed_venue(&pool, name, city, state).await);
    }

    let areas = query::list_venue_areas(&pool, ts("2030-01-01 00:00:00")).await.unwrap();

    let flattened: Vec<i64> = areas
        .iter()
        .flat_map(|area| area.venues.iter().map(|v| v.id))
        .collect();
    let mut sorted = flattened.clone();
    sorted.sort();
    assert_eq!(sorted, ids);

    // Each (state, city) pair forms exactly one group
    let keys: BTreeSet<(String, String)> = areas
        .iter()
        .map(|a| (a.state.clone(), a.city.clone()))
        .collect();
    assert_eq!(keys.len(), areas.len());
    assert_eq!(areas.len(), 5);
}

#[tokio::test]
async fn test_search_matches_iff_substring() {
    let pool = setup_test_db().await;
    for (name, city, state) in NAMES {
        seed_venue(&pool, name, city, state).await;
    }
    let now = ts("2030-01-01 00:00:00");

    let terms = [
        "hop", "HOP", "Music", "%", "_", "e", "zzz", " Bar", "éclair", "ÉCLAIR", "STRASSE", "straße",
    ];
    for term in terms {
        let results = query::search_venues(&pool, term, now).await.unwrap();
        let found: BTreeSet<&str> = results.data.iter().map(|h| h.name.as_str()).collect();
        let expected: BTreeSet<&str> = NAMES
            .iter()
            .map(|(name, _, _)| *name)
            .filter(|name| folded(name).contains(&folded(term)))
            .collect();
        assert_eq!(found, expected, "term {:?}", term);
        assert_eq!(results.count, expected.len());
    }

    let everything = query::search_venues(&pool, "", now).await.unwrap();
    assert_eq!(everything.count, NAMES.len());
}

#[tokio::test]
async fn test_search_counts_upcoming_shows() {
    let pool = setup_test_db().await;
    let venue = seed_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    let artist = seed_artist(&pool, "Guns N Petals").await;
    seed_show(&pool, venue, artist, "2030-01-01 00:00:00").await;
    seed_show(&pool, venue, artist, "2030-01-01 00:00:01").await;

    let results = query::search_venues(&pool, "hop", ts("2030-01-01 00:00:00")).await.unwrap();
    assert_eq!(results.data[0].num_upcoming_shows, 1);

    let results = query::search_artists(&pool, "petals", ts("2029-12-31 23:59:59")).await.unwrap();
    assert_eq!(results.data[0].num_upcoming_shows, 2);
}

#[tokio::test]
async fn test_every_show_is_past_or_upcoming_once() {
    let pool = setup_test_db().await;
    let venue = seed_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    let artist = seed_artist(&pool, "The Wild Sax Band").await;
    for start in [
        "2029-12-31 23:59:59",
        "2030-01-01 00:00:00",
        "2030-01-01 00:00:01",
        "2031-06-15 20:00:00",
    ] {
        seed_show(&pool, venue, artist, start).await;
    }
    let now = ts("2030-01-01 00:00:00");

    let detail = query::venue_detail(&pool, venue, now).await.unwrap().unwrap();
    assert_eq!(detail.past_shows_count, 2);
    assert_eq!(detail.upcoming_shows_count, 2);
    assert_eq!(detail.past_shows.len() + detail.upcoming_shows.len(), 4);
    assert!(detail
        .past_shows
        .iter()
        .all(|s| s.start_time.as_str() <= "2030-01-01 00:00:00"));
    assert!(detail
        .upcoming_shows
        .iter()
        .all(|s| s.start_time.as_str() > "2030-01-01 00:00:00"));

    let detail = query::artist_detail(&pool, artist, now).await.unwrap().unwrap();
    assert_eq!(detail.past_shows_count, 2);
    assert_eq!(detail.upcoming_shows_count, 2);
}

#[tokio::test]
async fn test_detail_is_stable_without_mutation() {
    let pool = setup_test_db().await;
    let venue = seed_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    let artist = seed_artist(&pool, "Guns N Petals").await;
    seed_show(&pool, venue, artist, "2019-05-21 21:30:00").await;
    seed_show(&pool, venue, artist, "2035-04-01 20:00:00").await;
    let now = ts("2030-01-01 00:00:00");

    let first = query::venue_detail(&pool, venue, now).await.unwrap();
    let second = query::venue_detail(&pool, venue, now).await.unwrap();
    assert_eq!(first, second);

    let first = query::artist_detail(&pool, artist, now).await.unwrap();
    let second = query::artist_detail(&pool, artist, now).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_detail_for_missing_record_is_none() {
    let pool = setup_test_db().await;
    let now = ts("2030-01-01 00:00:00");

    assert!(query::venue_detail(&pool, 5, now).await.unwrap().is_none());
    assert!(query::artist_detail(&pool, 5, now).await.unwrap().is_none());
}

#[tokio::test]
async fn test_show_listing_resolves_names() {
    let pool = setup_test_db().await;
    let hop = seed_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    let park = seed_venue(&pool, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let petals = seed_artist(&pool, "Guns N Petals").await;
    let sax = seed_artist(&pool, "The Wild Sax Band").await;
    seed_show(&pool, park, sax, "2035-04-01 20:00:00").await;
    seed_show(&pool, hop, petals, "2019-05-21 21:30:00").await;

    let shows = query::list_shows(&pool).await.unwrap();
    assert_eq!(shows.len(), 2);

    assert_eq!(shows[0].venue_name, "The Musical Hop");
    assert_eq!(shows[0].artist_name, "Guns N Petals");
    assert_eq!(shows[0].start_time, "Tue 05, 21, 2019 9:30PM");

    assert_eq!(shows[1].venue_id, park);
    assert_eq!(shows[1].artist_id, sax);
    assert_eq!(shows[1].start_time, "Sun 04, 01, 2035 8:00PM");
}

#[tokio::test]
async fn test_artist_listing_is_flat() {
    let pool = setup_test_db().await;
    seed_artist(&pool, "Guns N Petals").await;
    seed_artist(&pool, "Matt Quevedo").await;

    let artists = query::list_artists(&pool).await.unwrap();
    let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo"]);
}
