use std::time::{Duration, Instant};

use omnibox::core::matcher;
use omnibox::core::MAX_ENTRIES;
use omnibox::search::Generation;
use omnibox::services::domain;
use omnibox::{AcController, Config, MemoryProfile, Profile, ProfileEvent, QueryRequest, RawRow, TldTable};

/// Answers nothing on its own; the test plays the data source.
#[derive(Default)]
struct ScriptedProfile {
    requests: Vec<QueryRequest>,
}

impl Profile for ScriptedProfile {
    fn query(&mut self, request: QueryRequest) {
        self.requests.push(request);
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn row(url: &str, title: &str) -> RawRow {
    RawRow::new(url, title, 0)
}

#[test]
fn test_completes_overlapping_suffix() {
    let tlds: TldTable = [(".com", 10), (".co.uk", 3)].into_iter().collect();
    let completion = domain::complete("exampl.co", &tlds);
    assert_eq!(completion.text, "exampl.com");
    assert_eq!(completion.url, "http://exampl.com/");
}

#[test]
fn test_completion_echoes_without_suffixes() {
    let completion = domain::complete("foo", &TldTable::new());
    assert_eq!((completion.text.as_str(), completion.url.as_str()), ("foo", "foo"));
}

#[test]
fn test_completion_echoes_non_host_text() {
    let tlds: TldTable = [(".com", 1)].into_iter().collect();
    let completion = domain::complete("foo bar", &tlds);
    assert_eq!((completion.text.as_str(), completion.url.as_str()), ("foo bar", "foo bar"));
}

#[test]
fn test_completion_is_pure() {
    let tlds: TldTable = [(".com", 10), (".org", 10), (".co.uk", 3)].into_iter().collect();
    for text in ["example", "bbc.co", "x.o", "", "a..b"] {
        assert_eq!(domain::complete(text, &tlds), domain::complete(text, &tlds));
    }
}

#[test]
fn test_matcher_span_slices_to_needle() {
    let cases = [
        ("Hello World", "WORLD"),
        ("http://ÉCOLE.fr/", "école"),
        ("aaa", "aa"),
        ("Rust - rust", "rust"),
    ];
    for (haystack, needle) in cases {
        let span = matcher::find(haystack, needle).unwrap();
        assert_eq!(
            matcher::slice_span(haystack, span).to_lowercase(),
            needle.to_lowercase()
        );
    }
    assert_eq!(matcher::find("anything", ""), Some((0, 0)));
}

#[test]
fn test_debounce_dispatches_last_text_once() {
    let start = Instant::now();
    let mut controller = AcController::new(ScriptedProfile::default());

    controller.set_search_text_at("ab", start);
    controller.set_search_text_at("abc", start + ms(10));

    assert!(!controller.poll(start + ms(100)));
    assert!(controller.poll(start + ms(110)));
    assert!(!controller.poll(start + ms(500)));

    let requests = &controller.profile().requests;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, "abc");
    assert_eq!(requests[0].pattern, "%abc%");
}

#[test]
fn test_stale_rows_never_reach_the_buffer() {
    let start = Instant::now();
    let mut controller = AcController::new(ScriptedProfile::default());
    controller.set_completion_enabled(false);

    controller.set_search_text_at("ab", start);
    controller.poll(start + ms(100));
    let stale: Generation = controller.profile().requests[0].generation;

    controller.set_search_text_at("abc", start + ms(120));
    controller.poll(start + ms(220));
    let current = controller.profile().requests[1].generation;
    assert_ne!(stale, current);

    controller.handle_event(ProfileEvent::Row {
        generation: stale,
        row: row("http://stale.ab/", "ab stale"),
    });
    controller.handle_event(ProfileEvent::Row {
        generation: current,
        row: row("http://fresh.abc/", "abc fresh"),
    });
    controller.handle_event(ProfileEvent::Row {
        generation: stale,
        row: row("http://late.ab/", "ab late"),
    });
    controller.handle_event(ProfileEvent::Done { generation: current });

    let urls: Vec<&str> = controller.entries().iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["http://fresh.abc/"]);
}

#[test]
fn test_buffer_never_exceeds_capacity() {
    let mut profile = MemoryProfile::new();
    for i in 0..40 {
        profile.add_visit(&format!("http://host{}.test/", i), "matching row", 0, i);
    }

    let mut controller = AcController::from_config(profile, &Config::default());
    controller.initialize().unwrap();
    controller.record_tld(".test", 1);
    controller.set_search_text("matching");
    controller.fire_timer();
    for event in controller.profile_mut().drain_events() {
        controller.handle_event(event);
        assert!(controller.entry_count() <= MAX_ENTRIES);
    }

    assert_eq!(controller.entry_count(), MAX_ENTRIES);
    // Completion row first, then the most visited rows
    assert_eq!(controller.entry_url(0), Some("http://matching.test/"));
    assert_eq!(controller.entry_url(1), Some("http://host39.test/"));
}

#[test]
fn test_clearing_text_empties_list() {
    let start = Instant::now();
    let mut profile = MemoryProfile::new();
    profile.add_visit("http://a.test/", "alpha", 0, 1);
    let mut controller = AcController::new(profile);
    controller.initialize().unwrap();

    controller.set_search_text_at("alp", start);
    controller.poll(start + ms(100));
    for event in controller.profile_mut().drain_events() {
        controller.handle_event(event);
    }
    controller.set_selection(0).unwrap();
    assert!(controller.entry_count() > 0);

    controller.set_search_text_at("", start + ms(200));
    controller.poll(start + ms(300));
    assert_eq!(controller.entry_count(), 0);
    assert_eq!(controller.selection(), -1);
    assert_eq!(controller.profile().requests().len(), 1);
}

#[test]
fn test_search_row_from_config() {
    let config = Config::from_toml_str(
        r#"
        [search_provider]
        name = "Example Search"
        url_template = "https://search.example/?q=%s"

        [suggested_tlds]
        ".com" = 2
        "#,
    )
    .unwrap();

    let mut controller = AcController::from_config(MemoryProfile::new(), &config);
    controller.initialize().unwrap();
    controller.set_search_text("rust lang");
    controller.fire_timer();

    let search = controller.entry(0).unwrap();
    assert_eq!(search.label, "Search for rust lang on Example Search");
    assert_eq!(search.url, "https://search.example/?q=rust%20lang");
    assert_eq!(search.matched_text(), Some("rust lang"));

    // Not host-like, so the "go to" row echoes the text
    let go_to = controller.entry(1).unwrap();
    assert_eq!(go_to.label, "Go to rust lang");
    assert_eq!(go_to.url, "rust lang");
}
