use std::sync::Arc;
use std::time::Duration;

use super::mock::{MockPageFetcher, MockSearchProvider};
use super::*;

fn hit(url: &str, snippet: &str) -> SearchHit {
    SearchHit {
        url: url.to_string(),
        title: format!("title of {url}"),
        snippet: snippet.to_string(),
    }
}

fn corroborator(
    search: Arc<MockSearchProvider>,
    fetcher: Arc<MockPageFetcher>,
) -> WebCorroborator {
    let config = CorroboratorConfig {
        fetch_timeout: Duration::from_millis(200),
        ..CorroboratorConfig::default()
    };
    WebCorroborator::new(search, fetcher, config)
}

const LONG_TEXT: &str = "The quick brown fox jumps over the lazy dog while seventeen \
    astonished zoologists record every single movement for their annual report. \
    Meanwhile the dog dreams of chasing rabbits across wide open meadows under a summer sky.";

#[test]
fn test_page_text_strips_markup() {
    let html = "<html><body><h1>Heading</h1>\
        <p>The quick brown fox jumps over the lazy dog.</p></body></html>";
    let text = super::client::page_text(html);

    assert!(text.contains("Heading"));
    assert!(text.contains("The quick brown fox jumps over the lazy dog."));
    assert!(!text.contains("<p>"));
}

#[test]
fn test_page_text_of_markup_only_page_scores_zero() {
    let text = super::client::page_text("<script>var x = 1;</script>");
    assert_eq!(containment(LONG_TEXT, text.trim()), 0.0);
}

#[test]
fn test_containment_identity() {
    let text = "some reference text with several words";
    assert_eq!(containment(text, text), 1.0);
}

#[test]
fn test_containment_bounds_and_empty() {
    assert_eq!(containment("a b c", ""), 0.0);
    assert_eq!(containment("", "anything"), 0.0);
    let partial = containment("alpha beta gamma delta", "alpha beta unrelated");
    assert!(partial > 0.0 && partial < 1.0);
    assert_eq!(partial, 0.5);
}

#[test]
fn test_containment_is_case_and_order_insensitive() {
    assert_eq!(containment("Alpha Beta", "beta ALPHA trailing"), 1.0);
}

#[test]
fn test_queries_prefer_two_longest_sentences() {
    let text = "Short one. \
        This sentence contains exactly enough words to qualify as a long query sentence for the generator, comfortably. \
        This sentence is even longer than the previous one because it keeps adding words until it is clearly the single longest sentence in the entire document text.";
    let queries = generate_queries(text);
    assert_eq!(queries.len(), 2);
    // Longest first.
    assert!(queries[0].starts_with("This sentence is even longer"));
    assert!(queries[1].starts_with("This sentence contains exactly"));
    for q in &queries {
        assert!(q.split_whitespace().count() <= 25);
    }
}

#[test]
fn test_query_fallback_first_25_words() {
    let text = "one two three four five six seven eight nine ten eleven twelve thirteen \
        fourteen fifteen sixteen seventeen eighteen nineteen twenty twentyone twentytwo \
        twentythree twentyfour twentyfive twentysix twentyseven";
    let queries = generate_queries(text);
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].split_whitespace().count(), 25);
}

#[test]
fn test_query_fallback_first_150_chars() {
    let queries = generate_queries("just a few words");
    assert_eq!(queries, vec!["just a few words".to_string()]);
}

#[tokio::test]
async fn test_short_text_skips_corroboration() {
    let c = corroborator(
        Arc::new(MockSearchProvider::new()),
        Arc::new(MockPageFetcher::new()),
    );
    assert!(c.corroborate("too short").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_failure_degrades_to_empty() {
    let search = Arc::new(MockSearchProvider::new());
    search.fail_requests();
    let c = corroborator(search, Arc::new(MockPageFetcher::new()));

    assert!(c.corroborate(LONG_TEXT).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_dominant_source_returned_alone() {
    let search = Arc::new(MockSearchProvider::new());
    search.script_hits(vec![
        hit("https://a.example/post", "snippet a"),
        hit("https://b.example/post", "snippet b"),
    ]);

    let fetcher = Arc::new(MockPageFetcher::new());
    // Page A contains the full text (containment 1.0), page B only a little.
    fetcher.script_page("https://a.example/post", LONG_TEXT);
    fetcher.script_page("https://b.example/post", "the quick brown fox");

    let c = corroborator(search, fetcher);
    let sources = c.corroborate(LONG_TEXT).await.unwrap();

    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].url, "https://a.example/post");
    assert_eq!(sources[0].similarity_percent, 100.0);
}

#[tokio::test]
async fn test_top_two_sources_sorted_descending() {
    let search = Arc::new(MockSearchProvider::new());
    search.script_hits(vec![
        hit("https://a.example", "a"),
        hit("https://b.example", "b"),
        hit("https://c.example", "c"),
    ]);

    let fetcher = Arc::new(MockPageFetcher::new());
    // Around half / a third / a quarter of the original words; none dominant.
    let words: Vec<&str> = LONG_TEXT.split_whitespace().collect();
    fetcher.script_page("https://a.example", words[..words.len() / 2].join(" "));
    fetcher.script_page("https://b.example", words[..words.len() / 3].join(" "));
    fetcher.script_page("https://c.example", words[..words.len() / 4].join(" "));

    let c = corroborator(search, fetcher);
    let sources = c.corroborate(LONG_TEXT).await.unwrap();

    assert_eq!(sources.len(), 2);
    assert!(sources[0].similarity_percent >= sources[1].similarity_percent);
    assert_eq!(sources[0].url, "https://a.example");
}

#[tokio::test]
async fn test_failed_fetch_falls_back_to_snippet() {
    let search = Arc::new(MockSearchProvider::new());
    // Snippet carries most of the original words; the fetch will fail.
    search.script_hits(vec![hit("https://gone.example", LONG_TEXT)]);

    let c = corroborator(search, Arc::new(MockPageFetcher::new()));
    let sources = c.corroborate(LONG_TEXT).await.unwrap();

    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].similarity_percent, 100.0);
}

#[tokio::test]
async fn test_low_containment_sources_rejected() {
    let search = Arc::new(MockSearchProvider::new());
    search.script_hits(vec![hit("https://unrelated.example", "")]);

    let fetcher = Arc::new(MockPageFetcher::new());
    fetcher.script_page("https://unrelated.example", "completely different topic entirely");

    let c = corroborator(search, fetcher);
    assert!(c.corroborate(LONG_TEXT).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_urls_deduplicated_across_queries() {
    let search = Arc::new(MockSearchProvider::new());
    // Same hits returned for both generated queries.
    search.script_hits(vec![hit("https://dup.example", "snippet")]);

    let fetcher = Arc::new(MockPageFetcher::new());
    fetcher.script_page("https://dup.example", LONG_TEXT);

    let c = corroborator(search, fetcher);
    let sources = c.corroborate(LONG_TEXT).await.unwrap();

    assert_eq!(sources.len(), 1);
}
