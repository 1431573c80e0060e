//! End-to-end behavior of the search control against recording map hosts and
//! stub providers. Searches are dispatched on the tokio runtime exactly as in
//! an application and collected with `wait_for_results`.

use async_trait::async_trait;
use maplet_geosearch::{
    prelude::*,
    GeoSearchError,
};
use std::sync::Mutex;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Records every call the control makes on the map
#[derive(Debug, Default)]
struct RecordingHost {
    views: Vec<(LatLng, f64)>,
    added: Vec<LatLng>,
    moved: Vec<(MarkerId, LatLng)>,
    removed: Vec<MarkerId>,
}

impl MapHost for RecordingHost {
    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        self.views.push((center, zoom));
        Ok(())
    }

    fn add_marker(&mut self, position: LatLng) -> Result<MarkerId> {
        self.added.push(position);
        Ok(MarkerId(self.added.len() as u64))
    }

    fn set_marker_position(&mut self, marker: MarkerId, position: LatLng) -> Result<()> {
        self.moved.push((marker, position));
        Ok(())
    }

    fn remove_marker(&mut self, marker: MarkerId) -> Result<()> {
        self.removed.push(marker);
        Ok(())
    }
}

/// URL-template provider with a fixed URL and canned parse result
struct StubTemplate {
    results: Vec<SearchResult>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl UrlTemplateProvider for StubTemplate {
    fn name(&self) -> &str {
        "Stub"
    }

    fn build_query_url(&self, query: &str) -> Result<String> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok("https://geocoder.test/search?q=Paris".to_string())
    }

    fn parse_response(&self, body: serde_json::Value) -> Result<Vec<SearchResult>> {
        if body.get("broken").is_some() {
            return Err(GeoSearchError::Parse("broken payload".to_string()));
        }
        Ok(self.results.clone())
    }
}

/// Answers every GET with the same body, or fails
struct StubFetcher {
    body: Option<serde_json::Value>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    fn ok(body: serde_json::Value) -> Self {
        Self {
            body: Some(body),
            urls: Arc::default(),
        }
    }

    fn failing() -> Self {
        Self {
            body: None,
            urls: Arc::default(),
        }
    }
}

#[async_trait]
impl HttpFetch for StubFetcher {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        self.urls.lock().unwrap().push(url.to_string());
        self.body
            .clone()
            .ok_or_else(|| GeoSearchError::Provider("503 Service Unavailable".to_string()))
    }
}

/// Resolver whose answer time depends on the query
struct DelayedResolver;

#[async_trait]
impl Resolver for DelayedResolver {
    fn name(&self) -> &str {
        "Delayed"
    }

    async fn locate(&self, query: &str) -> Result<Vec<SearchResult>> {
        let (delay, result) = match query {
            "slow" => (300, SearchResult::new(10.0, 10.0, "slow")),
            _ => (10, SearchResult::new(20.0, 20.0, "fast")),
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(vec![result])
    }
}

fn paris() -> SearchResult {
    SearchResult::new(2.35, 48.85, "Paris, France")
}

fn template_control(
    results: Vec<SearchResult>,
    fetcher: StubFetcher,
    configure: impl FnOnce(GeoSearchConfig) -> GeoSearchConfig,
) -> SearchControl {
    let provider = Provider::url_template(StubTemplate {
        results,
        queries: Arc::default(),
    });
    SearchControl::with_fetcher(configure(GeoSearchConfig::new(provider)), Arc::new(fetcher))
}

fn type_and_submit(control: &mut SearchControl, query: &str) {
    control.handle_input(&InputEvent::ToggleClick).unwrap();
    control.handle_input(&InputEvent::text(query)).unwrap();
    control
        .handle_input(&InputEvent::key_press(KeyCode::Enter))
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_paris_centers_map_and_drops_marker() {
    let fetcher = StubFetcher::ok(serde_json::json!([]));
    let urls = Arc::clone(&fetcher.urls);
    let mut control = template_control(vec![paris()], fetcher, |c| {
        c.zoom_level(10).show_marker(true)
    });
    let mut host = RecordingHost::default();

    type_and_submit(&mut control, "Paris");
    assert!(control.is_searching());
    assert_eq!(control.view().icon, ControlIcon::Spinner);

    assert_eq!(control.wait_for_results(&mut host, TIMEOUT), 1);

    assert_eq!(host.views, vec![(LatLng::new(48.85, 2.35), 10.0)]);
    assert_eq!(host.added, vec![LatLng::new(48.85, 2.35)]);
    assert!(host.moved.is_empty());
    assert_eq!(*urls.lock().unwrap(), vec!["https://geocoder.test/search?q=Paris"]);

    assert_eq!(*control.state(), ControlState::Collapsed(Activity::Idle));
    assert_eq!(control.input(), "");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_empty_results_show_not_found() {
    let mut control = template_control(Vec::new(), StubFetcher::ok(serde_json::json!([])), |c| {
        c.zoom_level(10).not_found_message("Nothing here.")
    });
    let mut host = RecordingHost::default();

    type_and_submit(&mut control, "Paris");
    control.wait_for_results(&mut host, TIMEOUT);

    assert!(host.views.is_empty());
    assert!(host.added.is_empty());
    assert_eq!(control.error_message(), Some("Nothing here."));
    assert_eq!(control.view().message.as_deref(), Some("Nothing here."));
    assert_eq!(control.view().icon, ControlIcon::Alert);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failures_look_like_not_found() {
    let mut host = RecordingHost::default();

    let mut network = template_control(vec![paris()], StubFetcher::failing(), |c| c);
    type_and_submit(&mut network, "Paris");
    network.wait_for_results(&mut host, TIMEOUT);

    let mut malformed = template_control(
        vec![paris()],
        StubFetcher::ok(serde_json::json!({"broken": true})),
        |c| c,
    );
    type_and_submit(&mut malformed, "Paris");
    malformed.wait_for_results(&mut host, TIMEOUT);

    for control in [&network, &malformed] {
        assert_eq!(
            control.error_message(),
            Some("Sorry, that address could not be found.")
        );
    }
    assert!(host.views.is_empty());
    assert!(host.added.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_marker_is_created_once_then_moved() {
    let gazetteer = Gazetteer::new()
        .with_place(paris())
        .with_place(SearchResult::new(-0.12, 51.5, "London"));
    let mut control = SearchControl::new(GeoSearchConfig::new(Provider::resolver(gazetteer)));
    let mut host = RecordingHost::default();

    for query in ["Paris", "London", "Paris"] {
        type_and_submit(&mut control, query);
        control.wait_for_results(&mut host, TIMEOUT);
    }

    assert_eq!(host.added, vec![LatLng::new(48.85, 2.35)]);
    assert_eq!(
        host.moved,
        vec![
            (MarkerId(1), LatLng::new(51.5, -0.12)),
            (MarkerId(1), LatLng::new(48.85, 2.35)),
        ]
    );
    assert_eq!(host.views.len(), 3);
    assert!(host.views.iter().all(|(_, zoom)| *zoom == 17.0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_show_marker_false_never_creates_markers() {
    let mut control = template_control(
        vec![paris()],
        StubFetcher::ok(serde_json::json!([])),
        |c| c.show_marker(false),
    );
    let mut host = RecordingHost::default();

    for _ in 0..3 {
        type_and_submit(&mut control, "Paris");
        control.wait_for_results(&mut host, TIMEOUT);
    }

    assert_eq!(host.views.len(), 3);
    assert!(host.added.is_empty());
    assert!(host.moved.is_empty());
    assert_eq!(control.marker(), None);
}

#[test]
fn test_only_first_result_is_used() {
    let mut control = template_control(Vec::new(), StubFetcher::failing(), |c| c.zoom_level(5));
    let mut host = RecordingHost::default();

    control.on_results_received(
        vec![paris(), SearchResult::new(-95.55, 33.66, "Paris, Texas")],
        &mut host,
    );

    assert_eq!(host.views, vec![(LatLng::new(48.85, 2.35), 5.0)]);
    assert_eq!(host.added, vec![LatLng::new(48.85, 2.35)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_last_completion_wins_by_default() {
    let mut control = SearchControl::new(GeoSearchConfig::new(Provider::resolver(DelayedResolver)));
    let mut host = RecordingHost::default();

    control.submit("slow");
    control.submit("fast");
    assert_eq!(control.in_flight(), 2);
    assert_eq!(control.wait_for_results(&mut host, TIMEOUT), 2);

    let centers: Vec<LatLng> = host.views.iter().map(|(c, _)| *c).collect();
    assert_eq!(centers, vec![LatLng::new(20.0, 20.0), LatLng::new(10.0, 10.0)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stale_results_can_be_ignored() {
    let config = GeoSearchConfig::new(Provider::resolver(DelayedResolver)).ignore_stale_results(true);
    let mut control = SearchControl::new(config);
    let mut host = RecordingHost::default();

    assert_eq!(control.submit("slow"), Some(1));
    assert_eq!(control.submit("fast"), Some(2));
    assert_eq!(control.wait_for_results(&mut host, TIMEOUT), 2);

    assert_eq!(host.views, vec![(LatLng::new(20.0, 20.0), 17.0)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_update_applies_results_on_a_later_frame() {
    let mut control = SearchControl::new(GeoSearchConfig::new(Provider::resolver(DelayedResolver)));
    let mut host = RecordingHost::default();

    control.submit("fast");
    control.update(&mut host).unwrap();

    let deadline = Instant::now() + TIMEOUT;
    while control.in_flight() > 0 && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(5)).await;
        control.update(&mut host).unwrap();
    }

    assert_eq!(host.views, vec![(LatLng::new(20.0, 20.0), 17.0)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_escape_while_searching_resets_control() {
    let mut control = SearchControl::new(GeoSearchConfig::new(Provider::resolver(DelayedResolver)));
    type_and_submit(&mut control, "slow");
    assert_eq!(*control.state(), ControlState::Expanded(Activity::Searching));

    control
        .handle_input(&InputEvent::key_up(KeyCode::Escape))
        .unwrap();

    assert_eq!(*control.state(), ControlState::Collapsed(Activity::Idle));
    assert_eq!(control.input(), "");
    assert_eq!(control.view().icon, ControlIcon::Glass);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_removal_drops_in_flight_searches() {
    let mut control = SearchControl::new(GeoSearchConfig::new(Provider::resolver(DelayedResolver)));
    let mut host = RecordingHost::default();
    control.on_add(&mut host).unwrap();

    control.submit("slow");
    control.on_remove(&mut host).unwrap();
    assert_eq!(control.in_flight(), 0);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(control.poll_results(&mut host), 0);
    assert!(host.views.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_headless_map_with_coordinates() {
    let config = GeoSearchConfig::from_json(
        r#"{"provider": {"type": "coordinates"}, "zoomLevel": 9}"#,
    )
    .unwrap();
    let mut control = SearchControl::new(config);
    let mut map = HeadlessMap::default();

    type_and_submit(&mut control, "35.6762, 139.6503");
    control.wait_for_results(&mut map, TIMEOUT);

    assert_eq!(map.center(), LatLng::new(35.6762, 139.6503));
    assert_eq!(map.zoom(), 9.0);
    assert_eq!(map.marker_count(), 1);
    assert_eq!(TextRenderer.render(&control.view()), "[🔍]");
}
