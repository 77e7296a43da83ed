use std::time::{Duration, Instant};
use tunnelhub::probe::{HealthProbe, ReqwestProber};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn reachable_backend_reports_its_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let prober = ReqwestProber::new();
    let outcome = prober.probe(&server.uri(), Duration::from_millis(3500)).await;

    assert!(outcome.ok);
    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.url, server.uri());
}

#[tokio::test]
async fn non_success_status_is_not_ok_but_keeps_the_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let prober = ReqwestProber::new();
    let outcome = prober.probe(&server.uri(), Duration::from_millis(3500)).await;

    assert!(!outcome.ok);
    assert_eq!(outcome.status, 503);
}

#[tokio::test]
async fn trailing_slashes_are_stripped_before_probing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let prober = ReqwestProber::new();
    let base = format!("{}///", server.uri());
    let outcome = prober.probe(&base, Duration::from_millis(3500)).await;

    assert!(outcome.ok);
    assert_eq!(outcome.url, server.uri());
}

#[tokio::test]
async fn probe_requests_disable_caching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("cache-control", "no-store"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let prober = ReqwestProber::new();
    let outcome = prober.probe(&server.uri(), Duration::from_millis(3500)).await;

    assert!(outcome.ok);
}

#[tokio::test]
async fn slow_backend_is_cut_off_by_the_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let prober = ReqwestProber::new();
    let started = Instant::now();
    let outcome = prober.probe(&server.uri(), Duration::from_millis(100)).await;
    let elapsed = started.elapsed();

    assert!(!outcome.ok);
    assert_eq!(outcome.status, 0);
    assert!(elapsed < Duration::from_secs(2), "deadline did not bound the probe: {elapsed:?}");
}

#[tokio::test]
async fn unreachable_backend_reports_status_zero() {
    let prober = ReqwestProber::new();
    let outcome = prober
        .probe("http://127.0.0.1:9", Duration::from_millis(1000))
        .await;

    assert!(!outcome.ok);
    assert_eq!(outcome.status, 0);
    assert_eq!(outcome.url, "http://127.0.0.1:9");
}
