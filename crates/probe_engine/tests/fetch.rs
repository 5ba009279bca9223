use pretty_assertions::assert_eq;
use probe_core::{CaptureMode, FailureStage};
use probe_engine::{capture_target, decode_content, encode_content, FetchSettings, ReqwestFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn cache_bypass_capture_round_trips_body_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("hello", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::for_mode(CaptureMode::CacheBypass));
    let url = format!("{}/doc", server.uri());

    let outcome = capture_target(&fetcher, CaptureMode::CacheBypass, &url).await;
    match outcome {
        probe_engine::FetchOutcome::Success {
            url: reported,
            content,
            duration_ms,
            http_status,
        } => {
            assert_eq!(reported, url);
            assert_eq!(http_status, Some(200));
            assert!(duration_ms >= 0.0);
            assert_eq!(decode_content(&content).unwrap(), b"hello");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn credentialed_capture_omits_status_and_keeps_raw_bytes() {
    let server = MockServer::start().await;
    let body: Vec<u8> = (0u8..=255).collect();
    Mock::given(method("GET"))
        .and(path("/blob"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.clone(), "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::for_mode(CaptureMode::Credentialed));
    let url = format!("{}/blob", server.uri());

    let outcome = capture_target(&fetcher, CaptureMode::Credentialed, &url).await;
    match outcome {
        probe_engine::FetchOutcome::Success {
            content,
            http_status,
            ..
        } => {
            assert_eq!(http_status, None);
            // Lossless round-trip for arbitrary byte content.
            assert_eq!(decode_content(&content).unwrap(), body);
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_is_a_captured_result_not_a_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("gone", "text/plain; charset=utf-8"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::for_mode(CaptureMode::CacheBypass));
    let url = format!("{}/missing", server.uri());

    let outcome = capture_target(&fetcher, CaptureMode::CacheBypass, &url).await;
    match outcome {
        probe_engine::FetchOutcome::Success {
            content,
            http_status,
            ..
        } => {
            assert_eq!(http_status, Some(404));
            assert_eq!(decode_content(&content).unwrap(), b"gone");
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_target_fails_at_url_fetch() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = "http://127.0.0.1:1/";

    let outcome = capture_target(&fetcher, CaptureMode::Credentialed, url).await;
    match outcome {
        probe_engine::FetchOutcome::Failure {
            url: reported,
            stage,
            message,
            ..
        } => {
            assert_eq!(reported.as_deref(), Some(url));
            assert_eq!(stage, FailureStage::UrlFetch);
            assert!(!message.is_empty());
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn unparsable_target_fails_at_url_fetch() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default());

    let outcome = capture_target(&fetcher, CaptureMode::Credentialed, "not a url").await;
    match outcome {
        probe_engine::FetchOutcome::Failure { stage, .. } => {
            assert_eq!(stage, FailureStage::UrlFetch);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn legacy_charset_is_normalized_to_utf8() {
    let server = MockServer::start().await;
    // "café" in ISO-8859-1.
    Mock::given(method("GET"))
        .and(path("/latin"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            vec![b'c', b'a', b'f', 0xE9],
            "text/html; charset=iso-8859-1",
        ))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::for_mode(CaptureMode::CacheBypass));
    let url = format!("{}/latin", server.uri());

    let outcome = capture_target(&fetcher, CaptureMode::CacheBypass, &url).await;
    match outcome {
        probe_engine::FetchOutcome::Success { content, .. } => {
            assert_eq!(decode_content(&content).unwrap(), "café".as_bytes());
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_fails_at_text_decoding() {
    let server = MockServer::start().await;
    // UTF-8 BOM followed by an invalid sequence forces a decode error.
    Mock::given(method("GET"))
        .and(path("/junk"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            vec![0xEF, 0xBB, 0xBF, 0xFF, 0xFE],
            "application/octet-stream",
        ))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::for_mode(CaptureMode::CacheBypass));
    let url = format!("{}/junk", server.uri());

    let outcome = capture_target(&fetcher, CaptureMode::CacheBypass, &url).await;
    match outcome {
        probe_engine::FetchOutcome::Failure {
            url: reported,
            stage,
            ..
        } => {
            assert_eq!(reported.as_deref(), Some(url.as_str()));
            assert_eq!(stage, FailureStage::TextDecoding);
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn transport_encoding_is_lossless_for_arbitrary_bytes() {
    let all_bytes: Vec<u8> = (0u8..=255).cycle().take(1024).collect();
    assert_eq!(decode_content(&encode_content(&all_bytes)).unwrap(), all_bytes);
    assert_eq!(decode_content(&encode_content(b"")).unwrap(), b"");
    assert_eq!(
        decode_content(&encode_content("héllo wörld".as_bytes())).unwrap(),
        "héllo wörld".as_bytes()
    );
}
