#![cfg(feature = "reqwest")]

// std
use std::time::{Duration, Instant};
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use crpt_client::{
	client::CrptClient,
	document::{Description, Document, Product},
	error::Error,
	limit::{RateLimit, TimeUnit},
	url::Url,
};

const DOCUMENTS_PATH: &str = "/api/v3/lk/documents/create";

fn per_second(requests: u32) -> RateLimit {
	RateLimit::per(TimeUnit::Second, requests).expect("Rate limit should be valid for tests.")
}

fn build_client(server: &MockServer, limit: RateLimit) -> CrptClient<crpt_client::http::ReqwestTransport> {
	CrptClient::new(limit)
		.expect("Client should build with the default reqwest transport.")
		.with_endpoint(
			Url::parse(&server.url(DOCUMENTS_PATH))
				.expect("Mock registration endpoint should parse successfully."),
		)
}

fn sample_document() -> Document {
	Document {
		description: Some(Description { participant_inn: Some("771122334455".into()) }),
		doc_id: Some("doc-it-1".into()),
		doc_status: Some("DRAFT".into()),
		doc_type: Some("LP_INTRODUCE_GOODS".into()),
		import_request: false,
		owner_inn: Some("7700000000".into()),
		participant_inn: Some("771122334455".into()),
		producer_inn: Some("7800000000".into()),
		production_date: Some("2020-01-23".into()),
		production_type: Some("OWN_PRODUCTION".into()),
		products: vec![Product {
			tnved_code: Some("6401".into()),
			uit_code: Some("uit-1".into()),
			..Product::default()
		}],
		reg_date: Some("2020-01-23".into()),
		reg_number: None,
	}
}

#[tokio::test]
async fn create_document_posts_signed_snake_case_payload() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(DOCUMENTS_PATH)
				.header("content-type", "application/json")
				.header("Signature", "detached-sig")
				.json_body(json!({
					"description": { "participant_inn": "771122334455" },
					"doc_id": "doc-it-1",
					"doc_status": "DRAFT",
					"doc_type": "LP_INTRODUCE_GOODS",
					"import_request": false,
					"owner_inn": "7700000000",
					"participant_inn": "771122334455",
					"producer_inn": "7800000000",
					"production_date": "2020-01-23",
					"production_type": "OWN_PRODUCTION",
					"products": [{
						"certificate_document": null,
						"certificate_document_date": null,
						"certificate_document_number": null,
						"owner_inn": null,
						"producer_inn": null,
						"production_date": null,
						"tnved_code": "6401",
						"uit_code": "uit-1",
						"uitu_code": null,
					}],
					"reg_date": "2020-01-23",
					"reg_number": null,
				}));
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"value":"registered"}"#);
		})
		.await;
	let client = build_client(&server, per_second(10));
	let receipt = client
		.create_document(&sample_document(), "detached-sig")
		.await
		.expect("Submission against a 200 endpoint should succeed.");

	assert_eq!(receipt.status, 200);
	assert_eq!(receipt.body, br#"{"value":"registered"}"#);

	mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_maps_to_rejected_with_retry_hint() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(DOCUMENTS_PATH);
			then.status(429).header("retry-after", "30").body("too many documents");
		})
		.await;
	let client = build_client(&server, per_second(10));
	let err = client
		.create_document(&sample_document(), "detached-sig")
		.await
		.expect_err("Submission against a 429 endpoint should fail.");

	assert!(matches!(
		err,
		Error::Rejected {
			status: 429,
			retry_after: Some(hint),
			ref body,
		} if hint == Duration::from_secs(30) && body == "too many documents",
	));
}

#[tokio::test]
async fn unreachable_endpoint_maps_to_transport_error() {
	let client = CrptClient::new(per_second(10))
		.expect("Client should build with the default reqwest transport.")
		.with_endpoint(
			Url::parse("http://127.0.0.1:9/api/v3/lk/documents/create")
				.expect("Unreachable endpoint URL should parse."),
		);
	let err = client
		.create_document(&sample_document(), "detached-sig")
		.await
		.expect_err("Submission against a closed port should fail.");

	assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn limiter_throttles_consecutive_submissions() {
	let window = Duration::from_millis(300);
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(DOCUMENTS_PATH);
			then.status(200).body("{}");
		})
		.await;
	let limit = RateLimit::per_window(window, 2).expect("Rate limit should be valid for tests.");
	let client = build_client(&server, limit);
	let start = Instant::now();

	for _ in 0..3 {
		client
			.create_document(&sample_document(), "detached-sig")
			.await
			.expect("Throttled submission should still succeed.");
	}

	// The third submission cannot leave before the first window rolls over.
	assert!(start.elapsed() >= window - Duration::from_millis(50));

	mock.assert_calls_async(3).await;
}
