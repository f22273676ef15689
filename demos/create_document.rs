//! Demonstrates submitting an introduce-goods document through the rate-limited client,
//! pointed at a local mock of the registration endpoint.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use crpt_client::{
	client::CrptClient,
	document::{Description, Document, Product},
	limit::{RateLimit, TimeUnit},
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v3/lk/documents/create");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"value":"registered"}"#);
		})
		.await;
	let client = CrptClient::new(RateLimit::per(TimeUnit::Second, 5)?)?
		.with_endpoint(Url::parse(&server.url("/api/v3/lk/documents/create"))?);
	let document = Document {
		description: Some(Description { participant_inn: Some("771122334455".into()) }),
		doc_id: Some("demo-doc-1".into()),
		doc_type: Some("LP_INTRODUCE_GOODS".into()),
		owner_inn: Some("7700000000".into()),
		producer_inn: Some("7800000000".into()),
		production_date: Some("2020-01-23".into()),
		products: vec![Product { tnved_code: Some("6401".into()), ..Product::default() }],
		..Document::default()
	};

	// The sixth submission in the same second waits for the window to roll over.
	for i in 0..6 {
		let receipt = client.create_document(&document, "demo-signature").await?;

		println!("submission {i} accepted with status {}", receipt.status);
	}

	Ok(())
}
