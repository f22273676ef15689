//! Transport seam between the submitter and the HTTP stack.
//!
//! [`DocumentTransport`] is the crate's only dependency on an HTTP client. The submitter
//! hands a fully-assembled [`WireRequest`] to the transport and classifies the returned
//! [`WireResponse`] by status code alone; transports stay free of registration semantics.
//! [`ReqwestTransport`] is the default implementation behind the `reqwest` feature, and
//! downstream crates can plug in their own stack by implementing the trait.

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{CONTENT_TYPE, HeaderMap, RETRY_AFTER};
// self
use crate::{_prelude::*, error::TransportError};

/// Name of the detached-signature header attached to every submission.
pub const SIGNATURE_HEADER: &str = "Signature";

/// Boxed future returned by [`DocumentTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<WireResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of delivering one registration request.
///
/// Implementations must be `Send + Sync` so one transport can serve arbitrarily many
/// concurrent submissions, and the returned future must be `Send` so callers can box
/// submission futures without losing executor portability. A transport performs exactly
/// one POST per call and never retries; retry policy belongs to the caller.
pub trait DocumentTransport
where
	Self: Send + Sync,
{
	/// Delivers the request and reports the raw response or a transport failure.
	fn execute(&self, request: WireRequest) -> TransportFuture<'_>;
}

/// One fully-assembled registration request.
#[derive(Clone, Debug)]
pub struct WireRequest {
	/// Target endpoint.
	pub endpoint: Url,
	/// Serialized JSON payload, sent as `application/json`.
	pub body: Vec<u8>,
	/// Opaque detached signature, sent as the [`SIGNATURE_HEADER`] header.
	pub signature: String,
}

/// Raw response observed by a transport.
#[derive(Clone, Debug)]
pub struct WireResponse {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration, if supplied.
	pub retry_after: Option<Duration>,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl WireResponse {
	/// Checks whether the status code signals success (2xx).
	pub const fn is_success(&self) -> bool {
		self.status >= 200 && self.status < 300
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Submissions do not follow redirects by policy of the underlying client; configure a
/// custom [`ReqwestClient`] via [`ReqwestTransport::with_client`] to adjust timeouts,
/// proxies, or TLS settings.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl DocumentTransport for ReqwestTransport {
	fn execute(&self, request: WireRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.post(request.endpoint)
				.header(CONTENT_TYPE, "application/json")
				.header(SIGNATURE_HEADER, request.signature)
				.body(request.body)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(WireResponse { status, retry_after, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();

	// The endpoint emits the delta-seconds form; the HTTP-date form is not honored.
	raw.parse::<u64>().ok().map(Duration::from_secs)
}
