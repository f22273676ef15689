//! Submission orchestration: admission control, payload serialization, transport dispatch,
//! and outcome classification.

// self
use crate::{
	_prelude::*,
	document::Document,
	http::{DocumentTransport, WireRequest},
	limit::{RateLimit, RateLimiter},
	obs::{self, CallOutcome, CallSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Production registration endpoint for introduce-goods documents.
pub const DEFAULT_ENDPOINT: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

/// Successful registration outcome.
#[derive(Clone, Debug)]
pub struct SubmitReceipt {
	/// HTTP status code returned by the endpoint (always 2xx).
	pub status: u16,
	/// Raw response body as returned by the endpoint.
	pub body: Vec<u8>,
}

/// Rate-limited client for the registration endpoint.
///
/// The client owns the transport, the endpoint, and a [`RateLimiter`] sized for one
/// configured budget. Cloning is cheap and every clone shares the same limiter, so a
/// cloned client never lets the process exceed the configured rate. Independent budgets
/// require independent clients.
pub struct CrptClient<T>
where
	T: ?Sized + DocumentTransport,
{
	/// Transport used for every outbound registration request.
	transport: Arc<T>,
	/// Admission gate shared by all clones of this client.
	limiter: Arc<RateLimiter>,
	/// Target endpoint.
	endpoint: Url,
}
impl<T> CrptClient<T>
where
	T: ?Sized + DocumentTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	///
	/// The client points at [`DEFAULT_ENDPOINT`]; use [`CrptClient::with_endpoint`] to
	/// override it for staging or test deployments.
	pub fn with_transport(limit: RateLimit, transport: impl Into<Arc<T>>) -> Result<Self> {
		let endpoint = Url::parse(DEFAULT_ENDPOINT).map_err(crate::error::ConfigError::from)?;

		Ok(Self { transport: transport.into(), limiter: Arc::new(RateLimiter::new(limit)), endpoint })
	}

	/// Sets or replaces the registration endpoint.
	pub fn with_endpoint(mut self, endpoint: Url) -> Self {
		self.endpoint = endpoint;

		self
	}

	/// Returns the endpoint this client submits to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Returns the admission gate shared by all clones of this client.
	pub fn limiter(&self) -> &RateLimiter {
		&self.limiter
	}

	/// Submits one introduce-goods document under admission control.
	///
	/// Waits on the shared [`RateLimiter`] first—possibly suspending until the current
	/// rate window rolls over—then serializes the document, attaches `signature` as the
	/// `Signature` header, and performs a single POST. The network call happens outside
	/// the limiter's lock, so a slow endpoint never delays other callers' admissions.
	///
	/// A 2xx status yields a [`SubmitReceipt`]; any other status yields
	/// [`Error::Rejected`] carrying the status and body; transport failures surface as
	/// [`Error::Transport`]. Nothing is retried here. Dropping the returned future while
	/// it waits for admission cancels the wait without consuming a rate slot.
	pub async fn create_document(
		&self,
		document: &Document,
		signature: &str,
	) -> Result<SubmitReceipt> {
		let span = CallSpan::new("create_document");

		obs::record_call_outcome(CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.limiter.acquire().await;

				let request = WireRequest {
					endpoint: self.endpoint.clone(),
					body: serde_json::to_vec(document)?,
					signature: signature.to_owned(),
				};
				let response = self.transport.execute(request).await?;

				if response.is_success() {
					Ok(SubmitReceipt { status: response.status, body: response.body })
				} else {
					Err(Error::Rejected {
						status: response.status,
						retry_after: response.retry_after,
						body: String::from_utf8_lossy(&response.body).into_owned(),
					})
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(CallOutcome::Success),
			Err(Error::Rejected { .. }) => obs::record_call_outcome(CallOutcome::Rejected),
			Err(_) => obs::record_call_outcome(CallOutcome::Failure),
		}

		result
	}
}
#[cfg(feature = "reqwest")]
impl CrptClient<ReqwestTransport> {
	/// Creates a client backed by the crate's default reqwest transport.
	pub fn new(limit: RateLimit) -> Result<Self> {
		Self::with_transport(limit, ReqwestTransport::default())
	}
}
impl<T> Clone for CrptClient<T>
where
	T: ?Sized + DocumentTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: Arc::clone(&self.transport),
			limiter: Arc::clone(&self.limiter),
			endpoint: self.endpoint.clone(),
		}
	}
}
impl<T> Debug for CrptClient<T>
where
	T: ?Sized + DocumentTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CrptClient")
			.field("endpoint", &self.endpoint.as_str())
			.field("requests", &self.limiter.requests())
			.field("window", &self.limiter.window())
			.finish()
	}
}
