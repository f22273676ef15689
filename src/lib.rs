//! Rate-limited client for the CRPT product-marking registration API—fixed-window admission
//! control, pluggable transports, and transport-aware observability in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod client;
pub mod document;
pub mod error;
pub mod http;
pub mod limit;
pub mod obs;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// crates.io
	use parking_lot::Mutex;
	// self
	use crate::{
		client::CrptClient,
		http::{DocumentTransport, TransportFuture, WireRequest, WireResponse},
		limit::RateLimit,
	};

	/// Client type alias used by recording-transport tests.
	pub type RecordingTestClient = CrptClient<RecordingTransport>;

	/// Transport double that records every wire request and answers with a canned response.
	#[derive(Debug)]
	pub struct RecordingTransport {
		requests: Mutex<Vec<WireRequest>>,
		response: WireResponse,
	}
	impl RecordingTransport {
		/// Creates a transport that always answers with the given status and body.
		pub fn respond_with(status: u16, body: &[u8]) -> Arc<Self> {
			Arc::new(Self {
				requests: Mutex::new(Vec::new()),
				response: WireResponse { status, retry_after: None, body: body.to_vec() },
			})
		}

		/// Returns a snapshot of the wire requests observed so far.
		pub fn requests(&self) -> Vec<WireRequest> {
			self.requests.lock().clone()
		}
	}
	impl DocumentTransport for RecordingTransport {
		fn execute(&self, request: WireRequest) -> TransportFuture<'_> {
			self.requests.lock().push(request);

			let response = self.response.clone();

			Box::pin(async move { Ok(response) })
		}
	}

	/// Constructs a [`CrptClient`] wired to the provided recording transport.
	pub fn build_recording_client(
		limit: RateLimit,
		transport: Arc<RecordingTransport>,
	) -> RecordingTestClient {
		CrptClient::with_transport(limit, transport)
			.expect("Failed to build recording client for tests.")
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
#[cfg(not(any(test, feature = "test")))] use parking_lot as _;
