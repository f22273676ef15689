//! Fixed-window admission control shared by every submission path.
//!
//! The limiter divides time into consecutive windows of one [`TimeUnit`] and admits at most
//! a configured number of callers per window. A caller that finds the current window
//! exhausted suspends inside [`RateLimiter::acquire`] until the window rolls over; it never
//! fails and never sheds load. The window state lives behind a single async mutex that is
//! held across the suspension, so one exhaustion event parks exactly one sleeper while the
//! remaining callers queue on the lock and re-evaluate the refreshed window once they hold
//! it. Bursts therefore drain serially instead of stampeding the endpoint at the window
//! boundary.

// std
use std::num::NonZeroU32;
// crates.io
use tokio::time::{Instant, sleep};
// self
use crate::{_prelude::*, error::ConfigError};

/// Granularity of the rate-limiting window.
///
/// The window always spans exactly one unit of the chosen granularity; the request budget
/// scales, the window length does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
	/// One-second windows.
	Second,
	/// One-minute windows.
	Minute,
	/// One-hour windows.
	Hour,
}
impl TimeUnit {
	/// Returns the window length for this granularity.
	pub const fn window(self) -> Duration {
		match self {
			TimeUnit::Second => Duration::from_secs(1),
			TimeUnit::Minute => Duration::from_secs(60),
			TimeUnit::Hour => Duration::from_secs(3_600),
		}
	}
}

/// Validated throughput cap: at most `requests` admissions per `window`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
	window: Duration,
	requests: NonZeroU32,
}
impl RateLimit {
	/// Builds a cap of `requests` admissions per one `unit` of time.
	///
	/// A zero request budget is rejected here instead of producing a limiter that parks
	/// every caller forever.
	pub fn per(unit: TimeUnit, requests: u32) -> Result<Self, ConfigError> {
		Self::per_window(unit.window(), requests)
	}

	/// Builds a cap over an arbitrary window length.
	///
	/// Useful for tests and niche deployments; production configurations normally go
	/// through [`RateLimit::per`].
	pub fn per_window(window: Duration, requests: u32) -> Result<Self, ConfigError> {
		if window.is_zero() {
			return Err(ConfigError::EmptyWindow);
		}

		let requests = NonZeroU32::new(requests).ok_or(ConfigError::ZeroRequestLimit)?;

		Ok(Self { window, requests })
	}

	/// Returns the window length.
	pub const fn window(&self) -> Duration {
		self.window
	}

	/// Returns the admission budget per window.
	pub const fn requests(&self) -> u32 {
		self.requests.get()
	}
}

/// Mutable window state; only ever touched under the limiter's mutex.
#[derive(Debug)]
struct WindowState {
	started_at: Instant,
	admitted: u32,
}

/// Shared admission gate enforcing a [`RateLimit`] across concurrent callers.
///
/// One limiter guards one configured budget; independent budgets get independent limiters
/// with no cross-coordination. The limiter carries no background task—window rollover is
/// detected lazily by the next [`acquire`](RateLimiter::acquire) call.
#[derive(Debug)]
pub struct RateLimiter {
	window: Duration,
	requests: u32,
	state: AsyncMutex<WindowState>,
}
impl RateLimiter {
	/// Creates a limiter with a fresh window starting now.
	pub fn new(limit: RateLimit) -> Self {
		Self {
			window: limit.window(),
			requests: limit.requests(),
			state: AsyncMutex::new(WindowState { started_at: Instant::now(), admitted: 0 }),
		}
	}

	/// Waits until the caller may proceed, reserving one admission slot.
	///
	/// Returns as soon as the current window has budget left; otherwise suspends for the
	/// remainder of the window, then starts a fresh window with the triggering caller as
	/// its first admission. The fresh window is anchored at wake-up time, so an overlong
	/// suspension is absorbed forward and never produces a negative wait.
	///
	/// Dropping the future—while queued on the lock or parked in the sleep—releases the
	/// limiter without consuming a slot, so cancelled callers cannot dent the budget of
	/// the callers behind them.
	pub async fn acquire(&self) {
		let mut state = self.state.lock().await;
		let now = Instant::now();

		if now.duration_since(state.started_at) >= self.window {
			state.started_at = now;
			state.admitted = 0;
		}
		if state.admitted >= self.requests {
			sleep(self.window - now.duration_since(state.started_at)).await;

			state.started_at = Instant::now();
			state.admitted = 0;
		}

		state.admitted += 1;
	}

	/// Returns the window length.
	pub const fn window(&self) -> Duration {
		self.window
	}

	/// Returns the admission budget per window.
	pub const fn requests(&self) -> u32 {
		self.requests
	}
}
impl From<RateLimit> for RateLimiter {
	fn from(limit: RateLimit) -> Self {
		Self::new(limit)
	}
}
