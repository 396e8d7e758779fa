//! Tick polling.
//!
//! The grid advances its tick on the server; clients learn about it by
//! polling `GET /api/v1`. [`TickPoller`] is the state machine behind
//! [`Grid::listen`](crate::Grid::listen):
//!
//! 1. Sleep for whatever delay the previous round left pending.
//! 2. Fetch the grid metadata and refresh the caller's [`GridInfo`] in place.
//! 3. If the tick differs from the last one yielded, yield it. Either way
//!    schedule a `poll_interval` sleep.
//! 4. On a failed fetch, log and schedule a `poll_interval * 2` sleep.
//!
//! Intervals shorter than [`MIN_POLL_INTERVAL`] are raised to it.
//!
//! Every sleep and fetch races the [`CancellationToken`], so cancelling (or
//! dropping the stream) interrupts a pending wait immediately. Session
//! errors (client never opened, or closed) end the stream; everything else
//! is retried forever.
//!
//! # Examples
//!
//! ```ignore
//! use futures::StreamExt;
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let mut ticks = grid.listen_until(Duration::from_secs(30), cancel.clone());
//! while let Some(tick) = ticks.next().await {
//!     println!("tick {}", tick);
//! }
//! ```

use crate::client::Hashgrid;
use crate::error::Result;
use crate::types::{GridInfo, Tick};
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Shortest interval a poller will wait between fetches.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Anything that can report the grid's current metadata.
#[async_trait]
pub trait TickSource: Send + Sync {
    /// Fetch the current grid name and tick.
    async fn fetch_grid(&self) -> Result<GridInfo>;
}

#[async_trait]
impl TickSource for Hashgrid {
    async fn fetch_grid(&self) -> Result<GridInfo> {
        self.grids().get().await
    }
}

/// Polling state machine yielding each new tick exactly once.
pub struct TickPoller<'a, S: ?Sized> {
    source: &'a S,
    grid: &'a mut GridInfo,
    last_tick: Option<Tick>,
    poll_interval: Duration,
    pending_sleep: Option<Duration>,
    cancel: CancellationToken,
}

impl<'a, S: TickSource + ?Sized> TickPoller<'a, S> {
    /// Poll `source`, refreshing `grid` after every successful fetch.
    pub fn new(
        source: &'a S,
        grid: &'a mut GridInfo,
        poll_interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        if poll_interval < MIN_POLL_INTERVAL {
            tracing::warn!(
                requested = ?poll_interval,
                used = ?MIN_POLL_INTERVAL,
                "Poll interval too short, clamping"
            );
        }
        TickPoller {
            source,
            grid,
            last_tick: None,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            pending_sleep: None,
            cancel,
        }
    }

    /// Last tick yielded, if any.
    pub fn last_tick(&self) -> Option<Tick> {
        self.last_tick
    }

    /// Wait for the next changed tick.
    ///
    /// Returns `None` once cancelled or when the client session is gone.
    pub async fn next_tick(&mut self) -> Option<Tick> {
        loop {
            if let Some(delay) = self.pending_sleep.take() {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => return None,
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            let fetched = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return None,
                fetched = self.source.fetch_grid() => fetched,
            };

            match fetched {
                Ok(info) => {
                    let tick = info.tick;
                    *self.grid = info;
                    self.pending_sleep = Some(self.poll_interval);
                    if self.last_tick != Some(tick) {
                        tracing::info!(
                            grid = %self.grid.name,
                            previous = ?self.last_tick,
                            tick,
                            "Tick updated"
                        );
                        self.last_tick = Some(tick);
                        return Some(tick);
                    }
                }
                Err(e) if e.is_session_error() => {
                    tracing::error!(grid = %self.grid.name, error = %e, "Stopped listening for ticks");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(grid = %self.grid.name, error = %e, "Error while listening for ticks");
                    self.pending_sleep = Some(error_backoff(self.poll_interval));
                }
            }
        }
    }

    /// Turn the poller into a [`TickStream`].
    pub fn into_stream(self) -> TickStream<'a>
    where
        S: 'a,
    {
        let stream = futures::stream::unfold(self, |mut poller| async move {
            let tick = poller.next_tick().await?;
            Some((tick, poller))
        });
        TickStream {
            inner: Box::pin(stream),
        }
    }
}

/// Delay after a failed fetch: twice the poll interval, saturating.
fn error_backoff(poll_interval: Duration) -> Duration {
    poll_interval.saturating_mul(2)
}

/// Stream of changed ticks returned by [`Grid::listen`](crate::Grid::listen).
///
/// Unbounded and single-use. Dropping it aborts any pending sleep or fetch.
pub struct TickStream<'a> {
    inner: Pin<Box<dyn Stream<Item = Tick> + Send + 'a>>,
}

impl Stream for TickStream<'_> {
    type Item = Tick;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
