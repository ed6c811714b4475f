//! Poll loop: wires feed → classifier → display sink.
//!
//! Each tick's fetch runs as its own task and reports back over a channel,
//! so a slow feed never holds up the schedule. All classification and
//! rendering happens on the loop task, which owns the poller state.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use tokio::sync::mpsc;
use tokio::time::{Duration, MissedTickBehavior, interval};

use spotboard_core::{ClassifiedTable, PageOptions, StaleNotice, classify, render_document, render_table};
use spotboard_feed::{AnyFeed, FeedError, FeedSource, Tick, TickSequencer};

use crate::cli::WatchOpts;
use crate::sink::{DisplaySink, open_sink};

pub struct PollOptions {
    pub interval: Duration,
    /// Re-render the last good table with a stale caption when a tick fails.
    pub stale_notice: bool,
    /// Wrap the table in a standalone page; `None` writes the bare table.
    pub page: Option<PageOptions>,
}

impl PollOptions {
    fn render(&self, table: &ClassifiedTable, notice: Option<&StaleNotice>) -> String {
        match &self.page {
            Some(page) => render_document(table, notice, page),
            None => render_table(table, notice),
        }
    }
}

/// A fetch result, tagged with the tick that started it.
pub struct TickOutcome {
    pub tick: Tick,
    pub result: Result<String, FeedError>,
}

/// What applying one outcome did to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Fresh table rendered.
    Rendered,
    /// Tick failed; last good table re-rendered with a stale caption.
    MarkedStale,
    /// Tick failed; display left untouched.
    Failed,
    /// Older than what is already on display.
    Discarded,
}

/// State owned by the poll loop task.
#[derive(Debug, Default)]
pub struct PollerState {
    pub sequencer: TickSequencer,
    /// Last table successfully handed to the sink.
    pub last_table: Option<ClassifiedTable>,
    pub last_success_at: Option<DateTime<Utc>>,
    /// Stamp from the header of the last rendered feed.
    pub feed_stamp: Option<NaiveDateTime>,
    pub consecutive_failures: u32,
}

impl PollerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and render one fetch outcome.
    pub fn apply(
        &mut self,
        outcome: TickOutcome,
        sink: &dyn DisplaySink,
        opts: &PollOptions,
        now: DateTime<Utc>,
    ) -> Applied {
        let tick = outcome.tick;
        if !self.sequencer.is_current(tick) {
            tracing::debug!("tick {tick}: discarding result older than what is displayed");
            return Applied::Discarded;
        }

        let classified = outcome
            .result
            .map_err(anyhow::Error::from)
            .and_then(|text| classify(&text).map_err(anyhow::Error::from));

        let error = match classified {
            Ok(table) => match sink.replace(&opts.render(&table, None)) {
                Ok(()) => {
                    self.sequencer.mark_applied(tick);
                    let stamp = table.header.generated_at();
                    if stamp.is_none() {
                        tracing::debug!("tick {tick}: feed header has no readable stamp");
                    }
                    let [fresh, moderate, stale, very_stale] = table.band_counts().map(|(_, n)| n);
                    tracing::debug!(
                        "tick {tick}: feed of {} with {} spots (fresh {fresh}, moderate {moderate}, stale {stale}, very stale {very_stale})",
                        stamp.map_or_else(|| "unknown time".to_string(), |t| t.to_string()),
                        table.rows.len()
                    );
                    self.feed_stamp = stamp;
                    self.last_table = Some(table);
                    self.last_success_at = Some(now);
                    self.consecutive_failures = 0;
                    return Applied::Rendered;
                }
                Err(e) => e.context(format!("updating {}", sink.describe())),
            },
            Err(e) => e,
        };

        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        tracing::warn!(
            "tick {tick} failed ({} in a row): {error:#}",
            self.consecutive_failures
        );

        if opts.stale_notice
            && let (Some(table), Some(last_success)) = (&self.last_table, self.last_success_at)
        {
            let notice = StaleNotice {
                last_success,
                failed_refreshes: self.consecutive_failures,
            };
            match sink.replace(&opts.render(table, Some(&notice))) {
                Ok(()) => return Applied::MarkedStale,
                Err(e) => tracing::warn!("tick {tick}: stale notice not shown: {e:#}"),
            }
        }

        Applied::Failed
    }
}

/// Poll `feed` until `shutdown` resolves: fetch immediately, then every
/// `opts.interval`. Returns the final poller state.
pub async fn run_poller<F>(
    feed: Arc<F>,
    sink: &dyn DisplaySink,
    opts: &PollOptions,
    shutdown: impl Future<Output = ()>,
) -> PollerState
where
    F: FeedSource + 'static,
{
    let mut state = PollerState::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<TickOutcome>();

    let mut ticker = interval(opts.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);

    tracing::info!(
        "polling {} every {}ms, display: {}",
        feed.describe(),
        opts.interval.as_millis(),
        sink.describe()
    );

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            _ = ticker.tick() => {
                let tick = state.sequencer.begin();
                let feed = Arc::clone(&feed);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = feed.fetch().await;
                    // Send fails only once the loop has shut down.
                    let _ = tx.send(TickOutcome { tick, result });
                });
            }
            Some(outcome) = rx.recv() => {
                state.apply(outcome, sink, opts, Utc::now());
            }
        }
    }

    state
}

/// Entry point for `spotboard watch`.
pub async fn run_watch(opts: WatchOpts) -> anyhow::Result<()> {
    let feed = Arc::new(AnyFeed::open(&opts.feed.feed, opts.feed.fetch_timeout())?);
    let sink = open_sink(opts.output.output.as_deref());

    let interval = Duration::from_millis(opts.interval_ms);
    let poll_opts = PollOptions {
        interval,
        stale_notice: !opts.no_stale_notice,
        page: opts.output.page.then(|| PageOptions {
            refresh_secs: Some(opts.interval_ms.div_ceil(1000).max(1)),
            ..PageOptions::default()
        }),
    };

    #[cfg(unix)]
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    let shutdown = async {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            tokio::select! {
                _ = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
                _ = sigterm.recv() => tracing::info!("received SIGTERM, shutting down"),
            }
        }

        #[cfg(not(unix))]
        {
            ctrl_c.await.ok();
            tracing::info!("received ctrl-c, shutting down");
        }
    };

    let state = run_poller(feed, sink.as_ref(), &poll_opts, shutdown).await;
    tracing::info!(
        "spotboard stopped after {} ticks (last applied: {})",
        state.sequencer.issued(),
        state
            .sequencer
            .last_applied()
            .map_or_else(|| "none".to_string(), |t| t.to_string())
    );
    Ok(())
}
