use anyhow::{Context, Result};
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::{
    render::{RenderTarget, render},
    source::ReadingSource,
};

/// Fixed refresh interval: five minutes, no jitter, no backoff.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(300_000);

/// One fetch-and-render pass: pull the current reading and apply it.
///
/// Both failure kinds surface here; the caller decides whether to swallow
/// them (the scheduler does) or propagate (a one-shot `show` does not).
pub async fn cycle(
    source: &dyn ReadingSource,
    target: &mut (dyn RenderTarget + Send),
) -> Result<()> {
    let reading = source.fetch().await.context("failed to fetch reading")?;

    info!(city = %reading.city, temperature = %reading.temperature, "applying reading");
    render(target, &reading).context("failed to apply reading to render target")?;

    Ok(())
}

/// Run one cycle immediately, then one per `interval`, indefinitely.
///
/// Cycles are independent: a failure is logged and the previously rendered
/// state persists until a later cycle succeeds. There is no cancellation
/// hook; callers drop or abort the owning task to stop the loop.
pub async fn run<S, T>(source: S, mut target: T, interval: Duration)
where
    S: ReadingSource,
    T: RenderTarget + Send,
{
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick completes immediately.
        ticker.tick().await;

        if let Err(err) = cycle(&source, &mut target).await {
            error!(error = ?err, "refresh cycle failed, keeping previous display");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{FetchError, RenderError},
        model::PlaceReading,
        render::Slot,
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug)]
    struct CountingSource {
        fetches: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ReadingSource for CountingSource {
        async fn fetch(&self) -> Result<PlaceReading, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Decode(
                    serde_json::from_str::<PlaceReading>("{}").unwrap_err(),
                ));
            }
            Ok(PlaceReading {
                city: "Ouargla".to_string(),
                country: "Algeria".to_string(),
                country_code: "DZ".to_string(),
                temperature: "48°C".to_string(),
                condition: "Sunny".to_string(),
                last_updated: "2026-08-29 12:00".to_string(),
            })
        }
    }

    struct RecordingTarget {
        renders: Arc<AtomicUsize>,
        last_city: Arc<std::sync::Mutex<Option<String>>>,
    }

    impl RenderTarget for RecordingTarget {
        fn set_text(&mut self, slot: Slot, value: &str) -> Result<(), RenderError> {
            if slot == Slot::City {
                *self.last_city.lock().unwrap() = Some(value.to_string());
            }
            Ok(())
        }

        fn set_attribute(&mut self, _: Slot, _: &str, _: &str) -> Result<(), RenderError> {
            Ok(())
        }

        fn set_image(&mut self, _: Slot, _: &str, _: &str) -> Result<(), RenderError> {
            Ok(())
        }

        fn set_title(&mut self, _: &str) {}

        fn commit(&mut self) {
            self.renders.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn recording_target() -> (RecordingTarget, Arc<AtomicUsize>) {
        let renders = Arc::new(AtomicUsize::new(0));
        let target = RecordingTarget {
            renders: renders.clone(),
            last_city: Arc::new(std::sync::Mutex::new(None)),
        };
        (target, renders)
    }

    #[test]
    fn run_future_is_spawnable() {
        fn require_send<F: Send>(f: F) -> F {
            f
        }

        let source = CountingSource {
            fetches: Arc::new(AtomicUsize::new(0)),
            fail: false,
        };
        let (target, _) = recording_target();

        // tokio::spawn needs a Send future; holding the target across the
        // fetch await point must not break that.
        let _ = require_send(run(source, target, REFRESH_INTERVAL));
    }

    #[tokio::test(start_paused = true)]
    async fn fires_immediately_then_on_interval() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            fetches: fetches.clone(),
            fail: false,
        };
        let (target, renders) = recording_target();

        let loop_task = tokio::spawn(run(source, target, REFRESH_INTERVAL));

        time::advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(fetches.load(Ordering::SeqCst), 1, "startup cycle should fire at once");

        time::advance(REFRESH_INTERVAL).await;
        tokio::task::yield_now().await;
        assert_eq!(fetches.load(Ordering::SeqCst), 2);

        time::advance(REFRESH_INTERVAL).await;
        tokio::task::yield_now().await;
        assert_eq!(fetches.load(Ordering::SeqCst), 3);
        assert_eq!(renders.load(Ordering::SeqCst), 3);

        loop_task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_cycles_do_not_stop_the_loop() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            fetches: fetches.clone(),
            fail: true,
        };
        let (target, renders) = recording_target();

        let loop_task = tokio::spawn(run(source, target, REFRESH_INTERVAL));

        time::advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        time::advance(REFRESH_INTERVAL).await;
        tokio::task::yield_now().await;
        time::advance(REFRESH_INTERVAL).await;
        tokio::task::yield_now().await;

        assert_eq!(fetches.load(Ordering::SeqCst), 3, "scheduler must keep polling");
        assert_eq!(renders.load(Ordering::SeqCst), 0, "no render on failed fetch");

        loop_task.abort();
    }

    #[tokio::test]
    async fn failed_fetch_leaves_previous_render_untouched() {
        let (mut target, renders) = recording_target();
        let last_city = target.last_city.clone();

        let good = CountingSource {
            fetches: Arc::new(AtomicUsize::new(0)),
            fail: false,
        };
        cycle(&good, &mut target).await.expect("cycle should succeed");
        assert_eq!(last_city.lock().unwrap().as_deref(), Some("Ouargla, Algeria"));

        let bad = CountingSource {
            fetches: Arc::new(AtomicUsize::new(0)),
            fail: true,
        };
        let err = cycle(&bad, &mut target).await.unwrap_err();
        assert!(err.to_string().contains("failed to fetch reading"));

        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert_eq!(last_city.lock().unwrap().as_deref(), Some("Ouargla, Algeria"));
    }
}
