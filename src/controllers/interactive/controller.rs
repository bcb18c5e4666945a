use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::frame_error::FrameError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::event_sink::RenderEventSink;
use crate::controllers::render::{RenderError, RenderRequest, render_frame};
use crate::core::actions::cancellation::GenerationToken;

struct SharedState {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(u64, Arc<RenderRequest>)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    event_sink: Arc<dyn RenderEventSink>,
}

/// Renders submitted requests on a single worker thread, newest first.
///
/// Each request gets a generation id. Only the most recent pending request is
/// kept, a newer submission cancels the render in flight, and results that
/// are already stale when they finish are dropped without an event.
pub struct InteractiveController {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(event_sink: Arc<dyn RenderEventSink>) -> Self {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            event_sink,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared);
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Queues `request`, replacing any request not yet started, and returns
    /// its generation id.
    pub fn submit_request(&self, request: Arc<RenderRequest>) -> u64 {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *guard = Some((generation, request));
        }

        self.shared.wake.notify_one();
        tracing::debug!(generation, "render request submitted");

        generation
    }

    pub fn shutdown(&mut self) {
        // Stored under the lock so the worker cannot miss it between its
        // shutdown check and `wait`.
        {
            let _guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            self.shared.shutdown.store(true, Ordering::Release);
        }
        self.shared.wake.notify_all();

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::warn!("render worker panicked");
            }
        }
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            let (job_generation, request) = {
                let mut guard = shared
                    .latest_request
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(req) = guard.take() {
                        break req;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            let cancel_token =
                GenerationToken::new(job_generation, &shared.generation, &shared.shutdown);

            let start = Instant::now();
            let result = render_frame(&request, &cancel_token);
            let render_duration = start.elapsed();

            let event = match result {
                Err(RenderError::Cancelled(_)) => {
                    tracing::debug!(generation = job_generation, "render superseded");
                    continue;
                }
                _ if cancel_token.is_stale() => continue,
                Ok(frame) => {
                    tracing::info!(
                        generation = job_generation,
                        duration = ?render_duration,
                        "frame rendered"
                    );
                    RenderEvent::Frame(FrameData {
                        generation: job_generation,
                        iterations: frame.iterations,
                        pixel_buffer: frame.pixel_buffer,
                        render_duration,
                    })
                }
                Err(err) => {
                    tracing::warn!(generation = job_generation, %err, "render failed");
                    RenderEvent::Error(FrameError {
                        generation: job_generation,
                        message: err.to_string(),
                    })
                }
            };

            shared.event_sink.present(event);
            shared
                .last_completed_generation
                .store(job_generation, Ordering::Release);
        }
    }
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
