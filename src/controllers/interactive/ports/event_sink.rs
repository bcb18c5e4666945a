use crate::controllers::interactive::events::render_event::RenderEvent;

/// Receives finished frames and render errors from the worker thread.
pub trait RenderEventSink: Send + Sync {
    fn present(&self, event: RenderEvent);
}
