//! Animation frame scheduling
//!
//! Keeps at most one frame request in flight. Cancelling withdraws the
//! pending request and may be called any number of times.

/// Host that can request and withdraw animation frame callbacks
/// (`requestAnimationFrame` / `cancelAnimationFrame` in the browser)
pub trait FrameHost {
    /// Ask for one callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<i32>;
    fn cancel_frame(&mut self, handle: i32);
}

/// Tracks the pending frame request
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<i32>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Request the next frame unless one is already pending
    pub fn schedule(&mut self, host: &mut impl FrameHost) {
        if self.pending.is_some() {
            return;
        }
        self.pending = host.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request refused by host");
        }
    }

    /// Call first thing in the frame callback: the request has been used up
    pub fn on_frame(&mut self) {
        self.pending = None;
    }

    /// Withdraw the pending request, if any
    pub fn cancel(&mut self, host: &mut impl FrameHost) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
    }

    /// Re-arm after the page is restored from the back/forward cache.
    /// Only a running session gets a frame; otherwise stays cancelled.
    pub fn resume(&mut self, host: &mut impl FrameHost, running: bool) {
        if running {
            self.schedule(host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeHost {
        next: i32,
        live: Vec<i32>,
        cancelled: Vec<i32>,
        refuse: bool,
    }

    impl FrameHost for FakeHost {
        fn request_frame(&mut self) -> Option<i32> {
            if self.refuse {
                return None;
            }
            self.next += 1;
            self.live.push(self.next);
            Some(self.next)
        }

        fn cancel_frame(&mut self, handle: i32) {
            self.live.retain(|h| *h != handle);
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut host = FakeHost::default();
        let mut frames = FrameLoop::new();
        frames.schedule(&mut host);
        frames.schedule(&mut host);
        frames.schedule(&mut host);
        assert!(frames.is_scheduled());
        assert_eq!(host.live, vec![1]);

        // Callback fired: next schedule makes a fresh request
        host.live.clear();
        frames.on_frame();
        assert!(!frames.is_scheduled());
        frames.schedule(&mut host);
        assert_eq!(host.live, vec![2]);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut host = FakeHost::default();
        let mut frames = FrameLoop::new();

        // Nothing pending: no-op
        frames.cancel(&mut host);
        assert!(host.cancelled.is_empty());

        frames.schedule(&mut host);
        frames.cancel(&mut host);
        frames.cancel(&mut host);
        frames.cancel(&mut host);
        assert_eq!(host.cancelled, vec![1]);
        assert!(host.live.is_empty());
        assert!(!frames.is_scheduled());
    }

    #[test]
    fn test_resume_after_cancel() {
        let mut host = FakeHost::default();
        let mut frames = FrameLoop::new();
        frames.schedule(&mut host);

        // Page hidden mid-run, then shown again
        frames.cancel(&mut host);
        frames.resume(&mut host, true);
        assert!(frames.is_scheduled());
        assert_eq!(host.live, vec![2]);

        // Resuming twice keeps one request
        frames.resume(&mut host, true);
        assert_eq!(host.live, vec![2]);

        // Finished session stays stopped
        frames.cancel(&mut host);
        frames.resume(&mut host, false);
        assert!(!frames.is_scheduled());
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_refused_request_can_retry() {
        let mut host = FakeHost {
            refuse: true,
            ..Default::default()
        };
        let mut frames = FrameLoop::new();
        frames.schedule(&mut host);
        assert!(!frames.is_scheduled());
        host.refuse = false;
        frames.schedule(&mut host);
        assert!(frames.is_scheduled());
    }
}
