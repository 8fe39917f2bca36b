//! FrameScheduler - when the host should (not) have a frame request in flight
//!
//! The host owns the actual `requestAnimationFrame` handle; this tracks the
//! two visibility signals and whether a request is outstanding, and tells
//! the host when to request a new frame. A stopped loop has no pending
//! request at all.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameScheduler {
    document_hidden: bool,
    intersecting: bool,
    pending: bool,
    stopped: bool,
    /// A suspension happened since the last frame ran
    suspended: bool,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self { document_hidden: false, intersecting: true, pending: false, stopped: false, suspended: false }
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both visibility conditions hold and the session is alive
    #[inline]
    pub fn is_running(&self) -> bool {
        !self.stopped && !self.document_hidden && self.intersecting
    }

    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.pending
    }

    /// Kick off the loop. Returns true when the host must request a frame.
    pub fn start(&mut self) -> bool {
        self.request_if_running()
    }

    /// Returns true when the host must request a frame.
    pub fn set_document_hidden(&mut self, hidden: bool) -> bool {
        self.document_hidden = hidden;
        self.update()
    }

    /// Returns true when the host must request a frame.
    pub fn set_intersecting(&mut self, intersecting: bool) -> bool {
        self.intersecting = intersecting;
        self.update()
    }

    /// The host's frame callback fired. Returns whether to run the frame.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = false;
        self.is_running()
    }

    /// Frame done. Returns true when the host must request the next one.
    pub fn end_frame(&mut self) -> bool {
        self.request_if_running()
    }

    /// True once for the first frame after a suspension
    pub fn take_resumed(&mut self) -> bool {
        std::mem::take(&mut self.suspended)
    }

    /// Withdraw for good (teardown)
    pub fn stop(&mut self) {
        self.stopped = true;
        self.pending = false;
    }

    fn update(&mut self) -> bool {
        if self.is_running() {
            let requested = self.request_if_running();
            if requested {
                log::debug!("scheduler: resumed");
            }
            requested
        } else {
            if self.pending {
                log::debug!("scheduler: suspended");
            }
            self.pending = false;
            self.suspended = true;
            false
        }
    }

    fn request_if_running(&mut self) -> bool {
        if self.is_running() && !self.pending {
            self.pending = true;
            true
        } else {
            false
        }
    }
}
