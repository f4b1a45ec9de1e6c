//! Headless frame host

use std::time::{Duration, Instant};

use crate::scheduler::FrameHost;

/// Frame host that paces frames to a fixed refresh rate by sleeping
///
/// Stands in for a display's vsync when running without a window. Ends the
/// loop after `frame_limit` frames, if one is set.
#[derive(Debug, Clone)]
pub struct PacedHost {
    interval: Duration,
    next_deadline: Option<Instant>,
    frame_limit: Option<u64>,
    frames: u64,
}

impl PacedHost {
    /// Pace frames at `refresh_rate` Hz
    pub fn new(refresh_rate: f64) -> Self {
        let interval = if refresh_rate.is_finite() && refresh_rate > 0.0 {
            Duration::from_secs_f64(1.0 / refresh_rate)
        } else {
            log::warn!("Invalid refresh rate {}, frames will not be paced", refresh_rate);
            Duration::ZERO
        };
        Self {
            interval,
            next_deadline: None,
            frame_limit: None,
            frames: 0,
        }
    }

    /// Stop after `frames` frames
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Frames handed out so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameHost for PacedHost {
    fn next_frame(&mut self) -> bool {
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            return false;
        }

        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        // Next deadline is one interval after this one, or after now when more
        // than a frame behind.
        let next = deadline + self.interval;
        self.next_deadline = Some(if next < Instant::now() {
            Instant::now() + self.interval
        } else {
            next
        });

        self.frames += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_limit() {
        let mut host = PacedHost::new(2000.0).with_frame_limit(3);
        assert!(host.next_frame());
        assert!(host.next_frame());
        assert!(host.next_frame());
        assert!(!host.next_frame());
        assert_eq!(host.frames(), 3);
    }

    #[test]
    fn test_paces_frames() {
        let mut host = PacedHost::new(200.0).with_frame_limit(5);
        let start = Instant::now();
        while host.next_frame() {}
        // first frame is immediate, the remaining four wait ~5ms each
        assert!(start.elapsed() >= Duration::from_millis(19));
    }

    #[test]
    fn test_invalid_rate_is_unpaced() {
        let host = PacedHost::new(0.0);
        assert_eq!(host.interval(), Duration::ZERO);
    }
}
