//! In-page anchor resolution and scroll easing.

/// Extracts the element id an in-page link points at.
///
/// Only `href` values starting with `#` qualify. A bare `#` has no target.
/// Percent escapes in the fragment are decoded.
pub fn fragment_target(href: &str) -> Option<String> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(fragment)
        .map(|id| id.into_owned())
        .unwrap_or_else(|_| fragment.to_owned());
    Some(decoded)
}

/// Ease-out tween of a scroll offset.
///
/// Used where the host has no native smooth scrolling. The offset moves
/// quickly at first and settles onto the target at `start + duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    start_ms: f64,
    duration_ms: f64,
}

impl ScrollTween {
    /// Starts a tween at `start_ms`.
    pub fn new(from: f64, to: f64, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// Offset at time `now_ms`.
    pub fn offset_at(&self, now_ms: f64) -> f64 {
        let t = self.progress(now_ms);
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from + (self.to - self.from) * eased
    }

    /// Whether the tween has reached its target at `now_ms`.
    pub fn is_done(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Final offset.
    pub fn target(&self) -> f64 {
        self.to
    }

    fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms == 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
}
