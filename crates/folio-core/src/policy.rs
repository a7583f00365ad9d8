use std::time::Duration;

pub const DEFAULT_MAX_EMAILS: u32 = 3;
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(60_000);

/// How many messages one client may send per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    pub max_emails: u32,
    pub window: Duration,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            max_emails: DEFAULT_MAX_EMAILS,
            window: DEFAULT_WINDOW,
        }
    }
}

impl GatePolicy {
    pub fn window_millis(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }
}
