//! Periodic decorative effects, expressed as pure functions of elapsed time
//! so any frame loop can sample them without owning timers.

use std::time::Duration;

pub const SUBTITLE: &str = "> DEPLOY ERC-20 TOKENS ON BASE CHAIN";
pub const TYPEWRITER_INTERVAL: Duration = Duration::from_millis(50);
pub const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(530);
pub const SCAN_LINE_INTERVAL: Duration = Duration::from_millis(50);
pub const SCAN_LINE_PERIOD: u32 = 100;

fn ticks(elapsed: Duration, interval: Duration) -> u128 {
    elapsed.as_millis() / interval.as_millis().max(1)
}

/// Reveals `text` one character per interval.
#[derive(Debug, Clone, Copy)]
pub struct Typewriter<'a> {
    text: &'a str,
    interval: Duration,
}

impl<'a> Typewriter<'a> {
    pub fn new(text: &'a str, interval: Duration) -> Self {
        Self { text, interval }
    }

    pub fn subtitle() -> Typewriter<'static> {
        Typewriter::new(SUBTITLE, TYPEWRITER_INTERVAL)
    }

    pub fn visible_chars(&self, elapsed: Duration) -> usize {
        let total = self.text.chars().count();
        usize::try_from(ticks(elapsed, self.interval))
            .unwrap_or(usize::MAX)
            .min(total)
    }

    pub fn visible_text(&self, elapsed: Duration) -> &'a str {
        let shown = self.visible_chars(elapsed);
        match self.text.char_indices().nth(shown) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => self.text,
        }
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.visible_chars(elapsed) == self.text.chars().count()
    }
}

pub fn cursor_visible(elapsed: Duration) -> bool {
    ticks(elapsed, CURSOR_BLINK_INTERVAL) % 2 == 0
}

pub fn scan_line_offset(elapsed: Duration) -> u32 {
    (ticks(elapsed, SCAN_LINE_INTERVAL) % u128::from(SCAN_LINE_PERIOD)) as u32
}
