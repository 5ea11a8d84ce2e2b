//! Fixed-width progress bar with a rotating spinner head.
//!
//! The bar is a pure function of (value, total, bar length, stop flag) plus
//! one piece of rotation state that advances once per call while the bar is
//! running and freezes once stopped or complete.

// ============================================================================
// ProgressBar
// ============================================================================

/// Default bar length in characters.
pub const DEF_BAR_LEN: usize = 25;

/// Glyph for the filled region.
pub const CH_ON: char = '>';
/// Glyph for the unfilled region.
pub const CH_OFF: char = '-';
/// Spinner glyph cycle, one step per redraw.
pub const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Renders a fixed-width progress bar string.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: f64,
    ch_on: char,
    ch_off: char,
    /// Rotation index into [`SPINNER`], advanced once per running render.
    rot: usize,
}

impl ProgressBar {
    /// Creates a bar over the given total.
    pub fn new(total: f64) -> Self {
        Self {
            total,
            ch_on: CH_ON,
            ch_off: CH_OFF,
            rot: 0,
        }
    }

    /// Creates a bar with custom on/off glyphs.
    pub fn with_glyphs(total: f64, ch_on: char, ch_off: char) -> Self {
        Self {
            ch_on,
            ch_off,
            ..Self::new(total)
        }
    }

    /// Renders the bar as a string of exactly `bar_len` characters.
    ///
    /// Returns an empty string when `bar_len <= 0`. The fill rate is
    /// `value / total` clamped to `[0, 1]`, forced to `1.0` when
    /// `total <= 0`. While running (`stop == false` and `value < total`)
    /// one position at the filled/unfilled boundary holds the spinner
    /// glyph and the rotation index advances; stopped or complete bars
    /// render without a spinner and leave the rotation untouched.
    pub fn get_str(&mut self, value: f64, bar_len: isize, stop: bool) -> String {
        if bar_len <= 0 {
            return String::new();
        }
        let bar_len = bar_len as usize;

        let rate = if self.total <= 0.0 {
            1.0
        } else {
            (value / self.total).clamp(0.0, 1.0)
        };

        let on_len = ((rate * bar_len as f64).round() as usize).min(bar_len);
        let off_len = bar_len - on_len;

        let mut bar = String::with_capacity(bar_len);

        if stop || value >= self.total {
            for _ in 0..on_len {
                bar.push(self.ch_on);
            }
            for _ in 0..off_len {
                bar.push(self.ch_off);
            }
            return bar;
        }

        let spin = SPINNER[self.rot % SPINNER.len()];
        self.rot = self.rot.wrapping_add(1);

        if on_len > 0 {
            // Spinner replaces the last filled position.
            for _ in 0..on_len - 1 {
                bar.push(self.ch_on);
            }
            bar.push(spin);
            for _ in 0..off_len {
                bar.push(self.ch_off);
            }
        } else {
            // No filled region yet: the spinner borrows one unfilled slot
            // so total width is preserved.
            bar.push(spin);
            for _ in 0..off_len.saturating_sub(1) {
                bar.push(self.ch_off);
            }
        }

        bar
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_is_exactly_bar_len() {
        let mut pbar = ProgressBar::new(100.0);
        for len in [1isize, 2, 5, 10, 25, 80] {
            for value in [0.0, 1.0, 37.5, 50.0, 99.9, 100.0, 150.0] {
                for stop in [false, true] {
                    let s = pbar.get_str(value, len, stop);
                    assert_eq!(
                        s.chars().count(),
                        len as usize,
                        "value={value} len={len} stop={stop}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_non_positive_len_is_empty() {
        let mut pbar = ProgressBar::new(100.0);
        assert_eq!(pbar.get_str(50.0, 0, false), "");
        assert_eq!(pbar.get_str(50.0, -3, true), "");
    }

    #[test]
    fn test_stopped_half_split() {
        let mut pbar = ProgressBar::new(100.0);
        assert_eq!(pbar.get_str(50.0, 10, true), ">>>>>-----");
    }

    #[test]
    fn test_stopped_over_total_is_all_on() {
        let mut pbar = ProgressBar::new(100.0);
        assert_eq!(pbar.get_str(150.0, 10, true), ">>>>>>>>>>");
    }

    #[test]
    fn test_complete_has_no_spinner() {
        let mut pbar = ProgressBar::new(100.0);
        // value >= total suppresses the spinner even when not stopped
        assert_eq!(pbar.get_str(100.0, 10, false), ">>>>>>>>>>");
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut pbar = ProgressBar::new(100.0);
        let a = pbar.get_str(42.0, 20, true);
        let b = pbar.get_str(42.0, 20, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_running_spinner_at_boundary() {
        let mut pbar = ProgressBar::new(100.0);
        let s = pbar.get_str(50.0, 10, false);
        // 4 on-glyphs, spinner, 5 off-glyphs
        assert_eq!(&s[..4], ">>>>");
        assert!(SPINNER.contains(&s.chars().nth(4).unwrap()));
        assert_eq!(&s[5..], "-----");
    }

    #[test]
    fn test_running_spinner_rotates() {
        let mut pbar = ProgressBar::new(100.0);
        let first = pbar.get_str(50.0, 10, false);
        let second = pbar.get_str(50.0, 10, false);
        assert_ne!(first, second);
    }

    #[test]
    fn test_spinner_consumes_unfilled_slot_at_start() {
        let mut pbar = ProgressBar::new(100.0);
        let s = pbar.get_str(0.0, 10, false);
        assert_eq!(s.chars().count(), 10);
        assert!(SPINNER.contains(&s.chars().next().unwrap()));
        assert_eq!(&s[1..], "---------");
    }

    #[test]
    fn test_zero_total_forces_full_rate() {
        let mut pbar = ProgressBar::new(0.0);
        assert_eq!(pbar.get_str(0.0, 5, true), ">>>>>");
    }

    #[test]
    fn test_negative_value_clamps_to_zero() {
        let mut pbar = ProgressBar::new(100.0);
        assert_eq!(pbar.get_str(-10.0, 5, true), "-----");
    }

    #[test]
    fn test_rounding_split() {
        let mut pbar = ProgressBar::new(100.0);
        // 44% of 10 rounds to 4 on-glyphs, 46% rounds to 5
        assert_eq!(pbar.get_str(44.0, 10, true), ">>>>------");
        assert_eq!(pbar.get_str(46.0, 10, true), ">>>>>-----");
    }

    #[test]
    fn test_custom_glyphs() {
        let mut pbar = ProgressBar::with_glyphs(100.0, '#', '.');
        assert_eq!(pbar.get_str(50.0, 4, true), "##..");
    }

    #[test]
    fn test_bar_len_one() {
        let mut pbar = ProgressBar::new(100.0);
        let s = pbar.get_str(10.0, 1, false);
        assert_eq!(s.chars().count(), 1);
        assert!(SPINNER.contains(&s.chars().next().unwrap()));
    }
}
