//! Adaptive one-line display composition.
//!
//! Each redraw builds an ordered list of candidate columns and computes,
//! as a pure function of the column values and the terminal width, which
//! columns fit and how wide the progress bar may be. Narrow terminals drop
//! the lowest-priority columns first; when nothing fits at all a fixed
//! overflow indicator is rendered instead of a blank line.

use crossterm::style::Color;

use super::progress::DEF_BAR_LEN;

/// Rendered when the terminal is too narrow for any column.
pub const OVERFLOW_INDICATOR: &str = "!?";

// ============================================================================
// ColumnKind
// ============================================================================

/// The columns of the timer line, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Time,
    Title,
    Limit,
    State,
    Rate,
    Elapsed,
    Bar,
    Remain,
}

/// Render order of the columns.
pub const RENDER_ORDER: [ColumnKind; 9] = [
    ColumnKind::Date,
    ColumnKind::Time,
    ColumnKind::Title,
    ColumnKind::Limit,
    ColumnKind::State,
    ColumnKind::Rate,
    ColumnKind::Elapsed,
    ColumnKind::Bar,
    ColumnKind::Remain,
];

/// Truncation priority: first entry is dropped first when the terminal
/// is too narrow, the last survives longest.
pub const DROP_ORDER: [ColumnKind; 9] = [
    ColumnKind::Date,
    ColumnKind::Time,
    ColumnKind::Elapsed,
    ColumnKind::Rate,
    ColumnKind::Limit,
    ColumnKind::Bar,
    ColumnKind::State,
    ColumnKind::Title,
    ColumnKind::Remain,
];

// ============================================================================
// Column
// ============================================================================

/// One display column: a value, its styling, and a shown flag recomputed
/// every redraw.
#[derive(Debug, Clone)]
pub struct Column {
    pub kind: ColumnKind,
    pub value: String,
    pub color: Color,
    pub bold: bool,
    pub shown: bool,
}

impl Column {
    fn new(kind: ColumnKind, value: String, color: Color, bold: bool) -> Self {
        // Empty values never render; the bar is sized by the layout instead.
        let shown = kind == ColumnKind::Bar || !value.is_empty();
        Self {
            kind,
            value,
            color,
            bold,
            shown,
        }
    }

    /// Width this column asks for during layout, excluding the separator.
    fn width(&self) -> usize {
        if self.kind == ColumnKind::Bar {
            DEF_BAR_LEN
        } else {
            self.value.chars().count()
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// True when every column was dropped; render [`OVERFLOW_INDICATOR`].
    pub overflow: bool,
    /// Allotted bar width when the bar column survived, else 0.
    pub bar_len: isize,
}

/// Computes which columns fit into `term_width`.
///
/// Columns are dropped strictly in [`DROP_ORDER`] until the total rendered
/// width (one separator per shown column) fits. A surviving bar column is
/// then widened to fill the remainder; if that remainder is not positive
/// the bar is dropped too.
pub fn compose(columns: &mut [Column], term_width: usize) -> Layout {
    let mut drop_idx = 0;

    loop {
        let total: usize = columns
            .iter()
            .filter(|c| c.shown)
            .map(|c| c.width() + 1)
            .sum();

        if total <= term_width || columns.iter().all(|c| !c.shown) {
            break;
        }

        // Drop the lowest-priority column still shown.
        while drop_idx < DROP_ORDER.len() {
            let kind = DROP_ORDER[drop_idx];
            drop_idx += 1;
            if let Some(col) = columns.iter_mut().find(|c| c.kind == kind && c.shown) {
                col.shown = false;
                break;
            }
        }
        if drop_idx >= DROP_ORDER.len() {
            break;
        }
    }

    let mut bar_len: isize = 0;
    if columns
        .iter()
        .any(|c| c.kind == ColumnKind::Bar && c.shown)
    {
        let others: usize = columns
            .iter()
            .filter(|c| c.shown && c.kind != ColumnKind::Bar)
            .map(|c| c.width() + 1)
            .sum();
        bar_len = term_width as isize - others as isize - 1;
        if bar_len <= 0 {
            bar_len = 0;
            if let Some(bar) = columns.iter_mut().find(|c| c.kind == ColumnKind::Bar) {
                bar.shown = false;
            }
        }
    }

    Layout {
        overflow: columns.iter().all(|c| !c.shown),
        bar_len,
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Warning threshold for rate coloring, in percent.
pub const RATE_WARN: f64 = 80.0;
/// Critical threshold for rate coloring, in percent.
pub const RATE_CRIT: f64 = 95.0;

/// Maps an elapsed rate (percent) to its display color.
pub fn rate_color(rate: f64) -> Color {
    if rate >= RATE_CRIT {
        Color::Red
    } else if rate >= RATE_WARN {
        Color::Yellow
    } else {
        Color::White
    }
}

/// Formats a rate as a percentage with one decimal place.
///
/// Exactly 100% renders as `100%` without a decimal.
pub fn format_rate(rate: f64) -> String {
    if rate >= 100.0 {
        "100%".to_string()
    } else {
        format!("{rate:.1}%")
    }
}

/// Formats seconds as `M:SS`, switching to `H:MM:SS` once minutes reach 60.
pub fn format_hms(sec: f64) -> String {
    let total = sec.max(0.0).round() as u64;
    let h = total / 3600;
    let m = total % 3600 / 60;
    let s = total % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

// ============================================================================
// Column Building
// ============================================================================

/// Per-tick inputs to the column builder, separated from the engine so the
/// composition stays a pure function.
#[derive(Debug, Clone)]
pub struct TickView {
    pub date: String,
    pub clock: String,
    pub title: String,
    pub title_color: Color,
    pub limit_sec: f64,
    pub elapsed_sec: f64,
    pub rate: f64,
    pub paused: bool,
    pub alarm: bool,
}

/// Builds the ordered candidate columns for one redraw.
pub fn build_columns(view: &TickView) -> Vec<Column> {
    let rc = rate_color(view.rate);
    let state = if view.alarm {
        "!!"
    } else if view.paused {
        "||"
    } else {
        ">"
    };

    RENDER_ORDER
        .iter()
        .map(|&kind| match kind {
            ColumnKind::Date => {
                Column::new(kind, view.date.clone(), Color::Grey, false)
            }
            ColumnKind::Time => {
                Column::new(kind, view.clock.clone(), Color::Grey, false)
            }
            ColumnKind::Title => {
                Column::new(kind, view.title.clone(), view.title_color, true)
            }
            ColumnKind::Limit => {
                Column::new(kind, format_hms(view.limit_sec), Color::White, false)
            }
            ColumnKind::State => Column::new(kind, state.to_string(), rc, view.paused),
            ColumnKind::Rate => Column::new(kind, format_rate(view.rate), rc, false),
            ColumnKind::Elapsed => {
                Column::new(kind, format_hms(view.elapsed_sec), Color::White, false)
            }
            ColumnKind::Bar => Column::new(kind, String::new(), Color::White, false),
            ColumnKind::Remain => Column::new(
                kind,
                format_hms(view.limit_sec - view.elapsed_sec),
                rc,
                true,
            ),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn view(rate: f64) -> TickView {
        TickView {
            date: "08/26".to_string(),
            clock: "12:34:56".to_string(),
            title: "WORK".to_string(),
            title_color: Color::Cyan,
            limit_sec: 100.0,
            elapsed_sec: rate,
            rate,
            paused: false,
            alarm: false,
        }
    }

    // ------------------------------------------------------------------------
    // Formatting Tests
    // ------------------------------------------------------------------------

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_rate_one_decimal() {
            assert_eq!(format_rate(0.0), "0.0%");
            assert_eq!(format_rate(42.25), "42.2%");
            assert_eq!(format_rate(99.9), "99.9%");
        }

        #[test]
        fn test_format_rate_hundred_no_decimal() {
            assert_eq!(format_rate(100.0), "100%");
        }

        #[test]
        fn test_format_hms_minutes() {
            assert_eq!(format_hms(0.0), "0:00");
            assert_eq!(format_hms(65.0), "1:05");
            assert_eq!(format_hms(59.0 * 60.0 + 59.0), "59:59");
        }

        #[test]
        fn test_format_hms_hours() {
            assert_eq!(format_hms(3600.0), "1:00:00");
            assert_eq!(format_hms(3661.0), "1:01:01");
        }

        #[test]
        fn test_format_hms_negative_clamps() {
            assert_eq!(format_hms(-1.0), "0:00");
        }
    }

    // ------------------------------------------------------------------------
    // Rate Color Tests
    // ------------------------------------------------------------------------

    mod rate_color_tests {
        use super::*;

        #[test]
        fn test_thresholds() {
            assert_eq!(rate_color(0.0), Color::White);
            assert_eq!(rate_color(79.9), Color::White);
            assert_eq!(rate_color(80.0), Color::Yellow);
            assert_eq!(rate_color(94.9), Color::Yellow);
            assert_eq!(rate_color(95.0), Color::Red);
            assert_eq!(rate_color(100.0), Color::Red);
        }

        #[test]
        fn test_remain_column_follows_rate() {
            let cols = build_columns(&view(0.0));
            let remain = cols
                .iter()
                .find(|c| c.kind == ColumnKind::Remain)
                .unwrap();
            assert_eq!(remain.color, Color::White);

            let cols = build_columns(&view(85.0));
            let remain = cols
                .iter()
                .find(|c| c.kind == ColumnKind::Remain)
                .unwrap();
            assert_eq!(remain.color, Color::Yellow);

            let cols = build_columns(&view(96.0));
            let remain = cols
                .iter()
                .find(|c| c.kind == ColumnKind::Remain)
                .unwrap();
            assert_eq!(remain.color, Color::Red);
        }
    }

    // ------------------------------------------------------------------------
    // Layout Tests
    // ------------------------------------------------------------------------

    mod layout_tests {
        use super::*;

        #[test]
        fn test_wide_terminal_shows_everything() {
            let mut cols = build_columns(&view(50.0));
            let layout = compose(&mut cols, 200);
            assert!(!layout.overflow);
            assert!(cols.iter().all(|c| c.shown));
            assert!(layout.bar_len > 0);
        }

        #[test]
        fn test_bar_fills_remaining_width() {
            let mut cols = build_columns(&view(50.0));
            let layout = compose(&mut cols, 200);
            let others: usize = cols
                .iter()
                .filter(|c| c.shown && c.kind != ColumnKind::Bar)
                .map(|c| c.value.chars().count() + 1)
                .sum();
            assert_eq!(layout.bar_len, 200 - others as isize - 1);
        }

        #[test]
        fn test_narrow_drops_lowest_priority_first() {
            let mut cols = build_columns(&view(50.0));
            compose(&mut cols, 30);

            let date = cols.iter().find(|c| c.kind == ColumnKind::Date).unwrap();
            let time = cols.iter().find(|c| c.kind == ColumnKind::Time).unwrap();
            assert!(!date.shown);
            assert!(!time.shown);

            let remain = cols
                .iter()
                .find(|c| c.kind == ColumnKind::Remain)
                .unwrap();
            assert!(remain.shown);
        }

        #[test]
        fn test_dropped_set_is_priority_suffix() {
            // Whatever the width, the dropped columns must be exactly a
            // prefix of DROP_ORDER (the lowest-priority suffix of the
            // priority-ordered display list).
            for width in 1..120 {
                let mut cols = build_columns(&view(50.0));
                compose(&mut cols, width);

                // Walk from highest priority down: once a non-bar column is
                // dropped, no lower-priority column may still be shown. The
                // bar is exempt, since the final allotment rule can drop it
                // out of order.
                let mut seen_dropped = false;
                for kind in DROP_ORDER.iter().rev() {
                    let col = cols.iter().find(|c| c.kind == *kind).unwrap();
                    if col.shown {
                        assert!(
                            !seen_dropped,
                            "non-suffix drop kept {:?} at width {width}",
                            col.kind
                        );
                    } else if col.kind != ColumnKind::Bar {
                        seen_dropped = true;
                    }
                }
            }
        }

        #[test]
        fn test_shown_width_fits_terminal() {
            for width in 5..120 {
                let mut cols = build_columns(&view(50.0));
                let layout = compose(&mut cols, width);
                let total: usize = cols
                    .iter()
                    .filter(|c| c.shown)
                    .map(|c| {
                        let w = if c.kind == ColumnKind::Bar {
                            layout.bar_len as usize
                        } else {
                            c.value.chars().count()
                        };
                        w + 1
                    })
                    .sum();
                assert!(total <= width, "width {width}: rendered {total}");
            }
        }

        #[test]
        fn test_tiny_terminal_overflows() {
            let mut cols = build_columns(&view(50.0));
            let layout = compose(&mut cols, 1);
            assert!(layout.overflow);
            assert!(cols.iter().all(|c| !c.shown));
        }

        #[test]
        fn test_bar_dropped_when_no_room_left() {
            // Pick a width where the drop loop keeps the bar nominally but
            // the final allotment would be non-positive.
            let mut cols = build_columns(&view(50.0));
            let others: usize = cols
                .iter()
                .filter(|c| {
                    c.shown
                        && matches!(
                            c.kind,
                            ColumnKind::State | ColumnKind::Title | ColumnKind::Remain
                        )
                })
                .map(|c| c.value.chars().count() + 1)
                .sum();

            let mut cols = build_columns(&view(50.0));
            let layout = compose(&mut cols, others + 1);
            let bar = cols.iter().find(|c| c.kind == ColumnKind::Bar).unwrap();
            assert!(!bar.shown);
            assert_eq!(layout.bar_len, 0);
        }
    }

    // ------------------------------------------------------------------------
    // Column Building Tests
    // ------------------------------------------------------------------------

    mod build_tests {
        use super::*;

        #[test]
        fn test_render_order() {
            let cols = build_columns(&view(0.0));
            let kinds: Vec<ColumnKind> = cols.iter().map(|c| c.kind).collect();
            assert_eq!(kinds, RENDER_ORDER);
        }

        #[test]
        fn test_state_symbols() {
            let mut v = view(0.0);
            let state = |cols: &[Column]| {
                cols.iter()
                    .find(|c| c.kind == ColumnKind::State)
                    .unwrap()
                    .value
                    .clone()
            };

            assert_eq!(state(&build_columns(&v)), ">");
            v.paused = true;
            assert_eq!(state(&build_columns(&v)), "||");
            v.paused = false;
            v.alarm = true;
            assert_eq!(state(&build_columns(&v)), "!!");
        }

        #[test]
        fn test_empty_title_not_shown() {
            let mut v = view(0.0);
            v.title = String::new();
            let cols = build_columns(&v);
            let title = cols.iter().find(|c| c.kind == ColumnKind::Title).unwrap();
            assert!(!title.shown);
        }
    }
}
