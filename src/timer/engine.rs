//! The countdown engine.
//!
//! One foreground loop drives the whole phase: a bounded key poll (the only
//! blocking call per tick), the session update, and the line redraw. When
//! the countdown expires the engine hands the bell to a background alarm
//! thread and keeps polling until a key acknowledges the alarm or the
//! thread exhausts its ring count, joining it before returning.

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event};
use crossterm::style::Color;
use tracing::debug;

use crate::terminal;
use crate::types::AlarmSpec;

use super::alarm;
use super::display::{build_columns, compose, TickView};
use super::keymap::{self, Command, KEY_BINDINGS};
use super::progress::ProgressBar;
use super::session::{TimerPhase, TimerSession};

/// Bound on the per-tick key poll; sets the redraw cadence.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

// ============================================================================
// CommandEffect
// ============================================================================

/// Side effect a dispatched command asks the I/O layer to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandEffect {
    None,
    ShowHelp,
    ClearScreen,
}

/// Applies a command to the session.
///
/// Pure with respect to the terminal: I/O-requiring commands are returned
/// as effects so this stays a total transition function.
fn apply_command(
    session: &mut TimerSession,
    cmd: Command,
    now: f64,
    allow_skip: bool,
) -> CommandEffect {
    match cmd {
        Command::Pause => session.toggle_pause(),
        Command::SeekForward(d) => session.seek_forward(d, now),
        Command::SeekBackward(d) => session.seek_backward(d, now),
        Command::Skip => {
            if allow_skip {
                session.skip();
            }
        }
        Command::Quit => session.quit(),
        Command::Help => return CommandEffect::ShowHelp,
        Command::ClearScreen => return CommandEffect::ClearScreen,
    }
    CommandEffect::None
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Runs one countdown phase against the terminal.
pub struct TimerEngine {
    title: String,
    title_color: Color,
    limit_sec: f64,
    alarm_spec: AlarmSpec,
    allow_skip: bool,
}

impl TimerEngine {
    /// Creates an engine for one phase.
    pub fn new(
        title: impl Into<String>,
        title_color: Color,
        limit_sec: f64,
        alarm_spec: AlarmSpec,
        allow_skip: bool,
    ) -> Self {
        Self {
            title: title.into(),
            title_color,
            limit_sec,
            alarm_spec,
            allow_skip,
        }
    }

    /// Runs the countdown to completion.
    ///
    /// Returns `true` when the user quit, so callers can stop without
    /// exception-style control flow.
    pub fn run(&mut self) -> Result<bool> {
        debug!(
            "title={}, limit_sec={}, allow_skip={}",
            self.title, self.limit_sec, self.allow_skip
        );

        let epoch = Instant::now();
        let now = || epoch.elapsed().as_secs_f64();

        let mut session = TimerSession::new(self.limit_sec, now());
        let mut pbar = ProgressBar::new(self.limit_sec);

        while session.is_active() {
            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(ev) = event::read()? {
                    if let Some(cmd) = keymap::key_name(&ev).and_then(|n| keymap::lookup(&n)) {
                        match apply_command(&mut session, cmd, now(), self.allow_skip) {
                            CommandEffect::ShowHelp => self.show_help()?,
                            CommandEffect::ClearScreen => terminal::clear_screen()?,
                            CommandEffect::None => {}
                        }
                    }
                }
            }

            session.tick(now());
            self.redraw(&session, &mut pbar)?;
        }

        if session.phase() == TimerPhase::Alarm {
            self.ring_alarm(&mut session, &mut pbar)?;
        }

        // Leave the finished line on screen and move below it.
        self.redraw(&session, &mut pbar)?;
        terminal::print_line("")?;

        Ok(session.quit_requested())
    }

    /// Runs the alarm sub-loop until a key acknowledges it or the ring
    /// count is exhausted, then joins the alarm thread.
    fn ring_alarm(&self, session: &mut TimerSession, pbar: &mut ProgressBar) -> Result<()> {
        debug!("alarm_spec={:?}", self.alarm_spec);
        self.redraw(session, pbar)?;

        let handle = alarm::spawn(self.alarm_spec, terminal::bell);

        loop {
            if handle.is_finished() {
                session.finish_alarm();
                break;
            }
            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(ev) = event::read()? {
                    // Any key acknowledges; quit keys also propagate.
                    if keymap::key_name(&ev).and_then(|n| keymap::lookup(&n))
                        == Some(Command::Quit)
                    {
                        session.quit();
                    } else {
                        session.finish_alarm();
                    }
                    break;
                }
            }
        }

        handle.cancel_and_join();
        Ok(())
    }

    /// Recomputes the columns for the current tick and redraws the line.
    fn redraw(&self, session: &TimerSession, pbar: &mut ProgressBar) -> Result<()> {
        let local = Local::now();
        let view = TickView {
            date: local.format("%m/%d").to_string(),
            clock: local.format("%H:%M:%S").to_string(),
            title: self.title.clone(),
            title_color: self.title_color,
            limit_sec: session.limit(),
            elapsed_sec: session.elapsed(),
            rate: session.rate(),
            paused: session.is_paused(),
            alarm: session.phase() == TimerPhase::Alarm,
        };

        let mut columns = build_columns(&view);
        let layout = compose(&mut columns, terminal::width());

        let stop = !matches!(session.phase(), TimerPhase::Running);
        let bar_str = pbar.get_str(session.elapsed(), layout.bar_len, stop);

        terminal::draw_line(&columns, &bar_str, layout.overflow)
    }

    /// Prints the command list.
    fn show_help(&self) -> Result<()> {
        terminal::print_line("")?;
        for binding in KEY_BINDINGS {
            let line = format!(
                "  {:<20} {}",
                keymap::keys_str(binding.keys),
                binding.description
            );
            terminal::print_line(&line)?;
        }
        terminal::print_line("")?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
