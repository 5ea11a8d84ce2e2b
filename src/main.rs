//! tmr - interactive terminal countdown timer
//!
//! Two modes:
//! - `timer`: a single countdown with an alarm that rings until acknowledged
//! - `pomodoro`: endless Work/Break cycles with a long break per cycle

use anyhow::Result;
use clap::{CommandFactory, Parser};

use tmr::cli::{Cli, Commands, PomodoroArgs, TimerArgs};
use tmr::pomodoro::PomodoroController;
use tmr::terminal::TerminalGuard;
use tmr::timer::TimerEngine;
use tmr::types::{AlarmSpec, CycleConfig, PhaseKind};

const SEC_MIN: f64 = 60.0;

/// Main entry point
fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(quit) => {
            if quit {
                println!("Aborted.");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command. Returns whether the user quit early.
fn execute(cli: Cli) -> Result<bool> {
    match cli.command {
        Some(Commands::Timer(args)) => run_timer(args),
        Some(Commands::Pomodoro(args)) => run_pomodoro(args),
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(false)
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
            Ok(false)
        }
    }
}

/// Runs a single countdown timer.
fn run_timer(args: TimerArgs) -> Result<bool> {
    let limit_sec = args.minutes * SEC_MIN;
    tmr::types::validate_duration(limit_sec)?;

    let alarm_spec = AlarmSpec::new(args.alarm_count, args.alarm_sec1, args.alarm_sec2);

    let _guard = TerminalGuard::new()?;
    let mut engine = TimerEngine::new(
        "Timer",
        crossterm::style::Color::Blue,
        limit_sec,
        alarm_spec,
        false,
    );
    engine.run()
}

/// Runs the Pomodoro cycle until quit.
fn run_pomodoro(args: PomodoroArgs) -> Result<bool> {
    let config = CycleConfig {
        work_sec: args.work_time * SEC_MIN,
        break_sec: args.break_time * SEC_MIN,
        long_break_sec: args.long_break_time * SEC_MIN,
        cycles: args.cycles,
    };
    config.validate()?;

    tmr::terminal::print_title_line(
        &format!("Pomodoro: {} cycles of work/break", config.cycles),
        tmr::pomodoro::phase_color(PhaseKind::Work),
    )?;

    let _guard = TerminalGuard::new()?;
    let mut controller = PomodoroController::new(config, AlarmSpec::default());
    controller.run()
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["tmr"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_timer() {
        let cli = Cli::parse_from(["tmr", "timer", "25"]);
        assert!(matches!(cli.command, Some(Commands::Timer(_))));
    }

    #[test]
    fn test_cli_parse_pomodoro() {
        let cli = Cli::parse_from(["tmr", "pomodoro"]);
        assert!(matches!(cli.command, Some(Commands::Pomodoro(_))));
    }

    #[test]
    fn test_seconds_conversion() {
        let cli = Cli::parse_from(["tmr", "timer", "1.5"]);
        match cli.command {
            Some(Commands::Timer(args)) => {
                assert_eq!(args.minutes * SEC_MIN, 90.0);
            }
            _ => panic!("Expected Timer command"),
        }
    }
}
