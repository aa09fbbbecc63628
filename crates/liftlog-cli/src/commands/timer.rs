use clap::Subcommand;
use liftlog_core::timer::{drive, parse_duration_minutes};
use liftlog_core::Config;

use super::common::{open_timer, print_event, print_snapshot, runtime, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a full-length rest countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Stop and show the full duration again
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Set the rest length in minutes (only while idle)
    Duration {
        /// Whole minutes
        minutes: String,
    },
    /// Follow the running countdown until it ends
    Watch,
}

pub fn run(action: TimerAction) -> CliResult {
    let config = Config::load_or_default();
    let mut timer = open_timer(&config)?;

    match action {
        TimerAction::Start => match timer.start() {
            Some(event) => print_event(&event)?,
            None => print_snapshot(&timer)?,
        },
        TimerAction::Pause => match timer.pause() {
            Some(event) => print_event(&event)?,
            None => print_snapshot(&timer)?,
        },
        TimerAction::Reset => {
            if let Some(event) = timer.reset() {
                print_event(&event)?;
            }
        }
        TimerAction::Status => {
            // Coming back to the page: recompute from the anchor now.
            if let Some(event) = timer.visibility_changed(true) {
                print_event(&event)?;
            }
            print_snapshot(&timer)?;
        }
        TimerAction::Duration { minutes } => {
            let event = match parse_duration_minutes(&minutes) {
                Some(m) => timer.set_duration(m),
                None => {
                    eprintln!(
                        "invalid duration '{minutes}', keeping {} min",
                        timer.duration_secs() / 60
                    );
                    None
                }
            };
            match event {
                Some(event) => print_event(&event)?,
                None => {
                    if timer.is_running() {
                        eprintln!("duration can only change while the timer is idle");
                    }
                    print_snapshot(&timer)?;
                }
            }
        }
        TimerAction::Watch => {
            if !timer.is_running() {
                print_snapshot(&timer)?;
                return Ok(());
            }
            let rt = runtime()?;
            let expired = rt.block_on(drive(&mut timer, |snap| {
                eprint!("\r{} ", snap.display);
            }));
            eprintln!();
            match expired {
                Some(event) => print_event(&event)?,
                None => print_snapshot(&timer)?,
            }
        }
    }
    Ok(())
}
