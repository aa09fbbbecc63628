use clap::Subcommand;
use liftlog_core::session::api::AddSetRequest;
use liftlog_core::session::{SetRow, WorkoutBackend};
use liftlog_core::Config;
use tracing::warn;

use super::common::{api, open_timer, print_event, runtime, CliResult};

#[derive(Subcommand)]
pub enum SetAction {
    /// Save weight, reps and completion for a set
    Update {
        set_id: i64,
        #[arg(long, default_value = "0")]
        weight: String,
        #[arg(long, default_value = "0")]
        reps: String,
        /// Mark the set done; starts the rest timer if it is idle
        #[arg(long)]
        completed: bool,
    },
    /// Append an empty set to an exercise
    Add {
        exercise_session_id: i64,
    },
}

pub fn run(action: SetAction) -> CliResult {
    let config = Config::load_or_default();
    let api = api(&config)?;
    let rt = runtime()?;

    match action {
        SetAction::Update {
            set_id,
            weight,
            reps,
            completed,
        } => {
            let row = SetRow {
                set_id,
                weight_input: weight,
                reps_input: reps,
                completed,
            };
            let update = row.to_update();
            let saved = rt.block_on(api.update_set(&update));
            match &saved {
                Ok(()) => println!("{}", serde_json::to_string_pretty(&update)?),
                Err(e) => warn!(set_id, error = %e, "set save failed"),
            }

            // The rest period starts whether or not the backend took the save.
            if completed {
                let mut timer = open_timer(&config)?;
                if !timer.is_running() {
                    timer.reset();
                    if let Some(event) = timer.start() {
                        print_event(&event)?;
                    }
                }
            }
            saved?;
        }
        SetAction::Add {
            exercise_session_id,
        } => {
            let added = rt.block_on(api.add_set(&AddSetRequest {
                exercise_session_id,
            }))?;
            println!("{}", serde_json::to_string_pretty(&added)?);
        }
    }
    Ok(())
}
