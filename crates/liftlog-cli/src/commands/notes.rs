use clap::Subcommand;
use liftlog_core::session::api::NotesUpdate;
use liftlog_core::session::WorkoutBackend;
use liftlog_core::Config;

use super::common::{api, runtime, CliResult};

#[derive(Subcommand)]
pub enum NotesAction {
    /// Replace the notes of an exercise
    Update {
        exercise_session_id: i64,
        notes: String,
    },
}

pub fn run(action: NotesAction) -> CliResult {
    let config = Config::load_or_default();
    let api = api(&config)?;

    match action {
        NotesAction::Update {
            exercise_session_id,
            notes,
        } => {
            let update = NotesUpdate {
                exercise_session_id,
                notes,
            };
            runtime()?.block_on(api.update_notes(&update))?;
            println!("saved");
        }
    }
    Ok(())
}
