use clap::{Args, Subcommand};
use liftlog_core::session::{ExercisePage, Focus, PageLayout, PageResponse};
use liftlog_core::storage::{slots, Database};
use liftlog_core::Config;

use super::common::{api, open_timer, print_event, runtime, CliResult};

#[derive(Args)]
pub struct LayoutArgs {
    /// Workout session id
    #[arg(long)]
    session: i64,
    /// Exercise session id
    #[arg(long, default_value = "0")]
    exercise_session: i64,
    /// Position of the current exercise
    #[arg(long)]
    order: i64,
    #[arg(long)]
    has_previous: bool,
    #[arg(long)]
    has_next: bool,
}

impl From<LayoutArgs> for PageLayout {
    fn from(args: LayoutArgs) -> Self {
        PageLayout {
            session_id: args.session,
            exercise_session_id: args.exercise_session,
            current_order: args.order,
            has_previous: args.has_previous,
            has_next: args.has_next,
        }
    }
}

#[derive(Subcommand)]
pub enum NavAction {
    /// Apply a keyboard shortcut (Space, KeyR, ArrowLeft, ArrowRight)
    Key {
        code: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Resolve a horizontal swipe between two x positions
    Swipe {
        from: f64,
        to: f64,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Toggle large display mode
    LargeMode,
}

pub fn run(action: NavAction) -> CliResult {
    let config = Config::load_or_default();

    let (layout, gesture) = match action {
        NavAction::LargeMode => return toggle_large_mode(),
        NavAction::Key { code, layout } => (layout, Gesture::Key(code)),
        NavAction::Swipe { from, to, layout } => (layout, Gesture::Swipe(from, to)),
    };

    let timer = open_timer(&config)?;
    let mut page = ExercisePage::new(layout.into(), api(&config)?, timer, Vec::new(), "")
        .with_swipe_distance(config.navigation.min_swipe_distance);
    let response = runtime()?.block_on(async {
        match gesture {
            Gesture::Key(code) => page.key_pressed(&code, Focus::Page).await,
            Gesture::Swipe(from, to) => {
                page.touch_start(from);
                page.touch_end(to).await.into()
            }
        }
    });

    match response {
        PageResponse::Timer(event) => print_event(&event)?,
        PageResponse::NavigateTo(path) => println!("{path}"),
        PageResponse::Nothing => {}
    }
    Ok(())
}

/// Display preference only; never touches the backend.
fn toggle_large_mode() -> CliResult {
    let mut db = Database::open()?;
    let enabled = !slots::load_large_mode(&db).unwrap_or(false);
    slots::save_large_mode(&mut db, enabled)?;
    println!("large mode: {enabled}");
    Ok(())
}

enum Gesture {
    Key(String),
    Swipe(f64, f64),
}
