use ts_app::{AppModel, Effect, session};

use crate::command::Command;
use crate::constants::DEBOUNCE_TIMER_ID;

pub fn command_from_effect(effect: Effect) -> Option<Command> {
    match effect {
        Effect::Session(eff) => match eff {
            // The rubber band is derived from the core model at paint time; geometry
            // changes only need a redraw.
            session::Effect::ShowRubberBand { .. } | session::Effect::UpdateRubberBand { .. } => {
                Some(Command::RequestRedraw)
            }

            session::Effect::RestartDebounce => Some(Command::StartTimer(
                DEBOUNCE_TIMER_ID,
                session::DEBOUNCE_INTERVAL_MS,
            )),
            session::Effect::StopDebounce => Some(Command::StopTimer(DEBOUNCE_TIMER_ID)),

            session::Effect::ShowResultSurface => Some(Command::ShowResultSurface),
            session::Effect::SetResultText { text } => Some(Command::SetResultText(text)),
            session::Effect::DispatchRecognition { rect } => {
                Some(Command::DispatchRecognition(rect))
            }
            session::Effect::CommitText { text } => Some(Command::CommitText(text)),
            session::Effect::HideOverlays => Some(Command::HideOverlays),
            session::Effect::CloseSession => Some(Command::CloseWindow),
        },

        Effect::ShowCaptureWindow => Some(Command::ShowCaptureWindow),
        Effect::HideWindow => Some(Command::HideWindow),
        Effect::ResetToInitialState => Some(Command::ResetToInitialState),
    }
}

pub fn commands_from_effects(effects: impl IntoIterator<Item = Effect>) -> Vec<Command> {
    effects
        .into_iter()
        .filter_map(command_from_effect)
        .collect()
}

/// Reduce an action and translate the resulting effects into host commands.
pub fn dispatch(core: &mut AppModel, action: ts_app::Action) -> Vec<Command> {
    commands_from_effects(core.reduce(action))
}
