pub mod geometry;
pub mod session;

/// Top-level application actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Session(session::Action),
    /// Named trigger from the hotkey collaborator: open a new capture session.
    StartCapture,
    /// Cancel the current flow (e.g. ESC).
    Cancel,
}

/// Top-level application effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Session(session::Effect),
    /// Show the full-screen capture overlay window.
    ShowCaptureWindow,
    /// Hide the capture overlay window.
    HideWindow,
    /// Reset the host back to its initial state.
    ResetToInitialState,
}

/// Core app model.
#[derive(Debug, Default)]
pub struct AppModel {
    session: session::Model,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &session::Model {
        &self.session
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Session(a) => self
                .session
                .reduce(a)
                .into_iter()
                .map(Effect::Session)
                .collect(),

            Action::StartCapture => {
                // Ignore the trigger while a session is already running.
                if self.session.phase() != session::Phase::Idle {
                    return Vec::new();
                }
                vec![Effect::ShowCaptureWindow]
            }

            Action::Cancel => {
                // Keep session state consistent with the host reset.
                let _ = self.session.reduce(session::Action::ResetToIdle);
                vec![Effect::ResetToInitialState, Effect::HideWindow]
            }
        }
    }
}
