use crate::geometry::RectI32;

/// Debounce quiet interval: pointer movement must pause this long before a
/// recognition cycle starts.
pub const DEBOUNCE_INTERVAL_MS: u32 = 300;

/// Capture-session phase.
///
/// The phase variable doubles as the at-most-one-in-flight recognition gate:
/// `DebounceElapsed` only dispatches from `Stabilizing`, and a delivery only
/// lands in `RecognitionInFlight`. Everything else is dropped, so a second
/// dispatch can never overlap the first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No session. Pointer-down starts one.
    #[default]
    Idle,
    /// Pointer is down, rectangle is live, no quiet interval elapsed yet.
    Dragging,
    /// Rectangle is live and the debounce timer is pending.
    Stabilizing,
    /// A recognition task for the current rectangle is running off-thread.
    RecognitionInFlight,
    /// The latest recognition result (or an abandoned cycle) has settled.
    Displaying,
    /// Session ended at pointer-up. Terminal; `ResetToIdle` starts fresh.
    Closed,
}

/// Input actions routed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Primary button pressed on the capture overlay.
    PointerDown { x: i32, y: i32 },
    /// Pointer moved while the primary button is held.
    PointerMove { x: i32, y: i32 },
    /// Primary button released.
    PointerUp { x: i32, y: i32 },
    /// The debounce timer fired: no movement for the quiet interval.
    DebounceElapsed,
    /// Recognition finished and produced text (possibly empty).
    RecognitionDelivered { text: String },
    /// The current recognition cycle was abandoned (snapshot or OCR failure).
    ///
    /// Re-opens the dispatch gate and leaves the displayed text untouched.
    RecognitionAbandoned,
    /// Host finished tearing the session down.
    ResetToIdle,
}

/// Effects requested by the reducer (executed by the host).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show the rubber band at the given (initially empty) rectangle.
    ShowRubberBand { rect: RectI32 },
    /// Move/resize the visible rubber band.
    UpdateRubberBand { rect: RectI32 },
    /// (Re)start the debounce timer. Restart-on-activity: an already pending
    /// timer is cancelled and rescheduled.
    RestartDebounce,
    /// Cancel the debounce timer.
    StopDebounce,
    /// Clear the result surface and make it visible.
    ShowResultSurface,
    /// Replace the result surface text (resizes to fit).
    SetResultText { text: String },
    /// Snapshot the rectangle region and run recognition off-thread.
    DispatchRecognition { rect: RectI32 },
    /// Final commit: clipboard write plus optional log append.
    CommitText { text: String },
    /// Hide the rubber band and the result surface.
    HideOverlays,
    /// The interaction is over; the host should close the capture window.
    CloseSession,
}

/// Capture-session state machine.
///
/// One instance lives for the whole app; a session is the span from
/// pointer-down to pointer-up. All reductions run on the UI thread.
#[derive(Debug, Default)]
pub struct Model {
    phase: Phase,
    origin: Option<(i32, i32)>,
    rect: Option<RectI32>,
    displayed_text: String,
    surface_visible: bool,
    // The rectangle changed while a recognition was in flight; the next
    // delivery or abandonment resumes stabilizing instead of settling.
    moved_in_flight: bool,
}

impl Model {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current selection rectangle, if a session is active.
    pub fn selection(&self) -> Option<RectI32> {
        self.rect
    }

    /// Text currently shown on the result surface.
    pub fn displayed_text(&self) -> &str {
        &self.displayed_text
    }

    pub fn is_surface_visible(&self) -> bool {
        self.surface_visible
    }

    /// Phase after a recognition cycle ends. A rectangle change during the
    /// cycle means a stabilization is still pending, so its timer fire must
    /// pass the gate and dispatch for the new rectangle.
    fn settle_phase(&mut self) -> Phase {
        if self.moved_in_flight {
            self.moved_in_flight = false;
            Phase::Stabilizing
        } else {
            Phase::Displaying
        }
    }

    fn session_active(&self) -> bool {
        matches!(
            self.phase,
            Phase::Dragging | Phase::Stabilizing | Phase::RecognitionInFlight | Phase::Displaying
        )
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::PointerDown { x, y } => {
                // Precondition: one session per surface. A second press while
                // a session is active is ignored rather than restarting it.
                if self.phase != Phase::Idle {
                    return Vec::new();
                }

                let rect = RectI32::at_point(x, y);
                self.phase = Phase::Dragging;
                self.origin = Some((x, y));
                self.rect = Some(rect);
                self.displayed_text.clear();
                self.surface_visible = false;

                vec![Effect::ShowRubberBand { rect }]
            }

            Action::PointerMove { x, y } => {
                if !self.session_active() {
                    return Vec::new();
                }
                let Some((ox, oy)) = self.origin else {
                    return Vec::new();
                };

                let rect = RectI32::from_points(ox, oy, x, y);
                self.rect = Some(rect);

                // Movement during an in-flight recognition restarts the timer
                // but must not change the gate: fires are dropped until the
                // in-flight result is delivered or abandoned. The pending
                // stabilization is remembered so it dispatches afterwards.
                if self.phase == Phase::RecognitionInFlight {
                    self.moved_in_flight = true;
                } else {
                    self.phase = Phase::Stabilizing;
                }

                vec![
                    Effect::UpdateRubberBand { rect },
                    Effect::RestartDebounce,
                ]
            }

            Action::DebounceElapsed => {
                // The gate: only a pending stabilization dispatches. Fires in
                // RecognitionInFlight (or any other phase) are dropped.
                if self.phase != Phase::Stabilizing {
                    return Vec::new();
                }
                let Some(rect) = self.rect else {
                    return Vec::new();
                };

                let mut effects = Vec::new();
                if !self.surface_visible {
                    self.surface_visible = true;
                    self.displayed_text.clear();
                    effects.push(Effect::ShowResultSurface);
                }

                self.phase = Phase::RecognitionInFlight;
                effects.push(Effect::StopDebounce);
                effects.push(Effect::DispatchRecognition { rect });
                effects
            }

            Action::RecognitionDelivered { text } => {
                // Stale deliveries (session closed, or never in flight) are a
                // race outcome, not an error: drop them.
                if self.phase != Phase::RecognitionInFlight {
                    return Vec::new();
                }

                self.phase = self.settle_phase();
                self.displayed_text = text.clone();
                vec![Effect::SetResultText { text }]
            }

            Action::RecognitionAbandoned => {
                if self.phase != Phase::RecognitionInFlight {
                    return Vec::new();
                }

                // Skip this cycle only: prior text stays, gate re-opens.
                self.phase = self.settle_phase();
                Vec::new()
            }

            Action::PointerUp { x, y } => {
                if !self.session_active() {
                    return Vec::new();
                }

                if let Some((ox, oy)) = self.origin {
                    self.rect = Some(RectI32::from_points(ox, oy, x, y));
                }

                self.phase = Phase::Closed;
                vec![
                    Effect::StopDebounce,
                    Effect::CommitText {
                        text: self.displayed_text.clone(),
                    },
                    Effect::HideOverlays,
                    Effect::CloseSession,
                ]
            }

            Action::ResetToIdle => {
                *self = Model::default();
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch_count(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::DispatchRecognition { .. }))
            .count()
    }

    #[test]
    fn pointer_down_starts_session_with_empty_rect() {
        let mut m = Model::default();
        let eff = m.reduce(Action::PointerDown { x: 100, y: 100 });

        assert_eq!(m.phase(), Phase::Dragging);
        assert_eq!(
            eff,
            vec![Effect::ShowRubberBand {
                rect: RectI32::at_point(100, 100)
            }]
        );
    }

    #[test]
    fn second_pointer_down_is_ignored_while_active() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        let eff = m.reduce(Action::PointerDown { x: 50, y: 50 });

        assert!(eff.is_empty());
        assert_eq!(m.selection(), Some(RectI32::at_point(0, 0)));
    }

    #[test]
    fn moves_track_normalized_rect_and_restart_debounce() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 100, y: 100 });
        let eff = m.reduce(Action::PointerMove { x: 400, y: 300 });

        let expected = RectI32 {
            left: 100,
            top: 100,
            right: 400,
            bottom: 300,
        };
        assert_eq!(expected.width(), 300);
        assert_eq!(expected.height(), 200);
        assert_eq!(m.phase(), Phase::Stabilizing);
        assert_eq!(
            eff,
            vec![
                Effect::UpdateRubberBand { rect: expected },
                Effect::RestartDebounce,
            ]
        );

        // Dragging up/left still yields a normalized rect.
        let eff = m.reduce(Action::PointerMove { x: 40, y: 20 });
        assert_eq!(
            eff[0],
            Effect::UpdateRubberBand {
                rect: RectI32 {
                    left: 40,
                    top: 20,
                    right: 100,
                    bottom: 100,
                }
            }
        );
    }

    #[test]
    fn moves_alone_never_dispatch_recognition() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });

        let mut all = Vec::new();
        for i in 1..50 {
            all.extend(m.reduce(Action::PointerMove { x: i, y: i }));
        }
        assert_eq!(dispatch_count(&all), 0);
    }

    #[test]
    fn debounce_fires_exactly_one_dispatch_and_shows_surface() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 100, y: 100 });
        m.reduce(Action::PointerMove { x: 400, y: 300 });

        let eff = m.reduce(Action::DebounceElapsed);
        assert_eq!(m.phase(), Phase::RecognitionInFlight);
        assert_eq!(
            eff,
            vec![
                Effect::ShowResultSurface,
                Effect::StopDebounce,
                Effect::DispatchRecognition {
                    rect: RectI32 {
                        left: 100,
                        top: 100,
                        right: 400,
                        bottom: 300,
                    }
                },
            ]
        );
    }

    #[test]
    fn gate_drops_fire_while_recognition_in_flight() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerMove { x: 200, y: 200 });
        let first = m.reduce(Action::DebounceElapsed);
        assert_eq!(dispatch_count(&first), 1);

        // A short movement re-arms the timer, but a fire before delivery must
        // not dispatch a second task.
        m.reduce(Action::PointerMove { x: 210, y: 210 });
        assert_eq!(m.phase(), Phase::RecognitionInFlight);
        let second = m.reduce(Action::DebounceElapsed);
        assert!(second.is_empty());

        // After delivery the next stabilization dispatches again.
        m.reduce(Action::RecognitionDelivered {
            text: "first".to_string(),
        });
        m.reduce(Action::PointerMove { x: 220, y: 220 });
        let third = m.reduce(Action::DebounceElapsed);
        assert_eq!(dispatch_count(&third), 1);
    }

    #[test]
    fn stabilization_pending_at_delivery_dispatches_next_fire() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerMove { x: 200, y: 200 });
        let first = m.reduce(Action::DebounceElapsed);
        assert_eq!(dispatch_count(&first), 1);

        // The rectangle changes while the first recognition is in flight.
        m.reduce(Action::PointerMove { x: 260, y: 260 });
        assert_eq!(m.phase(), Phase::RecognitionInFlight);

        // Delivery resumes the pending stabilization rather than settling.
        m.reduce(Action::RecognitionDelivered {
            text: "first".to_string(),
        });
        assert_eq!(m.phase(), Phase::Stabilizing);

        let second = m.reduce(Action::DebounceElapsed);
        assert_eq!(
            second.last(),
            Some(&Effect::DispatchRecognition {
                rect: RectI32::from_points(0, 0, 260, 260)
            })
        );
    }

    #[test]
    fn stabilization_pending_at_abandonment_dispatches_next_fire() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerMove { x: 200, y: 200 });
        m.reduce(Action::DebounceElapsed);

        m.reduce(Action::PointerMove { x: 260, y: 260 });
        m.reduce(Action::RecognitionAbandoned);
        assert_eq!(m.phase(), Phase::Stabilizing);

        let eff = m.reduce(Action::DebounceElapsed);
        assert_eq!(dispatch_count(&eff), 1);
    }

    #[test]
    fn delivery_without_in_flight_movement_settles() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerMove { x: 200, y: 200 });
        m.reduce(Action::DebounceElapsed);
        m.reduce(Action::RecognitionDelivered {
            text: "still".to_string(),
        });

        assert_eq!(m.phase(), Phase::Displaying);
        assert!(m.reduce(Action::DebounceElapsed).is_empty());
    }

    #[test]
    fn delivery_updates_surface_but_not_clipboard() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 100, y: 100 });
        m.reduce(Action::PointerMove { x: 400, y: 300 });
        m.reduce(Action::DebounceElapsed);

        let eff = m.reduce(Action::RecognitionDelivered {
            text: "こんにちは".to_string(),
        });

        assert_eq!(m.phase(), Phase::Displaying);
        assert_eq!(m.displayed_text(), "こんにちは");
        assert_eq!(
            eff,
            vec![Effect::SetResultText {
                text: "こんにちは".to_string()
            }]
        );
        // Commit (clipboard) happens only at pointer-up.
        assert!(!eff.iter().any(|e| matches!(e, Effect::CommitText { .. })));
    }

    #[test]
    fn abandoned_cycle_keeps_prior_text_and_reopens_gate() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerMove { x: 100, y: 100 });
        m.reduce(Action::DebounceElapsed);
        m.reduce(Action::RecognitionDelivered {
            text: "kept".to_string(),
        });

        m.reduce(Action::PointerMove { x: 150, y: 150 });
        m.reduce(Action::DebounceElapsed);
        let eff = m.reduce(Action::RecognitionAbandoned);

        assert!(eff.is_empty());
        assert_eq!(m.displayed_text(), "kept");
        assert_eq!(m.phase(), Phase::Displaying);

        // Gate is open again.
        m.reduce(Action::PointerMove { x: 160, y: 160 });
        let eff = m.reduce(Action::DebounceElapsed);
        assert_eq!(dispatch_count(&eff), 1);
    }

    #[test]
    fn pointer_up_before_debounce_commits_empty_text() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerMove { x: 50, y: 50 });
        let eff = m.reduce(Action::PointerUp { x: 50, y: 50 });

        assert_eq!(m.phase(), Phase::Closed);
        assert_eq!(
            eff,
            vec![
                Effect::StopDebounce,
                Effect::CommitText {
                    text: String::new()
                },
                Effect::HideOverlays,
                Effect::CloseSession,
            ]
        );
    }

    #[test]
    fn pointer_up_commits_displayed_text() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerMove { x: 200, y: 100 });
        m.reduce(Action::DebounceElapsed);
        m.reduce(Action::RecognitionDelivered {
            text: "hello".to_string(),
        });

        let eff = m.reduce(Action::PointerUp { x: 200, y: 100 });
        assert!(eff.contains(&Effect::CommitText {
            text: "hello".to_string()
        }));
    }

    #[test]
    fn delivery_after_close_is_dropped() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerMove { x: 200, y: 100 });
        m.reduce(Action::DebounceElapsed);

        // Pointer-up while the task is still in flight.
        m.reduce(Action::PointerUp { x: 200, y: 100 });

        let eff = m.reduce(Action::RecognitionDelivered {
            text: "late".to_string(),
        });
        assert!(eff.is_empty());
        assert_eq!(m.phase(), Phase::Closed);
        assert_ne!(m.displayed_text(), "late");
    }

    #[test]
    fn reset_starts_the_next_session_fresh() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerUp { x: 10, y: 10 });
        m.reduce(Action::ResetToIdle);

        assert_eq!(m.phase(), Phase::Idle);
        assert_eq!(m.selection(), None);
        assert!(!m.is_surface_visible());

        let eff = m.reduce(Action::PointerDown { x: 5, y: 5 });
        assert_eq!(m.phase(), Phase::Dragging);
        assert_eq!(eff.len(), 1);
    }

    #[test]
    fn surface_shown_once_per_session() {
        let mut m = Model::default();
        m.reduce(Action::PointerDown { x: 0, y: 0 });
        m.reduce(Action::PointerMove { x: 100, y: 100 });
        let first = m.reduce(Action::DebounceElapsed);
        assert!(first.contains(&Effect::ShowResultSurface));

        m.reduce(Action::RecognitionDelivered {
            text: "a".to_string(),
        });
        m.reduce(Action::PointerMove { x: 120, y: 120 });
        let second = m.reduce(Action::DebounceElapsed);
        assert!(!second.contains(&Effect::ShowResultSurface));
    }
}
