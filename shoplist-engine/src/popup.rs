//! Preview popup lifecycle.
//!
//! The popup is one shared element driven by hover, click and key events that
//! arrive in any order. The whole lifecycle is a single transition function
//! from `(state, event)` to `(state, effects)`; hosts perform the effects and
//! feed timer expiries back in as events.
//!
//! Timers are never cancelled by the host racing a callback. Each scheduled
//! timer carries a token, and an expiry is acted on only when its token still
//! matches the state. A stale debounce from fast pointer traversal simply
//! finds a different token and is dropped.

use serde::{Deserialize, Serialize};

use crate::constants::{HIDE_GRACE_MS, SHOW_DELAY_MS};
use crate::model::CustomItemRecord;
use crate::placement::Point;

pub type TimerToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupTiming {
    pub show_delay_ms: u32,
    pub hide_grace_ms: u32,
}

impl Default for PopupTiming {
    fn default() -> Self {
        Self {
            show_delay_ms: SHOW_DELAY_MS,
            hide_grace_ms: HIDE_GRACE_MS,
        }
    }
}

/// Synthesized preview body for a user-added item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPreview {
    pub name: String,
    pub rarity: String,
    pub value: String,
    pub description: String,
}

impl CustomPreview {
    /// Build from a record and the price currently displayed for it.
    #[must_use]
    pub fn from_record(record: &CustomItemRecord, display_price: &str) -> Self {
        Self {
            name: record.name.clone(),
            rarity: record.rarity_label(),
            value: display_price.to_string(),
            description: record.description.clone(),
        }
    }
}

/// What the popup shows once it materializes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource {
    /// Detail page loaded into an embedded document.
    Remote { url: String, title: String },
    Custom(CustomPreview),
}

impl PreviewSource {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Remote { title, .. } => title,
            Self::Custom(preview) => &preview.name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Show,
    HideGrace,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupState<T> {
    Hidden,
    /// Waiting out the hover debounce. `previous` is the preview still on
    /// screen, if any.
    Pending {
        target: T,
        source: PreviewSource,
        pointer: Point,
        timer: TimerToken,
        previous: Option<(T, PreviewSource)>,
    },
    Shown {
        target: T,
        source: PreviewSource,
        hide_timer: Option<TimerToken>,
    },
}

impl<T> PopupState<T> {
    #[must_use]
    pub const fn target(&self) -> Option<&T> {
        match self {
            Self::Hidden => None,
            Self::Pending { target, .. } | Self::Shown { target, .. } => Some(target),
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(
            self,
            Self::Shown { .. } | Self::Pending { previous: Some(_), .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupEvent<T> {
    HoverEnter {
        target: T,
        source: PreviewSource,
        pointer: Point,
    },
    HoverLeave {
        target: T,
    },
    TimerFired {
        token: TimerToken,
        /// Whether the pointer is over the popup when the timer fires.
        pointer_over_popup: bool,
    },
    PopupPointerLeave,
    DocumentClick {
        inside_popup: bool,
        on_previewable: bool,
    },
    EscapePressed,
    CloseRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupEffect<T> {
    StartTimer {
        token: TimerToken,
        kind: TimerKind,
        delay_ms: u32,
    },
    CancelTimer {
        token: TimerToken,
    },
    /// Populate title and content, position, and make visible.
    Render {
        target: T,
        source: PreviewSource,
        pointer: Point,
    },
    /// Remove visibility and clear the remote source to stop in-flight loads.
    Hide,
}

/// Monotonic source of timer tokens.
#[derive(Debug, Clone, Default)]
pub struct TimerTokens {
    last: TimerToken,
}

impl TimerTokens {
    pub fn next(&mut self) -> TimerToken {
        self.last += 1;
        self.last
    }
}

fn hide_from<T>(state: PopupState<T>) -> (PopupState<T>, Vec<PopupEffect<T>>) {
    let effects = match state {
        PopupState::Hidden => Vec::new(),
        PopupState::Pending {
            timer, previous, ..
        } => {
            let mut effects = vec![PopupEffect::CancelTimer { token: timer }];
            if previous.is_some() {
                effects.push(PopupEffect::Hide);
            }
            effects
        }
        PopupState::Shown { hide_timer, .. } => {
            let mut effects: Vec<PopupEffect<T>> = hide_timer
                .map(|token| PopupEffect::CancelTimer { token })
                .into_iter()
                .collect();
            effects.push(PopupEffect::Hide);
            effects
        }
    };
    (PopupState::Hidden, effects)
}

/// Apply one event.
pub fn transition<T>(
    state: PopupState<T>,
    event: PopupEvent<T>,
    tokens: &mut TimerTokens,
    timing: PopupTiming,
) -> (PopupState<T>, Vec<PopupEffect<T>>)
where
    T: Clone + PartialEq,
{
    match event {
        PopupEvent::HoverEnter {
            target,
            source,
            pointer,
        } => hover_enter(state, target, source, pointer, tokens, timing),
        PopupEvent::HoverLeave { target } => hover_leave(state, &target, tokens, timing),
        PopupEvent::TimerFired {
            token,
            pointer_over_popup,
        } => timer_fired(state, token, pointer_over_popup),
        PopupEvent::PopupPointerLeave => {
            if state.is_visible() {
                hide_from(state)
            } else {
                (state, Vec::new())
            }
        }
        PopupEvent::DocumentClick {
            inside_popup,
            on_previewable,
        } => {
            if inside_popup || on_previewable {
                (state, Vec::new())
            } else {
                hide_from(state)
            }
        }
        PopupEvent::EscapePressed | PopupEvent::CloseRequested => hide_from(state),
    }
}

fn hover_enter<T>(
    state: PopupState<T>,
    target: T,
    source: PreviewSource,
    pointer: Point,
    tokens: &mut TimerTokens,
    timing: PopupTiming,
) -> (PopupState<T>, Vec<PopupEffect<T>>)
where
    T: Clone + PartialEq,
{
    let mut effects = Vec::new();
    let previous = match state {
        PopupState::Hidden => None,
        PopupState::Pending {
            timer, previous, ..
        } => {
            effects.push(PopupEffect::CancelTimer { token: timer });
            previous
        }
        PopupState::Shown {
            target: shown,
            source: shown_source,
            hide_timer,
        } => {
            if let Some(token) = hide_timer {
                effects.push(PopupEffect::CancelTimer { token });
            }
            if shown == target {
                // Pointer came back to the link it is already previewing.
                let state = PopupState::Shown {
                    target: shown,
                    source: shown_source,
                    hide_timer: None,
                };
                return (state, effects);
            }
            Some((shown, shown_source))
        }
    };
    let timer = tokens.next();
    effects.push(PopupEffect::StartTimer {
        token: timer,
        kind: TimerKind::Show,
        delay_ms: timing.show_delay_ms,
    });
    let next = PopupState::Pending {
        target,
        source,
        pointer,
        timer,
        previous,
    };
    (next, effects)
}

fn hover_leave<T>(
    state: PopupState<T>,
    left: &T,
    tokens: &mut TimerTokens,
    timing: PopupTiming,
) -> (PopupState<T>, Vec<PopupEffect<T>>)
where
    T: Clone + PartialEq,
{
    if state.target() != Some(left) {
        return (state, Vec::new());
    }
    match state {
        PopupState::Shown {
            target,
            source,
            hide_timer: None,
        } => {
            let token = tokens.next();
            let effects = vec![PopupEffect::StartTimer {
                token,
                kind: TimerKind::HideGrace,
                delay_ms: timing.hide_grace_ms,
            }];
            let next = PopupState::Shown {
                target,
                source,
                hide_timer: Some(token),
            };
            (next, effects)
        }
        shown @ PopupState::Shown { .. } => (shown, Vec::new()),
        PopupState::Pending {
            timer,
            previous: Some((target, source)),
            ..
        } => {
            // The earlier preview stays up through the grace delay.
            let token = tokens.next();
            let effects = vec![
                PopupEffect::CancelTimer { token: timer },
                PopupEffect::StartTimer {
                    token,
                    kind: TimerKind::HideGrace,
                    delay_ms: timing.hide_grace_ms,
                },
            ];
            let next = PopupState::Shown {
                target,
                source,
                hide_timer: Some(token),
            };
            (next, effects)
        }
        pending @ PopupState::Pending { .. } => hide_from(pending),
        PopupState::Hidden => (PopupState::Hidden, Vec::new()),
    }
}

fn timer_fired<T>(
    state: PopupState<T>,
    token: TimerToken,
    pointer_over_popup: bool,
) -> (PopupState<T>, Vec<PopupEffect<T>>)
where
    T: Clone + PartialEq,
{
    match state {
        PopupState::Pending {
            target,
            source,
            pointer,
            timer,
            ..
        } if timer == token => {
            let effects = vec![PopupEffect::Render {
                target: target.clone(),
                source: source.clone(),
                pointer,
            }];
            let next = PopupState::Shown {
                target,
                source,
                hide_timer: None,
            };
            (next, effects)
        }
        PopupState::Shown {
            target,
            source,
            hide_timer: Some(timer),
        } if timer == token => {
            if pointer_over_popup {
                let next = PopupState::Shown {
                    target,
                    source,
                    hide_timer: None,
                };
                (next, Vec::new())
            } else {
                (PopupState::Hidden, vec![PopupEffect::Hide])
            }
        }
        stale => (stale, Vec::new()),
    }
}

/// Owns the popup state and its token counter.
#[derive(Debug, Clone)]
pub struct PopupController<T> {
    state: PopupState<T>,
    tokens: TimerTokens,
    timing: PopupTiming,
}

impl<T> Default for PopupController<T> {
    fn default() -> Self {
        Self::new(PopupTiming::default())
    }
}

impl<T> PopupController<T> {
    #[must_use]
    pub fn new(timing: PopupTiming) -> Self {
        Self {
            state: PopupState::Hidden,
            tokens: TimerTokens::default(),
            timing,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &PopupState<T> {
        &self.state
    }

    #[must_use]
    pub const fn timing(&self) -> PopupTiming {
        self.timing
    }

    #[must_use]
    pub const fn current_target(&self) -> Option<&T> {
        self.state.target()
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.state.is_visible()
    }
}

impl<T> PopupController<T>
where
    T: Clone + PartialEq,
{
    pub fn handle(&mut self, event: PopupEvent<T>) -> Vec<PopupEffect<T>> {
        let current = std::mem::replace(&mut self.state, PopupState::Hidden);
        let (next, effects) = transition(current, event, &mut self.tokens, self.timing);
        self.state = next;
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(title: &str) -> PreviewSource {
        PreviewSource::Remote {
            url: format!("https://example.test/magicitems/magic-item?id={title}"),
            title: title.to_string(),
        }
    }

    fn enter(target: u32) -> PopupEvent<u32> {
        PopupEvent::HoverEnter {
            target,
            source: remote(&target.to_string()),
            pointer: Point::new(10.0, 20.0),
        }
    }

    fn started_token(effects: &[PopupEffect<u32>]) -> TimerToken {
        effects
            .iter()
            .find_map(|effect| match effect {
                PopupEffect::StartTimer { token, .. } => Some(*token),
                _ => None,
            })
            .expect("a timer was started")
    }

    fn fire(token: TimerToken) -> PopupEvent<u32> {
        PopupEvent::TimerFired {
            token,
            pointer_over_popup: false,
        }
    }

    fn shown(controller: &mut PopupController<u32>, target: u32) {
        let token = started_token(&controller.handle(enter(target)));
        let effects = controller.handle(fire(token));
        assert!(matches!(effects.as_slice(), [PopupEffect::Render { .. }]));
    }

    #[test]
    fn hover_starts_debounce_then_renders() {
        let mut controller = PopupController::default();
        let effects = controller.handle(enter(1));
        assert!(matches!(
            effects.as_slice(),
            [PopupEffect::StartTimer {
                kind: TimerKind::Show,
                delay_ms: 300,
                ..
            }]
        ));
        assert!(!controller.is_visible());
        let effects = controller.handle(fire(started_token(&effects)));
        assert_eq!(effects.len(), 1);
        assert!(controller.is_visible());
        assert_eq!(controller.current_target(), Some(&1));
    }

    #[test]
    fn leaving_before_debounce_never_shows() {
        let mut controller = PopupController::default();
        let token = started_token(&controller.handle(enter(1)));
        let effects = controller.handle(PopupEvent::HoverLeave { target: 1 });
        assert_eq!(effects, vec![PopupEffect::CancelTimer { token }]);
        assert!(controller.handle(fire(token)).is_empty());
        assert_eq!(controller.state(), &PopupState::Hidden);
    }

    #[test]
    fn stale_timer_from_fast_traversal_is_ignored() {
        let mut controller = PopupController::default();
        let first = started_token(&controller.handle(enter(1)));
        let second = started_token(&controller.handle(enter(2)));
        assert_ne!(first, second);
        assert!(controller.handle(fire(first)).is_empty());
        let effects = controller.handle(fire(second));
        assert!(matches!(
            effects.as_slice(),
            [PopupEffect::Render { target: 2, .. }]
        ));
    }

    #[test]
    fn leave_schedules_grace_and_popup_hover_keeps_it() {
        let mut controller = PopupController::default();
        shown(&mut controller, 1);
        let effects = controller.handle(PopupEvent::HoverLeave { target: 1 });
        let grace = started_token(&effects);
        assert!(matches!(
            effects.as_slice(),
            [PopupEffect::StartTimer {
                kind: TimerKind::HideGrace,
                delay_ms: 100,
                ..
            }]
        ));
        let effects = controller.handle(PopupEvent::TimerFired {
            token: grace,
            pointer_over_popup: true,
        });
        assert!(effects.is_empty());
        assert!(controller.is_visible());

        let effects = controller.handle(PopupEvent::PopupPointerLeave);
        assert_eq!(effects, vec![PopupEffect::Hide]);
        assert!(!controller.is_visible());
    }

    #[test]
    fn grace_expiry_off_popup_hides() {
        let mut controller = PopupController::default();
        shown(&mut controller, 1);
        let grace = started_token(&controller.handle(PopupEvent::HoverLeave { target: 1 }));
        assert_eq!(controller.handle(fire(grace)), vec![PopupEffect::Hide]);
        assert_eq!(controller.current_target(), None);
    }

    #[test]
    fn returning_to_shown_link_cancels_grace() {
        let mut controller = PopupController::default();
        shown(&mut controller, 1);
        let grace = started_token(&controller.handle(PopupEvent::HoverLeave { target: 1 }));
        let effects = controller.handle(enter(1));
        assert_eq!(effects, vec![PopupEffect::CancelTimer { token: grace }]);
        assert!(controller.handle(fire(grace)).is_empty());
        assert!(controller.is_visible());
    }

    #[test]
    fn hovering_another_link_while_shown_keeps_popup_until_render() {
        let mut controller = PopupController::default();
        shown(&mut controller, 1);
        let token = started_token(&controller.handle(enter(2)));
        assert!(controller.is_visible());
        // Leaving the old link is stale now and does nothing.
        assert!(controller.handle(PopupEvent::HoverLeave { target: 1 }).is_empty());
        let effects = controller.handle(fire(token));
        assert!(matches!(
            effects.as_slice(),
            [PopupEffect::Render { target: 2, .. }]
        ));
    }

    #[test]
    fn crossing_a_second_link_keeps_the_visible_preview_through_grace() {
        let mut controller = PopupController::default();
        shown(&mut controller, 1);
        let show = started_token(&controller.handle(enter(2)));

        let effects = controller.handle(PopupEvent::HoverLeave { target: 2 });
        let grace = match effects.as_slice() {
            [
                PopupEffect::CancelTimer { token },
                PopupEffect::StartTimer {
                    token: grace,
                    kind: TimerKind::HideGrace,
                    delay_ms: 100,
                },
            ] if *token == show => *grace,
            other => panic!("expected a grace delay, got {other:?}"),
        };
        assert!(controller.is_visible());
        assert_eq!(controller.current_target(), Some(&1));
        assert!(controller.handle(fire(show)).is_empty());

        let effects = controller.handle(PopupEvent::TimerFired {
            token: grace,
            pointer_over_popup: true,
        });
        assert!(effects.is_empty());
        assert!(controller.is_visible());
    }

    #[test]
    fn crossing_a_second_link_hides_when_grace_ends_off_popup() {
        let mut controller = PopupController::default();
        shown(&mut controller, 1);
        controller.handle(enter(2));
        let grace = started_token(&controller.handle(PopupEvent::HoverLeave { target: 2 }));
        assert_eq!(controller.handle(fire(grace)), vec![PopupEffect::Hide]);
        assert_eq!(controller.state(), &PopupState::Hidden);
    }

    #[test]
    fn outside_click_and_escape_hide_from_any_state() {
        let mut controller = PopupController::default();
        shown(&mut controller, 1);
        let ignored = controller.handle(PopupEvent::DocumentClick {
            inside_popup: true,
            on_previewable: false,
        });
        assert!(ignored.is_empty());
        let effects = controller.handle(PopupEvent::DocumentClick {
            inside_popup: false,
            on_previewable: false,
        });
        assert_eq!(effects, vec![PopupEffect::Hide]);

        let token = started_token(&controller.handle(enter(3)));
        let effects = controller.handle(PopupEvent::EscapePressed);
        assert_eq!(effects, vec![PopupEffect::CancelTimer { token }]);
        assert!(controller.handle(PopupEvent::EscapePressed).is_empty());
    }

    #[test]
    fn close_button_hides_shown_popup() {
        let mut controller = PopupController::default();
        shown(&mut controller, 4);
        assert_eq!(
            controller.handle(PopupEvent::CloseRequested),
            vec![PopupEffect::Hide]
        );
    }

    #[test]
    fn custom_preview_uses_display_price_and_label() {
        let record = CustomItemRecord {
            id: crate::ItemId::from("custom_1"),
            name: "Ring of X".to_string(),
            rarity: "R".to_string(),
            price: "500 gp".to_string(),
            description: "Shiny.".to_string(),
        };
        let preview = CustomPreview::from_record(&record, "450 gp");
        assert_eq!(preview.rarity, "Rare");
        assert_eq!(preview.value, "450 gp");
        assert_eq!(PreviewSource::Custom(preview).title(), "Ring of X");
    }
}
