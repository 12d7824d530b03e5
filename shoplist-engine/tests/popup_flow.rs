mod common;

use common::MemoryHistory;
use shoplist_engine::{
    Point, PopupEffect, PopupEvent, PreviewSource, ShopConfig, ShopSession, TimerKind, TimerToken,
};

fn remote(id: u32) -> PreviewSource {
    PreviewSource::Remote {
        url: format!("https://shop.example/magicitems/magic-item?id={id}"),
        title: format!("Item {id}"),
    }
}

fn enter(target: u32) -> PopupEvent<u32> {
    PopupEvent::HoverEnter {
        target,
        source: remote(target),
        pointer: Point::new(200.0, 150.0),
    }
}

fn fire(token: TimerToken) -> PopupEvent<u32> {
    PopupEvent::TimerFired {
        token,
        pointer_over_popup: false,
    }
}

fn show_timer(effects: &[PopupEffect<u32>]) -> TimerToken {
    effects
        .iter()
        .find_map(|effect| match effect {
            PopupEffect::StartTimer {
                token,
                kind: TimerKind::Show,
                ..
            } => Some(*token),
            _ => None,
        })
        .expect("show timer started")
}

fn session() -> ShopSession<MemoryHistory, u32> {
    let config = ShopConfig::from_json(r#"{"timing":{"show_delay_ms":250}}"#).unwrap();
    ShopSession::new(MemoryHistory::at("https://shop.example/magicitems"), config)
}

#[test]
fn fast_traversal_only_previews_the_last_link() {
    let mut session = session();
    let popup = session.popup_mut();

    let first = show_timer(&popup.handle(enter(1)));
    let effects = popup.handle(enter(2));
    assert!(effects.contains(&PopupEffect::CancelTimer { token: first }));
    let second = show_timer(&effects);
    assert!(effects.iter().any(|effect| matches!(
        effect,
        PopupEffect::StartTimer { delay_ms: 250, .. }
    )));

    // A callback for the first debounce may still arrive; it is dropped.
    assert!(popup.handle(fire(first)).is_empty());
    assert!(!popup.is_visible());

    let effects = popup.handle(fire(second));
    assert!(matches!(
        effects.as_slice(),
        [PopupEffect::Render { target: 2, .. }]
    ));
    assert_eq!(popup.current_target(), Some(&2));
}

#[test]
fn leaving_before_the_debounce_never_shows() {
    let mut session = session();
    let popup = session.popup_mut();

    let token = show_timer(&popup.handle(enter(3)));
    popup.handle(PopupEvent::HoverLeave { target: 3 });
    assert!(popup.handle(fire(token)).is_empty());
    assert!(!popup.is_visible());
    assert_eq!(popup.current_target(), None);
}

#[test]
fn escape_and_outside_clicks_close_a_visible_preview() {
    let mut session = session();
    let popup = session.popup_mut();

    let token = show_timer(&popup.handle(enter(4)));
    popup.handle(fire(token));
    let effects = popup.handle(PopupEvent::DocumentClick {
        inside_popup: true,
        on_previewable: false,
    });
    assert!(effects.is_empty());
    assert!(popup.is_visible());

    assert_eq!(
        popup.handle(PopupEvent::EscapePressed),
        vec![PopupEffect::Hide]
    );
    assert!(!popup.is_visible());
    assert!(popup.handle(PopupEvent::EscapePressed).is_empty());
}
