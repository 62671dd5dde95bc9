//! Forwards engine input events into the UI library's event queue.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use imbridge_core::{Button, InputListener, Key, UiContext};

use crate::keymap::{map_button, map_key, map_modifier};

/// Input listener that feeds a shared UI context.
///
/// Each handler reports the UI's capture flag for its device, so the engine stops delivering
/// events the UI wants for itself. Focus and resize are never consumed.
pub struct InputAdapter<C> {
    ui: Rc<RefCell<C>>,
}

impl<C: UiContext> InputAdapter<C> {
    pub fn new(ui: Rc<RefCell<C>>) -> Self {
        Self { ui }
    }

    /// Runs `f` against the context, dropping the event if the context is already borrowed.
    fn with_ui(&self, event: &str, f: impl FnOnce(&mut C) -> bool) -> bool {
        match self.ui.try_borrow_mut() {
            Ok(mut ui) => f(&mut *ui),
            Err(_) => {
                log::warn!("UI context is busy, dropping {event} event");
                false
            }
        }
    }

    fn key(&self, key: Key, down: bool) -> bool {
        self.with_ui("key", |ui| {
            if let Some(primary) = map_key(key) {
                if let Some(modifier) = map_modifier(key) {
                    ui.add_key_event(modifier, down);
                }
                ui.add_key_event(primary, down);
            }
            ui.io().want_capture_keyboard
        })
    }

    fn button(&self, button: Button, down: bool) -> bool {
        self.with_ui("mouse button", |ui| {
            if let Some(mapped) = map_button(button) {
                ui.add_mouse_button_event(mapped, down);
            }
            ui.io().want_capture_mouse
        })
    }
}

impl<C: UiContext> InputListener for InputAdapter<C> {
    fn on_key_type(&mut self, codepoint: u32) -> bool {
        self.with_ui("text", |ui| {
            ui.add_input_character(codepoint);
            ui.io().want_capture_keyboard
        })
    }

    fn on_key_up(&mut self, key: Key) -> bool {
        self.key(key, false)
    }

    fn on_key_down(&mut self, key: Key) -> bool {
        self.key(key, true)
    }

    fn on_mouse_move(&mut self, x: f32, y: f32, _delta_x: f32, _delta_y: f32) -> bool {
        self.with_ui("mouse move", |ui| {
            ui.add_mouse_pos_event(x, y);
            ui.io().want_capture_mouse
        })
    }

    fn on_mouse_scroll(&mut self, delta_x: f32, delta_y: f32) -> bool {
        self.with_ui("mouse scroll", |ui| {
            ui.add_mouse_wheel_event(delta_x, delta_y);
            ui.io().want_capture_mouse
        })
    }

    fn on_mouse_up(&mut self, button: Button) -> bool {
        self.button(button, false)
    }

    fn on_mouse_down(&mut self, button: Button) -> bool {
        self.button(button, true)
    }

    fn on_window_focus(&mut self, focused: bool) -> bool {
        self.with_ui("focus", |ui| {
            ui.add_focus_event(focused);
            false
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn on_window_resize(&mut self, width: u32, height: u32) -> bool {
        self.with_ui("resize", |ui| {
            ui.io_mut().display_size = Vec2::new(width as f32, height as f32);
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imbridge_core::testing::{ScriptedUi, UiEvent};
    use imbridge_core::{UiKey, UiMouseButton};
    use proptest::prelude::*;

    fn adapter() -> (Rc<RefCell<ScriptedUi>>, InputAdapter<ScriptedUi>) {
        let ui = Rc::new(RefCell::new(ScriptedUi::atlas()));
        let adapter = InputAdapter::new(Rc::clone(&ui));
        (ui, adapter)
    }

    #[test]
    fn test_plain_key_emits_one_event() {
        let (ui, mut adapter) = adapter();
        assert!(!adapter.on_key_down(Key::A));
        assert!(!adapter.on_key_up(Key::A));
        assert_eq!(
            ui.borrow().events,
            vec![UiEvent::Key(UiKey::A, true), UiEvent::Key(UiKey::A, false)]
        );
    }

    #[test]
    fn test_modifier_precedes_primary_key() {
        let (ui, mut adapter) = adapter();
        adapter.on_key_down(Key::RightControl);
        assert_eq!(
            ui.borrow().events,
            vec![
                UiEvent::Key(UiKey::ModCtrl, true),
                UiEvent::Key(UiKey::RightCtrl, true)
            ]
        );
    }

    #[test]
    fn test_unmapped_key_still_reports_capture() {
        let (ui, mut adapter) = adapter();
        ui.borrow_mut().set_capture(true, false);
        assert!(adapter.on_key_down(Key::Unknown));
        assert!(ui.borrow().events.is_empty());
    }

    #[test]
    fn test_mouse_events_report_mouse_capture() {
        let (ui, mut adapter) = adapter();
        ui.borrow_mut().set_capture(false, true);

        assert!(adapter.on_mouse_move(10.0, 20.0, 3.0, 4.0));
        assert!(adapter.on_mouse_scroll(0.5, -1.0));
        assert!(adapter.on_mouse_down(Button::X2));
        assert!(adapter.on_mouse_up(Button::Other(7)));
        assert!(!adapter.on_key_type(u32::from('x')));

        assert_eq!(
            ui.borrow().events,
            vec![
                UiEvent::MousePos(10.0, 20.0),
                UiEvent::Wheel(0.5, -1.0),
                UiEvent::MouseButton(UiMouseButton::Extra2, true),
                UiEvent::Char(u32::from('x')),
            ]
        );
    }

    #[test]
    fn test_focus_and_resize_never_consumed() {
        let (ui, mut adapter) = adapter();
        ui.borrow_mut().set_capture(true, true);

        assert!(!adapter.on_window_focus(false));
        assert!(!adapter.on_window_resize(800, 600));

        let ui = ui.borrow();
        assert_eq!(ui.events, vec![UiEvent::Focus(false)]);
        assert_eq!(ui.io().display_size, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_busy_context_drops_event() {
        let (ui, mut adapter) = adapter();
        let guard = ui.borrow();
        assert!(!adapter.on_key_down(Key::A));
        drop(guard);
        assert!(ui.borrow().events.is_empty());
    }

    proptest! {
        #[test]
        fn prop_key_event_counts(index in 0..Key::ALL.len(), down in any::<bool>()) {
            let key = Key::ALL[index];
            let (ui, mut adapter) = adapter();
            if down {
                adapter.on_key_down(key);
            } else {
                adapter.on_key_up(key);
            }

            let events = ui.borrow().events.clone();
            let modifiers = events
                .iter()
                .filter(|e| matches!(e, UiEvent::Key(k, _) if k.is_modifier()))
                .count();
            let primaries = events.len() - modifiers;

            prop_assert!(events.iter().all(|e| matches!(e, UiEvent::Key(_, d) if *d == down)));
            match map_key(key) {
                Some(_) => {
                    prop_assert_eq!(primaries, 1);
                    prop_assert_eq!(modifiers, usize::from(map_modifier(key).is_some()));
                }
                None => prop_assert!(events.is_empty()),
            }
        }
    }
}
