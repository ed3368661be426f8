//=========================================================================
// Input Types
//
// Platform-neutral keyboard/mouse representation and the caller-supplied
// callback slots. Backends translate native virtual-key/keysym codes into
// `Key` through fixed lookup tables; codes with no table entry are
// dropped before dispatch, so callbacks only ever see mapped keys.
//
// Callbacks are invoked synchronously from inside the poll call
// (`Context::is_alive`), on the caller's thread. There is no queueing
// and no cross-thread hand-off.
//
//=========================================================================

//=== Key =================================================================

/// Physical key identifier, independent of the native key code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

//=== Callback Slots ======================================================

/// Key press/release: `(key, pressed)`.
pub type KeyCallback = Box<dyn FnMut(Key, bool)>;

/// Mouse motion: `(x, y)` window-relative, or `(dx, dy)` while relative
/// motion is active (see [`MouseMode`](crate::MouseMode)).
pub type MouseMoveCallback = Box<dyn FnMut(i32, i32)>;

/// Mouse button press/release: `(button, pressed, x, y)` with
/// window-relative coordinates.
pub type MouseButtonCallback = Box<dyn FnMut(MouseButton, bool, i32, i32)>;

/// Optional input handler slots, stored by value.
///
/// Replacing the callbacks mid-run is allowed; the single-threaded
/// contract means no dispatch can be in flight during the replacement.
#[derive(Default)]
pub struct InputCallbacks {
    pub key: Option<KeyCallback>,
    pub mouse_move: Option<MouseMoveCallback>,
    pub mouse_button: Option<MouseButtonCallback>,
}

impl InputCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, cb: impl FnMut(Key, bool) + 'static) -> Self {
        self.key = Some(Box::new(cb));
        self
    }

    pub fn with_mouse_move(mut self, cb: impl FnMut(i32, i32) + 'static) -> Self {
        self.mouse_move = Some(Box::new(cb));
        self
    }

    pub fn with_mouse_button(
        mut self,
        cb: impl FnMut(MouseButton, bool, i32, i32) + 'static,
    ) -> Self {
        self.mouse_button = Some(Box::new(cb));
        self
    }

    //--- Dispatch ---------------------------------------------------------

    pub(crate) fn dispatch_key(&mut self, key: Key, pressed: bool) {
        if let Some(cb) = self.key.as_mut() {
            cb(key, pressed);
        }
    }

    pub(crate) fn dispatch_mouse_move(&mut self, x: i32, y: i32) {
        if let Some(cb) = self.mouse_move.as_mut() {
            cb(x, y);
        }
    }

    pub(crate) fn dispatch_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        x: i32,
        y: i32,
    ) {
        if let Some(cb) = self.mouse_button.as_mut() {
            cb(button, pressed, x, y);
        }
    }
}

impl std::fmt::Debug for InputCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputCallbacks")
            .field("key", &self.key.is_some())
            .field("mouse_move", &self.mouse_move.is_some())
            .field("mouse_button", &self.mouse_button.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn empty_slots_dispatch_without_panicking() {
        let mut cbs = InputCallbacks::new();
        cbs.dispatch_key(Key::Space, true);
        cbs.dispatch_mouse_move(10, 20);
        cbs.dispatch_mouse_button(MouseButton::Left, false, 0, 0);
    }

    #[test]
    fn bound_key_callback_receives_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut cbs =
            InputCallbacks::new().with_key(move |key, pressed| sink.borrow_mut().push((key, pressed)));

        cbs.dispatch_key(Key::KeyW, true);
        cbs.dispatch_key(Key::KeyW, false);

        assert_eq!(*seen.borrow(), vec![(Key::KeyW, true), (Key::KeyW, false)]);
    }

    #[test]
    fn bound_button_callback_receives_coordinates() {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let mut cbs = InputCallbacks::new()
            .with_mouse_button(move |button, pressed, x, y| {
                *sink.borrow_mut() = Some((button, pressed, x, y));
            });

        cbs.dispatch_mouse_button(MouseButton::Right, true, 42, 7);
        assert_eq!(*seen.borrow(), Some((MouseButton::Right, true, 42, 7)));
    }

    #[test]
    fn replacing_callbacks_drops_previous_slot() {
        let first = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&first);
        let mut cbs = InputCallbacks::new().with_key(move |_, _| *sink.borrow_mut() += 1);
        cbs.dispatch_key(Key::Escape, true);

        cbs = InputCallbacks::new();
        cbs.dispatch_key(Key::Escape, true);

        assert_eq!(*first.borrow(), 1, "replaced slot must not fire again");
    }
}
