//=========================================================================
// Event Pump State
//
// Backends drain their native queues into `PumpEvent`s; `PumpState`
// applies them to the liveness/resize/focus flags and dispatches input
// callbacks. Keeping this half platform-neutral means the coalescing and
// latching rules live (and are tested) in exactly one place.
//
// Event-to-state mapping:
//   CloseRequested / Destroyed      -> quit (latched, never reverts)
//   Resized (not minimized)         -> resize pending, latest size wins
//   Resized (minimized)             -> dropped
//   Focus(bool)                     -> focus flag (map/unmap notify)
//   Key / MouseMove / MouseButton   -> synchronous callback dispatch
//
// Process-wide flags:
// - `QUIT_REQUESTED`: the only state a signal handler touches. SIGINT/
//   SIGTERM (or the Win32 console ctrl handler) store it; the pump reads
//   it on every poll.
// - `WINDOW_LIVE`: the one-live-window guard. `Context::new` acquires,
//   `Drop` releases.
//
//=========================================================================

use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;

use crate::input::{InputCallbacks, Key, MouseButton};

//=== PumpEvent ===========================================================

/// A native window event, already translated to neutral types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PumpEvent {
    /// The window manager's close request (e.g. `WM_DELETE_WINDOW`,
    /// `WM_CLOSE`), distinguished from other client messages by the
    /// backend.
    CloseRequested,

    /// The window was destroyed out from under us.
    Destroyed,

    /// The window size changed. `minimized` resizes carry the shrunken
    /// iconified geometry and must not reach the caller.
    Resized { width: u32, height: u32, minimized: bool },

    /// Map/unmap (or OS focus) notification.
    Focus(bool),

    Key { key: Key, pressed: bool },

    /// Absolute window-relative cursor position. Withheld from the move
    /// callback while relative motion is active; the relative cycle in
    /// `Context::is_alive` reports deltas instead.
    MouseMove { x: i32, y: i32 },

    MouseButton { button: MouseButton, pressed: bool, x: i32, y: i32 },
}

//=== PumpState ===========================================================

/// Liveness, resize, and focus state fed by the event pump.
#[derive(Debug)]
pub(crate) struct PumpState {
    quit: bool,
    resized: bool,
    resize_width: u32,
    resize_height: u32,
    focused: bool,
}

impl PumpState {
    pub fn new() -> Self {
        Self {
            quit: false,
            resized: false,
            resize_width: 0,
            resize_height: 0,
            focused: true,
        }
    }

    /// Applies one event, dispatching input callbacks synchronously.
    ///
    /// `relative_motion` withholds absolute positions from the move
    /// callback; button and key events are unaffected by it.
    pub fn apply(&mut self, event: PumpEvent, callbacks: &mut InputCallbacks, relative_motion: bool) {
        match event {
            PumpEvent::CloseRequested | PumpEvent::Destroyed => {
                trace!(target: "glport::pump", "quit: {:?}", event);
                self.quit = true;
            }

            PumpEvent::Resized { minimized: true, .. } => {}

            PumpEvent::Resized { width, height, .. } => {
                self.resized = true;
                self.resize_width = width;
                self.resize_height = height;
            }

            PumpEvent::Focus(focused) => self.focused = focused,

            PumpEvent::Key { key, pressed } => callbacks.dispatch_key(key, pressed),

            PumpEvent::MouseMove { x, y } => {
                if !relative_motion {
                    callbacks.dispatch_mouse_move(x, y);
                }
            }

            PumpEvent::MouseButton { button, pressed, x, y } => {
                callbacks.dispatch_mouse_button(button, pressed, x, y)
            }
        }
    }

    /// Latches the quit flag from outside the event stream (signal
    /// delivery, observed once per poll).
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn alive(&self) -> bool {
        !self.quit
    }

    /// The map/unmap focus flag, forced false once quit has latched: a
    /// dead window is never focused.
    pub fn focused(&self) -> bool {
        self.focused && !self.quit
    }

    /// Takes the pending resize, if any. At most one report per burst;
    /// the dimensions are the latest observed, intermediate drag sizes
    /// are not queued.
    pub fn take_resize(&mut self) -> Option<(u32, u32)> {
        if self.resized {
            self.resized = false;
            Some((self.resize_width, self.resize_height))
        } else {
            None
        }
    }
}

//=== Process-Wide Flags ==================================================

/// Set from signal context only; single-word atomic store, nothing else.
static QUIT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// One live window per process, acquired by `Context::new`.
static WINDOW_LIVE: AtomicBool = AtomicBool::new(false);

pub(crate) fn quit_requested() -> bool {
    QUIT_REQUESTED.load(Ordering::Relaxed)
}

pub(crate) fn clear_quit_request() {
    QUIT_REQUESTED.store(false, Ordering::Relaxed);
}

/// Claims the process-wide window slot. Fails if a context is live.
pub(crate) fn acquire_window_slot() -> bool {
    WINDOW_LIVE
        .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
        .is_ok()
}

pub(crate) fn release_window_slot() {
    WINDOW_LIVE.store(false, Ordering::Release);
}

//=== Signal Installation =================================================

#[cfg(all(unix, not(target_os = "macos")))]
extern "C" fn quit_signal_handler(_sig: libc::c_int) {
    QUIT_REQUESTED.store(true, Ordering::Relaxed);
}

/// Routes SIGINT/SIGTERM into the quit flag. `SA_RESTART` keeps blocking
/// native calls (mode switches, window creation) from failing with EINTR.
#[cfg(all(unix, not(target_os = "macos")))]
pub(crate) fn install_quit_signal_handlers() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = quit_signal_handler as extern "C" fn(libc::c_int) as usize;
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&mut sa.sa_mask);
        libc::sigaction(libc::SIGINT, &sa, std::ptr::null_mut());
        libc::sigaction(libc::SIGTERM, &sa, std::ptr::null_mut());
    }
}

#[cfg(windows)]
unsafe extern "system" fn quit_ctrl_handler(_ctrl_type: u32) -> windows_sys::Win32::Foundation::BOOL {
    QUIT_REQUESTED.store(true, Ordering::Relaxed);
    windows_sys::Win32::Foundation::TRUE
}

/// Routes console Ctrl-C/Ctrl-Break into the quit flag.
#[cfg(windows)]
pub(crate) fn install_quit_signal_handlers() {
    unsafe {
        windows_sys::Win32::System::Console::SetConsoleCtrlHandler(Some(quit_ctrl_handler), 1);
    }
}

// Unsupported targets already fail with the backend selection error;
// this stub keeps that the only diagnostic.
#[cfg(not(any(all(unix, not(target_os = "macos")), windows)))]
pub(crate) fn install_quit_signal_handlers() {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counting_callbacks() -> (InputCallbacks, Rc<RefCell<Vec<(i32, i32)>>>) {
        let moves = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&moves);
        let cbs = InputCallbacks::new().with_mouse_move(move |x, y| sink.borrow_mut().push((x, y)));
        (cbs, moves)
    }

    #[test]
    fn quit_latches_on_close_request_and_never_reverts() {
        let mut state = PumpState::new();
        let mut cbs = InputCallbacks::new();
        assert!(state.alive());

        state.apply(PumpEvent::CloseRequested, &mut cbs, false);
        assert!(!state.alive());

        // Later map/resize traffic must not resurrect the window.
        state.apply(PumpEvent::Focus(true), &mut cbs, false);
        state.apply(
            PumpEvent::Resized { width: 1, height: 1, minimized: false },
            &mut cbs,
            false,
        );
        assert!(!state.alive());
    }

    #[test]
    fn destroy_also_quits() {
        let mut state = PumpState::new();
        let mut cbs = InputCallbacks::new();
        state.apply(PumpEvent::Destroyed, &mut cbs, false);
        assert!(!state.alive());
    }

    #[test]
    fn resize_burst_coalesces_to_final_size() {
        let mut state = PumpState::new();
        let mut cbs = InputCallbacks::new();

        for (w, h) in [(801, 600), (900, 640), (1024, 768)] {
            state.apply(PumpEvent::Resized { width: w, height: h, minimized: false }, &mut cbs, false);
        }

        assert_eq!(state.take_resize(), Some((1024, 768)));
        assert_eq!(state.take_resize(), None, "at most one report per burst");
    }

    #[test]
    fn minimized_resize_is_dropped_not_coalesced() {
        let mut state = PumpState::new();
        let mut cbs = InputCallbacks::new();

        state.apply(PumpEvent::Resized { width: 800, height: 600, minimized: false }, &mut cbs, false);
        state.apply(PumpEvent::Resized { width: 0, height: 0, minimized: true }, &mut cbs, false);

        assert_eq!(state.take_resize(), Some((800, 600)));
    }

    #[test]
    fn focus_follows_map_and_unmap() {
        let mut state = PumpState::new();
        let mut cbs = InputCallbacks::new();
        assert!(state.focused());

        state.apply(PumpEvent::Focus(false), &mut cbs, false);
        assert!(!state.focused());
        state.apply(PumpEvent::Focus(true), &mut cbs, false);
        assert!(state.focused());
    }

    #[test]
    fn closed_window_is_never_focused() {
        let mut state = PumpState::new();
        let mut cbs = InputCallbacks::new();

        state.apply(PumpEvent::Focus(true), &mut cbs, false);
        assert!(state.focused());

        state.apply(PumpEvent::CloseRequested, &mut cbs, false);
        assert!(!state.focused(), "a dead window must not report focus");
    }

    #[test]
    fn absolute_motion_reaches_move_callback() {
        let mut state = PumpState::new();
        let (mut cbs, moves) = counting_callbacks();

        state.apply(PumpEvent::MouseMove { x: 12, y: 34 }, &mut cbs, false);
        assert_eq!(*moves.borrow(), vec![(12, 34)]);
    }

    #[test]
    fn relative_mode_withholds_absolute_motion() {
        let mut state = PumpState::new();
        let (mut cbs, moves) = counting_callbacks();

        state.apply(PumpEvent::MouseMove { x: 12, y: 34 }, &mut cbs, true);
        assert!(moves.borrow().is_empty());
    }

    #[test]
    fn release_event_always_reports_not_pressed() {
        let mut state = PumpState::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut cbs = InputCallbacks::new()
            .with_mouse_button(move |b, pressed, _, _| sink.borrow_mut().push((b, pressed)));

        // Release must report not-pressed for every button kind, the
        // middle button included.
        for button in [MouseButton::Left, MouseButton::Middle, MouseButton::Right] {
            state.apply(PumpEvent::MouseButton { button, pressed: true, x: 0, y: 0 }, &mut cbs, false);
            state.apply(PumpEvent::MouseButton { button, pressed: false, x: 0, y: 0 }, &mut cbs, false);
        }

        let seen = seen.borrow();
        assert_eq!(seen.len(), 6);
        assert!(seen.iter().step_by(2).all(|&(_, p)| p));
        assert!(seen.iter().skip(1).step_by(2).all(|&(_, p)| !p));
    }

    #[test]
    fn signal_quit_flag_feeds_request_quit() {
        let mut state = PumpState::new();
        clear_quit_request();
        assert!(!quit_requested());

        QUIT_REQUESTED.store(true, Ordering::Relaxed);
        assert!(quit_requested());
        state.request_quit();
        assert!(!state.alive());

        clear_quit_request();
    }

    #[test]
    fn window_slot_is_exclusive_until_released() {
        assert!(acquire_window_slot());
        assert!(!acquire_window_slot(), "second acquire must fail while live");
        release_window_slot();
        assert!(acquire_window_slot(), "slot is reusable after release");
        release_window_slot();
    }
}
