//=========================================================================
// glport — Library Root
//
// A minimal windowing and OpenGL context layer over raw platform APIs:
// X11/GLX on Unix, Win32/WGL on Windows. One `Context` owns the native
// window, the GL context, and the event pump; there is no global state
// beyond the quit-signal flag and the single-window guard.
//
// Responsibilities:
// - Expose the `Context` facade (open, pump, swap, mouse control)
// - Keep platform backends (`backend::x11`, `backend::win32`) hidden
// - Translate native events into user callbacks exactly once per pump
//
// Typical usage:
// ```no_run
// use glport::{Context, ContextOptions, InputCallbacks};
//
// fn main() -> Result<(), glport::ContextError> {
//     let mut ctx = Context::new(&ContextOptions::new(1280, 720))?;
//     ctx.set_callbacks(InputCallbacks::new().with_key(|key, pressed| {
//         println!("{key:?} pressed={pressed}");
//     }));
//     while ctx.is_alive() {
//         if let Some((w, h)) = ctx.check_resize() {
//             println!("resized to {w}x{h}");
//         }
//         ctx.swap_buffers();
//     }
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Internal Modules ----------------------------------------------------
//
// `backend` holds all unsafe platform FFI behind the `PlatformWindow`
// trait. `pump` and `mouse` are the platform-neutral event bookkeeping
// that the facade drives.
//
mod backend;
mod config;
mod error;
mod input;
mod mouse;
mod pump;

//--- Public Exports ------------------------------------------------------

pub use backend::{GlFunction, NativeHandles};
pub use config::{ContextOptions, ContextStyle, Resolution, ScreenKind};
pub use error::ContextError;
pub use input::{
    InputCallbacks, Key, KeyCallback, MouseButton, MouseButtonCallback, MouseMoveCallback,
};
pub use mouse::MouseMode;

use log::{debug, info};

use backend::{PlatformBackend, PlatformWindow};
use mouse::MouseTracker;
use pump::{PumpEvent, PumpState};

//=== Free Functions ======================================================

/// Enumerates the display's resolutions without opening a window.
///
/// The first entry is always the current desktop mode; the rest are the
/// modes the display reports, deduplicated, in driver order.
pub fn desktop_modes() -> Vec<Resolution> {
    PlatformBackend::desktop_modes()
}

//=== Context =============================================================

/// A native window with a current OpenGL context.
///
/// At most one `Context` may be live per process; a second `new` before
/// the first is dropped fails with [`ContextError::AlreadyOpen`].
/// Dropping the context releases the GL context, the window, and any
/// display mode switch, in that order.
pub struct Context {
    backend: PlatformBackend,
    pump: PumpState,
    callbacks: InputCallbacks,
    mouse_mode: MouseMode,
    tracker: MouseTracker,
    scratch: Vec<PumpEvent>,
}

impl Context {
    /// Opens the window and makes its GL context current.
    ///
    /// Also installs Ctrl-C / termination handlers that make a later
    /// [`is_alive`](Self::is_alive) return `false` instead of killing
    /// the process mid-frame.
    pub fn new(opts: &ContextOptions) -> Result<Self, ContextError> {
        if !pump::acquire_window_slot() {
            return Err(ContextError::AlreadyOpen);
        }
        pump::clear_quit_request();
        pump::install_quit_signal_handlers();

        let backend = match PlatformBackend::open(opts) {
            Ok(backend) => backend,
            Err(e) => {
                pump::release_window_slot();
                return Err(e);
            }
        };

        info!(target: "glport", "context open: {}x{} {:?}", opts.width, opts.height, opts.screen);
        Ok(Self {
            backend,
            pump: PumpState::new(),
            callbacks: InputCallbacks::new(),
            mouse_mode: MouseMode::new(false, false, true),
            tracker: MouseTracker::default(),
            scratch: Vec::new(),
        })
    }

    /// Replaces the installed input callbacks. Events arriving while no
    /// callback is installed are dropped, not queued.
    pub fn set_callbacks(&mut self, callbacks: InputCallbacks) {
        self.callbacks = callbacks;
    }

    //--- Event Pump ------------------------------------------------------

    /// Pumps pending native events, dispatches callbacks, and reports
    /// whether the window is still live.
    ///
    /// Returns `false` permanently once the user closed the window, the
    /// window was destroyed, or a quit signal (Ctrl-C) arrived. Callers
    /// use this as their frame-loop condition.
    pub fn is_alive(&mut self) -> bool {
        self.scratch.clear();
        self.backend.drain_events(&mut self.scratch);
        for event in self.scratch.drain(..) {
            self.pump.apply(event, &mut self.callbacks, self.mouse_mode.relative);
        }

        if pump::quit_requested() {
            self.pump.request_quit();
        }

        if self.mouse_mode.relative {
            self.pump_relative_motion();
        }

        self.pump.alive()
    }

    /// In relative mode absolute positions are withheld by the pump;
    /// instead the cursor is sampled here, the callback gets the delta,
    /// and under capture the cursor is re-centered so it can never pin
    /// against a screen edge and clamp the deltas.
    fn pump_relative_motion(&mut self) {
        if self.callbacks.mouse_move.is_none() {
            return;
        }

        let (x, y) = self.backend.cursor_position();
        if let Some((dx, dy)) = self.tracker.sample(x, y) {
            self.callbacks.dispatch_mouse_move(dx, dy);
        }

        if self.mouse_mode.captured {
            self.backend.warp_cursor_to_center();
            let (cx, cy) = self.backend.cursor_position();
            self.tracker.anchor(cx, cy);
        }
    }

    /// Latest window size if it changed since the previous call.
    /// Intermediate sizes between two calls are coalesced away, and
    /// resizes reported while minimized are suppressed.
    pub fn check_resize(&mut self) -> Option<(u32, u32)> {
        self.pump.take_resize()
    }

    /// Whether the window currently holds input focus.
    ///
    /// Pumps pending events first, so a close that arrived since the
    /// last poll is observed; a window that is no longer alive is never
    /// focused.
    pub fn has_focus(&mut self) -> bool {
        self.is_alive() && self.backend.focus_hint(self.pump.focused())
    }

    //--- Presentation ----------------------------------------------------

    /// Presents the back buffer; a no-op on single-buffered configs.
    pub fn swap_buffers(&self) {
        self.backend.swap_buffers();
    }

    /// Sets the buffer-swap interval (0 = vsync off, 1 = every vblank).
    /// Silently ignored when the platform lacks a swap control extension.
    pub fn set_swap_interval(&mut self, interval: u32) {
        self.backend.set_swap_interval(interval);
    }

    pub fn set_title(&self, title: &str) {
        self.backend.set_title(title);
    }

    //--- Mouse Control ---------------------------------------------------

    /// Applies cursor visibility, capture, and relative-motion reporting
    /// in one step. Every mode change re-arms the motion tracker, so the
    /// cursor jump a capture warp (or a plain mode switch) produces is
    /// never reported as a delta.
    pub fn set_mouse_mode(&mut self, mode: MouseMode) {
        debug!(
            target: "glport",
            "mouse mode: captured={} relative={} visible={}",
            mode.captured, mode.relative, mode.visible
        );
        self.backend.show_cursor(mode.visible);
        self.backend.set_capture(mode.captured);

        let (x, y) = self.backend.cursor_position();
        self.tracker.reset(x, y);
        self.mouse_mode = mode;
    }

    pub fn mouse_mode(&self) -> MouseMode {
        self.mouse_mode
    }

    //--- Native Access ---------------------------------------------------

    /// Resolves a GL entry point through the platform loader.
    pub fn get_proc_address(&self, name: &str) -> Option<GlFunction> {
        self.backend.proc_address(name)
    }

    /// Raw platform handles, valid until this context is dropped.
    pub fn native_handles(&self) -> NativeHandles {
        self.backend.handles()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // Backend teardown must finish before the slot reopens.
        self.backend.close();
        pump::release_window_slot();
    }
}
