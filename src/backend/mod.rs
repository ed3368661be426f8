//=========================================================================
// Platform Backends
//
// One mutually exclusive backend implementation per target, selected at
// build time behind the `PlatformWindow` trait:
//
// - `x11`:   X11 + GLX + XF86VidMode  (Linux, BSDs)
// - `win32`: Win32 + WGL              (Windows)
//
// The backend owns every native handle and all unsafe FFI. Everything
// above it (pump state, mouse tracker, public facade) is platform
// neutral. Backends translate native events into `PumpEvent`s and never
// dispatch callbacks themselves.
//
//=========================================================================

use crate::config::{ContextOptions, Resolution};
use crate::error::ContextError;
use crate::pump::PumpEvent;

//=== Backend Selection ===================================================

#[cfg(all(unix, not(target_os = "macos")))]
mod x11;
#[cfg(all(unix, not(target_os = "macos")))]
pub(crate) use x11::X11Window as PlatformBackend;
#[cfg(all(unix, not(target_os = "macos")))]
pub use x11::NativeHandles;

#[cfg(windows)]
mod win32;
#[cfg(windows)]
pub(crate) use win32::Win32Window as PlatformBackend;
#[cfg(windows)]
pub use win32::NativeHandles;

#[cfg(not(any(all(unix, not(target_os = "macos")), windows)))]
compile_error!("glport supports X11 (Unix) and Win32 targets only");

//=== GlFunction ==========================================================

/// An opaque GL entry point resolved by the platform loader.
///
/// Cast to the concrete signature before calling. On Win32 the native
/// calling convention is `extern "system"`; on x86-64 the two conventions
/// coincide, and callers are expected to transmute to the properly
/// qualified type anyway.
pub type GlFunction = unsafe extern "C" fn();

//=== PlatformWindow ======================================================

/// Capability set every backend provides: open, poll, swap, mode control,
/// native handle access.
pub(crate) trait PlatformWindow: Sized {
    /// Bootstraps display connection, window, and GL context, binds the
    /// context current, and applies the initial swap interval. On failure
    /// every partially acquired resource is released before returning.
    fn open(opts: &ContextOptions) -> Result<Self, ContextError>;

    /// Enumerates display resolutions; index 0 is the current desktop
    /// mode. Legal before `open`.
    fn desktop_modes() -> Vec<Resolution>;

    /// Non-blockingly drains the native event queue, appending translated
    /// events in arrival order.
    fn drain_events(&mut self, out: &mut Vec<PumpEvent>);

    /// Presents the back buffer; no-op on a single-buffered config.
    fn swap_buffers(&self);

    /// Applies a swap interval through the lazily resolved vsync
    /// extension; silently ignored when the extension is absent.
    fn set_swap_interval(&mut self, interval: u32);

    fn set_title(&self, title: &str);

    /// Platform focus probe, combined with the pump's map/unmap state.
    fn focus_hint(&self, pump_focused: bool) -> bool;

    /// Cursor visibility; idempotent.
    fn show_cursor(&mut self, visible: bool);

    /// Exclusive pointer capture; idempotent. Enabling warps the cursor
    /// to the window center first.
    fn set_capture(&mut self, captured: bool);

    fn warp_cursor_to_center(&self);

    /// Current cursor position in the backend's own coordinate space
    /// (consistent with `warp_cursor_to_center`).
    fn cursor_position(&self) -> (i32, i32);

    fn handles(&self) -> NativeHandles;

    fn proc_address(&self, name: &str) -> Option<GlFunction>;
}

//=== Mode Enumeration Helpers ============================================

/// Appends `res` unless an identical resolution is already listed. Mode
/// enumeration repeats the same geometry across refresh rates and color
/// depths; callers only see each resolution once.
pub(crate) fn push_unique_resolution(list: &mut Vec<Resolution>, res: Resolution) {
    if !list.contains(&res) {
        list.push(res);
    }
}

//=== Capability ==========================================================

/// A lazily resolved optional platform entry point.
///
/// Dynamically loaded extensions (vsync control, versioned context
/// creation) get an explicit "probed and absent" state so a failed
/// resolution is attempted exactly once and never mistaken for
/// "not yet probed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Capability<T> {
    Unresolved,
    Missing,
    Present(T),
}

impl<T: Copy> Capability<T> {
    /// Returns the entry point, running `resolve` on first use.
    pub fn get_or_resolve(&mut self, resolve: impl FnOnce() -> Option<T>) -> Option<T> {
        if matches!(self, Capability::Unresolved) {
            *self = match resolve() {
                Some(value) => Capability::Present(value),
                None => Capability::Missing,
            };
        }

        match self {
            Capability::Present(value) => Some(*value),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_mode_lines_collapse_to_one_resolution() {
        let mut list = Vec::new();
        for (width, height) in [(1920, 1080), (1920, 1080), (1280, 720), (1920, 1080)] {
            push_unique_resolution(&mut list, Resolution { width, height, monitor_index: 0 });
        }

        assert_eq!(list.len(), 2);
        assert_eq!((list[0].width, list[0].height), (1920, 1080));
        assert_eq!((list[1].width, list[1].height), (1280, 720));
    }

    #[test]
    fn capability_resolves_once_and_caches_value() {
        let mut cap: Capability<u32> = Capability::Unresolved;
        let mut probes = 0;

        assert_eq!(cap.get_or_resolve(|| { probes += 1; Some(7) }), Some(7));
        assert_eq!(cap.get_or_resolve(|| { probes += 1; Some(9) }), Some(7));
        assert_eq!(probes, 1, "resolver must run exactly once");
    }

    #[test]
    fn capability_caches_missing_state() {
        let mut cap: Capability<u32> = Capability::Unresolved;
        let mut probes = 0;

        assert_eq!(cap.get_or_resolve(|| { probes += 1; None }), None);
        assert_eq!(cap.get_or_resolve(|| { probes += 1; Some(3) }), None);
        assert_eq!(probes, 1, "absence is probed once, then remembered");
        assert_eq!(cap, Capability::Missing);
    }
}
