//=========================================================================
// X11 / GLX Backend
//
// Window and context bootstrap over raw Xlib + GLX + XF86VidMode, loaded
// at runtime through `x11-dl` (dlopen-style bindings, no link-time X
// dependency). Sequence on `open`:
//
//   1. Load Xlib/GLX, open the display
//   2. Require GLX >= 1.3 (fbconfig negotiation)
//   3. Choose a framebuffer config: RGBA 8-8-8-8, double buffer,
//      depth 24, stencil 8, optional MSAA sample count
//   4. Resolve geometry: windowed / mode-switched fullscreen (with
//      fallback to windowed fullscreen) / windowed fullscreen
//   5. Create colormap + window, register WM_DELETE_WINDOW, map, wait
//      for the MapNotify
//   6. Create the GL context (legacy, or core profile through
//      glXCreateContextAttribsARB with legacy fallback), bind it
//   7. Verify double buffering, probe the swap-interval extension
//
// Teardown runs in reverse (context, window, colormap, video mode,
// display), each handle released only if held, so the error path and
// `Drop` share one idempotent routine.
//
//=========================================================================

mod keymap;

use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_long, c_uchar, c_uint, c_ulong};
use std::ptr;

use log::{debug, info, warn};
use x11_dl::glx::{self, Glx, GLXContext, GLXFBConfig};
use x11_dl::xf86vmode::{XF86VidModeModeInfo, Xf86vmode};
use x11_dl::xlib::{self, Xlib};

use crate::backend::{push_unique_resolution, Capability, GlFunction, PlatformWindow};
use crate::config::{ContextOptions, ContextStyle, Resolution, ScreenKind};
use crate::error::ContextError;
use crate::input::MouseButton;
use crate::pump::PumpEvent;

//=== Native Handles ======================================================

/// Raw X11/GLX handles, for wiring up external input or GL debug layers.
///
/// Valid between a successful `Context::new` and drop. The caller must
/// not destroy them.
#[derive(Debug, Clone, Copy)]
pub struct NativeHandles {
    pub display: *mut xlib::Display,
    pub window: xlib::Window,
    pub context: GLXContext,
}

//=== Extension Signatures ================================================

type GlxSwapIntervalFn = unsafe extern "C" fn(c_int) -> c_int;
type GlxCreateContextAttribsFn = unsafe extern "C" fn(
    *mut xlib::Display,
    GLXFBConfig,
    GLXContext,
    xlib::Bool,
    *const c_int,
) -> GLXContext;

/// Vsync providers, probed in order.
const SWAP_INTERVAL_PROVIDERS: [&[u8]; 2] = [b"glXSwapIntervalSGI\0", b"glXSwapIntervalMESA\0"];

/// Resolves the vsync-control entry point; absence is not an error (the
/// caller's swap interval becomes a no-op).
fn probe_swap_interval(glx: &Glx) -> Option<GlxSwapIntervalFn> {
    for name in SWAP_INTERVAL_PROVIDERS {
        let f = unsafe { (glx.glXGetProcAddress)(name.as_ptr()) };
        if let Some(f) = f {
            debug!(
                target: "glport::x11",
                "vsync control via {}",
                String::from_utf8_lossy(&name[..name.len() - 1])
            );
            return Some(unsafe { std::mem::transmute::<GlFunction, GlxSwapIntervalFn>(f) });
        }
    }
    None
}

//=== X11Window ===========================================================

pub(crate) struct X11Window {
    xlib: Xlib,
    glx: Glx,
    vidmode: Option<Xf86vmode>,

    display: *mut xlib::Display,
    window: xlib::Window,
    colormap: xlib::Colormap,
    context: GLXContext,

    wm_delete_window: xlib::Atom,
    double_buffered: bool,

    /// A physical mode switch happened and must be undone on teardown.
    mode_switched: bool,
    desktop_mode: Option<XF86VidModeModeInfo>,

    /// Exclusive fullscreen with keyboard/pointer grab is active.
    exclusive: bool,

    last_width: u32,
    last_height: u32,

    cursor_hidden: bool,
    pointer_grabbed: bool,

    swap_interval_fn: Capability<GlxSwapIntervalFn>,
}

impl X11Window {
    //--- Bootstrap Helpers ------------------------------------------------

    fn choose_fbconfig(&self, opts: &ContextOptions) -> Result<GLXFBConfig, ContextError> {
        let mut attribs: Vec<c_int> = vec![
            glx::GLX_X_RENDERABLE, 1,
            glx::GLX_DRAWABLE_TYPE, glx::GLX_WINDOW_BIT,
            glx::GLX_RENDER_TYPE, glx::GLX_RGBA_BIT,
            glx::GLX_DOUBLEBUFFER, 1,
            glx::GLX_RED_SIZE, 8,
            glx::GLX_GREEN_SIZE, 8,
            glx::GLX_BLUE_SIZE, 8,
            glx::GLX_ALPHA_SIZE, 8,
            glx::GLX_DEPTH_SIZE, 24,
            glx::GLX_STENCIL_SIZE, 8,
        ];
        if opts.effective_samples() > 1 {
            attribs.extend_from_slice(&[
                glx::GLX_SAMPLE_BUFFERS, 1,
                glx::GLX_SAMPLES, opts.effective_samples() as c_int,
            ]);
        }
        attribs.push(0);

        unsafe {
            let screen = (self.xlib.XDefaultScreen)(self.display);
            let mut count = 0;
            let configs =
                (self.glx.glXChooseFBConfig)(self.display, screen, attribs.as_ptr(), &mut count);
            if configs.is_null() || count < 1 {
                if !configs.is_null() {
                    (self.xlib.XFree)(configs.cast());
                }
                return Err(ContextError::NoPixelFormat);
            }

            let config = *configs;
            (self.xlib.XFree)(configs.cast());
            Ok(config)
        }
    }

    fn desktop_size(&self) -> (u32, u32) {
        unsafe {
            let screen = (self.xlib.XDefaultScreen)(self.display);
            (
                (self.xlib.XDisplayWidth)(self.display, screen) as u32,
                (self.xlib.XDisplayHeight)(self.display, screen) as u32,
            )
        }
    }

    /// Switches the physical display mode. Returns false when the
    /// requested resolution has no matching mode line.
    fn switch_video_mode(&mut self, width: u32, height: u32) -> bool {
        let Some(vidmode) = self.vidmode.as_ref() else {
            return false;
        };

        unsafe {
            let screen = (self.xlib.XDefaultScreen)(self.display);
            let mut count: c_int = 0;
            let mut modes: *mut *mut XF86VidModeModeInfo = ptr::null_mut();
            if (vidmode.XF86VidModeGetAllModeLines)(self.display, screen, &mut count, &mut modes)
                == 0
                || modes.is_null()
            {
                return false;
            }

            let lines = std::slice::from_raw_parts(modes, count as usize);
            let target = lines
                .iter()
                .find(|m| u32::from((***m).hdisplay) == width && u32::from((***m).vdisplay) == height)
                .map(|m| **m);

            // Mode line 0 is the current desktop mode, saved for restore.
            if !lines.is_empty() {
                self.desktop_mode = Some(*lines[0]);
            }

            let switched = if let Some(mut mode) = target {
                (vidmode.XF86VidModeSwitchToMode)(self.display, screen, &mut mode);
                (vidmode.XF86VidModeSetViewPort)(self.display, screen, 0, 0);
                true
            } else {
                false
            };

            (self.xlib.XFree)(modes.cast());
            self.mode_switched = switched;
            switched
        }
    }

    /// Asks the window manager for the fullscreen state via
    /// `_NET_WM_STATE`. Best effort: logs and continues when the WM does
    /// not speak EWMH.
    fn request_wm_fullscreen(&self) {
        const NET_WM_STATE_ADD: c_long = 1;

        unsafe {
            let wm_state = (self.xlib.XInternAtom)(
                self.display,
                c"_NET_WM_STATE".as_ptr(),
                xlib::False,
            );
            let wm_fullscreen = (self.xlib.XInternAtom)(
                self.display,
                c"_NET_WM_STATE_FULLSCREEN".as_ptr(),
                xlib::False,
            );
            if wm_state == 0 || wm_fullscreen == 0 {
                warn!(target: "glport::x11", "WM lacks _NET_WM_STATE, cannot request fullscreen");
                return;
            }

            let mut event: xlib::XEvent = std::mem::zeroed();
            event.client_message.type_ = xlib::ClientMessage;
            event.client_message.send_event = xlib::True;
            event.client_message.display = self.display;
            event.client_message.window = self.window;
            event.client_message.message_type = wm_state;
            event.client_message.format = 32;
            event.client_message.data.set_long(0, NET_WM_STATE_ADD);
            event.client_message.data.set_long(1, wm_fullscreen as c_long);

            (self.xlib.XSendEvent)(
                self.display,
                (self.xlib.XDefaultRootWindow)(self.display),
                xlib::False,
                xlib::SubstructureRedirectMask | xlib::SubstructureNotifyMask,
                &mut event,
            );
        }
    }

    fn create_gl_context(
        &mut self,
        config: GLXFBConfig,
        style: ContextStyle,
    ) -> Result<(), ContextError> {
        unsafe {
            let vi = (self.glx.glXGetVisualFromFBConfig)(self.display, config);
            if vi.is_null() {
                return Err(ContextError::NoPixelFormat);
            }

            self.context = match style {
                ContextStyle::Modern { major, minor } => {
                    match self.resolve_create_context_attribs() {
                        Some(create) => {
                            let attribs = [
                                glx::arb::GLX_CONTEXT_MAJOR_VERSION_ARB,
                                major as c_int,
                                glx::arb::GLX_CONTEXT_MINOR_VERSION_ARB,
                                minor as c_int,
                                glx::arb::GLX_CONTEXT_PROFILE_MASK_ARB,
                                glx::arb::GLX_CONTEXT_CORE_PROFILE_BIT_ARB,
                                0,
                            ];
                            create(self.display, config, ptr::null_mut(), xlib::True, attribs.as_ptr())
                        }
                        None => {
                            warn!(
                                target: "glport::x11",
                                "GLX_ARB_create_context unavailable, falling back to legacy context"
                            );
                            (self.glx.glXCreateContext)(self.display, vi, ptr::null_mut(), xlib::True)
                        }
                    }
                }
                ContextStyle::Legacy => {
                    (self.glx.glXCreateContext)(self.display, vi, ptr::null_mut(), xlib::True)
                }
            };
            (self.xlib.XFree)(vi.cast());

            if self.context.is_null() {
                return Err(ContextError::ContextCreation);
            }

            if (self.glx.glXMakeCurrent)(self.display, self.window, self.context) == 0 {
                return Err(ContextError::ContextCreation);
            }

            let mut double_buffered: c_int = 0;
            (self.glx.glXGetFBConfigAttrib)(
                self.display,
                config,
                glx::GLX_DOUBLEBUFFER,
                &mut double_buffered,
            );
            self.double_buffered = double_buffered != 0;
            if !self.double_buffered {
                warn!(target: "glport::x11", "chosen config is not double buffered, swaps become no-ops");
            }
        }

        Ok(())
    }

    fn resolve_create_context_attribs(&self) -> Option<GlxCreateContextAttribsFn> {
        unsafe {
            (self.glx.glXGetProcAddress)(c"glXCreateContextAttribsARB".as_ptr() as *const c_uchar)
                .map(|f| std::mem::transmute::<GlFunction, GlxCreateContextAttribsFn>(f))
        }
    }

    /// Blocks until the window's MapNotify arrives. Other structure
    /// events in between are consumed and dropped; the first real resize
    /// arrives as a ConfigureNotify afterwards.
    fn wait_for_map(&self) {
        unsafe {
            let mut event: xlib::XEvent = std::mem::zeroed();
            loop {
                (self.xlib.XWindowEvent)(
                    self.display,
                    self.window,
                    xlib::StructureNotifyMask,
                    &mut event,
                );
                if event.get_type() == xlib::MapNotify {
                    break;
                }
            }
        }
    }

    /// Idempotent teardown shared by `Drop` and the bootstrap error path.
    /// Order matters: context before window before display.
    pub(crate) fn close(&mut self) {
        unsafe {
            if !self.context.is_null() {
                (self.glx.glXMakeCurrent)(self.display, 0, ptr::null_mut());
                (self.glx.glXDestroyContext)(self.display, self.context);
                self.context = ptr::null_mut();
            }

            if self.window != 0 {
                (self.xlib.XDestroyWindow)(self.display, self.window);
                self.window = 0;
            }

            if self.colormap != 0 {
                (self.xlib.XFreeColormap)(self.display, self.colormap);
                self.colormap = 0;
            }

            if self.mode_switched {
                if let (Some(vidmode), Some(mut mode)) = (self.vidmode.as_ref(), self.desktop_mode)
                {
                    let screen = (self.xlib.XDefaultScreen)(self.display);
                    (vidmode.XF86VidModeSwitchToMode)(self.display, screen, &mut mode);
                    (vidmode.XF86VidModeSetViewPort)(self.display, screen, 0, 0);
                }
                self.mode_switched = false;
            }

            if !self.display.is_null() {
                (self.xlib.XCloseDisplay)(self.display);
                self.display = ptr::null_mut();
            }
        }
    }

    //--- Event Translation ------------------------------------------------

    fn translate_event(&mut self, event: &mut xlib::XEvent) -> Option<PumpEvent> {
        unsafe {
            match event.get_type() {
                xlib::ClientMessage => {
                    let data = event.client_message.data.get_long(0);
                    if self.wm_delete_window != 0 && data as xlib::Atom == self.wm_delete_window {
                        Some(PumpEvent::CloseRequested)
                    } else {
                        None
                    }
                }

                xlib::DestroyNotify => Some(PumpEvent::Destroyed),

                xlib::ConfigureNotify => {
                    let width = event.configure.width.max(0) as u32;
                    let height = event.configure.height.max(0) as u32;
                    if width == self.last_width && height == self.last_height {
                        return None;
                    }
                    self.last_width = width;
                    self.last_height = height;
                    Some(PumpEvent::Resized { width, height, minimized: false })
                }

                xlib::MapNotify => Some(PumpEvent::Focus(true)),
                xlib::UnmapNotify => Some(PumpEvent::Focus(false)),

                xlib::KeyPress | xlib::KeyRelease => {
                    let pressed = event.get_type() == xlib::KeyPress;
                    let sym = (self.xlib.XLookupKeysym)(&mut event.key, 0);
                    keymap::translate_keysym(sym as u64).map(|key| PumpEvent::Key { key, pressed })
                }

                xlib::MotionNotify => Some(PumpEvent::MouseMove {
                    x: event.motion.x,
                    y: event.motion.y,
                }),

                xlib::ButtonPress | xlib::ButtonRelease => {
                    let pressed = event.get_type() == xlib::ButtonPress;
                    let button = match event.button.button {
                        xlib::Button1 => MouseButton::Left,
                        xlib::Button2 => MouseButton::Middle,
                        xlib::Button3 => MouseButton::Right,
                        // Scroll wheel and side buttons are not part of
                        // the callback surface.
                        _ => return None,
                    };
                    Some(PumpEvent::MouseButton {
                        button,
                        pressed,
                        x: event.button.x,
                        y: event.button.y,
                    })
                }

                _ => None,
            }
        }
    }
}

//=== PlatformWindow Implementation =======================================

impl PlatformWindow for X11Window {
    fn open(opts: &ContextOptions) -> Result<Self, ContextError> {
        let xlib = Xlib::open().map_err(|e| ContextError::LibraryLoad(e.to_string()))?;
        let glx = Glx::open().map_err(|e| ContextError::LibraryLoad(e.to_string()))?;
        let vidmode = Xf86vmode::open().ok();
        if vidmode.is_none() {
            warn!(target: "glport::x11", "libXxf86vm unavailable, mode switching disabled");
        }

        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        if display.is_null() {
            return Err(ContextError::DisplayOpen);
        }

        let mut win = Self {
            xlib,
            glx,
            vidmode,
            display,
            window: 0,
            colormap: 0,
            context: ptr::null_mut(),
            wm_delete_window: 0,
            double_buffered: false,
            mode_switched: false,
            desktop_mode: None,
            exclusive: false,
            last_width: 0,
            last_height: 0,
            cursor_hidden: false,
            pointer_grabbed: false,
            swap_interval_fn: Capability::Unresolved,
        };

        // On failure close() releases whatever the bootstrap acquired;
        // Drop will then see only cleared handles.
        match win.bootstrap(opts) {
            Ok(()) => Ok(win),
            Err(e) => {
                win.close();
                Err(e)
            }
        }
    }

    fn desktop_modes() -> Vec<Resolution> {
        let Ok(xlib) = Xlib::open() else { return Vec::new() };
        let Ok(vidmode) = Xf86vmode::open() else { return Vec::new() };

        unsafe {
            let display = (xlib.XOpenDisplay)(ptr::null());
            if display.is_null() {
                return Vec::new();
            }

            let screen = (xlib.XDefaultScreen)(display);
            let mut count: c_int = 0;
            let mut modes: *mut *mut XF86VidModeModeInfo = ptr::null_mut();
            let mut resolutions = Vec::new();

            if (vidmode.XF86VidModeGetAllModeLines)(display, screen, &mut count, &mut modes) != 0
                && !modes.is_null()
            {
                for mode in std::slice::from_raw_parts(modes, count as usize) {
                    push_unique_resolution(
                        &mut resolutions,
                        Resolution {
                            width: u32::from((**mode).hdisplay),
                            height: u32::from((**mode).vdisplay),
                            monitor_index: 0,
                        },
                    );
                }
                (xlib.XFree)(modes.cast());
            }

            (xlib.XCloseDisplay)(display);
            resolutions
        }
    }

    fn drain_events(&mut self, out: &mut Vec<PumpEvent>) {
        unsafe {
            while (self.xlib.XPending)(self.display) > 0 {
                let mut event: xlib::XEvent = std::mem::zeroed();
                (self.xlib.XNextEvent)(self.display, &mut event);
                if let Some(translated) = self.translate_event(&mut event) {
                    out.push(translated);
                }
            }
        }
    }

    fn swap_buffers(&self) {
        if self.double_buffered {
            unsafe { (self.glx.glXSwapBuffers)(self.display, self.window) };
        }
    }

    fn set_swap_interval(&mut self, interval: u32) {
        let glx = &self.glx;
        if let Some(set_interval) = self.swap_interval_fn.get_or_resolve(|| probe_swap_interval(glx))
        {
            unsafe { set_interval(interval as c_int) };
        }
    }

    fn set_title(&self, title: &str) {
        let Ok(title) = CString::new(title) else { return };
        unsafe {
            (self.xlib.XStoreName)(self.display, self.window, title.as_ptr());
            (self.xlib.XFlush)(self.display);
        }
    }

    fn focus_hint(&self, pump_focused: bool) -> bool {
        // Exclusive fullscreen holds the grab, focus cannot move away.
        if self.exclusive {
            return true;
        }

        unsafe {
            let mut focus_window: xlib::Window = 0;
            let mut revert: c_int = 0;
            (self.xlib.XGetInputFocus)(self.display, &mut focus_window, &mut revert);
            focus_window == self.window && pump_focused
        }
    }

    fn show_cursor(&mut self, visible: bool) {
        if visible == !self.cursor_hidden {
            return;
        }

        unsafe {
            if visible {
                (self.xlib.XUndefineCursor)(self.display, self.window);
            } else {
                // A 1x1 all-transparent pixmap cursor stands in for a
                // hidden pointer; X has no direct hide call.
                let data: [c_char; 1] = [0];
                let pixmap = (self.xlib.XCreateBitmapFromData)(
                    self.display,
                    self.window,
                    data.as_ptr(),
                    1,
                    1,
                );
                let mut color: xlib::XColor = std::mem::zeroed();
                let cursor = (self.xlib.XCreatePixmapCursor)(
                    self.display,
                    pixmap,
                    pixmap,
                    &mut color,
                    &mut color,
                    0,
                    0,
                );
                (self.xlib.XDefineCursor)(self.display, self.window, cursor);
                (self.xlib.XFreeCursor)(self.display, cursor);
                if pixmap != 0 {
                    (self.xlib.XFreePixmap)(self.display, pixmap);
                }
            }
            (self.xlib.XFlush)(self.display);
        }
        self.cursor_hidden = !visible;
    }

    fn set_capture(&mut self, captured: bool) {
        if captured == self.pointer_grabbed {
            return;
        }

        unsafe {
            if captured {
                self.warp_cursor_to_center();
                let mask = (xlib::ButtonPressMask
                    | xlib::ButtonReleaseMask
                    | xlib::PointerMotionMask) as c_uint;
                (self.xlib.XGrabPointer)(
                    self.display,
                    self.window,
                    xlib::True,
                    mask,
                    xlib::GrabModeAsync,
                    xlib::GrabModeAsync,
                    self.window,
                    0,
                    xlib::CurrentTime,
                );
            } else {
                (self.xlib.XUngrabPointer)(self.display, xlib::CurrentTime);
            }
            (self.xlib.XFlush)(self.display);
        }
        self.pointer_grabbed = captured;
    }

    fn warp_cursor_to_center(&self) {
        unsafe {
            (self.xlib.XWarpPointer)(
                self.display,
                0,
                self.window,
                0,
                0,
                0,
                0,
                (self.last_width / 2) as c_int,
                (self.last_height / 2) as c_int,
            );
            (self.xlib.XFlush)(self.display);
        }
    }

    fn cursor_position(&self) -> (i32, i32) {
        unsafe {
            let mut root: xlib::Window = 0;
            let mut child: xlib::Window = 0;
            let (mut root_x, mut root_y, mut win_x, mut win_y): (c_int, c_int, c_int, c_int) =
                (0, 0, 0, 0);
            let mut mask: c_uint = 0;
            (self.xlib.XQueryPointer)(
                self.display,
                self.window,
                &mut root,
                &mut child,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            );
            (win_x, win_y)
        }
    }

    fn handles(&self) -> NativeHandles {
        NativeHandles {
            display: self.display,
            window: self.window,
            context: self.context,
        }
    }

    fn proc_address(&self, name: &str) -> Option<GlFunction> {
        let name = CString::new(name).ok()?;
        unsafe { (self.glx.glXGetProcAddress)(name.as_ptr() as *const c_uchar) }
    }
}

impl X11Window {
    fn bootstrap(&mut self, opts: &ContextOptions) -> Result<(), ContextError> {
        unsafe {
            let (mut major, mut minor): (c_int, c_int) = (0, 0);
            (self.glx.glXQueryVersion)(self.display, &mut major, &mut minor);
            if major < 1 || (major == 1 && minor < 3) {
                return Err(ContextError::UnsupportedVersion { major, minor });
            }
            debug!(target: "glport::x11", "GLX {}.{}", major, minor);

            let config = self.choose_fbconfig(opts)?;

            // Geometry per screen kind, with the exclusive-fullscreen
            // fallback: an unsupported mode degrades to a borderless
            // window at the desktop resolution.
            let desktop = self.desktop_size();
            let mut width = opts.width;
            let mut height = opts.height;
            let mut exclusive = false;

            match opts.screen {
                ScreenKind::Windowed => {}
                ScreenKind::Fullscreen => {
                    if self.switch_video_mode(width, height) {
                        exclusive = true;
                    } else {
                        warn!(
                            target: "glport::x11",
                            "no {}x{} video mode, using windowed fullscreen at {}x{}",
                            width, height, desktop.0, desktop.1
                        );
                        (width, height) = desktop;
                    }
                }
                ScreenKind::WindowedFullscreen => (width, height) = desktop,
            }
            self.exclusive = exclusive;

            let vi = (self.glx.glXGetVisualFromFBConfig)(self.display, config);
            if vi.is_null() {
                return Err(ContextError::NoPixelFormat);
            }
            let screen = (*vi).screen;
            let root = (self.xlib.XRootWindow)(self.display, screen);

            self.colormap =
                (self.xlib.XCreateColormap)(self.display, root, (*vi).visual, xlib::AllocNone);

            let mut attributes: xlib::XSetWindowAttributes = std::mem::zeroed();
            attributes.colormap = self.colormap;
            attributes.border_pixel = 0;
            attributes.event_mask = xlib::StructureNotifyMask
                | xlib::KeyPressMask
                | xlib::KeyReleaseMask
                | xlib::ButtonPressMask
                | xlib::ButtonReleaseMask
                | xlib::PointerMotionMask;
            attributes.override_redirect = if exclusive { xlib::True } else { xlib::False };

            let mut valuemask = xlib::CWBorderPixel | xlib::CWColormap | xlib::CWEventMask;
            if exclusive {
                valuemask |= xlib::CWOverrideRedirect;
            }

            self.window = (self.xlib.XCreateWindow)(
                self.display,
                root,
                0,
                0,
                width,
                height,
                0,
                (*vi).depth,
                xlib::InputOutput as c_uint,
                (*vi).visual,
                valuemask,
                &mut attributes,
            );
            (self.xlib.XFree)(vi.cast());
            if self.window == 0 {
                return Err(ContextError::WindowCreation);
            }
            (self.xlib.XSetWindowBackground)(self.display, self.window, 0 as c_ulong);

            self.last_width = width;
            self.last_height = height;
            self.set_title(opts.effective_title());

            // Distinguish the WM's close request from other client
            // messages later in the pump.
            self.wm_delete_window = (self.xlib.XInternAtom)(
                self.display,
                c"WM_DELETE_WINDOW".as_ptr(),
                xlib::False,
            );
            if self.wm_delete_window != 0 {
                (self.xlib.XSetWMProtocols)(self.display, self.window, &mut self.wm_delete_window, 1);
            }

            if exclusive {
                (self.xlib.XMapRaised)(self.display, self.window);
                (self.xlib.XWarpPointer)(self.display, 0, self.window, 0, 0, 0, 0, 0, 0);
                (self.xlib.XGrabKeyboard)(
                    self.display,
                    self.window,
                    xlib::True,
                    xlib::GrabModeAsync,
                    xlib::GrabModeAsync,
                    xlib::CurrentTime,
                );
                (self.xlib.XGrabPointer)(
                    self.display,
                    self.window,
                    xlib::True,
                    xlib::ButtonPressMask as c_uint,
                    xlib::GrabModeAsync,
                    xlib::GrabModeAsync,
                    self.window,
                    0,
                    xlib::CurrentTime,
                );
            } else {
                (self.xlib.XMapWindow)(self.display, self.window);
            }

            // The degraded exclusive-fullscreen path is a windowed
            // fullscreen in all but name, so it gets the WM hint too.
            let wants_wm_fullscreen = opts.screen == ScreenKind::WindowedFullscreen
                || (opts.screen == ScreenKind::Fullscreen && !exclusive);
            if wants_wm_fullscreen {
                self.request_wm_fullscreen();
            }

            self.wait_for_map();

            self.create_gl_context(config, opts.context)?;
            if exclusive {
                self.show_cursor(false);
            }

            self.set_swap_interval(opts.swap_interval);

            info!(
                target: "glport::x11",
                "window up: {}x{}, {:?}, double_buffered={}",
                width, height, opts.screen, self.double_buffered
            );
        }

        Ok(())
    }
}

impl Drop for X11Window {
    fn drop(&mut self) {
        self.close();
    }
}
