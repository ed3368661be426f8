//=========================================================================
// Win32 / WGL Backend
//
// Window and context bootstrap over raw Win32 + WGL. The WGL extension
// entry points (`wglChoosePixelFormatARB`, `wglCreateContextAttribsARB`)
// can only be resolved with a current context, so `open` first runs the
// classic dummy-window dance: register a throwaway class, create a
// hidden window with a bare pixel format, create a legacy context, pull
// the extension pointers, tear it all down, then build the real window.
//
// The real window's WndProc pushes translated events into a `RefCell`
// queue reached through `GWLP_USERDATA`; `drain_events` pumps the
// message loop and takes the queue. No process globals are involved.
//
//=========================================================================

mod keymap;

use std::cell::RefCell;
use std::ffi::CString;
use std::ptr;

use log::{debug, info, warn};
use windows_sys::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows_sys::Win32::Graphics::Gdi::{
    ChangeDisplaySettingsA, EnumDisplaySettingsA, GetDC, ReleaseDC, CDS_FULLSCREEN, DEVMODEA,
    DISP_CHANGE_SUCCESSFUL, DM_PELSHEIGHT, DM_PELSWIDTH, ENUM_CURRENT_SETTINGS, HDC,
};
use windows_sys::Win32::Graphics::OpenGL::{
    wglCreateContext, wglDeleteContext, wglGetProcAddress, wglMakeCurrent, ChoosePixelFormat,
    DescribePixelFormat, SetPixelFormat, SwapBuffers, HGLRC, PFD_DOUBLEBUFFER, PFD_DRAW_TO_WINDOW,
    PFD_MAIN_PLANE, PFD_SUPPORT_OPENGL, PFD_TYPE_RGBA, PIXELFORMATDESCRIPTOR,
};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleA;
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    GetFocus, ReleaseCapture, SetCapture, SetFocus,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRect, ClipCursor, CreateWindowExA, DefWindowProcA, DestroyWindow,
    DispatchMessageA, GetClientRect, GetCursorPos, GetDesktopWindow, GetWindowLongPtrA,
    GetWindowRect, LoadCursorA, PeekMessageA, RegisterClassExA, SetCursorPos,
    SetForegroundWindow, SetWindowLongPtrA, SetWindowTextA, ShowCursor, ShowWindow,
    TranslateMessage, UnregisterClassA, UpdateWindow, CS_HREDRAW, CS_OWNDC, CS_VREDRAW,
    CW_USEDEFAULT, GWLP_USERDATA, IDC_ARROW, MSG, PM_REMOVE, SC_MONITORPOWER, SC_SCREENSAVE,
    SIZE_MAXHIDE, SIZE_MINIMIZED, SW_HIDE, SW_RESTORE, WM_CLOSE, WM_DESTROY, WM_KEYDOWN,
    WM_KEYUP, WM_KILLFOCUS, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP,
    WM_MOUSEMOVE, WM_RBUTTONDOWN, WM_RBUTTONUP, WM_SETFOCUS, WM_SIZE, WM_SYSCOMMAND,
    WNDCLASSEXA, WS_OVERLAPPEDWINDOW, WS_POPUP, WS_VISIBLE,
};

use crate::backend::{push_unique_resolution, Capability, GlFunction, PlatformWindow};
use crate::config::{ContextOptions, ContextStyle, Resolution, ScreenKind};
use crate::error::ContextError;
use crate::input::MouseButton;
use crate::pump::PumpEvent;

//=== Native Handles ======================================================

/// Raw Win32/WGL handles, for wiring up external input or GL debug
/// layers. Valid between a successful `Context::new` and drop.
#[derive(Debug, Clone, Copy)]
pub struct NativeHandles {
    pub hwnd: HWND,
    pub hdc: HDC,
    pub hglrc: HGLRC,
}

//=== WGL Constants and Signatures ========================================
//
// Not covered by windows-sys; values from the ARB extension registry.
//

const WGL_DRAW_TO_WINDOW_ARB: i32 = 0x2001;
const WGL_ACCELERATION_ARB: i32 = 0x2003;
const WGL_SUPPORT_OPENGL_ARB: i32 = 0x2010;
const WGL_DOUBLE_BUFFER_ARB: i32 = 0x2011;
const WGL_PIXEL_TYPE_ARB: i32 = 0x2013;
const WGL_RED_BITS_ARB: i32 = 0x2015;
const WGL_GREEN_BITS_ARB: i32 = 0x2017;
const WGL_BLUE_BITS_ARB: i32 = 0x2019;
const WGL_ALPHA_BITS_ARB: i32 = 0x201B;
const WGL_DEPTH_BITS_ARB: i32 = 0x2022;
const WGL_STENCIL_BITS_ARB: i32 = 0x2023;
const WGL_FULL_ACCELERATION_ARB: i32 = 0x2027;
const WGL_TYPE_RGBA_ARB: i32 = 0x202B;
const WGL_SAMPLE_BUFFERS_ARB: i32 = 0x2041;
const WGL_SAMPLES_ARB: i32 = 0x2042;
const WGL_CONTEXT_MAJOR_VERSION_ARB: i32 = 0x2091;
const WGL_CONTEXT_MINOR_VERSION_ARB: i32 = 0x2092;
const WGL_CONTEXT_PROFILE_MASK_ARB: i32 = 0x9126;
const WGL_CONTEXT_CORE_PROFILE_BIT_ARB: i32 = 0x0001;

type WglChoosePixelFormatFn =
    unsafe extern "system" fn(HDC, *const i32, *const f32, u32, *mut i32, *mut u32) -> i32;
type WglCreateContextAttribsFn = unsafe extern "system" fn(HDC, HGLRC, *const i32) -> HGLRC;
type WglSwapIntervalFn = unsafe extern "system" fn(i32) -> i32;

const CLASS_NAME: &[u8] = b"glport window\0";
const DUMMY_CLASS_NAME: &[u8] = b"glport dummy\0";

//=== Event Queue =========================================================

/// Translated events accumulated by the WndProc between polls. Boxed so
/// the address handed to `GWLP_USERDATA` stays stable.
struct EventQueue {
    events: RefCell<Vec<PumpEvent>>,
}

//=== Win32Window =========================================================

pub(crate) struct Win32Window {
    hwnd: HWND,
    hdc: HDC,
    hglrc: HGLRC,
    queue: Box<EventQueue>,

    class_registered: bool,
    double_buffered: bool,

    /// A `ChangeDisplaySettings` mode switch must be undone on teardown.
    mode_switched: bool,

    cursor_hidden: bool,
    captured: bool,

    choose_pixel_format: Option<WglChoosePixelFormatFn>,
    create_context_attribs: Option<WglCreateContextAttribsFn>,
    swap_interval_fn: Capability<WglSwapIntervalFn>,
}

//--- WndProc -------------------------------------------------------------

fn lparam_x(lparam: LPARAM) -> i32 {
    (lparam & 0xffff) as u16 as i16 as i32
}

fn lparam_y(lparam: LPARAM) -> i32 {
    ((lparam >> 16) & 0xffff) as u16 as i16 as i32
}

unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let queue = GetWindowLongPtrA(hwnd, GWLP_USERDATA) as *const EventQueue;
    let Some(queue) = queue.as_ref() else {
        return DefWindowProcA(hwnd, message, wparam, lparam);
    };
    let push = |event: PumpEvent| queue.events.borrow_mut().push(event);

    match message {
        // Keep screensavers and monitor power-down away while running.
        WM_SYSCOMMAND if wparam == SC_SCREENSAVE as usize || wparam == SC_MONITORPOWER as usize => 0,

        WM_KEYDOWN | WM_KEYUP => {
            if let Some(key) = keymap::translate_vk(wparam as u16) {
                push(PumpEvent::Key { key, pressed: message == WM_KEYDOWN });
            }
            0
        }

        WM_MOUSEMOVE => {
            push(PumpEvent::MouseMove { x: lparam_x(lparam), y: lparam_y(lparam) });
            0
        }

        WM_LBUTTONDOWN | WM_LBUTTONUP | WM_MBUTTONDOWN | WM_MBUTTONUP | WM_RBUTTONDOWN
        | WM_RBUTTONUP => {
            let button = match message {
                WM_LBUTTONDOWN | WM_LBUTTONUP => MouseButton::Left,
                WM_MBUTTONDOWN | WM_MBUTTONUP => MouseButton::Middle,
                _ => MouseButton::Right,
            };
            let pressed =
                matches!(message, WM_LBUTTONDOWN | WM_MBUTTONDOWN | WM_RBUTTONDOWN);
            push(PumpEvent::MouseButton {
                button,
                pressed,
                x: lparam_x(lparam),
                y: lparam_y(lparam),
            });
            0
        }

        WM_CLOSE => {
            push(PumpEvent::CloseRequested);
            0
        }

        WM_DESTROY => {
            push(PumpEvent::Destroyed);
            0
        }

        WM_SIZE => {
            let minimized =
                wparam == SIZE_MINIMIZED as usize || wparam == SIZE_MAXHIDE as usize;
            push(PumpEvent::Resized {
                width: lparam_x(lparam).max(0) as u32,
                height: lparam_y(lparam).max(0) as u32,
                minimized,
            });
            0
        }

        WM_SETFOCUS => {
            push(PumpEvent::Focus(true));
            0
        }

        WM_KILLFOCUS => {
            push(PumpEvent::Focus(false));
            0
        }

        _ => DefWindowProcA(hwnd, message, wparam, lparam),
    }
}

//--- Bootstrap Helpers ---------------------------------------------------

fn basic_pixel_format_descriptor() -> PIXELFORMATDESCRIPTOR {
    let mut pfd: PIXELFORMATDESCRIPTOR = unsafe { std::mem::zeroed() };
    pfd.nSize = std::mem::size_of::<PIXELFORMATDESCRIPTOR>() as u16;
    pfd.nVersion = 1;
    pfd.dwFlags = PFD_DRAW_TO_WINDOW | PFD_SUPPORT_OPENGL | PFD_DOUBLEBUFFER;
    pfd.iPixelType = PFD_TYPE_RGBA;
    pfd.cColorBits = 32;
    pfd.cDepthBits = 24;
    pfd.cStencilBits = 8;
    pfd.iLayerType = PFD_MAIN_PLANE as u8;
    pfd
}

/// Resolves the WGL extension entry points through a throwaway window
/// and context; WGL cannot resolve them without a current context.
fn resolve_wgl_extensions() -> (Option<WglChoosePixelFormatFn>, Option<WglCreateContextAttribsFn>) {
    unsafe {
        let hinstance = GetModuleHandleA(ptr::null());
        let mut class: WNDCLASSEXA = std::mem::zeroed();
        class.cbSize = std::mem::size_of::<WNDCLASSEXA>() as u32;
        class.style = CS_HREDRAW | CS_VREDRAW | CS_OWNDC;
        class.lpfnWndProc = Some(DefWindowProcA);
        class.hInstance = hinstance;
        class.hCursor = LoadCursorA(ptr::null_mut(), IDC_ARROW);
        class.lpszClassName = DUMMY_CLASS_NAME.as_ptr();
        if RegisterClassExA(&class) == 0 {
            return (None, None);
        }

        let dummy = CreateWindowExA(
            0,
            DUMMY_CLASS_NAME.as_ptr(),
            b"\0".as_ptr(),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            1,
            1,
            ptr::null_mut(),
            ptr::null_mut(),
            hinstance,
            ptr::null_mut(),
        );
        if dummy.is_null() {
            UnregisterClassA(DUMMY_CLASS_NAME.as_ptr(), hinstance);
            return (None, None);
        }

        ShowWindow(dummy, SW_HIDE);
        let hdc = GetDC(dummy);
        let pfd = basic_pixel_format_descriptor();
        let format = ChoosePixelFormat(hdc, &pfd);
        SetPixelFormat(hdc, format, &pfd);
        let ctx = wglCreateContext(hdc);
        wglMakeCurrent(hdc, ctx);

        let choose = wglGetProcAddress(b"wglChoosePixelFormatARB\0".as_ptr())
            .map(|f| std::mem::transmute::<_, WglChoosePixelFormatFn>(f));
        let create = wglGetProcAddress(b"wglCreateContextAttribsARB\0".as_ptr())
            .map(|f| std::mem::transmute::<_, WglCreateContextAttribsFn>(f));

        wglMakeCurrent(ptr::null_mut(), ptr::null_mut());
        wglDeleteContext(ctx);
        ReleaseDC(dummy, hdc);
        DestroyWindow(dummy);
        UnregisterClassA(DUMMY_CLASS_NAME.as_ptr(), hinstance);

        (choose, create)
    }
}

/// Switches the physical display mode; false when the mode is refused.
fn switch_display_mode(width: u32, height: u32) -> bool {
    unsafe {
        let mut devmode: DEVMODEA = std::mem::zeroed();
        devmode.dmSize = std::mem::size_of::<DEVMODEA>() as u16;
        devmode.dmPelsWidth = width;
        devmode.dmPelsHeight = height;
        devmode.dmFields = DM_PELSWIDTH | DM_PELSHEIGHT;
        ChangeDisplaySettingsA(&devmode, CDS_FULLSCREEN) == DISP_CHANGE_SUCCESSFUL
    }
}

fn desktop_size() -> (u32, u32) {
    unsafe {
        let mut rect: RECT = std::mem::zeroed();
        GetClientRect(GetDesktopWindow(), &mut rect);
        ((rect.right - rect.left).max(0) as u32, (rect.bottom - rect.top).max(0) as u32)
    }
}

impl Win32Window {
    fn set_pixel_format(&self, opts: &ContextOptions) -> Result<(), ContextError> {
        unsafe {
            if let Some(choose) = self.choose_pixel_format {
                let attribs = [
                    WGL_DRAW_TO_WINDOW_ARB, 1,
                    WGL_SUPPORT_OPENGL_ARB, 1,
                    WGL_DOUBLE_BUFFER_ARB, 1,
                    WGL_ACCELERATION_ARB, WGL_FULL_ACCELERATION_ARB,
                    WGL_PIXEL_TYPE_ARB, WGL_TYPE_RGBA_ARB,
                    WGL_RED_BITS_ARB, 8,
                    WGL_GREEN_BITS_ARB, 8,
                    WGL_BLUE_BITS_ARB, 8,
                    WGL_ALPHA_BITS_ARB, 8,
                    WGL_DEPTH_BITS_ARB, 24,
                    WGL_STENCIL_BITS_ARB, 8,
                    WGL_SAMPLE_BUFFERS_ARB, if opts.effective_samples() > 1 { 1 } else { 0 },
                    WGL_SAMPLES_ARB, opts.effective_samples() as i32,
                    0, 0,
                ];

                let mut format = 0;
                let mut count = 0;
                if choose(self.hdc, attribs.as_ptr(), ptr::null(), 1, &mut format, &mut count) != 0
                    && count > 0
                {
                    let mut pfd: PIXELFORMATDESCRIPTOR = std::mem::zeroed();
                    DescribePixelFormat(
                        self.hdc,
                        format,
                        std::mem::size_of::<PIXELFORMATDESCRIPTOR>() as u32,
                        &mut pfd,
                    );
                    if SetPixelFormat(self.hdc, format, &pfd) != 0 {
                        return Ok(());
                    }
                }
                warn!(target: "glport::win32", "ARB pixel format failed, trying descriptor path");
            }

            let pfd = basic_pixel_format_descriptor();
            let format = ChoosePixelFormat(self.hdc, &pfd);
            if format == 0 || SetPixelFormat(self.hdc, format, &pfd) == 0 {
                return Err(ContextError::NoPixelFormat);
            }
        }
        Ok(())
    }

    fn create_gl_context(&mut self, style: ContextStyle) -> Result<(), ContextError> {
        unsafe {
            self.hglrc = match (style, self.create_context_attribs) {
                (ContextStyle::Modern { major, minor }, Some(create)) => {
                    let attribs = [
                        WGL_CONTEXT_MAJOR_VERSION_ARB, major as i32,
                        WGL_CONTEXT_MINOR_VERSION_ARB, minor as i32,
                        WGL_CONTEXT_PROFILE_MASK_ARB, WGL_CONTEXT_CORE_PROFILE_BIT_ARB,
                        0,
                    ];
                    create(self.hdc, ptr::null_mut(), attribs.as_ptr())
                }
                (ContextStyle::Modern { .. }, None) => {
                    warn!(
                        target: "glport::win32",
                        "WGL_ARB_create_context unavailable, falling back to legacy context"
                    );
                    wglCreateContext(self.hdc)
                }
                (ContextStyle::Legacy, _) => wglCreateContext(self.hdc),
            };

            if self.hglrc.is_null() {
                return Err(ContextError::ContextCreation);
            }
            if wglMakeCurrent(self.hdc, self.hglrc) == 0 {
                return Err(ContextError::ContextCreation);
            }

            let mut pfd: PIXELFORMATDESCRIPTOR = std::mem::zeroed();
            let format = windows_sys::Win32::Graphics::OpenGL::GetPixelFormat(self.hdc);
            DescribePixelFormat(
                self.hdc,
                format,
                std::mem::size_of::<PIXELFORMATDESCRIPTOR>() as u32,
                &mut pfd,
            );
            self.double_buffered = pfd.dwFlags & PFD_DOUBLEBUFFER != 0;
            if !self.double_buffered {
                warn!(target: "glport::win32", "pixel format is not double buffered, swaps become no-ops");
            }
        }
        Ok(())
    }

    fn window_center(&self) -> (i32, i32) {
        unsafe {
            let mut rect: RECT = std::mem::zeroed();
            GetWindowRect(self.hwnd, &mut rect);
            ((rect.left + rect.right) / 2, (rect.top + rect.bottom) / 2)
        }
    }

    /// Idempotent teardown shared by `Drop` and the bootstrap error path.
    pub(crate) fn close(&mut self) {
        unsafe {
            if !self.hglrc.is_null() {
                wglMakeCurrent(ptr::null_mut(), ptr::null_mut());
                wglDeleteContext(self.hglrc);
                self.hglrc = ptr::null_mut();
            }

            if !self.hwnd.is_null() {
                if !self.hdc.is_null() {
                    ReleaseDC(self.hwnd, self.hdc);
                    self.hdc = ptr::null_mut();
                }
                // Detach the queue before DestroyWindow fires WM_DESTROY.
                SetWindowLongPtrA(self.hwnd, GWLP_USERDATA, 0);
                DestroyWindow(self.hwnd);
                self.hwnd = ptr::null_mut();
            }

            if self.class_registered {
                UnregisterClassA(CLASS_NAME.as_ptr(), GetModuleHandleA(ptr::null()));
                self.class_registered = false;
            }

            if self.mode_switched {
                ChangeDisplaySettingsA(ptr::null(), 0);
                self.mode_switched = false;
            }
        }
    }
}

//=== PlatformWindow Implementation =======================================

impl PlatformWindow for Win32Window {
    fn open(opts: &ContextOptions) -> Result<Self, ContextError> {
        let (choose_pixel_format, create_context_attribs) = resolve_wgl_extensions();

        let mut win = Self {
            hwnd: ptr::null_mut(),
            hdc: ptr::null_mut(),
            hglrc: ptr::null_mut(),
            queue: Box::new(EventQueue { events: RefCell::new(Vec::new()) }),
            class_registered: false,
            double_buffered: false,
            mode_switched: false,
            cursor_hidden: false,
            captured: false,
            choose_pixel_format,
            create_context_attribs,
            swap_interval_fn: Capability::Unresolved,
        };

        match win.bootstrap(opts) {
            Ok(()) => Ok(win),
            Err(e) => {
                win.close();
                Err(e)
            }
        }
    }

    fn desktop_modes() -> Vec<Resolution> {
        unsafe {
            let mut resolutions = Vec::new();
            let mut devmode: DEVMODEA = std::mem::zeroed();
            devmode.dmSize = std::mem::size_of::<DEVMODEA>() as u16;

            // Index 0 is the current desktop mode by contract.
            if EnumDisplaySettingsA(ptr::null(), ENUM_CURRENT_SETTINGS, &mut devmode) != 0 {
                resolutions.push(Resolution {
                    width: devmode.dmPelsWidth,
                    height: devmode.dmPelsHeight,
                    monitor_index: 0,
                });
            }

            let mut index = 0;
            while EnumDisplaySettingsA(ptr::null(), index, &mut devmode) != 0 {
                push_unique_resolution(
                    &mut resolutions,
                    Resolution {
                        width: devmode.dmPelsWidth,
                        height: devmode.dmPelsHeight,
                        monitor_index: 0,
                    },
                );
                index += 1;
            }
            resolutions
        }
    }

    fn drain_events(&mut self, out: &mut Vec<PumpEvent>) {
        unsafe {
            let mut msg: MSG = std::mem::zeroed();
            while PeekMessageA(&mut msg, self.hwnd, 0, 0, PM_REMOVE) != 0 {
                TranslateMessage(&msg);
                DispatchMessageA(&msg);
            }
        }
        out.append(&mut self.queue.events.borrow_mut());
    }

    fn swap_buffers(&self) {
        if self.double_buffered {
            unsafe { SwapBuffers(self.hdc) };
        }
    }

    fn set_swap_interval(&mut self, interval: u32) {
        if let Some(set_interval) = self.swap_interval_fn.get_or_resolve(|| unsafe {
            wglGetProcAddress(b"wglSwapIntervalEXT\0".as_ptr())
                .map(|f| std::mem::transmute::<_, WglSwapIntervalFn>(f))
        }) {
            unsafe { set_interval(interval as i32) };
        }
    }

    fn set_title(&self, title: &str) {
        let Ok(title) = CString::new(title) else { return };
        unsafe { SetWindowTextA(self.hwnd, title.as_ptr() as *const u8) };
    }

    fn focus_hint(&self, _pump_focused: bool) -> bool {
        unsafe { GetFocus() == self.hwnd }
    }

    fn show_cursor(&mut self, visible: bool) {
        if visible == !self.cursor_hidden {
            return;
        }
        // ShowCursor keeps an internal display counter; one call per
        // transition keeps it balanced.
        unsafe { ShowCursor(if visible { 1 } else { 0 }) };
        self.cursor_hidden = !visible;
    }

    fn set_capture(&mut self, captured: bool) {
        if captured == self.captured {
            return;
        }

        unsafe {
            if captured {
                let mut rect: RECT = std::mem::zeroed();
                GetWindowRect(self.hwnd, &mut rect);
                SetCapture(self.hwnd);
                ClipCursor(&rect);
                let (cx, cy) = self.window_center();
                SetCursorPos(cx, cy);
            } else {
                ClipCursor(ptr::null());
                ReleaseCapture();
            }
        }
        self.captured = captured;
    }

    fn warp_cursor_to_center(&self) {
        let (cx, cy) = self.window_center();
        unsafe { SetCursorPos(cx, cy) };
    }

    fn cursor_position(&self) -> (i32, i32) {
        unsafe {
            let mut point = POINT { x: 0, y: 0 };
            GetCursorPos(&mut point);
            (point.x, point.y)
        }
    }

    fn handles(&self) -> NativeHandles {
        NativeHandles { hwnd: self.hwnd, hdc: self.hdc, hglrc: self.hglrc }
    }

    fn proc_address(&self, name: &str) -> Option<GlFunction> {
        let name = CString::new(name).ok()?;
        unsafe {
            wglGetProcAddress(name.as_ptr() as *const u8)
                .map(|f| std::mem::transmute::<_, GlFunction>(f))
        }
    }
}

impl Win32Window {
    fn bootstrap(&mut self, opts: &ContextOptions) -> Result<(), ContextError> {
        unsafe {
            let hinstance = GetModuleHandleA(ptr::null());
            let mut class: WNDCLASSEXA = std::mem::zeroed();
            class.cbSize = std::mem::size_of::<WNDCLASSEXA>() as u32;
            class.style = CS_HREDRAW | CS_VREDRAW | CS_OWNDC;
            class.lpfnWndProc = Some(wnd_proc);
            class.hInstance = hinstance;
            class.hCursor = LoadCursorA(ptr::null_mut(), IDC_ARROW);
            class.lpszClassName = CLASS_NAME.as_ptr();
            if RegisterClassExA(&class) == 0 {
                return Err(ContextError::WindowCreation);
            }
            self.class_registered = true;

            // Geometry per screen kind, with the exclusive-fullscreen
            // fallback to a borderless desktop-sized window.
            let desktop = desktop_size();
            let mut width = opts.width;
            let mut height = opts.height;
            let style;

            match opts.screen {
                ScreenKind::Windowed => {
                    style = WS_OVERLAPPEDWINDOW;
                    let mut rect =
                        RECT { left: 0, top: 0, right: width as i32, bottom: height as i32 };
                    AdjustWindowRect(&mut rect, style, 0);
                    width = (rect.right - rect.left) as u32;
                    height = (rect.bottom - rect.top) as u32;
                }
                ScreenKind::Fullscreen => {
                    style = WS_POPUP | WS_VISIBLE;
                    if switch_display_mode(width, height) {
                        self.mode_switched = true;
                    } else {
                        warn!(
                            target: "glport::win32",
                            "no {}x{} display mode, using windowed fullscreen at {}x{}",
                            width, height, desktop.0, desktop.1
                        );
                        (width, height) = desktop;
                    }
                }
                ScreenKind::WindowedFullscreen => {
                    style = WS_POPUP | WS_VISIBLE;
                    (width, height) = desktop;
                }
            }

            let title = CString::new(opts.effective_title())
                .unwrap_or_else(|_| CString::new("glport").unwrap_or_default());
            self.hwnd = CreateWindowExA(
                0,
                CLASS_NAME.as_ptr(),
                title.as_ptr() as *const u8,
                style,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                width as i32,
                height as i32,
                ptr::null_mut(),
                ptr::null_mut(),
                hinstance,
                ptr::null_mut(),
            );
            if self.hwnd.is_null() {
                return Err(ContextError::WindowCreation);
            }

            SetWindowLongPtrA(self.hwnd, GWLP_USERDATA, &*self.queue as *const EventQueue as isize);

            self.hdc = GetDC(self.hwnd);
            if self.hdc.is_null() {
                return Err(ContextError::WindowCreation);
            }

            self.set_pixel_format(opts)?;
            self.create_gl_context(opts.context)?;

            if opts.screen == ScreenKind::Windowed {
                ShowWindow(self.hwnd, SW_RESTORE);
                UpdateWindow(self.hwnd);
                SetForegroundWindow(self.hwnd);
                SetFocus(self.hwnd);
            }

            self.set_swap_interval(opts.swap_interval);

            info!(
                target: "glport::win32",
                "window up: {}x{}, {:?}, double_buffered={}",
                width, height, opts.screen, self.double_buffered
            );
            debug!(
                target: "glport::win32",
                "wgl extensions: choose_pixel_format={}, create_context_attribs={}",
                self.choose_pixel_format.is_some(),
                self.create_context_attribs.is_some()
            );
        }
        Ok(())
    }
}

impl Drop for Win32Window {
    fn drop(&mut self) {
        self.close();
    }
}
