//=========================================================================
// Context Options
//
// Immutable description of the window and GL context to create. Options
// are fixed once handed to `Context::new`; there is no runtime
// renegotiation of the pixel format or screen mode.
//
//=========================================================================

//=== Resolution ==========================================================

/// A display resolution, as reported by [`desktop_modes`](crate::desktop_modes).
///
/// Index 0 of the returned list is the current desktop mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,

    /// Monitor index (0 = first monitor). Carried for callers that track
    /// multi-head setups; both backends currently drive the default
    /// screen only and ignore it.
    pub monitor_index: u32,
}

//=== ScreenKind ==========================================================

/// How the window covers the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    /// A decorated window of the requested client-area size.
    Windowed,

    /// A physical display mode switch to the requested resolution.
    ///
    /// If the display does not support the requested mode, the bootstrap
    /// falls back to [`ScreenKind::WindowedFullscreen`] at the current
    /// desktop resolution and still succeeds.
    Fullscreen,

    /// A borderless window sized to the current desktop resolution.
    /// The requested width/height are ignored.
    WindowedFullscreen,
}

//=== ContextStyle ========================================================

/// Which flavor of GL context to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStyle {
    /// An immediate, unversioned context.
    Legacy,

    /// A versioned core-profile context. Falls back to [`Legacy`] when
    /// the context-creation extension is unavailable.
    ///
    /// [`Legacy`]: ContextStyle::Legacy
    Modern { major: u32, minor: u32 },
}

//=== ContextOptions ======================================================

/// Requested window geometry, screen mode, and GL context attributes.
///
/// Built with [`ContextOptions::new`] and the `with_*` setters:
///
/// ```
/// use glport::{ContextOptions, ContextStyle, ScreenKind};
///
/// let opts = ContextOptions::new(1280, 720)
///     .with_title("demo")
///     .with_screen(ScreenKind::Windowed)
///     .with_context(ContextStyle::Modern { major: 3, minor: 3 })
///     .with_samples(4);
/// ```
#[derive(Debug, Clone)]
pub struct ContextOptions {
    /// Requested client-area width. Ignored for windowed fullscreen.
    pub width: u32,

    /// Requested client-area height. Ignored for windowed fullscreen.
    pub height: u32,

    /// Monitor index (0 = first monitor). See [`Resolution::monitor_index`].
    pub monitor_index: u32,

    pub screen: ScreenKind,
    pub context: ContextStyle,

    /// Display refreshes to wait between buffer swaps. 0 = no vsync.
    pub swap_interval: u32,

    /// Multisample count. 0 or 1 = no multisampling.
    pub samples: u32,

    /// Window title. `None` uses a default.
    pub title: Option<String>,
}

pub(crate) const DEFAULT_TITLE: &str = "glport window";

impl ContextOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            monitor_index: 0,
            screen: ScreenKind::Windowed,
            context: ContextStyle::Legacy,
            swap_interval: 1,
            samples: 0,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_screen(mut self, screen: ScreenKind) -> Self {
        self.screen = screen;
        self
    }

    pub fn with_context(mut self, context: ContextStyle) -> Self {
        self.context = context;
        self
    }

    pub fn with_monitor(mut self, monitor_index: u32) -> Self {
        self.monitor_index = monitor_index;
        self
    }

    pub fn with_swap_interval(mut self, interval: u32) -> Self {
        self.swap_interval = interval;
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Title to apply at creation time, defaulted if none was given.
    pub(crate) fn effective_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Sample count normalized for pixel-format negotiation (0 means 1x).
    pub(crate) fn effective_samples(&self) -> u32 {
        self.samples.max(1)
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_windowed_legacy_vsync() {
        let opts = ContextOptions::default();
        assert_eq!(opts.width, 640);
        assert_eq!(opts.height, 480);
        assert_eq!(opts.screen, ScreenKind::Windowed);
        assert_eq!(opts.context, ContextStyle::Legacy);
        assert_eq!(opts.swap_interval, 1);
        assert_eq!(opts.samples, 0);
        assert!(opts.title.is_none());
    }

    #[test]
    fn builder_setters_apply() {
        let opts = ContextOptions::new(1920, 1080)
            .with_title("test")
            .with_screen(ScreenKind::Fullscreen)
            .with_context(ContextStyle::Modern { major: 3, minor: 3 })
            .with_monitor(1)
            .with_swap_interval(0)
            .with_samples(8);

        assert_eq!(opts.width, 1920);
        assert_eq!(opts.title.as_deref(), Some("test"));
        assert_eq!(opts.screen, ScreenKind::Fullscreen);
        assert_eq!(opts.context, ContextStyle::Modern { major: 3, minor: 3 });
        assert_eq!(opts.monitor_index, 1);
        assert_eq!(opts.swap_interval, 0);
        assert_eq!(opts.samples, 8);
    }

    #[test]
    fn missing_title_falls_back_to_default() {
        let opts = ContextOptions::default();
        assert_eq!(opts.effective_title(), DEFAULT_TITLE);
        assert_eq!(opts.with_title("x").effective_title(), "x");
    }

    #[test]
    fn zero_samples_normalize_to_one() {
        assert_eq!(ContextOptions::default().effective_samples(), 1);
        assert_eq!(ContextOptions::default().with_samples(4).effective_samples(), 4);
    }
}
