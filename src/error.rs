//=========================================================================
// Context Errors
//
// Failure taxonomy for window/context bootstrap. Only unrecoverable
// setup failures surface here; degraded setups (fullscreen fallback,
// legacy-context fallback, missing vsync extension) are logged by the
// backends and the bootstrap continues with lesser capability.
//
//=========================================================================

//=== ContextError ========================================================

/// Unrecoverable window/context bootstrap failure.
///
/// Returned by [`Context::new`](crate::Context::new). By the time one of
/// these is observed, every partially acquired native resource has been
/// released again; no process-wide state is left behind and a subsequent
/// `Context::new` starts from scratch.
#[derive(Debug)]
pub enum ContextError {
    /// A context is already live. At most one window exists per process.
    AlreadyOpen,

    /// The display/desktop connection could not be opened.
    DisplayOpen,

    /// A platform library (Xlib, GLX, ...) could not be loaded.
    LibraryLoad(String),

    /// The windowing/GL extension version is below the required minimum.
    UnsupportedVersion { major: i32, minor: i32 },

    /// Framebuffer/pixel-format negotiation yielded no candidate.
    NoPixelFormat,

    /// Native window creation failed at the OS level.
    WindowCreation,

    /// GL context creation or activation failed.
    ContextCreation,
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyOpen => write!(f, "a window/context is already open"),
            Self::DisplayOpen => write!(f, "failed to open display connection"),
            Self::LibraryLoad(lib) => write!(f, "failed to load platform library: {}", lib),
            Self::UnsupportedVersion { major, minor } => {
                write!(f, "windowing/GL API version {}.{} is too old", major, minor)
            }
            Self::NoPixelFormat => write!(f, "no matching framebuffer configuration"),
            Self::WindowCreation => write!(f, "native window creation failed"),
            Self::ContextCreation => write!(f, "GL context creation failed"),
        }
    }
}

impl std::error::Error for ContextError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_implements_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ContextError>();
    }

    #[test]
    fn display_includes_requested_version() {
        let err = ContextError::UnsupportedVersion { major: 1, minor: 1 };
        let msg = format!("{}", err);
        assert!(msg.contains("1.1"), "message should name the version: {}", msg);
    }

    #[test]
    fn display_includes_library_name() {
        let err = ContextError::LibraryLoad("libGL.so".into());
        assert!(format!("{}", err).contains("libGL.so"));
    }
}
