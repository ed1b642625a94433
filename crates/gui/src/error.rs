//! Backend error vocabulary.

use thiserror::Error;

/// Errors produced by the backend.
///
/// `UnknownView` and `Quit` are signals that callers match on by variant:
/// the former when a name does not resolve to a view, the latter to end the
/// main loop cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuiError {
    #[error("unknown view: {0}")]
    UnknownView(String),

    #[error("quit")]
    Quit,

    #[error("invalid dimensions for view {name}: ({x0}, {y0}) - ({x1}, {y1})")]
    InvalidDimensions {
        name: String,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    },

    #[error("invalid point ({x}, {y})")]
    InvalidPoint { x: usize, y: usize },

    #[error("update queue closed")]
    Closed,
}

/// Check whether an error chain carries the quit signal.
pub fn is_quit(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<GuiError>(), Some(GuiError::Quit))
}

/// Check whether an error chain carries the unknown-view signal.
pub fn is_unknown_view(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<GuiError>(), Some(GuiError::UnknownView(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_quit_is_recognized_through_context() {
        let err = Err::<(), _>(GuiError::Quit)
            .context("while dispatching Quit")
            .unwrap_err();
        assert!(is_quit(&err));
        assert!(!is_unknown_view(&err));
    }

    #[test]
    fn test_message_text_is_not_the_signal() {
        let err = anyhow::anyhow!("quit");
        assert!(!is_quit(&err));
    }

    #[test]
    fn test_unknown_view() {
        let err: anyhow::Error = GuiError::UnknownView("menu".to_string()).into();
        assert!(is_unknown_view(&err));
        assert_eq!(err.to_string(), "unknown view: menu");
    }
}
