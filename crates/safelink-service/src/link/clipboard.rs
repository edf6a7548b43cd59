//! Best-effort clipboard copy.

use safelink_core::traits::Clipboard;

/// Copy `text`, turning failure into a notice instead of an error.
///
/// Returns `None` on success. A failed copy never interrupts the flow
/// that asked for it.
pub fn copy_with_notice(clipboard: &dyn Clipboard, text: &str) -> Option<String> {
    match clipboard.copy(text) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Clipboard copy failed");
            Some(format!(
                "Could not copy to the clipboard ({}). Please copy the link manually.",
                e.message
            ))
        }
    }
}
