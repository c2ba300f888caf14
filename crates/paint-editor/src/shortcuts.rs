//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to the same actions the toolbar buttons
//! trigger. Lives in Rust so the bindings are testable without a browser.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Same as the mode button.
    ToggleMode,
    /// Same as the eraser button.
    Eraser,
    /// Same as the clear button.
    Clear,
    /// Same as the download button.
    Download,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` plays the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"f"`, `"Delete"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if alt || (cmd && shift) {
            return None;
        }

        if cmd {
            return match key {
                "s" | "S" => Some(ShortcutAction::Download),
                "Delete" | "Backspace" => Some(ShortcutAction::Clear),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        match key {
            "f" | "F" => Some(ShortcutAction::ToggleMode),
            "e" | "E" => Some(ShortcutAction::Eraser),
            _ => None,
        }
    }
}
