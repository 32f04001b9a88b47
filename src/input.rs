//! Input translation.
//!
//! Maps raw pointer and keyboard input onto overlay actions so that every
//! modality drives the same navigation operations. Keyboard bindings come
//! from the config table and are only consulted while the overlay is open;
//! thumbnail clicks are gated on modifiers so modified clicks keep their
//! default behavior.

use crate::config::{Action, Config, InputBinding};

/// Classify a key press (with modifiers) into the binding shape used by the
/// config table.
pub fn binding_for(key: egui::Key, modifiers: egui::Modifiers) -> InputBinding {
    if modifiers.ctrl || modifiers.command || modifiers.mac_cmd {
        InputBinding::KeyWithCtrl(key)
    } else if modifiers.shift {
        InputBinding::KeyWithShift(key)
    } else if modifiers.alt {
        InputBinding::KeyWithAlt(key)
    } else {
        InputBinding::Key(key)
    }
}

/// Overlay action for a key press while the overlay is open. `None` while
/// closed: keyboard navigation is ignored entirely until `open`.
pub fn overlay_action(
    config: &Config,
    overlay_open: bool,
    key: egui::Key,
    modifiers: egui::Modifiers,
) -> Option<Action> {
    if !overlay_open {
        return None;
    }
    config.action_for(&binding_for(key, modifiers))
}

/// Whether a primary click on a thumbnail should open the overlay. Any held
/// modifier leaves the click to its default handling instead.
pub fn thumbnail_click_opens(modifiers: egui::Modifiers) -> bool {
    !modifiers.any()
}
