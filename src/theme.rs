//! Overlay theme: shared palette, layout metrics, and the one-time install
//! of overlay styling into the egui context (the equivalent of injecting a
//! shared stylesheet, guarded by a stable marker id).

use egui::{Color32, Id};

/// Dimmed backdrop behind the stage.
pub const BACKDROP: Color32 = Color32::from_black_alpha(221);
/// Resting fill of the close and prev/next controls.
pub const CONTROL_FILL: Color32 = Color32::from_black_alpha(170);
/// Hover fill of the controls (premultiplied 0x222 at ~80%).
pub const CONTROL_HOVER_FILL: Color32 = Color32::from_rgba_premultiplied(27, 27, 27, 204);
/// Focus ring for keyboard navigation.
pub const FOCUS_OUTLINE: Color32 = Color32::from_rgb(90, 162, 255);
/// Counter pill background.
pub const COUNTER_FILL: Color32 = Color32::from_black_alpha(119);
/// Caption text, slightly dimmed against the backdrop.
pub const CAPTION_TEXT: Color32 = Color32::from_gray(217);

/// Margin between the screen edge and the stage.
pub const STAGE_MARGIN: f32 = 24.0;
/// Diameter of the round close control.
pub const CLOSE_CONTROL_SIZE: f32 = 40.0;
/// Diameter of the round prev/next controls.
pub const NAV_CONTROL_SIZE: f32 = 48.0;
/// Inset of counter and close control from the stage corners.
pub const CORNER_INSET: f32 = 12.0;
/// Vertical room reserved under the image for the caption.
pub const CAPTION_HEIGHT: f32 = 28.0;

fn marker_id() -> Id {
    Id::new("glidewall-overlay-theme")
}

/// Install overlay styling into the context. Idempotent: the first call per
/// context installs and returns `true`; every later call is a no-op
/// returning `false`.
pub fn install(ctx: &egui::Context) -> bool {
    let already = ctx.data(|d| d.get_temp::<bool>(marker_id()).unwrap_or(false));
    if already {
        return false;
    }

    let mut style = (*ctx.style()).clone();
    style.visuals.selection.stroke = egui::Stroke::new(2.0, FOCUS_OUTLINE);
    style.visuals.widgets.inactive.weak_bg_fill = CONTROL_FILL;
    style.visuals.widgets.hovered.weak_bg_fill = CONTROL_HOVER_FILL;
    style.visuals.widgets.active.weak_bg_fill = CONTROL_HOVER_FILL;
    ctx.set_style(style);

    ctx.data_mut(|d| d.insert_temp(marker_id(), true));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_applies_overlay_styling() {
        let ctx = egui::Context::default();
        assert!(install(&ctx));
        assert_eq!(ctx.style().visuals.selection.stroke.color, FOCUS_OUTLINE);
        assert_eq!(
            ctx.style().visuals.widgets.inactive.weak_bg_fill,
            CONTROL_FILL
        );
    }

    #[test]
    fn second_install_is_a_no_op() {
        let ctx = egui::Context::default();
        assert!(install(&ctx));
        assert!(!install(&ctx));
        assert!(!install(&ctx));
    }

    #[test]
    fn contexts_are_styled_independently() {
        let a = egui::Context::default();
        let b = egui::Context::default();
        assert!(install(&a));
        assert!(install(&b));
    }
}
