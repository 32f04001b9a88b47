//! Application shell.
//!
//! Draws the thumbnail grid, and above it the fullscreen overlay when open.
//! All input (thumbnail clicks, overlay controls, keyboard, touch swipes)
//! is routed into the `Navigator`; decoded pixels from the prefetch worker
//! are drained here and uploaded as textures.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

use eframe::egui;
use lru::LruCache;
use tracing::debug;

use crate::config::{Action, Config};
use crate::gesture::{SwipeAction, SwipeTracker};
use crate::input;
use crate::navigator::{ImageSequence, Navigator};
use crate::prefetch::{DecodedEntry, ImageKind, PrefetchOutcome, Prefetcher};
use crate::theme;

/// Display size of one grid cell, in points.
const GRID_CELL: f32 = 160.0;
const GRID_SPACING: f32 = 10.0;

/// The one shared overlay surface: persistent control ids plus focus
/// bookkeeping. Built on first `open`, retained across close/open.
struct OverlaySurface {
    /// Move keyboard focus onto the close control next frame.
    focus_close: bool,
}

impl OverlaySurface {
    fn build(ctx: &egui::Context) -> Self {
        // Overlay styling goes in together with the surface; install
        // reports whether this context already had it.
        if theme::install(ctx) {
            debug!("overlay theme installed");
        }
        Self { focus_close: false }
    }
}

/// Application state
pub struct GalleryApp {
    /// Configuration
    config: Config,
    /// Overlay state machine; the only owner of the current index
    navigator: Navigator,
    /// Background decode worker
    prefetcher: Prefetcher,
    /// Overlay surface, created at most once per app lifetime
    overlay: Option<OverlaySurface>,
    /// Touch swipe tracking (overlay only)
    swipe: SwipeTracker,
    /// Uploaded grid thumbnails by sequence index
    thumb_textures: HashMap<usize, egui::TextureHandle>,
    /// Uploaded full-size images, bounded so long sessions don't grow
    full_textures: LruCache<usize, egui::TextureHandle>,
    /// Decodes that failed; never re-requested
    failed: HashSet<(usize, ImageKind)>,
}

impl GalleryApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, sequence: ImageSequence) -> Self {
        // Configure visuals (background driven by config)
        let mut visuals = egui::Visuals::dark();
        let [r, g, b] = config.background_rgb;
        let bg = egui::Color32::from_rgb(r, g, b);
        visuals.window_fill = bg;
        visuals.panel_fill = bg;
        cc.egui_ctx.set_visuals(visuals);

        let repaint_ctx = cc.egui_ctx.clone();
        let prefetcher = Prefetcher::spawn(config.thumbnail_size, move || {
            repaint_ctx.request_repaint();
        });

        let cache_capacity = NonZeroUsize::new(config.prefetch_cache_capacity)
            .unwrap_or(NonZeroUsize::new(8).unwrap());

        Self {
            navigator: Navigator::new(sequence),
            prefetcher,
            overlay: None,
            swipe: SwipeTracker::new(),
            thumb_textures: HashMap::new(),
            full_textures: LruCache::new(cache_capacity),
            failed: HashSet::new(),
            config,
        }
    }

    /// Public surface: open the overlay at `index`.
    pub fn open(&mut self, ctx: &egui::Context, index: usize) {
        if !self.navigator.open(index) {
            return;
        }
        if self.overlay.is_none() {
            self.overlay = Some(OverlaySurface::build(ctx));
        }
        if let Some(surface) = &mut self.overlay {
            surface.focus_close = true;
        }
        // Best-effort fullscreen; the overlay covers the viewport either way.
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
        self.after_navigation();
    }

    /// Public surface: close the overlay. No-op when never opened.
    pub fn close(&mut self, ctx: &egui::Context) {
        if self.overlay.is_none() {
            return;
        }
        self.navigator.close();
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
    }

    /// Public surface: advance to the next image.
    pub fn next(&mut self) {
        self.navigator.next();
        self.after_navigation();
    }

    /// Public surface: go back to the previous image.
    pub fn prev(&mut self) {
        self.navigator.prev();
        self.after_navigation();
    }

    fn jump_first(&mut self) {
        self.navigator.jump_first();
        self.after_navigation();
    }

    fn jump_last(&mut self) {
        self.navigator.jump_last();
        self.after_navigation();
    }

    /// Request the current image and eagerly warm both wrapped neighbors.
    /// Neighbor requests are speculative fire-and-forget: never tracked,
    /// never awaited.
    fn after_navigation(&mut self) {
        let Some(current) = self.navigator.current_index() else {
            return;
        };
        self.request_full(current);
        if let Some((next, prev)) = self.navigator.neighbor_indices() {
            self.request_full(next);
            self.request_full(prev);
        }
    }

    fn request_full(&mut self, index: usize) {
        if self.full_textures.contains(&index) || self.failed.contains(&(index, ImageKind::Full)) {
            return;
        }
        if let Some(entry) = self.navigator.sequence().get(index) {
            self.prefetcher.request(index, &entry.path, ImageKind::Full);
        }
    }

    /// Upload every decode that finished since the last frame.
    fn drain_decodes(&mut self, ctx: &egui::Context) {
        for outcome in self.prefetcher.drain() {
            match outcome {
                PrefetchOutcome::Decoded(DecodedEntry { index, kind, image }) => {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    let name = format!("{kind:?}-{index}");
                    let texture = ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR);
                    match kind {
                        ImageKind::Thumbnail => {
                            self.thumb_textures.insert(index, texture);
                        }
                        ImageKind::Full => {
                            self.full_textures.put(index, texture);
                        }
                    }
                }
                PrefetchOutcome::Failed { index, kind } => {
                    self.failed.insert((index, kind));
                }
            }
        }
    }

    /// Translate this frame's keyboard and touch events into overlay
    /// actions. Both are inert while the overlay is closed.
    fn gather_actions(&mut self, ctx: &egui::Context) -> Vec<Action> {
        let open = self.navigator.is_open();
        let config = &self.config;
        let swipe = &mut self.swipe;

        ctx.input(|i| {
            let mut actions = Vec::new();
            for event in &i.events {
                match *event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => {
                        if let Some(action) = input::overlay_action(config, open, key, modifiers) {
                            actions.push(action);
                        }
                    }
                    egui::Event::Touch { id, phase, pos, .. } if open => {
                        match swipe.on_touch(id, phase, pos) {
                            Some(SwipeAction::Next) => actions.push(Action::Next),
                            Some(SwipeAction::Prev) => actions.push(Action::Previous),
                            None => {}
                        }
                    }
                    _ => {}
                }
            }
            actions
        })
    }

    fn apply_action(&mut self, ctx: &egui::Context, action: Action) {
        match action {
            Action::Next => self.next(),
            Action::Previous => self.prev(),
            Action::Close => self.close(ctx),
            Action::First => self.jump_first(),
            Action::Last => self.jump_last(),
        }
    }

    /// Draw the thumbnail grid (always present; the overlay covers it while
    /// open).
    fn draw_grid(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.navigator.sequence().is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("No images found. Pass a gallery directory as argument")
                            .color(egui::Color32::GRAY)
                            .size(16.0),
                    );
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.spacing_mut().item_spacing = egui::Vec2::splat(GRID_SPACING);
                ui.horizontal_wrapped(|ui| {
                    let entries: Vec<(usize, String)> = self
                        .navigator
                        .sequence()
                        .iter()
                        .enumerate()
                        .map(|(i, e)| (i, e.caption.clone()))
                        .collect();
                    for (index, caption) in entries {
                        self.draw_thumbnail(ui, index, &caption);
                    }
                });
            });
        });
    }

    fn draw_thumbnail(&mut self, ui: &mut egui::Ui, index: usize, caption: &str) {
        let cell = egui::Vec2::splat(GRID_CELL);

        let response = match self.thumb_textures.get(&index) {
            Some(texture) => {
                let tex_size = texture.size_vec2();
                let scale = (cell.x / tex_size.x).min(cell.y / tex_size.y).min(1.0);
                let image = egui::Image::new(egui::load::SizedTexture::new(
                    texture.id(),
                    tex_size * scale,
                ));
                ui.add_sized(cell, egui::ImageButton::new(image))
                    .on_hover_text(caption)
            }
            None => {
                // Not decoded yet: request it and show a named placeholder.
                // Undecodable files keep the placeholder and stay clickable.
                if !self.failed.contains(&(index, ImageKind::Thumbnail)) {
                    if let Some(entry) = self.navigator.sequence().get(index) {
                        self.prefetcher
                            .request(index, &entry.path, ImageKind::Thumbnail);
                    }
                }
                let label = egui::RichText::new(caption).color(egui::Color32::GRAY);
                ui.add_sized(cell, egui::Button::new(label).wrap())
            }
        };

        // Modified clicks keep their default behavior; only a plain primary
        // activation (click, Enter, Space) opens the overlay.
        if response.clicked() {
            let modifiers = ui.input(|i| i.modifiers);
            if input::thumbnail_click_opens(modifiers) {
                let ctx = ui.ctx().clone();
                self.open(&ctx, index);
            }
        }
    }

    /// Draw the overlay: backdrop, stage image, counter, caption and the
    /// close/prev/next controls.
    fn draw_overlay(&mut self, ctx: &egui::Context) {
        let Some(index) = self.navigator.current_index() else {
            return;
        };
        let counter = self.navigator.counter_text().unwrap_or_default();
        let caption = self.navigator.caption().unwrap_or_default().to_owned();

        let screen = ctx.screen_rect();
        let mut close_requested = false;
        let mut go_next = false;
        let mut go_prev = false;

        let Some(surface) = self.overlay.as_mut() else {
            return;
        };
        let focus_close = surface.focus_close;
        surface.focus_close = false;

        egui::Area::new(egui::Id::new("gw-overlay"))
            .fixed_pos(screen.min)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let backdrop = ui.allocate_rect(screen, egui::Sense::click());
                ui.painter().rect_filled(screen, 0.0, theme::BACKDROP);

                let stage = screen.shrink(theme::STAGE_MARGIN);
                let image_area = egui::Rect::from_min_max(
                    stage.min,
                    egui::pos2(stage.max.x, stage.max.y - theme::CAPTION_HEIGHT),
                );

                // Stage image, contained within the image area.
                match self.full_textures.get(&index) {
                    Some(texture) => {
                        let tex_size = texture.size_vec2();
                        let scale = (image_area.width() / tex_size.x)
                            .min(image_area.height() / tex_size.y)
                            .min(1.0);
                        let image_rect =
                            egui::Rect::from_center_size(image_area.center(), tex_size * scale);
                        ui.painter().image(
                            texture.id(),
                            image_rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    None if self.failed.contains(&(index, ImageKind::Full)) => {
                        ui.put(
                            egui::Rect::from_center_size(
                                image_area.center(),
                                egui::vec2(image_area.width(), 24.0),
                            ),
                            egui::Label::new(
                                egui::RichText::new("Could not load image")
                                    .color(egui::Color32::RED)
                                    .size(16.0),
                            )
                            .selectable(false),
                        );
                    }
                    None => {
                        // Still decoding, or evicted from the cache; either
                        // way re-requesting is safe and self-healing.
                        self.request_full(index);
                        ui.put(
                            egui::Rect::from_center_size(
                                image_area.center(),
                                egui::Vec2::splat(32.0),
                            ),
                            egui::Spinner::new(),
                        );
                    }
                }

                // Position counter, top-left of the stage.
                let counter_font = egui::FontId::proportional(12.0);
                let counter_galley = ui.fonts(|f| {
                    f.layout_no_wrap(counter.clone(), counter_font, egui::Color32::WHITE)
                });
                let counter_rect = egui::Rect::from_min_size(
                    stage.min + egui::Vec2::splat(theme::CORNER_INSET),
                    counter_galley.size() + egui::vec2(16.0, 8.0),
                );
                ui.painter()
                    .rect_filled(counter_rect, 8.0, theme::COUNTER_FILL);
                ui.put(
                    counter_rect,
                    egui::Label::new(
                        egui::RichText::new(&counter)
                            .color(egui::Color32::WHITE)
                            .size(12.0),
                    )
                    .selectable(false),
                );

                // Caption under the image.
                let caption_rect = egui::Rect::from_min_max(
                    egui::pos2(stage.min.x, image_area.max.y),
                    stage.max,
                );
                ui.put(
                    caption_rect,
                    egui::Label::new(
                        egui::RichText::new(&caption)
                            .color(theme::CAPTION_TEXT)
                            .size(13.0),
                    )
                    .truncate()
                    .selectable(false),
                );

                // Close control, top-right.
                let close_rect = egui::Rect::from_min_size(
                    egui::pos2(
                        stage.max.x - theme::CLOSE_CONTROL_SIZE - theme::CORNER_INSET,
                        stage.min.y + theme::CORNER_INSET,
                    ),
                    egui::Vec2::splat(theme::CLOSE_CONTROL_SIZE),
                );
                let close_response = ui.put(
                    close_rect,
                    egui::Button::new(egui::RichText::new("\u{00D7}").size(22.0))
                        .fill(theme::CONTROL_FILL)
                        .rounding(theme::CLOSE_CONTROL_SIZE / 2.0),
                );
                if focus_close {
                    close_response.request_focus();
                }
                if close_response.clicked() {
                    close_requested = true;
                }

                // Prev/next controls at mid-height.
                let nav_half = theme::NAV_CONTROL_SIZE / 2.0;
                let prev_rect = egui::Rect::from_center_size(
                    egui::pos2(stage.min.x + nav_half, stage.center().y),
                    egui::Vec2::splat(theme::NAV_CONTROL_SIZE),
                );
                let next_rect = egui::Rect::from_center_size(
                    egui::pos2(stage.max.x - nav_half, stage.center().y),
                    egui::Vec2::splat(theme::NAV_CONTROL_SIZE),
                );
                if ui
                    .put(
                        prev_rect,
                        egui::Button::new(egui::RichText::new("\u{2039}").size(26.0))
                            .fill(theme::CONTROL_FILL)
                            .rounding(nav_half),
                    )
                    .clicked()
                {
                    go_prev = true;
                }
                if ui
                    .put(
                        next_rect,
                        egui::Button::new(egui::RichText::new("\u{203A}").size(26.0))
                            .fill(theme::CONTROL_FILL)
                            .rounding(nav_half),
                    )
                    .clicked()
                {
                    go_next = true;
                }

                // Clicking the backdrop outside the stage dismisses; clicks
                // on the image itself do not.
                if backdrop.clicked() {
                    if let Some(pos) = backdrop.interact_pointer_pos() {
                        if !stage.contains(pos) {
                            close_requested = true;
                        }
                    }
                }
            });

        if go_next {
            self.next();
        }
        if go_prev {
            self.prev();
        }
        if close_requested {
            self.close(ctx);
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_decodes(ctx);

        for action in self.gather_actions(ctx) {
            self.apply_action(ctx, action);
        }

        self.draw_grid(ctx);

        if self.navigator.is_open() {
            self.draw_overlay(ctx);
        }
    }
}
