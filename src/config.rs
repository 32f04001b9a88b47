//! Configuration module for customizable shortcuts and display settings.
//! Loaded from an INI file; a commented template is written on first run.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

const DEFAULT_CONFIG_INI: &str = include_str!("../config.ini");

/// All configurable overlay actions. Bindings are only consulted while the
/// overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Next,
    Previous,
    Close,
    First,
    Last,
}

impl Action {
    pub fn from_str(s: &str) -> Option<Action> {
        match s.to_lowercase().as_str() {
            "next" | "next_image" => Some(Action::Next),
            "previous" | "previous_image" | "prev" => Some(Action::Previous),
            "close" | "dismiss" | "exit_overlay" => Some(Action::Close),
            "first" | "first_image" => Some(Action::First),
            "last" | "last_image" => Some(Action::Last),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Next => "next",
            Action::Previous => "previous",
            Action::Close => "close",
            Action::First => "first",
            Action::Last => "last",
        }
    }
}

/// Represents all possible input types for shortcuts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputBinding {
    Key(egui::Key),
    KeyWithCtrl(egui::Key),
    KeyWithShift(egui::Key),
    KeyWithAlt(egui::Key),
}

/// Parse an input binding from string
pub fn parse_input_binding(s: &str) -> Option<InputBinding> {
    let s = s.trim().to_lowercase();

    if let Some(key_str) = s.strip_prefix("ctrl+") {
        return parse_key(key_str).map(InputBinding::KeyWithCtrl);
    }
    if let Some(key_str) = s.strip_prefix("shift+") {
        return parse_key(key_str).map(InputBinding::KeyWithShift);
    }
    if let Some(key_str) = s.strip_prefix("alt+") {
        return parse_key(key_str).map(InputBinding::KeyWithAlt);
    }

    parse_key(&s).map(InputBinding::Key)
}

/// Parse a single key from string
fn parse_key(s: &str) -> Option<egui::Key> {
    match s {
        "left" | "arrowleft" => Some(egui::Key::ArrowLeft),
        "right" | "arrowright" => Some(egui::Key::ArrowRight),
        "up" | "arrowup" => Some(egui::Key::ArrowUp),
        "down" | "arrowdown" => Some(egui::Key::ArrowDown),
        "escape" | "esc" => Some(egui::Key::Escape),
        "home" => Some(egui::Key::Home),
        "end" => Some(egui::Key::End),
        "pageup" | "page_up" => Some(egui::Key::PageUp),
        "pagedown" | "page_down" => Some(egui::Key::PageDown),
        "space" | "spacebar" => Some(egui::Key::Space),
        "enter" | "return" => Some(egui::Key::Enter),
        "backspace" => Some(egui::Key::Backspace),
        "q" => Some(egui::Key::Q),
        "j" => Some(egui::Key::J),
        "k" => Some(egui::Key::K),
        "h" => Some(egui::Key::H),
        "l" => Some(egui::Key::L),
        _ => None,
    }
}

/// Application configuration loaded from INI file
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Map from input binding to overlay action
    pub bindings: HashMap<InputBinding, Action>,
    /// Gallery background color as RGB (0-255)
    pub background_rgb: [u8; 3],
    /// Longest side of a grid thumbnail, in pixels
    pub thumbnail_size: u32,
    /// How many decoded full-size images the texture cache retains
    pub prefetch_cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Config {
            bindings: HashMap::new(),
            background_rgb: [18, 18, 18],
            thumbnail_size: 256,
            prefetch_cache_capacity: 8,
        };
        config.set_defaults();
        config
    }
}

impl Config {
    /// Set default keybindings
    fn set_defaults(&mut self) {
        self.add_binding(InputBinding::Key(egui::Key::ArrowRight), Action::Next);
        self.add_binding(InputBinding::Key(egui::Key::ArrowLeft), Action::Previous);
        self.add_binding(InputBinding::Key(egui::Key::Escape), Action::Close);
        self.add_binding(InputBinding::Key(egui::Key::Home), Action::First);
        self.add_binding(InputBinding::Key(egui::Key::End), Action::Last);
    }

    fn add_binding(&mut self, input: InputBinding, action: Action) {
        self.bindings.insert(input, action);
    }

    /// Look up the action bound to a key press, if any.
    pub fn action_for(&self, binding: &InputBinding) -> Option<Action> {
        self.bindings.get(binding).copied()
    }

    /// Settings file path inside the platform config directory.
    /// Creates the directory if it doesn't exist.
    pub fn config_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("", "", "glidewall")?;
        let config_dir = dirs.config_dir();
        let _ = fs::create_dir_all(config_dir);
        Some(config_dir.join("config.ini"))
    }

    /// Load configuration from the INI file, writing the commented template
    /// on first run. Any unreadable or missing value falls back to its
    /// default.
    pub fn load() -> Self {
        let Some(config_path) = Self::config_path() else {
            return Config::default();
        };

        if !config_path.exists() {
            let _ = fs::write(&config_path, DEFAULT_CONFIG_INI);
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => Self::parse_ini(&content),
            Err(_) => Config::default(),
        }
    }

    /// Parse INI content into Config
    fn parse_ini(content: &str) -> Self {
        let mut config = Config::default();

        let mut in_display_section = false;
        let mut in_gallery_section = false;
        let mut in_shortcuts_section = false;
        let mut seen_shortcut = false;

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            // Check for section headers
            if line.starts_with('[') && line.ends_with(']') {
                let section = &line[1..line.len() - 1];
                in_display_section = section.eq_ignore_ascii_case("display");
                in_gallery_section = section.eq_ignore_ascii_case("gallery");
                in_shortcuts_section = section.eq_ignore_ascii_case("shortcuts")
                    || section.eq_ignore_ascii_case("keybindings");
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if in_display_section {
                match key.as_str() {
                    "background_rgb" => {
                        if let Some(rgb) = parse_rgb_triplet(value) {
                            config.background_rgb = rgb;
                        }
                    }
                    "thumbnail_size" => {
                        if let Ok(v) = value.parse::<u32>() {
                            config.thumbnail_size = v.clamp(64, 1024);
                        }
                    }
                    _ => {}
                }
            }

            if in_gallery_section {
                if key.as_str() == "prefetch_cache_capacity" {
                    if let Ok(v) = value.parse::<usize>() {
                        config.prefetch_cache_capacity = v.clamp(2, 64);
                    }
                }
            }

            if in_shortcuts_section {
                if let Some(action) = Action::from_str(&key) {
                    // First shortcut line replaces the defaults wholesale so
                    // the file is the single source of truth for bindings.
                    if !seen_shortcut {
                        config.bindings.clear();
                        seen_shortcut = true;
                    }
                    // Value can be comma-separated for multiple bindings
                    for binding_str in value.split(',') {
                        if let Some(binding) = parse_input_binding(binding_str.trim()) {
                            config.add_binding(binding, action);
                        }
                    }
                }
            }
        }

        config
    }
}

/// Parse "r,g,b" into an RGB triplet
fn parse_rgb_triplet(s: &str) -> Option<[u8; 3]> {
    let mut parts = s.split(',').map(|p| p.trim().parse::<u8>());
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some([r, g, b])
}
