//! Theme system for the editor.
//!
//! ## Learning: Builder Pattern
//!
//! Themes are plain data built by constructor functions and tweaked with
//! `with_*` methods:
//! ```rust,ignore
//! let theme = Theme::dark().with_keyword(Color::rgb(1.0, 0.0, 0.0));
//! ```
//! A theme can also be stored as JSON and named in the config by path.

use serde::{Deserialize, Serialize};
use std::path::Path;

use uaide_core::LogKind;

/// Color representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Builds a color from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as f32 / 255.0,
            ((rgb >> 8) & 0xFF) as f32 / 255.0,
            (rgb & 0xFF) as f32 / 255.0,
        )
    }

    /// Converts to iced Color.
    pub fn to_iced(&self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Editor theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: String,

    /// Is this a dark theme?
    pub is_dark: bool,

    pub background: BackgroundColors,
    pub foreground: ForegroundColors,
    pub ui: UiColors,
    pub syntax: SyntaxColors,
    pub log: LogColors,
}

/// Background colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundColors {
    /// Editor area
    pub editor: Color,
    /// Output log
    pub log: Color,
    /// Button row and popup
    pub panel: Color,
    pub selection: Color,
}

/// Foreground (text) colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForegroundColors {
    pub primary: Color,
    pub muted: Color,
    pub accent: Color,
}

/// UI element colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiColors {
    pub border: Color,
    pub button: Color,
    pub button_hover: Color,
    pub button_disabled: Color,
}

/// Syntax highlighting colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxColors {
    pub keyword: Color,
    pub string: Color,
}

/// Output log colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogColors {
    pub banner: Color,
    pub stdout: Color,
    pub stderr: Color,
    pub error: Color,
    pub info: Color,
}

impl LogColors {
    pub fn for_kind(&self, kind: LogKind) -> Color {
        match kind {
            LogKind::Banner => self.banner,
            LogKind::Stdout => self.stdout,
            LogKind::Stderr => self.stderr,
            LogKind::Error => self.error,
            LogKind::Info => self.info,
        }
    }
}

/// Errors loading or saving a theme file.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid theme: {0}")]
    Json(#[from] serde_json::Error),
}

impl Theme {
    /// Creates the default dark theme.
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            is_dark: true,
            background: BackgroundColors {
                editor: Color::hex(0x2B2B2B),
                log: Color::hex(0x1E1E1E),
                panel: Color::hex(0x252526),
                selection: Color { a: 0.55, ..Color::rgb(0.25, 0.46, 0.85) },
            },
            foreground: ForegroundColors {
                primary: Color::hex(0xF8F8F2),
                muted: Color::rgb(0.5, 0.5, 0.5),
                accent: Color::rgb(0.4, 0.6, 1.0),
            },
            ui: UiColors {
                border: Color::rgb(0.25, 0.25, 0.28),
                button: Color::rgb(0.2, 0.2, 0.22),
                button_hover: Color::rgb(0.25, 0.25, 0.28),
                button_disabled: Color::rgb(0.15, 0.15, 0.16),
            },
            syntax: SyntaxColors {
                keyword: Color::hex(0x0066FF),
                string: Color::hex(0x37FF00),
            },
            log: LogColors {
                banner: Color::hex(0x00FFFF),
                stdout: Color::hex(0xF8F8F2),
                stderr: Color::hex(0xFF0000),
                error: Color::hex(0xFF0000),
                info: Color::hex(0x008000),
            },
        }
    }

    /// Creates a light theme.
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            is_dark: false,
            background: BackgroundColors {
                editor: Color::rgb(1.0, 1.0, 1.0),
                log: Color::rgb(0.96, 0.96, 0.96),
                panel: Color::rgb(0.93, 0.93, 0.93),
                selection: Color { a: 0.3, ..Color::rgb(0.3, 0.5, 0.8) },
            },
            foreground: ForegroundColors {
                primary: Color::rgb(0.1, 0.1, 0.1),
                muted: Color::rgb(0.5, 0.5, 0.5),
                accent: Color::rgb(0.2, 0.4, 0.8),
            },
            ui: UiColors {
                border: Color::rgb(0.85, 0.85, 0.85),
                button: Color::rgb(0.88, 0.88, 0.88),
                button_hover: Color::rgb(0.82, 0.82, 0.82),
                button_disabled: Color::rgb(0.94, 0.94, 0.94),
            },
            syntax: SyntaxColors {
                keyword: Color::hex(0x0066FF),
                string: Color::hex(0x1E8C00),
            },
            log: LogColors {
                banner: Color::hex(0x007C8C),
                stdout: Color::rgb(0.1, 0.1, 0.1),
                stderr: Color::hex(0xCC0000),
                error: Color::hex(0xCC0000),
                info: Color::hex(0x008000),
            },
        }
    }

    /// Picks a theme by config name: `dark`, `light`, or a path to a JSON
    /// theme file. Unknown names and unreadable files fall back to dark.
    pub fn resolve(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            path if path.ends_with(".json") => Self::load(Path::new(path)).unwrap_or_else(|e| {
                tracing::warn!(path, error = %e, "cannot load theme, using dark");
                Self::dark()
            }),
            other => {
                tracing::warn!(theme = other, "unknown theme, using dark");
                Self::dark()
            }
        }
    }

    pub fn with_keyword(mut self, color: Color) -> Self {
        self.syntax.keyword = color;
        self
    }

    /// The matching built-in iced palette.
    pub fn iced(&self) -> iced::Theme {
        if self.is_dark {
            iced::Theme::Dark
        } else {
            iced::Theme::Light
        }
    }

    /// Loads a theme from a file.
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Saves the theme to a file.
    pub fn save(&self, path: &Path) -> Result<(), ThemeError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
