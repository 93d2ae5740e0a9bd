use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

const PREFS_DIR: &str = "tahmin_terminal";
const PREFS_FILE: &str = "prefs.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon for the toggle: the sun switches back to light, the moon to dark.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }

    pub fn announcement(self) -> String {
        format!("Theme switched to {} mode", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub win: Color,
    pub loss: Color,
    pub draw: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Red,
                win: Color::Green,
                loss: Color::Red,
                draw: Color::Gray,
            },
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                muted: Color::Gray,
                accent: Color::Yellow,
                win: Color::LightGreen,
                loss: Color::LightRed,
                draw: Color::DarkGray,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PrefsFile {
    theme: String,
}

/// Stored theme, or light when the file is missing or unreadable.
pub fn load_theme_from(path: &Path) -> Theme {
    let Ok(raw) = fs::read_to_string(path) else {
        return Theme::default();
    };
    let Ok(prefs) = serde_json::from_str::<PrefsFile>(&raw) else {
        return Theme::default();
    };
    Theme::parse(&prefs.theme).unwrap_or_default()
}

pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("create prefs dir")?;
    }
    let json = serde_json::to_string(&PrefsFile {
        theme: theme.as_str().to_string(),
    })
    .context("serialize prefs")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write prefs")?;
    fs::rename(&tmp, path).context("swap prefs")?;
    Ok(())
}

pub fn load_theme() -> Theme {
    match prefs_path() {
        Some(path) => load_theme_from(&path),
        None => Theme::default(),
    }
}

pub fn save_theme(theme: Theme) -> Result<()> {
    let Some(path) = prefs_path() else {
        return Ok(());
    };
    save_theme_to(&path, theme)
}

pub fn prefs_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("THEME_PREF_PATH")
        && !explicit.trim().is_empty()
    {
        return Some(PathBuf::from(explicit));
    }
    if let Ok(base) = std::env::var("XDG_CONFIG_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(PREFS_DIR).join(PREFS_FILE));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(PREFS_DIR)
            .join(PREFS_FILE),
    )
}
