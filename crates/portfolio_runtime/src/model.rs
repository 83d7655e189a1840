//! Identifiers and records shared by the window manager, launchers, and desktop icons.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every application the desktop can launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppId {
    Terminal,
    About,
    Projects,
    Contact,
    Certifications,
    Settings,
    Trash,
    Phishing,
    Nmap,
    Metasploit,
    John,
    Wireshark,
}

impl AppId {
    /// Every app, in launcher order.
    pub const ALL: [AppId; 12] = [
        Self::Terminal,
        Self::About,
        Self::Projects,
        Self::Contact,
        Self::Certifications,
        Self::Settings,
        Self::Trash,
        Self::Phishing,
        Self::Nmap,
        Self::Metasploit,
        Self::John,
        Self::Wireshark,
    ];

    /// Stable lowercase token used in storage keys and window ids.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::About => "about",
            Self::Projects => "projects",
            Self::Contact => "contact",
            Self::Certifications => "certifications",
            Self::Settings => "settings",
            Self::Trash => "trash",
            Self::Phishing => "phishing",
            Self::Nmap => "nmap",
            Self::Metasploit => "metasploit",
            Self::John => "john",
            Self::Wireshark => "wireshark",
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names no known app or window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown identifier `{0}`")]
pub struct UnknownIdError(pub String);

impl FromStr for AppId {
    type Err = UnknownIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|app| app.as_str() == raw)
            .ok_or_else(|| UnknownIdError(raw.to_string()))
    }
}

const FOLDER_WINDOW_PREFIX: &str = "folder-";

/// Identity of an open window. One window per id at most.
///
/// Serialized as its string form: `"about"` or `"folder-<folder id>"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum WindowId {
    /// The single window of a built-in app.
    App(AppId),
    /// The window listing a desktop folder, keyed by folder id.
    Folder(String),
}

impl WindowId {
    /// Window id of the folder with id `folder_id`.
    pub fn folder(folder_id: impl Into<String>) -> Self {
        Self::Folder(folder_id.into())
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::App(app_id) => f.write_str(app_id.as_str()),
            Self::Folder(folder_id) => write!(f, "{FOLDER_WINDOW_PREFIX}{folder_id}"),
        }
    }
}

impl FromStr for WindowId {
    type Err = UnknownIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(folder_id) = raw.strip_prefix(FOLDER_WINDOW_PREFIX) {
            if !folder_id.is_empty() {
                return Ok(Self::folder(folder_id));
            }
        }
        raw.parse().map(Self::App)
    }
}

impl From<WindowId> for String {
    fn from(id: WindowId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for WindowId {
    type Error = UnknownIdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<AppId> for WindowId {
    fn from(app_id: AppId) -> Self {
        Self::App(app_id)
    }
}

/// Which content the rendering layer mounts inside a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowContent {
    App(AppId),
    /// Folder listing; the folder is named by the window id.
    Folder,
}

/// Top-left corner of a window, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

/// Outer window dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

/// Position and size together; the on-screen rectangle of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowFrame {
    pub position: WindowPosition,
    pub size: WindowSize,
}

/// Visible desktop area windows are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

/// One open window as the window manager stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub content: WindowContent,
    pub minimized: bool,
    /// Independent of `minimized`; a window may carry both.
    pub maximized: bool,
    pub z_index: u64,
    /// Ignored while maximized.
    pub position: WindowPosition,
    /// Ignored while maximized.
    pub size: WindowSize,
}

impl WindowRecord {
    /// The rectangle the window occupies on screen: the whole viewport while maximized.
    pub fn frame(&self, viewport: Viewport) -> WindowFrame {
        if self.maximized {
            WindowFrame {
                position: WindowPosition::default(),
                size: WindowSize {
                    width: viewport.width,
                    height: viewport.height,
                },
            }
        } else {
            WindowFrame {
                position: self.position,
                size: self.size,
            }
        }
    }
}

/// Everything a window record holds except its stacking order, which the manager assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub id: WindowId,
    pub title: String,
    pub content: WindowContent,
    pub minimized: bool,
    pub maximized: bool,
    pub position: WindowPosition,
    pub size: WindowSize,
}

impl OpenWindowRequest {
    /// A visible, unmaximized 900x600 window at the origin.
    pub fn new(id: WindowId, title: impl Into<String>, content: WindowContent) -> Self {
        Self {
            id,
            title: title.into(),
            content,
            minimized: false,
            maximized: false,
            position: WindowPosition::default(),
            size: WindowSize {
                width: 900,
                height: 600,
            },
        }
    }

    /// Sets the initial position.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = WindowPosition { x, y };
        self
    }

    /// Sets the initial size.
    pub fn sized(mut self, width: i32, height: i32) -> Self {
        self.size = WindowSize { width, height };
        self
    }

    pub(crate) fn into_record(self, z_index: u64) -> WindowRecord {
        WindowRecord {
            id: self.id,
            title: self.title,
            content: self.content,
            minimized: self.minimized,
            maximized: self.maximized,
            z_index,
            position: self.position,
            size: self.size,
        }
    }
}
