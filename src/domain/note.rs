// src/domain/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ICON, UNTITLED_PLACEHOLDER};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub icon: String,
    pub created: DateTime<Utc>,
}

impl Note {
    /// Icon to display, falling back to the default glyph when none was stored
    pub fn display_icon(&self) -> &str {
        resolve_icon(&self.icon)
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_PLACEHOLDER
        } else {
            &self.title
        }
    }
}

/// Mutable fields of a note, as sent by the edit screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            icon: icon.into(),
        }
    }
}

pub fn resolve_icon(icon: &str) -> &str {
    if icon.trim().is_empty() {
        DEFAULT_ICON
    } else {
        icon
    }
}
