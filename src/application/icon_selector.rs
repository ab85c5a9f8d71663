// src/application/icon_selector.rs
use tracing::debug;

use crate::constants::ICON_OPTIONS;

/// Single-choice glyph picker bound to the edit screen.
///
/// At most one option is selected at a time. The panel open flag is a separate
/// toggle and never affects the selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconSelector {
    selected: Option<usize>,
    panel_open: bool,
    field: String,
}

impl IconSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &'static [&'static str] {
        &ICON_OPTIONS
    }

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Select a glyph from the option set and write it to the bound field.
    ///
    /// Returns false for glyphs outside the set; the current selection is kept.
    pub fn select(&mut self, glyph: &str) -> bool {
        match ICON_OPTIONS.iter().position(|option| *option == glyph) {
            Some(index) => {
                self.selected = Some(index);
                self.field = glyph.to_string();
                true
            }
            None => {
                debug!(glyph, "Ignoring icon outside the option set");
                false
            }
        }
    }

    /// Restore the selection for a stored note icon, or clear it when the icon is unknown.
    pub fn preselect(&mut self, icon: &str) {
        if !self.select(icon) {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.field.clear();
    }

    pub fn selected(&self) -> Option<&'static str> {
        self.selected.map(|index| ICON_OPTIONS[index])
    }

    pub fn is_selected(&self, glyph: &str) -> bool {
        self.selected() == Some(glyph)
    }

    /// Value of the bound field consumed at submit time; empty when nothing is selected
    pub fn value(&self) -> &str {
        &self.field
    }
}
