// src/ports/tiles.rs
use tracing::instrument;

use crate::constants::DEFAULT_PREVIEW_LEN;
use crate::domain::Note;
use crate::util::text::truncate_preview;

/// One entry of the note list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteTile {
    pub id: i64,
    pub icon: String,
    pub title: String,
    pub preview: String,
}

/// Renders the list and read screens as plain text.
#[derive(Debug, Clone)]
pub struct TilePresenter {
    preview_len: usize,
}

impl Default for TilePresenter {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_LEN)
    }
}

impl TilePresenter {
    pub fn new(preview_len: usize) -> Self {
        Self { preview_len }
    }

    pub fn tile(&self, note: &Note) -> NoteTile {
        NoteTile {
            id: note.id,
            icon: note.display_icon().to_string(),
            title: note.display_title().to_string(),
            preview: truncate_preview(&note.text, self.preview_len),
        }
    }

    pub fn tiles(&self, notes: &[Note]) -> Vec<NoteTile> {
        notes.iter().map(|note| self.tile(note)).collect()
    }

    #[instrument(level = "trace", skip(self, notes))]
    pub fn render_list(&self, notes: &[Note]) -> String {
        if notes.is_empty() {
            return "No notes yet".to_string();
        }

        self.tiles(notes)
            .iter()
            .map(|tile| {
                // Previews are shown on one line
                let preview = tile.preview.replace('\n', " ");
                format!("{:>6}  {} {}\n        {}", tile.id, tile.icon, tile.title, preview)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render_note(&self, note: &Note) -> String {
        format!(
            "{} {}\n{}\n\n{}",
            note.display_icon(),
            note.display_title(),
            note.created.format("%Y-%m-%d %H:%M UTC"),
            note.text
        )
    }
}
