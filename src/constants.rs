// src/constants.rs
//
// Application-wide constants shared by the server, the client controllers and the CLI.

/// Glyph shown for a note that was saved without an icon.
///
/// Used in: `domain/note.rs`, `application/note_controller.rs`
pub const DEFAULT_ICON: &str = "📝";

/// Title shown in list tiles and the read view when a note title is empty.
///
/// Used in: `domain/note.rs`
pub const UNTITLED_PLACEHOLDER: &str = "Untitled";

/// Marker appended to a truncated note preview.
///
/// Used in: `util/text.rs`
pub const ELLIPSIS: &str = "...";

/// Default number of body characters shown in a list tile before truncation.
///
/// Overridable via `client.preview_len` in the config file.
///
/// Used in: `infrastructure/config.rs`, `ports/tiles.rs`
pub const DEFAULT_PREVIEW_LEN: usize = 80;

/// Fixed option set of the icon selector on the edit screen.
///
/// Used in: `application/icon_selector.rs`
pub const ICON_OPTIONS: [&str; 8] = ["📝", "📐", "📚", "💡", "🧪", "🎯", "🗓", "⭐"];

/// Local storage key holding the last submitted registration form.
///
/// Used in: `application/registration_flow.rs`
pub const STUDENT_SNAPSHOT_KEY: &str = "student";

/// Page the registration flow navigates to after submitting.
///
/// Used in: `application/registration_flow.rs`
pub const STUDENT_HOME_PATH: &str = "/student";

/// Default listening port of the HTTP server.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_PORT: u16 = 3000;

/// Milliseconds SQLite waits on a locked database before failing a statement.
///
/// The notes and students stores hold separate connections to the same file.
///
/// Used in: `infrastructure/sqlite.rs`
pub const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;
