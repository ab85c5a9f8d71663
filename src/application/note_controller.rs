// src/application/note_controller.rs
use tracing::{debug, instrument, warn};

use crate::application::client::{ClientError, Confirm, NotesApi};
use crate::application::icon_selector::IconSelector;
use crate::constants::DEFAULT_ICON;
use crate::domain::{Note, NoteDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Read,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start a new note (List -> Edit)
    Create,
    /// Show a note from the list (List -> Read)
    Open(i64),
    /// Leave the read view, or abandon an edit (-> List)
    Back,
    /// Edit the note being read (Read -> Edit)
    Edit,
    /// Save the form (Edit -> List)
    Submit,
    /// Remove the selected note after confirmation (Edit -> List)
    Delete,
}

/// Contents of the edit screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm {
    pub title: String,
    pub text: String,
    pub icons: IconSelector,
}

impl EditForm {
    fn load(note: &Note) -> Self {
        let mut icons = IconSelector::new();
        icons.preselect(&note.icon);
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            icons,
        }
    }

    /// Draft sent to the server. An empty selection saves the default glyph.
    pub fn to_draft(&self) -> NoteDraft {
        let icon = match self.icons.value() {
            "" => DEFAULT_ICON,
            glyph => glyph,
        };
        NoteDraft::new(self.title.clone(), self.text.clone(), icon)
    }
}

/// Client-side note session: local mirror of the server collection plus the
/// List/Read/Edit screen state.
///
/// Every transition into `List` refetches the full collection, so after any
/// mutating call completes `notes()` equals what the server stores.
pub struct NoteController<A: NotesApi, C: Confirm> {
    api: A,
    confirm: C,
    notes: Vec<Note>,
    screen: Screen,
    current_id: Option<i64>,
    form: EditForm,
    last_error: Option<ClientError>,
}

impl<A: NotesApi, C: Confirm> NoteController<A, C> {
    pub fn new(api: A, confirm: C) -> Self {
        Self {
            api,
            confirm,
            notes: Vec::new(),
            screen: Screen::List,
            current_id: None,
            form: EditForm::default(),
            last_error: None,
        }
    }

    /// Initial fetch for the List screen
    pub fn start(&mut self) {
        self.enter_list();
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn current_id(&self) -> Option<i64> {
        self.current_id
    }

    /// Note shown on the read screen
    pub fn current_note(&self) -> Option<&Note> {
        self.current_id
            .and_then(|id| self.notes.iter().find(|note| note.id == id))
    }

    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EditForm {
        &mut self.form
    }

    /// Failure of the most recent call, kept for display
    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    /// Apply a user action. Actions that make no sense on the current screen are ignored.
    #[instrument(level = "debug", skip(self), fields(screen = ?self.screen))]
    pub fn dispatch(&mut self, action: Action) -> Screen {
        match (self.screen, action) {
            (Screen::List, Action::Create) => {
                self.current_id = None;
                self.form = EditForm::default();
                self.screen = Screen::Edit;
            }
            (Screen::List, Action::Open(id)) => {
                if self.notes.iter().any(|note| note.id == id) {
                    self.current_id = Some(id);
                    self.screen = Screen::Read;
                } else {
                    debug!(note_id = id, "Ignoring open of a note missing from the list");
                }
            }
            (Screen::Read, Action::Back) | (Screen::Edit, Action::Back) => {
                self.enter_list();
            }
            (Screen::Read, Action::Edit) => {
                if let Some(form) = self.current_note().map(EditForm::load) {
                    self.form = form;
                    self.screen = Screen::Edit;
                }
            }
            (Screen::Edit, Action::Submit) => self.submit(),
            (Screen::Edit, Action::Delete) => self.delete(),
            (screen, action) => {
                debug!(?screen, ?action, "Ignoring action not valid for screen");
            }
        }
        self.screen
    }

    fn submit(&mut self) {
        let draft = self.form.to_draft();
        let result = match self.current_id {
            None => self.api.create(&draft),
            Some(id) => self.api.update(id, &draft),
        };

        match result {
            Ok(()) => self.enter_list(),
            Err(err) => self.record(err),
        }
    }

    fn delete(&mut self) {
        let Some(id) = self.current_id else {
            debug!("Nothing to delete for an unsaved note");
            return;
        };

        if !self.confirm.confirm("Delete this note?") {
            debug!(note_id = id, "Delete declined");
            return;
        }

        match self.api.delete(id) {
            Ok(()) => self.enter_list(),
            Err(err) => self.record(err),
        }
    }

    fn enter_list(&mut self) {
        self.screen = Screen::List;
        self.current_id = None;
        match self.api.list() {
            Ok(notes) => {
                self.notes = notes;
                self.last_error = None;
            }
            Err(err) => {
                self.notes.clear();
                self.record(err);
            }
        }
    }

    fn record(&mut self, err: ClientError) {
        warn!(error = %err, "Note request failed");
        self.last_error = Some(err);
    }
}
