// src/application/mod.rs
pub mod client;
pub mod icon_selector;
pub mod note_controller;
pub mod note_store;
pub mod registrar;
pub mod registration_flow;

pub use client::{ClientError, Confirm, KeyValueStorage, NotesApi, RegistrationApi};
pub use icon_selector::IconSelector;
pub use note_controller::{Action, EditForm, NoteController, Screen};
pub use note_store::{NoteRepository, NoteStore};
pub use registrar::{Registrar, StudentRepository};
pub use registration_flow::{RegistrationFlow, RegistrationForm};
