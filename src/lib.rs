// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::application::{
    Action, Confirm, EditForm, NoteController, NotesApi, RegistrationApi, RegistrationFlow,
    RegistrationForm, Screen,
};
use crate::cli::args::{Args, Command, ConfigCommand, GradesCommand, NotesCommand};
use crate::domain::{Course, DomainError, GradeSummary, Student};
use crate::infrastructure::{Config, FileStorage, HttpApi};
use crate::ports::TilePresenter;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting studydesk with arguments");

    // Init must work even when the existing file does not parse
    if let Command::Config {
        command: ConfigCommand::Init { force },
    } = args.command
    {
        let path = match args.config {
            Some(path) => path,
            None => Config::default_path().context("No config directory on this platform")?,
        };
        Config::init(&path, force)?;
        info!(path = %path.display(), "Config written");
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = Config::resolve(args.config.as_deref())?;
    let base_url = args
        .server
        .clone()
        .unwrap_or_else(|| config.client.base_url.clone());

    match args.command {
        Command::Serve { port, database } => {
            let mut server = config.server.clone();
            if let Some(port) = port {
                server.port = port;
            }
            if let Some(database) = database {
                server.database = database;
            }
            ports::http::run_server(&server)
        }
        Command::Notes { command } => {
            let api = HttpApi::new(&base_url)?;
            let presenter = TilePresenter::new(config.client.preview_len);
            let confirm: Box<dyn FnMut(&str) -> bool> = match &command {
                NotesCommand::Delete { yes: true, .. } => Box::new(|_: &str| true),
                _ => Box::new(prompt_confirm),
            };
            let mut controller = NoteController::new(api, confirm);
            let output = execute_notes(&mut controller, &presenter, command)?;
            println!("{output}");
            Ok(())
        }
        Command::Register {
            first_name,
            last_name,
            course,
            group,
        } => {
            let form = build_registration_form(first_name, last_name, &course, &group)?;
            let storage = FileStorage::new(storage_dir(&config)?)?;
            let mut flow = RegistrationFlow::new(HttpApi::new(&base_url)?, storage);
            let target = flow.submit(&form)?;
            info!(target, "Registration finished");
            println!("Registered. Continue at {}{}", base_url, target);
            Ok(())
        }
        Command::Students => {
            let mut api = HttpApi::new(&base_url)?;
            let students = api.students()?;
            println!("{}", format_students(&students));
            Ok(())
        }
        Command::Grades { command } => {
            let api = HttpApi::new(&base_url)?;
            let summary = match command {
                GradesCommand::Show => api.grades()?,
                GradesCommand::Add { value } => api.add_grade(value)?,
                GradesCommand::Remove => api.remove_grade()?,
            };
            println!("{}", format_grades(&summary));
            Ok(())
        }
        // Init returned before the config was resolved
        Command::Config { .. } => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Drive the note screens for one CLI command and return what to print
pub fn execute_notes<A: NotesApi, C: Confirm>(
    controller: &mut NoteController<A, C>,
    presenter: &TilePresenter,
    command: NotesCommand,
) -> Result<String> {
    controller.start();
    fail_on_error(controller)?;

    match command {
        NotesCommand::List => Ok(presenter.render_list(controller.notes())),
        NotesCommand::Show { note_id } => {
            open_note(controller, note_id)?;
            let note = controller
                .current_note()
                .context("Selected note missing from list")?;
            Ok(presenter.render_note(note))
        }
        NotesCommand::Add { title, text, icon } => {
            controller.dispatch(Action::Create);
            let form = controller.form_mut();
            form.title = title;
            form.text = text;
            if let Some(icon) = icon {
                select_icon(form, &icon)?;
            }
            controller.dispatch(Action::Submit);
            fail_on_error(controller)?;
            Ok(presenter.render_list(controller.notes()))
        }
        NotesCommand::Edit {
            note_id,
            title,
            text,
            icon,
        } => {
            open_note(controller, note_id)?;
            controller.dispatch(Action::Edit);
            let form = controller.form_mut();
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(text) = text {
                form.text = text;
            }
            if let Some(icon) = icon {
                select_icon(form, &icon)?;
            }
            controller.dispatch(Action::Submit);
            fail_on_error(controller)?;
            Ok(presenter.render_list(controller.notes()))
        }
        NotesCommand::Delete { note_id, .. } => {
            open_note(controller, note_id)?;
            controller.dispatch(Action::Edit);
            let screen = controller.dispatch(Action::Delete);
            fail_on_error(controller)?;
            if screen == Screen::List {
                Ok(format!("Deleted note {}", note_id))
            } else {
                Ok("Delete cancelled".to_string())
            }
        }
    }
}

fn open_note<A: NotesApi, C: Confirm>(
    controller: &mut NoteController<A, C>,
    note_id: i64,
) -> Result<()> {
    if controller.dispatch(Action::Open(note_id)) != Screen::Read {
        return Err(DomainError::NoteNotFound(note_id).into());
    }
    Ok(())
}

fn select_icon(form: &mut EditForm, icon: &str) -> Result<()> {
    if !form.icons.select(icon) {
        bail!(
            "Unknown icon '{}', choose one of: {}",
            icon,
            form.icons.options().join(" ")
        );
    }
    Ok(())
}

fn fail_on_error<A: NotesApi, C: Confirm>(controller: &NoteController<A, C>) -> Result<()> {
    match controller.last_error() {
        Some(err) => Err(err.clone()).context("Note request failed"),
        None => Ok(()),
    }
}

pub fn build_registration_form(
    first_name: String,
    last_name: String,
    course: &str,
    group: &str,
) -> Result<RegistrationForm> {
    let mut form = RegistrationForm::new();
    form.first_name = first_name;
    form.last_name = last_name;
    form.set_course(course.parse::<Course>()?);
    form.set_group(group)?;
    Ok(form)
}

fn storage_dir(config: &Config) -> Result<PathBuf> {
    if config.client.storage_dir.is_empty() {
        FileStorage::default_dir()
    } else {
        Ok(PathBuf::from(&config.client.storage_dir))
    }
}

fn prompt_confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

pub fn format_students(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students registered".to_string();
    }
    students
        .iter()
        .map(|s| {
            format!(
                "{:>4}  {} {}  course {}  {}",
                s.id, s.last_name, s.first_name, s.course, s.group_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_grades(summary: &GradeSummary) -> String {
    let grades = summary
        .grades
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "Grades: {}\nAverage: {:.2}\nCount: {}",
        if grades.is_empty() { "none" } else { &grades },
        summary.average,
        summary.count
    )
}
