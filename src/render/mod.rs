//! The renderer projects notes into view descriptors: one block per note with
//! its display fields and the actions it offers. Descriptors are plain data;
//! the `text` and `html` adapters turn them into something a person can look
//! at.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::note::Note;

pub mod html;
pub mod text;

/// Rendered in place of note blocks when there's nothing to show
pub const NO_NOTES: &'static str = "No notes available";

/// Rendered in place of note blocks when the notes couldn't be loaded
pub const LOAD_FAILURE: &'static str = "Failed to load notes. Please try again later.";

/// Something a user can do to a note from its block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Archive,
    Unarchive,
    Delete,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match *self {
            Action::Archive => "Archive",
            Action::Unarchive => "Unarchive",
            Action::Delete => "Delete",
        }
    }

    /// The css class the html adapter puts on this action's button
    pub fn class(&self) -> &'static str {
        match *self {
            Action::Archive => "archive-btn",
            Action::Unarchive => "unarchive-btn",
            Action::Delete => "delete-btn",
        }
    }
}

/// An action control, carrying the id of the note it targets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub action: Action,
    pub note_id: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteView {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created: String,
    pub controls: Vec<Control>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Block {
    Note(NoteView),
    Placeholder(String),
    Failure(String),
}

/// A named area of a page holding rendered blocks, plus the registry of which
/// actions each note in it answers to.
#[derive(Debug, Clone)]
pub struct Container {
    name: String,
    blocks: Vec<Block>,
    handlers: HashMap<String, Vec<Action>>,
}

impl Container {
    pub fn new(name: &str) -> Container {
        Container {
            name: String::from(name),
            blocks: Vec::new(),
            handlers: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.handlers.clear();
    }

    fn push(&mut self, block: Block) {
        if let Block::Note(ref view) = block {
            let actions = view.controls.iter().map(|x| x.action).collect();
            self.handlers.insert(view.id.clone(), actions);
        }
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Just the note blocks, in display order
    pub fn notes(&self) -> Vec<&NoteView> {
        self.blocks.iter()
            .filter_map(|x| match *x {
                Block::Note(ref view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn placeholders(&self) -> usize {
        self.blocks.iter()
            .filter(|x| match **x {
                Block::Placeholder(_) => true,
                _ => false,
            })
            .count()
    }

    /// Every action control in the container
    pub fn controls(&self) -> Vec<&Control> {
        self.notes().into_iter()
            .flat_map(|x| x.controls.iter())
            .collect()
    }

    /// Whether a click on `action` for `note_id` has a control behind it
    pub fn handles(&self, note_id: &str, action: Action) -> bool {
        match self.handlers.get(note_id) {
            Some(actions) => actions.contains(&action),
            None => false,
        }
    }
}

/// The controls a note gets, based on its archived state
pub fn controls_for(note: &Note) -> Vec<Control> {
    let toggle = if note.archived { Action::Unarchive } else { Action::Archive };
    vec![toggle, Action::Delete].into_iter()
        .map(|action| Control {
            action: action,
            note_id: note.id.clone(),
            label: action.label(),
        })
        .collect()
}

pub fn note_view(note: &Note) -> NoteView {
    NoteView {
        id: note.id.clone(),
        title: note.title.clone(),
        body: String::from(note.text()),
        created: human_date(&note.created_at),
        controls: controls_for(note),
    }
}

/// Replace whatever's in `container` with one block per note, in order (or
/// the no-notes placeholder if there are none).
pub fn render(notes: &[Note], container: &mut Container) {
    container.clear();
    if notes.is_empty() {
        container.push(Block::Placeholder(String::from(NO_NOTES)));
        return;
    }
    for note in notes {
        container.push(Block::Note(note_view(note)));
    }
}

/// Replace whatever's in `container` with a failure message
pub fn render_failure(container: &mut Container, message: &str) {
    container.clear();
    container.push(Block::Failure(String::from(message)));
}

/// Turn an ISO-8601 timestamp into "YYYY-MM-DD HH:MM" in UTC (a bare date
/// stays a date). Anything we can't parse is shown as-is.
pub fn human_date(created_at: &str) -> String {
    const SHOWN: &'static str = "%Y-%m-%d %H:%M";
    if let Ok(dt) = DateTime::parse_from_rfc3339(created_at) {
        return format!("{}", dt.with_timezone(&Utc).format(SHOWN));
    }
    // offsets without minutes (`+07`) or without a colon (`+0700`)
    if let Ok(dt) = DateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f%#z") {
        return format!("{}", dt.with_timezone(&Utc).format(SHOWN));
    }
    // no offset at all: take it as UTC
    if let Ok(dt) = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f") {
        return format!("{}", dt.format(SHOWN));
    }
    match NaiveDate::parse_from_str(created_at, "%Y-%m-%d") {
        Ok(date) => format!("{}", date.format("%Y-%m-%d")),
        Err(_) => String::from(created_at),
    }
}
