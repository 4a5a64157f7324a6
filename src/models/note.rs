use crate::models::validate::{self, Validate};
use crate::util;

/// What gets shown when a note carries neither a `body` nor a `content` field
pub const NO_CONTENT: &'static str = "No content";

/// A note record. The service (and older fixtures) may hand us the note text
/// under `content` instead of `body`, so both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(default)]
    pub archived: bool,
}

impl Note {
    pub fn new<T: Into<String>>(id: T, title: T, body: T, created_at: T) -> Note {
        Note {
            id: id.into(),
            title: title.into(),
            body: Some(body.into()),
            content: None,
            created_at: created_at.into(),
            archived: false,
        }
    }

    /// Build a note that never touched the service: the id comes from the
    /// current time in millis and `createdAt` is now.
    pub fn local(new_note: &NewNote) -> Note {
        Note::new(
            format!("notes-{}", util::now_millis()),
            new_note.title.clone(),
            new_note.body.clone(),
            util::now_iso(),
        )
    }

    /// The note's text, whichever field it came in.
    pub fn text(&self) -> &str {
        non_empty(&self.body)
            .or_else(|| non_empty(&self.content))
            .unwrap_or(NO_CONTENT)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    match field.as_ref() {
        Some(x) if !x.is_empty() => Some(x.as_str()),
        _ => None,
    }
}

/// The fields a user fills in to create a note. This is also the exact body
/// sent to `POST /notes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub body: String,
}

impl NewNote {
    pub fn new<T: Into<String>>(title: T, body: T) -> NewNote {
        NewNote {
            title: title.into(),
            body: body.into(),
        }
    }
}

impl Validate for NewNote {
    fn validate(&self) -> Vec<(String, String)> {
        let mut errors = Vec::new();
        validate::required(&mut errors, "title", &self.title);
        validate::required(&mut errors, "body", &self.body);
        errors
    }
}

/// Which slice of the collection a page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteFilter {
    Active,
    Archived,
    All,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        match *self {
            NoteFilter::Active => !note.archived,
            NoteFilter::Archived => note.archived,
            NoteFilter::All => true,
        }
    }

    /// Keep the notes this filter lets through, in their original order
    pub fn apply(&self, notes: Vec<Note>) -> Vec<Note> {
        notes.into_iter()
            .filter(|x| self.matches(x))
            .collect()
    }
}
