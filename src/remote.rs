//! The remote client performs note CRUD against the notes service. Every
//! operation reports its outcome in the feedback tray, and every failure is
//! logged and handed back to the caller so pages can react to it too.

use std::sync::Arc;

use serde_json::{self, Value};

use crate::api::{self, Api, ApiReq};
use crate::error::{NError, NResult};
use crate::feedback::FeedbackTray;
use crate::models::note::{NewNote, Note};
use crate::models::validate::Validate;

/// Shown when the transport couldn't reach the service at all
pub const TRANSPORT_FAILURE: &'static str = "An error occurred. Please try again later.";

pub struct RemoteNotes {
    api: Api,
    feedback: Arc<FeedbackTray>,
    /// Served by `list_notes()` when the service can't be reached
    fallback: Option<Vec<Note>>,
}

impl RemoteNotes {
    pub fn new(api: Api, feedback: Arc<FeedbackTray>) -> RemoteNotes {
        RemoteNotes {
            api: api,
            feedback: feedback,
            fallback: None,
        }
    }

    /// Serve `notes` from `list_notes()` whenever the service fails
    pub fn with_fallback(mut self, notes: Vec<Note>) -> RemoteNotes {
        self.fallback = Some(notes);
        self
    }

    /// Show the request-level message for a failure
    fn report_failure(&self, err: &NError) {
        match *err {
            NError::Service(_, ref msg) => self.feedback.error(msg),
            NError::Validation(..) => self.feedback.error("Title and body are required"),
            NError::NotFound(_) => self.feedback.error("Note is not found"),
            _ => self.feedback.error(TRANSPORT_FAILURE),
        }
    }

    /// Report the outcome of an operation and pass it along
    fn finish<T>(&self, op: &str, res: NResult<T>, success: &str, failure: &str) -> NResult<T> {
        match res {
            Ok(x) => {
                self.feedback.success(success);
                Ok(x)
            }
            Err(e) => {
                error!("remote::{}() -- {}", op, e);
                self.report_failure(&e);
                self.feedback.error(failure);
                Err(e)
            }
        }
    }

    /// Fetch every note from the service
    pub fn list_notes(&self) -> NResult<Vec<Note>> {
        let res = self.api.get("/notes", ApiReq::new())
            .and_then(parse_notes);
        match res {
            Ok(notes) => {
                self.feedback.success("Notes loaded successfully!");
                Ok(notes)
            }
            Err(e) => {
                error!("remote::list_notes() -- {}", e);
                self.report_failure(&e);
                match self.fallback {
                    Some(ref notes) => {
                        warn!("remote::list_notes() -- serving {} local notes instead", notes.len());
                        Ok(notes.clone())
                    }
                    None => {
                        self.feedback.error("Failed to load notes");
                        Err(e)
                    }
                }
            }
        }
    }

    /// Create a note. Empty titles/bodies are refused before anything goes
    /// out over the wire.
    pub fn create_note(&self, title: &str, body: &str) -> NResult<Note> {
        let new_note = NewNote::new(title, body);
        let res = new_note.do_validate("note")
            .and_then(|_| {
                let data = serde_json::to_value(&new_note)?;
                self.api.post("/notes", ApiReq::new().data(data))
            })
            .and_then(parse_note);
        self.finish("create_note", res, "Note added successfully!", "Failed to add note")
    }

    /// Mark a note archived, returning the updated record
    pub fn archive_note(&self, id: &str) -> NResult<Note> {
        let res = self.toggle(id, "archive");
        self.finish("archive_note", res, "Note archived successfully!", "Failed to archive note")
            .map_err(|e| not_found(e, id))
    }

    /// Mark a note active again, returning the updated record
    pub fn unarchive_note(&self, id: &str) -> NResult<Note> {
        let res = self.toggle(id, "unarchive");
        self.finish("unarchive_note", res, "Note unarchived successfully!", "Failed to unarchive note")
            .map_err(|e| not_found(e, id))
    }

    pub fn delete_note(&self, id: &str) -> NResult<bool> {
        let res = check_id(id)
            .and_then(|_| api::resource(&["notes", id]))
            .and_then(|path| self.api.delete(&path, ApiReq::new()))
            .map(|_| true);
        self.finish("delete_note", res, "Note deleted successfully!", "Failed to delete note")
            .map_err(|e| not_found(e, id))
    }

    fn fetch_note(&self, id: &str) -> NResult<Note> {
        check_id(id)?;
        self.api.get(&api::resource(&["notes", id])?, ApiReq::new())
            .and_then(parse_note)
    }

    /// Hit `/notes/{id}/archive` or `/notes/{id}/unarchive`. The service may
    /// only acknowledge those, so if no note comes back we fetch it.
    fn toggle(&self, id: &str, action: &str) -> NResult<Note> {
        check_id(id)?;
        let val = self.api.post(&api::resource(&["notes", id, action])?, ApiReq::new())?;
        match parse_note(val) {
            Ok(note) => Ok(note),
            Err(_) => self.fetch_note(id),
        }
    }
}

fn check_id(id: &str) -> NResult<()> {
    if id.trim().is_empty() {
        return NErr!(NError::NotFound(String::from("<empty id>")));
    }
    Ok(())
}

/// Turn a service 404 into a NotFound for the given note
fn not_found(err: NError, id: &str) -> NError {
    if err.is_not_found() {
        NError::NotFound(String::from(id))
    } else {
        err
    }
}

/// The service answers `{"data": [...]}`, older deployments a bare array
pub fn parse_notes(val: Value) -> NResult<Vec<Note>> {
    let val = match val {
        Value::Object(mut obj) => match obj.remove("data") {
            Some(data) => data,
            None => return NErr!(NError::MissingField(String::from("data"))),
        },
        x => x,
    };
    Ok(serde_json::from_value(val)?)
}

/// A single note, either bare or wrapped in `{"data": {...}}`
pub fn parse_note(val: Value) -> NResult<Note> {
    let val = match val {
        Value::Object(mut obj) => match obj.remove("data") {
            Some(data @ Value::Object(_)) => data,
            Some(_) => return NErr!(NError::MissingField(String::from("data"))),
            None => Value::Object(obj),
        },
        _ => return NErr!(NError::MissingField(String::from("note"))),
    };
    Ok(serde_json::from_value(val)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_envelopes() {
        let notes = parse_notes(json!({"status": "success", "data": [{"id": "a", "title": "T", "body": "B"}]})).unwrap();
        assert_eq!(notes.len(), 1);
        let notes = parse_notes(json!([{"id": "a", "title": "T", "body": "B"}, {"id": "b", "title": "U", "content": "C"}])).unwrap();
        assert_eq!(notes[1].text(), "C");
        assert!(parse_notes(json!({"status": "success"})).is_err());

        let note = parse_note(json!({"data": {"id": "a", "title": "T", "body": "B", "archived": true}})).unwrap();
        assert!(note.archived);
        let note = parse_note(json!({"id": "a", "title": "T", "body": "B"})).unwrap();
        assert_eq!(note.id, "a");
        assert!(parse_note(json!({"status": "success", "message": "Note archived"})).is_err());
        assert!(parse_note(Value::Null).is_err());
    }
}
