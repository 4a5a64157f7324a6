//! A single interface over "where the notes live", so pages don't care if
//! they're running against the local store or the notes service.

use crate::error::{NError, NResult};
use crate::models::note::{NewNote, Note};
use crate::models::validate::Validate;
use crate::remote::RemoteNotes;
use crate::store::LocalStore;
use crate::util;

pub trait NoteRepository {
    /// Every note, in the source's order
    fn list(&mut self) -> NResult<Vec<Note>>;

    fn create(&mut self, title: &str, body: &str) -> NResult<Note>;

    /// Set the archived flag on a note, returning the updated note
    fn set_archived(&mut self, id: &str, archived: bool) -> NResult<Note>;

    fn delete(&mut self, id: &str) -> NResult<()>;
}

/// Offline mode: notes live in the local store and nothing goes over the wire.
pub struct LocalRepository {
    store: LocalStore,
}

impl LocalRepository {
    pub fn new(store: LocalStore) -> LocalRepository {
        LocalRepository { store: store }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Store a freshly created note, refusing one whose id is already taken
    fn insert(&mut self, note: Note) -> NResult<Note> {
        if !self.store.add(note.clone()) {
            return NErr!(NError::Msg(format!("note id already taken: {}", note.id)));
        }
        debug!("repository::insert() -- local note {}", note.id);
        Ok(note)
    }

    /// Come up with a `notes-<millis>` id that isn't taken yet
    fn next_id(&self) -> String {
        let mut millis = util::now_millis();
        loop {
            let id = format!("notes-{}", millis);
            if self.store.find_by_id(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}

impl NoteRepository for LocalRepository {
    fn list(&mut self) -> NResult<Vec<Note>> {
        Ok(self.store.all().to_vec())
    }

    fn create(&mut self, title: &str, body: &str) -> NResult<Note> {
        let new_note = NewNote::new(title, body);
        new_note.do_validate("note")?;
        let mut note = Note::local(&new_note);
        note.id = self.next_id();
        self.insert(note)
    }

    fn set_archived(&mut self, id: &str, archived: bool) -> NResult<Note> {
        if !self.store.set_archived(id, archived) {
            return NErr!(NError::NotFound(String::from(id)));
        }
        match self.store.find_by_id(id) {
            Some(note) => Ok(note.clone()),
            None => NErr!(NError::NotFound(String::from(id))),
        }
    }

    fn delete(&mut self, id: &str) -> NResult<()> {
        match self.store.remove(id) {
            Some(_) => Ok(()),
            None => NErr!(NError::NotFound(String::from(id))),
        }
    }
}

/// Online mode: the notes service is the authority.
pub struct RemoteRepository {
    client: RemoteNotes,
}

impl RemoteRepository {
    pub fn new(client: RemoteNotes) -> RemoteRepository {
        RemoteRepository { client: client }
    }
}

impl NoteRepository for RemoteRepository {
    fn list(&mut self) -> NResult<Vec<Note>> {
        self.client.list_notes()
    }

    fn create(&mut self, title: &str, body: &str) -> NResult<Note> {
        self.client.create_note(title, body)
    }

    fn set_archived(&mut self, id: &str, archived: bool) -> NResult<Note> {
        if archived {
            self.client.archive_note(id)
        } else {
            self.client.unarchive_note(id)
        }
    }

    fn delete(&mut self, id: &str) -> NResult<()> {
        self.client.delete_note(id).map(|_| ())
    }
}
