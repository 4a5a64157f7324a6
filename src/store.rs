//! The local store: an ordered, in-memory collection of notes with no
//! persistence beyond the life of the process.

use crate::models::note::{Note, NoteFilter};

lazy_static! {
    /// The notes an offline session starts out with
    static ref SAMPLE_NOTES: Vec<Note> = vec![
        Note::new(
            "notes-jT-jjsyz61J8XKiI",
            "Welcome to Notes, Dimas!",
            "Welcome to Notes! This is your first note. You can archive it, delete it, or create new ones.",
            "2022-07-28T10:03:12.594Z",
        ),
        Note::new(
            "notes-aB-cdefg12345",
            "Meeting Agenda",
            "Discuss project updates and assign tasks for the upcoming week.",
            "2022-08-05T15:30:00.000Z",
        ),
        Note::new(
            "notes-XyZ-789012345",
            "Shopping List",
            "Milk, eggs, bread, fruits, and vegetables.",
            "2022-08-10T08:45:23.120Z",
        ),
        Note::new(
            "notes-1a-2b3c4d5e6f",
            "Personal Goals",
            "Read two books per month, exercise three times a week, learn a new language.",
            "2022-08-15T18:12:55.789Z",
        ),
        {
            let mut note = Note::new(
                "notes-LMN-456789",
                "Recipe: Spaghetti Bolognese",
                "Ingredients: ground beef, tomatoes, onions, garlic, pasta. Steps: ...",
                "2022-08-20T12:30:40.200Z",
            );
            note.archived = true;
            note
        },
    ];
}

#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    notes: Vec<Note>,
}

impl LocalStore {
    pub fn new() -> LocalStore {
        LocalStore { notes: Vec::new() }
    }

    pub fn with_notes(notes: Vec<Note>) -> LocalStore {
        let mut store = LocalStore::new();
        for note in notes {
            store.add(note);
        }
        store
    }

    /// A store seeded with the sample notes
    pub fn sample() -> LocalStore {
        LocalStore::with_notes(SAMPLE_NOTES.clone())
    }

    /// Append a note. A note whose id is already in the store is refused
    /// (returns false) so ids stay unique.
    pub fn add(&mut self, note: Note) -> bool {
        if self.find_by_id(&note.id).is_some() {
            warn!("store::add() -- refusing duplicate id {}", note.id);
            return false;
        }
        self.notes.push(note);
        true
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|x| x.id == id)
    }

    /// Remove a note by id, handing it back. Does nothing if the id is absent.
    pub fn remove(&mut self, id: &str) -> Option<Note> {
        match self.notes.iter().position(|x| x.id == id) {
            Some(idx) => Some(self.notes.remove(idx)),
            None => None,
        }
    }

    /// Set a note's archived flag. Returns false if there's no such note.
    pub fn set_archived(&mut self, id: &str, archived: bool) -> bool {
        match self.notes.iter_mut().find(|x| x.id == id) {
            Some(note) => {
                note.archived = archived;
                true
            }
            None => false,
        }
    }

    /// Every note, in insertion order
    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    pub fn filtered(&self, filter: NoteFilter) -> Vec<Note> {
        self.notes.iter()
            .filter(|x| filter.matches(x))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
