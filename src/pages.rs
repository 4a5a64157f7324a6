//! Page controllers. Each page pulls notes from the repository, filters them,
//! renders them into its container and turns user actions back into
//! repository calls followed by a fresh load.

use crate::error::{NError, NResult};
use crate::models::note::{NewNote, Note, NoteFilter};
use crate::models::validate::Validate;
use crate::render::{self, Action, Container, LOAD_FAILURE};
use crate::repository::NoteRepository;

/// Alerted when the add form is submitted with a blank field
pub const REQUIRED_FIELDS: &'static str = "Title and body are required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    Archive,
    List,
}

impl PageKind {
    pub fn name(&self) -> &'static str {
        match *self {
            PageKind::Home => "home",
            PageKind::Archive => "archive",
            PageKind::List => "list",
        }
    }

    pub fn parse(name: &str) -> Option<PageKind> {
        match name {
            "home" => Some(PageKind::Home),
            "archive" => Some(PageKind::Archive),
            "list" | "main" => Some(PageKind::List),
            _ => None,
        }
    }

    /// Which notes the page shows
    pub fn filter(&self) -> NoteFilter {
        match *self {
            PageKind::Home => NoteFilter::Active,
            PageKind::Archive => NoteFilter::Archived,
            PageKind::List => NoteFilter::All,
        }
    }

    pub fn container_name(&self) -> &'static str {
        match *self {
            PageKind::Home => "home-container",
            PageKind::Archive => "archive-container",
            PageKind::List => "notes-grid",
        }
    }

    /// Only the main list page has the add-note form
    pub fn can_add(&self) -> bool {
        *self == PageKind::List
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageState {
    Idle,
    Loading,
    Displayed,
    Failed,
}

/// The add-note dialog and its form fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddNoteModal {
    pub open: bool,
    pub title: String,
    pub body: String,
}

impl AddNoteModal {
    fn reset(&mut self) {
        self.title.clear();
        self.body.clear();
    }
}

/// Handed out by `begin_load()`, redeemed by `finish_load()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct PageController {
    kind: PageKind,
    container: Container,
    state: PageState,
    /// Last load ticket handed out
    issued: u64,
    /// Ticket of the load the container is currently showing
    shown: u64,
    modal: AddNoteModal,
    alerts: Vec<String>,
}

fn failure_alert(action: Action) -> &'static str {
    match action {
        Action::Archive => "Failed to archive note",
        Action::Unarchive => "Failed to unarchive note",
        Action::Delete => "Failed to delete note",
    }
}

impl PageController {
    pub fn new(kind: PageKind) -> PageController {
        PageController {
            kind: kind,
            container: Container::new(kind.container_name()),
            state: PageState::Idle,
            issued: 0,
            shown: 0,
            modal: AddNoteModal::default(),
            alerts: Vec::new(),
        }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn modal(&self) -> &AddNoteModal {
        &self.modal
    }

    /// Alerts raised so far, oldest first
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        self.alerts.drain(..).collect()
    }

    fn alert(&mut self, msg: &str) {
        warn!("pages::alert() -- {}: {}", self.kind.name(), msg);
        self.alerts.push(String::from(msg));
    }

    /// Start a load. Every call supersedes the ones before it.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.state = PageState::Loading;
        debug!("pages::begin_load() -- {}: load {}", self.kind.name(), self.issued);
        LoadTicket(self.issued)
    }

    /// Finish a load started with `begin_load()`. The result is only shown if
    /// no newer load has been shown already; returns whether it was.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: NResult<Vec<Note>>) -> bool {
        let LoadTicket(seq) = ticket;
        if seq <= self.shown {
            debug!("pages::finish_load() -- {}: dropping stale load {} (showing {})", self.kind.name(), seq, self.shown);
            return false;
        }
        self.shown = seq;
        let failed = match result {
            Ok(notes) => {
                let notes = self.kind.filter().apply(notes);
                render::render(&notes, &mut self.container);
                false
            }
            Err(e) => {
                error!("pages::finish_load() -- {}: {}", self.kind.name(), e);
                render::render_failure(&mut self.container, LOAD_FAILURE);
                true
            }
        };
        // a newer load still in flight keeps us in Loading
        if seq == self.issued {
            self.state = if failed { PageState::Failed } else { PageState::Displayed };
        }
        true
    }

    /// Fetch from the repository and re-render. A failure shows the inline
    /// failure message; no retry.
    pub fn load(&mut self, repo: &mut dyn NoteRepository) -> PageState {
        let ticket = self.begin_load();
        let res = repo.list();
        self.finish_load(ticket, res);
        self.state
    }

    fn act(&mut self, repo: &mut dyn NoteRepository, id: &str, action: Action) -> NResult<()> {
        if !self.container.handles(id, action) {
            warn!("pages::act() -- {}: no {:?} control for {}", self.kind.name(), action, id);
            return NErr!(NError::NotFound(String::from(id)));
        }
        info!("pages::act() -- {}: {:?} {}", self.kind.name(), action, id);
        let res = match action {
            Action::Archive => repo.set_archived(id, true).map(|_| ()),
            Action::Unarchive => repo.set_archived(id, false).map(|_| ()),
            Action::Delete => repo.delete(id),
        };
        match res {
            Ok(_) => {
                self.load(repo);
                Ok(())
            }
            Err(e) => {
                error!("pages::act() -- {}: {:?} {}: {}", self.kind.name(), action, id, e);
                self.alert(failure_alert(action));
                // the request may have gone through before failing, so show
                // what the source says now
                self.load(repo);
                Err(e)
            }
        }
    }

    pub fn archive(&mut self, repo: &mut dyn NoteRepository, id: &str) -> NResult<()> {
        self.act(repo, id, Action::Archive)
    }

    pub fn unarchive(&mut self, repo: &mut dyn NoteRepository, id: &str) -> NResult<()> {
        self.act(repo, id, Action::Unarchive)
    }

    pub fn delete(&mut self, repo: &mut dyn NoteRepository, id: &str) -> NResult<()> {
        self.act(repo, id, Action::Delete)
    }

    pub fn open_modal(&mut self) {
        self.modal.open = true;
    }

    /// Cancel. Whatever was typed stays in the form.
    pub fn close_modal(&mut self) {
        self.modal.open = false;
    }

    pub fn set_form(&mut self, title: &str, body: &str) {
        self.modal.title = String::from(title);
        self.modal.body = String::from(body);
    }

    /// Submit the add form. Blank fields are alerted on without touching the
    /// repository. A failed create keeps the modal open with its contents and
    /// reloads the view.
    pub fn submit(&mut self, repo: &mut dyn NoteRepository) -> NResult<Note> {
        if !self.kind.can_add() {
            return NErr!(NError::Msg(format!("the {} page can't add notes", self.kind.name())));
        }
        let new_note = NewNote::new(self.modal.title.as_str(), self.modal.body.as_str());
        if let Err(e) = new_note.do_validate("note") {
            self.alert(REQUIRED_FIELDS);
            return Err(e);
        }
        match repo.create(&new_note.title, &new_note.body) {
            Ok(note) => {
                info!("pages::submit() -- added note {}", note.id);
                self.modal.reset();
                self.modal.open = false;
                self.load(repo);
                Ok(note)
            }
            Err(e) => {
                error!("pages::submit() -- {}", e);
                self.alert("Failed to add note");
                self.load(repo);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Block, NO_NOTES};
    use crate::repository::LocalRepository;
    use crate::store::LocalStore;

    /// Fails every call, counting how many it got
    struct Broken {
        calls: usize,
    }

    impl NoteRepository for Broken {
        fn list(&mut self) -> NResult<Vec<Note>> {
            self.calls += 1;
            NErr!(NError::Network(String::from("connection refused")))
        }
        fn create(&mut self, _title: &str, _body: &str) -> NResult<Note> {
            self.calls += 1;
            NErr!(NError::Network(String::from("connection refused")))
        }
        fn set_archived(&mut self, _id: &str, _archived: bool) -> NResult<Note> {
            self.calls += 1;
            NErr!(NError::Network(String::from("connection refused")))
        }
        fn delete(&mut self, _id: &str) -> NResult<()> {
            self.calls += 1;
            NErr!(NError::Network(String::from("connection refused")))
        }
    }

    fn one_note() -> LocalRepository {
        LocalRepository::new(LocalStore::with_notes(vec![
            Note::new("a", "T1", "B1", "2022-07-28T10:03:12.594Z"),
        ]))
    }

    fn ids(page: &PageController) -> Vec<String> {
        page.container().notes().iter().map(|x| x.id.clone()).collect()
    }

    #[test]
    fn archive_moves_note_between_pages() {
        let mut repo = one_note();
        let mut home = PageController::new(PageKind::Home);
        let mut archive = PageController::new(PageKind::Archive);
        assert_eq!(home.state(), PageState::Idle);
        assert_eq!(home.load(&mut repo), PageState::Displayed);
        assert_eq!(ids(&home), vec![String::from("a")]);

        home.archive(&mut repo, "a").unwrap();
        assert_eq!(home.container().notes().len(), 0);
        assert_eq!(home.container().placeholders(), 1);
        assert_eq!(home.container().blocks()[0], Block::Placeholder(String::from(NO_NOTES)));

        archive.load(&mut repo);
        assert_eq!(ids(&archive), vec![String::from("a")]);
        assert!(archive.container().handles("a", Action::Unarchive));

        archive.unarchive(&mut repo, "a").unwrap();
        assert_eq!(archive.container().placeholders(), 1);
        home.load(&mut repo);
        assert_eq!(ids(&home), vec![String::from("a")]);
        assert!(home.alerts().is_empty());
    }

    #[test]
    fn actions_need_a_control() {
        let mut repo = one_note();
        let mut home = PageController::new(PageKind::Home);
        // nothing rendered yet
        assert!(home.archive(&mut repo, "a").unwrap_err().is_not_found());
        home.load(&mut repo);
        // active notes have no unarchive control
        assert!(home.unarchive(&mut repo, "a").is_err());
        assert!(!repo.store().find_by_id("a").unwrap().archived);
    }

    #[test]
    fn delete_reloads() {
        let mut repo = one_note();
        let mut list = PageController::new(PageKind::List);
        list.load(&mut repo);
        list.delete(&mut repo, "a").unwrap();
        assert!(repo.store().find_by_id("a").is_none());
        assert_eq!(list.container().placeholders(), 1);
        assert_eq!(list.state(), PageState::Displayed);
    }

    #[test]
    fn failed_load_renders_message() {
        let mut repo = Broken { calls: 0 };
        let mut list = PageController::new(PageKind::List);
        assert_eq!(list.load(&mut repo), PageState::Failed);
        assert_eq!(list.container().blocks(), &[Block::Failure(String::from(LOAD_FAILURE))][..]);
        // no automatic retry
        assert_eq!(repo.calls, 1);
    }

    #[test]
    fn failed_actions_alert_and_reload() {
        let mut ok = one_note();
        let mut list = PageController::new(PageKind::List);
        list.load(&mut ok);
        let mut broken = Broken { calls: 0 };
        assert!(list.archive(&mut broken, "a").is_err());
        // the mutation plus the reload
        assert_eq!(broken.calls, 2);
        assert_eq!(list.take_alerts(), vec![String::from("Failed to archive note")]);
        assert!(list.alerts().is_empty());
        assert_eq!(list.container().blocks(), &[Block::Failure(String::from(LOAD_FAILURE))][..]);
        assert_eq!(list.state(), PageState::Failed);

        list.load(&mut ok);
        assert!(list.delete(&mut broken, "a").is_err());
        assert_eq!(list.take_alerts(), vec![String::from("Failed to delete note")]);
    }

    /// Applies mutations to the store, then reports a failure anyway (an
    /// acknowledged request whose follow-up fetch broke)
    struct AppliesThenFails {
        inner: LocalRepository,
    }

    impl NoteRepository for AppliesThenFails {
        fn list(&mut self) -> NResult<Vec<Note>> {
            self.inner.list()
        }
        fn create(&mut self, title: &str, body: &str) -> NResult<Note> {
            self.inner.create(title, body)?;
            NErr!(NError::Network(String::from("connection reset")))
        }
        fn set_archived(&mut self, id: &str, archived: bool) -> NResult<Note> {
            self.inner.set_archived(id, archived)?;
            NErr!(NError::Network(String::from("connection reset")))
        }
        fn delete(&mut self, id: &str) -> NResult<()> {
            self.inner.delete(id)?;
            NErr!(NError::Network(String::from("connection reset")))
        }
    }

    #[test]
    fn failed_mutations_show_the_source() {
        let mut repo = AppliesThenFails { inner: one_note() };
        let mut home = PageController::new(PageKind::Home);
        home.load(&mut repo);
        assert!(home.archive(&mut repo, "a").is_err());
        assert_eq!(home.take_alerts(), vec![String::from("Failed to archive note")]);
        // the note did get archived, so it's gone from home
        assert_eq!(home.container().placeholders(), 1);
        assert!(!home.container().handles("a", Action::Archive));

        let mut list = PageController::new(PageKind::List);
        list.load(&mut repo);
        list.set_form("Groceries", "milk");
        assert!(list.submit(&mut repo).is_err());
        assert_eq!(list.container().notes().len(), 2);
        assert_eq!(list.take_alerts(), vec![String::from("Failed to add note")]);
    }

    #[test]
    fn submit_validates_first() {
        let mut repo = Broken { calls: 0 };
        let mut list = PageController::new(PageKind::List);
        list.open_modal();
        list.set_form("", "x");
        assert!(list.submit(&mut repo).unwrap_err().is_validation());
        assert_eq!(repo.calls, 0);
        assert_eq!(list.take_alerts(), vec![String::from(REQUIRED_FIELDS)]);
        assert!(list.modal().open);

        list.set_form("title", "body");
        assert!(list.submit(&mut repo).is_err());
        // the create plus the reload after it
        assert_eq!(repo.calls, 2);
        assert_eq!(list.state(), PageState::Failed);
        assert_eq!(list.take_alerts(), vec![String::from("Failed to add note")]);
        assert!(list.modal().open);
        assert_eq!(list.modal().title, "title");
    }

    #[test]
    fn submit_adds_and_closes() {
        let mut repo = one_note();
        let mut list = PageController::new(PageKind::List);
        list.load(&mut repo);
        list.open_modal();
        list.set_form("Groceries", "milk");
        let note = list.submit(&mut repo).unwrap();
        assert_eq!(*list.modal(), AddNoteModal::default());
        assert_eq!(ids(&list), vec![String::from("a"), note.id]);

        let mut home = PageController::new(PageKind::Home);
        home.set_form("x", "y");
        assert!(home.submit(&mut repo).is_err());
    }

    #[test]
    fn stale_loads_are_dropped() {
        let mut page = PageController::new(PageKind::List);
        let first = page.begin_load();
        let second = page.begin_load();
        let note = |id: &str| Note::new(id, "T", "B", "");
        assert!(page.finish_load(second, Ok(vec![note("new")])));
        assert_eq!(page.state(), PageState::Displayed);
        // the slower, older response lands after the newer one
        assert!(!page.finish_load(first, Ok(vec![note("old")])));
        assert_eq!(ids(&page), vec![String::from("new")]);

        // an older load may show while a newer one is still out
        let third = page.begin_load();
        let fourth = page.begin_load();
        assert!(page.finish_load(third, Ok(vec![note("third")])));
        assert_eq!(page.state(), PageState::Loading);
        assert!(page.finish_load(fourth, Err(NError::Network(String::from("timeout")))));
        assert_eq!(page.state(), PageState::Failed);
    }

    #[test]
    fn page_kinds() {
        assert_eq!(PageKind::parse("home"), Some(PageKind::Home));
        assert_eq!(PageKind::parse("main"), Some(PageKind::List));
        assert_eq!(PageKind::parse("nope"), None);
        assert_eq!(PageKind::Archive.container_name(), "archive-container");
        assert!(PageKind::List.can_add());
        assert!(!PageKind::Home.can_add());
    }
}
