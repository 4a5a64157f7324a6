//! The App is the container for the state of the notes manager: the note
//! repository for the current mode, the feedback tray and the three pages.
//! Everything the dispatcher does goes through it.

use std::sync::Arc;

use config;

use crate::api::Api;
use crate::error::NResult;
use crate::feedback::FeedbackTray;
use crate::models::note::Note;
use crate::pages::{PageController, PageKind};
use crate::remote::RemoteNotes;
use crate::repository::{LocalRepository, NoteRepository, RemoteRepository};
use crate::store::LocalStore;

/// Where the notes live for this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The notes service is the authority
    Online,
    /// Only the in-memory store, no network at all
    Offline,
}

impl Mode {
    pub fn parse(val: &str) -> Option<Mode> {
        match val.to_lowercase().as_ref() {
            "online" => Some(Mode::Online),
            "offline" => Some(Mode::Offline),
            _ => None,
        }
    }

    /// Read `mode` from the config, defaulting to online
    pub fn from_config() -> Mode {
        let val: String = config::get_or(&["mode"], String::from("online"));
        match Mode::parse(&val) {
            Some(x) => x,
            None => {
                warn!("app::Mode::from_config() -- bad `mode` value (\"{}\"), using online", val);
                Mode::Online
            }
        }
    }
}

fn seeded_store() -> LocalStore {
    if config::get_or(&["seed_sample_notes"], true) {
        LocalStore::sample()
    } else {
        LocalStore::new()
    }
}

pub struct App {
    mode: Mode,
    repo: Box<dyn NoteRepository>,
    /// Shared with the remote client, which reports every outcome here
    feedback: Arc<FeedbackTray>,
    home: PageController,
    archive: PageController,
    list: PageController,
}

impl App {
    fn with_repo(mode: Mode, repo: Box<dyn NoteRepository>, feedback: Arc<FeedbackTray>) -> App {
        App {
            mode: mode,
            repo: repo,
            feedback: feedback,
            home: PageController::new(PageKind::Home),
            archive: PageController::new(PageKind::Archive),
            list: PageController::new(PageKind::List),
        }
    }

    /// Offline app over the given store
    pub fn offline(store: LocalStore) -> App {
        let feedback = Arc::new(FeedbackTray::from_config());
        App::with_repo(Mode::Offline, Box::new(LocalRepository::new(store)), feedback)
    }

    /// Online app talking to the service through `api`. With `fallback` set,
    /// a failed list serves those notes instead.
    pub fn online(api: Api, fallback: Option<Vec<Note>>) -> App {
        let feedback = Arc::new(FeedbackTray::from_config());
        let mut client = RemoteNotes::new(api, feedback.clone());
        if let Some(notes) = fallback {
            client = client.with_fallback(notes);
        }
        App::with_repo(Mode::Online, Box::new(RemoteRepository::new(client)), feedback)
    }

    /// Build the app the config asks for
    pub fn from_config() -> NResult<App> {
        let mode = Mode::from_config();
        info!("app::from_config() -- starting in {:?} mode", mode);
        let app = match mode {
            Mode::Offline => App::offline(seeded_store()),
            Mode::Online => {
                let fallback = if config::get_or(&["api", "local_fallback"], false) {
                    Some(seeded_store().all().to_vec())
                } else {
                    None
                };
                App::online(Api::http()?, fallback)
            }
        };
        Ok(app)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn feedback(&self) -> &Arc<FeedbackTray> {
        &self.feedback
    }

    pub fn page(&self, kind: PageKind) -> &PageController {
        match kind {
            PageKind::Home => &self.home,
            PageKind::Archive => &self.archive,
            PageKind::List => &self.list,
        }
    }

    /// Run `f` against a page and the repository at the same time
    pub fn with_page<F, T>(&mut self, kind: PageKind, f: F) -> T
        where F: FnOnce(&mut PageController, &mut dyn NoteRepository) -> T
    {
        let repo = &mut *self.repo;
        let page = match kind {
            PageKind::Home => &mut self.home,
            PageKind::Archive => &mut self.archive,
            PageKind::List => &mut self.list,
        };
        f(page, repo)
    }

    /// Point the remote client at a different service
    pub fn set_endpoint(&self, endpoint: &str) -> NResult<()> {
        info!("app::set_endpoint() -- {}", endpoint);
        config::set(&["api", "endpoint"], &String::from(endpoint))?;
        Ok(())
    }
}
