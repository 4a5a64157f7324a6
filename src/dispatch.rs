//! Dispatch takes messages sent from the UI and runs the needed core code to
//! generate the response. It's the one command interface into the app.
//!
//! Each message sent in is in the following format (JSON):
//!
//!     ["<message id>", "<command>", arg1, arg2, ...]
//!
//! where the arg\* can be any valid JSON value. The response echoes the message
//! id so the UI knows which request we are responding to:
//!
//!     {"id": "<message id>", "e": 0, "d": <data>}
//!
//! with `e` set to 1 on failure. `d` then holds the error text, or
//! `{"error": <text>, "alerts": [...]}` when the failing action raised alerts
//! on its page.

use serde::de::DeserializeOwned;
use serde_json::{self, Value};

use crate::app::App;
use crate::error::{NError, NResult};
use crate::pages::{PageController, PageKind};
use crate::render::html;
use crate::repository::NoteRepository;

/// A response to a single message
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub id: String,
    pub e: u8,
    pub d: Value,
}

impl Response {
    pub fn success(id: &str, data: Value) -> Response {
        Response { id: String::from(id), e: 0, d: data }
    }

    pub fn error(id: &str, err: &NError) -> Response {
        Response { id: String::from(id), e: 1, d: Value::String(format!("{}", err)) }
    }

    fn failure(id: &str, fail: &Failure) -> Response {
        if fail.alerts.is_empty() {
            return Response::error(id, &fail.err);
        }
        let data = json!({
            "error": format!("{}", fail.err),
            "alerts": fail.alerts,
        });
        Response { id: String::from(id), e: 1, d: data }
    }
}

/// A failed command, along with any alerts its page raised while failing
struct Failure {
    err: NError,
    alerts: Vec<String>,
}

impl From<NError> for Failure {
    fn from(err: NError) -> Failure {
        Failure { err: err, alerts: Vec::new() }
    }
}

impl From<::serde_json::Error> for Failure {
    fn from(err: ::serde_json::Error) -> Failure {
        Failure::from(NError::from(err))
    }
}

/// Run a page action. On failure the page's pending alerts go out with the
/// error instead of waiting for the next view.
fn page_action<F, T>(app: &mut App, kind: PageKind, f: F) -> Result<T, Failure>
    where F: FnOnce(&mut PageController, &mut dyn NoteRepository) -> NResult<T>
{
    app.with_page(kind, |page, repo| {
        f(page, repo).map_err(|e| Failure { err: e, alerts: page.take_alerts() })
    })
}

/// Grab a required argument out of the message
fn arg<T: DeserializeOwned>(data: &Value, idx: usize) -> NResult<T> {
    match data.get(idx) {
        Some(val) if !val.is_null() => Ok(serde_json::from_value(val.clone())?),
        _ => NErr!(NError::MissingField(format!("missing argument ({})", idx))),
    }
}

/// Grab an optional argument out of the message
fn arg_opt<T: DeserializeOwned>(data: &Value, idx: usize) -> NResult<Option<T>> {
    match data.get(idx) {
        Some(val) if !val.is_null() => Ok(Some(serde_json::from_value(val.clone())?)),
        _ => Ok(None),
    }
}

/// Which page a command targets. Defaults to the main list.
fn page_arg(data: &Value, idx: usize) -> NResult<PageKind> {
    let name: String = arg_opt(data, idx)?.unwrap_or_else(|| String::from("list"));
    match PageKind::parse(&name) {
        Some(x) => Ok(x),
        None => NErr!(NError::Msg(format!("unknown page: {}", name))),
    }
}

/// The state of a page as the UI sees it. Alerts are handed out once.
fn page_view(page: &mut PageController) -> Value {
    let alerts = page.take_alerts();
    json!({
        "page": page.kind(),
        "state": page.state(),
        "container": page.container().name(),
        "blocks": page.container().blocks(),
        "modal": page.modal(),
        "alerts": alerts,
    })
}

/// Pull `[title, body]` out of either `{"title", "body"}` or two strings
fn note_fields(data: &Value) -> NResult<(String, String)> {
    match data.get(2) {
        Some(&Value::Object(ref obj)) => {
            let title = obj.get("title").and_then(|x| x.as_str()).unwrap_or("");
            let body = obj.get("body").and_then(|x| x.as_str()).unwrap_or("");
            Ok((String::from(title), String::from(body)))
        }
        _ => {
            let title: Option<String> = arg_opt(data, 2)?;
            let body: Option<String> = arg_opt(data, 3)?;
            Ok((title.unwrap_or_default(), body.unwrap_or_default()))
        }
    }
}

fn dispatch(app: &mut App, cmd: &str, data: &Value) -> Result<Value, Failure> {
    match cmd {
        "ping" => {
            info!("ping!");
            Ok(Value::String(String::from("pong")))
        }
        "page:load" => {
            let kind = page_arg(data, 2)?;
            Ok(app.with_page(kind, |page, repo| {
                page.load(repo);
                page_view(page)
            }))
        }
        "page:view" => {
            let kind = page_arg(data, 2)?;
            Ok(app.with_page(kind, |page, _| page_view(page)))
        }
        "page:html" => {
            let kind = page_arg(data, 2)?;
            let markup = app.with_page(kind, |page, _| html::to_html(page.container()));
            Ok(Value::String(markup))
        }
        "note:add" => {
            let (title, body) = note_fields(data)?;
            let note = page_action(app, PageKind::List, |page, repo| {
                page.set_form(&title, &body);
                page.submit(repo)
            })?;
            Ok(serde_json::to_value(&note)?)
        }
        "note:archive" | "note:unarchive" | "note:delete" => {
            let id: String = arg(data, 2)?;
            let kind = page_arg(data, 3)?;
            page_action(app, kind, |page, repo| {
                match cmd {
                    "note:archive" => page.archive(repo, &id),
                    "note:unarchive" => page.unarchive(repo, &id),
                    _ => page.delete(repo, &id),
                }?;
                Ok(page_view(page))
            })
        }
        "modal:open" | "modal:close" => {
            let modal = app.with_page(PageKind::List, |page, _| {
                if cmd == "modal:open" {
                    page.open_modal();
                } else {
                    page.close_modal();
                }
                page.modal().clone()
            });
            Ok(serde_json::to_value(&modal)?)
        }
        "feedback:list" => {
            let toasts: Vec<Value> = app.feedback().active().iter()
                .map(|x| json!({"message": x.message, "tone": x.tone}))
                .collect();
            Ok(Value::Array(toasts))
        }
        "app:api:set-endpoint" => {
            let endpoint: String = arg(data, 2)?;
            app.set_endpoint(&endpoint)?;
            Ok(json!({}))
        }
        _ => Err(Failure::from(NError::MissingCommand(String::from(cmd)))),
    }
}

/// Process a message from the UI, always producing a response (serialized)
pub fn process(app: &mut App, msg: &str) -> String {
    let res = match serde_json::from_str::<Value>(msg) {
        Ok(data) => {
            // grab the request id from the data
            let mid: String = match arg(&data, 0) {
                Ok(x) => x,
                Err(_) => String::new(),
            };
            match arg::<String>(&data, 1) {
                Ok(cmd) => {
                    info!("dispatch({}): {}", mid, cmd);
                    match dispatch(app, &cmd, &data) {
                        Ok(val) => Response::success(&mid, val),
                        Err(fail) => {
                            error!("dispatch({}): {}: {}", mid, cmd, fail.err);
                            Response::failure(&mid, &fail)
                        }
                    }
                }
                Err(_) => Response::error(&mid, &NError::MissingField(String::from("missing cmd (1)"))),
            }
        }
        Err(e) => {
            error!("dispatch: bad message: {}", e);
            Response::error("", &tonerr!(e))
        }
    };
    match serde_json::to_string(&res) {
        Ok(x) => x,
        Err(e) => {
            error!("dispatch: problem serializing response: {}", e);
            format!(r#"{{"id":{:?},"e":1,"d":"error serializing response"}}"#, res.id)
        }
    }
}
