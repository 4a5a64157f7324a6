//! A line-oriented terminal client. Each line is `<command> [args...]`. If
//! everything after the command is one JSON object it's sent as a single arg
//! and a JSON array is sent as the arg list. Otherwise the rest is split on
//! whitespace and every word goes out as a string. Pages come back rendered
//! as text.
//!
//!     > page:load home
//!     > note:add Groceries milk
//!     > note:add {"title": "Groceries", "body": "milk and eggs"}
//!     > note:archive notes-jT-jjsyz61J8XKiI home

extern crate notes_core;
extern crate serde_json;

use std::io::{self, BufRead, Write};

use serde_json::Value;

use notes_core::app::App;
use notes_core::dispatch;
use notes_core::error::NResult;
use notes_core::feedback::{Tone, Toast};
use notes_core::pages::PageKind;
use notes_core::render::text;

fn parse_args(rest: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(rest) {
        Ok(Value::Array(args)) => args,
        Ok(obj @ Value::Object(_)) => vec![obj],
        _ => rest.split_whitespace()
            .map(|x| Value::String(String::from(x)))
            .collect(),
    }
}

fn show_page(app: &App, page: Option<&Value>) {
    let name = page.and_then(|x| x.as_str()).unwrap_or("list");
    if let Some(kind) = PageKind::parse(name) {
        let page = app.page(kind);
        print!("{}", text::to_text(page.container()));
        if page.modal().open {
            println!("  [add note] title: {:?} body: {:?}", page.modal().title, page.modal().body);
        }
    }
}

fn repl(app: &mut App) -> NResult<()> {
    let stdin = io::stdin();
    let mut req_id: u64 = 1;
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let cmd = match parts.next() {
            Some(x) if !x.is_empty() => x,
            _ => continue,
        };
        if cmd == "quit" || cmd == "q" {
            break;
        }

        let mut msg = vec![Value::String(format!("{}", req_id)), Value::String(String::from(cmd))];
        msg.extend(parse_args(parts.next().unwrap_or("")));
        let res = dispatch::process(app, &Value::Array(msg.clone()).to_string());
        let parsed: Value = serde_json::from_str(&res)?;
        if parsed["e"] == 1 {
            match parsed["d"].get("error") {
                Some(err) => println!("error: {}", err),
                None => println!("error: {}", parsed["d"]),
            }
        } else if cmd.starts_with("page:") {
            show_page(app, msg.get(2));
        } else if cmd.starts_with("note:") {
            let page = if cmd == "note:add" { None } else { msg.get(3) };
            show_page(app, page);
        } else {
            println!("{}", serde_json::to_string_pretty(&parsed["d"])?);
        }
        if let Some(alerts) = parsed["d"]["alerts"].as_array() {
            for alert in alerts {
                println!("!! {}", alert.as_str().unwrap_or(""));
            }
        }
        req_id += 1;
    }
    Ok(())
}

fn main() {
    let runtime_config = std::env::args().nth(1).unwrap_or_else(|| String::from("{}"));
    if let Err(e) = notes_core::init(&runtime_config) {
        println!("notes: init failed: {}", e);
        return;
    }
    let mut app = match App::from_config() {
        Ok(x) => x,
        Err(e) => {
            println!("notes: couldn't start: {}", e);
            return;
        }
    };
    app.feedback().bind("repl:toast", |toast: &Toast| {
        let tag = match toast.tone {
            Tone::Success => "ok",
            Tone::Error => "error",
        };
        println!("  ({}) {}", tag, toast.message);
    });
    match repl(&mut app) {
        Ok(_) => {}
        Err(e) => println!("notes: {}", e),
    }
}
