//! Plain-text adapter, used by the terminal client.

use crate::render::{Block, Container, NoteView};

fn note_block(view: &NoteView, out: &mut String) {
    out.push_str(&format!("[{}] {}\n", view.id, view.title));
    for line in view.body.lines() {
        out.push_str(&format!("    {}\n", line));
    }
    out.push_str(&format!("    Created at: {}\n", view.created));
    let controls: Vec<String> = view.controls.iter()
        .map(|x| format!("<{}>", x.label))
        .collect();
    out.push_str(&format!("    {}\n", controls.join(" ")));
}

/// Render a container as indented text, one note per paragraph
pub fn to_text(container: &Container) -> String {
    let mut out = format!("== {} ==\n", container.name());
    for block in container.blocks() {
        match *block {
            Block::Note(ref view) => note_block(view, &mut out),
            Block::Placeholder(ref msg) => out.push_str(&format!("  ({})\n", msg)),
            Block::Failure(ref msg) => out.push_str(&format!("  !! {}\n", msg)),
        }
    }
    out
}
