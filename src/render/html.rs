//! HTML adapter. Action buttons carry the note id in a `data-note-id`
//! attribute, so one delegated click handler on the container can route any
//! click without caring about render order.

use crate::render::{Block, Container, NoteView};

/// Escape text for use in element content or a quoted attribute
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn note_block(view: &NoteView) -> String {
    let buttons: Vec<String> = view.controls.iter()
        .map(|x| format!(
            r#"<button class="{}" data-note-id="{}">{}</button>"#,
            x.action.class(),
            html_escape(&x.note_id),
            x.label,
        ))
        .collect();
    format!(
        r#"<div class="note-item"><h3>{}</h3><p>{}</p><small>Created at: {}</small><div class="note-actions">{}</div></div>"#,
        html_escape(&view.title),
        html_escape(&view.body),
        html_escape(&view.created),
        buttons.join(""),
    )
}

/// Render a container's blocks as the inner HTML of its element
pub fn to_html(container: &Container) -> String {
    let blocks: Vec<String> = container.blocks().iter()
        .map(|block| match *block {
            Block::Note(ref view) => note_block(view),
            Block::Placeholder(ref msg) => format!(r#"<p class="empty">{}</p>"#, html_escape(msg)),
            Block::Failure(ref msg) => format!(r#"<p class="error">{}</p>"#, html_escape(msg)),
        })
        .collect();
    format!(r#"<div id="{}">{}</div>"#, html_escape(container.name()), blocks.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::note::Note;
    use crate::render;

    #[test]
    fn escapes() {
        assert_eq!(html_escape(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn renders_buttons_with_ids() {
        let mut archived = Note::new("b", "<script>", "x & y", "2022-08-05T15:30:00.000Z");
        archived.archived = true;
        let mut container = Container::new("notes-grid");
        render::render(&[Note::new("a", "T1", "B1", "2022-07-28T10:03:12.594Z"), archived], &mut container);
        let html = to_html(&container);
        assert!(html.starts_with(r#"<div id="notes-grid"><div class="note-item"><h3>T1</h3>"#));
        assert!(html.contains(r#"<button class="archive-btn" data-note-id="a">Archive</button>"#));
        assert!(html.contains(r#"<button class="delete-btn" data-note-id="a">Delete</button>"#));
        assert!(html.contains(r#"<button class="unarchive-btn" data-note-id="b">Unarchive</button>"#));
        assert!(html.contains("<h3>&lt;script&gt;</h3><p>x &amp; y</p>"));
        assert!(html.contains("<small>Created at: 2022-07-28 10:03</small>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn renders_failure_and_empty() {
        let mut container = Container::new("home-container");
        render::render(&[], &mut container);
        assert_eq!(to_html(&container), r#"<div id="home-container"><p class="empty">No notes available</p></div>"#);
        render::render_failure(&mut container, render::LOAD_FAILURE);
        assert!(to_html(&container).contains(r#"<p class="error">Failed to load notes. Please try again later.</p>"#));
    }
}
