//! HTML rendering of the panel.
//!
//! Each region renders independently so a host can replace just the region
//! that changed. Interactive elements carry `data-action` and `data-id`
//! attributes naming the [`PanelAction`](super::PanelAction) they trigger.

use std::fmt::Write as _;

use crate::util::escape_html;

use super::view::{ChecklistRow, FileGroupView, NoteRow, PanelView, Region};

const STYLE: &str = r"
body { font-family: sans-serif; margin: 0; padding: 0; background: #f4f4f4; color: #333; }
.container { display: flex; flex-direction: column; height: 100vh; box-sizing: border-box; }
.section { padding: 20px; box-sizing: border-box; overflow-y: auto; }
.section:not(:first-child) { border-top: 1px solid #ddd; }
h1 { margin-top: 0; }
ul { list-style: none; padding-left: 0; margin: 0; }
li { display: flex; justify-content: space-between; align-items: flex-start; margin-bottom: 5px; background: #fff; padding: 5px; border-radius: 4px; }
li.completed .content span { text-decoration: line-through; opacity: 0.6; }
.content { display: flex; align-items: flex-start; flex: 1; white-space: pre-wrap; word-break: break-word; }
.content span { flex: 1; margin-left: 5px; }
.actions { display: flex; align-items: center; flex-shrink: 0; white-space: nowrap; }
li button { margin-left: 5px; background: #eee; border: none; padding: 2px 5px; cursor: pointer; border-radius: 3px; }
li button:hover { background: #ddd; }
.add-note, .add-checklist { display: flex; margin-top: 10px; }
.add-note input, .add-checklist input { flex: 1; padding: 5px; font-size: 14px; margin-right: 5px; border: 1px solid #ccc; border-radius: 3px; }
.add-note button, .add-checklist button { padding: 5px 10px; font-size: 14px; cursor: pointer; border: none; background: #3a8ee6; color: #fff; border-radius: 3px; }
.actions-panel { margin-top: 10px; }
.actions-panel button { background: #e63a3a; color: #fff; border: none; padding: 5px 10px; border-radius: 3px; cursor: pointer; }
.edit-container { display: flex; align-items: center; flex: 1; }
.edit-container input[type=text] { padding: 3px; margin-right: 5px; }
.file-section { margin-top: 20px; }
.file-section h2 { margin-top: 0; }
.line-label { font-weight: bold; margin-right: 5px; }
";

/// Render the complete panel document
#[must_use]
pub fn render_document(view: &PanelView) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "<!DOCTYPE html>");
    let _ = writeln!(output, "<html lang=\"en\">");
    let _ = writeln!(output, "<head>");
    let _ = writeln!(output, "<meta charset=\"UTF-8\" />");
    let _ = writeln!(
        output,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />"
    );
    let _ = writeln!(output, "<style>{STYLE}</style>");
    let _ = writeln!(output, "</head>");
    let _ = writeln!(output, "<body>");
    let _ = writeln!(output, "<div class=\"container\">");

    let _ = writeln!(output, "<div class=\"section\" id=\"my-notes-section\">");
    let _ = writeln!(output, "<h1>My Notes</h1>");
    output.push_str(&render_region(view, Region::PersonalNotes));
    let _ = writeln!(
        output,
        "<div class=\"add-note\"><input type=\"text\" id=\"newMyNote\" value=\"{}\" placeholder=\"Type a new personal note...\" /><button data-action=\"add-personal-note\">Add</button></div>",
        escape_html(&view.personal_input)
    );
    let _ = writeln!(output, "</div>");

    let _ = writeln!(output, "<div class=\"section\" id=\"notes-section\">");
    let _ = writeln!(output, "<h1>File Notes</h1>");
    output.push_str(&render_region(view, Region::FileNotes));
    let _ = writeln!(output, "</div>");

    let _ = writeln!(output, "<div class=\"section\" id=\"checklist-section\">");
    let _ = writeln!(output, "<h1>Checklist</h1>");
    output.push_str(&render_region(view, Region::Checklist));
    let _ = writeln!(
        output,
        "<div class=\"add-checklist\"><input type=\"text\" id=\"newChecklistItem\" value=\"{}\" placeholder=\"Add a checklist item...\" /><button data-action=\"add-checklist-item\">Add</button></div>",
        escape_html(&view.checklist_input)
    );
    let _ = writeln!(
        output,
        "<div class=\"actions-panel\"><button data-action=\"clear-completed\">Clear Completed</button></div>"
    );
    let _ = writeln!(output, "</div>");

    let _ = writeln!(output, "</div>");
    let _ = writeln!(output, "</body>");
    let _ = writeln!(output, "</html>");
    output
}

/// Render the container element of one region
#[must_use]
pub fn render_region(view: &PanelView, region: Region) -> String {
    let mut output = String::new();
    match region {
        Region::PersonalNotes => {
            let _ = writeln!(output, "<ul id=\"myNotes\">");
            for row in &view.personal_notes {
                render_note_row(&mut output, row);
            }
            let _ = writeln!(output, "</ul>");
        }
        Region::FileNotes => {
            let _ = writeln!(output, "<div id=\"fileNotesContainer\">");
            for group in &view.file_groups {
                render_file_group(&mut output, group);
            }
            let _ = writeln!(output, "</div>");
        }
        Region::Checklist => {
            let _ = writeln!(output, "<ul id=\"checklist\">");
            for row in &view.checklist {
                render_checklist_row(&mut output, row);
            }
            let _ = writeln!(output, "</ul>");
        }
    }
    output
}

fn render_file_group(output: &mut String, group: &FileGroupView) {
    let _ = writeln!(output, "<div class=\"file-section\">");
    let _ = writeln!(output, "<h2>{}</h2>", escape_html(&group.file));
    let _ = writeln!(output, "<ul>");
    for row in &group.rows {
        render_note_row(output, row);
    }
    let _ = writeln!(output, "</ul>");
    let _ = writeln!(output, "</div>");
}

fn render_note_row(output: &mut String, row: &NoteRow) {
    let id = row.id.as_str();
    let _ = write!(output, "<li data-id=\"{id}\">");

    if let Some(draft) = &row.editing {
        render_edit_form(output, &id, draft, None);
    } else {
        let _ = write!(output, "<div class=\"content\">");
        if let Some(line) = row.line {
            let _ = write!(
                output,
                "<span><span class=\"line-label\">Line:</span> {line}</span>"
            );
        }
        let _ = write!(output, "<span>{}</span></div>", escape_html(&row.text));
        let _ = write!(output, "<div class=\"actions\">");
        render_button(output, "edit", &id, "Edit");
        render_button(output, "delete", &id, "Delete");
        if row.line.is_some() {
            render_button(output, "go-to-line", &id, "Go to Line");
        }
        let _ = write!(output, "</div>");
    }

    let _ = writeln!(output, "</li>");
}

fn render_checklist_row(output: &mut String, row: &ChecklistRow) {
    let id = row.id.as_str();
    let class = if row.checked { "completed" } else { "" };
    let checked = if row.checked { " checked" } else { "" };
    let _ = write!(output, "<li class=\"{class}\" data-id=\"{id}\">");

    if let Some(draft) = &row.editing {
        render_edit_form(output, &id, draft, Some(row.checked));
    } else {
        let _ = write!(
            output,
            "<div class=\"content\"><input type=\"checkbox\" data-action=\"toggle\" data-id=\"{id}\"{checked} /><span>{}</span></div>",
            escape_html(&row.text)
        );
        let _ = write!(output, "<div class=\"actions\">");
        render_button(output, "edit", &id, "Edit");
        render_button(output, "delete", &id, "Delete");
        let _ = write!(output, "</div>");
    }

    let _ = writeln!(output, "</li>");
}

fn render_edit_form(output: &mut String, id: &str, draft: &str, checkbox: Option<bool>) {
    let _ = write!(output, "<div class=\"edit-container\">");
    if let Some(checked) = checkbox {
        let checked = if checked { " checked" } else { "" };
        let _ = write!(output, "<input type=\"checkbox\" disabled{checked} />");
    }
    let _ = write!(
        output,
        "<input type=\"text\" value=\"{}\" />",
        escape_html(draft)
    );
    render_button(output, "save", id, "Save");
    render_button(output, "cancel", id, "Cancel");
    let _ = write!(output, "</div>");
}

fn render_button(output: &mut String, action: &str, id: &str, label: &str) {
    let _ = write!(
        output,
        "<button class=\"{action}-btn\" data-action=\"{action}\" data-id=\"{id}\">{label}</button>"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChecklistItem, Note, Snapshot};
    use crate::panel::{EditTarget, PanelAction, PanelEngine};

    #[test]
    fn file_note_row_shows_line_and_go_to_line() {
        let engine = PanelEngine::new(Snapshot::new(
            vec![Note::file_note("fix bug", "/a/b.ts", 42)],
            Vec::new(),
        ));
        let html = render_region(&engine.view(), Region::FileNotes);

        assert!(html.contains("<h2>/a/b.ts</h2>"));
        assert!(html.contains("<span class=\"line-label\">Line:</span> 42"));
        assert!(html.contains("<span>fix bug</span>"));
        assert!(html.contains("data-action=\"go-to-line\""));
    }

    #[test]
    fn personal_rows_have_no_go_to_line() {
        let engine = PanelEngine::new(Snapshot::new(vec![Note::personal("buy milk")], Vec::new()));
        let html = render_region(&engine.view(), Region::PersonalNotes);

        assert!(html.contains("<span>buy milk</span>"));
        assert!(html.contains("data-action=\"delete\""));
        assert!(!html.contains("go-to-line"));
    }

    #[test]
    fn checked_items_render_completed() {
        let mut item = ChecklistItem::new("write tests");
        item.checked = true;
        let engine = PanelEngine::new(Snapshot::new(Vec::new(), vec![item]));
        let html = render_region(&engine.view(), Region::Checklist);

        assert!(html.contains("<li class=\"completed\""));
        assert!(html.contains(" checked />"));
    }

    #[test]
    fn user_text_is_escaped() {
        let engine = PanelEngine::new(Snapshot::new(
            vec![Note::personal("<script>alert(1)</script>")],
            Vec::new(),
        ));
        let html = render_document(&engine.view());

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn editing_row_renders_inline_form() {
        let mut engine = PanelEngine::new(Snapshot::new(vec![Note::personal("buy milk")], Vec::new()));
        let id = engine.snapshot().notes[0].id;
        engine.apply(PanelAction::StartEdit(EditTarget::Note(id)));

        let html = render_region(&engine.view(), Region::PersonalNotes);
        assert!(html.contains("<input type=\"text\" value=\"buy milk\" />"));
        assert!(html.contains("data-action=\"save\""));
        assert!(html.contains("data-action=\"cancel\""));
        assert!(!html.contains("data-action=\"edit\""));
    }

    #[test]
    fn document_contains_all_sections() {
        let html = render_document(&PanelEngine::default().view());
        for heading in ["My Notes", "File Notes", "Checklist", "Clear Completed"] {
            assert!(html.contains(heading), "missing {heading}");
        }
    }
}
