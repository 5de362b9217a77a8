//! HTML for the task page. All text coming from tasks or the backend goes
//! through [`escape_html`] here and nowhere else.

use std::fmt::Write;
use crate::types::TaskStatus;
use super::state::BannerKind;
use super::view::{BannerView, FormView, ListView, PageView, TaskCard};

pub const EMPTY_LIST_MESSAGE: &str = "No tasks found. Create your first task to get started.";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_page(page: &PageView) -> String {
    let mut html = String::new();
    if let Some(banner) = &page.banner {
        html.push_str(&render_banner(banner));
    }
    html.push_str(&render_form(&page.form));
    html.push_str(&render_task_list(&page.list));
    html
}

pub fn render_banner(banner: &BannerView) -> String {
    let (container, class) = match banner.kind {
        BannerKind::Error => ("error-container", "error-message"),
        BannerKind::Success => ("success-container", "success-message"),
    };
    let lines: Vec<String> = banner.lines.iter().map(|line| escape_html(line)).collect();

    format!(
        "<div id=\"{}\"><div class=\"{}\">{}</div></div>\n",
        container,
        class,
        lines.join("<br>")
    )
}

pub fn render_form(form: &FormView) -> String {
    let mut html = String::new();
    let fields = &form.fields;

    let _ = writeln!(html, "<form id=\"task-form\">");
    let _ = writeln!(html, "  <h2 id=\"form-title\">{}</h2>", form.heading);
    let _ = writeln!(
        html,
        "  <input type=\"text\" id=\"title\" name=\"title\" value=\"{}\" required>",
        escape_html(&fields.title)
    );
    let _ = writeln!(
        html,
        "  <textarea id=\"description\" name=\"description\">{}</textarea>",
        escape_html(&fields.description)
    );
    let _ = writeln!(html, "  <select id=\"status\" name=\"status\">");
    for status in TaskStatus::ALL {
        let selected = if status == fields.status { " selected" } else { "" };
        let _ = writeln!(
            html,
            "    <option value=\"{}\"{}>{}</option>",
            status.as_str(),
            selected,
            status.label()
        );
    }
    let _ = writeln!(html, "  </select>");
    let _ = writeln!(
        html,
        "  <input type=\"datetime-local\" id=\"dueDateTime\" name=\"dueDateTime\" value=\"{}\" required>",
        escape_html(&fields.due_date_time)
    );
    let disabled = if form.submit_enabled { "" } else { " disabled" };
    let _ = writeln!(
        html,
        "  <button type=\"submit\" id=\"submit-btn\" class=\"btn btn-primary\"{}>{}</button>",
        disabled, form.submit_label
    );
    if form.cancel_visible {
        let _ = writeln!(
            html,
            "  <button type=\"button\" id=\"cancel-btn\" class=\"btn btn-secondary\">Cancel</button>"
        );
    }
    let _ = writeln!(html, "</form>");
    html
}

pub fn render_task_list(list: &ListView) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<h2>Tasks <span id=\"task-count\">{}</span></h2>", list.count_label());
    if list.loading {
        let _ = writeln!(html, "<div id=\"loading\">Loading tasks...</div>");
    }
    let _ = writeln!(html, "<div id=\"task-list\">");

    if list.cards.is_empty() {
        let _ = writeln!(html, "<div class=\"empty-state\"><p>{}</p></div>", EMPTY_LIST_MESSAGE);
    } else {
        for card in &list.cards {
            html.push_str(&render_task_card(card));
        }
    }

    let _ = writeln!(html, "</div>");
    html
}

fn render_task_card(card: &TaskCard) -> String {
    let mut html = String::new();
    let id = escape_html(&card.id.to_string());

    let _ = writeln!(html, "<div class=\"task-item\" data-task-id=\"{}\">", id);
    let _ = writeln!(html, "  <div class=\"task-header\">");
    let _ = writeln!(html, "    <h3 class=\"task-title\">{}</h3>", escape_html(&card.title));
    let _ = writeln!(
        html,
        "    <span class=\"task-status status-{}\">{}</span>",
        card.status.as_str(),
        card.status_label
    );
    let _ = writeln!(html, "  </div>");

    if let Some(description) = &card.description {
        let _ = writeln!(html, "  <p class=\"task-description\">{}</p>", escape_html(description));
    }

    let _ = writeln!(html, "  <div class=\"task-meta\">");
    let _ = writeln!(html, "    <div><strong>Due:</strong> {}</div>", escape_html(&card.due));
    let _ = writeln!(html, "    <div><strong>Created:</strong> {}</div>", escape_html(&card.created));
    let _ = writeln!(html, "  </div>");

    let _ = writeln!(html, "  <div class=\"task-actions\">");
    for action in &card.actions {
        let target = action
            .target_status()
            .map(|status| format!(" data-status=\"{}\"", status.as_str()))
            .unwrap_or_default();
        let _ = writeln!(
            html,
            "    <button class=\"btn {} btn-small\" data-action=\"{}\" data-task-id=\"{}\"{}>{}</button>",
            action.class(),
            action.name(),
            id,
            target,
            action.label()
        );
    }
    let _ = writeln!(html, "  </div>");
    let _ = writeln!(html, "</div>");
    html
}
