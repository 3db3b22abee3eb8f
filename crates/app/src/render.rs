//! Plain-text rendering of workbench state.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use khabari_domain::{
    CollectionItem, RequestDefinition, RequestHistory, ResponseRecord, Section, TableView,
    Workbench, time_ago,
};
use khabari_infrastructure::to_json_stable;

use crate::cli::ShowView;

/// One line per tab: position, marker, method, name and URL.
pub fn tabs(state: &Workbench) -> String {
    let session = state.session();
    let mut out = String::new();
    for (i, tab) in session.tabs().iter().enumerate() {
        let marker = if tab.id == session.active_id() { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:>2}  {:<7} {}  {}",
            i + 1,
            tab.method,
            tab.name,
            tab.full_url()
        );
    }
    out
}

/// The tab's request line followed by the given editor section.
pub fn request(tab: &RequestDefinition, section: Section) -> String {
    let mut out = format!("{} {}\n[{section}]\n", tab.method, tab.full_url());
    match section {
        Section::Params => {
            for (i, param) in tab.params.all().iter().enumerate() {
                let state = if param.enabled { "on " } else { "off" };
                let _ = writeln!(out, "{i:>3} {state} {}={}", param.key, param.value);
            }
        }
        Section::Headers => {
            for (name, value) in tab.headers.iter() {
                let _ = writeln!(out, "{name}: {value}");
            }
        }
        Section::Body => {
            if tab.body.is_empty() {
                out.push_str("(empty)\n");
            } else {
                out.push_str(&tab.body);
                out.push('\n');
            }
            if !tab.method.allows_body() {
                let _ = writeln!(out, "(not sent with {})", tab.method);
            }
        }
        Section::Auth => {
            let _ = writeln!(out, "type: {}", tab.auth.kind);
            for field in tab.auth.kind.fields() {
                let _ = writeln!(out, "{field}: {}", tab.auth.field(field));
            }
        }
    }
    out
}

/// Status line plus the chosen view of a response.
pub fn response(record: &ResponseRecord, view: ShowView) -> String {
    let mut out = if record.is_failure() {
        format!("Error: {}\n", record.status_text)
    } else {
        format!(
            "{} {}  {} ms  {}\n",
            record.status, record.status_text, record.time_ms, record.size
        )
    };

    match view {
        ShowView::Data => out.push_str(&pretty(&record.data)),
        ShowView::Raw => out.push_str(&pretty(record)),
        ShowView::Headers => {
            for (name, value) in &record.headers {
                let _ = writeln!(out, "{name}: {value}");
            }
        }
        ShowView::Table => match TableView::from_data(&record.data) {
            Some(table) => out.push_str(&table_text(&table)),
            None => out.push_str("(not tabular)\n"),
        },
    }
    out
}

fn pretty<T: serde::Serialize + ?Sized>(value: &T) -> String {
    to_json_stable(value).unwrap_or_else(|e| format!("<unprintable: {e}>\n"))
}

/// Column-aligned table with a header rule.
pub fn table_text(table: &TableView) -> String {
    if table.columns.is_empty() {
        return "(empty)\n".to_string();
    }

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(&table.columns);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &table.rows {
        out.push_str(&line(row));
    }
    out
}

/// Newest-first history lines, optionally limited.
pub fn history(history: &RequestHistory, limit: Option<usize>, now: DateTime<Utc>) -> String {
    if history.is_empty() {
        return "(no history)\n".to_string();
    }
    let mut out = String::new();
    for entry in history.entries().iter().take(limit.unwrap_or(usize::MAX)) {
        let _ = writeln!(
            out,
            "{:<9} {:<7} {}",
            time_ago(entry.timestamp, now),
            entry.method,
            entry.full_url()
        );
    }
    out
}

/// Indented tree with node ids.
pub fn tree(items: &[CollectionItem]) -> String {
    if items.is_empty() {
        return "(no collections)\n".to_string();
    }
    let mut out = String::new();
    write_nodes(&mut out, items, 0);
    out
}

fn write_nodes(out: &mut String, items: &[CollectionItem], depth: usize) {
    for item in items {
        let _ = writeln!(out, "{}{}  [{}]", "  ".repeat(depth), item.name, item.id);
        write_nodes(out, &item.children, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use khabari_domain::CollectionTree;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn record(data: serde_json::Value) -> ResponseRecord {
        ResponseRecord {
            status: 200,
            status_text: "OK".into(),
            data,
            headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
            time_ms: 42,
            size: "27 bytes".into(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn table_of_objects_is_aligned() {
        let data = serde_json::json!([{"id": 1, "name": "Ada"}, {"id": 22, "role": "admin"}]);
        let text = response(&record(data), ShowView::Table);
        assert_eq!(
            text,
            "200 OK  42 ms  27 bytes\n\
             id | name | role\n\
             ---+------+------\n\
             1  | Ada\n\
             22 |      | admin\n"
        );
    }

    #[test]
    fn scalar_is_not_tabular() {
        let text = response(&record(serde_json::json!("plain")), ShowView::Table);
        assert!(text.ends_with("(not tabular)\n"));
    }

    #[test]
    fn failure_shows_error_line() {
        let text = response(&ResponseRecord::failure("URL is required", Utc::now()), ShowView::Data);
        assert_eq!(
            text,
            "Error: URL is required\n{\n  \"error\": \"URL is required\"\n}\n"
        );
    }

    #[test]
    fn headers_view() {
        let text = response(&record(serde_json::Value::Null), ShowView::Headers);
        assert!(text.ends_with("content-type: application/json\n"));
    }

    #[test]
    fn tree_is_indented() {
        let mut tree = CollectionTree::new();
        tree.add("a", "Auth", None);
        tree.add("l", "Login", Some("a"));
        assert_eq!(super::tree(tree.roots()), "Auth  [a]\n  Login  [l]\n");
    }

    #[test]
    fn tabs_marks_active() {
        let mut state = Workbench::new("t1", Utc::now());
        state.add_tab("t2", Utc::now());
        let text = tabs(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("   1  GET"));
        assert!(lines[1].starts_with("*  2  GET     New Request 2"));
    }
}
