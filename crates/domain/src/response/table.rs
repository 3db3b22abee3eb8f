//! Tabular view of response data

use serde_json::Value;

/// Response data laid out as rows and columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    /// Column headings
    pub columns: Vec<String>,
    /// Cell text, one inner vector per row, aligned with `columns`
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Lays out `data` as a table.
    ///
    /// An array becomes one row per element with the union of object keys
    /// as columns, in first-seen order. A single object becomes `Key`/`Value`
    /// rows. Scalars are not tabular and yield `None`.
    #[must_use]
    pub fn from_data(data: &Value) -> Option<Self> {
        match data {
            Value::Array(items) => Some(Self::from_array(items)),
            Value::Object(map) => Some(Self {
                columns: vec!["Key".to_string(), "Value".to_string()],
                rows: map
                    .iter()
                    .map(|(key, value)| vec![key.clone(), cell(Some(value))])
                    .collect(),
            }),
            _ => None,
        }
    }

    fn from_array(items: &[Value]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for object in items.iter().filter_map(Value::as_object) {
            for key in object.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = items
            .iter()
            .map(|item| {
                columns
                    .iter()
                    .map(|column| cell(item.as_object().and_then(|o| o.get(column))))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// True when there is nothing to display.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Missing cells are blank, strings are unquoted, anything else is compact JSON.
fn cell(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
