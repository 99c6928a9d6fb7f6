//! Core data models for brainpad.
//!
//! These types are shared by the stores, the HTTP handlers, and the client,
//! and define the JSON contract between them. Field names are camelCase on
//! the wire; timestamps are RFC 3339 strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// NOTE
// =============================================================================

/// A persisted note.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, utoipa::ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque unique id, assigned at creation and never changed.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Ordered tags; duplicates are kept as given.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Render the tags the way PostgreSQL renders a `text[]` value cast to
    /// text, e.g. `{x,y}` or `{"two words",z}`.
    ///
    /// Search matches against this form, so a query such as `x,y` matches a
    /// note tagged `["x", "y"]`.
    pub fn tags_text(&self) -> String {
        render_text_array(&self.tags)
    }

    /// Case-insensitive substring test against title, content, and the
    /// textual form of the tags.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
            || self.tags_text().to_lowercase().contains(&needle)
    }

    /// Whether the given title/content/tags differ from this note's values.
    pub fn differs_from(&self, title: &str, content: &str, tags: &[String]) -> bool {
        self.title != title || self.content != content || self.tags.as_slice() != tags
    }
}

/// Render a string array in PostgreSQL array-literal output form.
pub fn render_text_array(items: &[String]) -> String {
    let mut out = String::from("{");
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if needs_array_quoting(item) {
            out.push('"');
            for c in item.chars() {
                if c == '"' || c == '\\' {
                    out.push('\\');
                }
                out.push(c);
            }
            out.push('"');
        } else {
            out.push_str(item);
        }
    }
    out.push('}');
    out
}

fn needs_array_quoting(item: &str) -> bool {
    item.is_empty()
        || item.eq_ignore_ascii_case("null")
        || item
            .chars()
            .any(|c| matches!(c, '{' | '}' | ',' | '"' | '\\') || c.is_whitespace())
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Body of `POST /notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateNoteInput {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl CreateNoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Body of `POST /notes/update`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateNoteInput {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateNoteInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Body of `POST /notes/delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteNoteInput {
    pub id: String,
}

/// Body of `POST /notes/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SearchNotesInput {
    pub query: String,
}

// =============================================================================
// RESPONSE BODIES
// =============================================================================

/// Response of list and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NotesResponse {
    pub notes: Vec<Note>,
}

/// Response of create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NoteResponse {
    pub note: Note,
}

/// Response of delete, echoing the removed id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteNoteResponse {
    pub success: bool,
    pub id: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(tags: &[&str]) -> Note {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        Note {
            id: "n1".to_string(),
            title: "Grocery List".to_string(),
            content: "Milk and eggs".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_note_serializes_camel_case_with_iso_dates() {
        let json = serde_json::to_value(sample(&["home"])).unwrap();
        assert_eq!(json["createdAt"], "2026-03-01T12:00:00Z");
        assert_eq!(json["updatedAt"], "2026-03-01T12:00:00Z");
        assert!(json.get("created_at").is_none());
        assert_eq!(json["tags"], serde_json::json!(["home"]));
    }

    #[test]
    fn test_note_deserializes_offset_timestamps() {
        let json = r#"{
            "id": "n1", "title": "t", "content": "", "tags": [],
            "createdAt": "2026-03-01T14:00:00+02:00",
            "updatedAt": "2026-03-01T12:00:00.000Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_tags_text_plain() {
        assert_eq!(sample(&[]).tags_text(), "{}");
        assert_eq!(sample(&["x", "y"]).tags_text(), "{x,y}");
    }

    #[test]
    fn test_tags_text_quotes_special_elements() {
        assert_eq!(
            sample(&["two words", "z"]).tags_text(),
            r#"{"two words",z}"#
        );
        assert_eq!(sample(&["", "NULL"]).tags_text(), r#"{"","NULL"}"#);
        assert_eq!(sample(&[r#"a"b"#]).tags_text(), r#"{"a\"b"}"#);
        assert_eq!(sample(&["a,b"]).tags_text(), r#"{"a,b"}"#);
    }

    #[test]
    fn test_matches_query_is_case_insensitive_across_fields() {
        let note = sample(&["Errands"]);
        assert!(note.matches_query("grocery"));
        assert!(note.matches_query("EGGS"));
        assert!(note.matches_query("errand"));
        assert!(!note.matches_query("bread"));
    }

    #[test]
    fn test_matches_query_against_tag_text_form() {
        let note = sample(&["x", "y"]);
        assert!(note.matches_query("x,y"));
        assert!(note.matches_query("{x"));
    }

    #[test]
    fn test_differs_from() {
        let note = sample(&["a"]);
        assert!(!note.differs_from("Grocery List", "Milk and eggs", &["a".to_string()]));
        assert!(note.differs_from("Grocery List", "Milk and eggs", &[]));
        assert!(note.differs_from("Groceries", "Milk and eggs", &["a".to_string()]));
    }

    #[test]
    fn test_create_input_omits_absent_tags() {
        let json = serde_json::to_value(CreateNoteInput::new("A", "")).unwrap();
        assert!(json.get("tags").is_none());

        let parsed: CreateNoteInput =
            serde_json::from_str(r#"{"title":"A","content":"B"}"#).unwrap();
        assert_eq!(parsed.tags, None);
    }

    #[test]
    fn test_update_input_builder_and_wire_form() {
        let input = UpdateNoteInput::new("n1").tags(["z"]);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({"id": "n1", "tags": ["z"]}));
    }
}
