//! Todo domain model.
//!
//! This module contains the single entity of the application, the [`Todo`],
//! together with its value objects and the partial update type [`TodoPatch`].

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a todo.
///
/// Identifiers are opaque strings. New todos receive a random UUID (v4), but
/// any string read back from storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Creates a `TodoId` from an existing identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a new `TodoId` backed by a random UUID (v4).
    ///
    /// **Note**: This is an impure function (side effect: random number generation).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Uuid> for TodoId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

/// Creation timestamp of a todo.
///
/// Serialized as an ISO-8601 UTC string with millisecond precision,
/// e.g. `2024-02-13T11:19:00.999Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`, truncated to milliseconds.
    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.trunc_subsecs(3))
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    ///
    /// **Note**: This is an impure function (side effect: system clock).
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Formats the timestamp as an ISO-8601 string.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.to_iso_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|datetime| Self::from_datetime(datetime.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Todo Entity
// =============================================================================

/// A to-do entry.
///
/// The serialized form is the storage and wire format:
///
/// ```json
/// { "id": "...", "date": "2024-02-13T11:19:00.999Z", "content": "...", "done": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, immutable once assigned.
    pub id: TodoId,
    /// Creation timestamp.
    pub date: Timestamp,
    /// Text content.
    pub content: String,
    /// Completion flag.
    pub done: bool,
}

impl Todo {
    /// Creates a new, not yet completed todo.
    ///
    /// This is a pure function. Use `TodoId::generate()` and `Timestamp::now()`
    /// at the call site to obtain the impure parts.
    #[must_use]
    pub fn new(id: TodoId, content: impl Into<String>, date: Timestamp) -> Self {
        Self {
            id,
            date,
            content: content.into(),
            done: false,
        }
    }

    /// Returns a new todo with the completion flag flipped.
    #[must_use]
    pub fn toggled(self) -> Self {
        Self {
            done: !self.done,
            ..self
        }
    }

    /// Returns a new todo with the given content.
    #[must_use]
    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self
        }
    }

    /// Returns a new todo with the given completion flag.
    #[must_use]
    pub fn with_done(self, done: bool) -> Self {
        Self { done, ..self }
    }

    /// Returns a new todo with every field present in `patch` applied.
    ///
    /// The identifier and creation date are never touched.
    #[must_use]
    pub fn apply(self, patch: TodoPatch) -> Self {
        let todo = match patch.content {
            Some(content) => self.with_content(content),
            None => self,
        };
        match patch.done {
            Some(done) => todo.with_done(done),
            None => todo,
        }
    }

    /// Returns `true` if the content contains `needle`, ignoring case.
    ///
    /// `needle` is expected to be lowercase already.
    #[must_use]
    pub fn content_contains(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle)
    }
}

/// A partial update for a [`Todo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TodoPatch {
    /// New content.
    #[serde(default)]
    pub content: Option<String>,
    /// New completion flag.
    #[serde(default)]
    pub done: Option<bool>,
}

impl TodoPatch {
    /// Creates a patch that only replaces the content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            done: None,
        }
    }

    /// Creates a patch that only sets the completion flag.
    #[must_use]
    pub const fn done(done: bool) -> Self {
        Self {
            content: None,
            done: Some(done),
        }
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_none() && self.done.is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_todo(content: &str) -> Todo {
        Todo::new(TodoId::generate(), content, Timestamp::now())
    }

    // -------------------------------------------------------------------------
    // TodoId Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_todo_id_generate_creates_unique_ids() {
        let id1 = TodoId::generate();
        let id2 = TodoId::generate();
        assert_ne!(id1, id2);
    }

    #[rstest]
    fn test_todo_id_generate_is_uuid() {
        let id = TodoId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[rstest]
    fn test_todo_id_serializes_as_plain_string() {
        let id = TodoId::new("a");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a\"");
    }

    // -------------------------------------------------------------------------
    // Timestamp Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_timestamp_serializes_with_milliseconds() {
        let datetime = DateTime::parse_from_rfc3339("2024-02-13T11:19:00.999Z")
            .unwrap()
            .with_timezone(&Utc);
        let timestamp = Timestamp::from_datetime(datetime);
        assert_eq!(
            serde_json::to_string(&timestamp).unwrap(),
            "\"2024-02-13T11:19:00.999Z\""
        );
    }

    #[rstest]
    fn test_timestamp_truncates_sub_millisecond_precision() {
        let datetime = DateTime::parse_from_rfc3339("2024-02-13T11:19:00.999999Z")
            .unwrap()
            .with_timezone(&Utc);
        let timestamp = Timestamp::from_datetime(datetime);
        assert_eq!(timestamp.to_iso_string(), "2024-02-13T11:19:00.999Z");
    }

    #[rstest]
    #[case("\"not a date\"")]
    #[case("42")]
    fn test_timestamp_rejects_invalid_input(#[case] input: &str) {
        assert!(serde_json::from_str::<Timestamp>(input).is_err());
    }

    // -------------------------------------------------------------------------
    // Todo Tests
    // -------------------------------------------------------------------------

    #[rstest]
    fn test_todo_new_is_not_done() {
        let todo = test_todo("Write tests");
        assert_eq!(todo.content, "Write tests");
        assert!(!todo.done);
    }

    #[rstest]
    fn test_todo_toggled_twice_restores_original() {
        let todo = test_todo("x");
        let toggled = todo.clone().toggled();
        assert!(toggled.done);
        assert_eq!(toggled.clone().toggled(), todo);
    }

    #[rstest]
    fn test_todo_apply_patch_keeps_identity() {
        let todo = test_todo("before");
        let patched = todo.clone().apply(TodoPatch {
            content: Some("after".to_string()),
            done: Some(true),
        });
        assert_eq!(patched.id, todo.id);
        assert_eq!(patched.date, todo.date);
        assert_eq!(patched.content, "after");
        assert!(patched.done);
    }

    #[rstest]
    fn test_todo_apply_empty_patch_is_identity() {
        let todo = test_todo("unchanged");
        assert!(TodoPatch::default().is_empty());
        assert_eq!(todo.clone().apply(TodoPatch::default()), todo);
    }

    #[rstest]
    #[case("Buy milk", "milk", true)]
    #[case("Buy MILK", "milk", true)]
    #[case("Buy milk", "bread", false)]
    #[case("Buy milk", "", true)]
    fn test_todo_content_contains(
        #[case] content: &str,
        #[case] needle: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(test_todo(content).content_contains(needle), expected);
    }

    #[rstest]
    fn test_todo_json_shape() {
        let json = r#"{"id":"8486e02c-5630-42c5-b374-b36e873cce7e","date":"2024-02-13T11:19:00.999Z","content":"digitar alguma coisa","done":false}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.id.as_str(), "8486e02c-5630-42c5-b374-b36e873cce7e");
        assert_eq!(todo.content, "digitar alguma coisa");
        assert_eq!(serde_json::to_string(&todo).unwrap(), json);
    }
}
