use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Course
///
/// Backend identifiers are opaque strings; the only rule enforced here is that
/// they are not blank.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Creates a new `CourseId`
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the value is empty or whitespace only.
    pub fn new(id: impl Into<String>) -> Result<Self, ParseIdError> {
        non_blank(id.into(), "CourseId").map(Self)
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a Module within its course
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Creates a new `ModuleId`
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the value is empty or whitespace only.
    pub fn new(id: impl Into<String>) -> Result<Self, ParseIdError> {
        non_blank(id.into(), "ModuleId").map(Self)
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a single game instance
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct GameId(String);

impl GameId {
    /// Creates a new `GameId`
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the value is empty or whitespace only.
    pub fn new(id: impl Into<String>) -> Result<Self, ParseIdError> {
        non_blank(id.into(), "GameId").map(Self)
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn non_blank(raw: String, kind: &'static str) -> Result<String, ParseIdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseIdError { kind });
    }
    if trimmed.len() == raw.len() {
        Ok(raw)
    } else {
        Ok(trimmed.to_owned())
    }
}

impl fmt::Debug for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CourseId({})", self.0)
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Conversions ───────────────────────────────────────────────────────────────

/// Error type for parsing an ID from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cannot be blank", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for CourseId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for ModuleId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for GameId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<CourseId> for String {
    fn from(id: CourseId) -> Self {
        id.0
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.0
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
