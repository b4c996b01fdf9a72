use std::fmt;

/// One step into a JSON instance
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl PathSegment {
    /// Parse one reference token of a JSON pointer (`~1` is `/`, `~0` is `~`).
    ///
    /// All-digit tokens are taken as array indices.
    pub fn from_pointer_token(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = token.parse() {
                return PathSegment::Index(index);
            }
        }
        PathSegment::Key(token.replace("~1", "/").replace("~0", "~"))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Key(key) => f.write_str(key),
        }
    }
}

/// A single constraint violation found in an instance.
///
/// Ordering compares paths segment by segment, so a parent sorts before its
/// children (`a` < `a.b`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        SchemaViolation {
            path,
            message: message.into(),
        }
    }

    /// Build from a JSON pointer such as `/plugins/0/name`
    pub fn from_pointer(pointer: &str, message: impl Into<String>) -> Self {
        let path = pointer
            .split('/')
            .skip(1)
            .map(PathSegment::from_pointer_token)
            .collect();
        SchemaViolation::new(path, message)
    }

    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "[{}] {}", self.dotted_path(), self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::violation::*;

    #[test]
    fn test_from_pointer() {
        let violation = SchemaViolation::from_pointer("/plugins/0/a~1b", "bad");
        assert_eq!(
            violation.path,
            vec![
                PathSegment::Key("plugins".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("a/b".to_string()),
            ]
        );
        assert_eq!(violation.to_string(), "[plugins.0.a/b] bad");
    }

    #[test]
    fn test_root_violation_is_unprefixed() {
        let violation = SchemaViolation::from_pointer("", "must be an object");
        assert!(violation.path.is_empty());
        assert_eq!(violation.to_string(), "must be an object");
    }

    #[test]
    fn test_path_ordering() {
        let a = SchemaViolation::from_pointer("/a", "x").path;
        let ab = SchemaViolation::from_pointer("/a/b", "x").path;
        let b = SchemaViolation::from_pointer("/b", "x").path;
        let a0 = SchemaViolation::from_pointer("/a/0", "x").path;

        assert!(a < ab);
        assert!(ab < b);
        assert!(a0 < ab);
    }
}
