//! Transport-neutral multipart submission built by the save serializer.

use crate::loose::format_number;
use crate::staging::PendingFile;

/// How boolean fields are written into a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolEncoding {
    /// `"1"` / `"0"`
    Numeric,
    /// `"true"` / `"false"`
    Word,
}

impl BoolEncoding {
    pub fn encode(self, value: bool) -> &'static str {
        match (self, value) {
            (BoolEncoding::Numeric, true) => "1",
            (BoolEncoding::Numeric, false) => "0",
            (BoolEncoding::Word, true) => "true",
            (BoolEncoding::Word, false) => "false",
        }
    }
}

/// One named value of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(PendingFile),
}

/// Ordered list of named values, mirroring a multipart form body.
///
/// Names may repeat; multi-file fields are sent as one part per file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    parts: Vec<(String, FormValue)>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts
            .push((name.into(), FormValue::Text(value.into())));
    }

    pub fn push_number(&mut self, name: impl Into<String>, value: f64) {
        self.push_text(name, format_number(value));
    }

    pub fn push_flag(&mut self, name: impl Into<String>, value: bool, encoding: BoolEncoding) {
        self.push_text(name, encoding.encode(value));
    }

    /// Collection fields travel as one JSON-encoded array value.
    pub fn push_list(&mut self, name: impl Into<String>, values: &[String]) {
        let encoded = serde_json::Value::from(values.to_vec()).to_string();
        self.push_text(name, encoded);
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: PendingFile) {
        self.parts.push((name.into(), FormValue::File(file)));
    }

    pub fn parts(&self) -> &[(String, FormValue)] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<(String, FormValue)> {
        self.parts
    }

    /// First text value under `name`
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, v)| match v {
            FormValue::Text(t) if n == name => Some(t.as_str()),
            _ => None,
        })
    }

    /// Decode a JSON-encoded list value
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        self.text(name)
            .and_then(|t| serde_json::from_str::<Vec<String>>(t).ok())
    }

    /// All files under `name`, in order
    pub fn files(&self, name: &str) -> Vec<&PendingFile> {
        self.parts
            .iter()
            .filter_map(|(n, v)| match v {
                FormValue::File(f) if n == name => Some(f),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_are_json_encoded() {
        let mut sub = Submission::new();
        sub.push_list("skills", &["Jazz".to_string(), "Blues \"live\"".to_string()]);
        assert_eq!(sub.text("skills"), Some(r#"["Jazz","Blues \"live\""]"#));
        assert_eq!(
            sub.list("skills").unwrap(),
            vec!["Jazz".to_string(), "Blues \"live\"".to_string()]
        );
    }

    #[test]
    fn flags_follow_encoding() {
        let mut sub = Submission::new();
        sub.push_flag("a", true, BoolEncoding::Numeric);
        sub.push_flag("b", false, BoolEncoding::Word);
        assert_eq!(sub.text("a"), Some("1"));
        assert_eq!(sub.text("b"), Some("false"));
    }

    #[test]
    fn repeated_file_names_keep_order() {
        let mut sub = Submission::new();
        sub.push_file("gallery", PendingFile::new("1.png", "image/png", vec![1]));
        sub.push_text("other", "x");
        sub.push_file("gallery", PendingFile::new("2.png", "image/png", vec![2]));

        let names: Vec<_> = sub
            .files("gallery")
            .iter()
            .map(|f| f.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["1.png", "2.png"]);
        assert_eq!(sub.len(), 3);
    }
}
