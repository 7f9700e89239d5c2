//! Header transformation and header-to-field binding.
//!
//! Raw header cells are first rewritten into the naming convention used by
//! record fields ([`transform_headers()`]), then matched against the exported
//! field descriptors ([`bind_headers()`]). The resulting [`Binding`] is built
//! once per reader and reused for every row.

use std::collections::HashMap;

use clap::ValueEnum;
use itertools::Itertools;
use log::{debug, warn};

use crate::{
    error::{Error, Result},
    fields::FieldDescriptor,
};

/// Built-in header naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HeaderMode {
    /// Use headers exactly as they appear in the input.
    None,
    /// Treat headers as snake_case and convert them to TitleCase.
    #[default]
    #[value(name = "snake")]
    SnakeToTitle,
}

/// Caller-supplied header rewrite; takes precedence over [`HeaderMode`].
pub type HeaderTransform = Box<dyn Fn(&str) -> String>;

/// Converts `other_thing` into `OtherThing`.
pub fn snake_to_title(header: &str) -> String {
    header.split('_').map(title_case).collect()
}

// English title-casing: a letter that opens a word is upper-cased, the rest of
// the word is lower-cased. `.` and `:` between two letters stay inside the word.
fn title_case(part: &str) -> String {
    let mut output = String::with_capacity(part.len());
    let mut chars = part.chars().peekable();
    let mut prev: Option<char> = None;
    let mut at_word_start = true;
    while let Some(ch) = chars.next() {
        if at_word_start {
            output.extend(ch.to_uppercase());
        } else {
            output.extend(ch.to_lowercase());
        }
        let mid_letter = matches!(ch, '.' | ':')
            && prev.is_some_and(char::is_alphabetic)
            && chars.peek().is_some_and(|next| next.is_alphabetic());
        at_word_start =
            !(ch.is_alphanumeric() || ch == '\'' || ch == '\u{2019}' || mid_letter);
        prev = Some(ch);
    }
    output
}

/// Applies the custom transform when present, otherwise `mode`, to every
/// header independently. Order and count are preserved.
pub fn transform_headers(
    raw: &[String],
    mode: HeaderMode,
    custom: Option<&dyn Fn(&str) -> String>,
) -> Vec<String> {
    match (custom, mode) {
        (Some(transform), _) => raw.iter().map(|header| transform(header.as_str())).collect(),
        (None, HeaderMode::SnakeToTitle) => raw.iter().map(|h| snake_to_title(h)).collect(),
        (None, HeaderMode::None) => raw.to_vec(),
    }
}

/// Column assignment for each exported field, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    columns: Vec<usize>,
    headers: Vec<String>,
}

impl Binding {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column index bound to the field at `field_index`.
    pub fn column(&self, field_index: usize) -> Option<usize> {
        self.columns.get(field_index).copied()
    }

    /// Column index bound to the field named `name`.
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .copied()
            .find(|&column| self.headers.get(column).is_some_and(|h| h == name))
    }

    /// `(field index, column index)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns.iter().copied().enumerate()
    }

    /// Transformed headers the binding was resolved against.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// Matches every field to the first header with the same name.
///
/// Fails with [`Error::MissingHeaders`] listing fields without a header
/// followed by headers without a field.
pub fn bind_headers<T>(fields: &[FieldDescriptor<T>], headers: &[String]) -> Result<Binding> {
    let mut found: HashMap<&str, usize> = HashMap::with_capacity(fields.len());
    let mut columns = Vec::with_capacity(fields.len());
    let mut missing = Vec::new();

    for field in fields {
        match headers.iter().position(|header| header == field.name()) {
            Some(column) => {
                // A second field with the same name cannot get its own column.
                if found.insert(field.name(), column).is_some() {
                    missing.push(field.name().to_string());
                }
                columns.push(column);
            }
            None => missing.push(field.name().to_string()),
        }
    }

    for header in headers {
        if !found.contains_key(header.as_str()) {
            missing.push(header.clone());
        }
    }

    if !missing.is_empty() || found.len() != fields.len() {
        return Err(Error::MissingHeaders { missing });
    }

    let duplicates = headers.iter().duplicates().collect::<Vec<_>>();
    if !duplicates.is_empty() {
        warn!(
            "Duplicate header(s) {} bound to their first occurrence",
            duplicates.iter().join(", ")
        );
    }
    debug!(
        "Bound {} field(s) to columns {:?}",
        columns.len(),
        fields
            .iter()
            .zip(&columns)
            .map(|(field, column)| format!("{}={column}", field.name()))
            .collect::<Vec<_>>()
    );

    Ok(Binding {
        columns,
        headers: headers.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldKind, Visibility};

    fn descriptor(name: &str) -> FieldDescriptor<()> {
        FieldDescriptor::new(name, FieldKind::String, Visibility::Public, |_, _| Ok(()))
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn snake_to_title_joins_title_cased_parts() {
        assert_eq!(snake_to_title("other_thing"), "OtherThing");
        assert_eq!(snake_to_title("ident"), "Ident");
        assert_eq!(snake_to_title("int_8"), "Int8");
        assert_eq!(snake_to_title("OtherThing"), "Otherthing");
        assert_eq!(snake_to_title("__lead"), "Lead");
        assert_eq!(snake_to_title(""), "");
    }

    #[test]
    fn title_case_starts_words_after_separators() {
        assert_eq!(snake_to_title("first name"), "First Name");
        assert_eq!(snake_to_title("o'neil"), "O'neil");
        assert_eq!(snake_to_title("x-ray_id"), "X-RayId");
    }

    #[test]
    fn title_case_keeps_mid_letter_punctuation_inside_words() {
        assert_eq!(snake_to_title("a.b"), "A.b");
        assert_eq!(snake_to_title("ns:key_name"), "Ns:keyName");
        assert_eq!(snake_to_title("v.2"), "V.2");
        assert_eq!(snake_to_title("end."), "End.");
        assert_eq!(snake_to_title("a. b"), "A. B");
    }

    #[test]
    fn transform_prefers_custom_function() {
        let raw = strings(&["bar", "other_thing"]);
        let shout = |h: &str| h.to_uppercase();
        assert_eq!(
            transform_headers(&raw, HeaderMode::None, Some(&shout)),
            strings(&["BAR", "OTHER_THING"])
        );
        assert_eq!(
            transform_headers(&raw, HeaderMode::None, None),
            strings(&["bar", "other_thing"])
        );
        assert_eq!(
            transform_headers(&raw, HeaderMode::SnakeToTitle, None),
            strings(&["Bar", "OtherThing"])
        );
    }

    #[test]
    fn bind_records_first_matching_column() {
        let fields = vec![descriptor("Name"), descriptor("Ident")];
        let headers = strings(&["Ident", "Name", "Name"]);
        let binding = bind_headers(&fields, &headers).expect("bind");
        assert_eq!(binding.iter().collect::<Vec<_>>(), vec![(0, 1), (1, 0)]);
        assert_eq!(binding.column_of("Name"), Some(1));
        assert_eq!(binding.column_of("Other"), None);
        assert_eq!(binding.len(), 2);
    }

    #[test]
    fn bind_lists_field_misses_before_header_misses() {
        let fields = vec![descriptor("Ident"), descriptor("OtherThing")];
        let headers = strings(&["Ident", "Otherthing"]);
        let err = bind_headers(&fields, &headers).expect_err("mismatch");
        match &err {
            Error::MissingHeaders { missing } => {
                assert_eq!(missing, &strings(&["OtherThing", "Otherthing"]))
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.to_string(), "missing headers: OtherThing, Otherthing");
    }

    #[test]
    fn bind_reports_single_extra_header() {
        let fields = vec![descriptor("Ident")];
        let headers = strings(&["Ident", "Extra"]);
        let err = bind_headers(&fields, &headers).expect_err("extra header");
        assert_eq!(err.to_string(), "missing header: Extra");
    }

    #[test]
    fn bind_rejects_duplicate_field_names() {
        let fields = vec![descriptor("Ident"), descriptor("Ident")];
        let headers = strings(&["Ident"]);
        let err = bind_headers(&fields, &headers).expect_err("duplicate field");
        assert!(matches!(&err, Error::MissingHeaders { missing } if missing == &strings(&["Ident"])));
        assert_eq!(err.to_string(), "missing header: Ident");

        let fields = vec![descriptor("Code"), descriptor("Name"), descriptor("Code")];
        let headers = strings(&["Code", "Name", "Code"]);
        let err = bind_headers(&fields, &headers).expect_err("duplicate field and header");
        assert_eq!(err.to_string(), "missing header: Code");
    }
}
