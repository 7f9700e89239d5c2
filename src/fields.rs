//! Field descriptors and record-type introspection.
//!
//! A record type describes itself through [`Record::shape()`], which returns a
//! table of [`FieldDescriptor`]s in declaration order. Each descriptor carries
//! the canonical field name used for header binding, the semantic
//! [`FieldKind`] that selects a conversion rule, the field's declared
//! [`Visibility`], and a setter that writes a converted cell into a record.
//!
//! The [`record!`](crate::record) macro generates these tables; types can also
//! implement [`Record`] by hand.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

use heck::ToUpperCamelCase;
use log::debug;

use crate::error::{Error, Result};

/// Writes one raw cell into the matching field of a record.
pub type Setter<T> = fn(&mut T, &str) -> Result<()>;

/// Semantic value kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int(u32),
    Uint(u32),
    Float(u32),
    String,
    Bool,
    Unsupported(&'static str),
}

impl FieldKind {
    /// Name reported in conversion and unsupported-type errors.
    pub fn target_name(&self) -> &'static str {
        match self {
            FieldKind::Int(_) => "int",
            FieldKind::Uint(_) => "uint",
            FieldKind::Float(_) => "float",
            FieldKind::String => "string",
            FieldKind::Bool => "bool",
            FieldKind::Unsupported(kind) => *kind,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldKind::Unsupported(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Int(bits) => write!(f, "i{bits}"),
            FieldKind::Uint(bits) => write!(f, "u{bits}"),
            FieldKind::Float(bits) => write!(f, "f{bits}"),
            other => f.write_str(other.target_name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Restricted,
}

impl Visibility {
    /// Classifies a stringified visibility qualifier. Only a bare `pub` is
    /// visible to external callers.
    pub fn from_token(token: &str) -> Self {
        if token.trim() == "pub" {
            Visibility::Public
        } else {
            Visibility::Restricted
        }
    }
}

pub struct FieldDescriptor<T> {
    name: String,
    kind: FieldKind,
    visibility: Visibility,
    setter: Setter<T>,
}

impl<T> FieldDescriptor<T> {
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        visibility: Visibility,
        setter: Setter<T>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility,
            setter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_exported(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Converts `raw` and stores it in `record`.
    pub fn assign(&self, record: &mut T, raw: &str) -> Result<()> {
        (self.setter)(record, raw)
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            visibility: self.visibility,
            setter: self.setter,
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("visibility", &self.visibility)
            .finish()
    }
}

/// Structural description of a type offered to the reader.
pub enum TypeShape<T> {
    Struct(Vec<FieldDescriptor<T>>),
    Other(&'static str),
}

/// A type that rows can be decoded into.
pub trait Record: Default + Sized {
    fn shape() -> TypeShape<Self>;
}

/// A value type that can be produced from a single CSV cell.
pub trait FieldValue: Sized {
    const KIND: FieldKind;

    fn from_cell(raw: &str) -> Result<Self>;
}

/// Returns the exported field descriptors of `T` in declaration order.
pub fn introspect<T: Record>() -> Result<Vec<FieldDescriptor<T>>> {
    let all_fields = match T::shape() {
        TypeShape::Struct(fields) => fields,
        TypeShape::Other(found) => return Err(Error::InvalidType { found }),
    };
    if all_fields.is_empty() {
        return Err(Error::NoVisibleFields);
    }

    let total = all_fields.len();
    let fields = all_fields
        .into_iter()
        .filter(FieldDescriptor::is_exported)
        .collect::<Vec<_>>();
    if fields.is_empty() {
        return Err(Error::NoExportedFields);
    }
    debug!(
        "Introspected {} exported of {} field(s) on {}",
        fields.len(),
        total,
        std::any::type_name::<T>()
    );
    Ok(fields)
}

/// Canonical binding name for a declared field: the explicit rename when
/// given, otherwise the identifier in PascalCase.
pub fn canonical_name(ident: &str, rename: Option<&str>) -> String {
    match rename {
        Some(name) => name.to_string(),
        None => ident.trim_start_matches("r#").to_upper_camel_case(),
    }
}

/// Boolean literals: `1`, `t`, `true` and `0`, `f`, `false`, each also in
/// upper and title case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

macro_rules! integer_fields {
    ($variant:ident, $target:literal, signed = $signed:literal => $($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::$variant(<$ty>::BITS);

                fn from_cell(raw: &str) -> Result<Self> {
                    // Unsigned cells carry no sign at all, not even `+`.
                    if !$signed && raw.starts_with('+') {
                        return Err(Error::conversion(raw, $target));
                    }
                    raw.parse::<$ty>()
                        .map_err(|_| Error::conversion(raw, $target))
                }
            }
        )+
    };
}

integer_fields!(Int, "int", signed = true => i8, i16, i32, i64, isize);
integer_fields!(Uint, "uint", signed = false => u8, u16, u32, u64, usize);

/// True for the spelled-out infinity literals (`inf`, `+Infinity`, ...).
fn is_infinity_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}

impl FieldValue for f64 {
    const KIND: FieldKind = FieldKind::Float(64);

    fn from_cell(raw: &str) -> Result<Self> {
        match raw.parse::<f64>() {
            // Magnitudes past f64::MAX round to infinity; only an explicit
            // literal may produce one.
            Ok(value) if value.is_infinite() && !is_infinity_literal(raw) => {
                Err(Error::conversion(raw, "float"))
            }
            Ok(value) => Ok(value),
            Err(_) => Err(Error::conversion(raw, "float")),
        }
    }
}

impl FieldValue for f32 {
    const KIND: FieldKind = FieldKind::Float(32);

    fn from_cell(raw: &str) -> Result<Self> {
        f64::from_cell(raw).map(|value| value as f32)
    }
}

impl FieldValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn from_cell(raw: &str) -> Result<Self> {
        parse_bool(raw).ok_or_else(|| Error::conversion(raw, "bool"))
    }
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn from_cell(raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }
}

macro_rules! unsupported_fields {
    ($($kind:literal => $ty:ty where [$($generics:tt)*]),+ $(,)?) => {
        $(
            impl<$($generics)*> FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Unsupported($kind);

                fn from_cell(_raw: &str) -> Result<Self> {
                    Err(Error::UnsupportedType { kind: $kind })
                }
            }
        )+
    };
}

unsupported_fields!(
    "list" => Vec<V> where [V],
    "option" => Option<V> where [V],
    "map" => HashMap<K, V> where [K, V],
    "map" => BTreeMap<K, V> where [K, V],
);

macro_rules! scalar_records {
    ($($ty:ty),+) => {
        $(
            impl Record for $ty {
                fn shape() -> TypeShape<Self> {
                    TypeShape::Other(stringify!($ty))
                }
            }
        )+
    };
}

scalar_records!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, String, ()
);
