//! Row decoding: converts one tokenized row into a fresh record.

use csv::StringRecord;

use crate::{
    error::{Error, Result},
    fields::{FieldDescriptor, Record},
    headers::Binding,
};

/// Builds a record from `row` using the columns recorded in `binding`.
///
/// Fields outside the binding keep their `Default` value. A field whose kind
/// cannot be decoded fails the row before any cell is converted.
pub fn decode_row<T: Record>(
    fields: &[FieldDescriptor<T>],
    binding: &Binding,
    row: &StringRecord,
) -> Result<T> {
    if let Some(kind) = binding
        .iter()
        .filter_map(|(field_index, _)| fields.get(field_index))
        .map(FieldDescriptor::kind)
        .find(|kind| !kind.is_supported())
    {
        return Err(Error::UnsupportedType {
            kind: kind.target_name(),
        });
    }

    let mut record = T::default();
    for (field_index, column) in binding.iter() {
        let Some(field) = fields.get(field_index) else {
            continue;
        };
        let raw = row.get(column).ok_or_else(|| Error::MissingCell {
            field: field.name().to_string(),
            index: column,
            len: row.len(),
        })?;
        field.assign(&mut record, raw)?;
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fields::introspect, headers::bind_headers};

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        struct Reading {
            pub sensor: String,
            pub value: f64,
            pub ok: bool,
        }
    }

    crate::record! {
        #[derive(Debug, Default)]
        #[allow(dead_code)]
        struct Tagged {
            pub count: u8,
            pub tags: Vec<String>,
        }
    }

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn decode_row_follows_bound_columns() {
        let fields = introspect::<Reading>().unwrap();
        let binding = bind_headers(&fields, &headers(&["Ok", "Value", "Sensor"])).unwrap();
        let row = StringRecord::from(vec!["T", "21.5", "north"]);

        let reading = decode_row(&fields, &binding, &row).expect("decode reading");
        assert_eq!(
            reading,
            Reading {
                sensor: "north".to_string(),
                value: 21.5,
                ok: true,
            }
        );
    }

    #[test]
    fn decode_row_reports_short_rows() {
        let fields = introspect::<Reading>().unwrap();
        let binding = bind_headers(&fields, &headers(&["Sensor", "Value", "Ok"])).unwrap();
        let row = StringRecord::from(vec!["north", "21.5"]);

        let err = decode_row(&fields, &binding, &row).expect_err("row too short");
        assert!(matches!(
            err,
            Error::MissingCell { ref field, index: 2, len: 2 } if field == "Ok"
        ));
    }

    #[test]
    fn decode_row_rejects_unsupported_kinds_before_converting() {
        let fields = introspect::<Tagged>().unwrap();
        let binding = bind_headers(&fields, &headers(&["Count", "Tags"])).unwrap();
        // "many" would fail as a u8 if conversion ran first.
        let row = StringRecord::from(vec!["many", "a|b"]);

        let err = decode_row(&fields, &binding, &row).expect_err("list field");
        assert_eq!(err.to_string(), "unsupported type: list");
    }
}
