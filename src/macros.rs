/// Declares a struct together with its [`Record`](crate::Record) descriptor
/// table.
///
/// Every field becomes a [`FieldDescriptor`](crate::FieldDescriptor) whose
/// canonical name is the identifier in PascalCase (`first_name` binds to the
/// header `FirstName`, or `first_name` under the default header mode). A
/// trailing `as "NAME"` overrides the canonical name. Only `pub` fields are
/// mapped; the rest keep their `Default` value.
///
/// ```
/// csv_records::record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Person {
///         pub first_name: String,
///         pub age: u32,
///         pub code: String as "CODE",
///         notes: String,
///     }
/// }
///
/// let data = "first_name,age,CODE\nAlice,30,A1\n";
/// let options = csv_records::ReaderOptions::new()
///     .with_header_transform(|header| match header {
///         "CODE" => header.to_string(),
///         other => csv_records::snake_to_title(other),
///     });
/// let people: Vec<Person> = csv_records::parse(data.as_bytes(), options).unwrap();
/// assert_eq!(people[0].first_name, "Alice");
/// assert_eq!(people[0].code, "A1");
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(as $rename:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn shape() -> $crate::TypeShape<Self> {
                $crate::TypeShape::Struct(::std::vec![
                    $(
                        $crate::FieldDescriptor::new(
                            $crate::fields::canonical_name(
                                ::std::stringify!($field),
                                ::std::option::Option::None $(.or(::std::option::Option::Some($rename)))?,
                            ),
                            <$ty as $crate::FieldValue>::KIND,
                            $crate::Visibility::from_token(::std::stringify!($field_vis)),
                            |record: &mut Self, raw: &str| -> $crate::Result<()> {
                                record.$field = <$ty as $crate::FieldValue>::from_cell(raw)?;
                                ::std::result::Result::Ok(())
                            },
                        ),
                    )*
                ])
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Error, FieldKind, Visibility, fields::introspect};

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        struct Mixed {
            pub ident: i64,
            pub other_thing: String,
            pub(crate) internal: u8,
            hidden: u64,
            pub r#type: bool as "Kind",
        }
    }

    crate::record! {
        #[derive(Debug, Default)]
        struct Empty {}
    }

    crate::record! {
        #[derive(Debug, Default)]
        #[allow(dead_code)]
        struct Private {
            secret: String,
        }
    }

    #[test]
    fn record_macro_builds_descriptor_table() {
        let fields = introspect::<Mixed>().expect("introspect mixed");
        let names = fields.iter().map(|f| f.name()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Ident", "OtherThing", "Kind"]);
        assert_eq!(fields[0].kind(), FieldKind::Int(64));
        assert_eq!(fields[2].kind(), FieldKind::Bool);
        assert!(fields.iter().all(|f| f.visibility() == Visibility::Public));

        let mut record = Mixed::default();
        fields[0].assign(&mut record, "42").expect("assign ident");
        fields[2].assign(&mut record, "true").expect("assign kind");
        assert_eq!(record.ident, 42);
        assert!(record.r#type);
        assert_eq!(record.internal, 0);
        assert_eq!(record.hidden, 0);
    }

    #[test]
    fn record_macro_reports_empty_and_private_structs() {
        assert!(matches!(
            introspect::<Empty>(),
            Err(Error::NoVisibleFields)
        ));
        assert!(matches!(
            introspect::<Private>(),
            Err(Error::NoExportedFields)
        ));
    }
}
