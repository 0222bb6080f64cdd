//! This module holds traits for extending functionalities for existing datatypes
//! & inbuilt datatypes.

use error_stack::ResultExt;

use crate::errors::{CustomResult, ParsingError};

/// Extending functionalities of `str` for performing parsing
pub trait StringExt {
    /// Convert `str` into type `<T>` by using `serde::Deserialize`
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: serde::Deserialize<'de>;
}

impl StringExt for str {
    #[track_caller]
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: serde::Deserialize<'de>,
    {
        serde_json::from_str(self)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| format!("Unable to parse {type_name} from str"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Sample {
        order: String,
    }

    #[test]
    fn parses_json_objects() {
        let parsed: Sample = r#"{"order":"1234"}"#.parse_struct("Sample").unwrap();
        assert_eq!(parsed.order, "1234");
    }

    #[test]
    fn reports_struct_name_on_failure() {
        let error = "[1,2]".parse_struct::<Sample>("Sample").unwrap_err();
        assert!(matches!(
            error.current_context(),
            ParsingError::StructParseFailure("Sample")
        ));
    }
}
