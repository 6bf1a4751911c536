//! Declarative query-parameter encoding.
//!
//! Every request type lists its fields once (wire name, value, omit policy) and a
//! single routine flattens the declarations, including nested groups such as the
//! shared credential/method envelope.

use std::collections::BTreeMap;

/// Flat parameter set sent on the query string.
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue<'a> {
    Text(&'a str),
    Int(i64),
    /// An unset optional field.
    Absent,
}

impl ParamValue<'_> {
    fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Int(value) => *value == 0,
            Self::Absent => true,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Text(text) => (*text).to_owned(),
            Self::Int(value) => value.to_string(),
            Self::Absent => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Omit {
    Never,
    /// Skip the parameter when it holds an empty string, zero, or nothing.
    WhenEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<'a> {
    Plain {
        name: &'static str,
        value: ParamValue<'a>,
        omit: Omit,
    },
    Group(Vec<Field<'a>>),
}

impl<'a> Field<'a> {
    pub fn text(name: &'static str, value: &'a str) -> Self {
        Self::Plain {
            name,
            value: ParamValue::Text(value),
            omit: Omit::Never,
        }
    }

    pub fn int(name: &'static str, value: i64) -> Self {
        Self::Plain {
            name,
            value: ParamValue::Int(value),
            omit: Omit::Never,
        }
    }

    /// Optional text, dropped from the query when unset or empty.
    pub fn optional_text(name: &'static str, value: Option<&'a str>) -> Self {
        Self::Plain {
            name,
            value: value.map_or(ParamValue::Absent, ParamValue::Text),
            omit: Omit::WhenEmpty,
        }
    }

    /// Optional integer, dropped from the query when unset.
    ///
    /// A present value is always sent, zero included.
    pub fn optional_int(name: &'static str, value: Option<i64>) -> Self {
        match value {
            Some(value) => Self::int(name, value),
            None => Self::Plain {
                name,
                value: ParamValue::Absent,
                omit: Omit::WhenEmpty,
            },
        }
    }

    pub fn omit_when_empty(self) -> Self {
        match self {
            Self::Plain { name, value, .. } => Self::Plain {
                name,
                value,
                omit: Omit::WhenEmpty,
            },
            group @ Self::Group(_) => group,
        }
    }
}

/// Field declarations of a request value.
pub trait ToParams {
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Flatten declarations depth-first.
///
/// When a name repeats, the value visited last wins.
pub fn encode_params(fields: &[Field<'_>]) -> Params {
    let mut params = Params::new();
    flatten_into(fields, &mut params);
    params
}

fn flatten_into(fields: &[Field<'_>], params: &mut Params) {
    for field in fields {
        match field {
            Field::Plain { name, value, omit } => {
                if *omit == Omit::WhenEmpty && value.is_empty() {
                    continue;
                }
                params.insert((*name).to_owned(), value.render());
            }
            Field::Group(inner) => flatten_into(inner, params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(params: &Params) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn plain_fields_are_stringified() {
        let params = encode_params(&[Field::text("did", "5551234567"), Field::int("pop", 12)]);
        assert_eq!(pairs(&params), vec![("did", "5551234567"), ("pop", "12")]);
    }

    #[test]
    fn omit_when_empty_skips_zero_values() {
        let params = encode_params(&[
            Field::text("client", "").omit_when_empty(),
            Field::int("pop", 0).omit_when_empty(),
            Field::optional_text("did", None),
            Field::optional_int("server_pop", None),
            Field::text("kept", ""),
        ]);
        assert_eq!(pairs(&params), vec![("kept", "")]);
    }

    #[test]
    fn optional_int_sends_present_zero() {
        let params = encode_params(&[Field::optional_int("server_pop", Some(0))]);
        assert_eq!(pairs(&params), vec![("server_pop", "0")]);
    }

    #[test]
    fn groups_are_flattened_and_later_values_win() {
        let params = encode_params(&[
            Field::Group(vec![
                Field::text("method", "getDIDsInfo"),
                Field::Group(vec![Field::text("api_username", "a@x.com")]),
            ]),
            Field::Group(vec![Field::text("method", "override")]),
        ]);
        assert_eq!(
            pairs(&params),
            vec![("api_username", "a@x.com"), ("method", "override")]
        );
    }

    #[test]
    fn omit_when_empty_leaves_groups_untouched() {
        let group = Field::Group(vec![Field::text("a", "")]).omit_when_empty();
        assert_eq!(pairs(&encode_params(&[group])), vec![("a", "")]);
    }
}
