/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt;

use indexmap::IndexMap;

/// The reserved key whose scalar value supplies an element's own text
/// content rather than an attribute.
pub const TEXT_KEY: &str = "text";

/// An insertion-ordered mapping of snake_case field keys to values.
pub type Fields = IndexMap<String, Value>;

/// A leaf value, rendered either as element text or as an attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(text) => f.write_str(text),
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Boolean(value) => write!(f, "{value}"),
        }
    }
}

/// Structured input data for building EWS elements.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(Scalar),

    /// A well-known name, such as a distinguished folder name like `inbox`,
    /// as opposed to an opaque identifier. Wherever the kind of value does
    /// not matter, a symbol renders as its name.
    Symbol(String),

    Mapping(Fields),

    Sequence(Vec<Value>),
}

impl Value {
    /// Creates a [`Value::Symbol`].
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// Returns the string form of a scalar or symbol, or `None` for
    /// structured values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Scalar(scalar) => Some(scalar.to_string()),
            Value::Symbol(name) => Some(name.clone()),
            Value::Mapping(_) | Value::Sequence(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Fields> {
        match self {
            Value::Mapping(fields) => Some(fields),
            _ => None,
        }
    }

    /// A short description of the kind of value, for diagnostics.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Symbol(_) => "symbol",
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
        }
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::Text(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(Scalar::Integer(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(Scalar::Integer(value.into()))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::Float(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Boolean(value))
    }
}

impl From<Fields> for Value {
    fn from(value: Fields) -> Self {
        Value::Mapping(value)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::Sequence(value.into_iter().map(Into::into).collect())
    }
}

/// Converts TOML data into a [`Value`].
///
/// Tables become mappings and arrays become sequences. A string beginning
/// with `:` becomes a symbol named by the rest of the string, so `":inbox"`
/// refers to the distinguished inbox folder. Datetimes become text in their
/// TOML representation.
impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(string) => match string.strip_prefix(':') {
                Some(name) if !name.is_empty() => Value::Symbol(name.to_string()),
                _ => Value::Scalar(Scalar::Text(string)),
            },
            toml::Value::Integer(value) => Value::Scalar(Scalar::Integer(value)),
            toml::Value::Float(value) => Value::Scalar(Scalar::Float(value)),
            toml::Value::Boolean(value) => Value::Scalar(Scalar::Boolean(value)),
            toml::Value::Datetime(datetime) => Value::Scalar(Scalar::Text(datetime.to_string())),
            toml::Value::Array(values) => {
                Value::Sequence(values.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(table) => Value::Mapping(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Builds a [`Fields`] mapping from `key => value` pairs, preserving order.
///
/// ```
/// use ews_builder::{fields, Value};
///
/// let fields = fields! {
///     "subject" => "Lunch",
///     "body" => fields! { "body_type" => "Text", "text" => "Tacos?" },
/// };
///
/// assert_eq!(fields["subject"], Value::from("Lunch"));
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        fields
    }};
}

/// A mapping classified into the three positions an XML element offers.
///
/// The entry under [`TEXT_KEY`] becomes the text content, every other scalar
/// or symbol becomes an attribute, and every mapping or sequence becomes
/// nested content. Each entry lands in exactly one position.
#[derive(Debug, Default, PartialEq)]
pub struct Node<'a> {
    pub text: Option<String>,
    pub attributes: Vec<(&'a str, String)>,
    pub children: Vec<(&'a str, Child<'a>)>,
}

/// Structured content nested beneath a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Child<'a> {
    Mapping(&'a Fields),
    Sequence(&'a [Value]),
}

impl<'a> Node<'a> {
    pub fn classify(fields: &'a Fields) -> Self {
        let mut node = Node::default();

        for (key, value) in fields {
            match value {
                Value::Scalar(_) | Value::Symbol(_) => {
                    let text = value.as_text().unwrap_or_default();
                    if key == TEXT_KEY {
                        node.text = Some(text);
                    } else {
                        node.attributes.push((key.as_str(), text));
                    }
                }
                Value::Mapping(fields) => {
                    node.children.push((key.as_str(), Child::Mapping(fields)));
                }
                Value::Sequence(entries) => {
                    node.children.push((key.as_str(), Child::Sequence(entries)));
                }
            }
        }

        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(Value::from("abc").as_text().as_deref(), Some("abc"));
        assert_eq!(Value::from(15).as_text().as_deref(), Some("15"));
        assert_eq!(Value::from(true).as_text().as_deref(), Some("true"));
        assert_eq!(Value::from(1.5).as_text().as_deref(), Some("1.5"));
        assert_eq!(Value::symbol("inbox").as_text().as_deref(), Some("inbox"));
        assert_eq!(Value::from(fields! {}).as_text(), None);
        assert_eq!(Value::from(vec!["a"]).as_text(), None);
    }

    #[test]
    fn classify_separates_text_attributes_and_children() {
        let fields = fields! {
            "id" => "32fss",
            "text" => "TestText",
            "middle" => fields! { "text" => "bottom" },
            "attendees" => vec![fields! { "text" => "a" }],
            "is_read" => false,
        };

        let node = Node::classify(&fields);

        assert_eq!(node.text.as_deref(), Some("TestText"));
        assert_eq!(
            node.attributes,
            vec![("id", "32fss".to_string()), ("is_read", "false".to_string())]
        );
        let child_keys: Vec<_> = node.children.iter().map(|(key, _)| *key).collect();
        assert_eq!(child_keys, vec!["middle", "attendees"]);
    }

    #[test]
    fn structured_text_key_is_a_child() {
        let fields = fields! { "text" => fields! { "id" => "1" } };

        let node = Node::classify(&fields);

        assert_eq!(node.text, None);
        assert!(node.attributes.is_empty());
        assert_eq!(
            node.children,
            vec![("text", Child::Mapping(&fields! { "id" => "1" }))]
        );
    }

    #[test]
    fn converts_toml_documents() {
        let document: toml::Table = toml::from_str(
            r#"
            folder = ":inbox"
            colon = ":"
            subject = "Standup"
            size = 42
            categories = ["Red", "Blue"]

            [body]
            body_type = "Text"
            "#,
        )
        .unwrap();

        let value = Value::from(toml::Value::Table(document));
        let fields = value.as_mapping().unwrap();

        assert_eq!(fields["folder"], Value::symbol("inbox"));
        assert_eq!(fields["colon"], Value::from(":"));
        assert_eq!(fields["subject"], Value::from("Standup"));
        assert_eq!(fields["size"], Value::from(42));
        assert_eq!(fields["categories"], Value::from(vec!["Red", "Blue"]));
        assert_eq!(fields["body"], Value::from(fields! { "body_type" => "Text" }));
    }
}
