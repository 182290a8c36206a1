/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::str::FromStr;

use crate::{
    value::{Fields, Value},
    Error,
};

/// The prefix for elements in the EWS messages namespace.
pub const MESSAGES_PREFIX: &str = "m";

/// The prefix for elements in the EWS types namespace.
pub const TYPES_PREFIX: &str = "t";

/// The XML namespace an element belongs to.
///
/// Only prefixes are written; binding them to namespace URIs is up to the
/// document the fragment is embedded in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Namespace {
    /// Operation-level elements, such as `Items` or `FolderIds`.
    Messages,

    /// Schema type elements, such as `CalendarItem` or `FolderId`.
    #[default]
    Types,
}

impl Namespace {
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Messages => MESSAGES_PREFIX,
            Namespace::Types => TYPES_PREFIX,
        }
    }

    /// Returns `local` qualified with this namespace's prefix.
    pub fn qualify(self, local: &str) -> String {
        format!("{}:{local}", self.prefix())
    }
}

/// A mailbox, identified by its SMTP address.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/mailbox>.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mailbox {
    pub email_address: String,
}

/// An identifier for a remote folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FolderId {
    /// An identifier for an arbitrary folder.
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/folderid>.
    FolderId {
        id: String,
        change_key: Option<String>,
    },

    /// An identifier for referencing a folder by name, e.g. "inbox" or
    /// "junkemail".
    ///
    /// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/distinguishedfolderid>.
    DistinguishedFolderId {
        id: String,
        change_key: Option<String>,

        /// The mailbox owning the folder, when it is not the mailbox of the
        /// authenticated user.
        mailbox: Option<Mailbox>,
    },
}

impl FolderId {
    /// Creates an identifier for an arbitrary folder.
    pub fn id(id: impl Into<String>) -> Self {
        FolderId::FolderId {
            id: id.into(),
            change_key: None,
        }
    }

    /// Creates an identifier for a folder referenced by name.
    pub fn distinguished(id: impl Into<String>) -> Self {
        FolderId::DistinguishedFolderId {
            id: id.into(),
            change_key: None,
            mailbox: None,
        }
    }
}

impl From<&str> for FolderId {
    fn from(value: &str) -> Self {
        FolderId::id(value)
    }
}

/// Interprets structured input as a folder identifier.
///
/// A symbol names a distinguished folder and any other scalar is an opaque
/// folder id. A mapping supplies an `id` and optionally a `change_key`; it
/// names a distinguished folder when its `id` is a symbol.
impl TryFrom<&Value> for FolderId {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Symbol(name) => Ok(FolderId::distinguished(name.as_str())),
            Value::Scalar(scalar) => Ok(FolderId::id(scalar.to_string())),
            Value::Mapping(fields) => folder_id_from_fields(fields),
            Value::Sequence(_) => Err(Error::InvalidFolderId(String::from(
                "a sequence cannot identify a single folder",
            ))),
        }
    }
}

fn folder_id_from_fields(fields: &Fields) -> Result<FolderId, Error> {
    let change_key = fields.get("change_key").and_then(Value::as_text);

    match fields.get("id") {
        Some(Value::Symbol(name)) => Ok(FolderId::DistinguishedFolderId {
            id: name.clone(),
            change_key,
            mailbox: None,
        }),
        Some(Value::Scalar(scalar)) => Ok(FolderId::FolderId {
            id: scalar.to_string(),
            change_key,
        }),
        Some(other) => Err(Error::InvalidFolderId(format!(
            "folder `id` must be a scalar or symbol, found a {}",
            other.kind()
        ))),
        None => Err(Error::InvalidFolderId(String::from(
            "mapping has no `id` entry",
        ))),
    }
}

/// An identifier for a remote item.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/itemid>.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemId {
    pub id: String,
    pub change_key: Option<String>,
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId {
            id: value.to_string(),
            change_key: None,
        }
    }
}

/// The base set of properties to be returned in response to our request, which
/// can be modified by the parent.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/baseshape>.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BaseShape {
    IdOnly,
    #[default]
    Default,
    AllProperties,
}

impl From<BaseShape> for &str {
    fn from(value: BaseShape) -> Self {
        match value {
            BaseShape::IdOnly => "IdOnly",
            BaseShape::Default => "Default",
            BaseShape::AllProperties => "AllProperties",
        }
    }
}

/// The folder properties to include in the response.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/foldershape>.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderShape {
    pub base_shape: BaseShape,

    /// Well-known property paths, such as `folder:DisplayName`, to include in
    /// addition to the base shape.
    pub additional_properties: Vec<String>,
}

/// The item properties to include in the response.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/itemshape>.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemShape {
    pub base_shape: BaseShape,
    pub additional_properties: Vec<String>,
}

/// A kind of mailbox event which a subscription can report.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/eventtype>.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    CopiedEvent,
    CreatedEvent,
    DeletedEvent,
    ModifiedEvent,
    MovedEvent,
    NewMailEvent,
    FreeBusyChangedEvent,
}

impl AsRef<str> for EventType {
    fn as_ref(&self) -> &str {
        match self {
            EventType::CopiedEvent => "CopiedEvent",
            EventType::CreatedEvent => "CreatedEvent",
            EventType::DeletedEvent => "DeletedEvent",
            EventType::ModifiedEvent => "ModifiedEvent",
            EventType::MovedEvent => "MovedEvent",
            EventType::NewMailEvent => "NewMailEvent",
            EventType::FreeBusyChangedEvent => "FreeBusyChangedEvent",
        }
    }
}

/// The kind of entity placed in an `Items` element, selecting how each
/// entity's fields are encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// An email message; fields are written in the order given.
    Message,

    /// A calendar item; fields are written in schema order.
    CalendarItem,
}

impl FromStr for ItemKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(ItemKind::Message),
            "calendar" | "calendar_item" => Ok(ItemKind::CalendarItem),
            _ => Err(Error::UnknownItemKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    #[test]
    fn qualifies_names_by_namespace() {
        assert_eq!(Namespace::Messages.qualify("Items"), "m:Items");
        assert_eq!(Namespace::Types.qualify("Subject"), "t:Subject");
        assert_eq!(Namespace::default(), Namespace::Types);
    }

    #[test]
    fn symbol_is_a_distinguished_folder() {
        let id = FolderId::try_from(&Value::symbol("inbox")).unwrap();

        assert_eq!(id, FolderId::distinguished("inbox"));
    }

    #[test]
    fn scalar_and_mapping_are_plain_folder_ids() {
        assert_eq!(
            FolderId::try_from(&Value::from("abc123")).unwrap(),
            FolderId::id("abc123")
        );

        let value = Value::from(fields! { "id" => "abc123", "change_key" => "ck1" });
        assert_eq!(
            FolderId::try_from(&value).unwrap(),
            FolderId::FolderId {
                id: "abc123".to_string(),
                change_key: Some("ck1".to_string()),
            }
        );

        let value = Value::from(fields! { "id" => Value::symbol("calendar") });
        assert_eq!(
            FolderId::try_from(&value).unwrap(),
            FolderId::distinguished("calendar")
        );
    }

    #[test]
    fn rejects_values_without_an_id() {
        assert!(matches!(
            FolderId::try_from(&Value::from(fields! { "change_key" => "ck" })),
            Err(Error::InvalidFolderId(_))
        ));
        assert!(matches!(
            FolderId::try_from(&Value::from(vec!["a", "b"])),
            Err(Error::InvalidFolderId(_))
        ));
    }

    #[test]
    fn parses_item_kinds() {
        assert_eq!("message".parse::<ItemKind>().unwrap(), ItemKind::Message);
        assert_eq!(
            "calendar".parse::<ItemKind>().unwrap(),
            ItemKind::CalendarItem
        );
        assert!(matches!(
            "task".parse::<ItemKind>(),
            Err(Error::UnknownItemKind(kind)) if kind == "task"
        ));
    }
}
