/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// The `builder` module turns typed values and structured data into the
/// elements of Exchange Web Services request bodies.
pub mod builder;

/// The `element` module provides the in-memory element tree that builders
/// append to.
pub mod element;

mod error;

/// The `name` module converts snake_case field keys into EWS element and
/// attribute names.
pub mod name;

/// The `options` module defines configuration for building elements.
pub mod options;

/// The `schedule` module holds the element order Exchange requires for
/// calendar items.
pub mod schedule;

/// The `types` module defines typed inputs for identifiers, shapes and other
/// leaf elements.
pub mod types;

/// The `value` module defines the structured data elements are built from.
pub mod value;

/// The `xml` module provides serialization of element trees as XML.
pub mod xml;

#[cfg(test)]
mod test_utils;

pub use builder::Builder;
pub use element::Element;
pub use error::Error;
pub use name::to_schema_name;
pub use options::{BuildOptions, ScalarFields, SequenceTarget};
pub use types::{
    BaseShape, EventType, FolderId, FolderShape, ItemId, ItemKind, ItemShape, Mailbox, Namespace,
};
pub use value::{Fields, Scalar, Value, TEXT_KEY};
