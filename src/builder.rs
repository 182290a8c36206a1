/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use const_format::concatcp;

use crate::{
    element::Element,
    name::schema_name,
    options::{BuildOptions, ScalarFields, SequenceTarget},
    schedule::{unscheduled_fields, CALENDAR_ITEM_ORDER},
    types::{
        BaseShape, FolderId, FolderShape, ItemId, ItemKind, ItemShape, Namespace,
        MESSAGES_PREFIX, TYPES_PREFIX,
    },
    value::{Child, Fields, Node, Value},
};

const FOLDER_IDS: &str = concatcp!(MESSAGES_PREFIX, ":FolderIds");
const PARENT_FOLDER_IDS: &str = concatcp!(MESSAGES_PREFIX, ":ParentFolderIds");
const ITEM_IDS: &str = concatcp!(MESSAGES_PREFIX, ":ItemIds");
const SAVED_ITEM_FOLDER_ID: &str = concatcp!(MESSAGES_PREFIX, ":SavedItemFolderId");
const FOLDER_SHAPE: &str = concatcp!(MESSAGES_PREFIX, ":FolderShape");
const ITEM_SHAPE: &str = concatcp!(MESSAGES_PREFIX, ":ItemShape");
const ITEMS: &str = concatcp!(MESSAGES_PREFIX, ":Items");
const SUBSCRIPTION_ID: &str = concatcp!(MESSAGES_PREFIX, ":SubscriptionId");
const WATERMARK: &str = concatcp!(MESSAGES_PREFIX, ":Watermark");
const SYNC_STATE: &str = concatcp!(MESSAGES_PREFIX, ":SyncState");

const FOLDER_ID: &str = concatcp!(TYPES_PREFIX, ":FolderId");
const DISTINGUISHED_FOLDER_ID: &str = concatcp!(TYPES_PREFIX, ":DistinguishedFolderId");
const MAILBOX: &str = concatcp!(TYPES_PREFIX, ":Mailbox");
const EMAIL_ADDRESS: &str = concatcp!(TYPES_PREFIX, ":EmailAddress");
const ITEM_ID: &str = concatcp!(TYPES_PREFIX, ":ItemId");
const BASE_SHAPE: &str = concatcp!(TYPES_PREFIX, ":BaseShape");
const ADDITIONAL_PROPERTIES: &str = concatcp!(TYPES_PREFIX, ":AdditionalProperties");
const FIELD_URI: &str = concatcp!(TYPES_PREFIX, ":FieldURI");
const MESSAGE: &str = concatcp!(TYPES_PREFIX, ":Message");
const CALENDAR_ITEM: &str = concatcp!(TYPES_PREFIX, ":CalendarItem");
const EVENT_TYPES: &str = concatcp!(TYPES_PREFIX, ":EventTypes");
const EVENT_TYPE: &str = concatcp!(TYPES_PREFIX, ":EventType");

/// Builds the elements of EWS request bodies from typed values and
/// structured data.
///
/// Each operation appends to the element passed as its first argument.
/// Building never fails: input which cannot be represented is left out and
/// reported through the `log` facade at `warn` level.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    options: BuildOptions,
}

impl Builder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Writes a `FolderIds` element containing each of `folder_ids`.
    pub fn folder_ids(&self, node: &mut Element, folder_ids: &[FolderId]) {
        self.folder_ids_as(node, folder_ids, FOLDER_IDS);
    }

    /// Writes a `ParentFolderIds` element containing each of `folder_ids`.
    pub fn parent_folder_ids(&self, node: &mut Element, folder_ids: &[FolderId]) {
        self.folder_ids_as(node, folder_ids, PARENT_FOLDER_IDS);
    }

    /// Writes an element with the given qualified name containing each of
    /// `folder_ids`.
    pub fn folder_ids_as(&self, node: &mut Element, folder_ids: &[FolderId], element_name: &str) {
        node.add_with(element_name, None, |ids| {
            for folder_id in folder_ids {
                self.folder_id(ids, folder_id);
            }
        });
    }

    /// Writes a `FolderId` or `DistinguishedFolderId` element, depending on
    /// the kind of identifier.
    pub fn folder_id(&self, node: &mut Element, folder_id: &FolderId) {
        match folder_id {
            FolderId::FolderId { id, change_key } => {
                log::debug!("writing folder id `{id}`");

                node.add_with(FOLDER_ID, None, |element| {
                    element.set_attr("Id", id.as_str());
                    if let Some(change_key) = change_key {
                        element.set_attr("ChangeKey", change_key.as_str());
                    }
                });
            }
            FolderId::DistinguishedFolderId {
                id,
                change_key,
                mailbox,
            } => {
                log::debug!("writing distinguished folder id `{id}`");

                node.add_with(DISTINGUISHED_FOLDER_ID, None, |element| {
                    element.set_attr("Id", id.as_str());
                    if let Some(change_key) = change_key {
                        element.set_attr("ChangeKey", change_key.as_str());
                    }
                    if let Some(mailbox) = mailbox {
                        element.add_with(MAILBOX, None, |mailbox_element| {
                            mailbox_element
                                .add(EMAIL_ADDRESS, Some(mailbox.email_address.clone()));
                        });
                    }
                });
            }
        }
    }

    /// Writes an `ItemIds` element with one `ItemId` per identifier.
    pub fn item_ids(&self, node: &mut Element, item_ids: &[ItemId]) {
        node.add_with(ITEM_IDS, None, |ids| {
            for item_id in item_ids {
                let element = ids.add(ITEM_ID, None);
                element.set_attr("Id", item_id.id.as_str());
                if let Some(change_key) = &item_id.change_key {
                    element.set_attr("ChangeKey", change_key.as_str());
                }
            }
        });
    }

    /// Writes a `SavedItemFolderId` element wrapping a single folder id.
    pub fn saved_item_folder_id(&self, node: &mut Element, folder_id: &FolderId) {
        node.add_with(SAVED_ITEM_FOLDER_ID, None, |wrapper| {
            self.folder_id(wrapper, folder_id);
        });
    }

    /// Writes a `FolderShape` element.
    pub fn folder_shape(&self, node: &mut Element, folder_shape: &FolderShape) {
        write_shape(
            node,
            FOLDER_SHAPE,
            folder_shape.base_shape,
            &folder_shape.additional_properties,
        );
    }

    /// Writes an `ItemShape` element.
    pub fn item_shape(&self, node: &mut Element, item_shape: &ItemShape) {
        write_shape(
            node,
            ITEM_SHAPE,
            item_shape.base_shape,
            &item_shape.additional_properties,
        );
    }

    /// Writes an `Items` element containing one entity of the given kind per
    /// mapping in `items`. `items` may be a single mapping or a sequence of
    /// mappings.
    pub fn items(&self, node: &mut Element, items: &Value, kind: ItemKind) {
        node.add_with(ITEMS, None, |element| match items {
            Value::Mapping(fields) => self.item(element, fields, kind),
            Value::Sequence(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    match entry {
                        Value::Mapping(fields) => self.item(element, fields, kind),
                        other => log::warn!(
                            "skipping item {index}: expected a mapping, found a {}",
                            other.kind()
                        ),
                    }
                }
            }
            other => log::warn!(
                "writing empty `Items`: expected a mapping or sequence, found a {}",
                other.kind()
            ),
        });
    }

    fn item(&self, node: &mut Element, fields: &Fields, kind: ItemKind) {
        match kind {
            ItemKind::Message => self.message_item(node, fields),
            ItemKind::CalendarItem => self.calendar_item(node, fields),
        }
    }

    /// Writes a `Message` element with children built from `fields` in the
    /// order given.
    pub fn message_item(&self, node: &mut Element, fields: &Fields) {
        node.add_with(MESSAGE, None, |message| {
            self.add_hierarchy(message, fields, Namespace::Types);
        });
    }

    /// Writes a `CalendarItem` element with children built from `fields`.
    ///
    /// Exchange requires the children of a calendar item in a fixed order, so
    /// fields are written in the order of [`CALENDAR_ITEM_ORDER`] regardless
    /// of their order in `fields`. Fields without a position in that order
    /// are dropped, as are sequence fields with no mapping entries.
    pub fn calendar_item(&self, node: &mut Element, fields: &Fields) {
        for key in unscheduled_fields(fields) {
            log::warn!("dropping calendar item field `{key}`: it has no position in the schema");
        }

        node.add_with(CALENDAR_ITEM, None, |item| {
            for &key in CALENDAR_ITEM_ORDER {
                let Some(value) = fields.get(key) else {
                    continue;
                };

                let Some(name) = element_name(key, Namespace::Types) else {
                    continue;
                };
                match value {
                    Value::Mapping(nested) => {
                        self.add_mapping(item, name, nested, Namespace::Types);
                    }
                    Value::Sequence(entries) => {
                        self.add_wrapped_entries(item, key, name, entries, Namespace::Types);
                    }
                    Value::Scalar(_) | Value::Symbol(_) => match self.options.scalar_fields {
                        ScalarFields::Text => {
                            item.add(name, value.as_text());
                        }
                        ScalarFields::Skip => log::warn!(
                            "skipping calendar item field `{key}`: a {} cannot be encoded",
                            value.kind()
                        ),
                    },
                }
            }
        });
    }

    /// Writes an `EventTypes` element with one `EventType` per entry.
    pub fn event_types<I, S>(&self, node: &mut Element, event_types: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        node.add_with(EVENT_TYPES, None, |types| {
            for event_type in event_types {
                types.add(EVENT_TYPE, Some(event_type.as_ref().to_string()));
            }
        });
    }

    pub fn subscription_id(&self, node: &mut Element, subscription_id: &str) {
        node.add(SUBSCRIPTION_ID, Some(subscription_id.to_string()));
    }

    pub fn watermark(&self, node: &mut Element, watermark: &str) {
        node.add(WATERMARK, Some(watermark.to_string()));
    }

    pub fn sync_state(&self, node: &mut Element, sync_state: &str) {
        node.add(SYNC_STATE, Some(sync_state.to_string()));
    }

    /// Adds attributes and child elements to `node` from a mapping.
    ///
    /// Scalars become attributes of `node`. Each mapping becomes a child
    /// element whose text is its `text` entry and whose own entries are
    /// added recursively. Sequences are placed according to
    /// [`BuildOptions::sequence_target`]. Names are converted with
    /// [`to_schema_name`](crate::name::to_schema_name) and qualified with
    /// `namespace`; keys which do not convert to a valid XML name are
    /// skipped. A `text` entry of `fields` itself is ignored, as it belongs
    /// to `node`.
    ///
    /// ```
    /// use ews_builder::{fields, Builder, Element, Namespace};
    ///
    /// let mut node = Element::new("t:Message");
    /// let fields = fields! {
    ///     "this" => fields! { "text" => "that" },
    ///     "top" => fields! {
    ///         "id" => "32fss",
    ///         "text" => "TestText",
    ///         "middle" => fields! { "text" => "bottom" },
    ///     },
    /// };
    ///
    /// Builder::default().add_hierarchy(&mut node, &fields, Namespace::Types);
    ///
    /// assert_eq!(
    ///     node.to_xml_string().unwrap(),
    ///     concat!(
    ///         r#"<t:Message><t:This>that</t:This>"#,
    ///         r#"<t:Top Id="32fss">TestText<t:Middle>bottom</t:Middle></t:Top></t:Message>"#,
    ///     ),
    /// );
    /// ```
    pub fn add_hierarchy(&self, node: &mut Element, fields: &Fields, namespace: Namespace) {
        self.apply(node, Node::classify(fields), namespace);
    }

    fn apply(&self, node: &mut Element, description: Node<'_>, namespace: Namespace) {
        for (key, value) in description.attributes {
            match schema_name(key) {
                Some(name) => node.set_attr(name, value),
                None => log::warn!("skipping attribute `{key}`: it has no valid XML name"),
            }
        }

        for (key, child) in description.children {
            match child {
                Child::Mapping(fields) => {
                    if let Some(name) = element_name(key, namespace) {
                        self.add_mapping(node, name, fields, namespace);
                    }
                }
                Child::Sequence(entries) => self.add_sequence(node, key, entries, namespace),
            }
        }
    }

    /// Adds a child element built from a mapping, taking its text from the
    /// mapping's `text` entry.
    fn add_mapping(&self, node: &mut Element, name: String, fields: &Fields, namespace: Namespace) {
        let mut description = Node::classify(fields);
        let text = description.text.take();

        node.add_with(name, text, |child| {
            self.apply(child, description, namespace);
        });
    }

    fn add_sequence(&self, node: &mut Element, key: &str, entries: &[Value], namespace: Namespace) {
        match self.options.sequence_target {
            SequenceTarget::Parent => self.add_entries(node, key, entries, namespace),
            SequenceTarget::Wrapper => {
                if let Some(name) = element_name(key, namespace) {
                    self.add_wrapped_entries(node, key, name, entries, namespace);
                }
            }
            SequenceTarget::Repeated => {
                let Some(name) = element_name(key, namespace) else {
                    return;
                };
                for (index, entry) in entries.iter().enumerate() {
                    match entry {
                        Value::Mapping(fields) => {
                            self.add_mapping(node, name.clone(), fields, namespace);
                        }
                        Value::Scalar(_) | Value::Symbol(_) => {
                            node.add(name.clone(), entry.as_text());
                        }
                        Value::Sequence(_) => log::warn!(
                            "skipping entry {index} of `{key}`: nested sequences cannot be encoded"
                        ),
                    }
                }
            }
        }
    }

    /// Adds an element named `name` holding the entries of each mapping in a
    /// sequence. No element is added when no entry is a mapping.
    fn add_wrapped_entries(
        &self,
        node: &mut Element,
        key: &str,
        name: String,
        entries: &[Value],
        namespace: Namespace,
    ) {
        if !entries.iter().any(|entry| entry.as_mapping().is_some()) {
            log::warn!("skipping `{key}`: the sequence holds no mappings");
            return;
        }

        node.add_with(name, None, |wrapper| {
            self.add_entries(wrapper, key, entries, namespace);
        });
    }

    /// Adds the entries of each mapping in a sequence to `node`.
    fn add_entries(&self, node: &mut Element, key: &str, entries: &[Value], namespace: Namespace) {
        for (index, entry) in entries.iter().enumerate() {
            match entry {
                Value::Mapping(fields) => self.add_hierarchy(node, fields, namespace),
                other => log::warn!(
                    "skipping entry {index} of `{key}`: expected a mapping, found a {}",
                    other.kind()
                ),
            }
        }
    }
}

/// Returns the qualified element name for a field key, or `None` with a
/// warning when the key has no valid name.
fn element_name(key: &str, namespace: Namespace) -> Option<String> {
    let name = schema_name(key).map(|name| namespace.qualify(&name));
    if name.is_none() {
        log::warn!("skipping field `{key}`: it has no valid XML name");
    }

    name
}

fn write_shape(
    node: &mut Element,
    element_name: &str,
    base_shape: BaseShape,
    additional_properties: &[String],
) {
    node.add_with(element_name, None, |shape| {
        let base_shape: &str = base_shape.into();
        shape.add(BASE_SHAPE, Some(base_shape.to_string()));

        if !additional_properties.is_empty() {
            shape.add_with(ADDITIONAL_PROPERTIES, None, |properties| {
                for uri in additional_properties {
                    properties
                        .add(FIELD_URI, None)
                        .set_attr("FieldURI", uri.as_str());
                }
            });
        }
    });
}
