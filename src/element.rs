/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// An XML element under construction.
///
/// Names are stored fully qualified, e.g. `t:CalendarItem`. Attributes and
/// children keep the order in which they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Creates a detached element, typically the root of a fragment.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the value of the named attribute, if set.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Returns the first child with the given qualified name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Appends a new child element and returns a handle to it.
    pub fn add(&mut self, name: impl Into<String>, text: Option<String>) -> &mut Element {
        self.children.push(Element {
            name: name.into(),
            text,
            ..Default::default()
        });

        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Appends a new child element and hands it to `build` to be populated.
    ///
    /// The child can only be modified from within `build`.
    pub fn add_with<F>(&mut self, name: impl Into<String>, text: Option<String>, build: F)
    where
        F: FnOnce(&mut Element),
    {
        build(self.add(name, text));
    }

    /// Sets an attribute, replacing any earlier value for the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::Element;

    #[test]
    fn add_appends_children_in_order() {
        let mut root = Element::new("m:Items");

        root.add("t:Message", None).set_attr("Id", "1");
        root.add("t:Message", Some("second".to_string()));

        let names: Vec<_> = root.children().iter().map(Element::name).collect();
        assert_eq!(names, vec!["t:Message", "t:Message"]);
        assert_eq!(root.children()[0].attribute("Id"), Some("1"));
        assert_eq!(root.children()[1].text(), Some("second"));
    }

    #[test]
    fn add_with_populates_the_new_child() {
        let mut root = Element::new("m:FolderIds");

        root.add_with("t:FolderId", None, |folder_id| {
            folder_id.set_attr("Id", "abc");
            folder_id.add("t:Mailbox", None);
        });

        let folder_id = root.child("t:FolderId").unwrap();
        assert_eq!(folder_id.attribute("Id"), Some("abc"));
        assert!(folder_id.child("t:Mailbox").is_some());
        assert!(root.child("t:Mailbox").is_none());
    }

    #[test]
    fn set_attr_replaces_existing_values() {
        let mut element = Element::new("t:ItemId");

        element.set_attr("Id", "old");
        element.set_attr("ChangeKey", "ck");
        element.set_attr("Id", "new");

        assert_eq!(
            element.attributes(),
            &[
                ("Id".to_string(), "new".to_string()),
                ("ChangeKey".to_string(), "ck".to_string()),
            ]
        );
    }
}
