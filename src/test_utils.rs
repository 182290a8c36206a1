/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::{element::Element, xml::write_fragment};

/// Assert the expected result of XML serialization.
pub fn assert_serialized_content(element: &Element, expected_xml_content: &str) {
    let mut buf: Vec<u8> = Default::default();
    write_fragment(&mut buf, element).unwrap();

    let actual_xml_content = std::str::from_utf8(buf.as_slice()).unwrap();

    assert_eq!(actual_xml_content, expected_xml_content);
}

/// Returns the qualified names of an element's children, in order.
pub fn child_names(element: &Element) -> Vec<&str> {
    element.children().iter().map(Element::name).collect()
}
