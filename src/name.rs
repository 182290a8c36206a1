/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/// Converts a snake_case field key into the PascalCase form used for EWS
/// element and attribute names, e.g. `date_time_sent` becomes `DateTimeSent`.
///
/// Each underscore-delimited segment has its first character upper-cased and
/// the rest lower-cased. Empty segments produce no output, so repeated or
/// trailing underscores are dropped. Case mapping is ASCII-only; any other
/// character passes through unchanged.
pub fn to_schema_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());

    for segment in key.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }

    name
}

/// Returns whether `name` can be used as the local part of an element or
/// attribute name, i.e. is a non-empty XML `NCName`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Converts a field key with [`to_schema_name`], returning `None` when the
/// result is not a valid name.
pub fn schema_name(key: &str) -> Option<String> {
    let name = to_schema_name(key);

    is_valid_name(&name).then_some(name)
}

// Ranges from the `NameStartChar` production of XML 1.0, less `:`.
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-'
            | '.'
            | '0'..='9'
            | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

#[cfg(test)]
mod tests {
    use super::{is_valid_name, schema_name, to_schema_name};

    #[test]
    fn converts_multi_segment_keys() {
        assert_eq!(to_schema_name("date_time_sent"), "DateTimeSent");
        assert_eq!(to_schema_name("item_id"), "ItemId");
        assert_eq!(
            to_schema_name("web_client_read_form_query_string"),
            "WebClientReadFormQueryString"
        );
    }

    #[test]
    fn single_segment_and_empty_keys() {
        assert_eq!(to_schema_name("subject"), "Subject");
        assert_eq!(to_schema_name("end"), "End");
        assert_eq!(to_schema_name(""), "");
        assert_eq!(to_schema_name("___"), "");
    }

    #[test]
    fn segments_are_lower_cased_after_first_character() {
        assert_eq!(to_schema_name("field_URI"), "FieldUri");
        assert_eq!(to_schema_name("ID"), "Id");
    }

    #[test]
    fn stray_underscores_are_dropped() {
        assert_eq!(to_schema_name("_is__draft_"), "IsDraft");
    }

    #[test]
    fn non_ascii_passes_through() {
        assert_eq!(to_schema_name("über_ort"), "überOrt");
    }

    #[test]
    fn conversion_is_stable() {
        let key = "reminder_minutes_before_start";
        assert_eq!(to_schema_name(key), to_schema_name(key));
    }

    #[test]
    fn valid_names() {
        assert!(is_valid_name("DateTimeSent"));
        assert!(is_valid_name("_Private"));
        assert!(is_valid_name("A1.b-c"));
        assert!(is_valid_name("überOrt"));
    }

    #[test]
    fn invalid_names() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1st"));
        assert!(!is_valid_name("A b"));
        assert!(!is_valid_name("t:Subject"));
        assert!(!is_valid_name("-Dash"));
    }

    #[test]
    fn keys_without_a_schema_name() {
        assert_eq!(schema_name("item_id").as_deref(), Some("ItemId"));
        assert_eq!(schema_name(""), None);
        assert_eq!(schema_name("___"), None);
        assert_eq!(schema_name("1st"), None);
        assert_eq!(schema_name("a b"), None);
    }
}
