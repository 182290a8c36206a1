/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::value::Fields;

/// The order in which Exchange requires the children of a `CalendarItem` to
/// appear, as snake_case field keys. Exchange rejects requests whose children
/// are out of this order.
///
/// This matches the `CalendarItemType` schema of Exchange 2007 and 2010 and
/// should be revisited when targeting newer schema versions.
///
/// See <https://learn.microsoft.com/en-us/exchange/client-developer/web-service-reference/calendaritem>.
pub const CALENDAR_ITEM_ORDER: &[&str] = &[
    "mime_content",
    "item_id",
    "parent_folder_id",
    "item_class",
    "subject",
    "sensitivity",
    "body",
    "attachments",
    "date_time_received",
    "size",
    "categories",
    "in_reply_to",
    "is_submitted",
    "is_draft",
    "is_from_me",
    "is_resend",
    "is_unmodified",
    "internet_message_headers",
    "date_time_sent",
    "date_time_created",
    "response_objects",
    "reminder_due_by",
    "reminder_is_set",
    "reminder_minutes_before_start",
    "display_cc",
    "display_to",
    "has_attachments",
    "extended_property",
    "culture",
    "start",
    "end",
    "original_start",
    "is_all_day_event",
    "legacy_free_busy_status",
    "location",
    "when",
    "is_meeting",
    "is_cancelled",
    "is_recurring",
    "meeting_request_was_sent",
    "is_response_requested",
    "calendar_item_type",
    "my_response_type",
    "organizer",
    "required_attendees",
    "optional_attendees",
    "resources",
    "conflicting_meeting_count",
    "adjacent_meeting_count",
    "conflicting_meetings",
    "adjacent_meetings",
    "duration",
    "time_zone",
    "appointment_reply_time",
    "appointment_sequence_number",
    "appointment_state",
    "recurrence",
    "first_occurrence",
    "last_occurrence",
    "modified_occurrences",
    "deleted_occurrences",
    "meeting_time_zone",
    "start_time_zone",
    "end_time_zone",
    "conference_type",
    "allow_new_time_proposal",
    "is_online_meeting",
    "meeting_workspace_url",
    "net_show_url",
    "effective_rights",
    "last_modified_name",
    "last_modified_time",
    "is_associated",
    "web_client_read_form_query_string",
    "web_client_edit_form_query_string",
    "conversation_id",
    "unique_body",
];

/// Returns whether a field key has a position in [`CALENDAR_ITEM_ORDER`].
pub fn is_scheduled(key: &str) -> bool {
    CALENDAR_ITEM_ORDER.contains(&key)
}

/// Returns the keys of `fields` which have no position in
/// [`CALENDAR_ITEM_ORDER`] and would therefore be dropped from a
/// `CalendarItem`, in the order they appear in `fields`.
pub fn unscheduled_fields(fields: &Fields) -> Vec<&str> {
    fields
        .keys()
        .map(String::as_str)
        .filter(|key| !is_scheduled(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::fields;

    #[test]
    fn order_has_no_duplicates() {
        let unique: HashSet<_> = CALENDAR_ITEM_ORDER.iter().collect();

        assert_eq!(unique.len(), CALENDAR_ITEM_ORDER.len());
        assert_eq!(CALENDAR_ITEM_ORDER.len(), 77);
    }

    #[test]
    fn item_fields_precede_calendar_fields() {
        let position = |key: &str| CALENDAR_ITEM_ORDER.iter().position(|k| *k == key);

        assert_eq!(position("mime_content"), Some(0));
        assert!(position("subject") < position("sensitivity"));
        assert!(position("start") < position("end"));
        assert!(position("extended_property") < position("start"));
        assert_eq!(position("unique_body"), Some(CALENDAR_ITEM_ORDER.len() - 1));
    }

    #[test]
    fn reports_fields_without_a_position() {
        let fields = fields! {
            "subject" => "Planning",
            "color" => "blue",
            "location" => "Room 4",
            "mood" => "festive",
        };

        assert_eq!(unscheduled_fields(&fields), vec!["color", "mood"]);
        assert!(unscheduled_fields(&fields! { "subject" => "x" }).is_empty());
    }
}
