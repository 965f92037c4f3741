//! Slot catalog — the fixed universe of bookable time labels.
//!
//! One scheduling day covers 10:00 AM through 5:55 PM in 5-minute steps,
//! 96 entries. The catalog is day-shape, not day-instance: the same labels
//! apply to every date and department. Built once at first use and shared
//! immutably from then on.

use std::sync::LazyLock;

/// Working-day bounds, 24-hour clock. End is exclusive.
const OPENING_HOUR: u32 = 10;
const CLOSING_HOUR: u32 = 18;
const SLOT_MINUTES: u32 = 5;

static CATALOG: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut slots = Vec::with_capacity(96);
    for hour in OPENING_HOUR..CLOSING_HOUR {
        for minute in (0..60).step_by(SLOT_MINUTES as usize) {
            slots.push(format_slot(hour, minute));
        }
    }
    slots
});

/// 12-hour label without a leading hour zero, e.g. "10:05 AM", "1:00 PM".
fn format_slot(hour: u32, minute: u32) -> String {
    let meridiem = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour {
        0 => 12,
        1..=12 => hour,
        _ => hour - 12,
    };
    format!("{display_hour}:{minute:02} {meridiem}")
}

/// The full ordered catalog for one scheduling day.
pub fn all_slots() -> &'static [String] {
    &CATALOG
}

/// Whether a submitted label names a catalog slot.
pub fn slot_exists(label: &str) -> bool {
    CATALOG.iter().any(|s| s == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_96_entries() {
        assert_eq!(all_slots().len(), 96);
    }

    #[test]
    fn catalog_spans_working_hours() {
        let slots = all_slots();
        assert_eq!(slots.first().unwrap(), "10:00 AM");
        assert_eq!(slots.last().unwrap(), "5:55 PM");
    }

    #[test]
    fn labels_drop_leading_hour_zero_after_noon() {
        // 13:00 renders as "1:00 PM", noon stays "12:00 PM"
        assert!(slot_exists("12:00 PM"));
        assert!(slot_exists("1:00 PM"));
        assert!(!slot_exists("13:00 PM"));
    }

    #[test]
    fn catalog_is_chronological() {
        let slots = all_slots();
        assert_eq!(slots[0], "10:00 AM");
        assert_eq!(slots[1], "10:05 AM");
        assert_eq!(slots[12], "11:00 AM");
        // Noon boundary: index 24 is the first PM slot
        assert_eq!(slots[24], "12:00 PM");
        assert_eq!(slots[36], "1:00 PM");
    }

    #[test]
    fn membership_check_rejects_unknown_labels() {
        assert!(slot_exists("10:00 AM"));
        assert!(!slot_exists("10:03 AM"));
        assert!(!slot_exists("9:00 AM"));
        assert!(!slot_exists(""));
    }

    #[test]
    fn repeated_calls_return_identical_catalogs() {
        assert_eq!(all_slots(), all_slots());
    }
}
