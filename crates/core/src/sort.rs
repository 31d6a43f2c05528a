//! Sort engine.
//!
//! Single-key, stable sort. Records without a value for the key always go
//! last; `desc` reverses only the comparison of present values.
//! Creation times compare chronologically, every other field compares as
//! text with [`locale_cmp`].

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::automation::{Automation, AutomationField, FieldValue};
use crate::query::SortOrder;

/// Sort `records` in place by the field named `sort_by`.
///
/// No key, or a name that is not a record field, leaves the order untouched.
pub fn sort_records(records: &mut [Automation], sort_by: Option<&str>, order: SortOrder) {
    let Some(field) = sort_by.and_then(AutomationField::from_name) else {
        return;
    };
    // `sort_by` is stable, so ties keep their input order.
    records.sort_by(|a, b| compare_fields(a.field(field), b.field(field), order));
}

fn compare_fields(a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>, order: SortOrder) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = compare_values(a, b);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
    }
}

fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Time(a), FieldValue::Time(b)) => a.cmp(&b),
        (FieldValue::Text(a), FieldValue::Text(b)) => locale_cmp(a, b),
        (FieldValue::Time(_), FieldValue::Text(_)) => Ordering::Less,
        (FieldValue::Text(_), FieldValue::Time(_)) => Ordering::Greater,
    }
}

/// Locale-style string ordering.
///
/// Compares in tiers, the way a collator does:
///
/// 1. Base letters, ignoring case and diacritics (`é` sorts with `e`).
/// 2. Diacritics (`e` before `é`).
/// 3. Case, lowercase first (`a` before `A`).
///
/// Falls back to code-point order so distinct strings never compare equal.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_pattern(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().map(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn named(id: &str, name: Option<&str>) -> Automation {
        Automation {
            id: id.into(),
            name: name.map(str::to_owned),
            kind: None,
            creation_time: None,
            status: None,
        }
    }

    fn created(id: &str, year: i32, month: u32, day: u32) -> Automation {
        Automation {
            creation_time: Some(chrono::Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()),
            ..named(id, None)
        }
    }

    fn names(records: &[Automation]) -> Vec<Option<&str>> {
        records.iter().map(|r| r.name.as_deref()).collect()
    }

    fn ids(records: &[Automation]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn sorts_names_ascending() {
        let mut records = vec![
            named("1", Some("Test Automation 1")),
            named("2", Some("Test Automation 2")),
            named("3", Some("Another Test")),
        ];
        sort_records(&mut records, Some("name"), SortOrder::Asc);
        assert_eq!(
            names(&records),
            [
                Some("Another Test"),
                Some("Test Automation 1"),
                Some("Test Automation 2")
            ]
        );
    }

    #[test]
    fn sorts_names_descending() {
        let mut records = vec![
            named("1", Some("Test Automation 1")),
            named("2", Some("Test Automation 2")),
            named("3", Some("Another Test")),
        ];
        sort_records(&mut records, Some("name"), SortOrder::Desc);
        assert_eq!(ids(&records), ["2", "1", "3"]);
    }

    #[test]
    fn no_sort_key_keeps_input_order() {
        let mut records = vec![named("b", Some("b")), named("a", Some("a"))];
        sort_records(&mut records, None, SortOrder::Desc);
        assert_eq!(ids(&records), ["b", "a"]);
    }

    #[test]
    fn unknown_sort_key_is_a_no_op() {
        let mut records = vec![named("b", Some("b")), named("a", Some("a"))];
        sort_records(&mut records, Some("owner"), SortOrder::Asc);
        assert_eq!(ids(&records), ["b", "a"]);
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let mut records = vec![
                named("1", None),
                named("2", Some("beta")),
                named("3", None),
                named("4", Some("alpha")),
            ];
            sort_records(&mut records, Some("name"), order);
            assert_eq!(names(&records)[2..], [None, None], "order {order:?}");
            assert_eq!(ids(&records)[2..], ["1", "3"], "missing values stay stable");
        }
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let mut records = vec![
                named("1", Some("same")),
                named("2", Some("other")),
                named("3", Some("same")),
                named("4", Some("same")),
            ];
            sort_records(&mut records, Some("name"), order);
            let same: Vec<&str> = records
                .iter()
                .filter(|r| r.name.as_deref() == Some("same"))
                .map(|r| r.id.as_str())
                .collect();
            assert_eq!(same, ["1", "3", "4"]);
        }
    }

    #[test]
    fn creation_time_sorts_chronologically() {
        let mut records = vec![
            created("late", 2024, 1, 1),
            created("early", 2022, 12, 31),
            created("mid", 2023, 6, 15),
        ];
        sort_records(&mut records, Some("creationTime"), SortOrder::Asc);
        assert_eq!(ids(&records), ["early", "mid", "late"]);

        sort_records(&mut records, Some("creationTime"), SortOrder::Desc);
        assert_eq!(ids(&records), ["late", "mid", "early"]);
    }

    #[test]
    fn locale_cmp_ignores_case_at_first_level() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
    }

    #[test]
    fn locale_cmp_groups_diacritics_with_base_letter() {
        assert_eq!(locale_cmp("élan", "fable"), Ordering::Less);
        assert_eq!(locale_cmp("elan", "élan"), Ordering::Less);
        assert_eq!(locale_cmp("résumé", "résumé"), Ordering::Equal);
    }
}
