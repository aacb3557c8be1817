//! Body-weight history, the weekly gym-day tracker and the daily supplement checklist.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "server")]
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "server", derive(FromRow))]
pub struct WeightEntry {
    pub id: Uuid,
    pub client_id: Uuid,
    pub weight: f64,
    pub logged_at: DateTime<Utc>,
}

/// Weight change between the first and the last entry, `None` below two entries.
pub fn weight_change(entries: &[WeightEntry]) -> Option<f64> {
    match entries {
        [first, .., last] => Some(last.weight - first.weight),
        _ => None,
    }
}

/// Monday-first week used by the gym-day tracker.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Short day name stored in `days_of_week.day_name`.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// An entry of the supplement checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supplement {
    pub id: &'static str,
    pub label: &'static str,
    pub dose: &'static str,
}

pub const SUPPLEMENTS: [Supplement; 4] = [
    Supplement { id: "creatina", label: "Creatine", dose: "5g" },
    Supplement { id: "omega3", label: "Omega 3", dose: "2 caps" },
    Supplement { id: "multivit", label: "Multivitamin", dose: "1 tab" },
    Supplement { id: "proteine", label: "Whey Protein", dose: "30g" },
];

/// Toggle `id` in the taken list, keeping the original order of the rest.
pub fn toggle_supplement(taken: &[String], id: &str) -> Vec<String> {
    if taken.iter().any(|s| s == id) {
        taken.iter().filter(|s| *s != id).cloned().collect()
    } else {
        let mut updated = taken.to_vec();
        updated.push(id.to_string());
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(weight: f64) -> WeightEntry {
        WeightEntry {
            id: Uuid::nil(),
            client_id: Uuid::nil(),
            weight,
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn weight_change_needs_two_entries() {
        assert_eq!(weight_change(&[]), None);
        assert_eq!(weight_change(&[entry(80.0)]), None);
        let change = weight_change(&[entry(80.0), entry(79.0), entry(78.5)]).unwrap();
        assert!((change + 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn toggling_a_supplement_adds_then_removes_it() {
        let taken = toggle_supplement(&[], "omega3");
        assert_eq!(taken, vec!["omega3".to_string()]);
        let taken = toggle_supplement(&taken, "creatina");
        assert_eq!(taken, vec!["omega3".to_string(), "creatina".to_string()]);
        let taken = toggle_supplement(&taken, "omega3");
        assert_eq!(taken, vec!["creatina".to_string()]);
    }

    #[test]
    fn week_starts_on_monday() {
        let names: Vec<_> = WEEK.iter().map(|d| day_name(*d)).collect();
        assert_eq!(names, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }
}
