//! Storage keys of the mirrored collections.
//!
//! | Key | Holds |
//! |-----|-------|
//! | `exercises_<client id>` | Exercises of the athlete's active workout plan |
//! | `diet_<client id>` | Items of the athlete's active diet plan |
//! | `supps_<YYYY-MM-DD>` | Supplement ids ticked on that day |

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MirrorKey(String);

impl MirrorKey {
    pub fn exercises(client_id: impl fmt::Display) -> Self {
        Self(format!("exercises_{client_id}"))
    }

    pub fn diet(client_id: impl fmt::Display) -> Self {
        Self(format!("diet_{client_id}"))
    }

    pub fn supplements(date: impl fmt::Display) -> Self {
        Self(format!("supps_{date}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MirrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_collection_prefixes() {
        assert_eq!(MirrorKey::exercises("abc").as_str(), "exercises_abc");
        assert_eq!(MirrorKey::diet(42).to_string(), "diet_42");
        assert_eq!(MirrorKey::supplements("2025-03-01").as_str(), "supps_2025-03-01");
    }
}
