//! # Accounts, identities and profiles
//!
//! Three representations of a signed-up person:
//!
//! ## [`Account`] (server only)
//!
//! The row in the `accounts` table: `id`, `email`, the Argon2 `password_hash` and audit
//! timestamps. It never leaves the server; [`Account::to_identity`] projects it into an
//! [`Identity`].
//!
//! ## [`Identity`]
//!
//! The authenticated principal as seen by the client: just the id and the email. The session
//! provider mirrors it read-only.
//!
//! ## [`Profile`]
//!
//! The application record in `user_profiles`, one per identity, carrying the [`Role`] that
//! decides which dashboard and which guarded routes the user may reach. The role is written at
//! sign-up and never updated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;

/// The two kinds of account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Trainer,
}

impl Role {
    /// Value stored in `user_profiles.user_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Trainer => "trainer",
        }
    }

    /// Human-facing name of the role.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Client => "athlete",
            Role::Trainer => "trainer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `user_type` value that is neither `client` nor `trainer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "trainer" => Ok(Role::Trainer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Full account record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl Account {
    /// Convert to Identity for client consumption.
    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// The signed-in principal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

/// Application-level record for an identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "server", derive(FromRow))]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    #[cfg_attr(feature = "server", sqlx(rename = "user_type", try_from = "String"))]
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
}

impl Profile {
    /// First and last name, or the email when both are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

/// Returned by a successful sign-in or sign-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignedIn {
    pub identity: Identity,
    pub role: Role,
}

/// Training objective picked by a client at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseFat,
    GainMuscle,
    Tone,
    Endurance,
    AthleticPrep,
    Rehabilitation,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 6] = [
        FitnessGoal::LoseFat,
        FitnessGoal::GainMuscle,
        FitnessGoal::Tone,
        FitnessGoal::Endurance,
        FitnessGoal::AthleticPrep,
        FitnessGoal::Rehabilitation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::LoseFat => "lose_fat",
            FitnessGoal::GainMuscle => "gain_muscle",
            FitnessGoal::Tone => "tone",
            FitnessGoal::Endurance => "endurance",
            FitnessGoal::AthleticPrep => "athletic_prep",
            FitnessGoal::Rehabilitation => "rehabilitation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitnessGoal::LoseFat => "Lose body fat",
            FitnessGoal::GainMuscle => "Build muscle",
            FitnessGoal::Tone => "Toning",
            FitnessGoal::Endurance => "Improve endurance",
            FitnessGoal::AthleticPrep => "Athletic preparation",
            FitnessGoal::Rehabilitation => "Functional rehabilitation",
        }
    }

    /// Label for a stored goal value, passing unknown values through.
    pub fn label_for(value: &str) -> String {
        Self::ALL
            .iter()
            .find(|g| g.as_str() == value)
            .map(|g| g.label().to_string())
            .unwrap_or_else(|| value.to_string())
    }
}

/// Registration form as submitted by the register page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
    pub fitness_goal: Option<FitnessGoal>,
}

/// Editable subset of a profile. The role is deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_stored_value() {
        assert_eq!("client".parse::<Role>(), Ok(Role::Client));
        assert_eq!(Role::try_from("trainer".to_string()), Ok(Role::Trainer));
        assert_eq!(
            "admin".parse::<Role>(),
            Err(UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut profile = Profile {
            id: Uuid::nil(),
            email: "mario@example.com".to_string(),
            role: Role::Client,
            first_name: "Mario".to_string(),
            last_name: "Rossi".to_string(),
            phone: String::new(),
            bio: None,
            profile_image_url: None,
        };
        assert_eq!(profile.display_name(), "Mario Rossi");

        profile.first_name = " ".to_string();
        profile.last_name = String::new();
        assert_eq!(profile.display_name(), "mario@example.com");
    }

    #[test]
    fn goal_labels_pass_unknown_values_through() {
        assert_eq!(FitnessGoal::label_for("tone"), "Toning");
        assert_eq!(FitnessGoal::label_for("yoga"), "yoga");
    }
}
