//! # Form validation shared by the views and the server functions
//!
//! The browser runs these checks before calling the server so the user gets an inline message
//! without a round trip; the server runs them again because the client cannot be trusted.

use crate::models::{SignUpForm, SessionEntry};

/// Minimum password length accepted at sign-up and on password change.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Trim and lowercase an email, rejecting values without `@`.
pub fn normalize_email(email: &str) -> Result<String, String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err("Invalid email address".to_string());
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

pub fn validate_sign_up(form: &SignUpForm) -> Result<(), String> {
    if form.password != form.password_confirm {
        return Err("Passwords do not match".to_string());
    }
    normalize_email(&form.email)?;
    validate_password(&form.password)?;
    if form.first_name.trim().is_empty() || form.last_name.trim().is_empty() {
        return Err("First and last name are required".to_string());
    }
    Ok(())
}

/// Parse a weight typed by the user, accepting a decimal comma.
pub fn parse_weight(input: &str) -> Result<f64, String> {
    let value: f64 = input
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("Not a valid weight: {}", input.trim()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err("Weight must be greater than zero".to_string());
    }
    Ok(value)
}

/// Raw weight/reps text for one exercise of a workout session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionInput {
    pub weight: String,
    pub reps: String,
}

/// Turn the session form into entries. Every exercise needs a weight (decimal comma accepted,
/// zero for bodyweight) and a positive whole number of reps.
pub fn session_entries(
    exercises: &[(uuid::Uuid, SessionInput)],
) -> Result<Vec<SessionEntry>, String> {
    let incomplete = "Fill in weight and reps for every exercise before saving".to_string();
    exercises
        .iter()
        .map(|(exercise_id, input)| {
            if input.weight.trim().is_empty() || input.reps.trim().is_empty() {
                return Err(incomplete.clone());
            }
            let weight = input
                .weight
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w >= 0.0)
                .ok_or_else(|| format!("Not a valid weight: {}", input.weight.trim()))?;
            let reps = input
                .reps
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|r| *r > 0)
                .ok_or_else(|| format!("Reps must be a whole number: {}", input.reps.trim()))?;
            Ok(SessionEntry {
                exercise_id: *exercise_id,
                weight,
                reps,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use uuid::Uuid;

    fn form() -> SignUpForm {
        SignUpForm {
            email: " Mario@Example.com ".to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret1".to_string(),
            first_name: "Mario".to_string(),
            last_name: "Rossi".to_string(),
            phone: String::new(),
            role: Role::Client,
            fitness_goal: None,
        }
    }

    #[test]
    fn sign_up_checks_run_in_order() {
        assert_eq!(validate_sign_up(&form()), Ok(()));

        let mut f = form();
        f.password_confirm = "other".to_string();
        assert_eq!(validate_sign_up(&f), Err("Passwords do not match".to_string()));

        let mut f = form();
        f.password = "abc".to_string();
        f.password_confirm = "abc".to_string();
        assert!(validate_sign_up(&f).unwrap_err().contains("at least 6"));

        let mut f = form();
        f.last_name = "  ".to_string();
        assert!(validate_sign_up(&f).is_err());
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(
            normalize_email(" Mario@Example.com "),
            Ok("mario@example.com".to_string())
        );
        assert!(normalize_email("mario").is_err());
    }

    #[test]
    fn weights_accept_decimal_comma() {
        assert_eq!(parse_weight("72,5"), Ok(72.5));
        assert_eq!(parse_weight(" 80 "), Ok(80.0));
        assert!(parse_weight("abc").is_err());
        assert!(parse_weight("-3").is_err());
    }

    #[test]
    fn session_requires_every_field() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let filled = |w: &str, r: &str| SessionInput {
            weight: w.to_string(),
            reps: r.to_string(),
        };

        let entries = session_entries(&[(a, filled("60", "8")), (b, filled("22,5", "12"))]).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].weight, 22.5);
        assert_eq!(entries[1].reps, 12);

        assert!(session_entries(&[(a, filled("60", "8")), (b, filled("", "12"))]).is_err());
    }

    #[test]
    fn session_rejects_values_that_are_not_numbers() {
        let a = Uuid::from_u128(1);
        let filled = |w: &str, r: &str| SessionInput {
            weight: w.to_string(),
            reps: r.to_string(),
        };

        assert_eq!(
            session_entries(&[(a, filled("60kg", "8"))]),
            Err("Not a valid weight: 60kg".to_string())
        );
        assert_eq!(
            session_entries(&[(a, filled("60", "8.5"))]),
            Err("Reps must be a whole number: 8.5".to_string())
        );
        assert!(session_entries(&[(a, filled("60", "0"))]).is_err());

        let entries = session_entries(&[(a, filled("0", "15"))]).unwrap();
        assert_eq!(entries[0].weight, 0.0);
    }
}
