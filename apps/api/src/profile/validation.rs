//! Field-level validators for profile data. Pure functions returning
//! `FieldError`s; handlers collect them and reject the request as a batch.

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::FieldError;
use crate::profile::models::{CareerGoals, Interest, Preferences, Skill};

pub const GENDERS: &[&str] = &["male", "female", "other", "prefer-not-to-say"];
pub const EDUCATION_LEVELS: &[&str] = &[
    "10th",
    "12th",
    "undergraduate",
    "postgraduate",
    "phd",
    "working",
];
pub const STREAMS: &[&str] = &[
    "science",
    "commerce",
    "arts",
    "engineering",
    "medical",
    "other",
];
pub const SKILL_LEVELS: &[&str] = &["beginner", "intermediate", "advanced", "expert"];
pub const SKILL_CATEGORIES: &[&str] = &["technical", "soft", "language", "domain-specific"];
pub const INTEREST_CATEGORIES: &[&str] = &[
    "technology",
    "business",
    "arts",
    "science",
    "healthcare",
    "education",
    "finance",
    "media",
    "sports",
    "other",
];
pub const WORK_ENVIRONMENTS: &[&str] = &["remote", "office", "hybrid", "field-work"];
pub const WORK_SCHEDULES: &[&str] = &["flexible", "fixed", "shift-based"];
pub const TEAM_SIZES: &[&str] = &["small", "medium", "large", "no-preference"];

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[6-9]\d{9}$").expect("valid phone regex"))
}

fn pincode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{6}$").expect("valid pincode regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+$").expect("valid email regex"))
}

pub fn validate_name(name: &str) -> Option<FieldError> {
    let len = name.trim().chars().count();
    if !(2..=50).contains(&len) {
        return Some(FieldError::new(
            "name",
            "Name must be between 2 and 50 characters",
        ));
    }
    None
}

pub fn validate_email(email: &str) -> Option<FieldError> {
    if !email_re().is_match(email.trim()) {
        return Some(FieldError::new("email", "Please enter a valid email"));
    }
    None
}

pub fn validate_phone(phone: &str) -> Option<FieldError> {
    if !phone_re().is_match(phone) {
        return Some(FieldError::new(
            "phone",
            "Please enter a valid Indian phone number",
        ));
    }
    None
}

pub fn validate_pincode(pincode: &str) -> Option<FieldError> {
    if !pincode_re().is_match(pincode) {
        return Some(FieldError::new(
            "location.pincode",
            "Please enter a valid 6-digit pincode",
        ));
    }
    None
}

/// Checks `value` against a fixed enumeration.
pub fn validate_enum(field: &str, value: &str, allowed: &[&str]) -> Option<FieldError> {
    if !allowed.contains(&value) {
        return Some(FieldError::new(
            field,
            format!("'{value}' is not one of: {}", allowed.join(", ")),
        ));
    }
    None
}

pub fn validate_skills(skills: &[Skill]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (i, skill) in skills.iter().enumerate() {
        if skill.name.trim().is_empty() {
            errors.push(FieldError::new(
                &format!("skills[{i}].name"),
                "Skill name is required",
            ));
        }
        if let Some(e) = validate_enum(&format!("skills[{i}].level"), &skill.level, SKILL_LEVELS) {
            errors.push(e);
        }
        if let Some(e) = validate_enum(
            &format!("skills[{i}].category"),
            &skill.category,
            SKILL_CATEGORIES,
        ) {
            errors.push(e);
        }
    }
    errors
}

pub fn validate_interests(interests: &[Interest]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (i, interest) in interests.iter().enumerate() {
        if let Some(e) = validate_enum(
            &format!("interests[{i}].category"),
            &interest.category,
            INTEREST_CATEGORIES,
        ) {
            errors.push(e);
        }
    }
    errors
}

pub fn validate_career_goals(goals: &CareerGoals) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (field, text) in [
        ("careerGoals.shortTerm", &goals.short_term),
        ("careerGoals.longTerm", &goals.long_term),
    ] {
        if let Some(text) = text {
            if text.chars().count() > 500 {
                errors.push(FieldError::new(field, "Goal cannot exceed 500 characters"));
            }
        }
    }
    if let Some(salary) = &goals.salary_expectation {
        if salary.min < 0 || salary.max < 0 {
            errors.push(FieldError::new(
                "careerGoals.salaryExpectation",
                "Salary must be a positive number",
            ));
        } else if salary.min > salary.max {
            errors.push(FieldError::new(
                "careerGoals.salaryExpectation",
                "Minimum salary cannot exceed maximum",
            ));
        }
    }
    errors
}

pub fn validate_preferences(prefs: &Preferences) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(v) = &prefs.work_environment {
        if let Some(e) = validate_enum("preferences.workEnvironment", v, WORK_ENVIRONMENTS) {
            errors.push(e);
        }
    }
    if let Some(v) = &prefs.work_schedule {
        if let Some(e) = validate_enum("preferences.workSchedule", v, WORK_SCHEDULES) {
            errors.push(e);
        }
    }
    if let Some(v) = &prefs.team_size {
        if let Some(e) = validate_enum("preferences.teamSize", v, TEAM_SIZES) {
            errors.push(e);
        }
    }
    errors
}

pub fn validate_year_of_passing(year: i32) -> Option<FieldError> {
    let current_year = chrono::Utc::now().format("%Y").to_string().parse::<i32>().unwrap_or(2026);
    if !(1950..=current_year + 5).contains(&year) {
        return Some(FieldError::new(
            "education.yearOfPassing",
            "Please enter a valid year",
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_indian_phone_passes() {
        assert!(validate_phone("9876543210").is_none());
        assert!(validate_phone("6123456789").is_none());
    }

    #[test]
    fn invalid_phone_fails() {
        assert!(validate_phone("1234567890").is_some()); // leading 1
        assert!(validate_phone("98765").is_some()); // too short
        assert!(validate_phone("98765432101").is_some()); // too long
        assert!(validate_phone("98765abcde").is_some());
    }

    #[test]
    fn pincode_must_be_six_digits() {
        assert!(validate_pincode("560001").is_none());
        assert!(validate_pincode("5600").is_some());
        assert!(validate_pincode("56000a").is_some());
    }

    #[test]
    fn email_formats() {
        assert!(validate_email("student@example.com").is_none());
        assert!(validate_email("a.b+c@uni.ac.in").is_none());
        assert!(validate_email("not-an-email").is_some());
        assert!(validate_email("missing@tld").is_some());
    }

    #[test]
    fn name_length_bounds() {
        assert!(validate_name("Ar").is_none());
        assert!(validate_name("A").is_some());
        assert!(validate_name(&"x".repeat(51)).is_some());
    }

    #[test]
    fn skill_enums_enforced() {
        let skills = vec![Skill {
            name: "Python".into(),
            level: "wizard".into(),
            category: "technical".into(),
        }];
        let errors = validate_skills(&skills);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "skills[0].level");
    }

    #[test]
    fn career_goal_length_and_salary_order() {
        let goals = CareerGoals {
            short_term: Some("y".repeat(501)),
            salary_expectation: Some(crate::profile::models::SalaryExpectation {
                min: 800_000,
                max: 400_000,
                currency: "INR".into(),
            }),
            ..Default::default()
        };
        let errors = validate_career_goals(&goals);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn preferences_enums() {
        let prefs = Preferences {
            work_environment: Some("underwater".into()),
            work_schedule: Some("flexible".into()),
            team_size: None,
        };
        let errors = validate_preferences(&prefs);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "preferences.workEnvironment");
    }
}
