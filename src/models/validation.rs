use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use super::{
    is_known_skill, ProfileSettings, RegistrationForm, ReviewForm, ServiceForm, ValidationError,
    ValidationResult,
};

/// Field-keyed validation messages; empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field` unless one is already present.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Fields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

/// Trait for validating submitted forms
pub trait Validate {
    /// Every failing field with its first failing rule.
    fn field_errors(&self) -> FieldErrors;

    fn validate(&self) -> ValidationResult<()> {
        self.field_errors().into_result()
    }
}

/// Validation constants
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MIN_REVIEW_COMMENT_LENGTH: usize = 10;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const MIN_TITLE_LENGTH: usize = 5;
pub const MIN_DESCRIPTION_LENGTH: usize = 50;
pub const MAX_TAGS: usize = 5;
pub const MAX_IMAGES: usize = 5;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

impl Validate for RegistrationForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.first_name.trim().is_empty() {
            errors.insert("first_name", "First name is required");
        }

        if self.last_name.trim().is_empty() {
            errors.insert("last_name", "Last name is required");
        }

        if let Err(message) = validate_email(&self.email) {
            errors.insert("email", message);
        }

        if let Err(message) = validate_password(&self.password) {
            errors.insert("password", message);
        }

        if self.password != self.confirm_password {
            errors.insert("confirm_password", "Passwords do not match");
        }

        if !self.agree_to_terms {
            errors.insert(
                "agree_to_terms",
                "You must agree to the terms and conditions",
            );
        }

        errors
    }
}

impl Validate for ReviewForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Err(message) = validate_rating(self.rating) {
            errors.insert("rating", message);
        }

        if self.comment.trim().chars().count() < MIN_REVIEW_COMMENT_LENGTH {
            errors.insert(
                "comment",
                "Please provide a comment of at least 10 characters",
            );
        }

        errors
    }
}

impl Validate for ServiceForm {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.title.trim().is_empty() {
            errors.insert("title", "Title is required");
        } else if self.title.chars().count() < MIN_TITLE_LENGTH {
            errors.insert("title", "Title must be at least 5 characters");
        }

        if self.category.is_empty() {
            errors.insert("category", "Category is required");
        }

        if self.subcategory.is_empty() {
            errors.insert("subcategory", "Subcategory is required");
        }

        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required");
        } else if self.description.chars().count() < MIN_DESCRIPTION_LENGTH {
            errors.insert(
                "description",
                "Description must be at least 50 characters",
            );
        }

        if let Err(message) = parse_price(&self.price) {
            errors.insert("price", message);
        }

        if let Err(message) = validate_tags(&self.tags) {
            errors.insert("tags", message);
        }

        if self.images.is_empty() {
            errors.insert("images", "At least one image is required");
        } else if self.images.len() > MAX_IMAGES {
            errors.insert("images", "Maximum 5 images allowed");
        }

        errors
    }
}

impl Validate for ProfileSettings {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.first_name.trim().is_empty() {
            errors.insert("first_name", "First name is required");
        }

        if self.last_name.trim().is_empty() {
            errors.insert("last_name", "Last name is required");
        }

        if let Err(message) = validate_email(&self.email) {
            errors.insert("email", message);
        }

        if self.title.trim().is_empty() {
            errors.insert("title", "Professional title is required");
        }

        if let Err(message) = validate_skills(&self.skills) {
            errors.insert("skills", message);
        }

        if self.hourly_rate.map_or(false, |rate| rate < Decimal::ZERO) {
            errors.insert("hourly_rate", "Hourly rate cannot be negative");
        }

        errors
    }
}

/// Validate an email address: required, then loosely shaped like `a@b.c`
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() {
        return Err("Email is required");
    }

    if !EMAIL_PATTERN.is_match(email) {
        return Err("Email is invalid");
    }

    Ok(())
}

/// Validate a password: required, then at least [`MIN_PASSWORD_LENGTH`] characters
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters");
    }

    Ok(())
}

/// Validate a star rating; zero means nothing was selected
pub fn validate_rating(rating: u8) -> Result<(), &'static str> {
    if rating == 0 {
        return Err("Please select a rating");
    }

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err("Rating must be between 1 and 5");
    }

    Ok(())
}

/// Parse the price field of the service form into a positive amount
pub fn parse_price(price: &str) -> Result<Decimal, &'static str> {
    let trimmed = price.trim();

    if trimmed.is_empty() {
        return Err("Price is required");
    }

    match Decimal::from_str(trimmed) {
        Ok(value) if value > Decimal::ZERO => Ok(value),
        _ => Err("Price must be a positive number"),
    }
}

/// Validate a tag list: 1 to [`MAX_TAGS`] distinct entries
pub fn validate_tags(tags: &[String]) -> Result<(), &'static str> {
    if tags.is_empty() {
        return Err("At least one tag is required");
    }

    if tags.len() > MAX_TAGS {
        return Err("Maximum 5 tags allowed");
    }

    let mut seen = HashSet::new();
    if !tags.iter().all(|tag| seen.insert(tag.trim())) {
        return Err("Tag already exists");
    }

    Ok(())
}

/// Every selected skill must come from the catalogue, at most once
pub fn validate_skills(skills: &[String]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for skill in skills {
        if !is_known_skill(skill) {
            return Err(format!("Unknown skill: {}", skill));
        }
        if !seen.insert(skill.as_str()) {
            return Err(format!("Skill selected twice: {}", skill));
        }
    }
    Ok(())
}
