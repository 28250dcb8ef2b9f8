//! Field rules for movie records, shared by the API service and the client.
//!
//! Every rule reports a user-facing message; the server joins them into its
//! 400 body and the form screens show them next to the offending field.

use std::fmt;

use url::Url;

use crate::models::{MovieDraft, MovieInput, YearInput};

/// The first year a motion picture was recorded.
pub const MIN_YEAR: i32 = 1888;

const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Description,
    Year,
    Image,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn for_field(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(FieldError { field, message });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(err.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub fn current_year() -> i32 {
    i32::from(jiff::Zoned::now().year())
}

pub fn validate(input: &MovieInput) -> Result<MovieDraft, ValidationErrors> {
    validate_at(input, current_year())
}

/// Checks `input` against the movie field rules with `current_year` as the
/// upper bound for `year`.
pub fn validate_at(input: &MovieInput, current_year: i32) -> Result<MovieDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = required_text(input.name.as_deref());
    if name.is_none() {
        errors.push(Field::Name, "Movie name is required");
    }

    let description = required_text(input.description.as_deref());
    if description.is_none() {
        errors.push(Field::Description, "Description is required");
    }

    let year = match check_year(input.year.as_ref(), current_year) {
        Ok(year) => Some(year),
        Err(message) => {
            errors.push(Field::Year, message);
            None
        },
    };

    let image = match required_text(input.image.as_deref()) {
        None => {
            errors.push(Field::Image, "Image URL is required");
            None
        },
        Some(image) if !is_valid_url(image.trim()) => {
            errors.push(Field::Image, "Must be a valid URL");
            None
        },
        Some(image) => Some(image),
    };

    match (name, description, year, image) {
        (Some(name), Some(description), Some(year), Some(image)) if errors.is_empty() => {
            Ok(MovieDraft {
                name: name.to_string(),
                description: description.to_string(),
                year,
                image: image.to_string(),
            })
        },
        _ => Err(errors),
    }
}

pub fn validate_draft(draft: &MovieDraft) -> Result<MovieDraft, ValidationErrors> {
    validate(&MovieInput::from(draft))
}

/// Present and not blank. The value itself is kept as sent.
fn required_text(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

const NOT_WHOLE: &str = "Year must be a whole number";

fn whole_number(value: f64) -> Option<i64> {
    // Beyond this range the year check rejects the value anyway.
    (value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15).then_some(value as i64)
}

fn check_year(value: Option<&YearInput>, current_year: i32) -> Result<i32, &'static str> {
    let year = match value {
        None => return Err("Year is required"),
        Some(YearInput::Number(n)) => *n,
        Some(YearInput::Float(f)) => whole_number(*f).ok_or(NOT_WHOLE)?,
        Some(YearInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Err("Year is required");
            }
            match text.parse::<i64>() {
                Ok(n) => n,
                Err(_) => text.parse::<f64>().ok().and_then(whole_number).ok_or(NOT_WHOLE)?,
            }
        },
        Some(YearInput::Other(_)) => return Err(NOT_WHOLE),
    };

    if year < i64::from(MIN_YEAR) {
        return Err("Year must be after 1888");
    }
    if year > i64::from(current_year) {
        return Err("Year cannot be in the future");
    }
    // Bounded by the checks above.
    Ok(year as i32)
}

pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            URL_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty())
        },
        Err(_) => false,
    }
}
