//! Regex scrapers for contact fields. Run on the raw resume text, before and
//! independently of the LLM, so contacts survive a failed structured parse.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+").expect("email pattern is valid")
});

/// Optional country code, then 9–10 digits with single space/dash separators.
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[\s-]?)?(?:\d[\s-]?){8,9}\d").expect("phone pattern is valid")
});

static LINKEDIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:www\.)?linkedin\.com/\S+").expect("linkedin pattern is valid")
});

static DATE_OF_BIRTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:DOB|Date of Birth)[:\s]*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})")
        .expect("date of birth pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub emails: Vec<String>,
    pub contact_numbers: Vec<String>,
    pub linkedin_url: Option<String>,
    pub date_of_birth: Option<String>,
}

pub fn extract_contacts(text: &str) -> ContactDetails {
    ContactDetails {
        emails: extract_emails(text),
        contact_numbers: extract_phone_numbers(text),
        linkedin_url: extract_linkedin(text),
        date_of_birth: extract_dob(text),
    }
}

/// Distinct email addresses, first occurrence order.
pub fn extract_emails(text: &str) -> Vec<String> {
    unique(EMAIL.find_iter(text).map(|m| m.as_str().to_string()))
}

/// Distinct phone numbers, trimmed, first occurrence order.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    unique(PHONE.find_iter(text).map(|m| m.as_str().trim().to_string()))
}

/// The first LinkedIn URL in the text.
pub fn extract_linkedin(text: &str) -> Option<String> {
    LINKEDIN.find(text).map(|m| m.as_str().to_string())
}

/// A date following a "DOB" or "Date of Birth" label, as written.
pub fn extract_dob(text: &str) -> Option<String> {
    DATE_OF_BIRTH
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn unique(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}
