//! Canonicalization of match identifiers.
//!
//! Every function here normalizes one identifier type into the single
//! canonical representation the remote matching service hashes on its own
//! side. The rules must stay bit-exact with that service: case folding is
//! locale-independent, Gmail addresses collapse their dot variants, and
//! honorific prefixes / generational suffixes are stripped from names.
//!
//! All functions are pure and keep no state; patterns are compiled once
//! into process-wide statics.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::InvalidInput;

// Pre-compiled patterns for name normalization.
static GIVEN_NAME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:mr|mrs|ms|dr)\.(?:\s|$)").unwrap());

static FAMILY_NAME_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:,\s*|\s+)(?:jr\.|sr\.|2nd|3rd|ii|iii|iv|v|vi|cpa|dc|dds|vm|jd|md|phd)\s?$")
        .unwrap()
});

/// One raw match identifier, tagged by type.
///
/// Created per input record and discarded after processing. Canonicalization
/// dispatches on the variant; see the per-type functions for the exact rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    EmailAddress(String),
    PhoneNumber(String),
    GivenName(String),
    FamilyName(String),
    RegionCode(String),
    PostalCode(String),
}

impl Identifier {
    /// Canonicalize the wrapped value according to its variant's rules.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] when the value is blank or fails the
    /// variant-specific structural rule.
    pub fn canonicalize(&self) -> Result<String, InvalidInput> {
        match self {
            Identifier::EmailAddress(raw) => format_email_address(raw),
            Identifier::PhoneNumber(raw) => format_phone_number(raw),
            Identifier::GivenName(raw) => format_given_name(raw),
            Identifier::FamilyName(raw) => format_family_name(raw),
            Identifier::RegionCode(raw) => format_region_code(raw),
            Identifier::PostalCode(raw) => format_postal_code(raw),
        }
    }
}

/// Canonicalize an email address.
///
/// Trims, rejects any remaining whitespace, lowercases (locale-free), and
/// splits on the first `@` into a non-empty user and domain. For
/// `gmail.com` / `googlemail.com` domains, every `.` in the user part is
/// removed, since Gmail treats dot variants as the same mailbox.
///
/// # Errors
///
/// Returns [`InvalidInput`] for a blank value, internal whitespace, a
/// missing user or domain, or a user part that becomes empty.
pub fn format_email_address(email: &str) -> Result<String, InvalidInput> {
    let email = email.trim();
    if email.is_empty() {
        return Err(InvalidInput::Blank);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(InvalidInput::EmailContainsWhitespace);
    }
    let email = email.to_lowercase();
    let (user, domain) = email.split_once('@').ok_or(InvalidInput::EmailMalformed)?;
    if user.is_empty() || domain.is_empty() {
        return Err(InvalidInput::EmailMalformed);
    }

    let user = if domain == "gmail.com" || domain == "googlemail.com" {
        user.replace('.', "")
    } else {
        user.to_owned()
    };
    if user.is_empty() {
        return Err(InvalidInput::EmailUserEmpty);
    }

    Ok(format!("{user}@{domain}"))
}

/// Canonicalize a phone number.
///
/// Strips every non-digit character and prepends `+`. Deliberately
/// permissive: digit count and country-code plausibility are not checked,
/// so any input containing at least one digit canonicalizes successfully.
///
/// # Errors
///
/// Returns [`InvalidInput`] for a blank value or one with no digits.
pub fn format_phone_number(phone: &str) -> Result<String, InvalidInput> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(InvalidInput::Blank);
    }
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(InvalidInput::PhoneWithoutDigits);
    }
    Ok(format!("+{digits}"))
}

/// Canonicalize a given name.
///
/// Lowercases and removes honorific prefixes (`mr.`, `mrs.`, `ms.`, `dr.`)
/// wherever they are followed by whitespace or end the string — so a
/// trailing `"Dr."` is stripped as well.
///
/// # Errors
///
/// Returns [`InvalidInput`] for a blank value or a name that consists
/// solely of a prefix.
pub fn format_given_name(name: &str) -> Result<String, InvalidInput> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InvalidInput::Blank);
    }
    let name = name.to_lowercase();
    let stripped = GIVEN_NAME_PREFIX.replace_all(&name, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return Err(InvalidInput::GivenNamePrefixOnly);
    }
    Ok(stripped.to_owned())
}

/// Canonicalize a family name.
///
/// Lowercases and strips trailing generational/professional suffixes
/// (`jr.`, `sr.`, `2nd`, `iii`, `dds`, `md`, `phd`, …), looping so that
/// compound suffixes such as `", Jr., DDS"` are removed one at a time.
///
/// # Errors
///
/// Returns [`InvalidInput`] for a blank value or a name that consists
/// solely of suffixes.
pub fn format_family_name(name: &str) -> Result<String, InvalidInput> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InvalidInput::Blank);
    }
    let mut name = name.to_lowercase();
    while FAMILY_NAME_SUFFIX.is_match(&name) {
        name = FAMILY_NAME_SUFFIX.replace_all(&name, "").into_owned();
    }
    if name.is_empty() {
        return Err(InvalidInput::FamilyNameSuffixOnly);
    }
    Ok(name)
}

/// Canonicalize a region code.
///
/// Uppercases and requires exactly two characters in `A`–`Z`, per
/// ISO 3166-1 alpha-2.
///
/// # Errors
///
/// Returns [`InvalidInput`] for a blank value, a length other than 2, or
/// non-alpha content.
pub fn format_region_code(code: &str) -> Result<String, InvalidInput> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(InvalidInput::Blank);
    }
    let len = code.chars().count();
    if len != 2 {
        return Err(InvalidInput::RegionCodeLength(len));
    }
    if !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(InvalidInput::RegionCodeNonAlpha);
    }
    Ok(code)
}

/// Canonicalize a postal code: trim only, no case change.
///
/// # Errors
///
/// Returns [`InvalidInput`] for a blank value.
pub fn format_postal_code(code: &str) -> Result<String, InvalidInput> {
    let code = code.trim();
    if code.is_empty() {
        return Err(InvalidInput::Blank);
    }
    Ok(code.to_owned())
}
