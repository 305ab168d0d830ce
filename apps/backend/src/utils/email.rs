//! Email format validation for registration.

use lazy_regex::regex;

/// Check that an address has a local@domain.tld shape.
///
/// Accepts dotted local parts with the usual special characters and requires
/// at least one domain label plus an alphabetic TLD of 2 to 7 characters.
/// Uniqueness and deliverability are out of scope here; the confirmation
/// email is what proves ownership.
pub fn is_valid_email(email: &str) -> bool {
    regex!(r"^[A-Za-z0-9_+&*-]+(?:\.[A-Za-z0-9_+&*-]+)*@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,7}$")
        .is_match(email)
}
