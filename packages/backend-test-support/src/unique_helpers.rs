//! Test helpers for generating unique test data
//!
//! Random UUIDs keep registrations, comments, and events from colliding when
//! suites share a database.

use uuid::Uuid;

/// Generate a unique string with the given prefix.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("post");
/// let id2 = unique_str("post");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("post-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

/// Generate a unique email address with the given prefix.
///
/// Produced addresses are valid under the backend's registration check, so
/// they can flow through the register endpoint unchanged.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email1 = unique_email("student");
/// let email2 = unique_email("student");
/// assert_ne!(email1, email2);
/// assert!(email1.ends_with("@example.test"));
/// assert!(email1.starts_with("student-"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Uuid::new_v4().simple())
}
