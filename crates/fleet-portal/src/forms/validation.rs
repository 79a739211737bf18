use std::collections::BTreeMap;
use std::fmt;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid phone number";

/// Per-field annotations produced by a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    entries: BTreeMap<F, &'static str>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: F) -> Option<&'static str> {
        self.entries.get(&field).copied()
    }

    pub fn insert(&mut self, field: F, message: &'static str) {
        self.entries.insert(field, message);
    }

    pub fn clear(&mut self, field: F) {
        self.entries.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &'static str)> + '_ {
        self.entries.iter().map(|(field, message)| (*field, *message))
    }

    /// Required-field check: empty after trimming fails.
    pub fn require(&mut self, field: F, value: &str) -> bool {
        if value.trim().is_empty() {
            self.insert(field, REQUIRED_MESSAGE);
            false
        } else {
            true
        }
    }

    /// Required email: presence first, then format.
    pub fn require_email(&mut self, field: F, value: &str) {
        if self.require(field, value) && !is_valid_email(value.trim()) {
            self.insert(field, INVALID_EMAIL_MESSAGE);
        }
    }

    /// Required phone: presence first, then digit count.
    pub fn require_phone(&mut self, field: F, value: &str) {
        if self.require(field, value) && !super::phone::is_valid_phone(value) {
            self.insert(field, INVALID_PHONE_MESSAGE);
        }
    }
}

impl<F: Ord + Copy + fmt::Display> fmt::Display for FieldErrors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, a non-empty local part,
/// and a domain with text on both sides of some dot.
pub fn is_valid_email(raw: &str) -> bool {
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .filter(|(_, ch)| *ch == '.')
        .any(|(index, _)| index > 0 && index + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_requires_local_part_and_dotted_domain() {
        assert!(is_valid_email("foo@bar.com"));
        assert!(is_valid_email("driver.one@mail.fleet.co"));
        assert!(!is_valid_email("foo"));
        assert!(!is_valid_email("@bar.com"));
        assert!(!is_valid_email("foo@bar"));
        assert!(!is_valid_email("foo@.com"));
        assert!(!is_valid_email("foo@bar."));
        assert!(!is_valid_email("foo@@bar.com"));
        assert!(!is_valid_email("foo bar@baz.com"));
    }

    #[test]
    fn require_flags_whitespace_only_values() {
        let mut errors = FieldErrors::default();
        assert!(!errors.require("name", "   "));
        assert_eq!(errors.get("name"), Some(REQUIRED_MESSAGE));
        assert!(errors.require("other", " x "));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn presence_is_reported_before_format() {
        let mut errors = FieldErrors::default();
        errors.require_email("email", "");
        errors.require_phone("phone", "5551234");
        assert_eq!(errors.get("email"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.get("phone"), Some(INVALID_PHONE_MESSAGE));
    }
}
