use std::collections::HashSet;

/// Key of the `config` entry that holds the commissioner allow-list.
pub const COMMISSIONER_EMAILS_KEY: &str = "commissioner_emails";

/// The set of emails allowed to run commissioner-only operations.
///
/// Built from a single comma-separated config value. Entries are trimmed
/// and lowercased, so lookups ignore case and surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct Commissioners {
    emails: HashSet<String>,
}

impl Commissioners {
    /// # Examples
    ///
    /// ```
    /// use league::models::Commissioners;
    ///
    /// let commissioners = Commissioners::from_comma_separated(" Ann@Example.com ,bob@example.com");
    /// assert!(commissioners.contains("ann@example.com"));
    /// assert!(commissioners.contains("  BOB@example.com"));
    /// assert!(!commissioners.contains("carol@example.com"));
    /// ```
    pub fn from_comma_separated(emails: &str) -> Self {
        let emails = emails
            .split(',')
            .map(normalize_email)
            .filter(|s| !s.is_empty())
            .collect();

        Self { emails }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&normalize_email(email))
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
