use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

use super::spam;
use crate::config::Config;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Contact form validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContactError {
    #[error("Name is required")]
    MissingName,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Message is required")]
    MissingMessage,

    #[error("Submission rejected as spam (score {score})")]
    SuspectedSpam { score: u8 },

    #[error("Contact delivery not configured: set REPLY_TO_EMAIL and SMTP_USERNAME")]
    NotConfigured,
}

/// A contact form submission as posted by the browser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub project: Option<String>,
}

/// An outgoing notification ready for a mail transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

impl ContactSubmission {
    fn project(&self) -> Option<&str> {
        self.project
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingName);
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ContactError::InvalidEmail(self.email.clone()));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingMessage);
        }

        let score = spam::name_spam_score(&self.name);
        if spam::should_block(&self.name) {
            warn!("Blocked contact submission from {:?} (score {})", self.name, score);
            return Err(ContactError::SuspectedSpam { score });
        }
        Ok(())
    }

    pub fn subject(&self) -> String {
        let name = self.name.trim();
        match self.project() {
            Some(project) => format!("Contact Form: {} - {}", name, project),
            None => format!("Contact Form: {}", name),
        }
    }

    /// Validate and address the submission; replies go to the submitter
    pub fn into_message(self, from: &str, to: &str) -> Result<ContactMessage, ContactError> {
        self.validate()?;

        let mut body = format!("Name: {}\nEmail: {}\n", self.name.trim(), self.email.trim());
        if let Some(project) = self.project() {
            body.push_str(&format!("Project: {}\n", project));
        }
        body.push('\n');
        body.push_str(self.message.trim());

        Ok(ContactMessage {
            from: from.to_string(),
            to: to.to_string(),
            reply_to: self.email.trim().to_string(),
            subject: self.subject(),
            body,
        })
    }

    /// Address the submission with the sender and inbox from `config`
    pub fn into_configured_message(self, config: &Config) -> Result<ContactMessage, ContactError> {
        let (Some(from), Some(to)) = (&config.contact_from_email, &config.contact_to_email) else {
            return Err(ContactError::NotConfigured);
        };
        self.into_message(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            project: None,
        }
    }

    #[test]
    fn test_valid_submission() {
        let form = submission("John Smith", "john@example.com", "Mix my EP?");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(
            submission(" ", "john@example.com", "hi").validate(),
            Err(ContactError::MissingName)
        );
        assert_eq!(
            submission("John", "john@example.com", "").validate(),
            Err(ContactError::MissingMessage)
        );
        assert!(matches!(
            submission("John", "not-an-email", "hi").validate(),
            Err(ContactError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_spam_names_rejected() {
        let result = submission("xKqZpWvRtYmLbNc", "bot@example.com", "buy now").validate();
        assert!(matches!(result, Err(ContactError::SuspectedSpam { score }) if score >= 6));
    }

    #[test]
    fn test_subject_includes_project() {
        let mut form = submission("Maria", "maria@example.com", "hello");
        assert_eq!(form.subject(), "Contact Form: Maria");
        form.project = Some("Mixing".to_string());
        assert_eq!(form.subject(), "Contact Form: Maria - Mixing");
        form.project = Some("  ".to_string());
        assert_eq!(form.subject(), "Contact Form: Maria");
    }

    #[test]
    fn test_into_configured_message() {
        let config = Config {
            contact_from_email: Some("site@example.com".to_string()),
            contact_to_email: Some("inbox@example.com".to_string()),
            ..Config::default()
        };
        let message = submission("Maria", "maria@example.com", "hello")
            .into_configured_message(&config)
            .unwrap();
        assert_eq!(message.from, "site@example.com");
        assert_eq!(message.to, "inbox@example.com");

        let result = submission("Maria", "maria@example.com", "hello")
            .into_configured_message(&Config::default());
        assert_eq!(result, Err(ContactError::NotConfigured));
    }

    #[test]
    fn test_into_message() {
        let mut form = submission("Maria", "maria@example.com", "Let's work together");
        form.project = Some("Production".to_string());

        let message = form
            .into_message("site@example.com", "inbox@example.com")
            .unwrap();
        assert_eq!(message.reply_to, "maria@example.com");
        assert_eq!(message.to, "inbox@example.com");
        assert_eq!(message.subject, "Contact Form: Maria - Production");
        assert!(message.body.starts_with("Name: Maria\nEmail: maria@example.com\nProject: Production\n\n"));
        assert!(message.body.ends_with("Let's work together"));
    }
}
