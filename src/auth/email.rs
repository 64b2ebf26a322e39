// Registration confirmation emails

use async_trait::async_trait;

/// Failure reported by an email notifier
#[derive(Debug, thiserror::Error)]
#[error("email delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Sends the confirmation email after a successful registration
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send(&self, recipient_email: &str, display_name: &str) -> Result<(), NotifyError>;
}

/// Notifier that records confirmations in the log instead of delivering mail
#[derive(Debug, Default, Clone)]
pub struct LogEmailNotifier;

#[async_trait]
impl EmailNotifier for LogEmailNotifier {
    async fn send(&self, recipient_email: &str, display_name: &str) -> Result<(), NotifyError> {
        tracing::info!(
            recipient = recipient_email,
            "Confirmation email for {}: welcome aboard",
            display_name
        );
        Ok(())
    }
}

/// Name used to greet the user: the local part of the address
pub fn display_name(email: &str) -> &str {
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local,
        _ => email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_local_part() {
        assert_eq!(display_name("nikki@example.com"), "nikki");
        assert_eq!(display_name("no-at-sign"), "no-at-sign");
        assert_eq!(display_name("@example.com"), "@example.com");
    }

    #[tokio::test]
    async fn test_log_notifier_succeeds() {
        assert!(LogEmailNotifier
            .send("nikki@example.com", "nikki")
            .await
            .is_ok());
    }
}
