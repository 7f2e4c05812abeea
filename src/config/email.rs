use serde::Deserialize;

pub const ADDRESS_VAR: &str = "EMAIL_ADDRESS";
pub const PASSWORD_VAR: &str = "EMAIL_PASSWORD";

/// SMTP relay details for the email sink.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    /// Relay host, reached with STARTTLS (default: smtp.gmail.com)
    pub smtp_host: String,
    /// Submission port (default: 587)
    pub smtp_port: u16,
    /// Subject line of every notification email
    pub subject: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            subject: "PL Notifier - New Fixture News".to_string(),
        }
    }
}

/// Mailbox used as both sender and recipient, plus its SMTP password.
///
/// Either value may be missing; sending then fails and is logged.
#[derive(Clone, Default)]
pub struct EmailCredentials {
    pub address: Option<String>,
    pub password: Option<String>,
}

impl EmailCredentials {
    /// Read `EMAIL_ADDRESS` and `EMAIL_PASSWORD`, including values loaded
    /// from a `.env` file.
    pub fn from_env() -> Self {
        Self {
            address: non_empty(dotenvy::var(ADDRESS_VAR).ok()),
            password: non_empty(dotenvy::var(PASSWORD_VAR).ok()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.address.is_some() && self.password.is_some()
    }
}

impl std::fmt::Debug for EmailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailCredentials")
            .field("address", &self.address)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
