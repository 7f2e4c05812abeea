use tracing::warn;

use crate::app::error::{Result, WatchError};
use crate::config::{Config, EmailCredentials, Settings};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::notifier::{platform_sink, EmailSink, Notifier};

pub struct AppContext {
    pub fetcher: Box<dyn Fetcher + Send + Sync>,
    pub notifier: Notifier,
}

impl AppContext {
    pub fn new(settings: &Settings, config: &Config, credentials: EmailCredentials) -> Result<Self> {
        let endpoint = settings
            .endpoint_url()
            .map_err(|e| WatchError::Config(e.to_string()))?;
        let fetcher: Box<dyn Fetcher + Send + Sync> =
            Box::new(HttpFetcher::new(endpoint, settings.request_timeout())?);

        let mut notifier = Notifier::new(platform_sink(&settings.desktop));

        if config.email_enabled {
            if !credentials.is_complete() {
                warn!("Email notifications are enabled but EMAIL_ADDRESS or EMAIL_PASSWORD is not set; sending will fail");
            }
            notifier = notifier.with_email(Box::new(EmailSink::new(
                settings.email.clone(),
                credentials,
            )));
        }

        Ok(Self::from_parts(fetcher, notifier))
    }

    pub fn from_parts(fetcher: Box<dyn Fetcher + Send + Sync>, notifier: Notifier) -> Self {
        Self { fetcher, notifier }
    }
}
