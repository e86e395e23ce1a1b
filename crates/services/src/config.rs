use learnify_core::model::{ClientSettings, ClientSettingsDraft};

use crate::auth::AuthSession;
use crate::error::ConfigError;

pub const ENV_API_BASE_URL: &str = "LEARNIFY_API_BASE_URL";
pub const ENV_API_TOKEN: &str = "LEARNIFY_API_TOKEN";
pub const ENV_REVIEW_THRESHOLD: &str = "LEARNIFY_REVIEW_THRESHOLD";

/// Client settings plus the session they start with.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub settings: ClientSettings,
    pub session: AuthSession,
}

impl ClientConfig {
    /// Read configuration through an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let review_threshold = get(ENV_REVIEW_THRESHOLD)
            .map(|raw| {
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::NotANumber {
                        var: ENV_REVIEW_THRESHOLD,
                        raw,
                    })
            })
            .transpose()?;

        let settings = ClientSettingsDraft {
            api_base_url: get(ENV_API_BASE_URL),
            review_threshold,
        }
        .validate()?;

        let session = match get(ENV_API_TOKEN) {
            Some(token) => AuthSession::with_token(token)?,
            None => AuthSession::new(),
        };

        Ok(Self { settings, session })
    }
}
