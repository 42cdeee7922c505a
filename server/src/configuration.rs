mod database_url;
mod site_name;

pub use self::{database_url::DatabaseUrl, site_name::SiteName};

use once_cell::sync::OnceCell;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::HashMap,
    env,
    sync::{Arc, RwLock},
};

pub trait Configuration {
    type Type: Serialize + DeserializeOwned;

    fn default() -> Option<Self::Type>;
    fn key() -> &'static str;

    fn get() -> Option<Self::Type> {
        ConfigurationManager::shared().get::<Self>()
    }

    /// Name of the environment variable that overrides this setting:
    /// `site-name` is read from `SITE_NAME`.
    fn environment_variable() -> String {
        Self::key().to_uppercase().replace('-', "_")
    }
}

static SHARED_MANAGER: OnceCell<ConfigurationManager> = OnceCell::new();

#[derive(Clone, Debug, Default)]
pub struct ConfigurationManager {
    active_configuration: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl ConfigurationManager {
    pub fn shared() -> Self {
        SHARED_MANAGER.get_or_init(Self::default).clone()
    }

    pub fn get<T: Configuration + ?Sized>(&self) -> Option<T::Type> {
        let configuration = self.active_configuration.read().ok()?;
        configuration
            .get(T::key())
            .and_then(|v| serde_json::value::from_value(v.clone()).ok())
            .or_else(T::default)
    }

    #[cfg(test)]
    pub fn set<T: Configuration>(&self, value: T::Type) -> serde_json::Result<()> {
        let value = serde_json::value::to_value(value)?;
        if let Ok(mut configuration) = self.active_configuration.write() {
            configuration.insert(T::key().to_string(), value);
        }
        Ok(())
    }

    /// Copies the setting from its environment variable, if present. Values
    /// are stored as strings, so only string settings can be overridden this way.
    pub fn load_environment<T: Configuration>(&self) {
        if let Ok(value) = env::var(T::environment_variable()) {
            if let Ok(mut configuration) = self.active_configuration.write() {
                configuration.insert(T::key().to_string(), serde_json::Value::String(value));
            }
        }
    }
}
