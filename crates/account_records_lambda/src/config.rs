pub const ACCOUNT_TABLE_ENV: &str = "ACCOUNT_TABLE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountServiceConfig {
    pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

impl AccountServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = lookup(ACCOUNT_TABLE_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConfigError {
                message: format!("{ACCOUNT_TABLE_ENV} must be configured"),
            })?;

        Ok(Self { table_name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_table_name() {
        let config = AccountServiceConfig::from_lookup(|key| {
            (key == ACCOUNT_TABLE_ENV).then(|| "accounts-dev".to_string())
        })
        .expect("config should load");
        assert_eq!(config.table_name, "accounts-dev");
    }

    #[test]
    fn missing_table_name_is_fatal() {
        let error = AccountServiceConfig::from_lookup(|_| None).expect_err("config should fail");
        assert_eq!(error.message(), "ACCOUNT_TABLE must be configured");
    }

    #[test]
    fn blank_table_name_is_fatal() {
        assert!(AccountServiceConfig::from_lookup(|_| Some("  ".to_string())).is_err());
    }
}
