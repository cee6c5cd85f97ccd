use crate::adapters::http::DEFAULT_API_BASE;
use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::core::query_controller::DEFAULT_DEBOUNCE;
use crate::core::ConfigProvider;
use crate::domain::model::RacePolicy;
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinderConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: Option<u64>,
    pub page_size: Option<usize>,
    pub race_policy: Option<RacePolicy>,
}

impl FinderConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FinderError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| FinderError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${UNI_FINDER_API_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::{Captures, Regex};

        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| FinderError::config(format!("env pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Command-line values win over the file; absent ones leave it untouched.
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        debounce_ms: Option<u64>,
        page_size: Option<usize>,
        race_policy: Option<RacePolicy>,
    ) -> Self {
        if api_url.is_some() {
            self.api.base_url = api_url;
        }
        if debounce_ms.is_some() {
            self.search.debounce_ms = debounce_ms;
        }
        if page_size.is_some() {
            self.search.page_size = page_size;
        }
        if race_policy.is_some() {
            self.search.race_policy = race_policy;
        }
        self
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("api.base_url", self.api_base_url())?;
        crate::utils::validation::validate_positive_number(
            "search.page_size",
            self.page_size(),
            1,
        )?;
        crate::utils::validation::validate_range(
            "search.debounce_ms",
            self.debounce_ms(),
            0,
            MAX_DEBOUNCE_MS,
        )?;
        Ok(())
    }
}

impl ConfigProvider for FinderConfig {
    fn api_base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    fn debounce_ms(&self) -> u64 {
        self.search
            .debounce_ms
            .unwrap_or(DEFAULT_DEBOUNCE.as_millis() as u64)
    }

    fn page_size(&self) -> usize {
        self.search.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn race_policy(&self) -> RacePolicy {
        self.search.race_policy.unwrap_or_default()
    }
}

impl Validate for FinderConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = FinderConfig::default();
        assert_eq!(config.api_base_url(), "http://localhost:3001");
        assert_eq!(config.debounce_ms(), 300);
        assert_eq!(config.page_size(), 3);
        assert_eq!(config.race_policy(), RacePolicy::Sequenced);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://listing.example.com"

[search]
debounce_ms = 150
page_size = 6
race_policy = "last_writer_wins"
"#;

        let config = FinderConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_base_url(), "https://listing.example.com");
        assert_eq!(config.debounce_ms(), 150);
        assert_eq!(config.page_size(), 6);
        assert_eq!(config.race_policy(), RacePolicy::LastWriterWins);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("UNI_FINDER_TEST_LISTING", "https://test.listing.com");

        let toml_content = r#"
[api]
base_url = "${UNI_FINDER_TEST_LISTING}"
"#;

        let config = FinderConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_base_url(), "https://test.listing.com");

        std::env::remove_var("UNI_FINDER_TEST_LISTING");
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = FinderConfig::from_toml_str(
            r#"
[api]
base_url = "https://from-file.example.com"

[search]
page_size = 10
"#,
        )
        .unwrap()
        .with_overrides(Some("http://127.0.0.1:9000".to_string()), None, None, None);

        assert_eq!(config.api_base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.page_size(), 10);
    }

    #[test]
    fn test_config_validation() {
        let bad_url = FinderConfig::from_toml_str("[api]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let zero_page = FinderConfig::from_toml_str("[search]\npage_size = 0\n").unwrap();
        assert!(zero_page.validate().is_err());

        let slow = FinderConfig::from_toml_str("[search]\ndebounce_ms = 60000\n").unwrap();
        assert!(slow.validate().is_err());
    }

    #[test]
    fn test_unknown_race_policy_is_rejected() {
        let result = FinderConfig::from_toml_str("[search]\nrace_policy = \"newest\"\n");
        assert!(matches!(result, Err(FinderError::Config { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "https://api.example.com"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = FinderConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_base_url(), "https://api.example.com");
    }
}
