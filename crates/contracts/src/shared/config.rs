use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::shared::list_pipeline::DEFAULT_PAGE_SIZE;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub list: ListConfig,
    pub simulation: SimulationConfig,
}

/// Настройки списков
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
}

/// Искусственные задержки, имитирующие загрузку данных (мс)
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationConfig {
    pub products_delay_ms: u32,
    pub categories_delay_ms: u32,
    pub brands_delay_ms: u32,
    pub users_delay_ms: u32,
    pub dashboard_delay_ms: u32,
    pub auth_delay_ms: u32,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[list]
default_page_size = 10
page_size_options = [10, 20, 50]

[simulation]
products_delay_ms = 300
categories_delay_ms = 600
brands_delay_ms = 600
users_delay_ms = 1000
dashboard_delay_ms = 1000
auth_delay_ms = 1500
"#;

/// Разобрать конфигурацию из TOML
pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    if config.list.default_page_size == 0 {
        anyhow::bail!("list.default_page_size must be positive");
    }
    Ok(config)
}

/// Load the embedded configuration.
/// Falls back to hardcoded values if the embedded document is broken.
pub fn load_config() -> AppConfig {
    match parse_config(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Embedded config is invalid, using fallback: {}", e);
            fallback_config()
        }
    }
}

fn fallback_config() -> AppConfig {
    AppConfig {
        list: ListConfig {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![DEFAULT_PAGE_SIZE],
        },
        simulation: SimulationConfig {
            products_delay_ms: 0,
            categories_delay_ms: 0,
            brands_delay_ms: 0,
            users_delay_ms: 0,
            dashboard_delay_ms: 0,
            auth_delay_ms: 0,
        },
    }
}

static APP_CONFIG: Lazy<AppConfig> = Lazy::new(load_config);

/// Глобальная конфигурация приложения
pub fn app_config() -> &'static AppConfig {
    &APP_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.list.default_page_size, 10);
        assert_eq!(config.list.page_size_options, vec![10, 20, 50]);
        assert_eq!(config.simulation.users_delay_ms, 1000);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let broken = DEFAULT_CONFIG.replace("default_page_size = 10", "default_page_size = 0");
        assert!(parse_config(&broken).is_err());
    }

    #[test]
    fn test_global_config_matches_embedded() {
        assert_eq!(app_config(), &parse_config(DEFAULT_CONFIG).unwrap());
    }
}
