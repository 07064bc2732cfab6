//! 全局配置管理,存储所有可配置项

use std::net::SocketAddr;

/// 全局配置
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    // HTTP 监听地址
    pub bind_addr: SocketAddr,
    // 允许的跨域来源（为空表示允许全部）
    pub allowed_origins: Vec<String>,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            allowed_origins: Vec::new(),
            verbose: false,
        }
    }
}

impl GlobalConfig {
    /// 日志过滤级别（RUST_LOG 未设置时使用）
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> GlobalConfig {
        GlobalConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: GlobalConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: GlobalConfig::default(),
        }
    }

    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.config.bind_addr = addr;
        self
    }

    pub fn allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.config.allowed_origins = origins;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> GlobalConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let config = ConfigManager::custom()
            .bind_addr(addr)
            .allowed_origins(vec!["https://example.com".to_string()])
            .verbose(true)
            .build();

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.allowed_origins, vec!["https://example.com".to_string()]);
        assert_eq!(config.default_log_filter(), "debug");
    }

    #[test]
    fn test_default_config() {
        let config = ConfigManager::get_default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.default_log_filter(), "info");
    }
}
