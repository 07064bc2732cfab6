//! linkshift - 商品链接转换引擎
//! 识别淘宝/天猫/1688/微店链接，在规范链接与各代购（中间商）链接之间互相转换

// 导出全局错误类型
pub use self::error::{ConverterError, ConvResult};

// 导出配置模块
pub use self::config::{GlobalConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{
    ConversionResult, IdPattern, MiddlemanInfo, MiddlemanRule, PatternArity, PlatformRule,
    PlatformTokenStrategy, RuleLibrary, RuleLoader,
};

// 导出编译模块核心接口
pub use self::compiler::{CompiledRuleLibrary, RuleCompiler};

// 导出工具模块核心接口
pub use self::utils::{ExtractedId, IdExtractor, TemplateRenderer, UrlDecoder};

// 导出转换模块核心接口（含全局单例的简化接口）
pub use self::converter::{
    LinkConverter,
    init_global_converter,
    init_global_converter_with_rules,
    get_global_converter,
    convert_link,
    convert_link_to,
    reverse_link,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod utils;
pub mod compiler;
pub mod converter;
pub mod server;
