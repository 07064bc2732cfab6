//! 规则模块：负责平台/中间商规则的数据模型定义与内置表
pub mod model;
pub mod platforms;
pub mod middlemen;
pub mod loader;

// 导出核心接口
pub use self::model::{
    ConversionResult, IdPattern, MiddlemanInfo, MiddlemanRule, PatternArity, PlatformRule,
    PlatformTokenStrategy, RuleLibrary,
};
pub use self::loader::RuleLoader;
