//! 转换模块：链接转换核心逻辑
pub mod global;
pub mod resolver;
pub mod converter;

// 导出核心接口
pub use self::global::{
    convert_link, convert_link_to, get_global_converter, get_global_converter_initialized,
    init_global_converter, init_global_converter_with_rules, reverse_link,
};
pub use self::resolver::PlatformResolver;
pub use self::converter::LinkConverter;
