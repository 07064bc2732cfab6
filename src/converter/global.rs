//! 全局转换器单例管理
//! 进程内唯一的 LinkConverter 实例，首次使用时以内置规则懒加载

use std::sync::Arc;
use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, info};

use super::converter::LinkConverter;
use crate::error::{ConvResult, ConverterError};
use crate::rule::{ConversionResult, RuleLibrary};

/// 全局转换器实例
static GLOBAL_CONVERTER: Lazy<Arc<OnceCell<LinkConverter>>> = Lazy::new(|| Arc::new(OnceCell::new()));

/// 以内置规则初始化全局转换器（幂等）
pub fn init_global_converter() -> ConvResult<()> {
    if GLOBAL_CONVERTER.get().is_some() {
        debug!("Global converter already initialized, skip reinitialization");
        return Ok(());
    }

    let converter = LinkConverter::new().map_err(|e| {
        ConverterError::ConverterInitError(format!("Failed to build LinkConverter: {}", e))
    })?;
    set_global(converter)?;

    info!("Global LinkConverter initialized with built-in rules");
    Ok(())
}

/// 注入自定义规则库初始化全局转换器
pub fn init_global_converter_with_rules(rule_lib: RuleLibrary) -> ConvResult<()> {
    if GLOBAL_CONVERTER.get().is_some() {
        debug!("Global converter already initialized, skip reinitialization with custom rules");
        return Ok(());
    }

    let converter = LinkConverter::with_rules(rule_lib).map_err(|e| {
        ConverterError::ConverterInitError(format!("Failed to build LinkConverter with custom rules: {}", e))
    })?;
    set_global(converter)?;

    info!("Global LinkConverter initialized with custom rule library");
    Ok(())
}

fn set_global(converter: LinkConverter) -> ConvResult<()> {
    GLOBAL_CONVERTER.set(converter).map_err(|_| {
        ConverterError::ConverterInitError(
            "Global converter initialization failed: instance already initialized by another thread".to_string()
        )
    })
}

/// 获取全局转换器（未初始化时以内置规则懒加载）
pub fn get_global_converter() -> ConvResult<&'static LinkConverter> {
    GLOBAL_CONVERTER.get_or_try_init(LinkConverter::new)
}

/// 同步获取全局转换器（无自动初始化）
pub fn get_global_converter_initialized() -> ConvResult<&'static LinkConverter> {
    GLOBAL_CONVERTER.get().ok_or_else(|| {
        ConverterError::ConverterNotInitialized(
            "Global LinkConverter not initialized! Please call init_global_converter first".to_string()
        )
    })
}

// 对外暴露的简化接口
pub fn convert_link(url: &str) -> ConvResult<ConversionResult> {
    Ok(get_global_converter()?.convert_all(url))
}

pub fn convert_link_to(url: &str, target: &str) -> ConvResult<Option<String>> {
    get_global_converter()?.convert_one(url, target)
}

pub fn reverse_link(url: &str) -> ConvResult<Option<String>> {
    Ok(get_global_converter()?.reverse_resolve(url))
}
