//! 全局错误类型定义
//! 注意：匹配失败（无平台/无中间商/模板残留占位符）不属于错误，统一以 None 表达

use thiserror::Error;
use regex::Error as RegexError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum ConverterError {
    // 规则相关错误
    #[error("规则配置错误：{0}")]
    RuleConfigError(String),

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 转换器相关错误
    #[error("转换器未初始化: {0}")]
    ConverterNotInitialized(String),
    #[error("转换器初始化失败: {0}")]
    ConverterInitError(String),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type ConvResult<T> = Result<T, ConverterError>;
