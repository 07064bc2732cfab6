//! 商品ID提取工具模块
//! 对链接做一次百分号解码后，按顺序尝试各提取模式，先匹配者胜出
//! 未匹配属于正常分支，返回 None

use regex::Captures;

use super::url_decoder::UrlDecoder;
use crate::compiler::CompiledIdPattern;
use crate::rule::PatternArity;

/// 提取结果：可选的平台标识 + 商品ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedId {
    pub platform_token: Option<String>,
    pub item_id: String,
}

/// 商品ID提取工具类
pub struct IdExtractor;

impl IdExtractor {
    /// 从链接中提取商品ID（及双分组模式下的平台标识）
    ///
    /// # 参数
    /// - `url`: 原始链接，内部会先百分号解码一次
    /// - `patterns`: 有序提取模式，顺序即优先级
    ///
    /// # 返回值
    /// - `Some(ExtractedId)`: 第一个命中模式的提取结果
    /// - `None`: 所有模式均未命中
    pub fn extract(url: &str, patterns: &[CompiledIdPattern]) -> Option<ExtractedId> {
        let decoded = UrlDecoder::percent_decode_once(url);
        patterns.iter().find_map(|pattern| {
            pattern
                .regex
                .captures(&decoded)
                .and_then(|captures| Self::from_captures(pattern.arity, &captures))
        })
    }

    fn from_captures(arity: PatternArity, captures: &Captures) -> Option<ExtractedId> {
        let group = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
        };

        match arity {
            PatternArity::ItemOnly => Some(ExtractedId {
                platform_token: None,
                item_id: group(1)?.to_string(),
            }),
            PatternArity::PlatformAndItem => Some(ExtractedId {
                platform_token: group(1).map(str::to_string),
                item_id: group(2)?.to_string(),
            }),
        }
    }
}
