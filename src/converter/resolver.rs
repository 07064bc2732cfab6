//! 平台解析器：反向解析时，根据中间商的标识解析策略确定源平台
//! 每个中间商只绑定一种策略，策略之间互不依赖

use tracing::debug;

use crate::compiler::{CompiledMiddleman, CompiledPlatform, CompiledRuleLibrary, CompiledTokenStrategy};
use crate::utils::{ExtractedId, UrlDecoder};

/// 平台解析器
pub struct PlatformResolver;

impl PlatformResolver {
    /// 解析源平台
    ///
    /// # 参数
    /// - `extracted`: 中间商模式提取结果（可能带平台标识）
    /// - `decoded`: 经 `decode_if_needed` 处理后的链接
    pub fn resolve<'a>(
        compiled_lib: &'a CompiledRuleLibrary,
        middleman: &CompiledMiddleman,
        extracted: &ExtractedId,
        decoded: &str,
    ) -> Option<&'a CompiledPlatform> {
        let token = extracted.platform_token.as_deref();

        let platform_name = match &middleman.token_strategy {
            CompiledTokenStrategy::Direct => {
                return Self::resolve_direct(compiled_lib, middleman, token, decoded);
            }
            CompiledTokenStrategy::CodeTable { codes } => {
                token.and_then(|code| codes.get(code))
            }
            CompiledTokenStrategy::SourceQueryParam { param, codes } => {
                Self::source_code(decoded, param).and_then(|code| codes.get(&code.to_uppercase()))
            }
            CompiledTokenStrategy::PathSegmentSynonym { synonyms } => {
                token.and_then(|segment| synonyms.get(&segment.to_lowercase()))
            }
        };

        debug!(
            "[{}] platform token {:?} resolved to {:?}",
            middleman.key, token, platform_name
        );
        platform_name.and_then(|name| compiled_lib.platform(name))
    }

    /// 默认策略：标识精确反查 -> 解码后重新识别平台 -> 映射值子串匹配
    fn resolve_direct<'a>(
        compiled_lib: &'a CompiledRuleLibrary,
        middleman: &CompiledMiddleman,
        token: Option<&str>,
        decoded: &str,
    ) -> Option<&'a CompiledPlatform> {
        if let Some(name) = token.and_then(|t| middleman.platform_for_token(t)) {
            return compiled_lib.platform(name);
        }

        if middleman.requires_url_decoding {
            if let Some(platform) = compiled_lib.identify_platform(decoded) {
                return Some(platform);
            }
        }

        middleman
            .platform_mapping
            .iter()
            .find(|(_, mapped)| decoded.contains(mapped.as_str()))
            .and_then(|(name, _)| compiled_lib.platform(name))
    }

    /// 读取来源代码参数，URL解析失败时退回按 `?`/`&` 切分扫描
    fn source_code(decoded: &str, param: &str) -> Option<String> {
        UrlDecoder::query_param(decoded, param).or_else(|| {
            decoded
                .split(|c| c == '?' || c == '&')
                .find_map(|pair| pair.strip_prefix(param)?.strip_prefix('='))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
    }
}
