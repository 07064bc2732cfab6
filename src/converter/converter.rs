//! 转换器核心：平台识别、反向解析（中间商 -> 规范链接）、正向解析（规范链接 -> 中间商）
//! 所有方法均为 &self 纯函数，规则库构建后只读，可任意并发调用
use std::sync::Arc;

use tracing::{debug, warn};

use super::resolver::PlatformResolver;
use crate::compiler::{CompiledRuleLibrary, RuleCompiler};
use crate::error::{ConvResult, ConverterError};
use crate::rule::{ConversionResult, MiddlemanInfo, RuleLibrary, RuleLoader};
use crate::utils::{IdExtractor, TemplateRenderer, TemplateValues, UrlDecoder};

/// 链接转换器
#[derive(Debug, Clone)]
pub struct LinkConverter {
    compiled_lib: Arc<CompiledRuleLibrary>,
}

impl LinkConverter {
    /// 使用内置规则创建转换器
    pub fn new() -> ConvResult<Self> {
        Self::with_rules(RuleLoader::load())
    }

    /// 使用自定义规则库创建转换器
    pub fn with_rules(rule_lib: RuleLibrary) -> ConvResult<Self> {
        let compiled_lib = RuleCompiler::compile(&rule_lib)?;
        Ok(Self {
            compiled_lib: Arc::new(compiled_lib),
        })
    }

    pub fn compiled_lib(&self) -> &CompiledRuleLibrary {
        &self.compiled_lib
    }

    /// 按注册顺序列出全部中间商
    pub fn middlemen(&self) -> Vec<MiddlemanInfo> {
        self.compiled_lib.middlemen.iter().map(|m| m.info()).collect()
    }

    pub fn has_middleman(&self, key: &str) -> bool {
        self.compiled_lib.middleman(key).is_some()
    }

    /// 识别链接所属平台，无法识别返回 None
    pub fn identify_platform(&self, url: &str) -> Option<&str> {
        self.compiled_lib.identify_platform(url).map(|p| p.name.as_str())
    }

    /// 识别平台后按该平台的模式提取商品ID
    pub fn extract_item_id(&self, url: &str) -> Option<String> {
        let platform = self.compiled_lib.identify_platform(url)?;
        IdExtractor::extract(url, &platform.id_patterns).map(|e| e.item_id)
    }

    /// 反向解析：中间商链接 -> 规范平台链接
    /// 按注册顺序检查中间商，第一个能完整解析的中间商胜出
    pub fn reverse_resolve(&self, url: &str) -> Option<String> {
        let lib = &self.compiled_lib;
        let lowered = url.to_lowercase();

        for middleman in &lib.middlemen {
            if !middleman.matches_signature(&lowered) {
                continue;
            }

            let decoded = UrlDecoder::decode_if_needed(url, middleman, lib);
            let Some(extracted) = IdExtractor::extract(&decoded, &middleman.id_patterns) else {
                debug!("[{}] signature matched but no item id found", middleman.key);
                continue;
            };

            let Some(platform) = PlatformResolver::resolve(lib, middleman, &extracted, &decoded) else {
                debug!("[{}] item id {} found but platform unresolved", middleman.key, extracted.item_id);
                continue;
            };

            let canonical = platform.canonical_url(&extracted.item_id);
            debug!(
                "Reverse resolved via {}: platform={}, item={}, canonical={}",
                middleman.key, platform.name, extracted.item_id, canonical
            );
            return Some(canonical);
        }

        None
    }

    /// 正向解析：链接 -> 指定中间商链接
    /// `{encodedUrl}` 使用传入的原始链接（保留其中已有的联盟参数）
    pub fn forward_resolve(&self, url: &str, target: &str) -> Option<String> {
        let lib = &self.compiled_lib;
        let Some(middleman) = lib.middleman(target) else {
            warn!("Unknown middleman target: {}", target);
            return None;
        };

        // 1. 按目标中间商的解码标记解码
        let decoded = UrlDecoder::decode_if_needed(url, middleman, lib);

        // 2-3. 识别平台；失败时仅对中间商形态的链接使用中间商自身的提取模式
        let platform = lib.identify_platform(&decoded);
        let patterns = match platform {
            Some(platform) => &platform.id_patterns,
            None if self.is_middleman_shaped(url) => &middleman.id_patterns,
            None => {
                debug!("[{}] forward: {} matches no platform or middleman", target, url);
                return None;
            }
        };

        // 4. 无商品ID直接失败
        let Some(extracted) = IdExtractor::extract(&decoded, patterns) else {
            debug!("[{}] forward: no item id in {}", target, decoded);
            return None;
        };

        // 5. 模板需要平台标识时，平台必须已识别且存在映射
        let info = middleman.template_info;
        let (platform_token, platform_code) = if info.requires_platform() {
            let Some(platform) = platform else {
                debug!("[{}] forward: template needs a platform but none identified", target);
                return None;
            };
            let Some(token) = middleman.platform_token(&platform.name) else {
                debug!("[{}] forward: platform {} not supported", target, platform.name);
                return None;
            };
            let code = if info.has_platform_code {
                Some(middleman.platform_code(&platform.name)?)
            } else {
                None
            };
            (Some(token), code)
        } else {
            (None, None)
        };

        // 6-7. 代入占位符，残留占位符视为失败
        let values = TemplateValues {
            item_id: &extracted.item_id,
            source_url: url,
            platform_token,
            platform_code,
        };
        let rendered = TemplateRenderer::render(&middleman.url_template, &info, &values);
        if rendered.is_none() {
            debug!("[{}] forward: unresolved placeholders remain, discarded", target);
        }
        rendered
    }

    /// 链接是否命中任一已注册中间商的识别特征
    fn is_middleman_shaped(&self, url: &str) -> bool {
        let lowered = url.to_lowercase();
        self.compiled_lib
            .middlemen
            .iter()
            .any(|m| m.matches_signature(&lowered))
    }

    /// 规范化：能反向解析则取规范链接，否则原样返回
    pub fn canonicalize(&self, url: &str) -> String {
        self.reverse_resolve(url).unwrap_or_else(|| url.to_string())
    }

    /// 批量转换：规范链接 + 每个能成功正向解析的中间商链接
    /// 失败的中间商直接省略，不视为错误
    pub fn convert_all(&self, url: &str) -> ConversionResult {
        let canonical = self.canonicalize(url);
        let mut result = ConversionResult::new(canonical);

        for middleman in &self.compiled_lib.middlemen {
            if let Some(link) = self.forward_resolve(&result.original, &middleman.key) {
                result.push(middleman.key.as_str(), link);
            }
        }

        debug!(
            "Converted {} into {}/{} middleman links",
            url,
            result.links.len(),
            self.compiled_lib.middlemen.len()
        );
        result
    }

    /// 单目标转换；目标中间商未注册时返回错误，转换失败返回 Ok(None)
    pub fn convert_one(&self, url: &str, target: &str) -> ConvResult<Option<String>> {
        if !self.has_middleman(target) {
            return Err(ConverterError::InvalidInput(format!("未知的中间商：{}", target)));
        }
        let canonical = self.canonicalize(url);
        Ok(self.forward_resolve(&canonical, target))
    }
}
