//! 规则编译器核心
//! 将原始规则编译为可执行的正则模式，并在编译期校验所有配置不变量：
//! 平台引用存在、分组数量与声明一致、key 唯一、模板占位符合法

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use regex::Regex;
use tracing::debug;

use super::pattern::{
    CompiledIdPattern, CompiledMiddleman, CompiledPlatform, CompiledRuleLibrary,
    CompiledTokenStrategy,
};
use crate::error::{ConvResult, ConverterError};
use crate::rule::{IdPattern, MiddlemanRule, PlatformRule, PlatformTokenStrategy, RuleLibrary};
use crate::utils::TemplateRenderer;

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则库
    pub fn compile(rule_lib: &RuleLibrary) -> ConvResult<CompiledRuleLibrary> {
        let start = Instant::now();
        let mut stats = CompileStats::default();

        // 1. 编译平台规则
        let mut platforms = Vec::with_capacity(rule_lib.platforms.len());
        let mut platform_names = HashSet::new();
        for platform in &rule_lib.platforms {
            if !platform_names.insert(platform.name) {
                return Err(ConverterError::RuleConfigError(format!(
                    "平台名重复：{}",
                    platform.name
                )));
            }
            platforms.push(Self::compile_platform(platform, &mut stats)?);
        }

        // 2. 编译中间商规则
        let mut middlemen = Vec::with_capacity(rule_lib.middlemen.len());
        let mut keys = HashSet::new();
        for middleman in &rule_lib.middlemen {
            if !keys.insert(middleman.key) {
                return Err(ConverterError::RuleConfigError(format!(
                    "中间商key重复：{}",
                    middleman.key
                )));
            }
            middlemen.push(Self::compile_middleman(middleman, &platform_names, &mut stats)?);
        }

        // 3. 输出编译统计
        debug!("Rule compilation finished in {:?}", start.elapsed());
        debug!(
            "Compile stats: {} platforms, {} middlemen, {} id patterns",
            platforms.len(),
            middlemen.len(),
            stats.id_pattern_count
        );

        Ok(CompiledRuleLibrary { platforms, middlemen })
    }

    /// 编译单个平台规则
    fn compile_platform(platform: &PlatformRule, stats: &mut CompileStats) -> ConvResult<CompiledPlatform> {
        if platform.canonical_template.matches("{itemID}").count() != 1 {
            return Err(ConverterError::RuleConfigError(format!(
                "平台[{}]规范模板必须恰好包含一个{{itemID}}占位符",
                platform.name
            )));
        }

        Ok(CompiledPlatform {
            name: platform.name.to_string(),
            detection: Regex::new(platform.detection)?,
            canonical_template: platform.canonical_template.to_string(),
            id_patterns: Arc::new(Self::compile_id_patterns(platform.name, &platform.id_patterns, stats)?),
        })
    }

    /// 编译单个中间商规则
    fn compile_middleman(
        middleman: &MiddlemanRule,
        platform_names: &HashSet<&'static str>,
        stats: &mut CompileStats,
    ) -> ConvResult<CompiledMiddleman> {
        // 平台引用校验
        let referenced = middleman
            .platform_mapping
            .iter()
            .map(|(name, _)| *name)
            .chain(middleman.token_strategy.referenced_platforms());
        for name in referenced {
            if !platform_names.contains(name) {
                return Err(ConverterError::RuleConfigError(format!(
                    "中间商[{}]引用了未注册的平台：{}",
                    middleman.key, name
                )));
            }
        }

        // 模板校验
        if let Some(unknown) = TemplateRenderer::unknown_placeholder(middleman.url_template) {
            return Err(ConverterError::RuleConfigError(format!(
                "中间商[{}]模板含未知占位符：{}",
                middleman.key, unknown
            )));
        }
        let template_info = TemplateRenderer::analyze(middleman.url_template);
        if !template_info.has_item_id && !template_info.has_encoded_url {
            return Err(ConverterError::RuleConfigError(format!(
                "中间商[{}]模板缺少商品占位符（{{itemID}} 或 {{encodedUrl}}）",
                middleman.key
            )));
        }
        let is_code_table = matches!(middleman.token_strategy, PlatformTokenStrategy::CodeTable { .. });
        if template_info.has_platform_code && !is_code_table {
            return Err(ConverterError::RuleConfigError(format!(
                "中间商[{}]模板含{{platformCode}}但未配置代码表策略",
                middleman.key
            )));
        }

        let mut signatures = vec![middleman.key.to_lowercase()];
        signatures.extend(middleman.aliases.iter().map(|alias| alias.to_lowercase()));

        Ok(CompiledMiddleman {
            key: middleman.key.to_string(),
            display_name: middleman.display_name.to_string(),
            signatures,
            url_template: middleman.url_template.to_string(),
            template_info,
            platform_mapping: middleman
                .platform_mapping
                .iter()
                .map(|(name, token)| (name.to_string(), token.to_string()))
                .collect(),
            id_patterns: Arc::new(Self::compile_id_patterns(middleman.key, &middleman.id_patterns, stats)?),
            requires_url_decoding: middleman.requires_url_decoding,
            token_strategy: Self::compile_strategy(&middleman.token_strategy),
        })
    }

    /// 编译ID提取模式，校验分组数量与声明一致
    fn compile_id_patterns(
        owner: &str,
        patterns: &[IdPattern],
        stats: &mut CompileStats,
    ) -> ConvResult<Vec<CompiledIdPattern>> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = Regex::new(pattern.regex)?;
            // captures_len 包含整体匹配分组
            let groups = regex.captures_len() - 1;
            if groups != pattern.arity.group_count() {
                return Err(ConverterError::RuleConfigError(format!(
                    "[{}]模式 {} 声明 {:?}，实际分组数 {}",
                    owner, pattern.regex, pattern.arity, groups
                )));
            }
            compiled.push(CompiledIdPattern { regex, arity: pattern.arity });
            stats.id_pattern_count += 1;
        }
        Ok(compiled)
    }

    fn compile_strategy(strategy: &PlatformTokenStrategy) -> CompiledTokenStrategy {
        match strategy {
            PlatformTokenStrategy::Direct => CompiledTokenStrategy::Direct,
            PlatformTokenStrategy::CodeTable { codes } => CompiledTokenStrategy::CodeTable {
                codes: Self::to_lookup(codes, |s| s.to_string()),
            },
            PlatformTokenStrategy::SourceQueryParam { param, codes } => {
                CompiledTokenStrategy::SourceQueryParam {
                    param: param.to_string(),
                    codes: Self::to_lookup(codes, |s| s.to_uppercase()),
                }
            }
            PlatformTokenStrategy::PathSegmentSynonym { synonyms } => {
                CompiledTokenStrategy::PathSegmentSynonym {
                    synonyms: Self::to_lookup(synonyms, |s| s.to_lowercase()),
                }
            }
        }
    }

    /// 私有表转查找表（标识 -> 平台名）
    fn to_lookup(pairs: &[(&'static str, &'static str)], normalize: fn(&str) -> String) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(token, platform)| (normalize(token), platform.to_string()))
            .collect()
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    id_pattern_count: usize,
}
