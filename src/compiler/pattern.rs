//! 编译后模式模型
//! 正则编译后的平台/中间商结构，构建后只读

use std::collections::HashMap;
use std::sync::Arc;
use regex::Regex;

use crate::rule::{MiddlemanInfo, PatternArity};

/// 编译后的商品ID提取模式
#[derive(Debug, Clone)]
pub struct CompiledIdPattern {
    pub regex: Regex,
    pub arity: PatternArity,
}

/// 编译后的平台规则
#[derive(Debug, Clone)]
pub struct CompiledPlatform {
    pub name: String,
    pub detection: Regex,
    pub canonical_template: String,
    pub id_patterns: Arc<Vec<CompiledIdPattern>>,
}

impl CompiledPlatform {
    /// 代入商品ID生成规范链接
    pub fn canonical_url(&self, item_id: &str) -> String {
        self.canonical_template.replace("{itemID}", item_id)
    }
}

/// 模板占位符分析结果（编译期计算一次）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateInfo {
    pub has_item_id: bool,
    pub has_encoded_url: bool,
    /// 含任意平台标识槽位（{platformDomain}/{cssPlatform}/{platformIdentifier}）
    pub has_platform_slot: bool,
    pub has_platform_code: bool,
}

impl TemplateInfo {
    /// 渲染前必须已识别出平台
    pub fn requires_platform(&self) -> bool {
        self.has_platform_slot || self.has_platform_code
    }
}

/// 编译后的平台标识解析策略（私有表统一转为查找表）
#[derive(Debug, Clone)]
pub enum CompiledTokenStrategy {
    Direct,
    CodeTable { codes: HashMap<String, String> },
    /// 代码表键统一存为大写
    SourceQueryParam { param: String, codes: HashMap<String, String> },
    /// 同义词表键统一存为小写
    PathSegmentSynonym { synonyms: HashMap<String, String> },
}

/// 编译后的中间商规则
#[derive(Debug, Clone)]
pub struct CompiledMiddleman {
    pub key: String,
    pub display_name: String,
    /// 小写识别子串，首项为 key 本身
    pub signatures: Vec<String>,
    pub url_template: String,
    pub template_info: TemplateInfo,
    /// 保持配置顺序：平台名 -> 标识
    pub platform_mapping: Vec<(String, String)>,
    pub id_patterns: Arc<Vec<CompiledIdPattern>>,
    pub requires_url_decoding: bool,
    pub token_strategy: CompiledTokenStrategy,
}

impl CompiledMiddleman {
    /// 输入链接（小写后）是否包含该中间商的 key 或别名
    pub fn matches_signature(&self, lowered_url: &str) -> bool {
        self.signatures.iter().any(|sig| lowered_url.contains(sig.as_str()))
    }

    /// 平台名 -> 该中间商的平台标识
    pub fn platform_token(&self, platform: &str) -> Option<&str> {
        self.platform_mapping
            .iter()
            .find(|(name, _)| name == platform)
            .map(|(_, token)| token.as_str())
    }

    /// 平台标识精确反查平台名
    pub fn platform_for_token(&self, token: &str) -> Option<&str> {
        self.platform_mapping
            .iter()
            .find(|(_, mapped)| mapped == token)
            .map(|(name, _)| name.as_str())
    }

    /// 平台名 -> 平台代码（仅 CodeTable 策略）
    pub fn platform_code(&self, platform: &str) -> Option<&str> {
        match &self.token_strategy {
            CompiledTokenStrategy::CodeTable { codes } => codes
                .iter()
                .find(|(_, name)| name.as_str() == platform)
                .map(|(code, _)| code.as_str()),
            _ => None,
        }
    }

    pub fn info(&self) -> MiddlemanInfo {
        MiddlemanInfo {
            key: self.key.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// 编译后的规则库
#[derive(Debug, Clone)]
pub struct CompiledRuleLibrary {
    pub platforms: Vec<CompiledPlatform>,
    pub middlemen: Vec<CompiledMiddleman>,
}

impl CompiledRuleLibrary {
    pub fn platform(&self, name: &str) -> Option<&CompiledPlatform> {
        self.platforms.iter().find(|p| p.name == name)
    }

    pub fn middleman(&self, key: &str) -> Option<&CompiledMiddleman> {
        self.middlemen.iter().find(|m| m.key == key)
    }

    pub fn platform_names(&self) -> impl Iterator<Item = &str> {
        self.platforms.iter().map(|p| p.name.as_str())
    }

    /// 按注册顺序匹配平台识别正则，返回第一个命中的平台
    pub fn identify_platform(&self, url: &str) -> Option<&CompiledPlatform> {
        self.platforms.iter().find(|p| p.detection.is_match(url))
    }
}
