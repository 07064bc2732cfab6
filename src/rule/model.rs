//! 规则数据模型定义
//! 仅存储规则数据（平台表、中间商表）与对外输出结构，无任何匹配逻辑

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 商品ID提取模式的捕获分组数量（配置期显式声明，编译期校验）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternArity {
    /// 仅一个分组：商品ID
    ItemOnly,
    /// 两个分组：平台标识，然后商品ID
    PlatformAndItem,
}

impl PatternArity {
    /// 对应的捕获分组数量（不含整体匹配）
    pub fn group_count(self) -> usize {
        match self {
            PatternArity::ItemOnly => 1,
            PatternArity::PlatformAndItem => 2,
        }
    }
}

/// 商品ID提取模式
#[derive(Debug, Clone)]
pub struct IdPattern {
    pub regex: &'static str,
    pub arity: PatternArity,
}

impl IdPattern {
    pub const fn item(regex: &'static str) -> Self {
        Self { regex, arity: PatternArity::ItemOnly }
    }

    pub const fn platform_item(regex: &'static str) -> Self {
        Self { regex, arity: PatternArity::PlatformAndItem }
    }
}

/// 源电商平台规则
#[derive(Debug, Clone)]
pub struct PlatformRule {
    pub name: &'static str,
    pub detection: &'static str,
    /// 含唯一占位符 `{itemID}`
    pub canonical_template: &'static str,
    /// 有序，先匹配者优先
    pub id_patterns: Vec<IdPattern>,
}

/// 中间商平台标识解析策略
#[derive(Debug, Clone)]
pub enum PlatformTokenStrategy {
    /// 通过 platform_mapping 反查
    Direct,
    /// 路径中的数字代码，查私有代码表（代码 -> 平台名）
    CodeTable { codes: Vec<(&'static str, &'static str)> },
    /// 查询参数中的来源代码（如 `source=TB`），查私有代码表
    SourceQueryParam {
        param: &'static str,
        codes: Vec<(&'static str, &'static str)>,
    },
    /// 路径片段中的平台名称，查同义词表
    PathSegmentSynonym { synonyms: Vec<(&'static str, &'static str)> },
}

impl PlatformTokenStrategy {
    /// 策略私有表中引用的平台名（用于编译期校验）
    pub fn referenced_platforms(&self) -> Vec<&'static str> {
        match self {
            PlatformTokenStrategy::Direct => Vec::new(),
            PlatformTokenStrategy::CodeTable { codes }
            | PlatformTokenStrategy::SourceQueryParam { codes, .. } => {
                codes.iter().map(|(_, platform)| *platform).collect()
            }
            PlatformTokenStrategy::PathSegmentSynonym { synonyms } => {
                synonyms.iter().map(|(_, platform)| *platform).collect()
            }
        }
    }
}

/// 中间商（代购）规则
#[derive(Debug, Clone)]
pub struct MiddlemanRule {
    pub key: &'static str,
    pub display_name: &'static str,
    /// 额外识别用子串（小写）
    pub aliases: Vec<&'static str>,
    /// 带联盟参数的URL模板，联盟参数为字面量，不可参数化
    pub url_template: &'static str,
    /// 平台名 -> 该中间商对平台的表示
    pub platform_mapping: Vec<(&'static str, &'static str)>,
    pub id_patterns: Vec<IdPattern>,
    /// 商品链接以 `url` 查询参数编码嵌入
    pub requires_url_decoding: bool,
    pub token_strategy: PlatformTokenStrategy,
}

/// 完整规则库
#[derive(Debug, Clone)]
pub struct RuleLibrary {
    pub platforms: Vec<PlatformRule>,
    pub middlemen: Vec<MiddlemanRule>,
}

/// 中间商简要信息（对外列表）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiddlemanInfo {
    pub key: String,
    pub display_name: String,
}

/// 批量转换结果
/// 序列化为扁平JSON对象：`original` 在前，其后按注册表顺序排列各中间商链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub original: String,
    pub links: Vec<(String, String)>,
}

impl ConversionResult {
    pub fn new(original: String) -> Self {
        Self { original, links: Vec::new() }
    }

    pub fn push(&mut self, key: impl Into<String>, link: String) {
        self.links.push((key.into(), link));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, link)| link.as_str())
    }

    /// 没有任何中间商转换成功
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Serialize for ConversionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.links.len() + 1))?;
        map.serialize_entry("original", &self.original)?;
        for (key, link) in &self.links {
            map.serialize_entry(key, link)?;
        }
        map.end()
    }
}
