//! 规则加载管理器
//! 负责组装规则库：内置平台表 + 内置中间商表，或外部注入的自定义表

use tracing::debug;

use super::middlemen::builtin_middlemen;
use super::model::{MiddlemanRule, PlatformRule, RuleLibrary};
use super::platforms::builtin_platforms;

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 加载内置规则库
    pub fn load() -> RuleLibrary {
        let rule_lib = Self::from_parts(builtin_platforms(), builtin_middlemen());
        debug!(
            "Built-in rule library loaded: {} platforms, {} middlemen",
            rule_lib.platforms.len(),
            rule_lib.middlemen.len()
        );
        rule_lib
    }

    /// 由自定义平台表和中间商表组装规则库（测试或嵌入方使用）
    pub fn from_parts(platforms: Vec<PlatformRule>, middlemen: Vec<MiddlemanRule>) -> RuleLibrary {
        RuleLibrary { platforms, middlemen }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_library_shape() {
        let rule_lib = RuleLoader::load();
        let platform_names: Vec<&str> = rule_lib.platforms.iter().map(|p| p.name).collect();
        assert_eq!(platform_names, vec!["taobao", "tmall", "1688", "weidian"]);
        assert_eq!(rule_lib.middlemen.len(), 10);

        let keys: HashSet<&str> = rule_lib.middlemen.iter().map(|m| m.key).collect();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn test_canonical_templates_are_exact() {
        let rule_lib = RuleLoader::load();
        let templates: Vec<&str> = rule_lib.platforms.iter().map(|p| p.canonical_template).collect();
        assert_eq!(
            templates,
            vec![
                "https://item.taobao.com/item.htm?id={itemID}",
                "https://detail.tmall.com/item.htm?id={itemID}",
                "https://detail.1688.com/offer/{itemID}.html",
                "https://weidian.com/item.html?itemID={itemID}",
            ]
        );
    }

    #[test]
    fn test_affiliate_parameters_preserved() {
        let rule_lib = RuleLoader::load();
        let template = |key: &str| {
            rule_lib
                .middlemen
                .iter()
                .find(|m| m.key == key)
                .map(|m| m.url_template)
                .unwrap()
        };
        assert!(template("kakobuy").ends_with("&affcode=dripez"));
        assert!(template("cnfans").ends_with("&ref=191373"));
        assert!(template("superbuy").contains("partnercode=dripez"));
    }
}
