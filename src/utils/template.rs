//! URL模板渲染工具
//! 占位符：{itemID} {encodedUrl} {platformCode}，以及三种平台标识槽位别名

use once_cell::sync::Lazy;
use regex::Regex;

use crate::compiler::TemplateInfo;

/// 平台标识槽位（三者等价）
pub const PLATFORM_SLOTS: [&str; 3] = ["{platformDomain}", "{cssPlatform}", "{platformIdentifier}"];

const KNOWN_PLACEHOLDERS: [&str; 6] = [
    "{itemID}",
    "{encodedUrl}",
    "{platformDomain}",
    "{cssPlatform}",
    "{platformIdentifier}",
    "{platformCode}",
];

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[A-Za-z]+\}").unwrap()
});

/// 渲染所需的取值
#[derive(Debug, Clone, Default)]
pub struct TemplateValues<'a> {
    pub item_id: &'a str,
    /// 用于 {encodedUrl}：调用方传入的原始（未解码）链接
    pub source_url: &'a str,
    pub platform_token: Option<&'a str>,
    pub platform_code: Option<&'a str>,
}

/// 模板渲染工具
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// 分析模板包含的占位符
    pub fn analyze(template: &str) -> TemplateInfo {
        TemplateInfo {
            has_item_id: template.contains("{itemID}"),
            has_encoded_url: template.contains("{encodedUrl}"),
            has_platform_slot: PLATFORM_SLOTS.iter().any(|slot| template.contains(slot)),
            has_platform_code: template.contains("{platformCode}"),
        }
    }

    /// 返回模板中第一个未知占位符
    pub fn unknown_placeholder(template: &str) -> Option<String> {
        PLACEHOLDER_REGEX
            .find_iter(template)
            .map(|m| m.as_str())
            .find(|placeholder| !KNOWN_PLACEHOLDERS.contains(placeholder))
            .map(str::to_string)
    }

    /// 代入所有占位符；仍有残留占位符时视为失败返回 None
    pub fn render(template: &str, info: &TemplateInfo, values: &TemplateValues) -> Option<String> {
        let mut rendered = template.replace("{itemID}", values.item_id);

        if info.has_encoded_url {
            rendered = rendered.replace("{encodedUrl}", &urlencoding::encode(values.source_url));
        }
        if let Some(token) = values.platform_token {
            for slot in PLATFORM_SLOTS {
                rendered = rendered.replace(slot, token);
            }
        }
        if let Some(code) = values.platform_code {
            rendered = rendered.replace("{platformCode}", code);
        }

        if PLACEHOLDER_REGEX.is_match(&rendered) {
            None
        } else {
            Some(rendered)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_template() {
        let info = TemplateRenderer::analyze("https://x.com/{cssPlatform}/{itemID}");
        assert!(info.has_item_id);
        assert!(info.has_platform_slot);
        assert!(!info.has_encoded_url);
        assert!(info.requires_platform());
    }

    #[test]
    fn test_render_platform_slot_aliases() {
        let template = "https://x.com/{platformDomain}/{cssPlatform}/{platformIdentifier}/{itemID}";
        let info = TemplateRenderer::analyze(template);
        let values = TemplateValues {
            item_id: "42",
            platform_token: Some("micro"),
            ..Default::default()
        };
        assert_eq!(
            TemplateRenderer::render(template, &info, &values).as_deref(),
            Some("https://x.com/micro/micro/micro/42")
        );
    }

    #[test]
    fn test_render_encoded_url() {
        let template = "https://x.com/?url={encodedUrl}&aff=1";
        let info = TemplateRenderer::analyze(template);
        let values = TemplateValues {
            item_id: "1",
            source_url: "https://item.taobao.com/item.htm?id=1",
            ..Default::default()
        };
        assert_eq!(
            TemplateRenderer::render(template, &info, &values).as_deref(),
            Some("https://x.com/?url=https%3A%2F%2Fitem.taobao.com%2Fitem.htm%3Fid%3D1&aff=1")
        );
    }

    #[test]
    fn test_render_leftover_placeholder_fails() {
        let template = "https://x.com/{platformCode}/{itemID}";
        let info = TemplateRenderer::analyze(template);
        let values = TemplateValues { item_id: "1", ..Default::default() };
        assert_eq!(TemplateRenderer::render(template, &info, &values), None);
    }

    #[test]
    fn test_unknown_placeholder() {
        assert_eq!(
            TemplateRenderer::unknown_placeholder("https://x.com/{shop}/{itemID}").as_deref(),
            Some("{shop}")
        );
        assert_eq!(TemplateRenderer::unknown_placeholder("https://x.com/{itemID}"), None);
    }
}
