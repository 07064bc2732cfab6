//! 内置源电商平台表
//! 注册顺序即识别优先级

use super::model::{IdPattern, PlatformRule};

pub const TAOBAO: &str = "taobao";
pub const TMALL: &str = "tmall";
pub const ALI_1688: &str = "1688";
pub const WEIDIAN: &str = "weidian";

/// 内置平台规则（taobao, tmall, 1688, weidian）
pub fn builtin_platforms() -> Vec<PlatformRule> {
    vec![
        PlatformRule {
            name: TAOBAO,
            detection: r"taobao\.com",
            canonical_template: "https://item.taobao.com/item.htm?id={itemID}",
            id_patterns: vec![
                IdPattern::item(r"[?&]id=(\d+)"),
                IdPattern::item(r"[?&]itemId=(\d+)"),
                IdPattern::item(r"[?&]item_id=(\d+)"),
            ],
        },
        PlatformRule {
            name: TMALL,
            detection: r"tmall\.com",
            canonical_template: "https://detail.tmall.com/item.htm?id={itemID}",
            id_patterns: vec![
                IdPattern::item(r"[?&]id=(\d+)"),
                IdPattern::item(r"[?&]itemId=(\d+)"),
                IdPattern::item(r"[?&]item_id=(\d+)"),
            ],
        },
        PlatformRule {
            name: ALI_1688,
            detection: r"1688\.com",
            canonical_template: "https://detail.1688.com/offer/{itemID}.html",
            id_patterns: vec![
                IdPattern::item(r"/offer/(\d+)\.html"),
                IdPattern::item(r"[?&]offerId=(\d+)"),
                IdPattern::item(r"[?&]id=(\d+)"),
            ],
        },
        PlatformRule {
            name: WEIDIAN,
            detection: r"weidian\.com",
            canonical_template: "https://weidian.com/item.html?itemID={itemID}",
            id_patterns: vec![
                IdPattern::item(r"[?&]itemID=(\d+)"),
                IdPattern::item(r"[?&]itemId=(\d+)"),
                IdPattern::item(r"[?&]id=(\d+)"),
            ],
        },
    ]
}
