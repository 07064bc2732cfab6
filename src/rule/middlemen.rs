//! 内置中间商（代购）表
//! 模板中的联盟参数（affcode / ref / partnercode 等）为合同内容，原样保留

use super::model::{IdPattern, MiddlemanRule, PlatformTokenStrategy};
use super::platforms::{ALI_1688, TAOBAO, TMALL, WEIDIAN};

/// 以 `url=` 参数包裹原始链接的中间商共用的提取模式（作用于解码后的内层链接）
fn wrapped_link_patterns() -> Vec<IdPattern> {
    vec![
        IdPattern::item(r"[?&]id=(\d+)"),
        IdPattern::item(r"[?&]itemID=(\d+)"),
        IdPattern::item(r"[?&]itemId=(\d+)"),
        IdPattern::item(r"/offer/(\d+)\.html"),
    ]
}

/// 平台名原样作为标识
fn identity_mapping() -> Vec<(&'static str, &'static str)> {
    vec![
        (TAOBAO, "taobao"),
        (TMALL, "tmall"),
        (ALI_1688, "1688"),
        (WEIDIAN, "weidian"),
    ]
}

/// `shop_type=` 系列（cnfans / mulebuy 同源）
fn shop_type_mapping() -> Vec<(&'static str, &'static str)> {
    vec![
        (TAOBAO, "taobao"),
        (TMALL, "tmall"),
        (ALI_1688, "ali_1688"),
        (WEIDIAN, "weidian"),
    ]
}

fn shop_type_patterns() -> Vec<IdPattern> {
    vec![
        IdPattern::platform_item(r"shop_type=([a-z0-9_]+)&id=(\d+)"),
        IdPattern::item(r"[?&]id=(\d+)"),
    ]
}

/// 内置中间商规则，注册顺序即反向解析时的优先级
pub fn builtin_middlemen() -> Vec<MiddlemanRule> {
    vec![
        MiddlemanRule {
            key: "kakobuy",
            display_name: "KakoBuy",
            aliases: vec![],
            url_template: "https://www.kakobuy.com/item/details?url={encodedUrl}&affcode=dripez",
            platform_mapping: identity_mapping(),
            id_patterns: wrapped_link_patterns(),
            requires_url_decoding: true,
            token_strategy: PlatformTokenStrategy::Direct,
        },
        MiddlemanRule {
            key: "cssbuy",
            display_name: "CSSBuy",
            aliases: vec![],
            url_template: "https://www.cssbuy.com/item-{cssPlatform}-{itemID}.html?promotionCode=dripez",
            platform_mapping: vec![
                (TAOBAO, "taobao"),
                (TMALL, "tmall"),
                (ALI_1688, "1688"),
                (WEIDIAN, "micro"),
            ],
            id_patterns: vec![IdPattern::platform_item(r"item-([a-z0-9]+)-(\d+)\.html")],
            requires_url_decoding: false,
            token_strategy: PlatformTokenStrategy::PathSegmentSynonym {
                synonyms: vec![
                    ("taobao", TAOBAO),
                    ("tmall", TMALL),
                    ("1688", ALI_1688),
                    ("micro", WEIDIAN),
                    ("weidian", WEIDIAN),
                ],
            },
        },
        MiddlemanRule {
            key: "hoobuy",
            display_name: "HooBuy",
            aliases: vec![],
            url_template: "https://hoobuy.com/product/{platformCode}/{itemID}?inviteCode=dripez",
            platform_mapping: vec![(ALI_1688, "0"), (TAOBAO, "1"), (WEIDIAN, "2")],
            id_patterns: vec![IdPattern::platform_item(r"/product/(\d+)/(\d+)")],
            requires_url_decoding: false,
            token_strategy: PlatformTokenStrategy::CodeTable {
                codes: vec![("0", ALI_1688), ("1", TAOBAO), ("2", WEIDIAN)],
            },
        },
        MiddlemanRule {
            key: "cnfans",
            display_name: "CNFans",
            aliases: vec![],
            url_template: "https://cnfans.com/product/?shop_type={platformDomain}&id={itemID}&ref=191373",
            platform_mapping: shop_type_mapping(),
            id_patterns: shop_type_patterns(),
            requires_url_decoding: false,
            token_strategy: PlatformTokenStrategy::Direct,
        },
        MiddlemanRule {
            key: "mulebuy",
            display_name: "MuleBuy",
            aliases: vec![],
            url_template: "https://mulebuy.com/product/?shop_type={platformDomain}&id={itemID}&ref=200345678",
            platform_mapping: shop_type_mapping(),
            id_patterns: shop_type_patterns(),
            requires_url_decoding: false,
            token_strategy: PlatformTokenStrategy::Direct,
        },
        MiddlemanRule {
            key: "basetao",
            display_name: "BaseTao",
            aliases: vec![],
            url_template: "https://www.basetao.com/products/agent/{platformIdentifier}/{itemID}.html?ref=dripez",
            platform_mapping: identity_mapping(),
            id_patterns: vec![IdPattern::platform_item(r"/agent/([a-z0-9]+)/(\d+)\.html")],
            requires_url_decoding: false,
            token_strategy: PlatformTokenStrategy::PathSegmentSynonym {
                synonyms: vec![
                    ("taobao", TAOBAO),
                    ("tb", TAOBAO),
                    ("tmall", TMALL),
                    ("tm", TMALL),
                    ("1688", ALI_1688),
                    ("alibaba", ALI_1688),
                    ("weidian", WEIDIAN),
                    ("wd", WEIDIAN),
                ],
            },
        },
        MiddlemanRule {
            key: "acbuy",
            display_name: "ACBuy",
            aliases: vec![],
            url_template: "https://www.acbuy.com/product?id={itemID}&source={platformDomain}&u=dripez",
            platform_mapping: vec![
                (TAOBAO, "TB"),
                (TMALL, "TM"),
                (ALI_1688, "AL"),
                (WEIDIAN, "WD"),
            ],
            id_patterns: vec![IdPattern::item(r"[?&]id=(\d+)")],
            requires_url_decoding: false,
            token_strategy: PlatformTokenStrategy::SourceQueryParam {
                param: "source",
                codes: vec![("TB", TAOBAO), ("TM", TMALL), ("AL", ALI_1688), ("WD", WEIDIAN)],
            },
        },
        MiddlemanRule {
            key: "allchinabuy",
            display_name: "AllChinaBuy",
            aliases: vec![],
            url_template: "https://www.allchinabuy.com/en/page/buy/?nTag=Home-search&from=search-input&_search=url&url={encodedUrl}&partnercode=dripez",
            platform_mapping: identity_mapping(),
            id_patterns: wrapped_link_patterns(),
            requires_url_decoding: true,
            token_strategy: PlatformTokenStrategy::Direct,
        },
        MiddlemanRule {
            key: "superbuy",
            display_name: "Superbuy",
            aliases: vec!["wegobuy"],
            url_template: "https://www.superbuy.com/en/page/buy/?nTag=Home-search&from=search-input&_search=url&url={encodedUrl}&partnercode=dripez",
            platform_mapping: identity_mapping(),
            id_patterns: wrapped_link_patterns(),
            requires_url_decoding: true,
            token_strategy: PlatformTokenStrategy::Direct,
        },
        MiddlemanRule {
            key: "lovegobuy",
            display_name: "LoveGoBuy",
            aliases: vec![],
            url_template: "https://www.lovegobuy.com/product?shop_type={platformDomain}&id={itemID}&invite_code=dripez",
            platform_mapping: identity_mapping(),
            id_patterns: shop_type_patterns(),
            requires_url_decoding: false,
            token_strategy: PlatformTokenStrategy::Direct,
        },
    ]
}
