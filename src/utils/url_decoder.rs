//! 链接解码工具
//! 尽力解码：任何失败都回退为原始输入，不向调用方抛错

use std::borrow::Cow;
use tracing::debug;
use url::Url;

use crate::compiler::{CompiledMiddleman, CompiledRuleLibrary};

/// 链接解码工具
pub struct UrlDecoder;

impl UrlDecoder {
    /// 百分号解码一次，解码结果非法UTF-8时原样返回
    pub fn percent_decode_once(input: &str) -> Cow<'_, str> {
        urlencoding::decode(input).unwrap_or(Cow::Borrowed(input))
    }

    /// 读取查询参数（query_pairs 已完成一次解码）
    pub fn query_param(url: &str, name: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        Self::query_param_of(&parsed, name)
    }

    fn query_param_of(parsed: &Url, name: &str) -> Option<String> {
        parsed
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    /// 取出中间商链接中嵌入的商品链接
    ///
    /// - 中间商不需要解码：原样返回
    /// - 可解析为URL：读取 `url` 参数并再解码一次；无该参数则原样返回
    /// - 无法解析为URL：整体百分号解码，结果以 `http` 开头或包含已知平台名时采用，否则原样返回
    pub fn decode_if_needed<'a>(
        url: &'a str,
        middleman: &CompiledMiddleman,
        compiled_lib: &CompiledRuleLibrary,
    ) -> Cow<'a, str> {
        if !middleman.requires_url_decoding {
            return Cow::Borrowed(url);
        }

        match Url::parse(url) {
            Ok(parsed) => match Self::query_param_of(&parsed, "url") {
                Some(inner) => {
                    let decoded = Self::percent_decode_once(&inner).into_owned();
                    debug!("[{}] embedded link decoded: {}", middleman.key, decoded);
                    Cow::Owned(decoded)
                }
                None => Cow::Borrowed(url),
            },
            Err(e) => {
                debug!("[{}] not a parseable URL ({}), trying raw decode", middleman.key, e);
                let decoded = Self::percent_decode_once(url);
                let plausible = decoded.starts_with("http")
                    || compiled_lib.platform_names().any(|name| decoded.contains(name));
                if plausible {
                    Cow::Owned(decoded.into_owned())
                } else {
                    Cow::Borrowed(url)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::RuleCompiler;
    use crate::rule::RuleLoader;

    fn compiled() -> CompiledRuleLibrary {
        RuleCompiler::compile(&RuleLoader::load()).unwrap()
    }

    #[test]
    fn test_non_decoding_middleman_is_identity() {
        let lib = compiled();
        let cnfans = lib.middleman("cnfans").unwrap();
        let url = "https://cnfans.com/product/?shop_type=taobao&id=1&url=https%3A%2F%2Fx";
        assert_eq!(UrlDecoder::decode_if_needed(url, cnfans, &lib), url);
    }

    #[test]
    fn test_decodes_url_query_param() {
        let lib = compiled();
        let kakobuy = lib.middleman("kakobuy").unwrap();
        let url = "https://www.kakobuy.com/item/details?url=https%3A%2F%2Fweidian.com%2Fitem.html%3FitemID%3D987654&affcode=x";
        assert_eq!(
            UrlDecoder::decode_if_needed(url, kakobuy, &lib),
            "https://weidian.com/item.html?itemID=987654"
        );
    }

    #[test]
    fn test_missing_url_param_returns_input() {
        let lib = compiled();
        let kakobuy = lib.middleman("kakobuy").unwrap();
        let url = "https://item.taobao.com/item.htm?id=1";
        assert_eq!(UrlDecoder::decode_if_needed(url, kakobuy, &lib), url);
    }

    #[test]
    fn test_unparseable_input_falls_back_to_raw_decode() {
        let lib = compiled();
        let kakobuy = lib.middleman("kakobuy").unwrap();
        let url = "kakobuy.com/item/details?url=https%3A%2F%2Fweidian.com%2Fitem.html%3FitemID%3D5";
        assert_eq!(
            UrlDecoder::decode_if_needed(url, kakobuy, &lib),
            "kakobuy.com/item/details?url=https://weidian.com/item.html?itemID=5"
        );
    }

    #[test]
    fn test_unparseable_input_decoding_to_http_is_accepted() {
        let lib = compiled();
        let kakobuy = lib.middleman("kakobuy").unwrap();
        let url = "https%3A%2F%2Fshop.example%2Fitem%3Fid%3D9";
        assert!(Url::parse(url).is_err());
        assert_eq!(
            UrlDecoder::decode_if_needed(url, kakobuy, &lib),
            "https://shop.example/item?id=9"
        );
    }

    #[test]
    fn test_unparseable_and_implausible_returns_original() {
        let lib = compiled();
        let kakobuy = lib.middleman("kakobuy").unwrap();
        let url = "not%20a%20link";
        assert_eq!(UrlDecoder::decode_if_needed(url, kakobuy, &lib), url);
    }

    #[test]
    fn test_query_param() {
        assert_eq!(
            UrlDecoder::query_param("https://www.acbuy.com/product?id=1&source=WD", "source").as_deref(),
            Some("WD")
        );
        assert_eq!(UrlDecoder::query_param("https://www.acbuy.com/product?id=1", "source"), None);
        assert_eq!(UrlDecoder::query_param("no url here", "source"), None);
    }
}
