//! 工具模块：ID提取、链接解码、模板渲染
pub mod id_extractor;
pub mod url_decoder;
pub mod template;

pub use self::id_extractor::{ExtractedId, IdExtractor};
pub use self::url_decoder::UrlDecoder;
pub use self::template::{TemplateRenderer, TemplateValues, PLATFORM_SLOTS};
