use serde::Serialize;

/// Structured SEO facts for one page
///
/// Produced once per retrieval and never mutated afterwards. Field names
/// serialize in camelCase for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFacts {
    pub url: String,
    pub keyword: Option<String>,
    pub status: StatusFacts,
    pub title: TitleFacts,
    pub h1: HeadingFacts,
    pub meta: MetaFacts,
    pub images: ImageFacts,
    pub canonical: CanonicalFacts,
    pub links: LinkFacts,
    pub url_shape: UrlShape,
}

/// HTTP status and header-level robots directives
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFacts {
    pub code: u16,
    pub is_success: bool,
    /// `noindex` in the `x-robots-tag` header
    pub noindex: bool,
    /// `nofollow` in the `x-robots-tag` header
    pub nofollow: bool,
}

impl Default for StatusFacts {
    fn default() -> Self {
        Self {
            code: 200,
            is_success: true,
            noindex: false,
            nofollow: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleFacts {
    pub exists: bool,
    pub text: String,
    pub length: usize,
    pub is_optimal: bool,
    /// `None` when no keyword was supplied
    pub has_keyword: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingFacts {
    pub count: usize,
    /// Cleaned H1 texts in document order
    pub texts: Vec<String>,
    pub is_optimal: bool,
    pub keyword_present: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaFacts {
    pub exists: bool,
    pub text: String,
    pub length: usize,
    pub is_optimal: bool,
    /// `noindex` in `<meta name="robots">`
    pub noindex: bool,
    /// `nofollow` in `<meta name="robots">`
    pub nofollow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFacts {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
    /// Alt coverage, 0-100 (100 when the page has no images)
    pub percentage: u32,
    pub missing_alt: Vec<MissingAlt>,
}

impl Default for ImageFacts {
    fn default() -> Self {
        Self {
            total: 0,
            with_alt: 0,
            without_alt: 0,
            percentage: 100,
            missing_alt: Vec::new(),
        }
    }
}

/// An image without alt text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingAlt {
    pub filename: String,
    pub src: String,
    pub absolute_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalFacts {
    pub exists: bool,
    pub url: Option<String>,
    pub is_self_referencing: bool,
    pub is_valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkFacts {
    /// Every anchor with an href, before filtering
    pub total_seen: usize,
    pub internal: usize,
    pub external: usize,
    pub broken: usize,
    /// internal + external among the inspected links
    pub checked_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlShape {
    pub length: usize,
    pub is_short: bool,
    pub has_params: bool,
    pub depth: usize,
    pub is_readable: bool,
    /// Scheme with trailing colon, e.g. `https:`
    pub protocol: String,
}
