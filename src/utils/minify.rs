//! XML minification for generated artifacts.
//!
//! The sitemap is written pretty-printed by default; minification strips the
//! indentation when enabled in `SiteConfig`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify XML based on config.
///
/// Returns `Cow::Borrowed` if minify is disabled, `Cow::Owned` if minified.
pub fn minify_xml<'a>(xml: &'a str, config: &SiteConfig) -> Cow<'a, str> {
    if !config.build.minify {
        Cow::Borrowed(xml)
    } else {
        Cow::Owned(minify_xml_inner(xml))
    }
}

/// Minify XML by removing inter-element whitespace.
///
/// Keeps the XML declaration on its own line so the file stays recognizable.
fn minify_xml_inner(xml: &str) -> String {
    let mut lines = xml.lines().map(str::trim).filter(|line| !line.is_empty());

    let mut out = String::with_capacity(xml.len());
    if let Some(first) = lines.next() {
        out.push_str(first);
        if first.starts_with("<?xml") {
            out.push('\n');
        }
    }
    for line in lines {
        out.push_str(line);
    }
    out
}
