//! Embedded stylesheets and images.

use base64::{Engine as _, engine::general_purpose};
use std::{collections::HashMap, sync::OnceLock};

static ASSET_CACHE: OnceLock<HashMap<&'static str, String>> = OnceLock::new();

macro_rules! embed_asset {
    ($name:expr, $mime:expr, $path:expr) => {
        (
            $name,
            $mime,
            include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/", $path)).as_slice(),
        )
    };
}

const ASSETS: &[(&str, &str, &[u8])] = &[embed_asset!(
    "google",
    "image/svg+xml",
    "assets/images/google.svg"
)];

const STYLES: &[(&str, &str)] = &[
    (
        "base",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/styles/base.css")),
    ),
    (
        "enter",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/styles/enter.css")),
    ),
    (
        "toast",
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/styles/toast.css")),
    ),
];

pub struct ResourceLoader;

impl ResourceLoader {
    fn get_all_assets() -> HashMap<&'static str, String> {
        ASSETS
            .iter()
            .map(|&(name, mime, bytes)| {
                let data = general_purpose::STANDARD.encode(bytes);
                (name, format!("data:{mime};base64,{data}"))
            })
            .collect()
    }

    /// Returns the asset as a data URI, empty when unknown.
    pub fn get_asset(name: &str) -> String {
        ASSET_CACHE
            .get_or_init(Self::get_all_assets)
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_css(name: &str) -> &'static str {
        STYLES
            .iter()
            .find(|(n, _)| *n == name)
            .map_or("", |(_, css)| css)
    }

    pub fn combine_css(styles: &[&str]) -> String {
        styles
            .iter()
            .map(|&n| Self::get_css(n))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn get_app_css() -> String {
        Self::combine_css(&["base", "enter", "toast"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_are_data_uris() {
        assert!(ResourceLoader::get_asset("google").starts_with("data:image/svg+xml;base64,"));
        assert_eq!(ResourceLoader::get_asset("missing"), "");
    }

    #[test]
    fn test_app_css_contains_every_sheet() {
        let css = ResourceLoader::get_app_css();
        for name in ["base", "enter", "toast"] {
            assert!(css.contains(ResourceLoader::get_css(name)));
        }
        assert_eq!(ResourceLoader::get_css("missing"), "");
    }
}
