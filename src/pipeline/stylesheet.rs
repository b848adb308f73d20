//! Stylesheet loading and minification.
//!
//! The bundled stylesheet is compiled into the binary so the tool works from
//! any install location. Minification goes through lightningcss: parse,
//! merge/shorten rules, print with `minify: true`. Comments and
//! insignificant whitespace disappear in the process.

use crate::config::StylesheetSource;
use crate::error::Md2ClipError;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use tracing::debug;

/// The stylesheet shipped with the program.
pub const BUNDLED_CSS: &str = include_str!("../../assets/base.css");

/// Read the stylesheet text for `source`.
pub async fn load_stylesheet(source: &StylesheetSource) -> Result<String, Md2ClipError> {
    match source {
        StylesheetSource::Bundled => Ok(BUNDLED_CSS.to_string()),
        StylesheetSource::File(path) => {
            let css = tokio::fs::read_to_string(path).await.map_err(|e| {
                Md2ClipError::StylesheetReadFailed {
                    path: path.clone(),
                    source: e,
                }
            })?;
            debug!("Read stylesheet {} ({} bytes)", path.display(), css.len());
            Ok(css)
        }
    }
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, Md2ClipError> {
    let mut stylesheet = StyleSheet::parse(source, ParserOptions::default()).map_err(|e| {
        Md2ClipError::InvalidStylesheet {
            detail: e.to_string(),
        }
    })?;

    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| Md2ClipError::InvalidStylesheet {
            detail: e.to_string(),
        })?;

    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| Md2ClipError::InvalidStylesheet {
            detail: e.to_string(),
        })?;

    Ok(result.code)
}
