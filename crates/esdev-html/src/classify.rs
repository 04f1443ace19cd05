//! Output classification.
//!
//! esbuild reports every emitted file (bundles, source maps, copied assets).
//! Only scripts and stylesheets are referenced from the document; everything
//! else is dropped here.

/// Extension of files referenced with `<script>` tags.
pub const SCRIPT_EXTENSION: &str = ".js";

/// Extension of files referenced with `<link rel="stylesheet">` tags.
pub const STYLE_EXTENSION: &str = ".css";

/// Output basenames grouped by how the document references them.
///
/// Order within each group follows the order the bundler reported, which is
/// also the order the tags are emitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedOutputs {
    pub scripts: Vec<String>,
    pub styles: Vec<String>,
}

impl ClassifiedOutputs {
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.styles.is_empty()
    }
}

/// Partition output paths into script and stylesheet basenames.
///
/// Source maps, fonts, images and anything else without a recognized
/// extension are silently skipped.
pub fn classify<I, S>(paths: I) -> ClassifiedOutputs
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .fold(ClassifiedOutputs::default(), |mut acc, path| {
            let name = basename(path.as_ref());
            if name.ends_with(SCRIPT_EXTENSION) {
                acc.scripts.push(name.to_string());
            } else if name.ends_with(STYLE_EXTENSION) {
                acc.styles.push(name.to_string());
            }
            acc
        })
}

/// Final path segment. esbuild reports `/`-separated paths on every platform,
/// `\` is accepted for paths coming from elsewhere.
fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
