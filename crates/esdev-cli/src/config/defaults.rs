use indexmap::IndexMap;
use std::path::PathBuf;

pub fn default_entry() -> Vec<String> {
    vec!["src/index.tsx".to_string()]
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("build")
}

pub fn default_source_root() -> PathBuf {
    PathBuf::from("src")
}

pub fn default_template() -> Option<PathBuf> {
    Some(PathBuf::from("public/index.html"))
}

pub fn default_title() -> String {
    "Home".to_string()
}

pub fn default_host() -> String {
    "localhost".to_string()
}

pub fn default_port() -> u16 {
    3030
}

pub fn default_esbuild() -> PathBuf {
    PathBuf::from("esbuild")
}

/// Images are copied next to the bundle and referenced by URL.
pub fn default_loaders() -> IndexMap<String, String> {
    [".jpg", ".png", ".svg"]
        .into_iter()
        .map(|ext| (ext.to_string(), "file".to_string()))
        .collect()
}

pub fn default_debounce_ms() -> u64 {
    100
}
