//! index.html generation for esbuild builds.
//!
//! This crate turns the list of files a build emitted into the `index.html`
//! that loads them. It is split into three small stages:
//!
//! - [`classify`] - partition output paths into script and stylesheet basenames
//! - [`render`] - substitute title, asset tags and the live-reload snippet
//!   into a template (or a built-in skeleton)
//! - [`writer`] - glue that reads the template, renders, and writes
//!   `<out_dir>/index.html`
//!
//! # Example
//!
//! ```rust
//! use esdev_html::{classify, render, LiveReload, RenderOptions};
//!
//! let outputs = classify(["build/bundle.js", "build/bundle.css", "build/bundle.js.map"]);
//! let html = render(&RenderOptions {
//!     template: Some("<title>Old</title><body></body>".to_string()),
//!     title: Some("Home".to_string()),
//!     script_paths: outputs.scripts,
//!     style_paths: outputs.styles,
//!     dev_mode: false,
//!     live_reload: LiveReload::default(),
//! });
//!
//! assert!(html.contains("<title>Home</title>"));
//! assert!(html.contains("<script src=bundle.js></script>"));
//! ```

pub mod classify;
pub mod error;
pub mod render;
pub mod snippet;
pub mod writer;

pub use classify::{ClassifiedOutputs, classify};
pub use error::{HtmlError, Result};
pub use render::{RenderOptions, render};
pub use snippet::LiveReload;
pub use writer::{INDEX_FILE_NAME, IndexHtmlWriter};
