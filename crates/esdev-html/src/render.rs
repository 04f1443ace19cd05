//! Template rendering.
//!
//! A template is mutated by a fixed sequence of insertions, each anchored on
//! the first occurrence of a marker:
//!
//! 1. title text between `<title>` and `</title>`
//! 2. stylesheet links before `<title>`
//! 3. script tags before `</body>`
//! 4. live-reload snippet before `</body>` (dev mode only)
//!
//! Passes 3 and 4 share an anchor, so the order matters: the snippet is
//! inserted last and ends up closest to `</body>`, after every script tag.
//! A missing marker turns its pass into a no-op.

use crate::snippet::LiveReload;

const TITLE_OPEN: &str = "<title>";
const TITLE_CLOSE: &str = "</title>";
const BODY_CLOSE: &str = "</body>";

/// Inputs of a single render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Template text. `None` selects the built-in page.
    pub template: Option<String>,
    /// Replaces the text of the first `<title>` element.
    pub title: Option<String>,
    /// Script basenames, in tag order.
    pub script_paths: Vec<String>,
    /// Stylesheet basenames, in tag order.
    pub style_paths: Vec<String>,
    /// Inject the live-reload snippet into templates.
    pub dev_mode: bool,
    /// Endpoint the live-reload snippet subscribes to.
    pub live_reload: LiveReload,
}

/// Render the complete HTML document.
///
/// Without a template the built-in page always carries the live-reload
/// snippet, independent of `dev_mode`.
pub fn render(options: &RenderOptions) -> String {
    match options.template.as_deref() {
        Some(template) => render_template(template, options),
        None => render_fallback(options),
    }
}

fn render_template(template: &str, options: &RenderOptions) -> String {
    let mut doc = template.to_string();

    if let Some(title) = &options.title {
        replace_title(&mut doc, title);
    }

    if !options.style_paths.is_empty() {
        insert_before(&mut doc, TITLE_OPEN, &style_tags(&options.style_paths));
    }

    if !options.script_paths.is_empty() {
        insert_before(&mut doc, BODY_CLOSE, &script_tags(&options.script_paths));
    }

    if options.dev_mode {
        insert_before(&mut doc, BODY_CLOSE, &options.live_reload.snippet());
    }

    doc
}

fn render_fallback(options: &RenderOptions) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
	<head>
		<meta charset="UTF-8" />
		<meta http-equiv="X-UA-Compatible" content="IE=edge" />
		<meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<title>{title}</title>
		{styles}
	</head>
	<body>
		<div id="root"></div>
		{scripts}
		{reload}
	</body>
</html>
"#,
        title = options.title.as_deref().unwrap_or_default(),
        styles = style_tags(&options.style_paths),
        scripts = script_tags(&options.script_paths),
        reload = options.live_reload.snippet(),
    )
}

/// Replace the text between the first `<title>` and the `</title>` after it.
///
/// Returns `false` (leaving `doc` untouched) when either marker is missing.
fn replace_title(doc: &mut String, title: &str) -> bool {
    let Some(open) = doc.find(TITLE_OPEN) else {
        return false;
    };
    let start = open + TITLE_OPEN.len();
    let Some(len) = doc[start..].find(TITLE_CLOSE) else {
        return false;
    };

    doc.replace_range(start..start + len, title);
    true
}

/// Insert `block` right before the first occurrence of `marker`.
fn insert_before(doc: &mut String, marker: &str, block: &str) -> bool {
    match doc.find(marker) {
        Some(pos) => {
            doc.insert_str(pos, block);
            true
        }
        None => false,
    }
}

fn style_tags(paths: &[String]) -> String {
    paths
        .iter()
        .map(|path| format!("<link href={path} rel=\"stylesheet\">\n"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn script_tags(paths: &[String]) -> String {
    paths
        .iter()
        .map(|path| format!("<script src={path}></script>\n"))
        .collect::<Vec<_>>()
        .join(" ")
}
