//! Live-reload client snippet.

use std::fmt;

/// Path of the Server-Sent Events endpoint the snippet subscribes to.
pub const SUBSCRIBE_PATH: &str = "/subscribe";

/// Where the browser should subscribe for refresh events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveReload {
    pub host: String,
    pub port: u16,
}

impl LiveReload {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Full URL of the subscription endpoint.
    pub fn subscribe_url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, SUBSCRIBE_PATH)
    }

    /// Script block that reloads the page on any event from the dev server.
    ///
    /// Message content is ignored, every event means "reload now".
    pub fn snippet(&self) -> String {
        format!(
            "\n\t<script>\n\
             \tconst eventSource = new EventSource(\"{}\")\n\
             \teventSource.onerror = () => {{ console.log('Error with live-server') }}\n\
             \teventSource.onmessage = () => {{ window.location.reload() }}\n\
             \t</script>\n",
            self.subscribe_url()
        )
    }
}

impl Default for LiveReload {
    fn default() -> Self {
        Self::new("localhost", 3030)
    }
}

impl fmt::Display for LiveReload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subscribe_url())
    }
}
