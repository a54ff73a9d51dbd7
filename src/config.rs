//! Generator configuration
//!
//! The only setting is the address clients should connect to. It is supplied by
//! the panel (usually the host the dashboard was reached on); the generator never
//! derives it.

use crate::constants::defaults;
use crate::inbound::Inbound;
use crate::selector::{generate_all_client_links, generate_share_link};
use crate::settings::parse_json;
use crate::subscription::generate_subscription;
use serde::{Deserialize, Serialize};

/// Share-link generator bound to a server address
///
/// # Example
///
/// ```rust
/// use inbound_share_link::{Inbound, LinkGenerator};
///
/// let generator = LinkGenerator::from_json(r#"{"host":"203.0.113.7"}"#);
/// let inbound = Inbound::new("socks", 1080).with_remark("lan");
/// assert_eq!(generator.share_link(&inbound), "socks://203.0.113.7:1080#lan");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkGenerator {
    /// Server address written into every link
    pub host: String,
}

impl Default for LinkGenerator {
    fn default() -> Self {
        LinkGenerator {
            host: defaults::HOST.to_string(),
        }
    }
}

impl LinkGenerator {
    /// Generator for `host`.
    pub fn new(host: impl Into<String>) -> Self {
        LinkGenerator { host: host.into() }
    }

    /// Loads the configuration from JSON; malformed or empty text yields the default.
    pub fn from_json(raw: &str) -> Self {
        let config = parse_json(raw, LinkGenerator::default());
        if config.host.is_empty() {
            LinkGenerator::default()
        } else {
            config
        }
    }

    /// See [`generate_share_link`].
    pub fn share_link(&self, inbound: &Inbound) -> String {
        generate_share_link(inbound, &self.host)
    }

    /// See [`generate_all_client_links`].
    pub fn all_client_links(&self, inbound: &Inbound) -> Vec<String> {
        generate_all_client_links(inbound, &self.host)
    }

    /// See [`generate_subscription`].
    pub fn subscription(&self, inbounds: &[Inbound]) -> String {
        generate_subscription(inbounds, &self.host)
    }
}
