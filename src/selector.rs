//! Link selection
//!
//! Two ways to turn one inbound into links:
//!
//! - [`generate_share_link`]: exactly one URI, from the primary client
//!   (`clients[0]`) or the shared secret. When no builder applies, or the
//!   credential is missing, the generic `{protocol}://{host}:{port}` is returned.
//! - [`generate_all_client_links`]: one URI per usable client for vmess, vless and
//!   trojan, in stored order; clients without a credential are skipped. Other
//!   protocols yield their single link as a one-element list, or nothing when no
//!   real link can be built. The generic fallback never appears here.

use crate::LinkBuilder;
use crate::encoding::Endpoint;
use crate::error::{LinkError, Result};
use crate::hysteria2::Hysteria2Link;
use crate::inbound::Inbound;
use crate::settings::{ProtocolSettings, StreamSettings};
use crate::shadowsocks::ShadowsocksLink;
use crate::socks::SocksLink;
use crate::trojan::TrojanLink;
use crate::vless::VLessLink;
use crate::vmess::VMessLink;
use tracing::debug;

/// Decoded view of one inbound, built fresh for every call.
struct LinkContext<'a> {
    inbound: &'a Inbound,
    endpoint: Endpoint<'a>,
    settings: ProtocolSettings,
    stream: StreamSettings,
}

impl<'a> LinkContext<'a> {
    fn new(inbound: &'a Inbound, host: &'a str) -> Self {
        LinkContext {
            inbound,
            endpoint: Endpoint::new(inbound, host),
            settings: ProtocolSettings::parse(&inbound.protocol, &inbound.settings),
            stream: StreamSettings::parse(&inbound.stream_settings),
        }
    }

    fn missing(&self, what: &str) -> LinkError {
        LinkError::MissingCredential(format!("{} {}", self.inbound.protocol, what))
    }

    /// Link of the primary client or shared secret.
    fn primary_link(&self) -> Result<String> {
        let endpoint = &self.endpoint;
        let stream = &self.stream;
        match &self.settings {
            ProtocolSettings::VMess(clients) => {
                let user = clients.primary().ok_or_else(|| self.missing("client id"))?;
                VMessLink {
                    endpoint,
                    user,
                    stream,
                }
                .to_link()
            }
            ProtocolSettings::VLess(clients) => {
                let user = clients.primary().ok_or_else(|| self.missing("client id"))?;
                VLessLink {
                    endpoint,
                    user,
                    stream,
                }
                .to_link()
            }
            ProtocolSettings::Trojan(clients) => {
                let user = clients
                    .primary()
                    .ok_or_else(|| self.missing("client password"))?;
                TrojanLink {
                    endpoint,
                    user,
                    stream,
                }
                .to_link()
            }
            ProtocolSettings::Shadowsocks(ss) => {
                let password = ss
                    .password
                    .as_deref()
                    .ok_or_else(|| self.missing("password"))?;
                ShadowsocksLink {
                    endpoint,
                    method: &ss.method,
                    password,
                }
                .to_link()
            }
            ProtocolSettings::Socks(account) => SocksLink {
                endpoint,
                account: account.as_ref(),
            }
            .to_link(),
            ProtocolSettings::Hysteria2(password) => {
                let password = password
                    .as_deref()
                    .ok_or_else(|| self.missing("password"))?;
                Hysteria2Link { endpoint, password }.to_link()
            }
            ProtocolSettings::Unsupported => Err(LinkError::UnsupportedProtocol(
                self.inbound.protocol.to_string(),
            )),
        }
    }

    fn log_omitted(&self, err: LinkError) {
        debug!(
            "Inbound {} (port {}) link omitted: {}",
            self.inbound.id, self.inbound.port, err
        );
    }

    /// One link per usable client, or the primary link as a one-element list.
    fn all_links(&self) -> Vec<String> {
        if !self.inbound.protocol.has_client_list() {
            return self
                .primary_link()
                .map_err(|err| self.log_omitted(err))
                .into_iter()
                .collect();
        }

        let endpoint = &self.endpoint;
        let stream = &self.stream;
        let (stored, results): (usize, Vec<Result<String>>) = match &self.settings {
            ProtocolSettings::VMess(clients) => (
                clients.len(),
                clients
                    .usable()
                    .map(|user| {
                        VMessLink {
                            endpoint,
                            user,
                            stream,
                        }
                        .to_link()
                    })
                    .collect(),
            ),
            ProtocolSettings::VLess(clients) => (
                clients.len(),
                clients
                    .usable()
                    .map(|user| {
                        VLessLink {
                            endpoint,
                            user,
                            stream,
                        }
                        .to_link()
                    })
                    .collect(),
            ),
            ProtocolSettings::Trojan(clients) => (
                clients.len(),
                clients
                    .usable()
                    .map(|user| {
                        TrojanLink {
                            endpoint,
                            user,
                            stream,
                        }
                        .to_link()
                    })
                    .collect(),
            ),
            _ => (0, Vec::new()),
        };

        let links: Vec<String> = results
            .into_iter()
            .filter_map(|result| result.map_err(|err| self.log_omitted(err)).ok())
            .collect();

        if links.len() < stored {
            debug!(
                "Inbound {} (port {}): {} of {} clients produced no link",
                self.inbound.id,
                self.inbound.port,
                stored - links.len(),
                stored
            );
        }
        links
    }
}

/// Generic `{protocol}://{host}:{port}` link without credential or parameters.
pub fn fallback_link(inbound: &Inbound, host: &str) -> String {
    format!(
        "{}://{}",
        inbound.protocol,
        Endpoint::new(inbound, host).authority()
    )
}

/// Returns exactly one share link for `inbound`.
///
/// Built from the primary client (`clients[0]`) or the shared secret; falls back
/// to [`fallback_link`] when the protocol has no builder or that credential is
/// missing.
///
/// # Example
///
/// ```rust
/// use inbound_share_link::{Inbound, generate_share_link};
///
/// let inbound = Inbound::new("vless", 443)
///     .with_remark("edge")
///     .with_settings(r#"{"clients":[{"id":"b831381d-6324-4d53-ad4f-8cda48b30811"}]}"#);
/// assert_eq!(
///     generate_share_link(&inbound, "example.com"),
///     "vless://b831381d-6324-4d53-ad4f-8cda48b30811@example.com:443?type=tcp#edge"
/// );
/// ```
pub fn generate_share_link(inbound: &Inbound, host: &str) -> String {
    match LinkContext::new(inbound, host).primary_link() {
        Ok(link) => link,
        Err(err) => {
            debug!(
                "Inbound {} (port {}) falls back to generic link: {}",
                inbound.id, inbound.port, err
            );
            fallback_link(inbound, host)
        }
    }
}

/// Returns one share link per client of `inbound`, in stored client order.
///
/// For vmess, vless and trojan the result holds one link per client carrying its
/// credential. For other protocols it holds the single share link, or nothing when
/// only the generic fallback could be produced.
pub fn generate_all_client_links(inbound: &Inbound, host: &str) -> Vec<String> {
    LinkContext::new(inbound, host).all_links()
}
