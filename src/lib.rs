//! # Inbound Share Link
//!
//! Renders proxy panel inbounds into client-importable share links and
//! Base64 subscription documents.
//!
//! An [`Inbound`] stores its protocol settings and its transport/security
//! settings as two JSON blobs. Generation decodes both (tolerantly, see
//! [`parse_json`]), picks the builder for the inbound's protocol and renders one
//! URI per client credential.
//!
//! ## Supported Protocols
//!
//! - **VMess** (`vmess://`) — Base64 of a V2 JSON payload
//! - **VLess** (`vless://`) — ws/grpc/httpupgrade transports, TLS and Reality
//! - **Trojan** (`trojan://`) — always TLS
//! - **Shadowsocks** (`ss://`) — SIP002 Base64 userinfo
//! - **SOCKS** (`socks://`) — optional Base64 userinfo
//! - **Hysteria2** (`hysteria2://`)
//!
//! Any other protocol gets the generic `{protocol}://{host}:{port}` as its single
//! share link and contributes nothing to bulk lists or subscriptions.
//!
//! ## Entry points
//!
//! - [`generate_share_link`]: one link, from the first client (`clients[0]`)
//! - [`generate_all_client_links`]: one link per client, in stored order
//! - [`generate_subscription`]: Base64 of the newline-joined links of all enabled inbounds
//!
//! None of them fail: malformed settings degrade to defaults, missing credentials
//! to the fallback link or to omission. Every call is a pure function of its inputs.
//!
//! ## Example
//!
//! ```rust
//! use inbound_share_link::{Inbound, generate_share_link};
//!
//! let inbound = Inbound::new("trojan", 443)
//!     .with_remark("US-1")
//!     .with_settings(r#"{"clients":[{"password":"abc123","email":"u1"}]}"#)
//!     .with_stream_settings(
//!         r#"{"network":"ws","security":"tls","wsSettings":{"path":"/ws"},"tlsSettings":{"serverName":"example.com"}}"#,
//!     );
//!
//! assert_eq!(
//!     generate_share_link(&inbound, "1.2.3.4"),
//!     "trojan://abc123@1.2.3.4:443?type=ws&security=tls&path=%2Fws&sni=example.com#US-1"
//! );
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod constants;
mod encoding;
mod error;
mod hysteria2;
mod inbound;
mod selector;
mod settings;
mod shadowsocks;
mod socks;
mod subscription;
mod trojan;
mod vless;
mod vmess;


pub use config::LinkGenerator;
pub use encoding::{Endpoint, QueryParams, base64_encode, encode_component};
pub use error::{LinkError, Result};
pub use hysteria2::Hysteria2Link;
pub use inbound::{Inbound, Protocol};
pub use selector::{fallback_link, generate_all_client_links, generate_share_link};
pub use settings::{
    ClientCredential, ClientList, GrpcSettings, HttpUpgradeSettings, ParsedSettings,
    ProtocolSettings, RealitySettings, Security, ShadowsocksSettings, SocksAccount,
    StreamSettings, TlsSettings, Transport, TrojanUser, VLessUser, VMessUser, WsHeaders,
    WsSettings, parse_json,
};
pub use shadowsocks::ShadowsocksLink;
pub use socks::SocksLink;
pub use subscription::{generate_subscription, subscription_links};
pub use trojan::TrojanLink;
pub use vless::VLessLink;
pub use vmess::{VMessLink, VMessPayload};

/// Renders one share link
///
/// Implemented by one builder per protocol. A builder is only constructed once
/// its required credential is known to be present, so `to_link` only fails on
/// serialization errors.
///
/// # Example
///
/// ```rust
/// use inbound_share_link::{Endpoint, Inbound, LinkBuilder, SocksLink};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let inbound = Inbound::new("socks", 1080);
/// let endpoint = Endpoint::new(&inbound, "10.0.0.1");
/// let link = SocksLink { endpoint: &endpoint, account: None }.to_link()?;
/// assert_eq!(link, "socks://10.0.0.1:1080#socks-1080");
/// # Ok(())
/// # }
/// ```
pub trait LinkBuilder {
    /// Generate the link string
    ///
    /// # Errors
    ///
    /// Returns `LinkError` if the link payload cannot be serialized.
    fn to_link(&self) -> Result<String>;
}
