//! Settings parser
//!
//! Decodes the two JSON blobs stored on an inbound into typed values.
//!
//! Decoding is tolerant in both directions:
//!
//! - [`parse_json`] never fails. Empty text, malformed JSON and JSON of the wrong
//!   shape all yield the caller's default.
//! - Every field of the raw structures is optional; empty strings count as absent.
//!
//! The raw [`ParsedSettings`] / [`ClientCredential`] mirror what the panel stores.
//! [`ProtocolSettings`] and [`StreamSettings`] are the typed views builders consume:
//! a protocol variant only exposes the credential fields that protocol uses, and a
//! transport variant only carries its own nested settings.

use crate::constants::defaults;
use crate::inbound::Protocol;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Decodes `raw` as JSON, returning `default` on any failure.
///
/// # Example
///
/// ```rust
/// use inbound_share_link::parse_json;
///
/// let clients: Vec<String> = parse_json("not json", vec!["fallback".to_string()]);
/// assert_eq!(clients, vec!["fallback".to_string()]);
/// ```
pub fn parse_json<T: DeserializeOwned>(raw: &str, default: T) -> T {
    if raw.trim().is_empty() {
        return default;
    }
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!("settings JSON rejected, using defaults: {}", err);
            default
        }
    }
}

/// Returns the string when present and non-empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Deserializes alterId from any JSON number or numeric string. Negative,
/// out-of-range and non-numeric values become 0; fractions are truncated.
fn deserialize_alter_id<'de, D>(d: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let alter_id = match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(alter_id.unwrap_or(0))
}

/// Deserializes an optional text field; numbers become their decimal text and
/// any other JSON type is treated as absent.
fn deserialize_lenient_string<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

// =============================================================================
// Protocol settings
// =============================================================================

/// One entry of the stored `clients` array
///
/// The field set is the union over all protocols; a builder reads only the
/// fields its protocol uses and ignores the rest. Each field is decoded on its
/// own, so an off-type value only blanks that field, never the whole client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientCredential {
    /// User UUID (vmess, vless, socks user name)
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub id: Option<String>,
    /// Password (trojan, hysteria2, socks)
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub password: Option<String>,
    /// Free-text label
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub email: Option<String>,
    /// Legacy vmess alter id
    #[serde(deserialize_with = "deserialize_alter_id")]
    pub alter_id: u32,
    /// VLESS flow control (e.g. `xtls-rprx-vision`)
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub flow: Option<String>,
}

/// Protocol settings blob as stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParsedSettings {
    /// Per-client credentials, in stored order
    pub clients: Option<Vec<ClientCredential>>,
    /// Shared cipher (shadowsocks)
    pub method: Option<String>,
    /// Shared secret (shadowsocks, hysteria2)
    pub password: Option<String>,
}

impl ParsedSettings {
    /// Decodes the blob, defaulting to empty settings.
    pub fn parse(raw: &str) -> Self {
        parse_json(raw, ParsedSettings::default())
    }

    fn into_clients(self) -> Vec<ClientCredential> {
        self.clients.unwrap_or_default()
    }
}

/// A VMess client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VMessUser {
    /// User UUID
    pub id: String,
    /// Alter id (0 for AEAD)
    pub alter_id: u32,
    /// Label
    pub email: Option<String>,
}

/// A VLESS client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VLessUser {
    /// User UUID
    pub id: String,
    /// Flow control
    pub flow: Option<String>,
    /// Label
    pub email: Option<String>,
}

/// A Trojan client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrojanUser {
    /// Password
    pub password: String,
    /// Label
    pub email: Option<String>,
}

/// SOCKS username/password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocksAccount {
    /// User name
    pub user: String,
    /// Password
    pub pass: String,
}

/// Shadowsocks shared cipher and secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowsocksSettings {
    /// Cipher, `aes-256-gcm` when absent
    pub method: String,
    /// Shared password
    pub password: Option<String>,
}

/// Stored clients of a multi-client protocol
///
/// Holds one slot per stored client, in stored order. A slot is empty when that
/// client lacks the credential its protocol requires, so positions still line up
/// with the stored array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientList<T> {
    slots: Vec<Option<T>>,
}

impl<T> ClientList<T> {
    fn from_credentials(
        clients: Vec<ClientCredential>,
        convert: impl Fn(ClientCredential) -> Option<T>,
    ) -> Self {
        ClientList {
            slots: clients.into_iter().map(convert).collect(),
        }
    }

    /// The primary client: always the first stored client (`clients[0]`), never a
    /// later one. `None` when there are no clients or the first one lacks its
    /// credential. Single share links and QR codes are built from this client.
    pub fn primary(&self) -> Option<&T> {
        self.slots.first().and_then(Option::as_ref)
    }

    /// Clients carrying a credential, in stored order.
    pub fn usable(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    /// Number of stored clients, usable or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no clients are stored.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
impl<T> FromIterator<Option<T>> for ClientList<T> {
    fn from_iter<I: IntoIterator<Item = Option<T>>>(iter: I) -> Self {
        ClientList {
            slots: iter.into_iter().collect(),
        }
    }
}

/// Protocol settings, one variant per protocol family with a link builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolSettings {
    /// VMess clients
    VMess(ClientList<VMessUser>),
    /// VLESS clients
    VLess(ClientList<VLessUser>),
    /// Trojan clients
    Trojan(ClientList<TrojanUser>),
    /// Shadowsocks shared secret
    Shadowsocks(ShadowsocksSettings),
    /// SOCKS account of the first client, when it has both user and password
    Socks(Option<SocksAccount>),
    /// Hysteria2 password: shared secret, else first client's password
    Hysteria2(Option<String>),
    /// Protocol without a link builder
    Unsupported,
}

impl ProtocolSettings {
    /// Decodes the settings blob for `protocol`.
    pub fn parse(protocol: &Protocol, raw: &str) -> Self {
        Self::from_parsed(protocol, ParsedSettings::parse(raw))
    }

    /// Selects the typed view of already decoded settings.
    pub fn from_parsed(protocol: &Protocol, settings: ParsedSettings) -> Self {
        match protocol {
            Protocol::VMess => {
                ProtocolSettings::VMess(ClientList::from_credentials(settings.into_clients(), |c| {
                    let id = non_empty(&c.id)?.to_string();
                    Some(VMessUser {
                        id,
                        alter_id: c.alter_id,
                        email: c.email,
                    })
                }))
            }
            Protocol::VLess => {
                ProtocolSettings::VLess(ClientList::from_credentials(settings.into_clients(), |c| {
                    let id = non_empty(&c.id)?.to_string();
                    Some(VLessUser {
                        id,
                        flow: non_empty(&c.flow).map(str::to_string),
                        email: c.email,
                    })
                }))
            }
            Protocol::Trojan => {
                ProtocolSettings::Trojan(ClientList::from_credentials(settings.into_clients(), |c| {
                    let password = non_empty(&c.password)?.to_string();
                    Some(TrojanUser {
                        password,
                        email: c.email,
                    })
                }))
            }
            Protocol::Shadowsocks => ProtocolSettings::Shadowsocks(ShadowsocksSettings {
                method: non_empty(&settings.method)
                    .unwrap_or(defaults::SHADOWSOCKS_METHOD)
                    .to_string(),
                password: non_empty(&settings.password).map(str::to_string),
            }),
            Protocol::Socks => {
                let account = settings.into_clients().into_iter().next().and_then(|c| {
                    Some(SocksAccount {
                        user: non_empty(&c.id)?.to_string(),
                        pass: non_empty(&c.password)?.to_string(),
                    })
                });
                ProtocolSettings::Socks(account)
            }
            Protocol::Hysteria2 => {
                let shared = non_empty(&settings.password).map(str::to_string);
                let password = shared.or_else(|| {
                    settings
                        .into_clients()
                        .into_iter()
                        .next()
                        .and_then(|c| non_empty(&c.password).map(str::to_string))
                });
                ProtocolSettings::Hysteria2(password)
            }
            _ => ProtocolSettings::Unsupported,
        }
    }
}

// =============================================================================
// Stream settings
// =============================================================================

/// WebSocket header block
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WsHeaders {
    /// `Host` header
    #[serde(rename = "Host")]
    pub host: Option<String>,
}

/// `wsSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WsSettings {
    /// Request path
    pub path: Option<String>,
    /// Extra headers
    pub headers: Option<WsHeaders>,
    /// Host (newer Xray layout, used when `headers.Host` is absent)
    pub host: Option<String>,
}

impl WsSettings {
    /// Path, `/` when empty.
    pub fn path(&self) -> &str {
        non_empty(&self.path).unwrap_or(defaults::PATH)
    }

    /// Host header, if any.
    pub fn host(&self) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|h| non_empty(&h.host))
            .or_else(|| non_empty(&self.host))
    }
}

/// `grpcSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrpcSettings {
    /// gRPC service name
    pub service_name: Option<String>,
}

impl GrpcSettings {
    /// Service name, if non-empty.
    pub fn service_name(&self) -> Option<&str> {
        non_empty(&self.service_name)
    }
}

/// `httpupgradeSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpUpgradeSettings {
    /// Request path
    pub path: Option<String>,
    /// Host header
    pub host: Option<String>,
}

impl HttpUpgradeSettings {
    /// Path, `/` when empty.
    pub fn path(&self) -> &str {
        non_empty(&self.path).unwrap_or(defaults::PATH)
    }

    /// Host header, if any.
    pub fn host(&self) -> Option<&str> {
        non_empty(&self.host)
    }
}

/// `tlsSettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TlsSettings {
    /// SNI
    pub server_name: Option<String>,
    /// ALPN protocols
    pub alpn: Option<Vec<String>>,
    /// uTLS fingerprint
    pub fingerprint: Option<String>,
}

impl TlsSettings {
    /// SNI, if non-empty.
    pub fn server_name(&self) -> Option<&str> {
        non_empty(&self.server_name)
    }

    /// Fingerprint, if non-empty.
    pub fn fingerprint(&self) -> Option<&str> {
        non_empty(&self.fingerprint)
    }

    /// ALPN list joined with `,`, if that is non-empty.
    pub fn alpn(&self) -> Option<String> {
        self.alpn
            .as_ref()
            .map(|list| list.join(","))
            .filter(|joined| !joined.is_empty())
    }
}

/// `realitySettings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RealitySettings {
    /// X25519 public key
    pub public_key: Option<String>,
    /// Short id
    pub short_id: Option<String>,
    /// SNI
    pub server_name: Option<String>,
    /// uTLS fingerprint
    pub fingerprint: Option<String>,
    /// Spider path
    pub spider_x: Option<String>,
    /// Server-side SNI list; the first non-empty entry stands in for `serverName`
    pub server_names: Option<Vec<String>>,
    /// Server-side short id list; the first non-empty entry stands in for `shortId`
    pub short_ids: Option<Vec<String>>,
}

fn first_non_empty(list: &Option<Vec<String>>) -> Option<&str> {
    list.as_ref()?
        .iter()
        .find(|s| !s.is_empty())
        .map(String::as_str)
}

impl RealitySettings {
    /// Public key, if non-empty.
    pub fn public_key(&self) -> Option<&str> {
        non_empty(&self.public_key)
    }

    /// Short id, falling back to the first non-empty entry of `shortIds`.
    pub fn short_id(&self) -> Option<&str> {
        non_empty(&self.short_id).or_else(|| first_non_empty(&self.short_ids))
    }

    /// SNI, falling back to the first non-empty entry of `serverNames`.
    pub fn server_name(&self) -> Option<&str> {
        non_empty(&self.server_name).or_else(|| first_non_empty(&self.server_names))
    }

    /// Fingerprint, if non-empty.
    pub fn fingerprint(&self) -> Option<&str> {
        non_empty(&self.fingerprint)
    }

    /// Spider path, if non-empty.
    pub fn spider_x(&self) -> Option<&str> {
        non_empty(&self.spider_x)
    }
}

/// Transport network, carrying the nested settings of that network only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Transport {
    /// Plain TCP (also used when `network` is absent)
    #[default]
    Tcp,
    /// WebSocket
    Ws(Option<WsSettings>),
    /// gRPC
    Grpc(Option<GrpcSettings>),
    /// mKCP
    Kcp,
    /// QUIC
    Quic,
    /// HTTPUpgrade
    HttpUpgrade(Option<HttpUpgradeSettings>),
    /// Any other network name, passed through as-is
    Other(String),
}

impl Transport {
    /// Network name as written to the `type`/`net` field.
    pub fn name(&self) -> &str {
        match self {
            Transport::Tcp => defaults::NETWORK,
            Transport::Ws(_) => "ws",
            Transport::Grpc(_) => "grpc",
            Transport::Kcp => "kcp",
            Transport::Quic => "quic",
            Transport::HttpUpgrade(_) => "httpupgrade",
            Transport::Other(name) => name,
        }
    }
}

/// Security layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Security {
    /// No security layer (also used when `security` is absent)
    #[default]
    None,
    /// TLS
    Tls,
    /// Reality
    Reality,
    /// Any other value, passed through as-is
    Other(String),
}

impl Security {
    /// Value as written to the `security` parameter.
    pub fn name(&self) -> &str {
        match self {
            Security::None => "none",
            Security::Tls => "tls",
            Security::Reality => "reality",
            Security::Other(name) => name,
        }
    }

    /// True for [`Security::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Security::None)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawStreamSettings {
    network: Option<String>,
    security: Option<String>,
    ws_settings: Option<WsSettings>,
    grpc_settings: Option<GrpcSettings>,
    httpupgrade_settings: Option<HttpUpgradeSettings>,
    tls_settings: Option<TlsSettings>,
    reality_settings: Option<RealitySettings>,
}

/// Transport and security settings of an inbound
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSettings {
    /// Active transport
    pub transport: Transport,
    /// Security layer
    pub security: Security,
    /// `tlsSettings` as stored, whatever `security` says
    pub tls: Option<TlsSettings>,
    /// `realitySettings` as stored, whatever `security` says
    pub reality: Option<RealitySettings>,
}

impl StreamSettings {
    /// Decodes the stream settings blob, defaulting to tcp without security.
    pub fn parse(raw: &str) -> Self {
        Self::from_raw(parse_json(raw, RawStreamSettings::default()))
    }

    /// TLS settings, only when `security` is tls.
    pub fn active_tls(&self) -> Option<&TlsSettings> {
        match self.security {
            Security::Tls => self.tls.as_ref(),
            _ => None,
        }
    }

    /// Reality settings, only when `security` is reality.
    pub fn active_reality(&self) -> Option<&RealitySettings> {
        match self.security {
            Security::Reality => self.reality.as_ref(),
            _ => None,
        }
    }

    fn from_raw(raw: RawStreamSettings) -> Self {
        let transport = match non_empty(&raw.network) {
            None | Some("tcp") => Transport::Tcp,
            Some("ws") => Transport::Ws(raw.ws_settings),
            Some("grpc") => Transport::Grpc(raw.grpc_settings),
            Some("kcp") => Transport::Kcp,
            Some("quic") => Transport::Quic,
            Some("httpupgrade") => Transport::HttpUpgrade(raw.httpupgrade_settings),
            Some(other) => Transport::Other(other.to_string()),
        };
        let security = match non_empty(&raw.security) {
            None | Some("none") => Security::None,
            Some("tls") => Security::Tls,
            Some("reality") => Security::Reality,
            Some(other) => Security::Other(other.to_string()),
        };
        StreamSettings {
            transport,
            security,
            tls: raw.tls_settings,
            reality: raw.reality_settings,
        }
    }
}
