//! Inbound record as persisted by the panel
//!
//! The generator treats an [`Inbound`] as a read-only snapshot. `settings` and
//! `stream_settings` stay as the raw JSON text the panel stored; they are decoded
//! on every generation call by [`crate::settings`].

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Proxy protocol of an inbound
///
/// Serialized as its lowercase wire name. Values the panel does not know yet are
/// kept verbatim in [`Protocol::Unknown`] so older builds still render a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Protocol {
    /// `vmess`
    VMess,
    /// `vless`
    VLess,
    /// `trojan`
    Trojan,
    /// `shadowsocks`
    Shadowsocks,
    /// `dokodemo-door`
    Dokodemo,
    /// `socks`
    Socks,
    /// `http`
    Http,
    /// `wireguard`
    Wireguard,
    /// `hysteria`
    Hysteria,
    /// `hysteria2`
    Hysteria2,
    /// `tuic`
    Tuic,
    /// `naive`
    Naive,
    /// Any other value, preserved as stored
    Unknown(String),
}

impl Protocol {
    /// Wire name, as stored in the inbound record and used as URI scheme by the fallback link.
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::VMess => "vmess",
            Protocol::VLess => "vless",
            Protocol::Trojan => "trojan",
            Protocol::Shadowsocks => "shadowsocks",
            Protocol::Dokodemo => "dokodemo-door",
            Protocol::Socks => "socks",
            Protocol::Http => "http",
            Protocol::Wireguard => "wireguard",
            Protocol::Hysteria => "hysteria",
            Protocol::Hysteria2 => "hysteria2",
            Protocol::Tuic => "tuic",
            Protocol::Naive => "naive",
            Protocol::Unknown(name) => name,
        }
    }

    /// Protocols only the sing-box core can serve.
    pub fn is_sing_box_only(&self) -> bool {
        matches!(
            self,
            Protocol::Hysteria | Protocol::Hysteria2 | Protocol::Tuic | Protocol::Naive
        )
    }

    /// Protocols whose settings carry a per-client credential list. Bulk link
    /// generation emits one link per usable client for exactly these protocols.
    pub fn has_client_list(&self) -> bool {
        matches!(self, Protocol::VMess | Protocol::VLess | Protocol::Trojan)
    }
}

impl From<String> for Protocol {
    fn from(name: String) -> Self {
        match name.as_str() {
            "vmess" => Protocol::VMess,
            "vless" => Protocol::VLess,
            "trojan" => Protocol::Trojan,
            "shadowsocks" => Protocol::Shadowsocks,
            "dokodemo-door" => Protocol::Dokodemo,
            "socks" => Protocol::Socks,
            "http" => Protocol::Http,
            "wireguard" => Protocol::Wireguard,
            "hysteria" => Protocol::Hysteria,
            "hysteria2" => Protocol::Hysteria2,
            "tuic" => Protocol::Tuic,
            "naive" => Protocol::Naive,
            _ => Protocol::Unknown(name),
        }
    }
}

impl From<&str> for Protocol {
    fn from(name: &str) -> Self {
        Protocol::from(name.to_string())
    }
}

impl From<Protocol> for String {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured listener, as returned by the inbound CRUD layer
///
/// Only `remark`, `enable`, `port`, `protocol`, `settings` and `stream_settings`
/// affect link generation; the accounting and listener columns are carried so the
/// record round-trips through serde unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    /// Primary key assigned by persistence
    #[serde(default)]
    pub id: i64,
    /// Uploaded bytes
    #[serde(default)]
    pub up: i64,
    /// Downloaded bytes
    #[serde(default)]
    pub down: i64,
    /// Traffic quota in bytes (0 = unlimited)
    #[serde(default)]
    pub total: i64,
    /// Display label, used as the link fragment
    #[serde(default)]
    pub remark: String,
    /// Whether the inbound is served (and included in subscriptions)
    #[serde(default)]
    pub enable: bool,
    /// Expiry as unix milliseconds (0 = never)
    #[serde(default)]
    pub expiry_time: i64,
    /// Listen address
    #[serde(default)]
    pub listen: String,
    /// Listen port
    pub port: u16,
    /// Proxy protocol
    pub protocol: Protocol,
    /// Protocol settings JSON
    #[serde(default)]
    pub settings: String,
    /// Transport/security settings JSON
    #[serde(default)]
    pub stream_settings: String,
    /// Core routing tag
    #[serde(default)]
    pub tag: String,
    /// Sniffing settings JSON
    #[serde(default)]
    pub sniffing: String,
}

impl Inbound {
    /// Creates an enabled inbound with empty settings.
    pub fn new(protocol: impl Into<Protocol>, port: u16) -> Self {
        Inbound {
            id: 0,
            up: 0,
            down: 0,
            total: 0,
            remark: String::new(),
            enable: true,
            expiry_time: 0,
            listen: String::new(),
            port,
            protocol: protocol.into(),
            settings: String::new(),
            stream_settings: String::new(),
            tag: String::new(),
            sniffing: String::new(),
        }
    }

    /// Sets the remark.
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = remark.into();
        self
    }

    /// Sets the raw protocol settings JSON.
    pub fn with_settings(mut self, settings: impl Into<String>) -> Self {
        self.settings = settings.into();
        self
    }

    /// Sets the raw stream settings JSON.
    pub fn with_stream_settings(mut self, stream_settings: impl Into<String>) -> Self {
        self.stream_settings = stream_settings.into();
        self
    }

    /// Sets the enable flag.
    pub fn with_enable(mut self, enable: bool) -> Self {
        self.enable = enable;
        self
    }

    /// Remark, or `"{protocol}-{port}"` when the remark is empty.
    pub fn display_remark(&self) -> Cow<'_, str> {
        if self.remark.is_empty() {
            Cow::Owned(format!("{}-{}", self.protocol, self.port))
        } else {
            Cow::Borrowed(&self.remark)
        }
    }
}
