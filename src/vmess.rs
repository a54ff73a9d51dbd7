//! VMess link builder
//!
//! Link format: `vmess://base64(JSON)`, standard Base64 with padding over the
//! UTF-8 JSON text.
//!
//! ## Payload fields
//!
//! **Always present**: `v` (`"2"`), `ps` (remark), `add` (host), `port` (number),
//! `id`, `aid` (number), `scy` (`"auto"`), `net`, `type` (`"gun"` for grpc, else
//! `"none"`), `tls` (`"tls"` or `""`).
//!
//! **Present only when set**: `host` and `path` (ws, httpupgrade, grpc service
//! name as `path`); `sni`, `alpn`, `fp` (only when security is tls).
//!
//! Importers match keys by name, so key order carries no meaning.

use crate::LinkBuilder;
use crate::constants::{defaults, scheme};
use crate::encoding::{Endpoint, base64_encode};
use crate::error::Result;
use crate::settings::{Security, StreamSettings, Transport, VMessUser};
use serde::Serialize;
use tracing::trace;

/// VMess V2 JSON payload
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VMessPayload {
    /// Payload version, always `"2"`
    pub v: String,
    /// Remark
    pub ps: String,
    /// Server address
    pub add: String,
    /// Server port
    pub port: u16,
    /// User UUID
    pub id: String,
    /// Alter id
    pub aid: u32,
    /// Encryption
    pub scy: String,
    /// Network
    pub net: String,
    /// Header type (`none`, or `gun` for grpc)
    pub r#type: String,
    /// Host header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Path or gRPC service name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// `tls` or empty
    pub tls: String,
    /// SNI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    /// Comma-joined ALPN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpn: Option<String>,
    /// Fingerprint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fp: Option<String>,
}

/// Builds a `vmess://` link for one client.
#[derive(Debug, Clone)]
pub struct VMessLink<'a> {
    /// Where the client connects
    pub endpoint: &'a Endpoint<'a>,
    /// The client
    pub user: &'a VMessUser,
    /// Transport and security
    pub stream: &'a StreamSettings,
}

impl VMessLink<'_> {
    /// The JSON payload before encoding.
    pub fn payload(&self) -> VMessPayload {
        let stream = self.stream;
        let mut payload = VMessPayload {
            v: defaults::VMESS_VERSION.to_string(),
            ps: self.endpoint.remark.to_string(),
            add: self.endpoint.host.to_string(),
            port: self.endpoint.port,
            id: self.user.id.clone(),
            aid: self.user.alter_id,
            scy: defaults::VMESS_SECURITY.to_string(),
            net: stream.transport.name().to_string(),
            r#type: "none".to_string(),
            host: None,
            path: None,
            tls: String::new(),
            sni: None,
            alpn: None,
            fp: None,
        };

        match &stream.transport {
            Transport::Ws(Some(ws)) => {
                payload.path = Some(ws.path().to_string());
                payload.host = ws.host().map(str::to_string);
            }
            Transport::HttpUpgrade(Some(hu)) => {
                payload.path = Some(hu.path().to_string());
                payload.host = hu.host().map(str::to_string);
            }
            Transport::Grpc(grpc) => {
                payload.r#type = defaults::GRPC_MODE.to_string();
                payload.path = grpc
                    .as_ref()
                    .and_then(|g| g.service_name())
                    .map(str::to_string);
            }
            _ => {}
        }

        if stream.security == Security::Tls {
            payload.tls = "tls".to_string();
        }
        if let Some(tls) = stream.active_tls() {
            payload.sni = tls.server_name().map(str::to_string);
            payload.alpn = tls.alpn();
            payload.fp = tls.fingerprint().map(str::to_string);
        }

        payload
    }
}

impl LinkBuilder for VMessLink<'_> {
    fn to_link(&self) -> Result<String> {
        let json = serde_json::to_string(&self.payload())?;
        trace!("Built VMess link for port {}", self.endpoint.port);
        Ok(format!("{}{}", scheme::VMESS, base64_encode(&json)))
    }
}
