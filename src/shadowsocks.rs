//! Shadowsocks link builder (SIP002)
//!
//! Link format: `ss://base64(method:password)@<host>:<port>#<remark>`
//!
//! Shadowsocks has no per-client list here: the inbound's shared `method` and
//! `password` form the userinfo. `method` defaults to `aes-256-gcm`.

use crate::LinkBuilder;
use crate::constants::scheme;
use crate::encoding::{Endpoint, base64_encode};
use crate::error::Result;
use tracing::trace;

/// Builds an `ss://` link from the shared secret.
#[derive(Debug, Clone)]
pub struct ShadowsocksLink<'a> {
    /// Where the client connects
    pub endpoint: &'a Endpoint<'a>,
    /// Cipher
    pub method: &'a str,
    /// Shared password
    pub password: &'a str,
}

impl LinkBuilder for ShadowsocksLink<'_> {
    fn to_link(&self) -> Result<String> {
        let user_info = base64_encode(&format!("{}:{}", self.method, self.password));
        trace!("Built Shadowsocks link for port {}", self.endpoint.port);
        Ok(format!(
            "{}{}@{}{}",
            scheme::SHADOWSOCKS,
            user_info,
            self.endpoint.authority(),
            self.endpoint.fragment()
        ))
    }
}
