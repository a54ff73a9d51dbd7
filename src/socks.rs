//! SOCKS link builder
//!
//! With credentials: `socks://base64(user:pass)@<host>:<port>#<remark>`.
//! Without (no client, or the first client lacks either field): `socks://<host>:<port>#<remark>`.

use crate::LinkBuilder;
use crate::constants::scheme;
use crate::encoding::{Endpoint, base64_encode};
use crate::error::Result;
use crate::settings::SocksAccount;
use tracing::trace;

/// Builds a `socks://` link.
#[derive(Debug, Clone)]
pub struct SocksLink<'a> {
    /// Where the client connects
    pub endpoint: &'a Endpoint<'a>,
    /// Account, if the inbound requires one
    pub account: Option<&'a SocksAccount>,
}

impl LinkBuilder for SocksLink<'_> {
    fn to_link(&self) -> Result<String> {
        let user_info = self
            .account
            .map(|a| format!("{}@", base64_encode(&format!("{}:{}", a.user, a.pass))))
            .unwrap_or_default();
        trace!("Built SOCKS link for port {}", self.endpoint.port);
        Ok(format!(
            "{}{}{}{}",
            scheme::SOCKS,
            user_info,
            self.endpoint.authority(),
            self.endpoint.fragment()
        ))
    }
}
