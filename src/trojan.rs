//! Trojan link builder
//!
//! Link format: `trojan://<password>@<host>:<port>?<query>#<remark>`
//!
//! Trojan always implies TLS: `security` is the stream's security when one is set,
//! otherwise `tls`. TLS parameters (`sni`, `fp`, `alpn`) are taken from the stored
//! `tlsSettings` whenever that object exists, regardless of the security value.
//! Transport parameters follow the same rules as VLESS.
//!
//! The password is percent-encoded so that reserved characters cannot break the
//! userinfo part.

use crate::LinkBuilder;
use crate::constants::{param, scheme};
use crate::encoding::{Endpoint, QueryParams, encode_component};
use crate::error::Result;
use crate::settings::{StreamSettings, TrojanUser};
use crate::vless::{push_tls_params, push_transport_params};
use tracing::trace;

/// Builds a `trojan://` link for one client.
#[derive(Debug, Clone)]
pub struct TrojanLink<'a> {
    /// Where the client connects
    pub endpoint: &'a Endpoint<'a>,
    /// The client
    pub user: &'a TrojanUser,
    /// Transport and security
    pub stream: &'a StreamSettings,
}

impl TrojanLink<'_> {
    /// Query parameters in emission order.
    pub fn query(&self) -> QueryParams {
        let stream = self.stream;
        let mut query = QueryParams::new();

        query.set(param::TYPE, stream.transport.name());
        if stream.security.is_none() {
            query.set(param::SECURITY, "tls");
        } else {
            query.set(param::SECURITY, stream.security.name());
        }

        push_transport_params(stream, &mut query);

        if let Some(ref tls) = stream.tls {
            push_tls_params(tls, &mut query);
        }
        query
    }
}

impl LinkBuilder for TrojanLink<'_> {
    fn to_link(&self) -> Result<String> {
        trace!("Built Trojan link for port {}", self.endpoint.port);
        Ok(format!(
            "{}{}@{}?{}{}",
            scheme::TROJAN,
            encode_component(&self.user.password),
            self.endpoint.authority(),
            self.query().to_query_string(),
            self.endpoint.fragment()
        ))
    }
}
