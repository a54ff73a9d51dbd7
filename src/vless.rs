//! VLESS link builder
//!
//! URI format: `vless://<id>@<host>:<port>?<query>#<remark>`
//!
//! **Query parameters**, in order of first appearance:
//!
//! | Parameter | When |
//! |-----------|------|
//! | `type` | always; network, `tcp` when absent |
//! | `security` | security is set and not `none` |
//! | `path`, `host` | ws / httpupgrade settings present (`path` defaults to `/`) |
//! | `serviceName`, `mode=gun` | grpc settings present |
//! | `sni`, `fp`, `alpn` | security is tls and tls settings present |
//! | `pbk`, `sid`, `sni`, `fp`, `spx` | security is reality and reality settings present |
//! | `flow` | client has a flow |
//!
//! Parameters whose source value is empty are omitted rather than left blank.

use crate::LinkBuilder;
use crate::constants::{defaults, param, scheme};
use crate::encoding::{Endpoint, QueryParams};
use crate::error::Result;
use crate::settings::{RealitySettings, StreamSettings, TlsSettings, Transport, VLessUser};
use tracing::trace;

/// Adds the transport parameters shared by vless and trojan links.
pub(crate) fn push_transport_params(stream: &StreamSettings, query: &mut QueryParams) {
    match &stream.transport {
        Transport::Ws(Some(ws)) => {
            query.set(param::PATH, ws.path());
            query.set_opt(param::HOST, ws.host());
        }
        Transport::HttpUpgrade(Some(hu)) => {
            query.set(param::PATH, hu.path());
            query.set_opt(param::HOST, hu.host());
        }
        Transport::Grpc(Some(grpc)) => {
            query.set_opt(param::SERVICE_NAME, grpc.service_name());
            query.set(param::MODE, defaults::GRPC_MODE);
        }
        _ => {}
    }
}

/// Adds `sni`, `fp` and `alpn` from TLS settings.
pub(crate) fn push_tls_params(tls: &TlsSettings, query: &mut QueryParams) {
    query.set_opt(param::SNI, tls.server_name());
    query.set_opt(param::FP, tls.fingerprint());
    query.set_opt(param::ALPN, tls.alpn());
}

fn push_reality_params(reality: &RealitySettings, query: &mut QueryParams) {
    query.set(param::SECURITY, "reality");
    query.set_opt(param::PBK, reality.public_key());
    query.set_opt(param::SID, reality.short_id());
    query.set_opt(param::SNI, reality.server_name());
    query.set_opt(param::FP, reality.fingerprint());
    query.set_opt(param::SPX, reality.spider_x());
}

/// Builds a `vless://` link for one client.
#[derive(Debug, Clone)]
pub struct VLessLink<'a> {
    /// Where the client connects
    pub endpoint: &'a Endpoint<'a>,
    /// The client
    pub user: &'a VLessUser,
    /// Transport and security
    pub stream: &'a StreamSettings,
}

impl VLessLink<'_> {
    /// Query parameters in emission order.
    pub fn query(&self) -> QueryParams {
        let stream = self.stream;
        let mut query = QueryParams::new();

        query.set(param::TYPE, stream.transport.name());
        if !stream.security.is_none() {
            query.set(param::SECURITY, stream.security.name());
        }

        push_transport_params(stream, &mut query);

        if let Some(tls) = stream.active_tls() {
            push_tls_params(tls, &mut query);
        }
        if let Some(reality) = stream.active_reality() {
            push_reality_params(reality, &mut query);
        }

        query.set_opt(param::FLOW, self.user.flow.as_deref());
        query
    }
}

impl LinkBuilder for VLessLink<'_> {
    fn to_link(&self) -> Result<String> {
        trace!("Built VLESS link for port {}", self.endpoint.port);
        Ok(format!(
            "{}{}@{}?{}{}",
            scheme::VLESS,
            self.user.id,
            self.endpoint.authority(),
            self.query().to_query_string(),
            self.endpoint.fragment()
        ))
    }
}
