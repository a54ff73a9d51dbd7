//! Shared constants for URI schemes, query parameter names and defaults.
//!
//! Query parameter names are the tokens third-party clients look for; renaming
//! any of them breaks import compatibility.

/// Protocol URI scheme prefixes (lowercase, with `://`).
pub mod scheme {
    /// VMess: `vmess://`
    pub const VMESS: &str = "vmess://";
    /// VLESS: `vless://`
    pub const VLESS: &str = "vless://";
    /// Shadowsocks: `ss://`
    pub const SHADOWSOCKS: &str = "ss://";
    /// Trojan: `trojan://`
    pub const TROJAN: &str = "trojan://";
    /// SOCKS: `socks://`
    pub const SOCKS: &str = "socks://";
    /// Hysteria2: `hysteria2://`
    pub const HYSTERIA2: &str = "hysteria2://";
}

/// Query parameter names used by vless/trojan/hysteria2 links.
pub mod param {
    /// Transport network (`tcp`, `ws`, `grpc`, ...).
    pub const TYPE: &str = "type";
    /// Security layer (`tls`, `reality`, ...).
    pub const SECURITY: &str = "security";
    /// WebSocket / HTTPUpgrade path.
    pub const PATH: &str = "path";
    /// WebSocket / HTTPUpgrade host header.
    pub const HOST: &str = "host";
    /// gRPC service name.
    pub const SERVICE_NAME: &str = "serviceName";
    /// gRPC mode.
    pub const MODE: &str = "mode";
    /// TLS / Reality server name.
    pub const SNI: &str = "sni";
    /// uTLS fingerprint.
    pub const FP: &str = "fp";
    /// Comma-joined ALPN list.
    pub const ALPN: &str = "alpn";
    /// Reality public key.
    pub const PBK: &str = "pbk";
    /// Reality short id.
    pub const SID: &str = "sid";
    /// Reality spider path.
    pub const SPX: &str = "spx";
    /// VLESS flow control.
    pub const FLOW: &str = "flow";
    /// Hysteria2 certificate check toggle.
    pub const INSECURE: &str = "insecure";
}

/// Default values substituted for absent fields.
pub mod defaults {
    /// Host used when the panel has no reachable address configured.
    pub const HOST: &str = "YOUR_SERVER_IP";
    /// Shadowsocks cipher when `method` is absent.
    pub const SHADOWSOCKS_METHOD: &str = "aes-256-gcm";
    /// Path emitted for ws/httpupgrade when the inbound leaves it empty.
    pub const PATH: &str = "/";
    /// Network emitted when stream settings leave it empty.
    pub const NETWORK: &str = "tcp";
    /// gRPC mode emitted alongside `serviceName`.
    pub const GRPC_MODE: &str = "gun";
    /// VMess payload version.
    pub const VMESS_VERSION: &str = "2";
    /// VMess encryption.
    pub const VMESS_SECURITY: &str = "auto";
}
