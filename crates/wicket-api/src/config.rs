// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server configuration.
//!
//! Everything the auth core needs (token secret, lifetimes, cookie flags)
//! is threaded in through this value; nothing inside the core reads the
//! environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::TokenConfig;

// =============================================================================
// ApiConfig
// =============================================================================

/// Configuration for the API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host address.
    pub host: IpAddr,
    /// Server port.
    pub port: u16,
    /// Deployment mode; controls the `Secure` cookie flag.
    pub deployment: DeploymentMode,
    /// Token configuration.
    pub token: TokenConfig,
    /// Session cookie configuration.
    pub cookie: CookieConfig,
    /// Request timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            deployment: DeploymentMode::Development,
            token: TokenConfig::default(),
            cookie: CookieConfig::default(),
            request_timeout: Duration::from_secs(30),
            max_body_size: 256 * 1024,
        }
    }
}

impl ApiConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Sets the host address.
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the token configuration.
    pub fn with_token(mut self, token: TokenConfig) -> Self {
        self.token = token;
        self
    }

    /// Sets the deployment mode.
    pub fn with_deployment(mut self, deployment: DeploymentMode) -> Self {
        self.deployment = deployment;
        self
    }

    /// Returns `true` if the session cookie must carry the `Secure` flag.
    pub fn secure_cookies(&self) -> bool {
        self.deployment == DeploymentMode::Production
    }
}

// =============================================================================
// DeploymentMode
// =============================================================================

/// Deployment mode of the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Local development; cookies are sent over plain HTTP.
    Development,
    /// Production-equivalent deployment; cookies are HTTPS-only.
    Production,
}

// =============================================================================
// CookieConfig
// =============================================================================

/// Session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Cookie lifetime in days.
    pub ttl_days: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self { ttl_days: 7 }
    }
}

// =============================================================================
// Tests
// =============================================================================
