// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Server spawning and readiness plumbing for system tests.
// Purpose: Provide deterministic startup and teardown for end-to-end suites.
// Dependencies: osoc-select-web, reqwest, tokio
// ============================================================================

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

use std::net::SocketAddr;
use std::net::TcpListener;
use std::time::Duration;

use osoc_select_web::SelectConfig;
use osoc_select_web::SelectServer;
use osoc_select_web::server::ServerError;
use tokio::task::JoinHandle;

/// Handle for a spawned selection server.
pub struct ServerHandle {
    /// Base URL of the spawned server.
    base_url: String,
    /// The serving task.
    join: JoinHandle<Result<(), ServerError>>,
}

impl ServerHandle {
    /// Returns the server's base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shuts the server task down.
    pub async fn shutdown(self) {
        self.join.abort();
        let _ = self.join.await;
    }
}

/// Returns a free loopback address for test servers.
pub fn allocate_bind_addr() -> Result<SocketAddr, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("failed to bind loopback: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("failed to read listener address: {err}"))?;
    drop(listener);
    Ok(addr)
}

/// Spawns a server from a TOML config fragment with the bind address filled
/// in, and waits for it to answer the root probe.
pub async fn spawn_server(config_fragment: &str) -> Result<ServerHandle, String> {
    let addr = allocate_bind_addr()?;
    let config_toml = format!("[server]\nbind = \"{addr}\"\n{config_fragment}");
    let config: SelectConfig =
        toml::from_str(&config_toml).map_err(|err| format!("bad test config: {err}"))?;
    let server =
        SelectServer::from_config(config).map_err(|err| format!("server build failed: {err}"))?;
    let join = tokio::spawn(server.serve());
    let handle = ServerHandle {
        base_url: format!("http://{addr}"),
        join,
    };
    await_ready(&handle).await?;
    Ok(handle)
}

/// Polls the root probe until the server answers or the deadline passes.
async fn await_ready(handle: &ServerHandle) -> Result<(), String> {
    let client = reqwest::Client::new();
    for _ in 0..100 {
        if let Ok(response) = client.get(handle.base_url()).send().await
            && response.status() == 200
        {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    Err("server did not become ready".to_string())
}

/// Config fragment seeding the standard test admin account.
pub const ADMIN_CONFIG: &str =
    "[auth.bootstrap_admin]\nusername = \"admin\"\nemail = \"admin@osoc.be\"\npassword = \"admin-secret\"\n";

/// Logs the standard test admin in and returns its bearer token.
pub async fn login_admin(handle: &ServerHandle) -> Result<String, String> {
    let response = reqwest::Client::new()
        .post(format!("{}/login", handle.base_url()))
        .json(&serde_json::json!({ "email": "admin@osoc.be", "password": "admin-secret" }))
        .send()
        .await
        .map_err(|err| format!("login request failed: {err}"))?;
    if response.status() != 200 {
        return Err(format!("login rejected: {}", response.status()));
    }
    let body: serde_json::Value =
        response.json().await.map_err(|err| format!("bad login body: {err}"))?;
    body["token"].as_str().map(str::to_string).ok_or_else(|| "login body missing token".to_string())
}
