//! HTTP server.
//!
//! `tiny_http` accepts connections on the main thread; each request is
//! routed on a `rayon` pool of `serve.threads` workers. Workers share the
//! immutable config and nothing else.

mod lifecycle;
mod path;
mod response;
mod route;

use crate::{
    config::AppConfig,
    core::{is_shutdown, register_server},
    debug, log,
};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tiny_http::{Request, Server};

use response::Reply;
use route::Incoming;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

/// Bind the configured address, moving to the next port when it is busy.
pub fn bind_server(config: &AppConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    Ok(BoundServer {
        server: Arc::new(server),
        addr,
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking) until Ctrl+C unblocks the server.
    ///
    /// `load` yields the config for each request.
    pub fn run<F>(self, load: F) -> Result<()>
    where
        F: Fn() -> Arc<AppConfig>,
    {
        register_server(Arc::clone(&self.server));

        let config = load();
        let public = format!("http://{}{}/", self.addr, config.path_prefix());
        log!("serve"; "{}", public);
        if !config.static_dir().is_dir() {
            debug!("serve"; "static dir {} not found", config.static_dir().display());
        }

        run_request_loop(&self.server, self.addr, config.serve.threads, load)
    }
}

fn run_request_loop<F>(server: &Server, addr: SocketAddr, threads: usize, load: F) -> Result<()>
where
    F: Fn() -> Arc<AppConfig>,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("serve-{i}"))
        .build()
        .context("failed to create request thread pool")?;
    let local = addr.to_string();

    for request in server.incoming_requests() {
        let config = load();
        let shutting_down = is_shutdown();
        let local = local.clone();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config, &local, shutting_down) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(
    request: Request,
    config: &AppConfig,
    local: &str,
    shutting_down: bool,
) -> Result<()> {
    let started = Instant::now();
    let incoming = Incoming::from_request(&request, local);

    // Early exit if shutdown requested
    let reply = if shutting_down {
        Reply::unavailable()
    } else {
        route::route(&incoming, config)
    };

    debug!(
        "serve";
        "{} {} {} {} {}ms",
        incoming.method,
        incoming.target,
        reply.status,
        reply.content_type,
        started.elapsed().as_millis()
    );
    response::send(request, reply)
}
