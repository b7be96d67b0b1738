//! Shared test harness for integration tests.
//!
//! Provides [`FakeUpstream`], an in-process [`JsonFetcher`] that answers
//! requests from per-route responders and records every request it sees,
//! plus helpers to build a [`RandomService`] and router on top of it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use randomedia::config::Config;
use randomedia::server::{create_router, AppContext};
use randomedia::service::RandomService;
use randomedia::upstream::{JsonFetcher, UpstreamRequest};
use randomedia_core::{Error, Result};
use serde_json::Value;

type Responder = Box<dyn Fn(&UpstreamRequest) -> Result<Value> + Send + Sync>;

/// Fake upstream keyed by `(upstream, path)`.
///
/// Unrouted requests fail with a 404 upstream status, the same way a real
/// API answers an unknown resource.
#[derive(Default)]
pub struct FakeUpstream {
    routes: HashMap<(String, String), Responder>,
    log: Mutex<Vec<UpstreamRequest>>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `(upstream, path)` with the result of `responder`.
    pub fn route(
        mut self,
        upstream: &str,
        path: &str,
        responder: impl Fn(&UpstreamRequest) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.routes
            .insert((upstream.to_string(), path.to_string()), Box::new(responder));
        self
    }

    /// Answer `(upstream, path)` with a fixed JSON document.
    pub fn json(self, upstream: &str, path: &str, body: Value) -> Self {
        self.route(upstream, path, move |_| Ok(body.clone()))
    }

    /// Every request seen so far, in order.
    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.log.lock().unwrap().clone()
    }

    /// Requests sent to one upstream, in order.
    pub fn requests_to(&self, upstream: &str) -> Vec<UpstreamRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.upstream == upstream)
            .collect()
    }
}

#[async_trait]
impl JsonFetcher for FakeUpstream {
    async fn fetch_json(&self, request: &UpstreamRequest) -> Result<Value> {
        self.log.lock().unwrap().push(request.clone());
        match self
            .routes
            .get(&(request.upstream.to_string(), request.path.clone()))
        {
            Some(responder) => responder(request),
            None => Err(Error::upstream_status(
                request.upstream,
                404,
                format!("no route for {}", request.path),
            )),
        }
    }
}

/// Default config with every credential filled in.
pub fn test_config() -> Config {
    let mut config = Config::default();
    let upstreams = &mut config.upstreams;
    upstreams.tmdb.api_key = "tmdb-key".into();
    upstreams.utelly.host = "utelly.example".into();
    upstreams.utelly.api_key = "utelly-key".into();
    upstreams.spotify.token = "spotify-token".into();
    upstreams.seatgeek.client_id = "sg-id".into();
    upstreams.seatgeek.client_secret = "sg-secret".into();
    upstreams.youtube.api_key = "google-key".into();
    config
}

pub fn service(config: &Config, upstream: &Arc<FakeUpstream>) -> RandomService {
    RandomService::with_fetcher(config, upstream.clone()).expect("service builds")
}

/// Router wired to `upstream` with the given config.
pub fn router(config: Config, upstream: &Arc<FakeUpstream>) -> axum::Router {
    let service = service(&config, upstream);
    create_router(AppContext::new(config, service))
}
