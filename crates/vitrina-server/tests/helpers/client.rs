//! Cliente en memoria sobre el Router, sin abrir sockets.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use vitrina_cache::{CacheConfig, ManualClock, TtlCache};
use vitrina_server::{AppState, create_router};

/// Keys sembradas por [`seeded_cache`]: dos paginas de Role, una de
/// RoleGroup (prefijo comun con Role), una de User y una de catalogo.
pub const SEEDED_KEYS: [&str; 5] = [
    "admin:Role:1:10::::",
    "admin:Role:2:10::::",
    "admin:RoleGroup:1:10::::",
    "admin:User:1:10::::",
    "catalog:1:24::Marca::::precio_asc",
];

pub struct TestClient {
    app: Router,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.call(Method::GET, uri, &[], None).await
    }

    pub async fn get_with_headers(&self, uri: &str, headers: Vec<(&str, &str)>) -> TestResponse {
        self.call(Method::GET, uri, &headers, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.call(Method::DELETE, uri, &[], None).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.call(Method::POST, uri, &[], Some(body)).await
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        json_body: Option<&Value>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let body = match json_body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(value).unwrap())
            },
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let (parts, body) = response.into_parts();
        let bytes = body.collect().await.unwrap().to_bytes();

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body: bytes.to_vec(),
        }
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.text()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(self.status, expected, "unexpected status, body: {}", self.text());
        self
    }
}

/// Cache con reloj manual en t=0 y las [`SEEDED_KEYS`] cargadas.
pub fn seeded_cache() -> (TtlCache<Value>, ManualClock) {
    let clock = ManualClock::new(0);
    let cache = TtlCache::with_clock(CacheConfig::default(), Arc::new(clock.clone()));

    for key in SEEDED_KEYS {
        cache.set(key, json!({ "key": key }));
    }

    (cache, clock)
}

pub fn client_with_cache(cache: TtlCache<Value>) -> TestClient {
    TestClient::new(create_router(AppState::new(cache)))
}
