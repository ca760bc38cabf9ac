//! Shared test utilities for regio-resolve.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use regio_core::{NetworkError, RegionSource};

type Reply = Result<Vec<u8>, NetworkError>;

/// A [`RegionSource`] that answers from a table keyed by request path
/// (`china`, `china/19`, `china/19/190`) and counts every call.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<HashMap<String, Reply>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
    explode: Option<String>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before answering, to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Panic instead of answering `path`.
    pub fn explode_on(mut self, path: &str) -> Self {
        self.explode = Some(path.to_string());
        self
    }

    pub fn reply(self, path: &str, body: &str) -> Self {
        self.set(path, Ok(body.as_bytes().to_vec()));
        self
    }

    pub fn fail(self, path: &str) -> Self {
        self.set(path, Err(NetworkError::Transport("connection reset".into())));
        self
    }

    pub fn set(&self, path: &str, reply: Reply) {
        self.replies.lock().unwrap().insert(path.to_string(), reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self, path: String) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        assert!(
            self.explode.as_deref() != Some(path.as_str()),
            "scripted panic for {path}"
        );
        self.replies
            .lock()
            .unwrap()
            .get(&path)
            .cloned()
            .unwrap_or_else(|| {
                Err(NetworkError::Status {
                    status: 404,
                    message: path,
                })
            })
    }
}

impl RegionSource for ScriptedSource {
    fn fetch_provinces(&self) -> impl Future<Output = Reply> + Send {
        self.answer("china".into())
    }

    fn fetch_cities(&self, province_code: i64) -> impl Future<Output = Reply> + Send {
        self.answer(format!("china/{province_code}"))
    }

    fn fetch_counties(
        &self,
        province_code: i64,
        city_code: i64,
    ) -> impl Future<Output = Reply> + Send {
        self.answer(format!("china/{province_code}/{city_code}"))
    }
}

pub const PROVINCES: &str = r#"[{"id":11,"name":"Beijing"},{"id":31,"name":"Shanghai"}]"#;
pub const SHANGHAI_CITIES: &str = r#"[{"id":310,"name":"Shanghai"}]"#;
pub const SHANGHAI_COUNTIES: &str =
    r#"[{"id":1,"name":"Minhang","weather_id":"CN101020200"},{"id":2,"name":"Baoshan","weather_id":"CN101020300"}]"#;

/// Source that serves Beijing/Shanghai and Shanghai's one city.
pub fn china() -> ScriptedSource {
    ScriptedSource::new()
        .reply("china", PROVINCES)
        .reply("china/31", SHANGHAI_CITIES)
        .reply("china/31/310", SHANGHAI_COUNTIES)
}
