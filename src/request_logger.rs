use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::StatusClass;
use rocket::{Data, Request, Response};
use std::time::Instant;

/// Arrival time of a request, kept in the request-local cache.
struct RequestStart(Instant);

/// Fairing to log one line per HTTP request with timing
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        request.local_cache(|| RequestStart(Instant::now()));
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let RequestStart(start_time) = request.local_cache(|| RequestStart(Instant::now()));
        let elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        let status = response.status();

        // Server errors stand out from routine traffic
        let level = match status.class() {
            StatusClass::ServerError => log::Level::Warn,
            _ => log::Level::Info,
        };

        log::log!(
            level,
            "{} {} -> {} ({:.2}ms)",
            request.method(),
            request.uri(),
            status.code,
            elapsed_ms
        );
    }
}
