//! Gzip for textual responses.

use std::io::{self, Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{ContentType, Status};
use rocket::{Request, Response};

use crate::policy::DeliveryPolicy;
use crate::static_files::GZIP_TAG_SUFFIX;

pub struct GzipCompression;

#[rocket::async_trait]
impl Fairing for GzipCompression {
    fn info(&self) -> Info {
        Info {
            name: "Gzip Compression",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let Some(threshold) = req
            .rocket()
            .state::<DeliveryPolicy>()
            .and_then(DeliveryPolicy::compression_threshold)
        else {
            return;
        };

        if res.status() != Status::Ok
            || res.headers().contains("Content-Encoding")
            || !accepts_gzip(req.headers().get_one("Accept-Encoding"))
            || !res.content_type().is_some_and(|ct| is_compressible(&ct))
            || res.body().preset_size().is_some_and(|size| size < threshold)
        {
            return;
        }

        let body = match res.body_mut().to_bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not buffer response body for compression: {}", e);
                return;
            }
        };

        if body.len() < threshold {
            res.set_sized_body(body.len(), Cursor::new(body));
            return;
        }

        match gzip(&body) {
            Ok(compressed) => {
                res.set_sized_body(compressed.len(), Cursor::new(compressed));
                res.set_raw_header("Content-Encoding", "gzip");
                res.set_raw_header("Vary", "Accept-Encoding");
                if let Some(etag) = res.headers().get_one("ETag").map(gzip_etag) {
                    res.set_raw_header("ETag", etag);
                }
            }
            Err(e) => {
                warn!("Gzip failed, sending identity body: {}", e);
                res.set_sized_body(body.len(), Cursor::new(body));
            }
        }
    }
}

pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Whether an `Accept-Encoding` header admits gzip. An explicit `gzip;q=0`
/// wins over a `*` wildcard.
pub fn accepts_gzip(header: Option<&str>) -> bool {
    let Some(header) = header else {
        return false;
    };
    let codings: Vec<(&str, bool)> = header
        .split(',')
        .filter_map(|coding| {
            let mut parts = coding.split(';').map(str::trim);
            let name = parts.next().filter(|name| !name.is_empty())?;
            let refused = parts.any(|param| {
                param
                    .strip_prefix("q=")
                    .and_then(|q| q.parse::<f32>().ok())
                    .is_some_and(|q| q == 0.0)
            });
            Some((name, refused))
        })
        .collect();

    let gzip = codings
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("gzip"));
    match gzip {
        Some((_, refused)) => !refused,
        None => codings.iter().any(|(name, refused)| *name == "*" && !refused),
    }
}

pub fn is_compressible(content_type: &ContentType) -> bool {
    let top = content_type.top().as_str();
    let sub = content_type.sub().as_str();
    top.eq_ignore_ascii_case("text")
        || ["javascript", "json", "xml", "svg+xml", "wasm"]
            .iter()
            .any(|s| sub.eq_ignore_ascii_case(s))
        || sub.ends_with("+json")
        || sub.ends_with("+xml")
}

fn gzip_etag(etag: &str) -> String {
    match etag.strip_suffix('"') {
        Some(open) => format!("{open}{GZIP_TAG_SUFFIX}\""),
        None => format!("{etag}{GZIP_TAG_SUFFIX}"),
    }
}
