//! The one route this server has: serve a file from the document root, or
//! the root document when nothing matches.

use std::convert::Infallible;
use std::fs::Metadata;
use std::path::Path;
use std::time::UNIX_EPOCH;

use chrono::{DateTime, Utc};
use rocket::fs::NamedFile;
use rocket::http::uri::Segments;
use rocket::http::uri::fmt::Path as UriPath;
use rocket::http::{ContentType, HeaderMap, Status};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::response::{self, Responder, Response};
use rocket::{Route, State};

use crate::error::DeliveryError;
use crate::policy::DeliveryPolicy;

/// Suffix appended to an entity tag when the body is sent gzipped.
pub const GZIP_TAG_SUFFIX: &str = "-gzip";

/// Cache validators for a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validators {
    /// Strong entity tag, quoted.
    pub etag: String,
    pub last_modified: Option<String>,
}

impl Validators {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let modified = metadata.modified().ok();
        let stamp = modified
            .and_then(|m| m.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self {
            etag: format!("\"{:x}-{:x}\"", metadata.len(), stamp),
            last_modified: modified.map(|m| {
                DateTime::<Utc>::from(m)
                    .format("%a, %d %b %Y %H:%M:%S GMT")
                    .to_string()
            }),
        }
    }
}

/// Conditional request headers.
#[derive(Debug, Clone, Default)]
pub struct Preconditions {
    if_none_match: Option<String>,
}

impl Preconditions {
    pub fn from_headers(headers: &HeaderMap<'_>) -> Self {
        Self {
            if_none_match: headers.get_one("If-None-Match").map(str::to_owned),
        }
    }

    /// True when the client already holds `etag` (weak comparison, as
    /// `If-None-Match` requires). A gzip-marked tag matches its plain form.
    pub fn none_match(&self, etag: &str) -> bool {
        let Some(header) = self.if_none_match.as_deref() else {
            return false;
        };
        let wanted = opaque_tag(etag);
        header
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == "*" || opaque_tag(candidate) == wanted)
    }
}

fn opaque_tag(tag: &str) -> &str {
    let tag = tag.strip_prefix("W/").unwrap_or(tag).trim_matches('"');
    tag.strip_suffix(GZIP_TAG_SUFFIX).unwrap_or(tag)
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Preconditions {
    type Error = Infallible;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(Preconditions::from_headers(req.headers()))
    }
}

/// A file on its way to the client with its caching headers.
pub struct StaticAsset {
    file: NamedFile,
    validators: Validators,
    cache_control: String,
    content_type: Option<ContentType>,
}

pub enum Delivery {
    Asset(StaticAsset),
    NotModified {
        validators: Validators,
        cache_control: String,
        previewable: bool,
    },
}

/// Whether the resource a response carries may be framed by the site.
/// Recorded in the request-local cache for the security headers fairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Previewable(pub bool);

impl Previewable {
    pub fn of(req: &Request<'_>) -> bool {
        req.local_cache(Previewable::default).0
    }
}

impl<'r> Responder<'r, 'static> for Delivery {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        match self {
            Delivery::Asset(asset) => {
                req.local_cache(|| Previewable(asset.content_type.is_some()));
                let mut response = asset.file.respond_to(req)?;
                response.set_raw_header("Cache-Control", asset.cache_control);
                response.set_raw_header("ETag", asset.validators.etag);
                if let Some(last_modified) = asset.validators.last_modified {
                    response.set_raw_header("Last-Modified", last_modified);
                }
                // Overridden types are previewable: render in place, never download.
                if let Some(content_type) = asset.content_type {
                    response.set_header(content_type);
                    response.set_raw_header("Content-Disposition", "inline");
                }
                Ok(response)
            }
            Delivery::NotModified {
                validators,
                cache_control,
                previewable,
            } => {
                req.local_cache(|| Previewable(previewable));
                let mut builder = Response::build();
                builder
                    .status(Status::NotModified)
                    .raw_header("Cache-Control", cache_control)
                    .raw_header("ETag", validators.etag);
                if let Some(last_modified) = validators.last_modified {
                    builder.raw_header("Last-Modified", last_modified);
                }
                builder.ok()
            }
        }
    }
}

/// Opens `path` and prepares its response, or a `304` if the client's
/// copy is current.
pub async fn deliver(
    policy: &DeliveryPolicy,
    path: &Path,
    max_age: u64,
    preconditions: &Preconditions,
) -> Result<Delivery, DeliveryError> {
    let file = NamedFile::open(path).await?;
    let metadata = file.file().metadata().await?;
    let validators = Validators::from_metadata(&metadata);
    let cache_control = format!("public, max-age={max_age}");
    let content_type = policy.content_type_override(path).cloned();

    if preconditions.none_match(&validators.etag) {
        return Ok(Delivery::NotModified {
            validators,
            cache_control,
            previewable: content_type.is_some(),
        });
    }

    Ok(Delivery::Asset(StaticAsset {
        content_type,
        file,
        validators,
        cache_control,
    }))
}

/// Serves the root document. It is revalidated on every use.
pub async fn deliver_index(
    policy: &DeliveryPolicy,
    preconditions: &Preconditions,
) -> Result<Delivery, DeliveryError> {
    deliver(policy, &policy.index_path(), 0, preconditions).await
}

/// `GET /<path..>`: the file under the document root, else the root document.
#[rocket::get("/<path..>", rank = 10)]
pub async fn serve(
    path: Segments<'_, UriPath>,
    policy: &State<DeliveryPolicy>,
    preconditions: Preconditions,
) -> Result<Delivery, Status> {
    let segments: Vec<&str> = path.collect();
    let result = match policy.locate(&segments).await {
        Some(file) => deliver(policy, &file, policy.max_age(), &preconditions).await,
        None => deliver_index(policy, &preconditions).await,
    };

    result.map_err(|e| {
        error!("Failed to serve /{}: {}", segments.join("/"), e);
        Status::InternalServerError
    })
}

pub fn routes() -> Vec<Route> {
    routes![serve]
}
