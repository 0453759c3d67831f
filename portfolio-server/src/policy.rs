//! Validated delivery settings and request-path resolution.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::http::ContentType;
use rocket::tokio::fs;

use crate::config::DeliveryConfig;
use crate::error::DeliveryError;

/// `X-Frame-Options` values the server sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOptions {
    Deny,
    SameOrigin,
}

impl FrameOptions {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameOptions::Deny => "DENY",
            FrameOptions::SameOrigin => "SAMEORIGIN",
        }
    }
}

/// The immutable delivery policy shared by every request.
#[derive(Debug, Clone)]
pub struct DeliveryPolicy {
    document_root: PathBuf,
    index_file: String,
    max_age: u64,
    allow_framing_for_previewables: bool,
    content_type_overrides: HashMap<String, ContentType>,
    compression_threshold: Option<usize>,
}

impl DeliveryPolicy {
    pub fn from_figment(figment: &Figment) -> Result<Self, DeliveryError> {
        let config: DeliveryConfig = figment.extract().map_err(Box::new)?;
        Self::from_config(config)
    }

    pub fn from_config(config: DeliveryConfig) -> Result<Self, DeliveryError> {
        if !config.document_root.is_dir() {
            return Err(DeliveryError::MissingDocumentRoot(config.document_root));
        }

        let mut content_type_overrides = HashMap::new();
        for (extension, mime) in config.content_type_overrides {
            let extension = extension.trim_start_matches('.').to_ascii_lowercase();
            match ContentType::parse_flexible(&mime) {
                Some(content_type) => {
                    content_type_overrides.insert(extension, content_type);
                }
                None => return Err(DeliveryError::InvalidContentType { extension, mime }),
            }
        }

        Ok(Self {
            document_root: config.document_root,
            index_file: config.index_file,
            max_age: config.max_age,
            allow_framing_for_previewables: config.allow_framing_for_previewables,
            content_type_overrides,
            compression_threshold: config.compression.then_some(config.compression_threshold),
        })
    }

    pub fn document_root(&self) -> &Path {
        &self.document_root
    }

    pub fn max_age(&self) -> u64 {
        self.max_age
    }

    /// Minimum body size for gzip, or `None` when compression is off.
    pub fn compression_threshold(&self) -> Option<usize> {
        self.compression_threshold
    }

    /// The root document served for `/` and as the SPA fallback.
    pub fn index_path(&self) -> PathBuf {
        self.document_root.join(&self.index_file)
    }

    /// Maps decoded URL segments onto the document root.
    ///
    /// Returns `None` for any segment that could leave the root or that
    /// names a dotfile. Empty segments are skipped.
    pub fn map_path<'a, I>(&self, segments: I) -> Option<PathBuf>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut path = self.document_root.clone();
        for segment in segments {
            if segment.is_empty() {
                continue;
            }
            if segment.starts_with('.') || segment.contains(['\\', '\0']) {
                return None;
            }
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(name)), None) => path.push(name),
                _ => return None,
            }
        }
        Some(path)
    }

    /// Finds the file a request should be answered with, if any.
    /// Directories resolve to their index document.
    pub async fn locate(&self, segments: &[&str]) -> Option<PathBuf> {
        let path = self.map_path(segments.iter().copied())?;
        let metadata = fs::metadata(&path).await.ok()?;
        if metadata.is_file() {
            return Some(path);
        }
        if metadata.is_dir() {
            let index = path.join(&self.index_file);
            if fs::metadata(&index).await.is_ok_and(|m| m.is_file()) {
                return Some(index);
            }
        }
        None
    }

    /// The explicit content type for `path`, if its extension has one.
    pub fn content_type_override(&self, path: &Path) -> Option<&ContentType> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        self.content_type_overrides.get(&extension)
    }

    pub fn frame_options(&self, previewable: bool) -> FrameOptions {
        if previewable && self.allow_framing_for_previewables {
            FrameOptions::SameOrigin
        } else {
            FrameOptions::Deny
        }
    }
}

/// Extracts and validates the [`DeliveryPolicy`] at ignition and puts it in
/// managed state. Launch is aborted if the configuration is unusable.
pub fn delivery_policy_fairing() -> AdHoc {
    AdHoc::try_on_ignite("Delivery Policy", |rocket| async {
        match DeliveryPolicy::from_figment(rocket.figment()) {
            Ok(policy) => {
                info!(
                    "[delivery-policy] Serving {} (max-age {}s)",
                    policy.document_root().display(),
                    policy.max_age()
                );
                Ok(rocket.manage(policy))
            }
            Err(e) => {
                error!("[delivery-policy] ERROR: {}", e);
                Err(rocket)
            }
        }
    })
}
