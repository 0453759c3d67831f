use std::path::Path;

use rocket::figment::Figment;
use rocket::figment::providers::Serialized;
use rocket::{Build, Rocket};

/// Figment for tests: Rocket's debug defaults with `document_root` pointed
/// at `root`. Nothing is read from the environment or the working directory.
pub fn test_figment(root: &Path) -> Figment {
    Figment::from(rocket::Config::debug_default())
        .merge(Serialized::global("document_root", root.display().to_string()))
        .merge(Serialized::global("log_level", "off"))
}

/// Creates a Rocket instance serving `root` with default delivery settings.
pub fn test_rocket(root: &Path) -> Rocket<Build> {
    crate::build_rocket(test_figment(root))
}

/// Like [`test_rocket`], with extra configuration merged on top.
pub fn test_rocket_with(root: &Path, configure: impl FnOnce(Figment) -> Figment) -> Rocket<Build> {
    crate::build_rocket(configure(test_figment(root)))
}
