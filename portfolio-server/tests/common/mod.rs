#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const INDEX_HTML: &str = "<!DOCTYPE html><html><body><section id=\"page-projects\"></section></body></html>";
pub const NESTED_INDEX_HTML: &str = "<p>nested</p>";
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n%%EOF\n";

/// A throwaway site: `site/` is the document root, and a secret sits next
/// to it so traversal attempts have something to aim at.
pub struct Site {
    dir: TempDir,
}

impl Site {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().join("site");

        fs::create_dir_all(root.join("css")).unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::create_dir_all(root.join("nested")).unwrap();

        fs::write(root.join("index.html"), INDEX_HTML).unwrap();
        fs::write(root.join("css/site.css"), stylesheet()).unwrap();
        fs::write(root.join("docs/cv.pdf"), PDF_BYTES).unwrap();
        fs::write(root.join("nested/index.html"), NESTED_INDEX_HTML).unwrap();
        fs::write(root.join(".env"), "SECRET=1\n").unwrap();
        fs::write(dir.path().join("secret.txt"), "top secret").unwrap();

        Site { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("site")
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root().join(relative)
    }
}

/// Textual and comfortably above the default compression threshold.
pub fn stylesheet() -> String {
    (0..200)
        .map(|i| format!(".rule-{i} {{ margin: {i}px; }}\n"))
        .collect()
}
