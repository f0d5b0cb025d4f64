//! Card image path resolution.
//!
//! Images are expected at `<root>/cards/<card_id>.<ext>`. Paths are built by
//! convention only; nothing here touches the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExt {
    #[default]
    Png,
    Jpg,
    Webp,
}

impl ImageExt {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageExt::Png => "png",
            ImageExt::Jpg => "jpg",
            ImageExt::Webp => "webp",
        }
    }
}

impl fmt::Display for ImageExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageExt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageExt::Png),
            "jpg" => Ok(ImageExt::Jpg),
            "webp" => Ok(ImageExt::Webp),
            other => Err(format!(
                "unsupported image extension '{}' (expected png, jpg or webp)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cards_dir(&self) -> PathBuf {
        self.root.join("cards")
    }

    pub fn card_image_path(&self, card_id: &str, ext: ImageExt) -> PathBuf {
        self.cards_dir().join(format!("{}.{}", card_id, ext))
    }
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new("assets")
    }
}
