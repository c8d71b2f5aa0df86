//! The fixed set of publications served from the ebook repository, the file
//! formats they are published in, and the delivery actions a caller can ask
//! for.
//!
//! All three sets are closed: values are parsed at the request boundary and
//! anything unknown is rejected (or, for actions, echoed back) before the
//! resolution pipeline runs.

use std::fmt;

/// A supported publication, keyed by the name used in feed requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Magazine {
    TheEconomist,
    NewYorker,
    Atlantic,
    Wired,
    Guardian,
}

impl Magazine {
    pub const ALL: [Magazine; 5] = [
        Magazine::TheEconomist,
        Magazine::NewYorker,
        Magazine::Atlantic,
        Magazine::Wired,
        Magazine::Guardian,
    ];

    /// Name accepted in the `magazine` query parameter.
    pub fn key(&self) -> &'static str {
        match self {
            Magazine::TheEconomist => "the_economist",
            Magazine::NewYorker => "new_yorker",
            Magazine::Atlantic => "atlantic",
            Magazine::Wired => "wired",
            Magazine::Guardian => "guardian",
        }
    }

    /// Directory the repository shelves this publication under. The numeric
    /// prefixes come from the upstream repository layout and are not
    /// contiguous.
    pub fn shelf_prefix(&self) -> &'static str {
        match self {
            Magazine::TheEconomist => "01_economist",
            Magazine::NewYorker => "02_new_yorker",
            Magazine::Atlantic => "04_atlantic",
            Magazine::Wired => "05_wired",
            Magazine::Guardian => "09_guardian",
        }
    }

    pub fn parse(s: &str) -> Option<Magazine> {
        Self::ALL.iter().copied().find(|m| m.key() == s)
    }
}

impl fmt::Display for Magazine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An accepted file extension for delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileType {
    Epub,
    Mobi,
    Pdf,
}

impl FileType {
    pub const ALL: [FileType; 3] = [FileType::Epub, FileType::Mobi, FileType::Pdf];

    /// Extension as it appears in repository paths and in the `filetype`
    /// query parameter, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Epub => "epub",
            FileType::Mobi => "mobi",
            FileType::Pdf => "pdf",
        }
    }

    pub fn parse(s: &str) -> Option<FileType> {
        Self::ALL.iter().copied().find(|t| t.extension() == s)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How the resolved download link should be returned to the caller.
///
/// Unrecognized values are preserved so the feed endpoint can echo them back
/// instead of failing the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryAction {
    Url,
    Redirect,
    Download,
    Other(String),
}

impl DeliveryAction {
    pub fn parse(s: Option<&str>) -> DeliveryAction {
        match s {
            None | Some("url") => DeliveryAction::Url,
            Some("redirect") => DeliveryAction::Redirect,
            Some("download") => DeliveryAction::Download,
            Some(other) => DeliveryAction::Other(other.to_string()),
        }
    }
}
