//! Window icon lookup as an ordered chain of fallback strategies.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;

/// One way of asking a window for its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconSource {
    /// `WM_GETICON` with `ICON_BIG`.
    MessageBig,
    /// `WM_GETICON` with `ICON_SMALL`.
    MessageSmall,
    /// `WM_GETICON` with `ICON_SMALL2`, the system-generated small icon.
    MessageSmall2,
    /// The window class icon (`GCLP_HICON`).
    ClassBig,
    /// The window class small icon (`GCLP_HICONSM`).
    ClassSmall,
}

/// Strategies in the order they are tried.
pub const ICON_CHAIN: [IconSource; 5] = [
    IconSource::MessageBig,
    IconSource::MessageSmall,
    IconSource::MessageSmall2,
    IconSource::ClassBig,
    IconSource::ClassSmall,
];

/// Outcome of an icon lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IconLookup {
    /// An icon was found and encoded as PNG.
    Found { source: IconSource, png: Vec<u8> },
    /// Every strategy was tried and none produced an icon.
    Unavailable,
    /// The caller asked for no icons.
    #[default]
    Skipped,
}

impl IconLookup {
    /// PNG bytes, or an empty slice when no icon is available.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Found { png, .. } => png,
            Self::Unavailable | Self::Skipped => &[],
        }
    }

    /// Base64 of the PNG bytes; empty when no icon is available.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes())
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

impl Serialize for IconLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("IconLookup", 3)?;
        match self {
            Self::Found { source, .. } => {
                s.serialize_field("status", "found")?;
                s.serialize_field("source", source)?;
            }
            Self::Unavailable => {
                s.serialize_field("status", "unavailable")?;
                s.serialize_field("source", &None::<IconSource>)?;
            }
            Self::Skipped => {
                s.serialize_field("status", "skipped")?;
                s.serialize_field("source", &None::<IconSource>)?;
            }
        }
        s.serialize_field("png_base64", &self.to_base64())?;
        s.end()
    }
}

/// Walks [`ICON_CHAIN`] and returns the first icon `probe` produces.
///
/// `probe` returns `None` (or empty bytes) when a strategy has nothing;
/// the chain then moves on. Strategies after the first hit never run.
pub fn resolve_icon(mut probe: impl FnMut(IconSource) -> Option<Vec<u8>>) -> IconLookup {
    ICON_CHAIN
        .iter()
        .find_map(|&source| {
            probe(source)
                .filter(|png| !png.is_empty())
                .map(|png| IconLookup::Found { source, png })
        })
        .unwrap_or(IconLookup::Unavailable)
}
