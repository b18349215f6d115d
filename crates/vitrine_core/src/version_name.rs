//! Codec for version-suffixed physical filenames.
//!
//! A new upload of `logo.png` is stored as `logo_v<version>_<token>.png`, so
//! older blobs stay addressable while the catalog shows only the logical name.
//! Everything outside this module works with [`VersionedName`] triples.

use chrono::{DateTime, Utc};

/// Structured form of a versioned physical filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionedName {
    /// Logical filename, extension included
    pub display: String,
    /// Monotonic version number (Unix milliseconds when generated here)
    pub version: u64,
    /// Short alphanumeric disambiguator
    pub token: String,
}

impl VersionedName {
    /// Encode into the physical name.
    ///
    /// ```
    /// use vitrine_core::VersionedName;
    ///
    /// let raw = VersionedName::encode("logo.png", 100, "ab12");
    /// assert_eq!(raw, "logo_v100_ab12.png");
    /// ```
    pub fn encode(display: &str, version: u64, token: &str) -> String {
        match split_extension(display) {
            Some((stem, ext)) => format!("{}_v{}_{}.{}", stem, version, token, ext),
            None => format!("{}_v{}_{}", display, version, token),
        }
    }

    /// Physical name for this triple.
    pub fn to_raw(&self) -> String {
        Self::encode(&self.display, self.version, &self.token)
    }

    /// Decode a physical name; `None` when it carries no well-formed suffix.
    ///
    /// ```
    /// use vitrine_core::VersionedName;
    ///
    /// let decoded = VersionedName::decode("logo_v200_cd34.png").unwrap();
    /// assert_eq!(decoded.display, "logo.png");
    /// assert_eq!(decoded.version, 200);
    /// assert_eq!(decoded.token, "cd34");
    /// assert!(VersionedName::decode("logo.png").is_none());
    /// ```
    pub fn decode(raw: &str) -> Option<Self> {
        let (stem, ext) = match split_extension(raw) {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (raw, None),
        };

        let (rest, token) = stem.rsplit_once('_')?;
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }

        let (base, version) = rest.rsplit_once("_v")?;
        if base.is_empty() || version.is_empty() || !version.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
        let version = version.parse::<u64>().ok()?;

        let display = match ext {
            Some(ext) => format!("{}.{}", base, ext),
            None => base.to_string(),
        };

        Some(Self {
            display,
            version,
            token: token.to_string(),
        })
    }

    /// Fresh versioned name for a new upload of `display` at `now`.
    pub fn generate(display: &str, now: DateTime<Utc>) -> Self {
        let token: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect();

        Self {
            display: display.to_string(),
            version: now.timestamp_millis().max(0) as u64,
            token,
        }
    }
}

/// Display filename for a physical name. Names without a valid suffix
/// resolve to themselves.
pub fn display_name(raw: &str) -> String {
    VersionedName::decode(raw)
        .map(|decoded| decoded.display)
        .unwrap_or_else(|| raw.to_string())
}

fn split_extension(name: &str) -> Option<(&str, &str)> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some((stem, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_of_encode_recovers_base() {
        for (base, version, token) in [
            ("logo.png", 100, "ab12"),
            ("hero_banner.JPG", 1_700_000_000_000, "Zz9"),
            ("my_v2_file.webp", 7, "x"),
            ("archive.tar.gz", 3, "t0k3n"),
            ("noext", 42, "abc"),
        ] {
            let raw = VersionedName::encode(base, version, token);
            let decoded = VersionedName::decode(&raw).unwrap();
            assert_eq!(decoded.display, base, "raw name {}", raw);
            assert_eq!(decoded.version, version);
            assert_eq!(decoded.token, token);
            assert_eq!(decoded.to_raw(), raw);
        }
    }

    #[test]
    fn test_malformed_suffixes_fail_open() {
        for raw in [
            "logo.png",
            "logo_v_ab12.png",
            "logo_vx1_ab12.png",
            "logo_v12_.png",
            "logo_v12_a-b.png",
            "_v12_ab.png",
            "logo_v99999999999999999999999_ab.png",
        ] {
            assert!(VersionedName::decode(raw).is_none(), "{}", raw);
            assert_eq!(display_name(raw), raw);
        }
    }

    #[test]
    fn test_generated_names_decode_to_display() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let generated = VersionedName::generate("banner.webp", now);
        assert_eq!(generated.version, 1_700_000_000_123);
        assert_eq!(generated.token.len(), 8);
        assert_eq!(display_name(&generated.to_raw()), "banner.webp");
    }
}
