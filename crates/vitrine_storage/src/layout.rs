//! Category-to-path mapping shared by both backends.

use std::collections::BTreeMap;
use vitrine_core::Category;
use vitrine_error::{CatalogError, CatalogErrorKind, VitrineResult};

/// Relative directory (local) or key prefix (object store) per category.
///
/// Defaults to each category's slug. Overrides are validated so that every
/// URL maps back to at most one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPaths {
    paths: BTreeMap<Category, String>,
}

impl Default for CategoryPaths {
    fn default() -> Self {
        Self {
            paths: Category::all()
                .into_iter()
                .map(|category| (category, category.as_str().to_string()))
                .collect(),
        }
    }
}

impl CategoryPaths {
    /// Default mapping with `overrides` applied, validated.
    ///
    /// # Errors
    ///
    /// Returns `InconsistentMapping` if a path is empty, absolute, escapes the
    /// root, or collides with or nests inside another category's path.
    pub fn with_overrides<I, S>(overrides: I) -> VitrineResult<Self>
    where
        I: IntoIterator<Item = (Category, S)>,
        S: Into<String>,
    {
        let mut mapping = Self::default();
        for (category, path) in overrides {
            let path: String = path.into();
            mapping
                .paths
                .insert(category, path.trim().trim_end_matches('/').to_string());
        }
        mapping.validate()?;
        Ok(mapping)
    }

    /// Check the mapping for contradictions.
    pub fn validate(&self) -> VitrineResult<()> {
        for (category, path) in &self.paths {
            if path.is_empty() {
                return Err(inconsistent(format!("{} maps to an empty path", category)));
            }
            if path.starts_with('/') || path.split('/').any(|seg| seg.is_empty() || seg == "..")
            {
                return Err(inconsistent(format!(
                    "{} maps to '{}', which is not a clean relative path",
                    category, path
                )));
            }
        }

        let entries: Vec<_> = self.paths.iter().collect();
        for (i, (a_cat, a_path)) in entries.iter().enumerate() {
            for (b_cat, b_path) in entries.iter().skip(i + 1) {
                let nested = a_path.starts_with(&format!("{}/", b_path))
                    || b_path.starts_with(&format!("{}/", a_path));
                if a_path == b_path || nested {
                    return Err(inconsistent(format!(
                        "{} ('{}') and {} ('{}') overlap",
                        a_cat, a_path, b_cat, b_path
                    )));
                }
            }
        }
        Ok(())
    }

    /// Path for a category.
    pub fn path(&self, category: Category) -> &str {
        self.paths
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.as_str())
    }

    /// Split a relative `<category path>/<file>` into its category and filename.
    ///
    /// Only direct children of a category path match.
    pub fn locate(&self, relative: &str) -> Option<(Category, String)> {
        let relative = relative.trim_start_matches('/');
        self.paths.iter().find_map(|(category, path)| {
            let file = relative.strip_prefix(path.as_str())?.strip_prefix('/')?;
            if file.is_empty() || file.contains('/') || file == ".." || file == "." {
                return None;
            }
            Some((*category, file.to_string()))
        })
    }
}

#[track_caller]
fn inconsistent(message: String) -> vitrine_error::VitrineError {
    CatalogError::new(CatalogErrorKind::InconsistentMapping(message)).into()
}
