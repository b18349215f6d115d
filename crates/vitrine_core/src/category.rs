//! Media category enumeration.

use serde::{Deserialize, Serialize};
use vitrine_error::{CatalogError, CatalogErrorKind};

/// Logical bucket of media, mapped to a directory or key prefix per backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Product photos
    #[display("products")]
    Products,
    /// Full-width homepage banners
    #[display("main-banners")]
    MainBanners,
    /// Small promotional banners
    #[display("mini-banners")]
    MiniBanners,
    /// Brand logos
    #[display("brands")]
    Brands,
    /// Site-wide imagery (logos, favicons)
    #[display("site")]
    Site,
    /// User avatars
    #[display("users")]
    Users,
    /// Images embedded in CMS pages
    #[display("pages")]
    Pages,
}

impl Category {
    /// Slug used in URLs, query parameters, and the default storage path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Products => "products",
            Category::MainBanners => "main-banners",
            Category::MiniBanners => "mini-banners",
            Category::Brands => "brands",
            Category::Site => "site",
            Category::Users => "users",
            Category::Pages => "pages",
        }
    }

    /// All categories in declaration order.
    pub fn all() -> Vec<Category> {
        use strum::IntoEnumIterator;
        Category::iter().collect()
    }
}

impl std::str::FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "products" => Ok(Category::Products),
            "main-banners" => Ok(Category::MainBanners),
            "mini-banners" => Ok(Category::MiniBanners),
            "brands" => Ok(Category::Brands),
            "site" => Ok(Category::Site),
            "users" => Ok(Category::Users),
            "pages" => Ok(Category::Pages),
            _ => Err(CatalogError::new(CatalogErrorKind::InvalidCategory(
                s.to_string(),
            ))),
        }
    }
}
