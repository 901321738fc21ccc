//! Catalog classification enums.

use serde::{Deserialize, Serialize};

/// Product category shown in the catalog filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Women,
    Men,
    Accessories,
}

impl Category {
    /// Lowercase slug, matching the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Women => "women",
            Self::Men => "men",
            Self::Accessories => "accessories",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "women" => Ok(Self::Women),
            "men" => Ok(Self::Men),
            "accessories" => Ok(Self::Accessories),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// Merchandising badge printed on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Badge {
    New,
    Sale,
    Trending,
    Exclusive,
    Premium,
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Sale => write!(f, "SALE"),
            Self::Trending => write!(f, "TRENDING"),
            Self::Exclusive => write!(f, "EXCLUSIVE"),
            Self::Premium => write!(f, "PREMIUM"),
        }
    }
}

impl std::str::FromStr for Badge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Ok(Self::New),
            "SALE" => Ok(Self::Sale),
            "TRENDING" => Ok(Self::Trending),
            "EXCLUSIVE" => Ok(Self::Exclusive),
            "PREMIUM" => Ok(Self::Premium),
            _ => Err(format!("invalid badge: {s}")),
        }
    }
}
