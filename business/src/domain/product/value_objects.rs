use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// Opaque product identifier assigned by the collection service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh identifier for a newly accepted product.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "In stock")]
    InStock,
    #[serde(rename = "To buy")]
    ToBuy,
    #[serde(rename = "Just bought")]
    JustBought,
}

impl ProductStatus {
    pub fn is_in_stock(self) -> bool {
        is_in_stock(self)
    }

    pub fn needs_purchase(self) -> bool {
        needs_purchase(self)
    }

    /// `InStock` becomes `ToBuy`; everything else goes back to `InStock`.
    pub fn toggle_buy(self) -> Self {
        match self {
            ProductStatus::InStock => ProductStatus::ToBuy,
            ProductStatus::ToBuy | ProductStatus::JustBought => ProductStatus::InStock,
        }
    }

    /// `ToBuy` becomes `JustBought`; everything else goes back to `ToBuy`.
    pub fn toggle_just_bought(self) -> Self {
        match self {
            ProductStatus::ToBuy => ProductStatus::JustBought,
            ProductStatus::InStock | ProductStatus::JustBought => ProductStatus::ToBuy,
        }
    }
}

pub fn is_in_stock(status: ProductStatus) -> bool {
    status == ProductStatus::InStock
}

pub fn needs_purchase(status: ProductStatus) -> bool {
    matches!(status, ProductStatus::ToBuy | ProductStatus::JustBought)
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::InStock => write!(f, "In stock"),
            ProductStatus::ToBuy => write!(f, "To buy"),
            ProductStatus::JustBought => write!(f, "Just bought"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "In stock" => Ok(ProductStatus::InStock),
            "To buy" => Ok(ProductStatus::ToBuy),
            "Just bought" => Ok(ProductStatus::JustBought),
            _ => Err(format!("Invalid product status: {}", s)),
        }
    }
}

/// The closed list of shops a product can be bought at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Shop {
    #[serde(rename = "Albert Heijn")]
    AlbertHeijn,
    #[serde(rename = "Jumbo")]
    Jumbo,
    #[serde(rename = "Lidl")]
    Lidl,
    #[serde(rename = "Aldi")]
    Aldi,
    #[serde(rename = "Plus")]
    Plus,
}

impl std::fmt::Display for Shop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shop::AlbertHeijn => write!(f, "Albert Heijn"),
            Shop::Jumbo => write!(f, "Jumbo"),
            Shop::Lidl => write!(f, "Lidl"),
            Shop::Aldi => write!(f, "Aldi"),
            Shop::Plus => write!(f, "Plus"),
        }
    }
}

impl std::str::FromStr for Shop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Albert Heijn" => Ok(Shop::AlbertHeijn),
            "Jumbo" => Ok(Shop::Jumbo),
            "Lidl" => Ok(Shop::Lidl),
            "Aldi" => Ok(Shop::Aldi),
            "Plus" => Ok(Shop::Plus),
            _ => Err(format!("Invalid shop: {}", s)),
        }
    }
}
