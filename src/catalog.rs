//! Fixed category, product, and region vocabularies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::cleaning::UNKNOWN_REGION_LABEL;

/// Product category of a sales record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Home & Kitchen")]
    HomeAndKitchen,
    Books,
    Sports,
}

impl Category {
    /// Every category in draw order.
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::HomeAndKitchen,
        Category::Books,
        Category::Sports,
    ];

    /// Human-readable label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::HomeAndKitchen => "Home & Kitchen",
            Category::Books => "Books",
            Category::Sports => "Sports",
        }
    }

    /// Products sold under this category, in draw order.
    pub const fn products(&self) -> &'static [&'static str] {
        match self {
            Category::Electronics => &["Laptop", "Smartphone", "Headphones", "Tablet"],
            Category::Clothing => &["T-Shirt", "Jeans", "Jacket", "Dress"],
            Category::HomeAndKitchen => &["Blender", "Pan Set", "Knife Set", "Coffee Maker"],
            Category::Books => &["Novel", "Textbook", "Cookbook", "Children's Book"],
            Category::Sports => &["Yoga Mat", "Dumbbells", "Running Shoes", "Basketball"],
        }
    }

    /// Whether `product` is listed under this category.
    pub fn owns(&self, product: &str) -> bool {
        self.products().contains(&product)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales region. `Unknown` is only produced by cleaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    Unknown,
}

impl Region {
    /// Regions the generator draws from, in draw order.
    pub const OBSERVED: [Region; 4] = [Region::North, Region::South, Region::East, Region::West];

    /// Human-readable label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Unknown => UNKNOWN_REGION_LABEL,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
