//! # Menu Catalog Module
//!
//! Static, read-only menu content: the ordered list of categories shown in the
//! carousel and the bank accounts shown by `/account`. The built-in content can
//! be replaced at startup by a JSON file with the same shape.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// One page of the menu carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: String,
    /// Telegram file ids of the menu photos, in display order
    #[serde(default)]
    pub images: Vec<String>,
}

impl Category {
    pub fn new(name: &str, description: &str, images: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            images: images.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The image shown on the carousel page, if the category has one
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Payment details shown by `/account`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub bank_name: String,
    pub account_holder: String,
    pub account_number: String,
}

/// Errors raised while loading or validating a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog must contain at least one category")]
    Empty,
    #[error("duplicate category name: {0}")]
    DuplicateCategory(String),
}

/// Complete static content of the bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCatalog {
    categories: Vec<Category>,
    #[serde(default)]
    bank_accounts: Vec<BankAccount>,
}

impl MenuCatalog {
    /// Build a catalog, rejecting empty category lists and duplicate names
    pub fn new(
        categories: Vec<Category>,
        bank_accounts: Vec<BankAccount>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            categories,
            bank_accounts,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
        }

        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn bank_accounts(&self) -> &[BankAccount] {
        &self.bank_accounts
    }

    /// Number of carousel pages; never zero for a validated catalog
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Category> {
        self.categories.get(position)
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }
}

impl Default for MenuCatalog {
    /// The menu and accounts of Bisrat Hotel
    fn default() -> Self {
        let categories = vec![
            Category::new(
                "Soups",
                "Warm and comforting soups made with fresh ingredients.",
                &["AgACAgQAAxkBAAPNaBy7WmNb6gkEMAdB--jfTE__grYAArPMMRtOwOlQnXdqGpaz0HYBAAMCAAN5AAM2BA"],
            ),
            Category::new(
                "Salads",
                "Fresh and vibrant salads to complement your meal.",
                &["AgACAgQAAxkBAAIBbmgd8VJ_Lw1vITZO-6PucMpi5D-VAALcyDEbTsDxUGD9fGfOqoEoAQADAgADeQADNgQ"],
            ),
            Category::new(
                "Pasta",
                "Delicious pasta dishes with a variety of sauces.",
                &["AgACAgQAAxkBAAPdaBz3NKECzE4atUXulloGyXeVTAADf80xG07A6VC6-A457c4MqQEAAwIAA3kAAzYE"],
            ),
            Category::new(
                "Main Courses",
                "Hearty and flavorful main courses to satisfy your appetite.",
                &["AgACAgQAAxkBAAIBLWgdw1ZF0f02GEFcYCe_I1JDAVhpAALwxzEbTsDxUGWdzxvml5iQAQADAgADeQADNgQ"],
            ),
            Category::new(
                "Juices",
                "Refreshing and natural fruit juices.",
                &["AgACAgQAAxkBAAPxaB2eisEQsn7Bgl9jGGmZHl1Sq0MAAnHOMRtOwOlQl7yTVuJSCxUBAAMCAAN5AAM2BA"],
            ),
            Category::new(
                "Pizza and Egg Specials",
                "Freshly baked pizzas and delicious egg-based specials.",
                &["AgACAgQAAxkBAAPCaByu5qLeh9l1z3s1KMCCIY702PgAAqjMMRtOwOlQ4vXAc3UD3XgBAAMCAAN5AAM2BA"],
            ),
            Category::new(
                "Beverages",
                "A wide selection of refreshing drinks and fine wines.",
                &["AgACAgQAAxkBAAIBI2gdsr6hCkd7AkJS4_VobBeCBTXTAAK5xzEbTsDxUI1IArzN1IGcAQADAgADeQADNgQ"],
            ),
            Category::new(
                "Hot Drinks",
                "Warm and aromatic coffee, tea, and specialty drinks.",
                &["AgACAgQAAxkBAAIBOWgd4SFLwtWTGbf8O0Qzlo5bNlJHAAJMyDEbTsDxUNIdsibU1yvMAQADAgADeQADNgQ"],
            ),
            Category::new(
                "Hard Drinks",
                "Premium spirits and cocktails for a refined experience.",
                &["AgACAgQAAxkBAAIBN2gd4QX8y4ceF5SLzvgRulCRmr2CAAJLyDEbTsDxUBJYBWgsN9lAAQADAgADeQADNgQ"],
            ),
        ];

        let bank_accounts = vec![
            BankAccount {
                bank_name: "Commercial Bank of Ethiopia (CBE)".to_string(),
                account_holder: "Bisrat Hotel".to_string(),
                account_number: "1000014828657".to_string(),
            },
            BankAccount {
                bank_name: "Sinqe Bank".to_string(),
                account_holder: "Bisrat Hotel".to_string(),
                account_number: "1048094320118".to_string(),
            },
        ];

        Self {
            categories,
            bank_accounts,
        }
    }
}
