//! catalog.rs: Categories, entities and the keyword catalog.
//!
//! The three ESG categories form a closed set. `CategoryMap<T>` carries exactly
//! one slot per category so every report always contains all three, even when a
//! category found nothing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ESG disclosure theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Environmental,
    Social,
    Governance,
}

impl Category {
    /// Fixed reporting order.
    pub const ALL: [Category; 3] = [
        Category::Environmental,
        Category::Social,
        Category::Governance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Environmental => "Environmental",
            Category::Social => "Social",
            Category::Governance => "Governance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per category. Serializes as `{"Environmental": .., "Social": .., "Governance": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap<T> {
    #[serde(rename = "Environmental", default)]
    pub environmental: T,
    #[serde(rename = "Social", default)]
    pub social: T,
    #[serde(rename = "Governance", default)]
    pub governance: T,
}

impl<T> CategoryMap<T> {
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            environmental: f(Category::Environmental),
            social: f(Category::Social),
            governance: f(Category::Governance),
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Environmental => &self.environmental,
            Category::Social => &self.social,
            Category::Governance => &self.governance,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Environmental => &mut self.environmental,
            Category::Social => &mut self.social,
            Category::Governance => &mut self.governance,
        }
    }

    /// Iterate in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> CategoryMap<U> {
        CategoryMap::from_fn(|c| f(c, self.get(c)))
    }
}

/// Ordered keyword phrases per category.
pub type KeywordCatalog = CategoryMap<Vec<String>>;

/// A filer tracked by the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Display name, e.g. "Apple".
    pub name: String,
    /// Zero-padded CIK, e.g. "0000320193".
    pub cik: String,
}

impl Entity {
    pub fn new(name: impl Into<String>, cik: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cik: cik.into(),
        }
    }
}

/// Entities in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityCatalog(pub Vec<Entity>);

impl EntityCatalog {
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.name.as_str()).collect()
    }
}

impl Default for EntityCatalog {
    fn default() -> Self {
        Self(vec![
            Entity::new("Apple", "0000320193"),
            Entity::new("Alphabet (Google)", "0001652044"),
            Entity::new("Tesla", "0001318605"),
        ])
    }
}

const ENVIRONMENTAL_KEYWORDS: &[&str] = &[
    "climate change",
    "carbon emissions",
    "greenhouse gas",
    "renewable energy",
    "environmental impact",
    "sustainability",
    "carbon footprint",
    "net zero",
    "clean energy",
    "environmental matters",
    "climate risk",
    "emissions reduction",
];

const SOCIAL_KEYWORDS: &[&str] = &[
    "human capital",
    "employee",
    "workforce",
    "diversity",
    "inclusion",
    "health and safety",
    "labor practices",
    "community",
    "human rights",
    "employee benefits",
    "talent",
    "workplace",
];

const GOVERNANCE_KEYWORDS: &[&str] = &[
    "board of directors",
    "corporate governance",
    "ethics",
    "compliance",
    "risk management",
    "audit committee",
    "executive compensation",
    "shareholder rights",
    "anti-corruption",
    "code of conduct",
];

/// Built-in ESG keyword catalog.
pub fn default_keywords() -> KeywordCatalog {
    let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    CategoryMap {
        environmental: owned(ENVIRONMENTAL_KEYWORDS),
        social: owned(SOCIAL_KEYWORDS),
        governance: owned(GOVERNANCE_KEYWORDS),
    }
}
