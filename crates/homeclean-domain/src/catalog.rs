//! Static catalog entries: service tiers, cleaning tasks, and recurrence plans.

use std::fmt;

use serde::{de::Deserializer, Deserialize, Serialize};

use crate::common::*;

/// One selectable cleaning task within a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceOption {
    pub id: String,
    pub label: String,
    /// Surcharge in whole currency units; bundled tasks carry their share of the base price.
    pub price: u32,
    /// Included tasks are always selected and cannot be toggled off.
    pub included: bool,
}

impl ServiceOption {
    pub fn included(id: impl Into<String>, label: impl Into<String>, price: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            price,
            included: true,
        }
    }

    pub fn addon(id: impl Into<String>, label: impl Into<String>, price: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            price,
            included: false,
        }
    }
}

impl Identifiable for ServiceOption {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for ServiceOption {
    fn display_label(&self) -> String {
        if self.included {
            format!("{} (included)", self.label)
        } else {
            format!("{} (+{})", self.label, group_thousands(self.price))
        }
    }
}

/// Exact positive rational applied to the base + add-on price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Multiplier {
    pub numerator: u32,
    pub denominator: u32,
}

impl Multiplier {
    pub const ONE: Multiplier = Multiplier {
        numerator: 1,
        denominator: 1,
    };

    /// Builds a multiplier, rejecting zero terms.
    pub fn new(numerator: u32, denominator: u32) -> Option<Self> {
        if numerator == 0 || denominator == 0 {
            None
        } else {
            Some(Self {
                numerator,
                denominator,
            })
        }
    }

    /// Applies the multiplier, rounding half up to the nearest whole unit.
    pub fn apply(self, amount: u32) -> u32 {
        let scaled = u64::from(amount) * u64::from(self.numerator) * 2 + u64::from(self.denominator);
        let rounded = scaled / (2 * u64::from(self.denominator));
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }

    /// Percentage discount relative to a one-time booking, if any.
    pub fn discount_percent(self) -> Option<u32> {
        if self.numerator >= self.denominator {
            return None;
        }
        let off = (self.denominator - self.numerator) * 100;
        Some(off / self.denominator)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}/{}", self.numerator, self.denominator)
    }
}

/// Recurrence plan offered by categories that support repeat visits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrequencyOption {
    pub id: String,
    pub label: String,
    pub multiplier: Multiplier,
}

impl FrequencyOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, multiplier: Multiplier) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            multiplier,
        }
    }
}

impl Identifiable for FrequencyOption {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for FrequencyOption {
    fn display_label(&self) -> String {
        match self.multiplier.discount_percent() {
            Some(pct) if pct > 0 => format!("{} ({}% off)", self.label, pct),
            _ => self.label.clone(),
        }
    }
}

/// Base selector (home-size tier) chosen on the service step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceTier {
    pub id: String,
    pub label: String,
    pub base_price: u32,
    pub duration_minutes: u32,
}

impl ServiceTier {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        base_price: u32,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            base_price,
            duration_minutes,
        }
    }
}

impl Identifiable for ServiceTier {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for ServiceTier {
    fn display_label(&self) -> String {
        format!(
            "{} - {} ({} min)",
            self.label,
            group_thousands(self.base_price),
            self.duration_minutes
        )
    }
}

/// Everything the booking wizard needs to know about one service category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCatalog {
    pub key: String,
    pub name: String,
    pub tiers: Vec<ServiceTier>,
    pub options: Vec<ServiceOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frequencies: Vec<FrequencyOption>,
}

impl CategoryCatalog {
    pub fn tier(&self, id: &str) -> Option<&ServiceTier> {
        self.tiers.iter().find(|tier| tier.id == id)
    }

    pub fn option(&self, id: &str) -> Option<&ServiceOption> {
        self.options.iter().find(|option| option.id == id)
    }

    pub fn frequency(&self, id: &str) -> Option<&FrequencyOption> {
        self.frequencies.iter().find(|frequency| frequency.id == id)
    }

    pub fn included_ids(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|option| option.included)
            .map(|option| option.id.as_str())
    }

    /// Sum of the bundled task prices.
    pub fn included_total(&self) -> u32 {
        self.options
            .iter()
            .filter(|option| option.included)
            .map(|option| option.price)
            .sum()
    }

    /// Advertised "starting from" price: the first tier's base price.
    pub fn starting_price(&self) -> u32 {
        self.tiers.first().map(|tier| tier.base_price).unwrap_or(0)
    }

    pub fn supports_frequency(&self) -> bool {
        !self.frequencies.is_empty()
    }
}

impl NamedEntity for CategoryCatalog {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for CategoryCatalog {
    fn display_label(&self) -> String {
        format!(
            "{} (from {})",
            self.name,
            group_thousands(self.starting_price())
        )
    }
}

/// How the catalog provider treats a category key it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// Substitute the generic catalog.
    #[default]
    Fallback,
    /// Refuse to start the wizard.
    Reject,
}

impl UnknownCategoryPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fallback" => Some(UnknownCategoryPolicy::Fallback),
            "reject" => Some(UnknownCategoryPolicy::Reject),
            _ => None,
        }
    }
}

impl fmt::Display for UnknownCategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnknownCategoryPolicy::Fallback => "fallback",
            UnknownCategoryPolicy::Reject => "reject",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for UnknownCategoryPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .as_deref()
            .and_then(UnknownCategoryPolicy::parse)
            .unwrap_or_default())
    }
}
