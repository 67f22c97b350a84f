use chrono::{Duration, NaiveDate};
use homeclean_domain::{
    CategoryCatalog, FrequencyOption, Multiplier, ServiceOption, ServiceTier,
    UnknownCategoryPolicy,
};
use once_cell::sync::Lazy;
use tracing::warn;

use crate::CoreError;

/// Key of the catalog substituted for unrecognised categories.
pub const GENERIC_CATEGORY_KEY: &str = "general";

/// Bookable arrival windows, in display order.
pub const TIME_SLOTS: [&str; 6] = [
    "08:00 AM", "09:00 AM", "11:00 AM", "01:00 PM", "03:00 PM", "06:00 PM",
];

static CATALOGS: Lazy<Vec<CategoryCatalog>> =
    Lazy::new(|| vec![regular(), kitchen(), deep(), diwali()]);

static GENERIC: Lazy<CategoryCatalog> = Lazy::new(generic);

/// Read-only access to the static per-category catalogs.
pub struct CatalogService;

impl CatalogService {
    /// Known categories in menu order.
    pub fn categories() -> &'static [CategoryCatalog] {
        CATALOGS.as_slice()
    }

    pub fn find(key: &str) -> Option<&'static CategoryCatalog> {
        let needle = key.trim();
        CATALOGS
            .iter()
            .find(|catalog| catalog.key.eq_ignore_ascii_case(needle))
    }

    /// Catalog used when a category key is not recognised.
    pub fn generic() -> &'static CategoryCatalog {
        &GENERIC
    }

    /// Resolves the catalog for a navigation key according to `policy`.
    pub fn resolve(
        key: &str,
        policy: UnknownCategoryPolicy,
    ) -> Result<CategoryCatalog, CoreError> {
        if let Some(catalog) = Self::find(key) {
            return Ok(catalog.clone());
        }
        match policy {
            UnknownCategoryPolicy::Fallback => {
                warn!(category = key, "unknown category, using generic catalog");
                Ok(Self::generic().clone())
            }
            UnknownCategoryPolicy::Reject => Err(CoreError::UnknownCategory(key.to_string())),
        }
    }

    pub fn time_slots() -> &'static [&'static str] {
        &TIME_SLOTS
    }

    pub fn is_time_slot(label: &str) -> bool {
        TIME_SLOTS.iter().any(|slot| slot.eq_ignore_ascii_case(label.trim()))
    }

    /// `days` consecutive bookable dates starting at `today`.
    pub fn upcoming_dates(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
        (0..i64::from(days))
            .map(|offset| today + Duration::days(offset))
            .collect()
    }
}

fn ratio(numerator: u32, denominator: u32) -> Multiplier {
    Multiplier::new(numerator, denominator).unwrap_or(Multiplier::ONE)
}

fn regular() -> CategoryCatalog {
    CategoryCatalog {
        key: "regular".into(),
        name: "Regular Cleaning".into(),
        tiers: vec![
            ServiceTier::new("regular-basic", "1 BHK", 299, 90),
            ServiceTier::new("regular-standard", "2 BHK", 449, 120),
            ServiceTier::new("regular-premium", "3 BHK", 599, 150),
        ],
        options: vec![
            ServiceOption::included("sweeping", "Sweeping", 100),
            ServiceOption::included("mopping", "Mopping", 100),
            ServiceOption::included("dusting", "Dusting", 99),
            ServiceOption::addon("utensils", "Utensil washing", 79),
            ServiceOption::addon("bathroom", "Bathroom cleaning", 149),
            ServiceOption::addon("balcony", "Balcony cleaning", 59),
            ServiceOption::addon("fridge", "Fridge wipe-down", 129),
        ],
        frequencies: vec![
            FrequencyOption::new("once", "One time", Multiplier::ONE),
            FrequencyOption::new("weekly", "Weekly", ratio(17, 20)),
            FrequencyOption::new("biweekly", "Every two weeks", ratio(9, 10)),
            FrequencyOption::new("monthly", "Monthly", ratio(19, 20)),
        ],
    }
}

fn kitchen() -> CategoryCatalog {
    CategoryCatalog {
        key: "kitchen".into(),
        name: "Kitchen Cleaning".into(),
        tiers: vec![
            ServiceTier::new("kitchen-compact", "Compact kitchen", 499, 90),
            ServiceTier::new("kitchen-standard", "Standard kitchen", 699, 120),
            ServiceTier::new("kitchen-large", "Large kitchen", 899, 150),
        ],
        options: vec![
            ServiceOption::included("countertops", "Countertops", 150),
            ServiceOption::included("stove", "Stove and hob degreasing", 199),
            ServiceOption::included("sink", "Sink and tiles", 150),
            ServiceOption::addon("chimney", "Chimney cleaning", 299),
            ServiceOption::addon("cabinets", "Inside cabinets", 199),
            ServiceOption::addon("fridge", "Fridge deep clean", 149),
            ServiceOption::addon("microwave", "Microwave", 99),
        ],
        frequencies: Vec::new(),
    }
}

fn deep() -> CategoryCatalog {
    CategoryCatalog {
        key: "deep".into(),
        name: "Deep Cleaning".into(),
        tiers: vec![
            ServiceTier::new("deep-1bhk", "1 BHK", 1999, 240),
            ServiceTier::new("deep-2bhk", "2 BHK", 2799, 300),
            ServiceTier::new("deep-3bhk", "3 BHK", 3599, 360),
        ],
        options: vec![
            ServiceOption::included("floors", "Floor scrubbing", 699),
            ServiceOption::included("bathrooms", "Bathroom descaling", 600),
            ServiceOption::included("kitchen", "Kitchen degreasing", 700),
            ServiceOption::addon("windows", "Window panes", 299),
            ServiceOption::addon("sofa", "Sofa shampoo", 499),
            ServiceOption::addon("mattress", "Mattress vacuuming", 399),
            ServiceOption::addon("balcony", "Balcony wash", 199),
        ],
        frequencies: Vec::new(),
    }
}

fn diwali() -> CategoryCatalog {
    CategoryCatalog {
        key: "diwali".into(),
        name: "Diwali Special Cleaning".into(),
        tiers: vec![
            ServiceTier::new("diwali-basic", "Basic", 2499, 300),
            ServiceTier::new("diwali-premium", "Premium", 3499, 360),
            ServiceTier::new("diwali-luxury", "Luxury", 4499, 420),
        ],
        options: vec![
            ServiceOption::included("whole-home", "Whole-home cleaning", 1499),
            ServiceOption::included("fans-lights", "Fans and light fixtures", 500),
            ServiceOption::included("windows-grills", "Windows and grills", 500),
            ServiceOption::addon("curtains", "Curtain steaming", 399),
            ServiceOption::addon("sofa-shampoo", "Sofa shampoo", 599),
            ServiceOption::addon("pooja-room", "Pooja room detailing", 199),
            ServiceOption::addon("terrace", "Terrace wash", 299),
        ],
        frequencies: Vec::new(),
    }
}

fn generic() -> CategoryCatalog {
    CategoryCatalog {
        key: GENERIC_CATEGORY_KEY.into(),
        name: "Home Cleaning".into(),
        tiers: vec![ServiceTier::new(
            "general-standard",
            "Standard visit",
            399,
            120,
        )],
        options: vec![ServiceOption::included(
            "general-cleaning",
            "General cleaning",
            399,
        )],
        frequencies: Vec::new(),
    }
}
