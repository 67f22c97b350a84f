use homeclean_domain::{BookingSelection, CategoryCatalog, Multiplier};

/// Itemised price for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub base: u32,
    /// `(option id, surcharge)` for each selected add-on, in catalog order.
    pub addons: Vec<(String, u32)>,
    pub subtotal: u32,
    pub multiplier: Option<Multiplier>,
    pub total: u32,
}

pub struct PriceCalculator;

impl PriceCalculator {
    /// Flat sum of `base` and `addons`, scaled and rounded half up when a multiplier applies.
    pub fn compute_total(
        base: u32,
        addons: impl IntoIterator<Item = u32>,
        multiplier: Option<Multiplier>,
    ) -> u32 {
        let subtotal = addons
            .into_iter()
            .fold(base, |acc, price| acc.saturating_add(price));
        match multiplier {
            Some(multiplier) => multiplier.apply(subtotal),
            None => subtotal,
        }
    }

    pub fn breakdown(catalog: &CategoryCatalog, selection: &BookingSelection) -> PriceBreakdown {
        let base = selection
            .service_id
            .as_deref()
            .and_then(|id| catalog.tier(id))
            .map(|tier| tier.base_price)
            .unwrap_or(0);
        let addons: Vec<(String, u32)> = catalog
            .options
            .iter()
            .filter(|option| !option.included && selection.is_option_selected(&option.id))
            .map(|option| (option.id.clone(), option.price))
            .collect();
        let multiplier = selection
            .selected_frequency
            .as_deref()
            .and_then(|id| catalog.frequency(id))
            .map(|frequency| frequency.multiplier);
        let subtotal = Self::compute_total(base, addons.iter().map(|(_, price)| *price), None);
        let total = Self::compute_total(subtotal, std::iter::empty(), multiplier);
        PriceBreakdown {
            base,
            addons,
            subtotal,
            multiplier,
            total,
        }
    }

    pub fn for_selection(catalog: &CategoryCatalog, selection: &BookingSelection) -> u32 {
        Self::breakdown(catalog, selection).total
    }
}
