use serde::Serialize;
use utoipa::ToSchema;

const PLAIN_COLOURS: [&str; 10] = [
    "Red", "Blue", "Green", "Black", "Purple", "Pink", "Orange", "Yellow", "White", "Clear",
];

const PREMIUM_COLOURS: [&str; 5] = [
    "Gold (+ R180)",
    "Silver (+ R180)",
    "Galaxy (+ R180)",
    "Dual Colour (+ R180)",
    "Tri Colour (+ R180)",
];

const PREMIUM_SURCHARGE: i64 = 180;

/// Mouthguard lines offered in every colour, with their base price in rand.
const COLOURED_LINES: [(&str, i64); 3] = [("MG Standard", 800), ("Ortho (T)", 850), ("Ortho (T&B)", 980)];

/// Lines that only come in clear.
const CLEAR_LINES: [(&str, i64); 3] = [("Rubberised", 980), ("Retainer", 1600), ("Bleaching", 1600)];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogProduct {
    pub product_code: String,
    pub colour_selection: String,
    pub base_price: i64,
    pub colour_surcharge: i64,
}

impl CatalogProduct {
    fn new(code: &str, colour: &str, base_price: i64, colour_surcharge: i64) -> Self {
        Self {
            product_code: code.to_string(),
            colour_selection: colour.to_string(),
            base_price,
            colour_surcharge,
        }
    }
}

/// The full product catalogue in display order.
pub fn products() -> Vec<CatalogProduct> {
    let mut items = Vec::with_capacity(COLOURED_LINES.len() * 15 + CLEAR_LINES.len());
    for (code, base) in COLOURED_LINES {
        items.extend(PLAIN_COLOURS.iter().map(|c| CatalogProduct::new(code, c, base, 0)));
        items.extend(
            PREMIUM_COLOURS
                .iter()
                .map(|c| CatalogProduct::new(code, c, base, PREMIUM_SURCHARGE)),
        );
    }
    items.extend(CLEAR_LINES.iter().map(|(code, base)| CatalogProduct::new(code, "Clear", *base, 0)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_every_line_and_colour() {
        let items = products();
        assert_eq!(items.len(), 48);
        assert_eq!(items[0], CatalogProduct::new("MG Standard", "Red", 800, 0));
        assert_eq!(items.last().unwrap().product_code, "Bleaching");
    }

    #[test]
    fn premium_finishes_carry_the_surcharge() {
        let items = products();
        let gold = items
            .iter()
            .find(|p| p.product_code == "Ortho (T&B)" && p.colour_selection == "Gold (+ R180)")
            .unwrap();
        assert_eq!((gold.base_price, gold.colour_surcharge), (980, 180));
        assert!(
            items
                .iter()
                .filter(|p| p.product_code == "Retainer")
                .all(|p| p.colour_selection == "Clear")
        );
    }
}
