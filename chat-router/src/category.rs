//! Retrieval categories and their lookup functions.

use std::fmt;

/// What a question is about. Each category is bound to one lookup function.
///
/// "No category" is expressed as `Option<Category>::None` by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Customer,
    Product,
    Order,
}

impl Category {
    /// All categories in prompt order.
    pub const ALL: [Category; 3] = [Category::Customer, Category::Product, Category::Order];

    /// Name of the database function that searches this category.
    pub fn rpc_function(self) -> &'static str {
        match self {
            Category::Customer => "find_related_customer",
            Category::Product => "find_related_products",
            Category::Order => "find_related_invoices",
        }
    }

    /// Table backing the category; reported to clients as a diagnostic.
    pub fn table(self) -> &'static str {
        match self {
            Category::Customer => "customers",
            Category::Product => "products",
            Category::Order => "invoices",
        }
    }

    /// Token the classifier is asked to reply with.
    pub fn label(self) -> &'static str {
        match self {
            Category::Customer => "CUSTOMER",
            Category::Product => "PRODUCT",
            Category::Order => "ORDER",
        }
    }

    /// Topics listed for the category in the classification prompt.
    pub fn topics(self) -> &'static [&'static str] {
        match self {
            Category::Customer => &[
                "customer profiles and contact details",
                "who bought something, customer locations",
                "account information",
            ],
            Category::Product => &[
                "product catalog, names and descriptions",
                "prices, stock and availability",
                "product categories and comparisons",
            ],
            Category::Order => &[
                "orders, invoices and purchases",
                "payments, totals and billing",
                "order dates, status and shipping",
            ],
        }
    }

    /// Parses a classifier token (`CUSTOMER`, `PRODUCT`, `ORDER`).
    pub fn from_label(label: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Customer => "customer",
            Category::Product => "product",
            Category::Order => "order",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn functions_are_distinct() {
        let mut names: Vec<_> = Category::ALL.iter().map(|c| c.rpc_function()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Category::ALL.len());
    }

    #[test]
    fn labels_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.label()), Some(c));
        }
        assert_eq!(Category::from_label("NONE"), None);
        assert_eq!(Category::from_label("product"), None);
    }
}
