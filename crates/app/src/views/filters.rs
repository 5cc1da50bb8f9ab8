//! List filters and sorting over cached collections.

use std::cmp::Ordering;

use revenge::checkout::PaymentMethod;

use crate::domain::{categories::models::CategoryId, products::models::Product, sales::models::Sale};

/// Stock bucket a product falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// At or below the product's minimum.
    Low,

    /// Above the product's minimum.
    Healthy,
}

/// Column a product list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Case-insensitive name
    #[default]
    Name,
    /// Barcode
    Barcode,
    /// Sale price
    Price,
    /// Units in stock
    Stock,
}

/// What the product list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Matched case-insensitively against name and barcode.
    pub search: String,
    /// Only this category
    pub category: Option<CategoryId>,
    /// Hide inactive products
    pub active_only: bool,
    /// Only this stock bucket
    pub stock: Option<StockLevel>,
    /// Sort column
    pub sort: ProductSort,
    /// Reverse the order
    pub descending: bool,
}

impl ProductFilter {
    /// Whether `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();

        let text = needle.is_empty()
            || product.name.to_lowercase().contains(&needle)
            || product.barcode.to_lowercase().contains(&needle);

        let category = self
            .category
            .is_none_or(|category| product.category_id == category);

        let status = !self.active_only || product.status.is_active();

        let stock = match self.stock {
            None => true,
            Some(StockLevel::Low) => product.is_low_stock(),
            Some(StockLevel::Healthy) => !product.is_low_stock(),
        };

        text && category && status && stock
    }

    /// Matching products in display order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut matching: Vec<Product> = products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering = self.compare(a, b);

            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });

        matching
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self.sort {
            ProductSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ProductSort::Barcode => a.barcode.cmp(&b.barcode),
            ProductSort::Price => a.sale_price.cmp(&b.sale_price),
            ProductSort::Stock => a.stock.cmp(&b.stock),
        }
    }
}

/// What the sales list shows, on top of the server-side filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleFilter {
    /// Only sales paid this way
    pub payment_method: Option<PaymentMethod>,
}

impl SaleFilter {
    /// Whether `sale` was paid with the chosen method.
    pub fn matches(&self, sale: &Sale) -> bool {
        self.payment_method.is_none_or(|method| {
            sale.payment_method() == Some(method) || sale.payment_label() == method.label()
        })
    }

    /// Matching sales, order kept.
    pub fn apply(&self, sales: &[Sale]) -> Vec<Sale> {
        sales.iter().filter(|sale| self.matches(sale)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::status::Status,
        test::helpers::{product, sale},
    };

    fn catalog() -> Vec<Product> {
        let mut water = product(1, "7750000000017", 40);
        water.name = "Agua San Luis".to_string();

        let mut soda = product(2, "7751271001234", 3);
        soda.name = "Inca Kola".to_string();
        soda.sale_price = rust_decimal::Decimal::new(350, 2);

        let mut retired = product(3, "7750000000031", 0);
        retired.name = "Chicha Morada".to_string();
        retired.status = Status::Inactive;
        retired.category_id = CategoryId::new(2);

        vec![water, soda, retired]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|product| product.id.get()).collect()
    }

    #[test]
    fn search_matches_name_or_barcode_ignoring_case() {
        let by_name = ProductFilter {
            search: "inca".to_string(),
            ..ProductFilter::default()
        };
        let by_code = ProductFilter {
            search: "0000017".to_string(),
            ..ProductFilter::default()
        };

        assert_eq!(ids(&by_name.apply(&catalog())), [2]);
        assert_eq!(ids(&by_code.apply(&catalog())), [1]);
    }

    #[test]
    fn filters_combine() {
        let filter = ProductFilter {
            active_only: true,
            stock: Some(StockLevel::Low),
            ..ProductFilter::default()
        };

        assert_eq!(ids(&filter.apply(&catalog())), [2]);

        let category = ProductFilter {
            category: Some(CategoryId::new(2)),
            ..ProductFilter::default()
        };

        assert_eq!(ids(&category.apply(&catalog())), [3]);
    }

    #[test]
    fn sorts_by_chosen_column() {
        let by_name = ProductFilter::default();
        let by_price_desc = ProductFilter {
            sort: ProductSort::Price,
            descending: true,
            ..ProductFilter::default()
        };

        assert_eq!(ids(&by_name.apply(&catalog())), [1, 3, 2]);
        assert_eq!(ids(&by_price_desc.apply(&catalog())).first(), Some(&2));
    }

    #[test]
    fn sale_filter_matches_method_name() {
        let sales = vec![
            sale(1, "2025-01-14", "5.00", Some("Yape")),
            sale(2, "2025-01-14", "9.00", Some("Efectivo")),
        ];

        let filter = SaleFilter {
            payment_method: Some(PaymentMethod::Yape),
        };

        assert_eq!(filter.apply(&sales).len(), 1);
        assert_eq!(SaleFilter::default().apply(&sales).len(), 2);
    }
}
