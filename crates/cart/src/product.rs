//! Cart line items and the cart value itself.

use catalog::CatalogProduct;
use common::ProductId;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// A product in the cart together with the quantity chosen.
///
/// Serializes as the catalog record with an `amount` field appended, the
/// same shape the storefront UI renders from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Display and price metadata copied from the catalog.
    #[serde(flatten)]
    pub details: Map<String, Value>,

    /// Units in the cart, always at least 1.
    pub amount: u32,
}

impl Product {
    /// Creates a line item with no metadata.
    pub fn new(id: impl Into<ProductId>, amount: u32) -> Self {
        Self {
            id: id.into(),
            details: Map::new(),
            amount,
        }
    }

    /// Turns a freshly fetched catalog record into a line item of one unit.
    pub fn from_catalog(product: CatalogProduct) -> Self {
        let mut details = product.details;
        details.remove("amount");
        Self {
            id: product.id,
            details,
            amount: 1,
        }
    }
}

/// Ways a product list can violate the cart invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCart {
    #[error("product {0} appears more than once")]
    DuplicateProduct(ProductId),

    #[error("product {0} has amount 0")]
    ZeroAmount(ProductId),
}

/// Ordered, id-unique list of line items.
///
/// Order is first-added order. A `Cart` is a value: operations that change
/// it return a new cart and leave `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Product>")]
pub struct Cart {
    products: Vec<Product>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the line item for `id`, if present.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sum of all amounts.
    pub fn total_units(&self) -> u64 {
        self.products.iter().map(|p| u64::from(p.amount)).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    /// Returns a cart with `product` appended.
    ///
    /// Callers must check the id is absent first.
    pub(crate) fn with_appended(&self, product: Product) -> Self {
        debug_assert!(!self.contains(product.id));
        let mut products = self.products.clone();
        products.push(product);
        Self { products }
    }

    /// Returns a cart where the entry for `id` carries `amount`.
    ///
    /// Other entries and the order are kept. If `id` is absent the result
    /// equals `self`.
    pub(crate) fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        debug_assert!(amount >= 1);
        let products = self
            .products
            .iter()
            .map(|p| {
                if p.id == id {
                    Product {
                        amount,
                        ..p.clone()
                    }
                } else {
                    p.clone()
                }
            })
            .collect();
        Self { products }
    }

    /// Returns a cart without the entry for `id`, or None if it was absent.
    pub(crate) fn without(&self, id: ProductId) -> Option<Self> {
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();

        (products.len() < self.products.len()).then_some(Self { products })
    }
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = InvalidCart;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        for (index, product) in products.iter().enumerate() {
            if product.amount == 0 {
                return Err(InvalidCart::ZeroAmount(product.id));
            }
            if products[..index].iter().any(|p| p.id == product.id) {
                return Err(InvalidCart::DuplicateProduct(product.id));
            }
        }
        Ok(Self { products })
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.products.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
