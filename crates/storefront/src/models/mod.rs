//! Catalog data models.

mod brand;
mod category;
mod product;
mod specifications;

pub use brand::{Brand, BrandRef};
pub use category::{Category, CategoryRef};
pub use product::{Product, ProductView, discount_percentage, format_price};
pub use specifications::Specifications;
