//! Reference catalog used for development and demos.
//!
//! `storefront seed` wipes the catalog tables and loads this data;
//! `SEED_ON_START=true` does the same at startup.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::catalog::MemoryCatalogStore;
use crate::models::{Brand, Category, Product};

struct SeedCategory {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
}

struct SeedBrand {
    name: &'static str,
    slug: &'static str,
    logo: Option<&'static str>,
}

struct SeedProduct {
    name: &'static str,
    slug: &'static str,
    sku: &'static str,
    description: &'static str,
    price: i64,
    compare_at_price: Option<i64>,
    quantity: i32,
    category: &'static str,
    brand: &'static str,
    image: &'static str,
    specifications: &'static [(&'static str, &'static str)],
    featured: bool,
}

const CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        name: "Smartphones",
        slug: "smartphones",
        description: "Latest smartphones from top brands",
    },
    SeedCategory {
        name: "Accessories",
        slug: "accessories",
        description: "Phone accessories and gadgets",
    },
    SeedCategory {
        name: "Tablets",
        slug: "tablets",
        description: "Tablets and iPads",
    },
];

const BRANDS: &[SeedBrand] = &[
    SeedBrand {
        name: "Apple",
        slug: "apple",
        logo: Some("https://upload.wikimedia.org/wikipedia/commons/f/fa/Apple_logo_black.svg"),
    },
    SeedBrand { name: "Samsung", slug: "samsung", logo: None },
    SeedBrand { name: "OnePlus", slug: "oneplus", logo: None },
    SeedBrand { name: "Google", slug: "google", logo: None },
    SeedBrand { name: "Xiaomi", slug: "xiaomi", logo: None },
    SeedBrand { name: "Anker", slug: "anker", logo: None },
    SeedBrand { name: "Spigen", slug: "spigen", logo: None },
    SeedBrand { name: "Generic", slug: "generic", logo: None },
];

const PRODUCTS: &[SeedProduct] = &[
    // Smartphones
    SeedProduct {
        name: "iPhone 15 Pro Max",
        slug: "iphone-15-pro-max",
        sku: "IPH-15-PRO-MAX-001",
        description: "The ultimate iPhone with titanium design, A17 Pro chip, and advanced camera system.",
        price: 159900,
        compare_at_price: Some(169900),
        quantity: 25,
        category: "smartphones",
        brand: "apple",
        image: "https://images.unsplash.com/photo-1696446702338-recipient699d52f4?w=800",
        specifications: &[
            ("display", "6.7\" Super Retina XDR"),
            ("processor", "A17 Pro chip"),
            ("camera", "48MP"),
            ("battery", "4422 mAh"),
            ("storage", "256GB"),
        ],
        featured: true,
    },
    SeedProduct {
        name: "iPhone 15",
        slug: "iphone-15",
        sku: "IPH-15-002",
        description: "iPhone 15 brings you Dynamic Island and powerful camera.",
        price: 79900,
        compare_at_price: None,
        quantity: 40,
        category: "smartphones",
        brand: "apple",
        image: "https://images.unsplash.com/photo-1695048133142-1a20484d2569?w=800",
        specifications: &[
            ("display", "6.1\" Super Retina XDR"),
            ("processor", "A16 Bionic"),
            ("storage", "128GB"),
        ],
        featured: true,
    },
    SeedProduct {
        name: "Samsung Galaxy S24 Ultra",
        slug: "samsung-galaxy-s24-ultra",
        sku: "SAM-S24-ULTRA-003",
        description: "Most powerful Galaxy with S Pen and 200MP camera.",
        price: 129999,
        compare_at_price: None,
        quantity: 30,
        category: "smartphones",
        brand: "samsung",
        image: "https://images.unsplash.com/photo-1610945415295-d9bbf067e59c?w=800",
        specifications: &[
            ("display", "6.8\" Dynamic AMOLED"),
            ("processor", "Snapdragon 8 Gen 3"),
            ("camera", "200MP"),
            ("storage", "256GB"),
        ],
        featured: true,
    },
    SeedProduct {
        name: "Samsung Galaxy S23",
        slug: "samsung-galaxy-s23",
        sku: "SAM-S23-004",
        description: "Powerful performance meets stunning design.",
        price: 74999,
        compare_at_price: None,
        quantity: 35,
        category: "smartphones",
        brand: "samsung",
        image: "https://images.unsplash.com/photo-1610945415295-d9bbf067e59c?w=800",
        specifications: &[
            ("display", "6.1\" Dynamic AMOLED"),
            ("processor", "Snapdragon 8 Gen 2"),
            ("storage", "128GB"),
        ],
        featured: false,
    },
    SeedProduct {
        name: "OnePlus 12",
        slug: "oneplus-12",
        sku: "ONE-12-005",
        description: "Fast and smooth with 120Hz display.",
        price: 64999,
        compare_at_price: None,
        quantity: 20,
        category: "smartphones",
        brand: "oneplus",
        image: "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=800",
        specifications: &[
            ("display", "6.82\" AMOLED"),
            ("processor", "Snapdragon 8 Gen 3"),
            ("storage", "256GB"),
        ],
        featured: true,
    },
    SeedProduct {
        name: "OnePlus Nord CE 3",
        slug: "oneplus-nord-ce-3",
        sku: "ONE-NORD-CE3-006",
        description: "Affordable performance with 5G.",
        price: 26999,
        compare_at_price: None,
        quantity: 45,
        category: "smartphones",
        brand: "oneplus",
        image: "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=800",
        specifications: &[
            ("display", "6.7\" AMOLED"),
            ("processor", "Snapdragon 782G"),
            ("storage", "128GB"),
        ],
        featured: false,
    },
    SeedProduct {
        name: "Google Pixel 8 Pro",
        slug: "google-pixel-8-pro",
        sku: "GOO-PIX-8-PRO-007",
        description: "AI-powered camera and pure Google experience.",
        price: 106999,
        compare_at_price: None,
        quantity: 18,
        category: "smartphones",
        brand: "google",
        image: "https://images.unsplash.com/photo-1598327105666-5b89351aff97?w=800",
        specifications: &[
            ("display", "6.7\" LTPO OLED"),
            ("processor", "Google Tensor G3"),
            ("storage", "256GB"),
        ],
        featured: true,
    },
    SeedProduct {
        name: "Google Pixel 8",
        slug: "google-pixel-8",
        sku: "GOO-PIX-8-008",
        description: "Compact powerhouse with best Android.",
        price: 75999,
        compare_at_price: None,
        quantity: 22,
        category: "smartphones",
        brand: "google",
        image: "https://images.unsplash.com/photo-1598327105666-5b89351aff97?w=800",
        specifications: &[
            ("display", "6.2\" OLED"),
            ("processor", "Google Tensor G3"),
            ("storage", "128GB"),
        ],
        featured: false,
    },
    SeedProduct {
        name: "Xiaomi 13 Pro",
        slug: "xiaomi-13-pro",
        sku: "XIA-13-PRO-009",
        description: "Professional Leica camera system.",
        price: 79999,
        compare_at_price: None,
        quantity: 15,
        category: "smartphones",
        brand: "xiaomi",
        image: "https://images.unsplash.com/photo-1592286927505-43c51b0ec6eb?w=800",
        specifications: &[
            ("display", "6.73\" AMOLED"),
            ("processor", "Snapdragon 8 Gen 2"),
            ("camera", "50MP Leica"),
            ("storage", "256GB"),
        ],
        featured: false,
    },
    SeedProduct {
        name: "Xiaomi Redmi Note 13 Pro",
        slug: "xiaomi-redmi-note-13-pro",
        sku: "XIA-REDMI-N13-010",
        description: "Best budget phone with 200MP camera.",
        price: 23999,
        compare_at_price: None,
        quantity: 50,
        category: "smartphones",
        brand: "xiaomi",
        image: "https://images.unsplash.com/photo-1592286927505-43c51b0ec6eb?w=800",
        specifications: &[
            ("display", "6.67\" AMOLED"),
            ("processor", "Snapdragon 7s Gen 2"),
            ("camera", "200MP"),
            ("storage", "128GB"),
        ],
        featured: false,
    },
    // Accessories
    SeedProduct {
        name: "AirPods Pro (2nd gen)",
        slug: "airpods-pro-2",
        sku: "APP-AIRPODS-PRO-2-011",
        description: "Active Noise Cancellation and Spatial Audio.",
        price: 26900,
        compare_at_price: None,
        quantity: 60,
        category: "accessories",
        brand: "apple",
        image: "https://images.unsplash.com/photo-1606841837239-c5a1a4a07af7?w=800",
        specifications: &[("type", "True Wireless Earbuds"), ("battery", "Up to 6 hours")],
        featured: false,
    },
    SeedProduct {
        name: "Samsung Galaxy Buds2 Pro",
        slug: "galaxy-buds2-pro",
        sku: "SAM-BUDS2-PRO-012",
        description: "Premium sound with ANC.",
        price: 17999,
        compare_at_price: None,
        quantity: 40,
        category: "accessories",
        brand: "samsung",
        image: "https://images.unsplash.com/photo-1590658268037-6bf12165a8df?w=800",
        specifications: &[("type", "True Wireless"), ("battery", "Up to 5 hours")],
        featured: false,
    },
    SeedProduct {
        name: "Anker 20000mAh Power Bank",
        slug: "anker-powerbank-20000",
        sku: "ANK-PWR-20K-013",
        description: "High-capacity fast charging.",
        price: 2999,
        compare_at_price: None,
        quantity: 100,
        category: "accessories",
        brand: "anker",
        image: "https://images.unsplash.com/photo-1609091839311-d5365f9ff1c5?w=800",
        specifications: &[("capacity", "20000mAh"), ("output", "USB-C PD 20W")],
        featured: false,
    },
    SeedProduct {
        name: "Spigen Rugged Case",
        slug: "spigen-rugged-armor",
        sku: "SPI-CASE-RUG-014",
        description: "Military-grade protection.",
        price: 1499,
        compare_at_price: None,
        quantity: 150,
        category: "accessories",
        brand: "spigen",
        image: "https://images.unsplash.com/photo-1601784551446-20c9e07cdbdb?w=800",
        specifications: &[("material", "TPU Carbon Fiber"), ("protection", "Drop Protection")],
        featured: false,
    },
    SeedProduct {
        name: "65W GaN Charger",
        slug: "65w-gan-charger",
        sku: "GAN-CHG-65W-015",
        description: "Ultra-compact fast charger.",
        price: 2499,
        compare_at_price: None,
        quantity: 80,
        category: "accessories",
        brand: "generic",
        image: "https://images.unsplash.com/photo-1583863788434-e58a36330cf0?w=800",
        specifications: &[("power", "65W"), ("ports", "2x USB-C + 1x USB-A")],
        featured: false,
    },
    // Tablets
    SeedProduct {
        name: "iPad Pro 12.9\"",
        slug: "ipad-pro-12-9",
        sku: "APP-IPAD-PRO-12-016",
        description: "Ultimate iPad with M2 chip.",
        price: 112900,
        compare_at_price: None,
        quantity: 12,
        category: "tablets",
        brand: "apple",
        image: "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?w=800",
        specifications: &[
            ("display", "12.9\" Liquid Retina XDR"),
            ("processor", "Apple M2"),
            ("storage", "256GB"),
        ],
        featured: false,
    },
    SeedProduct {
        name: "iPad Air",
        slug: "ipad-air",
        sku: "APP-IPAD-AIR-017",
        description: "Powerful and versatile.",
        price: 59900,
        compare_at_price: None,
        quantity: 20,
        category: "tablets",
        brand: "apple",
        image: "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?w=800",
        specifications: &[
            ("display", "10.9\" Liquid Retina"),
            ("processor", "Apple M1"),
            ("storage", "64GB"),
        ],
        featured: false,
    },
    SeedProduct {
        name: "Samsung Galaxy Tab S9",
        slug: "galaxy-tab-s9",
        sku: "SAM-TAB-S9-018",
        description: "Premium tablet with S Pen.",
        price: 76999,
        compare_at_price: None,
        quantity: 15,
        category: "tablets",
        brand: "samsung",
        image: "https://images.unsplash.com/photo-1561154464-82e9adf32764?w=800",
        specifications: &[
            ("display", "11\" Dynamic AMOLED"),
            ("processor", "Snapdragon 8 Gen 2"),
            ("storage", "128GB"),
        ],
        featured: false,
    },
];

/// The reference catalog with fresh IDs.
#[derive(Debug, Clone)]
pub struct SeedCatalog {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub products: Vec<Product>,
}

impl SeedCatalog {
    /// Build the reference catalog.
    ///
    /// Products are created one second apart in listing order, ending now,
    /// so later entries are newer.
    pub fn build() -> Result<Self> {
        let categories: Vec<Category> = CATEGORIES
            .iter()
            .map(|c| Category::new(c.name, c.slug).with_description(c.description))
            .collect();

        let brands: Vec<Brand> = BRANDS
            .iter()
            .map(|b| {
                let brand = Brand::new(b.name, b.slug);
                match b.logo {
                    Some(logo) => brand.with_logo(logo),
                    None => brand,
                }
            })
            .collect();

        let category_by_slug: HashMap<&str, &Category> =
            categories.iter().map(|c| (c.slug.as_str(), c)).collect();
        let brand_by_slug: HashMap<&str, &Brand> =
            brands.iter().map(|b| (b.slug.as_str(), b)).collect();

        let base = Utc::now() - Duration::seconds(PRODUCTS.len() as i64);
        let mut products = Vec::with_capacity(PRODUCTS.len());

        for (i, seed) in PRODUCTS.iter().enumerate() {
            let category = category_by_slug
                .get(seed.category)
                .with_context(|| format!("seed product '{}' has unknown category", seed.slug))?;
            let brand = brand_by_slug
                .get(seed.brand)
                .with_context(|| format!("seed product '{}' has unknown brand", seed.slug))?;

            let mut product = Product::new(seed.name, seed.slug, seed.price, category, brand);
            product.sku = seed.sku.to_string();
            product.description = seed.description.to_string();
            product.compare_at_price = seed.compare_at_price;
            product.quantity = seed.quantity;
            product.images = vec![seed.image.to_string()];
            product.specifications = seed.specifications.iter().copied().collect();
            product.is_featured = seed.featured;
            product.created_at = base + Duration::seconds(i as i64 + 1);
            products.push(product);
        }

        Ok(Self {
            categories,
            brands,
            products,
        })
    }

    /// Replace the contents of an in-memory store with this catalog.
    pub fn load_into_memory(&self, store: &MemoryCatalogStore) -> Result<()> {
        store.clear();
        for category in &self.categories {
            store.insert_category(category.clone())?;
        }
        for brand in &self.brands {
            store.insert_brand(brand.clone())?;
        }
        for product in &self.products {
            store.insert_product(product.clone())?;
        }

        info!(
            categories = self.categories.len(),
            brands = self.brands.len(),
            products = self.products.len(),
            "Seeded in-memory catalog"
        );
        Ok(())
    }

    /// Wipe the catalog tables and insert this catalog in one transaction.
    pub async fn write_to_postgres(&self, pool: &PgPool) -> Result<()> {
        let mut tx = pool.begin().await.context("failed to begin seed transaction")?;

        sqlx::query("TRUNCATE product, category, brand")
            .execute(&mut *tx)
            .await
            .context("failed to clear catalog tables")?;

        for category in &self.categories {
            category.insert(&mut *tx).await?;
        }
        for brand in &self.brands {
            brand.insert(&mut *tx).await?;
        }
        for product in &self.products {
            product.insert(&mut *tx).await?;
        }

        tx.commit().await.context("failed to commit seed transaction")?;

        info!(
            categories = self.categories.len(),
            brands = self.brands.len(),
            products = self.products.len(),
            "Seeded PostgreSQL catalog"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn reference_catalog_shape() {
        let catalog = SeedCatalog::build().unwrap();
        assert_eq!(catalog.categories.len(), 3);
        assert_eq!(catalog.brands.len(), 8);
        assert_eq!(catalog.products.len(), 18);

        let featured: Vec<&str> = catalog
            .products
            .iter()
            .filter(|p| p.is_featured)
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(
            featured,
            [
                "iphone-15-pro-max",
                "iphone-15",
                "samsung-galaxy-s24-ultra",
                "oneplus-12",
                "google-pixel-8-pro"
            ]
        );
    }

    #[test]
    fn slugs_and_skus_are_unique() {
        let catalog = SeedCatalog::build().unwrap();
        let slugs: HashSet<&str> = catalog.products.iter().map(|p| p.slug.as_str()).collect();
        let skus: HashSet<&str> = catalog.products.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(slugs.len(), catalog.products.len());
        assert_eq!(skus.len(), catalog.products.len());
    }

    #[test]
    fn created_at_increases_in_seed_order() {
        let catalog = SeedCatalog::build().unwrap();
        assert!(catalog
            .products
            .windows(2)
            .all(|w| w[0].created_at < w[1].created_at));
    }

    #[test]
    fn specifications_keep_seed_order() {
        let catalog = SeedCatalog::build().unwrap();
        let keys: Vec<&str> = catalog.products[0].specifications.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["display", "processor", "camera", "battery", "storage"]);
    }

    #[test]
    fn loads_into_memory_twice() {
        let store = MemoryCatalogStore::new();
        let catalog = SeedCatalog::build().unwrap();
        catalog.load_into_memory(&store).unwrap();
        catalog.load_into_memory(&store).unwrap();
        assert_eq!(store.product_count(), 18);
    }
}
