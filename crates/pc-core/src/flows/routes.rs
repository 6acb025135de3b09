//! Console routes used as wizard navigation targets.

pub const AI_TOOLS_URL: &str = "/ai-tools";
pub const BRANDS_URL: &str = "/brands";
pub const CATEGORIES_URL: &str = "/categories";
pub const PRODUCT_ATTRIBUTES_URL: &str = "/product-attributes";
pub const PRODUCTS_URL: &str = "/products";
pub const INVENTORY_URL: &str = "/inventory";
