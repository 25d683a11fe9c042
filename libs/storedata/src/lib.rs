//! Static, in-memory mock data for the demonstration platform.
//!
//! There is no backend and no persistence; every accessor reads from
//! compile-time tables.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    /// Price in INR.
    pub price: u32,
    pub variants: &'static [&'static str],
    pub tenant_id: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: &'static str,
    pub product_id: &'static str,
    pub tenant_id: &'static str,
    pub status: OrderStatus,
    pub customer: &'static str,
    /// Order value in INR.
    pub value: u32,
    pub date: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_sales: u64,
    pub active_customers: u32,
    pub ab_test_winner: &'static str,
    pub customer_insights: &'static [&'static str],
    pub monthly_revenue: &'static [(&'static str, u64)],
}

static PRODUCTS: &[Product] = &[
    Product { id: "elec-1", name: "OnePlus Pro Max", price: 74_999, variants: &["128GB", "256GB", "512GB"], tenant_id: "electronics-hub", category: "electronics", description: "Latest flagship smartphone with premium features" },
    Product { id: "elec-2", name: "boAt Wireless Earbuds", price: 14_999, variants: &["Black", "White", "Blue"], tenant_id: "electronics-hub", category: "electronics", description: "True wireless earbuds with noise cancellation" },
    Product { id: "elec-3", name: "Mi 4K Smart TV", price: 59_999, variants: &["55\"", "65\"", "75\""], tenant_id: "electronics-hub", category: "electronics", description: "Ultra HD smart TV with Android TV" },
    Product { id: "elec-4", name: "ASUS Gaming Laptop", price: 97_499, variants: &["16GB RAM", "32GB RAM"], tenant_id: "electronics-hub", category: "electronics", description: "High-performance gaming laptop with RTX graphics" },
    Product { id: "fash-1", name: "Ethnic Kurti", price: 11_999, variants: &["S", "M", "L", "XL"], tenant_id: "fashion-store", category: "clothing", description: "Traditional Indian kurti with modern design" },
    Product { id: "fash-2", name: "Adidas Sneakers", price: 6_749, variants: &["7", "8", "9", "10", "11"], tenant_id: "fashion-store", category: "clothing", description: "Premium sports sneakers for everyday wear" },
    Product { id: "fash-3", name: "Leather Handbag", price: 22_499, variants: &["Black", "Brown", "Tan"], tenant_id: "fashion-store", category: "clothing", description: "Genuine leather handbag with multiple compartments" },
    Product { id: "fash-4", name: "Cotton T-Shirt", price: 2_249, variants: &["S", "M", "L", "XL"], tenant_id: "fashion-store", category: "clothing", description: "100% cotton casual t-shirt in various colors" },
    Product { id: "book-1", name: "Ramayana - Complete Edition", price: 1_124, variants: &["Paperback", "Hardcover"], tenant_id: "book-corner", category: "books", description: "Complete Ramayana with beautiful illustrations" },
    Product { id: "book-2", name: "Indian History", price: 3_749, variants: &["Hindi", "English"], tenant_id: "book-corner", category: "books", description: "Comprehensive guide to Indian history and culture" },
    Product { id: "book-3", name: "Hindi Literature Collection", price: 2_624, variants: &["Set of 3", "Set of 5"], tenant_id: "book-corner", category: "books", description: "Collection of classic Hindi literature" },
    Product { id: "book-4", name: "Indian Cooking Guide", price: 1_874, variants: &["Vegetarian", "Complete"], tenant_id: "book-corner", category: "books", description: "Traditional Indian recipes and cooking techniques" },
    Product { id: "demo-1", name: "Home Tool Kit", price: 2_999, variants: &["Basic", "Pro", "Expert"], tenant_id: "demo-shop", category: "home", description: "Complete toolkit for home repairs and maintenance" },
    Product { id: "demo-2", name: "Steel Water Bottle", price: 1_499, variants: &["500ml", "750ml", "1L"], tenant_id: "demo-shop", category: "home", description: "Eco-friendly stainless steel water bottle" },
    Product { id: "demo-3", name: "Wireless Charger", price: 2_249, variants: &["Standard", "Fast Charge"], tenant_id: "demo-shop", category: "electronics", description: "Qi-enabled wireless charging pad" },
    Product { id: "demo-4", name: "Organic Tea", price: 974, variants: &["Green Tea", "Black Tea", "Masala Chai"], tenant_id: "demo-shop", category: "home", description: "Premium organic tea blends from Darjeeling" },
];

static ORDERS: &[Order] = &[
    Order { id: "order-1", product_id: "elec-1", tenant_id: "electronics-hub", status: OrderStatus::Processing, customer: "Rahul Sharma", value: 74_999, date: "2025-09-13" },
    Order { id: "order-2", product_id: "elec-2", tenant_id: "electronics-hub", status: OrderStatus::Shipped, customer: "Priya Patel", value: 14_999, date: "2025-09-12" },
    Order { id: "order-3", product_id: "elec-3", tenant_id: "electronics-hub", status: OrderStatus::Delivered, customer: "Arjun Kumar", value: 59_999, date: "2025-09-11" },
    Order { id: "order-4", product_id: "fash-1", tenant_id: "fashion-store", status: OrderStatus::Processing, customer: "Sneha Gupta", value: 11_999, date: "2025-09-13" },
    Order { id: "order-5", product_id: "fash-2", tenant_id: "fashion-store", status: OrderStatus::Shipped, customer: "Vikram Singh", value: 6_749, date: "2025-09-12" },
    Order { id: "order-6", product_id: "fash-3", tenant_id: "fashion-store", status: OrderStatus::Processing, customer: "Ananya Iyer", value: 22_499, date: "2025-09-13" },
    Order { id: "order-7", product_id: "book-1", tenant_id: "book-corner", status: OrderStatus::Delivered, customer: "Suresh Reddy", value: 1_124, date: "2025-09-10" },
    Order { id: "order-8", product_id: "book-2", tenant_id: "book-corner", status: OrderStatus::Processing, customer: "Kavya Nair", value: 3_749, date: "2025-09-13" },
    Order { id: "order-9", product_id: "demo-1", tenant_id: "demo-shop", status: OrderStatus::Shipped, customer: "Aditya Joshi", value: 2_999, date: "2025-09-12" },
    Order { id: "order-10", product_id: "demo-2", tenant_id: "demo-shop", status: OrderStatus::Processing, customer: "Pooja Mehta", value: 1_499, date: "2025-09-13" },
];

static ANALYTICS: AnalyticsSnapshot = AnalyticsSnapshot {
    total_sales: 1_142_358,
    active_customers: 342,
    ab_test_winner: "Variant B",
    customer_insights: &[
        "Most sales occur during festival seasons",
        "Returning customers spend 30% more",
        "Mobile users convert 2x desktop users",
        "Product reviews increase conversion by 15%",
        "Free shipping above Rs.500 drives larger orders",
    ],
    monthly_revenue: &[
        ("Jan", 93_000),
        ("Feb", 103_500),
        ("Mar", 114_000),
        ("Apr", 109_500),
        ("May", 120_750),
        ("Jun", 129_750),
        ("Jul", 119_250),
        ("Aug", 136_500),
        ("Sep", 114_235),
    ],
};

pub fn products() -> &'static [Product] {
    PRODUCTS
}

pub fn products_for(tenant_id: &str) -> Vec<&'static Product> {
    PRODUCTS.iter().filter(|p| p.tenant_id == tenant_id).collect()
}

pub fn orders() -> &'static [Order] {
    ORDERS
}

pub fn orders_for(tenant_id: &str) -> Vec<&'static Order> {
    ORDERS.iter().filter(|o| o.tenant_id == tenant_id).collect()
}

pub fn product_by_id(id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

pub fn analytics() -> &'static AnalyticsSnapshot {
    &ANALYTICS
}
