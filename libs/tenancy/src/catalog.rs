//! Built-in tenant catalog for the demonstration platform.

use crate::config::{Branding, Features, StoreSettings, TenantConfig, Theme};

/// Canonical fallback tenant: used both for unknown route ids and for
/// provider lookup misses.
pub const DEFAULT_TENANT: &str = "electronics-hub";

fn tenant(
    id: &str,
    name: &str,
    theme: Theme,
    features: Features,
    branding: Branding,
    page_size: usize,
) -> TenantConfig {
    TenantConfig {
        id: id.to_string(),
        name: name.to_string(),
        theme,
        features,
        branding,
        settings: StoreSettings {
            currency: "INR".to_string(),
            language: "en".to_string(),
            page_size,
        },
    }
}

fn branding(logo: &str, tagline: &str, primary: &str, secondary: &str) -> Branding {
    Branding {
        logo: logo.to_string(),
        tagline: tagline.to_string(),
        primary_color: primary.to_string(),
        secondary_color: secondary.to_string(),
    }
}

fn theme(primary: &str, secondary: &str, accent: &str, background: &str, text: &str) -> Theme {
    Theme {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
        background: background.to_string(),
        text: text.to_string(),
    }
}

/// The four demonstration tenants.
pub fn builtin_tenants() -> Vec<TenantConfig> {
    vec![
        tenant(
            "electronics-hub",
            "Electronics Hub",
            theme("#6366f1", "#8b5cf6", "#06b6d4", "#667eea", "#1f2937"),
            Features {
                inventory: true,
                analytics: true,
                advanced_catalog: true,
                multi_currency: false,
            },
            branding("TechBazar", "India ki Digital Duniya", "#6366f1", "#8b5cf6"),
            20,
        ),
        tenant(
            "fashion-store",
            "Fashion Store",
            theme("#ec4899", "#f59e0b", "#10b981", "#ffecd2", "#374151"),
            Features {
                inventory: true,
                analytics: true,
                advanced_catalog: true,
                multi_currency: true,
            },
            branding("StyleIndia", "Apna Style, Apni Pasand", "#ec4899", "#f59e0b"),
            15,
        ),
        tenant(
            "book-corner",
            "Book Corner",
            theme("#059669", "#dc2626", "#7c3aed", "#a8e6cf", "#1f2937"),
            Features {
                inventory: false,
                analytics: true,
                advanced_catalog: false,
                multi_currency: false,
            },
            branding("GyaanKosh", "Gyan Se Bhara Sansar", "#059669", "#dc2626"),
            25,
        ),
        tenant(
            "demo-shop",
            "Universal Shop",
            theme("#3b82f6", "#6b7280", "#f59e0b", "#667eea", "#1f2937"),
            Features {
                inventory: true,
                analytics: true,
                advanced_catalog: true,
                multi_currency: true,
            },
            branding("DesiMart", "Sab Kuch Ek Jagah", "#3b82f6", "#6b7280"),
            20,
        ),
    ]
}
