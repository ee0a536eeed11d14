//! Presentation layer: page view models, structured data, sitemap, and the HTTP router.

pub mod guides;
pub mod pages;
pub mod router;
pub mod seo;
pub mod sitemap;
pub mod views;

pub use router::{site_router, SiteState};
pub use seo::{Crumb, Faq, OpenGraph, PageMeta, Seo};
