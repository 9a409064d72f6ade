//! Build artifact generators.
//!
//! Each generator walks the catalog and writes one flat artifact: the
//! sitemap XML for crawlers, and the static-route parameter sets for the
//! external rendering layer.

pub mod routes;
pub mod sitemap;
