pub mod price_cache;
