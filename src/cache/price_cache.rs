use ahash::AHashMap;

/// Last known average price per symbol.
///
/// Grows for the whole session: entries are overwritten but never evicted, and
/// nothing ties them to the current catalog.
#[derive(Debug, Clone, Default)]
pub struct PriceCache {
    prices: AHashMap<String, f64>,
}

impl PriceCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    /// Price used for sorting and display, a miss counts as 0
    #[inline]
    pub fn price_or_zero(&self, symbol: &str) -> f64 {
        self.get(symbol).unwrap_or(0.0)
    }

    #[inline]
    pub fn set(&mut self, symbol: &str, price: f64) {
        self.prices.insert(symbol.to_string(), price);
    }

    #[inline]
    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
