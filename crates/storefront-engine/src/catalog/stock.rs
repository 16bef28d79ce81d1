//! Stock policy.

/// Answers whether a requested quantity fits the authoritative stock count.
///
/// Pure and stateless; every mutating ledger operation asks it before
/// committing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockPolicy;

impl StockPolicy {
    /// Check if `requested` units can be satisfied from `available` stock.
    ///
    /// A request for zero units is never satisfiable.
    pub fn can_satisfy(requested: u32, available: u32) -> bool {
        requested >= 1 && requested <= available
    }

    /// Clamp a request to what the stock can cover.
    pub fn clamp(requested: u32, available: u32) -> u32 {
        requested.min(available)
    }

    /// Check if no units are left.
    pub fn is_out_of_stock(available: u32) -> bool {
        available == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_satisfy() {
        assert!(StockPolicy::can_satisfy(1, 1));
        assert!(StockPolicy::can_satisfy(5, 10));
        assert!(!StockPolicy::can_satisfy(6, 5));
        assert!(!StockPolicy::can_satisfy(1, 0));
    }

    #[test]
    fn test_zero_request_is_never_satisfiable() {
        assert!(!StockPolicy::can_satisfy(0, 10));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(StockPolicy::clamp(3, 5), 3);
        assert_eq!(StockPolicy::clamp(8, 5), 5);
        assert_eq!(StockPolicy::clamp(1, 0), 0);
    }

    #[test]
    fn test_out_of_stock() {
        assert!(StockPolicy::is_out_of_stock(0));
        assert!(!StockPolicy::is_out_of_stock(1));
    }
}
