//! Tax ordering rules.

/// Priority of a general tax, derived from its name. Higher is applied first.
///
/// VAT is computed on the base price, stamps are then added to the price,
/// and copyright fees come last.
pub fn tax_priority(name: &str) -> i32 {
    if name.contains("TVA") {
        100
    } else if name.contains("Timbru") {
        50
    } else if name.contains("UCMR-ADA") {
        30
    } else {
        10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vat_first() {
        assert_eq!(tax_priority("TVA 21% - Festival"), 100);
    }

    #[test]
    fn stamps() {
        assert_eq!(tax_priority("Timbru Muzical 5%"), 50);
        assert_eq!(tax_priority("Timbru Crucea Roșie 1%"), 50);
    }

    #[test]
    fn copyright() {
        assert_eq!(tax_priority("UCMR-ADA - Balet"), 30);
    }

    #[test]
    fn fallback() {
        assert_eq!(tax_priority("Impozit pe spectacole"), 10);
    }

    #[test]
    fn vat_wins_over_other_markers() {
        assert_eq!(tax_priority("TVA pe Timbru"), 100);
    }
}
