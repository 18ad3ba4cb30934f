use anyhow::{bail, Result};

/// Range expression used by intensity buckets.
///
/// Accepted forms: `<N`, `<=N`, `>N`, `>=N`, `N-M` (inclusive) and `N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeOp {
    LessThan(u32),
    LessEqual(u32),
    GreaterThan(u32),
    GreaterEqual(u32),
    Equal(u32),
    Between(u32, u32),
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Range must not be empty");
        }
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if let Some((low, high)) = s.split_once('-') {
            let low: u32 = low.trim().parse()?;
            let high: u32 = high.trim().parse()?;
            if low > high {
                bail!("Range lower bound {} exceeds upper bound {}", low, high);
            }
            Ok(RangeOp::Between(low, high))
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: u32) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_less_than() {
        let range = RangeOp::parse("<4").unwrap();
        assert!(range.matches(3));
        assert!(!range.matches(4));
    }

    #[test]
    fn test_parse_range_less_equal() {
        let range = RangeOp::parse("<=3").unwrap();
        assert!(range.matches(3));
        assert!(!range.matches(4));
    }

    #[test]
    fn test_parse_range_greater_than() {
        let range = RangeOp::parse("> 8").unwrap();
        assert!(!range.matches(8));
        assert!(range.matches(9));
    }

    #[test]
    fn test_parse_range_greater_equal() {
        let range = RangeOp::parse(">=9").unwrap();
        assert!(!range.matches(8));
        assert!(range.matches(9));
        assert!(range.matches(10));
    }

    #[test]
    fn test_parse_range_equal() {
        let range = RangeOp::parse("10").unwrap();
        assert!(range.matches(10));
        assert!(!range.matches(9));
    }

    #[test]
    fn test_parse_range_between() {
        let range = RangeOp::parse("4-6").unwrap();
        assert!(!range.matches(3));
        assert!(range.matches(4));
        assert!(range.matches(6));
        assert!(!range.matches(7));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert!(RangeOp::parse("").is_err());
        assert!(RangeOp::parse("abc").is_err());
        assert!(RangeOp::parse("7-4").is_err());
        assert!(RangeOp::parse("-3").is_err());
        assert!(RangeOp::parse("1-2-3").is_err());
    }
}
