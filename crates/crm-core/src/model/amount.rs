use serde::{Deserialize, Serialize};

/// Currency amount with two decimal places
///
/// Held as an integer count of minor units so that equality and arithmetic
/// are exact. Serializes as that integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Amount from a whole number of currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Amount from minor units (cents)
    pub const fn from_minor_units(minor: i64) -> Self {
        Self(minor)
    }

    /// Minor units (cents)
    pub const fn minor_units(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        assert_eq!(Amount::from_units(50_000).minor_units(), 5_000_000);
        assert_eq!(Amount::from_units(50_000), Amount::from_minor_units(5_000_000));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_units(50_000).to_string(), "50000.00");
        assert_eq!(Amount::from_minor_units(1_205).to_string(), "12.05");
        assert_eq!(Amount::from_minor_units(-50).to_string(), "-0.50");
    }
}
