//! Option payoff types.

use std::fmt;
use std::str::FromStr;

/// Type of option payoff.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
/// - `BinaryCall`: 1 if S >= K else 0
/// - `BinaryPut`: 1 if S <= K else 0
///
/// # Examples
///
/// ```
/// use kestrel_models::instruments::OptionType;
///
/// assert_eq!(OptionType::Call.intrinsic(100.0, 110.0), 10.0);
/// assert_eq!(OptionType::Put.intrinsic(100.0, 110.0), 0.0);
/// assert_eq!(OptionType::BinaryCall.intrinsic(100.0, 110.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// Vanilla call.
    Call,
    /// Vanilla put.
    Put,
    /// Cash-or-nothing call paying one unit.
    BinaryCall,
    /// Cash-or-nothing put paying one unit.
    BinaryPut,
}

impl OptionType {
    /// The intrinsic payoff for a given strike and spot.
    #[inline]
    pub fn intrinsic(&self, strike: f64, spot: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
            OptionType::BinaryCall => {
                if spot >= strike {
                    1.0
                } else {
                    0.0
                }
            }
            OptionType::BinaryPut => {
                if spot <= strike {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Whether this is a call-style payoff.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call | OptionType::BinaryCall)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
            OptionType::BinaryCall => "binary-call",
            OptionType::BinaryPut => "binary-put",
        };
        f.write_str(label)
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            "binary-call" | "binarycall" => Ok(OptionType::BinaryCall),
            "binary-put" | "binaryput" => Ok(OptionType::BinaryPut),
            other => Err(format!("unknown option type: '{}'", other)),
        }
    }
}
