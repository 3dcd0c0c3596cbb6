//! Carrier identifiers and lookup outcomes.

use std::fmt;

use serde::Serialize;

/// Label reported for addresses outside every indexed range.
pub const UNKNOWN_LABEL: &str = "未知";

/// Network carrier a range record can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Carrier {
    /// China Mobile
    Mobile,
    /// China Telecom (fixed-line)
    Telecom,
    /// China Unicom
    Unicom,
}

impl Carrier {
    pub const MOBILE_CODE: i32 = 100025;
    pub const TELECOM_CODE: i32 = 100017;
    pub const UNICOM_CODE: i32 = 100026;

    /// Map a stored carrier code.
    ///
    /// Returns `None` for codes outside the known set.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::MOBILE_CODE => Some(Carrier::Mobile),
            Self::TELECOM_CODE => Some(Carrier::Telecom),
            Self::UNICOM_CODE => Some(Carrier::Unicom),
            _ => None,
        }
    }

    /// The code stored in the range table for this carrier.
    pub fn code(self) -> i32 {
        match self {
            Carrier::Mobile => Self::MOBILE_CODE,
            Carrier::Telecom => Self::TELECOM_CODE,
            Carrier::Unicom => Self::UNICOM_CODE,
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Carrier::Mobile => "MOBILE",
            Carrier::Telecom => "TELECOM",
            Carrier::Unicom => "UNICOM",
        }
    }

    /// Get the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Carrier::Mobile => "中国移动",
            Carrier::Telecom => "中国电信",
            Carrier::Unicom => "中国联通",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Carrier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MOBILE" | "CMCC" => Ok(Carrier::Mobile),
            "TELECOM" | "CTCC" => Ok(Carrier::Telecom),
            "UNICOM" | "CUCC" => Ok(Carrier::Unicom),
            _ => Err(()),
        }
    }
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// Address lies in a range tagged with a known carrier.
    Carrier(Carrier),
    /// Address lies in a range whose carrier code is not recognized.
    Unmapped(i32),
    /// Address is not covered by any indexed range.
    Unknown,
}

impl Lookup {
    pub(crate) fn from_code(code: i32) -> Self {
        match Carrier::from_code(code) {
            Some(carrier) => Lookup::Carrier(carrier),
            None => Lookup::Unmapped(code),
        }
    }

    /// The matched carrier, if any.
    pub fn carrier(&self) -> Option<Carrier> {
        match self {
            Lookup::Carrier(carrier) => Some(*carrier),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Lookup::Unknown)
    }

    /// Display label; `None` for an unmapped code, which has no text.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Lookup::Carrier(carrier) => Some(carrier.label()),
            Lookup::Unknown => Some(UNKNOWN_LABEL),
            Lookup::Unmapped(_) => None,
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Carrier(carrier) => write!(f, "{}", carrier),
            Lookup::Unmapped(code) => write!(f, "UNMAPPED({})", code),
            Lookup::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
