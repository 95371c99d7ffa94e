use serde::{Deserialize, Serialize};

/// Lowest taxi zone id in the NYC reference data.
pub const ZONE_ID_MIN: i64 = 1;
/// Highest taxi zone id in the NYC reference data.
pub const ZONE_ID_MAX: i64 = 263;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ZoneId);

impl ZoneId {
    /// Parses the leading integer of `raw` the way a browser `parseInt` does.
    ///
    /// Leading whitespace and a single sign are accepted, a `0x` prefix
    /// switches to hexadecimal, and trailing garbage after the digits is
    /// ignored (`"12abc"` is `12`, `"3.7"` is `3`). Input with no leading
    /// digits yields `None`, which goes on the wire as `null`. Values outside
    /// `i64` also yield `None`.
    ///
    /// The zone range is deliberately not checked here; see [`ZoneId::is_known_zone`].
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_start();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (radix, digits) = match unsigned.get(..2) {
            Some("0x") | Some("0X") => (16, &unsigned[2..]),
            _ => (10, unsigned),
        };

        let end = digits
            .char_indices()
            .find(|(_, c)| !c.is_digit(radix))
            .map(|(idx, _)| idx)
            .unwrap_or(digits.len());
        if end == 0 {
            return None;
        }

        let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
        let value = if negative { -magnitude } else { magnitude };
        Some(Self(value))
    }

    pub fn is_known_zone(self) -> bool {
        (ZONE_ID_MIN..=ZONE_ID_MAX).contains(&self.0)
    }
}

/// Raw text the user typed into the two form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub pickup_id: String,
    pub dropoff_id: String,
}

impl FormInput {
    pub fn is_complete(&self) -> bool {
        !self.pickup_id.is_empty() && !self.dropoff_id.is_empty()
    }

    pub fn clear(&mut self) {
        self.pickup_id.clear();
        self.dropoff_id.clear();
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
