use std::iter::Sum;
use std::ops::Add;

use serde::Deserialize;

use crate::domain::validation::ValidationError;

/// Monetary amount in minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Parse a plain decimal amount such as `"5"`, `"3.5"` or `"-12.00"`.
    ///
    /// At most two fractional digits are accepted; grouping separators are not.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidAmount {
            input: input.to_owned(),
        };

        let trimmed = input.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) || fraction.len() > 2
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        let cents = whole
            .checked_mul(100)
            .and_then(|value| value.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    #[default]
    Before,
    After,
}

/// How amounts are rendered in notifications, e.g. `$1,234.50` or `12,50€`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    symbol: String,
    position: CurrencyPosition,
    thousands_separator: String,
    decimal_separator: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self::from_code("USD")
    }
}

impl Currency {
    pub fn new(symbol: impl Into<String>, position: CurrencyPosition) -> Self {
        Self {
            symbol: symbol.into(),
            position,
            thousands_separator: ",".to_owned(),
            decimal_separator: ".".to_owned(),
        }
    }

    /// Currency for an ISO 4217 code; unknown codes use the code itself as symbol.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        let symbol = match code.as_str() {
            "USD" | "AUD" | "CAD" | "HKD" | "MXN" | "NZD" | "SGD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" | "CNY" => "¥",
            "BRL" => "R$",
            "INR" => "₹",
            "ILS" => "₪",
            "RUB" => "₽",
            "KRW" => "₩",
            "PHP" => "₱",
            "PLN" => "zł",
            "SEK" | "NOK" | "DKK" => "kr",
            "CHF" => "CHF",
            _ => return Self::new(code, CurrencyPosition::Before),
        };
        Self::new(symbol, CurrencyPosition::Before)
    }

    pub fn with_position(mut self, position: CurrencyPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_separators(
        mut self,
        thousands: impl Into<String>,
        decimal: impl Into<String>,
    ) -> Self {
        self.thousands_separator = thousands.into();
        self.decimal_separator = decimal.into();
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Render `amount` with two decimals, grouped thousands and the symbol.
    pub fn format(&self, amount: Money) -> String {
        let cents = amount.cents().unsigned_abs();
        let number = format!(
            "{}{}{:02}",
            group_thousands(cents / 100, &self.thousands_separator),
            self.decimal_separator,
            cents % 100
        );
        let sign = if amount.cents() < 0 { "-" } else { "" };

        match self.position {
            CurrencyPosition::Before => format!("{sign}{}{number}", self.symbol),
            CurrencyPosition::After => format!("{sign}{number}{}", self.symbol),
        }
    }
}

fn group_thousands(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
