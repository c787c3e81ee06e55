use serde::{Deserialize, Serialize};

/// Display conversion constant only; every projection figure is computed in
/// USD.
pub const CNY_PER_USD: f64 = 7.2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Cny,
}

impl Currency {
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Cny => "\u{a5}",
        }
    }

    pub fn from_usd(self, amount_usd: f64) -> f64 {
        match self {
            Currency::Usd => amount_usd,
            Currency::Cny => amount_usd * CNY_PER_USD,
        }
    }

    /// Render a USD figure in this currency, rounded to whole units with
    /// thousands separators, e.g. `$382,884` or `¥2,756,768`.
    pub fn format_usd(self, amount_usd: f64) -> String {
        let converted = self.from_usd(amount_usd);
        format!("{}{}", self.symbol(), group_thousands(converted))
    }
}

fn group_thousands(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (offset, ch) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
