use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Gbp,
    Mad,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Mad => "MAD",
        }
    }

    /// Whole units with grouped thousands: `€1,250`, `1,250 MAD`.
    pub fn format(self, amount: f64) -> String {
        let whole = group_thousands(amount.max(0.0).round() as u64);
        match self {
            Currency::Eur => format!("€{whole}"),
            Currency::Usd => format!("${whole}"),
            Currency::Gbp => format!("£{whole}"),
            Currency::Mad => format!("{whole} {}", self.code()),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
