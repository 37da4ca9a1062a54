use crate::view::{Explanation, TickerExample};

pub const NOT_AVAILABLE: &str = "N/A";
pub const PROMPT_MESSAGE: &str = "Please enter a ticker symbol.";
pub const UNRESOLVED_MESSAGE: &str = "Invalid ticker, please check it and try again.";
pub const CAGR_FORMULA: &str = "CAGR = (End price / Start price)^(1 / Years) - 1";
pub const VOLATILITY_FORMULA: &str = "Standard deviation of daily returns × √252";

pub const EXAMPLES: [TickerExample; 4] = [
    TickerExample { symbol: "AAPL", description: "Apple (stock)" },
    TickerExample { symbol: "TSLA", description: "Tesla (stock)" },
    TickerExample { symbol: "SPY", description: "S&P 500 (ETF)" },
    TickerExample { symbol: "QQQ", description: "Nasdaq-100 (ETF)" },
];

/// Formats a fractional rate as a percentage with two decimals.
pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn explanations(source: &str) -> Vec<Explanation> {
    vec![
        Explanation {
            title: "CAGR (annualized return)".to_string(),
            body: "The average yearly growth of an investment, assuming gains are reinvested. \
                   With a CAGR of 10%, $100 grows to $161.05 in 5 years."
                .to_string(),
        },
        Explanation {
            title: "Volatility".to_string(),
            body: "How widely returns vary; higher values mean more risk. Computed as the \
                   standard deviation of daily returns, annualized with the 252 trading-day \
                   convention."
                .to_string(),
        },
        Explanation {
            title: "Data source".to_string(),
            body: format!("Historical prices and company fundamentals from {}.", source),
        },
    ]
}
