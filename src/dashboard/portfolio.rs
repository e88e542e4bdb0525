//! The placeholder investment-portfolio breakdown.
//!
//! Nothing in the store backs this data; the dashboard renders it as an
//! explicitly mock section until investments are tracked for real. The
//! values are fixed mid-range constants so renders are stable.

/// One holding in the placeholder portfolio.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct InvestmentHolding {
    /// The asset class label.
    pub name: &'static str,
    /// The mock dollar value of the holding.
    pub value: f64,
}

/// The fixed placeholder portfolio shown in the investment chart.
pub(super) fn mock_portfolio() -> Vec<InvestmentHolding> {
    vec![
        InvestmentHolding {
            name: "Stocks",
            value: 12_500.0,
        },
        InvestmentHolding {
            name: "Bonds",
            value: 6_500.0,
        },
        InvestmentHolding {
            name: "Real Estate",
            value: 19_000.0,
        },
        InvestmentHolding {
            name: "Mutual Funds",
            value: 10_000.0,
        },
    ]
}
