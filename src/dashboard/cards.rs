//! The overview cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{dashboard::aggregation::Summary, html::format_currency};

const CARD_GRADIENT_STYLE: &str = "text-white rounded-lg p-6 shadow-md bg-gradient-to-br";

/// Renders the four overview cards for the current month: total balance,
/// total income, total expenses, and net savings.
///
/// The "from last month" blurbs are placeholder copy carried over from the
/// original UI.
pub(super) fn summary_cards_view(current_month: &Summary) -> Markup {
    let net_savings = current_month.net_savings();
    let savings_blurb = if net_savings >= 0.0 {
        "Positive savings"
    } else {
        "Negative savings"
    };

    html! {
        section class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6 mb-8" {
            (summary_card(
                "Total Balance",
                net_savings,
                "+20.1% from last month",
                "from-blue-500 to-blue-600",
            ))
            (summary_card(
                "Total Income",
                current_month.income,
                "+15.5% from last month",
                "from-green-500 to-green-600",
            ))
            (summary_card(
                "Total Expenses",
                current_month.expenses,
                "-5.2% from last month",
                "from-red-500 to-red-600",
            ))
            (summary_card(
                "Net Savings",
                net_savings,
                savings_blurb,
                "from-purple-500 to-purple-600",
            ))
        }
    }
}

fn summary_card(title: &str, amount: f64, blurb: &str, gradient: &str) -> Markup {
    html! {
        div class={ (CARD_GRADIENT_STYLE) " " (gradient) } {
            h3 class="text-sm font-medium mb-2" { (title) }
            div class="text-3xl font-bold" { (format_currency(amount)) }
            p class="text-xs opacity-80" { (blurb) }
        }
    }
}
