//! The static budget-alert list shown at the bottom of the dashboard.
//!
//! Alerts are placeholder data for now; nothing computes them from the
//! store.

use maud::{Markup, html};

use crate::html::CARD_STYLE;

/// How prominently an alert is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AlertKind {
    Warning,
    Info,
}

/// A single budget alert.
#[derive(Debug, Clone)]
pub(super) struct BudgetAlert {
    pub kind: AlertKind,
    pub message: &'static str,
}

/// The fixed placeholder alert list.
pub(super) fn budget_alerts() -> Vec<BudgetAlert> {
    vec![
        BudgetAlert {
            kind: AlertKind::Warning,
            message: "You are close to exceeding your \"Entertainment\" budget for the month.",
        },
        BudgetAlert {
            kind: AlertKind::Info,
            message: "Your \"Food\" expenses are 15% higher than last month.",
        },
    ]
}

/// Renders the budget alerts card.
pub(super) fn alerts_view(alerts: &[BudgetAlert]) -> Markup {
    html! {
        section class=(CARD_STYLE) {
            h3 class="text-xl font-semibold mb-1" { "Budget Alerts" }
            p class="text-sm text-gray-600 dark:text-gray-400 mb-4" {
                "Important notifications regarding your budget."
            }

            @if alerts.is_empty() {
                p class="text-gray-500" { "No new budget alerts." }
            } @else {
                ul class="space-y-3" {
                    @for alert in alerts {
                        @let kind_style = match alert.kind {
                            AlertKind::Warning => {
                                "bg-yellow-50 border border-yellow-200 text-yellow-800"
                            }
                            AlertKind::Info => "bg-blue-50 border border-blue-200 text-blue-800",
                        };
                        li class={ "p-3 rounded-md " (kind_style) } {
                            (alert.message)
                        }
                    }
                }
            }
        }
    }
}
