//! Table and panel views for dashboard data display.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{MONTH_NAMES, MonthFilter, Summary},
    endpoints,
    html::{CARD_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::{Transaction, TransactionKind},
};

/// How many transactions the recent-transactions table shows.
const TABLE_ROW_LIMIT: usize = 10;

/// Renders the recent-transactions card: the month-filter dropdown and a
/// table of the first [TABLE_ROW_LIMIT] filtered transactions.
pub(super) fn transactions_table(transactions: &[Transaction], filter: MonthFilter) -> Markup {
    html! {
        section class={ (CARD_STYLE) " lg:col-span-2" } {
            div class="flex flex-row items-center justify-between mb-4" {
                div {
                    h3 class="text-xl font-semibold" { "Recent Transactions" }
                    p class="text-sm text-gray-600 dark:text-gray-400" {
                        "A list of your latest financial activities."
                    }
                }
                (month_filter_select(filter))
            }

            div class="overflow-x-auto" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        }
                    }
                    tbody {
                        @for transaction in transactions.iter().take(TABLE_ROW_LIMIT) {
                            (transaction_row(transaction))
                        }
                    }
                }
            }

            @if transactions.is_empty() {
                p class="text-center text-gray-500 mt-4" {
                    "No transactions found for the selected month."
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (sign, amount_style) = match transaction.kind {
        TransactionKind::Income => ("+", "text-green-600"),
        TransactionKind::Expense => ("-", "text-red-600"),
    };

    html! {
        tr class=(TABLE_ROW_STYLE) {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class={ (TABLE_CELL_STYLE) " text-right font-medium " (amount_style) } {
                (sign) (format_currency(transaction.amount))
            }
        }
    }
}

/// The month-filter dropdown. Changing the selection fetches the dashboard
/// content partial with the new filter.
fn month_filter_select(filter: MonthFilter) -> Markup {
    html! {
        select
            name="month"
            class="p-2 border rounded-md dark:bg-gray-700"
            hx-get=(endpoints::DASHBOARD_CONTENT)
            hx-target="#dashboard-content"
            hx-swap="outerHTML"
        {
            option value="all" selected[filter == MonthFilter::All] { "All Months" }
            @for name in MONTH_NAMES {
                @let value = name.to_lowercase();
                option
                    value=(value)
                    selected[filter.query_value() == value]
                {
                    (name)
                }
            }
        }
    }
}

/// Renders the monthly summary panel for the filtered set, labeled with
/// the selected month.
pub(super) fn monthly_summary_panel(summary: &Summary, month_name: &str) -> Markup {
    let net_savings = summary.net_savings();
    let net_style = if net_savings >= 0.0 {
        "text-blue-600"
    } else {
        "text-red-600"
    };

    html! {
        section class=(CARD_STYLE) {
            h3 class="text-xl font-semibold mb-1" { "Monthly Summary (" (month_name) ")" }
            p class="text-sm text-gray-600 dark:text-gray-400 mb-4" {
                "Detailed summary of income and expenses for the selected period."
            }

            div class="space-y-4" {
                div class="flex justify-between items-center" {
                    span { "Total Income:" }
                    span class="font-semibold text-green-600" {
                        (format_currency(summary.income))
                    }
                }
                div class="flex justify-between items-center" {
                    span { "Total Expenses:" }
                    span class="font-semibold text-red-600" {
                        (format_currency(summary.expenses))
                    }
                }
                div class="flex justify-between items-center border-t pt-4 mt-4" {
                    span class="text-lg font-bold" { "Net Savings:" }
                    span class={ "text-lg font-bold " (net_style) } {
                        (format_currency(net_savings))
                    }
                }
            }
        }
    }
}
