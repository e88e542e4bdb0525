//! Transaction data aggregation and transformation for charts.
//!
//! Everything in this module is a pure function of
//! `(transactions, month filter, today)`. The dashboard re-runs the whole
//! pipeline on every fetch or filter change; data volumes are small enough
//! that no incremental update is needed.

use std::collections::HashMap;

use time::{Date, Month};

use crate::transaction::{Transaction, TransactionKind};

/// Three-letter month labels in calendar order, used for the monthly series.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Full month names in calendar order, used for the filter dropdown.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The chart palette. Category slices and the investment bars draw from
/// this fixed set of colors.
pub const PALETTE: [&str; 7] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#A28BEE", "#FF6384", "#36A2EB",
];

/// One entry of the twelve-month income/expense series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthEntry {
    /// The three-letter month label, e.g. "Mar".
    pub label: &'static str,
    /// Summed income amounts for the month.
    pub income: f64,
    /// Summed expense amounts for the month.
    pub expenses: f64,
}

/// One slice of the expense-category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    /// The category name.
    pub name: String,
    /// Summed expense amounts for the category.
    pub total: f64,
    /// The display color assigned to the category.
    pub color: &'static str,
}

/// Income and expense totals for some set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// Summed income amounts.
    pub income: f64,
    /// Summed expense amounts.
    pub expenses: f64,
}

impl Summary {
    /// Income minus expenses.
    pub fn net_savings(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Which transactions the dashboard table and monthly summary show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    /// Show every transaction.
    All,
    /// Show only transactions whose date falls in this calendar month,
    /// regardless of year.
    Month(Month),
}

impl MonthFilter {
    /// Parse a filter from its query-string form: `all` or a full month
    /// name, case-insensitively. Anything unrecognized falls back to
    /// showing everything.
    pub fn from_query(value: &str) -> Self {
        let lowered = value.to_lowercase();

        MONTH_NAMES
            .iter()
            .position(|name| name.to_lowercase() == lowered)
            .map(|index| MonthFilter::Month(month_at(index)))
            .unwrap_or(MonthFilter::All)
    }

    /// The query-string form of the filter: `all` or a lowercase full
    /// month name.
    pub fn query_value(&self) -> String {
        match self {
            MonthFilter::All => "all".to_string(),
            MonthFilter::Month(month) => MONTH_NAMES[month_index(*month)].to_lowercase(),
        }
    }

    /// The full month name shown in the monthly summary panel heading.
    ///
    /// Under [MonthFilter::All] the panel is labeled with the current
    /// month, matching the original UI.
    pub fn display_month(&self, today: Date) -> &'static str {
        match self {
            MonthFilter::All => MONTH_NAMES[month_index(today.month())],
            MonthFilter::Month(month) => MONTH_NAMES[month_index(*month)],
        }
    }
}

/// The output of the aggregation pipeline, ready for chart and table
/// rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    /// Exactly twelve entries, January through December, zeros for months
    /// with no transactions.
    pub monthly: [MonthEntry; 12],
    /// Expense totals per category in first-seen order, each with a
    /// deterministic palette color.
    pub expense_categories: Vec<CategorySlice>,
    /// Income/expense totals for the calendar month containing `today`.
    pub current_month: Summary,
    /// The transactions passing the month filter, in input order.
    pub filtered_transactions: Vec<Transaction>,
    /// Income/expense totals over exactly the filtered set.
    pub filtered_summary: Summary,
}

/// Run the aggregation pipeline over `transactions`.
pub fn aggregate(transactions: &[Transaction], filter: MonthFilter, today: Date) -> DashboardData {
    let monthly = monthly_series(transactions);
    let expense_categories = category_breakdown(transactions);
    let current_month = {
        let entry = monthly[month_index(today.month())];
        Summary {
            income: entry.income,
            expenses: entry.expenses,
        }
    };

    let filtered_transactions = filter_by_month(transactions, filter);
    let filtered_summary = summarize(&filtered_transactions);

    DashboardData {
        monthly,
        expense_categories,
        current_month,
        filtered_transactions,
        filtered_summary,
    }
}

/// Group transactions by the calendar month of their date (year-agnostic)
/// and sum amounts into income or expenses per month.
///
/// # Returns
/// Exactly twelve entries in calendar order, zero-filled for months with no
/// transactions.
pub fn monthly_series(transactions: &[Transaction]) -> [MonthEntry; 12] {
    let mut series = core::array::from_fn(|index| MonthEntry {
        label: MONTH_LABELS[index],
        income: 0.0,
        expenses: 0.0,
    });

    for transaction in transactions {
        let entry: &mut MonthEntry = &mut series[month_index(transaction.date.month())];
        match transaction.kind {
            TransactionKind::Income => entry.income += transaction.amount,
            TransactionKind::Expense => entry.expenses += transaction.amount,
        }
    }

    series
}

/// Group expense transactions by category name, summing amounts.
///
/// Categories appear in the order they are first seen in the input, each
/// with a color from [palette_color].
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        if transaction.kind != TransactionKind::Expense {
            continue;
        }

        let category = transaction.category.as_str();
        if !totals.contains_key(category) {
            order.push(category);
        }
        *totals.entry(category).or_insert(0.0) += transaction.amount;
    }

    order
        .into_iter()
        .map(|name| CategorySlice {
            name: name.to_owned(),
            total: totals[name],
            color: palette_color(name),
        })
        .collect()
}

/// Map a category name to a palette color.
///
/// Hashes the name so that a category keeps the same color across
/// refreshes and across machines, unlike the original's per-render random
/// choice.
pub fn palette_color(name: &str) -> &'static str {
    let digest = md5::compute(name.as_bytes());
    PALETTE[digest.0[0] as usize % PALETTE.len()]
}

/// Restrict `transactions` to those passing the month filter.
///
/// [MonthFilter::All] passes every transaction through unchanged.
pub fn filter_by_month(transactions: &[Transaction], filter: MonthFilter) -> Vec<Transaction> {
    match filter {
        MonthFilter::All => transactions.to_vec(),
        MonthFilter::Month(month) => transactions
            .iter()
            .filter(|transaction| transaction.date.month() == month)
            .cloned()
            .collect(),
    }
}

/// Sum income and expense amounts over `transactions`.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary::default();

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => summary.income += transaction.amount,
            TransactionKind::Expense => summary.expenses += transaction.amount,
        }
    }

    summary
}

fn month_index(month: Month) -> usize {
    month as usize - 1
}

fn month_at(index: usize) -> Month {
    Month::January.nth_next(index as u8)
}
