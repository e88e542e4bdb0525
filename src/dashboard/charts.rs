//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations for financial data:
//! - **Income vs. Expenses**: monthly income and expense totals, Jan-Dec
//! - **Expense Categories**: spending grouped by category
//! - **Investment Portfolio**: the placeholder portfolio breakdown
//!
//! Each chart is generated as JSON configuration for the ECharts library
//! and rendered with corresponding HTML containers and JavaScript
//! initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Label,
        LineStyle, Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::dashboard::{
    aggregation::{CategorySlice, MonthEntry},
    portfolio::InvestmentHolding,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded bg-white dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// The script runs immediately rather than on `DOMContentLoaded` because
/// the dashboard content partial is re-swapped by htmx on every poll, and
/// any existing chart instance on a container must be disposed before
/// re-initializing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> Markup {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom) {{ return; }}
                    const existing = echarts.getInstanceByDom(chartDom);
                    if (existing) {{ existing.dispose(); }}
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!(script { (PreEscaped(script_content)) })
}

/// Line chart of the twelve-month income and expense series.
pub(super) fn income_expenses_chart(monthly: &[MonthEntry; 12]) -> Chart {
    let labels: Vec<String> = monthly.iter().map(|entry| entry.label.to_owned()).collect();
    let income: Vec<f64> = monthly.iter().map(|entry| entry.income).collect();
    let expenses: Vec<f64> = monthly.iter().map(|entry| entry.expenses).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Income vs. Expenses")
                .subtext("Monthly overview of your financial flow"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("bottom"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("10%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Line::new()
                .name("Income")
                .line_style(LineStyle::new().color("#82ca9d"))
                .item_style(ItemStyle::new().color("#82ca9d"))
                .data(income),
        )
        .series(
            Line::new()
                .name("Expenses")
                .line_style(LineStyle::new().color("#8884d8"))
                .item_style(ItemStyle::new().color("#8884d8"))
                .data(expenses),
        )
}

/// Pie chart of the expense-category breakdown.
///
/// Slice colors come from [CategorySlice::color], so a category keeps its
/// color across refreshes.
pub(super) fn expense_categories_chart(categories: &[CategorySlice]) -> Chart {
    let data: Vec<DataPointItem> = categories
        .iter()
        .map(|slice| {
            DataPointItem::new(slice.total)
                .name(slice.name.clone())
                .item_style(ItemStyle::new().color(slice.color))
        })
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expense Categories")
                .subtext("Breakdown of your spending by category"),
        )
        .tooltip(Tooltip::new().value_formatter(currency_formatter()))
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius("60%")
                .center(vec!["50%", "50%"])
                .label(Label::new().formatter("{b} ({d}%)"))
                .data(data),
        )
}

/// Bar chart of the placeholder investment portfolio.
pub(super) fn investments_chart(holdings: &[InvestmentHolding]) -> Chart {
    let labels: Vec<String> = holdings
        .iter()
        .map(|holding| holding.name.to_owned())
        .collect();
    let values: Vec<f64> = holdings.iter().map(|holding| holding.value).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Investment Portfolio")
                .subtext("Distribution of your investments"),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Value")
                .item_style(ItemStyle::new().color("#82ca9d"))
                .data(values),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
