//! Shared HTML layout, styles and formatting helpers.

use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Styles for rows in data tables.
pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

/// Styles for cells in data tables.
pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

/// Styles for table headers.
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

/// Styles for card containers.
pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

/// Wrap `content` in the shared page skeleton.
///
/// htmx and ECharts are loaded from CDNs since this crate ships no static
/// assets. Chart initialization scripts live in the body, next to their
/// containers, so that htmx re-runs them when it swaps in new content.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Fintrack" }

                script src="https://unpkg.com/htmx.org@2.0.8" {}
                script src="https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js" {}
                script src="https://cdn.tailwindcss.com" {}
            }

            body class="container max-w-full min-h-screen bg-gray-100 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

/// Format a float as a currency string with two decimal places, e.g.
/// `-$1,234.50`.
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

#[cfg(test)]
mod format_currency_tests {
    use super::format_currency;

    #[test]
    fn formats_positive_amounts() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
    }

    #[test]
    fn formats_negative_amounts_with_leading_sign() {
        assert_eq!(format_currency(-42.0), "-$42.00");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn pads_omitted_trailing_zero() {
        assert_eq!(format_currency(12.3), "$12.30");
        assert_eq!(format_currency(5.0), "$5.00");
        assert_eq!(format_currency(-2500.0), "-$2,500.00");
    }

    #[test]
    fn keeps_two_existing_decimals() {
        assert_eq!(format_currency(12.34), "$12.34");
    }
}
