//! The option template for the spending-by-category pie chart.
//!
//! The chart is drawn by ECharts in the browser. The template has no data,
//! the client script fills in `series[0].data` from the summary's `byCategory`.

use charming::{
    Chart,
    component::Legend,
    element::{JsFunction, Tooltip, Trigger},
    series::Pie,
};

/// The HTML element ID of the pie chart container.
pub(super) const CATEGORY_CHART_ID: &str = "category-chart";

/// Build the pie chart options without any data.
pub(super) fn category_pie_chart() -> Chart {
    Chart::new()
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(rupee_formatter()),
        )
        .legend(Legend::new().bottom("0"))
        .series(
            Pie::new()
                .name("Spending by Category")
                .radius("65%")
                .center(vec!["50%", "45%"]),
        )
}

#[inline]
fn rupee_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "return '\u{20B9}' + Number(number).toLocaleString('en-IN');",
    )
}
