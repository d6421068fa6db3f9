//! The single page of the client application.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use serde::Serialize;

use crate::{
    AppState, Error,
    client::{
        Catalogue,
        chart::{CATEGORY_CHART_ID, category_pie_chart},
    },
    endpoints::{CLIENT_ENDPOINTS, ClientEndpoints},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, SUMMARY_LABEL_STYLE,
        SUMMARY_VALUE_STYLE, base, loading_spinner, rupee_input_styles, script_json,
    },
};

/// ECharts is loaded from a CDN, the rest of the client is served from `/static`.
const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// The state needed to render the client page.
#[derive(Debug, Clone)]
pub struct ClientState {
    /// The categories and people offered by the form.
    pub catalogue: Catalogue,
}

impl FromRef<AppState> for ClientState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            catalogue: state.catalogue.clone(),
        }
    }
}

/// The values the client script needs from the server.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientConfig<'a> {
    catalogue: &'a Catalogue,
    endpoints: ClientEndpoints,
    chart_id: &'static str,
}

/// Serve the client page.
///
/// This is also the fallback for every path that is not part of the API.
pub async fn get_client_page(State(state): State<ClientState>) -> Response {
    let config = ClientConfig {
        catalogue: &state.catalogue,
        endpoints: CLIENT_ENDPOINTS,
        chart_id: CATEGORY_CHART_ID,
    };

    let config_json = match script_json(&config) {
        Ok(json) => json,
        Err(error) => {
            tracing::error!("could not serialize the client config: {error}");
            return Error::JsonSerialization(error.to_string()).into_response();
        }
    };

    // The chart options contain JavaScript functions, so they are embedded as a
    // JavaScript object literal rather than JSON.
    let script = format!(
        "window.TRIP_EXPENSES = {config_json};\nwindow.TRIP_EXPENSES.chartOptions = {};",
        category_pie_chart()
    );

    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        HeadElement::ScriptSource(PreEscaped(script)),
        rupee_input_styles(),
    ];

    base("Dashboard", &head_elements, &client_view(&state.catalogue)).into_response()
}

fn client_view(catalogue: &Catalogue) -> Markup {
    html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            header class="page-header"
            {
                h1 class="title-gradient" { "Trip Expenses" }
                p class="subtitle" { "Track every penny in real time" }
            }

            div id="loading" class="loading"
            {
                (loading_spinner())
                span { "Loading..." }
            }

            (summary_cards())

            div class="grid grid-cols-2"
            {
                (expense_form(catalogue))

                section class=(CARD_STYLE)
                {
                    h2 { "Spending by Category" }
                    div id=(CATEGORY_CHART_ID) class="chart" {}
                }
            }

            section class=(CARD_STYLE) id="history-section"
            {
                div class="section-header"
                {
                    h2 { "Recent Transactions" }
                    button id="export-button" type="button" class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Export CSV"
                    }
                }

                div id="history" class="history"
                {
                    p class="empty-history" { "No expenses yet." }
                }
            }
        }
    }
}

fn summary_cards() -> Markup {
    html! {
        section id="summary" class="grid grid-cols-3"
        {
            div class={(CARD_STYLE) " summary-card"}
            {
                div class=(SUMMARY_LABEL_STYLE) { "Total Spent" }
                div id="total-spent" class=(SUMMARY_VALUE_STYLE) { "\u{20B9}0" }
            }

            div class={(CARD_STYLE) " summary-card"}
            {
                div class=(SUMMARY_LABEL_STYLE) { "Top Spender" }
                div id="top-spender" class=(SUMMARY_VALUE_STYLE) { "N/A" }
            }

            div class={(CARD_STYLE) " summary-card"}
            {
                div class=(SUMMARY_LABEL_STYLE) { "Categories" }
                div id="category-count" class=(SUMMARY_VALUE_STYLE) { "0" }
            }
        }
    }
}

fn expense_form(catalogue: &Catalogue) -> Markup {
    let default_category = catalogue.default_category();
    let default_sub_category = catalogue.default_sub_category(default_category);

    html! {
        section class=(CARD_STYLE)
        {
            h2 id="form-title" { "Add New Expense" }

            form id="expense-form" class="expense-form"
            {
                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }
                    div class="input-wrapper"
                    {
                        input
                            id="amount"
                            name="amount"
                            type="number"
                            step="0.01"
                            min="0.01"
                            placeholder="0.00"
                            class=(FORM_TEXT_INPUT_STYLE)
                            required;
                    }
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                    select id="category" name="category" class=(FORM_TEXT_INPUT_STYLE) required
                    {
                        @for category in &catalogue.categories {
                            option
                                value=(category.name)
                                selected[category.name == default_category]
                            {
                                (category.name)
                            }
                        }
                    }
                }

                div
                {
                    label for="subCategory" class=(FORM_LABEL_STYLE) { "Sub-Category" }
                    select id="subCategory" name="subCategory" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for sub_category in catalogue.sub_categories(default_category) {
                            option
                                value=(sub_category)
                                selected[Some(sub_category.as_str()) == default_sub_category]
                            {
                                (sub_category)
                            }
                        }
                    }
                }

                div
                {
                    label for="spentBy" class=(FORM_LABEL_STYLE) { "Spent By" }
                    select id="spentBy" name="spentBy" class=(FORM_TEXT_INPUT_STYLE) required
                    {
                        @for spender in &catalogue.spenders {
                            option value=(spender) { (spender) }
                        }
                    }
                }

                div class="grid grid-cols-2"
                {
                    div
                    {
                        label for="date" class=(FORM_LABEL_STYLE) { "Date" }
                        input id="date" name="date" type="date" class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="time" class=(FORM_LABEL_STYLE) { "Time" }
                        // Stored times may carry seconds.
                        input
                            id="time"
                            name="time"
                            type="time"
                            step="1"
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="purpose" class=(FORM_LABEL_STYLE) { "Purpose" }
                    input
                        id="purpose"
                        name="purpose"
                        type="text"
                        placeholder="Purpose (optional)"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button id="submit-button" type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Add Expense"
                }

                button id="cancel-edit" type="button" class=(BUTTON_SECONDARY_STYLE) hidden
                {
                    "Cancel Edit"
                }
            }
        }
    }
}
