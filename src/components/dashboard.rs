use std::rc::Rc;
use yew::prelude::*;

use crate::components::{
    analytics_panel::AnalyticsPanel, battery_filter_form::BatteryFilterForm,
    battery_table::BatteryTable, chart_panel::ChartPanel, pagination::PaginationControls,
    solar_panel_filter_form::SolarPanelFilterForm, solar_panel_table::SolarPanelTable,
    status::Status, supplier_picker::SupplierPicker,
};
use crate::hooks::{use_chart::use_chart, use_listing::use_listing};
use crate::models::{
    Batteries, Product, SolarPanels, chart::ChartSelection, listing::ListingRow,
};

/// Product-specific widgets of the dashboard page.
pub trait ProductView: Product {
    fn filter_form(filters: Self::Filters, on_submit: Callback<Self::Filters>, disabled: bool)
    -> Html;

    fn table(rows: Rc<Vec<Self::Row>>, on_chart: Callback<Self::Row>) -> Html;
}

impl ProductView for Batteries {
    fn filter_form(filters: Self::Filters, on_submit: Callback<Self::Filters>, disabled: bool) -> Html {
        html! { <BatteryFilterForm {filters} {on_submit} {disabled} /> }
    }

    fn table(rows: Rc<Vec<Self::Row>>, on_chart: Callback<Self::Row>) -> Html {
        html! { <BatteryTable {rows} {on_chart} /> }
    }
}

impl ProductView for SolarPanels {
    fn filter_form(filters: Self::Filters, on_submit: Callback<Self::Filters>, disabled: bool) -> Html {
        html! { <SolarPanelFilterForm {filters} {on_submit} {disabled} /> }
    }

    fn table(rows: Rc<Vec<Self::Row>>, on_chart: Callback<Self::Row>) -> Html {
        html! { <SolarPanelTable {rows} {on_chart} /> }
    }
}

/// Filters, paged listing, price history chart and analytics of one
/// product family.
#[function_component(Dashboard)]
pub fn dashboard<P: ProductView>() -> Html {
    let listing = use_listing::<P>();
    let chart = use_chart::<P>();
    let picking = use_state(|| None::<P::Row>);

    let on_chart = {
        let picking = picking.clone();
        Callback::from(move |row: P::Row| picking.set(Some(row)))
    };

    let picker = (*picking).clone().map(|row| {
        let title = row.title().to_string();
        let on_confirm = {
            let picking = picking.clone();
            let open = chart.open.clone();
            Callback::from(move |suppliers: Vec<String>| {
                open.emit(ChartSelection {
                    row: row.clone(),
                    suppliers,
                });
                picking.set(None);
            })
        };
        let on_cancel = {
            let picking = picking.clone();
            Callback::from(move |()| picking.set(None))
        };

        html! { <SupplierPicker {title} {on_confirm} {on_cancel} /> }
    });

    let chart_panel = chart.selection.as_ref().map(|selection| {
        html! {
            <ChartPanel
                title={selection.row.title().to_string()}
                suppliers={selection.suppliers.clone()}
                state={chart.state.clone()}
                on_close={chart.close.clone()}
            />
        }
    });

    let state = &listing.state;

    html! {
        <div class="dashboard">
            <section class="filter-section">
                <h2>{"Фільтри: "}{P::TYPE.label()}</h2>
                {P::filter_form(listing.filters.clone(), listing.submit.clone(), state.loading)}
            </section>

            <section class="data-section">
                <Status
                    loading={state.loading && state.is_empty()}
                    error={state.error.clone()}
                    empty={state.is_empty()}
                />
                if !state.is_empty() {
                    {P::table(state.rows.clone(), on_chart)}
                }
                <PaginationControls
                    pagination={state.pagination}
                    on_change={listing.change_page.clone()}
                    disabled={state.loading}
                />
            </section>

            {for picker}
            {for chart_panel}

            <AnalyticsPanel<P> rows={state.rows.clone()} />
        </div>
    }
}
