use std::rc::Rc;
use yew::prelude::*;

use crate::models::{datetime, filters::format_number, solar_panel::SolarPanelRow};

#[derive(Properties, PartialEq)]
pub struct SolarPanelTableProps {
    pub rows: Rc<Vec<SolarPanelRow>>,
    pub on_chart: Callback<SolarPanelRow>,
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[function_component(SolarPanelTable)]
pub fn solar_panel_table(props: &SolarPanelTableProps) -> Html {
    let rows = props.rows.iter().map(|row| {
        let on_chart = {
            let on_chart = props.on_chart.clone();
            let row = row.clone();
            Callback::from(move |_: MouseEvent| on_chart.emit(row.clone()))
        };

        html! {
            <tr key={row.id}>
                <td>{&row.full_name}</td>
                <td>{or_dash(row.brand.as_deref())}</td>
                <td>{or_dash(row.supplier.as_deref())}</td>
                <td class="numeric">{format_number(row.power)}</td>
                <td>{or_dash(row.panel_type.as_deref())}</td>
                <td>{or_dash(row.cell_type.as_deref())}</td>
                <td class="numeric">{row.thickness.map_or_else(|| "-".to_string(), format_number)}</td>
                <td class="numeric">{format!("{:.2}", row.price)}</td>
                <td class="numeric">
                    {row.effective_price_per_w().map_or_else(|| "-".to_string(), |p| format!("{p:.3}"))}
                </td>
                <td>{row.updated_at.as_ref().map_or_else(|| "-".to_string(), datetime::display_date)}</td>
                <td>
                    <button class="chart-button" onclick={on_chart} title="Графік цін">{"📈"}</button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="table-wrapper">
            <table class="listing-table">
                <thead>
                    <tr>
                        <th>{"Назва"}</th>
                        <th>{"Бренд"}</th>
                        <th>{"Постачальник"}</th>
                        <th>{"Потужність, Вт"}</th>
                        <th>{"Тип панелі"}</th>
                        <th>{"Тип комірок"}</th>
                        <th>{"Товщина, мм"}</th>
                        <th>{"Ціна, грн"}</th>
                        <th>{"Ціна за Вт"}</th>
                        <th>{"Оновлено"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {for rows}
                </tbody>
            </table>
        </div>
    }
}
