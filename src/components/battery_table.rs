use std::rc::Rc;
use yew::prelude::*;

use crate::models::{battery::BatteryRow, datetime, filters::format_number};

#[derive(Properties, PartialEq)]
pub struct BatteryTableProps {
    pub rows: Rc<Vec<BatteryRow>>,
    /// Opens the supplier picker for a price history chart
    pub on_chart: Callback<BatteryRow>,
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[function_component(BatteryTable)]
pub fn battery_table(props: &BatteryTableProps) -> Html {
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
                <td class="numeric">{format_number(row.volume)}</td>
                <td class="numeric">{row.c_amps.map_or_else(|| "-".to_string(), |a| a.to_string())}</td>
                <td>{or_dash(row.polarity.as_deref())}</td>
                <td>{or_dash(row.region.as_deref())}</td>
                <td>{or_dash(row.electrolyte.as_deref())}</td>
                <td class="numeric">{format!("{:.2}", row.price)}</td>
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
                        <th>{"Об'єм, Аг"}</th>
                        <th>{"Пусковий струм, А"}</th>
                        <th>{"Полярність"}</th>
                        <th>{"Регіон"}</th>
                        <th>{"Електроліт"}</th>
                        <th>{"Ціна, грн"}</th>
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
