use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid, Legend},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Color, LineStyle, LineStyleType,
        SplitLine, Tooltip, Trigger,
    },
    renderer::WasmRenderer,
    series::Bar,
};
use gloo::events::EventListener;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::models::chart::{ChartPayload, ChartState};

const CHART_ID: &str = "price-history-chart";

const SUPPLIER_COLORS: [&str; 6] = [
    "#00b4a0", "#648fff", "#785ef0", "#dc267f", "#fe6100", "#ffb000",
];

type SeriesData = (Vec<String>, Vec<(String, Vec<f64>)>);

#[derive(Properties, PartialEq)]
pub struct ChartPanelProps {
    pub title: AttrValue,
    pub suppliers: Vec<String>,
    pub state: ChartState,
    pub on_close: Callback<()>,
}

/// Price history of one product: a backend-rendered image or a bar chart
/// with one series per supplier.
#[function_component(ChartPanel)]
pub fn chart_panel(props: &ChartPanelProps) -> Html {
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = match &props.state {
        ChartState::Loading => html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Завантаження графіка..."}</p>
            </div>
        },
        ChartState::NoData => html! {
            <div class="status empty">
                <p>{"Немає даних для побудови графіка"}</p>
            </div>
        },
        ChartState::Error(message) => html! {
            <div class="status error">
                <p>{"❌ "}{message}</p>
            </div>
        },
        ChartState::Ready(payload) => match payload.data_url() {
            Some(src) => html! {
                <img class="chart-image" {src} alt={format!("Графік цін: {}", props.title)} />
            },
            None => html! {
                <SeriesChart payload={payload.clone()} suppliers={props.suppliers.clone()} />
            },
        },
    };

    html! {
        <section class="chart-section">
            <header class="panel-header">
                <h2>{"Графік цін: "}{props.title.clone()}</h2>
                <button type="button" onclick={close} aria-label="Закрити графік">{"×"}</button>
            </header>
            {body}
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SeriesChartProps {
    payload: Rc<ChartPayload>,
    suppliers: Vec<String>,
}

#[function_component(SeriesChart)]
fn series_chart(props: &SeriesChartProps) -> Html {
    let container_ref = use_node_ref();
    let series_data = use_memo(
        (props.payload.clone(), props.suppliers.clone()),
        |(payload, suppliers)| payload.series_data(suppliers),
    );

    {
        let container_ref = container_ref.clone();

        use_effect_with(
            (series_data, container_ref),
            |(series_data, container_ref)| {
                let listener = container_ref.cast::<HtmlElement>().and_then(|container| {
                    render_chart(&container, series_data);

                    let series_data = series_data.clone();
                    web_sys::window().map(|window| {
                        EventListener::new(&window, "resize", move |_| {
                            render_chart(&container, &series_data);
                        })
                    })
                });

                move || drop(listener)
            },
        );
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={CHART_ID} />
        </div>
    }
}

fn render_chart(container: &HtmlElement, series_data: &SeriesData) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 {
        return;
    }

    let chart = build_chart(series_data);
    if let Err(e) = WasmRenderer::new(width, height).render(CHART_ID, &chart) {
        web_sys::console::error_1(&format!("Render error: {e:?}").into());
    }
}

fn build_chart(series_data: &SeriesData) -> CharmingChart {
    let (dates, columns) = series_data;
    let (axis_color, grid_color) = ("#6b7280", "#e5e7eb");

    let chart = CharmingChart::new()
        .color(SUPPLIER_COLORS.iter().map(|c| Color::from(*c)).collect())
        .legend(Legend::new())
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("8%")
                .right("4%")
                .bottom("12%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(dates.clone())
                .axis_label(AxisLabel::new().rotate(45).color(axis_color)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("грн")
                .axis_label(AxisLabel::new().color(axis_color))
                .split_line(
                    SplitLine::new().line_style(
                        LineStyle::new()
                            .color(grid_color)
                            .type_(LineStyleType::Dashed),
                    ),
                ),
        );

    columns.iter().fold(chart, |chart, (supplier, prices)| {
        chart.series(Bar::new().name(supplier.as_str()).data(prices.clone()))
    })
}
