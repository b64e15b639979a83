use yew::prelude::*;

use crate::components::{
    parser_buttons::ParserButtons, price_comparison::PriceComparison,
    report_uploader::ReportUploader, text_report_uploader::TextReportUploader,
};
use crate::models::product::ProductType;

#[derive(Properties, PartialEq)]
pub struct ReportsProps {
    pub product: ProductType,
}

/// Data intake and comparison page of a product family.
#[function_component(Reports)]
pub fn reports(props: &ReportsProps) -> Html {
    let product = props.product;

    html! {
        <div class="reports">
            <ReportUploader {product} />
            <TextReportUploader {product} />
            <ParserButtons {product} />
            <PriceComparison {product} />
        </div>
    }
}
