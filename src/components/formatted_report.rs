use yew::prelude::*;

use crate::models::report::format_report;

#[derive(Properties, PartialEq)]
pub struct FormattedReportProps {
    pub text: AttrValue,
}

/// Backend-generated report text, one element per line.
#[function_component(FormattedReport)]
pub fn formatted_report(props: &FormattedReportProps) -> Html {
    let lines = use_memo(props.text.clone(), |text| format_report(text));

    html! {
        <div class="formatted-report">
            {
                lines.iter().enumerate().map(|(i, line)| {
                    if line.text.trim().is_empty() {
                        html! { <br key={i} /> }
                    } else {
                        html! { <p key={i} class={line.kind.css_class()}>{&line.text}</p> }
                    }
                }).collect::<Html>()
            }
        </div>
    }
}
