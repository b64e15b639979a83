use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::components::{
    form_fields::{SelectField, TextField},
    notice::Notice,
};
use crate::hooks::{use_action::use_action, use_reference_data::use_reference_data};
use crate::models::{
    error::AppError,
    product::ProductType,
    upload::{CUSTOM_SUPPLIER, TextReport},
};
use crate::services::api::DashboardClient;

#[derive(Properties, PartialEq)]
pub struct TextReportUploaderProps {
    pub product: ProductType,
}

/// Upload of a price list pasted as text, attributed to a supplier.
#[function_component(TextReportUploader)]
pub fn text_report_uploader(props: &TextReportUploaderProps) -> Html {
    let reference = use_reference_data();
    let action = use_action();
    let text = use_state(String::new);
    let supplier = use_state(String::new);
    let custom_supplier = use_state(String::new);

    let mut options: Vec<(String, String)> = vec![(String::new(), "Оберіть постачальника".to_string())];
    options.extend(
        reference
            .data
            .supplier_names()
            .into_iter()
            .map(|name| (name.clone(), name)),
    );
    options.push((CUSTOM_SUPPLIER.to_string(), CUSTOM_SUPPLIER.to_string()));

    let is_custom = *supplier == CUSTOM_SUPPLIER;

    let on_text = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let on_supplier = {
        let supplier = supplier.clone();
        Callback::from(move |value: String| supplier.set(value))
    };

    let on_custom_supplier = {
        let custom_supplier = custom_supplier.clone();
        Callback::from(move |value: String| custom_supplier.set(value))
    };

    let on_submit = {
        let action = action.clone();
        let text = text.clone();
        let supplier = supplier.clone();
        let custom_supplier = custom_supplier.clone();
        let product = props.product;

        Callback::from(move |_: MouseEvent| {
            let supplier_name = if *supplier == CUSTOM_SUPPLIER {
                (*custom_supplier).clone()
            } else {
                (*supplier).clone()
            };

            let report = match TextReport::new(&text, &supplier_name) {
                Ok(report) => report,
                Err(e) => {
                    action.reject(&e);
                    return;
                }
            };

            let text = text.clone();
            action.run("Помилка при завантаженні тексту", async move {
                let ack = DashboardClient::new()?
                    .upload_report_text(product, &report)
                    .await?;
                text.set(String::new());
                Ok::<_, AppError>(ack.message("Текст успішно завантажено"))
            });
        })
    };

    let on_dismiss = {
        let action = action.clone();
        Callback::from(move |()| action.dismiss())
    };

    let running = action.state().is_running();

    html! {
        <section class="upload-section">
            <h2>{"Завантаження тексту звіту"}</h2>
            <textarea
                class="report-text"
                rows="8"
                placeholder="Вставте текст прайс-листа"
                value={(*text).clone()}
                oninput={on_text}
                disabled={running}
            />
            <div class="upload-row">
                <SelectField
                    label="Постачальник"
                    {options}
                    value={(*supplier).clone()}
                    on_change={on_supplier}
                    disabled={running}
                />
                if is_custom {
                    <TextField
                        label="Назва постачальника"
                        value={(*custom_supplier).clone()}
                        on_change={on_custom_supplier}
                        disabled={running}
                    />
                }
                <button type="button" class="primary" onclick={on_submit} disabled={running}>
                    if running { {"Завантаження..."} } else { {"Завантажити текст"} }
                </button>
            </div>
            <Notice state={action.state().clone()} {on_dismiss} />
        </section>
    }
}
