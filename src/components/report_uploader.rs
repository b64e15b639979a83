use gloo::file::{File, callbacks::FileReader};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::notice::Notice;
use crate::hooks::use_action::use_action;
use crate::models::{
    error::AppError,
    product::ProductType,
    upload::{ReportFile, validate_report_file_name},
};
use crate::services::api::DashboardClient;

#[derive(Properties, PartialEq)]
pub struct ReportUploaderProps {
    pub product: ProductType,
}

/// Upload of a supplier price report file.
#[function_component(ReportUploader)]
pub fn report_uploader(props: &ReportUploaderProps) -> Html {
    let action = use_action();
    let selected = use_state(|| None::<web_sys::File>);
    let input_ref = use_node_ref();
    // Keeps the browser FileReader alive until it calls back
    let reader = use_mut_ref(|| None::<FileReader>);

    let on_select = {
        let selected = selected.clone();
        let action = action.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            selected.set(input.files().and_then(|files| files.get(0)));
            action.dismiss();
        })
    };

    let on_upload = {
        let action = action.clone();
        let selected = selected.clone();
        let input_ref = input_ref.clone();
        let reader = reader.clone();
        let product = props.product;

        Callback::from(move |_: MouseEvent| {
            let name = (*selected).as_ref().map(web_sys::File::name);
            if let Err(e) = validate_report_file_name(product, name.as_deref()) {
                action.reject(&e);
                return;
            }
            let (Some(file), Some(name)) = ((*selected).clone(), name) else {
                return;
            };

            let action = action.clone();
            let selected = selected.clone();
            let input_ref = input_ref.clone();
            let task = gloo::file::callbacks::read_as_bytes(&File::from(file), move |result| {
                let bytes = match result {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        web_sys::console::error_1(&format!("File read failed: {e}").into());
                        action.reject(&AppError::ValidationError(
                            "Не вдалося прочитати файл".to_string(),
                        ));
                        return;
                    }
                };

                action.run("Помилка при завантаженні файлу", async move {
                    let report = ReportFile::new(product, name, bytes)?;
                    let ack = DashboardClient::new()?.upload_report(product, report).await?;
                    Ok::<_, AppError>(ack.message("Файл успішно завантажено"))
                });

                selected.set(None);
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    input.set_value("");
                }
            });
            *reader.borrow_mut() = Some(task);
        })
    };

    let on_dismiss = {
        let action = action.clone();
        Callback::from(move |()| action.dismiss())
    };

    let running = action.state().is_running();
    let extensions = props
        .product
        .accepted_report_extensions()
        .iter()
        .map(|ext| ext.to_uppercase())
        .collect::<Vec<_>>()
        .join(", ");

    html! {
        <section class="upload-section">
            <h2>{"Завантаження звіту"}</h2>
            <p class="hint">{"Підтримувані формати: "}{extensions}</p>
            <div class="upload-row">
                <input
                    ref={input_ref}
                    type="file"
                    accept={props.product.accept_attribute()}
                    onchange={on_select}
                    disabled={running}
                />
                <button type="button" class="primary" onclick={on_upload} disabled={running}>
                    if running { {"Завантаження..."} } else { {"Завантажити"} }
                </button>
            </div>
            <Notice state={action.state().clone()} {on_dismiss} />
        </section>
    }
}
