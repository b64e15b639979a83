use yew::prelude::*;

use crate::components::form_fields::CheckboxGroup;
use crate::hooks::use_reference_data::use_reference_data;

#[derive(Properties, PartialEq)]
pub struct SupplierPickerProps {
    /// Product the chart is for
    pub title: AttrValue,
    pub on_confirm: Callback<Vec<String>>,
    pub on_cancel: Callback<()>,
}

/// Dialog choosing which suppliers' price history to compare.
#[function_component(SupplierPicker)]
pub fn supplier_picker(props: &SupplierPickerProps) -> Html {
    let reference = use_reference_data();
    let selected = use_state(Vec::<String>::new);
    let error = use_state(|| None::<String>);

    let options: Vec<(String, String)> = reference
        .data
        .supplier_names()
        .into_iter()
        .map(|name| (name.clone(), name))
        .collect();

    let on_change = {
        let selected = selected.clone();
        let error = error.clone();
        Callback::from(move |names: Vec<String>| {
            error.set(None);
            selected.set(names);
        })
    };

    let select_all = {
        let selected = selected.clone();
        let names = reference.data.supplier_names();
        Callback::from(move |_: MouseEvent| selected.set(names.clone()))
    };

    let confirm = {
        let selected = selected.clone();
        let error = error.clone();
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| {
            if selected.is_empty() {
                error.set(Some(
                    "Будь ласка, виберіть хоча б одного постачальника".to_string(),
                ));
            } else {
                on_confirm.emit((*selected).clone());
            }
        })
    };

    let cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <h3>{"Графік цін: "}{props.title.clone()}</h3>
                if reference.data.is_loading() {
                    <p class="hint">{"Завантаження постачальників..."}</p>
                }
                <CheckboxGroup
                    legend="Постачальники"
                    {options}
                    selected={(*selected).clone()}
                    {on_change}
                />
                if let Some(message) = (*error).clone() {
                    <p class="form-error" role="alert">{message}</p>
                }
                <div class="form-actions">
                    <button type="button" onclick={select_all}>{"Вибрати всіх"}</button>
                    <button type="button" class="primary" onclick={confirm}>{"Показати графік"}</button>
                    <button type="button" onclick={cancel}>{"Скасувати"}</button>
                </div>
            </div>
        </div>
    }
}
