use yew::prelude::*;

use crate::components::form_fields::{
    CheckboxGroup, Choices, RangeFields, SelectField, TextField, choices, draft_setter,
    id_choices, ids_to_values, page_size_choices, sort_order_choices, values_to_ids,
};
use crate::hooks::use_reference_data::use_reference_data;
use crate::models::battery::{
    BatteryFilterDraft, BatteryFilters, BatterySortField, ELECTROLYTE_OPTIONS, POLARITY_OPTIONS,
    REGION_OPTIONS,
};

#[derive(Properties, PartialEq)]
pub struct BatteryFilterFormProps {
    /// Filters of the listing on screen; the draft starts from them
    pub filters: BatteryFilters,
    pub on_submit: Callback<BatteryFilters>,
    #[prop_or_default]
    pub disabled: bool,
}

fn sort_field_choices() -> Choices {
    BatterySortField::all()
        .iter()
        .map(|f| (f.as_str().to_string(), f.label().to_string()))
        .collect()
}

#[function_component(BatteryFilterForm)]
pub fn battery_filter_form(props: &BatteryFilterFormProps) -> Html {
    let draft = use_state(|| BatteryFilterDraft::from(&props.filters));
    let error = use_state(|| None::<String>);
    let reference = use_reference_data();

    let onsubmit = {
        let draft = draft.clone();
        let error = error.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match draft.normalize() {
                Ok(filters) => {
                    error.set(None);
                    on_submit.emit(filters);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        })
    };

    let onreset = {
        let draft = draft.clone();
        let error = error.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(BatteryFilterDraft::default());
            error.set(None);
            on_submit.emit(BatteryFilters::default());
        })
    };

    let on_refresh = {
        let refresh = reference.refresh.clone();
        Callback::from(move |_: MouseEvent| refresh.emit(()))
    };

    let brands = id_choices(
        reference
            .data
            .brands
            .iter()
            .map(|b| (b.id, b.name.as_str())),
    );
    let suppliers = id_choices(
        reference
            .data
            .suppliers
            .iter()
            .map(|s| (s.id, s.name.as_str())),
    );

    let on_brands = {
        let set = draft_setter(&draft, |d: &mut BatteryFilterDraft, ids: Vec<i64>| {
            d.brand_ids = ids;
        });
        Callback::from(move |values: Vec<String>| set.emit(values_to_ids(&values)))
    };
    let on_suppliers = {
        let set = draft_setter(&draft, |d: &mut BatteryFilterDraft, ids: Vec<i64>| {
            d.supplier_ids = ids;
        });
        Callback::from(move |values: Vec<String>| set.emit(values_to_ids(&values)))
    };

    let disabled = props.disabled;

    html! {
        <form class="filter-form" {onsubmit}>
            <div class="filter-grid">
                <CheckboxGroup
                    legend="Бренди"
                    options={brands}
                    selected={ids_to_values(&draft.brand_ids)}
                    on_change={on_brands}
                    {disabled}
                />
                <CheckboxGroup
                    legend="Постачальники"
                    options={suppliers}
                    selected={ids_to_values(&draft.supplier_ids)}
                    on_change={on_suppliers}
                    {disabled}
                />
                <TextField
                    label="Об'єм, Аг"
                    placeholder="60, 74"
                    value={draft.volumes.clone()}
                    on_change={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.volumes = v)}
                    {disabled}
                />
                <TextField
                    label="Пусковий струм, А"
                    placeholder="540, 680"
                    value={draft.c_amps.clone()}
                    on_change={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.c_amps = v)}
                    {disabled}
                />
                <CheckboxGroup
                    legend="Полярність"
                    options={choices(POLARITY_OPTIONS)}
                    selected={draft.polarities.clone()}
                    on_change={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.polarities = v)}
                    {disabled}
                />
                <CheckboxGroup
                    legend="Регіон"
                    options={choices(REGION_OPTIONS)}
                    selected={draft.regions.clone()}
                    on_change={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.regions = v)}
                    {disabled}
                />
                <CheckboxGroup
                    legend="Електроліт"
                    options={choices(ELECTROLYTE_OPTIONS)}
                    selected={draft.electrolytes.clone()}
                    on_change={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.electrolytes = v)}
                    {disabled}
                />
                <RangeFields
                    label="Ціна, грн"
                    min={draft.price_min.clone()}
                    max={draft.price_max.clone()}
                    on_min={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.price_min = v)}
                    on_max={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.price_max = v)}
                    {disabled}
                />
                <SelectField
                    label="Сортувати за"
                    options={sort_field_choices()}
                    value={draft.sort_by.clone()}
                    on_change={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.sort_by = v)}
                    {disabled}
                />
                <SelectField
                    label="Порядок"
                    options={sort_order_choices()}
                    value={draft.sort_order.clone()}
                    on_change={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.sort_order = v)}
                    {disabled}
                />
                <SelectField
                    label="Рядків на сторінці"
                    options={page_size_choices()}
                    value={draft.page_size.clone()}
                    on_change={draft_setter(&draft, |d: &mut BatteryFilterDraft, v| d.page_size = v)}
                    {disabled}
                />
            </div>

            if let Some(message) = (*error).clone() {
                <p class="form-error" role="alert">{message}</p>
            }
            if let Some(message) = reference.data.error.clone() {
                <p class="form-error">{message}</p>
            }

            <div class="form-actions">
                <button type="submit" class="primary" {disabled}>{"Застосувати"}</button>
                <button type="button" onclick={onreset} {disabled}>{"Скинути"}</button>
                <button
                    type="button"
                    onclick={on_refresh}
                    disabled={reference.data.is_loading()}
                >
                    {"Оновити довідники"}
                </button>
            </div>
        </form>
    }
}
