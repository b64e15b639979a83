use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::config::Config;
use crate::models::filters::SortOrder;

/// `(value, label)` pairs offered by a field.
pub type Choices = Vec<(String, String)>;

pub fn choices(options: &[(&str, &str)]) -> Choices {
    options
        .iter()
        .map(|(value, label)| ((*value).to_string(), (*label).to_string()))
        .collect()
}

pub fn sort_order_choices() -> Choices {
    SortOrder::all()
        .iter()
        .map(|o| (o.as_str().to_string(), o.label().to_string()))
        .collect()
}

pub fn page_size_choices() -> Choices {
    Config::PAGE_SIZE_OPTIONS
        .iter()
        .map(|size| (size.to_string(), size.to_string()))
        .collect()
}

/// Choices keyed by numeric id, as used for brands and suppliers.
pub fn id_choices<'a>(items: impl Iterator<Item = (i64, &'a str)>) -> Choices {
    items
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect()
}

/// Callback writing one field of a form draft held in state.
pub fn draft_setter<D, V>(draft: &UseStateHandle<D>, apply: fn(&mut D, V)) -> Callback<V>
where
    D: Clone + 'static,
    V: 'static,
{
    let draft = draft.clone();
    Callback::from(move |value: V| {
        let mut next = (*draft).clone();
        apply(&mut next, value);
        draft.set(next);
    })
}

pub fn ids_to_values(ids: &[i64]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

pub fn values_to_ids(values: &[String]) -> Vec<i64> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}

#[derive(Properties, PartialEq)]
pub struct CheckboxGroupProps {
    pub legend: AttrValue,
    pub options: Choices,
    pub selected: Vec<String>,
    pub on_change: Callback<Vec<String>>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Multi-select rendered as a list of checkboxes. Selection order follows
/// the option order.
#[function_component(CheckboxGroup)]
pub fn checkbox_group(props: &CheckboxGroupProps) -> Html {
    let items = props.options.iter().map(|(value, label)| {
        let checked = props.selected.contains(value);

        let onchange = {
            let value = value.clone();
            let options = props.options.clone();
            let selected = props.selected.clone();
            let on_change = props.on_change.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let next = options
                    .iter()
                    .map(|(v, _)| v)
                    .filter(|v| {
                        if **v == value {
                            input.checked()
                        } else {
                            selected.contains(v)
                        }
                    })
                    .cloned()
                    .collect();
                on_change.emit(next);
            })
        };

        html! {
            <label class="checkbox-option" key={value.clone()}>
                <input type="checkbox" {checked} {onchange} disabled={props.disabled} />
                {label}
            </label>
        }
    });

    html! {
        <fieldset class="checkbox-group">
            <legend>{props.legend.clone()}</legend>
            if props.options.is_empty() {
                <p class="hint">{"Немає варіантів"}</p>
            } else {
                {for items}
            }
        </fieldset>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        })
    };

    html! {
        <label class="text-field">
            <span>{props.label.clone()}</span>
            <input
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                {oninput}
                disabled={props.disabled}
            />
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    pub options: Choices,
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Single-choice dropdown.
#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(target.value());
        })
    };

    html! {
        <label class="select-field">
            <span>{props.label.clone()}</span>
            <select {onchange} disabled={props.disabled} aria-label={props.label.clone()}>
                {
                    props.options.iter().map(|(value, label)| {
                        let selected = *value == props.value;
                        html! {
                            <option value={value.clone()} {selected}>{label}</option>
                        }
                    }).collect::<Html>()
                }
            </select>
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct RangeFieldsProps {
    pub label: AttrValue,
    pub min: String,
    pub max: String,
    pub on_min: Callback<String>,
    pub on_max: Callback<String>,
    #[prop_or(AttrValue::Static("1"))]
    pub step: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
}

/// A `[min, max]` pair of numeric inputs.
#[function_component(RangeFields)]
pub fn range_fields(props: &RangeFieldsProps) -> Html {
    let input = |value: &str, on_change: &Callback<String>, aria: &'static str| {
        let on_change = on_change.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(input.value());
        });
        html! {
            <input
                type="number"
                step={props.step.clone()}
                value={value.to_string()}
                aria-label={aria}
                {oninput}
                disabled={props.disabled}
            />
        }
    };

    html! {
        <fieldset class="range-fields">
            <legend>{props.label.clone()}</legend>
            {input(&props.min, &props.on_min, "від")}
            <span class="range-separator">{"–"}</span>
            {input(&props.max, &props.on_max, "до")}
        </fieldset>
    }
}
