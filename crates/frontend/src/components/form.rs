//! Form field helpers

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Current value of the input that fired `event`
pub fn input_value(event: &InputEvent) -> String {
    event.target_unchecked_into::<HtmlInputElement>().value()
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub oninput: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub required: bool,
    /// Validation message shown under the field
    #[prop_or_default]
    pub error: Option<AttrValue>,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let oninput = props.oninput.clone();
        Callback::from(move |e: InputEvent| oninput.emit(input_value(&e)))
    };

    html! {
        <label class="block mb-4">
            <span class="block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1">{ props.label.clone() }</span>
            <input
                type={props.input_type.clone()}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                required={props.required}
                {oninput}
                class="w-full px-3 py-2 border border-gray-300 dark:border-gray-600 rounded-md bg-white dark:bg-gray-800 text-gray-900 dark:text-white focus:outline-none focus:ring-2 focus:ring-blue-500"
            />
            if let Some(error) = &props.error {
                <span class="block mt-1 text-sm text-red-600 dark:text-red-400">{ error.clone() }</span>
            }
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct CheckboxProps {
    pub label: AttrValue,
    pub checked: bool,
    pub onchange: Callback<bool>,
}

#[function_component(Checkbox)]
pub fn checkbox(props: &CheckboxProps) -> Html {
    let onchange = {
        let onchange = props.onchange.clone();
        Callback::from(move |e: Event| {
            onchange.emit(e.target_unchecked_into::<HtmlInputElement>().checked());
        })
    };

    html! {
        <label class="inline-flex items-center gap-2 mr-6 mb-4 text-sm text-gray-700 dark:text-gray-300">
            <input type="checkbox" checked={props.checked} {onchange} />
            { props.label.clone() }
        </label>
    }
}
