use shoplist_engine::constants::DEFAULT_CUSTOM_RARITY;
use shoplist_engine::{CustomItemDraft, Rarity};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AddItemDialogProps {
    /// Receives the raw draft; validation and defaults happen on submit.
    pub on_submit: Callback<CustomItemDraft>,
    pub on_close: Callback<()>,
}

#[function_component(AddItemDialog)]
pub fn add_item_dialog(props: &AddItemDialogProps) -> Html {
    let name = use_state(String::new);
    let rarity = use_state(|| DEFAULT_CUSTOM_RARITY.to_string());
    let price = use_state(String::new);
    let description = use_state(String::new);
    let name_ref = use_node_ref();

    {
        let name_ref = name_ref.clone();
        use_effect_with((), move |()| {
            if let Some(input) = name_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
            || {}
        });
    }

    let text_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                state.set(input.value());
            }
        })
    };
    let on_name = text_input(&name);
    let on_price = text_input(&price);
    let on_rarity = {
        let rarity = rarity.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                rarity.set(select.value());
            }
        })
    };
    let on_description = {
        let description = description.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                description.set(area.value());
            }
        })
    };

    let on_submit = {
        let cb = props.on_submit.clone();
        let (name, rarity, price, description) = (
            name.clone(),
            rarity.clone(),
            price.clone(),
            description.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit(CustomItemDraft {
                name: (*name).clone(),
                rarity: (*rarity).clone(),
                price: (*price).clone(),
                description: (*description).clone(),
            });
        })
    };
    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                e.stop_propagation();
                cb.emit(());
            }
        })
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="shoplist-dialog-backdrop" role="presentation" onclick={on_close.clone()}>
            <form
                class="shoplist-dialog"
                role="dialog"
                aria-modal="true"
                aria-labelledby="shoplist-dialog-title"
                onsubmit={on_submit}
                onkeydown={on_keydown}
                onclick={keep_open}
            >
                <h2 id="shoplist-dialog-title">{ "Add custom item" }</h2>
                <label>
                    { "Name" }
                    <input type="text" name="name" ref={name_ref} value={(*name).clone()} oninput={on_name} />
                </label>
                <label>
                    { "Rarity" }
                    <select name="rarity" onchange={on_rarity}>
                        { for Rarity::ALL.iter().map(|tier| html! {
                            <option value={tier.code()} selected={*rarity == tier.code()}>{ tier.label() }</option>
                        }) }
                    </select>
                </label>
                <label>
                    { "Price" }
                    <input type="text" name="price" placeholder="0 gp" value={(*price).clone()} oninput={on_price} />
                </label>
                <label>
                    { "Description" }
                    <textarea name="description" rows="4" value={(*description).clone()} oninput={on_description} />
                </label>
                <div class="shoplist-dialog-actions">
                    <button type="button" class="shoplist-dialog-cancel" onclick={on_close}>{ "Cancel" }</button>
                    <button type="submit" class="shoplist-dialog-submit">{ "Add" }</button>
                </div>
            </form>
        </div>
    }
}
