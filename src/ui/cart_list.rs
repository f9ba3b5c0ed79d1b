/// Cart detail list, rendered from the `CartView` view-model

use crate::summary::{CartView, format_number};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CartListProps {
    pub view: CartView,
    pub currency: AttrValue,
    pub empty_message: AttrValue,
}

#[function_component(CartList)]
pub fn cart_list(props: &CartListProps) -> Html {
    if props.view.is_empty {
        return html! {
            <div class="cart-empty">{props.empty_message.clone()}</div>
        };
    }

    let currency = &props.currency;

    html! {
        <>
            {for props.view.rows.iter().map(|row| html! {
                <div class="cart-item" key={row.name.clone()}>
                    <div class="item-left">
                        <strong>{&row.name}</strong>
                        <span class="item-price">{format!("{}{} × {}", format_number(row.price), currency, row.qty)}</span>
                    </div>
                    <div class="item-right">
                        <strong>{format!("{}{}", format_number(row.line_total), currency)}</strong>
                    </div>
                </div>
            })}
        </>
    }
}
