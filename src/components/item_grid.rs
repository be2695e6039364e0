//! Item Grid Component
//!
//! Rows of item cards from the page's feed store.

use leptos::prelude::*;

use crate::grid::Card;
use crate::store::{store_shows_empty_notice, store_rows, use_feed_store};

use super::LikeButton;

#[component]
pub fn ItemGrid(#[prop(into)] empty_text: String) -> impl IntoView {
    let store = use_feed_store();

    view! {
        <div class="item-grid container">
            <Show when=move || store_shows_empty_notice(&store)>
                <p class="text-muted text-center">{empty_text.clone()}</p>
            </Show>
            <For
                each=move || store_rows(&store)
                key=|row| row.key
                children=move |row| {
                    view! {
                        <div class="row">
                            {row.cards.into_iter().map(|card| view! {
                                <div class="col-sm-4">
                                    <ItemCard card=card />
                                </div>
                            }).collect_view()}
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Image, title, description and like button, linked to the item page
#[component]
pub fn ItemCard(card: Card) -> impl IntoView {
    let link = card.link();
    let Card { id, item } = card;

    view! {
        <div class="card item-card">
            <img class="card-img-top" src=item.image_url alt=item.title.clone() />
            <div class="card-body">
                <h5 class="card-title">{item.title}</h5>
                <p class="card-text">{item.description}</p>
                <LikeButton id=id initial_count=item.number_of_likes />
                <a href=link class="stretched-link"></a>
            </div>
        </div>
    }
}
