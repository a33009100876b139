//! ページ送りコンポーネント

use leptos::prelude::*;
use xiaoyu_common::AppState;

#[component]
pub fn Pagination(state: RwSignal<AppState>) -> impl IntoView {
    view! {
        <div class="pagination">
            {move || {
                state.with(|s| s.search.pagination()).map(|pagination| {
                    pagination
                        .buttons
                        .into_iter()
                        .map(|button| {
                            let action = button.action;
                            let class = if button.active {
                                "pagination-btn active"
                            } else {
                                "pagination-btn"
                            };
                            view! {
                                <button
                                    class=class
                                    disabled=button.disabled
                                    on:click=move |_| {
                                        state.update(|s| {
                                            s.search.change_page(action);
                                        });
                                    }
                                >
                                    {button.label}
                                </button>
                            }
                        })
                        .collect_view()
                })
            }}
        </div>
    }
}
