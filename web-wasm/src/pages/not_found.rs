use admin_dashboard_common::routes::HOME_PATH;
use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"404"</h1>
            <p>"The page you are looking for does not exist."</p>
            <a class="btn btn-primary" href=HOME_PATH>"Back to Home"</a>
        </section>
    }
}
