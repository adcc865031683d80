use gymdash::screens::Screen;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

mod api;
mod components;
mod types;

use components::screen_page::{Home, ScreenCreate, ScreenEdit};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="flex h-screen bg-gray-100">
                // Sidebar
                <div class="w-64 bg-gray-800 text-white p-4 flex flex-col">
                    <h1 class="text-2xl font-bold mb-8">"GymDash"</h1>
                    <nav class="space-y-1 flex-1">
                        <NavLink href="/" label="Dashboard" />
                        <div class="border-t border-gray-700 my-4"></div>
                        <NavLink href="/members/new" label="Members" />
                        <NavLink href="/exercises/new" label="Exercises" />
                        <NavLink href="/meals/new" label="Meals" />
                        <NavLink href="/blogs/new" label="Blogs" />
                        <NavLink href="/categories/new" label="Categories" />
                    </nav>
                    <div class="text-xs text-gray-500 mt-4">
                        "Gym admin dashboard"
                    </div>
                </div>

                // Main Content
                <div class="flex-1 overflow-y-auto">
                    <Routes fallback=|| "Not found.">
                        <Route path=path!("/") view=Home/>
                        <Route path=path!("/members/new") view=|| view! { <ScreenCreate screen=Screen::Members/> }/>
                        <Route path=path!("/members/edit/:id") view=|| view! { <ScreenEdit screen=Screen::Members/> }/>
                        <Route path=path!("/exercises/new") view=|| view! { <ScreenCreate screen=Screen::Exercises/> }/>
                        <Route path=path!("/exercises/edit/:id") view=|| view! { <ScreenEdit screen=Screen::Exercises/> }/>
                        <Route path=path!("/meals/new") view=|| view! { <ScreenCreate screen=Screen::Meals/> }/>
                        <Route path=path!("/meals/edit/:id") view=|| view! { <ScreenEdit screen=Screen::Meals/> }/>
                        <Route path=path!("/blogs/new") view=|| view! { <ScreenCreate screen=Screen::Blogs/> }/>
                        <Route path=path!("/blogs/edit/:id") view=|| view! { <ScreenEdit screen=Screen::Blogs/> }/>
                        <Route path=path!("/categories/new") view=|| view! { <ScreenCreate screen=Screen::Categories/> }/>
                        <Route path=path!("/categories/edit/:id") view=|| view! { <ScreenEdit screen=Screen::Categories/> }/>
                    </Routes>
                </div>
            </div>
        </Router>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A href=href attr:class="block p-2 hover:bg-gray-700 rounded transition-colors">
            {label}
        </A>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
