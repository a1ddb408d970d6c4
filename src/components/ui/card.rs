use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "flex flex-col gap-3 rounded-lg border border-gray-700 bg-gray-800 p-4 text-gray-200 shadow-sm"}
    clx! {CardTitle, h2, "leading-none font-semibold"}
    clx! {CardDescription, p, "text-gray-400 text-xs"}
    clx! {CardList, ul, "flex flex-col gap-2"}
    clx! {CardItem, li, "flex items-center justify-between rounded-md px-3 py-2 hover:bg-gray-700"}
}

pub use components::*;
