use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-md text-sm font-medium transition-colors disabled:pointer-events-none disabled:opacity-50 outline-none focus-visible:ring-2 focus-visible:ring-blue-500 hover:cursor-pointer select-none",
        variants: {
            variant: {
                Default: "bg-blue-500 text-white shadow-sm hover:bg-blue-600",
                Destructive: "text-gray-400 hover:bg-red-500/20 hover:text-red-300",
            },
            size: {
                Default: "h-9 px-4 py-2",
                Icon: "size-8",
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
