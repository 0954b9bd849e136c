//! WASM entry point for the emend admin panel.
//!
//! Exposes the panel to JavaScript as a single [`JsAdmin`] handle: construct
//! it with an optional config object and the panel wires itself to the page,
//! the identity widget, and the visual editor library.

mod admin;
mod bindings;
mod host;
mod types;

pub use admin::*;
pub use bindings::*;
pub use host::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console tracing for better diagnostics.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    {
        use tracing::Level;
        use tracing::subscriber::set_global_default;
        use tracing_subscriber::Registry;
        use tracing_subscriber::layer::SubscriberExt;

        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(console_level)
                .build(),
        );

        let reg = Registry::default().with(wasm_layer);

        // Ignored when the host page already installed a subscriber.
        let _ = set_global_default(reg);
    }
}
