// Adapters layer: concrete implementations for external systems (http, html, output).

pub mod html;
pub mod http;
pub mod output;
