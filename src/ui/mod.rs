pub mod progress;

pub use progress::{TransmitProgress, templates};

pub fn print_banner() {
    eprintln!("rtty-rs {}", env!("CARGO_PKG_VERSION"));
}
