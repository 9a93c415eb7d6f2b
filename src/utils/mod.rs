//! Utility functions: image decoding and logging setup.

pub mod image;

pub use image::{decode_image, dynamic_to_rgb, load_image};

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter (`RUST_LOG`) and a
/// formatting layer writing to stderr. Call once at the start of an application.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
