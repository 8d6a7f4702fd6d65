//! Application setup and state management.
//!
//! Handles the app lifecycle, window configuration and the loading state
//! machine for both native and WASM targets.

/// Plugin registration and system scheduling.
///
/// Creates the main app with the particle material, the flow simulation,
/// the loading pipeline and the debug UI.
pub mod app_setup;

/// Loading → AssetsLoaded → Running transitions and their render-world mirror.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
pub mod window_config;
