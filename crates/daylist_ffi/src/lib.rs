//! Flutter-facing FFI crate for Daylist.
//! Exposes the task store to Dart through `flutter_rust_bridge`.

pub mod api;
