//! Filesystem primitives shared by the snapshot store and report writer

pub mod atomic;

pub use atomic::atomic_write;
