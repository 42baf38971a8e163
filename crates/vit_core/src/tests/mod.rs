//! End-to-end tests of [`crate::ImageTool`] against a recording surface.
