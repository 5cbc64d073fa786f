//! Common utils for tuiform executables.
