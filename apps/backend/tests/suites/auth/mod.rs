pub mod gate;
pub mod interop;
