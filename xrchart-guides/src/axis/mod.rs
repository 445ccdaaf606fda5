pub mod band;
pub mod marks;
pub mod numeric;
pub mod opts;
pub mod spec;
