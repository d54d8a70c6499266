pub(crate) mod bytes_reader;
pub mod func;
