pub(crate) mod alloc;
pub(crate) mod io;
pub mod multimap;
pub(crate) mod text;
