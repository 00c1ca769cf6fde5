#![allow(missing_docs)]

mod ape;
mod dispatch;
mod flac;
mod mp4;
mod mpeg;
pub(crate) mod util;
