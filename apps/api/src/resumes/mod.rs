// Original and generated resume files: upload, lookup, delete.

pub mod handlers;
pub mod text;
