pub(crate) mod decode;
pub(crate) mod descriptor;
pub(crate) mod encode;
pub(crate) mod format;
pub(crate) mod header;
pub(crate) mod source;
