pub(crate) mod decode;
pub(crate) mod layer;
pub(crate) mod provider;
