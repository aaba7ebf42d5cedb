pub(crate) mod error;
pub(crate) mod post;
pub(crate) mod product;
pub(crate) mod user;
