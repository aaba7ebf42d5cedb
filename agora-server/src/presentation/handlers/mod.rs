pub(crate) mod posts;
pub(crate) mod products;
pub(crate) mod users;
