pub(crate) mod cities;
pub(crate) mod serve;
