pub(crate) mod complex;
