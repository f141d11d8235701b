pub(crate) mod utf8;
