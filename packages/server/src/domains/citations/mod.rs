//! Citations domain - exposes the citation analyzer to admins

pub mod edges;
