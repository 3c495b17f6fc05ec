mod common;
mod hydrate;
mod normalizer;
