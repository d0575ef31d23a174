mod common;
mod requirements;
mod service;
