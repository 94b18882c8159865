mod common;
mod preference;
