mod board;
mod common;
mod host;
mod selection;
