mod common;
mod market;
mod routing;
