mod painter;
mod utils;

pub use painter::Painter;
